//! Applying batches of named style properties.
//!
//! A batch is either a declaration string such as
//! `"box-sizing: border-box; width: 10cm; left: 2cm"` or an ordered mapping
//! of property names to raw values. Names are resolved through
//! [`Property`], which accepts both the camel-case and the hyphenated form.
//!
//! Properties are applied by priority, highest first, and in batch order
//! within one priority:
//!
//! | priority | properties          |
//! |----------|---------------------|
//! | 2        | `boxSizing`         |
//! | 1        | `width`, `height`   |
//! | 0        | everything else     |
//!
//! The sizing mode decides how offsets derive a dimension, and an explicit
//! dimension is written before the offsets that may derive or keep it.

use serde_json::Value;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{BoxModelError, Result};
use crate::extent::RawValue;
use crate::model::BoxModel;

/// A writable box-model property.
///
/// Parsing accepts the camel-case name and, where it differs, the
/// hyphenated alias. [`Display`](std::fmt::Display) yields the camel-case
/// name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Property {
    /// `position`
    #[strum(to_string = "position")]
    Position,
    /// `boxSizing`, `box-sizing`
    #[strum(to_string = "boxSizing", serialize = "box-sizing")]
    BoxSizing,
    /// `top`
    #[strum(to_string = "top")]
    Top,
    /// `right`
    #[strum(to_string = "right")]
    Right,
    /// `bottom`
    #[strum(to_string = "bottom")]
    Bottom,
    /// `left`
    #[strum(to_string = "left")]
    Left,
    /// `width`
    #[strum(to_string = "width")]
    Width,
    /// `height`
    #[strum(to_string = "height")]
    Height,
    /// `margin`
    #[strum(to_string = "margin")]
    Margin,
    /// `marginTop`, `margin-top`
    #[strum(to_string = "marginTop", serialize = "margin-top")]
    MarginTop,
    /// `marginRight`, `margin-right`
    #[strum(to_string = "marginRight", serialize = "margin-right")]
    MarginRight,
    /// `marginBottom`, `margin-bottom`
    #[strum(to_string = "marginBottom", serialize = "margin-bottom")]
    MarginBottom,
    /// `marginLeft`, `margin-left`
    #[strum(to_string = "marginLeft", serialize = "margin-left")]
    MarginLeft,
    /// `padding`
    #[strum(to_string = "padding")]
    Padding,
    /// `paddingTop`, `padding-top`
    #[strum(to_string = "paddingTop", serialize = "padding-top")]
    PaddingTop,
    /// `paddingRight`, `padding-right`
    #[strum(to_string = "paddingRight", serialize = "padding-right")]
    PaddingRight,
    /// `paddingBottom`, `padding-bottom`
    #[strum(to_string = "paddingBottom", serialize = "padding-bottom")]
    PaddingBottom,
    /// `paddingLeft`, `padding-left`
    #[strum(to_string = "paddingLeft", serialize = "padding-left")]
    PaddingLeft,
    /// `borderWidth`, `border-width`
    #[strum(to_string = "borderWidth", serialize = "border-width")]
    BorderWidth,
    /// `borderTopWidth`, `border-top-width`
    #[strum(to_string = "borderTopWidth", serialize = "border-top-width")]
    BorderTopWidth,
    /// `borderRightWidth`, `border-right-width`
    #[strum(to_string = "borderRightWidth", serialize = "border-right-width")]
    BorderRightWidth,
    /// `borderBottomWidth`, `border-bottom-width`
    #[strum(to_string = "borderBottomWidth", serialize = "border-bottom-width")]
    BorderBottomWidth,
    /// `borderLeftWidth`, `border-left-width`
    #[strum(to_string = "borderLeftWidth", serialize = "border-left-width")]
    BorderLeftWidth,
}

/// Highest value returned by [`Property::priority`].
pub const HIGHEST_PRIORITY: u8 = 2;

impl Property {
    /// Resolve a property name or alias. Matching is case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Application priority within a batch; higher is applied first.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::BoxSizing => 2,
            Self::Width | Self::Height => 1,
            _ => 0,
        }
    }
}

/// An ordered mapping of property names to raw values.
///
/// Inserting a name that is already present replaces its value but keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleBatch {
    entries: Vec<(String, RawValue)>,
}

impl StyleBatch {
    /// An empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse a `name: value; name: value` declaration list.
    ///
    /// `/* */` block comments and `//` line comments are removed first.
    /// Names containing a hyphen are lowercased. Declarations without a
    /// name, a colon or a value are ignored, as are names with characters
    /// other than letters and hyphens.
    ///
    /// ```
    /// use folio_box::StyleBatch;
    ///
    /// let batch = StyleBatch::parse("Margin-Top: 5pt; /* note */ width: 2cm // trailing");
    /// assert_eq!(batch.len(), 2);
    /// assert_eq!(batch.get("margin-top").map(ToString::to_string).as_deref(), Some("5pt"));
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut batch = Self::new();
        for declaration in strip_comments(text).split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());
            if name.is_empty()
                || value.is_empty()
                || !name.bytes().all(|b| b.is_ascii_alphabetic() || b == b'-')
            {
                continue;
            }

            let name = if name.contains('-') {
                name.to_ascii_lowercase()
            } else {
                name.to_owned()
            };
            batch.insert(name, value);
        }
        batch
    }

    /// Add or replace the value of `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value stored for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of distinct names.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the batch has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<RawValue>> FromIterator<(N, V)> for StyleBatch {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut batch = Self::new();
        for (name, value) in iter {
            batch.insert(name, value);
        }
        batch
    }
}

/// Input accepted by [`BoxModel::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum StyleSource {
    /// A declaration list, parsed with [`StyleBatch::parse`].
    Declarations(String),
    /// An already structured batch.
    Batch(StyleBatch),
}

impl From<&str> for StyleSource {
    fn from(value: &str) -> Self {
        Self::Declarations(value.to_owned())
    }
}

impl From<String> for StyleSource {
    fn from(value: String) -> Self {
        Self::Declarations(value)
    }
}

impl From<&String> for StyleSource {
    fn from(value: &String) -> Self {
        Self::Declarations(value.clone())
    }
}

impl From<StyleBatch> for StyleSource {
    fn from(value: StyleBatch) -> Self {
        Self::Batch(value)
    }
}

/// A JSON string is a declaration list; a JSON object is a mapping whose
/// members must be numbers or strings.
impl TryFrom<Value> for StyleSource {
    type Error = BoxModelError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Self::Declarations(text)),
            Value::Object(members) => {
                let mut batch = StyleBatch::new();
                for (name, member) in members {
                    let raw = match member {
                        Value::String(text) => RawValue::Text(text),
                        Value::Number(number) => number
                            .as_f64()
                            .map(RawValue::Number)
                            .ok_or_else(|| BoxModelError::InvalidBatchSource(number.to_string()))?,
                        other => return Err(BoxModelError::InvalidBatchSource(other.to_string())),
                    };
                    batch.insert(name, raw);
                }
                Ok(Self::Batch(batch))
            }
            other => Err(BoxModelError::InvalidBatchSource(other.to_string())),
        }
    }
}

impl BoxModel {
    /// Apply a batch of properties in priority order.
    ///
    /// Unrecognized names are skipped.
    ///
    /// # Errors
    ///
    /// The first error raised by a property setter. Properties applied
    /// before it keep their new values.
    pub fn apply(&mut self, source: impl Into<StyleSource>) -> Result<()> {
        let batch = match source.into() {
            StyleSource::Declarations(text) => StyleBatch::parse(&text),
            StyleSource::Batch(batch) => batch,
        };

        let mut resolved = Vec::with_capacity(batch.len());
        for (name, value) in batch.entries() {
            match Property::from_name(name) {
                Some(property) => resolved.push((property, value)),
                None => log::trace!("skipping unrecognized property {name:?}"),
            }
        }

        for priority in (0..=HIGHEST_PRIORITY).rev() {
            for (property, value) in &resolved {
                if property.priority() == priority {
                    self.set_property(*property, (*value).clone())?;
                }
            }
        }
        Ok(())
    }

    /// Write a single property.
    ///
    /// # Errors
    ///
    /// Whatever the property's setter raises.
    pub fn set_property(&mut self, property: Property, value: impl Into<RawValue>) -> Result<()> {
        let value = value.into();
        match property {
            Property::Position => self.set_position(value),
            Property::BoxSizing => self.set_box_sizing(value),
            Property::Top => self.set_top(value),
            Property::Right => self.set_right(value),
            Property::Bottom => self.set_bottom(value),
            Property::Left => self.set_left(value),
            Property::Width => self.set_width(value),
            Property::Height => self.set_height(value),
            Property::Margin => self.set_margin(value),
            Property::MarginTop => self.set_margin_top(value),
            Property::MarginRight => self.set_margin_right(value),
            Property::MarginBottom => self.set_margin_bottom(value),
            Property::MarginLeft => self.set_margin_left(value),
            Property::Padding => self.set_padding(value),
            Property::PaddingTop => self.set_padding_top(value),
            Property::PaddingRight => self.set_padding_right(value),
            Property::PaddingBottom => self.set_padding_bottom(value),
            Property::PaddingLeft => self.set_padding_left(value),
            Property::BorderWidth => self.set_border_width(value),
            Property::BorderTopWidth => self.set_border_top_width(value),
            Property::BorderRightWidth => self.set_border_right_width(value),
            Property::BorderBottomWidth => self.set_border_bottom_width(value),
            Property::BorderLeftWidth => self.set_border_left_width(value),
        }
    }

    /// Read a property back in its textual form.
    ///
    /// Unset offsets and dimensions read as `auto`; shorthands as four
    /// space-separated values.
    #[must_use]
    pub fn property_value(&self, property: Property) -> String {
        match property {
            Property::Position => self.position().to_string(),
            Property::BoxSizing => self.box_sizing().to_string(),
            Property::Top => self.top().to_string(),
            Property::Right => self.right().to_string(),
            Property::Bottom => self.bottom().to_string(),
            Property::Left => self.left().to_string(),
            Property::Width => self.width().to_string(),
            Property::Height => self.height().to_string(),
            Property::Margin => self.margin(),
            Property::MarginTop => self.margin_top().to_string(),
            Property::MarginRight => self.margin_right().to_string(),
            Property::MarginBottom => self.margin_bottom().to_string(),
            Property::MarginLeft => self.margin_left().to_string(),
            Property::Padding => self.padding(),
            Property::PaddingTop => self.padding_top().to_string(),
            Property::PaddingRight => self.padding_right().to_string(),
            Property::PaddingBottom => self.padding_bottom().to_string(),
            Property::PaddingLeft => self.padding_left().to_string(),
            Property::BorderWidth => self.border_width(),
            Property::BorderTopWidth => self.border_top_width().to_string(),
            Property::BorderRightWidth => self.border_right_width().to_string(),
            Property::BorderBottomWidth => self.border_bottom_width().to_string(),
            Property::BorderLeftWidth => self.border_left_width().to_string(),
        }
    }
}

/// Remove `/* */` and `//` comments. An unterminated `/*` runs to the end.
fn strip_comments(text: &str) -> String {
    let mut uncommented = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        uncommented.push_str(&rest[..start]);
        uncommented.push(' ');
        let body = &rest[start + 2..];
        rest = body.find("*/").map_or("", |end| &body[end + 2..]);
    }
    uncommented.push_str(rest);

    uncommented
        .lines()
        .map(|line| line.find("//").map_or(line, |end| &line[..end]))
        .collect::<Vec<_>>()
        .join("\n")
}
