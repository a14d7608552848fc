//! The desired style of a box and the rules keeping it consistent.
//!
//! Horizontal and vertical constraints share one state type,
//! [`AxisConstraint`], and the same two transitions:
//!
//! - writing an offset (`left`/`right`, `top`/`bottom`) re-derives the
//!   dimension once both offsets on that axis are set and a context is known;
//! - writing the dimension (`width`/`height`) drops the far offset when both
//!   offsets were set, so the dimension and offsets never over-constrain the
//!   axis.

use serde::Serialize;
use strum_macros::{Display, EnumString};

use folio_common::warning::warn_once;

use crate::edges::{Axis, Edges, Side};
use crate::error::{BoxModelError, Result};
use crate::extent::RawValue;

/// Positioning scheme of a box in its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Laid out in flow.
    #[default]
    Static,
    /// In flow, shifted by its offsets.
    Relative,
    /// Out of flow, anchored to its context by its offsets.
    Absolute,
}

impl Position {
    /// Parse a position keyword, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidPosition`] for an unknown keyword.
    pub fn parse(value: &str) -> Result<Self> {
        value
            .trim()
            .parse()
            .map_err(|_| BoxModelError::InvalidPosition(value.to_owned()))
    }
}

impl From<Position> for RawValue {
    fn from(value: Position) -> Self {
        Self::Text(value.to_string())
    }
}

/// Which regions an explicit width or height includes.
///
/// | mode      | explicit size covers          |
/// |-----------|-------------------------------|
/// | `content` | content                       |
/// | `padding` | content + padding             |
/// | `border`  | content + padding + border    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BoxSizing {
    /// Size excludes padding and border.
    #[default]
    Content,
    /// Size includes padding, excludes border.
    Padding,
    /// Size includes padding and border.
    Border,
}

impl BoxSizing {
    /// Parse a sizing keyword. A trailing `-box` (any case) or `Box` is
    /// ignored, so `border-box` and `borderBox` both mean `border`.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidSizingMode`] for an unknown keyword.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let stem = trimmed
            .strip_suffix("Box")
            .or_else(|| {
                let split = trimmed.len().checked_sub(4)?;
                let (stem, suffix) = (trimmed.get(..split)?, trimmed.get(split..)?);
                suffix.eq_ignore_ascii_case("-box").then_some(stem)
            })
            .unwrap_or(trimmed);

        stem.to_ascii_lowercase()
            .parse()
            .map_err(|_| BoxModelError::InvalidSizingMode(value.to_owned()))
    }

    /// Size to store for an axis whose outer extent is `available`, given the
    /// border and padding this box has on that axis.
    #[must_use]
    pub fn inner_size(self, available: f64, insets: AxisInsets) -> f64 {
        match self {
            Self::Content => available - insets.padding - insets.border,
            Self::Padding => available - insets.border,
            Self::Border => available,
        }
    }
}

impl From<BoxSizing> for RawValue {
    fn from(value: BoxSizing) -> Self {
        Self::Text(value.to_string())
    }
}

/// Border and padding summed over both ends of one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisInsets {
    /// Border widths on both ends.
    pub border: f64,
    /// Padding on both ends.
    pub padding: f64,
}

/// Offsets and dimension constraining one axis of a box.
///
/// `None` is `auto`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisConstraint {
    /// Offset from the context's near edge (`left` or `top`).
    pub near: Option<f64>,
    /// Offset from the context's far edge (`right` or `bottom`).
    pub far: Option<f64>,
    /// Explicit dimension (`width` or `height`).
    pub size: Option<f64>,
}

/// Context measurements needed to derive a dimension from two offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derivation {
    /// Content-box extent of the context on this axis.
    pub available: f64,
    /// Sizing mode of the box.
    pub sizing: BoxSizing,
    /// Border and padding of the box on this axis.
    pub insets: AxisInsets,
}

impl AxisConstraint {
    /// State after writing the offset at the `near` or far end, along with the
    /// size derived before clamping, if one was derived.
    ///
    /// With both offsets set and a `derivation` available, the size becomes
    /// whatever remains of the context between the offsets, reduced by the
    /// insets the sizing mode keeps outside the size, and never less than 0.
    /// Without a derivation the size is left as it was.
    #[must_use]
    pub fn with_offset(
        self,
        near: bool,
        offset: Option<f64>,
        derivation: Option<Derivation>,
    ) -> (Self, Option<f64>) {
        let mut next = self;
        if near {
            next.near = offset;
        } else {
            next.far = offset;
        }

        let derived = match (next.near, next.far, derivation) {
            (Some(near), Some(far), Some(derivation)) => Some(
                derivation
                    .sizing
                    .inner_size(derivation.available - near - far, derivation.insets),
            ),
            _ => None,
        };
        if let Some(derived) = derived {
            next.size = Some(derived.max(0.0));
        }
        (next, derived)
    }

    /// State after writing the explicit size.
    #[must_use]
    pub const fn with_size(self, size: Option<f64>) -> Self {
        let mut next = self;
        next.size = size;
        if size.is_some() && next.near.is_some() && next.far.is_some() {
            next.far = None;
        }
        next
    }
}

/// Desired style of a box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxStyle {
    /// Positioning scheme.
    pub position: Position,
    /// Sizing mode for `width`/`height`.
    pub sizing: BoxSizing,
    /// `left`, `right` and `width`.
    pub horizontal: AxisConstraint,
    /// `top`, `bottom` and `height`.
    pub vertical: AxisConstraint,
    /// Margin widths.
    pub margin: Edges,
    /// Border widths. Border style and color are not computed.
    pub border: Edges,
    /// Padding widths.
    pub padding: Edges,
}

impl BoxStyle {
    /// Constraint of `axis`.
    #[must_use]
    pub const fn axis(&self, axis: Axis) -> &AxisConstraint {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    const fn axis_mut(&mut self, axis: Axis) -> &mut AxisConstraint {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Offset stored for `side`.
    #[must_use]
    pub const fn offset(&self, side: Side) -> Option<f64> {
        let constraint = self.axis(side.axis());
        if side.is_near() {
            constraint.near
        } else {
            constraint.far
        }
    }

    /// Border and padding of this box along `axis`.
    #[must_use]
    pub fn insets(&self, axis: Axis) -> AxisInsets {
        AxisInsets {
            border: self.border.along(axis),
            padding: self.padding.along(axis),
        }
    }

    /// Store the offset for `side`, re-deriving the dimension on its axis
    /// from `available` (the context's content extent) when both offsets are
    /// set. Pass `None` for `available` when there is no context.
    pub fn set_offset(&mut self, side: Side, offset: Option<f64>, available: Option<f64>) {
        let axis = side.axis();
        let derivation = available.map(|available| Derivation {
            available,
            sizing: self.sizing,
            insets: self.insets(axis),
        });

        let (next, derived) = self
            .axis(axis)
            .with_offset(side.is_near(), offset, derivation);

        if let Some(derived) = derived {
            log::debug!(
                "{} derived from {side:?} offset: {derived}pt",
                axis.dimension_name()
            );
            if derived < 0.0 {
                let _ = warn_once(
                    "box",
                    &format!(
                        "{} derived from offsets is negative; using 0",
                        axis.dimension_name()
                    ),
                );
            }
        }

        *self.axis_mut(axis) = next;
    }

    /// Store the explicit dimension of `axis`, dropping the far offset if it
    /// would over-constrain the axis.
    pub fn set_size(&mut self, axis: Axis, size: Option<f64>) {
        let next = self.axis(axis).with_size(size);
        *self.axis_mut(axis) = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_INSETS: AxisInsets = AxisInsets {
        border: 0.0,
        padding: 0.0,
    };

    #[test]
    fn test_position_keywords() {
        assert_eq!(Position::parse(" Absolute ").unwrap(), Position::Absolute);
        assert_eq!(Position::parse("relative").unwrap(), Position::Relative);
        assert_eq!(
            Position::parse("fixed"),
            Err(BoxModelError::InvalidPosition("fixed".to_owned()))
        );
    }

    #[test]
    fn test_box_sizing_suffixes() {
        assert_eq!(BoxSizing::parse("border-box").unwrap(), BoxSizing::Border);
        assert_eq!(BoxSizing::parse("PADDING-BOX").unwrap(), BoxSizing::Padding);
        assert_eq!(BoxSizing::parse("contentBox").unwrap(), BoxSizing::Content);
        assert_eq!(BoxSizing::parse(" content ").unwrap(), BoxSizing::Content);
        assert!(BoxSizing::parse("margin-box").is_err());
        assert!(BoxSizing::parse("box").is_err());
        assert!(BoxSizing::parse("").is_err());
    }

    #[test]
    fn test_inner_size_per_mode() {
        let insets = AxisInsets {
            border: 10.0,
            padding: 6.0,
        };
        assert_eq!(BoxSizing::Content.inner_size(100.0, insets), 84.0);
        assert_eq!(BoxSizing::Padding.inner_size(100.0, insets), 90.0);
        assert_eq!(BoxSizing::Border.inner_size(100.0, insets), 100.0);
    }

    #[test]
    fn test_offset_derives_size_only_with_both_offsets() {
        let derivation = Some(Derivation {
            available: 200.0,
            sizing: BoxSizing::Content,
            insets: NO_INSETS,
        });

        let (one, derived) = AxisConstraint::default().with_offset(true, Some(10.0), derivation);
        assert_eq!(one.size, None);
        assert_eq!(derived, None);

        let (both, derived) = one.with_offset(false, Some(30.0), derivation);
        assert_eq!(both.size, Some(160.0));
        assert_eq!(derived, Some(160.0));
    }

    #[test]
    fn test_offset_without_context_keeps_size() {
        let start = AxisConstraint {
            near: Some(10.0),
            far: None,
            size: Some(50.0),
        };
        let (next, derived) = start.with_offset(false, Some(10.0), None);
        assert_eq!(derived, None);
        assert_eq!(next.size, Some(50.0));
        assert_eq!(next.far, Some(10.0));
    }

    #[test]
    fn test_negative_derivation_clamps_to_zero() {
        let derivation = Some(Derivation {
            available: 20.0,
            sizing: BoxSizing::Border,
            insets: NO_INSETS,
        });
        let (next, derived) = AxisConstraint {
            near: Some(15.0),
            far: None,
            size: None,
        }
        .with_offset(false, Some(15.0), derivation);
        assert_eq!(next.size, Some(0.0));
        assert_eq!(derived, Some(-10.0));
    }

    #[test]
    fn test_negative_derivation_warns_once_per_axis() {
        for available in [10.0, 20.0, 30.0] {
            let mut style = BoxStyle::default();
            style.set_offset(Side::Top, Some(40.0), Some(available));
            style.set_offset(Side::Bottom, Some(40.0), Some(available));
            assert_eq!(style.vertical.size, Some(0.0));
        }
        assert!(!warn_once(
            "box",
            "height derived from offsets is negative; using 0"
        ));
    }

    #[test]
    fn test_size_drops_far_offset_when_over_constrained() {
        let start = AxisConstraint {
            near: Some(10.0),
            far: Some(20.0),
            size: Some(70.0),
        };
        let next = start.with_size(Some(40.0));
        assert_eq!(next.far, None);
        assert_eq!(next.near, Some(10.0));
        assert_eq!(next.size, Some(40.0));

        let auto = start.with_size(None);
        assert_eq!(auto.far, Some(20.0));
    }

    #[test]
    fn test_axes_follow_identical_rules() {
        let mut style = BoxStyle::default();
        style.set_offset(Side::Left, Some(5.0), Some(100.0));
        style.set_offset(Side::Right, Some(5.0), Some(100.0));
        style.set_offset(Side::Top, Some(5.0), Some(100.0));
        style.set_offset(Side::Bottom, Some(5.0), Some(100.0));
        assert_eq!(style.horizontal, style.vertical);

        style.set_size(Axis::Horizontal, Some(10.0));
        style.set_size(Axis::Vertical, Some(10.0));
        assert_eq!(style.horizontal, style.vertical);
        assert_eq!(style.offset(Side::Right), None);
        assert_eq!(style.offset(Side::Bottom), None);
    }
}
