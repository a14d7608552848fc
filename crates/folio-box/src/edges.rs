//! Per-edge values and the 1/2/3/4-value shorthand rule.
//!
//! Margin, padding and border-width all use the same expansion:
//!
//! | values        | top | right | bottom | left |
//! |---------------|-----|-------|--------|------|
//! | `a`           | a   | a     | a      | a    |
//! | `a b`         | a   | b     | a      | b    |
//! | `a b c`       | a   | b     | c      | b    |
//! | `a b c d`     | a   | b     | c      | d    |

use std::fmt;

use serde::Serialize;

use crate::error::{BoxModelError, Result};
use crate::extent::{Extent, ParseOptions, RawValue, parse_extent};

/// Physical side of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Top edge of the box
    Top,
    /// Right edge of the box
    Right,
    /// Bottom edge of the box
    Bottom,
    /// Left edge of the box
    Left,
}

impl Side {
    /// The axis this side bounds.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// Whether this is the start (left/top) end of its axis.
    #[must_use]
    pub const fn is_near(self) -> bool {
        matches!(self, Self::Left | Self::Top)
    }
}

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right; sized by `width`.
    Horizontal,
    /// Top to bottom; sized by `height`.
    Vertical,
}

impl Axis {
    /// The start side: left or top.
    #[must_use]
    pub const fn near(self) -> Side {
        match self {
            Self::Horizontal => Side::Left,
            Self::Vertical => Side::Top,
        }
    }

    /// The end side: right or bottom.
    #[must_use]
    pub const fn far(self) -> Side {
        match self {
            Self::Horizontal => Side::Right,
            Self::Vertical => Side::Bottom,
        }
    }

    /// Name of the dimension property sizing this axis.
    #[must_use]
    pub const fn dimension_name(self) -> &'static str {
        match self {
            Self::Horizontal => "width",
            Self::Vertical => "height",
        }
    }
}

/// Non-negative lengths in points for each edge of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Edges {
    /// Top edge size.
    pub top: f64,
    /// Right edge size.
    pub right: f64,
    /// Bottom edge size.
    pub bottom: f64,
    /// Left edge size.
    pub left: f64,
}

impl Edges {
    /// All four edges set to `value`.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Size of the edge on `side`.
    #[must_use]
    pub const fn get(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// Set the edge on `side`.
    pub const fn set(&mut self, side: Side, value: f64) {
        match side {
            Side::Top => self.top = value,
            Side::Right => self.right = value,
            Side::Bottom => self.bottom = value,
            Side::Left => self.left = value,
        }
    }

    /// Sum of both edges bounding `axis`.
    #[must_use]
    pub fn along(&self, axis: Axis) -> f64 {
        self.get(axis.near()) + self.get(axis.far())
    }
}

/// Shorthand read-back: `top right bottom left`.
impl fmt::Display for Edges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Expand a margin/padding/border-width shorthand into four edges.
///
/// A number is a single value. Text is split on whitespace and each token
/// parsed as a non-negative extent; `auto` is not a valid edge size.
///
/// # Errors
///
/// [`BoxModelError::InvalidShorthand`] for other than 1 to 4 tokens, and any
/// error from parsing an individual token.
pub fn expand_shorthand(property: &'static str, value: &RawValue) -> Result<Edges> {
    match value {
        RawValue::Number(_) => Ok(Edges::uniform(parse_edge(value)?)),
        RawValue::Text(text) => {
            let tokens: Vec<&str> = text.split_whitespace().collect();
            expand_tokens(property, &tokens)
        }
    }
}

/// Expand already-split shorthand tokens into four edges.
///
/// # Errors
///
/// See [`expand_shorthand`].
pub fn expand_tokens(property: &'static str, tokens: &[&str]) -> Result<Edges> {
    let edge = |token: &str| parse_edge(&RawValue::from(token));

    let (top, right, bottom, left) = match *tokens {
        [all] => {
            let all = edge(all)?;
            (all, all, all, all)
        }
        [vertical, horizontal] => {
            let (vertical, horizontal) = (edge(vertical)?, edge(horizontal)?);
            (vertical, horizontal, vertical, horizontal)
        }
        [top, horizontal, bottom] => {
            let (top, horizontal, bottom) = (edge(top)?, edge(horizontal)?, edge(bottom)?);
            (top, horizontal, bottom, horizontal)
        }
        [top, right, bottom, left] => (edge(top)?, edge(right)?, edge(bottom)?, edge(left)?),
        _ => {
            return Err(BoxModelError::InvalidShorthand {
                property,
                count: tokens.len(),
            });
        }
    };

    Ok(Edges {
        top,
        right,
        bottom,
        left,
    })
}

/// Parse one edge size: a non-negative length, never `auto`.
pub(crate) fn parse_edge(value: &RawValue) -> Result<f64> {
    match parse_extent(value, ParseOptions::NON_NEGATIVE)? {
        Some(Extent::Points(points)) => Ok(points),
        Some(Extent::Auto) | None => Err(BoxModelError::InvalidExtent(value.to_string())),
    }
}
