//! Extents and their textual syntax.
//!
//! All lengths are kept in points (1/72 inch). Input may be a plain number
//! (points) or a string such as `"12pt"`, `" 2,5 cm "`, `"-3mm"` or `"auto"`.
//!
//! ```text
//! extent  := ws* ( sign? ws* number ws* unit? | "auto" ) ws*
//! number  := digit* ( "," | "." ) digit+ | digit+
//! unit    := "pt" | "cm" | "mm" | "m"        (case-insensitive)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use strum_macros::{Display, EnumString};

use crate::error::{BoxModelError, Result};

/// A length in points, or `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Extent {
    /// The value is unset and resolved from context, if at all.
    #[default]
    Auto,
    /// A definite length in points.
    Points(f64),
}

impl Extent {
    /// Check if the value is `auto`.
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// The length in points, or `None` for `auto`.
    #[must_use]
    pub const fn points(self) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::Points(points) => Some(points),
        }
    }
}

impl From<Option<f64>> for Extent {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Auto, Self::Points)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Points(points) => write!(f, "{points}"),
        }
    }
}

impl Serialize for Extent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Points(points) => serializer.serialize_f64(*points),
        }
    }
}

impl FromStr for Extent {
    type Err = BoxModelError;

    /// Parse strictly, allowing negative lengths.
    fn from_str(s: &str) -> Result<Self> {
        let input = RawValue::from(s);
        parse_extent(&input, ParseOptions::OFFSET)?
            .ok_or_else(|| BoxModelError::InvalidExtent(input.to_string()))
    }
}

/// Physical length units accepted in extent strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Unit {
    /// Typographic point, 1/72 inch. Used when no unit is given.
    Pt,
    /// Centimetre.
    Cm,
    /// Millimetre.
    Mm,
    /// Metre.
    M,
}

impl Unit {
    /// Convert `value` given in this unit into points.
    #[must_use]
    pub fn to_points(self, value: f64) -> f64 {
        match self {
            Self::Pt => value,
            Self::Cm => value / 2.54 * 72.0,
            Self::Mm => value / 25.4 * 72.0,
            Self::M => value / 0.0254 * 72.0,
        }
    }
}

/// A property value as supplied by a caller, before parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// A number, taken as points.
    Number(f64),
    /// Text to be parsed: an extent, a shorthand or a keyword.
    Text(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for RawValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<Extent> for RawValue {
    fn from(value: Extent) -> Self {
        match value {
            Extent::Auto => Self::Text("auto".to_owned()),
            Extent::Points(points) => Self::Number(points),
        }
    }
}

/// Validation applied by [`parse_extent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail with [`BoxModelError::InvalidExtent`] on malformed input instead
    /// of returning `None`.
    pub reject_invalid: bool,
    /// Fail with [`BoxModelError::NegativeExtent`] on lengths below zero.
    pub reject_negative: bool,
}

impl ParseOptions {
    /// Offsets and coordinates: must be well-formed, may be negative.
    pub const OFFSET: Self = Self {
        reject_invalid: true,
        reject_negative: false,
    };

    /// Widths, heights, margins, paddings and border widths.
    pub const NON_NEGATIVE: Self = Self {
        reject_invalid: true,
        reject_negative: true,
    };

    /// Malformed input yields `None`; negative lengths are accepted.
    pub const LENIENT: Self = Self {
        reject_invalid: false,
        reject_negative: false,
    };
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::OFFSET
    }
}

/// Parse a single extent.
///
/// Returns `Ok(None)` only when `options.reject_invalid` is off and the input
/// is not a valid extent; callers must treat that as "no value".
///
/// # Errors
///
/// [`BoxModelError::InvalidExtent`] for malformed input or NaN (when
/// `reject_invalid`), [`BoxModelError::NegativeExtent`] for a negative length
/// (when `reject_negative`).
pub fn parse_extent(input: &RawValue, options: ParseOptions) -> Result<Option<Extent>> {
    let parsed = match input {
        RawValue::Number(number) if number.is_nan() => None,
        RawValue::Number(number) => Some(Extent::Points(*number)),
        RawValue::Text(text) => parse_text(text),
    };

    let Some(extent) = parsed else {
        if options.reject_invalid {
            return Err(BoxModelError::InvalidExtent(input.to_string()));
        }
        return Ok(None);
    };

    if let Extent::Points(points) = extent
        && options.reject_negative
        && points < 0.0
    {
        return Err(BoxModelError::NegativeExtent(points));
    }

    Ok(Some(extent))
}

fn parse_text(text: &str) -> Option<Extent> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("auto") {
        return Some(Extent::Auto);
    }

    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed[1..].trim_start()),
        Some(b'+') => (false, trimmed[1..].trim_start()),
        _ => (false, trimmed),
    };

    let numeric_len = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'.' || *b == b',')
        .count();
    let (numeric, suffix) = unsigned.split_at(numeric_len);

    let magnitude = parse_magnitude(numeric)?;
    let suffix = suffix.trim();
    let unit = if suffix.is_empty() {
        Unit::Pt
    } else {
        suffix.parse::<Unit>().ok()?
    };

    let value = if negative { -magnitude } else { magnitude };
    Some(Extent::Points(unit.to_points(value)))
}

/// `digit* [,.] digit+ | digit+`, with either separator read as a decimal point.
fn parse_magnitude(numeric: &str) -> Option<f64> {
    let mut parts = numeric.splitn(2, [',', '.']);
    let whole = parts.next().unwrap_or_default();

    match parts.next() {
        None if whole.is_empty() => None,
        None => whole.parse().ok(),
        Some(fraction) => {
            if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            format!("0{whole}.{fraction}").parse().ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict(text: &str) -> Extent {
        parse_extent(&RawValue::from(text), ParseOptions::OFFSET)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_bare_number_is_points() {
        assert_eq!(strict("72"), Extent::Points(72.0));
        assert_eq!(strict(" \t\n\r 7.2 \t\n "), Extent::Points(7.2));
        assert_eq!(
            parse_extent(&RawValue::Number(12.5), ParseOptions::OFFSET).unwrap(),
            Some(Extent::Points(12.5))
        );
    }

    #[test]
    fn test_units_with_inner_whitespace() {
        assert_eq!(strict(" \r\n\t 72\n pt \r "), Extent::Points(72.0));
        assert_eq!(strict("2.54cm"), Extent::Points(72.0));
        assert_eq!(strict("25.4 MM"), Extent::Points(72.0));
        assert_eq!(strict("0.0254m"), Extent::Points(72.0));
    }

    #[test]
    fn test_comma_separator_and_leading_fraction() {
        assert_eq!(strict("1,5"), Extent::Points(1.5));
        assert_eq!(strict(".5pt"), Extent::Points(0.5));
        assert_eq!(strict("- 3"), Extent::Points(-3.0));
        assert_eq!(strict("+4"), Extent::Points(4.0));
    }

    #[test]
    fn test_auto_keyword() {
        assert_eq!(strict("auto"), Extent::Auto);
        assert_eq!(strict("  AUTO "), Extent::Auto);
    }

    #[test]
    fn test_malformed_input() {
        for text in ["", "pt", "5.", "1.2.3", "12px", "auto 5", "5 5", "--1", "1e3"] {
            let input = RawValue::from(text);
            assert_eq!(
                parse_extent(&input, ParseOptions::OFFSET),
                Err(BoxModelError::InvalidExtent(text.to_owned())),
                "{text:?}"
            );
            assert_eq!(parse_extent(&input, ParseOptions::LENIENT), Ok(None));
        }

        assert!(parse_extent(&RawValue::Number(f64::NAN), ParseOptions::OFFSET).is_err());
    }

    #[test]
    fn test_negative_rejection_is_opt_in() {
        let input = RawValue::from("-5");
        assert_eq!(
            parse_extent(&input, ParseOptions::OFFSET),
            Ok(Some(Extent::Points(-5.0)))
        );
        assert_eq!(
            parse_extent(&input, ParseOptions::NON_NEGATIVE),
            Err(BoxModelError::NegativeExtent(-5.0))
        );
        assert_eq!(
            parse_extent(&RawValue::from("auto"), ParseOptions::NON_NEGATIVE),
            Ok(Some(Extent::Auto))
        );
    }

    #[test]
    fn test_display_and_from_str() {
        assert_eq!(Extent::Auto.to_string(), "auto");
        assert_eq!(Extent::Points(10.0).to_string(), "10");
        assert_eq!("21cm".parse::<Extent>().unwrap(), Extent::Points(21.0 / 2.54 * 72.0));
        assert!("wide".parse::<Extent>().is_err());
    }
}
