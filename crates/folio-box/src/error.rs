//! Errors raised by box-model mutations.
//!
//! Every error surfaces at the call that caused it. Nothing is rolled back:
//! a batch that fails halfway leaves the properties applied before the
//! failing one in place.

use thiserror::Error;

/// Failure of a box-model operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoxModelError {
    /// `position` given something other than `static`, `relative` or `absolute`.
    #[error("invalid position mode: {0:?}")]
    InvalidPosition(String),

    /// `box-sizing` given something other than `content`, `padding` or
    /// `border` (optionally suffixed with `-box`).
    #[error("invalid box-sizing mode: {0:?}")]
    InvalidSizingMode(String),

    /// An extent could not be parsed, or `auto` was used where a length is
    /// required.
    #[error("invalid extent value: {0:?}")]
    InvalidExtent(String),

    /// A negative extent was given for width, height, margin, padding or
    /// border width.
    #[error("extent must not be negative: {0}")]
    NegativeExtent(f64),

    /// A margin/padding/border-width shorthand had other than 1 to 4 values.
    #[error("invalid number of values on {property}: {count}")]
    InvalidShorthand {
        /// Name of the shorthand property.
        property: &'static str,
        /// Number of whitespace-separated values found.
        count: usize,
    },

    /// A style batch was neither a declaration string nor a mapping of
    /// names to scalar values.
    #[error("invalid style source: {0}")]
    InvalidBatchSource(String),
}

/// Result type used throughout the box model.
pub type Result<T> = std::result::Result<T, BoxModelError>;
