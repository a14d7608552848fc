//! Box-model geometry for paginated layout.
//!
//! # Scope
//!
//! This crate implements:
//! - **Extents** ([`extent`])
//!   - Numbers in points, strings with `pt`, `cm`, `mm` or `m` units
//!   - The `auto` keyword
//!   - Comma or dot as decimal separator
//!
//! - **Edge shorthands** ([`edges`])
//!   - 1, 2, 3 and 4 value expansion for margin, padding and border-width
//!
//! - **Style** ([`style`])
//!   - Position and box-sizing modes
//!   - Offset and dimension constraints per axis
//!
//! - **Geometry** ([`geometry`])
//!   - Border, padding and content boxes
//!   - Coordinates relative to the context and to the outermost context
//!
//! - **Property batches** ([`apply`])
//!   - Declaration strings and ordered mappings
//!   - Priority-ordered application
//!
//! # Not Yet Implemented
//!
//! - Percentage and relative length units
//! - Border style and color
//! - Flow and pagination

/// Applying batches of named properties.
pub mod apply;
/// Per-edge values and shorthand expansion.
pub mod edges;
/// Errors raised by box-model mutations.
pub mod error;
/// Extent values and their parser.
pub mod extent;
/// Derived border-, padding- and content-box geometry.
pub mod geometry;
/// The [`BoxModel`] aggregate.
pub mod model;
/// Desired style and its consistency rules.
pub mod style;

pub use apply::{HIGHEST_PRIORITY, Property, StyleBatch, StyleSource};
pub use edges::{Axis, Edges, Side, expand_shorthand};
pub use error::{BoxModelError, Result};
pub use extent::{Extent, ParseOptions, RawValue, Unit, parse_extent};
pub use geometry::{BoxContext, BoxGeometry, Rect};
pub use model::{BoxModel, ContextRef, SharedBox};
pub use style::{AxisConstraint, BoxSizing, BoxStyle, Position};
