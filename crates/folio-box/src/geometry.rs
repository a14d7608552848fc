//! Derived box geometry.
//!
//! ```text
//!  x ─┐
//!     ▼
//!     ┌──────────────── border box ─────────────────┐
//!     │ border                                      │
//!     │   ┌──────────── padding box ────────────┐   │
//!     │   │ padding                             │   │
//!     │   │   ┌──────── content box ────────┐   │   │
//!     │   │   │  width × height (explicit)  │   │   │
//!     │   │   └─────────────────────────────┘   │   │
//!     │   └─────────────────────────────────────┘   │
//!     └─────────────────────────────────────────────┘
//! ```
//!
//! Every read is recomputed from the current style and the context chain.
//! An axis with no explicit dimension takes the context's content extent, or
//! is unbounded (`f64::INFINITY`) without a context.
//!
//! The explicit `width`/`height` is always the content-box size. The sizing
//! mode only matters when a dimension is derived from a pair of offsets.

use std::cell::RefCell;
use std::fmt;

use serde::Serialize;

use crate::edges::Axis;
use crate::error::{BoxModelError, Result};
use crate::extent::{ParseOptions, RawValue};
use crate::model::{BoxModel, parse_required};

/// What a box needs to know about the box it is relative to.
///
/// Any type providing these four reads can serve as a context, including
/// [`BoxModel`] itself (through [`crate::SharedBox`]) and a plain [`Rect`].
pub trait BoxContext: fmt::Debug {
    /// Width available to content; `f64::INFINITY` if unbounded.
    fn content_box_width(&self) -> f64;

    /// Height available to content; `f64::INFINITY` if unbounded.
    fn content_box_height(&self) -> f64;

    /// Left edge of the border box relative to the outermost context.
    fn border_box_absolute_left(&self) -> f64;

    /// Top edge of the border box relative to the outermost context.
    fn border_box_absolute_top(&self) -> f64;

    /// Content extent along `axis`.
    fn content_box_extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.content_box_width(),
            Axis::Vertical => self.content_box_height(),
        }
    }

    /// Absolute border-box origin along `axis`.
    fn border_box_absolute(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.border_box_absolute_left(),
            Axis::Vertical => self.border_box_absolute_top(),
        }
    }
}

/// A rectangle positioned in 2D space, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f64,
    /// Vertical position of the top-left corner.
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A fixed area, such as a page sheet, used as the outermost context.
impl BoxContext for Rect {
    fn content_box_width(&self) -> f64 {
        self.width
    }

    fn content_box_height(&self) -> f64 {
        self.height
    }

    fn border_box_absolute_left(&self) -> f64 {
        self.x
    }

    fn border_box_absolute_top(&self) -> f64 {
        self.y
    }
}

/// All derived geometry of a box at one point in time.
///
/// Border-, padding- and content-box positions are local (relative to the
/// context); `absolute_left`/`absolute_top` locate the border box relative to
/// the outermost context. Unbounded sizes serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxGeometry {
    /// Border box.
    pub border_box: Rect,
    /// Padding box.
    pub padding_box: Rect,
    /// Content box.
    pub content_box: Rect,
    /// Border-box left edge relative to the outermost context.
    pub absolute_left: f64,
    /// Border-box top edge relative to the outermost context.
    pub absolute_top: f64,
}

impl BoxModel {
    // ------------------------------------------------------------------
    // Axis-generic derivations
    // ------------------------------------------------------------------

    fn context_extent(&self, axis: Axis) -> f64 {
        self.context()
            .map_or(f64::INFINITY, |context| context.content_box_extent(axis))
    }

    fn context_origin(&self, axis: Axis) -> f64 {
        self.context()
            .map_or(0.0, |context| context.border_box_absolute(axis))
    }

    /// Border-box origin along `axis`, relative to the context.
    #[must_use]
    pub const fn border_box_origin(&self, axis: Axis) -> f64 {
        self.origin.along(axis)
    }

    /// Border-box origin along `axis`, relative to the outermost context.
    #[must_use]
    pub fn border_box_absolute_origin(&self, axis: Axis) -> f64 {
        self.context_origin(axis) + self.origin.along(axis)
    }

    /// Border-box size along `axis`.
    #[must_use]
    pub fn border_box_size(&self, axis: Axis) -> f64 {
        match self.style.axis(axis).size {
            None => self.context_extent(axis),
            Some(size) => self.style.border.along(axis) + self.style.padding.along(axis) + size,
        }
    }

    /// Padding-box size along `axis`.
    #[must_use]
    pub fn padding_box_size(&self, axis: Axis) -> f64 {
        match self.style.axis(axis).size {
            None => self.context_extent(axis) - self.style.border.along(axis),
            Some(size) => self.style.padding.along(axis) + size,
        }
    }

    /// Content-box size along `axis`.
    #[must_use]
    pub fn content_box_size(&self, axis: Axis) -> f64 {
        match self.style.axis(axis).size {
            None => {
                self.context_extent(axis)
                    - self.style.border.along(axis)
                    - self.style.padding.along(axis)
            }
            Some(size) => size,
        }
    }

    fn padding_box_local(&self, axis: Axis) -> f64 {
        self.origin.along(axis) + self.style.border.get(axis.near())
    }

    fn content_box_local(&self, axis: Axis) -> f64 {
        self.padding_box_local(axis) + self.style.padding.get(axis.near())
    }

    fn set_origin(&mut self, axis: Axis, value: RawValue) -> Result<()> {
        let coordinate = parse_coordinate(&value)?;
        self.origin.set(axis, coordinate);
        Ok(())
    }

    fn set_absolute_origin(&mut self, axis: Axis, value: RawValue) -> Result<()> {
        let coordinate = parse_coordinate(&value)?;
        let local = coordinate - self.context_origin(axis);
        self.origin.set(axis, local);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Border box
    // ------------------------------------------------------------------

    /// Left edge of the border box relative to the context.
    #[must_use]
    pub const fn border_box_left(&self) -> f64 {
        self.border_box_origin(Axis::Horizontal)
    }

    /// Top edge of the border box relative to the context.
    #[must_use]
    pub const fn border_box_top(&self) -> f64 {
        self.border_box_origin(Axis::Vertical)
    }

    /// Move the border box horizontally without touching the style.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidExtent`] for a malformed value or `auto`.
    pub fn set_border_box_left(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_origin(Axis::Horizontal, value.into())
    }

    /// Move the border box vertically without touching the style.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidExtent`] for a malformed value or `auto`.
    pub fn set_border_box_top(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_origin(Axis::Vertical, value.into())
    }

    /// Left edge of the border box relative to the outermost context.
    #[must_use]
    pub fn border_box_absolute_left(&self) -> f64 {
        self.border_box_absolute_origin(Axis::Horizontal)
    }

    /// Top edge of the border box relative to the outermost context.
    #[must_use]
    pub fn border_box_absolute_top(&self) -> f64 {
        self.border_box_absolute_origin(Axis::Vertical)
    }

    /// Place the border box's left edge at an absolute coordinate, solving
    /// for the local origin against the context's current position.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidExtent`] for a malformed value or `auto`.
    pub fn set_border_box_absolute_left(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_absolute_origin(Axis::Horizontal, value.into())
    }

    /// Place the border box's top edge at an absolute coordinate.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidExtent`] for a malformed value or `auto`.
    pub fn set_border_box_absolute_top(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_absolute_origin(Axis::Vertical, value.into())
    }

    /// Width including padding and border.
    #[must_use]
    pub fn border_box_width(&self) -> f64 {
        self.border_box_size(Axis::Horizontal)
    }

    /// Height including padding and border.
    #[must_use]
    pub fn border_box_height(&self) -> f64 {
        self.border_box_size(Axis::Vertical)
    }

    // ------------------------------------------------------------------
    // Padding box
    // ------------------------------------------------------------------

    /// Left edge of the padding box relative to the context.
    #[must_use]
    pub fn padding_box_local_left(&self) -> f64 {
        self.padding_box_local(Axis::Horizontal)
    }

    /// Top edge of the padding box relative to the context.
    #[must_use]
    pub fn padding_box_local_top(&self) -> f64 {
        self.padding_box_local(Axis::Vertical)
    }

    /// Width including padding.
    #[must_use]
    pub fn padding_box_width(&self) -> f64 {
        self.padding_box_size(Axis::Horizontal)
    }

    /// Height including padding.
    #[must_use]
    pub fn padding_box_height(&self) -> f64 {
        self.padding_box_size(Axis::Vertical)
    }

    // ------------------------------------------------------------------
    // Content box
    // ------------------------------------------------------------------

    /// Left edge of the content box relative to the context.
    #[must_use]
    pub fn content_box_local_left(&self) -> f64 {
        self.content_box_local(Axis::Horizontal)
    }

    /// Top edge of the content box relative to the context.
    #[must_use]
    pub fn content_box_local_top(&self) -> f64 {
        self.content_box_local(Axis::Vertical)
    }

    /// Width of the content area.
    #[must_use]
    pub fn content_box_width(&self) -> f64 {
        self.content_box_size(Axis::Horizontal)
    }

    /// Height of the content area.
    #[must_use]
    pub fn content_box_height(&self) -> f64 {
        self.content_box_size(Axis::Vertical)
    }

    /// Snapshot of all derived geometry.
    #[must_use]
    pub fn geometry(&self) -> BoxGeometry {
        BoxGeometry {
            border_box: Rect::new(
                self.border_box_left(),
                self.border_box_top(),
                self.border_box_width(),
                self.border_box_height(),
            ),
            padding_box: Rect::new(
                self.padding_box_local_left(),
                self.padding_box_local_top(),
                self.padding_box_width(),
                self.padding_box_height(),
            ),
            content_box: Rect::new(
                self.content_box_local_left(),
                self.content_box_local_top(),
                self.content_box_width(),
                self.content_box_height(),
            ),
            absolute_left: self.border_box_absolute_left(),
            absolute_top: self.border_box_absolute_top(),
        }
    }
}

impl BoxContext for BoxModel {
    fn content_box_width(&self) -> f64 {
        self.content_box_size(Axis::Horizontal)
    }

    fn content_box_height(&self) -> f64 {
        self.content_box_size(Axis::Vertical)
    }

    fn border_box_absolute_left(&self) -> f64 {
        self.border_box_absolute_origin(Axis::Horizontal)
    }

    fn border_box_absolute_top(&self) -> f64 {
        self.border_box_absolute_origin(Axis::Vertical)
    }
}

/// Reads borrow the box for the duration of the call.
///
/// # Panics
///
/// Panics if the box is mutably borrowed at the time of the read.
impl BoxContext for RefCell<BoxModel> {
    fn content_box_width(&self) -> f64 {
        self.borrow().content_box_size(Axis::Horizontal)
    }

    fn content_box_height(&self) -> f64 {
        self.borrow().content_box_size(Axis::Vertical)
    }

    fn border_box_absolute_left(&self) -> f64 {
        self.borrow().border_box_absolute_origin(Axis::Horizontal)
    }

    fn border_box_absolute_top(&self) -> f64 {
        self.borrow().border_box_absolute_origin(Axis::Vertical)
    }
}

fn parse_coordinate(value: &RawValue) -> Result<f64> {
    parse_required(value, ParseOptions::OFFSET)?
        .points()
        .ok_or_else(|| BoxModelError::InvalidExtent(value.to_string()))
}
