//! The box model aggregate.
//!
//! A [`BoxModel`] owns its desired style and its actual origin. It refers to
//! its context (the box it is positioned and sized relative to) through a
//! shared, read-only handle fixed at construction, so a chain of contexts is
//! acyclic by construction and a child never keeps its context's owner from
//! mutating it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::edges::{Axis, Edges, Side, expand_shorthand, parse_edge};
use crate::error::{BoxModelError, Result};
use crate::extent::{Extent, ParseOptions, RawValue, parse_extent};
use crate::geometry::BoxContext;
use crate::style::{BoxSizing, BoxStyle, Position};

/// Shared read-only handle to a box's context.
pub type ContextRef = Rc<dyn BoxContext>;

/// A box that others can use as their context while its owner keeps
/// mutating it.
///
/// Descendants borrow the cell immutably whenever they read their context:
/// every derived read, and every offset setter that re-derives a dimension.
/// Release any `borrow_mut` on an ancestor before reading or writing a box
/// placed inside it, or the descendant's borrow panics.
pub type SharedBox = Rc<RefCell<BoxModel>>;

/// Origin of the border box relative to the context.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Origin {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl Origin {
    pub(crate) const fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    pub(crate) const fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Area {
    Margin,
    Padding,
    Border,
}

impl Area {
    const fn shorthand(self) -> &'static str {
        match self {
            Self::Margin => "margin",
            Self::Padding => "padding",
            Self::Border => "border-width",
        }
    }
}

/// A rectangular box with margin, border, padding and content regions.
///
/// Derived geometry (see the `geometry` module) is recomputed on every read
/// from the current style and the context chain; nothing is cached.
///
/// ```
/// use folio_box::{BoxModel, Rect};
/// use std::rc::Rc;
///
/// let sheet = Rc::new(Rect::new(0.0, 0.0, 595.0, 842.0));
/// let mut frame = BoxModel::within(sheet);
/// frame.apply("padding: 10pt; left: 2cm; right: 2cm")?;
/// assert!((frame.content_box_width() - (595.0 - 2.0 * 72.0 / 2.54 * 2.0 - 20.0)).abs() < 1e-9);
/// # Ok::<(), folio_box::BoxModelError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoxModel {
    context: Option<ContextRef>,
    pub(crate) style: BoxStyle,
    pub(crate) origin: Origin,
}

impl BoxModel {
    /// Create a box, optionally relative to `context`.
    #[must_use]
    pub fn new(context: Option<ContextRef>) -> Self {
        Self {
            context,
            style: BoxStyle::default(),
            origin: Origin::default(),
        }
    }

    /// Create a box without context. Its unresolved extents are unbounded.
    #[must_use]
    pub fn root() -> Self {
        Self::new(None)
    }

    /// Create a box relative to `context`.
    #[must_use]
    pub fn within(context: ContextRef) -> Self {
        Self::new(Some(context))
    }

    /// Create a box and apply `source` to it.
    ///
    /// # Errors
    ///
    /// Any error raised while applying `source`.
    pub fn create(
        context: Option<ContextRef>,
        source: impl Into<crate::apply::StyleSource>,
    ) -> Result<Self> {
        let mut model = Self::new(context);
        model.apply(source)?;
        Ok(model)
    }

    /// Wrap this box so it can serve as another box's context.
    #[must_use]
    pub fn into_shared(self) -> SharedBox {
        Rc::new(RefCell::new(self))
    }

    /// The context given at construction.
    #[must_use]
    pub const fn context(&self) -> Option<&ContextRef> {
        self.context.as_ref()
    }

    /// The desired style as currently stored.
    #[must_use]
    pub const fn style(&self) -> &BoxStyle {
        &self.style
    }

    // ------------------------------------------------------------------
    // Modes
    // ------------------------------------------------------------------

    /// Positioning scheme.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.style.position
    }

    /// Set the positioning scheme from `static`, `relative` or `absolute`.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidPosition`] for any other value.
    pub fn set_position(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.style.position = match value.into() {
            RawValue::Text(text) => Position::parse(&text)?,
            RawValue::Number(number) => {
                return Err(BoxModelError::InvalidPosition(number.to_string()));
            }
        };
        Ok(())
    }

    /// Sizing mode.
    #[must_use]
    pub const fn box_sizing(&self) -> BoxSizing {
        self.style.sizing
    }

    /// Set the sizing mode from `content`, `padding` or `border`, with or
    /// without a `-box` suffix.
    ///
    /// Set this before offsets that derive width or height; derivation reads
    /// the mode at the time the offset is written.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidSizingMode`] for any other value.
    pub fn set_box_sizing(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.style.sizing = match value.into() {
            RawValue::Text(text) => BoxSizing::parse(&text)?,
            RawValue::Number(number) => {
                return Err(BoxModelError::InvalidSizingMode(number.to_string()));
            }
        };
        Ok(())
    }

    // ------------------------------------------------------------------
    // Offsets and dimensions
    // ------------------------------------------------------------------

    /// Desired offset from the context's top edge.
    #[must_use]
    pub fn top(&self) -> Extent {
        self.style.offset(Side::Top).into()
    }

    /// Desired offset from the context's right edge.
    #[must_use]
    pub fn right(&self) -> Extent {
        self.style.offset(Side::Right).into()
    }

    /// Desired offset from the context's bottom edge.
    #[must_use]
    pub fn bottom(&self) -> Extent {
        self.style.offset(Side::Bottom).into()
    }

    /// Desired offset from the context's left edge.
    #[must_use]
    pub fn left(&self) -> Extent {
        self.style.offset(Side::Left).into()
    }

    /// Set `top`; with `bottom` also set, `height` is derived from the context.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidExtent`] for a malformed value.
    pub fn set_top(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_offset(Side::Top, value.into())
    }

    /// Set `right`; with `left` also set, `width` is derived from the context.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidExtent`] for a malformed value.
    pub fn set_right(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_offset(Side::Right, value.into())
    }

    /// Set `bottom`; with `top` also set, `height` is derived from the context.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidExtent`] for a malformed value.
    pub fn set_bottom(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_offset(Side::Bottom, value.into())
    }

    /// Set `left`; with `right` also set, `width` is derived from the context.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidExtent`] for a malformed value.
    pub fn set_left(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_offset(Side::Left, value.into())
    }

    /// Explicit width, interpreted according to the sizing mode.
    #[must_use]
    pub fn width(&self) -> Extent {
        self.style.horizontal.size.into()
    }

    /// Explicit height, interpreted according to the sizing mode.
    #[must_use]
    pub fn height(&self) -> Extent {
        self.style.vertical.size.into()
    }

    /// Set `width`. If `left` and `right` are both set, `right` becomes `auto`.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidExtent`] or [`BoxModelError::NegativeExtent`].
    pub fn set_width(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_dimension(Axis::Horizontal, value.into())
    }

    /// Set `height`. If `top` and `bottom` are both set, `bottom` becomes `auto`.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidExtent`] or [`BoxModelError::NegativeExtent`].
    pub fn set_height(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_dimension(Axis::Vertical, value.into())
    }

    fn set_offset(&mut self, side: Side, value: RawValue) -> Result<()> {
        let offset = parse_required(&value, ParseOptions::OFFSET)?.points();
        let available = self
            .context
            .as_ref()
            .map(|context| context.content_box_extent(side.axis()));
        self.style.set_offset(side, offset, available);
        Ok(())
    }

    fn set_dimension(&mut self, axis: Axis, value: RawValue) -> Result<()> {
        let size = parse_required(&value, ParseOptions::NON_NEGATIVE)?.points();
        self.style.set_size(axis, size);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Margin, padding and border widths
    // ------------------------------------------------------------------

    /// Margin on the top edge.
    #[must_use]
    pub const fn margin_top(&self) -> f64 {
        self.style.margin.top
    }

    /// Margin on the right edge.
    #[must_use]
    pub const fn margin_right(&self) -> f64 {
        self.style.margin.right
    }

    /// Margin on the bottom edge.
    #[must_use]
    pub const fn margin_bottom(&self) -> f64 {
        self.style.margin.bottom
    }

    /// Margin on the left edge.
    #[must_use]
    pub const fn margin_left(&self) -> f64 {
        self.style.margin.left
    }

    /// All margins as `top right bottom left`.
    #[must_use]
    pub fn margin(&self) -> String {
        self.style.margin.to_string()
    }

    /// Padding on the top edge.
    #[must_use]
    pub const fn padding_top(&self) -> f64 {
        self.style.padding.top
    }

    /// Padding on the right edge.
    #[must_use]
    pub const fn padding_right(&self) -> f64 {
        self.style.padding.right
    }

    /// Padding on the bottom edge.
    #[must_use]
    pub const fn padding_bottom(&self) -> f64 {
        self.style.padding.bottom
    }

    /// Padding on the left edge.
    #[must_use]
    pub const fn padding_left(&self) -> f64 {
        self.style.padding.left
    }

    /// All paddings as `top right bottom left`.
    #[must_use]
    pub fn padding(&self) -> String {
        self.style.padding.to_string()
    }

    /// Width of the top border.
    #[must_use]
    pub const fn border_top_width(&self) -> f64 {
        self.style.border.top
    }

    /// Width of the right border.
    #[must_use]
    pub const fn border_right_width(&self) -> f64 {
        self.style.border.right
    }

    /// Width of the bottom border.
    #[must_use]
    pub const fn border_bottom_width(&self) -> f64 {
        self.style.border.bottom
    }

    /// Width of the left border.
    #[must_use]
    pub const fn border_left_width(&self) -> f64 {
        self.style.border.left
    }

    /// All border widths as `top right bottom left`.
    #[must_use]
    pub fn border_width(&self) -> String {
        self.style.border.to_string()
    }

    /// Set the top margin.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidExtent`] (including `auto`) or
    /// [`BoxModelError::NegativeExtent`].
    pub fn set_margin_top(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edge(Area::Margin, Side::Top, &value.into())
    }

    /// Set the right margin.
    ///
    /// # Errors
    ///
    /// See [`Self::set_margin_top`].
    pub fn set_margin_right(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edge(Area::Margin, Side::Right, &value.into())
    }

    /// Set the bottom margin.
    ///
    /// # Errors
    ///
    /// See [`Self::set_margin_top`].
    pub fn set_margin_bottom(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edge(Area::Margin, Side::Bottom, &value.into())
    }

    /// Set the left margin.
    ///
    /// # Errors
    ///
    /// See [`Self::set_margin_top`].
    pub fn set_margin_left(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edge(Area::Margin, Side::Left, &value.into())
    }

    /// Set all margins from a 1 to 4 value shorthand.
    ///
    /// # Errors
    ///
    /// [`BoxModelError::InvalidShorthand`] or any per-value error.
    pub fn set_margin(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edges(Area::Margin, &value.into())
    }

    /// Set the top padding.
    ///
    /// # Errors
    ///
    /// See [`Self::set_margin_top`].
    pub fn set_padding_top(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edge(Area::Padding, Side::Top, &value.into())
    }

    /// Set the right padding.
    ///
    /// # Errors
    ///
    /// See [`Self::set_margin_top`].
    pub fn set_padding_right(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edge(Area::Padding, Side::Right, &value.into())
    }

    /// Set the bottom padding.
    ///
    /// # Errors
    ///
    /// See [`Self::set_margin_top`].
    pub fn set_padding_bottom(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edge(Area::Padding, Side::Bottom, &value.into())
    }

    /// Set the left padding.
    ///
    /// # Errors
    ///
    /// See [`Self::set_margin_top`].
    pub fn set_padding_left(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edge(Area::Padding, Side::Left, &value.into())
    }

    /// Set all paddings from a 1 to 4 value shorthand.
    ///
    /// # Errors
    ///
    /// See [`Self::set_margin`].
    pub fn set_padding(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edges(Area::Padding, &value.into())
    }

    /// Set the width of the top border.
    ///
    /// # Errors
    ///
    /// See [`Self::set_margin_top`].
    pub fn set_border_top_width(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edge(Area::Border, Side::Top, &value.into())
    }

    /// Set the width of the right border.
    ///
    /// # Errors
    ///
    /// See [`Self::set_margin_top`].
    pub fn set_border_right_width(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edge(Area::Border, Side::Right, &value.into())
    }

    /// Set the width of the bottom border.
    ///
    /// # Errors
    ///
    /// See [`Self::set_margin_top`].
    pub fn set_border_bottom_width(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edge(Area::Border, Side::Bottom, &value.into())
    }

    /// Set the width of the left border.
    ///
    /// # Errors
    ///
    /// See [`Self::set_margin_top`].
    pub fn set_border_left_width(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edge(Area::Border, Side::Left, &value.into())
    }

    /// Set all border widths from a 1 to 4 value shorthand.
    ///
    /// # Errors
    ///
    /// See [`Self::set_margin`].
    pub fn set_border_width(&mut self, value: impl Into<RawValue>) -> Result<()> {
        self.set_edges(Area::Border, &value.into())
    }

    const fn edges_mut(&mut self, area: Area) -> &mut Edges {
        match area {
            Area::Margin => &mut self.style.margin,
            Area::Padding => &mut self.style.padding,
            Area::Border => &mut self.style.border,
        }
    }

    fn set_edge(&mut self, area: Area, side: Side, value: &RawValue) -> Result<()> {
        let size = parse_edge(value)?;
        self.edges_mut(area).set(side, size);
        Ok(())
    }

    fn set_edges(&mut self, area: Area, value: &RawValue) -> Result<()> {
        let edges = expand_shorthand(area.shorthand(), value)?;
        *self.edges_mut(area) = edges;
        Ok(())
    }
}

/// Parse with `options`, turning "no value" into [`BoxModelError::InvalidExtent`].
pub(crate) fn parse_required(value: &RawValue, options: ParseOptions) -> Result<Extent> {
    parse_extent(value, options)?.ok_or_else(|| BoxModelError::InvalidExtent(value.to_string()))
}
