//! Integration tests for box-model setters and derived geometry.

use std::rc::Rc;

use folio_box::{
    Axis, BoxContext, BoxModel, BoxModelError, BoxSizing, ContextRef, Extent, Position, Rect,
};

const EPSILON: f64 = 1e-9;

fn sheet(width: f64, height: f64) -> ContextRef {
    Rc::new(Rect::new(0.0, 0.0, width, height))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_new_box_defaults() {
    let model = BoxModel::root();
    assert_eq!(model.position(), Position::Static);
    assert_eq!(model.box_sizing(), BoxSizing::Content);
    assert_eq!(model.left(), Extent::Auto);
    assert_eq!(model.width(), Extent::Auto);
    assert_eq!(model.margin(), "0 0 0 0");
    assert_eq!(model.border_box_left(), 0.0);
    assert!(model.context().is_none());
}

#[test]
fn test_mode_setters() {
    let mut model = BoxModel::root();
    model.set_position(" ABSOLUTE ").unwrap();
    assert_eq!(model.position(), Position::Absolute);
    model.set_box_sizing("padding-box").unwrap();
    assert_eq!(model.box_sizing(), BoxSizing::Padding);

    assert_eq!(
        model.set_position("sticky"),
        Err(BoxModelError::InvalidPosition("sticky".to_owned()))
    );
    assert_eq!(
        model.set_box_sizing("margin"),
        Err(BoxModelError::InvalidSizingMode("margin".to_owned()))
    );
    assert_eq!(model.position(), Position::Absolute);
    assert_eq!(model.box_sizing(), BoxSizing::Padding);
}

#[test]
fn test_setting_width_clears_right_when_both_offsets_set() {
    let mut model = BoxModel::within(sheet(300.0, 300.0));
    model.set_left(10).unwrap();
    model.set_right(20).unwrap();
    assert_eq!(model.width(), Extent::Points(270.0));

    model.set_width(100).unwrap();
    assert_eq!(model.right(), Extent::Auto);
    assert_eq!(model.left(), Extent::Points(10.0));
    assert_eq!(model.width(), Extent::Points(100.0));
}

#[test]
fn test_setting_height_clears_bottom_without_context() {
    let mut model = BoxModel::root();
    model.set_top("1cm").unwrap();
    model.set_bottom("1cm").unwrap();
    assert_eq!(model.height(), Extent::Auto);

    model.set_height("5cm").unwrap();
    assert_eq!(model.bottom(), Extent::Auto);
    assert!(!model.top().is_auto());
}

#[test]
fn test_offsets_derive_width_per_sizing_mode() {
    for (sizing, expected) in [("content", 426.0), ("padding", 446.0), ("border", 450.0)] {
        let mut model = BoxModel::within(sheet(500.0, 400.0));
        model.set_box_sizing(sizing).unwrap();
        model.set_padding(10).unwrap();
        model.set_border_width(2).unwrap();
        model.set_left(20).unwrap();
        model.set_right(30).unwrap();
        assert_eq!(model.width(), Extent::Points(expected), "{sizing}");
    }
}

#[test]
fn test_offsets_derive_height_from_context_height() {
    let mut model = BoxModel::within(sheet(100.0, 842.0));
    model.set_padding("5 0").unwrap();
    model.set_top("2cm").unwrap();
    model.set_bottom(0).unwrap();
    let expected = 842.0 - 2.0 / 2.54 * 72.0 - 10.0;
    assert_close(model.content_box_height(), expected);
}

#[test]
fn test_derived_width_never_negative() {
    let mut model = BoxModel::within(sheet(50.0, 50.0));
    model.set_left(40).unwrap();
    model.set_right(40).unwrap();
    assert_eq!(model.width(), Extent::Points(0.0));
}

#[test]
fn test_offsets_without_context_leave_width() {
    let mut model = BoxModel::root();
    model.set_width(80).unwrap();
    model.set_left(10).unwrap();
    model.set_right(10).unwrap();
    assert_eq!(model.width(), Extent::Points(80.0));
    assert_eq!(model.right(), Extent::Points(10.0));
}

#[test]
fn test_shorthand_expansion() {
    let mut model = BoxModel::root();

    model.set_margin("10pt").unwrap();
    assert_eq!(model.margin(), "10 10 10 10");

    model.set_margin("10pt 20pt").unwrap();
    assert_eq!(model.margin_top(), 10.0);
    assert_eq!(model.margin_bottom(), 10.0);
    assert_eq!(model.margin_left(), 20.0);
    assert_eq!(model.margin_right(), 20.0);

    model.set_padding("1pt 2pt 3pt").unwrap();
    assert_eq!(model.padding(), "1 2 3 2");

    model.set_border_width("1pt 2pt 3pt 4pt").unwrap();
    assert_eq!(model.border_top_width(), 1.0);
    assert_eq!(model.border_right_width(), 2.0);
    assert_eq!(model.border_bottom_width(), 3.0);
    assert_eq!(model.border_left_width(), 4.0);
    assert_eq!(model.border_width(), "1 2 3 4");
}

#[test]
fn test_invalid_shorthand_keeps_previous_edges() {
    let mut model = BoxModel::root();
    model.set_padding(4).unwrap();
    assert_eq!(
        model.set_padding("1 2 3 4 5"),
        Err(BoxModelError::InvalidShorthand {
            property: "padding",
            count: 5
        })
    );
    assert_eq!(model.padding(), "4 4 4 4");
}

#[test]
fn test_sizing_mode_does_not_change_content_width() {
    let mut model = BoxModel::root();
    model.set_box_sizing("border").unwrap();
    model.set_width(100).unwrap();
    model.set_border_left_width(5).unwrap();
    model.set_padding_left(3).unwrap();

    assert_eq!(model.content_box_width(), 100.0);
    assert_eq!(model.padding_box_width(), 103.0);
    assert_eq!(model.border_box_width(), 108.0);

    model.set_padding_right(3).unwrap();
    model.set_border_right_width(5).unwrap();
    assert_eq!(model.content_box_width(), 100.0);
    assert_eq!(model.border_box_width(), 116.0);
}

#[test]
fn test_root_without_size_is_unbounded() {
    let mut model = BoxModel::root();
    model.set_padding(10).unwrap();
    model.set_border_width(1).unwrap();

    assert_eq!(model.content_box_width(), f64::INFINITY);
    assert_eq!(model.padding_box_width(), f64::INFINITY);
    assert_eq!(model.border_box_width(), f64::INFINITY);
    assert_eq!(model.content_box_height(), f64::INFINITY);

    let child = BoxModel::within(model.into_shared());
    assert_eq!(child.content_box_width(), f64::INFINITY);
}

#[test]
fn test_negative_rejection() {
    let mut model = BoxModel::root();
    assert_eq!(
        model.set_margin_left(-5),
        Err(BoxModelError::NegativeExtent(-5.0))
    );
    assert_eq!(
        model.set_width("-1cm"),
        Err(BoxModelError::NegativeExtent(-1.0 / 2.54 * 72.0))
    );
    model.set_left(-5).unwrap();
    assert_eq!(model.left(), Extent::Points(-5.0));
}

#[test]
fn test_auto_is_rejected_for_edges() {
    let mut model = BoxModel::root();
    assert_eq!(
        model.set_margin_top("auto"),
        Err(BoxModelError::InvalidExtent("auto".to_owned()))
    );
    assert!(model.set_border_box_left("auto").is_err());
    model.set_left("auto").unwrap();
    model.set_width("auto").unwrap();
}

#[test]
fn test_unset_dimensions_follow_context() {
    let mut model = BoxModel::within(sheet(200.0, 100.0));
    model.set_border_width(1).unwrap();
    model.set_padding(4).unwrap();

    assert_eq!(model.border_box_width(), 200.0);
    assert_eq!(model.padding_box_width(), 198.0);
    assert_eq!(model.content_box_width(), 190.0);
    assert_eq!(model.content_box_height(), 90.0);
}

#[test]
fn test_local_offsets_of_nested_boxes() {
    let mut model = BoxModel::root();
    model.set_border_box_left("1cm").unwrap();
    model.set_border_box_top(-4).unwrap();
    model.set_border_width("1 2 3 4").unwrap();
    model.set_padding("10 20").unwrap();

    let x = 72.0 / 2.54;
    assert_close(model.border_box_left(), x);
    assert_close(model.padding_box_local_left(), x + 4.0);
    assert_close(model.content_box_local_left(), x + 24.0);
    assert_eq!(model.padding_box_local_top(), -3.0);
    assert_eq!(model.content_box_local_top(), 7.0);
}

#[test]
fn test_absolute_coordinates_walk_the_context_chain() {
    let page: ContextRef = Rc::new(Rect::new(10.0, 20.0, 500.0, 700.0));

    let mut outer = BoxModel::within(page);
    outer.set_border_box_left(30).unwrap();
    outer.set_border_box_top(40).unwrap();
    outer.set_padding(10).unwrap();
    let outer = outer.into_shared();

    let mut inner = BoxModel::within(outer.clone());
    inner.set_border_box_left(5).unwrap();
    assert_eq!(inner.border_box_absolute_left(), 45.0);
    assert_eq!(inner.border_box_absolute_top(), 60.0);
    assert_eq!(inner.content_box_width(), 480.0);

    outer.borrow_mut().set_border_box_left(100).unwrap();
    assert_eq!(inner.border_box_absolute_left(), 115.0);

    inner.set_border_box_absolute_left(200).unwrap();
    assert_eq!(inner.border_box_left(), 90.0);
    assert_eq!(inner.border_box_absolute_left(), 200.0);

    inner.set_border_box_absolute_top("0").unwrap();
    assert_eq!(inner.border_box_top(), -60.0);
}

#[test]
fn test_context_is_kept_by_identity() {
    let outer = BoxModel::root().into_shared();
    let context: ContextRef = outer.clone();
    let inner = BoxModel::within(context.clone());
    assert!(inner.context().is_some_and(|kept| Rc::ptr_eq(kept, &context)));
}

#[test]
fn test_box_serves_as_context() {
    let mut model = BoxModel::within(sheet(300.0, 200.0));
    model.set_padding(10).unwrap();
    model.set_border_box_left(7).unwrap();

    let context: &dyn BoxContext = &model;
    assert_eq!(context.content_box_width(), 280.0);
    assert_eq!(context.content_box_extent(Axis::Vertical), 180.0);
    assert_eq!(context.border_box_absolute_left(), 7.0);
}

#[test]
fn test_geometry_snapshot_serializes_unbounded_as_null() {
    let mut model = BoxModel::root();
    model.set_height(50).unwrap();
    let geometry = model.geometry();
    assert_eq!(geometry.content_box.height, 50.0);
    assert_eq!(geometry.content_box.width, f64::INFINITY);

    let json = serde_json::to_value(geometry).unwrap();
    assert!(json["content_box"]["width"].is_null());
    assert_eq!(json["content_box"]["height"], 50.0);
}

#[test]
fn test_descendant_reads_after_ancestor_borrow_ends() {
    let outer = BoxModel::within(sheet(400.0, 300.0)).into_shared();
    let mut inner = BoxModel::within(outer.clone());

    {
        let mut owner = outer.borrow_mut();
        owner.set_padding(20).unwrap();
        owner.set_border_box_left(10).unwrap();
        assert!(outer.try_borrow().is_err());
    }

    inner.set_left(5).unwrap();
    inner.set_right(15).unwrap();
    assert_eq!(inner.width(), Extent::Points(340.0));
    assert_eq!(inner.border_box_absolute_left(), 10.0);
}
