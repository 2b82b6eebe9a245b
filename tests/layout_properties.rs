//! Integration tests for frame resolution through the public session API.
//!
//! Every session pins its direction explicitly; only `direction_global.rs` touches the
//! process-wide direction.

use pinframe::layout::{
    pin, AnchorKind, HorizontalAlign, HorizontalEdgeKind, LayoutDirection, LayoutHost,
    NodeId, NodeTree, Percent, PinLayout, Rect, Size, VerticalAlign, WarningCategory,
};
use pretty_assertions::assert_eq;

const TOLERANCE: f64 = 0.001;

/// A 200x100 container with three children: the target and two siblings
fn container() -> (NodeTree, NodeId, NodeId, NodeId) {
    let mut tree = NodeTree::new();
    let root = tree.add_root("root", Rect::new(0.0, 0.0, 200.0, 100.0));
    let target = tree.add_child(root, "target", Rect::new(0.0, 0.0, 20.0, 10.0));
    let a = tree.add_child(root, "a", Rect::new(10.0, 50.0, 30.0, 20.0));
    let b = tree.add_child(root, "b", Rect::new(120.0, 30.0, 40.0, 40.0));
    (tree, target, a, b)
}

fn ltr<H: LayoutHost>(host: &mut H, node: NodeId) -> PinLayout<'_, H> {
    pin(host, node).with_direction(LayoutDirection::Ltr)
}

fn rtl<H: LayoutHost>(host: &mut H, node: NodeId) -> PinLayout<'_, H> {
    pin(host, node).with_direction(LayoutDirection::Rtl)
}

fn assert_rect(actual: Rect, expected: Rect) {
    assert!(
        actual.approx_eq(&expected, TOLERANCE),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn test_idempotent_application() {
    let (mut tree, target, a, _) = container();
    let first = ltr(&mut tree, target)
        .below(&[a])
        .margin_top(4.0)
        .horizontally(Percent(10.0))
        .height(12.0)
        .apply();
    let second = ltr(&mut tree, target)
        .below(&[a])
        .margin_top(4.0)
        .horizontally(Percent(10.0))
        .height(12.0)
        .apply();
    assert_eq!(first, second);
}

#[test]
fn test_last_write_wins() {
    let (mut tree, target, _, _) = container();
    let r = ltr(&mut tree, target).width(10.0).width(30.0).apply();
    assert_eq!(r.frame.size.width, 30.0);
}

#[test]
fn test_width_from_opposing_edges() {
    let (mut tree, target, _, _) = container();
    let r = ltr(&mut tree, target).left(10.0).right(10.0).apply();
    assert_eq!(r.frame.origin.x, 10.0);
    assert_eq!(r.frame.size.width, 180.0);
    assert!(r.warnings.is_empty());
}

#[test]
fn test_explicit_width_after_edges_keeps_left() {
    let (mut tree, target, _, _) = container();
    let r = ltr(&mut tree, target)
        .left(10.0)
        .right(10.0)
        .width(50.0)
        .apply();
    assert_eq!(r.frame.origin.x, 10.0);
    assert_eq!(r.frame.size.width, 50.0);
    assert_eq!(r.warnings.len(), 1);
    assert_eq!(r.warnings[0].category, WarningCategory::Conflict);
}

#[test]
fn test_percent_resolution() {
    let mut tree = NodeTree::new();
    let root = tree.add_root("root", Rect::new(0.0, 0.0, 300.0, 300.0));
    let node = tree.add_child(root, "node", Rect::zero());

    let r = ltr(&mut tree, node).width(Percent(50.0)).apply();
    assert_eq!(r.frame.size.width, 150.0);

    let r = ltr(&mut tree, node).width(Percent(0.0)).apply();
    assert_eq!(r.frame.size.width, 0.0);
    assert!(r.warnings.is_empty());

    let r = ltr(&mut tree, node).width(Percent(-25.0)).apply();
    assert_eq!(r.frame.size.width, 0.0);
    assert_eq!(r.warnings.len(), 1);
}

#[test]
fn test_aspect_ratio_derivations() {
    let (mut tree, target, _, _) = container();

    let r = ltr(&mut tree, target).width(100.0).aspect_ratio(2.0).apply();
    assert_eq!(r.frame.size, Size::new(100.0, 50.0));

    let r = ltr(&mut tree, target).height(50.0).aspect_ratio(2.0).apply();
    assert_eq!(r.frame.size, Size::new(100.0, 50.0));

    let before = tree.frame(target);
    let r = ltr(&mut tree, target).aspect_ratio(2.0).apply();
    assert_eq!(r.frame, before);
    assert_eq!(r.warnings[0].category, WarningCategory::Underconstrained);
}

#[test]
fn test_pin_edges_keeps_right_edge() {
    let (mut tree, target, _, _) = container();
    let plain = ltr(&mut tree, target)
        .left(0.0)
        .width(50.0)
        .margin_left(10.0)
        .apply();
    assert_eq!(plain.frame.max_x(), 60.0);

    let pinned = ltr(&mut tree, target)
        .left(0.0)
        .width(50.0)
        .margin_left(10.0)
        .pin_edges()
        .apply();
    assert_eq!(pinned.frame.origin.x, 10.0);
    assert_eq!(pinned.frame.max_x(), 50.0);
}

#[test]
fn test_start_under_rtl_matches_right() {
    let (mut tree, target, _, _) = container();
    let start = rtl(&mut tree, target).start(10.0).width(30.0).apply();
    let right = ltr(&mut tree, target).right(10.0).width(30.0).apply();
    assert_eq!(start.frame, right.frame);
    assert_eq!(start.frame.max_x(), 190.0);
}

#[test]
fn test_start_under_ltr_matches_left() {
    let (mut tree, target, _, _) = container();
    let start = ltr(&mut tree, target).start(10.0).apply();
    let left = ltr(&mut tree, target).left(10.0).apply();
    assert_eq!(start.frame, left.frame);
}

#[test]
fn test_rtl_mirrors_ltr() {
    // start(10) on RTL is left(10) on LTR reflected about the container's center line
    let (mut tree, target, _, _) = container();
    let ltr_frame = ltr(&mut tree, target).start(10.0).width(30.0).top(5.0).apply().frame;
    let rtl_frame = rtl(&mut tree, target).start(10.0).width(30.0).top(5.0).apply().frame;
    assert_eq!(rtl_frame.origin.x, 200.0 - ltr_frame.max_x());
    assert_eq!(rtl_frame.origin.y, ltr_frame.origin.y);
}

#[test]
fn test_before_and_after_follow_direction() {
    let (mut tree, target, _, b) = container();
    let before_ltr = ltr(&mut tree, target).before(&[b]).apply();
    let left_of = ltr(&mut tree, target).left_of(&[b]).apply();
    assert_eq!(before_ltr.frame, left_of.frame);

    let before_rtl = rtl(&mut tree, target).before(&[b]).apply();
    let right_of = ltr(&mut tree, target).right_of(&[b]).apply();
    assert_eq!(before_rtl.frame, right_of.frame);
    assert_eq!(before_rtl.frame.origin.x, 160.0);
}

#[test]
fn test_above_uses_highest_sibling() {
    let (mut tree, target, a, b) = container();
    // tops: a = 50, b = 30
    let r = ltr(&mut tree, target).above(&[a, b]).apply();
    assert_eq!(r.frame.max_y(), 30.0);
}

#[test]
fn test_below_aligned_center() {
    let (mut tree, target, a, b) = container();
    let r = ltr(&mut tree, target)
        .below_aligned(&[a, b], HorizontalAlign::Center)
        .apply();
    // union of a and b spans x 10..160, bottom 70
    assert_rect(r.frame, Rect::new(75.0, 70.0, 20.0, 10.0));
}

#[test]
fn test_right_of_aligned_bottom_with_margin() {
    let (mut tree, target, a, _) = container();
    let r = ltr(&mut tree, target)
        .right_of_aligned(&[a], VerticalAlign::Bottom)
        .margin_left(5.0)
        .apply();
    assert_rect(r.frame, Rect::new(45.0, 60.0, 20.0, 10.0));
}

#[test]
fn test_anchor_chain_across_subtrees() {
    let mut tree = NodeTree::new();
    let root = tree.add_root("root", Rect::new(0.0, 0.0, 400.0, 400.0));
    let panel = tree.add_child(root, "panel", Rect::new(100.0, 100.0, 200.0, 200.0));
    let badge = tree.add_child(panel, "badge", Rect::new(0.0, 0.0, 10.0, 10.0));
    let label = tree.add_child(root, "label", Rect::new(0.0, 0.0, 50.0, 20.0));

    ltr(&mut tree, badge).bottom_right().apply();
    assert_eq!(tree.frame(badge), Rect::new(190.0, 190.0, 10.0, 10.0));

    // badge bottom_right in root space is (300, 300)
    let r = ltr(&mut tree, label)
        .top_left_to(badge.anchor(AnchorKind::BottomRight))
        .apply();
    assert_eq!(r.frame.origin.x, 300.0);
    assert_eq!(r.frame.origin.y, 300.0);
}

#[test]
fn test_edge_relative_span() {
    let (mut tree, target, a, b) = container();
    let r = ltr(&mut tree, target)
        .left_to(a.h_edge(HorizontalEdgeKind::Right))
        .right_to(b.h_edge(HorizontalEdgeKind::Left))
        .apply();
    assert_eq!(r.frame.origin.x, 40.0);
    assert_eq!(r.frame.size.width, 80.0);
}

#[test]
fn test_clamps_after_edges() {
    let (mut tree, target, _, _) = container();
    let r = ltr(&mut tree, target)
        .horizontally(0.0)
        .max_width(120.0)
        .justify(HorizontalAlign::Center)
        .apply();
    assert_eq!(r.frame.size.width, 120.0);
    assert_eq!(r.frame.origin.x, 40.0);
}

#[test]
fn test_fit_size_then_explicit_height() {
    let (mut tree, target, _, _) = container();
    tree.set_intrinsic_size(target, Some(Size::new(64.0, 18.0)));
    let r = ltr(&mut tree, target)
        .fit_size()
        .height(30.0)
        .center()
        .apply();
    assert_rect(r.frame, Rect::new(68.0, 35.0, 64.0, 30.0));
}

#[test]
fn test_margins_and_all() {
    let (mut tree, target, _, _) = container();
    let r = ltr(&mut tree, target).all(0.0).margin(10.0).apply();
    assert_rect(r.frame, Rect::new(10.0, 10.0, 180.0, 80.0));
}

#[test]
fn test_vertical_center_with_offset() {
    let (mut tree, target, _, _) = container();
    let r = ltr(&mut tree, target).v_center(Percent(10.0)).apply();
    // center at 50 + 10% of 100
    assert_eq!(r.frame.mid_y(), 60.0);
}

#[test]
fn test_discarded_session_does_not_write() {
    let (mut tree, target, _, _) = container();
    let before = tree.frame(target);
    ltr(&mut tree, target).all(0.0).discard();
    assert_eq!(tree.frame(target), before);
}

#[test]
fn test_dropped_session_commits() {
    let (mut tree, target, _, _) = container();
    drop(ltr(&mut tree, target).top(7.0));
    assert_eq!(tree.frame(target).origin.y, 7.0);
}
