//! The process-wide reading direction.
//!
//! Kept in its own test binary with a single test, since changing the global direction would
//! race with any other test running in the same process.

use pinframe::layout::{pin, LayoutDirection, NodeTree, Rect};
use pinframe::{run_script, LayoutConfig};
use pretty_assertions::assert_eq;

#[test]
fn test_global_direction_drives_new_sessions() {
    let mut tree = NodeTree::new();
    let root = tree.add_root("root", Rect::new(0.0, 0.0, 100.0, 50.0));
    let chip = tree.add_child(root, "chip", Rect::new(0.0, 0.0, 10.0, 10.0));

    assert_eq!(LayoutDirection::current(), LayoutDirection::Ltr);
    let r = pin(&mut tree, chip).start(5.0).apply();
    assert_eq!(r.frame.origin.x, 5.0);

    LayoutDirection::set(LayoutDirection::Rtl);
    assert_eq!(LayoutDirection::current(), LayoutDirection::Rtl);

    let session = pin(&mut tree, chip);
    assert_eq!(session.direction(), LayoutDirection::Rtl);
    let r = session.start(5.0).apply();
    assert_eq!(r.frame.max_x(), 95.0);

    // A pinned direction in the config wins over the global one
    let source = "view root [width: 100, height: 50] { view chip [width: 10, height: 10] }\npin chip: start(5)";
    let pinned = LayoutConfig::default()
        .with_direction(LayoutDirection::Ltr)
        .with_log_warnings(false);
    let report = run_script(source, &pinned).unwrap();
    assert_eq!(report.frame("chip").map(|r| r.origin.x), Some(5.0));

    let follows = LayoutConfig::default().with_log_warnings(false);
    let report = run_script(source, &follows).unwrap();
    assert_eq!(report.frame("chip").map(|r| r.origin.x), Some(85.0));

    LayoutDirection::set(LayoutDirection::Ltr);
    assert_eq!(LayoutDirection::current(), LayoutDirection::Ltr);
}
