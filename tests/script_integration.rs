//! End-to-end tests: pin scripts in, frame reports out.

use pinframe::{run_script, LayoutConfig, LayoutDirection, Rect, RunError, SceneError};
use pretty_assertions::assert_eq;

fn config() -> LayoutConfig {
    LayoutConfig::default()
        .with_direction(LayoutDirection::Ltr)
        .with_log_warnings(false)
}

fn run(source: &str) -> pinframe::SceneReport {
    run_script(source, &config()).expect("script should run")
}

const CARD: &str = r#"
    // A title bar with a card centered below it
    view root [width: 200, height: 100] {
        view title
        view card [intrinsic_width: 50, intrinsic_height: 20]
    }
    pin title: top(10).horizontally(10).height(20)
    pin card: below(title).h_center(0).fit_size().margin_top(5).margin_left(4)
"#;

#[test]
fn test_text_report() {
    let report = run(CARD);
    insta::assert_snapshot!(report.to_string(), @r###"
    root: x=0 y=0 w=200 h=100
      title: x=10 y=10 w=180 h=20
      card: x=75 y=35 w=50 h=20
    warnings:
      card: ineffective: margin_left has no effect: left was never positioned
    "###);
}

#[test]
fn test_toml_report_lists_every_view() {
    let report = run(CARD);
    let toml = report.to_toml().unwrap();
    assert_eq!(toml.matches("[[nodes]]").count(), 3);
    assert!(toml.contains("parent = \"root\""));
    assert!(toml.contains("category = \"ineffective\""));
}

#[test]
fn test_percentages_and_clamps() {
    let report = run(
        r#"
        view root [width: 400, height: 200] {
            view sidebar
        }
        pin sidebar: top().bottom().left().width(50%).max_width(150)
        "#,
    );
    assert_eq!(report.frame("sidebar"), Some(Rect::new(0.0, 0.0, 150.0, 200.0)));
}

#[test]
fn test_nested_views_resolve_against_their_parent() {
    let report = run(
        r#"
        view root [width: 300, height: 300] {
            view panel {
                view button [width: 40, height: 20]
            }
        }
        pin panel: all(50)
        pin button: bottom_right()
        "#,
    );
    assert_eq!(report.frame("panel"), Some(Rect::new(50.0, 50.0, 200.0, 200.0)));
    assert_eq!(report.frame("button"), Some(Rect::new(160.0, 180.0, 40.0, 20.0)));
}

#[test]
fn test_rtl_config_flips_start() {
    let source = r#"
        view root [width: 100, height: 100] { view a [width: 20, height: 20] }
        pin a: start(5)
    "#;
    let ltr = run(source);
    let rtl = run_script(
        source,
        &config().with_direction(LayoutDirection::Rtl),
    )
    .unwrap();
    assert_eq!(ltr.frame("a").map(|r| r.origin.x), Some(5.0));
    assert_eq!(rtl.frame("a").map(|r| r.origin.x), Some(75.0));
}

#[test]
fn test_conflicting_width_reports_conflict() {
    let report = run(
        r#"
        view root [width: 100, height: 100] { view a }
        pin a: left(10).right(10).width(50)
        "#,
    );
    assert_eq!(report.frame("a").map(|r| r.size.width), Some(50.0));
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].category, "conflict");
}

#[test]
fn test_parse_error_formatting() {
    let source = "view root {\n  view a\n";
    let err = run_script(source, &config()).unwrap_err();
    assert!(matches!(err, RunError::Parse(_)));
    let text = err.format(source, "layout.pin");
    assert!(text.contains("layout.pin"));
}

#[test]
fn test_unknown_view_error_suggests_name() {
    let source = "view root { view header }\npin headr: top(0)";
    let err = run_script(source, &config()).unwrap_err();
    match &err {
        RunError::Scene(SceneError::UnknownNode { name, suggestions, .. }) => {
            assert_eq!(name, "headr");
            assert_eq!(suggestions, &vec!["header".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let text = err.format(source, "layout.pin");
    assert!(text.contains("header"));
}
