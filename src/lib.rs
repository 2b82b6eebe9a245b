//! pinframe - declarative frame resolution for trees of rectangular views
//!
//! This library provides the layout engine (fluent [`PinLayout`] sessions over any
//! [`LayoutHost`]), an in-memory [`NodeTree`] host, and a small script language that drives the
//! engine from text.
//!
//! # Example
//!
//! ```rust
//! use pinframe::{run_script, LayoutConfig, Rect};
//!
//! let report = run_script(
//!     r#"
//!     view root [width: 400, height: 300] {
//!         view header
//!         view body
//!     }
//!     pin header: top().horizontally().height(60)
//!     pin body: below(header).horizontally(10).bottom(10)
//!     "#,
//!     &LayoutConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(report.frame("body"), Some(Rect::new(10.0, 60.0, 380.0, 230.0)));
//! ```

pub mod error;
pub mod layout;
pub mod parser;
pub mod scene;

pub use error::ParseError;
pub use layout::{
    pin, ConfigError, LayoutConfig, LayoutDirection, LayoutHost, LayoutWarning, NodeId, NodeTree,
    Percent, PinLayout, Rect, Resolution, SceneError, Size,
};
pub use parser::{parse, Script};
pub use scene::SceneReport;

use thiserror::Error;

/// Errors that can occur while running a script
#[derive(Debug, Error)]
pub enum RunError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error while mapping the script onto sessions
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

impl From<Vec<ParseError>> for RunError {
    fn from(errors: Vec<ParseError>) -> Self {
        RunError::Parse(errors)
    }
}

impl RunError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            RunError::Parse(errors) => errors
                .iter()
                .map(|e| e.format(source, filename))
                .collect::<Vec<_>>()
                .join("\n"),
            RunError::Scene(e) => e.format(source, filename),
        }
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a script, build its view tree and resolve every `pin` statement
pub fn run_script(source: &str, config: &LayoutConfig) -> Result<SceneReport, RunError> {
    let script = parse(source)?;
    Ok(scene::run(&script, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_simple_script() {
        let report = run_script(
            "view root [width: 100, height: 100] { view a }\npin a: all(10)",
            &LayoutConfig::default(),
        )
        .unwrap();
        assert_eq!(report.frame("a"), Some(Rect::new(10.0, 10.0, 80.0, 80.0)));
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = run_script("pin a: top(", &LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, RunError::Parse(_)));
        assert!(err.to_string().starts_with("parse errors:"));
    }

    #[test]
    fn test_scene_error_surfaces() {
        let err = run_script("pin a: top(0)", &LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, RunError::Scene(SceneError::UnknownNode { .. })));
    }

    #[test]
    fn test_error_format_uses_filename() {
        let source = "view a\npin b: top(0)";
        let err = run_script(source, &LayoutConfig::default()).unwrap_err();
        assert!(err.format(source, "demo.pin").contains("demo.pin"));
    }
}
