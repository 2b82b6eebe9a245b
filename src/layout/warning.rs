//! Diagnostics reported while resolving a frame.
//!
//! Resolution never fails: contradictory, under-constrained or useless directives are reported
//! here and the synthesizer falls back to its deterministic precedence rules.

use std::fmt;

/// A diagnostic about a directive combination
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutWarning {
    pub category: WarningCategory,
    pub message: String,
}

/// Category of diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCategory {
    /// Two directives imply different values for the same quantity
    Conflict,
    /// A directive needs information that no other directive provides
    Underconstrained,
    /// A directive has no effect on the resulting frame
    Ineffective,
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningCategory::Conflict => write!(f, "conflict"),
            WarningCategory::Underconstrained => write!(f, "underconstrained"),
            WarningCategory::Ineffective => write!(f, "ineffective"),
        }
    }
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

impl LayoutWarning {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            category: WarningCategory::Conflict,
            message: message.into(),
        }
    }

    pub fn underconstrained(message: impl Into<String>) -> Self {
        Self {
            category: WarningCategory::Underconstrained,
            message: message.into(),
        }
    }

    pub fn ineffective(message: impl Into<String>) -> Self {
        Self {
            category: WarningCategory::Ineffective,
            message: message.into(),
        }
    }
}

/// Send warnings to the `log` facade, tagged with the node they belong to
pub fn log_warnings(node: &str, warnings: &[LayoutWarning]) {
    for w in warnings {
        log::warn!(target: "pinframe", "[{}] {}", node, w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let w = LayoutWarning::underconstrained("aspect ratio has no dimension to scale");
        assert_eq!(
            w.to_string(),
            "underconstrained: aspect ratio has no dimension to scale"
        );
    }

    #[test]
    fn test_category_display() {
        assert_eq!(WarningCategory::Conflict.to_string(), "conflict");
        assert_eq!(WarningCategory::Ineffective.to_string(), "ineffective");
    }
}
