//! Errors raised while turning a parsed script into sessions

use thiserror::Error;

use crate::parser::ast::Span;

/// Script-level errors. Directive resolution itself never fails; these come from names and
/// arguments that cannot be mapped onto the directive surface at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// Reference to a view that was never declared
    #[error("undefined view '{name}'")]
    UnknownNode {
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    /// Two views declared with the same name
    #[error("view '{name}' is declared more than once")]
    DuplicateView { name: String, span: Span },

    /// Call to a directive that does not exist
    #[error("unknown directive '{name}'")]
    UnknownDirective {
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    /// Directive exists but its arguments do not fit any of its forms
    #[error("invalid arguments for '{directive}': expected {expected}")]
    BadArguments {
        directive: String,
        expected: String,
        span: Span,
    },

    /// Modifier key a view does not understand
    #[error("unknown view modifier '{name}' (valid modifiers: {valid})")]
    UnknownModifier {
        name: String,
        valid: String,
        span: Span,
    },

    /// `direction` with something other than ltr/rtl
    #[error("unknown direction '{name}' (expected 'ltr' or 'rtl')")]
    BadDirection { name: String, span: Span },
}

impl SceneError {
    /// Create an undefined view error with suggestions
    pub fn unknown_node<'a>(
        name: impl Into<String>,
        span: Span,
        known: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let name = name.into();
        let suggestions = find_similar(known, &name, 2);
        Self::UnknownNode {
            name,
            span,
            suggestions,
        }
    }

    /// Create an unknown directive error with suggestions
    pub fn unknown_directive<'a>(
        name: impl Into<String>,
        span: Span,
        known: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let name = name.into();
        let suggestions = find_similar(known, &name, 3);
        Self::UnknownDirective {
            name,
            span,
            suggestions,
        }
    }

    pub fn bad_arguments(directive: impl Into<String>, expected: impl Into<String>, span: Span) -> Self {
        Self::BadArguments {
            directive: directive.into(),
            expected: expected.into(),
            span,
        }
    }

    /// Get the source span
    pub fn span(&self) -> &Span {
        match self {
            Self::UnknownNode { span, .. }
            | Self::DuplicateView { span, .. }
            | Self::UnknownDirective { span, .. }
            | Self::BadArguments { span, .. }
            | Self::UnknownModifier { span, .. }
            | Self::BadDirection { span, .. } => span,
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownNode { suggestions, .. } => Some(suggestions),
            Self::UnknownDirective { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let notes: Vec<String> = self
            .suggestions()
            .unwrap_or_default()
            .iter()
            .map(|s| format!("did you mean '{}'?", s))
            .collect();
        let message = self.to_string();
        crate::error::render_report(source, filename, self.span(), &message, &message, &notes)
    }
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut row = vec![0usize; n + 1];
    for (i, ca) in a_chars.iter().enumerate() {
        row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[n]
}

/// Find similar names within a maximum edit distance, closest first
fn find_similar<'a>(
    known: impl IntoIterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = known
        .into_iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then_some((name, dist))
        })
        .collect();

    candidates.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    candidates.dedup();
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("header", "header"), 0);
    }

    #[test]
    fn test_levenshtein_one_off() {
        assert_eq!(levenshtein_distance("header", "heder"), 1);
        assert_eq!(levenshtein_distance("footer", "footar"), 1);
    }

    #[test]
    fn test_levenshtein_different() {
        assert_eq!(levenshtein_distance("cat", "dog"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }

    #[test]
    fn test_unknown_node_suggestions() {
        let err = SceneError::unknown_node("heder", 0..5, ["header", "footer", "body"]);
        assert_eq!(err.suggestions(), Some(&["header".to_string()][..]));
        assert_eq!(err.to_string(), "undefined view 'heder'");
    }

    #[test]
    fn test_unknown_directive_suggestions() {
        let err = SceneError::unknown_directive("widht", 0..5, ["width", "height", "min_width"]);
        let suggestions = err.suggestions().unwrap();
        assert_eq!(suggestions[0], "width");
    }

    #[test]
    fn test_format_adds_suggestion_note() {
        let source = "pin heder: top(0)";
        let err = SceneError::unknown_node("heder", 4..9, ["header"]);
        let rendered = err.format(source, "layout.pin");
        assert!(rendered.contains("did you mean 'header'?"));
    }

    #[test]
    fn test_bad_arguments_display() {
        let err = SceneError::bad_arguments("width", "a number or a percentage", 0..5);
        assert_eq!(
            err.to_string(),
            "invalid arguments for 'width': expected a number or a percentage"
        );
    }
}
