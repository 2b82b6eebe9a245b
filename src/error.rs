//! Error types for parsing pin scripts

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let ParseError::Syntax {
            span,
            message,
            expected,
        } = self;

        let expected_str = if expected.is_empty() {
            String::new()
        } else {
            format!("\nExpected: {}", expected.join(", "))
        };

        render_report(
            source,
            filename,
            span,
            message,
            &format!("{}{}", message, expected_str),
            &[],
        )
    }
}

/// Render one ariadne report to a string; shared with scene errors
pub(crate) fn render_report(
    source: &str,
    filename: &str,
    span: &Span,
    message: &str,
    label: &str,
    notes: &[String],
) -> String {
    let start = span.start.min(span.end).min(source.len());
    let end = span.start.max(span.end).min(source.len());

    let mut buf = Vec::new();
    let mut report = Report::build(ReportKind::Error, filename, start)
        .with_message(message)
        .with_label(
            Label::new((filename, start..end))
                .with_message(label)
                .with_color(Color::Red),
        );
    for note in notes {
        report = report.with_note(note);
    }
    if report
        .finish()
        .write((filename, Source::from(source)), &mut buf)
        .is_err()
    {
        return format!("{}: {}", filename, message);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::{RichPattern, RichReason};

        let found_token = err.found().cloned();
        let is_keyword = matches!(
            found_token,
            Some(Token::View) | Some(Token::Pin) | Some(Token::Direction)
        );

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                if is_keyword {
                    format!(
                        "Cannot use {} here - it is a reserved keyword",
                        found.as_deref().map(format_token).unwrap_or_default()
                    )
                } else {
                    let found_str = match found {
                        Some(tok) => format_token(tok),
                        None => "end of input".to_string(),
                    };
                    format!("Unexpected {}", found_str)
                }
            }
            RichReason::Custom(msg) => msg.to_string(),
            #[allow(unreachable_patterns)]
            _ => "Invalid syntax".to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                RichPattern::Token(tok) => Some(format_token(tok)),
                RichPattern::Label(label) => Some(label.to_string()),
                RichPattern::EndOfInput => Some("end of input".to_string()),
                #[allow(unreachable_patterns)]
                _ => None,
            })
            .collect();

        // End-of-input errors can arrive with start past end
        let range = err.span().into_range();
        ParseError::Syntax {
            span: range.start.min(range.end)..range.start.max(range.end),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::Ident(s) => format!("name '{}'", s),
        Token::Number(n) => format!("number {}", n),
        Token::View => "keyword 'view'".to_string(),
        Token::Pin => "keyword 'pin'".to_string(),
        Token::Direction => "keyword 'direction'".to_string(),
        Token::BraceOpen => "'{'".to_string(),
        Token::BraceClose => "'}'".to_string(),
        Token::BracketOpen => "'['".to_string(),
        Token::BracketClose => "']'".to_string(),
        Token::ParenOpen => "'('".to_string(),
        Token::ParenClose => "')'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Colon => "':'".to_string(),
        Token::Dot => "'.'".to_string(),
        Token::Percent => "'%'".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Unknown => "unrecognized character".to_string(),
        Token::LineComment | Token::BlockComment => "comment".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_unexpected_token_message() {
        let errors = parse("pin a: top(10").unwrap_err();
        let ParseError::Syntax { message, .. } = &errors[0];
        assert!(message.starts_with("Unexpected"), "{}", message);
    }

    #[test]
    fn test_keyword_as_name() {
        let errors = parse("view pin").unwrap_err();
        let ParseError::Syntax { message, .. } = &errors[0];
        assert!(message.contains("reserved keyword"), "{}", message);
    }

    #[test]
    fn test_format_includes_filename_and_message() {
        let source = "pin a: top(10";
        let errors = parse(source).unwrap_err();
        let rendered = errors[0].format(source, "layout.pin");
        assert!(rendered.contains("layout.pin"));
        assert!(rendered.contains("Unexpected"));
    }

    #[test]
    fn test_end_of_input_span_is_ordered() {
        let source = "view root {\n  view a\n";
        let errors = parse(source).unwrap_err();
        for error in &errors {
            let span = error.span();
            assert!(span.start <= span.end, "{:?}", span);
            assert!(error.format(source, "layout.pin").contains("layout.pin"));
        }
    }

    #[test]
    fn test_render_report_clamps_span_to_source() {
        let rendered = render_report("view a", "layout.pin", &(9..4), "oops", "here", &[]);
        assert!(rendered.contains("oops"));
    }
}
