//! Lexer for the pin script using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Statement keywords
    #[token("view")]
    View,
    #[token("pin")]
    Pin,
    #[token("direction")]
    Direction,

    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("%")]
    Percent,
    #[token("-")]
    Minus,

    // Literals
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    BlockComment,

    /// Any character the script does not use; left in the stream so the parser reports it
    Unknown,
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Unknown), span))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).map(|(t, _)| t).collect()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            tokens("view pin direction"),
            vec![Token::View, Token::Pin, Token::Direction]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(
            tokens("viewport pinned"),
            vec![
                Token::Ident("viewport".to_string()),
                Token::Ident("pinned".to_string())
            ]
        );
    }

    #[test]
    fn test_call_chain() {
        assert_eq!(
            tokens("pin a: top(10).width(50%)"),
            vec![
                Token::Pin,
                Token::Ident("a".to_string()),
                Token::Colon,
                Token::Ident("top".to_string()),
                Token::ParenOpen,
                Token::Number(10.0),
                Token::ParenClose,
                Token::Dot,
                Token::Ident("width".to_string()),
                Token::ParenOpen,
                Token::Number(50.0),
                Token::Percent,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            tokens("42 3.14 -10"),
            vec![
                Token::Number(42.0),
                Token::Number(3.14),
                Token::Minus,
                Token::Number(10.0)
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            tokens("view // comment\n/* block */ pin"),
            vec![Token::View, Token::Pin]
        );
    }

    #[test]
    fn test_unknown_character_kept() {
        assert_eq!(
            tokens("a @ b"),
            vec![
                Token::Ident("a".to_string()),
                Token::Unknown,
                Token::Ident("b".to_string())
            ]
        );
    }

    #[test]
    fn test_spans() {
        let spans: Vec<_> = lex("pin ab").map(|(_, s)| s).collect();
        assert_eq!(spans, vec![0..3, 4..6]);
    }
}
