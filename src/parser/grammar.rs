//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse a pin script into an AST
pub fn parse(input: &str) -> Result<Script, Vec<crate::ParseError>> {
    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    script_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn script_parser<'a, I>() -> impl Parser<'a, I, Script, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let identifier = select! {
        Token::Ident(s) => s,
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    let signed_number = just(Token::Minus)
        .or_not()
        .then(select! { Token::Number(n) => n })
        .map(|(minus, n)| if minus.is_some() { -n } else { n });

    // View modifiers: [width: 100, height: 40]
    let modifier = identifier
        .clone()
        .then_ignore(just(Token::Colon))
        .then(
            signed_number
                .clone()
                .map_with(|n, e| Spanned::new(n, span_range(&e.span()))),
        )
        .map_with(|(key, value), e| Spanned::new(Modifier { key, value }, span_range(&e.span())));

    let modifier_block = modifier
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    let view = recursive(|view| {
        just(Token::View)
            .ignore_then(identifier.clone())
            .then(modifier_block.clone().or_not())
            .then(
                view.repeated()
                    .collect::<Vec<_>>()
                    .delimited_by(just(Token::BraceOpen), just(Token::BraceClose))
                    .or_not(),
            )
            .map_with(|((name, modifiers), children), e| {
                Spanned::new(
                    ViewDecl {
                        name,
                        modifiers: modifiers.unwrap_or_default(),
                        children: children.unwrap_or_default(),
                    },
                    span_range(&e.span()),
                )
            })
    });

    // Call arguments: 10, -4, 50%, header, header.bottom, [a, b], aligned: left
    let arg = recursive(|arg| {
        let number = signed_number
            .clone()
            .then(just(Token::Percent).or_not())
            .map(|(n, percent)| {
                if percent.is_some() {
                    Arg::Percent(n)
                } else {
                    Arg::Number(n)
                }
            });

        let named = identifier
            .clone()
            .then_ignore(just(Token::Colon))
            .then(arg.clone())
            .map(|(key, value)| Arg::Named {
                key,
                value: Box::new(value),
            });

        let list = arg
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
            .map(Arg::List);

        let name_or_member = identifier
            .clone()
            .then(just(Token::Dot).ignore_then(identifier.clone()).or_not())
            .map(|(node, member)| match member {
                Some(member) => Arg::Member {
                    node: node.node,
                    member: member.node,
                },
                None => Arg::Name(node.node),
            });

        choice((number, named, list, name_or_member))
            .map_with(|a, e| Spanned::new(a, span_range(&e.span())))
    })
    .boxed();

    let call = identifier
        .clone()
        .then(
            arg.separated_by(just(Token::Comma))
                .allow_trailing()
                .collect::<Vec<_>>()
                .delimited_by(just(Token::ParenOpen), just(Token::ParenClose)),
        )
        .map_with(|(name, args), e| Spanned::new(Call { name, args }, span_range(&e.span())));

    let pin = just(Token::Pin)
        .ignore_then(identifier.clone())
        .then_ignore(just(Token::Colon))
        .then(
            call.separated_by(just(Token::Dot))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .map(|(target, calls)| Statement::Pin(PinDecl { target, calls }));

    let direction = just(Token::Direction)
        .ignore_then(identifier)
        .map(Statement::Direction);

    let statement = choice((
        direction,
        pin,
        view.map(|v: Spanned<ViewDecl>| Statement::View(v.node)),
    ))
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    statement
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|statements| Script { statements })
}
