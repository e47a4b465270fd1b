use std::fmt::Display;

use chumsky::prelude::*;

use super::Spanned;

#[derive(Clone, Debug, PartialEq)]
#[allow(non_camel_case_types)]
pub enum Token<'src> {
    IDENT(&'src str),
    IF,
    ELSE,
    RETURN,
    NUM { value: &'src str, base: u32 },
    L_ROUND,
    R_ROUND,
    L_CURLY,
    R_CURLY,
    COMMA,
    SEMICOLON,
    ASSIGN,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    AMP,
    PIPE,
    CARET,
    SHIFT_LEFT,
    SHIFT_RIGHT,
    AND_AND,
    OR_OR,
    EQ_EQ,
    NOT_EQ,
    LESS,
    LESS_EQ,
    GREATER,
    GREATER_EQ,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IDENT(ident) => write!(f, "{ident}"),
            Self::NUM { value, base: 16 } => write!(f, "0x{value}"),
            Self::NUM { value, .. } => write!(f, "{value}"),
            Self::IF => write!(f, "if"),
            Self::ELSE => write!(f, "else"),
            Self::RETURN => write!(f, "return"),
            Self::L_ROUND => write!(f, "("),
            Self::R_ROUND => write!(f, ")"),
            Self::L_CURLY => write!(f, "{{"),
            Self::R_CURLY => write!(f, "}}"),
            Self::COMMA => write!(f, ","),
            Self::SEMICOLON => write!(f, ";"),
            Self::ASSIGN => write!(f, "="),
            Self::PLUS => write!(f, "+"),
            Self::MINUS => write!(f, "-"),
            Self::STAR => write!(f, "*"),
            Self::SLASH => write!(f, "/"),
            Self::PERCENT => write!(f, "%"),
            Self::AMP => write!(f, "&"),
            Self::PIPE => write!(f, "|"),
            Self::CARET => write!(f, "^"),
            Self::SHIFT_LEFT => write!(f, "<<"),
            Self::SHIFT_RIGHT => write!(f, ">>"),
            Self::AND_AND => write!(f, "&&"),
            Self::OR_OR => write!(f, "||"),
            Self::EQ_EQ => write!(f, "=="),
            Self::NOT_EQ => write!(f, "!="),
            Self::LESS => write!(f, "<"),
            Self::LESS_EQ => write!(f, "<="),
            Self::GREATER => write!(f, ">"),
            Self::GREATER_EQ => write!(f, ">="),
        }
    }
}

type ErrorParserExtra<'src> = extra::Err<Rich<'src, char, SimpleSpan>>;

fn decimal<'src>() -> impl Parser<'src, &'src str, Token<'src>, ErrorParserExtra<'src>> {
    text::int(10).map(|value: &'src str| Token::NUM { value, base: 10 })
}

fn hexadecimal<'src>() -> impl Parser<'src, &'src str, Token<'src>, ErrorParserExtra<'src>> {
    just("0x")
        .ignore_then(text::int(16))
        .map(|value: &'src str| Token::NUM { value, base: 16 })
}

fn operator<'src>() -> impl Parser<'src, &'src str, Token<'src>, ErrorParserExtra<'src>> {
    // Longest spelling first.
    let double = choice((
        just("<<").to(Token::SHIFT_LEFT),
        just(">>").to(Token::SHIFT_RIGHT),
        just("&&").to(Token::AND_AND),
        just("||").to(Token::OR_OR),
        just("==").to(Token::EQ_EQ),
        just("!=").to(Token::NOT_EQ),
        just("<=").to(Token::LESS_EQ),
        just(">=").to(Token::GREATER_EQ),
    ));

    let single = choice((
        just("=").to(Token::ASSIGN),
        just("+").to(Token::PLUS),
        just("-").to(Token::MINUS),
        just("*").to(Token::STAR),
        just("/").to(Token::SLASH),
        just("%").to(Token::PERCENT),
        just("&").to(Token::AMP),
        just("|").to(Token::PIPE),
        just("^").to(Token::CARET),
        just("<").to(Token::LESS),
        just(">").to(Token::GREATER),
    ));

    double.or(single)
}

pub fn lexer<'src>()
-> impl Parser<'src, &'src str, Vec<Spanned<Token<'src>>>, ErrorParserExtra<'src>> {
    let ident = text::ascii::ident().map(|ident| match ident {
        "if" => Token::IF,
        "else" => Token::ELSE,
        "return" => Token::RETURN,
        _ => Token::IDENT(ident),
    });

    let punctuation = choice((
        just("(").to(Token::L_ROUND),
        just(")").to(Token::R_ROUND),
        just("{").to(Token::L_CURLY),
        just("}").to(Token::R_CURLY),
        just(",").to(Token::COMMA),
        just(";").to(Token::SEMICOLON),
    ));

    let comment_single_line = just("//")
        .then(any().and_is(text::newline().not()).repeated())
        .padded()
        .to(())
        .boxed();

    let comment_multi_line = just("/*")
        .then(any().and_is(just("*/").not()).repeated())
        .then(just("*/"))
        .padded()
        .to(())
        .boxed();

    let comment = choice((comment_single_line, comment_multi_line)).boxed();

    choice((hexadecimal(), decimal(), ident, punctuation, operator()))
        .map_with(|token, ctx| (token, ctx.span().into()))
        .padded_by(comment.repeated())
        .padded()
        .repeated()
        .collect()
        .then_ignore(end())
}
