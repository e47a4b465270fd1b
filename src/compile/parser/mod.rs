use chumsky::{Parser, input::Input};

use crate::{
    compile::ast::{SourcePos, parsed::Program},
    infra::{ParseError, YfcError},
};

pub mod lex;
pub mod parse;

pub type Spanned<T> = (T, SourcePos);

/// Runs lexer and parser over `src`.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = src.len()))]
pub fn parse(src: &str) -> Result<Program, YfcError> {
    let tokens = lex::lexer().parse(src).into_result().map_err(|errs| {
        let errs = errs
            .into_iter()
            .map(|err| ParseError {
                span: (*err.span()).into(),
                message: err.to_string(),
            })
            .collect();

        YfcError::LexerError(errs)
    })?;

    tracing::trace!(tokens = tokens.len(), "lexed");

    let token_stream = tokens
        .as_slice()
        .map(src.len()..src.len(), |(t, s)| (t, s));

    let result = parse::program_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| {
            let errs = errs
                .into_iter()
                .map(|err| ParseError {
                    span: err.span().clone(),
                    message: err.reason().to_string(),
                })
                .collect();

            YfcError::ParsingError(errs)
        });

    result
}
