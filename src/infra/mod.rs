use std::{process::Termination, sync::Once};

use thiserror::Error;

use crate::compile::{
    ast::SourcePos,
    semantic::{Diagnostic, FatalError},
};

pub mod report;

pub struct ExitCode(u8);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAIL_PARSING: ExitCode = ExitCode(42);
    pub const FAIL_SEMANTIC: ExitCode = ExitCode(7);
    pub const FAIL_IO: ExitCode = ExitCode(2);
    pub const FAIL_OTHER: ExitCode = ExitCode(255);

    pub fn code(&self) -> u8 {
        self.0
    }
}

impl Termination for ExitCode {
    fn report(self) -> std::process::ExitCode {
        std::process::ExitCode::from(self.0)
    }
}

impl From<&YfcError> for ExitCode {
    fn from(value: &YfcError) -> Self {
        match value {
            YfcError::LexerError(_) => ExitCode::FAIL_PARSING,
            YfcError::ParsingError(_) => ExitCode::FAIL_PARSING,
            YfcError::SemanticError(_) => ExitCode::FAIL_SEMANTIC,
            YfcError::IOError(_) => ExitCode::FAIL_IO,
            _ => ExitCode::FAIL_OTHER,
        }
    }
}

impl From<YfcError> for ExitCode {
    fn from(value: YfcError) -> Self {
        ExitCode::from(&value)
    }
}

/// Lexer or parser complaint, detached from the token types it was raised on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub span: SourcePos,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum YfcError {
    #[error("Lexical Analysis failed.")]
    LexerError(Vec<ParseError>),

    #[error("Syntactic Analysis failed.")]
    ParsingError(Vec<ParseError>),

    #[error("Semantical Analysis failed with {} error(s).", .0.len())]
    SemanticError(Vec<Diagnostic>),

    #[error("Compilation aborted: {0}")]
    FatalError(#[from] FatalError),

    #[error("There was an I/O error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("There was an Formatting error: {0}")]
    FmtError(#[from] std::fmt::Error),
}

static TRACING_INIT: Once = Once::new();

/// Installs a stderr subscriber filtered by `RUST_LOG`, e.g.
/// `RUST_LOG=yfc=debug`. Nothing is installed when the variable is unset.
/// Calling it again has no effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
