//! Renders compiler errors against the source they were found in.

use std::io::{self, Write};

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::{compile::ast::SourcePos, infra::YfcError};

/// Writes one report per diagnostic carried by `err`. Errors without a source
/// location get a single plain line.
pub fn write_report<W: Write>(
    err: &YfcError,
    name: &str,
    src: &str,
    color: bool,
    out: &mut W,
) -> io::Result<()> {
    let located: Vec<(SourcePos, String)> = match err {
        YfcError::LexerError(errs) | YfcError::ParsingError(errs) => errs
            .iter()
            .map(|err| (err.span.clone(), err.message.clone()))
            .collect(),
        YfcError::SemanticError(diagnostics) => diagnostics
            .iter()
            .map(|diagnostic| (diagnostic.span.clone(), diagnostic.error.to_string()))
            .collect(),
        _ => return writeln!(out, "Error: {err}"),
    };

    for (span, message) in located {
        Report::build(ReportKind::Error, (name, span.clone()))
            .with_config(Config::default().with_color(color))
            .with_message(err.to_string())
            .with_label(
                Label::new((name, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((name, Source::from(src)), &mut *out)?;
    }

    Ok(())
}

/// Prints `err` to stderr with colors.
pub fn eprint_report(err: &YfcError, name: &str, src: &str) {
    let mut stderr = io::stderr().lock();

    if let Err(io_err) = write_report(err, name, src, true, &mut stderr) {
        tracing::warn!(%io_err, "failed to print diagnostics");
    }
}
