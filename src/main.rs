use std::path::PathBuf;

use clap::Parser;

use yfc::compile::Compiler;
use yfc::infra::{ExitCode, init_tracing};

/// Compiles a source file to C.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    src: String,
    out: String,

    /// Reject non-void functions that can reach their end without returning.
    #[arg(long)]
    strict_returns: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let mut compiler = Compiler::new();
    let compilation_result = compiler
        .src(PathBuf::from(args.src.as_str()))
        .out(PathBuf::from(args.out.as_str()))
        .strict_returns(args.strict_returns)
        .compile()
        .err();

    let Some(err) = compilation_result else {
        return ExitCode::SUCCESS;
    };

    compiler.report(&err);
    err.into()
}
