use std::{
    fs,
    io::{self, ErrorKind},
    path::PathBuf,
};

use crate::{
    compile::semantic::ValidatorOptions,
    infra::{YfcError, report},
};

pub mod ast;
pub mod codegen;
pub mod parser;
pub mod semantic;
pub mod types;

#[derive(Debug, Clone, Default)]
pub struct Compiler {
    src_path: Option<PathBuf>,
    out_path: Option<PathBuf>,
    options: ValidatorOptions,
    source: Option<String>,
}

impl Compiler {
    pub fn new() -> Compiler {
        Compiler::default()
    }

    pub fn src(&mut self, src: PathBuf) -> &mut Self {
        self.src_path = Some(src);

        self
    }

    pub fn out(&mut self, out: PathBuf) -> &mut Self {
        self.out_path = Some(out);

        self
    }

    pub fn strict_returns(&mut self, strict: bool) -> &mut Self {
        self.options.strict_returns = strict;

        self
    }

    /// Compiles the file set with [`Compiler::src`] into the one set with
    /// [`Compiler::out`]. Nothing is written unless compilation succeeds.
    pub fn compile(&mut self) -> Result<&mut Self, YfcError> {
        let src_path = self
            .src_path
            .clone()
            .ok_or_else(|| missing_path("No source path provided."))?;
        let out_path = self
            .out_path
            .clone()
            .ok_or_else(|| missing_path("No output path provided."))?;

        let src = fs::read_to_string(&src_path)?;
        tracing::info!(src = %src_path.display(), "compiling");

        let output = self.compile_str(&src);
        self.source = Some(src);
        let output = output?;

        fs::write(&out_path, output)?;
        tracing::info!(out = %out_path.display(), "wrote C output");

        Ok(self)
    }

    /// Runs the whole pipeline on an in-memory source and returns the C text.
    pub fn compile_str(&self, src: &str) -> Result<String, YfcError> {
        let program = parser::parse(src)?;
        let ast = semantic::analyze(&program, self.options)?;

        Ok(codegen::generate(&ast)?)
    }

    /// Prints `err` to stderr, pointing into the last source read by
    /// [`Compiler::compile`] when there is one.
    pub fn report(&self, err: &YfcError) {
        let name = self
            .src_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<input>".to_string());

        report::eprint_report(err, &name, self.source.as_deref().unwrap_or(""));
    }
}

fn missing_path(message: &str) -> YfcError {
    YfcError::IOError(io::Error::new(ErrorKind::InvalidInput, message))
}
