//! Phase orchestration: read the source, lex, parse (with its inline
//! semantic actions and TAC emission), translate to assembly, and write
//! the resulting artifacts — or stop after parsing and report diagnostics
//! if any phase up to there found errors.

use std::fs;
use std::path::{Path, PathBuf};

use pscc_util::{Diagnostic, DiagnosticHandler, Level};
use tracing::{debug, error, info};

use crate::Cli;

/// Process exit codes, matching the CLI's documented contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    FileError = 1,
    SyntaxErrors = 2,
    SemanticErrors = 3,
    InternalFailure = 4,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("failed to read {}: {source}", path.display())]
    ReadSource { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to write {}: {source}", path.display())]
    WriteOutput { path: PathBuf, #[source] source: std::io::Error },
}

/// One compiler invocation, with its resolved input/output paths.
pub struct Session {
    source_path: PathBuf,
    tac_path: PathBuf,
    asm_path: PathBuf,
}

impl Session {
    pub fn new(cli: &Cli) -> Self {
        let tac_path = cli.tac_output.clone().unwrap_or_else(|| cli.source.with_extension("tac"));
        let asm_path = cli.asm_output.clone().unwrap_or_else(|| cli.source.with_extension("asm"));
        Self {
            source_path: cli.source.clone(),
            tac_path,
            asm_path,
        }
    }

    /// Run the full pipeline. Diagnostics are printed to stderr as a side
    /// effect; the returned `ExitCode` is what the process should exit
    /// with. `Err` is reserved for file-system failures (exit code 1).
    pub fn compile(&self) -> Result<ExitCode, CompileError> {
        info!(source = %self.source_path.display(), "reading source");
        let source = fs::read_to_string(&self.source_path).map_err(|source_err| CompileError::ReadSource {
            path: self.source_path.clone(),
            source: source_err,
        })?;

        let basename = self
            .source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_path.display().to_string());

        let mut lexer = pscc_lex::Lexer::new(&source);
        let tokens = lexer.tokenize();
        debug!(count = tokens.len(), "tokenized");

        let mut diagnostics = DiagnosticHandler::new();
        for err in lexer.errors() {
            diagnostics.report(Diagnostic::new(Level::Lexical, err.span(), err.to_string()));
        }

        info!("parsing");
        let outcome = pscc_par::parse(tokens);
        for diag in outcome.diagnostics.diagnostics() {
            diagnostics.report(diag.clone());
        }

        if diagnostics.has_errors() {
            eprint!("{}", diagnostics.render_summary(&basename));
            return Ok(exit_code_for(&diagnostics));
        }

        let entry = match outcome.entry_point.as_deref() {
            Some(entry) => entry.to_string(),
            None => {
                error!("parse reported no errors but produced no entry point");
                return Ok(ExitCode::InternalFailure);
            }
        };

        info!(tac_path = %self.tac_path.display(), "writing TAC");
        fs::write(&self.tac_path, outcome.tac.render()).map_err(|source_err| CompileError::WriteOutput {
            path: self.tac_path.clone(),
            source: source_err,
        })?;

        info!(asm_path = %self.asm_path.display(), "translating to assembly");
        let asm = pscc_asm::translate_program(&outcome.symbols, &outcome.tac, &entry);
        fs::write(&self.asm_path, asm).map_err(|source_err| CompileError::WriteOutput {
            path: self.asm_path.clone(),
            source: source_err,
        })?;

        eprint!("{}", diagnostics.render_summary(&basename));
        Ok(ExitCode::Success)
    }
}

/// The worst diagnostic level present picks the exit code: lexical or
/// syntactic errors halt the pipeline the same way, ahead of semantic
/// ones, matching the propagation policy that stops TAC emission on
/// either.
fn exit_code_for(diagnostics: &DiagnosticHandler) -> ExitCode {
    if diagnostics.count_of(Level::Lexical) > 0 || diagnostics.count_of(Level::Syntactic) > 0 {
        ExitCode::SyntaxErrors
    } else {
        ExitCode::SemanticErrors
    }
}
