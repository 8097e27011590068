//! Command-line driver tying the lexer, parser, and assembly translator
//! together into one compilation run.

mod cli;
mod session;

pub use cli::Cli;
pub use session::{CompileError, ExitCode, Session};
