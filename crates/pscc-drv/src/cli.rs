//! Command-line surface: one source file in, a TAC and an ASM file out.

use std::path::PathBuf;

use clap::Parser;

/// Compile a single source file to three-address code and 8086 assembly.
#[derive(Debug, Parser)]
#[command(name = "pscc", version, about = "Compiles a source file to TAC and 8086 assembly")]
pub struct Cli {
    /// Source file to compile.
    pub source: PathBuf,

    /// ASM output path; defaults to the source's basename with a `.asm` extension.
    #[arg(short = 'o', long = "asm-output", value_name = "FILE")]
    pub asm_output: Option<PathBuf>,

    /// TAC output path; defaults to the source's basename with a `.tac` extension.
    #[arg(short = 't', long = "tac-output", value_name = "FILE")]
    pub tac_output: Option<PathBuf>,

    /// Verbose diagnostics.
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,
}
