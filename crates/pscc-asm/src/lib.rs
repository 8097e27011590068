//! Translates a finished parse (symbol table + three-address code) into a
//! MASM/TASM-compatible 8086 assembly program runnable against the
//! externally supplied `io.asm` runtime.

mod frame;
mod operand;
mod program;
mod translate;

pub use frame::FrameLayout;
pub use program::translate_program;
