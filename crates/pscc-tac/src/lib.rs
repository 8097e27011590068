mod builder;
mod instruction;

pub use builder::{masm_safe_name, TacBuilder};
pub use instruction::{BinOp, Instruction, UnOp};
