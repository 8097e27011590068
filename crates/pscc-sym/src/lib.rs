mod entry;
mod error;
mod scope;
mod table;

pub use entry::{ConstValue, ParameterMode, SymbolEntry, SymbolId, SymbolKind, VarType};
pub use error::SymError;
pub use scope::RibId;
pub use table::{ParamSpec, SymbolTable};
