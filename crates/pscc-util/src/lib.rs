//! pscc-util - shared foundation types for the pscc compiler workspace.
//!
//! Every other crate in the workspace depends on this one for: interned
//! identifiers ([`Symbol`]), source locations ([`Span`]), diagnostic
//! accumulation ([`Diagnostic`], [`DiagnosticHandler`]), typed index
//! vectors ([`IndexVec`], [`Idx`]), and the shared internal-error type
//! ([`InternalError`]).

mod diagnostic;
mod error;
mod index_vec;
mod span;
mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticHandler, Level};
pub use error::InternalError;
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
