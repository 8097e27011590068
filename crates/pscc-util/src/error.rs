//! An internal-error (ICE) type shared by every phase.
//!
//! Reserved for broken invariants that must never fire on correct input —
//! e.g. the assembly translator finding a `_BP+N` place with no matching
//! parameter symbol. Every such failure names the invariant it found
//! broken.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("internal compiler error: {0}")]
pub struct InternalError(pub String);

impl InternalError {
    pub fn broken_invariant(what: impl Into<String>) -> Self {
        Self(what.into())
    }
}
