//! Symbol-table error taxonomy.

use pscc_util::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SymError {
    #[error("'{name}' is already declared in this scope")]
    DuplicateDeclaration { name: String, span: Span },

    #[error("'{name}' is not declared")]
    SymbolNotFound { name: String, span: Span },
}

impl SymError {
    pub fn span(&self) -> Span {
        match self {
            SymError::DuplicateDeclaration { span, .. } => *span,
            SymError::SymbolNotFound { span, .. } => *span,
        }
    }
}
