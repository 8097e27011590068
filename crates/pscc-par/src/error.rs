//! Parser-level error taxonomy: syntactic errors from the token-matching
//! machinery, plus the semantic checks the grammar's reduction actions
//! perform inline (name resolution, arity, assignability).

use pscc_sym::SymError;
use pscc_util::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String, span: Span },

    #[error("{0}")]
    Symbol(#[from] SymError),

    #[error("'{name}' is not declared as a procedure")]
    NotAProcedure { name: String, span: Span },

    #[error("procedure '{header}' ends with mismatched name '{closing}'")]
    NameMismatch { header: String, closing: String, span: Span },

    #[error("cannot assign to '{name}'")]
    NotAssignable { name: String, span: Span },

    #[error("procedure '{name}' expects {expected} argument(s), found {found}")]
    ArityMismatch { name: String, expected: usize, found: usize, span: Span },

    #[error("constant initializer must be an integer, real, or character literal")]
    InvalidConstantValue { span: Span },

    #[error("a parameter cannot be declared constant")]
    ParameterCannotBeConstant { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::Symbol(e) => e.span(),
            ParseError::NotAProcedure { span, .. } => *span,
            ParseError::NameMismatch { span, .. } => *span,
            ParseError::NotAssignable { span, .. } => *span,
            ParseError::ArityMismatch { span, .. } => *span,
            ParseError::InvalidConstantValue { span } => *span,
            ParseError::ParameterCannotBeConstant { span } => *span,
        }
    }

    /// Whether this error is syntactic (token-matching) rather than a
    /// semantic check performed inline by a reduction action.
    pub fn is_syntactic(&self) -> bool {
        matches!(self, ParseError::UnexpectedToken { .. })
    }
}
