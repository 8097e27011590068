//! Source locations.
//!
//! The lexer tracks a 1-based `(line, column)` pair for every token.
//! [`Span`] keeps that pair plus the lexeme's byte length, so later
//! phases can underline the whole token in a diagnostic rather than just
//! its first character.

/// A source location spanning `len` bytes starting at `(line, column)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Span {
    pub line: u32,
    pub column: u32,
    pub len: u32,
}

impl Span {
    pub const DUMMY: Span = Span {
        line: 0,
        column: 0,
        len: 0,
    };

    pub fn new(line: u32, column: u32, len: u32) -> Self {
        Self { line, column, len }
    }

    /// A zero-length span at a single point, for diagnostics that have no
    /// natural lexeme to underline (e.g. "expected `;` here").
    pub fn point(line: u32, column: u32) -> Self {
        Self::new(line, column, 0)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
