//! Diagnostic reporting.
//!
//! Every error line carries a kind, the source file's basename, a line
//! and column, and a message, and diagnostics accumulate across a phase
//! rather than aborting it on the first failure. [`Diagnostic`] is the
//! value type for a single such line; [`DiagnosticHandler`] is the
//! accumulator threaded through the lexer, parser, and driver.

use crate::Span;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Lexical,
    Syntactic,
    Semantic,
    Internal,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Lexical => "lexical error",
            Level::Syntactic => "syntax error",
            Level::Semantic => "semantic error",
            Level::Internal => "internal error",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn new(level: Level, span: Span, message: impl Into<String>) -> Self {
        Self {
            level,
            span,
            message: message.into(),
        }
    }

    /// Render as `<basename>:<line>:<col>: <kind>: <message>`.
    pub fn render(&self, source_name: &str) -> String {
        format!(
            "{source_name}:{}:{}: {}: {}",
            self.span.line, self.span.column, self.level, self.message
        )
    }
}

/// Accumulates diagnostics for one compilation run.
///
/// Never aborts on the first error; callers consult
/// [`DiagnosticHandler::has_errors`] at phase boundaries to decide
/// whether to proceed.
#[derive(Default)]
pub struct DiagnosticHandler {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diag: Diagnostic) {
        self.diagnostics.push(diag);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn count_of(&self, level: Level) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    /// One line per diagnostic, followed by a per-kind summary line
    /// giving counts and overall status.
    pub fn render_summary(&self, source_name: &str) -> String {
        let mut out = String::new();
        for diag in &self.diagnostics {
            out.push_str(&diag.render(source_name));
            out.push('\n');
        }
        out.push_str(&format!(
            "{} lexical, {} syntax, {} semantic error(s)\n",
            self.count_of(Level::Lexical),
            self.count_of(Level::Syntactic),
            self.count_of(Level::Semantic),
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_handler_has_no_errors() {
        let h = DiagnosticHandler::new();
        assert!(!h.has_errors());
    }

    #[test]
    fn reporting_accumulates_rather_than_replaces() {
        let mut h = DiagnosticHandler::new();
        h.report(Diagnostic::new(Level::Lexical, Span::point(1, 1), "a"));
        h.report(Diagnostic::new(Level::Syntactic, Span::point(2, 1), "b"));
        assert_eq!(h.diagnostics().len(), 2);
        assert_eq!(h.count_of(Level::Lexical), 1);
        assert_eq!(h.count_of(Level::Syntactic), 1);
    }

    #[test]
    fn render_includes_source_name_and_location() {
        let diag = Diagnostic::new(Level::Semantic, Span::point(3, 7), "undeclared identifier 'x'");
        let rendered = diag.render("prog.src");
        assert!(rendered.contains("prog.src:3:7"));
        assert!(rendered.contains("undeclared identifier 'x'"));
    }
}
