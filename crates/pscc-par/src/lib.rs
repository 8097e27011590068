//! Recursive-descent parser with inline semantic actions: a single pass
//! turns a token stream into a populated symbol table and a three-address
//! code stream, with no separate AST stage in between.

mod error;
mod expr;
mod items;
mod stmt;

pub use error::ParseError;

use pscc_lex::{Token, TokenKind};
use pscc_sym::{SymbolId, SymbolTable};
use pscc_tac::TacBuilder;
use pscc_util::{Diagnostic, DiagnosticHandler, Level};

/// Tokens that end error recovery: a statement terminator, a block
/// opener/closer, or end of input.
const SYNC_SET: &[TokenKind] = &[TokenKind::Semicolon, TokenKind::Begin, TokenKind::End, TokenKind::Eof];

pub struct ParseOutcome {
    pub symbols: SymbolTable,
    pub tac: TacBuilder,
    pub diagnostics: DiagnosticHandler,
    pub entry_point: Option<String>,
}

impl ParseOutcome {
    /// Parsing is successful only when no diagnostic was raised and the
    /// parser actually reached the end of the token stream.
    pub fn succeeded(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: DiagnosticHandler,
    symbols: SymbolTable,
    tac: TacBuilder,
    proc_stack: Vec<SymbolId>,
    entry_point: Option<String>,
}

/// Parse a complete program from its token stream (normally the output of
/// [`pscc_lex::Lexer::tokenize`]).
pub fn parse(tokens: Vec<Token>) -> ParseOutcome {
    let mut parser = Parser::new(tokens);
    parser.parse_program();
    parser.into_outcome()
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            diagnostics: DiagnosticHandler::new(),
            symbols: SymbolTable::new(),
            tac: TacBuilder::new(),
            proc_stack: Vec::new(),
            entry_point: None,
        }
    }

    fn into_outcome(self) -> ParseOutcome {
        ParseOutcome {
            symbols: self.symbols,
            tac: self.tac,
            diagnostics: self.diagnostics,
            entry_point: self.entry_point,
        }
    }

    // -- token-stream primitives ------------------------------------

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    fn at_end(&self) -> bool {
        self.kind() == TokenKind::Eof
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if !self.at_end() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let found = self.current().clone();
            Err(ParseError::UnexpectedToken {
                expected: what.to_string(),
                found: format!("{:?} '{}'", found.kind, found.lexeme),
                span: found.span,
            })
        }
    }

    fn expect_ident(&mut self) -> Result<Token, ParseError> {
        self.expect(TokenKind::Ident, "identifier")
    }

    fn report(&mut self, err: ParseError) {
        let level = if err.is_syntactic() { Level::Syntactic } else { Level::Semantic };
        self.diagnostics.report(Diagnostic::new(level, err.span(), err.to_string()));
    }

    /// Skip tokens until one in [`SYNC_SET`] is reached, without
    /// consuming it.
    fn synchronize(&mut self) {
        while !SYNC_SET.contains(&self.kind()) {
            self.advance();
        }
    }
}
