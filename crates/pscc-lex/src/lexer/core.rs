//! The `Lexer` driver: dispatches each position to the right per-class
//! scanner and accumulates errors rather than aborting on the first one,
//! so a single run can report every lexical problem in a source file.

use super::identifier::is_ident_start;
use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};
use pscc_util::Span;

pub struct Lexer<'a> {
    pub(super) cursor: Cursor<'a>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            errors: Vec::new(),
        }
    }

    pub(super) fn report(&mut self, error: LexError) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Produce the next token, skipping whitespace and comments first.
    /// Illegal characters are reported and silently discarded; scanning
    /// resumes at the following character rather than stopping.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_trivia();

            if self.cursor.is_at_end() {
                let span = Span::point(self.cursor.line(), self.cursor.column());
                return Token::eof(span);
            }

            let c = self.cursor.current();
            if is_ident_start(c) {
                return self.lex_identifier_or_keyword();
            }
            if c.is_ascii_digit() {
                return self.lex_number();
            }
            if c == '"' {
                return self.lex_string();
            }
            if c == '\'' {
                return self.lex_char();
            }
            if matches!(
                c,
                ':' | '=' | '/' | '<' | '>' | '+' | '-' | '*' | '(' | ')' | ',' | ';' | '.'
            ) {
                return self.lex_operator_or_punct();
            }

            let start_line = self.cursor.line();
            let start_col = self.cursor.column();
            self.cursor.advance();
            self.report(LexError::IllegalCharacter {
                ch: c,
                span: Span::new(start_line, start_col, 1),
            });
        }
    }

    /// Scan the entire source into a token stream, including the
    /// trailing `Eof` token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexError;

    #[test]
    fn empty_source_yields_only_eof() {
        let mut lex = Lexer::new("");
        let toks = lex.tokenize();
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::Eof);
    }

    #[test]
    fn illegal_character_is_reported_and_skipped() {
        let mut lex = Lexer::new("a @ b");
        let toks = lex.tokenize();
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]);
        assert!(matches!(lex.errors()[0], LexError::IllegalCharacter { ch: '@', .. }));
    }

    #[test]
    fn iterator_impl_excludes_eof() {
        let lex = Lexer::new("a b");
        let collected: Vec<_> = lex.collect();
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn small_procedure_tokenizes_without_errors() {
        let src = "procedure Main is\nbegin\n  put(1);\nend Main;";
        let mut lex = Lexer::new(src);
        let toks = lex.tokenize();
        assert!(lex.errors().is_empty());
        assert_eq!(toks.first().unwrap().kind, TokenKind::Procedure);
        assert_eq!(toks.last().unwrap().kind, TokenKind::Eof);
    }
}
