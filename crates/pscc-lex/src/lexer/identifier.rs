//! Identifier and keyword scanning.
//!
//! An identifier is a letter followed by letters, digits, or underscores,
//! capped at [`MAX_IDENT_LEN`] characters; a longer run is reported once
//! as a lexical error and the whole run is still discarded as a single
//! token.

use super::core::Lexer;
use crate::error::LexError;
use crate::token::{Token, TokenKind};
use pscc_util::Span;

/// Maximum identifier length.
pub const MAX_IDENT_LEN: usize = 17;

fn lookup_keyword(lexeme: &str) -> Option<TokenKind> {
    let lower = lexeme.to_ascii_lowercase();
    TokenKind::KEYWORDS
        .iter()
        .copied()
        .find(|kw| kw.keyword_text() == Some(lower.as_str()))
}

impl<'a> Lexer<'a> {
    pub(super) fn lex_identifier_or_keyword(&mut self) -> Token {
        let start = self.cursor.position();
        let (start_line, start_col) = (self.cursor.line(), self.cursor.column());

        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }

        let end = self.cursor.position();
        let lexeme = self.cursor.slice(start, end).to_string();
        let span = Span::new(start_line, start_col, (end - start) as u32);

        if lexeme.chars().count() > MAX_IDENT_LEN {
            self.report(LexError::IdentifierTooLong {
                span,
                max: MAX_IDENT_LEN,
            });
        }

        let kind = lookup_keyword(&lexeme).unwrap_or(TokenKind::Ident);
        Token::new(kind, lexeme, span)
    }
}

pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lexer as PublicLexer;

    fn tokens(src: &str) -> Vec<Token> {
        let mut lex = PublicLexer::new(src);
        let toks = lex.tokenize();
        toks
    }

    #[test]
    fn recognizes_plain_identifier() {
        let toks = tokens("count");
        assert_eq!(toks[0].kind, TokenKind::Ident);
        assert_eq!(toks[0].lexeme, "count");
    }

    #[test]
    fn keywords_are_case_insensitive_but_preserve_lexeme() {
        let toks = tokens("PROCEDURE");
        assert_eq!(toks[0].kind, TokenKind::Procedure);
        assert_eq!(toks[0].lexeme, "PROCEDURE");
    }

    #[test]
    fn identifier_over_17_chars_is_an_error() {
        let mut lex = PublicLexer::new("this_identifier_is_too_long");
        let _ = lex.tokenize();
        assert!(lex.errors().iter().any(|e| matches!(e, LexError::IdentifierTooLong { .. })));
    }

    #[test]
    fn exactly_17_chars_is_not_an_error() {
        let ident = "a".repeat(17);
        let mut lex = PublicLexer::new(&ident);
        let _ = lex.tokenize();
        assert!(lex.errors().is_empty());
    }
}
