//! String and character literal scanning.
//!
//! String literals are `"…"` on a single line, with `""` as an
//! embedded-quote escape; character literals are `'x'` or `''` as the
//! analogous embedded-quote escape. Both kinds of literal that reach
//! end-of-line unterminated are a lexical error; scanning resynchronizes
//! at the newline rather than consuming the rest of the file.

use super::core::Lexer;
use crate::error::LexError;
use crate::token::{Literal, Token, TokenKind};
use pscc_util::Span;

impl<'a> Lexer<'a> {
    pub(super) fn lex_string(&mut self) -> Token {
        let start = self.cursor.position();
        let (start_line, start_col) = (self.cursor.line(), self.cursor.column());
        self.cursor.advance(); // opening '"'

        let mut value = String::new();
        loop {
            match self.cursor.current() {
                '"' if self.cursor.peek() == '"' => {
                    value.push('"');
                    self.cursor.advance();
                    self.cursor.advance();
                }
                '"' => {
                    self.cursor.advance();
                    break;
                }
                '\0' | '\n' => {
                    let end = self.cursor.position();
                    let span = Span::new(start_line, start_col, (end - start) as u32);
                    self.report(LexError::UnterminatedString { span });
                    break;
                }
                c => {
                    value.push(c);
                    self.cursor.advance();
                }
            }
        }

        let end = self.cursor.position();
        let lexeme = self.cursor.slice(start, end).to_string();
        let span = Span::new(start_line, start_col, (end - start) as u32);
        Token::new(TokenKind::StringLit, lexeme, span).with_literal(Literal::Str(value))
    }

    pub(super) fn lex_char(&mut self) -> Token {
        let start = self.cursor.position();
        let (start_line, start_col) = (self.cursor.line(), self.cursor.column());
        self.cursor.advance(); // opening '\''

        let value = if self.cursor.current() == '\'' && self.cursor.peek() == '\'' {
            self.cursor.advance();
            self.cursor.advance();
            '\''
        } else {
            let c = self.cursor.advance();
            if self.cursor.current() == '\'' {
                self.cursor.advance();
            } else if matches!(self.cursor.current(), '\0' | '\n') {
                let end = self.cursor.position();
                let span = Span::new(start_line, start_col, (end - start) as u32);
                self.report(LexError::UnterminatedChar { span });
            } else {
                // Additional characters before the closing quote: keep
                // the first and skip ahead to the quote, matching the
                // "substitute character" recovery strategy.
                while !matches!(self.cursor.current(), '\'' | '\0' | '\n') {
                    self.cursor.advance();
                }
                self.cursor.eat('\'');
            }
            c
        };

        let end = self.cursor.position();
        let lexeme = self.cursor.slice(start, end).to_string();
        let span = Span::new(start_line, start_col, (end - start) as u32);
        Token::new(TokenKind::CharLit, lexeme, span).with_literal(Literal::Char(value))
    }
}

#[cfg(test)]
mod tests {
    use crate::Lexer;
    use crate::error::LexError;
    use crate::token::{Literal, TokenKind};

    #[test]
    fn plain_string_literal() {
        let mut lex = Lexer::new(r#""Hi""#);
        let toks = lex.tokenize();
        assert_eq!(toks[0].kind, TokenKind::StringLit);
        assert_eq!(toks[0].literal, Some(Literal::Str("Hi".to_string())));
    }

    #[test]
    fn embedded_quote_in_string() {
        let mut lex = Lexer::new(r#""a""b""#);
        let toks = lex.tokenize();
        assert_eq!(toks[0].literal, Some(Literal::Str("a\"b".to_string())));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut lex = Lexer::new("\"abc\nrest");
        let _ = lex.tokenize();
        assert!(lex.errors().iter().any(|e| matches!(e, LexError::UnterminatedString { .. })));
    }

    #[test]
    fn plain_char_literal() {
        let mut lex = Lexer::new("'x'");
        let toks = lex.tokenize();
        assert_eq!(toks[0].kind, TokenKind::CharLit);
        assert_eq!(toks[0].literal, Some(Literal::Char('x')));
    }

    #[test]
    fn embedded_quote_char_literal() {
        let mut lex = Lexer::new("''");
        let toks = lex.tokenize();
        assert_eq!(toks[0].literal, Some(Literal::Char('\'')));
    }
}
