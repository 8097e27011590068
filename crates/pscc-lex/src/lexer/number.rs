//! Numeric literal scanning: integer literals and `digits . digits` real
//! literals. A trailing `.` not followed by a digit is left for the
//! punctuation scanner rather than folded into the number.

use super::core::Lexer;
use crate::token::{Literal, Token, TokenKind};
use pscc_util::Span;

impl<'a> Lexer<'a> {
    pub(super) fn lex_number(&mut self) -> Token {
        let start = self.cursor.position();
        let (start_line, start_col) = (self.cursor.line(), self.cursor.column());

        while self.cursor.current().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut is_real = false;
        if self.cursor.current() == '.' && self.cursor.peek().is_ascii_digit() {
            is_real = true;
            self.cursor.advance(); // '.'
            while self.cursor.current().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        let end = self.cursor.position();
        let lexeme = self.cursor.slice(start, end).to_string();
        let span = Span::new(start_line, start_col, (end - start) as u32);

        if is_real {
            let value: f64 = lexeme.parse().unwrap_or(0.0);
            Token::new(TokenKind::RealLit, lexeme, span).with_literal(Literal::Real(value))
        } else {
            let value: i64 = lexeme.parse().unwrap_or(0);
            Token::new(TokenKind::IntLit, lexeme, span).with_literal(Literal::Int(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Lexer;
    use crate::token::{Literal, TokenKind};

    #[test]
    fn integer_literal() {
        let mut lex = Lexer::new("4213");
        let toks = lex.tokenize();
        assert_eq!(toks[0].kind, TokenKind::IntLit);
        assert_eq!(toks[0].literal, Some(Literal::Int(4213)));
    }

    #[test]
    fn real_literal() {
        let mut lex = Lexer::new("3.14");
        let toks = lex.tokenize();
        assert_eq!(toks[0].kind, TokenKind::RealLit);
        assert_eq!(toks[0].literal, Some(Literal::Real(3.14)));
    }

    #[test]
    fn dot_without_trailing_digit_is_not_consumed_as_real() {
        let mut lex = Lexer::new("42.end");
        let toks = lex.tokenize();
        assert_eq!(toks[0].kind, TokenKind::IntLit);
        assert_eq!(toks[1].kind, TokenKind::Dot);
    }
}
