//! Operator and punctuation scanning: `:=`, `=`, `/=`, `<`, `<=`, `>`,
//! `>=`, `+`, `-`, `*`, `/`, `(`, `)`, `,`, `:`, `;`, `.`.

use super::core::Lexer;
use crate::token::{Token, TokenKind};
use pscc_util::Span;

impl<'a> Lexer<'a> {
    pub(super) fn lex_operator_or_punct(&mut self) -> Token {
        let start = self.cursor.position();
        let (start_line, start_col) = (self.cursor.line(), self.cursor.column());
        let c = self.cursor.advance();

        let kind = match c {
            ':' => {
                if self.cursor.eat('=') {
                    TokenKind::Assign
                } else {
                    TokenKind::Colon
                }
            }
            '=' => TokenKind::Eq,
            '/' => {
                if self.cursor.eat('=') {
                    TokenKind::Ne
                } else {
                    TokenKind::Slash
                }
            }
            '<' => {
                if self.cursor.eat('=') {
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.cursor.eat('=') {
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            _ => unreachable!("lex_operator_or_punct called on non-operator character"),
        };

        let end = self.cursor.position();
        let lexeme = self.cursor.slice(start, end).to_string();
        let span = Span::new(start_line, start_col, (end - start) as u32);
        Token::new(kind, lexeme, span)
    }
}

#[cfg(test)]
mod tests {
    use crate::Lexer;
    use crate::token::TokenKind;

    #[test]
    fn assign_vs_colon() {
        let mut lex = Lexer::new(":= :");
        let toks = lex.tokenize();
        assert_eq!(toks[0].kind, TokenKind::Assign);
        assert_eq!(toks[1].kind, TokenKind::Colon);
    }

    #[test]
    fn relational_operators() {
        let mut lex = Lexer::new("= /= < <= > >=");
        let toks = lex.tokenize();
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::Lt,
                TokenKind::Le,
                TokenKind::Gt,
                TokenKind::Ge,
            ]
        );
    }
}
