//! Whitespace and line-comment skipping. Comments run from `--` to the
//! end of the line and carry no semantic value.

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(super) fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current() {
                c if c.is_whitespace() => {
                    self.cursor.advance();
                }
                '-' if self.cursor.peek() == '-' => {
                    while !matches!(self.cursor.current(), '\n' | '\0') {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Lexer;
    use crate::token::TokenKind;

    #[test]
    fn line_comment_is_skipped() {
        let mut lex = Lexer::new("count -- trailing remark\n+ 1");
        let toks = lex.tokenize();
        assert_eq!(toks[0].kind, TokenKind::Ident);
        assert_eq!(toks[1].kind, TokenKind::Plus);
    }

    #[test]
    fn whitespace_between_tokens_is_skipped() {
        let mut lex = Lexer::new("  a   :=   b  ");
        let toks = lex.tokenize();
        assert_eq!(toks[0].kind, TokenKind::Ident);
        assert_eq!(toks[1].kind, TokenKind::Assign);
        assert_eq!(toks[2].kind, TokenKind::Ident);
    }
}
