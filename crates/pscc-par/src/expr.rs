//! `Expr`, `SimpleExpr`, `Term`, and `Factor` — expression lowering to
//! three-address code. Each level returns the *place* its subtree
//! evaluates to; binary and unary operators allocate a fresh temporary.

use crate::error::ParseError;
use crate::Parser;
use pscc_lex::TokenKind;
use pscc_sym::{ConstValue, SymbolEntry, SymbolKind};
use pscc_tac::{BinOp, UnOp};

fn render_const(value: ConstValue) -> String {
    match value {
        ConstValue::Int(v) => v.to_string(),
        ConstValue::Real(v) => v.to_string(),
        ConstValue::Char(c) => c.to_string(),
    }
}

impl Parser {
    pub(crate) fn parse_expr(&mut self) -> Result<String, ParseError> {
        let lhs = self.parse_simple_expr()?;
        if let Some(op) = self.match_relop() {
            let rhs = self.parse_simple_expr()?;
            return Ok(self.tac.emit_binary(op, lhs, rhs));
        }
        Ok(lhs)
    }

    fn match_relop(&mut self) -> Option<BinOp> {
        let op = match self.kind() {
            TokenKind::Eq => BinOp::Eq,
            TokenKind::Ne => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Le => BinOp::Le,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Ge => BinOp::Ge,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_simple_expr(&mut self) -> Result<String, ParseError> {
        let negate = if self.eat(TokenKind::Minus) {
            true
        } else {
            self.eat(TokenKind::Plus);
            false
        };

        let mut place = self.parse_term()?;
        if negate {
            place = self.tac.emit_unary(UnOp::Neg, place);
        }

        loop {
            let op = match self.kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                TokenKind::Or => BinOp::Or,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            place = self.tac.emit_binary(op, place, rhs);
        }
        Ok(place)
    }

    fn parse_term(&mut self) -> Result<String, ParseError> {
        let mut place = self.parse_factor()?;
        loop {
            let op = match self.kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Mod => BinOp::Mod,
                TokenKind::Rem => BinOp::Rem,
                TokenKind::And => BinOp::And,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_factor()?;
            place = self.tac.emit_binary(op, place, rhs);
        }
        Ok(place)
    }

    fn parse_factor(&mut self) -> Result<String, ParseError> {
        match self.kind() {
            TokenKind::Ident => {
                let tok = self.expect_ident()?;
                match self.symbols.lookup(&tok.lexeme, tok.span, false) {
                    Ok(id) => Ok(self.resolved_place(self.symbols.get(id))),
                    Err(e) => {
                        self.report(e.into());
                        Ok("0".to_string())
                    }
                }
            }
            TokenKind::IntLit | TokenKind::RealLit => Ok(self.advance().lexeme),
            TokenKind::LParen => {
                self.advance();
                let place = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(place)
            }
            TokenKind::Not => {
                self.advance();
                let operand = self.parse_factor()?;
                Ok(self.tac.emit_unary(UnOp::Not, operand))
            }
            TokenKind::Minus => {
                self.advance();
                let operand = self.parse_factor()?;
                Ok(self.tac.emit_unary(UnOp::Neg, operand))
            }
            TokenKind::Plus => {
                self.advance();
                self.parse_factor()
            }
            _ => {
                let found = self.current().clone();
                Err(ParseError::UnexpectedToken {
                    expected: "an expression".to_string(),
                    found: format!("{:?} '{}'", found.kind, found.lexeme),
                    span: found.span,
                })
            }
        }
    }

    /// The place a name contributes: a constant's value is substituted
    /// directly, everything else uses its place.
    pub(crate) fn resolved_place(&self, entry: &SymbolEntry) -> String {
        match &entry.kind {
            SymbolKind::Constant { value, .. } => render_const(*value),
            _ => self.tac.place_of(entry),
        }
    }
}
