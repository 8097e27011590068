//! `SeqOfStatements`, `AssignOrCall`, and the `get`/`put`/`putln` I/O
//! statements.

use crate::error::ParseError;
use crate::Parser;
use pscc_lex::{Literal, TokenKind};
use pscc_sym::SymbolKind;

enum WriteItem {
    Int(String),
    Str(String),
}

impl Parser {
    pub(crate) fn parse_seq_of_statements(&mut self) {
        while !self.check(TokenKind::End) && !self.at_end() {
            if let Err(e) = self.parse_statement() {
                self.report(e);
                self.synchronize();
                self.eat(TokenKind::Semicolon);
            }
        }
    }

    fn parse_statement(&mut self) -> Result<(), ParseError> {
        match self.kind() {
            TokenKind::Ident => self.parse_assign_or_call()?,
            TokenKind::Get => self.parse_get()?,
            TokenKind::Put => self.parse_put(false)?,
            TokenKind::Putln => self.parse_put(true)?,
            _ => {
                let found = self.current().clone();
                return Err(ParseError::UnexpectedToken {
                    expected: "a statement".to_string(),
                    found: format!("{:?} '{}'", found.kind, found.lexeme),
                    span: found.span,
                });
            }
        }
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(())
    }

    fn parse_assign_or_call(&mut self) -> Result<(), ParseError> {
        let name_tok = self.expect_ident()?;
        let name = name_tok.lexeme;
        let span = name_tok.span;

        if self.eat(TokenKind::Assign) {
            let sym_id = self.symbols.lookup(&name, span, false)?;
            let entry = self.symbols.get(sym_id);
            if !entry.is_assignable() {
                return Err(ParseError::NotAssignable { name, span });
            }
            let dest = self.tac.place_of(entry);
            let src = self.parse_expr()?;
            self.tac.emit_assign(dest, src);
            return Ok(());
        }

        let actuals = if self.eat(TokenKind::LParen) {
            let actuals = self.parse_actuals()?;
            self.expect(TokenKind::RParen, "')'")?;
            actuals
        } else {
            Vec::new()
        };
        self.emit_call(&name, span, actuals)
    }

    fn emit_call(&mut self, name: &str, span: pscc_util::Span, actuals: Vec<String>) -> Result<(), ParseError> {
        let proc_id = self.symbols.lookup(name, span, false)?;
        let entry = self.symbols.get(proc_id);
        if !entry.is_procedure() {
            return Err(ParseError::NotAProcedure { name: name.to_string(), span });
        }
        let canonical = entry.lexeme.clone();
        let param_list = match &entry.kind {
            SymbolKind::Procedure { param_list, .. } => param_list.clone(),
            _ => unreachable!("checked is_procedure above"),
        };
        if param_list.len() != actuals.len() {
            return Err(ParseError::ArityMismatch {
                name: name.to_string(),
                expected: param_list.len(),
                found: actuals.len(),
                span,
            });
        }
        for (formal_id, place) in param_list.into_iter().zip(actuals) {
            let by_address = matches!(
                self.symbols.get(formal_id).kind,
                SymbolKind::Parameter { mode, .. } if mode.passes_by_reference()
            );
            self.tac.emit_push(place, by_address);
        }
        self.tac.emit_call(&canonical);
        Ok(())
    }

    fn parse_actuals(&mut self) -> Result<Vec<String>, ParseError> {
        if self.check(TokenKind::RParen) {
            return Ok(Vec::new());
        }
        let mut actuals = Vec::new();
        loop {
            actuals.push(self.parse_actual()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(actuals)
    }

    fn parse_actual(&mut self) -> Result<String, ParseError> {
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
            _ => {
                let found = self.current().clone();
                Err(ParseError::UnexpectedToken {
                    expected: "an identifier or numeric literal".to_string(),
                    found: format!("{:?} '{}'", found.kind, found.lexeme),
                    span: found.span,
                })
            }
        }
    }

    fn parse_get(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::Get, "'get'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let idents = self.parse_id_list()?;
        self.expect(TokenKind::RParen, "')'")?;
        for (lexeme, span) in idents {
            match self.symbols.lookup(&lexeme, span, false) {
                Ok(id) => {
                    let entry = self.symbols.get(id);
                    if !entry.is_assignable() {
                        self.report(ParseError::NotAssignable { name: lexeme, span });
                        continue;
                    }
                    let place = self.tac.place_of(entry);
                    self.tac.emit_read_int(place);
                }
                Err(e) => self.report(e.into()),
            }
        }
        Ok(())
    }

    fn parse_put(&mut self, newline: bool) -> Result<(), ParseError> {
        if newline {
            self.expect(TokenKind::Putln, "'putln'")?;
        } else {
            self.expect(TokenKind::Put, "'put'")?;
        }
        self.expect(TokenKind::LParen, "'('")?;
        let items = self.parse_write_list()?;
        self.expect(TokenKind::RParen, "')'")?;
        for item in items {
            match item {
                WriteItem::Str(label) => self.tac.emit_write_str(label),
                WriteItem::Int(place) => self.tac.emit_write_int(place),
            }
        }
        if newline {
            self.tac.emit_write_newline();
        }
        Ok(())
    }

    fn parse_write_list(&mut self) -> Result<Vec<WriteItem>, ParseError> {
        let mut items = Vec::new();
        loop {
            items.push(self.parse_write_item()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    fn parse_write_item(&mut self) -> Result<WriteItem, ParseError> {
        match self.kind() {
            TokenKind::Ident => {
                let tok = self.expect_ident()?;
                match self.symbols.lookup(&tok.lexeme, tok.span, false) {
                    Ok(id) => Ok(WriteItem::Int(self.resolved_place(self.symbols.get(id)))),
                    Err(e) => {
                        self.report(e.into());
                        Ok(WriteItem::Int("0".to_string()))
                    }
                }
            }
            TokenKind::IntLit | TokenKind::RealLit => Ok(WriteItem::Int(self.advance().lexeme)),
            TokenKind::StringLit => {
                let tok = self.advance();
                let value = match tok.literal {
                    Some(Literal::Str(s)) => s,
                    _ => String::new(),
                };
                Ok(WriteItem::Str(self.tac.intern_string(&value)))
            }
            _ => {
                let found = self.current().clone();
                Err(ParseError::UnexpectedToken {
                    expected: "an identifier, number, or string literal".to_string(),
                    found: format!("{:?} '{}'", found.kind, found.lexeme),
                    span: found.span,
                })
            }
        }
    }
}
