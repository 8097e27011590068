//! `Program`, `ProcedureDecl`, `Args`, and `DeclarativePart` — the parts
//! of the grammar that drive scope entry/exit and offset assignment.

use crate::error::ParseError;
use crate::Parser;
use pscc_lex::{Literal, TokenKind};
use pscc_sym::{ConstValue, ParamSpec, ParameterMode, VarType};
use pscc_util::Span;

enum TypeMarkResult {
    Var(VarType),
    Const(VarType, ConstValue),
}

impl Parser {
    pub fn parse_program(&mut self) {
        while !self.at_end() {
            if let Err(e) = self.parse_procedure_decl() {
                self.report(e);
                self.synchronize();
                self.eat(TokenKind::Semicolon);
            }
        }
        if let Some(entry) = self.entry_point.clone() {
            self.tac.program_start(&entry);
        }
    }

    fn parse_procedure_decl(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::Procedure, "'procedure'")?;
        let header = self.expect_ident()?;
        let header_name = header.lexeme.clone();

        let proc_id = self.symbols.declare_procedure(&header_name, header.span)?;
        let outer_depth = self.symbols.current_depth();
        let canonical = self.symbols.get(proc_id).lexeme.clone();

        self.proc_stack.push(proc_id);
        self.symbols.enter_scope();
        self.tac.begin_proc(&canonical);

        let params = self.parse_args()?;
        self.symbols.declare_parameters(proc_id, params)?;

        self.expect(TokenKind::Is, "'is'")?;
        self.parse_declarative_part(proc_id)?;

        while self.check(TokenKind::Procedure) {
            if let Err(e) = self.parse_procedure_decl() {
                self.report(e);
                self.synchronize();
                self.eat(TokenKind::Semicolon);
            }
        }

        self.expect(TokenKind::Begin, "'begin'")?;
        self.parse_seq_of_statements();
        self.expect(TokenKind::End, "'end'")?;
        let closing = self.expect_ident()?;
        if !closing.lexeme.eq_ignore_ascii_case(&header_name) {
            self.report(ParseError::NameMismatch {
                header: header_name.clone(),
                closing: closing.lexeme.clone(),
                span: closing.span,
            });
        }
        self.expect(TokenKind::Semicolon, "';'")?;

        self.tac.end_proc(&canonical, proc_id, &mut self.symbols);
        if outer_depth == 0 {
            self.entry_point = Some(canonical);
        }
        let popped = self.symbols.exit_scope();
        self.log_popped_scope(&popped);
        self.proc_stack.pop();
        Ok(())
    }

    /// Report a just-popped scope's bindings to the logging collaborator
    /// as a formatted listing, in original source casing.
    fn log_popped_scope(&self, popped: &[(pscc_util::Symbol, pscc_sym::SymbolId)]) {
        if popped.is_empty() {
            return;
        }
        let listing = popped
            .iter()
            .map(|&(_, id)| self.symbols.get(id).lexeme.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        tracing::debug!("exited scope: [{listing}]");
    }

    fn parse_args(&mut self) -> Result<Vec<ParamSpec>, ParseError> {
        if !self.eat(TokenKind::LParen) {
            return Ok(Vec::new());
        }
        let mut params = Vec::new();
        loop {
            let mode = self.parse_mode();
            let idents = self.parse_id_list()?;
            self.expect(TokenKind::Colon, "':'")?;
            let var_type = match self.parse_type_mark()? {
                TypeMarkResult::Var(t) => t,
                TypeMarkResult::Const(_, _) => {
                    let span = self.current().span;
                    return Err(ParseError::ParameterCannotBeConstant { span });
                }
            };
            for (lexeme, span) in idents {
                params.push(ParamSpec { lexeme, span, var_type, mode });
            }
            if !self.eat(TokenKind::Semicolon) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(params)
    }

    fn parse_mode(&mut self) -> ParameterMode {
        if self.eat(TokenKind::Out) {
            ParameterMode::Out
        } else if self.eat(TokenKind::Inout) {
            ParameterMode::InOut
        } else {
            self.eat(TokenKind::In);
            ParameterMode::In
        }
    }

    pub(crate) fn parse_id_list(&mut self) -> Result<Vec<(String, Span)>, ParseError> {
        let mut idents = Vec::new();
        let first = self.expect_ident()?;
        idents.push((first.lexeme, first.span));
        while self.eat(TokenKind::Comma) {
            let next = self.expect_ident()?;
            idents.push((next.lexeme, next.span));
        }
        Ok(idents)
    }

    fn parse_declarative_part(&mut self, proc_id: pscc_sym::SymbolId) -> Result<(), ParseError> {
        while self.check(TokenKind::Ident) {
            if let Err(e) = self.parse_one_declaration(proc_id) {
                self.report(e);
                self.synchronize();
                self.eat(TokenKind::Semicolon);
            }
        }
        Ok(())
    }

    fn parse_one_declaration(&mut self, proc_id: pscc_sym::SymbolId) -> Result<(), ParseError> {
        let idents = self.parse_id_list()?;
        self.expect(TokenKind::Colon, "':'")?;
        match self.parse_type_mark()? {
            TypeMarkResult::Var(var_type) => {
                for (lexeme, span) in idents {
                    if let Err(e) = self.symbols.declare_local(proc_id, &lexeme, span, var_type) {
                        self.report(e.into());
                    }
                }
            }
            TypeMarkResult::Const(const_type, value) => {
                for (lexeme, span) in idents {
                    if let Err(e) = self.symbols.declare_constant(&lexeme, span, const_type, value) {
                        self.report(e.into());
                    }
                }
            }
        }
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(())
    }

    fn parse_type_mark(&mut self) -> Result<TypeMarkResult, ParseError> {
        if self.eat(TokenKind::Integer) {
            return Ok(TypeMarkResult::Var(VarType::Integer));
        }
        if self.eat(TokenKind::Float) {
            return Ok(TypeMarkResult::Var(VarType::Real));
        }
        if self.eat(TokenKind::Char) {
            return Ok(TypeMarkResult::Var(VarType::Character));
        }
        if self.eat(TokenKind::Constant) {
            self.expect(TokenKind::Assign, "':='")?;
            return self.parse_value();
        }
        let found = self.current().clone();
        Err(ParseError::UnexpectedToken {
            expected: "'integer', 'float', 'char', or 'constant'".to_string(),
            found: format!("{:?} '{}'", found.kind, found.lexeme),
            span: found.span,
        })
    }

    fn parse_value(&mut self) -> Result<TypeMarkResult, ParseError> {
        let span = self.current().span;
        let kind = self.kind();
        let literal = self.current().literal.clone();
        match (kind, literal) {
            (TokenKind::IntLit, Some(Literal::Int(v))) => {
                self.advance();
                Ok(TypeMarkResult::Const(VarType::Integer, ConstValue::Int(v)))
            }
            (TokenKind::RealLit, Some(Literal::Real(v))) => {
                self.advance();
                Ok(TypeMarkResult::Const(VarType::Real, ConstValue::Real(v)))
            }
            (TokenKind::CharLit, Some(Literal::Char(v))) => {
                self.advance();
                Ok(TypeMarkResult::Const(VarType::Character, ConstValue::Char(v)))
            }
            _ => Err(ParseError::InvalidConstantValue { span }),
        }
    }
}
