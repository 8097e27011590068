//! The scoped symbol table: combines the [`ScopeTree`] with the arena of
//! [`SymbolEntry`] values and implements the offset/size bookkeeping
//! semantic actions perform while walking a declaration.

use crate::entry::{ConstValue, ParameterMode, SymbolEntry, SymbolId, SymbolKind, VarType};
use crate::error::SymError;
use crate::scope::{RibId, ScopeTree};
use pscc_util::{IndexVec, Span, Symbol};

/// A parameter as collected by the parser, before its offset is known.
pub struct ParamSpec {
    pub lexeme: String,
    pub span: Span,
    pub var_type: VarType,
    pub mode: ParameterMode,
}

pub struct SymbolTable {
    scopes: ScopeTree,
    symbols: IndexVec<SymbolId, SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: ScopeTree::new(),
            symbols: IndexVec::new(),
        }
    }

    pub fn current_scope(&self) -> RibId {
        self.scopes.current()
    }

    pub fn current_depth(&self) -> u32 {
        self.scopes.depth(self.scopes.current())
    }

    pub fn enter_scope(&mut self) -> RibId {
        self.scopes.enter_scope()
    }

    /// Leave the active scope. Per-scope bindings are returned (as
    /// `(name, SymbolId)` pairs) so the caller can hand them to the
    /// logging collaborator; the scope itself remains in the arena.
    pub fn exit_scope(&mut self) -> Vec<(Symbol, SymbolId)> {
        let leaving = self.scopes.exit_scope();
        self.scopes
            .rib(leaving)
            .bindings()
            .map(|(&name, &id)| (name, id))
            .collect()
    }

    pub fn get(&self, id: SymbolId) -> &SymbolEntry {
        &self.symbols[id]
    }

    pub fn get_mut(&mut self, id: SymbolId) -> &mut SymbolEntry {
        &mut self.symbols[id]
    }

    /// Every symbol ever declared, in declaration order. Scopes are never
    /// torn down, so this remains complete after parsing finishes — the
    /// assembly translator uses it to enumerate depth-1 globals and to
    /// recover a procedure's parameter modes by name.
    pub fn entries(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.symbols.iter()
    }

    pub fn lookup(&self, lexeme: &str, span: Span, only_current: bool) -> Result<SymbolId, SymError> {
        let canonical = Symbol::intern_folded(lexeme);
        let found = if only_current {
            let current = self.scopes.current();
            if self.scopes.contains_in(current, canonical) {
                self.scopes.resolve(current, canonical)
            } else {
                None
            }
        } else {
            self.scopes.resolve(self.scopes.current(), canonical)
        };
        found.ok_or_else(|| SymError::SymbolNotFound {
            name: lexeme.to_string(),
            span,
        })
    }

    fn insert(&mut self, entry: SymbolEntry) -> Result<SymbolId, SymError> {
        let current = self.scopes.current();
        if self.scopes.contains_in(current, entry.name) {
            return Err(SymError::DuplicateDeclaration {
                name: entry.lexeme.clone(),
                span: entry.span,
            });
        }
        let name = entry.name;
        let id = self.symbols.push(entry);
        self.scopes.bind(current, name, id);
        Ok(id)
    }

    /// Insert a procedure symbol into the *current* (enclosing) scope.
    /// Call this before [`SymbolTable::enter_scope`] for the procedure's
    /// own body.
    pub fn declare_procedure(&mut self, lexeme: &str, span: Span) -> Result<SymbolId, SymError> {
        self.insert(SymbolEntry {
            name: Symbol::intern_folded(lexeme),
            lexeme: lexeme.to_string(),
            depth: self.current_depth(),
            span,
            kind: SymbolKind::Procedure {
                param_list: Vec::new(),
                local_size: 0,
                param_size: 0,
            },
        })
    }

    /// Assign offsets to a parameter list in declaration order, walking
    /// it in reverse so the first-declared parameter lands at the
    /// highest positive offset, then insert each into the current scope
    /// and record the list on `proc_id`.
    pub fn declare_parameters(
        &mut self,
        proc_id: SymbolId,
        params: Vec<ParamSpec>,
    ) -> Result<Vec<SymbolId>, SymError> {
        let mut offsets = vec![0i32; params.len()];
        let mut running = 4i32;
        for i in (0..params.len()).rev() {
            offsets[i] = running;
            running += params[i].var_type.size() as i32;
        }
        let param_size = (running - 4) as u16;
        let depth = self.current_depth();

        let mut ids = Vec::with_capacity(params.len());
        for (spec, offset) in params.into_iter().zip(offsets) {
            let id = self.insert(SymbolEntry {
                name: Symbol::intern_folded(&spec.lexeme),
                lexeme: spec.lexeme,
                depth,
                span: spec.span,
                kind: SymbolKind::Parameter {
                    var_type: spec.var_type,
                    size: spec.var_type.size(),
                    offset,
                    mode: spec.mode,
                },
            })?;
            ids.push(id);
        }

        if let SymbolKind::Procedure { param_list, param_size: ps, .. } = &mut self.get_mut(proc_id).kind {
            *param_list = ids.clone();
            *ps = param_size;
        }
        Ok(ids)
    }

    /// Declare a local variable in the current scope, assigning it the
    /// next negative offset. Only depth-≥2 locals consume stack frame
    /// space: a depth-1 declaration is a global, addressed by name and
    /// stored in `.DATA`, so it contributes nothing to `proc_id`'s
    /// `local_size`.
    pub fn declare_local(
        &mut self,
        proc_id: SymbolId,
        lexeme: &str,
        span: Span,
        var_type: VarType,
    ) -> Result<SymbolId, SymError> {
        let current = self.current_scope();
        let size = var_type.size();
        let offset = self.scopes.rib(current).next_local_offset;
        self.scopes.rib_mut(current).next_local_offset -= size as i32;
        let depth = self.current_depth();

        let id = self.insert(SymbolEntry {
            name: Symbol::intern_folded(lexeme),
            lexeme: lexeme.to_string(),
            depth,
            span,
            kind: SymbolKind::Variable {
                var_type,
                size,
                offset,
            },
        })?;
        if depth >= 2 {
            self.add_local_size(proc_id, size);
        }
        Ok(id)
    }

    pub fn declare_constant(
        &mut self,
        lexeme: &str,
        span: Span,
        const_type: VarType,
        value: ConstValue,
    ) -> Result<SymbolId, SymError> {
        self.insert(SymbolEntry {
            name: Symbol::intern_folded(lexeme),
            lexeme: lexeme.to_string(),
            depth: self.current_depth(),
            span,
            kind: SymbolKind::Constant { const_type, value },
        })
    }

    /// Add `bytes` to a procedure's accounted `local_size`. Called both
    /// while declaring locals and later by the TAC generator as it
    /// allocates compiler temporaries.
    pub fn add_local_size(&mut self, proc_id: SymbolId, bytes: u16) {
        if let SymbolKind::Procedure { local_size, .. } = &mut self.get_mut(proc_id).kind {
            *local_size += bytes;
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp() -> Span {
        Span::point(1, 1)
    }

    #[test]
    fn parameters_assigned_in_reverse_declaration_order() {
        let mut table = SymbolTable::new();
        let proc = table.declare_procedure("main", sp()).unwrap();
        table.enter_scope();
        let params = vec![
            ParamSpec { lexeme: "a".into(), span: sp(), var_type: VarType::Integer, mode: ParameterMode::In },
            ParamSpec { lexeme: "b".into(), span: sp(), var_type: VarType::Character, mode: ParameterMode::In },
        ];
        let ids = table.declare_parameters(proc, params).unwrap();

        let a = table.get(ids[0]);
        let b = table.get(ids[1]);
        match a.kind {
            SymbolKind::Parameter { offset, .. } => assert_eq!(offset, 5),
            _ => panic!("expected parameter"),
        }
        match b.kind {
            SymbolKind::Parameter { offset, .. } => assert_eq!(offset, 4),
            _ => panic!("expected parameter"),
        }
        match table.get(proc).kind {
            SymbolKind::Procedure { param_size, .. } => assert_eq!(param_size, 3),
            _ => panic!("expected procedure"),
        }
    }

    #[test]
    fn locals_assigned_decreasing_offsets() {
        // Depth-1 declarations are globals (no frame space); a genuine
        // stack-resident local lives at depth >= 2, one procedure in.
        let mut table = SymbolTable::new();
        let outer = table.declare_procedure("outer", sp()).unwrap();
        table.enter_scope();
        let proc = table.declare_procedure("p", sp()).unwrap();
        table.enter_scope();
        let c = table.declare_local(proc, "c", sp(), VarType::Integer).unwrap();
        let d = table.declare_local(proc, "d", sp(), VarType::Integer).unwrap();

        match table.get(c).kind {
            SymbolKind::Variable { offset, .. } => assert_eq!(offset, -2),
            _ => panic!(),
        }
        match table.get(d).kind {
            SymbolKind::Variable { offset, .. } => assert_eq!(offset, -4),
            _ => panic!(),
        }
        match table.get(proc).kind {
            SymbolKind::Procedure { local_size, .. } => assert_eq!(local_size, 4),
            _ => panic!(),
        }
        match table.get(outer).kind {
            SymbolKind::Procedure { local_size, .. } => assert_eq!(local_size, 0),
            _ => panic!(),
        }
    }

    #[test]
    fn duplicate_declaration_in_same_scope_is_rejected() {
        let mut table = SymbolTable::new();
        let proc = table.declare_procedure("p", sp()).unwrap();
        table.enter_scope();
        table.declare_local(proc, "x", sp(), VarType::Integer).unwrap();
        let err = table.declare_local(proc, "x", sp(), VarType::Integer);
        assert!(matches!(err, Err(SymError::DuplicateDeclaration { .. })));
    }

    #[test]
    fn lookup_searches_outward_through_enclosing_scopes() {
        let mut table = SymbolTable::new();
        let outer = table.declare_procedure("outer", sp()).unwrap();
        table.enter_scope();
        table.declare_local(outer, "g", sp(), VarType::Integer).unwrap();

        let inner = table.declare_procedure("inner", sp()).unwrap();
        table.enter_scope();
        table.declare_local(inner, "h", sp(), VarType::Integer).unwrap();

        assert!(table.lookup("g", sp(), false).is_ok());
        assert!(table.lookup("h", sp(), false).is_ok());

        table.exit_scope();
        assert!(table.lookup("h", sp(), false).is_err());
        assert!(table.lookup("g", sp(), false).is_ok());
    }

    #[test]
    fn nested_procedure_locals_live_one_depth_above_declaration() {
        let mut table = SymbolTable::new();
        let outer = table.declare_procedure("outer", sp()).unwrap();
        assert_eq!(table.get(outer).depth, 0);
        table.enter_scope();
        assert_eq!(table.current_depth(), 1);
        let inner = table.declare_procedure("inner", sp()).unwrap();
        assert_eq!(table.get(inner).depth, 1);
        table.enter_scope();
        assert_eq!(table.current_depth(), 2);
    }
}
