//! Symbol table entries and the value types they carry.

use pscc_util::{Span, Symbol};

pscc_util::define_idx!(SymbolId);

/// A declared type for a variable, parameter, or constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarType {
    Integer,
    Real,
    Character,
    Boolean,
}

impl VarType {
    /// Storage size in bytes.
    pub fn size(self) -> u16 {
        match self {
            VarType::Integer => 2,
            VarType::Real => 4,
            VarType::Character => 1,
            VarType::Boolean => 1,
        }
    }
}

impl std::fmt::Display for VarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VarType::Integer => "integer",
            VarType::Real => "float",
            VarType::Character => "char",
            VarType::Boolean => "boolean",
        };
        write!(f, "{s}")
    }
}

/// A parameter's passing mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterMode {
    In,
    Out,
    InOut,
}

impl ParameterMode {
    /// `true` when the caller must push an address rather than a value.
    pub fn passes_by_reference(self) -> bool {
        matches!(self, ParameterMode::Out | ParameterMode::InOut)
    }
}

/// The literal value bound to a constant declaration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConstValue {
    Int(i64),
    Real(f64),
    Char(char),
}

/// The kind-specific payload of a [`SymbolEntry`].
#[derive(Clone, Debug, PartialEq)]
pub enum SymbolKind {
    Variable {
        var_type: VarType,
        size: u16,
        offset: i32,
    },
    Parameter {
        var_type: VarType,
        size: u16,
        offset: i32,
        mode: ParameterMode,
    },
    Constant {
        const_type: VarType,
        value: ConstValue,
    },
    Procedure {
        param_list: Vec<SymbolId>,
        local_size: u16,
        param_size: u16,
    },
}

/// A single entry in the symbol table.
#[derive(Clone, Debug)]
pub struct SymbolEntry {
    /// Case-folded canonical name, used for lookup and duplicate checks.
    pub name: Symbol,
    /// Original-case source text, used for diagnostics and emission.
    pub lexeme: String,
    /// 0 for the outer program scope, 1 for the outermost procedure body,
    /// and so on.
    pub depth: u32,
    pub span: Span,
    pub kind: SymbolKind,
}

impl SymbolEntry {
    pub fn is_assignable(&self) -> bool {
        !matches!(self.kind, SymbolKind::Constant { .. } | SymbolKind::Procedure { .. })
    }

    pub fn is_procedure(&self) -> bool {
        matches!(self.kind, SymbolKind::Procedure { .. })
    }

    /// The TAC/assembly place for this symbol, ignoring the MASM
    /// reserved-name rename (applied by the TAC layer on emission).
    ///
    /// Depth-1 symbols are addressed by name regardless of kind, in
    /// their original declared casing; deeper symbols are addressed by
    /// their BP-relative offset. Comparisons use [`SymbolEntry::name`]
    /// (case-folded); emitted text always uses [`SymbolEntry::lexeme`].
    pub fn place(&self) -> String {
        if self.depth >= 2 {
            match &self.kind {
                SymbolKind::Variable { offset, .. } => return format!("_BP-{}", -offset),
                SymbolKind::Parameter { offset, .. } => return format!("_BP+{offset}"),
                _ => {}
            }
        }
        self.lexeme.clone()
    }
}
