//! Builds an ordered instruction stream plus a string-literal pool while
//! the parser walks a procedure body, and finalizes the temporary-size
//! accounting a procedure's symbol-table entry needs for `local_size`.

use crate::instruction::{BinOp, Instruction, UnOp};
use pscc_sym::{SymbolEntry, SymbolId, SymbolTable};
use pscc_util::FxHashSet;

/// A depth-1 identifier exactly equal (case-insensitively) to `c` collides
/// with the `io.asm` runtime's carry-helper symbol; such names are doubled
/// to `cc`/`CC`/etc. Used both for TAC place resolution and `.DATA` label
/// emission, so a global's declared name and every reference to it agree.
pub fn masm_safe_name(name: &str) -> String {
    if name.eq_ignore_ascii_case("c") {
        format!("{name}{name}")
    } else {
        name.to_string()
    }
}

pub struct TacBuilder {
    instructions: Vec<Instruction>,
    string_pool: Vec<String>,
    temp_counter: u32,
    temps_in_scope: FxHashSet<String>,
}

impl TacBuilder {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
            string_pool: Vec::new(),
            temp_counter: 1,
            temps_in_scope: FxHashSet::default(),
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn string_pool(&self) -> &[String] {
        &self.string_pool
    }

    fn emit(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    /// Begin a procedure body: resets the temporary counter, per the
    /// "counter resets at every `PROC_BEGIN`" rule.
    pub fn begin_proc(&mut self, name: &str) {
        self.temp_counter = 1;
        self.temps_in_scope.clear();
        self.emit(Instruction::ProcBegin(name.to_string()));
    }

    /// End a procedure body, finalizing its `local_size` with the
    /// accumulated size of every distinct temporary used in it.
    pub fn end_proc(&mut self, name: &str, proc_id: SymbolId, symbols: &mut SymbolTable) {
        let temp_bytes = (self.temps_in_scope.len() as u16) * 2;
        symbols.add_local_size(proc_id, temp_bytes);
        self.emit(Instruction::ProcEnd(name.to_string()));
    }

    pub fn program_start(&mut self, entry: &str) {
        self.emit(Instruction::ProgramStart { entry: entry.to_string() });
    }

    pub fn new_temp(&mut self) -> String {
        let t = format!("_t{}", self.temp_counter);
        self.temp_counter += 1;
        self.temps_in_scope.insert(t.clone());
        t
    }

    /// Intern a string literal, returning its freshly assigned `_Sn`
    /// label. Labels are assigned in first-seen order; no deduplication
    /// is performed, matching a pool that records every occurrence.
    pub fn intern_string(&mut self, value: &str) -> String {
        let label = format!("_S{}", self.string_pool.len());
        self.string_pool.push(value.to_string());
        label
    }

    pub fn emit_assign(&mut self, dest: String, src: String) {
        self.emit(Instruction::Assign { dest, src });
    }

    pub fn emit_binary(&mut self, op: BinOp, lhs: String, rhs: String) -> String {
        let dest = self.new_temp();
        self.emit(Instruction::Binary { dest: dest.clone(), op, lhs, rhs });
        dest
    }

    pub fn emit_unary(&mut self, op: UnOp, operand: String) -> String {
        let dest = self.new_temp();
        self.emit(Instruction::Unary { dest: dest.clone(), op, operand });
        dest
    }

    pub fn emit_push(&mut self, operand: String, by_address: bool) {
        self.emit(Instruction::Push { operand, by_address });
    }

    pub fn emit_call(&mut self, name: &str) {
        self.emit(Instruction::Call { name: name.to_string() });
    }

    pub fn emit_read_int(&mut self, dest: String) {
        self.emit(Instruction::ReadInt { dest });
    }

    pub fn emit_write_int(&mut self, src: String) {
        self.emit(Instruction::WriteInt { src });
    }

    pub fn emit_write_str(&mut self, label: String) {
        self.emit(Instruction::WriteStr { label });
    }

    pub fn emit_write_newline(&mut self) {
        self.emit(Instruction::WriteNewline);
    }

    /// The TAC place for a symbol, applying the MASM reserved-name
    /// rename (`c` -> `cc`, case preserved) to depth-1 (by-name) places.
    pub fn place_of(&self, entry: &SymbolEntry) -> String {
        let place = entry.place();
        if entry.depth <= 1 {
            masm_safe_name(&place)
        } else {
            place
        }
    }

    /// Render the instruction stream as the `.tac` text format: one
    /// instruction per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for instr in &self.instructions {
            out.push_str(&instr.to_string());
            out.push('\n');
        }
        out
    }
}

impl Default for TacBuilder {
    fn default() -> Self {
        Self::new()
    }
}
