//! Per-procedure frame layout: which `_BP+N` slots are by-reference, and
//! which dedicated `[BP-N]` slot each distinct compiler temporary gets.

use pscc_sym::{SymbolEntry, SymbolKind, SymbolTable};
use pscc_tac::Instruction;
use pscc_util::{FxHashMap, FxHashSet};

pub struct FrameLayout {
    pub local_size: u16,
    pub param_size: u16,
    /// `_tK` -> N, such that the temporary lives at `[BP-N]`.
    pub temp_slots: FxHashMap<String, i32>,
    /// Positive offsets of `_BP+N` parameters passed by reference.
    pub by_ref_offsets: FxHashSet<i32>,
}

impl FrameLayout {
    /// Build the layout for one procedure from its symbol-table entry and
    /// its own TAC body (the instructions strictly between its `ProcBegin`
    /// and `ProcEnd`, excluding any nested procedure's own span).
    pub fn build(proc_entry: &SymbolEntry, symbols: &SymbolTable, body: &[Instruction]) -> Self {
        let (param_list, local_size, param_size) = match &proc_entry.kind {
            SymbolKind::Procedure { param_list, local_size, param_size } => {
                (param_list.clone(), *local_size, *param_size)
            }
            _ => unreachable!("frame layout requires a Procedure symbol"),
        };

        let mut by_ref_offsets = FxHashSet::default();
        for &id in &param_list {
            if let SymbolKind::Parameter { offset, mode, .. } = symbols.get(id).kind {
                if mode.passes_by_reference() {
                    by_ref_offsets.insert(offset);
                }
            }
        }

        let mut temp_order = Vec::new();
        let mut seen = FxHashSet::default();
        for instr in body {
            for place in instr.operand_places() {
                if place.starts_with("_t") && seen.insert(place.to_string()) {
                    temp_order.push(place.to_string());
                }
            }
        }

        let temp_bytes = (temp_order.len() as u16) * 2;
        let declared_locals_bytes = local_size.saturating_sub(temp_bytes);

        let mut temp_slots = FxHashMap::default();
        let mut next = declared_locals_bytes as i32 + 2;
        for name in temp_order {
            temp_slots.insert(name, next);
            next += 2;
        }

        Self { local_size, param_size, temp_slots, by_ref_offsets }
    }

    /// The positive N such that `place` (a `_BP+N` string) names a
    /// by-reference parameter, if it is one.
    pub fn by_ref_param_offset(&self, place: &str) -> Option<i32> {
        place
            .strip_prefix("_BP+")
            .and_then(|n| n.parse::<i32>().ok())
            .filter(|n| self.by_ref_offsets.contains(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pscc_sym::{ParamSpec, ParameterMode, VarType};
    use pscc_tac::{BinOp, TacBuilder};
    use pscc_util::Span;

    #[test]
    fn temps_are_slotted_immediately_below_declared_locals() {
        let mut table = SymbolTable::new();
        table.declare_procedure("outer", Span::point(1, 1)).unwrap();
        table.enter_scope();
        let proc = table.declare_procedure("p", Span::point(1, 1)).unwrap();
        table.enter_scope();
        table.declare_local(proc, "x", Span::point(1, 1), VarType::Integer).unwrap();

        let mut tac = TacBuilder::new();
        tac.begin_proc("p");
        let t = tac.emit_binary(BinOp::Add, "_BP-2".to_string(), "1".to_string());
        tac.emit_assign("_BP-2".to_string(), t);
        tac.end_proc("p", proc, &mut table);

        let body: Vec<_> = tac.instructions()[1..tac.instructions().len() - 1].to_vec();
        let layout = FrameLayout::build(table.get(proc), &table, &body);
        assert_eq!(layout.local_size, 4);
        assert_eq!(layout.temp_slots.get("_t1"), Some(&4));
    }

    #[test]
    fn by_reference_parameters_are_recorded_by_offset() {
        let mut table = SymbolTable::new();
        let proc = table.declare_procedure("p", Span::point(1, 1)).unwrap();
        table.enter_scope();
        let params = vec![
            ParamSpec { lexeme: "a".into(), span: Span::point(1, 1), var_type: VarType::Integer, mode: ParameterMode::In },
            ParamSpec { lexeme: "b".into(), span: Span::point(1, 1), var_type: VarType::Integer, mode: ParameterMode::Out },
        ];
        table.declare_parameters(proc, params).unwrap();
        let layout = FrameLayout::build(table.get(proc), &table, &[]);
        assert!(layout.by_ref_offsets.contains(&4));
        assert!(!layout.by_ref_offsets.contains(&6));
    }
}
