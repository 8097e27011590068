//! Translates one procedure's TAC body into its `.CODE` instructions,
//! applying the fixed AX/BX/CX/DX register convention and the
//! by-reference dereferencing rule.

use crate::frame::FrameLayout;
use crate::operand::{format_operand, is_literal};
use pscc_tac::{BinOp, Instruction, UnOp};

pub struct BodyTranslator<'a> {
    frame: &'a FrameLayout,
    label_counter: u32,
    lines: Vec<String>,
}

impl<'a> BodyTranslator<'a> {
    pub fn new(frame: &'a FrameLayout) -> Self {
        Self { frame, label_counter: 0, lines: Vec::new() }
    }

    pub fn translate(mut self, body: &[Instruction]) -> Vec<String> {
        for instr in body {
            self.translate_one(instr);
        }
        self.lines
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(format!("    {}", line.into()));
    }

    fn next_label(&mut self) -> String {
        self.label_counter += 1;
        format!("L{}", self.label_counter)
    }

    /// Load `place`'s value into `AX`, dereferencing through `BX` first if
    /// it names a by-reference parameter.
    fn load_ax(&mut self, place: &str) {
        if let Some(n) = self.frame.by_ref_param_offset(place) {
            self.push(format!("MOV  BX, [BP+{n}]"));
            self.push("MOV  AX, [BX]");
        } else {
            self.push(format!("MOV  AX, {}", format_operand(place, self.frame)));
        }
    }

    /// Load `place`'s value into `BX`, dereferencing in place if it names
    /// a by-reference parameter.
    fn load_bx(&mut self, place: &str) {
        if let Some(n) = self.frame.by_ref_param_offset(place) {
            self.push(format!("MOV  BX, [BP+{n}]"));
            self.push("MOV  BX, [BX]");
        } else {
            self.push(format!("MOV  BX, {}", format_operand(place, self.frame)));
        }
    }

    /// Store register `reg` ("AX" or "BX") into `place`, dereferencing
    /// through an address register if `place` names a by-reference
    /// parameter. `readint`'s result arrives in `BX`, so a by-ref
    /// destination there must use `CX` to hold the address instead.
    fn store(&mut self, place: &str, reg: &str) {
        if let Some(n) = self.frame.by_ref_param_offset(place) {
            let addr_reg = if reg == "BX" { "CX" } else { "BX" };
            self.push(format!("MOV  {addr_reg}, [BP+{n}]"));
            self.push(format!("MOV  [{addr_reg}], {reg}"));
        } else {
            self.push(format!("MOV  {}, {reg}", format_operand(place, self.frame)));
        }
    }

    fn translate_one(&mut self, instr: &Instruction) {
        match instr {
            Instruction::ProcBegin(_) | Instruction::ProcEnd(_) | Instruction::ProgramStart { .. } => {}
            Instruction::Assign { dest, src } => {
                self.load_ax(src);
                self.store(dest, "AX");
            }
            Instruction::Binary { dest, op, lhs, rhs } => self.translate_binary(dest, *op, lhs, rhs),
            Instruction::Unary { dest, op, operand } => self.translate_unary(dest, *op, operand),
            Instruction::Push { operand, by_address: false } => {
                if is_literal(operand) {
                    self.push(format!("PUSH {operand}"));
                } else {
                    self.load_ax(operand);
                    self.push("PUSH AX");
                }
            }
            Instruction::Push { operand, by_address: true } => self.translate_push_address(operand),
            Instruction::Call { name } => self.push(format!("CALL {name}")),
            Instruction::ReadInt { dest } => {
                self.push("CALL readint");
                self.store(dest, "BX");
            }
            Instruction::WriteInt { src } => {
                self.load_ax(src);
                self.push("CALL writeint");
            }
            Instruction::WriteStr { label } => {
                self.push(format!("MOV  DX, OFFSET {label}"));
                self.push("CALL writestr");
            }
            Instruction::WriteNewline => self.push("CALL writeln"),
        }
    }

    fn translate_binary(&mut self, dest: &str, op: BinOp, lhs: &str, rhs: &str) {
        match op {
            BinOp::Add | BinOp::Sub | BinOp::And | BinOp::Or => {
                self.load_ax(lhs);
                self.load_bx(rhs);
                let mnemonic = match op {
                    BinOp::Add => "ADD",
                    BinOp::Sub => "SUB",
                    BinOp::And => "AND",
                    BinOp::Or => "OR",
                    _ => unreachable!(),
                };
                self.push(format!("{mnemonic} AX, BX"));
                self.store(dest, "AX");
            }
            BinOp::Mul => {
                self.load_ax(lhs);
                self.load_bx(rhs);
                self.push("IMUL BX");
                self.store(dest, "AX");
            }
            BinOp::Div | BinOp::Mod | BinOp::Rem => {
                self.load_ax(lhs);
                self.push("CWD");
                self.load_bx(rhs);
                self.push("IDIV BX");
                let result_reg = if op == BinOp::Div { "AX" } else { "DX" };
                self.store(dest, result_reg);
            }
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                self.load_ax(lhs);
                self.load_bx(rhs);
                self.push("CMP  AX, BX");
                self.push("MOV  AX, 0");
                let set_label = self.next_label();
                let end_label = self.next_label();
                self.push(format!("{} {set_label}", relop_jump(op)));
                self.push(format!("JMP  {end_label}"));
                self.lines.push(format!("{set_label}:"));
                self.push("MOV  AX, 1");
                self.lines.push(format!("{end_label}:"));
                self.store(dest, "AX");
            }
        }
    }

    fn translate_unary(&mut self, dest: &str, op: UnOp, operand: &str) {
        self.load_ax(operand);
        match op {
            UnOp::Neg => self.push("NEG  AX"),
            UnOp::Not => self.push("XOR  AX, 1"),
        }
        self.store(dest, "AX");
    }

    fn translate_push_address(&mut self, operand: &str) {
        if let Some(n) = self.frame.by_ref_param_offset(operand) {
            self.push(format!("PUSH [BP+{n}]"));
        } else if operand.starts_with("_BP") || self.frame.temp_slots.contains_key(operand) {
            self.push(format!("LEA  AX, {}", format_operand(operand, self.frame)));
            self.push("PUSH AX");
        } else {
            self.push(format!("PUSH OFFSET {operand}"));
        }
    }
}

fn relop_jump(op: BinOp) -> &'static str {
    match op {
        BinOp::Eq => "JE  ",
        BinOp::Ne => "JNE ",
        BinOp::Lt => "JL  ",
        BinOp::Le => "JLE ",
        BinOp::Gt => "JG  ",
        BinOp::Ge => "JGE ",
        _ => unreachable!("relop_jump is only called for relational operators"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pscc_util::{FxHashMap, FxHashSet};

    fn frame_with_byref(offsets: &[i32]) -> FrameLayout {
        FrameLayout {
            local_size: 0,
            param_size: 0,
            temp_slots: FxHashMap::default(),
            by_ref_offsets: offsets.iter().copied().collect::<FxHashSet<_>>(),
        }
    }

    #[test]
    fn assign_between_plain_places() {
        let frame = frame_with_byref(&[]);
        let body = vec![Instruction::Assign { dest: "A".to_string(), src: "10".to_string() }];
        let lines = BodyTranslator::new(&frame).translate(&body);
        assert_eq!(lines, vec!["    MOV  AX, 10".to_string(), "    MOV  A, AX".to_string()]);
    }

    #[test]
    fn by_reference_destination_dereferences_through_bx() {
        let frame = frame_with_byref(&[4]);
        let body = vec![Instruction::Binary {
            dest: "_BP+4".to_string(),
            op: BinOp::Add,
            lhs: "_BP+6".to_string(),
            rhs: "1".to_string(),
        }];
        let lines = BodyTranslator::new(&frame).translate(&body);
        assert_eq!(
            lines,
            vec![
                "    MOV  AX, [BP+6]".to_string(),
                "    MOV  BX, 1".to_string(),
                "    ADD AX, BX".to_string(),
                "    MOV  BX, [BP+4]".to_string(),
                "    MOV  [BX], AX".to_string(),
            ]
        );
    }

    #[test]
    fn push_by_address_on_a_global_uses_offset() {
        let frame = frame_with_byref(&[]);
        let body = vec![Instruction::Push { operand: "X".to_string(), by_address: true }];
        let lines = BodyTranslator::new(&frame).translate(&body);
        assert_eq!(lines, vec!["    PUSH OFFSET X".to_string()]);
    }

    #[test]
    fn push_value_immediate_skips_ax() {
        let frame = frame_with_byref(&[]);
        let body = vec![Instruction::Push { operand: "5".to_string(), by_address: false }];
        let lines = BodyTranslator::new(&frame).translate(&body);
        assert_eq!(lines, vec!["    PUSH 5".to_string()]);
    }

    #[test]
    fn write_str_and_newline() {
        let frame = frame_with_byref(&[]);
        let body = vec![
            Instruction::WriteStr { label: "_S0".to_string() },
            Instruction::WriteInt { src: "42".to_string() },
            Instruction::WriteNewline,
        ];
        let lines = BodyTranslator::new(&frame).translate(&body);
        assert_eq!(
            lines,
            vec![
                "    MOV  DX, OFFSET _S0".to_string(),
                "    CALL writestr".to_string(),
                "    MOV  AX, 42".to_string(),
                "    CALL writeint".to_string(),
                "    CALL writeln".to_string(),
            ]
        );
    }
}
