//! Assembles a complete `.asm` text file from a finished parse: `.DATA`
//! globals and string pool, one `PROC`/`ENDP` block per procedure in
//! declaration order, and the synthesized `main` entry point.

use crate::frame::FrameLayout;
use crate::translate::BodyTranslator;
use pscc_sym::{SymbolKind, SymbolTable};
use pscc_tac::{masm_safe_name, Instruction, TacBuilder};

/// One procedure's own TAC body, with any nested procedure's span already
/// extracted into its own chunk.
struct ProcChunk {
    name: String,
    body: Vec<Instruction>,
}

/// Partition a flat TAC stream into one [`ProcChunk`] per `proc`/`endp`
/// pair, in the order each `proc` was first seen. A nested procedure's
/// instructions are never duplicated into its enclosing procedure's body.
fn split_into_procedures(instructions: &[Instruction]) -> Vec<ProcChunk> {
    let mut order = Vec::new();
    let mut bodies: std::collections::HashMap<String, Vec<Instruction>> = std::collections::HashMap::new();
    let mut stack: Vec<(String, Vec<Instruction>)> = Vec::new();

    for instr in instructions {
        match instr {
            Instruction::ProcBegin(name) => {
                order.push(name.clone());
                stack.push((name.clone(), Vec::new()));
            }
            Instruction::ProcEnd(name) => {
                let (opened, body) = stack.pop().expect("endp without matching proc");
                debug_assert_eq!(&opened, name);
                bodies.insert(opened, body);
            }
            Instruction::ProgramStart { .. } => {}
            other => {
                if let Some((_, body)) = stack.last_mut() {
                    body.push(other.clone());
                }
            }
        }
    }

    order
        .into_iter()
        .map(|name| {
            let body = bodies.remove(&name).expect("every proc has a matching endp");
            ProcChunk { name, body }
        })
        .collect()
}

fn translate_procedure(name: &str, frame: &FrameLayout, body: &[Instruction]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{name} PROC NEAR\n"));
    out.push_str("    PUSH BP\n");
    out.push_str("    MOV  BP, SP\n");
    if frame.local_size > 0 {
        out.push_str(&format!("    SUB  SP, {}\n", frame.local_size));
    }
    for line in BodyTranslator::new(frame).translate(body) {
        out.push_str(&line);
        out.push('\n');
    }
    if frame.local_size > 0 {
        out.push_str("    MOV  SP, BP\n");
    }
    out.push_str("    POP  BP\n");
    out.push_str(&format!("    RET  {}\n", frame.param_size));
    out.push_str(&format!("{name} ENDP\n"));
    out
}

fn main_entry(entry: &str) -> String {
    let mut out = String::new();
    out.push_str("main PROC\n");
    out.push_str("    MOV  AX, @DATA\n");
    out.push_str("    MOV  DS, AX\n");
    out.push_str(&format!("    CALL {entry}\n"));
    out.push_str("    MOV  AH, 4CH\n");
    out.push_str("    INT  21H\n");
    out.push_str("main ENDP\n");
    out
}

/// Produce the complete `.asm` source for a successfully parsed program.
pub fn translate_program(symbols: &SymbolTable, tac: &TacBuilder, entry_point: &str) -> String {
    let mut out = String::new();
    out.push_str(".MODEL SMALL\n");
    out.push_str(".STACK 100H\n");
    out.push_str(".DATA\n");

    for entry in symbols.entries() {
        if entry.depth >= 2 {
            continue;
        }
        if let SymbolKind::Variable { .. } = entry.kind {
            out.push_str(&format!("{} DW ?\n", masm_safe_name(&entry.lexeme)));
        }
    }
    for (i, value) in tac.string_pool().iter().enumerate() {
        out.push_str(&format!("_S{i} DB \"{value}$\"\n"));
    }

    out.push_str(".CODE\n");
    out.push_str("INCLUDE io.asm\n");

    let chunks = split_into_procedures(tac.instructions());
    let proc_entries: Vec<_> = symbols.entries().filter(|e| e.is_procedure()).collect();
    for (chunk, entry) in chunks.iter().zip(proc_entries.iter()) {
        let frame = FrameLayout::build(entry, symbols, &chunk.body);
        out.push_str(&translate_procedure(&chunk.name, &frame, &chunk.body));
    }

    out.push_str(&main_entry(entry_point));
    out.push_str("END main\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pscc_lex::Lexer;
    use pscc_par::parse;

    fn compile(source: &str) -> (SymbolTable, TacBuilder, String) {
        let tokens = Lexer::new(source).tokenize();
        let outcome = parse(tokens);
        assert!(outcome.succeeded());
        let entry = outcome.entry_point.clone().unwrap();
        (outcome.symbols, outcome.tac, entry)
    }

    #[test]
    fn globals_and_add_produces_one_data_entry_per_global() {
        let (symbols, tac, entry) = compile(
            "procedure one is\n\
               A, B, CC : integer;\n\
             begin\n\
               A := 10;\n\
               B := 40;\n\
               CC := A + B;\n\
             end one;\n",
        );
        let asm = translate_program(&symbols, &tac, &entry);
        assert!(asm.contains("A DW ?"));
        assert!(asm.contains("B DW ?"));
        assert!(asm.contains("CC DW ?"));
        assert!(asm.contains("one PROC NEAR"));
        assert!(asm.contains("SUB  SP, 2"));
        assert!(asm.contains("RET  0"));
        assert!(asm.contains("CALL one"));
        assert!(asm.contains("END main"));
    }

    #[test]
    fn mixed_mode_parameters_dereference_the_output_parameter() {
        let (symbols, tac, entry) = compile(
            "procedure outer is\n\
               X : integer;\n\
               procedure inner(in a : integer; out b : integer) is\n\
               begin\n\
                 b := a + 1;\n\
               end inner;\n\
             begin\n\
               X := 0;\n\
               inner(5, X);\n\
             end outer;\n",
        );
        let asm = translate_program(&symbols, &tac, &entry);
        assert!(asm.contains("MOV  BX, [BP+4]"));
        assert!(asm.contains("MOV  [BX], AX"));
        assert!(asm.contains("PUSH 5"));
        assert!(asm.contains("PUSH OFFSET X"));
        assert!(asm.contains("CALL inner"));
    }

    #[test]
    fn nested_procedures_emit_one_proc_block_each() {
        let (symbols, tac, entry) = compile(
            "procedure four is\n\
               A, B : integer;\n\
               procedure one is\n\
                 C, D : integer;\n\
               begin\n\
                 C := 5; D := 10; D := A + B;\n\
               end one;\n\
             begin\n\
               A := 1; B := 2; one();\n\
             end four;\n",
        );
        let asm = translate_program(&symbols, &tac, &entry);
        assert_eq!(asm.matches("PROC NEAR").count(), 2);
        assert!(asm.contains("one PROC NEAR"));
        assert!(asm.contains("four PROC NEAR"));
        assert!(!asm.contains("CALL main"));
    }
}
