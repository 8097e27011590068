//! Black-box end-to-end tests driving the built `pscc` binary: exit codes
//! and emitted `.tac`/`.asm` contents for the scenarios these crates are
//! grounded on.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn pscc() -> Command {
    Command::cargo_bin("pscc").unwrap()
}

fn write_source(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn globals_and_add_produces_expected_tac_and_asm() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "one.src",
        "procedure one is\n\
           A, B, CC : integer;\n\
         begin\n\
           A := 10;\n\
           B := 40;\n\
           CC := A + B;\n\
         end one;\n",
    );

    pscc().arg(&source).assert().success();

    let tac = fs::read_to_string(source.with_extension("tac")).unwrap();
    assert!(tac.contains("A = 10"));
    assert!(tac.contains("_t1 = A ADD B"));
    assert!(tac.contains("start proc one"));

    let asm = fs::read_to_string(source.with_extension("asm")).unwrap();
    assert!(asm.contains("A DW ?"));
    assert!(asm.contains("one PROC NEAR"));
    assert!(asm.contains("END main"));
}

#[test]
fn custom_output_paths_are_honored() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "one.src", "procedure one is begin end one;\n");
    let tac_out = dir.path().join("custom.tac");
    let asm_out = dir.path().join("custom.asm");

    pscc()
        .arg(&source)
        .arg("-t")
        .arg(&tac_out)
        .arg("-o")
        .arg(&asm_out)
        .assert()
        .success();

    assert!(tac_out.exists());
    assert!(asm_out.exists());
    assert!(!source.with_extension("tac").exists());
}

#[test]
fn end_name_mismatch_exits_with_semantic_error_code_and_writes_no_artifacts() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "bad.src", "procedure alpha is begin end beta;\n");

    pscc()
        .arg(&source)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("beta"));

    assert!(!source.with_extension("tac").exists());
    assert!(!source.with_extension("asm").exists());
}

#[test]
fn illegal_character_exits_with_lexical_error_code() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "bad.src", "procedure one is begin A := 1 # 2; end one;\n");

    pscc().arg(&source).assert().code(2);
    assert!(!source.with_extension("tac").exists());
}

#[test]
fn identifier_too_long_halts_before_tac_emission() {
    let dir = TempDir::new().unwrap();
    let long_name = "a".repeat(20);
    let source_text = format!(
        "procedure one is\n{long_name} : integer;\nbegin\n{long_name} := 1;\nend one;\n"
    );
    let source = write_source(&dir, "long.src", &source_text);

    pscc().arg(&source).assert().code(2);
    assert!(!source.with_extension("tac").exists());
}

#[test]
fn missing_source_file_is_a_file_error() {
    let mut cmd = pscc();
    cmd.arg("/no/such/path/missing.src");
    cmd.assert().code(1);
}

#[test]
fn mixed_mode_parameters_dereference_output_parameter_in_asm() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "outer.src",
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

    pscc().arg(&source).assert().success();

    let asm = fs::read_to_string(source.with_extension("asm")).unwrap();
    assert!(asm.contains("PUSH 5"));
    assert!(asm.contains("PUSH OFFSET X"));
    assert!(asm.contains("CALL inner"));
}

#[test]
fn debug_flag_is_accepted() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "one.src", "procedure one is begin end one;\n");

    pscc().arg(&source).arg("-d").assert().success();
}
