use std::path::PathBuf;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn program(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("programs")
        .join(name)
}

fn ls8(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ls8"))
        .args(args)
        .env_remove("LS8_LOG")
        .env_remove("LS8_LOG_FILE")
        .env_remove("LS8_DUMP_STATE")
        .output()
        .expect("ls8 binary runs")
}

fn run_program(name: &str) -> Output {
    let path = program(name);
    ls8(&[path.to_str().unwrap()])
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn mult_prints_72() {
    let output = run_program("mult.ls8");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "72\n");
}

#[test]
fn print8() {
    let output = run_program("print8.ls8");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "8\n");
}

#[test]
fn stack_swaps_values() {
    let output = run_program("stack.ls8");

    assert_eq!(stdout(&output), "2\n1\n");
}

#[test]
fn call_returns_to_caller() {
    let output = run_program("call.ls8");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "42\n");
}

#[test]
fn compare_and_branch() {
    let output = run_program("cmp.ls8");

    assert_eq!(stdout(&output), "20\n");
}

#[test]
fn unknown_opcode_prints_a_single_trace() {
    let output = run_program("unknown.ls8");
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(out.lines().count(), 1);
    assert!(out.starts_with("TRACE: 00 | 00 | FF"));
}

#[test]
fn wrong_argument_count() {
    assert_eq!(ls8(&[]).status.code(), Some(1));
    assert_eq!(ls8(&["a.ls8", "b.ls8"]).status.code(), Some(1));
}

#[test]
fn missing_file() {
    let output = ls8(&["/no/such/program.ls8"]);

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "");
}

#[test]
fn malformed_program() {
    let output = run_program("malformed.ls8");

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 6"));
}

#[test]
fn fault_exit_code() {
    let output = run_program("divzero.ls8");

    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("division by zero"));
}

#[test]
fn dumps_final_state() {
    let dump = std::env::temp_dir().join(format!("ls8-state-{}.json", std::process::id()));
    let path = program("mult.ls8");

    let output = Command::new(env!("CARGO_BIN_EXE_ls8"))
        .arg(&path)
        .env("LS8_DUMP_STATE", &dump)
        .env_remove("LS8_LOG_FILE")
        .output()
        .expect("ls8 binary runs");
    assert_eq!(output.status.code(), Some(0));

    let state: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&dump).unwrap()).unwrap();
    std::fs::remove_file(&dump).ok();

    assert_eq!(state["registers"][0], 72);
    assert_eq!(state["registers"][7], 0xF4);
    assert_eq!(state["pc"], 11);
}
