//! End-to-end tests running the ipegen binary

use std::fs;
use std::process::{Command, Output};

fn run_ipegen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ipegen"))
        .args(args)
        .output()
        .expect("failed to run ipegen")
}

#[test]
fn test_text_output() {
    let out = run_ipegen(&["--start", "0", "--end", "3"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);

    let fields: Vec<&str> = lines[1].split('\t').collect();
    assert_eq!(fields.len(), 8);
    assert_eq!(fields[0], "1");
    assert!(fields[1].starts_with("0x"));
    assert_eq!(
        &fields[2..],
        &["table_name_001", "closure_desc_001", "ty_desc_001", "label_001", "module_001", "srcloc_001"]
    );
}

#[test]
fn test_raw_output_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.bin");
    let path_str = path.to_str().unwrap();

    let out = run_ipegen(&["-s", "5", "-e", "6", "-f", "raw", "-o", path_str]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let bytes = fs::read(&path).unwrap();
    assert_eq!(
        bytes,
        b"table_name_005\0closure_desc_005\0ty_desc_005\0label_005\0module_005\0srcloc_005\0"
    );
}

#[test]
fn test_chained_output_keeps_order() {
    let out = run_ipegen(&["-e", "5", "--chain", "2"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let indices: Vec<&str> = stdout.lines().map(|l| l.split('\t').next().unwrap()).collect();
    assert_eq!(indices, vec!["0", "1", "2", "3", "4"]);
}

#[test]
fn test_debug_goes_to_stderr() {
    let out = run_ipegen(&["-e", "2", "--debug"]);
    assert!(out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.starts_with("node 0: 2 entries, 152 string bytes\n"));
    assert!(stderr.contains("[1] info=0x"));
    assert_eq!(String::from_utf8(out.stdout).unwrap().lines().count(), 2);
}

#[test]
fn test_inverted_range_fails() {
    let out = run_ipegen(&["-s", "4", "-e", "2"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.starts_with("ipegen: Invalid entry range"));
}

#[test]
fn test_bad_format_fails() {
    let out = run_ipegen(&["-e", "1", "-f", "yaml"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8(out.stderr).unwrap().contains("Invalid output format: yaml"));
}

#[test]
fn test_default_value_flag() {
    let out = run_ipegen(&["-e", "1", "--value", "-3"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap().lines().count(), 1);
}
