// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests of the `gotidy` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

const MESSY: &str = "package main\n\nimport (\n\t\"os\"\n\n\t\"fmt\"\n\t\"strings\"\n)\n\nfunc main() {\n\n\tfmt.Println(os.Args)\n\n}\n";
const TIDY: &str = "package main\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n\nfunc main() {\n\tfmt.Println(os.Args)\n}\n";

fn gotidy(args: &[&str], paths: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gotidy"))
        .args(args)
        .args(paths)
        .env_remove("GOTIDY_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("gotidy runs")
}

fn file(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn prints_formatted_files() {
    let dir = TempDir::new().unwrap();
    let main = file(&dir, "main.go", MESSY);

    let output = gotidy(&[], &[&main]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!("// File:  {}\n{TIDY}", main.display())
    );
    assert_eq!(fs::read_to_string(&main).unwrap(), MESSY);
}

#[test]
fn writes_in_place_and_is_stable() {
    let dir = TempDir::new().unwrap();
    let main = file(&dir, "main.go", MESSY);

    let output = gotidy(&["-w"], &[dir.path()]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(fs::read_to_string(&main).unwrap(), TIDY);

    let output = gotidy(&["-l"], &[dir.path()]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn parse_error_aborts_the_whole_batch() {
    let dir = TempDir::new().unwrap();
    let main = file(&dir, "main.go", MESSY);
    let bad = file(&dir, "bad.go", "package main\n\nfunc f() {\n");

    let output = gotidy(&["-w"], &[&main, &bad]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("unclosed `{`"), "{}", stderr(&output));
    assert_eq!(fs::read_to_string(&main).unwrap(), MESSY);
}

#[test]
fn local_prefixes_and_no_prune() {
    let dir = TempDir::new().unwrap();
    let main = file(
        &dir,
        "main.go",
        "package main\n\nimport (\n\t\"example.com/me/util\"\n\t\"github.com/x/y\"\n\t\"os\"\n)\n",
    );

    let output = gotidy(&["--local", "example.com/me", "--no-prune"], &[&main]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!(
            "// File:  {}\npackage main\n\nimport (\n\t\"os\"\n\n\t\"github.com/x/y\"\n\n\t\"example.com/me/util\"\n)\n",
            main.display()
        )
    );
}

#[test]
fn usage_errors_exit_with_two() {
    let output = gotidy(&["-w", "-l"], &[Path::new("x.go")]);
    assert_eq!(output.status.code(), Some(2));
    let output = gotidy(&[], &[]);
    assert_eq!(output.status.code(), Some(2));
}
