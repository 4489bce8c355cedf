//! Idempotence tests: formatting formatted output changes nothing.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::path::Path;

use pretty_assertions::assert_eq;
use tidy_fmt::{format_source, FormatOptions};

fn assert_idempotent(source: &str) {
    let path = Path::new("idem.go");
    let options = FormatOptions::default();
    let first = format_source(path, source, &options).unwrap();
    let second = format_source(path, &first, &options).unwrap();
    assert_eq!(first, second, "second pass changed the output");
}

#[test]
fn one_line_bodies() {
    assert_idempotent("package p\nfunc f() { g(func() { h() }) }\nfunc g(func()) {}\nfunc h() {}\n");
}

#[test]
fn expanded_one_liners() {
    assert_idempotent("package p\nfunc f() { if x { y() }; go func() { a(); b() }() }\n");
}

#[test]
fn comments_everywhere() {
    assert_idempotent(
        "package p /* pkg */\n\nimport ( // imports\n\t\"fmt\" // f\n\t// os next\n\t\"os\"\n) // end\n\nfunc f() { /* open */\n\n\tfmt.Println(os.Args) /* call */ // line\n\n\t/* before close */ }\n",
    );
}

#[test]
fn deep_continuations() {
    assert_idempotent(
        "package p\n\nvar x = map[string][]int{\n\"a\": {1,\n2},\n\"b\": func() []int {\nreturn nil\n}(),\n}\n",
    );
}

#[test]
fn labels_and_switches() {
    assert_idempotent(
        "package p\n\nfunc f() {\nloop:\n\tfor {\n\t\tswitch v := g().(type) {\n\n\t\tcase int:\n\t\t\tbreak loop\n\t\tcase nil: fallthrough\n\t\tdefault: _ = v\n\t\t}\n\t}\n}\n",
    );
}

#[test]
fn crlf_sources() {
    assert_idempotent("package p\r\n\r\nimport \"fmt\"\r\n\r\nfunc f() {\r\n\r\n\tfmt.Println()\r\n}\r\n");
}

#[test]
fn consecutive_and_empty_clauses() {
    assert_idempotent(
        "package p\n\nfunc f() {\nswitch x {\n\ncase 1:\ncase 2:\n\n\na()\ndefault:\n\n}\nselect {\ncase <-a:\ncase b <- 1:\nc()\n}\n}\n",
    );
}
