#![allow(clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use tidy_parse::{parse, ParseMode};

use super::print_file;
use crate::normalize::normalize;

fn print(source: &str) -> String {
    let mut parsed = parse(source, ParseMode::PARSE_COMMENTS).expect("source parses");
    normalize(&mut parsed);
    print_file(source, &parsed)
}

/// Print without normalizing, to see the printer alone.
fn print_raw(source: &str) -> String {
    let parsed = parse(source, ParseMode::PARSE_COMMENTS).expect("source parses");
    print_file(source, &parsed)
}

#[test]
fn blank_lines_after_open_brace_are_removed() {
    assert_eq!(
        print("package p\n\nfunc f() {\n\n\n  x := 1\n}\n"),
        "package p\n\nfunc f() {\n\tx := 1\n}\n"
    );
}

#[test]
fn without_merges_blank_lines_collapse_to_one() {
    assert_eq!(
        print_raw("package p\n\nfunc f() {\n\n\n  x := 1\n}\n"),
        "package p\n\nfunc f() {\n\n\tx := 1\n}\n"
    );
}

#[test]
fn import_group_blank_lines_are_removed() {
    assert_eq!(
        print("package p\n\nimport (\n  \"a\"\n\n  \"b\"\n)\n"),
        "package p\n\nimport (\n\t\"a\"\n\t\"b\"\n)\n"
    );
}

#[test]
fn blank_lines_between_declarations_are_kept_once() {
    assert_eq!(
        print("package p\nvar a = 1\n\n\n\nvar b = 2\nvar c = 3\n"),
        "package p\nvar a = 1\n\nvar b = 2\nvar c = 3\n"
    );
}

#[test]
fn interior_blank_lines_are_kept_once() {
    assert_eq!(
        print("package p\n\nfunc f() {\n\ta()\n\n\n\n\tb()\n}\n"),
        "package p\n\nfunc f() {\n\ta()\n\n\tb()\n}\n"
    );
}

#[test]
fn statement_separators_become_line_breaks() {
    assert_eq!(
        print("package p\n\nfunc f() {\n\ta(); b();\n\tc()\n}\n"),
        "package p\n\nfunc f() {\n\ta()\n\tb()\n\tc()\n}\n"
    );
}

#[test]
fn header_semicolons_are_kept() {
    assert_eq!(
        print("package p\n\nfunc f() {\n    for i := 0; i < n; i++ {\n        g(i)\n    }\n}\n"),
        "package p\n\nfunc f() {\n\tfor i := 0; i < n; i++ {\n\t\tg(i)\n\t}\n}\n"
    );
}

#[test]
fn horizontal_spacing_is_minimal() {
    assert_eq!(
        print("package p\n\nvar x   =    y+z\nvar w=1\n"),
        "package p\n\nvar x = y+z\nvar w=1\n"
    );
}

#[test]
fn one_line_function_bodies_stay() {
    let src = "package p\n\nfunc f() int { return 1 }\n\nfunc g() {}\n\nvar h = func() { run() }\n";
    assert_eq!(print(src), src);
}

#[test]
fn one_line_bodies_with_more_statements_expand() {
    assert_eq!(
        print("package p\n\nfunc f() { a(); b() }\n"),
        "package p\n\nfunc f() {\n\ta()\n\tb()\n}\n"
    );
}

#[test]
fn one_line_statement_bodies_expand() {
    assert_eq!(
        print("package p\n\nfunc f() {\n\tif x { return }\n\tfor {}\n}\n"),
        "package p\n\nfunc f() {\n\tif x {\n\t\treturn\n\t}\n\tfor {}\n}\n"
    );
}

#[test]
fn empty_multi_line_block_keeps_its_break() {
    assert_eq!(
        print("package p\n\nfunc f() {\n\n}\n"),
        "package p\n\nfunc f() {\n}\n"
    );
}

#[test]
fn switch_cases_align_with_switch() {
    assert_eq!(
        print("package p\n\nfunc f(x int) {\nswitch x {\ncase 1, 2:\na()\n\ndefault:\n}\n}\n"),
        "package p\n\nfunc f(x int) {\n\tswitch x {\n\tcase 1, 2:\n\t\ta()\n\n\tdefault:\n\t}\n}\n"
    );
}

#[test]
fn labels_are_outdented() {
    assert_eq!(
        print("package p\n\nfunc f() {\nouter: for {\nbreak outer\n}\n}\n"),
        "package p\n\nfunc f() {\nouter:\n\tfor {\n\t\tbreak outer\n\t}\n}\n"
    );
}

#[test]
fn else_chains_stay_on_the_closing_line() {
    assert_eq!(
        print("package p\n\nfunc f() {\nif a {\nx()\n} else if b {\ny()\n} else {\nz()\n}\n}\n"),
        "package p\n\nfunc f() {\n\tif a {\n\t\tx()\n\t} else if b {\n\t\ty()\n\t} else {\n\t\tz()\n\t}\n}\n"
    );
}

#[test]
fn continuation_lines_indent_past_the_group_opener() {
    assert_eq!(
        print("package p\n\nfunc f() {\n  call(a,\n  b)\n  x := []int{\n  1,\n  2,\n  }\n  y := a +\n  b\n}\n"),
        "package p\n\nfunc f() {\n\tcall(a,\n\t\tb)\n\tx := []int{\n\t\t1,\n\t\t2,\n\t}\n\ty := a +\n\t\tb\n}\n"
    );
}

#[test]
fn nested_groups_close_at_their_opening_line() {
    assert_eq!(
        print("package p\n\nvar x = f(g(\n1,\n))\n"),
        "package p\n\nvar x = f(g(\n\t1,\n))\n"
    );
}

#[test]
fn function_literals_indent_from_their_line() {
    assert_eq!(
        print("package p\n\nfunc f() {\ngo func() {\n\nx()\n}()\ncall(a,\nfunc() {\ny()\n})\n}\n"),
        "package p\n\nfunc f() {\n\tgo func() {\n\t\tx()\n\t}()\n\tcall(a,\n\t\tfunc() {\n\t\t\ty()\n\t\t})\n}\n"
    );
}

#[test]
fn wrapped_literal_signature_keeps_body_indent() {
    assert_eq!(
        print("package p\n\nfunc f() {\nfn := func(a int,\nb int) int {\nreturn a\n}\n_ = fn\n}\n"),
        "package p\n\nfunc f() {\n\tfn := func(a int,\n\t\tb int) int {\n\t\treturn a\n\t}\n\t_ = fn\n}\n"
    );
}

#[test]
fn struct_and_var_groups_indent_fields() {
    assert_eq!(
        print("package p\n\ntype T struct {\nA int\n\nB string\n}\n\nvar (\na = 1\n)\n"),
        "package p\n\ntype T struct {\n\tA int\n\n\tB string\n}\n\nvar (\n\ta = 1\n)\n"
    );
}

#[test]
fn comments_are_interleaved() {
    let src = "package p // pkg\n\n// F does things.\nfunc f() { // open\n\n\t// lead\n\tx := 1 // trail\n\n\t// before close\n}\n\n/* end */\n";
    assert_eq!(
        print(src),
        "package p // pkg\n\n// F does things.\nfunc f() { // open\n\t// lead\n\tx := 1 // trail\n\n\t// before close\n}\n\n/* end */\n"
    );
}

#[test]
fn comments_before_closing_brace_take_content_indent() {
    assert_eq!(
        print("package p\n\nfunc f() {\n\tx()\n// done\n}\n"),
        "package p\n\nfunc f() {\n\tx()\n\t// done\n}\n"
    );
}

#[test]
fn comment_in_one_line_body_expands_it() {
    assert_eq!(
        print("package p\n\nfunc f() { /* c */ return }\n"),
        "package p\n\nfunc f() { /* c */\n\treturn\n}\n"
    );
}

#[test]
fn raw_strings_and_block_comments_are_verbatim() {
    let src = "package p\n\n/*\n   keep\n\n   this\n*/\nvar s = `a\n   b\n\n`\n";
    assert_eq!(print(src), src);
}

#[test]
fn crlf_line_ends_become_lf() {
    assert_eq!(
        print("package p\r\n\r\nfunc f() {\r\n\r\n\tx() // c\r\n}\r\n"),
        "package p\n\nfunc f() {\n\tx() // c\n}\n"
    );
}

#[test]
fn output_ends_with_one_newline() {
    assert_eq!(print("package p\n\n\n\n"), "package p\n");
    assert_eq!(print("package p"), "package p\n");
}

#[test]
fn leading_indentation_is_replaced_with_tabs() {
    assert_eq!(
        print("   package p\n\n   func f() {\n        g()\n   }\n"),
        "package p\n\nfunc f() {\n\tg()\n}\n"
    );
}

#[test]
fn select_cases_align_with_select() {
    assert_eq!(
        print("package p\n\nfunc f() {\nselect {\ncase v := <-ch:\nuse(v)\n}\n}\n"),
        "package p\n\nfunc f() {\n\tselect {\n\tcase v := <-ch:\n\t\tuse(v)\n\t}\n}\n"
    );
}
