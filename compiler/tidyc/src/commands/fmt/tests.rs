#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tidy_parse::ParseError;

use super::walk::is_ignored;
use super::*;

const MESSY: &str = "package p\n\nfunc f() {\n\n\tx := 1\n\t_ = x\n\n}\n";
const TIDY: &str = "package p\n\nfunc f() {\n\tx := 1\n\t_ = x\n}\n";
const BROKEN: &str = "package p\n\nfunc f() {\n\tx := \"abc\n}\n";

fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, text).unwrap();
    path
}

fn run(paths: &[PathBuf], mode: OutputMode) -> (usize, String, String) {
    let config = FormatConfig {
        mode,
        ..FormatConfig::default()
    };
    let mut out = Vec::new();
    let mut err = Vec::new();
    let failed = run_batch(paths, &config, &mut out, &mut err, false).unwrap();
    (
        failed,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn stdout_mode_prints_headers_and_results() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.go", MESSY);
    let b = write(&dir, "b.go", TIDY);
    let (failed, out, err) = run(&[a.clone(), b.clone()], OutputMode::Stdout);
    assert_eq!(failed, 0);
    assert_eq!(err, "");
    assert_eq!(
        out,
        format!(
            "// File:  {}\n{TIDY}// File:  {}\n{TIDY}",
            a.display(),
            b.display()
        )
    );
    assert_eq!(fs::read_to_string(&a).unwrap(), MESSY);
}

#[test]
fn write_mode_rewrites_changed_files() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.go", MESSY);
    let (failed, out, _) = run(&[a.clone()], OutputMode::Write);
    assert_eq!(failed, 0);
    assert_eq!(out, "");
    assert_eq!(fs::read_to_string(&a).unwrap(), TIDY);
}

#[test]
fn list_mode_names_only_changed_files() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.go", MESSY);
    let b = write(&dir, "b.go", TIDY);
    let (failed, out, _) = run(&[a.clone(), b], OutputMode::List);
    assert_eq!(failed, 0);
    assert_eq!(out, format!("{}\n", a.display()));
}

#[test]
fn diff_mode_shows_removed_lines() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.go", MESSY);
    let (_, out, _) = run(&[a.clone()], OutputMode::Diff);
    assert!(out.starts_with(&format!("--- {}\n+++ {}\n@@ ", a.display(), a.display())));
    assert_eq!(out.lines().filter(|line| *line == "-").count(), 2, "{out}");
    assert!(!out.lines().any(|line| line.starts_with('+') && !line.starts_with("+++")));
}

#[test]
fn one_parse_error_commits_nothing() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.go", MESSY);
    let bad = write(&dir, "bad.go", BROKEN);
    let c = write(&dir, "c.go", MESSY);

    let (failed, out, err) = run(&[a.clone(), bad.clone(), c.clone()], OutputMode::Write);
    assert_eq!(failed, 1);
    assert_eq!(out, "");
    assert!(err.contains(&format!("{}:4:7", bad.display())), "{err}");
    assert_eq!(fs::read_to_string(&a).unwrap(), MESSY);
    assert_eq!(fs::read_to_string(&c).unwrap(), MESSY);

    let (_, out, _) = run(&[a, bad], OutputMode::Stdout);
    assert_eq!(out, "");
}

#[test]
fn every_error_is_reported() {
    let dir = TempDir::new().unwrap();
    let bad = write(&dir, "bad.go", BROKEN);
    let empty = write(&dir, "empty.go", "func f() {}\n");
    let missing = dir.path().join("missing.go");

    let (failed, _, err) = run(&[bad, empty.clone(), missing.clone()], OutputMode::Stdout);
    assert_eq!(failed, 3);
    assert!(err.contains(&missing.display().to_string()), "{err}");
    assert!(err.contains("missing package clause"), "{err}");
    assert!(err.contains(&empty.display().to_string()), "{err}");
}

#[test]
fn directories_are_walked_in_order() {
    let dir = TempDir::new().unwrap();
    write(&dir, "b.go", TIDY);
    write(&dir, "a.go", TIDY);
    write(&dir, "sub/c.go", TIDY);
    write(&dir, "notes.txt", "not go");
    write(&dir, ".hidden/d.go", TIDY);
    write(&dir, "vendor/e.go", TIDY);
    write(&dir, "testdata/f.go", BROKEN);

    let (files, errors) = collect_files(&[dir.path().to_path_buf()]);
    assert!(errors.is_empty());
    let names: Vec<PathBuf> = files
        .iter()
        .map(|path| path.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        names,
        vec![
            PathBuf::from("a.go"),
            PathBuf::from("b.go"),
            Path::new("sub").join("c.go")
        ]
    );
}

#[test]
fn ignore_file_excludes_paths() {
    let dir = TempDir::new().unwrap();
    write(&dir, ".gotidyignore", "# generated\ngen/**\n*_string.go\n");
    write(&dir, "a.go", TIDY);
    write(&dir, "kind_string.go", BROKEN);
    write(&dir, "gen/deep/x.go", BROKEN);

    let (files, errors) = collect_files(&[dir.path().to_path_buf()]);
    assert!(errors.is_empty());
    assert_eq!(files, vec![dir.path().join("a.go")]);
}

#[test]
fn ignore_patterns() {
    let root = Path::new("/r");
    let patterns = |list: &[&str]| list.iter().map(ToString::to_string).collect::<Vec<_>>();

    assert!(is_ignored(Path::new("/r/gen/a.go"), root, &patterns(&["gen"])));
    assert!(is_ignored(Path::new("/r/x/y.pb.go"), root, &patterns(&["**/*.pb.go"])));
    assert!(is_ignored(Path::new("/r/x/y.pb.go"), root, &patterns(&["x/*.go"])));
    assert!(!is_ignored(Path::new("/r/x/z/y.go"), root, &patterns(&["x/*.go"])));
    assert!(is_ignored(Path::new("/r/deep/mock.go"), root, &patterns(&["mock.go"])));
    assert!(!is_ignored(Path::new("/r/a.go"), root, &patterns(&["b.go", "gen/**"])));
    assert!(!is_ignored(Path::new("/elsewhere/a.go"), root, &patterns(&["a.go"])));
}

#[test]
fn parse_errors_render_with_a_caret() {
    let path = PathBuf::from("bad.go");
    let error = tidy_fmt::format_source(&path, BROKEN, &FormatOptions::default()).unwrap_err();
    let rendered = render_error(
        &FileError::Format {
            path,
            text: BROKEN.to_string(),
            error,
        },
        false,
    );
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "error: string literal not terminated");
    assert_eq!(lines[1], "  --> bad.go:4:7");
    assert_eq!(lines[3], "  4 | \tx := \"abc");
    assert_eq!(lines[4], "    | \t     ^^^^");
    assert!(!rendered.contains('\x1b'));
}

#[test]
fn colored_rendering_uses_escape_codes() {
    let error = FileError::Format {
        path: PathBuf::from("p.go"),
        text: "func f() {}\n".to_string(),
        error: FormatError::Parse(ParseError::MissingPackage {
            span: tidy_ir::Span::new(0, 4),
        }),
    };
    let rendered = render_error(&error, true);
    assert!(rendered.contains("\x1b[1;31merror\x1b[0m"), "{rendered}");
    assert!(rendered.contains("p.go:1:1"), "{rendered}");
    assert!(rendered.contains("^^^^"), "{rendered}");
}

#[test]
fn other_errors_render_on_one_line() {
    let error = FileError::Read {
        path: PathBuf::from("gone.go"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    };
    assert_eq!(
        render_error(&error, false),
        "error: gone.go: cannot read: no such file\n"
    );
    assert_eq!(error.path(), Path::new("gone.go"));
}
