//! Expanding command-line paths into the files of a batch.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::FileError;

/// Name of the per-root ignore file.
pub const IGNORE_FILE: &str = ".gotidyignore";

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["vendor", "testdata"];

/// Expand `paths` into Go files, in the order given.
///
/// Files named explicitly are taken as they are; directories are walked
/// recursively for `*.go` files. Paths that cannot be read are returned as
/// errors next to the files that could.
pub fn collect_files(paths: &[PathBuf]) -> (Vec<PathBuf>, Vec<FileError>) {
    let mut files = Vec::new();
    let mut errors = Vec::new();
    for path in paths {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => {
                let patterns = load_ignore_patterns(path);
                visit_go_files(path, path, &patterns, &mut files, &mut errors);
            }
            Ok(_) => files.push(path.clone()),
            Err(source) => errors.push(FileError::Read {
                path: path.clone(),
                source,
            }),
        }
    }
    (files, errors)
}

/// Load ignore patterns from the ignore file in `root`, if any.
fn load_ignore_patterns(root: &Path) -> Vec<String> {
    match fs::read_to_string(root.join(IGNORE_FILE)) {
        Ok(content) => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn visit_go_files(
    dir: &Path,
    root: &Path,
    patterns: &[String],
    files: &mut Vec<PathBuf>,
    errors: &mut Vec<FileError>,
) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(source) => {
            errors.push(FileError::Read {
                path: dir.to_path_buf(),
                source,
            });
            return;
        }
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();

    for path in paths {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') || is_ignored(&path, root, patterns) {
            trace!(path = %path.display(), "skipped");
            continue;
        }
        if path.is_dir() {
            if !SKIPPED_DIRS.contains(&name) {
                visit_go_files(&path, root, patterns, files, errors);
            }
        } else if path.extension().is_some_and(|ext| ext == "go") {
            files.push(path);
        }
    }
}

/// Check if a path matches any of the ignore patterns.
///
/// Patterns are relative to `root`: `*` matches within one path element,
/// `**` across elements, and a plain pattern matches a path, a directory
/// prefix, or a file name.
pub fn is_ignored(path: &Path, root: &Path, patterns: &[String]) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    let relative = relative.to_string_lossy().replace('\\', "/");
    let file_name = path.file_name().and_then(|n| n.to_str());

    patterns.iter().any(|pattern| {
        if let Some((prefix, suffix)) = pattern.split_once("**") {
            let prefix = prefix.trim_end_matches('/');
            let suffix = suffix.trim_start_matches('/');
            let rest = if prefix.is_empty() {
                Some(relative.as_str())
            } else if relative == prefix {
                Some("")
            } else {
                relative
                    .strip_prefix(prefix)
                    .and_then(|rest| rest.strip_prefix('/'))
            };
            rest.is_some_and(|rest| {
                suffix.is_empty() || path_tails(rest).any(|tail| glob_element(suffix, tail))
            })
        } else if pattern.contains('*') {
            glob_element(pattern, &relative)
        } else {
            relative == *pattern
                || relative.starts_with(&format!("{pattern}/"))
                || file_name == Some(pattern.as_str())
        }
    })
}

/// `path` and every suffix of it that starts after a `/`.
fn path_tails(path: &str) -> impl Iterator<Item = &str> {
    std::iter::once(path).chain(path.match_indices('/').map(move |(i, _)| &path[i + 1..]))
}

/// Match `text` against a pattern whose `*`s never cross a `/`.
fn glob_element(pattern: &str, text: &str) -> bool {
    let mut parts = pattern.split('*');
    let first = parts.next().unwrap_or("");
    let Some(mut rest) = text.strip_prefix(first) else {
        return false;
    };
    let parts: Vec<&str> = parts.collect();
    for (i, part) in parts.iter().enumerate() {
        let last = i + 1 == parts.len();
        let found = if last {
            rest.len()
                .checked_sub(part.len())
                .filter(|&at| rest.is_char_boundary(at) && rest[at..] == **part)
        } else {
            rest.find(part)
        };
        let Some(at) = found else {
            return false;
        };
        if rest[..at].contains('/') {
            return false;
        }
        rest = &rest[at + part.len()..];
    }
    rest.is_empty()
}
