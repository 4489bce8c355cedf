//! Line diff for `-d`.

use std::io::{self, Write};
use std::path::Path;

/// Unchanged lines shown around each change.
const CONTEXT: usize = 3;

/// Largest LCS table built; bigger middles are shown as one replacement.
const MAX_TABLE: usize = 4 << 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edit<'a> {
    Keep(&'a str),
    Remove(&'a str),
    Add(&'a str),
}

/// Write a unified diff between `original` and `formatted`.
pub fn write_diff(
    out: &mut impl Write,
    path: &Path,
    original: &str,
    formatted: &str,
) -> io::Result<()> {
    let old: Vec<&str> = original.lines().collect();
    let new: Vec<&str> = formatted.lines().collect();
    let edits = line_edits(&old, &new);

    writeln!(out, "--- {}", path.display())?;
    writeln!(out, "+++ {}", path.display())?;

    let changes: Vec<usize> = edits
        .iter()
        .enumerate()
        .filter(|(_, edit)| !matches!(edit, Edit::Keep(_)))
        .map(|(i, _)| i)
        .collect();

    let mut i = 0;
    while i < changes.len() {
        let first = changes[i];
        let mut last = first;
        i += 1;
        while i < changes.len() && changes[i] - last <= 2 * CONTEXT + 1 {
            last = changes[i];
            i += 1;
        }
        let start = first.saturating_sub(CONTEXT);
        let end = (last + CONTEXT + 1).min(edits.len());
        write_hunk(out, &edits, start, end)?;
    }
    Ok(())
}

fn write_hunk(out: &mut impl Write, edits: &[Edit<'_>], start: usize, end: usize) -> io::Result<()> {
    let before = &edits[..start];
    let old_start = before.iter().filter(|e| !matches!(e, Edit::Add(_))).count();
    let new_start = before.iter().filter(|e| !matches!(e, Edit::Remove(_))).count();
    let hunk = &edits[start..end];
    let old_len = hunk.iter().filter(|e| !matches!(e, Edit::Add(_))).count();
    let new_len = hunk.iter().filter(|e| !matches!(e, Edit::Remove(_))).count();

    writeln!(
        out,
        "@@ -{},{old_len} +{},{new_len} @@",
        hunk_start(old_start, old_len),
        hunk_start(new_start, new_len),
    )?;
    for edit in hunk {
        match edit {
            Edit::Keep(line) => writeln!(out, " {line}")?,
            Edit::Remove(line) => writeln!(out, "-{line}")?,
            Edit::Add(line) => writeln!(out, "+{line}")?,
        }
    }
    Ok(())
}

/// 1-based first line of a hunk side; an empty side names the line before.
fn hunk_start(start: usize, len: usize) -> usize {
    if len == 0 {
        start
    } else {
        start + 1
    }
}

/// Edit script turning `old` into `new`, by longest common subsequence.
fn line_edits<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<Edit<'a>> {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];

    let mut edits: Vec<Edit<'a>> = old[..prefix].iter().map(|&line| Edit::Keep(line)).collect();
    if (old_mid.len() + 1).saturating_mul(new_mid.len() + 1) > MAX_TABLE {
        edits.extend(old_mid.iter().map(|&line| Edit::Remove(line)));
        edits.extend(new_mid.iter().map(|&line| Edit::Add(line)));
    } else {
        edits.extend(lcs_edits(old_mid, new_mid));
    }
    edits.extend(old[old.len() - suffix..].iter().map(|&line| Edit::Keep(line)));
    edits
}

fn lcs_edits<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<Edit<'a>> {
    let width = new.len() + 1;
    // table[i * width + j]: LCS length of old[i..] and new[j..]
    let mut table = vec![0u32; (old.len() + 1) * width];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            table[i * width + j] = if old[i] == new[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let mut edits = Vec::with_capacity(old.len() + new.len());
    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            edits.push(Edit::Keep(old[i]));
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            edits.push(Edit::Remove(old[i]));
            i += 1;
        } else {
            edits.push(Edit::Add(new[j]));
            j += 1;
        }
    }
    edits.extend(old[i..].iter().map(|&line| Edit::Remove(line)));
    edits.extend(new[j..].iter().map(|&line| Edit::Add(line)));
    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn diff(original: &str, formatted: &str) -> String {
        let mut out = Vec::new();
        write_diff(&mut out, Path::new("a.go"), original, formatted).unwrap_or_default();
        String::from_utf8(out).unwrap_or_default()
    }

    #[test]
    fn removed_blank_line_is_one_hunk() {
        assert_eq!(
            diff("func f() {\n\n\tx()\n}\n", "func f() {\n\tx()\n}\n"),
            "--- a.go\n+++ a.go\n@@ -1,4 +1,3 @@\n func f() {\n-\n \tx()\n }\n"
        );
    }

    #[test]
    fn distant_changes_get_separate_hunks() {
        let original = "a\n\nb\nc\nd\ne\nf\ng\nh\ni\nj\n\nk\n";
        let formatted = "a\nb\nc\nd\ne\nf\ng\nh\ni\nj\nk\n";
        let out = diff(original, formatted);
        assert_eq!(out.matches("@@ -").count(), 2, "{out}");
        assert!(out.contains("@@ -1,5 +1,4 @@\n a\n-\n b\n c\n d\n"));
    }

    #[test]
    fn equal_text_has_no_hunks() {
        assert_eq!(diff("a\nb\n", "a\nb\n"), "--- a.go\n+++ a.go\n");
    }

    #[test]
    fn edits_cover_both_sides() {
        let old = ["a", "b", "c"];
        let new = ["a", "x", "c", "d"];
        assert_eq!(
            line_edits(&old, &new),
            vec![
                Edit::Keep("a"),
                Edit::Remove("b"),
                Edit::Add("x"),
                Edit::Keep("c"),
                Edit::Add("d"),
            ]
        );
    }
}
