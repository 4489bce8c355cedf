//! Rendering per-file errors for stderr.

use std::fmt::Write as _;
use std::path::Path;

use tidy_fmt::FormatError;
use tidy_ir::{LineTable, Span};
use tidy_parse::ParseError;

use super::FileError;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const BLUE: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Escape codes for one rendering, empty without color.
#[derive(Clone, Copy)]
struct Palette {
    error: &'static str,
    note: &'static str,
    bold: &'static str,
    blue: &'static str,
    reset: &'static str,
}

impl Palette {
    fn new(color: bool) -> Self {
        if color {
            Palette {
                error: colors::ERROR,
                note: colors::NOTE,
                bold: colors::BOLD,
                blue: colors::BLUE,
                reset: colors::RESET,
            }
        } else {
            Palette {
                error: "",
                note: "",
                bold: "",
                blue: "",
                reset: "",
            }
        }
    }
}

/// Render one error for stderr.
///
/// Parse errors get `path:line:col`, the source line, and a caret
/// underline; everything else is a one-line message.
pub fn render_error(error: &FileError, color: bool) -> String {
    let p = Palette::new(color);
    match error {
        FileError::Format {
            path,
            text,
            error: FormatError::Parse(parse),
        } => render_parse_error(path, text, parse, p),
        other => format!(
            "{}error{}: {}{other}{}\n",
            p.error, p.reset, p.bold, p.reset
        ),
    }
}

fn render_parse_error(path: &Path, source: &str, error: &ParseError, p: Palette) -> String {
    let lines = LineTable::new(source);
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{}error{}: {}{error}{}",
        p.error, p.reset, p.bold, p.reset
    );
    write_snippet(&mut output, path, source, &lines, error.span(), p.error, p);

    if let Some((span, label)) = error.related() {
        let _ = writeln!(output, "{}note{}: {label}", p.note, p.reset);
        write_snippet(&mut output, path, source, &lines, span, p.note, p);
    }
    output
}

/// Location line, source line, and underline for `span`.
fn write_snippet(
    output: &mut String,
    path: &Path,
    source: &str,
    lines: &LineTable,
    span: Span,
    mark: &str,
    p: Palette,
) {
    let (line, col) = lines.position(source, span.start);
    let _ = writeln!(
        output,
        "  {}-->{} {}:{line}:{col}",
        p.blue,
        p.reset,
        path.display()
    );

    let Some((source_line, line_start)) = get_source_line(source, span.start) else {
        return;
    };
    let source_line = source_line.trim_end_matches('\r');
    let line_num = line.to_string();
    let padding = " ".repeat(line_num.len());

    let _ = writeln!(output, "  {padding} {}|{}", p.blue, p.reset);
    let _ = writeln!(output, "  {}{line_num} |{} {source_line}", p.blue, p.reset);

    // Underline up to the end of the span or of the line, at least one caret.
    let offset = span.start as usize - line_start;
    let prefix = source_line.get(..offset).unwrap_or(source_line);
    let underline_padding: String = prefix
        .chars()
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    let span_end = (span.end as usize)
        .saturating_sub(line_start)
        .min(source_line.len());
    let underline_len = source_line
        .get(offset..span_end)
        .map_or(0, |text| text.chars().count())
        .max(1);
    let _ = writeln!(
        output,
        "  {padding} {}|{} {underline_padding}{mark}{}{}",
        p.blue,
        p.reset,
        "^".repeat(underline_len),
        p.reset
    );
}

/// Get the source line containing the given byte offset, with its start.
fn get_source_line(source: &str, offset: u32) -> Option<(&str, usize)> {
    let offset = offset as usize;
    if offset > source.len() || !source.is_char_boundary(offset) {
        return None;
    }

    let line_start = source[..offset].rfind('\n').map_or(0, |pos| pos + 1);
    let line_end = source[offset..]
        .find('\n')
        .map_or(source.len(), |pos| offset + pos);

    Some((&source[line_start..line_end], line_start))
}
