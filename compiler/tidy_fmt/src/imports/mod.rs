//! Import organization on printed text.
//!
//! Runs after printing, so its input is already canonical: every import decl
//! at the top of the file, one spec per line inside groups. The pass re-lexes
//! the text, gathers the specs of all top-level import declarations with the
//! comments attached to them, and replaces the whole import section with a
//! single rendered declaration:
//!
//! 1. Unused specs are pruned (see [`assumed_name`]).
//! 2. Exact duplicates are dropped.
//! 3. Specs are split into std, third-party and local groups, sorted by path
//!    within each, with one blank line between groups.
//!
//! Files importing `"C"` are left alone: the cgo preamble is tied to that
//! declaration's position and doc comment.

mod classify;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use tidy_ir::{LineTable, Span, Token, TokenKind};
use tidy_lexer::{LexError, LexOutput};
use tracing::{debug, trace};

pub use classify::{assumed_name, classify, ImportGroup};

/// How imports are organized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportOptions {
    /// Import path prefixes that form the last group.
    pub local_prefixes: Vec<String>,
    /// Remove imports whose package name is never used as a qualifier.
    pub prune_unused: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            local_prefixes: Vec::new(),
            prune_unused: true,
        }
    }
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum ImportError {
    #[error("{}: cannot re-read imports: {error}", .path.display())]
    Lex {
        path: PathBuf,
        #[source]
        error: LexError,
    },
    #[error("{}: malformed import declaration at {span}", .path.display())]
    Malformed { path: PathBuf, span: Span },
}

/// One import spec with the comments attached to it.
#[derive(Clone, Debug)]
struct Spec<'a> {
    name: Option<&'a str>,
    /// Path literal as written, quotes included.
    literal: &'a str,
    /// Path without quotes.
    path: &'a str,
    start: u32,
    /// End of the path literal.
    end: u32,
    /// Comment lines directly above the spec.
    docs: Vec<&'a str>,
    /// Comment following the path on its line.
    trailing: Option<&'a str>,
}

impl Spec<'_> {
    fn is_plain(&self) -> bool {
        self.docs.is_empty() && self.trailing.is_none()
    }

    fn is_kept(&self, used: &FxHashSet<&str>) -> bool {
        match self.name {
            Some("_" | ".") => true,
            Some(name) => used.contains(name),
            None => self.path == "C" || used.contains(assumed_name(self.path)),
        }
    }
}

/// The import declarations at the top of a file.
#[derive(Debug)]
struct Section<'a> {
    start: u32,
    end: u32,
    specs: Vec<Spec<'a>>,
    /// Comments after the last spec.
    footer: Vec<&'a str>,
}

/// Prune, dedupe, sort and group the imports of printed Go text.
///
/// Text without import declarations is returned unchanged. `path` only
/// labels errors and logs.
pub fn organize_imports(
    path: &Path,
    text: &str,
    options: &ImportOptions,
) -> Result<String, ImportError> {
    let lexed = tidy_lexer::lex_with_comments(text);
    if let Some(error) = lexed.errors.first() {
        return Err(ImportError::Lex {
            path: path.to_path_buf(),
            error: error.clone(),
        });
    }
    let tokens: Vec<Token> = lexed
        .tokens
        .iter()
        .copied()
        .filter(|token| token.kind != TokenKind::Semicolon)
        .collect();

    let Some((mut section, rest)) = find_section(path, text, &tokens)? else {
        return Ok(text.to_string());
    };
    if section.specs.iter().any(|spec| spec.path == "C") {
        debug!(path = %path.display(), "cgo import, leaving imports as written");
        return Ok(text.to_string());
    }
    attach_comments(text, &lexed, &mut section);

    let before = section.specs.len();
    if options.prune_unused {
        let used = qualifiers(text, tokens.get(rest..).unwrap_or_default());
        section.specs.retain(|spec| {
            let kept = spec.is_kept(&used);
            if !kept {
                trace!(path = spec.path, "unused import");
            }
            kept
        });
    }
    let mut seen = FxHashSet::default();
    section
        .specs
        .retain(|spec| seen.insert((spec.name, spec.path)));
    let local = &options.local_prefixes;
    section
        .specs
        .sort_by(|a, b| sort_key(a, local).cmp(&sort_key(b, local)));
    debug!(
        path = %path.display(),
        removed = before - section.specs.len(),
        kept = section.specs.len(),
        "organized imports"
    );

    let rendered = render(&section, &options.local_prefixes);
    let head = &text[..section.start as usize];
    let tail = &text[section.end as usize..];
    if rendered.is_empty() {
        let head = head.trim_end();
        let tail = tail.trim_start();
        return Ok(if tail.is_empty() {
            format!("{head}\n")
        } else {
            format!("{head}\n\n{tail}")
        });
    }
    Ok(format!("{head}{rendered}{tail}"))
}

/// Locate the import declarations following the package clause.
///
/// Returns the section and the index of the first token after it.
fn find_section<'a>(
    path: &Path,
    text: &'a str,
    tokens: &[Token],
) -> Result<Option<(Section<'a>, usize)>, ImportError> {
    let malformed = |span: Span| ImportError::Malformed {
        path: path.to_path_buf(),
        span,
    };
    let kind_at = |i: usize| tokens.get(i).map_or(TokenKind::Eof, |t| t.kind);
    let span_at = |i: usize| tokens.get(i).map_or(Span::DUMMY, |t| t.span);

    if kind_at(0) != TokenKind::Package || kind_at(1) != TokenKind::Ident {
        return Err(malformed(span_at(0)));
    }
    let mut i = 2;
    if kind_at(i) != TokenKind::Import {
        return Ok(None);
    }

    let start = span_at(i).start;
    let mut end = start;
    let mut specs = Vec::new();
    while kind_at(i) == TokenKind::Import {
        i += 1;
        if kind_at(i) == TokenKind::LParen {
            i += 1;
            while kind_at(i) != TokenKind::RParen {
                let spec = spec_at(text, tokens, &mut i).ok_or_else(|| malformed(span_at(i)))?;
                specs.push(spec);
            }
            end = span_at(i).end;
            i += 1;
        } else {
            let spec = spec_at(text, tokens, &mut i).ok_or_else(|| malformed(span_at(i)))?;
            end = spec.end;
            specs.push(spec);
        }
    }

    Ok(Some((
        Section {
            start,
            end,
            specs,
            footer: Vec::new(),
        },
        i,
    )))
}

/// `name "path"` at `*i`, advancing past it.
fn spec_at<'a>(text: &'a str, tokens: &[Token], i: &mut usize) -> Option<Spec<'a>> {
    let first = tokens.get(*i)?;
    let (name, path_token) = match first.kind {
        TokenKind::Ident | TokenKind::Dot => {
            *i += 1;
            (Some(first.span.slice(text)), tokens.get(*i)?)
        }
        _ => (None, first),
    };
    if !matches!(path_token.kind, TokenKind::String | TokenKind::RawString) {
        return None;
    }
    *i += 1;
    let literal = path_token.span.slice(text);
    Some(Spec {
        name,
        literal,
        path: literal.get(1..literal.len().saturating_sub(1)).unwrap_or(""),
        start: first.span.start,
        end: path_token.span.end,
        docs: Vec::new(),
        trailing: None,
    })
}

/// Hang every comment inside the section on the spec it belongs to.
///
/// A comment after a path on the same line trails that spec; any other
/// comment documents the next spec, or ends up in the footer. A comment
/// trailing the last declaration extends the section.
fn attach_comments<'a>(text: &'a str, lexed: &LexOutput, section: &mut Section<'a>) {
    let lines = LineTable::new(text);
    let end_line = lines.physical_line(section.end);
    for comment in lexed.comments.iter() {
        let span = comment.span;
        if span.start < section.start {
            continue;
        }
        let line = lines.physical_line(span.start);
        if span.start >= section.end && line != end_line {
            break;
        }
        let text = comment.text(text).trim_end();
        if let Some(spec) = section
            .specs
            .iter_mut()
            .rev()
            .find(|spec| spec.end <= span.start && lines.physical_line(spec.end) == line)
        {
            spec.trailing = Some(text);
        } else if let Some(spec) = section.specs.iter_mut().find(|spec| spec.start > span.start) {
            spec.docs.push(text);
        } else {
            section.footer.push(text);
        }
        section.end = section.end.max(span.end);
    }
}

fn sort_key<'s>(spec: &Spec<'s>, local: &[String]) -> (ImportGroup, &'s str, Option<&'s str>) {
    (classify(spec.path, local), spec.path, spec.name)
}

/// Identifiers used as `x.` qualifiers.
///
/// Selector chains only count their head: in `x.strings.Foo`, `strings` is a
/// field, not a package.
fn qualifiers<'a>(text: &'a str, tokens: &[Token]) -> FxHashSet<&'a str> {
    tokens
        .iter()
        .enumerate()
        .filter(|&(i, token)| {
            token.kind == TokenKind::Ident
                && tokens.get(i + 1).is_some_and(|next| next.kind == TokenKind::Dot)
                && !(i > 0 && tokens.get(i - 1).is_some_and(|prev| prev.kind == TokenKind::Dot))
        })
        .map(|(_, token)| token.span.slice(text))
        .collect()
}

fn render(section: &Section<'_>, local_prefixes: &[String]) -> String {
    let mut out = String::new();
    match section.specs.as_slice() {
        [] if section.footer.is_empty() => {}
        [spec] if spec.is_plain() && section.footer.is_empty() => {
            out.push_str("import ");
            push_spec(&mut out, spec);
        }
        specs => {
            out.push_str("import (\n");
            let mut previous = None;
            for spec in specs {
                let group = classify(spec.path, local_prefixes);
                if previous.is_some_and(|prev| prev != group) {
                    out.push('\n');
                }
                previous = Some(group);
                for doc in &spec.docs {
                    let _ = writeln!(out, "\t{doc}");
                }
                out.push('\t');
                push_spec(&mut out, spec);
                if let Some(comment) = spec.trailing {
                    out.push(' ');
                    out.push_str(comment);
                }
                out.push('\n');
            }
            for comment in &section.footer {
                let _ = writeln!(out, "\t{comment}");
            }
            out.push(')');
        }
    }
    out
}

fn push_spec(out: &mut String, spec: &Spec<'_>) {
    if let Some(name) = spec.name {
        out.push_str(name);
        out.push(' ');
    }
    out.push_str(spec.literal);
}
