//! Canonical rendering of a parsed file.
//!
//! The printer walks the tree and writes every token and comment in source
//! order. It never measures width. Its only inputs are:
//!
//! - **Vertical spacing** from the [`LineTable`]: two consecutive items `d`
//!   logical lines apart are separated by nothing (`d = 0`), a newline
//!   (`d = 1`) or one blank line (`d >= 2`). Structural boundaries force at
//!   least one newline.
//! - **Indentation** from nesting: tabs, one per enclosing block; continuation
//!   lines one past the line that opened the innermost group.
//! - **Horizontal spacing** from the source: one space between two items on
//!   the same line iff the source had any whitespace between them.
//!
//! Merges applied to the line table before printing therefore show up as
//! removed blank lines, without the text or the tree being touched.

mod comments;

use tidy_ir::ast::{
    BlockStmt, Decl, FuncLit, Group, IfStmt, ImportDecl, ImportSpec, Part, SourceFile, Stmt,
};
use tidy_ir::{Comment, CommentKind, LineTable, TokenIdx, TokenList};
use tidy_parse::Parsed;

use crate::emitter::{Emitter, StringEmitter};
use comments::CommentQueue;

/// Render `parsed`, the parse of `source`, in canonical layout.
pub fn print_file(source: &str, parsed: &Parsed) -> String {
    let mut printer = Printer::new(source, parsed);
    printer.file(&parsed.file);
    printer.finish()
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum ItemKind {
    Token,
    LineComment,
    BlockComment,
}

/// The most recently printed item.
#[derive(Copy, Clone, Debug)]
struct Last {
    end: u32,
    /// Logical line of `end`.
    line: u32,
    kind: ItemKind,
}

/// An open bracket whose contents are being printed.
#[derive(Copy, Clone, Debug)]
enum Frame {
    /// Statements reset continuation indentation to their own level.
    Block,
    Group { content: usize },
}

/// Space before the next token if it stays on the current line.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Spacing {
    /// As in the source.
    Source,
    Always,
    Never,
}

/// Whether a block may stay on one line.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum BlockStyle {
    /// Function body: one simple statement written on one line stays there.
    FuncBody,
    /// Statement body: always expanded unless empty.
    Stmt,
}

struct Printer<'a> {
    source: &'a str,
    tokens: &'a TokenList,
    lines: &'a LineTable,
    comments: CommentQueue<'a>,
    out: StringEmitter,
    last: Option<Last>,
    frames: Vec<Frame>,
    /// Indentation of the statement being printed.
    stmt_indent: usize,
    /// Indentation of the current output line.
    line_indent: usize,
    /// Indentation for the next token if it starts a line.
    next_indent: Option<usize>,
    /// The next item must start a new line.
    force_break: bool,
    spacing: Spacing,
}

impl<'a> Printer<'a> {
    fn new(source: &'a str, parsed: &'a Parsed) -> Self {
        Printer {
            source,
            tokens: &parsed.tokens,
            lines: &parsed.lines,
            comments: CommentQueue::new(&parsed.comments),
            out: StringEmitter::with_capacity(source.len() + source.len() / 8),
            last: None,
            frames: Vec::new(),
            stmt_indent: 0,
            line_indent: 0,
            next_indent: None,
            force_break: false,
            spacing: Spacing::Source,
        }
    }

    fn finish(mut self) -> String {
        self.out.trim_trailing_blank_lines();
        self.out.ensure_trailing_newline();
        self.out.output()
    }

    // Items

    /// Separate the item starting at `start` from the previous one.
    fn place(&mut self, start: u32, kind: ItemKind) {
        let Some(last) = self.last else {
            return;
        };
        let d = self.lines.line(start).saturating_sub(last.line) as usize;
        let after_line_comment = last.kind == ItemKind::LineComment;
        // A comment on the line of the previous item trails it and leaves any
        // pending break to the next item.
        let trailing = kind != ItemKind::Token && d == 0 && !after_line_comment;
        let min = usize::from(!trailing && (self.force_break || after_line_comment));
        let newlines = d.clamp(min, 2);

        if newlines == 0 {
            let spacing = if kind == ItemKind::Token {
                self.spacing
            } else {
                Spacing::Source
            };
            let space = match spacing {
                Spacing::Source => self
                    .source
                    .get(last.end as usize..start as usize)
                    .is_some_and(|gap| !gap.is_empty()),
                Spacing::Always => true,
                Spacing::Never => false,
            };
            if space {
                self.out.emit_space();
            }
        } else {
            for _ in 0..newlines {
                self.out.emit_newline();
            }
            let indent = self
                .next_indent
                .unwrap_or_else(|| self.continuation_indent());
            self.out.emit_indent(indent);
            self.line_indent = indent;
        }

        if !trailing {
            self.force_break = false;
        }
        if kind == ItemKind::Token {
            self.spacing = Spacing::Source;
        }
    }

    fn continuation_indent(&self) -> usize {
        match self.frames.last() {
            Some(Frame::Group { content }) => *content,
            Some(Frame::Block) | None => self.stmt_indent + 1,
        }
    }

    fn token(&mut self, idx: TokenIdx) {
        let token = self.tokens[idx];
        if token.is_implicit() {
            return;
        }
        let span = token.span;
        self.flush_comments(span.start);
        self.place(span.start, ItemKind::Token);
        self.next_indent = None;
        self.write(span.slice(self.source));
        self.last = Some(Last {
            end: span.end,
            line: self.lines.line(span.end),
            kind: ItemKind::Token,
        });
    }

    fn flush_comments(&mut self, before: u32) {
        while let Some(comment) = self.comments.take_before(before) {
            self.comment(comment);
        }
    }

    fn comment(&mut self, comment: Comment) {
        let (kind, text) = match comment.kind {
            CommentKind::Line => (ItemKind::LineComment, comment.text(self.source).trim_end()),
            CommentKind::Block => (ItemKind::BlockComment, comment.text(self.source)),
        };
        self.place(comment.span.start, kind);
        self.write(text);
        self.last = Some(Last {
            end: comment.span.end,
            line: self.lines.line(comment.span.end),
            kind,
        });
    }

    /// Multi-line raw strings and block comments are written as they are,
    /// apart from CRLF line ends.
    fn write(&mut self, text: &str) {
        if text.contains('\r') {
            self.out.emit(&text.replace("\r\n", "\n"));
        } else {
            self.out.emit(text);
        }
    }

    fn begin_stmt(&mut self, indent: usize) {
        self.stmt_indent = indent;
        self.next_indent = Some(indent);
    }

    // Declarations

    fn file(&mut self, file: &SourceFile) {
        self.begin_stmt(0);
        self.token(file.package.keyword);
        self.token(file.package.name);
        for decl in &file.decls {
            self.force_break = true;
            self.begin_stmt(0);
            self.decl(decl);
        }
        self.next_indent = Some(0);
        self.flush_comments(u32::MAX);
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Import(import) => self.import_decl(import),
            Decl::Func(func) => {
                self.token(func.keyword);
                self.parts(&func.signature);
                if let Some(body) = &func.body {
                    self.block(body, BlockStyle::FuncBody, 0);
                }
            }
            Decl::Gen(decl) => {
                self.token(decl.keyword);
                self.parts(&decl.body.parts);
            }
        }
    }

    fn import_decl(&mut self, decl: &ImportDecl) {
        self.token(decl.keyword);
        let (Some(lparen), Some(rparen)) = (decl.lparen, decl.rparen) else {
            for spec in &decl.specs {
                self.import_spec(spec);
            }
            return;
        };

        self.token(lparen);
        let open = self.line_indent;
        self.frames.push(Frame::Group { content: open + 1 });
        for spec in &decl.specs {
            self.force_break = true;
            self.next_indent = Some(open + 1);
            self.import_spec(spec);
        }
        self.close_group(rparen, open, !decl.specs.is_empty());
    }

    fn import_spec(&mut self, spec: &ImportSpec) {
        if let Some(name) = spec.name {
            self.token(name);
        }
        self.token(spec.path);
    }

    // Statements

    /// Print a block whose contents sit one level past `base`.
    fn block(&mut self, block: &BlockStmt, style: BlockStyle, base: usize) {
        tidy_stack::ensure_sufficient_stack(|| self.block_contents(block, style, base));
    }

    fn block_contents(&mut self, block: &BlockStmt, style: BlockStyle, base: usize) {
        let open = self.tokens[block.lbrace].span;
        let close = self.tokens[block.rbrace].span;
        let one_line = self
            .source
            .get(open.start as usize..close.end as usize)
            .is_some_and(|text| !text.contains('\n'));
        let compact = one_line && !self.comments.any_within(block.span);

        self.token(block.lbrace);
        if compact && block.stmts.is_empty() {
            self.spacing = Spacing::Never;
            self.token(block.rbrace);
            return;
        }

        let saved = self.stmt_indent;
        self.frames.push(Frame::Block);
        let content = base + 1;
        if compact && style == BlockStyle::FuncBody && fits_on_line(block) {
            for stmt in &block.stmts {
                self.spacing = Spacing::Always;
                self.stmt(stmt, content);
            }
            self.frames.pop();
            self.stmt_indent = saved;
            self.spacing = Spacing::Always;
            self.token(block.rbrace);
            return;
        }

        for stmt in &block.stmts {
            self.force_break = true;
            self.stmt(stmt, content);
        }
        self.next_indent = Some(content);
        self.flush_comments(close.start);
        self.frames.pop();
        self.stmt_indent = saved;
        self.force_break = true;
        self.next_indent = Some(base);
        self.token(block.rbrace);
    }

    fn stmt(&mut self, stmt: &Stmt, indent: usize) {
        match stmt {
            Stmt::Simple(segment) => {
                self.begin_stmt(indent);
                self.parts(&segment.parts);
            }
            Stmt::Block(block) => {
                self.begin_stmt(indent);
                self.block(block, BlockStyle::Stmt, indent);
            }
            Stmt::If(stmt) => {
                self.begin_stmt(indent);
                self.if_stmt(stmt);
            }
            Stmt::For(stmt) => {
                self.begin_stmt(indent);
                self.token(stmt.keyword);
                self.parts(&stmt.header.parts);
                self.block(&stmt.body, BlockStyle::Stmt, indent);
            }
            Stmt::Switch(stmt) => {
                self.begin_stmt(indent);
                self.token(stmt.keyword);
                self.parts(&stmt.header.parts);
                self.block(&stmt.body, BlockStyle::Stmt, indent);
            }
            Stmt::Case(clause) => {
                // Clauses line up with their switch.
                self.begin_stmt(indent.saturating_sub(1));
                self.token(clause.keyword);
                self.parts(&clause.header.parts);
                self.token(clause.colon);
                for stmt in &clause.body {
                    self.force_break = true;
                    self.stmt(stmt, indent);
                }
            }
            Stmt::Labeled(labeled) => {
                self.begin_stmt(indent.saturating_sub(1));
                self.token(labeled.label);
                self.token(labeled.colon);
                if let Some(inner) = &labeled.stmt {
                    self.force_break = true;
                    self.stmt(inner, indent);
                }
            }
        }
    }

    fn if_stmt(&mut self, stmt: &IfStmt) {
        let indent = self.stmt_indent;
        self.token(stmt.keyword);
        self.parts(&stmt.header.parts);
        self.block(&stmt.body, BlockStyle::Stmt, indent);
        let Some(else_branch) = &stmt.else_branch else {
            return;
        };
        self.token(else_branch.keyword);
        match else_branch.stmt.as_ref() {
            Stmt::If(chained) => self.if_stmt(chained),
            Stmt::Block(block) => self.block(block, BlockStyle::Stmt, indent),
            other => self.stmt(other, indent),
        }
    }

    // Segments

    fn parts(&mut self, parts: &[Part]) {
        for part in parts {
            match part {
                Part::Token(idx) => self.token(*idx),
                Part::Group(group) => self.group(group),
                Part::FuncLit(lit) => self.func_lit(lit),
            }
        }
    }

    fn group(&mut self, group: &Group) {
        tidy_stack::ensure_sufficient_stack(|| {
            self.token(group.open);
            let open = self.line_indent;
            self.frames.push(Frame::Group { content: open + 1 });
            self.parts(&group.parts);
            self.close_group(group.close, open, false);
        });
    }

    /// Print the closer of the innermost group frame.
    ///
    /// Comments ahead of the closer still belong to the contents.
    fn close_group(&mut self, close: TokenIdx, open_indent: usize, force_break: bool) {
        self.next_indent = None;
        self.flush_comments(self.tokens[close].span.start);
        self.frames.pop();
        self.force_break = force_break;
        self.next_indent = Some(open_indent);
        self.token(close);
    }

    fn func_lit(&mut self, lit: &FuncLit) {
        self.token(lit.keyword);
        // The body is indented from the line `func` starts on, wherever the
        // signature wraps.
        let base = self.line_indent;
        self.parts(&lit.signature);
        self.block(&lit.body, BlockStyle::FuncBody, base);
    }
}

/// One simple statement whose function literals fit on one line too.
fn fits_on_line(block: &BlockStmt) -> bool {
    match block.stmts.as_slice() {
        [Stmt::Simple(segment)] => parts_fit_on_line(&segment.parts),
        _ => false,
    }
}

fn parts_fit_on_line(parts: &[Part]) -> bool {
    parts.iter().all(|part| match part {
        Part::Token(_) => true,
        Part::Group(group) => parts_fit_on_line(&group.parts),
        Part::FuncLit(lit) => lit.body.stmts.is_empty() || fits_on_line(&lit.body),
    })
}

#[cfg(test)]
mod tests;
