//! Blank-line normalization by line-table merges.
//!
//! Nothing here edits text or tree. The tree yields [`Anchor`]s, offsets
//! whose surrounding gap should hold no blank line, and each anchor becomes
//! one [`LineTable::merge_line`] call. Because merges commute, the anchors
//! can be applied in any order.

use tidy_ir::ast::{BlockStmt, ImportDecl, SourceFile};
use tidy_ir::visitor::{self, Visitor};
use tidy_ir::{LineTable, TokenList};
use tidy_parse::Parsed;

/// A tree-derived position whose neighboring line gap gets merged.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Anchor {
    /// Merge the logical line containing the offset with the next one.
    LineOf(u32),
    /// Merge the logical line before the one containing the offset.
    LineBefore(u32),
}

impl Anchor {
    /// Logical line to pass to [`LineTable::merge_line`].
    pub fn resolve(self, lines: &LineTable) -> u32 {
        match self {
            Anchor::LineOf(offset) => lines.line(offset),
            Anchor::LineBefore(offset) => lines.line(offset).saturating_sub(1),
        }
    }
}

/// Every anchor in the file: block interiors and grouped import specs.
pub fn collect_anchors(file: &SourceFile, tokens: &TokenList, lines: &LineTable) -> Vec<Anchor> {
    AnchorCollector::new(tokens, lines, true).collect(file)
}

/// Anchors that remove blank lines directly inside one block's braces.
///
/// A block whose braces share a line has no interior gap and yields none.
pub fn block_anchors(block: &BlockStmt, tokens: &TokenList, lines: &LineTable) -> [Option<Anchor>; 2] {
    let open = tokens[block.lbrace].span;
    let close = tokens[block.rbrace].span;
    if lines.line(open.start) >= lines.line(close.start) {
        return [None, None];
    }
    [
        Some(Anchor::LineOf(open.start)),
        Some(Anchor::LineBefore(close.end)),
    ]
}

/// Anchors that remove blank lines between the specs of a grouped import.
///
/// A spec on the line of the closing `)` has no gap after it; ungrouped
/// declarations yield nothing.
pub fn import_anchors(decl: &ImportDecl, tokens: &TokenList, lines: &LineTable) -> Vec<Anchor> {
    let (Some(_), Some(rparen)) = (decl.lparen, decl.rparen) else {
        return Vec::new();
    };
    let close_line = lines.line(tokens[rparen].span.start);
    decl.specs
        .iter()
        .filter(|spec| lines.line(spec.span.end) < close_line)
        .map(|spec| Anchor::LineOf(spec.span.end))
        .collect()
}

/// Apply anchors in the given order.
pub fn apply_anchors(lines: &mut LineTable, anchors: &[Anchor]) {
    for anchor in anchors {
        let line = anchor.resolve(lines);
        lines.merge_line(line);
    }
}

/// Remove blank lines after `{` and before `}` of every block in the file.
pub fn normalize_blank_lines(parsed: &mut Parsed) {
    let anchors = AnchorCollector::new(&parsed.tokens, &parsed.lines, false).collect(&parsed.file);
    apply_anchors(&mut parsed.lines, &anchors);
}

/// Remove blank lines between the specs of one grouped import declaration.
pub fn collapse_import_group(lines: &mut LineTable, tokens: &TokenList, decl: &ImportDecl) {
    let anchors = import_anchors(decl, tokens, lines);
    apply_anchors(lines, &anchors);
}

/// Both passes over a parsed file.
pub fn normalize(parsed: &mut Parsed) {
    let anchors = collect_anchors(&parsed.file, &parsed.tokens, &parsed.lines);
    apply_anchors(&mut parsed.lines, &anchors);
}

struct AnchorCollector<'a> {
    tokens: &'a TokenList,
    lines: &'a LineTable,
    imports: bool,
    anchors: Vec<Anchor>,
}

impl<'a> AnchorCollector<'a> {
    fn new(tokens: &'a TokenList, lines: &'a LineTable, imports: bool) -> Self {
        AnchorCollector {
            tokens,
            lines,
            imports,
            anchors: Vec::new(),
        }
    }

    fn collect(mut self, file: &SourceFile) -> Vec<Anchor> {
        self.visit_file(file);
        self.anchors
    }
}

impl<'ast> Visitor<'ast> for AnchorCollector<'_> {
    fn visit_import_decl(&mut self, decl: &'ast ImportDecl) {
        if self.imports {
            self.anchors
                .extend(import_anchors(decl, self.tokens, self.lines));
        }
    }

    fn visit_block(&mut self, block: &'ast BlockStmt) {
        self.anchors
            .extend(block_anchors(block, self.tokens, self.lines).into_iter().flatten());
        visitor::walk_block(self, block);
    }
}
