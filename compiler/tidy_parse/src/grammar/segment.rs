//! Expression-level token runs: groups, function literals, and the rules
//! that decide where a run ends.

use tidy_ir::ast::{FuncLit, Group, GroupKind, Part, Segment};
use tidy_ir::{Span, TokenKind};
use tidy_stack::ensure_sufficient_stack;

use super::Parser;
use crate::error::{ErrorContext, ParseError};

/// Where a segment appears, which decides what ends it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum Mode {
    /// Simple statements and `var`/`const`/`type` bodies: end at `;` or `}`.
    Statement,
    /// `if`, `for`, `switch` headers: end at the body's `{`.
    Header,
    /// `case` expressions: end at `:`.
    CaseHeader,
    /// Function signatures: end at the body's `{` or at `;`.
    Signature,
}

impl Mode {
    fn terminator(self) -> &'static str {
        match self {
            Mode::Statement | Mode::Signature => "`;` or newline",
            Mode::Header => "`{`",
            Mode::CaseHeader => "`:`",
        }
    }
}

impl Parser<'_> {
    pub(super) fn parse_segment(&mut self, mode: Mode) -> Result<Segment, ParseError> {
        let start = self.cursor.current_span().start;
        let parts = self.parse_parts(mode)?;
        let span = if parts.is_empty() {
            Span::point(start)
        } else {
            self.span_from(start)
        };
        Ok(Segment { parts, span })
    }

    pub(super) fn parse_parts(&mut self, mode: Mode) -> Result<Vec<Part>, ParseError> {
        let mut parts = Vec::new();
        loop {
            let token = self.cursor.current();
            match token.kind {
                TokenKind::Eof => match mode {
                    Mode::Statement | Mode::Signature => break,
                    Mode::Header | Mode::CaseHeader => {
                        return Err(self.unexpected(mode.terminator()))
                    }
                },
                TokenKind::Semicolon => match mode {
                    Mode::Statement | Mode::Signature => break,
                    Mode::Header if !token.is_implicit() => {
                        parts.push(Part::Token(self.cursor.advance()));
                    }
                    Mode::Header | Mode::CaseHeader => {
                        return Err(self.unexpected(mode.terminator()))
                    }
                },
                TokenKind::RBrace => match mode {
                    Mode::Statement | Mode::Signature => break,
                    Mode::Header | Mode::CaseHeader => {
                        return Err(self.unexpected(mode.terminator()))
                    }
                },
                TokenKind::RParen | TokenKind::RBracket => {
                    return Err(self.unexpected(mode.terminator()));
                }
                TokenKind::Colon if mode == Mode::CaseHeader => break,
                TokenKind::LBrace => {
                    let kind = if self.follows_type_keyword(&parts) {
                        GroupKind::TypeBody
                    } else {
                        match mode {
                            Mode::Header if !self.composite_follows(&parts) => break,
                            Mode::Signature => break,
                            _ => GroupKind::Composite,
                        }
                    };
                    parts.push(Part::Group(self.parse_group(kind)?));
                }
                TokenKind::LParen => parts.push(Part::Group(self.parse_group(GroupKind::Paren)?)),
                TokenKind::LBracket => {
                    parts.push(Part::Group(self.parse_group(GroupKind::Bracket)?));
                }
                TokenKind::Func if mode != Mode::Signature && self.is_func_lit(&parts) => {
                    parts.push(Part::FuncLit(self.parse_func_lit()?));
                }
                _ => parts.push(Part::Token(self.cursor.advance())),
            }
        }
        Ok(parts)
    }

    /// A bracketed group, with the cursor on its opening delimiter.
    ///
    /// Line-break semicolons inside the group only separate fields or
    /// elements and are left out of the tree.
    fn parse_group(&mut self, kind: GroupKind) -> Result<Group, ParseError> {
        ensure_sufficient_stack(|| {
            let start = self.cursor.current_span().start;
            let open_kind = self.cursor.current_kind();
            let open = self.cursor.advance();
            let close_kind = open_kind.closing().unwrap_or(TokenKind::RParen);

            let mut parts = Vec::new();
            loop {
                let token = self.cursor.current();
                match token.kind {
                    k if k == close_kind => break,
                    TokenKind::Eof => return Err(self.unclosed(open)),
                    TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                        return Err(self.unexpected(&close_kind.to_string()));
                    }
                    TokenKind::Semicolon if token.is_implicit() => {
                        self.cursor.advance();
                    }
                    TokenKind::LBrace => {
                        let inner = if self.follows_type_keyword(&parts) {
                            GroupKind::TypeBody
                        } else {
                            GroupKind::Composite
                        };
                        parts.push(Part::Group(self.parse_group(inner)?));
                    }
                    TokenKind::LParen => {
                        parts.push(Part::Group(self.parse_group(GroupKind::Paren)?));
                    }
                    TokenKind::LBracket => {
                        parts.push(Part::Group(self.parse_group(GroupKind::Bracket)?));
                    }
                    TokenKind::Func if self.is_func_lit(&parts) => {
                        parts.push(Part::FuncLit(self.parse_func_lit()?));
                    }
                    _ => parts.push(Part::Token(self.cursor.advance())),
                }
            }
            let close = self.cursor.advance();

            Ok(Group {
                kind,
                open,
                parts,
                close,
                span: self.span_from(start),
            })
        })
    }

    fn parse_func_lit(&mut self) -> Result<FuncLit, ParseError> {
        self.in_context(ErrorContext::FuncLit, |p| {
            let start = p.cursor.current_span().start;
            let keyword = p.cursor.advance();
            let signature = p.parse_parts(Mode::Signature)?;
            let body = p.parse_block()?;
            Ok(FuncLit {
                keyword,
                signature,
                body,
                span: p.span_from(start),
            })
        })
    }

    /// Whether the `func` under the cursor starts a function literal rather
    /// than a function type.
    ///
    /// A `func` that is the element type of `[]`, `map[K]`, `chan` or a
    /// pointer is a type. Otherwise the signature is scanned: a `{` at the
    /// top level that does not open a `struct` or `interface` body is the
    /// literal's body, and anything that cannot continue a type ends the scan.
    fn is_func_lit(&self, parts: &[Part]) -> bool {
        if self.cursor.peek(1).kind != TokenKind::LParen {
            return false;
        }
        match parts.last() {
            Some(Part::Group(Group {
                kind: GroupKind::Bracket,
                ..
            })) => return false,
            Some(Part::Token(idx))
                if matches!(
                    self.kind_of(*idx),
                    TokenKind::Chan | TokenKind::Star | TokenKind::Ellipsis
                ) =>
            {
                return false
            }
            _ => {}
        }
        let mut depth = 0usize;
        let mut prev = TokenKind::Func;
        let mut offset = 1;
        loop {
            let kind = self.cursor.peek(offset).kind;
            match kind {
                TokenKind::Eof => return false,
                TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::LBrace if depth > 0 => depth += 1,
                TokenKind::LBrace => {
                    if matches!(prev, TokenKind::Struct | TokenKind::Interface) {
                        depth += 1;
                    } else {
                        return true;
                    }
                }
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                _ if depth > 0 => {}
                TokenKind::Ident
                | TokenKind::Dot
                | TokenKind::Star
                | TokenKind::Map
                | TokenKind::Chan
                | TokenKind::Arrow
                | TokenKind::Func
                | TokenKind::Struct
                | TokenKind::Interface => {}
                _ => return false,
            }
            prev = kind;
            offset += 1;
        }
    }

    fn follows_type_keyword(&self, parts: &[Part]) -> bool {
        matches!(
            parts.last(),
            Some(Part::Token(idx))
                if matches!(self.kind_of(*idx), TokenKind::Struct | TokenKind::Interface)
        )
    }

    /// Whether a `{` at the top level of a statement header opens a
    /// composite literal instead of the statement body.
    ///
    /// Only an array, slice, map or struct type directly before the brace
    /// makes it a literal: `range []int{1, 2} {`. A bare type name does not,
    /// and neither does an index expression such as `m[k] {`.
    fn composite_follows(&self, parts: &[Part]) -> bool {
        if matches!(
            parts.last(),
            Some(Part::Group(Group {
                kind: GroupKind::TypeBody,
                ..
            }))
        ) {
            return true;
        }

        let token_kind = |part: &Part| match part {
            Part::Token(idx) => Some(self.kind_of(*idx)),
            _ => None,
        };

        // Element type name, possibly qualified and behind pointers.
        let mut i = parts.len();
        while i > 0 && matches!(token_kind(&parts[i - 1]), Some(TokenKind::Ident | TokenKind::Dot)) {
            i -= 1;
        }
        if i == parts.len() {
            return false;
        }
        while i > 0 && token_kind(&parts[i - 1]) == Some(TokenKind::Star) {
            i -= 1;
        }

        // `[N]`, `[]` and `map[K]` prefixes.
        let mut saw_bracket = false;
        while i > 0 {
            match &parts[i - 1] {
                Part::Group(Group {
                    kind: GroupKind::Bracket,
                    ..
                }) => saw_bracket = true,
                part if token_kind(part) == Some(TokenKind::Map) => {}
                _ => break,
            }
            i -= 1;
        }

        saw_bracket && (i == 0 || !self.is_operand(&parts[i - 1]))
    }

    /// Whether `part` can end an operand, making a following `[` an index.
    fn is_operand(&self, part: &Part) -> bool {
        match part {
            Part::Token(idx) => {
                let kind = self.kind_of(*idx);
                kind == TokenKind::Ident || kind.is_literal()
            }
            Part::Group(_) | Part::FuncLit(_) => true,
        }
    }
}
