//! Blocks and statements.

use tidy_ir::ast::{
    BlockStmt, CaseClause, ElseBranch, ForStmt, IfStmt, LabeledStmt, Segment, Stmt, SwitchStmt,
};
use tidy_ir::{Span, TokenKind};
use tidy_stack::ensure_sufficient_stack;

use super::segment::Mode;
use super::Parser;
use crate::error::{ErrorContext, ParseError};

impl Parser<'_> {
    /// `{ stmts }`.
    pub(crate) fn parse_block(&mut self) -> Result<BlockStmt, ParseError> {
        ensure_sufficient_stack(|| {
            self.in_context(ErrorContext::Block, |p| {
                let start = p.cursor.current_span().start;
                let lbrace = p.expect(TokenKind::LBrace)?;
                let mut stmts = Vec::new();
                loop {
                    while p.cursor.eat(TokenKind::Semicolon).is_some() {}
                    if p.cursor.check(TokenKind::RBrace) {
                        break;
                    }
                    if p.cursor.is_at_end() {
                        return Err(p.unclosed(lbrace));
                    }
                    let stmt = p.parse_stmt()?;
                    // A clause ends where the next one starts.
                    if !matches!(stmt, Stmt::Case(_)) {
                        p.expect_semi()?;
                    }
                    stmts.push(stmt);
                }
                let rbrace = p.cursor.advance();
                Ok(BlockStmt {
                    lbrace,
                    stmts,
                    rbrace,
                    span: p.span_from(start),
                })
            })
        })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::Switch | TokenKind::Select => self.parse_switch(),
            TokenKind::Case | TokenKind::Default => self.parse_case(),
            TokenKind::Ident if self.cursor.peek(1).kind == TokenKind::Colon => {
                self.parse_labeled()
            }
            _ => self.in_context(ErrorContext::Statement, |p| {
                let segment = p.parse_segment(Mode::Statement)?;
                if segment.is_empty() {
                    return Err(p.unexpected("statement"));
                }
                Ok(Stmt::Simple(segment))
            }),
        }
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.in_context(ErrorContext::IfStmt, |p| {
            let start = p.cursor.current_span().start;
            let keyword = p.cursor.advance();
            let header = p.parse_segment(Mode::Header)?;
            let body = p.parse_block()?;
            let else_branch = match p.cursor.eat(TokenKind::Else) {
                Some(keyword) => {
                    let stmt = match p.cursor.current_kind() {
                        TokenKind::If => p.parse_if()?,
                        TokenKind::LBrace => Stmt::Block(p.parse_block()?),
                        _ => return Err(p.unexpected("`if` or `{`")),
                    };
                    Some(ElseBranch {
                        keyword,
                        stmt: Box::new(stmt),
                    })
                }
                None => None,
            };
            Ok(Stmt::If(IfStmt {
                keyword,
                header,
                body,
                else_branch,
                span: p.span_from(start),
            }))
        })
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        self.in_context(ErrorContext::ForStmt, |p| {
            let start = p.cursor.current_span().start;
            let keyword = p.cursor.advance();
            let header = p.parse_segment(Mode::Header)?;
            let body = p.parse_block()?;
            Ok(Stmt::For(ForStmt {
                keyword,
                header,
                body,
                span: p.span_from(start),
            }))
        })
    }

    /// `switch` and `select`; the body is a block of case clauses.
    fn parse_switch(&mut self) -> Result<Stmt, ParseError> {
        self.in_context(ErrorContext::SwitchStmt, |p| {
            let start = p.cursor.current_span().start;
            let keyword = p.cursor.advance();
            let header = p.parse_segment(Mode::Header)?;
            let body = p.parse_block()?;
            Ok(Stmt::Switch(SwitchStmt {
                keyword,
                header,
                body,
                span: p.span_from(start),
            }))
        })
    }

    fn parse_case(&mut self) -> Result<Stmt, ParseError> {
        self.in_context(ErrorContext::CaseClause, |p| {
            let start = p.cursor.current_span().start;
            let is_default = p.cursor.check(TokenKind::Default);
            let keyword = p.cursor.advance();
            let header = if is_default {
                Segment {
                    parts: Vec::new(),
                    span: Span::point(p.cursor.current_span().start),
                }
            } else {
                p.parse_segment(Mode::CaseHeader)?
            };
            let colon = p.expect(TokenKind::Colon)?;

            let mut body = Vec::new();
            loop {
                while p.cursor.eat(TokenKind::Semicolon).is_some() {}
                if matches!(
                    p.cursor.current_kind(),
                    TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
                ) {
                    break;
                }
                body.push(p.parse_stmt()?);
                p.expect_semi()?;
            }

            Ok(Stmt::Case(CaseClause {
                keyword,
                header,
                colon,
                body,
                span: p.span_from(start),
            }))
        })
    }

    /// `label:` and the statement it labels, if any.
    fn parse_labeled(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span().start;
        let label = self.cursor.advance();
        let colon = self.cursor.advance();
        let stmt = match self.cursor.current_kind() {
            TokenKind::RBrace | TokenKind::Semicolon | TokenKind::Eof => None,
            _ => Some(Box::new(self.parse_stmt()?)),
        };
        Ok(Stmt::Labeled(LabeledStmt {
            label,
            colon,
            stmt,
            span: self.span_from(start),
        }))
    }
}
