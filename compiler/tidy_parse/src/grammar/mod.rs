//! Grammar rules, split by syntactic level.

mod decl;
mod segment;
mod stmt;

use tidy_ir::{Span, TokenIdx, TokenKind};

use crate::cursor::Cursor;
use crate::error::{ErrorContext, ParseError};

pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    context: Option<ErrorContext>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a tidy_ir::TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            context: None,
        }
    }

    /// Run `f` with `context` as the innermost "while parsing" context.
    fn in_context<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = self.context.replace(context);
        let result = f(self);
        self.context = saved;
        result
    }

    fn kind_of(&self, idx: TokenIdx) -> TokenKind {
        self.cursor
            .tokens()
            .get(idx.index())
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    fn span_of(&self, idx: TokenIdx) -> Span {
        self.cursor
            .tokens()
            .get(idx.index())
            .map_or(Span::DUMMY, |t| t.span)
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.cursor.prev_end().max(start))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<TokenIdx, ParseError> {
        match self.cursor.eat(kind) {
            Some(idx) => Ok(idx),
            None => Err(self.unexpected(&kind.to_string())),
        }
    }

    /// Consume a statement terminator.
    ///
    /// Go lets the terminator be omitted before a closing `)` or `}`.
    fn expect_semi(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat(TokenKind::Semicolon).is_some() {
            return Ok(());
        }
        match self.cursor.current_kind() {
            TokenKind::RParen | TokenKind::RBrace | TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("`;` or newline")),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.cursor.current();
        match token.kind {
            TokenKind::Eof => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                span: token.span,
                context: self.context,
            },
            _ => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: if token.is_implicit() {
                    "newline".to_string()
                } else {
                    token.kind.to_string()
                },
                span: token.span,
                context: self.context,
            },
        }
    }

    fn unclosed(&self, open: TokenIdx) -> ParseError {
        ParseError::UnclosedDelimiter {
            open: self.kind_of(open),
            open_span: self.span_of(open),
            span: self.cursor.current_span(),
        }
    }
}
