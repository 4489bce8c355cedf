//! Token cursor for navigating the token stream.

use tidy_ir::{Span, Token, TokenIdx, TokenKind, TokenList};
use tracing::trace;

/// Position in a token list that always ends in `Eof`.
///
/// Advancing past `Eof` is a no-op, so lookahead never runs off the end.
pub(crate) struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
    /// End of the last consumed token that appears in the text.
    prev_end: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens,
            pos: 0,
            prev_end: 0,
        }
    }

    #[inline]
    pub(crate) fn tokens(&self) -> &'a TokenList {
        self.tokens
    }

    #[inline]
    pub(crate) fn current(&self) -> Token {
        self.peek(0)
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub(crate) fn current_idx(&self) -> TokenIdx {
        TokenIdx(u32::try_from(self.pos).unwrap_or(u32::MAX))
    }

    /// Token `offset` places ahead, clamped to `Eof`.
    pub(crate) fn peek(&self, offset: usize) -> Token {
        let slice = self.tokens.as_slice();
        slice
            .get(self.pos + offset)
            .or_else(|| slice.last())
            .copied()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, Span::point(self.prev_end)))
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// End offset of the last consumed token written in the source.
    #[inline]
    pub(crate) fn prev_end(&self) -> u32 {
        self.prev_end
    }

    /// Consume the current token and return its index.
    pub(crate) fn advance(&mut self) -> TokenIdx {
        let idx = self.current_idx();
        let token = self.current();
        if token.kind != TokenKind::Eof {
            trace!(
                pos = self.pos,
                kind = %token.kind.display_name(),
                span_start = token.span.start,
                span_end = token.span.end,
                "advance"
            );
            self.pos += 1;
            if !token.is_implicit() {
                self.prev_end = token.span.end;
            }
        }
        idx
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<TokenIdx> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_stops_at_eof() {
        let out = tidy_lexer::lex("x");
        let mut cursor = Cursor::new(&out.tokens);
        assert_eq!(cursor.advance(), TokenIdx(0));
        assert!(cursor.current().is_implicit());
        cursor.advance();
        assert!(cursor.is_at_end());
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.prev_end(), 1);
    }

    #[test]
    fn peek_clamps_to_eof() {
        let out = tidy_lexer::lex("a b");
        let cursor = Cursor::new(&out.tokens);
        assert_eq!(cursor.peek(1).kind, TokenKind::Ident);
        assert_eq!(cursor.peek(50).kind, TokenKind::Eof);
    }
}
