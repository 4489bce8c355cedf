//! Comments captured beside the token stream.
//!
//! The lexer records comments separately so the parser never sees them; the
//! printer interleaves them back by position.

use crate::Span;

/// `// line` or `/* block */`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CommentKind {
    Line,
    Block,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Comment {
    /// Covers the whole comment including its markers, excluding the newline.
    pub span: Span,
    pub kind: CommentKind,
}

impl Comment {
    #[inline]
    pub fn new(span: Span, kind: CommentKind) -> Self {
        Comment { span, kind }
    }

    /// Comment text, with a trailing `\r` of a CRLF line comment removed.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        let text = self.span.slice(source);
        match self.kind {
            CommentKind::Line => text.trim_end_matches('\r'),
            CommentKind::Block => text,
        }
    }
}

/// Comments of one file in source order.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct CommentList {
    comments: Vec<Comment>,
}

impl CommentList {
    pub fn new() -> Self {
        CommentList {
            comments: Vec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Comment] {
        &self.comments
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter()
    }

    /// Comments lying entirely inside `span`.
    pub fn within(&self, span: Span) -> &[Comment] {
        let from = self.comments.partition_point(|c| c.span.start < span.start);
        let to = self.comments.partition_point(|c| c.span.end <= span.end);
        self.comments.get(from..to.max(from)).unwrap_or(&[])
    }
}
