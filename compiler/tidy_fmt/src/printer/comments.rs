//! Comment interleaving.
//!
//! Comments are handed out in source order: before a token is printed, every
//! comment starting ahead of it is taken from the queue and printed first.

use tidy_ir::{Comment, CommentList, Span};

/// Source-ordered comments not yet printed.
pub(super) struct CommentQueue<'a> {
    comments: &'a CommentList,
    /// Index of the first comment not yet taken.
    next: usize,
}

impl<'a> CommentQueue<'a> {
    pub(super) fn new(comments: &'a CommentList) -> Self {
        CommentQueue { comments, next: 0 }
    }

    /// Take the next comment if it starts before `pos`.
    pub(super) fn take_before(&mut self, pos: u32) -> Option<Comment> {
        let comment = *self.comments.as_slice().get(self.next)?;
        if comment.span.start >= pos {
            return None;
        }
        self.next += 1;
        Some(comment)
    }

    /// Whether any comment, printed or not, lies inside `span`.
    pub(super) fn any_within(&self, span: Span) -> bool {
        !self.comments.within(span).is_empty()
    }
}
