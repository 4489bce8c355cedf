//! Structural recursive-descent parser for Go.
//!
//! The parser recognizes exactly the structure the formatter relies on:
//! declarations, import specs, statements and block braces. Expressions and
//! types stay flat token runs with their brackets grouped (see
//! [`tidy_ir::ast::Segment`]). Besides the tree, parsing builds the
//! [`LineTable`] for the file.
//!
//! Parsing stops at the first error.

mod cursor;
mod error;
mod grammar;

use bitflags::bitflags;
use tidy_ir::ast::SourceFile;
use tidy_ir::{CommentKind, CommentList, LineTable, TokenKind, TokenList};
use tracing::debug;

pub use error::{ErrorContext, ParseError};

bitflags! {
    /// Parser options.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ParseMode: u8 {
        /// Keep comments in [`Parsed::comments`].
        const PARSE_COMMENTS = 1 << 0;
    }
}

/// A parsed file: its tree, tokens, comments, and line table.
#[derive(Clone, Debug)]
pub struct Parsed {
    pub file: SourceFile,
    pub tokens: TokenList,
    pub comments: CommentList,
    pub lines: LineTable,
}

/// Parse one Go source file.
pub fn parse(source: &str, mode: ParseMode) -> Result<Parsed, ParseError> {
    let lexed = tidy_lexer::lex_with_comments(source);
    if let Some(error) = lexed.errors.first() {
        debug!(%error, span = %error.span, "lex error");
        return Err(error.clone().into());
    }

    let mut lines = LineTable::new(source);
    for token in lexed.tokens.iter() {
        if token.kind == TokenKind::RawString && token.span.slice(source).contains('\n') {
            lines.mark_content(token.span);
        }
    }
    for comment in lexed.comments.iter() {
        if comment.kind == CommentKind::Block && comment.span.slice(source).contains('\n') {
            lines.mark_content(comment.span);
        }
    }

    let file = grammar::Parser::new(&lexed.tokens).parse_file()?;
    debug!(
        tokens = lexed.tokens.len(),
        comments = lexed.comments.len(),
        decls = file.decls.len(),
        "parsed file"
    );

    let comments = if mode.contains(ParseMode::PARSE_COMMENTS) {
        lexed.comments
    } else {
        CommentList::new()
    };
    Ok(Parsed {
        file,
        tokens: lexed.tokens,
        comments,
        lines,
    })
}
