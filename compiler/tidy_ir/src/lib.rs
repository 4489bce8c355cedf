//! Intermediate representation shared by the gotidy lexer, parser, and formatter.
//!
//! # Modules
//!
//! - [`span`]: byte-offset spans into one source file
//! - [`token`]: Go token kinds and the token list produced by the lexer
//! - [`comment`]: comments captured beside the token stream
//! - [`line_table`]: offset-to-line mapping with gap merging
//! - [`ast`]: the structural syntax tree
//! - [`visitor`]: read-only traversal of the tree

pub mod ast;
pub mod comment;
pub mod line_table;
pub mod span;
pub mod token;
pub mod visitor;

pub use comment::{Comment, CommentKind, CommentList};
pub use line_table::LineTable;
pub use span::Span;
pub use token::{Token, TokenFlags, TokenIdx, TokenKind, TokenList};
