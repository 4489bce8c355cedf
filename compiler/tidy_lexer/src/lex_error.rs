use tidy_ir::Span;

/// What went wrong while lexing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    #[default]
    #[error("invalid character")]
    InvalidCharacter,
    #[error("string literal not terminated")]
    UnterminatedString,
    #[error("rune literal not terminated")]
    UnterminatedRune,
    #[error("raw string literal not terminated")]
    UnterminatedRawString,
    #[error("comment not terminated")]
    UnterminatedBlockComment,
    #[error("source file exceeds 4 GiB")]
    SourceTooLarge,
}

/// A lexical error and where it occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    #[inline]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }
}
