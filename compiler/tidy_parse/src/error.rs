//! Parse error types.
//!
//! Every error carries the span it points at. Errors raised inside a
//! grammar rule also carry an [`ErrorContext`] for "while parsing X"
//! messages.

use tidy_ir::{Span, TokenKind};
use tidy_lexer::LexError;

/// What the parser was working on when an error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    PackageClause,
    ImportDecl,
    FuncDecl,
    GenDecl,
    Signature,
    Block,
    Statement,
    IfStmt,
    ForStmt,
    SwitchStmt,
    CaseClause,
    FuncLit,
    Expression,
}

impl ErrorContext {
    /// Phrase suitable for "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            Self::PackageClause => "the package clause",
            Self::ImportDecl => "an import declaration",
            Self::FuncDecl => "a function declaration",
            Self::GenDecl => "a declaration",
            Self::Signature => "a function signature",
            Self::Block => "a block",
            Self::Statement => "a statement",
            Self::IfStmt => "an if statement",
            Self::ForStmt => "a for statement",
            Self::SwitchStmt => "a switch statement",
            Self::CaseClause => "a case clause",
            Self::FuncLit => "a function literal",
            Self::Expression => "an expression",
        }
    }
}

#[allow(
    clippy::ref_option,
    reason = "thiserror format arguments borrow the field"
)]
fn while_parsing(context: &Option<ErrorContext>) -> String {
    context.map_or_else(String::new, |ctx| {
        format!(" while parsing {}", ctx.description())
    })
}

/// A source file that could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}{}", while_parsing(.context))]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
        context: Option<ErrorContext>,
    },

    #[error("unexpected end of file, expected {expected}{}", while_parsing(.context))]
    UnexpectedEof {
        expected: String,
        span: Span,
        context: Option<ErrorContext>,
    },

    #[error("unclosed {open}")]
    UnclosedDelimiter {
        open: TokenKind,
        open_span: Span,
        span: Span,
    },

    #[error("missing package clause")]
    MissingPackage { span: Span },
}

impl ParseError {
    /// Primary location of the error.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(error) => error.span,
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::UnclosedDelimiter { span, .. }
            | ParseError::MissingPackage { span } => *span,
        }
    }

    /// Secondary location worth pointing at, with a label.
    pub fn related(&self) -> Option<(Span, &'static str)> {
        match self {
            ParseError::UnclosedDelimiter { open_span, .. } => {
                Some((*open_span, "unclosed delimiter opened here"))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_mention_context() {
        let err = ParseError::UnexpectedToken {
            expected: "`{`".to_string(),
            found: "newline".to_string(),
            span: Span::new(3, 4),
            context: Some(ErrorContext::IfStmt),
        };
        assert_eq!(
            err.to_string(),
            "expected `{`, found newline while parsing an if statement"
        );
        assert_eq!(err.span(), Span::new(3, 4));
    }

    #[test]
    fn messages_without_context() {
        let err = ParseError::UnexpectedEof {
            expected: "`}`".to_string(),
            span: Span::point(9),
            context: None,
        };
        assert_eq!(err.to_string(), "unexpected end of file, expected `}`");
    }

    #[test]
    fn unclosed_delimiter_points_back_at_opener() {
        let err = ParseError::UnclosedDelimiter {
            open: TokenKind::LParen,
            open_span: Span::new(1, 2),
            span: Span::point(10),
        };
        assert_eq!(err.to_string(), "unclosed `(`");
        assert_eq!(err.related().map(|r| r.0), Some(Span::new(1, 2)));
    }
}
