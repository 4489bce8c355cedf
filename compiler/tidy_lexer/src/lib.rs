//! Lexer for Go source using logos.
//!
//! Produces a [`TokenList`] terminated by `Eof`, applying Go's automatic
//! semicolon insertion: a line break after an identifier, a literal, one of
//! `break continue fallthrough return`, or one of `++ -- ) ] }` becomes an
//! implicit `;`. A block comment spanning a line break counts as one.
//!
//! Lexing never stops early. Malformed input yields [`LexError`]s alongside
//! the best-effort token stream; callers decide whether to continue.

mod lex_error;

use logos::Logos;
use tidy_ir::{Comment, CommentKind, CommentList, Span, Token, TokenFlags, TokenKind, TokenList};

pub use lex_error::{LexError, LexErrorKind};

/// Tokens, comments and errors for one source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOutput {
    pub tokens: TokenList,
    /// Empty unless produced by [`lex_with_comments`].
    pub comments: CommentList,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r]+")]
enum RawToken {
    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[token("break")]
    Break,
    #[token("case")]
    Case,
    #[token("chan")]
    Chan,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("defer")]
    Defer,
    #[token("else")]
    Else,
    #[token("fallthrough")]
    Fallthrough,
    #[token("for")]
    For,
    #[token("func")]
    Func,
    #[token("go")]
    Go,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("import")]
    Import,
    #[token("interface")]
    Interface,
    #[token("map")]
    Map,
    #[token("package")]
    Package,
    #[token("range")]
    Range,
    #[token("return")]
    Return,
    #[token("select")]
    Select,
    #[token("struct")]
    Struct,
    #[token("switch")]
    Switch,
    #[token("type")]
    Type,
    #[token("var")]
    Var,

    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*|0[xX][0-9a-fA-F_]+|0[oO][0-7_]+|0[bB][01_]+")]
    Int,

    #[regex(r"([0-9][0-9_]*\.[0-9_]*|\.[0-9][0-9_]*)([eE][+-]?[0-9_]+)?|[0-9][0-9_]*[eE][+-]?[0-9_]+|0[xX][0-9a-fA-F_]*(\.[0-9a-fA-F_]*)?[pP][+-]?[0-9_]+")]
    Float,

    #[regex(r"([0-9][0-9_]*|0[xX][0-9a-fA-F_]+|0[oO][0-7_]+|0[bB][01_]+|([0-9][0-9_]*\.[0-9_]*|\.[0-9][0-9_]*)([eE][+-]?[0-9_]+)?|[0-9][0-9_]*[eE][+-]?[0-9_]+|0[xX][0-9a-fA-F_]*(\.[0-9a-fA-F_]*)?[pP][+-]?[0-9_]+)i")]
    Imag,

    #[token("'", rune)]
    Char,

    #[token("\"", interpreted_string)]
    String,

    #[token("`", raw_string)]
    RawString,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&^")]
    AmpCaret,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("&=")]
    AmpAssign,
    #[token("|=")]
    PipeAssign,
    #[token("^=")]
    CaretAssign,
    #[token("<<=")]
    ShlAssign,
    #[token(">>=")]
    ShrAssign,
    #[token("&^=")]
    AmpCaretAssign,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("<-")]
    Arrow,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("==")]
    EqEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Assign,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token(":=")]
    Define,
    #[token("...")]
    Ellipsis,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
}

fn block_comment(lex: &mut logos::Lexer<RawToken>) -> Result<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(())
        }
        None => {
            lex.bump(lex.remainder().len());
            Err(LexErrorKind::UnterminatedBlockComment)
        }
    }
}

fn raw_string(lex: &mut logos::Lexer<RawToken>) -> Result<(), LexErrorKind> {
    match lex.remainder().find('`') {
        Some(end) => {
            lex.bump(end + 1);
            Ok(())
        }
        None => {
            lex.bump(lex.remainder().len());
            Err(LexErrorKind::UnterminatedRawString)
        }
    }
}

fn interpreted_string(lex: &mut logos::Lexer<RawToken>) -> Result<(), LexErrorKind> {
    scan_quoted(lex, b'"', LexErrorKind::UnterminatedString)
}

fn rune(lex: &mut logos::Lexer<RawToken>) -> Result<(), LexErrorKind> {
    scan_quoted(lex, b'\'', LexErrorKind::UnterminatedRune)
}

/// Consume the rest of a quoted literal, honoring backslash escapes.
///
/// The literal may not cross a line break; an unterminated literal stops
/// before the newline so lexing resumes on the next line.
fn scan_quoted(
    lex: &mut logos::Lexer<RawToken>,
    quote: u8,
    unterminated: LexErrorKind,
) -> Result<(), LexErrorKind> {
    let bytes = lex.remainder().as_bytes();
    let mut i = 0;
    while let Some(&byte) = bytes.get(i) {
        match byte {
            b'\\' if bytes.get(i + 1).is_some_and(|&b| b != b'\n') => i += 2,
            b'\n' => break,
            b if b == quote => {
                lex.bump(i + 1);
                return Ok(());
            }
            _ => i += 1,
        }
    }
    lex.bump(i.min(bytes.len()));
    Err(unterminated)
}

/// Lex `source` without collecting comments.
pub fn lex(source: &str) -> LexOutput {
    Lexer::new(source, false).run()
}

/// Lex `source`, collecting comments into [`LexOutput::comments`].
pub fn lex_with_comments(source: &str) -> LexOutput {
    Lexer::new(source, true).run()
}

struct Lexer<'src> {
    source: &'src str,
    keep_comments: bool,
    output: LexOutput,
    /// End of the previous real token, for whitespace flags.
    prev_end: u32,
    /// Kind of the last pushed token, implicit semicolons included.
    last_kind: Option<TokenKind>,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str, keep_comments: bool) -> Self {
        Lexer {
            source,
            keep_comments,
            output: LexOutput {
                tokens: TokenList::with_capacity(source.len() / 4),
                ..LexOutput::default()
            },
            prev_end: 0,
            last_kind: None,
        }
    }

    fn run(mut self) -> LexOutput {
        let Ok(len) = u32::try_from(self.source.len()) else {
            self.output.errors.push(LexError::new(
                LexErrorKind::SourceTooLarge,
                Span::point(u32::MAX),
            ));
            return self.output;
        };

        let mut logos = RawToken::lexer(self.source);
        while let Some(result) = logos.next() {
            let span = to_span(logos.span());
            match result {
                Ok(RawToken::Newline) => self.insert_semicolon(span.start),
                Ok(RawToken::LineComment) => self.comment(span, CommentKind::Line),
                Ok(RawToken::BlockComment) => {
                    if span.slice(self.source).contains('\n') {
                        self.insert_semicolon(span.start);
                    }
                    self.comment(span, CommentKind::Block);
                }
                Ok(raw) => {
                    if let Some(kind) = convert(raw, span.slice(self.source)) {
                        self.push(kind, span);
                    }
                }
                Err(kind) => self.output.errors.push(LexError::new(kind, span)),
            }
        }

        self.insert_semicolon(len);
        let eof = Token::new(TokenKind::Eof, Span::point(len)).with_flags(self.flags_before(len));
        self.output.tokens.push(eof);
        self.output
    }

    fn push(&mut self, kind: TokenKind, span: Span) {
        let flags = self.flags_before(span.start);
        self.output.tokens.push(Token::new(kind, span).with_flags(flags));
        self.prev_end = span.end;
        self.last_kind = Some(kind);
    }

    fn comment(&mut self, span: Span, kind: CommentKind) {
        if self.keep_comments {
            self.output.comments.push(Comment::new(span, kind));
        }
    }

    /// Insert an implicit `;` at `offset` if the last token ends a statement.
    fn insert_semicolon(&mut self, offset: u32) {
        if self.last_kind.is_some_and(TokenKind::ends_statement) {
            let token = Token::new(TokenKind::Semicolon, Span::point(offset))
                .with_flags(TokenFlags::IMPLICIT);
            self.output.tokens.push(token);
            self.last_kind = Some(TokenKind::Semicolon);
        }
    }

    fn flags_before(&self, start: u32) -> TokenFlags {
        let gap = Span::new(self.prev_end, start).slice(self.source);
        let mut flags = TokenFlags::empty();
        if !gap.is_empty() {
            flags |= TokenFlags::SPACE_BEFORE;
        }
        if gap.contains('\n') {
            flags |= TokenFlags::NEWLINE_BEFORE;
        }
        flags
    }
}

fn to_span(range: std::ops::Range<usize>) -> Span {
    Span::new(
        u32::try_from(range.start).unwrap_or(u32::MAX),
        u32::try_from(range.end).unwrap_or(u32::MAX),
    )
}

/// Token kind for a non-trivia raw token.
fn convert(raw: RawToken, slice: &str) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::Ident => TokenKind::keyword(slice).unwrap_or(TokenKind::Ident),
        RawToken::Int => TokenKind::Int,
        RawToken::Float => TokenKind::Float,
        RawToken::Imag => TokenKind::Imag,
        RawToken::Char => TokenKind::Char,
        RawToken::String => TokenKind::String,
        RawToken::RawString => TokenKind::RawString,

        RawToken::Break => TokenKind::Break,
        RawToken::Case => TokenKind::Case,
        RawToken::Chan => TokenKind::Chan,
        RawToken::Const => TokenKind::Const,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Default => TokenKind::Default,
        RawToken::Defer => TokenKind::Defer,
        RawToken::Else => TokenKind::Else,
        RawToken::Fallthrough => TokenKind::Fallthrough,
        RawToken::For => TokenKind::For,
        RawToken::Func => TokenKind::Func,
        RawToken::Go => TokenKind::Go,
        RawToken::Goto => TokenKind::Goto,
        RawToken::If => TokenKind::If,
        RawToken::Import => TokenKind::Import,
        RawToken::Interface => TokenKind::Interface,
        RawToken::Map => TokenKind::Map,
        RawToken::Package => TokenKind::Package,
        RawToken::Range => TokenKind::Range,
        RawToken::Return => TokenKind::Return,
        RawToken::Select => TokenKind::Select,
        RawToken::Struct => TokenKind::Struct,
        RawToken::Switch => TokenKind::Switch,
        RawToken::Type => TokenKind::Type,
        RawToken::Var => TokenKind::Var,

        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
        RawToken::AmpCaret => TokenKind::AmpCaret,
        RawToken::PlusAssign => TokenKind::PlusAssign,
        RawToken::MinusAssign => TokenKind::MinusAssign,
        RawToken::StarAssign => TokenKind::StarAssign,
        RawToken::SlashAssign => TokenKind::SlashAssign,
        RawToken::PercentAssign => TokenKind::PercentAssign,
        RawToken::AmpAssign => TokenKind::AmpAssign,
        RawToken::PipeAssign => TokenKind::PipeAssign,
        RawToken::CaretAssign => TokenKind::CaretAssign,
        RawToken::ShlAssign => TokenKind::ShlAssign,
        RawToken::ShrAssign => TokenKind::ShrAssign,
        RawToken::AmpCaretAssign => TokenKind::AmpCaretAssign,
        RawToken::AndAnd => TokenKind::AndAnd,
        RawToken::OrOr => TokenKind::OrOr,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::Inc => TokenKind::Inc,
        RawToken::Dec => TokenKind::Dec,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Assign => TokenKind::Assign,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Define => TokenKind::Define,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,

        RawToken::Newline | RawToken::LineComment | RawToken::BlockComment => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests;
