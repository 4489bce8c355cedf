use pretty_assertions::assert_eq;
use tidy_ir::{CommentKind, Span, TokenFlags, TokenKind};

use super::{lex, lex_with_comments, LexErrorKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn package_clause_gets_implicit_semicolon() {
    let out = lex("package main\n");
    let tokens = out.tokens.as_slice();
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Package,
            TokenKind::Ident,
            TokenKind::Semicolon,
            TokenKind::Eof
        ]
    );
    assert!(tokens[2].is_implicit());
    assert_eq!(tokens[2].span, Span::point(12));
}

#[test]
fn no_semicolon_after_operators_or_open_braces() {
    assert_eq!(
        kinds("x := a +\n\tb\n"),
        vec![
            TokenKind::Ident,
            TokenKind::Define,
            TokenKind::Ident,
            TokenKind::Plus,
            TokenKind::Ident,
            TokenKind::Semicolon,
            TokenKind::Eof
        ]
    );
    assert_eq!(
        kinds("{\n}\n"),
        vec![
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Semicolon,
            TokenKind::Eof
        ]
    );
}

#[test]
fn semicolon_after_return_and_increment() {
    assert_eq!(
        kinds("return\ni++\n"),
        vec![
            TokenKind::Return,
            TokenKind::Semicolon,
            TokenKind::Ident,
            TokenKind::Inc,
            TokenKind::Semicolon,
            TokenKind::Eof
        ]
    );
}

#[test]
fn semicolon_at_eof_without_newline() {
    let out = lex("x");
    assert_eq!(out.tokens.len(), 3);
    assert!(out.tokens.as_slice()[1].is_implicit());
}

#[test]
fn multi_line_block_comment_acts_as_newline() {
    let out = lex_with_comments("x /* a\nb */ y");
    assert_eq!(
        out.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Ident,
            TokenKind::Semicolon,
            TokenKind::Ident,
            TokenKind::Semicolon,
            TokenKind::Eof
        ]
    );
    assert_eq!(out.comments.len(), 1);
    assert_eq!(out.comments.as_slice()[0].kind, CommentKind::Block);
}

#[test]
fn comments_only_collected_on_request() {
    let src = "// doc\nvar x int // trailing\n";
    assert!(lex(src).comments.is_empty());
    let with = lex_with_comments(src);
    assert_eq!(with.comments.len(), 2);
    assert!(with
        .comments
        .iter()
        .all(|c| c.kind == CommentKind::Line));
    assert_eq!(with.comments.as_slice()[1].span.slice(src), "// trailing");
}

#[test]
fn literals() {
    assert_eq!(
        kinds("0x1F 1_000 0o17 0b101 1.5 .5 1e9 0x1p-2 2i 1.5i 'a' '\\n' \"s\\\"\" `r`"),
        vec![
            TokenKind::Int,
            TokenKind::Int,
            TokenKind::Int,
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::Float,
            TokenKind::Float,
            TokenKind::Float,
            TokenKind::Imag,
            TokenKind::Imag,
            TokenKind::Char,
            TokenKind::Char,
            TokenKind::String,
            TokenKind::RawString,
            TokenKind::Semicolon,
            TokenKind::Eof
        ]
    );
}

#[test]
fn raw_string_may_span_lines() {
    let src = "s := `a\n\nb`\n";
    let out = lex(src);
    let raw = out.tokens.as_slice()[2];
    assert_eq!(raw.kind, TokenKind::RawString);
    assert_eq!(raw.span.slice(src), "`a\n\nb`");
    assert!(!out.has_errors());
}

#[test]
fn unicode_identifiers_and_keywords() {
    assert_eq!(
        kinds("func héllo"),
        vec![
            TokenKind::Func,
            TokenKind::Ident,
            TokenKind::Semicolon,
            TokenKind::Eof
        ]
    );
    assert_eq!(kinds("funcs")[0], TokenKind::Ident);
}

#[test]
fn operators_prefer_longest_match() {
    assert_eq!(
        kinds("a &^= b <<= c <- d ... :="),
        vec![
            TokenKind::Ident,
            TokenKind::AmpCaretAssign,
            TokenKind::Ident,
            TokenKind::ShlAssign,
            TokenKind::Ident,
            TokenKind::Arrow,
            TokenKind::Ident,
            TokenKind::Ellipsis,
            TokenKind::Define,
            TokenKind::Eof
        ]
    );
}

#[test]
fn space_and_newline_flags() {
    let out = lex("a b\nc");
    let t = out.tokens.as_slice();
    assert!(!t[0].flags.contains(TokenFlags::SPACE_BEFORE));
    assert!(t[1].flags.contains(TokenFlags::SPACE_BEFORE));
    assert!(!t[1].flags.contains(TokenFlags::NEWLINE_BEFORE));
    // t[2] is the implicit semicolon after `b`.
    assert!(t[3].flags.contains(TokenFlags::NEWLINE_BEFORE));
}

#[test]
fn unterminated_literals_are_reported() {
    assert_eq!(
        lex("x := \"abc\ny").errors[0].kind,
        LexErrorKind::UnterminatedString
    );
    assert_eq!(lex("x := `abc").errors[0].kind, LexErrorKind::UnterminatedRawString);
    assert_eq!(lex("/* abc").errors[0].kind, LexErrorKind::UnterminatedBlockComment);
    assert_eq!(lex("'a").errors[0].kind, LexErrorKind::UnterminatedRune);
}

#[test]
fn invalid_character_is_reported_and_lexing_continues() {
    let out = lex("a @ b");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].kind, LexErrorKind::InvalidCharacter);
    assert_eq!(out.errors[0].span, Span::new(2, 3));
    assert_eq!(out.tokens.as_slice()[1].kind, TokenKind::Ident);
}
