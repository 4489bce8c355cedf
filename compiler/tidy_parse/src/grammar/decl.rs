//! Package clause and top-level declarations.

use tidy_ir::ast::{Decl, FuncDecl, GenDecl, ImportDecl, ImportSpec, PackageClause, SourceFile};
use tidy_ir::TokenKind;
use tracing::trace;

use super::segment::Mode;
use super::Parser;
use crate::error::{ErrorContext, ParseError};

impl Parser<'_> {
    pub(crate) fn parse_file(&mut self) -> Result<SourceFile, ParseError> {
        let package = self.parse_package()?;
        self.expect_semi()?;

        let mut decls = Vec::new();
        loop {
            while self.cursor.eat(TokenKind::Semicolon).is_some() {}
            if self.cursor.is_at_end() {
                break;
            }
            let decl = match self.cursor.current_kind() {
                TokenKind::Import => Decl::Import(self.parse_import_decl()?),
                TokenKind::Func => Decl::Func(self.parse_func_decl()?),
                TokenKind::Var | TokenKind::Const | TokenKind::Type => {
                    Decl::Gen(self.parse_gen_decl()?)
                }
                _ => return Err(self.unexpected("declaration")),
            };
            trace!(span = %decl.span(), "declaration");
            decls.push(decl);
            self.expect_semi()?;
        }

        Ok(SourceFile {
            package,
            decls,
            span: self.span_from(0),
        })
    }

    fn parse_package(&mut self) -> Result<PackageClause, ParseError> {
        if !self.cursor.check(TokenKind::Package) {
            return Err(ParseError::MissingPackage {
                span: self.cursor.current_span(),
            });
        }
        self.in_context(ErrorContext::PackageClause, |p| {
            let start = p.cursor.current_span().start;
            let keyword = p.cursor.advance();
            let name = p.expect(TokenKind::Ident)?;
            Ok(PackageClause {
                keyword,
                name,
                span: p.span_from(start),
            })
        })
    }

    fn parse_import_decl(&mut self) -> Result<ImportDecl, ParseError> {
        self.in_context(ErrorContext::ImportDecl, |p| {
            let start = p.cursor.current_span().start;
            let keyword = p.cursor.advance();

            let Some(lparen) = p.cursor.eat(TokenKind::LParen) else {
                let spec = p.parse_import_spec()?;
                return Ok(ImportDecl {
                    keyword,
                    lparen: None,
                    specs: vec![spec],
                    rparen: None,
                    span: p.span_from(start),
                });
            };

            let mut specs = Vec::new();
            loop {
                while p.cursor.eat(TokenKind::Semicolon).is_some() {}
                if p.cursor.check(TokenKind::RParen) {
                    break;
                }
                if p.cursor.is_at_end() {
                    return Err(p.unclosed(lparen));
                }
                specs.push(p.parse_import_spec()?);
                p.expect_semi()?;
            }
            let rparen = p.cursor.advance();

            Ok(ImportDecl {
                keyword,
                lparen: Some(lparen),
                specs,
                rparen: Some(rparen),
                span: p.span_from(start),
            })
        })
    }

    fn parse_import_spec(&mut self) -> Result<ImportSpec, ParseError> {
        let start = self.cursor.current_span().start;
        let name = match self.cursor.current_kind() {
            TokenKind::Ident | TokenKind::Dot => Some(self.cursor.advance()),
            _ => None,
        };
        let path = match self.cursor.current_kind() {
            TokenKind::String | TokenKind::RawString => self.cursor.advance(),
            _ => return Err(self.unexpected("import path")),
        };
        Ok(ImportSpec {
            name,
            path,
            span: self.span_from(start),
        })
    }

    fn parse_func_decl(&mut self) -> Result<FuncDecl, ParseError> {
        self.in_context(ErrorContext::FuncDecl, |p| {
            let start = p.cursor.current_span().start;
            let keyword = p.cursor.advance();
            let signature = p.in_context(ErrorContext::Signature, |p| {
                let parts = p.parse_parts(Mode::Signature)?;
                if parts.is_empty() {
                    return Err(p.unexpected("function name"));
                }
                Ok(parts)
            })?;
            let body = if p.cursor.check(TokenKind::LBrace) {
                Some(p.parse_block()?)
            } else {
                None
            };
            Ok(FuncDecl {
                keyword,
                signature,
                body,
                span: p.span_from(start),
            })
        })
    }

    fn parse_gen_decl(&mut self) -> Result<GenDecl, ParseError> {
        self.in_context(ErrorContext::GenDecl, |p| {
            let start = p.cursor.current_span().start;
            let keyword = p.cursor.advance();
            let body = p.parse_segment(Mode::Statement)?;
            if body.is_empty() {
                return Err(p.unexpected("declaration body"));
            }
            Ok(GenDecl {
                keyword,
                body,
                span: p.span_from(start),
            })
        })
    }
}
