//! Structural syntax tree for Go source files.
//!
//! The tree records exactly the structure the formatter needs: declarations,
//! import specs, statements and block braces. Expressions, types and
//! declaration bodies are kept as [`Segment`]s, flat runs of tokens with
//! bracketed groups and function literals nested inside. Every node refers
//! back to the token list by [`TokenIdx`] and exposes its byte span.

use crate::{Span, TokenIdx};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub package: PackageClause,
    pub decls: Vec<Decl>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageClause {
    pub keyword: TokenIdx,
    pub name: TokenIdx,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decl {
    Import(ImportDecl),
    Func(FuncDecl),
    /// `var`, `const` or `type`.
    Gen(GenDecl),
}

impl Decl {
    pub fn span(&self) -> Span {
        match self {
            Decl::Import(decl) => decl.span,
            Decl::Func(decl) => decl.span,
            Decl::Gen(decl) => decl.span,
        }
    }
}

/// `import "fmt"` or `import ( ... )`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDecl {
    pub keyword: TokenIdx,
    pub lparen: Option<TokenIdx>,
    pub specs: Vec<ImportSpec>,
    pub rparen: Option<TokenIdx>,
    pub span: Span,
}

impl ImportDecl {
    /// Whether the specs are enclosed in parentheses.
    #[inline]
    pub fn is_grouped(&self) -> bool {
        self.lparen.is_some()
    }
}

/// `name "path"`; the name may be an identifier, `_` or `.`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSpec {
    pub name: Option<TokenIdx>,
    pub path: TokenIdx,
    pub span: Span,
}

/// `func (recv) Name[T any](params) results { body }`.
///
/// `signature` holds everything between `func` and the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuncDecl {
    pub keyword: TokenIdx,
    pub signature: Vec<Part>,
    pub body: Option<BlockStmt>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenDecl {
    pub keyword: TokenIdx,
    pub body: Segment,
    pub span: Span,
}

/// `{ stmts }`.
///
/// The bodies of `switch` and `select` are blocks whose statements are
/// [`Stmt::Case`] clauses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockStmt {
    pub lbrace: TokenIdx,
    pub stmts: Vec<Stmt>,
    pub rbrace: TokenIdx,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// Expressions, assignments, `return`, `go`, `defer`, `var` and the rest.
    Simple(Segment),
    Block(BlockStmt),
    If(IfStmt),
    For(ForStmt),
    /// `switch` and `select`.
    Switch(SwitchStmt),
    Case(CaseClause),
    Labeled(LabeledStmt),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Simple(segment) => segment.span,
            Stmt::Block(block) => block.span,
            Stmt::If(stmt) => stmt.span,
            Stmt::For(stmt) => stmt.span,
            Stmt::Switch(stmt) => stmt.span,
            Stmt::Case(clause) => clause.span,
            Stmt::Labeled(stmt) => stmt.span,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfStmt {
    pub keyword: TokenIdx,
    pub header: Segment,
    pub body: BlockStmt,
    pub else_branch: Option<ElseBranch>,
    pub span: Span,
}

/// `else if ...` or `else { ... }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElseBranch {
    pub keyword: TokenIdx,
    pub stmt: Box<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForStmt {
    pub keyword: TokenIdx,
    pub header: Segment,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchStmt {
    pub keyword: TokenIdx,
    pub header: Segment,
    pub body: BlockStmt,
    pub span: Span,
}

/// `case x, y:` or `default:` followed by its statements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseClause {
    pub keyword: TokenIdx,
    pub header: Segment,
    pub colon: TokenIdx,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `label:` optionally followed by the statement it labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledStmt {
    pub label: TokenIdx,
    pub colon: TokenIdx,
    pub stmt: Option<Box<Stmt>>,
    pub span: Span,
}

/// A run of tokens, groups and function literals.
///
/// An empty segment (a bare `for {` header) has a point span where it would
/// have started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub parts: Vec<Part>,
    pub span: Span,
}

impl Segment {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    Token(TokenIdx),
    Group(Group),
    FuncLit(FuncLit),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// `( ... )`
    Paren,
    /// `[ ... ]`
    Bracket,
    /// `{ ... }` of a composite literal.
    Composite,
    /// `{ ... }` of a `struct` or `interface` type.
    TypeBody,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub kind: GroupKind,
    pub open: TokenIdx,
    pub parts: Vec<Part>,
    pub close: TokenIdx,
    pub span: Span,
}

/// `func(params) results { body }` inside an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuncLit {
    pub keyword: TokenIdx,
    pub signature: Vec<Part>,
    pub body: BlockStmt,
    pub span: Span,
}
