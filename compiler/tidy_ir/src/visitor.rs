//! Read-only traversal of the syntax tree.
//!
//! Default `visit_*` methods call the matching `walk_*` function, which
//! visits the children. Override a `visit_*` method to act on a node and call
//! the `walk_*` function to keep descending.

use crate::ast::{
    BlockStmt, Decl, FuncDecl, FuncLit, GenDecl, ImportDecl, Part, Segment, SourceFile, Stmt,
};

pub trait Visitor<'ast> {
    fn visit_file(&mut self, file: &'ast SourceFile) {
        walk_file(self, file);
    }

    fn visit_decl(&mut self, decl: &'ast Decl) {
        walk_decl(self, decl);
    }

    /// Import declarations have no children worth descending into.
    fn visit_import_decl(&mut self, _decl: &'ast ImportDecl) {}

    fn visit_func_decl(&mut self, func: &'ast FuncDecl) {
        walk_func_decl(self, func);
    }

    fn visit_gen_decl(&mut self, decl: &'ast GenDecl) {
        self.visit_segment(&decl.body);
    }

    fn visit_block(&mut self, block: &'ast BlockStmt) {
        walk_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_segment(&mut self, segment: &'ast Segment) {
        walk_parts(self, &segment.parts);
    }

    fn visit_func_lit(&mut self, lit: &'ast FuncLit) {
        walk_func_lit(self, lit);
    }
}

pub fn walk_file<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, file: &'ast SourceFile) {
    for decl in &file.decls {
        visitor.visit_decl(decl);
    }
}

pub fn walk_decl<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, decl: &'ast Decl) {
    match decl {
        Decl::Import(import) => visitor.visit_import_decl(import),
        Decl::Func(func) => visitor.visit_func_decl(func),
        Decl::Gen(gen) => visitor.visit_gen_decl(gen),
    }
}

pub fn walk_func_decl<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, func: &'ast FuncDecl) {
    walk_parts(visitor, &func.signature);
    if let Some(body) = &func.body {
        visitor.visit_block(body);
    }
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, block: &'ast BlockStmt) {
    tidy_stack::ensure_sufficient_stack(|| {
        for stmt in &block.stmts {
            visitor.visit_stmt(stmt);
        }
    });
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast Stmt) {
    match stmt {
        Stmt::Simple(segment) => visitor.visit_segment(segment),
        Stmt::Block(block) => visitor.visit_block(block),
        Stmt::If(stmt) => {
            visitor.visit_segment(&stmt.header);
            visitor.visit_block(&stmt.body);
            if let Some(else_branch) = &stmt.else_branch {
                visitor.visit_stmt(&else_branch.stmt);
            }
        }
        Stmt::For(stmt) => {
            visitor.visit_segment(&stmt.header);
            visitor.visit_block(&stmt.body);
        }
        Stmt::Switch(stmt) => {
            visitor.visit_segment(&stmt.header);
            visitor.visit_block(&stmt.body);
        }
        Stmt::Case(clause) => {
            visitor.visit_segment(&clause.header);
            for stmt in &clause.body {
                visitor.visit_stmt(stmt);
            }
        }
        Stmt::Labeled(stmt) => {
            if let Some(inner) = &stmt.stmt {
                visitor.visit_stmt(inner);
            }
        }
    }
}

pub fn walk_parts<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, parts: &'ast [Part]) {
    for part in parts {
        match part {
            Part::Token(_) => {}
            Part::Group(group) => walk_parts(visitor, &group.parts),
            Part::FuncLit(lit) => visitor.visit_func_lit(lit),
        }
    }
}

pub fn walk_func_lit<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, lit: &'ast FuncLit) {
    walk_parts(visitor, &lit.signature);
    visitor.visit_block(&lit.body);
}
