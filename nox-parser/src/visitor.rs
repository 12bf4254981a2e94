//! Visitor pattern for AST nodes.
//!
//! Read-only consumers (the tree printer, future passes) override
//! `visit_expr`/`visit_stmt`; the `walk_*` functions perform the default
//! traversal with exhaustive matches, so a new node kind is a compile error
//! here rather than a silently skipped subtree.

use crate::ast::{Expr, Stmt};

pub trait Visitor<'ast>: Sized {
    fn visit_expr(&mut self, expr: &'ast Expr<'ast>) {
        walk_expr(self, expr);
    }
    fn visit_stmt(&mut self, stmt: &'ast Stmt<'ast>) {
        walk_stmt(self, stmt);
    }
}

pub fn walk_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast Expr<'ast>) {
    match expr {
        Expr::Literal(_) => {}
        Expr::Variable(_) => {}
        Expr::Grouping(inner) => visitor.visit_expr(inner),
        Expr::Unary { op: _, right } => visitor.visit_expr(right),
        Expr::Binary { op: _, left, right }
        | Expr::Logical { op: _, left, right }
        | Expr::Comparison { op: _, left, right } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::Assign { name: _, value } => visitor.visit_expr(value),
        Expr::Call {
            callee,
            paren: _,
            arguments,
        } => {
            visitor.visit_expr(callee);
            for argument in arguments {
                visitor.visit_expr(argument);
            }
        }
    }
}

pub fn walk_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast Stmt<'ast>) {
    /// Iteratively visit all statements in a `Vec<Stmt>`.
    macro_rules! visit_stmt_list {
        ($visitor: expr, $body: expr) => {
            for stmt in $body {
                Visitor::visit_stmt($visitor, stmt);
            }
        };
    }

    match stmt {
        Stmt::Expression(expr) => visitor.visit_expr(expr),
        Stmt::Print(expr) => visitor.visit_expr(expr),
        Stmt::Var {
            name: _,
            initializer,
        } => visitor.visit_expr(initializer),
        Stmt::Block(body) => visit_stmt_list!(visitor, body),
        Stmt::Function {
            name: _,
            parameters: _,
            body,
        } => visit_stmt_list!(visitor, body),
        Stmt::Return { keyword: _, value } => visitor.visit_expr(value),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_stmt(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_stmt(else_branch);
            }
        }
        Stmt::While { condition, body } => {
            visitor.visit_expr(condition);
            visitor.visit_stmt(body);
        }
    }
}
