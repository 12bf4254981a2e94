//! Renders an AST to a parenthesized prefix form, one line per top-level
//! statement. Reads the tree through the visitor seam and never mutates it.

use nox_parser::ast::{Expr, Literal, Stmt};
use nox_parser::visitor::Visitor;

pub struct AstPrinter {
    out: String,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    /// Renders each statement of `program` on its own line.
    pub fn print(mut self, program: &[Stmt<'_>]) -> String {
        for stmt in program {
            self.visit_stmt(stmt);
            self.out.push('\n');
        }
        self.out
    }

    fn open(&mut self, head: &str) {
        self.out.push('(');
        self.out.push_str(head);
    }

    fn close(&mut self) {
        self.out.push(')');
    }

    fn space(&mut self) {
        self.out.push(' ');
    }

    fn operand<'ast>(&mut self, expr: &'ast Expr<'ast>) {
        self.space();
        self.visit_expr(expr);
    }
}

impl Default for AstPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl<'ast> Visitor<'ast> for AstPrinter {
    fn visit_expr(&mut self, expr: &'ast Expr<'ast>) {
        match expr {
            Expr::Literal(literal) => match literal {
                Literal::Nil => self.out.push_str("nil"),
                Literal::String(value) => self.out.push_str(value),
                Literal::Number(value) => self.out.push_str(&value.to_string()),
                Literal::Bool(value) => {
                    self.out.push_str(if *value { "true" } else { "false" })
                }
            },
            Expr::Variable(name) => self.out.push_str(name.spelling),
            Expr::Grouping(inner) => {
                self.open("group");
                self.operand(inner);
                self.close();
            }
            Expr::Unary { op, right } => {
                self.open(op.spelling);
                self.operand(right);
                self.close();
            }
            Expr::Binary { op, left, right }
            | Expr::Logical { op, left, right }
            | Expr::Comparison { op, left, right } => {
                self.open(op.spelling);
                self.operand(left);
                self.operand(right);
                self.close();
            }
            Expr::Assign { name, value } => {
                self.open("=");
                self.space();
                self.out.push_str(name.spelling);
                self.operand(value);
                self.close();
            }
            Expr::Call {
                callee,
                paren: _,
                arguments,
            } => {
                self.open("call");
                self.operand(callee);
                for argument in arguments {
                    self.operand(argument);
                }
                self.close();
            }
        }
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt<'ast>) {
        match stmt {
            Stmt::Expression(expr) => {
                self.open("expr");
                self.operand(expr);
                self.close();
            }
            Stmt::Print(expr) => {
                self.open("print");
                self.operand(expr);
                self.close();
            }
            Stmt::Var { name, initializer } => {
                self.open("var");
                self.space();
                self.out.push_str(name.spelling);
                self.operand(initializer);
                self.close();
            }
            Stmt::Block(body) => {
                self.open("block");
                for stmt in body {
                    self.space();
                    self.visit_stmt(stmt);
                }
                self.close();
            }
            Stmt::Function {
                name,
                parameters,
                body,
            } => {
                self.open("fun");
                self.space();
                self.out.push_str(name.spelling);
                self.space();
                self.out.push('(');
                for (i, parameter) in parameters.iter().enumerate() {
                    if i > 0 {
                        self.space();
                    }
                    self.out.push_str(parameter.spelling);
                }
                self.out.push(')');
                for stmt in body {
                    self.space();
                    self.visit_stmt(stmt);
                }
                self.close();
            }
            Stmt::Return { keyword: _, value } => {
                self.open("return");
                self.operand(value);
                self.close();
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.open("if");
                self.operand(condition);
                self.space();
                self.visit_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.space();
                    self.visit_stmt(else_branch);
                }
                self.close();
            }
            Stmt::While { condition, body } => {
                self.open("while");
                self.operand(condition);
                self.space();
                self.visit_stmt(body);
                self.close();
            }
        }
    }
}
