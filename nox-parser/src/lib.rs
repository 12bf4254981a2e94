//! Lexer, AST and recursive descent parser for the Nox language.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod visitor;
