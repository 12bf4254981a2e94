use crate::lexer::Token;

/// A literal value. Strings borrow the source buffer with the quotes
/// stripped.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal<'a> {
    Nil,
    String(&'a str),
    Number(f64),
    Bool(bool),
}

/// An expression node. Every child is owned exclusively, so an `Expr` is
/// always a finite tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Literal(Literal<'a>),
    /// A variable reference (e.g. `foo`).
    Variable(Token<'a>),
    /// A parenthesized expression. Part of the node model for consumers, but
    /// the expression grammar has no production for it.
    Grouping(Box<Expr<'a>>),
    /// A unary expression (e.g. `!ok`, `-x`).
    Unary {
        op: Token<'a>,
        right: Box<Expr<'a>>,
    },
    /// An arithmetic or equality expression (e.g. `1 + 1`).
    Binary {
        op: Token<'a>,
        left: Box<Expr<'a>>,
        right: Box<Expr<'a>>,
    },
    /// A short-circuiting `and`/`or` expression.
    Logical {
        op: Token<'a>,
        left: Box<Expr<'a>>,
        right: Box<Expr<'a>>,
    },
    /// A relational expression (`<`, `<=`, `>`, `>=`). Kept apart from
    /// [`Expr::Binary`] so consumers that type operands differently do not
    /// have to re-dispatch on the operator.
    Comparison {
        op: Token<'a>,
        left: Box<Expr<'a>>,
        right: Box<Expr<'a>>,
    },
    /// An assignment (e.g. `a = 1`).
    Assign {
        name: Token<'a>,
        value: Box<Expr<'a>>,
    },
    /// A call expression (e.g. `f(1)(2)`). `paren` is the closing parenthesis
    /// token, kept for later error reporting against the call site.
    Call {
        callee: Box<Expr<'a>>,
        paren: Token<'a>,
        arguments: Vec<Expr<'a>>,
    },
}

/// A statement node.
///
/// There is no `for` variant: the parser desugars `for` loops into a
/// [`Stmt::Block`] around a [`Stmt::While`] while parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt<'a> {
    Expression(Expr<'a>),
    Print(Expr<'a>),
    /// A `var` declaration. A missing initializer is a nil literal.
    Var {
        name: Token<'a>,
        initializer: Expr<'a>,
    },
    Block(Vec<Stmt<'a>>),
    /// A function declaration. `body` holds the statements of the body block.
    Function {
        name: Token<'a>,
        parameters: Vec<Token<'a>>,
        body: Vec<Stmt<'a>>,
    },
    /// A `return` statement. A missing value is a nil literal; `keyword` is
    /// kept for later error reporting.
    Return {
        keyword: Token<'a>,
        value: Expr<'a>,
    },
    If {
        condition: Expr<'a>,
        then_branch: Box<Stmt<'a>>,
        else_branch: Option<Box<Stmt<'a>>>,
    },
    While {
        condition: Expr<'a>,
        body: Box<Stmt<'a>>,
    },
}
