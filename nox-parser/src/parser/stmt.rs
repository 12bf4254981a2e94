use super::*;

impl<'a> Parser<'a> {
    /// Parses a declaration (or statement).
    pub fn parse_declaration(&mut self) -> Stmt<'a> {
        if self.eat(TokenKind::Var) {
            self.parse_var_declaration()
        } else if self.eat(TokenKind::Fun) {
            self.parse_fun_declaration()
        } else {
            self.parse_stmt()
        }
    }

    /// Parses a statement, dispatching on the leading keyword and defaulting
    /// to an expression statement.
    pub fn parse_stmt(&mut self) -> Stmt<'a> {
        if self.eat(TokenKind::Print) {
            self.parse_print_stmt()
        } else if self.eat(TokenKind::LeftBrace) {
            self.parse_block_stmt()
        } else if self.eat(TokenKind::Return) {
            self.parse_return_stmt()
        } else if self.eat(TokenKind::For) {
            self.parse_for_stmt()
        } else if self.eat(TokenKind::If) {
            self.parse_if_stmt()
        } else if self.eat(TokenKind::While) {
            self.parse_while_stmt()
        } else {
            self.parse_expression_stmt()
        }
    }

    fn parse_var_declaration(&mut self) -> Stmt<'a> {
        self.expect(TokenKind::Identifier, "Expect a variable name.");
        let name = self.prev;

        let mut initializer = Expr::Literal(Literal::Nil);
        if self.eat(TokenKind::Equal) {
            initializer = self.parse_expr();
        }
        self.expect(
            TokenKind::Semicolon,
            "Expect a ';' after variable declaration.",
        );

        Stmt::Var { name, initializer }
    }

    fn parse_fun_declaration(&mut self) -> Stmt<'a> {
        self.expect(TokenKind::Identifier, "Expect a function name.");
        let name = self.prev;

        self.expect(TokenKind::LeftParen, "Expect '(' after function name.");

        let mut parameters = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                self.expect(TokenKind::Identifier, "Expect parameter name.");
                parameters.push(self.prev);

                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(
            TokenKind::RightParen,
            "Expect ')' after function parameters.",
        );
        self.expect(TokenKind::LeftBrace, "Expect '{' before function body.");

        let body = self.parse_block_body();
        Stmt::Function {
            name,
            parameters,
            body,
        }
    }

    fn parse_print_stmt(&mut self) -> Stmt<'a> {
        let expr = self.parse_expr();
        self.expect(TokenKind::Semicolon, "Expect ';' after print.");
        Stmt::Print(expr)
    }

    /// Called with the `{` already eaten.
    fn parse_block_stmt(&mut self) -> Stmt<'a> {
        Stmt::Block(self.parse_block_body())
    }

    fn parse_block_body(&mut self) -> Vec<Stmt<'a>> {
        let mut statements = Vec::new();
        while !(self.is_at_end() || self.check(TokenKind::RightBrace)) {
            statements.push(self.parse_declaration());
        }
        self.expect(TokenKind::RightBrace, "Expect '}' after block.");
        statements
    }

    fn parse_expression_stmt(&mut self) -> Stmt<'a> {
        let expr = self.parse_expr();
        self.expect(TokenKind::Semicolon, "Expect ';' after statement.");
        Stmt::Expression(expr)
    }

    fn parse_return_stmt(&mut self) -> Stmt<'a> {
        // Keep the return token for error reporting; a missing value is nil.
        let keyword = self.prev;
        let mut value = Expr::Literal(Literal::Nil);
        if !self.check(TokenKind::Semicolon) {
            value = self.parse_expr();
        }
        self.expect(TokenKind::Semicolon, "Expect ';' after return value.");
        Stmt::Return { keyword, value }
    }

    fn parse_if_stmt(&mut self) -> Stmt<'a> {
        self.expect(TokenKind::LeftParen, "Expect '(' after 'if'.");
        let condition = self.parse_expr();
        self.expect(TokenKind::RightParen, "Expect ')' after 'if' condition.");

        let then_branch = Box::new(self.parse_stmt());

        let mut else_branch = None;
        if self.eat(TokenKind::Else) {
            else_branch = Some(Box::new(self.parse_stmt()));
        }

        Stmt::If {
            condition,
            then_branch,
            else_branch,
        }
    }

    fn parse_while_stmt(&mut self) -> Stmt<'a> {
        self.expect(TokenKind::LeftParen, "Expect '(' after 'while'");
        let condition = self.parse_expr();
        self.expect(TokenKind::RightParen, "Expect ')' after 'while' condition");

        let body = Box::new(self.parse_stmt());
        Stmt::While { condition, body }
    }

    /// `for` is rewritten in terms of `while` at parse time: the initializer
    /// and the loop wrap into blocks, and a missing condition becomes a
    /// literal `true`. No `for` node survives parsing.
    fn parse_for_stmt(&mut self) -> Stmt<'a> {
        self.expect(TokenKind::LeftParen, "Expect '(' after 'for'.");

        let initializer = if self.eat(TokenKind::Var) {
            Some(self.parse_var_declaration())
        } else if self.eat(TokenKind::Semicolon) {
            // Empty initializer.
            None
        } else {
            Some(self.parse_expression_stmt())
        };

        let mut condition = None;
        if !self.check(TokenKind::Semicolon) {
            condition = Some(self.parse_expr());
        }
        self.expect(TokenKind::Semicolon, "Expect ';' after condition");

        let mut increment = None;
        if !self.check(TokenKind::RightParen) {
            increment = Some(Stmt::Expression(self.parse_expr()));
        }
        self.expect(TokenKind::RightParen, "Expect ')' after 'for' condition.");

        let mut body = self.parse_stmt();

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, increment]);
        }

        let condition = condition.unwrap_or(Expr::Literal(Literal::Bool(true)));
        body = Stmt::While {
            condition,
            body: Box::new(body),
        };

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, spelling: &'static str) -> Token<'static> {
        Token::new(spelling, kind, 1)
    }

    fn number(value: f64) -> Expr<'static> {
        Expr::Literal(Literal::Number(value))
    }

    fn variable(name: &'static str) -> Expr<'static> {
        Expr::Variable(token(TokenKind::Identifier, name))
    }

    /// Parses a whole program, asserting no diagnostics.
    fn check_program(source: &str, expected: Vec<Stmt<'static>>) {
        let source = Source::new(source);
        let mut parser = Parser::new(&source);
        let program = parser.parse();
        assert!(source.has_no_errors(), "errors: {}", source.errors);
        assert_eq!(program, expected);
    }

    #[test]
    fn var_declaration() {
        check_program(
            "var x = 1;",
            vec![Stmt::Var {
                name: token(TokenKind::Identifier, "x"),
                initializer: number(1.0),
            }],
        );
    }

    #[test]
    fn var_declaration_defaults_to_nil() {
        check_program(
            "var x;",
            vec![Stmt::Var {
                name: token(TokenKind::Identifier, "x"),
                initializer: Expr::Literal(Literal::Nil),
            }],
        );
    }

    #[test]
    fn print_stmt() {
        check_program("print x;", vec![Stmt::Print(variable("x"))]);
    }

    #[test]
    fn block_stmt() {
        check_program(
            "{ var x; print x; }",
            vec![Stmt::Block(vec![
                Stmt::Var {
                    name: token(TokenKind::Identifier, "x"),
                    initializer: Expr::Literal(Literal::Nil),
                },
                Stmt::Print(variable("x")),
            ])],
        );
    }

    #[test]
    fn unterminated_block_is_reported() {
        let source = Source::new("{ print 1;");
        let mut parser = Parser::new(&source);
        let program = parser.parse();
        assert_eq!(program.len(), 1);
        assert!(parser.had_errors());
        assert_eq!(
            source.errors.to_string(),
            "[line 0] Error at end: Expect '}' after block.\n"
        );
    }

    #[test]
    fn fun_declaration() {
        check_program(
            "fun add(a, b) { return a + b; }",
            vec![Stmt::Function {
                name: token(TokenKind::Identifier, "add"),
                parameters: vec![
                    token(TokenKind::Identifier, "a"),
                    token(TokenKind::Identifier, "b"),
                ],
                body: vec![Stmt::Return {
                    keyword: token(TokenKind::Return, "return"),
                    value: Expr::Binary {
                        op: token(TokenKind::Plus, "+"),
                        left: Box::new(variable("a")),
                        right: Box::new(variable("b")),
                    },
                }],
            }],
        );
    }

    #[test]
    fn return_without_value_defaults_to_nil() {
        check_program(
            "fun noop() { return; }",
            vec![Stmt::Function {
                name: token(TokenKind::Identifier, "noop"),
                parameters: vec![],
                body: vec![Stmt::Return {
                    keyword: token(TokenKind::Return, "return"),
                    value: Expr::Literal(Literal::Nil),
                }],
            }],
        );
    }

    #[test]
    fn if_else_stmt() {
        check_program(
            "if (c) print 1; else print 2;",
            vec![Stmt::If {
                condition: variable("c"),
                then_branch: Box::new(Stmt::Print(number(1.0))),
                else_branch: Some(Box::new(Stmt::Print(number(2.0)))),
            }],
        );
    }

    #[test]
    fn while_stmt() {
        check_program(
            "while (c) print 1;",
            vec![Stmt::While {
                condition: variable("c"),
                body: Box::new(Stmt::Print(number(1.0))),
            }],
        );
    }

    #[test]
    fn for_desugars_to_block_and_while() {
        check_program(
            "for (var i = 0; i < 3; i = i + 1) print i;",
            vec![Stmt::Block(vec![
                Stmt::Var {
                    name: token(TokenKind::Identifier, "i"),
                    initializer: number(0.0),
                },
                Stmt::While {
                    condition: Expr::Comparison {
                        op: token(TokenKind::Less, "<"),
                        left: Box::new(variable("i")),
                        right: Box::new(number(3.0)),
                    },
                    body: Box::new(Stmt::Block(vec![
                        Stmt::Print(variable("i")),
                        Stmt::Expression(Expr::Assign {
                            name: token(TokenKind::Identifier, "i"),
                            value: Box::new(Expr::Binary {
                                op: token(TokenKind::Plus, "+"),
                                left: Box::new(variable("i")),
                                right: Box::new(number(1.0)),
                            }),
                        }),
                    ])),
                },
            ])],
        );
    }

    #[test]
    fn for_without_clauses_defaults_condition_to_true() {
        check_program(
            "for (;;) print 1;",
            vec![Stmt::While {
                condition: Expr::Literal(Literal::Bool(true)),
                body: Box::new(Stmt::Print(number(1.0))),
            }],
        );
    }

    #[test]
    fn for_with_expression_initializer() {
        check_program(
            "for (i = 0; i < 1;) print i;",
            vec![Stmt::Block(vec![
                Stmt::Expression(Expr::Assign {
                    name: token(TokenKind::Identifier, "i"),
                    value: Box::new(number(0.0)),
                }),
                Stmt::While {
                    condition: Expr::Comparison {
                        op: token(TokenKind::Less, "<"),
                        left: Box::new(variable("i")),
                        right: Box::new(number(1.0)),
                    },
                    body: Box::new(Stmt::Print(variable("i"))),
                },
            ])],
        );
    }

    #[test]
    fn invalid_program_still_yields_a_tree() {
        let source = Source::new("1 + ;");
        let mut parser = Parser::new(&source);
        let program = parser.parse();
        assert_eq!(
            program,
            vec![Stmt::Expression(Expr::Binary {
                op: token(TokenKind::Plus, "+"),
                left: Box::new(number(1.0)),
                right: Box::new(Expr::Literal(Literal::Nil)),
            })]
        );
        assert!(parser.had_errors());
        assert_eq!(source.errors.len(), 1);
    }

    #[test]
    fn panic_mode_recovers_at_statement_boundaries() {
        // One diagnostic per malformed construct; the parse continues.
        let source = Source::new("var ; print 1; var ;");
        let mut parser = Parser::new(&source);
        let program = parser.parse();
        assert_eq!(program.len(), 3);
        assert!(matches!(program[1], Stmt::Print(_)));
        assert!(parser.had_errors());
        assert_eq!(
            source.errors.to_string(),
            "[line 1] Error at ;: Expect a variable name.\n\
             [line 1] Error at ;: Expect a variable name.\n"
        );
    }

    #[test]
    fn lexical_error_token_trips_the_parser_once() {
        let source = Source::new("var x = @;");
        let mut parser = Parser::new(&source);
        let program = parser.parse();
        assert_eq!(program.len(), 1);
        assert!(parser.had_errors());
        // The diagnostic is anchored to the Error token, which carries no
        // source spelling.
        assert_eq!(
            source.errors.to_string(),
            "[line 1] Error: Invalid literal token.\n"
        );
    }

    #[test]
    fn parser_does_not_stall_on_junk() {
        let source = Source::new("1; )");
        let mut parser = Parser::new(&source);
        let program = parser.parse();
        assert!(parser.had_errors());
        assert_eq!(program.len(), 2);
    }
}
