use super::*;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression. Entry to the precedence ladder:
    /// assignment → or → and → equality → comparison → term → factor →
    /// unary → call → primary.
    pub fn parse_expr(&mut self) -> Expr<'a> {
        self.parse_assignment_expr()
    }

    /// Right-associative: `a = b = 3` nests to the right. The left-hand side
    /// must reduce to a variable; anything else is reported and the
    /// already-parsed left expression is returned so parsing can continue.
    fn parse_assignment_expr(&mut self) -> Expr<'a> {
        let expr = self.parse_or_expr();

        if self.eat(TokenKind::Equal) {
            let equals = self.prev;
            let value = self.parse_assignment_expr();

            if let Expr::Variable(name) = expr {
                return Expr::Assign {
                    name,
                    value: Box::new(value),
                };
            }

            self.error_at(equals, "Invalid target assignment");
        }

        expr
    }

    // The four levels below bind a single optional right operand instead of
    // looping, so `a == b == c` parses `a == b` and leaves `== c` to the
    // caller. Only term and factor chain.

    fn parse_or_expr(&mut self) -> Expr<'a> {
        let mut expr = self.parse_and_expr();

        if self.eat(TokenKind::Or) {
            let op = self.prev;
            let right = self.parse_and_expr();
            expr = Expr::Logical {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        expr
    }

    fn parse_and_expr(&mut self) -> Expr<'a> {
        let mut expr = self.parse_equality_expr();

        if self.eat(TokenKind::And) {
            let op = self.prev;
            let right = self.parse_equality_expr();
            expr = Expr::Logical {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        expr
    }

    fn parse_equality_expr(&mut self) -> Expr<'a> {
        let mut expr = self.parse_comparison_expr();

        if self.eat_any(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let op = self.prev;
            let right = self.parse_comparison_expr();
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        expr
    }

    fn parse_comparison_expr(&mut self) -> Expr<'a> {
        let mut expr = self.parse_term_expr();

        if self.eat_any(&[
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
        ]) {
            let op = self.prev;
            let right = self.parse_term_expr();
            expr = Expr::Comparison {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        expr
    }

    fn parse_term_expr(&mut self) -> Expr<'a> {
        let mut expr = self.parse_factor_expr();

        // Left-associative chain.
        while self.eat_any(&[TokenKind::Minus, TokenKind::Plus]) {
            let op = self.prev;
            let right = self.parse_factor_expr();
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        expr
    }

    fn parse_factor_expr(&mut self) -> Expr<'a> {
        let mut expr = self.parse_unary_expr();

        while self.eat_any(&[TokenKind::Slash, TokenKind::Star]) {
            let op = self.prev;
            let right = self.parse_unary_expr();
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        expr
    }

    fn parse_unary_expr(&mut self) -> Expr<'a> {
        if self.eat_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let op = self.prev;
            let right = self.parse_unary_expr();
            return Expr::Unary {
                op,
                right: Box::new(right),
            };
        }
        self.parse_call_expr()
    }

    /// Chained calls like `f(1)(2)` fold left.
    fn parse_call_expr(&mut self) -> Expr<'a> {
        let mut expr = self.parse_primary_expr();

        while self.eat(TokenKind::LeftParen) {
            let mut arguments = Vec::new();
            if !self.check(TokenKind::RightParen) {
                loop {
                    arguments.push(self.parse_expr());
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }

            self.expect(TokenKind::RightParen, "Expect ')' after arguments.");
            let paren = self.prev;
            expr = Expr::Call {
                callee: Box::new(expr),
                paren,
                arguments,
            };
        }

        expr
    }

    /// Literals and variable references. Any other token is reported and
    /// replaced by a nil literal so the ladder can unwind without aborting.
    fn parse_primary_expr(&mut self) -> Expr<'a> {
        if self.eat(TokenKind::True) {
            Expr::Literal(Literal::Bool(true))
        } else if self.eat(TokenKind::False) {
            Expr::Literal(Literal::Bool(false))
        } else if self.eat(TokenKind::Number) {
            match self.prev.spelling.parse::<f64>() {
                Ok(value) => Expr::Literal(Literal::Number(value)),
                Err(_) => {
                    self.error_at_current("Invalid number literal.");
                    Expr::Literal(Literal::Nil)
                }
            }
        } else if self.eat(TokenKind::String) {
            // The scanner only produces String tokens with both quotes.
            let spelling = self.prev.spelling;
            Expr::Literal(Literal::String(&spelling[1..spelling.len() - 1]))
        } else if self.eat(TokenKind::Identifier) {
            Expr::Variable(self.prev)
        } else {
            self.error_at_current("Invalid literal token.");
            Expr::Literal(Literal::Nil)
        }
    }
}
