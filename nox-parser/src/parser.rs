//! Recursive descent parser with a single token of lookahead.
//!
//! Parsing never aborts: diagnostics go through [`Parser::error_at`], which is
//! suppressed while `panic_mode` is set, and missing expressions are replaced
//! by nil literals so one pass still yields a best-effort tree.

use crate::ast::{Expr, Literal, Stmt};
use crate::lexer::{Lexer, Token, TokenKind};
use nox_source::{Source, SyntaxError};

mod expr;
mod stmt;

pub struct Parser<'a> {
    current: Token<'a>,
    prev: Token<'a>,
    lexer: Lexer<'a>,
    /// Source code
    source: &'a Source<'a>,
    /// Sticky; set by the first diagnostic and never cleared.
    had_error: bool,
    /// Suppresses cascading diagnostics until the next synchronization point.
    panic_mode: bool,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        let mut lexer = Lexer::new(source.content);
        let current = lexer.next_token();
        Self {
            current,
            prev: Token::default(),
            lexer,
            source,
            had_error: false,
            panic_mode: false,
        }
    }

    /// Parses the whole token stream into a forest of statements.
    ///
    /// Does not stop early on error: as many diagnostics as possible are
    /// collected in one pass.
    pub fn parse(&mut self) -> Vec<Stmt<'a>> {
        let mut program = Vec::new();
        while !self.is_at_end() {
            program.push(self.parse_declaration());
            if self.panic_mode {
                self.synchronize();
            }
        }
        program
    }

    /// Whether any diagnostic was recorded. Gates downstream passes.
    pub fn had_errors(&self) -> bool {
        self.had_error
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    fn next(&mut self) {
        self.prev = self.current;
        // The lexer yields Eof forever once exhausted, but tracking the token
        // stream end here keeps the cursor contract honest.
        self.current = if self.lexer.is_at_end() {
            Token::end_of_file()
        } else {
            self.lexer.next_token()
        };
    }

    fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Eats the current token and returns `true` if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.next();
            true
        } else {
            false
        }
    }

    /// [`Self::eat`] over several kinds; eats at most one token.
    fn eat_any(&mut self, kinds: &[TokenKind]) -> bool {
        for &kind in kinds {
            if self.check(kind) {
                self.next();
                return true;
            }
        }
        false
    }

    /// Eats the current token if it has the given kind, otherwise reports
    /// `message` at the current token without advancing.
    fn expect(&mut self, kind: TokenKind, message: &str) {
        if self.check(kind) {
            self.next();
        } else {
            self.error_at_current(message);
        }
    }

    fn error_at_current(&mut self, message: &str) {
        let token = self.current;
        self.error_at(token, message);
    }

    /// Records a diagnostic anchored to `token`, unless one was already
    /// recorded since the last synchronization point.
    fn error_at(&mut self, token: Token<'a>, message: &str) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;
        self.had_error = true;

        let error = match token.kind {
            TokenKind::Eof => SyntaxError::at_end(message, token.line),
            // An Error token's spelling is a lexer message, not source text.
            TokenKind::Error => SyntaxError::new(message, token.line),
            _ => SyntaxError::at_token(message, token.spelling, token.line),
        };
        self.source.errors.add_error(error);
    }

    /// Skips to a statement boundary and leaves panic mode.
    ///
    /// A boundary is a `;` (consumed) or a keyword the statement grammar
    /// dispatches on. Keywords with no production (`class`, `this`, `super`)
    /// are skipped like any other token, otherwise the parse loop could stall
    /// on them.
    fn synchronize(&mut self) {
        self.panic_mode = false;

        loop {
            match self.current.kind {
                TokenKind::Semicolon => {
                    self.next();
                    return;
                }
                TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return
                | TokenKind::Eof => return,
                _ => self.next(),
            }
        }
    }
}
