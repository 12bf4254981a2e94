//! On-demand tokenizer.
//!
//! The lexer never fails: a bad character or an unterminated string is
//! reported as a [`TokenKind::Error`] token whose spelling is the diagnostic
//! message, and the parser trips over it like any other unexpected token.

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    String,
    Number,

    // Keywords.
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Error,
    Eof,
}

/// One lexical unit.
///
/// `spelling` is a view into the source buffer (or a static message for
/// `Error` tokens), so a `Token` must not outlive the buffer it was scanned
/// from. Copying is cheap: a view and two scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub spelling: &'a str,
    /// 1-based; 0 means unset.
    pub line: u32,
}

impl<'a> Token<'a> {
    pub fn new(spelling: &'a str, kind: TokenKind, line: u32) -> Self {
        Self {
            kind,
            spelling,
            line,
        }
    }

    /// The token the parser installs when the lexer cursor is already
    /// exhausted. Carries no position.
    pub fn end_of_file() -> Self {
        Self {
            kind: TokenKind::Eof,
            spelling: "",
            line: 0,
        }
    }
}

impl Default for Token<'_> {
    fn default() -> Self {
        Self {
            kind: TokenKind::Error,
            spelling: "",
            line: 0,
        }
    }
}

fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

/// Pull-based tokenizer over a borrowed source buffer.
///
/// The buffer must outlive the lexer and every token it produces. Once the
/// cursor reaches the end, [`Lexer::next_token`] keeps yielding `Eof`.
pub struct Lexer<'a> {
    text: &'a str,
    /// Start of the current token.
    start: usize,
    /// Current cursor index.
    current: usize,
    line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Whether the cursor has reached the end of the buffer. This is not the
    /// same as "the last token was `Eof`": trailing trivia leaves the cursor
    /// short of the end while the next pull still yields `Eof`.
    pub fn is_at_end(&self) -> bool {
        self.current == self.text.len()
    }

    /// Return the next token.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();
        self.start = self.current;

        if self.is_at_end() {
            return self.make_token(TokenKind::Eof);
        }

        let c = self.advance();

        if is_alpha(c) {
            return self.identifier();
        }
        if is_digit(c) {
            return self.number();
        }

        match c {
            b'(' => self.make_token(TokenKind::LeftParen),
            b')' => self.make_token(TokenKind::RightParen),
            b'{' => self.make_token(TokenKind::LeftBrace),
            b'}' => self.make_token(TokenKind::RightBrace),
            b';' => self.make_token(TokenKind::Semicolon),
            b',' => self.make_token(TokenKind::Comma),
            b'.' => self.make_token(TokenKind::Dot),
            b'-' => self.make_token(TokenKind::Minus),
            b'+' => self.make_token(TokenKind::Plus),
            b'/' => self.make_token(TokenKind::Slash),
            b'*' => self.make_token(TokenKind::Star),

            b'!' => {
                let kind = if self.match_byte(b'=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                };
                self.make_token(kind)
            }
            b'=' => {
                let kind = if self.match_byte(b'=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                self.make_token(kind)
            }
            b'<' => {
                let kind = if self.match_byte(b'=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.make_token(kind)
            }
            b'>' => {
                let kind = if self.match_byte(b'=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.make_token(kind)
            }

            b'"' => self.string(),

            _ => self.error_token("Unexpected character."),
        }
    }

    fn advance(&mut self) -> u8 {
        let c = self.text.as_bytes()[self.current];
        self.current += 1;
        c
    }

    /// NUL at the end of the buffer.
    fn peek(&self) -> u8 {
        *self.text.as_bytes().get(self.current).unwrap_or(&0)
    }

    fn peek_next(&self) -> u8 {
        *self.text.as_bytes().get(self.current + 1).unwrap_or(&0)
    }

    fn match_byte(&mut self, c: u8) -> bool {
        if self.is_at_end() || self.peek() != c {
            return false;
        }
        self.current += 1;
        true
    }

    /// Skip whitespace and `//` line comments, counting newlines.
    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\r' | b'\t' => {
                    self.advance();
                }
                b'\n' => {
                    self.line += 1;
                    self.advance();
                }
                b'/' => {
                    if self.peek_next() == b'/' {
                        while self.peek() != b'\n' && !self.is_at_end() {
                            self.advance();
                        }
                    } else {
                        // Not a comment.
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    fn string(&mut self) -> Token<'a> {
        while self.peek() != b'"' && !self.is_at_end() {
            if self.peek() == b'\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return self.error_token("Unterminated string.");
        }

        // Closing quote.
        self.advance();
        self.make_token(TokenKind::String)
    }

    fn number(&mut self) -> Token<'a> {
        while is_digit(self.peek()) {
            self.advance();
        }

        // Fractional part, only when a digit follows the dot.
        if self.peek() == b'.' && is_digit(self.peek_next()) {
            // Consume '.'
            self.advance();
            while is_digit(self.peek()) {
                self.advance();
            }
        }

        self.make_token(TokenKind::Number)
    }

    fn identifier(&mut self) -> Token<'a> {
        while is_alpha(self.peek()) || is_digit(self.peek()) {
            self.advance();
        }
        self.make_token(self.identifier_kind())
    }

    /// Reserved words are classified by exact spelling.
    fn identifier_kind(&self) -> TokenKind {
        match &self.text[self.start..self.current] {
            "and" => TokenKind::And,
            "class" => TokenKind::Class,
            "else" => TokenKind::Else,
            "false" => TokenKind::False,
            "for" => TokenKind::For,
            "fun" => TokenKind::Fun,
            "if" => TokenKind::If,
            "nil" => TokenKind::Nil,
            "or" => TokenKind::Or,
            "print" => TokenKind::Print,
            "return" => TokenKind::Return,
            "super" => TokenKind::Super,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "var" => TokenKind::Var,
            "while" => TokenKind::While,
            _ => TokenKind::Identifier,
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token<'a> {
        Token::new(&self.text[self.start..self.current], kind, self.line)
    }

    fn error_token(&self, message: &'static str) -> Token<'a> {
        Token::new(message, TokenKind::Error, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pulls tokens up to and including the first `Eof`.
    fn lex(source: &str) -> Vec<Token<'_>> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let kind = token.kind;
            tokens.push(token);
            if kind == TokenKind::Eof {
                return tokens;
            }
        }
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|token| token.kind).collect()
    }

    #[test]
    fn punctuation_and_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("(){};,.-+/* ! != = == < <= > >="),
            vec![
                LeftParen, RightParen, LeftBrace, RightBrace, Semicolon, Comma, Dot, Minus, Plus,
                Slash, Star, Bang, BangEqual, Equal, EqualEqual, Less, LessEqual, Greater,
                GreaterEqual, Eof
            ]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        use TokenKind::*;
        assert_eq!(
            kinds("and andy var variable _tmp for4"),
            vec![And, Identifier, Var, Identifier, Identifier, Identifier, Eof]
        );
        assert_eq!(
            kinds("class else false fun if nil or print return super this true while"),
            vec![Class, Else, False, Fun, If, Nil, Or, Print, Return, Super, This, True, While, Eof]
        );
    }

    #[test]
    fn spellings_borrow_source() {
        let tokens = lex("var answer = 42;");
        let spellings: Vec<_> = tokens.iter().map(|token| token.spelling).collect();
        assert_eq!(spellings, vec!["var", "answer", "=", "42", ";", ""]);
    }

    #[test]
    fn number_with_trailing_dot_is_not_fractional() {
        let tokens = lex("123. 1.5");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].spelling, "123");
        assert_eq!(tokens[1].kind, TokenKind::Dot);
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert_eq!(tokens[2].spelling, "1.5");
    }

    #[test]
    fn string_spelling_keeps_quotes() {
        let tokens = lex("\"hi\"");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].spelling, "\"hi\"");
    }

    #[test]
    fn line_counting() {
        let tokens = lex("a\nb // comment\nc");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn multiline_string_counts_lines() {
        let tokens = lex("\"a\nb\" c");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn unterminated_string() {
        let tokens = lex("\"abc");
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].spelling, "Unterminated string.");
    }

    #[test]
    fn unterminated_string_still_counts_lines() {
        let mut lexer = Lexer::new("\"a\nb");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.spelling, "Unterminated string.");
        // Both lines were consumed before the error was reported.
        assert_eq!(token.line, 2);
    }

    #[test]
    fn unexpected_character() {
        let tokens = lex("@");
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].spelling, "Unexpected character.");
    }

    #[test]
    fn eof_is_idempotent() {
        let mut lexer = Lexer::new("1");
        assert_eq!(lexer.next_token().kind, TokenKind::Number);
        for _ in 0..3 {
            let token = lexer.next_token();
            assert_eq!(token.kind, TokenKind::Eof);
            assert_eq!(token.spelling, "");
        }
        assert!(lexer.is_at_end());
    }

    #[test]
    fn is_at_end_tracks_cursor_not_tokens() {
        let mut lexer = Lexer::new("1 ");
        assert_eq!(lexer.next_token().kind, TokenKind::Number);
        // Trailing whitespace: the cursor is short of the end even though the
        // next pull yields Eof.
        assert!(!lexer.is_at_end());
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert!(lexer.is_at_end());
    }
}
