//! Source code representation and error management.

use std::{cell::RefCell, fmt};

use thiserror::Error;

/// Represents source code.
///
/// The buffer is borrowed, never copied: tokens and AST nodes produced from a
/// `Source` hold views into `content` and must not outlive it.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Accumulated errors.
    pub errors: ErrorReporter,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            errors: ErrorReporter::new(),
        }
    }

    /// Returns `true` if `Source` has no accumulated errors. Returns `false` otherwise.
    pub fn has_no_errors(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// Represents a syntax error (compile time error).
///
/// Rendered as `[line L] Error at <lexeme>: <message>`, with the location part
/// omitted when the diagnostic is anchored to a lexical error token and
/// replaced by `at end` when anchored to the end of input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[line {line}] Error{location}: {message}")]
pub struct SyntaxError {
    message: String,
    location: String,
    line: u32,
}

impl SyntaxError {
    /// Create a new syntax error with no location part.
    pub fn new(message: impl ToString, line: u32) -> Self {
        Self {
            message: message.to_string(),
            location: String::new(),
            line,
        }
    }

    /// Create a new syntax error anchored to the token with the given `lexeme`.
    pub fn at_token(message: impl ToString, lexeme: &str, line: u32) -> Self {
        Self {
            message: message.to_string(),
            location: format!(" at {lexeme}"),
            line,
        }
    }

    /// Create a new syntax error anchored to the end of input.
    pub fn at_end(message: impl ToString, line: u32) -> Self {
        Self {
            message: message.to_string(),
            location: " at end".to_string(),
            line,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Manages all the errors.
pub struct ErrorReporter {
    errors: RefCell<Vec<SyntaxError>>,
}

impl ErrorReporter {
    /// Create an empty `ErrorReporter`.
    pub fn new() -> Self {
        Self {
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Adds an error to the `ErrorReporter`.
    /// This method uses the interior mutability pattern. This does not require mutability for ergonomics.
    pub fn add_error(&self, error: SyntaxError) {
        // This should be the only place where self.errors is borrowed mutably.
        self.errors.borrow_mut().push(error);
    }

    /// Number of accumulated errors.
    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors.borrow();
        for error in errors.iter() {
            writeln!(f, "{error}")?;
        }

        Ok(())
    }
}
