//! Error types for YAML operations.

use std::io;

/// A position in the input, 0-based internally.
///
/// `Display` surfaces the position 1-based, which is what error messages
/// and the CLI report to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mark {
    pub line: usize,
    pub column: usize,
}

impl Mark {
    pub fn new(line: usize, column: usize) -> Self {
        Mark { line, column }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line + 1, self.column + 1)
    }
}

/// Error type for YAML operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error (file unreadable)
    Io(String),
    /// Malformed lexical token, e.g. unterminated quote
    Scan { message: String, mark: Mark },
    /// Indentation width that matches no open frame
    Indentation { message: String, mark: Mark },
    /// Structurally invalid token position, e.g. scalar where a container
    /// was expected
    UnexpectedToken { message: String, mark: Mark },
    /// Malformed tree structure, e.g. non-scalar mapping key
    Structure { message: String, mark: Mark },
    /// Path navigation error (CLI layer)
    Path(String),
}

impl Error {
    /// The position the error was detected at, if it carries one.
    pub fn mark(&self) -> Option<Mark> {
        match self {
            Error::Scan { mark, .. }
            | Error::Indentation { mark, .. }
            | Error::UnexpectedToken { mark, .. }
            | Error::Structure { mark, .. } => Some(*mark),
            Error::Io(_) | Error::Path(_) => None,
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "{}", e),
            Error::Scan { message, mark }
            | Error::Indentation { message, mark }
            | Error::UnexpectedToken { message, mark }
            | Error::Structure { message, mark } => write!(f, "{} ({})", message, mark),
            Error::Path(e) => write!(f, "{}", e),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
