//! Error types for the electriC front end
//!
//! Both stages are fail-fast: the first [`LexError`] or [`SyntaxError`]
//! aborts the whole pass and is handed back to the caller unchanged.
//! [`FrontendError`] wraps either one for callers that run both stages.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// The two quote characters that delimit literal regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
}

impl Quote {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '"' => Some(Quote::Double),
            '\'' => Some(Quote::Single),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
        }
    }

    /// The quote that is not allowed inside a region opened by `self`.
    pub fn other(self) -> Self {
        match self {
            Quote::Double => Quote::Single,
            Quote::Single => Quote::Double,
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quote::Double => write!(f, "double quote ('\"')"),
            Quote::Single => write!(f, "single quote (\"'\")"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// One or more characters that cannot start or continue a token.
    #[error("Illegal character error at {location}: '{run}'")]
    IllegalCharacter {
        run: String,
        location: SourceLocation,
    },

    /// End of input reached inside a literal region.
    #[error("Unterminated string error at {location}: expected closing {expected}")]
    UnterminatedString {
        expected: Quote,
        location: SourceLocation,
    },

    /// The other quote character appeared inside a literal region.
    #[error("Mismatched delimiter error at {location}: expected closing {expected}")]
    MismatchedDelimiter {
        expected: Quote,
        location: SourceLocation,
    },

    #[error("Multiline comment unterminated at {location}")]
    UnterminatedComment { location: SourceLocation },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::IllegalCharacter { location, .. }
            | LexError::UnterminatedString { location, .. }
            | LexError::MismatchedDelimiter { location, .. }
            | LexError::UnterminatedComment { location } => *location,
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at {location}: expected {expected}, but found {found}")]
pub struct SyntaxError {
    pub expected: String,
    pub found: String,
    pub location: SourceLocation,
}

impl SyntaxError {
    pub fn new(
        expected: impl Into<String>,
        found: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        SyntaxError {
            expected: expected.into(),
            found: found.into(),
            location,
        }
    }
}

/// Failure of either front-end stage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl FrontendError {
    pub fn location(&self) -> SourceLocation {
        match self {
            FrontendError::Lex(err) => err.location(),
            FrontendError::Syntax(err) => err.location,
        }
    }
}
