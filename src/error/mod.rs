//! Error handling and diagnostics for Mox
//!
//! Scan errors are not fatal: the scanner hands each one to a
//! [`DiagnosticSink`] and keeps going. The caller decides what to do with
//! the collected errors.

use std::fmt;

use thiserror::Error;

pub mod diagnostic;
pub mod sink;

pub use diagnostic::Diagnostic;
pub use sink::{DiagnosticSink, Diagnostics};

/// Result type alias for Mox operations
pub type MoxResult<T> = Result<T, MoxError>;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Optional filename
    pub filename: Option<String>,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize, filename: Option<String>) -> Self {
        Self {
            line,
            column,
            filename,
        }
    }

    /// Create a source location without a filename
    pub fn at(line: usize, column: usize) -> Self {
        Self::new(line, column, None)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref filename) = self.filename {
            write!(f, "{}:{}:{}", filename, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Main error type for Mox
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MoxError {
    /// An opening quote with no closing quote before end of input
    #[error("Scan Error: Unterminated string. at {location}")]
    UnterminatedString { location: SourceLocation },

    /// A character that starts no valid lexeme
    #[error("Scan Error: Unexpected character '{character}'. at {location}")]
    UnexpectedCharacter {
        character: char,
        location: SourceLocation,
    },

    /// A script could not be read
    #[error("IO Error: Failed to read '{path}': {message}")]
    Io { path: String, message: String },
}

impl MoxError {
    pub fn unterminated_string(location: SourceLocation) -> Self {
        Self::UnterminatedString { location }
    }

    pub fn unexpected_character(character: char, location: SourceLocation) -> Self {
        Self::UnexpectedCharacter {
            character,
            location,
        }
    }

    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Get the error kind as a string
    pub fn kind(&self) -> &str {
        match self {
            Self::UnterminatedString { .. } | Self::UnexpectedCharacter { .. } => "Scan Error",
            Self::Io { .. } => "IO Error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::UnterminatedString { .. } => "Unterminated string.".to_string(),
            Self::UnexpectedCharacter { character, .. } => {
                format!("Unexpected character '{}'.", character.escape_debug())
            }
            Self::Io { path, message } => format!("Failed to read '{}': {}", path, message),
        }
    }

    /// Get the source location if available
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::UnterminatedString { location }
            | Self::UnexpectedCharacter { location, .. } => Some(location),
            Self::Io { .. } => None,
        }
    }

    /// The one-line `[line N] Error: ...` form
    pub fn report_line(&self) -> String {
        match self.location() {
            Some(location) => format!(
                "[line {}, column {}] Error: {}",
                location.line,
                location.column,
                self.message()
            ),
            None => format!("Error: {}", self.message()),
        }
    }
}
