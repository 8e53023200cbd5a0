//! # Mox
//!
//! Lexical front end for Mox, a small dynamically-typed scripting language.
//!
//! ## Architecture
//!
//! - `lexer`: tokens, the scan cursor and the scanner itself
//! - `error`: error types, the diagnostics sink and diagnostic rendering
//!
//! Scanning never fails as a whole. Malformed lexemes are dropped and
//! reported, and the caller inspects [`ScanOutcome::had_error`] to decide
//! what to do.

pub mod error;
pub mod lexer;

// Re-export commonly used types
pub use error::{Diagnostic, DiagnosticSink, Diagnostics, MoxError, MoxResult, SourceLocation};
pub use lexer::{Literal, Scanner, Token, TokenKind};

/// Version of the Mox front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tokens of one source text together with everything reported while
/// scanning it
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub tokens: Vec<Token>,
    pub diagnostics: Diagnostics,
}

impl ScanOutcome {
    pub fn had_error(&self) -> bool {
        self.diagnostics.had_error()
    }
}

/// Scan a complete source text
///
/// # Arguments
///
/// * `source` - The source code to scan
/// * `filename` - Optional filename for error reporting
pub fn scan(source: &str, filename: Option<&str>) -> ScanOutcome {
    let mut diagnostics = Diagnostics::new();
    let tokens = Scanner::new(source, filename).scan_tokens(&mut diagnostics);

    ScanOutcome {
        tokens,
        diagnostics,
    }
}
