//! Lexical analysis module
//!
//! This module handles tokenization of Mox source code.

pub mod cursor;
pub mod scanner;
pub mod token;

pub use cursor::Cursor;
pub use scanner::Scanner;
pub use token::{Literal, Token, TokenKind};
