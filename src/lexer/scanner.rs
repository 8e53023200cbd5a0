//! Scanner implementation for Mox
//!
//! Converts source text into tokens in a single pass. Malformed lexemes are
//! reported to a [`DiagnosticSink`] and dropped; scanning always runs to the
//! end of input and always finishes with one EOF token.

use super::cursor::Cursor;
use super::token::{Literal, Token, TokenKind};
use crate::error::{DiagnosticSink, MoxError};

/// Outcome of scanning one lexeme
#[derive(Debug)]
enum Scanned {
    Token(Token),
    /// Whitespace and comments
    Skipped,
    Error(MoxError),
}

/// Scanner for Mox source code
pub struct Scanner {
    source: Vec<char>,
    filename: Option<String>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(source: &str, filename: Option<&str>) -> Self {
        Self {
            source: source.chars().collect(),
            filename: filename.map(|s| s.to_string()),
        }
    }

    /// Scan the whole source, reporting every malformed lexeme to `sink`
    pub fn scan_tokens(self, sink: &mut impl DiagnosticSink) -> Vec<Token> {
        let mut cursor = Cursor::new(&self.source, self.filename.as_deref());
        let mut tokens = Vec::new();
        let mut errors = 0usize;

        while !cursor.is_at_end() {
            cursor.begin_lexeme();
            match scan_token(&mut cursor) {
                Scanned::Token(token) => {
                    tracing::trace!(token = %token, "token");
                    tokens.push(token);
                }
                Scanned::Skipped => {}
                Scanned::Error(error) => {
                    errors += 1;
                    sink.report(error);
                }
            }
        }

        cursor.begin_lexeme();
        tokens.push(Token::eof(cursor.start_location()));

        tracing::debug!(
            tokens = tokens.len(),
            errors,
            lines = cursor.line(),
            "scan finished"
        );
        tokens
    }
}

/// Scan a single lexeme starting at `cursor`'s next character
fn scan_token(cursor: &mut Cursor<'_>) -> Scanned {
    let c = cursor.advance();

    match c {
        // Whitespace; `advance` already counted the newline
        ' ' | '\r' | '\t' | '\n' => Scanned::Skipped,

        // Single-character tokens
        '(' => simple(cursor, TokenKind::LeftParen),
        ')' => simple(cursor, TokenKind::RightParen),
        '{' => simple(cursor, TokenKind::LeftBrace),
        '}' => simple(cursor, TokenKind::RightBrace),
        ',' => simple(cursor, TokenKind::Comma),
        '.' => simple(cursor, TokenKind::Dot),
        '-' => simple(cursor, TokenKind::Minus),
        '+' => simple(cursor, TokenKind::Plus),
        ';' => simple(cursor, TokenKind::Semicolon),
        '*' => simple(cursor, TokenKind::Star),

        // One or two character tokens
        '!' => with_equal(cursor, TokenKind::BangEqual, TokenKind::Bang),
        '=' => with_equal(cursor, TokenKind::EqualEqual, TokenKind::Equal),
        '<' => with_equal(cursor, TokenKind::LessEqual, TokenKind::Less),
        '>' => with_equal(cursor, TokenKind::GreaterEqual, TokenKind::Greater),

        '/' => {
            if cursor.match_char('/') {
                line_comment(cursor)
            } else if cursor.match_char('*') {
                block_comment(cursor)
            } else {
                simple(cursor, TokenKind::Slash)
            }
        }

        '"' => string(cursor),

        c if is_digit(c) => number(cursor),

        c if is_alpha(c) => identifier(cursor),

        _ => Scanned::Error(MoxError::unexpected_character(c, cursor.start_location())),
    }
}

fn simple(cursor: &Cursor<'_>, kind: TokenKind) -> Scanned {
    Scanned::Token(Token::new(kind, cursor.lexeme(), cursor.start_location()))
}

/// Prefer the two-character form whenever the next character is `=`
fn with_equal(cursor: &mut Cursor<'_>, double: TokenKind, single: TokenKind) -> Scanned {
    let kind = if cursor.match_char('=') { double } else { single };
    simple(cursor, kind)
}

/// Skip to the end of the line, leaving the newline itself unread
fn line_comment(cursor: &mut Cursor<'_>) -> Scanned {
    cursor.eat_while(|c| c != '\n');
    Scanned::Skipped
}

/// Skip through the first `*/`. Without one, the comment silently runs to
/// the end of input.
fn block_comment(cursor: &mut Cursor<'_>) -> Scanned {
    while !cursor.is_at_end() {
        if cursor.peek() == Some('*') && cursor.peek_next() == Some('/') {
            cursor.advance();
            cursor.advance();
            break;
        }
        cursor.advance();
    }
    Scanned::Skipped
}

/// String literal. The value is the raw text between the quotes; strings may
/// span lines.
fn string(cursor: &mut Cursor<'_>) -> Scanned {
    cursor.eat_while(|c| c != '"');

    if cursor.is_at_end() {
        return Scanned::Error(MoxError::unterminated_string(cursor.current_location()));
    }

    // The closing quote
    cursor.advance();

    Scanned::Token(Token::with_literal(
        TokenKind::String,
        cursor.lexeme(),
        Literal::String(cursor.lexeme_inner()),
        cursor.start_location(),
    ))
}

/// Number literal: digits, optionally `.` followed by at least one digit
fn number(cursor: &mut Cursor<'_>) -> Scanned {
    cursor.eat_while(is_digit);

    if cursor.peek() == Some('.') && cursor.peek_next().is_some_and(is_digit) {
        cursor.advance();
        cursor.eat_while(is_digit);
    }

    let lexeme = cursor.lexeme();
    // Digits with an optional fraction always parse; overflow gives infinity.
    let value = lexeme.parse::<f64>().unwrap_or(f64::NAN);

    Scanned::Token(Token::with_literal(
        TokenKind::Number,
        lexeme,
        Literal::Number(value),
        cursor.start_location(),
    ))
}

/// Identifier or reserved word
fn identifier(cursor: &mut Cursor<'_>) -> Scanned {
    cursor.eat_while(is_alphanumeric);

    let lexeme = cursor.lexeme();
    let kind = TokenKind::keyword(&lexeme).unwrap_or(TokenKind::Identifier);

    Scanned::Token(Token::new(kind, lexeme, cursor.start_location()))
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || is_digit(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Diagnostics, SourceLocation};
    use pretty_assertions::assert_eq;

    fn scan(source: &str) -> (Vec<Token>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source, None).scan_tokens(&mut diagnostics);
        (tokens, diagnostics)
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_source() {
        let (tokens, diagnostics) = scan("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].lexeme, "");
        assert_eq!(tokens[0].line(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_single_character_tokens() {
        assert_eq!(
            kinds("(){},.-+;*/"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Minus,
                TokenKind::Plus,
                TokenKind::Semicolon,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_one_or_two_character_tokens() {
        assert_eq!(
            kinds("! != = == < <= > >="),
            vec![
                TokenKind::Bang,
                TokenKind::BangEqual,
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_character_operators_are_greedy() {
        assert_eq!(
            kinds("<=="),
            vec![TokenKind::LessEqual, TokenKind::Equal, TokenKind::Eof]
        );
        assert_eq!(
            kinds("==="),
            vec![TokenKind::EqualEqual, TokenKind::Equal, TokenKind::Eof]
        );
        assert_eq!(
            kinds("!!="),
            vec![TokenKind::Bang, TokenKind::BangEqual, TokenKind::Eof]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("and class else false for fun if null or print return base this true var while"),
            vec![
                TokenKind::And,
                TokenKind::Class,
                TokenKind::Else,
                TokenKind::False,
                TokenKind::For,
                TokenKind::Fun,
                TokenKind::If,
                TokenKind::Null,
                TokenKind::Or,
                TokenKind::Print,
                TokenKind::Return,
                TokenKind::Base,
                TokenKind::This,
                TokenKind::True,
                TokenKind::Var,
                TokenKind::While,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        let (tokens, _) = scan("foo bar_baz _private myVar123 classy Print");
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(
            lexemes,
            vec!["foo", "bar_baz", "_private", "myVar123", "classy", "Print", ""]
        );
        assert!(tokens[..6].iter().all(|t| t.kind == TokenKind::Identifier));
        assert!(tokens[..6].iter().all(|t| t.literal.is_none()));
    }

    #[test]
    fn test_number_literals() {
        let (tokens, _) = scan("0 42 3.14 007");
        assert_eq!(tokens[0].literal, Some(Literal::Number(0.0)));
        assert_eq!(tokens[1].literal, Some(Literal::Number(42.0)));
        assert_eq!(tokens[2].literal, Some(Literal::Number(3.14)));
        assert_eq!(tokens[2].lexeme, "3.14");
        assert_eq!(tokens[3].literal, Some(Literal::Number(7.0)));
        assert_eq!(tokens[3].lexeme, "007");
    }

    #[test]
    fn test_trailing_dot_is_not_part_of_number() {
        let (tokens, diagnostics) = scan("3.");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Number, TokenKind::Dot, TokenKind::Eof]
        );
        assert_eq!(tokens[0].lexeme, "3");
        assert_eq!(tokens[0].literal, Some(Literal::Number(3.0)));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_number_then_method_call() {
        assert_eq!(
            kinds("12.abs"),
            vec![
                TokenKind::Number,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
        assert_eq!(
            kinds("1.2.3"),
            vec![
                TokenKind::Number,
                TokenKind::Dot,
                TokenKind::Number,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_leading_dot_is_not_a_number() {
        assert_eq!(
            kinds(".5"),
            vec![TokenKind::Dot, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn test_string_literals() {
        let (tokens, _) = scan(r#""hello" "" "a b""#);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "\"hello\"");
        assert_eq!(tokens[0].literal, Some(Literal::String("hello".to_string())));
        assert_eq!(tokens[1].literal, Some(Literal::String(String::new())));
        assert_eq!(tokens[2].literal, Some(Literal::String("a b".to_string())));
    }

    #[test]
    fn test_strings_have_no_escapes() {
        let (tokens, diagnostics) = scan(r#""a\n" "b\""#);
        assert_eq!(tokens[0].literal, Some(Literal::String("a\\n".to_string())));
        assert_eq!(tokens[1].literal, Some(Literal::String("b\\".to_string())));
        assert_eq!(tokens[2].kind, TokenKind::Eof);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let (tokens, _) = scan("\"one\ntwo\" x");
        assert_eq!(tokens[0].literal, Some(Literal::String("one\ntwo".to_string())));
        assert_eq!(tokens[0].line(), 1);
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[1].line(), 2);
        assert_eq!(tokens[2].line(), 2);
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, diagnostics) = scan("\"hi");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(
            diagnostics.into_vec(),
            vec![MoxError::unterminated_string(SourceLocation::at(1, 4))]
        );
    }

    #[test]
    fn test_unterminated_string_keeps_counting_lines() {
        let (tokens, diagnostics) = scan("x \"a\nb\n");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
        assert_eq!(tokens[1].line(), 3);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_unexpected_character() {
        let (tokens, diagnostics) = scan("var x = @;");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Semicolon,
                TokenKind::Eof
            ]
        );
        assert_eq!(
            diagnostics.into_vec(),
            vec![MoxError::unexpected_character('@', SourceLocation::at(1, 9))]
        );
    }

    #[test]
    fn test_every_bad_character_is_reported() {
        let (tokens, diagnostics) = scan("#\n$ %");
        assert_eq!(tokens.len(), 1);
        let locations: Vec<_> = diagnostics
            .iter()
            .map(|e| e.location().cloned().unwrap())
            .collect();
        assert_eq!(
            locations,
            vec![
                SourceLocation::at(1, 1),
                SourceLocation::at(2, 1),
                SourceLocation::at(2, 3)
            ]
        );
    }

    #[test]
    fn test_non_ascii_letters_are_unexpected() {
        let (tokens, diagnostics) = scan("é");
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            diagnostics.into_vec(),
            vec![MoxError::unexpected_character('é', SourceLocation::at(1, 1))]
        );
    }

    #[test]
    fn test_line_comment() {
        let (tokens, _) = scan("// comment\nvar x = 1;");
        assert_eq!(tokens[0].kind, TokenKind::Var);
        assert_eq!(tokens[0].line(), 2);
        assert_eq!(tokens.last().unwrap().line(), 2);
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        assert_eq!(kinds("x // trailing"), vec![TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn test_block_comment() {
        let (tokens, _) = scan("a /* one\ntwo * / */ b");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
        );
        assert_eq!(tokens[1].line(), 2);
    }

    #[test]
    fn test_block_comment_is_not_nested() {
        assert_eq!(
            kinds("/* a /* b */ c */"),
            vec![
                TokenKind::Identifier,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_block_comment_ignores_backslash() {
        assert_eq!(kinds("/* a *\\ b */ c"), vec![TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn test_unterminated_block_comment_is_silent() {
        let (tokens, diagnostics) = scan("x /* never\nclosed *");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].line(), 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_token_locations() {
        let (tokens, _) = scan("var answer\n  = 42;");
        let locations: Vec<_> = tokens
            .iter()
            .map(|t| (t.location.line, t.location.column))
            .collect();
        assert_eq!(locations, vec![(1, 1), (1, 5), (2, 3), (2, 5), (2, 7), (2, 8)]);
    }

    #[test]
    fn test_filename_is_attached() {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new("@ x", Some("main.mox")).scan_tokens(&mut diagnostics);
        assert_eq!(tokens[0].location.filename.as_deref(), Some("main.mox"));
        assert_eq!(
            diagnostics.iter().next().and_then(|e| e.location()).unwrap().to_string(),
            "main.mox:1:1"
        );
    }

    #[test]
    fn test_sub_scanner_in_isolation() {
        let source: Vec<char> = "123.5e".chars().collect();
        let mut cursor = Cursor::new(&source, None);
        cursor.begin_lexeme();
        cursor.advance();

        match number(&mut cursor) {
            Scanned::Token(token) => {
                assert_eq!(token.lexeme, "123.5");
                assert_eq!(token.literal, Some(Literal::Number(123.5)));
            }
            other => panic!("expected a token, got {:?}", other),
        }
        assert_eq!(cursor.peek(), Some('e'));
    }
}
