// SPDX-License-Identifier: MIT OR Apache-2.0

//! CFG tokenizer with source positions.
//!
//! Turns configuration text into a stream of tokens, one at a time, keeping the
//! line and column each token starts at for error reporting. Newlines are tokens
//! because they separate entries; other whitespace and `#` comments are skipped.

use crate::domain::{ConfigError, Position, Result};
use std::fmt;

/// Token kinds
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Assign,
    Comma,
    Newline,
    Identifier(String),
    String(String),
    Integer(i64),
    Float(f64),
    True,
    False,
    Null,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LeftBrace => write!(f, "'{{'"),
            TokenKind::RightBrace => write!(f, "'}}'"),
            TokenKind::LeftBracket => write!(f, "'['"),
            TokenKind::RightBracket => write!(f, "']'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::String(_) => write!(f, "string"),
            TokenKind::Integer(n) => write!(f, "number {}", n),
            TokenKind::Float(x) => write!(f, "number {:?}", x),
            TokenKind::True => write!(f, "'true'"),
            TokenKind::False => write!(f, "'false'"),
            TokenKind::Null => write!(f, "'null'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// Token with the position of its first character
#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    fn new(kind: TokenKind, position: Position) -> Self {
        Self { kind, position }
    }
}

/// Tokenizer for CFG text
pub(crate) struct Lexer {
    chars: Vec<char>,
    /// Index into `chars`
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get next token
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let start = self.position();

        let c = match self.peek() {
            None => return Ok(Token::new(TokenKind::Eof, start)),
            Some(c) => c,
        };

        let punct = match c {
            '\n' => Some(TokenKind::Newline),
            '{' => Some(TokenKind::LeftBrace),
            '}' => Some(TokenKind::RightBrace),
            '[' => Some(TokenKind::LeftBracket),
            ']' => Some(TokenKind::RightBracket),
            ':' => Some(TokenKind::Colon),
            '=' => Some(TokenKind::Assign),
            ',' => Some(TokenKind::Comma),
            _ => None,
        };
        if let Some(kind) = punct {
            self.advance();
            return Ok(Token::new(kind, start));
        }

        match c {
            '\'' | '"' => self.read_string(start),
            c if c.is_ascii_digit() => self.read_number(start),
            '-' | '+' if self.starts_number_at(1) => self.read_number(start),
            '.' if self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => {
                self.read_number(start)
            }
            c if c.is_alphabetic() || c == '_' => Ok(self.read_identifier(start)),
            other => Err(ConfigError::syntax(
                start,
                format!("unexpected character {:?}", other),
            )),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn starts_number_at(&self, offset: usize) -> bool {
        match self.peek_at(offset) {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self
                .peek_at(offset + 1)
                .is_some_and(|d| d.is_ascii_digit()),
            _ => false,
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\u{feff}' => {
                    self.advance();
                }
                // Backslash at end of line joins it with the next one
                '\\' if self.peek_at(1) == Some('\n') => {
                    self.advance();
                    self.advance();
                }
                '\\' if self.peek_at(1) == Some('\r') && self.peek_at(2) == Some('\n') => {
                    self.advance();
                    self.advance();
                    self.advance();
                }
                // Comment runs to end of line; the newline itself is still a token
                '#' => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_identifier(&mut self, start: Position) -> Token {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match name.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => TokenKind::Identifier(name),
        };
        Token::new(kind, start)
    }

    fn read_string(&mut self, start: Position) -> Result<Token> {
        let quote = match self.advance() {
            Some(q) => q,
            None => return Err(ConfigError::syntax(start, "unterminated string")),
        };
        let triple = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        if triple {
            self.advance();
            self.advance();
        }

        let mut value = String::new();

        loop {
            match self.peek() {
                None => return Err(ConfigError::syntax(start, "unterminated string")),
                Some(c) if c == quote => {
                    if !triple {
                        self.advance();
                        break;
                    }
                    if self.peek_at(1) == Some(quote) && self.peek_at(2) == Some(quote) {
                        self.advance();
                        self.advance();
                        self.advance();
                        break;
                    }
                    value.push(c);
                    self.advance();
                }
                Some('\n') if !triple => {
                    return Err(ConfigError::syntax(start, "unterminated string"));
                }
                Some('\\') => {
                    let escape_pos = self.position();
                    self.advance();
                    match self.advance() {
                        None => return Err(ConfigError::syntax(start, "unterminated string")),
                        Some('n') => value.push('\n'),
                        Some('r') => value.push('\r'),
                        Some('t') => value.push('\t'),
                        Some('b') => value.push('\u{8}'),
                        Some('f') => value.push('\u{c}'),
                        Some('0') => value.push('\0'),
                        Some('\\') => value.push('\\'),
                        Some('\'') => value.push('\''),
                        Some('"') => value.push('"'),
                        // Escaped line break continues the string on the next line
                        Some('\n') => {}
                        Some('\r') if self.peek() == Some('\n') => {
                            self.advance();
                        }
                        Some('x') => value.push(self.read_hex_escape(2, escape_pos)?),
                        Some('u') => value.push(self.read_hex_escape(4, escape_pos)?),
                        Some('U') => value.push(self.read_hex_escape(8, escape_pos)?),
                        Some(other) => {
                            return Err(ConfigError::syntax(
                                escape_pos,
                                format!("invalid escape sequence '\\{}'", other),
                            ));
                        }
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        Ok(Token::new(TokenKind::String(value), start))
    }

    fn read_hex_escape(&mut self, digits: usize, escape_pos: Position) -> Result<char> {
        let mut hex = String::with_capacity(digits);
        for _ in 0..digits {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    hex.push(c);
                    self.advance();
                }
                _ => {
                    return Err(ConfigError::syntax(
                        escape_pos,
                        format!("invalid escape sequence: expected {} hex digits", digits),
                    ));
                }
            }
        }

        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                ConfigError::syntax(
                    escape_pos,
                    format!("invalid escape sequence: U+{} is not a character", hex),
                )
            })
    }

    fn read_number(&mut self, start: Position) -> Result<Token> {
        let mut negative = false;
        if let Some(sign @ ('-' | '+')) = self.peek() {
            negative = sign == '-';
            self.advance();
        }

        let radix = match (self.peek(), self.peek_at(1)) {
            (Some('0'), Some('x' | 'X')) => 16,
            (Some('0'), Some('o' | 'O')) => 8,
            (Some('0'), Some('b' | 'B')) => 2,
            _ => 10,
        };

        let kind = if radix == 10 {
            self.read_decimal(start, negative)?
        } else {
            self.advance();
            self.advance();
            let digits = self.take_digits(|c| c.is_digit(radix));
            if !valid_digit_group(&digits) {
                return Err(ConfigError::syntax(start, "invalid number"));
            }
            let magnitude = u64::from_str_radix(&digits.replace('_', ""), radix)
                .map_err(|_| ConfigError::syntax(start, "integer out of range"))?;
            let signed = if negative {
                -i128::from(magnitude)
            } else {
                i128::from(magnitude)
            };
            let value = i64::try_from(signed)
                .map_err(|_| ConfigError::syntax(start, "integer out of range"))?;
            TokenKind::Integer(value)
        };

        // A number must not run straight into a name, as in `12abc`
        if let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                return Err(ConfigError::syntax(
                    self.position(),
                    format!("invalid character {:?} in number", c),
                ));
            }
        }

        Ok(Token::new(kind, start))
    }

    fn read_decimal(&mut self, start: Position, negative: bool) -> Result<TokenKind> {
        let mut text = String::new();
        if negative {
            text.push('-');
        }

        let integral = self.take_digits(|c| c.is_ascii_digit());
        let mut is_float = false;

        if !integral.is_empty() && !valid_digit_group(&integral) {
            return Err(ConfigError::syntax(start, "invalid number"));
        }
        text.push_str(&integral);

        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            let fraction = self.take_digits(|c| c.is_ascii_digit());
            if !valid_digit_group(&fraction) {
                return Err(ConfigError::syntax(start, "invalid number"));
            }
            text.push('.');
            text.push_str(&fraction);
            is_float = true;
        }

        if let Some('e' | 'E') = self.peek() {
            let exponent_follows = match self.peek_at(1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => self.peek_at(2).is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            };
            if exponent_follows {
                self.advance();
                text.push('e');
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    text.push(sign);
                    self.advance();
                }
                let exponent = self.take_digits(|c| c.is_ascii_digit());
                if !valid_digit_group(&exponent) {
                    return Err(ConfigError::syntax(start, "invalid number"));
                }
                text.push_str(&exponent);
                is_float = true;
            }
        }

        let text = text.replace('_', "");
        if is_float {
            let value: f64 = text
                .parse()
                .map_err(|_| ConfigError::syntax(start, format!("invalid number '{}'", text)))?;
            if !value.is_finite() {
                return Err(ConfigError::syntax(start, "float out of range"));
            }
            Ok(TokenKind::Float(value))
        } else {
            let value: i64 = text
                .parse()
                .map_err(|_| ConfigError::syntax(start, "integer out of range"))?;
            Ok(TokenKind::Integer(value))
        }
    }

    /// Consumes digits and `_` separators, returning them unvalidated.
    fn take_digits(&mut self, is_digit: impl Fn(char) -> bool) -> String {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if is_digit(c) || c == '_' {
                digits.push(c);
                self.advance();
            } else {
                break;
            }
        }
        digits
    }
}

/// `_` may only appear between digits.
fn valid_digit_group(digits: &str) -> bool {
    !digits.is_empty()
        && !digits.starts_with('_')
        && !digits.ends_with('_')
        && !digits.contains("__")
}
