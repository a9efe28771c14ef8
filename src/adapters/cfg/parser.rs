// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recursive-descent parser for CFG documents.
//!
//! Single forward pass over the token stream with one token of lookahead. The
//! first error stops parsing and is reported with the position of the token
//! that caused it.

use super::lexer::{Lexer, Token, TokenKind};
use crate::domain::{ConfigError, ConfigValue, Mapping, Position, Result};

/// Maximum nesting of mappings and sequences.
/// This keeps hostile input from exhausting the stack.
pub(super) const MAX_DEPTH: usize = 128;

/// What ends the mapping body being parsed.
#[derive(Clone, Copy, PartialEq)]
enum Closing {
    Brace,
    EndOfInput,
}

pub(crate) struct Parser {
    lexer: Lexer,
    current: Token,
    allow_duplicates: bool,
    depth: usize,
}

impl Parser {
    pub fn new(input: &str, allow_duplicates: bool) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            allow_duplicates,
            depth: 0,
        })
    }

    /// Parses a whole document.
    ///
    /// The root is a braced mapping, a bracketed sequence, or a bare list of
    /// `key: value` entries. Empty input is an empty mapping.
    pub fn parse_document(mut self) -> Result<ConfigValue> {
        self.skip_newlines()?;

        let root = match self.current.kind {
            TokenKind::LeftBrace => self.parse_mapping()?,
            TokenKind::LeftBracket => self.parse_sequence()?,
            _ => ConfigValue::Mapping(self.parse_mapping_body(Closing::EndOfInput)?),
        };

        self.skip_newlines()?;
        if self.current.kind != TokenKind::Eof {
            return Err(self.unexpected("after end of document"));
        }
        Ok(root)
    }

    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn skip_newlines(&mut self) -> Result<()> {
        while self.current.kind == TokenKind::Newline {
            self.advance()?;
        }
        Ok(())
    }

    fn error_here(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::syntax(self.current.position, message)
    }

    fn unexpected(&self, context: &str) -> ConfigError {
        self.error_here(format!("unexpected {} {}", self.current.kind, context))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error_here("maximum nesting depth exceeded"));
        }
        Ok(())
    }

    fn parse_mapping(&mut self) -> Result<ConfigValue> {
        self.enter()?;
        self.advance()?; // consume '{'
        let map = self.parse_mapping_body(Closing::Brace)?;
        self.advance()?; // consume '}'
        self.depth -= 1;
        Ok(ConfigValue::Mapping(map))
    }

    fn at_closing(&self, closing: Closing) -> bool {
        match closing {
            Closing::Brace => self.current.kind == TokenKind::RightBrace,
            Closing::EndOfInput => self.current.kind == TokenKind::Eof,
        }
    }

    /// Parses entries up to (not including) the closing token.
    fn parse_mapping_body(&mut self, closing: Closing) -> Result<Mapping> {
        let mut map = Mapping::new();

        loop {
            self.skip_newlines()?;
            if self.at_closing(closing) {
                break;
            }
            if self.current.kind == TokenKind::Eof {
                return Err(self.error_here("unterminated mapping, expected '}'"));
            }

            let (key, key_pos) = self.parse_key()?;

            match self.current.kind {
                TokenKind::Colon | TokenKind::Assign => {
                    self.advance()?;
                }
                _ => {
                    return Err(self.error_here(format!(
                        "expected ':' or '=' after key '{}', found {}",
                        key, self.current.kind
                    )));
                }
            }

            let value = self.parse_value()?;
            self.insert(&mut map, key, key_pos, value)?;

            match self.current.kind {
                TokenKind::Comma => {
                    self.advance()?;
                }
                TokenKind::Newline => self.skip_newlines()?,
                _ if self.at_closing(closing) => {}
                TokenKind::Eof => {
                    return Err(self.error_here("unterminated mapping, expected '}'"));
                }
                _ => {
                    let expected = match closing {
                        Closing::Brace => "',', newline or '}'",
                        Closing::EndOfInput => "',' or newline",
                    };
                    return Err(self.error_here(format!(
                        "expected {} after value, found {}",
                        expected, self.current.kind
                    )));
                }
            }
        }

        Ok(map)
    }

    fn insert(
        &self,
        map: &mut Mapping,
        key: String,
        key_pos: Position,
        value: ConfigValue,
    ) -> Result<()> {
        if self.allow_duplicates {
            map.insert(key, value);
            return Ok(());
        }
        let message = format!("duplicate key '{}'", key);
        map.try_insert(key, value)
            .map_err(|_| ConfigError::syntax(key_pos, message))
    }

    fn parse_key(&mut self) -> Result<(String, Position)> {
        let position = self.current.position;
        match self.current.kind {
            TokenKind::Identifier(_) | TokenKind::String(_) => match self.advance()?.kind {
                TokenKind::Identifier(name) | TokenKind::String(name) => Ok((name, position)),
                other => Err(ConfigError::syntax(
                    position,
                    format!("expected key, found {}", other),
                )),
            },
            TokenKind::True | TokenKind::False | TokenKind::Null => Err(self.error_here(
                format!("keyword {} cannot be used as a key", self.current.kind),
            )),
            _ => Err(self.error_here(format!("expected key, found {}", self.current.kind))),
        }
    }

    fn parse_value(&mut self) -> Result<ConfigValue> {
        match self.current.kind {
            TokenKind::LeftBrace => self.parse_mapping(),
            TokenKind::LeftBracket => self.parse_sequence(),
            TokenKind::String(_) => self.parse_strings(),
            TokenKind::Integer(n) => {
                self.advance()?;
                Ok(ConfigValue::Integer(n))
            }
            TokenKind::Float(x) => {
                self.advance()?;
                Ok(ConfigValue::Float(x))
            }
            TokenKind::True => {
                self.advance()?;
                Ok(ConfigValue::Bool(true))
            }
            TokenKind::False => {
                self.advance()?;
                Ok(ConfigValue::Bool(false))
            }
            TokenKind::Null => {
                self.advance()?;
                Ok(ConfigValue::Null)
            }
            TokenKind::Identifier(ref name) => Err(self.error_here(format!(
                "unexpected identifier '{}', string values must be quoted",
                name
            ))),
            _ => Err(self.error_here(format!("expected value, found {}", self.current.kind))),
        }
    }

    /// Adjacent string literals join into one value.
    fn parse_strings(&mut self) -> Result<ConfigValue> {
        let mut value = String::new();
        while let TokenKind::String(_) = self.current.kind {
            if let TokenKind::String(part) = self.advance()?.kind {
                value.push_str(&part);
            }
        }
        Ok(ConfigValue::String(value))
    }

    fn parse_sequence(&mut self) -> Result<ConfigValue> {
        self.enter()?;
        self.advance()?; // consume '['
        let mut items = Vec::new();

        loop {
            self.skip_newlines()?;
            match self.current.kind {
                TokenKind::RightBracket => break,
                TokenKind::Eof => {
                    return Err(self.error_here("unterminated sequence, expected ']'"));
                }
                _ => {}
            }

            items.push(self.parse_value()?);

            match self.current.kind {
                TokenKind::Comma => {
                    self.advance()?;
                }
                TokenKind::Newline => self.skip_newlines()?,
                TokenKind::RightBracket => {}
                TokenKind::Eof => {
                    return Err(self.error_here("unterminated sequence, expected ']'"));
                }
                _ => {
                    return Err(self.error_here(format!(
                        "expected ',', newline or ']' after value, found {}",
                        self.current.kind
                    )));
                }
            }
        }

        self.advance()?; // consume ']'
        self.depth -= 1;
        Ok(ConfigValue::Sequence(items))
    }
}
