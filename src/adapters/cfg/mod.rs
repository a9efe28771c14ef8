// SPDX-License-Identifier: MIT OR Apache-2.0

//! CFG format adapter.
//!
//! CFG is a small brace-and-bracket configuration notation:
//!
//! ```text
//! # comments run to end of line
//! name: 'demo'
//! server = {
//!     host: "localhost", port: 8080
//!     tls: true
//! }
//! tags: ['a', 'b',]
//! ```
//!
//! The root may be written with or without surrounding braces. Parsing stops at
//! the first error, reported as `ConfigError::SyntaxError` with a 1-based line
//! and column.

mod lexer;
mod parser;
mod writer;

pub use writer::to_cfg_string;

use crate::domain::{ConfigValue, Result};
use crate::ports::ConfigParser;

/// Parser for CFG text.
///
/// # Examples
///
/// ```rust
/// use cfg_lib::adapters::CfgParser;
/// use cfg_lib::domain::ConfigValue;
/// use cfg_lib::ports::ConfigParser;
///
/// let root = CfgParser::new().parse("{key: 'Hello, world!'}").unwrap();
/// assert_eq!(root.get("key"), Some(&ConfigValue::from("Hello, world!")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CfgParser {
    allow_duplicates: bool,
}

impl CfgParser {
    /// Creates a parser that rejects duplicate keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// When `true`, a repeated key replaces the earlier value instead of
    /// failing. The key keeps its first position.
    pub fn allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }
}

impl ConfigParser for CfgParser {
    fn parse(&self, content: &str) -> Result<ConfigValue> {
        parser::Parser::new(content, self.allow_duplicates)?.parse_document()
    }

    fn supported_extensions(&self) -> &[&str] {
        &["cfg", "conf"]
    }
}
