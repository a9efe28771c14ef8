// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory configuration source.

use crate::domain::Result;
use crate::ports::ConfigSource;

/// A `ConfigSource` holding its text in memory.
///
/// Used when a `Config` is built from a string, so that `reload` has something
/// to re-read. An optional format hint selects the parser the same way a file
/// extension does.
#[derive(Debug, Clone)]
pub struct StringSource {
    content: String,
    format: Option<String>,
}

impl StringSource {
    /// Creates a source over `content` with no format hint.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: None,
        }
    }

    /// Sets the format hint, e.g. `"yaml"`.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Returns the held text.
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl ConfigSource for StringSource {
    fn name(&self) -> &str {
        "string"
    }

    fn read_content(&self) -> Result<String> {
        Ok(self.content.clone())
    }

    fn extension(&self) -> Option<&str> {
        self.format.as_deref()
    }
}
