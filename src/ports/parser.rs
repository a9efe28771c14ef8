// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which provides an interface for
//! parsing configuration text in different formats (CFG, YAML, etc.) into a
//! `ConfigValue` tree.

use crate::domain::{ConfigValue, Result};

/// A trait for parsing configuration text.
///
/// Parsers turn the complete text of one document into a value tree. The root is
/// usually a mapping, but formats that allow a top-level list may return a
/// sequence. Syntax problems are reported as `ConfigError::SyntaxError` with the
/// position of the first error; parsing stops there.
///
/// # Examples
///
/// ```rust
/// use cfg_lib::ports::ConfigParser;
/// use cfg_lib::domain::{ConfigValue, Mapping, Result};
///
/// struct KeyEqualsValue;
///
/// impl ConfigParser for KeyEqualsValue {
///     fn parse(&self, content: &str) -> Result<ConfigValue> {
///         let map: Mapping = content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.trim(), ConfigValue::from(v.trim())))
///             .collect();
///         Ok(ConfigValue::from(map))
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["kv"]
///     }
/// }
///
/// let root = KeyEqualsValue.parse("name = demo").unwrap();
/// assert_eq!(root.get("name"), Some(&ConfigValue::from("demo")));
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses configuration content into a value tree.
    ///
    /// # Arguments
    ///
    /// * `content` - The complete text of the configuration document
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigValue)` - The root of the parsed tree
    /// * `Err(ConfigError)` - The text is malformed
    fn parse(&self, content: &str) -> Result<ConfigValue>;

    /// Returns the file extensions supported by this parser.
    ///
    /// This allows the configuration store to pick the appropriate parser based on
    /// the file extension. Extensions are given without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Returns `true` if this parser handles files with the given extension.
    ///
    /// The comparison is ASCII case-insensitive.
    fn supports_extension(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mapping;

    // Test implementation of ConfigParser for testing purposes
    struct TestParser;

    impl ConfigParser for TestParser {
        fn parse(&self, _content: &str) -> Result<ConfigValue> {
            let map: Mapping = vec![("test.key", ConfigValue::from("test.value"))]
                .into_iter()
                .collect();
            Ok(ConfigValue::from(map))
        }

        fn supported_extensions(&self) -> &[&str] {
            &["test", "tst"]
        }
    }

    #[test]
    fn test_parser_parse() {
        let parser = TestParser;
        let result = parser.parse("dummy content").unwrap();
        assert_eq!(result.get("test.key"), Some(&ConfigValue::from("test.value")));
    }

    #[test]
    fn test_parser_supported_extensions() {
        let parser = TestParser;
        assert_eq!(parser.supported_extensions(), &["test", "tst"]);
    }

    #[test]
    fn test_supports_extension_ignores_case() {
        let parser = TestParser;
        assert!(parser.supports_extension("TST"));
        assert!(parser.supports_extension("test"));
        assert!(!parser.supports_extension("yaml"));
    }

    #[test]
    fn test_parser_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ConfigParser>();
    }
}
