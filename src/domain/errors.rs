// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the error types that can occur when parsing configuration
//! text and looking values up in a loaded configuration. All errors use `thiserror`
//! for proper error handling and conversion.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// A location in configuration source text.
///
/// Both fields are 1-based. Columns count characters, not bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number, starting at 1
    pub line: usize,
    /// Column number, starting at 1
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The main error type for configuration operations.
///
/// This enum represents all possible errors that can occur when reading, parsing,
/// or accessing configuration values. It is marked as `#[non_exhaustive]` to allow
/// for future additions without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use cfg_lib::domain::errors::ConfigError;
///
/// fn get_config_value() -> Result<String, ConfigError> {
///     Err(ConfigError::KeyNotFound {
///         path: "database.host".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration text is malformed.
    #[error("Syntax error at {line}:{column}: {message}")]
    SyntaxError {
        /// Line of the offending token (1-based)
        line: usize,
        /// Column of the offending token (1-based)
        column: usize,
        /// What went wrong
        message: String,
    },

    /// The requested path does not exist in the loaded configuration.
    #[error("Configuration key not found: {path}")]
    KeyNotFound {
        /// The path that was not found
        path: String,
    },

    /// A path segment tried to descend into a value of the wrong kind.
    #[error("Type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        /// The path up to and including the offending segment
        path: String,
        /// The kind of value the segment needed
        expected: String,
        /// The kind of value actually present
        found: String,
    },

    /// A lookup path could not be parsed.
    #[error("Invalid configuration path '{path}': {message}")]
    InvalidPath {
        /// The malformed path
        path: String,
        /// Why it is malformed
        message: String,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A value cannot be written back out as configuration text.
    #[error("Failed to serialize configuration: {message}")]
    SerializeError {
        /// The error message
        message: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a `SyntaxError` at the given position.
    pub fn syntax(position: Position, message: impl Into<String>) -> Self {
        ConfigError::SyntaxError {
            line: position.line,
            column: position.column,
            message: message.into(),
        }
    }

    /// Returns the source position for syntax errors.
    pub fn position(&self) -> Option<Position> {
        match self {
            ConfigError::SyntaxError { line, column, .. } => Some(Position::new(*line, *column)),
            _ => None,
        }
    }

    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError for a value of the wrong kind.
    ///
    /// Used when no parse was attempted at all, e.g. asking a mapping for a boolean.
    pub fn wrong_kind(key: &str, target_type: &str, found: &str) -> Self {
        ConfigError::TypeConversionError {
            key: key.to_string(),
            target_type: target_type.to_string(),
            source: format!("value is {}", found).into(),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let error = ConfigError::syntax(Position::new(3, 7), "unterminated string");
        assert_eq!(error.to_string(), "Syntax error at 3:7: unterminated string");
        assert_eq!(error.position(), Some(Position::new(3, 7)));
    }

    #[test]
    fn test_key_not_found_error() {
        let error = ConfigError::KeyNotFound {
            path: "test.key".to_string(),
        };
        assert_eq!(error.to_string(), "Configuration key not found: test.key");
        assert_eq!(error.position(), None);
    }

    #[test]
    fn test_type_mismatch_error() {
        let error = ConfigError::TypeMismatch {
            path: "a.b".to_string(),
            expected: "mapping".to_string(),
            found: "integer".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Type mismatch at 'a.b': expected mapping, found integer"
        );
    }

    #[test]
    fn test_invalid_path_error() {
        let error = ConfigError::InvalidPath {
            path: "a..b".to_string(),
            message: "empty segment".to_string(),
        };
        assert!(error.to_string().contains("a..b"));
        assert!(error.to_string().contains("empty segment"));
    }

    #[test]
    fn test_type_conversion_error() {
        let source_error = "invalid value".parse::<i32>().unwrap_err();
        let error = ConfigError::TypeConversionError {
            key: "test.key".to_string(),
            target_type: "i32".to_string(),
            source: Box::new(source_error),
        };
        assert!(error.to_string().contains("test.key"));
        assert!(error.to_string().contains("i32"));
    }

    #[test]
    fn test_wrong_kind() {
        let error = ConfigError::wrong_kind("db", "boolean", "mapping");
        assert!(matches!(error, ConfigError::TypeConversionError { .. }));
        assert!(error.to_string().contains("value is mapping"));
    }

    #[test]
    fn test_source_error() {
        let error = ConfigError::SourceError {
            source_name: "file".to_string(),
            message: "Failed to read file".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Configuration source 'file' error: Failed to read file"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ConfigError::from(io_error);
        assert!(matches!(error, ConfigError::IoError(_)));
    }

    #[test]
    fn test_from_parse_int_error() {
        let parse_err = "not_a_number".parse::<i32>().unwrap_err();
        let error = ConfigError::from_parse_int_error("test.key".to_string(), parse_err);
        assert!(matches!(error, ConfigError::TypeConversionError { .. }));
        assert!(error.to_string().contains("integer"));
    }

    #[test]
    fn test_from_parse_float_error() {
        let parse_err = "not_a_float".parse::<f64>().unwrap_err();
        let error = ConfigError::from_parse_float_error("test.key".to_string(), parse_err);
        assert!(error.to_string().contains("float"));
    }

    #[test]
    fn test_position_default_is_origin() {
        assert_eq!(Position::default(), Position::new(1, 1));
        assert_eq!(Position::new(2, 9).to_string(), "2:9");
    }
}
