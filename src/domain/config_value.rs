// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with type-safe conversions.
//!
//! This module provides the `ConfigValue` type, the tagged union that every parser
//! produces and every lookup returns. Callers either pattern-match on it or use the
//! conversion methods, which report failures as `TypeConversionError` rather than
//! panicking.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::mapping::Mapping;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A node in a parsed configuration tree.
///
/// # Examples
///
/// ```
/// use cfg_lib::domain::ConfigValue;
///
/// let value = ConfigValue::from(42);
/// assert_eq!(value.as_i64("port").unwrap(), 42);
/// assert_eq!(value.type_name(), "integer");
///
/// let value = ConfigValue::from("Hello, world!");
/// assert_eq!(value.as_str("greeting").unwrap(), "Hello, world!");
/// assert_eq!(value.to_string(), "Hello, world!");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// The `null` keyword
    Null,
    /// `true` or `false`
    Bool(bool),
    /// A number without fraction or exponent
    Integer(i64),
    /// A number with a fraction or exponent
    Float(f64),
    /// A quoted string
    String(String),
    /// A bracketed list of values
    Sequence(Vec<ConfigValue>),
    /// A braced (or top-level) set of key/value pairs
    Mapping(Mapping),
}

impl ConfigValue {
    /// Returns a short name for the kind of value, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Mapping(_) => "mapping",
        }
    }

    /// Returns `true` for the `null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns `true` for strings, numbers, booleans and null.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ConfigValue::Sequence(_) | ConfigValue::Mapping(_))
    }

    /// Returns the value as a string slice.
    ///
    /// Only string values convert; numbers are not stringified implicitly.
    pub fn as_str(&self, key: &str) -> Result<&str> {
        match self {
            ConfigValue::String(s) => Ok(s),
            other => Err(ConfigError::wrong_kind(key, "string", other.type_name())),
        }
    }

    /// Returns an owned copy of a string value.
    pub fn as_string(&self, key: &str) -> Result<String> {
        self.as_str(key).map(str::to_string)
    }

    /// Converts the value to a boolean.
    ///
    /// Boolean values convert directly. String values are accepted when they
    /// spell a boolean (case-insensitive):
    /// - `true`: "true", "yes", "1", "on"
    /// - `false`: "false", "no", "0", "off"
    ///
    /// # Examples
    ///
    /// ```
    /// use cfg_lib::domain::ConfigValue;
    ///
    /// assert!(ConfigValue::Bool(true).as_bool("debug").unwrap());
    /// assert!(ConfigValue::from("yes").as_bool("debug").unwrap());
    /// assert!(ConfigValue::from(1).as_bool("debug").is_err());
    /// ```
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(true),
                "false" | "no" | "0" | "off" => Ok(false),
                _ => s
                    .parse::<bool>()
                    .map_err(|e| ConfigError::TypeConversionError {
                        key: key.to_string(),
                        target_type: "boolean".to_string(),
                        source: Box::new(e),
                    }),
            },
            other => Err(ConfigError::wrong_kind(key, "boolean", other.type_name())),
        }
    }

    /// Converts the value to an `i64`.
    ///
    /// Integers convert directly and strings are parsed. Floats are rejected
    /// rather than truncated.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        match self {
            ConfigValue::Integer(n) => Ok(*n),
            ConfigValue::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e)),
            other => Err(ConfigError::wrong_kind(key, "integer", other.type_name())),
        }
    }

    /// Converts the value to an `i32`.
    pub fn as_i32(&self, key: &str) -> Result<i32> {
        self.narrow(key, "i32")
    }

    /// Converts the value to a `u32`.
    pub fn as_u32(&self, key: &str) -> Result<u32> {
        self.narrow(key, "u32")
    }

    /// Converts the value to a `u64`.
    pub fn as_u64(&self, key: &str) -> Result<u64> {
        self.narrow(key, "u64")
    }

    fn narrow<T>(&self, key: &str, target_type: &str) -> Result<T>
    where
        T: TryFrom<i64, Error = std::num::TryFromIntError>,
    {
        let n = self.as_i64(key)?;
        T::try_from(n).map_err(|e| ConfigError::TypeConversionError {
            key: key.to_string(),
            target_type: target_type.to_string(),
            source: Box::new(e),
        })
    }

    /// Converts the value to an `f64`.
    ///
    /// Integers widen to floats; strings are parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfg_lib::domain::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::from(3).as_f64("ratio").unwrap(), 3.0);
    /// assert_eq!(ConfigValue::from(0.5).as_f64("ratio").unwrap(), 0.5);
    /// ```
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        match self {
            ConfigValue::Float(f) => Ok(*f),
            ConfigValue::Integer(n) => Ok(*n as f64),
            ConfigValue::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e)),
            other => Err(ConfigError::wrong_kind(key, "float", other.type_name())),
        }
    }

    /// Returns the value as a mapping.
    pub fn as_mapping(&self, key: &str) -> Result<&Mapping> {
        match self {
            ConfigValue::Mapping(m) => Ok(m),
            other => Err(ConfigError::wrong_kind(key, "mapping", other.type_name())),
        }
    }

    /// Returns the value as a slice of sequence elements.
    pub fn as_sequence(&self, key: &str) -> Result<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Ok(items),
            other => Err(ConfigError::wrong_kind(key, "sequence", other.type_name())),
        }
    }

    /// Parses a scalar value into any type that implements `FromStr`.
    ///
    /// The scalar's display form is what gets parsed, so `8080` and `'8080'`
    /// both parse as a `u16`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfg_lib::domain::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("127.0.0.1");
    /// let ip: IpAddr = value.parse("server.bind").unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        if !self.is_scalar() {
            return Err(ConfigError::wrong_kind(
                key,
                std::any::type_name::<T>(),
                self.type_name(),
            ));
        }
        self.to_string()
            .parse::<T>()
            .map_err(|e| ConfigError::TypeConversionError {
                key: key.to_string(),
                target_type: std::any::type_name::<T>().to_string(),
                source: Box::new(e),
            })
    }

    /// Looks up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        match self {
            ConfigValue::Mapping(m) => m.get(key),
            _ => None,
        }
    }
}

impl Default for ConfigValue {
    fn default() -> Self {
        ConfigValue::Null
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Integer(n)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Integer(i64::from(n))
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<Mapping> for ConfigValue {
    fn from(m: Mapping) -> Self {
        ConfigValue::Mapping(m)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::Sequence(items)
    }
}

/// Whether `key` can be written without quotes.
pub(crate) fn is_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    starts_ok
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !matches!(key, "true" | "false" | "null")
}

/// Quotes a string the way the CFG format writes it.
///
/// Single quotes are preferred; double quotes are used when that avoids escaping.
pub(crate) fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\0' => out.push_str("\\0"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

// Nested values render as inline CFG text with quoted strings and keys. A
// top-level string renders bare, so printing a looked-up greeting prints just
// the greeting.
fn fmt_nested(value: &ConfigValue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        ConfigValue::String(s) => f.write_str(&quote(s)),
        other => fmt::Display::fmt(other, f),
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => f.write_str("null"),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(n) => write!(f, "{}", n),
            ConfigValue::Float(x) => write!(f, "{:?}", x),
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt_nested(item, f)?;
                }
                f.write_str("]")
            }
            ConfigValue::Mapping(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if is_bare_key(k) {
                        write!(f, "{}: ", k)?;
                    } else {
                        write!(f, "{}: ", quote(k))?;
                    }
                    fmt_nested(v, f)?;
                }
                f.write_str("}")
            }
        }
    }
}
