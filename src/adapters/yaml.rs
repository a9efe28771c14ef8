// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML parser adapter.
//!
//! This module provides a `ConfigParser` for YAML documents so that a `Config`
//! can load `.yaml` / `.yml` files into the same value tree as CFG text.

use crate::domain::{ConfigError, ConfigValue, Mapping, Position, Result};
use crate::ports::ConfigParser;

/// YAML parser implementation.
///
/// Converts a YAML document into a `ConfigValue` tree. Mapping keys keep their
/// document order; scalar keys that are not strings (numbers, booleans) are
/// converted to their text form, and two keys with the same text are a
/// duplicate-key error. Tagged values are read as their inner value.
///
/// # Examples
///
/// ```rust
/// use cfg_lib::adapters::YamlParser;
/// use cfg_lib::domain::ConfigValue;
/// use cfg_lib::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let root = parser.parse("database:\n  host: localhost\n  port: 5432").unwrap();
/// let database = root.get("database").unwrap();
/// assert_eq!(database.get("port"), Some(&ConfigValue::Integer(5432)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    fn convert(value: serde_yaml::Value) -> Result<ConfigValue> {
        Ok(match value {
            serde_yaml::Value::Null => ConfigValue::Null,
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(b),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => match n.as_f64() {
                    Some(f) => ConfigValue::Float(f),
                    None => {
                        return Err(ConfigError::syntax(
                            Position::default(),
                            format!("unsupported YAML number {}", n),
                        ))
                    }
                },
            },
            serde_yaml::Value::String(s) => ConfigValue::String(s),
            serde_yaml::Value::Sequence(seq) => ConfigValue::Sequence(
                seq.into_iter()
                    .map(Self::convert)
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_yaml::Value::Mapping(map) => {
                let mut out = Mapping::new();
                for (key, val) in map {
                    let key = Self::key_text(key)?;
                    if out.try_insert(key.as_str(), Self::convert(val)?).is_err() {
                        return Err(ConfigError::syntax(
                            Position::default(),
                            format!("duplicate key '{}'", key),
                        ));
                    }
                }
                ConfigValue::Mapping(out)
            }
            serde_yaml::Value::Tagged(tagged) => Self::convert(tagged.value)?,
        })
    }

    fn key_text(key: serde_yaml::Value) -> Result<String> {
        match key {
            serde_yaml::Value::String(s) => Ok(s),
            serde_yaml::Value::Number(n) => Ok(n.to_string()),
            serde_yaml::Value::Bool(b) => Ok(b.to_string()),
            serde_yaml::Value::Null => Ok("null".to_string()),
            other => Err(ConfigError::syntax(
                Position::default(),
                format!("unsupported YAML mapping key {:?}", other),
            )),
        }
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<ConfigValue> {
        let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| {
            let position = e
                .location()
                .map(|loc| Position::new(loc.line(), loc.column()))
                .unwrap_or_default();
            ConfigError::syntax(position, format!("invalid YAML: {}", e))
        })?;

        // An empty document is an empty configuration.
        match value {
            serde_yaml::Value::Null => Ok(ConfigValue::Mapping(Mapping::new())),
            other => Self::convert(other),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}
