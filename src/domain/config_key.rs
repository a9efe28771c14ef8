// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key newtype for type-safe key handling.
//!
//! This module provides the `ConfigKey` type, a newtype wrapper around `String`
//! naming a value in a loaded configuration, and `PathSegment`, the parsed form
//! of a dotted/indexed lookup path such as `servers[0].host`.

use crate::domain::errors::{ConfigError, Result};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One step of a lookup path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// Descend into a mapping by key
    Key(String),
    /// Descend into a sequence by position; negative values count from the end
    Index(i64),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => f.write_str(k),
            PathSegment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// A type-safe wrapper for configuration keys.
///
/// `ConfigKey` is a newtype that wraps a `String` to provide type safety when working
/// with configuration keys. A key is either a plain top-level name or a path made of
/// `.`-separated names and `[n]` indices.
///
/// # Examples
///
/// ```
/// use cfg_lib::domain::config_key::{ConfigKey, PathSegment};
///
/// let key = ConfigKey::from("servers[1].host");
/// assert_eq!(
///     key.segments().unwrap(),
///     vec![
///         PathSegment::Key("servers".to_string()),
///         PathSegment::Index(1),
///         PathSegment::Key("host".to_string()),
///     ]
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Splits the key into path segments.
    ///
    /// Names are separated by `.`; `[n]` selects a sequence element and may
    /// follow a name directly or start the path. Empty names, unterminated
    /// brackets and non-integer indices are rejected with `InvalidPath`.
    pub fn segments(&self) -> Result<Vec<PathSegment>> {
        let path = self.0.as_str();
        let invalid = |message: &str| ConfigError::InvalidPath {
            path: path.to_string(),
            message: message.to_string(),
        };

        if path.is_empty() {
            return Err(invalid("path is empty"));
        }

        let mut segments = Vec::new();
        let mut rest = path;
        // A name is required at the start and after every '.'
        let mut expect_name = !rest.starts_with('[');

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('[') {
                let close = after
                    .find(']')
                    .ok_or_else(|| invalid("unterminated '['"))?;
                let index = after[..close]
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| invalid("index must be an integer"))?;
                segments.push(PathSegment::Index(index));
                rest = &after[close + 1..];
                expect_name = false;
            } else if let Some(after) = rest.strip_prefix('.') {
                if expect_name {
                    return Err(invalid("empty segment"));
                }
                rest = after;
                expect_name = true;
                if rest.is_empty() || rest.starts_with('.') || rest.starts_with('[') {
                    return Err(invalid("empty segment"));
                }
            } else {
                if !expect_name {
                    return Err(invalid("expected '.' or '[' after index"));
                }
                let end = rest.find(['.', '[', ']']).unwrap_or(rest.len());
                if end == 0 {
                    return Err(invalid("unexpected ']'"));
                }
                segments.push(PathSegment::Key(rest[..end].to_string()));
                rest = &rest[end..];
                expect_name = false;
            }
        }

        Ok(segments)
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Hash for ConfigKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn key(s: &str) -> PathSegment {
        PathSegment::Key(s.to_string())
    }

    #[test]
    fn test_config_key_basics() {
        let key = ConfigKey::new("test.key".to_string());
        assert_eq!(key.as_str(), "test.key");
        assert_eq!(format!("{}", key), "test.key");
        assert_eq!(key.clone().into_string(), "test.key");
        let s: String = key.into();
        assert_eq!(s, "test.key");
    }

    #[test]
    fn test_config_key_hash() {
        let mut map = HashMap::new();
        map.insert(ConfigKey::from("test.key"), "value1");

        assert_eq!(map.get(&ConfigKey::from("test.key")), Some(&"value1"));
        assert_eq!(map.get(&ConfigKey::from("other.key")), None);
    }

    #[test]
    fn test_segments_single() {
        assert_eq!(ConfigKey::from("key").segments().unwrap(), vec![key("key")]);
    }

    #[test]
    fn test_segments_dotted() {
        assert_eq!(
            ConfigKey::from("database.connection.host").segments().unwrap(),
            vec![key("database"), key("connection"), key("host")]
        );
    }

    #[test]
    fn test_segments_indices() {
        assert_eq!(
            ConfigKey::from("servers[0].ports[-1]").segments().unwrap(),
            vec![
                key("servers"),
                PathSegment::Index(0),
                key("ports"),
                PathSegment::Index(-1)
            ]
        );
        assert_eq!(
            ConfigKey::from("matrix[1][2]").segments().unwrap(),
            vec![key("matrix"), PathSegment::Index(1), PathSegment::Index(2)]
        );
    }

    #[test]
    fn test_segments_leading_index() {
        assert_eq!(
            ConfigKey::from("[2].name").segments().unwrap(),
            vec![PathSegment::Index(2), key("name")]
        );
    }

    #[test]
    fn test_segments_invalid() {
        for bad in ["", "a..b", ".a", "a.", "a[", "a[x]", "a]", "a[0]b", "a.[0]"] {
            let err = ConfigKey::from(bad).segments().unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidPath { .. }),
                "expected InvalidPath for {:?}, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_path_segment_display() {
        assert_eq!(key("a").to_string(), "a");
        assert_eq!(PathSegment::Index(-2).to_string(), "[-2]");
    }
}
