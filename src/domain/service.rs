// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service trait definition.
//!
//! This module defines the `ConfigurationService` trait, the read-side interface of a
//! loaded configuration. It provides methods for retrieving values by key, checking
//! for key existence, and reloading from the original source.

use crate::domain::{ConfigKey, ConfigValue, Result};

/// The main configuration service trait.
///
/// Implementations own a parsed value tree and answer lookups against it. Lookups
/// never mutate the tree, so a loaded service can be shared between readers;
/// `reload` needs exclusive access.
///
/// # Examples
///
/// ```rust
/// use cfg_lib::domain::{ConfigError, ConfigKey, ConfigValue, ConfigurationService, Result};
///
/// struct Fixed(ConfigValue);
///
/// impl ConfigurationService for Fixed {
///     fn lookup(&self, key: &ConfigKey) -> Result<&ConfigValue> {
///         self.0.get(key.as_str()).ok_or_else(|| ConfigError::KeyNotFound {
///             path: key.to_string(),
///         })
///     }
///
///     fn reload(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait ConfigurationService {
    /// Retrieves the value stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(&ConfigValue)` - The configuration value
    /// * `Err(ConfigError::KeyNotFound)` - Nothing is stored under the key
    /// * `Err(ConfigError::TypeMismatch)` - A path segment crossed a value of the wrong kind
    fn lookup(&self, key: &ConfigKey) -> Result<&ConfigValue>;

    /// Retrieves a value, or returns `default` if the key is absent.
    ///
    /// Any lookup failure falls back to the default, including malformed paths
    /// and type mismatches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cfg_lib::domain::{ConfigError, ConfigKey, ConfigValue, ConfigurationService, Result};
    /// # struct Empty;
    /// # impl ConfigurationService for Empty {
    /// #     fn lookup(&self, key: &ConfigKey) -> Result<&ConfigValue> {
    /// #         Err(ConfigError::KeyNotFound { path: key.to_string() })
    /// #     }
    /// #     fn reload(&mut self) -> Result<()> { Ok(()) }
    /// # }
    /// let service = Empty;
    /// let value = service.get_or_default(&ConfigKey::from("port"), ConfigValue::from(8080));
    /// assert_eq!(value, ConfigValue::Integer(8080));
    /// ```
    fn get_or_default(&self, key: &ConfigKey, default: ConfigValue) -> ConfigValue {
        self.lookup(key).cloned().unwrap_or(default)
    }

    /// Checks if a configuration key resolves to a value.
    fn has(&self, key: &ConfigKey) -> bool {
        self.lookup(key).is_ok()
    }

    /// Reloads the configuration from wherever it was loaded.
    ///
    /// On failure the previously loaded values stay in place.
    fn reload(&mut self) -> Result<()>;
}
