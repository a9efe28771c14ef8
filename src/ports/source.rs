// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! This module defines the `ConfigSource` trait, the port for *re-readable*
//! configuration text. One-shot streams (`std::io::Read`) are handed to
//! `Config::load` directly and never kept; a `ConfigSource` is what the store
//! remembers so that `reload` can fetch the text again.

use crate::domain::Result;

/// A trait for re-readable configuration text.
///
/// A source holds enough information to produce the text on demand (a path, an
/// in-memory string) but no open handles between reads.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a loaded `Config` can be shared
/// across threads.
///
/// # Examples
///
/// ```rust
/// use cfg_lib::ports::ConfigSource;
/// use cfg_lib::domain::Result;
///
/// struct Inline;
///
/// impl ConfigSource for Inline {
///     fn name(&self) -> &str {
///         "inline"
///     }
///
///     fn read_content(&self) -> Result<String> {
///         Ok("{key: 'Hello, world!'}".to_string())
///     }
/// }
///
/// assert_eq!(Inline.read_content().unwrap(), "{key: 'Hello, world!'}");
/// assert_eq!(Inline.extension(), None);
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the name of this configuration source.
    ///
    /// This name is used for logging and error messages. It should be a short,
    /// descriptive identifier like "file", "string", etc.
    fn name(&self) -> &str;

    /// Reads the complete configuration text.
    ///
    /// Called once on initial load and again on every reload.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The configuration text
    /// * `Err(ConfigError)` - The text could not be read
    fn read_content(&self) -> Result<String>;

    /// Returns the format hint for this source, if any.
    ///
    /// File sources return their file extension so the store can choose a
    /// matching parser. Sources without a hint are parsed with the default parser.
    fn extension(&self) -> Option<&str> {
        None
    }
}
