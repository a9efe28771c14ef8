// SPDX-License-Identifier: MIT OR Apache-2.0

//! A parser and lookup store for the CFG configuration format.
//!
//! CFG text is a nested structure of mappings, sequences and scalar literals:
//!
//! ```text
//! name: 'demo'
//! server: {host: 'localhost', ports: [80, 443]}
//! ```
//!
//! This crate parses such text into a [`ConfigValue`](domain::ConfigValue) tree
//! and answers lookups by key or by path (`server.ports[0]`).
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`ConfigValue`, `Mapping`, `ConfigKey`, errors)
//! - **Ports**: Trait definitions that define interfaces (`ConfigParser`, `ConfigSource`)
//! - **Adapters**: The CFG parser and writer, the YAML parser, file and string sources
//! - **Service**: `Config`, the store that loads text and resolves lookups
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//!
//! # Quick Start
//!
//! ```rust
//! use cfg_lib::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let config = Config::from_reader("{key: 'Hello, world!'}".as_bytes())?;
//! println!("{} (cfg-lib {})", config["key"], cfg_lib::VERSION);
//!
//! assert_eq!(config.get_str("key")?, "Hello, world!");
//! assert!(matches!(config.get("nope"), Err(ConfigError::KeyNotFound { .. })));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// The crate version, fixed at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The store and the value types a client needs to load and query text.
///
/// ```rust
/// use cfg_lib::config::*;
/// use std::io::Cursor;
///
/// let mut cfg = Config::new();
/// cfg.load(Box::new(Cursor::new("key: 'Hello, world!'"))).unwrap();
/// assert_eq!(cfg.get("key").unwrap().to_string(), "Hello, world!");
/// ```
pub mod config {
    pub use crate::domain::{ConfigError, ConfigValue};
    pub use crate::service::{Config, ConfigBuilder};
}

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{to_cfg_string, CfgParser, FileSource, StringSource};
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigValue, ConfigurationService, Mapping, Result,
    };
    pub use crate::ports::{ConfigParser, ConfigSource};
    pub use crate::service::{Config, ConfigBuilder};

    // Re-export adapters based on feature flags
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
}
