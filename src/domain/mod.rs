// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the core domain types for the configuration crate: the
//! parsed value tree, lookup keys and paths, and the error taxonomy. It is
//! independent of any concrete text format or source.

pub mod config_key;
pub mod config_value;
pub mod errors;
pub mod mapping;
pub mod service;

// Re-export commonly used types
pub use config_key::{ConfigKey, PathSegment};
pub use config_value::ConfigValue;
pub use errors::{ConfigError, Position, Result};
pub use mapping::Mapping;
pub use service::ConfigurationService;
