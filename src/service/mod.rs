// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration store.
//!
//! This module contains `Config`, the implementation of the `ConfigurationService`
//! trait that loads text through the ports and resolves lookups against the
//! parsed tree.

pub mod config;

// Re-export commonly used types
pub use config::{Config, ConfigBuilder};
