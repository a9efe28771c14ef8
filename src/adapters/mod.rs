// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing format and source implementations.
//!
//! This module contains concrete implementations of the traits defined in the
//! ports layer: parsers for each supported text format (`ConfigParser`) and
//! re-readable text sources (`ConfigSource`).

pub mod cfg;
pub mod file;
pub mod memory;
#[cfg(feature = "yaml")]
pub mod yaml;

// Re-export adapters based on feature flags
pub use cfg::{to_cfg_string, CfgParser};
pub use file::FileSource;
pub use memory::StringSource;
#[cfg(feature = "yaml")]
pub use yaml::YamlParser;
