// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helper utilities shared by the integration tests.

use cfg_lib::domain::{ConfigError, Result};
use cfg_lib::ports::ConfigSource;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Writes `content` to a new temporary file with the given extension.
#[allow(dead_code)]
pub fn temp_config(content: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("cfg-test-")
        .suffix(&format!(".{}", extension))
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// A configuration source whose text and availability tests can change
/// after it has been handed to a `Config`.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct MockSource {
    content: Arc<Mutex<String>>,
    failing: Arc<AtomicBool>,
    reads: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockSource {
    /// Creates a mock source holding `content`.
    pub fn new(content: &str) -> Self {
        let source = Self::default();
        source.set_content(content);
        source
    }

    /// Replaces the text returned by subsequent reads.
    pub fn set_content(&self, content: &str) {
        *self.content.lock().unwrap() = content.to_string();
    }

    /// Makes subsequent reads fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of reads performed so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl ConfigSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn read_content(&self) -> Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ConfigError::SourceError {
                source_name: "mock".to_string(),
                message: "Simulated read failure".to_string(),
                source: None,
            });
        }
        Ok(self.content.lock().unwrap().clone())
    }
}
