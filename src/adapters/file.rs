// SPDX-License-Identifier: MIT OR Apache-2.0

//! File configuration source adapter.
//!
//! This module provides a `ConfigSource` that reads configuration text from a
//! file on disk. The file is re-read on every call, so a `Config` loaded from a
//! `FileSource` picks up edits on `reload`.

use crate::domain::{ConfigError, Result};
use crate::ports::ConfigSource;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size for configuration text (10MB).
/// This prevents denial of service attacks via extremely large files
pub const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// File name used by [`FileSource::from_default_location`].
pub const DEFAULT_FILE_NAME: &str = "config.cfg";

const SOURCE_NAME: &str = "file";

fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}

/// Configuration source backed by a file.
///
/// The path is canonicalized when the source is created; the file must exist at
/// that point. Reads reject files larger than [`MAX_CONFIG_FILE_SIZE`].
///
/// # Examples
///
/// ```rust,no_run
/// use cfg_lib::adapters::FileSource;
/// use cfg_lib::ports::ConfigSource;
///
/// // Load from a specific file
/// let source = FileSource::new("/etc/myapp/config.cfg").unwrap();
/// let text = source.read_content().unwrap();
///
/// // Load from default OS location
/// let source = FileSource::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    /// Canonical path to the file
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SourceError` if the path does not exist or cannot
    /// be resolved.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Canonicalize path to prevent directory traversal attacks
        let canonical = path.canonicalize().map_err(|e| ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!("Invalid or inaccessible path: {}", display_name(path)),
            source: Some(Box::new(e)),
        })?;

        Ok(Self { path: canonical })
    }

    /// Creates a source for `config.cfg` in the OS-appropriate configuration
    /// directory for the application.
    ///
    /// This method uses the `directories` crate to determine the appropriate
    /// configuration directory for the current operating system.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, DEFAULT_FILE_NAME)
    }

    /// Like [`FileSource::from_default_location`] with a custom file name.
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        Self::new(Self::default_path(app_name, qualifier, filename)?)
    }

    /// Resolves the path a default-location source would use, without
    /// requiring the file to exist.
    pub fn default_path(app_name: &str, qualifier: &str, filename: &str) -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: SOURCE_NAME.to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Ok(proj_dirs.config_dir().join(filename))
    }

    /// Returns the canonical path to the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn read_content(&self) -> Result<String> {
        // Check file size before reading to prevent DoS via large files
        let metadata = fs::metadata(&self.path).map_err(|e| ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!("Failed to read file metadata: {}", display_name(&self.path)),
            source: Some(Box::new(e)),
        })?;

        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: SOURCE_NAME.to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_CONFIG_FILE_SIZE
                ),
                source: None,
            });
        }

        fs::read_to_string(&self.path).map_err(|e| ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!(
                "Failed to read configuration file: {}",
                display_name(&self.path)
            ),
            source: Some(Box::new(e)),
        })
    }

    fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_file_source_reads_content() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "key: 'value'").unwrap();
        temp_file.flush().unwrap();

        let source = FileSource::new(temp_file.path()).unwrap();
        assert_eq!(source.name(), "file");
        assert_eq!(source.read_content().unwrap(), "key: 'value'");
    }

    #[test]
    fn test_file_source_rereads_on_each_call() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "a: 1").unwrap();
        let source = FileSource::new(temp_file.path()).unwrap();
        assert_eq!(source.read_content().unwrap(), "a: 1");

        fs::write(temp_file.path(), "a: 2").unwrap();
        assert_eq!(source.read_content().unwrap(), "a: 2");
    }

    #[test]
    fn test_file_source_nonexistent_file() {
        let result = FileSource::new("/nonexistent/path/to/config.cfg");
        match result {
            Err(ConfigError::SourceError { message, .. }) => {
                assert!(message.contains("config.cfg"));
            }
            other => panic!("expected source error, got {:?}", other),
        }
    }

    #[test]
    fn test_file_source_deleted_after_creation() {
        let temp_file = NamedTempFile::new().unwrap();
        let source = FileSource::new(temp_file.path()).unwrap();
        drop(temp_file);

        assert!(matches!(
            source.read_content(),
            Err(ConfigError::SourceError { .. })
        ));
    }

    #[test]
    fn test_file_source_too_large() {
        let temp_file = NamedTempFile::new().unwrap();
        temp_file
            .as_file()
            .set_len(MAX_CONFIG_FILE_SIZE + 1)
            .unwrap();

        let source = FileSource::new(temp_file.path()).unwrap();
        match source.read_content() {
            Err(ConfigError::SourceError { message, .. }) => {
                assert!(message.contains("too large"));
            }
            other => panic!("expected source error, got {:?}", other),
        }
    }

    #[test]
    fn test_file_source_extension() {
        let temp_file = Builder::new().suffix(".yaml").tempfile().unwrap();
        let source = FileSource::new(temp_file.path()).unwrap();
        assert_eq!(source.extension(), Some("yaml"));

        let temp_file = NamedTempFile::new().unwrap();
        let source = FileSource::new(temp_file.path()).unwrap();
        assert_eq!(source.extension(), None);
    }

    #[test]
    fn test_file_source_path_is_canonical() {
        let temp_file = NamedTempFile::new().unwrap();
        let source = FileSource::new(temp_file.path()).unwrap();
        assert!(source.path().is_absolute());
    }

    #[test]
    fn test_default_path_uses_file_name() {
        // Some CI environments have no home directory.
        if let Ok(path) = FileSource::default_path("cfgtest", "com.example", DEFAULT_FILE_NAME) {
            assert!(path.ends_with("config.cfg"));
        }
    }
}
