// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration store.
//!
//! `Config` owns one parsed value tree and answers lookups against it. The tree
//! is replaced as a whole by `load*` and `reload`; nothing else mutates it, so a
//! loaded `Config` can be shared between threads without locking.

use crate::adapters::file::MAX_CONFIG_FILE_SIZE;
use crate::adapters::{CfgParser, FileSource, StringSource};
use crate::domain::{
    ConfigError, ConfigKey, ConfigValue, ConfigurationService, Mapping, PathSegment, Result,
};
use crate::ports::{ConfigParser, ConfigSource};
use std::fmt;
use std::io::{self, Read};
use std::ops::Index;
use std::path::Path;
use std::str::FromStr;

/// A loaded configuration.
///
/// Lookup paths name a top-level key (`"name"`), descend through mappings with
/// `.` (`"server.host"`) and index sequences with `[n]` (`"servers[0].host"`,
/// negative indices count from the end). A top-level key that matches the whole
/// path wins over path interpretation, so a key literally named `"a.b"` is still
/// reachable.
///
/// # Examples
///
/// ```rust
/// use cfg_lib::service::Config;
///
/// # fn main() -> cfg_lib::domain::Result<()> {
/// let config: Config = "{key: 'Hello, world!', server: {ports: [80, 443]}}".parse()?;
///
/// assert_eq!(config.get("key")?.as_str("key")?, "Hello, world!");
/// assert_eq!(config.get_i64("server.ports[-1]")?, 443);
/// assert_eq!(config["key"].to_string(), "Hello, world!");
/// # Ok(())
/// # }
/// ```
pub struct Config {
    /// Root of the parsed tree
    root: ConfigValue,
    /// Whether `.` and `[n]` in lookups descend into the tree
    path_lookup: bool,
    /// Parser for CFG text, also used when no other parser matches
    default_parser: CfgParser,
    /// Additional parsers selected by source extension
    parsers: Vec<Box<dyn ConfigParser>>,
    /// Where the current tree came from, if it can be read again
    source: Option<Box<dyn ConfigSource>>,
}

impl Config {
    /// Creates an empty configuration with default settings.
    ///
    /// Every lookup fails with `KeyNotFound` until something is loaded.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cfg_lib::service::Config;
    ///
    /// # fn main() -> cfg_lib::domain::Result<()> {
    /// let mut config = Config::builder().path_lookup(false).build();
    /// config.load_str("{'a.b': 1, a: {b: 2}}")?;
    /// assert_eq!(config.get_i64("a.b")?, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Reads CFG text from `reader` to exhaustion and parses it.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut config = Self::new();
        config.load(reader)?;
        Ok(config)
    }

    /// Loads the file at `path`, choosing the parser by file extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::new();
        config.load_file(path)?;
        Ok(config)
    }

    /// Replaces the configuration with CFG text read from `reader`.
    ///
    /// The reader is consumed and not kept, so a configuration loaded this way
    /// cannot be reloaded. Non-UTF-8 input fails with an `IoError` of kind
    /// `InvalidData`.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<()> {
        let content = read_bounded(reader)?;
        let root = self.default_parser.parse(&content)?;
        self.commit(root, None, "reader");
        Ok(())
    }

    /// Replaces the configuration with the given CFG text.
    ///
    /// The text is remembered, so `reload` parses it again.
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        self.load_source(Box::new(StringSource::new(content)))
    }

    /// Replaces the configuration with the file at `path`.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.load_source(Box::new(FileSource::new(path)?))
    }

    /// Replaces the configuration with the text of `source` and remembers the
    /// source for `reload`.
    pub fn load_source(&mut self, source: Box<dyn ConfigSource>) -> Result<()> {
        let root = self.read_source(&*source)?;
        let name = source.name().to_string();
        self.commit(root, Some(source), &name);
        Ok(())
    }

    /// Reads and parses the remembered source again.
    ///
    /// On failure the current values are kept and the error is returned.
    ///
    /// # Errors
    ///
    /// Fails with `SourceError` when the configuration was loaded from a
    /// reader, or was never loaded.
    pub fn reload(&mut self) -> Result<()> {
        let source = self.source.as_deref().ok_or_else(|| ConfigError::SourceError {
            source_name: "config".to_string(),
            message: "nothing to reload: configuration was not loaded from a re-readable source"
                .to_string(),
            source: None,
        })?;

        match self.read_source(source) {
            Ok(root) => {
                tracing::debug!(
                    "Reloaded configuration from '{}' ({} entries)",
                    source.name(),
                    entry_count(&root)
                );
                self.root = root;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "Reload from '{}' failed, keeping previous configuration: {}",
                    source.name(),
                    e
                );
                Err(e)
            }
        }
    }

    fn read_source(&self, source: &dyn ConfigSource) -> Result<ConfigValue> {
        let content = source.read_content()?;
        self.parser_for(source.extension()).parse(&content)
    }

    fn parser_for(&self, extension: Option<&str>) -> &dyn ConfigParser {
        if let Some(ext) = extension {
            if let Some(parser) = self.parsers.iter().find(|p| p.supports_extension(ext)) {
                tracing::trace!("Selected parser for extension '{}'", ext);
                return &**parser;
            }
        }
        &self.default_parser
    }

    fn commit(&mut self, root: ConfigValue, source: Option<Box<dyn ConfigSource>>, name: &str) {
        tracing::debug!(
            "Loaded configuration from '{}' ({} entries)",
            name,
            entry_count(&root)
        );
        self.root = root;
        self.source = source;
    }

    /// Looks up `path`.
    ///
    /// # Errors
    ///
    /// * `KeyNotFound` - nothing is stored at the path
    /// * `TypeMismatch` - a segment tried to descend into a scalar, or used a
    ///   name on a sequence / an index on a mapping
    /// * `InvalidPath` - the path is malformed
    pub fn get(&self, path: &str) -> Result<&ConfigValue> {
        if let ConfigValue::Mapping(map) = &self.root {
            if let Some(value) = map.get(path) {
                return Ok(value);
            }
        }

        let not_found = || ConfigError::KeyNotFound {
            path: path.to_string(),
        };
        if !self.path_lookup {
            return Err(not_found());
        }

        let segments = ConfigKey::from(path).segments()?;
        let mut current = &self.root;
        let mut walked = String::new();

        for segment in segments {
            match &segment {
                PathSegment::Key(name) => {
                    if !walked.is_empty() {
                        walked.push('.');
                    }
                    walked.push_str(name);
                }
                PathSegment::Index(_) => walked.push_str(&segment.to_string()),
            }

            current = match (segment, current) {
                (PathSegment::Key(name), ConfigValue::Mapping(map)) => {
                    map.get(&name).ok_or_else(not_found)?
                }
                (PathSegment::Index(i), ConfigValue::Sequence(items)) => {
                    let len = items.len() as i64;
                    let at = if i < 0 { len + i } else { i };
                    if at < 0 || at >= len {
                        return Err(not_found());
                    }
                    &items[at as usize]
                }
                (PathSegment::Key(_), other) => {
                    return Err(mismatch(walked, "mapping", other));
                }
                (PathSegment::Index(_), other) => {
                    return Err(mismatch(walked, "sequence", other));
                }
            };
        }

        Ok(current)
    }

    /// Looks up `path`, returning `default` on any lookup failure.
    pub fn get_or_default(&self, path: &str, default: impl Into<ConfigValue>) -> ConfigValue {
        self.get(path).cloned().unwrap_or_else(|_| default.into())
    }

    /// Returns `true` if `path` resolves to a value.
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_ok()
    }

    /// Looks up a string value.
    pub fn get_str(&self, path: &str) -> Result<&str> {
        self.get(path)?.as_str(path)
    }

    /// Looks up a boolean value.
    pub fn get_bool(&self, path: &str) -> Result<bool> {
        self.get(path)?.as_bool(path)
    }

    /// Looks up an integer value.
    pub fn get_i64(&self, path: &str) -> Result<i64> {
        self.get(path)?.as_i64(path)
    }

    /// Looks up a float value. Integers widen.
    pub fn get_f64(&self, path: &str) -> Result<f64> {
        self.get(path)?.as_f64(path)
    }

    /// Looks up a scalar and parses it with `FromStr`.
    ///
    /// ```rust
    /// use cfg_lib::service::Config;
    /// use std::net::IpAddr;
    ///
    /// # fn main() -> cfg_lib::domain::Result<()> {
    /// let config: Config = "bind: '127.0.0.1'".parse()?;
    /// let ip: IpAddr = config.get_as("bind")?;
    /// assert!(ip.is_loopback());
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_as<T>(&self, path: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.get(path)?.parse(path)
    }

    /// Returns the root of the loaded tree.
    pub fn root(&self) -> &ConfigValue {
        &self.root
    }

    /// Iterates over the top-level keys in document order.
    ///
    /// Empty when the root is not a mapping.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        let map = match &self.root {
            ConfigValue::Mapping(map) => Some(map),
            _ => None,
        };
        map.into_iter().flat_map(|m| m.keys())
    }

    /// Name of the remembered source, if the configuration can be reloaded.
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.name())
    }
}

fn mismatch(path: String, expected: &str, found: &ConfigValue) -> ConfigError {
    ConfigError::TypeMismatch {
        path,
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}

fn entry_count(root: &ConfigValue) -> usize {
    match root {
        ConfigValue::Mapping(map) => map.len(),
        ConfigValue::Sequence(items) => items.len(),
        _ => 1,
    }
}

fn read_bounded<R: Read>(reader: R) -> Result<String> {
    let mut buf = Vec::new();
    reader.take(MAX_CONFIG_FILE_SIZE + 1).read_to_end(&mut buf)?;
    if buf.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::SourceError {
            source_name: "reader".to_string(),
            message: format!(
                "Configuration text too large (max {} bytes)",
                MAX_CONFIG_FILE_SIZE
            ),
            source: None,
        });
    }
    String::from_utf8(buf)
        .map_err(|e| ConfigError::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("root", &self.root)
            .field("path_lookup", &self.path_lookup)
            .field("source", &self.source_name())
            .finish()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let mut config = Self::new();
        config.load_str(s)?;
        Ok(config)
    }
}

/// Panics if the lookup fails; use [`Config::get`] for the fallible form.
impl Index<&str> for Config {
    type Output = ConfigValue;

    fn index(&self, path: &str) -> &ConfigValue {
        match self.get(path) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl ConfigurationService for Config {
    fn lookup(&self, key: &ConfigKey) -> Result<&ConfigValue> {
        self.get(key.as_str())
    }

    fn reload(&mut self) -> Result<()> {
        Config::reload(self)
    }
}

/// Builder for [`Config`].
///
/// # Examples
///
/// ```rust
/// use cfg_lib::service::Config;
///
/// let config = Config::builder()
///     .allow_duplicate_keys(true)
///     .path_lookup(true)
///     .build();
/// assert_eq!(config.keys().count(), 0);
/// ```
pub struct ConfigBuilder {
    path_lookup: bool,
    allow_duplicates: bool,
    parsers: Vec<Box<dyn ConfigParser>>,
}

impl ConfigBuilder {
    /// Creates a builder with path lookup on, duplicate keys rejected, and the
    /// YAML parser registered when the `yaml` feature is enabled.
    pub fn new() -> Self {
        #[allow(unused_mut)]
        let mut parsers: Vec<Box<dyn ConfigParser>> = Vec::new();
        #[cfg(feature = "yaml")]
        parsers.push(Box::new(crate::adapters::YamlParser::new()));

        Self {
            path_lookup: true,
            allow_duplicates: false,
            parsers,
        }
    }

    /// Enables or disables `.` / `[n]` path interpretation in lookups.
    ///
    /// When disabled, only exact top-level keys resolve.
    pub fn path_lookup(mut self, enabled: bool) -> Self {
        self.path_lookup = enabled;
        self
    }

    /// Lets a repeated key in CFG text replace the earlier value instead of
    /// failing to parse.
    pub fn allow_duplicate_keys(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// Registers a parser for the extensions it reports.
    ///
    /// Parsers added later take precedence over earlier ones for the same
    /// extension.
    pub fn with_parser(mut self, parser: Box<dyn ConfigParser>) -> Self {
        self.parsers.insert(0, parser);
        self
    }

    /// Builds an empty configuration.
    pub fn build(self) -> Config {
        Config {
            root: ConfigValue::Mapping(Mapping::new()),
            path_lookup: self.path_lookup,
            default_parser: CfgParser::new().allow_duplicates(self.allow_duplicates),
            parsers: self.parsers,
            source: None,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
