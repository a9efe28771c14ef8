// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for reloading a configuration from its source.

mod common;

use cfg_lib::prelude::*;
use common::{temp_config, MockSource};
use std::fs;

#[test]
fn test_manual_reload_from_file() {
    let file = temp_config("key: 'initial_value'\n", "cfg");

    let mut config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.get_str("key").unwrap(), "initial_value");

    // Update file
    fs::write(file.path(), "key: 'updated_value'\nextra: 1\n").unwrap();

    // Value should still be old before reload
    assert_eq!(config.get_str("key").unwrap(), "initial_value");
    assert!(!config.has("extra"));

    config.reload().unwrap();

    assert_eq!(config.get_str("key").unwrap(), "updated_value");
    assert_eq!(config.get_i64("extra").unwrap(), 1);
}

#[test]
fn test_reload_with_syntax_error_keeps_previous_values() {
    let file = temp_config("{port: 8080}", "cfg");
    let mut config = Config::from_file(file.path()).unwrap();

    fs::write(file.path(), "{port: }").unwrap();
    let err = config.reload().unwrap_err();

    assert!(matches!(err, ConfigError::SyntaxError { line: 1, column: 8, .. }));
    assert_eq!(config.get_i64("port").unwrap(), 8080);
}

#[test]
fn test_reload_after_file_removed_keeps_previous_values() {
    let file = temp_config("{port: 8080}", "cfg");
    let mut config = Config::from_file(file.path()).unwrap();
    drop(file);

    let err = config.reload().unwrap_err();
    assert!(matches!(err, ConfigError::SourceError { .. }));
    assert_eq!(config.get_i64("port").unwrap(), 8080);
}

#[test]
#[cfg(feature = "yaml")]
fn test_reload_yaml_file() {
    let file = temp_config("level: info\n", "yml");
    let mut config = Config::from_file(file.path()).unwrap();

    fs::write(file.path(), "level: debug\n").unwrap();
    config.reload().unwrap();

    assert_eq!(config.get_str("level").unwrap(), "debug");
}

#[test]
fn test_reload_from_mock_source() {
    let source = MockSource::new("{version: 1}");
    let mut config = Config::new();
    config.load_source(Box::new(source.clone())).unwrap();

    source.set_content("{version: 2}");
    config.reload().unwrap();
    assert_eq!(config.get_i64("version").unwrap(), 2);
    assert_eq!(source.reads(), 2);
}

#[test]
fn test_reload_source_failure_then_recovery() {
    let source = MockSource::new("{version: 1}");
    let mut config = Config::new();
    config.load_source(Box::new(source.clone())).unwrap();

    source.set_failing(true);
    source.set_content("{version: 2}");
    assert!(config.reload().is_err());
    assert_eq!(config.get_i64("version").unwrap(), 1);

    source.set_failing(false);
    config.reload().unwrap();
    assert_eq!(config.get_i64("version").unwrap(), 2);
}

#[test]
fn test_reload_through_service_trait() {
    let source = MockSource::new("{a: 1}");
    let mut config = Config::new();
    config.load_source(Box::new(source.clone())).unwrap();

    source.set_content("{a: 2}");
    let service: &mut dyn ConfigurationService = &mut config;
    service.reload().unwrap();

    assert_eq!(
        service.lookup(&ConfigKey::from("a")).unwrap(),
        &ConfigValue::Integer(2)
    );
}

#[test]
fn test_reader_loaded_config_cannot_reload() {
    let mut config = Config::from_reader("{a: 1}".as_bytes()).unwrap();

    match config.reload() {
        Err(ConfigError::SourceError { message, .. }) => {
            assert!(message.contains("nothing to reload"));
        }
        other => panic!("expected SourceError, got {:?}", other),
    }
}

#[test]
fn test_new_config_cannot_reload() {
    let mut config = Config::new();
    assert!(config.reload().is_err());
    assert_eq!(config.keys().count(), 0);
}
