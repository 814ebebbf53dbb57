//! Integration tests for configuration validation

#![allow(clippy::expect_used)]

use gep_utils::config::{Config, LoggingConfig, SinkKind};
use gep_utils::LogLevel;

#[test]
fn test_default_config_validates() {
    let config = Config::default();
    let errors = config.validate();
    assert!(
        errors.is_empty(),
        "Default config should be valid, but got errors: {:?}",
        errors
    );
    assert_eq!(config.logging.level, LogLevel::Warning);
    assert_eq!(config.logging.sink, SinkKind::Stderr);
}

#[test]
fn test_file_sink_without_path() {
    let config = Config::default_with_overrides(|c| c.logging.sink = SinkKind::File);

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("log file path must be set")));
    assert!(config.validate_strict().is_err());
}

#[test]
fn test_file_sink_missing_directory() {
    let config = Config {
        logging: LoggingConfig {
            sink: SinkKind::File,
            file_path: Some("/nonexistent/gep-utils/dir/diag.log".to_string()),
            ..LoggingConfig::default()
        },
    };

    let errors = config.validate();
    assert!(errors
        .iter()
        .any(|e| e.contains("Log file directory does not exist")));
}

#[test]
fn test_path_ignored_for_stderr_sink() {
    let config = Config::default_with_overrides(|c| {
        c.logging.file_path = Some("/nonexistent/dir/diag.log".to_string());
    });
    assert!(config.validate().is_empty());
}

#[test]
fn test_toml_parsing_levels() {
    for (text, level) in [
        ("error", LogLevel::Error),
        ("WARNING", LogLevel::Warning),
        ("warn", LogLevel::Warning),
        ("debug", LogLevel::Debug),
    ] {
        let config = Config::from_toml(&format!("[logging]\nlevel = \"{text}\"\n"))
            .expect("level should parse");
        assert_eq!(config.logging.level, level);
    }
}

#[test]
fn test_toml_rejects_unknown_level() {
    let result = Config::from_toml("[logging]\nlevel = \"verbose\"\n");
    assert!(result.is_err());
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = Config::from_toml("").expect("empty config is valid");
    assert_eq!(config.logging.level, LogLevel::Warning);
    assert_eq!(config.logging.sink, SinkKind::Stderr);
    assert!(config.logging.file_path.is_none());
}

#[test]
fn test_example_config_round_trips() {
    let example = Config::example_config();
    assert!(example.contains("[logging]"));
    assert!(example.contains("level = \"warning\""));

    let parsed = Config::from_toml(&example).expect("example config parses");
    assert_eq!(parsed.logging.level, LogLevel::Warning);
}

#[test]
fn test_example_config_lists_only_logger_settings() {
    let example = Config::example_config();
    let keys: Vec<&str> = example
        .lines()
        .filter_map(|l| l.split_once(" = ").map(|(k, _)| k.trim()))
        .collect();
    assert_eq!(keys, vec!["level", "sink"]);
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gep.toml");

    let config = Config::default_with_overrides(|c| {
        c.logging.level = LogLevel::Debug;
        c.logging.sink = SinkKind::Tracing;
    });
    config.save_to_file(&path).expect("save");

    let loaded = Config::from_file(&path).expect("load");
    assert_eq!(loaded.logging.level, LogLevel::Debug);
    assert_eq!(loaded.logging.sink, SinkKind::Tracing);
}

#[test]
fn test_missing_file_is_config_error() {
    let result = Config::from_file("/nonexistent/gep-utils.toml");
    assert!(matches!(
        result,
        Err(gep_utils::UtilsError::ConfigError(msg)) if msg.contains("Failed to open")
    ));
}
