//! # Configuration Management
//!
//! Configuration for the diagnostic logger.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment overrides via `from_env()`
//!
//! ```toml
//! [logging]
//! level = "warning"
//! sink = "file"
//! file_path = "/var/log/gep-utils.log"
//! ```

use crate::error::{constants, Result, UtilsError};
use crate::utils::logging::{LogLevel, DEFAULT_LEVEL};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "GEP_UTILS_LOG_LEVEL";
/// Environment variable overriding the sink kind
pub const ENV_LOG_SINK: &str = "GEP_UTILS_LOG_SINK";
/// Environment variable overriding the log file path (implies the file sink)
pub const ENV_LOG_FILE: &str = "GEP_UTILS_LOG_FILE";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            UtilsError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_OPEN))
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            UtilsError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_READ))
        })?;

        debug!(path = %path.display(), "Loaded configuration file");
        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).map_err(|e| {
            UtilsError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_PARSE))
        })
    }

    /// Defaults, overridden by environment variables.
    ///
    /// A variable that is set but does not parse is an error.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level.parse()?;
        }

        if let Some(sink) = lookup(ENV_LOG_SINK) {
            self.logging.sink = sink.parse()?;
        }

        if let Some(path) = lookup(ENV_LOG_FILE) {
            self.logging.file_path = Some(path);
            self.logging.sink = SinkKind::File;
        }

        Ok(())
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| UtilsError::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| {
            UtilsError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_WRITE))
        })?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        self.logging.validate()
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(UtilsError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Where diagnostic lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Standard error
    #[default]
    Stderr,
    /// Append to `file_path`
    File,
    /// Forward to the host's `tracing` subscriber
    Tracing,
}

impl std::str::FromStr for SinkKind {
    type Err = UtilsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stderr" => Ok(SinkKind::Stderr),
            "file" => Ok(SinkKind::File),
            "tracing" => Ok(SinkKind::Tracing),
            other => Err(UtilsError::ConfigError(format!("Unknown log sink: {other}"))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Threshold; calls at a less severe level are dropped
    #[serde(with = "log_level_serde")]
    pub level: LogLevel,

    /// Destination of emitted lines
    pub sink: SinkKind,

    /// Path to log file (required for the file sink)
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            sink: SinkKind::Stderr,
            file_path: None,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.sink == SinkKind::File {
            match self.file_path {
                Some(ref path) if path.is_empty() => {
                    errors.push("log file path cannot be empty".to_string());
                }
                Some(ref path) => {
                    if let Some(parent) = Path::new(path).parent() {
                        if !parent.as_os_str().is_empty() && !parent.exists() {
                            errors.push(format!(
                                "Log file directory does not exist: {}",
                                parent.display()
                            ));
                        }
                    }
                }
                None => errors.push(constants::ERR_LOG_FILE_MISSING.to_string()),
            }
        }

        errors
    }
}

/// Helper module for LogLevel serialization/deserialization
mod log_level_serde {
    use crate::utils::logging::LogLevel;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    pub fn serialize<S>(level: &LogLevel, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        level.name().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        LogLevel::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
