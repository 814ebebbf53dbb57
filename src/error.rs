//! # Error Types
//!
//! Error handling for the utility layer.
//!
//! Almost everything in this crate is infallible by construction: the unchecked
//! field codec panics on a short buffer (a programming error) and the diagnostic
//! logger swallows sink failures. The variants below cover the checked codec
//! entry points, configuration loading and message encoding.
//!
//! ## Example Usage
//! ```rust
//! use gep_utils::core::field::try_decode_u32;
//! use gep_utils::error::UtilsError;
//!
//! match try_decode_u32(&[0x01, 0x02]) {
//!     Err(UtilsError::BufferTooShort { needed, available }) => {
//!         assert_eq!((needed, available), (4, 2));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants shared by the config and logging layers.
pub mod constants {
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";
    pub const ERR_LOG_FILE_MISSING: &str = "log file path must be set for the file sink";
}

// UtilsError is the error type for every fallible operation in the crate
#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Buffer too short: need {needed} bytes, have {available}")]
    BufferTooShort { needed: usize, available: usize },

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Type alias for Results using UtilsError
pub type Result<T> = std::result::Result<T, UtilsError>;
