//! # gep-utils
//!
//! Foundational helpers for protocol code.
//!
//! ## Modules
//! - [`core::field`](crate::core::field): big-endian fixed-width integer fields (the wire codec)
//! - [`core::serialization`](crate::core::serialization): message equality by encoded bytes
//! - [`utils::logging`]: level-gated diagnostic logging
//! - [`utils::time`]: time unit conversions and clock reads
//! - [`utils::format`]: bounded string formatting helpers
//! - [`utils::net`]: peer IP lookup
//! - [`config`]: logger configuration from TOML or the environment
//!
//! ## Quick Start
//! ```rust
//! use gep_utils::core::field::{decode_u16, encode_u16};
//! use gep_utils::{diag_log, LogLevel};
//!
//! let mut header = [0u8; 2];
//! encode_u16(&mut header, 0x0A0B);
//! diag_log!(LogLevel::Debug, "header length field: {}", decode_u16(&header));
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::core::field::BeField;
pub use crate::error::{Result, UtilsError};
pub use crate::utils::logging::{LogLevel, LogSink, Logger};
pub use crate::utils::time::Timeval;
