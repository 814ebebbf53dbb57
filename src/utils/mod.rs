//! # Utility Modules
//!
//! Supporting pieces used alongside the wire primitives.
//!
//! ## Components
//! - **Logging**: level-gated diagnostic lines with pluggable sinks
//! - **Time**: unit conversions, `Timeval`, wall-clock reads
//! - **Format**: bounded formatting, hex and printable dumps, ISO 8601 dates
//! - **Net**: peer IP lookup for connected sockets

pub mod format;
pub mod logging;
pub mod net;
pub mod time;

pub use logging::{LogLevel, LogSink, Logger};
pub use time::Timeval;
