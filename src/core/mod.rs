//! # Core Wire Primitives
//!
//! Byte-level building blocks a protocol layer composes with.
//!
//! ## Components
//! - **Field**: fixed-width big-endian integer encode/decode
//! - **Serialization**: equality of messages by their encoded bytes
//!
//! ## Wire Format
//! ```text
//! u16: [b1 b0]    u32: [b3 b2 b1 b0]    u64: [b7 .. b0]   (MSB first)
//! ```

pub mod field;
pub mod serialization;

pub use field::BeField;
