//! # Message Equality
//!
//! Structural equality of wire messages by their encoded form.
//!
//! Two messages compare equal when their bincode encodings are byte-identical.
//! This matches how a protocol layer thinks about equality (same bytes on the
//! wire) even for types that do not implement `PartialEq`, or whose
//! `PartialEq` ignores fields that are still serialized.
//!
//! ## Usage
//! ```rust
//! use gep_utils::core::serialization::{encoded_eq, EncodedEq};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Hello { id: u32, name: String }
//!
//! let a = Hello { id: 1, name: "hello".into() };
//! let b = Hello { id: 1, name: "hello".into() };
//! assert!(encoded_eq(&a, &b));
//! assert!(a.encoded_eq(&b));
//! ```

use crate::error::Result;
use serde::Serialize;
use tracing::debug;

/// Encode a message to its canonical bincode form
pub fn encode_message<M: Serialize + ?Sized>(msg: &M) -> Result<Vec<u8>> {
    Ok(bincode::serialize(msg)?)
}

/// Compare two messages by their encoded bytes.
///
/// An encoding failure on either side makes the messages unequal.
pub fn encoded_eq<M: Serialize + ?Sized>(a: &M, b: &M) -> bool {
    match (encode_message(a), encode_message(b)) {
        (Ok(left), Ok(right)) => left == right,
        (Err(e), _) | (_, Err(e)) => {
            debug!(error = %e, "Message encoding failed during comparison");
            false
        }
    }
}

/// Method form of [`encoded_eq`] for every serializable type
pub trait EncodedEq: Serialize {
    fn encoded_eq(&self, other: &Self) -> bool {
        encoded_eq(self, other)
    }
}

impl<T: Serialize + ?Sized> EncodedEq for T {}
