//! # Big-Endian Field Codec
//!
//! Fixed-width integer fields in network byte order.
//!
//! Every field starts at `buf[0]` and occupies exactly `WIDTH` bytes, most
//! significant byte first, regardless of host endianness. Byte `i` of a field
//! of width `w` is `(value >> (8 * (w - 1 - i))) & 0xFF`.
//!
//! ## Checked and unchecked entry points
//! - `decode_*` / `encode_*` are the hot-path forms. A buffer shorter than the
//!   field width is a caller bug and panics with an out-of-range index; it is
//!   never truncated and never reads past the slice.
//! - `try_decode_*` / `try_encode_*` report the same condition as
//!   [`UtilsError::BufferTooShort`].
//!
//! ## Sequential access
//! [`BeField::take_be`] consumes a field from the front of a `&[u8]` cursor and
//! [`BeField::put_be`] appends one to any [`bytes::BufMut`].
//!
//! ```rust
//! use gep_utils::core::field::{decode_i16, encode_u32};
//!
//! let mut buf = [0u8; 4];
//! encode_u32(&mut buf, 0x0102_0304);
//! assert_eq!(buf, [0x01, 0x02, 0x03, 0x04]);
//! assert_eq!(decode_i16(&[0x80, 0x00]), i16::MIN);
//! ```

use crate::error::{Result, UtilsError};
use bytes::BufMut;

/// Largest field width handled by this module
pub const MAX_FIELD_WIDTH: usize = 8;

#[inline]
#[track_caller]
fn head<const N: usize>(buf: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&buf[..N]);
    out
}

#[inline]
fn ensure_len(available: usize, needed: usize) -> Result<()> {
    if available < needed {
        return Err(UtilsError::BufferTooShort { needed, available });
    }
    Ok(())
}

/// An integer that can be stored as a fixed-width big-endian field.
pub trait BeField: Copy + Sized {
    /// Field width in bytes
    const WIDTH: usize;

    /// Read the field from the start of `buf`. Panics if `buf` is too short.
    fn read_be(buf: &[u8]) -> Self;

    /// Write the field to the start of `buf`, overwriting exactly `WIDTH` bytes.
    /// Panics if `buf` is too short.
    fn write_be(self, buf: &mut [u8]);

    /// Checked form of [`BeField::read_be`].
    fn try_read_be(buf: &[u8]) -> Result<Self> {
        ensure_len(buf.len(), Self::WIDTH)?;
        Ok(Self::read_be(buf))
    }

    /// Checked form of [`BeField::write_be`]. The buffer is untouched on error.
    fn try_write_be(self, buf: &mut [u8]) -> Result<()> {
        ensure_len(buf.len(), Self::WIDTH)?;
        self.write_be(buf);
        Ok(())
    }

    /// Read the field and advance the cursor past it.
    fn take_be(src: &mut &[u8]) -> Result<Self> {
        let rest: &[u8] = *src;
        let value = Self::try_read_be(rest)?;
        *src = &rest[Self::WIDTH..];
        Ok(value)
    }

    /// Append the field to `dst`.
    fn put_be<B: BufMut>(self, dst: &mut B) {
        let mut scratch = [0u8; MAX_FIELD_WIDTH];
        self.write_be(&mut scratch[..Self::WIDTH]);
        dst.put_slice(&scratch[..Self::WIDTH]);
    }
}

macro_rules! impl_be_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BeField for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                #[track_caller]
                fn read_be(buf: &[u8]) -> Self {
                    <$ty>::from_be_bytes(head(buf))
                }

                #[inline]
                #[track_caller]
                fn write_be(self, buf: &mut [u8]) {
                    buf[..Self::WIDTH].copy_from_slice(&self.to_be_bytes());
                }
            }
        )*
    };
}

impl_be_field!(u8, u16, u32, u64, i8, i16, i32, i64);

macro_rules! field_fns {
    ($ty:ty, $decode:ident, $encode:ident, $try_decode:ident, $try_encode:ident) => {
        #[doc = concat!("Decode a big-endian `", stringify!($ty), "` from the start of `buf`.")]
        ///
        /// # Panics
        /// If `buf` is shorter than the field width.
        #[inline]
        #[track_caller]
        pub fn $decode(buf: &[u8]) -> $ty {
            <$ty as BeField>::read_be(buf)
        }

        #[doc = concat!("Encode `value` as a big-endian `", stringify!($ty), "` at the start of `buf`.")]
        ///
        /// # Panics
        /// If `buf` is shorter than the field width.
        #[inline]
        #[track_caller]
        pub fn $encode(buf: &mut [u8], value: $ty) {
            value.write_be(buf)
        }

        #[doc = concat!("Checked form of [`", stringify!($decode), "`].")]
        #[inline]
        pub fn $try_decode(buf: &[u8]) -> Result<$ty> {
            <$ty as BeField>::try_read_be(buf)
        }

        #[doc = concat!("Checked form of [`", stringify!($encode), "`].")]
        #[inline]
        pub fn $try_encode(buf: &mut [u8], value: $ty) -> Result<()> {
            value.try_write_be(buf)
        }
    };
}

field_fns!(u8, decode_u8, encode_u8, try_decode_u8, try_encode_u8);
field_fns!(u16, decode_u16, encode_u16, try_decode_u16, try_encode_u16);
field_fns!(u32, decode_u32, encode_u32, try_decode_u32, try_encode_u32);
field_fns!(u64, decode_u64, encode_u64, try_decode_u64, try_encode_u64);
field_fns!(i16, decode_i16, encode_i16, try_decode_i16, try_encode_i16);
field_fns!(i32, decode_i32, encode_i32, try_decode_i32, try_encode_i32);
field_fns!(i64, decode_i64, encode_i64, try_decode_i64, try_encode_i64);
