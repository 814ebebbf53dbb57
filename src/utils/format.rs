//! # Bounded Formatting
//!
//! String helpers for diagnostics that must respect a fixed byte budget, such
//! as a log field or a fixed-size record slot.
//!
//! Every helper takes `max_len`, the number of bytes the result may occupy,
//! and returns a `String` whose `len()` never exceeds it. Truncation always
//! lands on a character boundary.

use crate::utils::time::Timeval;
use chrono::{DateTime, Utc};
use std::fmt::{self, Write};

/// Room needed for any string produced by [`date_string`]
pub const DATE_STRING_LEN: usize = 64;

const FULL_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";
const CONCISE_DATE_FORMAT: &str = "%Y%m%dT%H%M%S";

// fmt::Write adapter that stops accepting input once the budget is spent
struct Bounded {
    out: String,
    max_len: usize,
    truncated: bool,
}

impl Bounded {
    fn new(max_len: usize) -> Self {
        Self {
            out: String::new(),
            max_len,
            truncated: false,
        }
    }
}

impl Write for Bounded {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Err(fmt::Error);
        }
        let room = self.max_len - self.out.len();
        if s.len() <= room {
            self.out.push_str(s);
            return Ok(());
        }
        let mut cut = room;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.out.push_str(&s[..cut]);
        self.truncated = true;
        // Stops the rest of the format string
        Err(fmt::Error)
    }
}

/// Format `args`, keeping at most `max_len` bytes of the output.
///
/// Unlike `snprintf`, the length of the returned string is what was actually
/// kept, not what would have been written with unlimited room.
pub fn bounded_format(max_len: usize, args: fmt::Arguments<'_>) -> String {
    let mut w = Bounded::new(max_len);
    let _ = w.write_fmt(args);
    w.out
}

/// Lowercase hex of `data`, two characters per byte, stopping at the last
/// whole byte that fits in `max_len`
pub fn hex_dump(data: &[u8], max_len: usize) -> String {
    let bytes = data.len().min(max_len / 2);
    hex::encode(&data[..bytes])
}

/// `data` with every byte outside printable ASCII replaced by `.`
pub fn printable_dump(data: &[u8], max_len: usize) -> String {
    data.iter()
        .take(max_len)
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

/// ISO 8601 UTC rendering of `tv`, or of the current time when `tv` is `None`.
///
/// `full` gives `2024-03-09T14:05:07.123456Z`; otherwise the concise basic form
/// `20240309T140507`. A timestamp outside chrono's range renders as an empty
/// string.
pub fn date_string(tv: Option<Timeval>, full: bool) -> String {
    let tv = tv.unwrap_or_else(Timeval::now);
    // Normalise a negative remainder so the nanosecond part is in range
    let Some(sec) = tv.sec.checked_add(tv.usec.div_euclid(1_000_000)) else {
        return String::new();
    };
    let usec = tv.usec.rem_euclid(1_000_000);

    let Some(dt) = DateTime::<Utc>::from_timestamp(sec, (usec * 1_000) as u32) else {
        return String::new();
    };
    let format = if full {
        FULL_DATE_FORMAT
    } else {
        CONCISE_DATE_FORMAT
    };
    bounded_format(DATE_STRING_LEN, format_args!("{}", dt.format(format)))
}
