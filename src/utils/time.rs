//! # Time Units
//!
//! Integer conversions between seconds, milliseconds, microseconds and
//! nanoseconds, a `timeval`-style split timestamp, and wall-clock reads.
//!
//! Down-conversions use Rust integer division and therefore truncate toward
//! zero: `msecs_to_secs(1999) == 1` and `msecs_to_secs(-1999) == -1`.
//! Up-conversions multiply without overflow checks in release builds, the same
//! as any other `i64` arithmetic.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const MSECS_PER_SEC: i64 = 1_000;
pub const USECS_PER_SEC: i64 = 1_000_000;
pub const USECS_PER_MSEC: i64 = 1_000;
pub const NSECS_PER_SEC: i64 = 1_000_000_000;
pub const NSECS_PER_USEC: i64 = 1_000;
pub const NSECS_PER_MSEC: i64 = 1_000_000;
pub const ONE_DAY_IN_SEC: i64 = 24 * 60 * 60;

/// Sentinel for "no valid timestamp"
pub const UNIX_TIME_INVALID: i64 = -1;

#[inline]
pub const fn secs_to_msecs(secs: i64) -> i64 {
    secs * MSECS_PER_SEC
}

#[inline]
pub const fn msecs_to_secs(msecs: i64) -> i64 {
    msecs / MSECS_PER_SEC
}

#[inline]
pub const fn secs_to_usecs(secs: i64) -> i64 {
    secs * USECS_PER_SEC
}

#[inline]
pub const fn usecs_to_secs(usecs: i64) -> i64 {
    usecs / USECS_PER_SEC
}

#[inline]
pub const fn msecs_to_usecs(msecs: i64) -> i64 {
    msecs * USECS_PER_MSEC
}

#[inline]
pub const fn usecs_to_msecs(usecs: i64) -> i64 {
    usecs / USECS_PER_MSEC
}

#[inline]
pub const fn usecs_to_nsecs(usecs: i64) -> i64 {
    usecs * NSECS_PER_USEC
}

#[inline]
pub const fn nsecs_to_usecs(nsecs: i64) -> i64 {
    nsecs / NSECS_PER_USEC
}

/// Seconds plus sub-second microseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timeval {
    pub sec: i64,
    pub usec: i64,
}

impl Timeval {
    pub const fn new(sec: i64, usec: i64) -> Self {
        Self { sec, usec }
    }

    /// Split microseconds into seconds and remainder.
    ///
    /// Both parts truncate toward zero, so a negative input yields a
    /// non-positive `usec`.
    pub const fn from_usecs(usecs: i64) -> Self {
        Self {
            sec: usecs / USECS_PER_SEC,
            usec: usecs % USECS_PER_SEC,
        }
    }

    pub const fn to_usecs(&self) -> i64 {
        secs_to_usecs(self.sec) + self.usec
    }

    /// Current wall-clock time
    pub fn now() -> Self {
        Self::from_usecs(unix_time_usec())
    }
}

impl From<Duration> for Timeval {
    fn from(d: Duration) -> Self {
        Self {
            sec: d.as_secs() as i64,
            usec: i64::from(d.subsec_micros()),
        }
    }
}

fn since_epoch() -> Option<Duration> {
    SystemTime::now().duration_since(UNIX_EPOCH).ok()
}

/// Microseconds since the Unix epoch, or [`UNIX_TIME_INVALID`] if the clock is
/// set before it
pub fn unix_time_usec() -> i64 {
    since_epoch()
        .map(|d| d.as_micros() as i64)
        .unwrap_or(UNIX_TIME_INVALID)
}

/// Seconds since the Unix epoch, or [`UNIX_TIME_INVALID`] if the clock is set
/// before it
pub fn unix_time_sec() -> i64 {
    since_epoch()
        .map(|d| d.as_secs() as i64)
        .unwrap_or(UNIX_TIME_INVALID)
}
