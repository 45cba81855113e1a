//! Absolute, zone-independent points in time.

use std::ops::{Add, Sub};

use serde::Serialize;

use crate::span::Duration;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// An absolute point on the time line, independent of any calendar or zone.
///
/// Counted as whole seconds since the Unix epoch (1970-01-01T00:00:00 UTC)
/// plus a non-negative sub-second fraction. The fraction is always carried
/// forward, so half a second *before* the epoch is
/// `{ secs: -1, nanos: 500_000_000 }` and the derived ordering is
/// chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Instant {
    secs: i64,
    nanos: u32,
}

impl Instant {
    /// 1970-01-01T00:00:00 UTC.
    pub const UNIX_EPOCH: Instant = Instant { secs: 0, nanos: 0 };

    /// An instant from whole seconds since the Unix epoch.
    pub fn from_unix_seconds(secs: i64) -> Self {
        Instant { secs, nanos: 0 }
    }

    /// An instant from seconds plus a sub-second fraction. Nanoseconds
    /// beyond one second carry into the seconds count.
    pub fn new(secs: i64, nanos: u32) -> Self {
        Instant {
            secs: secs + (nanos / 1_000_000_000) as i64,
            nanos: nanos % 1_000_000_000,
        }
    }

    /// Whole seconds since the Unix epoch (floor of the elapsed count).
    pub fn unix_seconds(&self) -> i64 {
        self.secs
    }

    /// Sub-second fraction in nanoseconds, `0..1_000_000_000`.
    pub fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    fn total_nanos(&self) -> i128 {
        self.secs as i128 * NANOS_PER_SEC + self.nanos as i128
    }

    fn from_total_nanos(n: i128) -> Self {
        Instant {
            secs: n.div_euclid(NANOS_PER_SEC) as i64,
            nanos: n.rem_euclid(NANOS_PER_SEC) as u32,
        }
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        Instant::from_total_nanos(self.total_nanos() + rhs.total_nanos())
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Instant {
        Instant::from_total_nanos(self.total_nanos() - rhs.total_nanos())
    }
}

impl Sub<Instant> for Instant {
    type Output = Duration;

    fn sub(self, rhs: Instant) -> Duration {
        Duration::from_total_nanos(self.total_nanos() - rhs.total_nanos())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
