//! Explicit spans between two instants.

use serde::Serialize;

use crate::arith::add_period;
use crate::civil::{days_from_civil, shift_year_month, CivilFields};
use crate::convert::to_civil;
use crate::error::Result;
use crate::instant::Instant;
use crate::span::{Duration, Period};
use crate::zone::ZoneLookup;

const DAY_NANOS: i128 = 86_400 * 1_000_000_000;
const NANOS_PER_SEC: i128 = 1_000_000_000;

/// An ordered pair of instants.
///
/// Nothing is normalized away: `end` may equal `start` (degenerate) or
/// precede it (reversed), and both facts stay observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub start: Instant,
    pub end: Instant,
}

/// A calendar decomposition with magnitude and direction carried
/// separately: the period's components are non-negative, and `negative`
/// records that the interval ran backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignedPeriod {
    pub period: Period,
    pub negative: bool,
}

impl Interval {
    pub fn new(start: Instant, end: Instant) -> Self {
        Interval { start, end }
    }

    /// The interval from `start` to `start + duration`.
    pub fn from_duration(start: Instant, duration: Duration) -> Self {
        Interval {
            start,
            end: start + duration,
        }
    }

    /// The interval from `start` to `start` shifted by `period` under
    /// `zone_id`.
    pub fn from_period(
        start: Instant,
        period: &Period,
        zone_id: &str,
        tz: &impl ZoneLookup,
    ) -> Result<Self> {
        let end = add_period(start, period, zone_id, tz)?;
        Ok(Interval {
            start,
            end: end.instant,
        })
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn is_reversed(&self) -> bool {
        self.end < self.start
    }

    /// Exact elapsed time from start to end. Zone-independent; negative
    /// when the interval is reversed.
    pub fn as_duration(&self) -> Duration {
        self.end - self.start
    }

    /// Greedy calendar decomposition under `zone_id`.
    ///
    /// Whole years are subtracted first, then whole months, then whole
    /// days, then the clock-face remainder, each step taking as many units
    /// as fit without overshooting the end. Re-applying the result to
    /// `start` through [`add_period`] reproduces `end` exactly unless a
    /// DST transition falls inside the clock-face remainder — in that case
    /// the decomposition reads like the wall clock (a shift spanning a
    /// spring-forward says "8h15m" even though only 7h15m elapsed), which
    /// is exactly the divergence [`as_duration`](Interval::as_duration)
    /// does not have.
    ///
    /// The sub-second remainder truncates toward zero; a reversed interval
    /// decomposes its swapped pair with `negative` set.
    pub fn as_period(&self, zone_id: &str, tz: &impl ZoneLookup) -> Result<SignedPeriod> {
        let negative = self.end < self.start;
        let (a, b) = if negative {
            (self.end, self.start)
        } else {
            (self.start, self.end)
        };
        let fa = to_civil(a, zone_id, tz)?;
        let fb = to_civil(b, zone_id, tz)?;

        let start_pos = position(fa.year(), fa.month(), fa.day(), tod_nanos(&fa));
        let target = position(fb.year(), fb.month(), fb.day(), tod_nanos(&fb));

        if target < start_pos {
            // The zone's clock ran backwards between the endpoints (both
            // sit inside a fall-back overlap); the greedy civil walk has no
            // non-negative answer, so decompose the exact elapsed time.
            let parts = (b - a).decompose();
            return Ok(SignedPeriod {
                period: Period::new(
                    0,
                    0,
                    parts.days as i32,
                    parts.hours,
                    parts.minutes,
                    parts.seconds,
                ),
                negative,
            });
        }

        let mut years = fb.year() as i64 - fa.year() as i64;
        while years > 0 && shifted_position(&fa, years, 0) > target {
            years -= 1;
        }

        let after_years = shift_year_month(fa.year(), fa.month(), fa.day(), years, 0);
        let mut months =
            (fb.year() as i64 * 12 + fb.month() as i64) - (after_years.0 as i64 * 12 + after_years.1 as i64);
        while months > 0 && shifted_position(&fa, years, months) > target {
            months -= 1;
        }

        let anchor = shift_year_month(fa.year(), fa.month(), fa.day(), years, months);
        let anchor_days = days_from_civil(anchor.0, anchor.1, anchor.2);
        let end_days = days_from_civil(fb.year(), fb.month(), fb.day());

        let mut days = end_days - anchor_days;
        if tod_nanos(&fb) < tod_nanos(&fa) {
            days -= 1;
        }

        let rem_nanos = (end_days as i128 * DAY_NANOS + tod_nanos(&fb))
            - (anchor_days as i128 * DAY_NANOS + tod_nanos(&fa))
            - days as i128 * DAY_NANOS;
        let rem_secs = (rem_nanos / NANOS_PER_SEC) as i64;

        Ok(SignedPeriod {
            period: Period::new(
                years as i32,
                months as i32,
                days as i32,
                rem_secs / 3_600,
                (rem_secs % 3_600) / 60,
                rem_secs % 60,
            ),
            negative,
        })
    }
}

/// Time of day in nanoseconds, including the sub-second fraction.
fn tod_nanos(f: &CivilFields) -> i128 {
    f.seconds_of_day() as i128 * NANOS_PER_SEC + f.nanosecond() as i128
}

/// Position in civil space: days since the epoch, then time of day.
fn position(year: i32, month: u8, day: u8, tod: i128) -> (i64, i128) {
    (days_from_civil(year, month, day), tod)
}

/// Civil position of the start fields shifted by whole years and months,
/// keeping the start's time of day.
fn shifted_position(f: &CivilFields, years: i64, months: i64) -> (i64, i128) {
    let (y, m, d) = shift_year_month(f.year(), f.month(), f.day(), years, months);
    position(y, m, d, tod_nanos(f))
}

// ── Tests ───────────────────────────────────────────────────────────────────
