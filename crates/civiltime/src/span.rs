//! Exact elapsed-time durations and calendar-relative periods.
//!
//! The two offset kinds are deliberately separate types. A [`Duration`] is a
//! fixed count of elapsed seconds: zone- and calendar-independent, and its
//! arithmetic is commutative, associative, and invertible. A [`Period`] is a
//! bag of calendar components whose meaning depends on the anchor date and
//! the zone that resolves it — "one month" from January 31 is not a fixed
//! number of seconds, and applying months then days can differ from the
//! reverse on month-end dates. Periods are applied through
//! [`crate::arith::add_period`].

use std::ops::{Add, Neg, Sub};

use serde::Serialize;

const NANOS_PER_SEC: i128 = 1_000_000_000;

// ── Unit projection ─────────────────────────────────────────────────────────

/// Units a [`Duration`] can be projected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl Unit {
    /// Length of one unit in seconds.
    pub fn in_seconds(self) -> i64 {
        match self {
            Unit::Seconds => 1,
            Unit::Minutes => 60,
            Unit::Hours => 3_600,
            Unit::Days => 86_400,
        }
    }
}

// ── Duration ────────────────────────────────────────────────────────────────

/// An exact span of elapsed time.
///
/// Stored as whole seconds plus a sub-second fraction carrying the same
/// sign, both truncated toward zero: minus a second and a half is
/// `{ secs: -1, nanos: -500_000_000 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Duration {
    secs: i64,
    nanos: i32,
}

/// The non-negative days/hours/minutes/seconds decomposition of a
/// [`Duration`]'s magnitude. Direction lives on the duration itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationParts {
    pub days: i64,
    /// 0-23.
    pub hours: i64,
    /// 0-59.
    pub minutes: i64,
    /// 0-59.
    pub seconds: i64,
}

impl Duration {
    pub const ZERO: Duration = Duration { secs: 0, nanos: 0 };

    /// An exact span of whole seconds.
    pub fn from_seconds(secs: i64) -> Self {
        Duration { secs, nanos: 0 }
    }

    /// An exact span from clock components: `from_hms(2, 30, 0)` is 9,000
    /// seconds. Components may be negative.
    pub fn from_hms(hours: i64, minutes: i64, seconds: i64) -> Self {
        Duration::from_seconds(hours * 3_600 + minutes * 60 + seconds)
    }

    /// Whole seconds, truncated toward zero. Negative for negative spans.
    pub fn seconds(&self) -> i64 {
        self.secs
    }

    /// Sub-second fraction in nanoseconds, same sign as the span.
    pub fn subsec_nanos(&self) -> i32 {
        self.nanos
    }

    pub fn is_zero(&self) -> bool {
        self.secs == 0 && self.nanos == 0
    }

    pub fn is_negative(&self) -> bool {
        self.secs < 0 || self.nanos < 0
    }

    pub fn abs(&self) -> Duration {
        Duration {
            secs: self.secs.abs(),
            nanos: self.nanos.abs(),
        }
    }

    /// Project onto `unit`, keeping the fractional remainder.
    pub fn to_unit(&self, unit: Unit) -> f64 {
        self.total_nanos() as f64 / (unit.in_seconds() as f64 * 1e9)
    }

    /// Whole multiples of `unit`, truncated toward zero.
    pub fn whole(&self, unit: Unit) -> i64 {
        self.secs / unit.in_seconds()
    }

    /// Decompose the magnitude into days, hours, minutes, and seconds.
    pub fn decompose(&self) -> DurationParts {
        let total = self.secs.unsigned_abs();
        DurationParts {
            days: (total / 86_400) as i64,
            hours: ((total % 86_400) / 3_600) as i64,
            minutes: ((total % 3_600) / 60) as i64,
            seconds: (total % 60) as i64,
        }
    }

    pub(crate) fn total_nanos(&self) -> i128 {
        self.secs as i128 * NANOS_PER_SEC + self.nanos as i128
    }

    pub(crate) fn from_total_nanos(n: i128) -> Self {
        Duration {
            secs: (n / NANOS_PER_SEC) as i64,
            nanos: (n % NANOS_PER_SEC) as i32,
        }
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration::from_total_nanos(self.total_nanos() + rhs.total_nanos())
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration::from_total_nanos(self.total_nanos() - rhs.total_nanos())
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration::from_total_nanos(-self.total_nanos())
    }
}

// ── Period ──────────────────────────────────────────────────────────────────

/// A calendar-relative offset.
///
/// Components are applied to an anchor in one fixed pass, years first,
/// seconds last (see [`crate::arith::add_period`]). There is no invariant
/// tying the components together, so they are plain public fields; any
/// combination of signs is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Period {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Period {
    pub const ZERO: Period = Period {
        years: 0,
        months: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn new(years: i32, months: i32, days: i32, hours: i64, minutes: i64, seconds: i64) -> Self {
        Period {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    pub fn of_years(years: i32) -> Self {
        Period {
            years,
            ..Period::ZERO
        }
    }

    pub fn of_months(months: i32) -> Self {
        Period {
            months,
            ..Period::ZERO
        }
    }

    pub fn of_days(days: i32) -> Self {
        Period {
            days,
            ..Period::ZERO
        }
    }

    pub fn of_hms(hours: i64, minutes: i64, seconds: i64) -> Self {
        Period {
            hours,
            minutes,
            seconds,
            ..Period::ZERO
        }
    }

    /// Every component negated.
    pub fn negated(&self) -> Self {
        Period {
            years: -self.years,
            months: -self.months,
            days: -self.days,
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Period::ZERO
    }

    /// The clock portion (hours/minutes/seconds) collapsed to seconds.
    pub(crate) fn time_seconds(&self) -> i64 {
        self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
