//! Applying durations and periods to instants.
//!
//! Duration addition is plain arithmetic on the elapsed count: always
//! defined, zone-blind, invertible. Period addition is calendar
//! arithmetic: the instant is decomposed under a zone, the components are
//! applied in one fixed pass, and the adjusted fields are resolved back
//! through the zone — which can shift the result by a DST offset. That
//! shift is the designed divergence between the two operations: adding
//! `Duration` of one day across a spring-forward lands one clock-hour
//! later on the wall than adding `Period { days: 1 }`.

use crate::civil::{civil_from_days, days_from_civil, shift_year_month, CivilFields};
use crate::convert::{from_civil, to_civil, Resolved};
use crate::error::Result;
use crate::instant::Instant;
use crate::span::{Duration, Period};
use crate::zone::ZoneLookup;

const SECS_PER_DAY: i64 = 86_400;

/// Add an exact elapsed span. Equivalent to `instant + duration`.
pub fn add_duration(instant: Instant, duration: Duration) -> Instant {
    instant + duration
}

/// Add a calendar-relative period to `instant` under `zone_id`.
///
/// The components are applied in one normalized pass, in fixed order —
/// years, months, days, hours, minutes, seconds — never as a sequence of
/// caller-visible single-unit additions:
///
/// 1. years and months shift the (year, month) pair with overflow
///    normalization (month 13 becomes January of the next year);
/// 2. a day now past the target month's end is clamped to the last valid
///    day of that month, never rolled into the next;
/// 3. days, then the clock components, are added with carry between days
///    and the time of day;
/// 4. the adjusted fields resolve back through the zone, which applies the
///    local-time policy of [`crate::convert`] and tags the result.
///
/// # Examples
///
/// ```
/// use civiltime::{add_period, from_civil, to_civil, CivilFields, Period, TzdbLookup};
///
/// let tzdb = TzdbLookup;
/// let jan31 = from_civil(&CivilFields::date(2021, 1, 31).unwrap(), "UTC", &tzdb).unwrap();
/// let shifted = add_period(jan31.instant, &Period::of_months(1), "UTC", &tzdb).unwrap();
/// let f = to_civil(shifted.instant, "UTC", &tzdb).unwrap();
/// assert_eq!((f.month(), f.day()), (2, 28));
/// ```
pub fn add_period(
    instant: Instant,
    period: &Period,
    zone_id: &str,
    tz: &impl ZoneLookup,
) -> Result<Resolved> {
    let f = to_civil(instant, zone_id, tz)?;

    let (y, m, d) = shift_year_month(
        f.year(),
        f.month(),
        f.day(),
        period.years as i64,
        period.months as i64,
    );

    let days = days_from_civil(y, m, d) + period.days as i64;
    let total = days * SECS_PER_DAY + f.seconds_of_day() + period.time_seconds();
    let (ny, nm, nd) = civil_from_days(total.div_euclid(SECS_PER_DAY));
    let sod = total.rem_euclid(SECS_PER_DAY);

    let adjusted = CivilFields::new(
        ny,
        nm,
        nd,
        (sod / 3_600) as u8,
        ((sod % 3_600) / 60) as u8,
        (sod % 60) as u8,
    )?
    .with_nanosecond(f.nanosecond())?;
    from_civil(&adjusted, zone_id, tz)
}

/// Project a period onto exact elapsed time from an explicit anchor.
///
/// There is no anchor-free conversion: how long "one month" lasts depends
/// on where it starts and which zone resolves it. The result is simply the
/// elapsed time between the anchor and the period-shifted anchor.
pub fn period_to_duration(
    period: &Period,
    anchor: Instant,
    zone_id: &str,
    tz: &impl ZoneLookup,
) -> Result<Duration> {
    let shifted = add_period(anchor, period, zone_id, tz)?;
    Ok(shifted.instant - anchor)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::LocalResolution;
    use crate::span::Unit;
    use crate::zone::TzdbLookup;

    const TZDB: TzdbLookup = TzdbLookup;

    fn at(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8, zone: &str) -> Instant {
        from_civil(&CivilFields::new(y, mo, d, h, mi, s).unwrap(), zone, &TZDB)
            .unwrap()
            .instant
    }

    fn civil(x: Instant, zone: &str) -> (i32, u8, u8, u8, u8, u8) {
        let f = to_civil(x, zone, &TZDB).unwrap();
        (f.year(), f.month(), f.day(), f.hour(), f.minute(), f.second())
    }

    // ── Month-end clamping ──────────────────────────────────────────────

    #[test]
    fn test_month_end_clamps_to_february() {
        let jan31 = at(2021, 1, 31, 0, 0, 0, "UTC");
        let r = add_period(jan31, &Period::of_months(1), "UTC", &TZDB).unwrap();
        assert_eq!(civil(r.instant, "UTC"), (2021, 2, 28, 0, 0, 0));
    }

    #[test]
    fn test_month_end_clamps_to_leap_february() {
        let jan31 = at(2020, 1, 31, 0, 0, 0, "UTC");
        let r = add_period(jan31, &Period::of_months(1), "UTC", &TZDB).unwrap();
        assert_eq!(civil(r.instant, "UTC"), (2020, 2, 29, 0, 0, 0));
    }

    #[test]
    fn test_negative_months_clamp_too() {
        let mar31 = at(2021, 3, 31, 12, 0, 0, "UTC");
        let r = add_period(mar31, &Period::of_months(-1), "UTC", &TZDB).unwrap();
        assert_eq!(civil(r.instant, "UTC"), (2021, 2, 28, 12, 0, 0));
    }

    // ── Normalization ───────────────────────────────────────────────────

    #[test]
    fn test_month_overflow_rolls_into_next_year() {
        let dec15 = at(2020, 12, 15, 6, 0, 0, "UTC");
        let r = add_period(dec15, &Period::of_months(2), "UTC", &TZDB).unwrap();
        assert_eq!(civil(r.instant, "UTC"), (2021, 2, 15, 6, 0, 0));
    }

    #[test]
    fn test_clock_carry_into_days() {
        let x = at(2021, 4, 30, 23, 30, 0, "UTC");
        let r = add_period(x, &Period::of_hms(1, 45, 0), "UTC", &TZDB).unwrap();
        assert_eq!(civil(r.instant, "UTC"), (2021, 5, 1, 1, 15, 0));
    }

    #[test]
    fn test_multi_field_period_is_one_pass() {
        // Months clamp first, then days advance from the clamped date:
        // 2020-01-31 → (+1 month) 2020-02-29 → (+1 day) 2020-03-01.
        let jan31 = at(2020, 1, 31, 0, 0, 0, "UTC");
        let p = Period::new(0, 1, 1, 0, 0, 0);
        let r = add_period(jan31, &p, "UTC", &TZDB).unwrap();
        assert_eq!(civil(r.instant, "UTC"), (2020, 3, 1, 0, 0, 0));
    }

    // ── Period vs Duration across DST ───────────────────────────────────

    #[test]
    fn test_one_day_duration_vs_period_diverge_at_spring_forward() {
        // New York springs forward 2020-03-08 02:00 → 03:00.
        let eve = at(2020, 3, 7, 12, 0, 0, "America/New_York");

        let by_duration = add_duration(eve, Duration::from_seconds(86_400));
        let by_period = add_period(eve, &Period::of_days(1), "America/New_York", &TZDB)
            .unwrap()
            .instant;

        // Same wall clock for the period; one wall hour later for the
        // duration; exactly the transition offset apart on the time line.
        assert_eq!(civil(by_period, "America/New_York"), (2020, 3, 8, 12, 0, 0));
        assert_eq!(
            civil(by_duration, "America/New_York"),
            (2020, 3, 8, 13, 0, 0)
        );
        assert_eq!((by_duration - by_period).seconds(), 3_600);
    }

    #[test]
    fn test_period_landing_in_gap_is_tagged() {
        let x = at(2020, 3, 7, 2, 30, 0, "America/New_York");
        let r = add_period(x, &Period::of_days(1), "America/New_York", &TZDB).unwrap();
        assert_eq!(r.resolution, LocalResolution::GapSkipped);
        assert_eq!(
            civil(r.instant, "America/New_York"),
            (2020, 3, 8, 3, 0, 0)
        );
    }

    // ── Anchored projection ─────────────────────────────────────────────

    #[test]
    fn test_period_to_duration_depends_on_anchor() {
        let jan15 = at(2021, 1, 15, 0, 0, 0, "UTC");
        let feb15 = at(2021, 2, 15, 0, 0, 0, "UTC");
        let one_month = Period::of_months(1);

        let from_jan = period_to_duration(&one_month, jan15, "UTC", &TZDB).unwrap();
        let from_feb = period_to_duration(&one_month, feb15, "UTC", &TZDB).unwrap();
        assert_eq!(from_jan.whole(Unit::Days), 31);
        assert_eq!(from_feb.whole(Unit::Days), 28);
    }

    #[test]
    fn test_zero_period_is_identity() {
        let x = at(2021, 8, 9, 10, 11, 12, "Asia/Tokyo");
        let r = add_period(x, &Period::ZERO, "Asia/Tokyo", &TZDB).unwrap();
        assert_eq!(r.instant, x);
        assert_eq!(r.resolution, LocalResolution::Unambiguous);
    }
}
