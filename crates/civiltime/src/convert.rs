//! Conversion between instants and civil fields within a zone.
//!
//! # Local-time policy
//!
//! Composing civil fields back into an instant must take a position on the
//! two DST edge cases, and the position here is fixed and observable on
//! every result rather than chosen per call:
//!
//! * **Ambiguous wall-clock reading** (fall-back transition, the reading
//!   occurs twice): the **earlier** of the two instants, tagged
//!   [`LocalResolution::AmbiguousEarlier`].
//! * **Nonexistent wall-clock reading** (spring-forward gap): the first
//!   valid instant after the gap — the transition itself — tagged
//!   [`LocalResolution::GapSkipped`]. The sub-second fraction is dropped,
//!   since no fraction of the skipped reading ever occurred.
//!
//! Neither case is an error; both produce a usable instant plus the tag.

use serde::Serialize;

use crate::civil::{civil_from_days, days_from_civil, CivilField, CivilFields};
use crate::error::{CivilError, Result};
use crate::instant::Instant;
use crate::zone::ZoneLookup;

const SECS_PER_DAY: i64 = 86_400;

/// How a wall-clock reading mapped onto the time line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LocalResolution {
    /// Exactly one instant carries this reading.
    Unambiguous,
    /// The reading occurred twice; the earlier instant was chosen.
    AmbiguousEarlier,
    /// The reading never occurred; the first instant after the gap was
    /// chosen.
    GapSkipped,
}

/// An instant produced from civil fields, tagged with the resolution branch
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub instant: Instant,
    pub resolution: LocalResolution,
}

/// Decompose an instant into civil fields under `zone_id`.
///
/// # Errors
///
/// Returns [`CivilError::UnknownZone`] when `zone_id` does not resolve.
pub fn to_civil(instant: Instant, zone_id: &str, tz: &impl ZoneLookup) -> Result<CivilFields> {
    let off = tz.lookup(zone_id, instant)?;
    let shifted = instant.unix_seconds() + off.offset_seconds as i64;
    let days = shifted.div_euclid(SECS_PER_DAY);
    let sod = shifted.rem_euclid(SECS_PER_DAY);
    let (year, month, day) = civil_from_days(days);
    CivilFields::new(
        year,
        month,
        day,
        (sod / 3_600) as u8,
        ((sod % 3_600) / 60) as u8,
        (sod % 60) as u8,
    )?
    .with_nanosecond(instant.subsec_nanos())
}

/// Re-express the same instant under another zone.
///
/// Only the displayed decomposition changes; the instant's value never
/// does. Resolving the returned fields back through [`from_civil`] under
/// `target_zone` yields an interval of zero duration from the original.
pub fn with_zone(instant: Instant, target_zone: &str, tz: &impl ZoneLookup) -> Result<CivilFields> {
    to_civil(instant, target_zone, tz)
}

/// Compose civil fields into the instant they denote in `zone_id`,
/// applying the module's local-time policy.
///
/// # Errors
///
/// Returns [`CivilError::UnknownZone`] when `zone_id` does not resolve.
///
/// # Examples
///
/// ```
/// use civiltime::{from_civil, to_civil, CivilFields, TzdbLookup};
///
/// let tzdb = TzdbLookup;
/// let fields = CivilFields::new(2021, 1, 31, 12, 0, 0).unwrap();
/// let resolved = from_civil(&fields, "America/New_York", &tzdb).unwrap();
/// assert_eq!(to_civil(resolved.instant, "America/New_York", &tzdb).unwrap(), fields);
/// ```
pub fn from_civil(fields: &CivilFields, zone_id: &str, tz: &impl ZoneLookup) -> Result<Resolved> {
    let naive = days_from_civil(fields.year(), fields.month(), fields.day()) * SECS_PER_DAY
        + fields.seconds_of_day();

    // Probe one day either side of the reading; any transition affecting it
    // sits between the two offsets found there.
    let off_a = tz
        .lookup(zone_id, Instant::from_unix_seconds(naive - SECS_PER_DAY))?
        .offset_seconds;
    let off_b = tz
        .lookup(zone_id, Instant::from_unix_seconds(naive + SECS_PER_DAY))?
        .offset_seconds;

    let a_valid = offset_holds(tz, zone_id, naive, off_a)?;
    let b_valid = off_b != off_a && offset_holds(tz, zone_id, naive, off_b)?;

    match (a_valid, b_valid) {
        (true, true) => {
            // The reading occurs under both offsets; the larger offset is
            // the earlier instant.
            let earlier = naive - off_a.max(off_b) as i64;
            Ok(Resolved {
                instant: Instant::new(earlier, fields.nanosecond()),
                resolution: LocalResolution::AmbiguousEarlier,
            })
        }
        (true, false) => Ok(Resolved {
            instant: Instant::new(naive - off_a as i64, fields.nanosecond()),
            resolution: LocalResolution::Unambiguous,
        }),
        (false, true) => Ok(Resolved {
            instant: Instant::new(naive - off_b as i64, fields.nanosecond()),
            resolution: LocalResolution::Unambiguous,
        }),
        (false, false) => {
            let lo_off = off_a.min(off_b) as i64;
            let hi_off = off_a.max(off_b) as i64;
            if lo_off == hi_off {
                // No transition in the probe window; take the single offset.
                return Ok(Resolved {
                    instant: Instant::new(naive - lo_off, fields.nanosecond()),
                    resolution: LocalResolution::Unambiguous,
                });
            }
            // Spring-forward gap. The first valid instant after it is the
            // transition itself: the earliest instant whose offset differs
            // from the pre-transition offset. Bisect the lookup to find it.
            let mut lo = naive - hi_off;
            let mut hi = naive - lo_off;
            let pre = tz
                .lookup(zone_id, Instant::from_unix_seconds(lo))?
                .offset_seconds;
            while hi - lo > 1 {
                let mid = lo + (hi - lo) / 2;
                if tz
                    .lookup(zone_id, Instant::from_unix_seconds(mid))?
                    .offset_seconds
                    == pre
                {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            Ok(Resolved {
                instant: Instant::from_unix_seconds(hi),
                resolution: LocalResolution::GapSkipped,
            })
        }
    }
}

/// Whether resolving the naive reading with `offset` lands on an instant
/// where that offset actually holds.
fn offset_holds(tz: &impl ZoneLookup, zone_id: &str, naive: i64, offset: i32) -> Result<bool> {
    let probe = Instant::from_unix_seconds(naive - offset as i64);
    Ok(tz.lookup(zone_id, probe)?.offset_seconds == offset)
}

/// Rebuild `instant` with one civil field replaced, under `zone_id`.
///
/// Civil values stay immutable: this decomposes, substitutes, validates,
/// and resolves a fresh instant. Validation is strict — there is no
/// clamping here, so setting February on a January 31 reading fails with
/// [`CivilError::InvalidCivilDate`] (clamping is a property of period
/// arithmetic, not of field replacement).
pub fn with_field(
    instant: Instant,
    zone_id: &str,
    tz: &impl ZoneLookup,
    field: CivilField,
    value: i64,
) -> Result<Resolved> {
    let f = to_civil(instant, zone_id, tz)?;

    fn narrow<T: TryFrom<i64>>(value: i64, what: &str) -> Result<T> {
        T::try_from(value)
            .map_err(|_| CivilError::InvalidCivilDate(format!("{what} value {value} out of range")))
    }

    let swapped = match field {
        CivilField::Year => CivilFields::new(
            narrow(value, "year")?,
            f.month(),
            f.day(),
            f.hour(),
            f.minute(),
            f.second(),
        )?,
        CivilField::Month => CivilFields::new(
            f.year(),
            narrow(value, "month")?,
            f.day(),
            f.hour(),
            f.minute(),
            f.second(),
        )?,
        CivilField::Day => CivilFields::new(
            f.year(),
            f.month(),
            narrow(value, "day")?,
            f.hour(),
            f.minute(),
            f.second(),
        )?,
        CivilField::Hour => CivilFields::new(
            f.year(),
            f.month(),
            f.day(),
            narrow(value, "hour")?,
            f.minute(),
            f.second(),
        )?,
        CivilField::Minute => CivilFields::new(
            f.year(),
            f.month(),
            f.day(),
            f.hour(),
            narrow(value, "minute")?,
            f.second(),
        )?,
        CivilField::Second => CivilFields::new(
            f.year(),
            f.month(),
            f.day(),
            f.hour(),
            f.minute(),
            narrow(value, "second")?,
        )?,
    };

    from_civil(&swapped.with_nanosecond(f.nanosecond())?, zone_id, tz)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::TzdbLookup;
    use proptest::prelude::*;

    const TZDB: TzdbLookup = TzdbLookup;

    fn fields(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8) -> CivilFields {
        CivilFields::new(y, mo, d, h, mi, s).unwrap()
    }

    // ── to_civil ────────────────────────────────────────────────────────

    #[test]
    fn test_epoch_decomposes_to_1970() {
        let f = to_civil(Instant::UNIX_EPOCH, "UTC", &TZDB).unwrap();
        assert_eq!(
            (f.year(), f.month(), f.day(), f.hour(), f.minute(), f.second()),
            (1970, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn test_to_civil_applies_zone_offset() {
        // 2020-06-01T12:00:00Z is 08:00 EDT.
        let noon_utc = from_civil(&fields(2020, 6, 1, 12, 0, 0), "UTC", &TZDB)
            .unwrap()
            .instant;
        let local = to_civil(noon_utc, "America/New_York", &TZDB).unwrap();
        assert_eq!((local.day(), local.hour()), (1, 8));
    }

    #[test]
    fn test_to_civil_before_epoch() {
        let f = to_civil(Instant::from_unix_seconds(-1), "UTC", &TZDB).unwrap();
        assert_eq!(
            (f.year(), f.month(), f.day(), f.hour(), f.minute(), f.second()),
            (1969, 12, 31, 23, 59, 59)
        );
    }

    #[test]
    fn test_to_civil_preserves_subseconds() {
        let f = to_civil(Instant::new(0, 250_000_000), "UTC", &TZDB).unwrap();
        assert_eq!(f.nanosecond(), 250_000_000);
    }

    // ── from_civil ──────────────────────────────────────────────────────

    #[test]
    fn test_plain_reading_is_unambiguous() {
        let r = from_civil(&fields(2021, 6, 15, 9, 30, 0), "America/New_York", &TZDB).unwrap();
        assert_eq!(r.resolution, LocalResolution::Unambiguous);
        assert_eq!(
            to_civil(r.instant, "America/New_York", &TZDB).unwrap(),
            fields(2021, 6, 15, 9, 30, 0)
        );
    }

    #[test]
    fn test_fall_back_resolves_to_earlier() {
        // 2020-11-01 01:30 in New York occurs at 05:30Z (EDT) and 06:30Z
        // (EST); the policy picks the earlier.
        let f = fields(2020, 11, 1, 1, 30, 0);
        let r = from_civil(&f, "America/New_York", &TZDB).unwrap();
        assert_eq!(r.resolution, LocalResolution::AmbiguousEarlier);
        assert_eq!(r.instant.unix_seconds(), 1_604_208_600);
        assert_eq!(to_civil(r.instant, "America/New_York", &TZDB).unwrap(), f);
    }

    #[test]
    fn test_spring_gap_resolves_to_next_valid() {
        // 2020-03-08 02:30 never happened in New York; the clock jumped
        // from 02:00 EST straight to 03:00 EDT at 07:00Z.
        let r = from_civil(&fields(2020, 3, 8, 2, 30, 0), "America/New_York", &TZDB).unwrap();
        assert_eq!(r.resolution, LocalResolution::GapSkipped);
        assert_eq!(r.instant.unix_seconds(), 1_583_650_800);
        let landed = to_civil(r.instant, "America/New_York", &TZDB).unwrap();
        assert_eq!((landed.hour(), landed.minute()), (3, 0));
    }

    #[test]
    fn test_unknown_zone_propagates() {
        let err = from_civil(&fields(2021, 1, 1, 0, 0, 0), "Mars/Olympus", &TZDB).unwrap_err();
        assert!(err.to_string().contains("Unknown zone"), "got: {err}");
    }

    // ── with_zone ───────────────────────────────────────────────────────

    #[test]
    fn test_with_zone_never_moves_the_instant() {
        let x = from_civil(&fields(2021, 3, 14, 18, 45, 0), "UTC", &TZDB)
            .unwrap()
            .instant;
        for zone in ["UTC", "America/New_York", "Asia/Tokyo", "Asia/Kolkata"] {
            let re = with_zone(x, zone, &TZDB).unwrap();
            let back = from_civil(&re, zone, &TZDB).unwrap();
            assert!((back.instant - x).is_zero(), "drifted in {zone}");
        }
    }

    // ── with_field ──────────────────────────────────────────────────────

    #[test]
    fn test_with_field_replaces_one_field() {
        let x = from_civil(&fields(2021, 5, 10, 8, 0, 0), "UTC", &TZDB)
            .unwrap()
            .instant;
        let r = with_field(x, "UTC", &TZDB, CivilField::Month, 7).unwrap();
        let f = to_civil(r.instant, "UTC", &TZDB).unwrap();
        assert_eq!((f.year(), f.month(), f.day(), f.hour()), (2021, 7, 10, 8));
    }

    #[test]
    fn test_with_field_validates_strictly() {
        let jan31 = from_civil(&fields(2021, 1, 31, 0, 0, 0), "UTC", &TZDB)
            .unwrap()
            .instant;
        let err = with_field(jan31, "UTC", &TZDB, CivilField::Month, 2).unwrap_err();
        assert!(err.to_string().contains("Invalid civil date"), "got: {err}");

        let err = with_field(jan31, "UTC", &TZDB, CivilField::Hour, 300).unwrap_err();
        assert!(err.to_string().contains("out of range"), "got: {err}");
    }

    // ── Round-trip property ─────────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_civil_round_trip(
            secs in -2_208_988_800i64..4_102_444_800,
            zone_idx in 0usize..4,
        ) {
            let zones = ["UTC", "America/New_York", "Europe/Paris", "Asia/Tokyo"];
            let zone = zones[zone_idx];
            let x = Instant::from_unix_seconds(secs);
            let f = to_civil(x, zone, &TZDB).unwrap();
            let r = from_civil(&f, zone, &TZDB).unwrap();

            // A reading observed on the real time line is never in a gap.
            prop_assert!(r.resolution != LocalResolution::GapSkipped);
            match r.resolution {
                LocalResolution::Unambiguous => prop_assert_eq!(r.instant, x),
                _ => {
                    // x sat in the repeated hour; the policy may pick the
                    // earlier twin, but the fields must survive the trip.
                    prop_assert!(r.instant <= x);
                    prop_assert_eq!(to_civil(r.instant, zone, &TZDB).unwrap(), f);
                }
            }
        }
    }
}
