//! Timezone offset lookup.
//!
//! The engine never compiles IANA rules itself. Offsets come through the
//! [`ZoneLookup`] collaborator: a pure function from `(zone_id, instant)` to
//! the UTC offset and DST flag in force at that instant. The bundled
//! [`TzdbLookup`] answers from the IANA table compiled into `chrono-tz`,
//! which is read-only and ready before the first lookup, so implementations
//! need no locking.

use chrono::{DateTime, Offset, TimeZone};
use chrono_tz::{OffsetComponents, Tz};
use serde::Serialize;

use crate::error::{CivilError, Result};
use crate::instant::Instant;

/// The UTC offset in force at one instant in one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneOffset {
    /// Seconds east of UTC (negative west).
    pub offset_seconds: i32,
    /// Whether a daylight-saving offset is in effect.
    pub is_dst: bool,
}

/// External collaborator resolving zone offsets.
///
/// The offset must be a pure function of the inputs: same zone id and
/// instant, same answer, with no hidden state.
pub trait ZoneLookup {
    /// Resolve the offset for `zone_id` at `instant`.
    ///
    /// # Errors
    ///
    /// Returns [`CivilError::UnknownZone`] when the id does not resolve.
    fn lookup(&self, zone_id: &str, instant: Instant) -> Result<ZoneOffset>;
}

/// [`ZoneLookup`] backed by the compiled-in IANA database from `chrono-tz`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TzdbLookup;

impl ZoneLookup for TzdbLookup {
    fn lookup(&self, zone_id: &str, instant: Instant) -> Result<ZoneOffset> {
        let tz: Tz = zone_id
            .parse()
            .map_err(|_| CivilError::UnknownZone(format!("'{zone_id}' is not in the IANA table")))?;
        let utc = DateTime::from_timestamp(instant.unix_seconds(), 0).ok_or_else(|| {
            CivilError::InvalidCivilDate(format!(
                "instant {} outside the representable range",
                instant.unix_seconds()
            ))
        })?;
        let offset = tz.offset_from_utc_datetime(&utc.naive_utc());
        Ok(ZoneOffset {
            offset_seconds: offset.fix().local_minus_utc(),
            is_dst: !offset.dst_offset().is_zero(),
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
