//! # civiltime
//!
//! Calendar-aware civil time computation: converting between absolute,
//! zone-independent instants and human calendar fields, arithmetic that
//! keeps *calendar-relative* offsets (one month) distinct from
//! *exact-elapsed* offsets (2,592,000 seconds), and deterministic handling
//! of leap years, month lengths, and DST transitions.
//!
//! Everything is a pure function over immutable values: no system clock,
//! no hidden state. Zone rules come through the [`ZoneLookup`] collaborator
//! (backed by the IANA table via [`TzdbLookup`]), and the two DST edge
//! cases — a wall-clock reading that happens twice or never — resolve by a
//! fixed, documented policy and are tagged on the result instead of being
//! guessed silently.
//!
//! ## Modules
//!
//! - [`instant`] — [`Instant`], the absolute point on the time line
//! - [`civil`] — [`CivilFields`] and exact proleptic-Gregorian arithmetic
//! - [`span`] — [`Duration`] (exact), [`Period`] (calendar-relative), [`Unit`]
//! - [`zone`] — the [`ZoneLookup`] seam and [`TzdbLookup`]
//! - [`convert`] — instant ↔ civil conversion, [`with_zone`], [`with_field`]
//! - [`arith`] — [`add_duration`], [`add_period`], [`period_to_duration`]
//! - [`interval`] — [`Interval`] and its duration/period decompositions
//! - [`parse`] — template-driven parsing with auditable pattern ids
//! - [`format`] — token-pattern and example-driven rendering
//! - [`error`] — [`CivilError`]
//!
//! ## Example
//!
//! ```
//! use civiltime::{from_civil, CivilFields, Duration, Interval, Period, TzdbLookup};
//!
//! let tzdb = TzdbLookup;
//!
//! // An overnight shift spanning the 2020 US spring-forward.
//! let clock_in = from_civil(
//!     &CivilFields::new(2020, 3, 7, 23, 30, 0).unwrap(),
//!     "America/New_York",
//!     &tzdb,
//! )
//! .unwrap()
//! .instant;
//! let clock_out = from_civil(
//!     &CivilFields::new(2020, 3, 8, 7, 45, 0).unwrap(),
//!     "America/New_York",
//!     &tzdb,
//! )
//! .unwrap()
//! .instant;
//!
//! let shift = Interval::new(clock_in, clock_out);
//! // The wall clock saw 8h15m; only 7h15m elapsed.
//! assert_eq!(shift.as_duration(), Duration::from_hms(7, 15, 0));
//! let on_the_wall = shift.as_period("America/New_York", &tzdb).unwrap();
//! assert_eq!(on_the_wall.period, Period::of_hms(8, 15, 0));
//! ```

pub mod arith;
pub mod civil;
pub mod convert;
pub mod error;
pub mod format;
pub mod instant;
pub mod interval;
pub mod parse;
pub mod span;
pub mod zone;

pub use arith::{add_duration, add_period, period_to_duration};
pub use civil::{days_in_month, is_leap_year, CivilField, CivilFields};
pub use convert::{from_civil, to_civil, with_field, with_zone, LocalResolution, Resolved};
pub use error::CivilError;
pub use format::{format_civil, format_instant, format_like, pattern_for};
pub use instant::Instant;
pub use interval::{Interval, SignedPeriod};
pub use parse::{
    infer_pattern, parse_date, FieldOrder, ParseOptions, ParsedDate, PatternId, PivotPolicy,
};
pub use span::{Duration, DurationParts, Period, Unit};
pub use zone::{TzdbLookup, ZoneLookup, ZoneOffset};
