//! Flexible date parsing against a declared field order.
//!
//! A raw string plus a declared [`FieldOrder`] template runs through a
//! fixed-priority list of candidate patterns:
//!
//! 1. numeric fields separated by `-`
//! 2. numeric fields separated by `/`
//! 3. full English month name
//! 4. canonical 3-letter month abbreviation
//! 5. a separator-free digit run
//!
//! The first pattern that matches the whole input wins, and the winning
//! [`PatternId`] travels with the parsed fields so the caller can audit
//! which rule fired. Inputs matching no pattern fail with
//! [`CivilError::FormatMismatch`]. A digit run whose length cannot be
//! split deterministically into month and day (a one-digit field glued to
//! a two-digit neighbor) fails with [`CivilError::AmbiguousDate`] — the
//! parser never guesses.
//!
//! Two-digit years resolve through an explicit [`PivotPolicy`]: the
//! century is chosen so the result lands within fifty years of the
//! configured reference year. The policy is part of [`ParseOptions`];
//! there is no hidden default.
//!
//! An optional trailing clock — `14:30`, `14:30:05`, `2pm`, `2:30pm` —
//! may follow the date after whitespace or `T`.

use serde::Serialize;

use crate::civil::{CivilFields, MONTH_NAMES};
use crate::error::{CivilError, Result};

// ── Configuration ───────────────────────────────────────────────────────────

/// Declared order of the three date fields in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldOrder {
    YearMonthDay,
    MonthDayYear,
    DayMonthYear,
}

impl FieldOrder {
    /// Indices of (year, month, day) among three input fields.
    fn positions(self) -> (usize, usize, usize) {
        match self {
            FieldOrder::YearMonthDay => (0, 1, 2),
            FieldOrder::MonthDayYear => (2, 0, 1),
            FieldOrder::DayMonthYear => (2, 1, 0),
        }
    }
}

/// Two-digit-year resolution: nearest century relative to a reference
/// year.
///
/// `resolve` maps a two-digit year into
/// `reference_year - 50 ..= reference_year + 49`, so with a reference of
/// 2020, `97` reads as 1997 and `68` as 2068.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PivotPolicy {
    pub reference_year: i32,
}

impl PivotPolicy {
    pub fn resolve(&self, two_digit: u32) -> i32 {
        let floor = self.reference_year - 50;
        floor + (two_digit as i32 - floor.rem_euclid(100)).rem_euclid(100)
    }
}

/// Parser configuration: the field-order template plus the two-digit-year
/// pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseOptions {
    pub order: FieldOrder,
    pub pivot: PivotPolicy,
}

// ── Results ─────────────────────────────────────────────────────────────────

/// Which candidate pattern matched, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PatternId {
    NumericDash,
    NumericSlash,
    MonthNameFull,
    MonthAbbrev,
    CompactDigits,
}

/// A successful parse: the fields plus the pattern that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedDate {
    pub fields: CivilFields,
    pub pattern: PatternId,
}

// ── Entry points ────────────────────────────────────────────────────────────

/// Parse a date (and optional trailing clock) against the declared
/// template.
///
/// # Errors
///
/// [`CivilError::FormatMismatch`] when no candidate pattern matches,
/// [`CivilError::AmbiguousDate`] when a digit run cannot be split
/// deterministically, and [`CivilError::InvalidCivilDate`] when a pattern
/// matches but the values name an impossible date.
pub fn parse_date(input: &str, opts: &ParseOptions) -> Result<ParsedDate> {
    let trimmed = input.trim();
    let (date_part, time_part) = split_date_time(trimmed);

    let clock = match time_part {
        Some(t) => Some(
            parse_time(t)
                .ok_or_else(|| CivilError::FormatMismatch(format!("unrecognized clock '{t}'")))?,
        ),
        None => None,
    };

    let matched = match_numeric(date_part, '-', opts)
        .map(|r| (PatternId::NumericDash, r))
        .or_else(|| match_numeric(date_part, '/', opts).map(|r| (PatternId::NumericSlash, r)))
        .or_else(|| match_month_name(date_part, opts, true).map(|r| (PatternId::MonthNameFull, r)))
        .or_else(|| match_month_name(date_part, opts, false).map(|r| (PatternId::MonthAbbrev, r)))
        .or_else(|| match_compact(date_part, opts).map(|r| (PatternId::CompactDigits, r)));

    let (pattern, fields) = match matched {
        Some((id, result)) => (id, result?),
        None => {
            return Err(CivilError::FormatMismatch(format!(
                "'{date_part}' matches no candidate date pattern"
            )));
        }
    };

    let fields = match clock {
        Some((h, mi, s)) => {
            CivilFields::new(fields.year(), fields.month(), fields.day(), h, mi, s)?
        }
        None => fields,
    };

    Ok(ParsedDate { fields, pattern })
}

/// Infer the pattern a worked example uses ("stamp" inference).
///
/// Runs the same fixed-priority matcher chain as [`parse_date`], so the
/// returned id is exactly the rule that fires on the example, and
/// [`crate::format::format_like`] can reuse it for rendering.
pub fn infer_pattern(example: &str, opts: &ParseOptions) -> Result<PatternId> {
    parse_date(example, opts).map(|p| p.pattern)
}

// ── Candidate matchers ──────────────────────────────────────────────────────
//
// Each matcher answers None when the input does not have its shape (the
// driver moves on to the next candidate) and Some(Err(..)) when the shape
// matched but the content is wrong (the driver stops — a later, lower
// priority pattern must not reinterpret it).

fn match_numeric(s: &str, sep: char, opts: &ParseOptions) -> Option<Result<CivilFields>> {
    let parts: Vec<&str> = s.split(sep).collect();
    if parts.len() != 3 || !parts.iter().all(|p| is_digits(p)) {
        return None;
    }
    Some(numeric_fields(&parts, opts))
}

fn numeric_fields(parts: &[&str], opts: &ParseOptions) -> Result<CivilFields> {
    let (y_idx, m_idx, d_idx) = opts.order.positions();
    let year = parse_year(parts[y_idx], &opts.pivot)?;
    let month = parse_narrow_field(parts[m_idx], "month")?;
    let day = parse_narrow_field(parts[d_idx], "day")?;
    CivilFields::date(year, month, day)
}

fn match_month_name(s: &str, opts: &ParseOptions, full: bool) -> Option<Result<CivilFields>> {
    let cleaned = s.replace(',', " ");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.len() != 3 {
        return None;
    }
    let (y_idx, m_idx, d_idx) = opts.order.positions();
    let month = month_from_name(tokens[m_idx], full)?;
    if !is_digits(tokens[y_idx]) || !is_digits(tokens[d_idx]) {
        return None;
    }
    Some(named_month_fields(tokens[y_idx], month, tokens[d_idx], opts))
}

fn named_month_fields(y_tok: &str, month: u8, d_tok: &str, opts: &ParseOptions) -> Result<CivilFields> {
    let year = parse_year(y_tok, &opts.pivot)?;
    let day = parse_narrow_field(d_tok, "day")?;
    CivilFields::date(year, month, day)
}

fn match_compact(s: &str, opts: &ParseOptions) -> Option<Result<CivilFields>> {
    if !is_digits(s) {
        return None;
    }
    Some(compact_fields(s, opts))
}

fn compact_fields(s: &str, opts: &ParseOptions) -> Result<CivilFields> {
    let year_width = match s.len() {
        8 => 4,
        6 => 2,
        5 | 7 => {
            return Err(CivilError::AmbiguousDate(format!(
                "'{s}': cannot split month from day without a separator"
            )));
        }
        _ => {
            return Err(CivilError::FormatMismatch(format!(
                "'{s}' is not a recognizable digit-run date"
            )));
        }
    };

    let (y_tok, m_tok, d_tok) = match opts.order {
        FieldOrder::YearMonthDay => (
            &s[..year_width],
            &s[year_width..year_width + 2],
            &s[year_width + 2..],
        ),
        FieldOrder::MonthDayYear => (&s[4..], &s[..2], &s[2..4]),
        FieldOrder::DayMonthYear => (&s[4..], &s[2..4], &s[..2]),
    };

    let year = parse_year(y_tok, &opts.pivot)?;
    let month = parse_narrow_field(m_tok, "month")?;
    let day = parse_narrow_field(d_tok, "day")?;
    CivilFields::date(year, month, day)
}

// ── Field helpers ───────────────────────────────────────────────────────────

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_year(token: &str, pivot: &PivotPolicy) -> Result<i32> {
    match token.len() {
        4 => token
            .parse::<i32>()
            .map_err(|_| CivilError::FormatMismatch(format!("bad year '{token}'"))),
        2 => {
            let two = token
                .parse::<u32>()
                .map_err(|_| CivilError::FormatMismatch(format!("bad year '{token}'")))?;
            Ok(pivot.resolve(two))
        }
        _ => Err(CivilError::FormatMismatch(format!(
            "year field '{token}' must be 2 or 4 digits"
        ))),
    }
}

fn parse_narrow_field(token: &str, what: &str) -> Result<u8> {
    if token.len() > 2 {
        return Err(CivilError::FormatMismatch(format!(
            "{what} field '{token}' too wide"
        )));
    }
    token
        .parse::<u8>()
        .map_err(|_| CivilError::FormatMismatch(format!("bad {what} '{token}'")))
}

/// Month number for a name token: the full canonical name, or exactly its
/// first three letters, case-insensitive.
fn month_from_name(token: &str, full: bool) -> Option<u8> {
    MONTH_NAMES
        .iter()
        .position(|name| {
            if full {
                token.eq_ignore_ascii_case(name)
            } else {
                token.len() == 3 && token.eq_ignore_ascii_case(&name[..3])
            }
        })
        .map(|i| (i + 1) as u8)
}

// ── Clock handling ──────────────────────────────────────────────────────────

/// Split an input into its date portion and an optional trailing clock.
pub(crate) fn split_date_time(s: &str) -> (&str, Option<&str>) {
    if let Some((date, time)) = s.split_once('T') {
        if !date.is_empty() && looks_like_time(time) {
            return (date, Some(time));
        }
    }
    if let Some(idx) = s.rfind(char::is_whitespace) {
        let (head, tail) = s.split_at(idx);
        let tail = tail.trim_start();
        if looks_like_time(tail) {
            return (head.trim_end(), Some(tail));
        }
    }
    (s, None)
}

fn looks_like_time(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    s.contains(':') || lower.ends_with("am") || lower.ends_with("pm")
}

/// Parse "14:30", "14:30:45", "2pm", "2:30pm", or "2:30:45am".
fn parse_time(s: &str) -> Option<(u8, u8, u8)> {
    let lower = s.trim().to_ascii_lowercase();

    let (clock, meridiem) = if let Some(rest) = lower.strip_suffix("pm") {
        (rest.trim_end(), Some(true))
    } else if let Some(rest) = lower.strip_suffix("am") {
        (rest.trim_end(), Some(false))
    } else {
        (lower.as_str(), None)
    };

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() > 3 || !parts.iter().all(|p| is_digits(p)) {
        return None;
    }
    // A bare number is only a clock with an am/pm marker.
    if meridiem.is_none() && parts.len() < 2 {
        return None;
    }

    let hour: u32 = parts[0].parse().ok()?;
    let minute: u32 = parts.get(1).map_or(Some(0), |p| p.parse().ok())?;
    let second: u32 = parts.get(2).map_or(Some(0), |p| p.parse().ok())?;

    let hour = match meridiem {
        Some(true) => match hour {
            12 => 12,
            1..=11 => hour + 12,
            _ => return None,
        },
        Some(false) => match hour {
            12 => 0,
            1..=11 => hour,
            _ => return None,
        },
        None => {
            if hour > 23 {
                return None;
            }
            hour
        }
    };
    if minute > 59 || second > 59 {
        return None;
    }
    Some((hour as u8, minute as u8, second as u8))
}

// ── Tests ───────────────────────────────────────────────────────────────────
