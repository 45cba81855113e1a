//! Token-pattern rendering of instants and civil fields.
//!
//! # Token table
//!
//! | token | rendering |
//! |-------|-----------|
//! | `YYYY` | zero-padded 4-digit year |
//! | `YY` | last two digits of the year |
//! | `MMMM` | full English month name |
//! | `MMM` | canonical 3-letter month abbreviation |
//! | `MM` / `M` | zero-padded / bare month number |
//! | `DD` / `D` | zero-padded / bare day |
//! | `HH` / `H` | zero-padded / bare 24-hour clock hour |
//! | `hh` / `h` | zero-padded / bare 12-hour clock hour |
//! | `mm` | zero-padded minute |
//! | `ss` | zero-padded second |
//! | `A` / `a` | `AM`/`PM` or `am`/`pm` |
//!
//! Any other letter is rejected with [`CivilError::FormatMismatch`];
//! every other character renders literally.

use crate::civil::{CivilFields, MONTH_NAMES};
use crate::convert::to_civil;
use crate::error::{CivilError, Result};
use crate::instant::Instant;
use crate::parse::{infer_pattern, split_date_time, FieldOrder, ParseOptions, PatternId};
use crate::zone::ZoneLookup;

/// Recognized tokens, longest first so the scanner is greedy.
const TOKENS: [&str; 16] = [
    "YYYY", "MMMM", "MMM", "YY", "MM", "DD", "HH", "hh", "mm", "ss", "M", "D", "H", "h", "A", "a",
];

/// Render civil fields through an explicit token pattern.
pub fn format_civil(fields: &CivilFields, pattern: &str) -> Result<String> {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;
    'scan: while let Some(ch) = rest.chars().next() {
        for token in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                render_token(token, fields, &mut out);
                rest = tail;
                continue 'scan;
            }
        }
        if ch.is_ascii_alphabetic() {
            return Err(CivilError::FormatMismatch(format!(
                "unrecognized pattern token at '{ch}'"
            )));
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    Ok(out)
}

/// Decompose an instant under `zone_id` and render it through `pattern`.
pub fn format_instant(
    instant: Instant,
    zone_id: &str,
    tz: &impl ZoneLookup,
    pattern: &str,
) -> Result<String> {
    format_civil(&to_civil(instant, zone_id, tz)?, pattern)
}

/// Render `instant` the way a worked example is written.
///
/// Pattern selection delegates to [`infer_pattern`], so the rule that
/// parses the example is the rule that renders the output — parsing and
/// formatting driven by the same example stay symmetric. If the example
/// carries a clock, a canonical 24-hour `HH:mm:ss` clock is appended.
pub fn format_like(
    instant: Instant,
    zone_id: &str,
    tz: &impl ZoneLookup,
    example: &str,
    opts: &ParseOptions,
) -> Result<String> {
    let id = infer_pattern(example, opts)?;
    let fields = to_civil(instant, zone_id, tz)?;
    let mut rendered = format_civil(&fields, pattern_for(id, opts.order))?;
    if split_date_time(example.trim()).1.is_some() {
        rendered.push(' ');
        rendered.push_str(&format_civil(&fields, "HH:mm:ss")?);
    }
    Ok(rendered)
}

/// The canonical rendering pattern for a matched parse pattern.
pub fn pattern_for(pattern: PatternId, order: FieldOrder) -> &'static str {
    match (pattern, order) {
        (PatternId::NumericDash, FieldOrder::YearMonthDay) => "YYYY-MM-DD",
        (PatternId::NumericDash, FieldOrder::MonthDayYear) => "MM-DD-YYYY",
        (PatternId::NumericDash, FieldOrder::DayMonthYear) => "DD-MM-YYYY",
        (PatternId::NumericSlash, FieldOrder::YearMonthDay) => "YYYY/MM/DD",
        (PatternId::NumericSlash, FieldOrder::MonthDayYear) => "MM/DD/YYYY",
        (PatternId::NumericSlash, FieldOrder::DayMonthYear) => "DD/MM/YYYY",
        (PatternId::MonthNameFull, FieldOrder::YearMonthDay) => "YYYY MMMM D",
        (PatternId::MonthNameFull, FieldOrder::MonthDayYear) => "MMMM D, YYYY",
        (PatternId::MonthNameFull, FieldOrder::DayMonthYear) => "D MMMM YYYY",
        (PatternId::MonthAbbrev, FieldOrder::YearMonthDay) => "YYYY MMM D",
        (PatternId::MonthAbbrev, FieldOrder::MonthDayYear) => "MMM D, YYYY",
        (PatternId::MonthAbbrev, FieldOrder::DayMonthYear) => "D MMM YYYY",
        (PatternId::CompactDigits, FieldOrder::YearMonthDay) => "YYYYMMDD",
        (PatternId::CompactDigits, FieldOrder::MonthDayYear) => "MMDDYYYY",
        (PatternId::CompactDigits, FieldOrder::DayMonthYear) => "DDMMYYYY",
    }
}

fn render_token(token: &str, f: &CivilFields, out: &mut String) {
    match token {
        "YYYY" => out.push_str(&format_year(f.year())),
        "YY" => out.push_str(&format!("{:02}", f.year().rem_euclid(100))),
        "MMMM" => out.push_str(MONTH_NAMES[(f.month() - 1) as usize]),
        "MMM" => out.push_str(&MONTH_NAMES[(f.month() - 1) as usize][..3]),
        "MM" => out.push_str(&format!("{:02}", f.month())),
        "M" => out.push_str(&f.month().to_string()),
        "DD" => out.push_str(&format!("{:02}", f.day())),
        "D" => out.push_str(&f.day().to_string()),
        "HH" => out.push_str(&format!("{:02}", f.hour())),
        "H" => out.push_str(&f.hour().to_string()),
        "hh" => out.push_str(&format!("{:02}", hour12(f.hour()))),
        "h" => out.push_str(&hour12(f.hour()).to_string()),
        "mm" => out.push_str(&format!("{:02}", f.minute())),
        "ss" => out.push_str(&format!("{:02}", f.second())),
        "A" => out.push_str(if f.hour() < 12 { "AM" } else { "PM" }),
        "a" => out.push_str(if f.hour() < 12 { "am" } else { "pm" }),
        _ => {}
    }
}

fn hour12(hour: u8) -> u8 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

fn format_year(year: i32) -> String {
    if year < 0 {
        format!("-{:04}", -(year as i64))
    } else {
        format!("{year:04}")
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
