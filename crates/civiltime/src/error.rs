//! Error types for civil-time operations.
//!
//! Ambiguous and nonexistent wall-clock readings are deliberately *not*
//! errors — they resolve deterministically and are tagged on the result via
//! [`crate::convert::LocalResolution`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CivilError {
    /// Day/month combination impossible for the given year, or a clock
    /// field outside its range.
    #[error("Invalid civil date: {0}")]
    InvalidCivilDate(String),

    /// Not enough information to split the fields deterministically.
    #[error("Ambiguous date: {0}")]
    AmbiguousDate(String),

    /// The zone id did not resolve against the supplied rule table.
    #[error("Unknown zone: {0}")]
    UnknownZone(String),

    /// The input matched no candidate pattern, or a pattern token is
    /// unrecognized.
    #[error("Format mismatch: {0}")]
    FormatMismatch(String),
}

pub type Result<T> = std::result::Result<T, CivilError>;
