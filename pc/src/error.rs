//! Synthesis error types

use thiserror::Error;

/// Errors produced by the synthesis engine.
///
/// Partial or missing bundle data is never an error — absent inputs become
/// absent day-plan fields. These variants cover only violations of the one
/// caller contract the engine enforces: a usable date range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("bundle has no date range")]
    MissingDateRange,

    #[error("invalid day count: {day_count} (must be at least 1)")]
    InvalidDayCount { day_count: i64 },
}
