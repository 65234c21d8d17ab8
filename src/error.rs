//! Error types for AQI computation.
//!
//! `AqiError` covers caller mistakes at calculation time. `BreakpointTableError`
//! covers malformed breakpoint definitions and is only raised while a table is
//! being built or loaded.

use crate::pollutant::Pollutant;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the calculator, enrichment and breakdown operations.
///
/// None of these are retried; they are pure input errors.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AqiError {
    #[error("unknown pollutant: {identifier}")]
    UnknownPollutant { identifier: String },

    #[error("invalid concentration for {pollutant}: {value}")]
    InvalidConcentration { pollutant: Pollutant, value: f64 },

    #[error("{identifier} repeats a value already given for {pollutant}")]
    DuplicatePollutant { pollutant: Pollutant, identifier: String },

    #[error("reading contains no pollutant values")]
    EmptyReading,

    #[error("invalid AQI value: {value}")]
    InvalidAqi { value: f64 },
}

impl AqiError {
    pub(crate) fn unknown(identifier: impl Into<String>) -> Self {
        AqiError::UnknownPollutant {
            identifier: identifier.into(),
        }
    }
}

/// A breakpoint definition that does not form a gapless, increasing partition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BreakpointTableError {
    #[error("{pollutant}: no breakpoints defined")]
    Empty { pollutant: Pollutant },

    #[error("{pollutant}: first breakpoint starts at {start}, expected 0")]
    NonZeroStart { pollutant: Pollutant, start: f64 },

    #[error("{pollutant}: breakpoint {row} has an empty or inverted range")]
    InvertedRange { pollutant: Pollutant, row: usize },

    #[error("{pollutant}: gap or overlap between breakpoints {row} and {next}", next = .row + 1)]
    Discontinuous { pollutant: Pollutant, row: usize },

    #[error("{pollutant}: index decreases between breakpoints {row} and {next}", next = .row + 1)]
    IndexDecreasing { pollutant: Pollutant, row: usize },

    #[error("{pollutant}: non-finite value in breakpoint {row}")]
    NonFinite { pollutant: Pollutant, row: usize },
}
