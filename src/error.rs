use thiserror::Error;

use crate::property::ResolveError;

/// Top-level failure signal for a typed property lookup.
///
/// Resolution failures and value-coercion failures both surface here, so a
/// caller sees a single error type per lookup attempt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("invalid integer value '{value}': {source}")]
    InvalidInteger {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("invalid floating-point value '{value}': {source}")]
    InvalidFloat {
        value: String,
        source: std::num::ParseFloatError,
    },

    #[error("invalid decimal value '{value}': {source}")]
    InvalidDecimal {
        value: String,
        source: bigdecimal::ParseBigDecimalError,
    },

    #[error("invalid date value '{value}': {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    #[error("invalid JSON value '{value}': {source}")]
    InvalidJson {
        value: String,
        source: serde_json::Error,
    },
}
