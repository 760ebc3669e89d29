//! Error types for engine inputs and record loading

use thiserror::Error;

/// Validation failures raised at the engine boundary
///
/// The calculation components are pure and never fail transiently; every
/// variant here describes an input the caller has to fix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be within 0..=100 (got {value})")]
    PercentOutOfRange { field: &'static str, value: i64 },

    #[error("{field} must be at most {max} (got {value})")]
    TooLarge {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Reject NaN and infinities
pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFinite { field })
    }
}

/// Reject non-finite and negative amounts
pub fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
    let value = ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(EngineError::Negative { field, value });
    }
    Ok(value)
}

/// Reject percentages outside 0..=100
pub fn ensure_percent(field: &'static str, value: i64) -> Result<u32> {
    if (0..=100).contains(&value) {
        Ok(value as u32)
    } else {
        Err(EngineError::PercentOutOfRange { field, value })
    }
}

/// Failures while reading transactions, profiles or configuration from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {line}: {source}")]
    Invalid {
        line: u64,
        #[source]
        source: EngineError,
    },

    #[error("record {line}: unknown {field} '{value}'")]
    UnknownVariant {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("record {line}: bad timestamp '{value}'")]
    Timestamp { line: u64, value: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("amount", 12.5), Ok(12.5));
        assert_eq!(
            ensure_finite("amount", f64::NAN),
            Err(EngineError::NonFinite { field: "amount" })
        );
        assert!(ensure_finite("amount", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_non_negative() {
        assert_eq!(ensure_non_negative("amount", 0.0), Ok(0.0));
        assert_eq!(
            ensure_non_negative("amount", -1.0),
            Err(EngineError::Negative { field: "amount", value: -1.0 })
        );
    }

    #[test]
    fn test_ensure_percent() {
        assert_eq!(ensure_percent("needs", 0), Ok(0));
        assert_eq!(ensure_percent("needs", 100), Ok(100));
        assert!(ensure_percent("needs", 101).is_err());
        assert!(ensure_percent("needs", -1).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = EngineError::PercentOutOfRange { field: "wants", value: 140 };
        assert_eq!(err.to_string(), "wants must be within 0..=100 (got 140)");
    }
}
