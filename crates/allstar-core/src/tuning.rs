//! Validation helpers for engine tuning documents.

use crate::error::GameError;

/// Requires `min < max` for a named pair of bounds.
///
/// # Errors
///
/// Returns `GameError::InvalidTuning` if the bounds are not strictly ordered
/// or not finite.
pub fn ensure_ordered(name: &str, min: f64, max: f64) -> Result<(), GameError> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(GameError::InvalidTuning(format!(
            "{name} bounds must satisfy min < max, got [{min}, {max}]"
        )))
    }
}

/// Requires a finite, strictly positive value.
///
/// # Errors
///
/// Returns `GameError::InvalidTuning` otherwise.
pub fn ensure_positive(name: &str, value: f64) -> Result<(), GameError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidTuning(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

/// Requires a finite, non-negative value.
///
/// # Errors
///
/// Returns `GameError::InvalidTuning` otherwise.
pub fn ensure_non_negative(name: &str, value: f64) -> Result<(), GameError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidTuning(format!(
            "{name} must not be negative, got {value}"
        )))
    }
}
