//! Validation error types.

use thiserror::Error;

/// Validation errors for parameter types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Parameter is `NaN` or infinite.
    #[error("{parameter} must be a finite number")]
    NonFinite {
        /// Parameter name.
        parameter: &'static str,
    },

    /// Parameter lies outside its accepted range.
    #[error("{parameter} must be in [{min}, {max}], got {value}")]
    OutOfRange {
        /// Parameter name.
        parameter: &'static str,
        /// Supplied value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
}

impl ValidationError {
    /// Checks that `value` is finite and inside `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFinite`] or [`ValidationError::OutOfRange`].
    pub fn check_range(
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<(), Self> {
        if !value.is_finite() {
            return Err(Self::NonFinite { parameter });
        }
        if value < min || value > max {
            return Err(Self::OutOfRange {
                parameter,
                value,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Checks that `value` is finite.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFinite`].
    pub fn check_finite(parameter: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NonFinite { parameter })
        }
    }
}
