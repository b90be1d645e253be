//! Error types for the wind estimation core
//!
//! Two kinds of failure exist:
//! - [`WindSimError::InvalidParameter`] is raised while constructing a parameter
//!   record or model when a physical invariant does not hold.
//! - [`WindSimError::ComputationError`] is raised when a derived metric leaves its
//!   guaranteed range, which points at an internal inconsistency rather than bad input.
//!
//! Every operation is deterministic, so nothing here is retryable.

/// Errors produced by the wind estimation core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WindSimError {
    /// A construction-time invariant was violated.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter (e.g. `"scale"`, `"cut_in_speed"`)
        name: &'static str,
        /// Human-readable description of the violated constraint
        reason: String,
    },

    /// A derived metric fell outside its guaranteed range.
    #[error("Computation error in '{metric}': value {value} is out of range")]
    ComputationError {
        /// Name of the metric (e.g. `"capacity_factor"`)
        metric: &'static str,
        /// The offending value
        value: f64,
    },
}

impl WindSimError {
    /// Create an `InvalidParameter` error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        WindSimError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Create an `InvalidParameter` error for a value that must be finite and positive.
    pub fn not_positive(name: &'static str, value: f64) -> Self {
        Self::invalid(name, format!("must be finite and positive, got {value}"))
    }

    /// Create a `ComputationError`.
    pub fn computation(metric: &'static str, value: f64) -> Self {
        WindSimError::ComputationError { metric, value }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WindSimError>;

/// Ensure `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WindSimError::not_positive(name, value))
    }
}

/// Ensure `value` is finite and not negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(WindSimError::invalid(
            name,
            format!("must be finite and non-negative, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("scale", 8.0), Ok(8.0));
        assert!(require_positive("scale", 0.0).is_err());
        assert!(require_positive("scale", -1.0).is_err());
        assert!(require_positive("scale", f64::NAN).is_err());
        assert!(require_positive("scale", f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert_eq!(require_non_negative("cut_in_speed", 0.0), Ok(0.0));
        assert!(require_non_negative("cut_in_speed", -0.5).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = WindSimError::not_positive("scale", 0.0);
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'scale': must be finite and positive, got 0"
        );

        let err = WindSimError::computation("capacity_factor", 1.5);
        assert_eq!(
            err.to_string(),
            "Computation error in 'capacity_factor': value 1.5 is out of range"
        );
    }
}
