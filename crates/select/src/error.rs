//! Error types for the bayspar-select crate.

/// Error type for all fallible operations in the bayspar-select crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SelectError {
    /// Returned when a site coordinate is non-finite or out of range.
    #[error("invalid location: lat {lat}, lon {lon} (lat must be in [-90, 90], lon in [-180, 360])")]
    InvalidLocation {
        /// Latitude as supplied.
        lat: f64,
        /// Longitude as supplied.
        lon: f64,
    },

    /// Returned when no target values were supplied.
    #[error("no target values provided")]
    EmptyInput,

    /// Returned when an input contains NaN or infinity.
    #[error("non-finite value in {field}")]
    NonFiniteInput {
        /// Name of the offending input.
        field: &'static str,
    },

    /// Returned when the analog search tolerance is not strictly positive.
    #[error("search tolerance must be finite and positive, got {tolerance}")]
    InvalidTolerance {
        /// The rejected tolerance.
        tolerance: f64,
    },

    /// Returned when the requested pool size is zero.
    #[error("pool size must be >= 1, got {size}")]
    InvalidPoolSize {
        /// The rejected size.
        size: usize,
    },

    /// Returned when a configuration value is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when no modern observation lies within tolerance of the target.
    #[error("no analogs found within {tolerance} of {target}; widen the search tolerance")]
    NoAnalogsFound {
        /// Representative target value (mean of the inputs).
        target: f64,
        /// Search tolerance used.
        tolerance: f64,
    },

    /// Returned when fewer usable draws exist than were requested.
    #[error("requested {requested} draws but only {available} are available")]
    InsufficientDraws {
        /// Usable draws in the pool.
        available: usize,
        /// Requested ensemble size.
        requested: usize,
    },

    /// Returned when the store has no cell holding any draws.
    #[error("calibration store has no populated grid cells")]
    NoPopulatedCells,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_tolerance() {
        let e = SelectError::InvalidTolerance { tolerance: 0.0 };
        assert_eq!(
            e.to_string(),
            "search tolerance must be finite and positive, got 0"
        );
    }

    #[test]
    fn display_no_analogs() {
        let e = SelectError::NoAnalogsFound {
            target: 5.0,
            tolerance: 0.01,
        };
        assert_eq!(
            e.to_string(),
            "no analogs found within 0.01 of 5; widen the search tolerance"
        );
    }

    #[test]
    fn display_insufficient_draws() {
        let e = SelectError::InsufficientDraws {
            available: 600,
            requested: 8000,
        };
        assert_eq!(
            e.to_string(),
            "requested 8000 draws but only 600 are available"
        );
    }

    #[test]
    fn display_invalid_pool_size() {
        let e = SelectError::InvalidPoolSize { size: 0 };
        assert_eq!(e.to_string(), "pool size must be >= 1, got 0");
    }

    #[test]
    fn display_non_finite() {
        let e = SelectError::NonFiniteInput { field: "targets" };
        assert_eq!(e.to_string(), "non-finite value in targets");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SelectError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SelectError>();
    }
}
