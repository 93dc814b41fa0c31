//! Error types for the bayspar-store crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the bayspar-store crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Returned when a temperature-type token is not recognised.
    #[error("invalid temperature type '{token}' (expected 'sst' or 'subt')")]
    InvalidTemptype {
        /// The unrecognised token.
        token: String,
    },

    /// Returned when a coordinate is non-finite or outside the valid range.
    #[error("invalid location: lat {lat}, lon {lon}")]
    InvalidLocation {
        /// Latitude as supplied.
        lat: f64,
        /// Longitude as supplied.
        lon: f64,
    },

    /// Returned when the grid cell size does not tile the globe.
    #[error("invalid grid cell size {cell_size} (must be positive and divide 180)")]
    InvalidGrid {
        /// The rejected cell size in degrees.
        cell_size: f64,
    },

    /// Returned when the parallel draw arrays of a cell differ in length.
    #[error("{field}: expected {expected} draws, got {got}")]
    DrawLengthMismatch {
        /// Name of the mismatched array.
        field: &'static str,
        /// Expected length (length of the alpha array).
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when a posterior draw violates the draw invariants.
    #[error("malformed draw {index}: {reason}")]
    MalformedDraw {
        /// Draw index within its cell.
        index: usize,
        /// Which invariant was violated.
        reason: &'static str,
    },

    /// Returned when a modern observation carries a non-finite value.
    #[error("malformed observation {index}: {reason}")]
    MalformedObservation {
        /// Observation index.
        index: usize,
        /// Which value was rejected.
        reason: &'static str,
    },

    /// Returned when two cells map onto the same grid position.
    #[error("duplicate grid cell at row {row}, col {col}")]
    DuplicateCell {
        /// Grid row.
        row: usize,
        /// Grid column.
        col: usize,
    },

    /// Returned when a modern observation falls in a cell that is not in the store.
    #[error("observation {index} lies in grid cell (row {row}, col {col}) which has no entry")]
    UnknownCell {
        /// Observation index.
        index: usize,
        /// Grid row.
        row: usize,
        /// Grid column.
        col: usize,
    },

    /// Returned when the calibration dataset cannot be read or is malformed.
    #[error("failed to load calibration dataset {}: {reason}", path.display())]
    DatasetLoad {
        /// Path of the dataset file.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_temptype() {
        let e = StoreError::InvalidTemptype {
            token: "deep".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid temperature type 'deep' (expected 'sst' or 'subt')"
        );
    }

    #[test]
    fn display_invalid_location() {
        let e = StoreError::InvalidLocation {
            lat: 91.0,
            lon: 0.0,
        };
        assert_eq!(e.to_string(), "invalid location: lat 91, lon 0");
    }

    #[test]
    fn display_draw_length_mismatch() {
        let e = StoreError::DrawLengthMismatch {
            field: "tau2",
            expected: 10,
            got: 9,
        };
        assert_eq!(e.to_string(), "tau2: expected 10 draws, got 9");
    }

    #[test]
    fn display_malformed_draw() {
        let e = StoreError::MalformedDraw {
            index: 3,
            reason: "tau2 must be finite and positive",
        };
        assert_eq!(
            e.to_string(),
            "malformed draw 3: tau2 must be finite and positive"
        );
    }

    #[test]
    fn display_dataset_load() {
        let e = StoreError::DatasetLoad {
            path: PathBuf::from("/data/sst.json"),
            reason: "file not found".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "failed to load calibration dataset /data/sst.json: file not found"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<StoreError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<StoreError>();
    }
}
