//! Error types for the bayspar-predict crate.

use bayspar_store::TempType;

/// Error type for all fallible operations in the bayspar-predict crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PredictError {
    /// Returned when an input series is empty.
    #[error("{field} is empty")]
    EmptyInput {
        /// Name of the empty input.
        field: &'static str,
    },

    /// Returned when an input series contains NaN or infinity.
    #[error("non-finite value in {field}")]
    NonFiniteInput {
        /// Name of the offending input.
        field: &'static str,
    },

    /// Returned when the prior mean or standard deviation is unusable.
    #[error("invalid prior: {reason}")]
    InvalidPrior {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a percentile lies outside `[0, 100]`.
    #[error("invalid percentile {q} (must be in [0, 100])")]
    InvalidQuantile {
        /// The rejected percentile.
        q: f64,
    },

    /// Returned when a configuration value is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when no calibration store was loaded for a temperature type.
    #[error("no calibration loaded for temperature type '{temptype}'")]
    MissingCalibration {
        /// The requested temperature type.
        temptype: TempType,
    },

    /// Returned when a prior mean must be inferred but the store holds no
    /// modern observations.
    #[error("cannot infer a prior mean: no '{temptype}' observations in the calibration store")]
    NoPriorObservations {
        /// Temperature type of the store searched.
        temptype: TempType,
    },

    /// Returned when a computed ensemble member is NaN or infinite.
    #[error("non-finite ensemble value at input {row}, draw {col}")]
    NonFiniteEnsemble {
        /// Input index.
        row: usize,
        /// Draw index.
        col: usize,
    },

    /// Returned when output serialization fails.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the failure.
        reason: String,
    },

    /// Store error.
    #[error(transparent)]
    Store(#[from] bayspar_store::StoreError),

    /// Selection error.
    #[error(transparent)]
    Select(#[from] bayspar_select::SelectError),
}
