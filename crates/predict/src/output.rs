//! JSON output structures for predictions.

use bayspar_store::{LatLon, TempType};
use serde::Serialize;

use crate::error::PredictError;
use crate::prediction::PredictionKind;

/// Serializable summary of a [`Prediction`](crate::Prediction).
#[derive(Debug, Clone, Serialize)]
pub struct PredictionSummary {
    pub temptype: TempType,
    pub direction: PredictionKind,
    pub latlon: Option<LatLon>,
    pub prior_mean: Option<f64>,
    pub prior_std: Option<f64>,
    pub n_inputs: usize,
    pub n_draws: usize,
    pub modelparam_gridpoints: Vec<LatLon>,
    pub analog_gridpoints: Vec<LatLon>,
    /// One entry per requested level, each holding one value per input.
    pub percentiles: Vec<PercentileSeries>,
    /// Full ensemble, one row per input, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ensemble: Option<Vec<Vec<f64>>>,
}

/// Per-input values of one percentile level.
#[derive(Debug, Clone, Serialize)]
pub struct PercentileSeries {
    pub q: f64,
    pub values: Vec<f64>,
}

/// Serialize a prediction summary to a JSON string.
pub fn to_json(summary: &PredictionSummary) -> Result<String, PredictError> {
    serde_json::to_string_pretty(summary).map_err(|e| PredictError::Serialization {
        reason: e.to_string(),
    })
}
