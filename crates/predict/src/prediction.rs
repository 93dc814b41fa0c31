//! Prediction results and percentile summaries.

use bayspar_stats::{Interpolation, quantile, sorted_copy};
use bayspar_store::{LatLon, TempType};
use serde::Serialize;

use crate::ensemble::Ensemble;
use crate::error::PredictError;
use crate::output::{PercentileSeries, PredictionSummary};
use crate::prior::Prior;

/// Percentiles reported when none are requested.
pub const DEFAULT_PERCENTILES: [f64; 3] = [5.0, 50.0, 95.0];

/// Which way a prediction ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionKind {
    /// TEX86 to sea temperature.
    Inverse,
    /// Sea temperature to TEX86.
    Forward,
}

/// Per-input percentiles for a list of levels.
#[derive(Debug, Clone, PartialEq)]
pub struct Percentiles {
    levels: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl Percentiles {
    /// The requested levels, in request order.
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Per-input values for level `q`, if it was requested.
    pub fn get(&self, q: f64) -> Option<&[f64]> {
        self.levels
            .iter()
            .position(|&l| l == q)
            .map(|k| self.values[k].as_slice())
    }

    /// `(level, per-input values)` pairs in request order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[f64])> {
        self.levels
            .iter()
            .copied()
            .zip(self.values.iter().map(Vec::as_slice))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// The outcome of one prediction call.
#[derive(Debug, Clone)]
pub struct Prediction {
    ensemble: Ensemble,
    temptype: TempType,
    kind: PredictionKind,
    latlon: Option<LatLon>,
    prior: Option<Prior>,
    modelparam_gridpoints: Vec<LatLon>,
    analog_gridpoints: Vec<LatLon>,
}

impl Prediction {
    pub(crate) fn new(ensemble: Ensemble, temptype: TempType, kind: PredictionKind) -> Self {
        Self {
            ensemble,
            temptype,
            kind,
            latlon: None,
            prior: None,
            modelparam_gridpoints: Vec::new(),
            analog_gridpoints: Vec::new(),
        }
    }

    pub(crate) fn with_latlon(mut self, latlon: LatLon) -> Self {
        self.latlon = Some(latlon);
        self
    }

    pub(crate) fn with_prior(mut self, prior: Prior) -> Self {
        self.prior = Some(prior);
        self
    }

    pub(crate) fn with_modelparam_gridpoints(mut self, points: Vec<LatLon>) -> Self {
        self.modelparam_gridpoints = points;
        self
    }

    pub(crate) fn with_analog_gridpoints(mut self, points: Vec<LatLon>) -> Self {
        self.analog_gridpoints = points;
        self
    }

    /// The `(n_inputs, n_draws)` ensemble.
    pub fn ensemble(&self) -> &Ensemble {
        &self.ensemble
    }

    /// Consumes the prediction and returns its ensemble.
    pub fn into_ensemble(self) -> Ensemble {
        self.ensemble
    }

    pub fn temptype(&self) -> TempType {
        self.temptype
    }

    pub fn direction(&self) -> PredictionKind {
        self.kind
    }

    /// Site coordinate (standard mode only).
    pub fn latlon(&self) -> Option<LatLon> {
        self.latlon
    }

    /// Prior mean used (inverse predictions only).
    pub fn prior_mean(&self) -> Option<f64> {
        self.prior.map(|p| p.mean())
    }

    /// Prior standard deviation used (inverse predictions only).
    pub fn prior_std(&self) -> Option<f64> {
        self.prior.map(|p| p.std())
    }

    /// Center of the grid cell whose draws were used (standard mode).
    pub fn modelparam_gridpoints(&self) -> &[LatLon] {
        &self.modelparam_gridpoints
    }

    /// Centers of the matched analog cells (analog mode).
    pub fn analog_gridpoints(&self) -> &[LatLon] {
        &self.analog_gridpoints
    }

    pub fn n_inputs(&self) -> usize {
        self.ensemble.n_inputs()
    }

    pub fn n_draws(&self) -> usize {
        self.ensemble.n_draws()
    }

    /// Percentiles `q` (each in `[0, 100]`) of every input's ensemble, using
    /// nearest-rank interpolation.
    pub fn percentile(&self, q: &[f64]) -> Result<Percentiles, PredictError> {
        self.percentile_with(q, Interpolation::Nearest)
    }

    /// The 5th, 50th and 95th percentiles.
    pub fn percentile_default(&self) -> Percentiles {
        self.compute_percentiles(&DEFAULT_PERCENTILES, Interpolation::Nearest)
    }

    /// Percentiles `q` with an explicit interpolation method.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::InvalidQuantile`] for the first `q` outside
    /// `[0, 100]`.
    pub fn percentile_with(
        &self,
        q: &[f64],
        method: Interpolation,
    ) -> Result<Percentiles, PredictError> {
        if let Some(&bad) = q.iter().find(|q| !(0.0..=100.0).contains(*q)) {
            return Err(PredictError::InvalidQuantile { q: bad });
        }
        Ok(self.compute_percentiles(q, method))
    }

    fn compute_percentiles(&self, q: &[f64], method: Interpolation) -> Percentiles {
        let sorted_rows: Vec<Vec<f64>> = self
            .ensemble
            .rows()
            .map(|r| sorted_copy(&r.to_vec()))
            .collect();
        let values = q
            .iter()
            .map(|&level| {
                sorted_rows
                    .iter()
                    .map(|row| quantile(row, level / 100.0, method))
                    .collect()
            })
            .collect();
        Percentiles {
            levels: q.to_vec(),
            values,
        }
    }

    /// Serializable summary with percentiles `q` and, optionally, the full
    /// ensemble.
    pub fn summary(
        &self,
        q: &[f64],
        include_ensemble: bool,
    ) -> Result<PredictionSummary, PredictError> {
        self.summary_with(q, Interpolation::Nearest, include_ensemble)
    }

    /// [`summary`](Self::summary) with an explicit interpolation method.
    pub fn summary_with(
        &self,
        q: &[f64],
        method: Interpolation,
        include_ensemble: bool,
    ) -> Result<PredictionSummary, PredictError> {
        let percentiles = self.percentile_with(q, method)?;
        Ok(PredictionSummary {
            temptype: self.temptype,
            direction: self.kind,
            latlon: self.latlon,
            prior_mean: self.prior_mean(),
            prior_std: self.prior_std(),
            n_inputs: self.n_inputs(),
            n_draws: self.n_draws(),
            modelparam_gridpoints: self.modelparam_gridpoints.clone(),
            analog_gridpoints: self.analog_gridpoints.clone(),
            percentiles: percentiles
                .iter()
                .map(|(q, values)| PercentileSeries {
                    q,
                    values: values.to_vec(),
                })
                .collect(),
            ensemble: include_ensemble.then(|| self.ensemble.to_rows()),
        })
    }
}
