//! Gaussian prior on sea temperature and prior-mean inference.

use bayspar_store::{CalibrationStore, LatLon};
use serde::Serialize;
use tracing::debug;

use crate::error::PredictError;

/// Normal prior `N(mean, std^2)` on each element of the temperature series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prior {
    mean: f64,
    std: f64,
}

impl Prior {
    /// Creates a prior.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::InvalidPrior`] if `mean` is non-finite or `std`
    /// is not finite and positive.
    pub fn new(mean: f64, std: f64) -> Result<Self, PredictError> {
        check_mean(mean)?;
        check_std(std)?;
        Ok(Self { mean, std })
    }

    /// Prior mean (°C).
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Prior standard deviation (°C).
    pub fn std(&self) -> f64 {
        self.std
    }

    /// Prior variance.
    pub fn variance(&self) -> f64 {
        self.std * self.std
    }
}

pub(crate) fn check_mean(mean: f64) -> Result<(), PredictError> {
    if !mean.is_finite() {
        return Err(PredictError::InvalidPrior {
            reason: format!("prior_mean must be finite, got {mean}"),
        });
    }
    Ok(())
}

pub(crate) fn check_std(std: f64) -> Result<(), PredictError> {
    if !std.is_finite() || std <= 0.0 {
        return Err(PredictError::InvalidPrior {
            reason: format!("prior_std must be finite and positive, got {std}"),
        });
    }
    Ok(())
}

/// Infers a prior mean from the modern observations near `site`.
///
/// Observations strictly closer than `radius_km` (chord distance) are
/// averaged when there are at least `min_obs` of them; otherwise the `min_obs`
/// nearest observations are averaged, whatever their distance.
///
/// # Errors
///
/// Returns [`PredictError::NoPriorObservations`] if the store has no
/// observations.
pub fn infer_prior_mean(
    store: &CalibrationStore,
    site: &LatLon,
    radius_km: f64,
    min_obs: usize,
) -> Result<f64, PredictError> {
    let mut ranked: Vec<(f64, f64)> = store
        .observations()
        .iter()
        .map(|obs| (site.chord_km(&obs.location()), obs.seatemp()))
        .collect();
    if ranked.is_empty() {
        return Err(PredictError::NoPriorObservations {
            temptype: store.temptype(),
        });
    }
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n_within = ranked.iter().take_while(|(d, _)| *d < radius_km).count();
    let n_used = if n_within >= min_obs {
        n_within
    } else {
        min_obs.min(ranked.len())
    };
    let used: Vec<f64> = ranked[..n_used].iter().map(|&(_, t)| t).collect();
    let mean = bayspar_stats::mean(&used);

    debug!(
        n_within,
        n_used,
        radius_km,
        prior_mean = mean,
        "inferred prior mean from modern observations"
    );
    Ok(mean)
}
