//! Configuration for prediction calls.

use bayspar_select::DEFAULT_SLOPE_EPSILON;

use crate::error::PredictError;

/// Default radius (km) searched for modern observations when inferring a
/// prior mean.
pub const DEFAULT_PRIOR_SEARCH_RADIUS_KM: f64 = 500.0;

/// Configuration shared by the `predict_*` entry points.
///
/// # Example
///
/// ```
/// use bayspar_predict::PredictConfig;
///
/// let config = PredictConfig::new()
///     .with_ensemble_size(Some(1000))
///     .with_clamp_proxy(false);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PredictConfig {
    /// Standard mode: `None` uses every draw of the cell, `Some(n)` keeps `n`
    /// drawn without replacement. Analog mode sizes its pool from the
    /// analog configuration instead.
    ensemble_size: Option<usize>,
    /// Clip forward TEX86 predictions into `[0, 1]`.
    clamp_proxy: bool,
    /// `|beta| <= slope_epsilon` counts as a degenerate slope.
    slope_epsilon: f64,
    /// Radius (km, chord distance) for prior-mean inference.
    prior_search_radius_km: f64,
    /// Observations always used for prior-mean inference when too few lie
    /// inside the radius.
    prior_min_obs: usize,
}

impl PredictConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self {
            ensemble_size: None,
            clamp_proxy: true,
            slope_epsilon: DEFAULT_SLOPE_EPSILON,
            prior_search_radius_km: DEFAULT_PRIOR_SEARCH_RADIUS_KM,
            prior_min_obs: 1,
        }
    }

    /// Sets the standard-mode ensemble size.
    pub fn with_ensemble_size(mut self, ensemble_size: Option<usize>) -> Self {
        self.ensemble_size = ensemble_size;
        self
    }

    /// Sets whether forward predictions are clipped into `[0, 1]`.
    pub fn with_clamp_proxy(mut self, clamp_proxy: bool) -> Self {
        self.clamp_proxy = clamp_proxy;
        self
    }

    /// Sets the degenerate-slope threshold.
    pub fn with_slope_epsilon(mut self, slope_epsilon: f64) -> Self {
        self.slope_epsilon = slope_epsilon;
        self
    }

    /// Sets the prior-mean search radius (km).
    pub fn with_prior_search_radius_km(mut self, radius_km: f64) -> Self {
        self.prior_search_radius_km = radius_km;
        self
    }

    /// Sets the minimum number of observations for prior-mean inference.
    pub fn with_prior_min_obs(mut self, min_obs: usize) -> Self {
        self.prior_min_obs = min_obs;
        self
    }

    /// Returns the standard-mode ensemble size.
    pub fn ensemble_size(&self) -> Option<usize> {
        self.ensemble_size
    }

    /// Returns whether forward predictions are clipped.
    pub fn clamp_proxy(&self) -> bool {
        self.clamp_proxy
    }

    /// Returns the degenerate-slope threshold.
    pub fn slope_epsilon(&self) -> f64 {
        self.slope_epsilon
    }

    /// Returns the prior-mean search radius (km).
    pub fn prior_search_radius_km(&self) -> f64 {
        self.prior_search_radius_km
    }

    /// Returns the minimum number of observations for prior-mean inference.
    pub fn prior_min_obs(&self) -> usize {
        self.prior_min_obs
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), PredictError> {
        if self.ensemble_size == Some(0) {
            return Err(PredictError::InvalidConfig {
                reason: "ensemble_size must be >= 1".to_string(),
            });
        }
        if !self.slope_epsilon.is_finite() || self.slope_epsilon < 0.0 {
            return Err(PredictError::InvalidConfig {
                reason: format!(
                    "slope_epsilon must be finite and non-negative, got {}",
                    self.slope_epsilon
                ),
            });
        }
        if !self.prior_search_radius_km.is_finite() || self.prior_search_radius_km <= 0.0 {
            return Err(PredictError::InvalidConfig {
                reason: format!(
                    "prior_search_radius_km must be finite and positive, got {}",
                    self.prior_search_radius_km
                ),
            });
        }
        if self.prior_min_obs < 1 {
            return Err(PredictError::InvalidConfig {
                reason: "prior_min_obs must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self::new()
    }
}
