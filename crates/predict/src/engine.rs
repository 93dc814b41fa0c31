//! Draw-by-draw predictive sampling in both directions.

use bayspar_select::{DEFAULT_SLOPE_EPSILON, ParameterPool, SelectError};
use bayspar_store::Draw;
use ndarray::Array2;
use rand::Rng;
use rand_distr::StandardNormal;
use tracing::debug;

use crate::ensemble::Ensemble;
use crate::error::PredictError;
use crate::prior::Prior;

/// Configuration for [`PredictiveEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    clamp_proxy: bool,
    slope_epsilon: f64,
}

impl EngineConfig {
    /// Creates a configuration with `clamp_proxy = true` and
    /// `slope_epsilon = 1e-12`.
    pub fn new() -> Self {
        Self {
            clamp_proxy: true,
            slope_epsilon: DEFAULT_SLOPE_EPSILON,
        }
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

    pub fn clamp_proxy(&self) -> bool {
        self.clamp_proxy
    }

    pub fn slope_epsilon(&self) -> f64 {
        self.slope_epsilon
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), PredictError> {
        if !self.slope_epsilon.is_finite() || self.slope_epsilon < 0.0 {
            return Err(PredictError::InvalidConfig {
                reason: format!(
                    "slope_epsilon must be finite and non-negative, got {}",
                    self.slope_epsilon
                ),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Which way a prediction runs through the calibration regression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    /// TEX86 in, sea temperature out, under a Gaussian prior.
    Inverse(Prior),
    /// Sea temperature in, TEX86 out.
    Forward,
}

/// Produces prediction ensembles from a parameter pool.
///
/// For each draw `(alpha, beta, tau2)` and input `x`:
///
/// - **Inverse**: the conjugate normal posterior of `T` given
///   `x = alpha + beta * T + e`, `e ~ N(0, tau2)`, `T ~ N(mu, sigma^2)`:
///
///   ```text
///   denom = tau2 + sigma^2 * beta^2
///   mean  = (tau2 * mu + sigma^2 * beta * (x - alpha)) / denom
///   var   = sigma^2 * tau2 / denom
///   T     = mean + z * sqrt(var)
///   ```
///
///   The variance form stays finite when `sigma^2` or `tau2` is vanishingly
///   small. If `sigma^2` overflows, the flat-prior limit
///   `mean = (x - alpha) / beta`, `var = tau2 / beta^2` is used.
///
///   Draws with `|beta| <= slope_epsilon` are skipped.
/// - **Forward**: `alpha + beta * x + sqrt(tau2) * z`, clipped into `[0, 1]`
///   when `clamp_proxy` is set.
///
/// `z` is standard normal, drawn from the caller's RNG column by column.
#[derive(Debug, Clone, Default)]
pub struct PredictiveEngine {
    config: EngineConfig,
}

impl PredictiveEngine {
    /// Creates an engine.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Predicts an ensemble of shape `(values.len(), usable draws)`.
    ///
    /// # Errors
    ///
    /// - [`PredictError::EmptyInput`] / [`PredictError::NonFiniteInput`] for
    ///   bad `values`.
    /// - [`PredictError::InvalidConfig`] for a bad engine configuration.
    /// - [`SelectError::InsufficientDraws`] (wrapped) when no usable draw remains.
    /// - [`PredictError::NonFiniteEnsemble`] if any result is not finite.
    #[tracing::instrument(skip_all, fields(n_values = values.len(), n_draws = pool.len()))]
    pub fn predict<R: Rng>(
        &self,
        values: &[f64],
        pool: &ParameterPool,
        direction: &Direction,
        rng: &mut R,
    ) -> Result<Ensemble, PredictError> {
        check_values(values, "values")?;
        self.config.validate()?;

        match direction {
            Direction::Inverse(prior) => self.inverse(values, pool, prior, rng),
            Direction::Forward => self.forward(values, pool, rng),
        }
    }

    fn inverse<R: Rng>(
        &self,
        values: &[f64],
        pool: &ParameterPool,
        prior: &Prior,
        rng: &mut R,
    ) -> Result<Ensemble, PredictError> {
        let draws: Vec<&Draw> = pool
            .draws()
            .iter()
            .filter(|d| d.is_invertible(self.config.slope_epsilon))
            .collect();
        let dropped = pool.len() - draws.len();
        if dropped > 0 {
            debug!(dropped, kept = draws.len(), "skipped degenerate slopes");
        }
        if draws.is_empty() {
            return Err(no_draws(pool));
        }

        let mu = prior.mean();
        let prior_var = prior.variance();

        let mut out = Array2::zeros((values.len(), draws.len()));
        for (j, d) in draws.iter().enumerate() {
            let post = Posterior::new(prior_var, d);
            for (i, &x) in values.iter().enumerate() {
                let mean = post.prior_weight * mu + post.data_weight * (x - d.alpha);
                let z: f64 = rng.sample(StandardNormal);
                out[[i, j]] = mean + z * post.sd;
            }
        }
        Ensemble::new(out)
    }

    fn forward<R: Rng>(
        &self,
        values: &[f64],
        pool: &ParameterPool,
        rng: &mut R,
    ) -> Result<Ensemble, PredictError> {
        if pool.is_empty() {
            return Err(no_draws(pool));
        }

        let mut out = Array2::zeros((values.len(), pool.len()));
        for (j, d) in pool.draws().iter().enumerate() {
            let sd = d.tau2.sqrt();
            for (i, &t) in values.iter().enumerate() {
                let z: f64 = rng.sample(StandardNormal);
                let proxy = d.alpha + d.beta * t + sd * z;
                out[[i, j]] = if self.config.clamp_proxy {
                    proxy.clamp(0.0, 1.0)
                } else {
                    proxy
                };
            }
        }
        Ensemble::new(out)
    }
}

/// Per-draw conjugate update: `mean = prior_weight * mu + data_weight * (x - alpha)`.
#[derive(Debug, Clone, Copy)]
struct Posterior {
    prior_weight: f64,
    data_weight: f64,
    sd: f64,
}

impl Posterior {
    fn new(prior_var: f64, d: &Draw) -> Self {
        if prior_var.is_finite() {
            let denom = d.tau2 + prior_var * d.beta * d.beta;
            Self {
                prior_weight: d.tau2 / denom,
                data_weight: prior_var * d.beta / denom,
                sd: (prior_var * d.tau2 / denom).sqrt(),
            }
        } else {
            Self {
                prior_weight: 0.0,
                data_weight: d.beta.recip(),
                sd: d.tau2.sqrt() / d.beta.abs(),
            }
        }
    }
}

fn no_draws(pool: &ParameterPool) -> PredictError {
    SelectError::InsufficientDraws {
        available: 0,
        requested: pool.len().max(1),
    }
    .into()
}

/// Rejects empty or non-finite input series.
pub(crate) fn check_values(values: &[f64], field: &'static str) -> Result<(), PredictError> {
    if values.is_empty() {
        return Err(PredictError::EmptyInput { field });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(PredictError::NonFiniteInput { field });
    }
    Ok(())
}
