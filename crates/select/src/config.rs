//! Configuration for analog searches.

use crate::error::SelectError;

/// Default threshold below which a slope counts as degenerate.
pub const DEFAULT_SLOPE_EPSILON: f64 = 1e-12;

/// Which modern-observation value the analog search compares against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalogField {
    /// Observed TEX86 (inverse predictions: proxy in, temperature out).
    #[default]
    Tex,
    /// Observed sea temperature (forward predictions: temperature in, proxy out).
    SeaTemp,
}

/// Configuration for an analog search.
///
/// # Example
///
/// ```
/// use bayspar_select::{AnalogConfig, AnalogField};
///
/// let config = AnalogConfig::new(0.05, 5000)
///     .with_field(AnalogField::Tex)
///     .with_invertible_only(true);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AnalogConfig {
    /// Half-width of the inclusive match window around the target.
    tolerance: f64,
    /// Exact number of draws the pool must end up with.
    max_pool_size: usize,
    /// Observation value to match on.
    field: AnalogField,
    /// Drop draws with a degenerate slope before sizing the pool.
    invertible_only: bool,
    /// `|beta| <= slope_epsilon` counts as degenerate.
    slope_epsilon: f64,
}

impl AnalogConfig {
    /// Creates a configuration with the given tolerance and pool size.
    ///
    /// Defaults: `field = Tex`, `invertible_only = false`,
    /// `slope_epsilon = 1e-12`.
    pub fn new(tolerance: f64, max_pool_size: usize) -> Self {
        Self {
            tolerance,
            max_pool_size,
            field: AnalogField::Tex,
            invertible_only: false,
            slope_epsilon: DEFAULT_SLOPE_EPSILON,
        }
    }

    /// Sets the observation value to match on.
    pub fn with_field(mut self, field: AnalogField) -> Self {
        self.field = field;
        self
    }

    /// Drops degenerate slopes before the pool is sized.
    pub fn with_invertible_only(mut self, invertible_only: bool) -> Self {
        self.invertible_only = invertible_only;
        self
    }

    /// Sets the degenerate-slope threshold.
    pub fn with_slope_epsilon(mut self, slope_epsilon: f64) -> Self {
        self.slope_epsilon = slope_epsilon;
        self
    }

    /// Returns the search tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the requested pool size.
    pub fn max_pool_size(&self) -> usize {
        self.max_pool_size
    }

    /// Returns the matched observation field.
    pub fn field(&self) -> AnalogField {
        self.field
    }

    /// Returns whether degenerate slopes are dropped.
    pub fn invertible_only(&self) -> bool {
        self.invertible_only
    }

    /// Returns the degenerate-slope threshold.
    pub fn slope_epsilon(&self) -> f64 {
        self.slope_epsilon
    }

    /// Validates this configuration.
    ///
    /// Tolerance is checked first, then pool size, then the slope threshold.
    pub fn validate(&self) -> Result<(), SelectError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SelectError::InvalidTolerance {
                tolerance: self.tolerance,
            });
        }
        if self.max_pool_size < 1 {
            return Err(SelectError::InvalidPoolSize {
                size: self.max_pool_size,
            });
        }
        if !self.slope_epsilon.is_finite() || self.slope_epsilon < 0.0 {
            return Err(SelectError::InvalidConfig {
                reason: format!(
                    "slope_epsilon must be finite and non-negative, got {}",
                    self.slope_epsilon
                ),
            });
        }
        Ok(())
    }
}
