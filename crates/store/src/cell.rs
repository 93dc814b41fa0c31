//! Posterior draws and the grid cells that hold them.

use crate::error::StoreError;
use crate::grid::CellKey;
use crate::location::LatLon;

/// One joint posterior draw of the calibration regression
/// `tex = alpha + beta * T + e`, `e ~ N(0, tau2)`.
///
/// The three values always travel together; never shuffle them separately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draw {
    /// Intercept.
    pub alpha: f64,
    /// Slope.
    pub beta: f64,
    /// Residual variance.
    pub tau2: f64,
}

impl Draw {
    /// Creates a draw without validation.
    pub fn new(alpha: f64, beta: f64, tau2: f64) -> Self {
        Self { alpha, beta, tau2 }
    }

    /// Checks the draw invariants: finite values and `tau2 > 0`.
    pub(crate) fn check(&self, index: usize) -> Result<(), StoreError> {
        if !self.alpha.is_finite() {
            return Err(StoreError::MalformedDraw {
                index,
                reason: "alpha must be finite",
            });
        }
        if !self.beta.is_finite() {
            return Err(StoreError::MalformedDraw {
                index,
                reason: "beta must be finite",
            });
        }
        if !self.tau2.is_finite() || self.tau2 <= 0.0 {
            return Err(StoreError::MalformedDraw {
                index,
                reason: "tau2 must be finite and positive",
            });
        }
        Ok(())
    }

    /// Returns `true` if the slope can be inverted (`|beta| > epsilon`).
    pub fn is_invertible(&self, epsilon: f64) -> bool {
        self.beta.abs() > epsilon
    }
}

/// A calibration grid cell and its ordered posterior draws.
///
/// A cell may be empty when no modern observations fell inside it.
#[derive(Debug, Clone)]
pub struct GridCell {
    key: CellKey,
    center: LatLon,
    draws: Vec<Draw>,
}

impl GridCell {
    /// Creates a cell from joint draws, validating every draw.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedDraw`] for the first draw that is
    /// non-finite or has `tau2 <= 0`.
    pub fn new(key: CellKey, center: LatLon, draws: Vec<Draw>) -> Result<Self, StoreError> {
        for (i, d) in draws.iter().enumerate() {
            d.check(i)?;
        }
        Ok(Self { key, center, draws })
    }

    /// Creates a cell from three parallel arrays sharing the draw index.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DrawLengthMismatch`] if the arrays differ in
    /// length, or [`StoreError::MalformedDraw`] for an invalid draw.
    pub fn from_arrays(
        key: CellKey,
        center: LatLon,
        alpha: &[f64],
        beta: &[f64],
        tau2: &[f64],
    ) -> Result<Self, StoreError> {
        let n = alpha.len();
        if beta.len() != n {
            return Err(StoreError::DrawLengthMismatch {
                field: "beta",
                expected: n,
                got: beta.len(),
            });
        }
        if tau2.len() != n {
            return Err(StoreError::DrawLengthMismatch {
                field: "tau2",
                expected: n,
                got: tau2.len(),
            });
        }
        let draws = alpha
            .iter()
            .zip(beta)
            .zip(tau2)
            .map(|((&a, &b), &t)| Draw::new(a, b, t))
            .collect();
        Self::new(key, center, draws)
    }

    /// Grid position of this cell.
    pub fn key(&self) -> CellKey {
        self.key
    }

    /// Center of this cell.
    pub fn center(&self) -> LatLon {
        self.center
    }

    /// The posterior draws, in draw-index order.
    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    /// Number of draws.
    pub fn n_draws(&self) -> usize {
        self.draws.len()
    }

    /// Returns `true` if the cell holds no draws.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}
