//! Analog-mode selection: pool the draws of every grid cell whose modern
//! observations resemble the input series.

use std::collections::BTreeSet;

use bayspar_store::{CalibrationStore, CellKey};
use rand::Rng;
use tracing::debug;

use crate::config::{AnalogConfig, AnalogField};
use crate::error::SelectError;
use crate::pool::ParameterPool;
use crate::progress::{Progress, Silent};

/// Builds analog parameter pools from a calibration store.
#[derive(Debug, Clone, Copy)]
pub struct AnalogSelector<'a> {
    store: &'a CalibrationStore,
}

impl<'a> AnalogSelector<'a> {
    /// Creates a selector over `store`.
    pub fn new(store: &'a CalibrationStore) -> Self {
        Self { store }
    }

    /// Selects an analog pool of exactly `config.max_pool_size()` draws.
    ///
    /// See [`select_with_progress`](Self::select_with_progress).
    pub fn select<R: Rng>(
        &self,
        targets: &[f64],
        config: &AnalogConfig,
        rng: &mut R,
    ) -> Result<ParameterPool, SelectError> {
        self.select_with_progress(targets, config, rng, &mut Silent)
    }

    /// Selects an analog pool, reporting progress once per pooled cell and
    /// once after the pool is sized.
    ///
    /// # Algorithm
    ///
    /// 1. The representative target is the mean of `targets`.
    /// 2. Every modern observation whose configured field lies within
    ///    `tolerance` of the target (inclusive) is a match.
    /// 3. The matched cells are deduplicated, taken in ascending grid order,
    ///    and their draws concatenated.
    /// 4. With `invertible_only`, degenerate slopes are dropped.
    /// 5. A pool larger than requested is subsampled without replacement;
    ///    a smaller one is an error.
    ///
    /// # Errors
    ///
    /// - [`SelectError::EmptyInput`] / [`SelectError::NonFiniteInput`] for bad targets.
    /// - Any error from [`AnalogConfig::validate`].
    /// - [`SelectError::NoAnalogsFound`] when nothing lies within tolerance.
    /// - [`SelectError::InsufficientDraws`] when the pool is too small.
    #[tracing::instrument(skip_all, fields(n_targets = targets.len(), tolerance = config.tolerance()))]
    pub fn select_with_progress<R: Rng>(
        &self,
        targets: &[f64],
        config: &AnalogConfig,
        rng: &mut R,
        progress: &mut dyn Progress,
    ) -> Result<ParameterPool, SelectError> {
        if targets.is_empty() {
            return Err(SelectError::EmptyInput);
        }
        if targets.iter().any(|v| !v.is_finite()) {
            return Err(SelectError::NonFiniteInput { field: "targets" });
        }
        config.validate()?;

        let target = bayspar_stats::mean(targets);
        let tolerance = config.tolerance();

        let matched: BTreeSet<CellKey> = self
            .store
            .observations()
            .iter()
            .filter(|obs| {
                let value = match config.field() {
                    AnalogField::Tex => obs.tex(),
                    AnalogField::SeaTemp => obs.seatemp(),
                };
                (value - target).abs() <= tolerance
            })
            .map(|obs| obs.cell())
            .collect();

        if matched.is_empty() {
            return Err(SelectError::NoAnalogsFound { target, tolerance });
        }

        let total = matched.len() + 1;
        let mut pool = ParameterPool::default();
        for (i, key) in matched.iter().enumerate() {
            if let Some(cell) = self.store.cell_at(*key) {
                pool.push_cell(cell);
            }
            progress.update(i + 1, total);
        }
        debug!(
            target,
            n_cells = matched.len(),
            n_pooled = pool.len(),
            "pooled analog cells"
        );

        if config.invertible_only() {
            pool.retain_invertible(config.slope_epsilon());
        }

        let requested = config.max_pool_size();
        let available = pool.len();
        let pool = pool.subsample(requested, rng)?;
        if available > requested {
            debug!(available, requested, "subsampled analog pool");
        }
        progress.update(total, total);
        Ok(pool)
    }
}
