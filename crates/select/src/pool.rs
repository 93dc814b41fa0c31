//! Parameter pools: the draws a prediction actually uses.

use bayspar_store::{CellKey, Draw, GridCell, LatLon};
use rand::Rng;
use tracing::debug;

use crate::error::SelectError;
use crate::sample::subsample_in_place;

/// An ordered set of joint `(alpha, beta, tau2)` draws plus the grid cells
/// they were pooled from.
///
/// Standard mode holds one cell's draws in stored order. Analog mode holds
/// the concatenation of every matched cell, optionally subsampled.
#[derive(Debug, Clone, Default)]
pub struct ParameterPool {
    draws: Vec<Draw>,
    sources: Vec<CellKey>,
    centers: Vec<LatLon>,
}

impl ParameterPool {
    /// Creates a pool holding a copy of one cell's draws.
    pub fn from_cell(cell: &GridCell) -> Self {
        Self {
            draws: cell.draws().to_vec(),
            sources: vec![cell.key()],
            centers: vec![cell.center()],
        }
    }

    /// Creates a pool by concatenating cells in the order given.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a GridCell>) -> Self {
        let mut pool = Self::default();
        for cell in cells {
            pool.push_cell(cell);
        }
        pool
    }

    pub(crate) fn push_cell(&mut self, cell: &GridCell) {
        self.draws.extend_from_slice(cell.draws());
        self.sources.push(cell.key());
        self.centers.push(cell.center());
    }

    /// The pooled draws.
    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    /// Number of draws in the pool.
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// Returns `true` if the pool holds no draws.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Keys of the cells that contributed draws, in pooling order.
    pub fn sources(&self) -> &[CellKey] {
        &self.sources
    }

    /// Centers of the contributing cells, parallel to [`sources`](Self::sources).
    pub fn gridpoints(&self) -> &[LatLon] {
        &self.centers
    }

    /// Drops draws whose slope satisfies `|beta| <= epsilon`.
    ///
    /// Returns the number of draws removed. Order of the survivors is kept.
    pub fn retain_invertible(&mut self, epsilon: f64) -> usize {
        let before = self.draws.len();
        self.draws.retain(|d| d.is_invertible(epsilon));
        let dropped = before - self.draws.len();
        if dropped > 0 {
            debug!(dropped, kept = self.draws.len(), "dropped degenerate slopes");
        }
        dropped
    }

    /// Reduces the pool to exactly `size` draws chosen uniformly without
    /// replacement. Joint draws are never split.
    ///
    /// A pool already of length `size` is returned unchanged and consumes no
    /// randomness.
    ///
    /// # Errors
    ///
    /// - [`SelectError::InvalidPoolSize`] if `size == 0`.
    /// - [`SelectError::InsufficientDraws`] if the pool is smaller than `size`.
    pub fn subsample<R: Rng>(mut self, size: usize, rng: &mut R) -> Result<Self, SelectError> {
        if size == 0 {
            return Err(SelectError::InvalidPoolSize { size });
        }
        if self.draws.len() < size {
            return Err(SelectError::InsufficientDraws {
                available: self.draws.len(),
                requested: size,
            });
        }
        if self.draws.len() > size {
            subsample_in_place(&mut self.draws, size, rng);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bayspar_store::{CalibrationStore, GridSpec, TempType};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn store() -> CalibrationStore {
        let a: Vec<Draw> = (0..4).map(|i| Draw::new(0.3, 0.01 + i as f64 * 1e-3, 1e-3)).collect();
        let b: Vec<Draw> = (0..3).map(|i| Draw::new(0.2, 0.02 + i as f64 * 1e-3, 2e-3)).collect();
        CalibrationStore::builder(TempType::Sst, GridSpec::default())
            .add_cell(40.0, 30.0, a)
            .add_cell(-60.0, -70.0, b)
            .build()
            .unwrap()
    }

    #[test]
    fn from_cells_concatenates_in_order() {
        let store = store();
        let pool = ParameterPool::from_cells(store.cells());
        assert_eq!(pool.len(), 7);
        assert_eq!(pool.sources().len(), 2);
        // BTreeMap order: row 1 (lat -60) before row 6 (lat 40).
        assert_eq!(pool.sources()[0], CellKey::new(1, 5));
        assert_eq!(pool.draws()[0].alpha, 0.2);
        assert_eq!(pool.draws()[3].alpha, 0.3);
        assert_eq!(pool.gridpoints()[1].lat(), 40.0);
    }

    #[test]
    fn from_cell_keeps_stored_order() {
        let store = store();
        let cell = store.cells().last().unwrap();
        let pool = ParameterPool::from_cell(cell);
        assert_eq!(pool.draws(), cell.draws());
    }

    #[test]
    fn retain_invertible_drops_flat_slopes() {
        let store = CalibrationStore::builder(TempType::Sst, GridSpec::default())
            .add_cell(
                0.0,
                0.0,
                vec![
                    Draw::new(0.3, 0.0, 1e-3),
                    Draw::new(0.3, 0.01, 1e-3),
                    Draw::new(0.3, 1e-13, 1e-3),
                    Draw::new(0.3, -0.02, 1e-3),
                ],
            )
            .build()
            .unwrap();
        let mut pool = ParameterPool::from_cells(store.cells());
        assert_eq!(pool.retain_invertible(1e-12), 2);
        assert_eq!(pool.draws()[0].beta, 0.01);
        assert_eq!(pool.draws()[1].beta, -0.02);
    }

    #[test]
    fn subsample_exact_size_and_joint() {
        let store = store();
        let pool = ParameterPool::from_cells(store.cells());
        let originals = pool.draws().to_vec();
        let mut rng = StdRng::seed_from_u64(3);
        let pool = pool.subsample(5, &mut rng).unwrap();
        assert_eq!(pool.len(), 5);
        for d in pool.draws() {
            assert!(originals.contains(d), "{d:?} is not an original joint draw");
        }
    }

    #[test]
    fn subsample_equal_size_is_identity() {
        let store = store();
        let pool = ParameterPool::from_cells(store.cells());
        let originals = pool.draws().to_vec();
        let mut rng = StdRng::seed_from_u64(3);
        let pool = pool.subsample(7, &mut rng).unwrap();
        assert_eq!(pool.draws(), &originals[..]);
    }

    #[test]
    fn subsample_too_large_is_insufficient() {
        let store = store();
        let pool = ParameterPool::from_cells(store.cells());
        let mut rng = StdRng::seed_from_u64(3);
        let err = pool.subsample(8, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SelectError::InsufficientDraws {
                available: 7,
                requested: 8
            }
        ));
    }

    #[test]
    fn subsample_zero_is_invalid() {
        let store = store();
        let pool = ParameterPool::from_cells(store.cells());
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            pool.subsample(0, &mut rng),
            Err(SelectError::InvalidPoolSize { size: 0 })
        ));
    }
}
