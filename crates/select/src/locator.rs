//! Standard-mode selection: the nearest populated grid cell to a site.

use bayspar_store::{CalibrationStore, GridCell, LatLon};
use tracing::debug;

use crate::error::SelectError;
use crate::pool::ParameterPool;

/// Finds the calibration cell for a site.
///
/// The site is binned to the grid cell containing it. When that cell is
/// absent or holds no draws, the nearest populated cell by great-circle
/// distance between centers is used instead (ties go to the lower grid index).
/// Never interpolates between cells.
#[derive(Debug, Clone, Copy)]
pub struct GridLocator<'a> {
    store: &'a CalibrationStore,
}

impl<'a> GridLocator<'a> {
    /// Creates a locator over `store`.
    pub fn new(store: &'a CalibrationStore) -> Self {
        Self { store }
    }

    /// Returns the nearest populated cell to `(lat, lon)`.
    ///
    /// Longitudes in `[-180, 360]` are accepted; `[180, 360]` is wrapped.
    ///
    /// # Errors
    ///
    /// - [`SelectError::InvalidLocation`] for non-finite or out-of-range
    ///   coordinates.
    /// - [`SelectError::NoPopulatedCells`] if every cell is empty.
    pub fn locate(&self, lat: f64, lon: f64) -> Result<&'a GridCell, SelectError> {
        let site = LatLon::new(lat, lon).map_err(|_| SelectError::InvalidLocation { lat, lon })?;
        let key = self.store.grid().key_for(&site);
        if let Some(cell) = self.store.cell_at(key)
            && !cell.is_empty()
        {
            return Ok(cell);
        }

        let fallback = self
            .store
            .cells_near(&site)
            .find(|c| !c.is_empty())
            .ok_or(SelectError::NoPopulatedCells)?;
        debug!(
            lat,
            lon,
            row = key.row,
            col = key.col,
            fallback_row = fallback.key().row,
            fallback_col = fallback.key().col,
            "containing cell is empty, using nearest populated cell"
        );
        Ok(fallback)
    }

    /// Returns the draws of the located cell as a pool, in stored order.
    pub fn pool(&self, lat: f64, lon: f64) -> Result<ParameterPool, SelectError> {
        let cell = self.locate(lat, lon)?;
        debug!(
            row = cell.key().row,
            col = cell.key().col,
            n_draws = cell.n_draws(),
            "located calibration cell"
        );
        Ok(ParameterPool::from_cell(cell))
    }
}
