//! Fixed-resolution calibration grid.

use crate::error::StoreError;
use crate::location::LatLon;

/// Default cell size in degrees (10° half-spacing around each center).
pub const DEFAULT_CELL_SIZE: f64 = 20.0;

/// Position of a cell in the calibration grid.
///
/// Ordering is row-major, which matches [`GridSpec::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    /// Latitude band, counted from the south pole.
    pub row: usize,
    /// Longitude band, counted eastward from -180°.
    pub col: usize,
}

impl CellKey {
    /// Creates a new key.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A regular lat/lon grid with square cells of `cell_size` degrees.
///
/// Cell centers sit at `-90 + size/2 + row * size` and
/// `-180 + size/2 + col * size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    cell_size: f64,
    n_rows: usize,
    n_cols: usize,
}

impl GridSpec {
    /// Creates a grid with the given cell size in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidGrid`] unless `cell_size` is finite,
    /// positive and divides 180 evenly.
    pub fn new(cell_size: f64) -> Result<Self, StoreError> {
        if !cell_size.is_finite() || cell_size <= 0.0 || cell_size > 180.0 {
            return Err(StoreError::InvalidGrid { cell_size });
        }
        let rows = (180.0 / cell_size).round();
        if (rows * cell_size - 180.0).abs() > 1e-9 {
            return Err(StoreError::InvalidGrid { cell_size });
        }
        let n_rows = rows as usize;
        Ok(Self {
            cell_size,
            n_rows,
            n_cols: 2 * n_rows,
        })
    }

    /// Cell size in degrees.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of latitude bands.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of longitude bands.
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Key of the cell containing `location`.
    ///
    /// Points on the north pole or the upper edge fall into the last band.
    pub fn key_for(&self, location: &LatLon) -> CellKey {
        let row = ((location.lat() + 90.0) / self.cell_size).floor() as usize;
        let col = ((location.lon() + 180.0) / self.cell_size).floor() as usize;
        CellKey {
            row: row.min(self.n_rows - 1),
            col: col.min(self.n_cols - 1),
        }
    }

    /// Center of the cell at `key`.
    pub fn center(&self, key: CellKey) -> LatLon {
        let half = self.cell_size / 2.0;
        LatLon::new_unchecked(
            -90.0 + half + key.row as f64 * self.cell_size,
            -180.0 + half + key.col as f64 * self.cell_size,
        )
    }

    /// Row-major linear index of `key`, used for deterministic tie-breaks.
    pub fn index(&self, key: CellKey) -> usize {
        key.row * self.n_cols + key.col
    }

    /// Returns `true` if `key` lies inside this grid.
    pub fn contains(&self, key: CellKey) -> bool {
        key.row < self.n_rows && key.col < self.n_cols
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            n_rows: 9,
            n_cols: 18,
        }
    }
}
