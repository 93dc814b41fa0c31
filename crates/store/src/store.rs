//! The read-only calibration store and its builder.

use std::collections::BTreeMap;

use tracing::debug;

use crate::cell::{Draw, GridCell};
use crate::error::StoreError;
use crate::grid::{CellKey, GridSpec};
use crate::location::LatLon;
use crate::observation::ModernObservation;
use crate::temptype::TempType;

/// Posterior draws per grid cell plus the modern observations, for one
/// temperature type.
///
/// Built once through [`CalibrationStoreBuilder`] and never mutated; share it
/// by reference (or `Arc`) across threads.
#[derive(Debug, Clone)]
pub struct CalibrationStore {
    temptype: TempType,
    grid: GridSpec,
    cells: BTreeMap<CellKey, GridCell>,
    observations: Vec<ModernObservation>,
}

impl CalibrationStore {
    /// Starts a builder for a store on `grid`.
    pub fn builder(temptype: TempType, grid: GridSpec) -> CalibrationStoreBuilder {
        CalibrationStoreBuilder::new(temptype, grid)
    }

    /// Temperature type the draws were fitted against.
    pub fn temptype(&self) -> TempType {
        self.temptype
    }

    /// The calibration grid.
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// The cell at `key`, if the store has an entry for it.
    pub fn cell_at(&self, key: CellKey) -> Option<&GridCell> {
        self.cells.get(&key)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.values()
    }

    /// All cells ordered by great-circle distance from `location`, nearest
    /// first. Equal distances are ordered by grid index.
    ///
    /// The ordering is materialised up front: every cell is ranked and sorted
    /// before the first item is yielded. Includes empty cells; callers filter
    /// as needed.
    pub fn cells_near(&self, location: &LatLon) -> impl Iterator<Item = &GridCell> + '_ {
        let mut ranked: Vec<(f64, usize, &GridCell)> = self
            .cells
            .values()
            .map(|c| {
                (
                    location.great_circle_km(&c.center()),
                    self.grid.index(c.key()),
                    c,
                )
            })
            .collect();
        ranked.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        ranked.into_iter().map(|(_, _, c)| c)
    }

    /// All modern observations, in load order.
    pub fn observations(&self) -> &[ModernObservation] {
        &self.observations
    }

    /// Number of cells with an entry (empty or not).
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells holding at least one draw.
    pub fn n_populated(&self) -> usize {
        self.cells.values().filter(|c| !c.is_empty()).count()
    }

    /// Largest draw count over all cells.
    pub fn max_draws(&self) -> usize {
        self.cells.values().map(GridCell::n_draws).max().unwrap_or(0)
    }
}

/// Draws for one pending cell, in whichever layout the caller had.
#[derive(Debug, Clone)]
enum PendingDraws {
    Joint(Vec<Draw>),
    Arrays {
        alpha: Vec<f64>,
        beta: Vec<f64>,
        tau2: Vec<f64>,
    },
}

#[derive(Debug, Clone)]
struct PendingCell {
    lat: f64,
    lon: f64,
    draws: PendingDraws,
}

#[derive(Debug, Clone)]
struct PendingObservation {
    lat: f64,
    lon: f64,
    tex: f64,
    seatemp: f64,
}

/// Collects cells and observations, then validates them all in
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use bayspar_store::{CalibrationStore, Draw, GridSpec, TempType};
///
/// let store = CalibrationStore::builder(TempType::Sst, GridSpec::default())
///     .add_cell(40.0, 30.0, vec![Draw::new(0.3, 0.015, 1.6e-3)])
///     .add_observation(31.65, 34.07, 0.64, 22.5)
///     .build()
///     .unwrap();
/// assert_eq!(store.n_cells(), 1);
/// assert_eq!(store.observations().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CalibrationStoreBuilder {
    temptype: TempType,
    grid: GridSpec,
    cells: Vec<PendingCell>,
    observations: Vec<PendingObservation>,
}

impl CalibrationStoreBuilder {
    /// Creates an empty builder.
    pub fn new(temptype: TempType, grid: GridSpec) -> Self {
        Self {
            temptype,
            grid,
            cells: Vec::new(),
            observations: Vec::new(),
        }
    }

    /// Adds the cell containing (`lat`, `lon`) with joint draws.
    pub fn add_cell(mut self, lat: f64, lon: f64, draws: Vec<Draw>) -> Self {
        self.cells.push(PendingCell {
            lat,
            lon,
            draws: PendingDraws::Joint(draws),
        });
        self
    }

    /// Adds the cell containing (`lat`, `lon`) from parallel draw arrays.
    pub fn add_cell_arrays(
        mut self,
        lat: f64,
        lon: f64,
        alpha: Vec<f64>,
        beta: Vec<f64>,
        tau2: Vec<f64>,
    ) -> Self {
        self.cells.push(PendingCell {
            lat,
            lon,
            draws: PendingDraws::Arrays { alpha, beta, tau2 },
        });
        self
    }

    /// Adds a modern observation.
    pub fn add_observation(mut self, lat: f64, lon: f64, tex: f64, seatemp: f64) -> Self {
        self.observations.push(PendingObservation {
            lat,
            lon,
            tex,
            seatemp,
        });
        self
    }

    /// Validates everything and builds the store.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidLocation`] for a bad cell or observation coordinate
    /// - [`StoreError::DuplicateCell`] when two cells share a grid position
    /// - [`StoreError::DrawLengthMismatch`] / [`StoreError::MalformedDraw`] for bad draws
    /// - [`StoreError::MalformedObservation`] for non-finite observation values
    /// - [`StoreError::UnknownCell`] when an observation's cell has no entry
    pub fn build(self) -> Result<CalibrationStore, StoreError> {
        let grid = self.grid;
        let mut cells = BTreeMap::new();

        for pending in self.cells {
            let location = LatLon::new(pending.lat, pending.lon)?;
            let key = grid.key_for(&location);
            if cells.contains_key(&key) {
                return Err(StoreError::DuplicateCell {
                    row: key.row,
                    col: key.col,
                });
            }
            let center = grid.center(key);
            let cell = match pending.draws {
                PendingDraws::Joint(draws) => GridCell::new(key, center, draws)?,
                PendingDraws::Arrays { alpha, beta, tau2 } => {
                    GridCell::from_arrays(key, center, &alpha, &beta, &tau2)?
                }
            };
            cells.insert(key, cell);
        }

        let mut observations = Vec::with_capacity(self.observations.len());
        for (index, pending) in self.observations.into_iter().enumerate() {
            let location = LatLon::new(pending.lat, pending.lon)?;
            if !pending.tex.is_finite() {
                return Err(StoreError::MalformedObservation {
                    index,
                    reason: "tex must be finite",
                });
            }
            if !pending.seatemp.is_finite() {
                return Err(StoreError::MalformedObservation {
                    index,
                    reason: "seatemp must be finite",
                });
            }
            let key = grid.key_for(&location);
            if !cells.contains_key(&key) {
                return Err(StoreError::UnknownCell {
                    index,
                    row: key.row,
                    col: key.col,
                });
            }
            observations.push(ModernObservation::new(
                location,
                key,
                pending.tex,
                pending.seatemp,
            ));
        }

        debug!(
            temptype = %self.temptype,
            n_cells = cells.len(),
            n_observations = observations.len(),
            "calibration store built"
        );

        Ok(CalibrationStore {
            temptype: self.temptype,
            grid,
            cells,
            observations,
        })
    }
}
