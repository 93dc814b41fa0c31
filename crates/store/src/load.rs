//! JSON calibration dataset reader.
//!
//! The dataset is one JSON document per temperature type:
//!
//! ```json
//! {
//!   "temptype": "sst",
//!   "cell_size": 20.0,
//!   "tau2": [0.0016, 0.0017],
//!   "cells": [
//!     { "lat": -80.0, "lon": -10.0, "alpha": [0.31, 0.30], "beta": [0.012, 0.013] }
//!   ],
//!   "observations": [
//!     { "lat": -79.5, "lon": -18.7, "tex": 0.32, "seatemp": -1.2 }
//!   ]
//! }
//! ```
//!
//! A cell without its own `tau2` array shares the top-level chain, indexed by
//! draw number.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::StoreError;
use crate::grid::{DEFAULT_CELL_SIZE, GridSpec};
use crate::store::CalibrationStore;
use crate::temptype::TempType;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetFile {
    temptype: TempType,
    #[serde(default = "default_cell_size")]
    cell_size: f64,
    #[serde(default)]
    tau2: Option<Vec<f64>>,
    cells: Vec<CellRecord>,
    #[serde(default)]
    observations: Vec<ObservationRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CellRecord {
    lat: f64,
    lon: f64,
    alpha: Vec<f64>,
    beta: Vec<f64>,
    #[serde(default)]
    tau2: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ObservationRecord {
    lat: f64,
    lon: f64,
    tex: f64,
    seatemp: f64,
}

fn default_cell_size() -> f64 {
    DEFAULT_CELL_SIZE
}

/// Reads and validates a calibration dataset from a JSON file.
///
/// Every failure (missing file, malformed JSON, invariant violations) is
/// reported as [`StoreError::DatasetLoad`]; there is no partial store.
pub fn read_json(path: &Path) -> Result<CalibrationStore, StoreError> {
    let load_err = |reason: String| StoreError::DatasetLoad {
        path: path.to_path_buf(),
        reason,
    };

    let text = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
    let store = from_json_str(&text).map_err(|e| match e {
        StoreError::DatasetLoad { reason, .. } => load_err(reason),
        other => load_err(other.to_string()),
    })?;

    info!(
        path = %path.display(),
        temptype = %store.temptype(),
        n_cells = store.n_cells(),
        n_observations = store.observations().len(),
        "calibration dataset loaded"
    );
    Ok(store)
}

/// Parses and validates a calibration dataset held in memory.
///
/// Errors that are not about JSON syntax keep their specific variant.
pub fn from_json_str(text: &str) -> Result<CalibrationStore, StoreError> {
    let file: DatasetFile = serde_json::from_str(text).map_err(|e| StoreError::DatasetLoad {
        path: Default::default(),
        reason: e.to_string(),
    })?;

    let grid = GridSpec::new(file.cell_size)?;
    let mut builder = CalibrationStore::builder(file.temptype, grid);

    for (i, cell) in file.cells.into_iter().enumerate() {
        let tau2 = match (cell.tau2, &file.tau2) {
            (Some(own), _) => own,
            (None, Some(shared)) => {
                if shared.len() < cell.alpha.len() {
                    return Err(StoreError::DatasetLoad {
                        path: Default::default(),
                        reason: format!(
                            "cell {i}: shared tau2 chain has {} draws, cell needs {}",
                            shared.len(),
                            cell.alpha.len()
                        ),
                    });
                }
                shared[..cell.alpha.len()].to_vec()
            }
            (None, None) => {
                return Err(StoreError::DatasetLoad {
                    path: Default::default(),
                    reason: format!("cell {i}: no tau2 draws and no shared tau2 chain"),
                });
            }
        };
        builder = builder.add_cell_arrays(cell.lat, cell.lon, cell.alpha, cell.beta, tau2);
    }

    for obs in file.observations {
        builder = builder.add_observation(obs.lat, obs.lon, obs.tex, obs.seatemp);
    }

    builder.build()
}
