//! Immutable calibration store for BAYSPAR TEX86 calibration.
//!
//! Holds the pre-computed posterior draws of the spatially-varying regression
//! `tex = alpha + beta * T + e` on a fixed lat/lon grid, together with the
//! modern core-top observations used for analog searches.
//!
//! # Quick start
//!
//! ```
//! use bayspar_store::{CalibrationStore, Draw, GridSpec, LatLon, TempType};
//!
//! let store = CalibrationStore::builder(TempType::Sst, GridSpec::default())
//!     .add_cell(40.0, 30.0, vec![Draw::new(0.3, 0.015, 1.6e-3); 100])
//!     .add_observation(31.65, 34.07, 0.64, 22.5)
//!     .build()
//!     .unwrap();
//!
//! let site = LatLon::new(31.65, 34.07).unwrap();
//! let nearest = store.cells_near(&site).next().unwrap();
//! assert_eq!(nearest.n_draws(), 100);
//! ```
//!
//! Stores are normally read from JSON with [`read_json`].

pub mod cell;
pub mod error;
pub mod grid;
pub mod load;
pub mod location;
pub mod observation;
pub mod store;
pub mod temptype;

pub use cell::{Draw, GridCell};
pub use error::StoreError;
pub use grid::{CellKey, DEFAULT_CELL_SIZE, GridSpec};
pub use load::{from_json_str, read_json};
pub use location::{EARTH_RADIUS_KM, LatLon};
pub use observation::ModernObservation;
pub use store::{CalibrationStore, CalibrationStoreBuilder};
pub use temptype::TempType;
