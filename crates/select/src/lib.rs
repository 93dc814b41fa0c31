//! Parameter selection for BAYSPAR predictions.
//!
//! Two ways to choose the regression draws a prediction uses:
//!
//! - **Standard mode** ([`GridLocator`]): the draws of the grid cell
//!   containing the site, falling back to the nearest populated cell.
//! - **Analog mode** ([`AnalogSelector`]): the pooled draws of every cell
//!   whose modern observations lie within a tolerance of the input series
//!   mean, sized to exactly the requested ensemble size.
//!
//! # Quick start
//!
//! ```
//! use bayspar_select::{AnalogConfig, AnalogSelector, GridLocator};
//! use bayspar_store::{CalibrationStore, Draw, GridSpec, TempType};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let store = CalibrationStore::builder(TempType::Sst, GridSpec::default())
//!     .add_cell(40.0, 30.0, vec![Draw::new(0.3, 0.015, 1.6e-3); 50])
//!     .add_observation(31.65, 34.07, 0.64, 22.5)
//!     .build()
//!     .unwrap();
//!
//! let cell = GridLocator::new(&store).locate(31.65, 34.07).unwrap();
//! assert_eq!(cell.n_draws(), 50);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let config = AnalogConfig::new(0.05, 20);
//! let pool = AnalogSelector::new(&store).select(&[0.62, 0.66], &config, &mut rng).unwrap();
//! assert_eq!(pool.len(), 20);
//! ```

pub mod analog;
pub mod config;
pub mod error;
pub mod locator;
pub mod pool;
pub mod progress;

pub(crate) mod sample;

pub use analog::AnalogSelector;
pub use config::{AnalogConfig, AnalogField, DEFAULT_SLOPE_EPSILON};
pub use error::SelectError;
pub use locator::GridLocator;
pub use pool::ParameterPool;
pub use progress::{Progress, Silent};
