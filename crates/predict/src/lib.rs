//! BAYSPAR: Bayesian, spatially-varying calibration of TEX86.
//!
//! Converts TEX86 series into sea temperature ensembles (inverse) and sea
//! temperatures into TEX86 ensembles (forward), using pre-computed posterior
//! draws of the regression `tex = alpha + beta * T + e` held per grid cell.
//!
//! | Entry point | Direction | Draws from |
//! |-------------|-----------|------------|
//! | [`predict_seatemp`] | TEX86 → T | cell containing the site |
//! | [`predict_seatemp_analog`] | TEX86 → T | cells with similar modern TEX86 |
//! | [`predict_tex`] | T → TEX86 | cell containing the site |
//! | [`predict_tex_analog`] | T → TEX86 | cells with similar modern temperatures |
//!
//! # Quick start
//!
//! ```
//! use bayspar_predict::{Calibration, PredictConfig, predict_seatemp};
//! use bayspar_store::{CalibrationStore, Draw, GridSpec, TempType};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let store = CalibrationStore::builder(TempType::Sst, GridSpec::default())
//!     .add_cell(40.0, 30.0, vec![Draw::new(0.3, 0.015, 1.6e-3); 200])
//!     .build()
//!     .unwrap();
//! let cal = Calibration::new().with_store(store);
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let prediction = predict_seatemp(
//!     &cal,
//!     &[0.62, 0.64, 0.66],
//!     31.65,
//!     34.07,
//!     Some(25.0),
//!     6.0,
//!     TempType::Sst,
//!     &PredictConfig::default(),
//!     &mut rng,
//! )
//! .unwrap();
//!
//! assert_eq!(prediction.ensemble().shape(), (3, 200));
//! let p = prediction.percentile_default();
//! assert!(p.get(5.0).unwrap()[0] <= p.get(95.0).unwrap()[0]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! predict_*()
//!   ├─ validate config, inputs, prior
//!   ├─ Calibration::store()                 (calibration.rs)
//!   ├─ GridLocator / AnalogSelector         (bayspar-select)
//!   ├─ PredictiveEngine::predict()          (engine.rs)
//!   └─ Prediction                           (prediction.rs)
//! ```

pub mod api;
pub mod calibration;
pub mod config;
pub mod engine;
pub mod ensemble;
pub mod error;
pub mod output;
pub mod prediction;
pub mod prior;

pub use api::{
    predict_seatemp, predict_seatemp_analog, predict_seatemp_analog_with_progress, predict_tex,
    predict_tex_analog, predict_tex_analog_with_progress,
};
pub use bayspar_stats::Interpolation;
pub use calibration::Calibration;
pub use config::{DEFAULT_PRIOR_SEARCH_RADIUS_KM, PredictConfig};
pub use engine::{Direction, EngineConfig, PredictiveEngine};
pub use ensemble::Ensemble;
pub use error::PredictError;
pub use output::{PercentileSeries, PredictionSummary, to_json};
pub use prediction::{DEFAULT_PERCENTILES, Percentiles, Prediction, PredictionKind};
pub use prior::{Prior, infer_prior_mean};
