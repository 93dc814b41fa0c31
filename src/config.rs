use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file read when `--config` is not given and the file exists.
pub const DEFAULT_CONFIG_PATH: &str = "bayspar.toml";

/// Top-level BAYSPAR configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaysparConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Calibration dataset paths.
    #[serde(default)]
    pub data: DataToml,

    /// Prediction settings shared by every subcommand.
    #[serde(default)]
    pub predict: PredictToml,

    /// Analog-mode settings.
    #[serde(default)]
    pub analog: AnalogToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DataToml {
    pub sst: Option<PathBuf>,
    pub subt: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictToml {
    #[serde(default = "default_temptype")]
    pub temptype: String,
    #[serde(default)]
    pub ensemble_size: Option<usize>,
    #[serde(default = "default_true")]
    pub clamp_proxy: bool,
    #[serde(default = "default_slope_epsilon")]
    pub slope_epsilon: f64,
    #[serde(default = "default_prior_search_radius_km")]
    pub prior_search_radius_km: f64,
    #[serde(default = "default_prior_min_obs")]
    pub prior_min_obs: usize,
}

fn default_temptype() -> String {
    "sst".to_string()
}
fn default_true() -> bool {
    true
}
fn default_slope_epsilon() -> f64 {
    bayspar_select::DEFAULT_SLOPE_EPSILON
}
fn default_prior_search_radius_km() -> f64 {
    bayspar_predict::DEFAULT_PRIOR_SEARCH_RADIUS_KM
}
fn default_prior_min_obs() -> usize {
    1
}

impl Default for PredictToml {
    fn default() -> Self {
        Self {
            temptype: default_temptype(),
            ensemble_size: None,
            clamp_proxy: default_true(),
            slope_epsilon: default_slope_epsilon(),
            prior_search_radius_km: default_prior_search_radius_km(),
            prior_min_obs: default_prior_min_obs(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalogToml {
    #[serde(default)]
    pub tolerance: Option<f64>,
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

fn default_pool_size() -> usize {
    5000
}

impl Default for AnalogToml {
    fn default() -> Self {
        Self {
            tolerance: None,
            pool_size: default_pool_size(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    pub path: Option<PathBuf>,
    #[serde(default = "default_percentiles")]
    pub percentiles: Vec<f64>,
    #[serde(default = "default_interpolation")]
    pub interpolation: String,
    #[serde(default)]
    pub include_ensemble: bool,
}

fn default_percentiles() -> Vec<f64> {
    bayspar_predict::DEFAULT_PERCENTILES.to_vec()
}
fn default_interpolation() -> String {
    "nearest".to_string()
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            path: None,
            percentiles: default_percentiles(),
            interpolation: default_interpolation(),
            include_ensemble: false,
        }
    }
}

/// Loads the configuration.
///
/// An explicit path must exist. Without one, `bayspar.toml` in the working
/// directory is used if present, and built-in defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<BaysparConfig> {
    let path = match path {
        Some(p) => p,
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                return Ok(BaysparConfig::default());
            }
            default
        }
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&text).context("failed to parse TOML config")
}
