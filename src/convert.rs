//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use bayspar_predict::{Interpolation, PredictConfig};
use bayspar_select::AnalogConfig;
use bayspar_store::TempType;

use crate::config::{AnalogToml, PredictToml};

/// Parses a temperature-type token (`sst` or `subt`).
pub fn parse_temptype(s: &str) -> Result<TempType> {
    Ok(s.parse::<TempType>()?)
}

/// Parses a percentile interpolation name.
pub fn parse_interpolation(s: &str) -> Result<Interpolation> {
    match s.to_lowercase().as_str() {
        "nearest" => Ok(Interpolation::Nearest),
        "linear" => Ok(Interpolation::Linear),
        other => bail!("unknown interpolation: {other:?}"),
    }
}

/// Builds a `PredictConfig` from the `[predict]` section.
///
/// `ensemble_size` from the command line takes precedence over the file.
pub fn build_predict_config(
    toml: &PredictToml,
    ensemble_size: Option<usize>,
) -> Result<PredictConfig> {
    let config = PredictConfig::new()
        .with_ensemble_size(ensemble_size.or(toml.ensemble_size))
        .with_clamp_proxy(toml.clamp_proxy)
        .with_slope_epsilon(toml.slope_epsilon)
        .with_prior_search_radius_km(toml.prior_search_radius_km)
        .with_prior_min_obs(toml.prior_min_obs);
    config.validate()?;
    Ok(config)
}

/// Builds an `AnalogConfig` from the `[analog]` section.
///
/// Command-line overrides take precedence. A tolerance is required from one
/// of the two sources.
pub fn build_analog_config(
    toml: &AnalogToml,
    tolerance: Option<f64>,
    pool_size: Option<usize>,
) -> Result<AnalogConfig> {
    let Some(tolerance) = tolerance.or(toml.tolerance) else {
        bail!("analog search needs a tolerance (--tolerance or [analog] tolerance)");
    };
    let config = AnalogConfig::new(tolerance, pool_size.unwrap_or(toml.pool_size));
    config.validate()?;
    Ok(config)
}
