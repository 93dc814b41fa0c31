//! The four prediction entry points.

use bayspar_select::{
    AnalogConfig, AnalogField, AnalogSelector, GridLocator, ParameterPool, Progress, SelectError,
    Silent,
};
use bayspar_store::{CalibrationStore, LatLon, TempType};
use rand::Rng;
use tracing::debug;

use crate::calibration::Calibration;
use crate::config::PredictConfig;
use crate::engine::{Direction, EngineConfig, PredictiveEngine, check_values};
use crate::error::PredictError;
use crate::prediction::{Prediction, PredictionKind};
use crate::prior::{self, Prior, infer_prior_mean};

fn engine(config: &PredictConfig) -> PredictiveEngine {
    PredictiveEngine::new(
        EngineConfig::new()
            .with_clamp_proxy(config.clamp_proxy())
            .with_slope_epsilon(config.slope_epsilon()),
    )
}

fn site(lat: f64, lon: f64) -> Result<LatLon, PredictError> {
    LatLon::new(lat, lon).map_err(|_| SelectError::InvalidLocation { lat, lon }.into())
}

/// Locates the site's cell and sizes its pool per `config.ensemble_size()`.
fn standard_pool<R: Rng>(
    store: &CalibrationStore,
    lat: f64,
    lon: f64,
    invertible_only: bool,
    config: &PredictConfig,
    rng: &mut R,
) -> Result<ParameterPool, PredictError> {
    let mut pool = GridLocator::new(store).pool(lat, lon)?;
    if invertible_only {
        pool.retain_invertible(config.slope_epsilon());
    }
    match config.ensemble_size() {
        Some(n) => {
            let available = pool.len();
            let pool = pool.subsample(n, rng)?;
            debug!(available, ensemble_size = n, "sized standard pool");
            Ok(pool)
        }
        None => Ok(pool),
    }
}

/// Predicts sea temperature from a TEX86 series at one site.
///
/// The draws come from the grid cell containing (`lat`, `lon`). When
/// `prior_mean` is `None` it is inferred from modern observations near the
/// site (see [`infer_prior_mean`]).
///
/// Returns an inverse [`Prediction`] of shape `(proxy.len(), n_draws)`.
///
/// # Errors
///
/// Invalid configuration, proxy values, prior or location are rejected
/// before any sampling. Also fails with [`PredictError::MissingCalibration`],
/// [`PredictError::NoPriorObservations`] or a wrapped selection error.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(skip_all, fields(n_proxy = proxy.len(), lat, lon, %temptype))]
pub fn predict_seatemp<R: Rng>(
    cal: &Calibration,
    proxy: &[f64],
    lat: f64,
    lon: f64,
    prior_mean: Option<f64>,
    prior_std: f64,
    temptype: TempType,
    config: &PredictConfig,
    rng: &mut R,
) -> Result<Prediction, PredictError> {
    config.validate()?;
    check_values(proxy, "proxy")?;
    if let Some(mean) = prior_mean {
        prior::check_mean(mean)?;
    }
    prior::check_std(prior_std)?;
    let location = site(lat, lon)?;
    let store = cal.store(temptype)?;

    let mean = match prior_mean {
        Some(mean) => mean,
        None => infer_prior_mean(
            store,
            &location,
            config.prior_search_radius_km(),
            config.prior_min_obs(),
        )?,
    };
    let prior = Prior::new(mean, prior_std)?;

    let pool = standard_pool(store, lat, lon, true, config, rng)?;
    let ensemble = engine(config).predict(proxy, &pool, &Direction::Inverse(prior), rng)?;

    Ok(Prediction::new(ensemble, temptype, PredictionKind::Inverse)
        .with_latlon(location)
        .with_prior(prior)
        .with_modelparam_gridpoints(pool.gridpoints().to_vec()))
}

/// Predicts sea temperature from a TEX86 series using analog locations.
///
/// Analogs are matched on observed TEX86 against the mean of `proxy`; the
/// pool holds exactly `analog.max_pool_size()` invertible draws.
#[allow(clippy::too_many_arguments)]
pub fn predict_seatemp_analog<R: Rng>(
    cal: &Calibration,
    proxy: &[f64],
    temptype: TempType,
    prior_mean: f64,
    prior_std: f64,
    analog: &AnalogConfig,
    config: &PredictConfig,
    rng: &mut R,
) -> Result<Prediction, PredictError> {
    predict_seatemp_analog_with_progress(
        cal,
        proxy,
        temptype,
        prior_mean,
        prior_std,
        analog,
        config,
        rng,
        &mut Silent,
    )
}

/// [`predict_seatemp_analog`] with progress reported during pool assembly.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(skip_all, fields(n_proxy = proxy.len(), %temptype, tolerance = analog.tolerance()))]
pub fn predict_seatemp_analog_with_progress<R: Rng>(
    cal: &Calibration,
    proxy: &[f64],
    temptype: TempType,
    prior_mean: f64,
    prior_std: f64,
    analog: &AnalogConfig,
    config: &PredictConfig,
    rng: &mut R,
    progress: &mut dyn Progress,
) -> Result<Prediction, PredictError> {
    config.validate()?;
    check_values(proxy, "proxy")?;
    let prior = Prior::new(prior_mean, prior_std)?;
    analog.validate()?;
    let store = cal.store(temptype)?;

    let analog = analog
        .clone()
        .with_field(AnalogField::Tex)
        .with_invertible_only(true)
        .with_slope_epsilon(config.slope_epsilon());
    let pool = AnalogSelector::new(store).select_with_progress(proxy, &analog, rng, progress)?;
    let ensemble = engine(config).predict(proxy, &pool, &Direction::Inverse(prior), rng)?;

    Ok(Prediction::new(ensemble, temptype, PredictionKind::Inverse)
        .with_prior(prior)
        .with_analog_gridpoints(pool.gridpoints().to_vec()))
}

/// Predicts TEX86 from a sea-temperature series at one site.
///
/// Returns a forward [`Prediction`] of shape `(temps.len(), n_draws)`,
/// clipped into `[0, 1]` unless `clamp_proxy` is off.
#[tracing::instrument(skip_all, fields(n_temps = temps.len(), lat, lon, %temptype))]
pub fn predict_tex<R: Rng>(
    cal: &Calibration,
    temps: &[f64],
    lat: f64,
    lon: f64,
    temptype: TempType,
    config: &PredictConfig,
    rng: &mut R,
) -> Result<Prediction, PredictError> {
    config.validate()?;
    check_values(temps, "seatemp")?;
    let location = site(lat, lon)?;
    let store = cal.store(temptype)?;

    let pool = standard_pool(store, lat, lon, false, config, rng)?;
    let ensemble = engine(config).predict(temps, &pool, &Direction::Forward, rng)?;

    Ok(Prediction::new(ensemble, temptype, PredictionKind::Forward)
        .with_latlon(location)
        .with_modelparam_gridpoints(pool.gridpoints().to_vec()))
}

/// Predicts TEX86 from a sea-temperature series using analog locations.
///
/// Analogs are matched on observed sea temperature against the mean of
/// `temps`.
pub fn predict_tex_analog<R: Rng>(
    cal: &Calibration,
    temps: &[f64],
    temptype: TempType,
    analog: &AnalogConfig,
    config: &PredictConfig,
    rng: &mut R,
) -> Result<Prediction, PredictError> {
    predict_tex_analog_with_progress(cal, temps, temptype, analog, config, rng, &mut Silent)
}

/// [`predict_tex_analog`] with progress reported during pool assembly.
#[tracing::instrument(skip_all, fields(n_temps = temps.len(), %temptype, tolerance = analog.tolerance()))]
pub fn predict_tex_analog_with_progress<R: Rng>(
    cal: &Calibration,
    temps: &[f64],
    temptype: TempType,
    analog: &AnalogConfig,
    config: &PredictConfig,
    rng: &mut R,
    progress: &mut dyn Progress,
) -> Result<Prediction, PredictError> {
    config.validate()?;
    check_values(temps, "seatemp")?;
    analog.validate()?;
    let store = cal.store(temptype)?;

    let analog = analog.clone().with_field(AnalogField::SeaTemp);
    let pool = AnalogSelector::new(store).select_with_progress(temps, &analog, rng, progress)?;
    let ensemble = engine(config).predict(temps, &pool, &Direction::Forward, rng)?;

    Ok(Prediction::new(ensemble, temptype, PredictionKind::Forward)
        .with_analog_gridpoints(pool.gridpoints().to_vec()))
}
