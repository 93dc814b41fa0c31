//! Error-path tests for the prediction entry points.

use bayspar_predict::{
    Calibration, Ensemble, PredictConfig, PredictError, Prediction, PredictiveEngine,
    predict_seatemp, predict_seatemp_analog, predict_tex,
};
use bayspar_select::{AnalogConfig, SelectError};
use bayspar_store::{CalibrationStore, Draw, GridSpec, TempType};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn calibration(with_observations: bool) -> Calibration {
    let mut builder = CalibrationStore::builder(TempType::Sst, GridSpec::default())
        .add_cell(40.0, 30.0, vec![Draw::new(0.3, 0.015, 1.6e-3); 50]);
    if with_observations {
        builder = builder.add_observation(40.0, 30.0, 0.48, 12.0);
    }
    Calibration::new().with_store(builder.build().unwrap())
}

fn seatemp(
    cal: &Calibration,
    proxy: &[f64],
    lat: f64,
    lon: f64,
    prior_mean: Option<f64>,
    prior_std: f64,
    temptype: TempType,
) -> Result<Prediction, PredictError> {
    let mut rng = StdRng::seed_from_u64(0);
    predict_seatemp(
        cal,
        proxy,
        lat,
        lon,
        prior_mean,
        prior_std,
        temptype,
        &PredictConfig::default(),
        &mut rng,
    )
}

#[test]
fn empty_proxy() {
    let cal = calibration(true);
    let err = seatemp(&cal, &[], 31.65, 34.07, Some(25.0), 6.0, TempType::Sst).unwrap_err();
    assert!(matches!(err, PredictError::EmptyInput { field: "proxy" }));
}

#[test]
fn non_finite_proxy() {
    let cal = calibration(true);
    let err = seatemp(
        &cal,
        &[0.5, f64::NAN],
        31.65,
        34.07,
        Some(25.0),
        6.0,
        TempType::Sst,
    )
    .unwrap_err();
    assert!(matches!(err, PredictError::NonFiniteInput { field: "proxy" }));
}

#[test]
fn non_finite_temperatures() {
    let cal = calibration(true);
    let mut rng = StdRng::seed_from_u64(0);
    let err = predict_tex(
        &cal,
        &[f64::INFINITY],
        31.65,
        34.07,
        TempType::Sst,
        &PredictConfig::default(),
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(err, PredictError::NonFiniteInput { field: "seatemp" }));
}

#[test]
fn invalid_prior() {
    let cal = calibration(true);
    for std in [0.0, -2.0, f64::NAN] {
        let err = seatemp(&cal, &[0.5], 31.65, 34.07, Some(25.0), std, TempType::Sst).unwrap_err();
        assert!(matches!(err, PredictError::InvalidPrior { .. }), "std {std}");
    }
    let err = seatemp(
        &cal,
        &[0.5],
        31.65,
        34.07,
        Some(f64::INFINITY),
        6.0,
        TempType::Sst,
    )
    .unwrap_err();
    assert!(matches!(err, PredictError::InvalidPrior { .. }));
}

#[test]
fn invalid_location() {
    let cal = calibration(true);
    let err = seatemp(&cal, &[0.5], 95.0, 34.07, Some(25.0), 6.0, TempType::Sst).unwrap_err();
    assert!(matches!(
        err,
        PredictError::Select(SelectError::InvalidLocation { .. })
    ));
}

#[test]
fn missing_calibration() {
    let cal = calibration(true);
    let err = seatemp(&cal, &[0.5], 31.65, 34.07, Some(25.0), 6.0, TempType::Subt).unwrap_err();
    assert!(matches!(
        err,
        PredictError::MissingCalibration {
            temptype: TempType::Subt
        }
    ));
}

#[test]
fn no_observations_for_prior() {
    let cal = calibration(false);
    let err = seatemp(&cal, &[0.5], 31.65, 34.07, None, 6.0, TempType::Sst).unwrap_err();
    assert!(matches!(err, PredictError::NoPriorObservations { .. }));
}

#[test]
fn validation_precedes_selection() {
    // Bad prior and missing calibration: the prior is reported.
    let cal = calibration(true);
    let err = seatemp(&cal, &[0.5], 31.65, 34.07, Some(25.0), 0.0, TempType::Subt).unwrap_err();
    assert!(matches!(err, PredictError::InvalidPrior { .. }));
}

#[test]
fn invalid_config() {
    let cal = calibration(true);
    let mut rng = StdRng::seed_from_u64(0);
    let config = PredictConfig::new().with_ensemble_size(Some(0));
    let err = predict_tex(&cal, &[20.0], 31.65, 34.07, TempType::Sst, &config, &mut rng).unwrap_err();
    assert!(matches!(err, PredictError::InvalidConfig { .. }));
}

#[test]
fn invalid_analog_pool_size() {
    let cal = calibration(true);
    let mut rng = StdRng::seed_from_u64(0);
    let err = predict_seatemp_analog(
        &cal,
        &[0.48],
        TempType::Sst,
        12.0,
        5.0,
        &AnalogConfig::new(0.1, 0),
        &PredictConfig::default(),
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PredictError::Select(SelectError::InvalidPoolSize { size: 0 })
    ));
}

#[test]
fn invalid_quantile() {
    let cal = calibration(true);
    let pred = seatemp(&cal, &[0.5], 31.65, 34.07, Some(25.0), 6.0, TempType::Sst).unwrap();
    assert!(matches!(
        pred.percentile(&[50.0, 120.0]),
        Err(PredictError::InvalidQuantile { q }) if q == 120.0
    ));
    assert!(matches!(
        pred.summary(&[-5.0], false),
        Err(PredictError::InvalidQuantile { .. })
    ));
}

#[test]
fn shared_types_are_send_and_sync() {
    fn assert_impl<T: Send + Sync>() {}
    assert_impl::<Calibration>();
    assert_impl::<CalibrationStore>();
    assert_impl::<PredictiveEngine>();
    assert_impl::<Prediction>();
    assert_impl::<Ensemble>();
}
