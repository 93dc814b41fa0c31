use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use bayspar_predict::{Calibration, Prediction, to_json};
use bayspar_store::TempType;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, info_span};

use crate::cli::{CommonArgs, SeatempAnalogArgs, SeatempArgs, TexAnalogArgs, TexArgs};
use crate::config::{self, BaysparConfig, DataToml};
use crate::convert;
use crate::input;

/// Everything a subcommand needs before it can predict.
struct Session {
    config: BaysparConfig,
    temptype: TempType,
    calibration: Calibration,
    series: Vec<f64>,
    rng: StdRng,
}

fn open_session(common: &CommonArgs) -> Result<Session> {
    let config = config::load(common.config.as_deref())?;
    let temptype = convert::parse_temptype(
        common
            .temptype
            .as_deref()
            .unwrap_or(&config.predict.temptype),
    )?;
    let calibration = load_calibration(&config.data, temptype, common.dataset.as_deref())?;

    let series = input::read_series(&common.input)?;
    info!(path = %common.input.display(), n = series.len(), "input series read");

    let rng = match common.seed.or(config.seed) {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    Ok(Session {
        config,
        temptype,
        calibration,
        series,
        rng,
    })
}

/// Loads the dataset for `temptype`; `dataset` overrides the `[data]` path.
fn load_calibration(
    data: &DataToml,
    temptype: TempType,
    dataset: Option<&Path>,
) -> Result<Calibration> {
    let configured = match temptype {
        TempType::Sst => data.sst.as_deref(),
        TempType::Subt => data.subt.as_deref(),
    };
    let path = dataset.or(configured).ok_or_else(|| {
        anyhow!("no calibration dataset for {temptype} (--dataset or [data] {temptype})")
    })?;

    info!(path = %path.display(), %temptype, "reading calibration dataset");
    let store = bayspar_store::read_json(path)
        .with_context(|| format!("failed to load calibration: {}", path.display()))?;
    if store.temptype() != temptype {
        bail!(
            "{} holds a {} calibration, expected {temptype}",
            path.display(),
            store.temptype()
        );
    }
    info!(
        n_cells = store.n_cells(),
        n_populated = store.n_populated(),
        n_observations = store.observations().len(),
        "calibration loaded"
    );
    Ok(Calibration::new().with_store(store))
}

fn write_output(prediction: &Prediction, common: &CommonArgs, config: &BaysparConfig) -> Result<()> {
    let percentiles = common
        .percentiles
        .as_deref()
        .unwrap_or(&config.output.percentiles);
    let method = convert::parse_interpolation(&config.output.interpolation)?;
    let include_ensemble = common.include_ensemble || config.output.include_ensemble;

    let summary = prediction
        .summary_with(percentiles, method, include_ensemble)
        .context("failed to summarize prediction")?;
    let json = to_json(&summary)?;

    match common.output.as_deref().or(config.output.path.as_deref()) {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            info!(path = %path.display(), "summary written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn log_pooling(done: usize, total: usize) {
    debug!(done, total, "assembling analog pool");
}

/// Runs the `seatemp` subcommand.
pub fn seatemp(args: SeatempArgs) -> Result<()> {
    let _cmd = info_span!("seatemp").entered();
    let mut session = open_session(&args.common)?;
    let predict_cfg = convert::build_predict_config(&session.config.predict, args.ensemble_size)?;

    let prediction = bayspar_predict::predict_seatemp(
        &session.calibration,
        &session.series,
        args.lat,
        args.lon,
        args.prior_mean,
        args.prior_std,
        session.temptype,
        &predict_cfg,
        &mut session.rng,
    )
    .context("sea-temperature prediction failed")?;
    info!(
        n_inputs = prediction.n_inputs(),
        n_draws = prediction.n_draws(),
        prior_mean = prediction.prior_mean(),
        "prediction complete"
    );

    write_output(&prediction, &args.common, &session.config)
}

/// Runs the `seatemp-analog` subcommand.
pub fn seatemp_analog(args: SeatempAnalogArgs) -> Result<()> {
    let _cmd = info_span!("seatemp_analog").entered();
    let mut session = open_session(&args.common)?;
    let predict_cfg = convert::build_predict_config(&session.config.predict, None)?;
    let analog_cfg =
        convert::build_analog_config(&session.config.analog, args.tolerance, args.pool_size)?;

    let prediction = bayspar_predict::predict_seatemp_analog_with_progress(
        &session.calibration,
        &session.series,
        session.temptype,
        args.prior_mean,
        args.prior_std,
        &analog_cfg,
        &predict_cfg,
        &mut session.rng,
        &mut log_pooling,
    )
    .context("analog sea-temperature prediction failed")?;
    info!(
        n_inputs = prediction.n_inputs(),
        n_draws = prediction.n_draws(),
        n_analogs = prediction.analog_gridpoints().len(),
        "prediction complete"
    );

    write_output(&prediction, &args.common, &session.config)
}

/// Runs the `tex` subcommand.
pub fn tex(args: TexArgs) -> Result<()> {
    let _cmd = info_span!("tex").entered();
    let mut session = open_session(&args.common)?;
    let predict_cfg = convert::build_predict_config(&session.config.predict, args.ensemble_size)?;

    let prediction = bayspar_predict::predict_tex(
        &session.calibration,
        &session.series,
        args.lat,
        args.lon,
        session.temptype,
        &predict_cfg,
        &mut session.rng,
    )
    .context("TEX86 prediction failed")?;
    info!(
        n_inputs = prediction.n_inputs(),
        n_draws = prediction.n_draws(),
        "prediction complete"
    );

    write_output(&prediction, &args.common, &session.config)
}

/// Runs the `tex-analog` subcommand.
pub fn tex_analog(args: TexAnalogArgs) -> Result<()> {
    let _cmd = info_span!("tex_analog").entered();
    let mut session = open_session(&args.common)?;
    let predict_cfg = convert::build_predict_config(&session.config.predict, None)?;
    let analog_cfg =
        convert::build_analog_config(&session.config.analog, args.tolerance, args.pool_size)?;

    let prediction = bayspar_predict::predict_tex_analog_with_progress(
        &session.calibration,
        &session.series,
        session.temptype,
        &analog_cfg,
        &predict_cfg,
        &mut session.rng,
        &mut log_pooling,
    )
    .context("analog TEX86 prediction failed")?;
    info!(
        n_inputs = prediction.n_inputs(),
        n_draws = prediction.n_draws(),
        n_analogs = prediction.analog_gridpoints().len(),
        "prediction complete"
    );

    write_output(&prediction, &args.common, &session.config)
}
