//! Integration tests for reading calibration datasets from disk.

use std::io::Write;
use std::path::Path;

use bayspar_store::{CellKey, LatLon, StoreError, TempType, read_json};

const DATASET: &str = r#"{
    "temptype": "sst",
    "cell_size": 20.0,
    "tau2": [0.0016, 0.0017, 0.0018],
    "cells": [
        { "lat": -80.0, "lon": -10.0, "alpha": [0.31, 0.30, 0.32], "beta": [0.012, 0.013, 0.011] },
        { "lat": -60.0, "lon": -70.0, "alpha": [0.28, 0.29, 0.27], "beta": [0.014, 0.015, 0.016] },
        { "lat": 20.0, "lon": 150.0, "alpha": [], "beta": [] }
    ],
    "observations": [
        { "lat": -79.5, "lon": -18.7, "tex": 0.32, "seatemp": -1.2 },
        { "lat": -64.85, "lon": -64.2, "tex": 0.29, "seatemp": 0.4 }
    ]
}"#;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

#[test]
fn reads_cells_and_observations() {
    let file = write_temp(DATASET);
    let store = read_json(file.path()).unwrap();

    assert_eq!(store.temptype(), TempType::Sst);
    assert_eq!(store.n_cells(), 3);
    assert_eq!(store.n_populated(), 2);
    assert_eq!(store.max_draws(), 3);
    assert_eq!(store.observations().len(), 2);

    let obs = &store.observations()[1];
    assert_eq!(obs.cell(), CellKey::new(1, 5));
    let cell = store.cell_at(obs.cell()).unwrap();
    assert_eq!(cell.draws()[2].alpha, 0.27);
    assert_eq!(cell.draws()[2].beta, 0.016);
    assert_eq!(cell.draws()[2].tau2, 0.0018);
}

#[test]
fn empty_cells_sort_with_the_rest() {
    let file = write_temp(DATASET);
    let store = read_json(file.path()).unwrap();
    let site = LatLon::new(21.0, 151.0).unwrap();
    let nearest = store.cells_near(&site).next().unwrap();
    assert!(nearest.is_empty());
}

#[test]
fn missing_file_is_dataset_load_error() {
    let err = read_json(Path::new("/nonexistent/bayspar/sst.json")).unwrap_err();
    match err {
        StoreError::DatasetLoad { path, .. } => {
            assert_eq!(path, Path::new("/nonexistent/bayspar/sst.json"));
        }
        other => panic!("expected DatasetLoad, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_dataset_load_error() {
    let file = write_temp("{ \"temptype\": \"sst\", \"cells\": [ ");
    let err = read_json(file.path()).unwrap_err();
    assert!(matches!(err, StoreError::DatasetLoad { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn invariant_violation_is_dataset_load_error() {
    let file = write_temp(
        r#"{ "temptype": "sst",
             "cells": [ { "lat": 0.0, "lon": 0.0, "alpha": [0.3], "beta": [0.01], "tau2": [0.0] } ] }"#,
    );
    let err = read_json(file.path()).unwrap_err();
    match err {
        StoreError::DatasetLoad { reason, .. } => {
            assert!(reason.contains("tau2 must be finite and positive"), "{reason}");
        }
        other => panic!("expected DatasetLoad, got {other:?}"),
    }
}

#[test]
fn bad_temptype_is_dataset_load_error() {
    let file = write_temp(r#"{ "temptype": "deep", "cells": [] }"#);
    assert!(matches!(
        read_json(file.path()),
        Err(StoreError::DatasetLoad { .. })
    ));
}
