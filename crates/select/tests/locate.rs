//! Integration tests for standard-mode cell location.

use bayspar_select::{GridLocator, SelectError};
use bayspar_store::{CalibrationStore, CellKey, Draw, GridSpec, TempType};

fn draws(n: usize, alpha: f64) -> Vec<Draw> {
    (0..n)
        .map(|i| Draw::new(alpha, 0.015 + i as f64 * 1e-4, 1.6e-3))
        .collect()
}

/// Cells at (40, 30), (-60, -70) and (80, 170), plus an empty cell at (0, 10).
fn store() -> CalibrationStore {
    CalibrationStore::builder(TempType::Sst, GridSpec::default())
        .add_cell(40.0, 30.0, draws(5, 0.30))
        .add_cell(-60.0, -70.0, draws(4, 0.28))
        .add_cell(80.0, 170.0, draws(3, 0.33))
        .add_cell(0.0, 10.0, Vec::new())
        .build()
        .unwrap()
}

#[test]
fn site_inside_populated_cell() {
    let store = store();
    let cell = GridLocator::new(&store).locate(31.65, 34.07).unwrap();
    assert_eq!(cell.key(), CellKey::new(6, 10));
    assert_eq!(cell.n_draws(), 5);
}

#[test]
fn empty_cell_falls_back_to_nearest_populated() {
    let store = store();
    let cell = GridLocator::new(&store).locate(0.0, 10.0).unwrap();
    assert!(!cell.is_empty());
    // (40, 30) is far closer to (0, 10) than (-60, -70) or (80, 170).
    assert_eq!(cell.key(), CellKey::new(6, 10));
}

#[test]
fn absent_cell_falls_back_to_nearest_populated() {
    let store = store();
    let cell = GridLocator::new(&store).locate(-65.0, -60.0).unwrap();
    assert_eq!(cell.key(), CellKey::new(1, 5));
}

#[test]
fn north_pole_and_wrapped_longitudes() {
    let store = store();
    let locator = GridLocator::new(&store);
    assert_eq!(locator.locate(90.0, 175.0).unwrap().key(), CellKey::new(8, 17));
    assert_eq!(
        locator.locate(40.0, 210.0).unwrap().key(),
        locator.locate(40.0, -150.0).unwrap().key()
    );
    assert_eq!(locator.locate(35.0, 30.0).unwrap().key(), CellKey::new(6, 10));
}

#[test]
fn invalid_locations_rejected() {
    let store = store();
    let locator = GridLocator::new(&store);
    for (lat, lon) in [
        (91.0, 0.0),
        (-90.5, 0.0),
        (0.0, 361.0),
        (0.0, -181.0),
        (f64::NAN, 0.0),
        (0.0, f64::INFINITY),
    ] {
        let err = locator.locate(lat, lon).unwrap_err();
        assert!(
            matches!(err, SelectError::InvalidLocation { .. }),
            "({lat}, {lon}): got {err:?}"
        );
    }
}

#[test]
fn no_populated_cells() {
    let store = CalibrationStore::builder(TempType::Subt, GridSpec::default())
        .add_cell(0.0, 10.0, Vec::new())
        .build()
        .unwrap();
    assert!(matches!(
        GridLocator::new(&store).locate(0.0, 10.0),
        Err(SelectError::NoPopulatedCells)
    ));
}

#[test]
fn every_valid_site_resolves_deterministically() {
    let store = store();
    let locator = GridLocator::new(&store);
    let mut lat = -90.0;
    while lat <= 90.0 {
        let mut lon = -180.0;
        while lon <= 360.0 {
            let a = locator.locate(lat, lon).unwrap();
            let b = locator.locate(lat, lon).unwrap();
            assert!(!a.is_empty());
            assert_eq!(a.key(), b.key(), "({lat}, {lon})");
            lon += 15.0;
        }
        lat += 7.5;
    }
}

#[test]
fn pool_keeps_stored_order() {
    let store = store();
    let pool = GridLocator::new(&store).pool(-60.0, -70.0).unwrap();
    let cell = store.cell_at(CellKey::new(1, 5)).unwrap();
    assert_eq!(pool.draws(), cell.draws());
    assert_eq!(pool.sources(), &[CellKey::new(1, 5)]);
    assert_eq!(pool.gridpoints()[0].lat(), -60.0);
}
