//! The loaded calibration: one store per temperature type.

use bayspar_store::{CalibrationStore, TempType};

use crate::error::PredictError;

/// Calibration stores keyed by temperature type.
///
/// Built once at startup and shared read-only by every prediction.
#[derive(Debug, Clone, Default)]
pub struct Calibration {
    sst: Option<CalibrationStore>,
    subt: Option<CalibrationStore>,
}

impl Calibration {
    /// Creates a calibration with no stores.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `store` under its own temperature type, replacing any previous one.
    pub fn with_store(mut self, store: CalibrationStore) -> Self {
        match store.temptype() {
            TempType::Sst => self.sst = Some(store),
            TempType::Subt => self.subt = Some(store),
        }
        self
    }

    /// Returns the store for `temptype`.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::MissingCalibration`] if none was loaded.
    pub fn store(&self, temptype: TempType) -> Result<&CalibrationStore, PredictError> {
        let store = match temptype {
            TempType::Sst => self.sst.as_ref(),
            TempType::Subt => self.subt.as_ref(),
        };
        store.ok_or(PredictError::MissingCalibration { temptype })
    }

    /// Returns `true` if a store is loaded for `temptype`.
    pub fn has(&self, temptype: TempType) -> bool {
        self.store(temptype).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bayspar_store::{Draw, GridSpec};

    fn store(temptype: TempType, n: usize) -> CalibrationStore {
        CalibrationStore::builder(temptype, GridSpec::default())
            .add_cell(0.0, 10.0, vec![Draw::new(0.3, 0.015, 1e-3); n])
            .build()
            .unwrap()
    }

    #[test]
    fn stores_are_keyed_by_temptype() {
        let cal = Calibration::new()
            .with_store(store(TempType::Sst, 3))
            .with_store(store(TempType::Subt, 5));
        assert_eq!(cal.store(TempType::Sst).unwrap().max_draws(), 3);
        assert_eq!(cal.store(TempType::Subt).unwrap().max_draws(), 5);
    }

    #[test]
    fn missing_store() {
        let cal = Calibration::new().with_store(store(TempType::Sst, 3));
        assert!(cal.has(TempType::Sst));
        assert!(!cal.has(TempType::Subt));
        assert!(matches!(
            cal.store(TempType::Subt),
            Err(PredictError::MissingCalibration {
                temptype: TempType::Subt
            })
        ));
    }

    #[test]
    fn later_store_replaces_earlier() {
        let cal = Calibration::new()
            .with_store(store(TempType::Sst, 3))
            .with_store(store(TempType::Sst, 7));
        assert_eq!(cal.store(TempType::Sst).unwrap().max_draws(), 7);
    }
}
