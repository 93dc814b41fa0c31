//! Modern core-top calibration observations.

use crate::grid::CellKey;
use crate::location::LatLon;

/// A modern calibration record: TEX86 measured at a site together with the
/// observed sea temperature there.
///
/// `cell` links the record back to the grid cell whose draws describe it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModernObservation {
    location: LatLon,
    cell: CellKey,
    tex: f64,
    seatemp: f64,
}

impl ModernObservation {
    pub(crate) fn new(location: LatLon, cell: CellKey, tex: f64, seatemp: f64) -> Self {
        Self {
            location,
            cell,
            tex,
            seatemp,
        }
    }

    /// Site of the observation.
    pub fn location(&self) -> LatLon {
        self.location
    }

    /// Grid cell containing the site.
    pub fn cell(&self) -> CellKey {
        self.cell
    }

    /// Observed TEX86.
    pub fn tex(&self) -> f64 {
        self.tex
    }

    /// Observed sea temperature (°C) of the calibration target.
    pub fn seatemp(&self) -> f64 {
        self.seatemp
    }
}
