//! Calibration target: sea-surface or sub-surface temperature.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Which temperature a calibration dataset was fitted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempType {
    /// Sea-surface temperature.
    Sst,
    /// Sub-surface (0-200 m) temperature.
    Subt,
}

impl TempType {
    /// Both temperature types, in declaration order.
    pub const ALL: [TempType; 2] = [TempType::Sst, TempType::Subt];

    /// Short lowercase token (`"sst"` / `"subt"`).
    pub fn as_str(self) -> &'static str {
        match self {
            TempType::Sst => "sst",
            TempType::Subt => "subt",
        }
    }
}

impl fmt::Display for TempType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TempType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sst" | "sea-surface" => Ok(TempType::Sst),
            "subt" | "sub-surface" => Ok(TempType::Subt),
            _ => Err(StoreError::InvalidTemptype {
                token: s.to_string(),
            }),
        }
    }
}
