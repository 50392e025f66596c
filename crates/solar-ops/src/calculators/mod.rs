//! Pure calculation engine: autoconsumption rating, PV sizing, ROI projection.
//!
//! Every function in this module is deterministic and side-effect free; each
//! call reads only its own input and writes only its own output, so callers may
//! invoke them concurrently without coordination. All failures are eager input
//! validation, reported as [`InvalidInput`] before any arithmetic runs.

pub mod autoconsumption;
pub mod roi;
pub mod sizing;

pub use autoconsumption::{evaluate, AutoconsumptionResult, CoverageBreakdown, SelfConsumptionLevel};
pub use roi::{project_roi, RoiInput, RoiProjection, RoiYear};
pub use sizing::{estimate_size, RoofOrientation, SizingInput, SizingResult};

use serde::{Deserialize, Serialize};

/// One metered year of production/export/import for an installation.
///
/// Immutable once taken from meter data; supplied fresh on each calculation
/// call. Percentage math assumes `exported_kwh <= annual_production_kwh`, which
/// callers enforce by running readings through [`EnergyReading::clamped`] at
/// the ingestion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    pub annual_production_kwh: f64,
    pub exported_kwh: f64,
    pub imported_kwh: f64,
}

impl EnergyReading {
    /// Normalizes a raw meter reading: negative figures collapse to zero and
    /// export is capped at production so downstream percentages stay in
    /// [0, 100].
    pub fn clamped(self) -> Self {
        let annual_production_kwh = self.annual_production_kwh.max(0.0);
        Self {
            annual_production_kwh,
            exported_kwh: self.exported_kwh.clamp(0.0, annual_production_kwh),
            imported_kwh: self.imported_kwh.max(0.0),
        }
    }

    /// Household consumption implied by the meter: everything produced and not
    /// exported, plus everything imported.
    pub fn implied_consumption_kwh(&self) -> f64 {
        (self.annual_production_kwh - self.exported_kwh) + self.imported_kwh
    }
}

/// Precondition failure raised by any of the calculators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("annual production must be positive, got {0} kWh")]
    NonPositiveProduction(f64),
    #[error("annual consumption must be positive, got {0} kWh")]
    NonPositiveConsumption(f64),
    #[error("gross energy price must be positive, got {0}")]
    NonPositivePrice(f64),
    #[error("install cost must be positive, got {0}")]
    NonPositiveInstallCost(f64),
    #[error("yearly maintenance cost must not be negative, got {0}")]
    NegativeMaintenance(f64),
    #[error("production factor must be within (0, 100] percent, got {0}")]
    ProductionFactorOutOfRange(f64),
}

/// Rounds to one decimal place; used for every percentage figure.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_caps_export_at_production() {
        let reading = EnergyReading {
            annual_production_kwh: 4000.0,
            exported_kwh: 4800.0,
            imported_kwh: -50.0,
        };

        let clamped = reading.clamped();
        assert_eq!(clamped.exported_kwh, 4000.0);
        assert_eq!(clamped.imported_kwh, 0.0);
    }

    #[test]
    fn implied_consumption_combines_self_use_and_import() {
        let reading = EnergyReading {
            annual_production_kwh: 8500.0,
            exported_kwh: 5200.0,
            imported_kwh: 3500.0,
        };

        assert_eq!(reading.implied_consumption_kwh(), 6800.0);
    }

    #[test]
    fn round1_keeps_one_decimal() {
        assert_eq!(round1(38.8235), 38.8);
        assert_eq!(round1(51.47), 51.5);
    }
}
