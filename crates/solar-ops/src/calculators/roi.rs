use super::{round1, InvalidInput};
use serde::{Deserialize, Serialize};

/// The projection always runs the full horizon; payback may still land inside
/// it or never arrive.
pub const PROJECTION_HORIZON_YEARS: u32 = 25;

/// Share of annual yield that offsets the electricity bill. Deliberately
/// defined here as well as in the sizing module: both mirror the same product
/// assumption without deriving it from a measured autoconsumption split.
const BILL_SAVINGS_FACTOR: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiInput {
    pub install_cost: f64,
    pub annual_production_kwh: f64,
    pub energy_price_gross: f64,
    #[serde(default)]
    pub maintenance_cost_per_year: f64,
    /// Annual electricity price inflation in percent (5.0 means 5 %).
    #[serde(default)]
    pub price_inflation_pct: f64,
    /// Annual panel output decline in percent (0.5 means 0.5 %).
    #[serde(default)]
    pub panel_degradation_pct: f64,
}

/// One row of the 25-year cash-flow table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiYear {
    pub year: u32,
    pub production_kwh: f64,
    pub energy_price: f64,
    /// May be negative in a loss year (maintenance above savings); intentional,
    /// not an error.
    pub net_savings: f64,
    pub cumulative_savings: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiProjection {
    pub years: Vec<RoiYear>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_year: Option<u32>,
    pub roi_pct: f64,
    pub average_annual_savings: f64,
    pub total_profit: f64,
}

/// Simulates a 25-year cash flow for a quoted install and derives payback
/// year, overall ROI, and total profit.
pub fn project_roi(input: &RoiInput) -> Result<RoiProjection, InvalidInput> {
    if input.install_cost <= 0.0 {
        return Err(InvalidInput::NonPositiveInstallCost(input.install_cost));
    }
    if input.annual_production_kwh <= 0.0 {
        return Err(InvalidInput::NonPositiveProduction(
            input.annual_production_kwh,
        ));
    }
    if input.energy_price_gross <= 0.0 {
        return Err(InvalidInput::NonPositivePrice(input.energy_price_gross));
    }
    if input.maintenance_cost_per_year < 0.0 {
        return Err(InvalidInput::NegativeMaintenance(
            input.maintenance_cost_per_year,
        ));
    }

    let inflation = input.price_inflation_pct / 100.0;
    let degradation = input.panel_degradation_pct / 100.0;

    let mut years = Vec::with_capacity(PROJECTION_HORIZON_YEARS as usize);
    let mut cumulative = 0.0;
    let mut payback_year = None;

    for year in 1..=PROJECTION_HORIZON_YEARS {
        let exponent = year as i32 - 1;
        let energy_price = input.energy_price_gross * (1.0 + inflation).powi(exponent);
        let production_kwh = input.annual_production_kwh * (1.0 - degradation).powi(exponent);
        let net_savings =
            production_kwh * energy_price * BILL_SAVINGS_FACTOR - input.maintenance_cost_per_year;
        cumulative += net_savings;

        if payback_year.is_none() && cumulative >= input.install_cost {
            payback_year = Some(year);
        }

        years.push(RoiYear {
            year,
            production_kwh: production_kwh.round(),
            energy_price,
            net_savings: net_savings.round(),
            cumulative_savings: cumulative.round(),
            profit: (cumulative - input.install_cost).round(),
        });
    }

    Ok(RoiProjection {
        years,
        payback_year,
        roi_pct: round1((cumulative - input.install_cost) / input.install_cost * 100.0),
        average_annual_savings: (cumulative / f64::from(PROJECTION_HORIZON_YEARS)).round(),
        total_profit: (cumulative - input.install_cost).round(),
    })
}
