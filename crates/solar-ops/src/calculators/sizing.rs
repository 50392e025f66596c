use super::InvalidInput;
use serde::{Deserialize, Serialize};

/// Reference yield for a south-facing installation before orientation and
/// weather adjustments.
const BASELINE_YIELD_KWH_PER_KWP: f64 = 1000.0;

/// Intentional oversizing so self-consumption losses do not starve the
/// household; a design choice, not a correction factor.
const SELF_CONSUMPTION_OVERSIZING: f64 = 1.2;

/// Above this DC rating the install moves off single-phase inverters.
const SINGLE_PHASE_LIMIT_KW: f64 = 3.68;

const SMALL_PANEL_WATTS: u32 = 450;
const SMALL_PANEL_CAP: u32 = 8;
const LARGE_PANEL_WATTS: u32 = 480;

/// Share of annual yield that offsets the electricity bill; the remainder is
/// exported at a lower feed-in value. Fixed product assumption, not derived
/// from a measured autoconsumption split.
const BILL_SAVINGS_FACTOR: f64 = 0.7;

const PAYBACK_HORIZON_YEARS: u32 = 25;
const ASSUMED_PRICE_INFLATION: f64 = 0.05;

/// Roof-facing efficiency relative to true south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofOrientation {
    South,
    EastWest,
    North,
}

impl RoofOrientation {
    pub const fn ordered() -> [Self; 3] {
        [Self::South, Self::EastWest, Self::North]
    }

    pub const fn factor(self) -> f64 {
        match self {
            Self::South => 1.0,
            Self::EastWest => 0.9,
            Self::North => 0.8,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::South => "South",
            Self::EastWest => "East/West",
            Self::North => "North",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingInput {
    pub annual_consumption_kwh: f64,
    pub orientation: RoofOrientation,
    pub energy_price_gross: f64,
    /// Weather-adjusted production factor in percent, within (0, 100].
    /// Defaults to 100 (no adjustment).
    #[serde(default)]
    pub production_factor_pct: Option<f64>,
    /// When given, a payback year is projected against the quoted cost.
    #[serde(default)]
    pub install_cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingResult {
    pub production_per_kwp: f64,
    pub required_kw: f64,
    pub panel_watts: u32,
    pub panel_count: u32,
    /// True when the single-phase panel cap trimmed the count.
    pub cap_applied: bool,
    pub installed_kw: f64,
    pub annual_yield_kwh: f64,
    pub annual_savings: f64,
    /// First year cumulative savings reach the quoted install cost. `None`
    /// either because no cost was quoted or the system never pays back within
    /// the projection horizon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_year: Option<u32>,
}

/// Recommends a panel layout for the given annual consumption and projects the
/// yearly yield and bill savings.
///
/// Installs that fit on a single-phase inverter (`required_kw <= 3.68`) use
/// 450 W panels capped at eight; larger installs use 480 W panels uncapped.
pub fn estimate_size(input: &SizingInput) -> Result<SizingResult, InvalidInput> {
    if input.annual_consumption_kwh <= 0.0 {
        return Err(InvalidInput::NonPositiveConsumption(
            input.annual_consumption_kwh,
        ));
    }
    if input.energy_price_gross <= 0.0 {
        return Err(InvalidInput::NonPositivePrice(input.energy_price_gross));
    }
    if let Some(factor) = input.production_factor_pct {
        if factor <= 0.0 || factor > 100.0 {
            return Err(InvalidInput::ProductionFactorOutOfRange(factor));
        }
    }
    if let Some(cost) = input.install_cost {
        if cost <= 0.0 {
            return Err(InvalidInput::NonPositiveInstallCost(cost));
        }
    }

    let production_factor = input.production_factor_pct.unwrap_or(100.0) / 100.0;
    let production_per_kwp =
        BASELINE_YIELD_KWH_PER_KWP * input.orientation.factor() * production_factor;
    let required_kw = input.annual_consumption_kwh * SELF_CONSUMPTION_OVERSIZING / production_per_kwp;

    let (panel_watts, panel_count, cap_applied) = if required_kw <= SINGLE_PHASE_LIMIT_KW {
        let uncapped = panels_for(required_kw, SMALL_PANEL_WATTS);
        (
            SMALL_PANEL_WATTS,
            uncapped.min(SMALL_PANEL_CAP),
            uncapped > SMALL_PANEL_CAP,
        )
    } else {
        (LARGE_PANEL_WATTS, panels_for(required_kw, LARGE_PANEL_WATTS), false)
    };

    let installed_kw = f64::from(panel_count) * f64::from(panel_watts) / 1000.0;
    let annual_yield_kwh = (installed_kw * production_per_kwp).round();
    let annual_savings =
        (annual_yield_kwh * input.energy_price_gross * BILL_SAVINGS_FACTOR).round();

    let payback_year = input
        .install_cost
        .and_then(|cost| project_payback(annual_yield_kwh, input.energy_price_gross, cost));

    Ok(SizingResult {
        production_per_kwp,
        required_kw,
        panel_watts,
        panel_count,
        cap_applied,
        installed_kw,
        annual_yield_kwh,
        annual_savings,
        payback_year,
    })
}

fn panels_for(required_kw: f64, panel_watts: u32) -> u32 {
    (required_kw * 1000.0 / f64::from(panel_watts)).ceil() as u32
}

fn project_payback(annual_yield_kwh: f64, energy_price_gross: f64, install_cost: f64) -> Option<u32> {
    let mut cumulative = 0.0;
    for year in 1..=PAYBACK_HORIZON_YEARS {
        let price_year =
            energy_price_gross * (1.0 + ASSUMED_PRICE_INFLATION).powi(year as i32 - 1);
        cumulative += annual_yield_kwh * price_year * BILL_SAVINGS_FACTOR;
        if cumulative >= install_cost {
            return Some(year);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline_input() -> SizingInput {
        SizingInput {
            annual_consumption_kwh: 5000.0,
            orientation: RoofOrientation::South,
            energy_price_gross: 1.50,
            production_factor_pct: None,
            install_cost: None,
        }
    }

    #[test]
    fn sizes_a_south_facing_household() {
        let result = estimate_size(&baseline_input()).expect("valid inputs");

        assert_eq!(result.production_per_kwp, 1000.0);
        assert_eq!(result.required_kw, 6.0);
        assert_eq!(result.panel_watts, LARGE_PANEL_WATTS);
        assert_eq!(result.panel_count, 13);
        assert!(!result.cap_applied);
        assert_eq!(result.installed_kw, 6.24);
        assert_eq!(result.annual_yield_kwh, 6240.0);
        assert_eq!(result.annual_savings, 6552.0);
        assert!(result.payback_year.is_none());
    }

    #[test]
    fn small_installs_use_small_panels_and_respect_the_cap() {
        let mut input = baseline_input();
        input.annual_consumption_kwh = 2500.0; // 3.0 kW required

        let result = estimate_size(&input).expect("valid inputs");
        assert_eq!(result.panel_watts, SMALL_PANEL_WATTS);
        assert_eq!(result.panel_count, 7);
        assert!(!result.cap_applied);

        input.annual_consumption_kwh = 3050.0; // 3.66 kW -> 9 panels uncapped
        let result = estimate_size(&input).expect("valid inputs");
        assert_eq!(result.panel_watts, SMALL_PANEL_WATTS);
        assert_eq!(result.panel_count, SMALL_PANEL_CAP);
        assert!(result.cap_applied);
    }

    #[test]
    fn production_factor_scales_yield_per_kwp() {
        let mut input = baseline_input();
        input.orientation = RoofOrientation::EastWest;
        input.production_factor_pct = Some(50.0);

        let result = estimate_size(&input).expect("valid inputs");
        assert_eq!(result.production_per_kwp, 450.0);
    }

    #[test]
    fn quoted_install_cost_yields_a_payback_year() {
        let mut input = baseline_input();
        input.install_cost = Some(35000.0);

        let result = estimate_size(&input).expect("valid inputs");
        let payback = result.payback_year.expect("cost quoted");
        // Year-1 savings are 6552 and grow 5% per year; 35000 is reached
        // within the first handful of years.
        assert!((4..=6).contains(&payback), "payback {payback}");
    }

    #[test]
    fn very_large_consumption_does_not_overflow_panel_math() {
        // Utility-scale figure; the watt total no longer fits in u32.
        let mut input = baseline_input();
        input.annual_consumption_kwh = 4_000_000_000.0;

        let result = estimate_size(&input).expect("valid inputs");
        assert_eq!(result.panel_watts, LARGE_PANEL_WATTS);
        assert_eq!(
            result.installed_kw,
            f64::from(result.panel_count) * f64::from(LARGE_PANEL_WATTS) / 1000.0
        );
        assert!(result.installed_kw >= result.required_kw);
    }

    #[test]
    fn never_paying_back_returns_none() {
        let mut input = baseline_input();
        input.install_cost = Some(10_000_000.0);

        let result = estimate_size(&input).expect("valid inputs");
        assert!(result.payback_year.is_none());
    }

    #[test]
    fn rejects_bad_preconditions() {
        let mut input = baseline_input();
        input.annual_consumption_kwh = 0.0;
        assert!(matches!(
            estimate_size(&input),
            Err(InvalidInput::NonPositiveConsumption(_))
        ));

        let mut input = baseline_input();
        input.energy_price_gross = -0.5;
        assert!(matches!(
            estimate_size(&input),
            Err(InvalidInput::NonPositivePrice(_))
        ));

        let mut input = baseline_input();
        input.production_factor_pct = Some(140.0);
        assert!(matches!(
            estimate_size(&input),
            Err(InvalidInput::ProductionFactorOutOfRange(_))
        ));

        let mut input = baseline_input();
        input.install_cost = Some(0.0);
        assert!(matches!(
            estimate_size(&input),
            Err(InvalidInput::NonPositiveInstallCost(_))
        ));
    }

    #[test]
    fn orientation_factors_are_fixed() {
        assert_eq!(RoofOrientation::South.factor(), 1.0);
        assert_eq!(RoofOrientation::EastWest.factor(), 0.9);
        assert_eq!(RoofOrientation::North.factor(), 0.8);
    }
}
