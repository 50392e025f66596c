use super::{round1, InvalidInput};
use serde::{Deserialize, Serialize};

/// Qualitative rating of how much on-site production is consumed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfConsumptionLevel {
    Low,
    Medium,
    High,
}

impl SelfConsumptionLevel {
    /// Tier boundaries are closed and non-overlapping with inclusive lower
    /// bounds, applied to the already-rounded percentage: 29.9 is Low, 30.0 is
    /// Medium, 59.9 is Medium, 60.0 is High.
    pub fn for_pct(pct_self_consumed: f64) -> Self {
        if pct_self_consumed < 30.0 {
            Self::Low
        } else if pct_self_consumed < 60.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::Low => "Consider battery storage to keep more production on site",
            Self::Medium => "Shift flexible loads into production hours or add storage",
            Self::High => "No action needed; most production is already consumed on site",
        }
    }
}

/// How the stated household consumption splits between grid import and own
/// production. Only available when the caller supplies a total consumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoverageBreakdown {
    /// May be negative when self-consumption exceeds the stated household
    /// total (inconsistent input); passed through un-clamped.
    pub import_from_grid_kwh: f64,
    pub pct_grid_covered: f64,
    pub pct_own_covered: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoconsumptionResult {
    pub self_consumed_kwh: f64,
    pub pct_self_consumed: f64,
    pub pct_exported: f64,
    pub level: SelfConsumptionLevel,
    pub level_label: &'static str,
    pub recommendation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageBreakdown>,
}

/// Splits one year of production into self-consumed and exported shares and
/// rates the result.
///
/// `total_consumption_kwh`, when supplied and positive, additionally yields a
/// [`CoverageBreakdown`] of the household's consumption.
pub fn evaluate(
    production_kwh: f64,
    exported_kwh: f64,
    total_consumption_kwh: Option<f64>,
) -> Result<AutoconsumptionResult, InvalidInput> {
    if production_kwh <= 0.0 {
        return Err(InvalidInput::NonPositiveProduction(production_kwh));
    }

    let self_consumed_kwh = production_kwh - exported_kwh;
    let pct_self_consumed = round1(self_consumed_kwh / production_kwh * 100.0);
    let pct_exported = round1(exported_kwh / production_kwh * 100.0);
    let level = SelfConsumptionLevel::for_pct(pct_self_consumed);

    let coverage = total_consumption_kwh
        .filter(|total| *total > 0.0)
        .map(|total| {
            let import_from_grid_kwh = total - self_consumed_kwh;
            CoverageBreakdown {
                import_from_grid_kwh,
                pct_grid_covered: round1(import_from_grid_kwh / total * 100.0),
                pct_own_covered: round1(self_consumed_kwh / total * 100.0),
            }
        });

    Ok(AutoconsumptionResult {
        self_consumed_kwh,
        pct_self_consumed,
        pct_exported,
        level,
        level_label: level.label(),
        recommendation: level.recommendation(),
        coverage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_production_into_rounded_shares() {
        let result = evaluate(8500.0, 5200.0, None).expect("valid inputs");

        assert_eq!(result.self_consumed_kwh, 3300.0);
        assert_eq!(result.pct_self_consumed, 38.8);
        assert_eq!(result.pct_exported, 61.2);
        assert_eq!(result.level, SelfConsumptionLevel::Medium);
        assert!(result.coverage.is_none());
    }

    #[test]
    fn coverage_breakdown_uses_stated_household_total() {
        let result = evaluate(8500.0, 5200.0, Some(6800.0)).expect("valid inputs");

        let coverage = result.coverage.expect("total consumption supplied");
        assert_eq!(coverage.import_from_grid_kwh, 3500.0);
        assert_eq!(coverage.pct_grid_covered, 51.5);
        assert_eq!(coverage.pct_own_covered, 48.5);
    }

    #[test]
    fn tier_boundaries_are_lower_bound_inclusive() {
        // 1000 kWh production makes the rounded percentage exact.
        let cases = [
            (701.0, SelfConsumptionLevel::Low),    // 29.9%
            (700.0, SelfConsumptionLevel::Medium), // 30.0%
            (401.0, SelfConsumptionLevel::Medium), // 59.9%
            (400.0, SelfConsumptionLevel::High),   // 60.0%
        ];
        for (exported, expected) in cases {
            let result = evaluate(1000.0, exported, None).expect("valid inputs");
            assert_eq!(
                result.level, expected,
                "exported {exported} -> pct {}",
                result.pct_self_consumed
            );
        }
    }

    #[test]
    fn shares_sum_to_one_hundred_within_rounding() {
        for exported in [0.0, 123.0, 500.0, 999.0, 1000.0] {
            let result = evaluate(1000.0, exported, None).expect("valid inputs");
            let sum = result.pct_self_consumed + result.pct_exported;
            assert!((sum - 100.0).abs() <= 0.1, "sum {sum} for export {exported}");
        }
    }

    #[test]
    fn negative_import_from_grid_is_not_clamped() {
        // Self-consumption above the stated household total is inconsistent
        // input; the raw negative figure is surfaced rather than hidden.
        let result = evaluate(9000.0, 1000.0, Some(5000.0)).expect("valid inputs");
        let coverage = result.coverage.expect("coverage present");
        assert_eq!(coverage.import_from_grid_kwh, -3000.0);
        assert!(coverage.pct_grid_covered < 0.0);
    }

    #[test]
    fn rejects_non_positive_production() {
        for production in [0.0, -1.0] {
            match evaluate(production, 0.0, None) {
                Err(InvalidInput::NonPositiveProduction(value)) => assert_eq!(value, production),
                other => panic!("expected invalid production, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_total_consumption_skips_coverage() {
        let result = evaluate(1000.0, 200.0, Some(0.0)).expect("valid inputs");
        assert!(result.coverage.is_none());
    }
}
