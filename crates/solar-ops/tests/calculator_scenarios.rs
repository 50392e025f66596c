use solar_ops::calculators::{
    estimate_size, evaluate, project_roi, InvalidInput, RoiInput, RoofOrientation,
    SelfConsumptionLevel, SizingInput,
};

#[test]
fn autoconsumption_reference_scenario() {
    let result = evaluate(8500.0, 5200.0, None).expect("valid inputs");

    assert_eq!(result.self_consumed_kwh, 3300.0);
    assert_eq!(result.pct_self_consumed, 38.8);
    assert_eq!(result.level, SelfConsumptionLevel::Medium);
    assert_eq!(result.level_label, "Medium");
}

#[test]
fn autoconsumption_with_household_total() {
    let result = evaluate(8500.0, 5200.0, Some(6800.0)).expect("valid inputs");
    let coverage = result.coverage.expect("coverage computed");

    assert_eq!(coverage.import_from_grid_kwh, 3500.0);
    assert_eq!(coverage.pct_grid_covered, 51.5);
    assert_eq!(coverage.pct_own_covered, 48.5);
}

#[test]
fn sizing_reference_scenario() {
    let input = SizingInput {
        annual_consumption_kwh: 5000.0,
        orientation: RoofOrientation::South,
        energy_price_gross: 1.50,
        production_factor_pct: None,
        install_cost: None,
    };

    let result = estimate_size(&input).expect("valid inputs");
    assert_eq!(result.production_per_kwp, 1000.0);
    assert_eq!(result.required_kw, 6.0);
    assert_eq!(result.panel_watts, 480);
    assert_eq!(result.panel_count, 13);
    assert_eq!(result.installed_kw, 6.24);
    assert_eq!(result.annual_yield_kwh, 6240.0);
    assert_eq!(result.annual_savings, 6552.0);
}

#[test]
fn sizing_small_branch_never_exceeds_eight_panels() {
    // Sweep the whole single-phase band; every recommendation must use 450 W
    // panels and stay within the inverter ceiling.
    let mut consumption = 100.0;
    while consumption <= 3060.0 {
        let input = SizingInput {
            annual_consumption_kwh: consumption,
            orientation: RoofOrientation::South,
            energy_price_gross: 1.50,
            production_factor_pct: None,
            install_cost: None,
        };
        let result = estimate_size(&input).expect("valid inputs");
        if result.required_kw <= 3.68 {
            assert_eq!(result.panel_watts, 450, "consumption {consumption}");
            assert!(result.panel_count <= 8, "consumption {consumption}");
        }
        consumption += 100.0;
    }
}

#[test]
fn roi_reference_scenario() {
    let input = RoiInput {
        install_cost: 35000.0,
        annual_production_kwh: 8500.0,
        energy_price_gross: 1.50,
        maintenance_cost_per_year: 200.0,
        price_inflation_pct: 5.0,
        panel_degradation_pct: 0.5,
    };

    let projection = project_roi(&input).expect("valid inputs");
    assert_eq!(projection.years[0].net_savings, 8725.0);

    let payback = projection.payback_year.expect("pays back");
    assert!((4..=5).contains(&payback), "payback {payback}");
}

#[test]
fn calculators_are_idempotent() {
    let sizing_input = SizingInput {
        annual_consumption_kwh: 4200.0,
        orientation: RoofOrientation::EastWest,
        energy_price_gross: 1.80,
        production_factor_pct: Some(85.0),
        install_cost: Some(30000.0),
    };
    let roi_input = RoiInput {
        install_cost: 30000.0,
        annual_production_kwh: 4500.0,
        energy_price_gross: 1.80,
        maintenance_cost_per_year: 150.0,
        price_inflation_pct: 3.0,
        panel_degradation_pct: 0.4,
    };

    assert_eq!(
        evaluate(7200.0, 3100.0, Some(5600.0)).expect("valid"),
        evaluate(7200.0, 3100.0, Some(5600.0)).expect("valid")
    );
    assert_eq!(
        estimate_size(&sizing_input).expect("valid"),
        estimate_size(&sizing_input).expect("valid")
    );
    assert_eq!(
        project_roi(&roi_input).expect("valid"),
        project_roi(&roi_input).expect("valid")
    );
}

#[test]
fn zero_consumption_fails_instead_of_producing_nan() {
    for consumption in [0.0, -250.0] {
        let input = SizingInput {
            annual_consumption_kwh: consumption,
            orientation: RoofOrientation::South,
            energy_price_gross: 1.50,
            production_factor_pct: None,
            install_cost: None,
        };
        match estimate_size(&input) {
            Err(InvalidInput::NonPositiveConsumption(value)) => assert_eq!(value, consumption),
            other => panic!("expected invalid consumption, got {other:?}"),
        }
    }
}
