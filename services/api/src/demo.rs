use crate::infra::{InMemoryNotificationPublisher, InMemoryVisitReportRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::json;
use solar_ops::calculators::{
    estimate_size, evaluate, project_roi, RoiInput, RoofOrientation, SizingInput,
};
use solar_ops::config::EngineDefaults;
use solar_ops::error::AppError;
use solar_ops::visits::report::{email::render_email_body, sheet};
use solar_ops::visits::{Principal, UserRole, VisitReportService};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Visit date for the demo report (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) visit_date: Option<NaiveDate>,
    /// Skip the rendering portion of the demo (email body and sheet row).
    #[arg(long)]
    pub(crate) skip_rendering: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AutoconsumptionArgs {
    /// Annual PV production in kWh
    #[arg(long)]
    pub(crate) production_kwh: f64,
    /// Annual energy exported to the grid in kWh
    #[arg(long)]
    pub(crate) exported_kwh: f64,
    /// Total household consumption in kWh, if known
    #[arg(long)]
    pub(crate) total_consumption_kwh: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct SizingArgs {
    /// Annual household consumption in kWh
    #[arg(long)]
    pub(crate) annual_consumption_kwh: f64,
    /// Roof orientation: south, east_west, or north
    #[arg(long, default_value = "south", value_parser = parse_orientation)]
    pub(crate) orientation: RoofOrientation,
    /// Gross electricity price per kWh
    #[arg(long, default_value_t = 1.50)]
    pub(crate) energy_price_gross: f64,
    /// Site production factor in percent (shading, tilt)
    #[arg(long)]
    pub(crate) production_factor_pct: Option<f64>,
    /// Quoted install cost, enables the payback estimate
    #[arg(long)]
    pub(crate) install_cost: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct RoiArgs {
    /// Quoted install cost
    #[arg(long)]
    pub(crate) install_cost: f64,
    /// Annual PV production in kWh
    #[arg(long)]
    pub(crate) annual_production_kwh: f64,
    /// Gross electricity price per kWh
    #[arg(long, default_value_t = 1.50)]
    pub(crate) energy_price_gross: f64,
    /// Yearly maintenance cost
    #[arg(long, default_value_t = 200.0)]
    pub(crate) maintenance_cost_per_year: f64,
    /// Annual electricity price inflation in percent
    #[arg(long, default_value_t = 5.0)]
    pub(crate) price_inflation_pct: f64,
    /// Annual panel output decline in percent
    #[arg(long, default_value_t = 0.5)]
    pub(crate) panel_degradation_pct: f64,
}

pub(crate) fn run_autoconsumption(args: AutoconsumptionArgs) -> Result<(), AppError> {
    let result = evaluate(
        args.production_kwh,
        args.exported_kwh,
        args.total_consumption_kwh,
    )?;
    print_json(&result);
    Ok(())
}

pub(crate) fn run_sizing(args: SizingArgs) -> Result<(), AppError> {
    let result = estimate_size(&SizingInput {
        annual_consumption_kwh: args.annual_consumption_kwh,
        orientation: args.orientation,
        energy_price_gross: args.energy_price_gross,
        production_factor_pct: args.production_factor_pct,
        install_cost: args.install_cost,
    })?;
    print_json(&result);
    Ok(())
}

pub(crate) fn run_roi(args: RoiArgs) -> Result<(), AppError> {
    let projection = project_roi(&RoiInput {
        install_cost: args.install_cost,
        annual_production_kwh: args.annual_production_kwh,
        energy_price_gross: args.energy_price_gross,
        maintenance_cost_per_year: args.maintenance_cost_per_year,
        price_inflation_pct: args.price_inflation_pct,
        panel_degradation_pct: args.panel_degradation_pct,
    })?;

    println!("Year | Production | Price | Net savings | Cumulative | Profit");
    for year in &projection.years {
        println!(
            "{:>4} | {:>10} | {:>5.3} | {:>11} | {:>10} | {:>8}",
            year.year,
            year.production_kwh,
            year.energy_price,
            year.net_savings,
            year.cumulative_savings,
            year.profit
        );
    }
    match projection.payback_year {
        Some(year) => println!("\nPayback in year {year}"),
        None => println!("\nNo payback within the projection horizon"),
    }
    println!(
        "ROI {}% | average annual savings {} | total profit {}",
        projection.roi_pct, projection.average_annual_savings, projection.total_profit
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let visit_date = args
        .visit_date
        .unwrap_or_else(|| Local::now().date_naive());

    println!("Solar field-operations demo");

    let repository = Arc::new(InMemoryVisitReportRepository::default());
    let notifications = Arc::new(InMemoryNotificationPublisher::default());
    let service = Arc::new(VisitReportService::new(
        repository,
        notifications.clone(),
        EngineDefaults::default(),
    ));

    // Payload shaped like an export from the old field app: enveloped under
    // "report", camelCase keys, numbers as strings. The normalization boundary
    // flattens all of that before validation.
    let payload = json!({
        "report": {
            "customerName": "Anna Berg",
            "customerAddress": "Solgatan 12, Uppsala",
            "visitDate": visit_date.format("%Y-%m-%d").to_string(),
            "kind": "sales_consultation",
            "submittedBy": { "email": "tech@example.com", "role": "technician" },
            "checklist": [
                { "key": "roof_condition", "label": "Roof condition acceptable", "status": "passed" },
                { "key": "meter_access", "label": "Meter cabinet accessible", "status": "defect",
                  "note": "Cabinet lock broken" }
            ],
            "interview": {
                "annualConsumptionKwh": "5000",
                "energyPriceGross": "1,50",
                "roofOrientation": "south",
                "quotedInstallCost": "35000",
                "interestedInStorage": true
            },
            "reading": {
                "annualProductionKwh": "8500",
                "exportedKwh": "5200",
                "importedKwh": "3500"
            }
        }
    });

    let report = match service.submit(payload) {
        Ok(report) => report,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Received visit {} -> status {}",
        report.id,
        report.status.label()
    );

    let reviewer = Principal {
        email: "manager@example.com".to_string(),
        role: UserRole::Manager,
    };
    let assessment = match service.assess(&reviewer, &report.id) {
        Ok(assessment) => assessment,
        Err(err) => {
            println!("  Assessment unavailable: {}", err);
            return Ok(());
        }
    };

    if let Some(auto) = &assessment.autoconsumption {
        println!(
            "- Self-consumption: {}% ({}) -> {}",
            auto.pct_self_consumed, auto.level_label, auto.recommendation
        );
    }
    if let Some(sizing) = &assessment.sizing {
        println!(
            "- Recommended system: {} x {} W = {} kWp, {} kWh/year",
            sizing.panel_count, sizing.panel_watts, sizing.installed_kw, sizing.annual_yield_kwh
        );
    }
    if let Some(roi) = &assessment.roi {
        match roi.payback_year {
            Some(year) => println!(
                "- ROI: {}% over 25 years, payback in year {}",
                roi.roi_pct, year
            ),
            None => println!(
                "- ROI: {}% over 25 years, no payback within the horizon",
                roi.roi_pct
            ),
        }
    }

    let events = notifications.events();
    for event in &events {
        println!(
            "- Notification {} -> {}",
            event.template, event.recipient
        );
    }

    if args.skip_rendering {
        return Ok(());
    }

    let summary = match service.get(&report.id) {
        Ok(stored) => stored.summary(),
        Err(err) => {
            println!("  Stored report unavailable: {}", err);
            return Ok(());
        }
    };

    println!("\nEmail body");
    println!("{}", render_email_body(&summary));

    println!("Tracking sheet row");
    let mut buffer = Vec::new();
    sheet::write_sheet(&mut buffer, std::slice::from_ref(&summary))?;
    match String::from_utf8(buffer) {
        Ok(csv) => print!("{csv}"),
        Err(_) => println!("  (sheet row was not valid UTF-8)"),
    }

    Ok(())
}

fn parse_orientation(raw: &str) -> Result<RoofOrientation, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "south" => Ok(RoofOrientation::South),
        "east_west" | "east-west" | "eastwest" => Ok(RoofOrientation::EastWest),
        "north" => Ok(RoofOrientation::North),
        other => Err(format!(
            "unknown orientation '{other}'; expected south, east_west, or north"
        )),
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("  Output unavailable: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_flag_accepts_known_spellings() {
        assert_eq!(parse_orientation("south"), Ok(RoofOrientation::South));
        assert_eq!(parse_orientation(" East-West "), Ok(RoofOrientation::EastWest));
        assert_eq!(parse_orientation("NORTH"), Ok(RoofOrientation::North));
    }

    #[test]
    fn orientation_flag_rejects_typos() {
        assert!(parse_orientation("nort").is_err());
        assert!(parse_orientation("wets").is_err());
        assert!(parse_orientation("").is_err());
    }
}
