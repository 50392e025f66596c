//! Spreadsheet-row export. Produces the rows the back office pastes into the
//! shared tracking sheet; actually pushing them to a hosted spreadsheet is a
//! transport concern outside this crate.

use super::views::VisitReportSummary;
use std::io::Write;

pub const SHEET_HEADER: [&str; 13] = [
    "Visit ID",
    "Date",
    "Customer",
    "Address",
    "Kind",
    "Status",
    "Technician",
    "Self-Consumption %",
    "Rating",
    "Panels",
    "Annual Savings",
    "Payback Year",
    "ROI %",
];

/// One sheet row per visit, in header order.
pub fn sheet_row(summary: &VisitReportSummary) -> Vec<String> {
    let assessment = summary.assessment.as_ref();

    let panels = assessment
        .and_then(|view| view.panel_count.zip(view.panel_watts))
        .map(|(count, watts)| format!("{count}x{watts} W"))
        .unwrap_or_default();

    vec![
        summary.visit_id.0.clone(),
        summary.visit_date.format("%Y-%m-%d").to_string(),
        summary.customer_name.clone(),
        summary.customer_address.clone(),
        summary.kind_label.to_string(),
        summary.status_label.to_string(),
        summary.technician_email.clone(),
        format_opt(assessment.and_then(|view| view.pct_self_consumed)),
        assessment
            .and_then(|view| view.self_consumption_label)
            .unwrap_or_default()
            .to_string(),
        panels,
        format_opt(assessment.and_then(|view| view.annual_savings)),
        assessment
            .and_then(|view| view.payback_year)
            .map(|year| year.to_string())
            .unwrap_or_default(),
        format_opt(assessment.and_then(|view| view.roi_pct)),
    ]
}

/// Writes a header row followed by one row per summary.
pub fn write_sheet<W: Write>(
    writer: W,
    summaries: &[VisitReportSummary],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(SHEET_HEADER)?;
    for summary in summaries {
        csv_writer.write_record(sheet_row(summary))?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn format_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
