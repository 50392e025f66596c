//! Plain-text email body for a visit report. Delivery goes through the hosted
//! platform's mail service; only the formatting lives here.

use super::views::VisitReportSummary;
use std::fmt::Write;

pub fn render_email_body(summary: &VisitReportSummary) -> String {
    let mut body = String::new();

    let _ = writeln!(body, "Visit report {}", summary.visit_id);
    let _ = writeln!(
        body,
        "{}, {} ({})",
        summary.customer_name, summary.customer_address, summary.kind_label
    );
    let _ = writeln!(
        body,
        "Visited {} by {} | status: {}",
        summary.visit_date, summary.technician_email, summary.status_label
    );

    if !summary.checklist_progress.is_empty() {
        let _ = writeln!(body, "\nChecklist");
        for entry in &summary.checklist_progress {
            let _ = writeln!(body, "- {}: {}", entry.status_label, entry.count);
        }
    }

    if summary.defects.is_empty() {
        let _ = writeln!(body, "\nDefects: none");
    } else {
        let _ = writeln!(body, "\nDefects");
        for defect in &summary.defects {
            match &defect.note {
                Some(note) => {
                    let _ = writeln!(body, "- {} ({})", defect.label, note);
                }
                None => {
                    let _ = writeln!(body, "- {}", defect.label);
                }
            }
        }
    }

    if let Some(assessment) = &summary.assessment {
        let _ = writeln!(body, "\nAssessment");
        if let Some(pct) = assessment.pct_self_consumed {
            let label = assessment.self_consumption_label.unwrap_or("-");
            let _ = writeln!(body, "- Self-consumption: {pct}% ({label})");
        }
        if let Some(recommendation) = assessment.recommendation {
            let _ = writeln!(body, "- Recommendation: {recommendation}");
        }
        if let (Some(count), Some(watts)) = (assessment.panel_count, assessment.panel_watts) {
            let installed = assessment.installed_kw.unwrap_or_default();
            let _ = writeln!(
                body,
                "- Recommended layout: {count} x {watts} W ({installed} kWp)"
            );
        }
        if let Some(yield_kwh) = assessment.annual_yield_kwh {
            let _ = writeln!(body, "- Projected yield: {yield_kwh} kWh/year");
        }
        if let Some(savings) = assessment.annual_savings {
            let _ = writeln!(body, "- Projected bill savings: {savings}/year");
        }
        if let Some(year) = assessment.payback_year {
            let _ = writeln!(body, "- Payback expected in year {year}");
        }
        if let Some(roi) = assessment.roi_pct {
            let _ = writeln!(body, "- 25-year return on investment: {roi}%");
        }
    }

    body
}
