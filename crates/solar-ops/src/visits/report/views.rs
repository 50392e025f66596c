use crate::visits::domain::{ChecklistStatus, VisitReportId};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistProgressEntry {
    pub status: ChecklistStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistItemView {
    pub key: String,
    pub label: String,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Key assessment figures flattened for PDF/email/sheet consumers; anything
/// the engine could not compute stays `None`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssessmentView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pct_self_consumed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_consumption_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_watts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_kw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_yield_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_savings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_profit: Option<f64>,
}

/// Everything a renderer needs to lay out one visit report.
#[derive(Debug, Clone, Serialize)]
pub struct VisitReportSummary {
    pub visit_id: VisitReportId,
    pub customer_name: String,
    pub customer_address: String,
    pub visit_date: NaiveDate,
    pub kind_label: &'static str,
    pub technician_email: String,
    pub status_label: &'static str,
    pub checklist_progress: Vec<ChecklistProgressEntry>,
    pub defects: Vec<ChecklistItemView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<AssessmentView>,
}
