use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::VisitReportId;
use super::record::VisitReport;

impl VisitReport {
    pub fn assessment_rationale(&self) -> String {
        match &self.assessment {
            Some(assessment) => {
                let mut parts = Vec::new();
                if let Some(auto) = &assessment.autoconsumption {
                    parts.push(format!(
                        "self-consumption {} ({}%)",
                        auto.level_label, auto.pct_self_consumed
                    ));
                }
                if let Some(sizing) = &assessment.sizing {
                    parts.push(format!(
                        "{}x{} W recommended",
                        sizing.panel_count, sizing.panel_watts
                    ));
                }
                if let Some(roi) = &assessment.roi {
                    match roi.payback_year {
                        Some(year) => parts.push(format!("payback in year {year}")),
                        None => parts.push("no payback within horizon".to_string()),
                    }
                }
                if parts.is_empty() {
                    "assessed without figures".to_string()
                } else {
                    parts.join(", ")
                }
            }
            None => "pending assessment".to_string(),
        }
    }

    pub fn status_view(&self) -> VisitStatusView {
        VisitStatusView {
            visit_id: self.id.clone(),
            customer_name: self.customer_name.clone(),
            status: self.status.label(),
            assessment_rationale: self.assessment_rationale(),
            open_defects: self.open_defects().count(),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation;
/// production deployments back this with the hosted entity store.
pub trait VisitReportRepository: Send + Sync {
    fn insert(&self, report: VisitReport) -> Result<VisitReport, RepositoryError>;
    fn update(&self, report: VisitReport) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &VisitReportId) -> Result<Option<VisitReport>, RepositoryError>;
    fn for_technician(&self, email: &str) -> Result<Vec<VisitReport>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound user-notification hook; the transport (push, email digest) lives
/// outside this crate.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub template: String,
    pub recipient: String,
    pub visit_id: VisitReportId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a visit report's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct VisitStatusView {
    pub visit_id: VisitReportId,
    pub customer_name: String,
    pub status: &'static str,
    pub assessment_rationale: String,
    pub open_defects: usize,
}
