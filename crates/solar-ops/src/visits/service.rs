use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use std::collections::BTreeMap;

use super::domain::{Principal, VisitReportId, VisitStatus};
use super::record::{NormalizeError, VisitAssessment, VisitReport, VisitSubmission};
use super::repository::{
    Notification, NotificationError, NotificationPublisher, RepositoryError, VisitReportRepository,
};
use crate::calculators::sizing::RoofOrientation;
use crate::calculators::{self, InvalidInput, RoiInput, SizingInput};
use crate::config::EngineDefaults;
use serde_json::Value;
use tracing::info;

static VISIT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_visit_id() -> VisitReportId {
    let id = VISIT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    VisitReportId(format!("visit-{id:06}"))
}

/// Service composing the normalization boundary, the repository, and the
/// calculation engine.
pub struct VisitReportService<R, N> {
    repository: Arc<R>,
    notifications: Arc<N>,
    defaults: EngineDefaults,
}

impl<R, N> VisitReportService<R, N>
where
    R: VisitReportRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>, defaults: EngineDefaults) -> Self {
        Self {
            repository,
            notifications,
            defaults,
        }
    }

    /// Normalize and store an incoming visit payload, returning the stored
    /// record. Only field roles may submit.
    pub fn submit(&self, payload: Value) -> Result<VisitReport, VisitServiceError> {
        let submission = VisitSubmission::from_value(payload)?;

        if !submission.submitted_by.role.can_submit_visits() {
            return Err(VisitServiceError::RoleNotPermitted {
                email: submission.submitted_by.email.clone(),
                role: submission.submitted_by.role.label(),
                action: "submit visit reports",
            });
        }

        let report = VisitReport::from_submission(next_visit_id(), submission);
        let stored = self.repository.insert(report)?;
        info!(visit_id = %stored.id, status = stored.status.label(), "visit report stored");
        Ok(stored)
    }

    /// Run the calculation engine over a stored visit and persist the outcome.
    /// Reserved for reviewing roles; notifies the submitting technician.
    pub fn assess(
        &self,
        principal: &Principal,
        visit_id: &VisitReportId,
    ) -> Result<VisitAssessment, VisitServiceError> {
        if !principal.role.can_assess() {
            return Err(VisitServiceError::RoleNotPermitted {
                email: principal.email.clone(),
                role: principal.role.label(),
                action: "assess visit reports",
            });
        }

        let mut report = self
            .repository
            .fetch(visit_id)?
            .ok_or(RepositoryError::NotFound)?;

        let assessment = self.build_assessment(&report)?;

        report.status = VisitStatus::Assessed;
        report.assessment = Some(assessment.clone());
        let rationale = report.assessment_rationale();
        self.repository.update(report.clone())?;

        let mut details = BTreeMap::new();
        details.insert("summary".to_string(), rationale);
        self.notifications.publish(Notification {
            template: "visit_assessed".to_string(),
            recipient: report.submitted_by.email.clone(),
            visit_id: visit_id.clone(),
            details,
        })?;

        info!(visit_id = %visit_id, assessor = %principal.email, "visit report assessed");
        Ok(assessment)
    }

    /// Fetch a visit report for API responses.
    pub fn get(&self, visit_id: &VisitReportId) -> Result<VisitReport, VisitServiceError> {
        let report = self
            .repository
            .fetch(visit_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(report)
    }

    /// Every calculator that has enough data runs; a visit with neither a
    /// meter reading nor interview figures has nothing to assess.
    fn build_assessment(&self, report: &VisitReport) -> Result<VisitAssessment, VisitServiceError> {
        let autoconsumption = match &report.reading {
            Some(reading) if reading.annual_production_kwh > 0.0 => Some(calculators::evaluate(
                reading.annual_production_kwh,
                reading.exported_kwh,
                Some(reading.implied_consumption_kwh()),
            )?),
            // Fresh installs have no production year yet.
            _ => None,
        };

        let interview = &report.interview;
        let energy_price = interview
            .energy_price_gross
            .filter(|price| *price > 0.0)
            .unwrap_or(self.defaults.energy_price_gross);

        let sizing = match interview.annual_consumption_kwh.filter(|kwh| *kwh > 0.0) {
            Some(annual_consumption_kwh) => Some(calculators::estimate_size(&SizingInput {
                annual_consumption_kwh,
                orientation: interview.roof_orientation.unwrap_or(RoofOrientation::South),
                energy_price_gross: energy_price,
                production_factor_pct: None,
                install_cost: interview.quoted_install_cost.filter(|cost| *cost > 0.0),
            })?),
            None => None,
        };

        let roi = match interview.quoted_install_cost.filter(|cost| *cost > 0.0) {
            Some(install_cost) => {
                let annual_production_kwh = report
                    .reading
                    .map(|reading| reading.annual_production_kwh)
                    .filter(|kwh| *kwh > 0.0)
                    .or_else(|| sizing.as_ref().map(|result| result.annual_yield_kwh));

                match annual_production_kwh {
                    Some(annual_production_kwh) => Some(calculators::project_roi(&RoiInput {
                        install_cost,
                        annual_production_kwh,
                        energy_price_gross: energy_price,
                        maintenance_cost_per_year: self.defaults.maintenance_cost_per_year,
                        price_inflation_pct: self.defaults.price_inflation_pct,
                        panel_degradation_pct: self.defaults.panel_degradation_pct,
                    })?),
                    None => None,
                }
            }
            None => None,
        };

        if autoconsumption.is_none() && sizing.is_none() && roi.is_none() {
            return Err(VisitServiceError::NothingToAssess(report.id.clone()));
        }

        Ok(VisitAssessment {
            autoconsumption,
            sizing,
            roi,
        })
    }
}

/// Error raised by the visit-report service.
#[derive(Debug, thiserror::Error)]
pub enum VisitServiceError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Calculation(#[from] InvalidInput),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error("{email} ({role}) is not permitted to {action}")]
    RoleNotPermitted {
        email: String,
        role: &'static str,
        action: &'static str,
    },
    #[error("visit {0} has neither a meter reading nor interview figures to assess")]
    NothingToAssess(VisitReportId),
}
