use super::views::{AssessmentView, ChecklistItemView, ChecklistProgressEntry, VisitReportSummary};
use crate::visits::domain::ChecklistStatus;
use crate::visits::record::{VisitAssessment, VisitReport};

impl VisitReport {
    pub fn summary(&self) -> VisitReportSummary {
        let checklist_progress = ChecklistStatus::ordered()
            .into_iter()
            .filter_map(|status| {
                let count = self
                    .checklist
                    .iter()
                    .filter(|entry| entry.status == status)
                    .count();
                (count > 0).then_some(ChecklistProgressEntry {
                    status,
                    status_label: status.label(),
                    count,
                })
            })
            .collect();

        let defects = self
            .open_defects()
            .map(|entry| ChecklistItemView {
                key: entry.key.clone(),
                label: entry.label.clone(),
                status_label: entry.status.label(),
                note: entry.note.clone(),
            })
            .collect();

        VisitReportSummary {
            visit_id: self.id.clone(),
            customer_name: self.customer_name.clone(),
            customer_address: self.customer_address.clone(),
            visit_date: self.visit_date,
            kind_label: self.kind.label(),
            technician_email: self.submitted_by.email.clone(),
            status_label: self.status.label(),
            checklist_progress,
            defects,
            assessment: self.assessment.as_ref().map(assessment_view),
        }
    }
}

fn assessment_view(assessment: &VisitAssessment) -> AssessmentView {
    let mut view = AssessmentView::default();

    if let Some(auto) = &assessment.autoconsumption {
        view.pct_self_consumed = Some(auto.pct_self_consumed);
        view.self_consumption_label = Some(auto.level_label);
        view.recommendation = Some(auto.recommendation);
    }

    if let Some(sizing) = &assessment.sizing {
        view.panel_count = Some(sizing.panel_count);
        view.panel_watts = Some(sizing.panel_watts);
        view.installed_kw = Some(sizing.installed_kw);
        view.annual_yield_kwh = Some(sizing.annual_yield_kwh);
        view.annual_savings = Some(sizing.annual_savings);
        view.payback_year = sizing.payback_year;
    }

    if let Some(roi) = &assessment.roi {
        view.roi_pct = Some(roi.roi_pct);
        view.total_profit = Some(roi.total_profit);
        // The cash-flow projection is the authority on payback when both ran.
        if roi.payback_year.is_some() {
            view.payback_year = roi.payback_year;
        }
    }

    view
}
