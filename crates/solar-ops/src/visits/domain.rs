use crate::calculators::sizing::RoofOrientation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitReportId(pub String);

impl std::fmt::Display for VisitReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Technician,
    SalesRep,
    Manager,
    Admin,
}

impl UserRole {
    pub const fn ordered() -> [Self; 4] {
        [Self::Technician, Self::SalesRep, Self::Manager, Self::Admin]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Technician => "Technician",
            Self::SalesRep => "Sales Representative",
            Self::Manager => "Manager",
            Self::Admin => "Administrator",
        }
    }

    /// Field staff file visit reports; back-office roles do not.
    pub const fn can_submit_visits(self) -> bool {
        matches!(self, Self::Technician | Self::SalesRep)
    }

    /// Running an assessment commits figures customers will see, so it is
    /// reserved for reviewing roles.
    pub const fn can_assess(self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }
}

/// Caller identity threaded explicitly through every service call; there is no
/// ambient session state to consult.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitKind {
    Installation,
    Maintenance,
    SalesConsultation,
}

impl VisitKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Installation => "Installation",
            Self::Maintenance => "Maintenance",
            Self::SalesConsultation => "Sales Consultation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistStatus {
    Passed,
    Defect,
    NotApplicable,
    Pending,
}

impl ChecklistStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Passed, Self::Defect, Self::NotApplicable, Self::Pending]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Defect => "Defect",
            Self::NotApplicable => "Not Applicable",
            Self::Pending => "Pending",
        }
    }
}

/// One inspected item on the technician's checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub key: String,
    pub label: String,
    pub status: ChecklistStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Figures collected while talking to the customer. Everything is optional;
/// the assessment works with whatever was captured and falls back to the
/// configured engine defaults for the rest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomerInterview {
    #[serde(default)]
    pub annual_consumption_kwh: Option<f64>,
    #[serde(default)]
    pub energy_price_gross: Option<f64>,
    #[serde(default)]
    pub roof_orientation: Option<RoofOrientation>,
    #[serde(default)]
    pub quoted_install_cost: Option<f64>,
    #[serde(default)]
    pub interested_in_storage: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    Draft,
    Submitted,
    Assessed,
    Delivered,
}

impl VisitStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::Assessed => "Assessed",
            Self::Delivered => "Delivered",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_policy_separates_field_and_back_office() {
        assert!(UserRole::Technician.can_submit_visits());
        assert!(UserRole::SalesRep.can_submit_visits());
        assert!(!UserRole::Manager.can_submit_visits());

        assert!(UserRole::Manager.can_assess());
        assert!(UserRole::Admin.can_assess());
        assert!(!UserRole::Technician.can_assess());
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(UserRole::SalesRep.label(), "Sales Representative");
        assert_eq!(ChecklistStatus::NotApplicable.label(), "Not Applicable");
        assert_eq!(VisitKind::SalesConsultation.label(), "Sales Consultation");
        assert_eq!(VisitStatus::Assessed.label(), "Assessed");
    }
}
