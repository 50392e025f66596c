//! The normalized visit-report record and the boundary migration that produces
//! it.
//!
//! Client payloads arrive in several historical shapes: bare objects, `data`
//! envelopes from the old entity store, camelCase keys, and numbers encoded as
//! strings. All of them are migrated into one normalized record here, once, so
//! the rest of the crate never has to do defensive field lookups.

use super::domain::{
    ChecklistEntry, ChecklistStatus, CustomerInterview, Principal, VisitKind, VisitReportId,
    VisitStatus,
};
use crate::calculators::{AutoconsumptionResult, EnergyReading, RoiProjection, SizingResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Field names whose values are coerced from numeric strings during
/// migration.
const NUMERIC_FIELDS: &[&str] = &[
    "annual_production_kwh",
    "exported_kwh",
    "imported_kwh",
    "annual_consumption_kwh",
    "energy_price_gross",
    "quoted_install_cost",
];

/// Envelope keys the legacy data wrappers used around the actual record.
const ENVELOPE_KEYS: &[&str] = &["data", "report", "attributes"];

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("visit payload must be a JSON object")]
    NotAnObject,
    #[error("visit payload does not match the record schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// What a technician submits from the field; identity and status are assigned
/// by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitSubmission {
    pub customer_name: String,
    pub customer_address: String,
    pub visit_date: NaiveDate,
    pub kind: VisitKind,
    pub submitted_by: Principal,
    #[serde(default)]
    pub checklist: Vec<ChecklistEntry>,
    #[serde(default)]
    pub interview: CustomerInterview,
    #[serde(default)]
    pub reading: Option<EnergyReading>,
}

impl VisitSubmission {
    /// Migrates any of the accepted payload shapes into a normalized
    /// submission. Meter readings are clamped on the way in so the
    /// export-below-production invariant holds for every stored record.
    pub fn from_value(value: Value) -> Result<Self, NormalizeError> {
        let value = unwrap_envelope(value)?;
        let mut submission: Self = serde_json::from_value(migrate(value))?;
        submission.reading = submission.reading.map(EnergyReading::clamped);
        Ok(submission)
    }
}

/// Results the calculation engine produced for one visit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitAssessment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoconsumption: Option<AutoconsumptionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizing: Option<SizingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi: Option<RoiProjection>,
}

/// The single normalized visit-report record everything downstream reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitReport {
    pub id: VisitReportId,
    pub customer_name: String,
    pub customer_address: String,
    pub visit_date: NaiveDate,
    pub kind: VisitKind,
    pub submitted_by: Principal,
    pub checklist: Vec<ChecklistEntry>,
    pub interview: CustomerInterview,
    pub reading: Option<EnergyReading>,
    pub status: VisitStatus,
    pub assessment: Option<VisitAssessment>,
}

impl VisitReport {
    pub fn from_submission(id: VisitReportId, submission: VisitSubmission) -> Self {
        let status = if submission
            .checklist
            .iter()
            .any(|entry| entry.status == ChecklistStatus::Pending)
        {
            VisitStatus::Draft
        } else {
            VisitStatus::Submitted
        };

        Self {
            id,
            customer_name: submission.customer_name,
            customer_address: submission.customer_address,
            visit_date: submission.visit_date,
            kind: submission.kind,
            submitted_by: submission.submitted_by,
            checklist: submission.checklist,
            interview: submission.interview,
            reading: submission.reading,
            status,
            assessment: None,
        }
    }

    pub fn open_defects(&self) -> impl Iterator<Item = &ChecklistEntry> {
        self.checklist
            .iter()
            .filter(|entry| entry.status == ChecklistStatus::Defect)
    }
}

fn unwrap_envelope(mut value: Value) -> Result<Value, NormalizeError> {
    // Bounded: old clients never nested wrappers more than a couple deep.
    for _ in 0..4 {
        let Value::Object(mut map) = value else {
            return Err(NormalizeError::NotAnObject);
        };

        let wrapped = ENVELOPE_KEYS
            .iter()
            .find(|key| matches!(map.get(**key), Some(Value::Object(_))))
            .copied();

        match wrapped {
            Some(key) => value = map.remove(key).unwrap_or(Value::Null),
            None => return Ok(Value::Object(map)),
        }
    }
    Ok(value)
}

fn migrate(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let migrated: Map<String, Value> = map
                .into_iter()
                .map(|(key, inner)| {
                    let key = snake_case(&key);
                    let inner = migrate(inner);
                    let inner = if NUMERIC_FIELDS.contains(&key.as_str()) {
                        coerce_number(inner)
                    } else {
                        inner
                    };
                    (key, inner)
                })
                .collect();
            Value::Object(migrated)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(migrate).collect()),
        other => other,
    }
}

fn snake_case(key: &str) -> String {
    let mut result = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            result.push(ch.to_ascii_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

fn coerce_number(value: Value) -> Value {
    match value {
        Value::String(raw) => {
            let trimmed = raw.trim().replace(',', ".");
            if trimmed.is_empty() {
                return Value::Null;
            }
            match trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
                Some(number) => Value::Number(number),
                None => Value::String(raw),
            }
        }
        other => other,
    }
}
