//! Visit-report workflow: normalized intake, engine-backed assessment, and
//! rendering for PDF/email/sheet consumers.

pub mod domain;
pub mod record;
pub mod report;
pub mod repository;
mod router;
pub mod service;

pub use domain::{
    ChecklistEntry, ChecklistStatus, CustomerInterview, Principal, UserRole, VisitKind,
    VisitReportId, VisitStatus,
};
pub use record::{NormalizeError, VisitAssessment, VisitReport, VisitSubmission};
pub use repository::{
    Notification, NotificationError, NotificationPublisher, RepositoryError, VisitReportRepository,
    VisitStatusView,
};
pub use router::visit_router;
pub use service::{VisitReportService, VisitServiceError};
