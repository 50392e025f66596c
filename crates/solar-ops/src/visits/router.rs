use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{Principal, VisitReportId};
use super::repository::{NotificationPublisher, VisitReportRepository};
use super::service::{VisitReportService, VisitServiceError};
use crate::visits::repository::RepositoryError;

/// Router builder exposing HTTP endpoints for visit intake and assessment.
pub fn visit_router<R, N>(service: Arc<VisitReportService<R, N>>) -> Router
where
    R: VisitReportRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/visits", post(submit_handler::<R, N>))
        .route("/api/v1/visits/:visit_id", get(status_handler::<R, N>))
        .route(
            "/api/v1/visits/:visit_id/assessment",
            post(assess_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<VisitReportService<R, N>>>,
    axum::Json(payload): axum::Json<serde_json::Value>,
) -> Response
where
    R: VisitReportRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.submit(payload) {
        Ok(report) => {
            let view = report.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<VisitReportService<R, N>>>,
    Path(visit_id): Path<String>,
) -> Response
where
    R: VisitReportRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = VisitReportId(visit_id);
    match service.get(&id) {
        Ok(report) => {
            let view = report.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn assess_handler<R, N>(
    State(service): State<Arc<VisitReportService<R, N>>>,
    Path(visit_id): Path<String>,
    axum::Json(principal): axum::Json<Principal>,
) -> Response
where
    R: VisitReportRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = VisitReportId(visit_id);
    match service.assess(&principal, &id) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: VisitServiceError) -> Response {
    let status = match &err {
        VisitServiceError::Normalize(_)
        | VisitServiceError::Calculation(_)
        | VisitServiceError::RoleNotPermitted { .. }
        | VisitServiceError::NothingToAssess(_) => StatusCode::UNPROCESSABLE_ENTITY,
        VisitServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        VisitServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        VisitServiceError::Repository(RepositoryError::Unavailable(_))
        | VisitServiceError::Notification(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
