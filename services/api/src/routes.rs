use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use solar_ops::calculators::{
    estimate_size, evaluate, project_roi, AutoconsumptionResult, EnergyReading, RoiInput,
    RoiProjection, SizingInput, SizingResult,
};
use solar_ops::error::AppError;
use solar_ops::visits::{
    visit_router, NotificationPublisher, VisitReportRepository, VisitReportService,
};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct AutoconsumptionRequest {
    pub(crate) production_kwh: f64,
    pub(crate) exported_kwh: f64,
    #[serde(default)]
    pub(crate) total_consumption_kwh: Option<f64>,
}

pub(crate) fn with_visit_routes<R, N>(
    service: Arc<VisitReportService<R, N>>,
) -> axum::Router
where
    R: VisitReportRepository + 'static,
    N: NotificationPublisher + 'static,
{
    visit_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/calculators/autoconsumption",
            axum::routing::post(autoconsumption_endpoint),
        )
        .route(
            "/api/v1/calculators/sizing",
            axum::routing::post(sizing_endpoint),
        )
        .route(
            "/api/v1/calculators/roi",
            axum::routing::post(roi_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn autoconsumption_endpoint(
    Json(payload): Json<AutoconsumptionRequest>,
) -> Result<Json<AutoconsumptionResult>, AppError> {
    // Same normalization the visit-record path applies on ingest: export is
    // capped at production so percentage shares stay within [0, 100].
    let reading = EnergyReading {
        annual_production_kwh: payload.production_kwh,
        exported_kwh: payload.exported_kwh,
        imported_kwh: 0.0,
    }
    .clamped();

    let result = evaluate(
        reading.annual_production_kwh,
        reading.exported_kwh,
        payload.total_consumption_kwh,
    )?;
    Ok(Json(result))
}

pub(crate) async fn sizing_endpoint(
    Json(payload): Json<SizingInput>,
) -> Result<Json<SizingResult>, AppError> {
    let result = estimate_size(&payload)?;
    Ok(Json(result))
}

pub(crate) async fn roi_endpoint(
    Json(payload): Json<RoiInput>,
) -> Result<Json<RoiProjection>, AppError> {
    let projection = project_roi(&payload)?;
    Ok(Json(projection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use solar_ops::calculators::{RoofOrientation, SelfConsumptionLevel};

    #[tokio::test]
    async fn autoconsumption_endpoint_returns_split() {
        let request = AutoconsumptionRequest {
            production_kwh: 8500.0,
            exported_kwh: 5200.0,
            total_consumption_kwh: None,
        };

        let Json(body) = autoconsumption_endpoint(Json(request))
            .await
            .expect("valid inputs");

        assert_eq!(body.self_consumed_kwh, 3300.0);
        assert_eq!(body.pct_self_consumed, 38.8);
        assert_eq!(body.level, SelfConsumptionLevel::Medium);
        assert!(body.coverage.is_none());
    }

    #[tokio::test]
    async fn autoconsumption_endpoint_caps_export_at_production() {
        let request = AutoconsumptionRequest {
            production_kwh: 4000.0,
            exported_kwh: 4800.0,
            total_consumption_kwh: None,
        };

        let Json(body) = autoconsumption_endpoint(Json(request))
            .await
            .expect("valid inputs");

        assert_eq!(body.pct_exported, 100.0);
        assert_eq!(body.pct_self_consumed, 0.0);
        assert_eq!(body.self_consumed_kwh, 0.0);
    }

    #[tokio::test]
    async fn sizing_endpoint_recommends_a_layout() {
        let request = SizingInput {
            annual_consumption_kwh: 5000.0,
            orientation: RoofOrientation::South,
            energy_price_gross: 1.50,
            production_factor_pct: None,
            install_cost: None,
        };

        let Json(body) = sizing_endpoint(Json(request)).await.expect("valid inputs");

        assert_eq!(body.panel_count, 13);
        assert_eq!(body.panel_watts, 480);
        assert_eq!(body.annual_savings, 6552.0);
    }

    #[tokio::test]
    async fn roi_endpoint_projects_the_full_horizon() {
        let request = RoiInput {
            install_cost: 35000.0,
            annual_production_kwh: 8500.0,
            energy_price_gross: 1.50,
            maintenance_cost_per_year: 200.0,
            price_inflation_pct: 5.0,
            panel_degradation_pct: 0.5,
        };

        let Json(body) = roi_endpoint(Json(request)).await.expect("valid inputs");

        assert_eq!(body.years.len(), 25);
        assert_eq!(body.years[0].net_savings, 8725.0);
        assert!(body.payback_year.is_some());
    }

    #[tokio::test]
    async fn roi_endpoint_rejects_a_zero_quote() {
        let request = RoiInput {
            install_cost: 0.0,
            annual_production_kwh: 8500.0,
            energy_price_gross: 1.50,
            maintenance_cost_per_year: 200.0,
            price_inflation_pct: 5.0,
            panel_degradation_pct: 0.5,
        };

        let result = roi_endpoint(Json(request)).await;
        assert!(matches!(result, Err(AppError::Calculation(_))));
    }
}
