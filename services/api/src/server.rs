use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryNotificationPublisher, InMemoryVisitReportRepository};
use crate::routes::with_visit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use solar_ops::config::AppConfig;
use solar_ops::error::AppError;
use solar_ops::telemetry;
use solar_ops::visits::VisitReportService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryVisitReportRepository::default());
    let notifications = Arc::new(InMemoryNotificationPublisher::default());
    let visit_service = Arc::new(VisitReportService::new(
        repository,
        notifications,
        config.engine.clone(),
    ));

    let app = with_visit_routes(visit_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "solar field-operations service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
