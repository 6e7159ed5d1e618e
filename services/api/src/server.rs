use crate::cli::ServeArgs;
use crate::infra::{load_reference_table, AppState};
use crate::routes::{screening_router, with_operational_routes};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use vaccine_checker::config::AppConfig;
use vaccine_checker::error::AppError;
use vaccine_checker::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(table) = args.table.take() {
        config.reference_table.path = Some(table);
    }

    telemetry::init(&config.telemetry)?;

    let table = Arc::new(load_reference_table(
        config.reference_table.path.as_deref(),
    )?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_operational_routes(screening_router(table.clone()))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        vaccines = table.len(),
        "vaccine checker ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
