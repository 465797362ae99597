use crate::cli::ServeArgs;
use crate::infra::{seed_registries, AppState};
use crate::routes::with_shortlist_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use crewmatch::config::AppConfig;
use crewmatch::error::AppError;
use crewmatch::telemetry;
use crewmatch::workflows::shortlist::{InMemoryShortlistRepository, ShortlistService};
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

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let (jobs, workers) = seed_registries(&config.roster)?;
    let service = Arc::new(ShortlistService::new(
        Arc::new(jobs),
        Arc::new(workers),
        Arc::new(InMemoryShortlistRepository::default()),
        config.matching.clone(),
    ));

    let app = with_shortlist_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        include_inactive = config.matching.include_inactive_workers,
        "shortlist service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
