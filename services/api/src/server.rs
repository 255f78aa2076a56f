use crate::cli::ServeArgs;
use crate::infra::{shutdown_signal, AppState};
use crate::routes::with_checkin_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use kidcheck::accounts::AccountDirectory;
use kidcheck::config::AppConfig;
use kidcheck::error::AppError;
use kidcheck::requests::RequestLedger;
use kidcheck::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(public_dir) = args.public_dir.take() {
        config.server.public_dir = public_dir;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        public_dir: Arc::new(config.server.public_dir.clone()),
    };

    let directory = Arc::new(AccountDirectory::new());
    let ledger = Arc::new(RequestLedger::new());

    let app = with_checkin_routes(directory, ledger)
        .layer(Extension(app_state))
        .layer(CorsLayer::permissive())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        public_dir = %config.server.public_dir.display(),
        "kidcheck service ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("kidcheck service stopped");
    Ok(())
}
