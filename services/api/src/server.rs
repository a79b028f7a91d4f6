use crate::cli::ServeArgs;
use crate::infra::{build_market_service, AppState};
use crate::routes::with_market_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use techsalary::config::AppConfig;
use techsalary::error::AppError;
use techsalary::market::SeedCatalog;
use techsalary::telemetry;
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

    let market_service = build_market_service(&config);

    if let Some(count) = args.seed_records {
        let seeded = market_service.seed(&SeedCatalog::indian_tech())?;
        let generated = market_service.generate(count)?;
        info!(
            companies = seeded.companies,
            roles = seeded.roles,
            locations = seeded.locations,
            records = generated.inserted,
            "seeded market data before serving"
        );
    }

    let app = with_market_routes(market_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "compensation data service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
