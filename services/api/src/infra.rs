use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use techsalary::config::AppConfig;
use techsalary::market::{
    GeneratorConfig, InMemoryMarketRepository, MarketService, TierTable,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type ApiMarketService = MarketService<InMemoryMarketRepository>;

/// Assemble the market service against the in-memory reference store with
/// the canonical tier table.
pub(crate) fn build_market_service(config: &AppConfig) -> Arc<ApiMarketService> {
    let repository = Arc::new(InMemoryMarketRepository::new());
    Arc::new(MarketService::new(
        repository,
        TierTable::indian_tech_2024(),
        GeneratorConfig {
            batch_size: config.generator.batch_size,
            ..GeneratorConfig::default()
        },
    ))
}
