//! Compensation market domain: entities and invariants, tier policy,
//! synthetic data generation, query resolution, and aggregation.

pub mod domain;
pub mod generator;
pub mod import;
pub mod memory;
pub mod query;
pub mod repository;
pub mod router;
pub mod service;
pub mod stats;
pub mod tiers;

#[cfg(test)]
mod tests;

pub use domain::{
    Company, CompanyId, CompensationRecord, Level, Location, LocationId, NewCompany, NewLocation,
    NewRole, RecordId, RecordSubmission, Role, RoleId, ValidationError,
};
pub use generator::{
    GenerationSummary, GeneratorConfig, GeneratorError, SeedCatalog, SeedSummary,
    SyntheticGenerator,
};
pub use import::{import_observations, ImportError, ImportSummary};
pub use memory::InMemoryMarketRepository;
pub use query::{
    CompensationView, EntityIndex, PageRequest, QueryViolation, RecordFilter, SearchResults,
    DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
pub use repository::{EntityKind, MarketRepository, RepositoryError};
pub use router::market_router;
pub use service::{EntityPopulation, MarketError, MarketService, PopulationCounts};
pub use stats::{LocationAverage, SummaryStats};
pub use tiers::{
    CompanyTier, FractionRange, PayBand, PayMix, TierClassifier, TierProfile, TierTable,
    TierTableError,
};
