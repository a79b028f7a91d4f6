use std::sync::Arc;

use serde::Serialize;

use super::domain::{
    Company, CompensationRecord, Level, Location, NewCompany, NewLocation, NewRole,
    RecordSubmission, Role, ValidationError,
};
use super::generator::{
    GenerationSummary, GeneratorConfig, GeneratorError, SeedCatalog, SeedSummary,
    SyntheticGenerator,
};
use super::query::{
    contains_ci, EntityIndex, PageRequest, QueryViolation, RecordFilter, SearchResults,
};
use super::repository::{EntityKind, MarketRepository, RepositoryError};
use super::stats::{LocationAverage, SummaryStats};
use super::tiers::{TierClassifier, TierProfile, TierTable};

/// Facade composing the store, tier policy, and generator behind the
/// operation contracts the request-handling layer consumes.
pub struct MarketService<R> {
    repository: Arc<R>,
    classifier: Arc<TierClassifier>,
    generator_config: GeneratorConfig,
}

impl<R> MarketService<R>
where
    R: MarketRepository + 'static,
{
    pub fn new(repository: Arc<R>, table: TierTable, generator_config: GeneratorConfig) -> Self {
        Self {
            repository,
            classifier: Arc::new(TierClassifier::new(table)),
            generator_config,
        }
    }

    pub fn classifier(&self) -> &TierClassifier {
        &self.classifier
    }

    pub fn classify_tier(&self, company: &str, level: Level) -> TierProfile {
        self.classifier.classify(company, level)
    }

    pub fn create_company(&self, submission: NewCompany) -> Result<Company, MarketError> {
        submission.validate()?;
        Ok(self.repository.insert_company(submission)?)
    }

    pub fn create_role(&self, submission: NewRole) -> Result<Role, MarketError> {
        submission.validate()?;
        Ok(self.repository.insert_role(submission)?)
    }

    pub fn create_location(&self, submission: NewLocation) -> Result<Location, MarketError> {
        submission.validate()?;
        Ok(self.repository.insert_location(submission)?)
    }

    /// Persist one observation after checking the pay identity and
    /// experience ordering. References are verified by the store.
    pub fn submit_record(
        &self,
        submission: RecordSubmission,
    ) -> Result<CompensationRecord, MarketError> {
        submission.validate()?;
        Ok(self.repository.insert_record(submission)?)
    }

    /// Seed the entity catalog, then leave generation to `generate`.
    pub fn seed(&self, catalog: &SeedCatalog) -> Result<SeedSummary, MarketError> {
        Ok(self.build_generator().seed(catalog)?)
    }

    pub fn generate(&self, count: usize) -> Result<GenerationSummary, MarketError> {
        Ok(self.build_generator().generate(count)?)
    }

    /// Resolve the filter, then page through the matches in ascending-id
    /// order. The total reflects the whole match set, not the page.
    pub fn search(
        &self,
        filter: &RecordFilter,
        page: PageRequest,
    ) -> Result<SearchResults, MarketError> {
        let (index, matching) = self.filtered(filter)?;
        let total = matching.len();

        let results = matching
            .iter()
            .skip(page.offset())
            .take(page.limit())
            .filter_map(|record| index.view(record))
            .collect();

        Ok(SearchResults {
            total,
            limit: page.limit(),
            offset: page.offset(),
            results,
        })
    }

    /// Summary statistics over the full filtered population, no pagination.
    pub fn aggregate(&self, filter: &RecordFilter) -> Result<SummaryStats, MarketError> {
        let (_, matching) = self.filtered(filter)?;
        let totals = matching
            .iter()
            .map(|record| record.total_compensation)
            .collect();
        SummaryStats::from_totals(totals).ok_or(MarketError::NoDataAvailable)
    }

    /// Mean total compensation for the first location whose city matches the
    /// query, case-insensitively.
    pub fn location_average(&self, city: &str) -> Result<LocationAverage, MarketError> {
        let locations = self.repository.locations()?;
        let location = locations
            .iter()
            .find(|row| contains_ci(&row.city, city))
            .ok_or(MarketError::NoDataAvailable)?;

        let records = self.repository.records()?;
        let totals: Vec<u64> = records
            .iter()
            .filter(|record| record.location_id == location.id)
            .map(|record| record.total_compensation)
            .collect();

        if totals.is_empty() {
            return Err(MarketError::NoDataAvailable);
        }

        let count = totals.len();
        let sum: u128 = totals.iter().map(|total| *total as u128).sum();

        Ok(LocationAverage {
            location: format!("{}, {}", location.city, location.state),
            count,
            average: sum as f64 / count as f64,
        })
    }

    /// Destructive reset primitive for reseed workflows.
    pub fn reset_records(&self) -> Result<usize, MarketError> {
        Ok(self.repository.delete_all_records()?)
    }

    /// Entity tables as one read, for tooling that resolves names to ids.
    pub fn snapshot(&self) -> Result<EntityPopulation, MarketError> {
        Ok(EntityPopulation {
            companies: self.repository.companies()?,
            roles: self.repository.roles()?,
            locations: self.repository.locations()?,
        })
    }

    pub fn population(&self) -> Result<PopulationCounts, MarketError> {
        Ok(PopulationCounts {
            companies: self.repository.companies()?.len(),
            roles: self.repository.roles()?.len(),
            locations: self.repository.locations()?.len(),
            records: self.repository.records()?.len(),
        })
    }

    fn build_generator(&self) -> SyntheticGenerator<R> {
        SyntheticGenerator::new(
            self.repository.clone(),
            self.classifier.clone(),
            self.generator_config.clone(),
        )
    }

    /// One join-fetch per query: load the entity tables once, then stream
    /// the records through the filter.
    fn filtered(
        &self,
        filter: &RecordFilter,
    ) -> Result<(EntityIndex, Vec<CompensationRecord>), MarketError> {
        let index = EntityIndex::build(
            self.repository.companies()?,
            self.repository.roles()?,
            self.repository.locations()?,
        );
        let matching = self
            .repository
            .records()?
            .into_iter()
            .filter(|record| filter.matches(record, &index))
            .collect();
        Ok((index, matching))
    }
}

/// The three entity tables read together.
#[derive(Debug, Clone)]
pub struct EntityPopulation {
    pub companies: Vec<Company>,
    pub roles: Vec<Role>,
    pub locations: Vec<Location>,
}

/// Entity-population sizes, used by maintenance tooling and demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopulationCounts {
    pub companies: usize,
    pub roles: usize,
    pub locations: usize,
    pub records: usize,
}

/// Error raised by the market service.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("referenced {kind} {id} does not exist")]
    Referential { kind: EntityKind, id: u64 },
    #[error("{kind} already exists")]
    DuplicateEntity { kind: EntityKind },
    #[error("company, role, and location populations must be seeded before generating records")]
    EmptyPopulation,
    #[error(transparent)]
    InvalidQuery(#[from] QueryViolation),
    #[error("no records match the requested criteria")]
    NoDataAvailable,
    #[error("store error: {0}")]
    Store(RepositoryError),
}

impl From<RepositoryError> for MarketError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Duplicate { kind } => Self::DuplicateEntity { kind },
            RepositoryError::MissingReference { kind, id } => Self::Referential { kind, id },
            other => Self::Store(other),
        }
    }
}

impl From<GeneratorError> for MarketError {
    fn from(value: GeneratorError) -> Self {
        match value {
            GeneratorError::EmptyPopulation => Self::EmptyPopulation,
            GeneratorError::Store(error) => error.into(),
        }
    }
}
