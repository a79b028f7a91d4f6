pub mod catalog;

pub use catalog::SeedCatalog;

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tracing::info;

use super::domain::{
    Company, Level, Location, NewCompany, NewLocation, NewRole, RecordSubmission, Role,
};
use super::repository::{MarketRepository, RepositoryError};
use super::tiers::TierClassifier;

/// Tunables for a generation run. Batch size shapes commit granularity, not
/// correctness.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub batch_size: usize,
    pub tenure_cap: u8,
    pub remote_share: f64,
    pub source_tag: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            tenure_cap: 4,
            remote_share: 0.2,
            source_tag: "synthetic_indian_market".to_string(),
        }
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub requested: usize,
    pub inserted: usize,
    pub batches: usize,
}

/// Outcome of a catalog seeding pass; counts only newly created entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub companies: usize,
    pub roles: usize,
    pub locations: usize,
}

/// Failure modes of the generator.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("company, role, and location populations must be seeded before generating records")]
    EmptyPopulation,
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

/// Produces internally consistent compensation observations across the
/// existing entity populations. Stochastic by design; every emitted record
/// still satisfies the pay identity and experience ordering. Running it
/// twice appends; callers wanting a clean slate delete records first.
pub struct SyntheticGenerator<R> {
    repository: Arc<R>,
    classifier: Arc<TierClassifier>,
    config: GeneratorConfig,
}

impl<R> SyntheticGenerator<R>
where
    R: MarketRepository,
{
    pub fn new(repository: Arc<R>, classifier: Arc<TierClassifier>, config: GeneratorConfig) -> Self {
        Self {
            repository,
            classifier,
            config,
        }
    }

    /// Ensure every catalog entry exists, first reference winning: entities
    /// already present are left untouched.
    pub fn seed(&self, catalog: &SeedCatalog) -> Result<SeedSummary, GeneratorError> {
        let mut rng = rand::thread_rng();
        let mut summary = SeedSummary::default();

        for seed in &catalog.companies {
            let created = self.repository.insert_company(NewCompany {
                name: seed.name.to_string(),
                industry: Some(seed.industry.to_string()),
                size: Some(seed.size.to_string()),
                headquarters: Some(seed.headquarters.to_string()),
                website: Some(format!(
                    "www.{}.com",
                    seed.name.to_lowercase().replace(' ', "")
                )),
            });
            summary.companies += absorb_duplicate(created)?;
        }

        for seed in &catalog.roles {
            let created = self.repository.insert_role(NewRole {
                title: seed.title.to_string(),
                category: Some(seed.category.to_string()),
                level: Some(seed.level),
            });
            summary.roles += absorb_duplicate(created)?;
        }

        for seed in &catalog.cities {
            let created = self.repository.insert_location(NewLocation {
                city: seed.city.to_string(),
                state: seed.state.to_string(),
                country: None,
                cost_of_living_index: Some(rng.gen_range(50.0..=70.0)),
            });
            summary.locations += absorb_duplicate(created)?;
        }

        info!(
            companies = summary.companies,
            roles = summary.roles,
            locations = summary.locations,
            "seeded entity catalog"
        );

        Ok(summary)
    }

    /// Generate `count` observations, committing in atomic batches. A failed
    /// batch leaves the previously committed prefix in place.
    pub fn generate(&self, count: usize) -> Result<GenerationSummary, GeneratorError> {
        let companies = self.repository.companies()?;
        let roles = self.repository.roles()?;
        let locations = self.repository.locations()?;

        if companies.is_empty() || roles.is_empty() || locations.is_empty() {
            return Err(GeneratorError::EmptyPopulation);
        }

        let batch_size = self.config.batch_size.max(1);
        let mut rng = rand::thread_rng();
        let mut inserted = 0;
        let mut batches = 0;
        let mut pending = Vec::with_capacity(batch_size);

        for _ in 0..count {
            pending.push(self.draw(&mut rng, &companies, &roles, &locations));

            if pending.len() == batch_size {
                inserted += self.flush(&mut pending)?;
                batches += 1;
                info!(inserted, requested = count, "committed generation batch");
            }
        }

        if !pending.is_empty() {
            inserted += self.flush(&mut pending)?;
            batches += 1;
            info!(inserted, requested = count, "committed generation batch");
        }

        Ok(GenerationSummary {
            requested: count,
            inserted,
            batches,
        })
    }

    fn flush(&self, pending: &mut Vec<RecordSubmission>) -> Result<usize, GeneratorError> {
        let batch = std::mem::take(pending);
        let committed = self.repository.insert_records(batch)?;
        Ok(committed.len())
    }

    fn draw(
        &self,
        rng: &mut impl Rng,
        companies: &[Company],
        roles: &[Role],
        locations: &[Location],
    ) -> RecordSubmission {
        let company = &companies[rng.gen_range(0..companies.len())];
        let role = &roles[rng.gen_range(0..roles.len())];
        let location = &locations[rng.gen_range(0..locations.len())];

        let profile = self.classifier.classify(&company.name, role.level);
        let base = rng.gen_range(profile.band.min..=profile.band.max);
        let bonus_fraction = rng.gen_range(profile.mix.bonus.min..=profile.mix.bonus.max);
        let equity_fraction = rng.gen_range(profile.mix.equity.min..=profile.mix.equity.max);
        let bonus = (base as f64 * bonus_fraction).round() as u64;
        let stock = (base as f64 * equity_fraction).round() as u64;

        let (min_experience, max_experience) = experience_range(role.level);
        let experience = rng.gen_range(min_experience..=max_experience);
        let tenure = rng.gen_range(0..=experience.min(self.config.tenure_cap));

        RecordSubmission {
            company_id: company.id,
            role_id: role.id,
            location_id: location.id,
            base_salary: base,
            bonus,
            stock_options: stock,
            total_compensation: base + bonus + stock,
            years_of_experience: experience,
            years_at_company: Some(tenure),
            employment_type: "Full-time".to_string(),
            is_remote: rng.gen_bool(self.config.remote_share),
            currency: "INR".to_string(),
            source: self.config.source_tag.clone(),
        }
    }
}

const fn experience_range(level: Level) -> (u8, u8) {
    match level {
        Level::Entry => (0, 2),
        Level::Mid => (3, 7),
        Level::Senior => (8, 15),
    }
}

fn absorb_duplicate<T>(result: Result<T, RepositoryError>) -> Result<usize, GeneratorError> {
    match result {
        Ok(_) => Ok(1),
        Err(RepositoryError::Duplicate { .. }) => Ok(0),
        Err(other) => Err(GeneratorError::Store(other)),
    }
}
