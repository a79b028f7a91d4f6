use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::domain::{
    CompanyId, Level, LocationId, NewCompany, NewLocation, NewRole, RecordSubmission, RoleId,
    ValidationError,
};
use super::repository::MarketRepository;
use super::service::{MarketError, MarketService};

/// Failure modes of a bulk observation import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("invalid observations CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Market(#[from] MarketError),
}

/// Per-kind creation counts for one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub rows: usize,
    pub records: usize,
    pub companies: usize,
    pub roles: usize,
    pub locations: usize,
}

#[derive(Debug, Deserialize)]
struct ObservationRow {
    company: String,
    role: String,
    #[serde(default)]
    level: Option<String>,
    city: String,
    state: String,
    base_salary: u64,
    #[serde(default)]
    bonus: u64,
    #[serde(default)]
    stock_options: u64,
    years_of_experience: u8,
    #[serde(default)]
    years_at_company: Option<u8>,
    #[serde(default)]
    source: Option<String>,
}

/// Load observed compensation rows from CSV, creating referenced entities
/// lazily (first reference wins) and routing every record through the
/// validated creation path. Totals are derived from the components at the
/// source, so the pay identity holds by construction.
pub fn import_observations<S, R>(
    service: &MarketService<R>,
    reader: S,
) -> Result<ImportSummary, ImportError>
where
    S: Read,
    R: MarketRepository + 'static,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut cache = EntityCache::load(service)?;
    let mut summary = ImportSummary::default();

    for row in csv_reader.deserialize::<ObservationRow>() {
        let row = row?;
        summary.rows += 1;

        let level = match &row.level {
            Some(raw) => Some(Level::parse(raw).ok_or(MarketError::Validation(
                ValidationError::UnknownLevel { value: raw.clone() },
            ))?),
            None => None,
        };

        let company_id = cache.company(service, &row.company, &mut summary)?;
        let role_id = cache.role(service, &row.role, level, &mut summary)?;
        let location_id = cache.location(service, &row.city, &row.state, &mut summary)?;

        let total = row.base_salary + row.bonus + row.stock_options;
        service.submit_record(RecordSubmission {
            company_id,
            role_id,
            location_id,
            base_salary: row.base_salary,
            bonus: row.bonus,
            stock_options: row.stock_options,
            total_compensation: total,
            years_of_experience: row.years_of_experience,
            years_at_company: row.years_at_company,
            employment_type: "Full-time".to_string(),
            is_remote: false,
            currency: "INR".to_string(),
            source: row.source.unwrap_or_else(|| "csv_import".to_string()),
        })?;
        summary.records += 1;
    }

    Ok(summary)
}

/// Name-keyed views of the entity tables so each import run touches the
/// store once per distinct name instead of once per row.
struct EntityCache {
    companies: HashMap<String, CompanyId>,
    roles: HashMap<String, RoleId>,
    locations: HashMap<(String, String), LocationId>,
}

impl EntityCache {
    fn load<R>(service: &MarketService<R>) -> Result<Self, MarketError>
    where
        R: MarketRepository + 'static,
    {
        let mut cache = Self {
            companies: HashMap::new(),
            roles: HashMap::new(),
            locations: HashMap::new(),
        };
        cache.refresh(service)?;
        Ok(cache)
    }

    fn refresh<R>(&mut self, service: &MarketService<R>) -> Result<(), MarketError>
    where
        R: MarketRepository + 'static,
    {
        let population = service.snapshot()?;
        self.companies = population
            .companies
            .into_iter()
            .map(|row| (row.name, row.id))
            .collect();
        self.roles = population
            .roles
            .into_iter()
            .map(|row| (row.title, row.id))
            .collect();
        self.locations = population
            .locations
            .into_iter()
            .map(|row| ((row.city, row.state), row.id))
            .collect();
        Ok(())
    }

    fn company<R>(
        &mut self,
        service: &MarketService<R>,
        name: &str,
        summary: &mut ImportSummary,
    ) -> Result<CompanyId, MarketError>
    where
        R: MarketRepository + 'static,
    {
        if let Some(id) = self.companies.get(name) {
            return Ok(*id);
        }
        let created = service.create_company(NewCompany {
            name: name.to_string(),
            industry: None,
            size: None,
            headquarters: None,
            website: None,
        })?;
        summary.companies += 1;
        self.companies.insert(created.name.clone(), created.id);
        Ok(created.id)
    }

    fn role<R>(
        &mut self,
        service: &MarketService<R>,
        title: &str,
        level: Option<Level>,
        summary: &mut ImportSummary,
    ) -> Result<RoleId, MarketError>
    where
        R: MarketRepository + 'static,
    {
        if let Some(id) = self.roles.get(title) {
            return Ok(*id);
        }
        let created = service.create_role(NewRole {
            title: title.to_string(),
            category: Some("Engineering".to_string()),
            level,
        })?;
        summary.roles += 1;
        self.roles.insert(created.title.clone(), created.id);
        Ok(created.id)
    }

    fn location<R>(
        &mut self,
        service: &MarketService<R>,
        city: &str,
        state: &str,
        summary: &mut ImportSummary,
    ) -> Result<LocationId, MarketError>
    where
        R: MarketRepository + 'static,
    {
        let key = (city.to_string(), state.to_string());
        if let Some(id) = self.locations.get(&key) {
            return Ok(*id);
        }
        let created = service.create_location(NewLocation {
            city: city.to_string(),
            state: state.to_string(),
            country: None,
            cost_of_living_index: None,
        })?;
        summary.locations += 1;
        self.locations.insert(key, created.id);
        Ok(created.id)
    }
}
