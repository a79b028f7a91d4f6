use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;

use super::domain::{
    Company, CompanyId, CompensationRecord, Location, LocationId, NewCompany, NewLocation,
    NewRole, RecordId, RecordSubmission, Role, RoleId,
};
use super::repository::{EntityKind, MarketRepository, RepositoryError};

/// Reference store keeping all four tables behind one mutex, so every call
/// observes a consistent snapshot and each batch insert commits
/// all-or-nothing. `BTreeMap` keys double as the ascending-id iteration
/// order the query path relies on.
#[derive(Debug, Default)]
pub struct InMemoryMarketRepository {
    inner: Mutex<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    companies: BTreeMap<u64, Company>,
    roles: BTreeMap<u64, Role>,
    locations: BTreeMap<u64, Location>,
    records: BTreeMap<u64, CompensationRecord>,
    next_company: u64,
    next_role: u64,
    next_location: u64,
    next_record: u64,
}

const DEFAULT_COUNTRY: &str = "India";

impl InMemoryMarketRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoreInner>, RepositoryError> {
        self.inner
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl StoreInner {
    fn check_references(&self, submission: &RecordSubmission) -> Result<(), RepositoryError> {
        if !self.companies.contains_key(&submission.company_id.0) {
            return Err(RepositoryError::MissingReference {
                kind: EntityKind::Company,
                id: submission.company_id.0,
            });
        }
        if !self.roles.contains_key(&submission.role_id.0) {
            return Err(RepositoryError::MissingReference {
                kind: EntityKind::Role,
                id: submission.role_id.0,
            });
        }
        if !self.locations.contains_key(&submission.location_id.0) {
            return Err(RepositoryError::MissingReference {
                kind: EntityKind::Location,
                id: submission.location_id.0,
            });
        }
        Ok(())
    }

    fn commit_record(&mut self, submission: RecordSubmission) -> CompensationRecord {
        self.next_record += 1;
        let record = CompensationRecord {
            id: RecordId(self.next_record),
            company_id: submission.company_id,
            role_id: submission.role_id,
            location_id: submission.location_id,
            base_salary: submission.base_salary,
            bonus: submission.bonus,
            stock_options: submission.stock_options,
            total_compensation: submission.total_compensation,
            years_of_experience: submission.years_of_experience,
            years_at_company: submission.years_at_company,
            employment_type: submission.employment_type,
            is_remote: submission.is_remote,
            currency: submission.currency,
            source: submission.source,
            is_verified: false,
            submitted_at: Utc::now(),
        };
        self.records.insert(record.id.0, record.clone());
        record
    }
}

impl MarketRepository for InMemoryMarketRepository {
    fn insert_company(&self, company: NewCompany) -> Result<Company, RepositoryError> {
        let mut store = self.lock()?;
        if store.companies.values().any(|row| row.name == company.name) {
            return Err(RepositoryError::Duplicate {
                kind: EntityKind::Company,
            });
        }

        store.next_company += 1;
        let row = Company {
            id: CompanyId(store.next_company),
            name: company.name,
            industry: company.industry,
            size: company.size,
            headquarters: company.headquarters,
            website: company.website,
        };
        store.companies.insert(row.id.0, row.clone());
        Ok(row)
    }

    fn insert_role(&self, role: NewRole) -> Result<Role, RepositoryError> {
        let mut store = self.lock()?;
        if store.roles.values().any(|row| row.title == role.title) {
            return Err(RepositoryError::Duplicate {
                kind: EntityKind::Role,
            });
        }

        let level = role.resolved_level();
        store.next_role += 1;
        let row = Role {
            id: RoleId(store.next_role),
            title: role.title,
            category: role.category,
            level,
        };
        store.roles.insert(row.id.0, row.clone());
        Ok(row)
    }

    fn insert_location(&self, location: NewLocation) -> Result<Location, RepositoryError> {
        let mut store = self.lock()?;
        if store
            .locations
            .values()
            .any(|row| row.city == location.city && row.state == location.state)
        {
            return Err(RepositoryError::Duplicate {
                kind: EntityKind::Location,
            });
        }

        store.next_location += 1;
        let row = Location {
            id: LocationId(store.next_location),
            city: location.city,
            state: location.state,
            country: location
                .country
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            cost_of_living_index: location.cost_of_living_index,
        };
        store.locations.insert(row.id.0, row.clone());
        Ok(row)
    }

    fn insert_record(
        &self,
        record: RecordSubmission,
    ) -> Result<CompensationRecord, RepositoryError> {
        let mut store = self.lock()?;
        store.check_references(&record)?;
        Ok(store.commit_record(record))
    }

    fn insert_records(
        &self,
        batch: Vec<RecordSubmission>,
    ) -> Result<Vec<CompensationRecord>, RepositoryError> {
        let mut store = self.lock()?;
        for submission in &batch {
            store.check_references(submission)?;
        }
        Ok(batch
            .into_iter()
            .map(|submission| store.commit_record(submission))
            .collect())
    }

    fn companies(&self) -> Result<Vec<Company>, RepositoryError> {
        Ok(self.lock()?.companies.values().cloned().collect())
    }

    fn roles(&self) -> Result<Vec<Role>, RepositoryError> {
        Ok(self.lock()?.roles.values().cloned().collect())
    }

    fn locations(&self) -> Result<Vec<Location>, RepositoryError> {
        Ok(self.lock()?.locations.values().cloned().collect())
    }

    fn records(&self) -> Result<Vec<CompensationRecord>, RepositoryError> {
        Ok(self.lock()?.records.values().cloned().collect())
    }

    fn delete_all_records(&self) -> Result<usize, RepositoryError> {
        let mut store = self.lock()?;
        let removed = store.records.len();
        store.records.clear();
        Ok(removed)
    }
}
