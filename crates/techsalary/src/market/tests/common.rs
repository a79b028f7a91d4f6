use std::sync::Arc;

use crate::market::domain::{
    Company, CompanyId, CompensationRecord, Level, Location, LocationId, NewCompany, NewLocation,
    NewRole, RecordSubmission, Role, RoleId,
};
use crate::market::generator::GeneratorConfig;
use crate::market::memory::InMemoryMarketRepository;
use crate::market::repository::{MarketRepository, RepositoryError};
use crate::market::service::MarketService;
use crate::market::tiers::TierTable;

pub(super) fn build_service() -> (
    MarketService<InMemoryMarketRepository>,
    Arc<InMemoryMarketRepository>,
) {
    let repository = Arc::new(InMemoryMarketRepository::new());
    let service = MarketService::new(
        repository.clone(),
        TierTable::indian_tech_2024(),
        GeneratorConfig::default(),
    );
    (service, repository)
}

/// One unrecognized employer, one Entry role, one Pune location.
pub(super) fn acme_fixture(
    service: &MarketService<InMemoryMarketRepository>,
) -> (CompanyId, RoleId, LocationId) {
    let company = service
        .create_company(NewCompany {
            name: "Acme".to_string(),
            industry: Some("Technology".to_string()),
            size: None,
            headquarters: None,
            website: None,
        })
        .expect("company created");
    let role = service
        .create_role(NewRole {
            title: "Systems Engineer".to_string(),
            category: Some("Engineering".to_string()),
            level: Some(Level::Entry),
        })
        .expect("role created");
    let location = service
        .create_location(NewLocation {
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            country: None,
            cost_of_living_index: Some(55.0),
        })
        .expect("location created");
    (company.id, role.id, location.id)
}

pub(super) fn submission(
    company_id: CompanyId,
    role_id: RoleId,
    location_id: LocationId,
) -> RecordSubmission {
    RecordSubmission {
        company_id,
        role_id,
        location_id,
        base_salary: 500_000,
        bonus: 40_000,
        stock_options: 10_000,
        total_compensation: 550_000,
        years_of_experience: 2,
        years_at_company: Some(1),
        employment_type: "Full-time".to_string(),
        is_remote: false,
        currency: "INR".to_string(),
        source: "unit_test".to_string(),
    }
}

/// Service holding one record per supplied total, all under the Acme
/// fixture entities, inserted in order so record ids ascend with the slice.
pub(super) fn service_with_totals(
    totals: &[u64],
) -> (
    MarketService<InMemoryMarketRepository>,
    Arc<InMemoryMarketRepository>,
) {
    let (service, repository) = build_service();
    let (company_id, role_id, location_id) = acme_fixture(&service);

    for total in totals {
        service
            .submit_record(RecordSubmission {
                base_salary: *total,
                bonus: 0,
                stock_options: 0,
                total_compensation: *total,
                ..submission(company_id, role_id, location_id)
            })
            .expect("record stored");
    }

    (service, repository)
}

/// Store that fails every call, for error-propagation tests.
pub(super) struct UnavailableRepository;

impl UnavailableRepository {
    fn offline<T>() -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl MarketRepository for UnavailableRepository {
    fn insert_company(&self, _company: NewCompany) -> Result<Company, RepositoryError> {
        Self::offline()
    }

    fn insert_role(&self, _role: NewRole) -> Result<Role, RepositoryError> {
        Self::offline()
    }

    fn insert_location(&self, _location: NewLocation) -> Result<Location, RepositoryError> {
        Self::offline()
    }

    fn insert_record(
        &self,
        _record: RecordSubmission,
    ) -> Result<CompensationRecord, RepositoryError> {
        Self::offline()
    }

    fn insert_records(
        &self,
        _batch: Vec<RecordSubmission>,
    ) -> Result<Vec<CompensationRecord>, RepositoryError> {
        Self::offline()
    }

    fn companies(&self) -> Result<Vec<Company>, RepositoryError> {
        Self::offline()
    }

    fn roles(&self) -> Result<Vec<Role>, RepositoryError> {
        Self::offline()
    }

    fn locations(&self) -> Result<Vec<Location>, RepositoryError> {
        Self::offline()
    }

    fn records(&self) -> Result<Vec<CompensationRecord>, RepositoryError> {
        Self::offline()
    }

    fn delete_all_records(&self) -> Result<usize, RepositoryError> {
        Self::offline()
    }
}
