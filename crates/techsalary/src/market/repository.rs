use std::fmt;

use super::domain::{
    Company, CompensationRecord, Location, NewCompany, NewLocation, NewRole, RecordSubmission,
    Role,
};

/// Entity table a store error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Company,
    Role,
    Location,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Role => "role",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Storage abstraction so the service and generator can be exercised against
/// any durable tabular store. Implementations enforce uniqueness and
/// referential integrity; snapshots come back in ascending-id order so
/// pagination stays reproducible.
pub trait MarketRepository: Send + Sync {
    fn insert_company(&self, company: NewCompany) -> Result<Company, RepositoryError>;
    fn insert_role(&self, role: NewRole) -> Result<Role, RepositoryError>;
    fn insert_location(&self, location: NewLocation) -> Result<Location, RepositoryError>;

    /// Persist a single validated observation.
    fn insert_record(&self, record: RecordSubmission)
        -> Result<CompensationRecord, RepositoryError>;

    /// Persist a batch atomically: every row's references are checked before
    /// any row is written, so a failed batch leaves the store untouched.
    fn insert_records(
        &self,
        batch: Vec<RecordSubmission>,
    ) -> Result<Vec<CompensationRecord>, RepositoryError>;

    fn companies(&self) -> Result<Vec<Company>, RepositoryError>;
    fn roles(&self) -> Result<Vec<Role>, RepositoryError>;
    fn locations(&self) -> Result<Vec<Location>, RepositoryError>;
    fn records(&self) -> Result<Vec<CompensationRecord>, RepositoryError>;

    /// Bulk delete for reseed workflows. Returns the number of rows removed.
    fn delete_all_records(&self) -> Result<usize, RepositoryError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{kind} already exists")]
    Duplicate { kind: EntityKind },
    #[error("referenced {kind} {id} does not exist")]
    MissingReference { kind: EntityKind, id: u64 },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
