mod views;

pub use views::CompensationView;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::market::domain::{
    Company, CompanyId, CompensationRecord, Location, LocationId, Role, RoleId,
};

pub const DEFAULT_PAGE_LIMIT: usize = 10;
pub const MAX_PAGE_LIMIT: usize = 100;

/// Validated pagination window. Construction is the only place bounds are
/// checked, so a `PageRequest` in hand is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: usize,
    offset: usize,
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Result<Self, QueryViolation> {
        if limit < 1 || limit > MAX_PAGE_LIMIT {
            return Err(QueryViolation::LimitOutOfRange { limit });
        }
        Ok(Self { limit, offset })
    }

    pub fn from_optional(
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Self, QueryViolation> {
        Self::new(limit.unwrap_or(DEFAULT_PAGE_LIMIT), offset.unwrap_or(0))
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

/// Malformed pagination bounds. Rejected up front rather than clamped so
/// clients learn about the mistake.
#[derive(Debug, thiserror::Error)]
pub enum QueryViolation {
    #[error("limit must be between 1 and 100, got {limit}")]
    LimitOutOfRange { limit: usize },
}

/// Conjunction of optional predicates over joined observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub min_total: Option<u64>,
    #[serde(default)]
    pub max_total: Option<u64>,
    #[serde(default)]
    pub min_experience: Option<u8>,
    #[serde(default)]
    pub max_experience: Option<u8>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub is_remote: Option<bool>,
}

impl RecordFilter {
    /// True when the record passes every supplied predicate. Name predicates
    /// are case-insensitive substring matches; numeric bounds are inclusive.
    pub fn matches(&self, record: &CompensationRecord, index: &EntityIndex) -> bool {
        let (company, role, location) = match index.join(record) {
            Some(joined) => joined,
            None => return false,
        };

        if let Some(needle) = &self.company {
            if !contains_ci(&company.name, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.city {
            if !contains_ci(&location.city, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.role {
            if !contains_ci(&role.title, needle) {
                return false;
            }
        }
        if let Some(min) = self.min_total {
            if record.total_compensation < min {
                return false;
            }
        }
        if let Some(max) = self.max_total {
            if record.total_compensation > max {
                return false;
            }
        }
        if let Some(min) = self.min_experience {
            if record.years_of_experience < min {
                return false;
            }
        }
        if let Some(max) = self.max_experience {
            if record.years_of_experience > max {
                return false;
            }
        }
        if let Some(employment_type) = &self.employment_type {
            if &record.employment_type != employment_type {
                return false;
            }
        }
        if let Some(is_remote) = self.is_remote {
            if record.is_remote != is_remote {
                return false;
            }
        }

        true
    }
}

pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Entity tables loaded once per query so record resolution is a map lookup
/// instead of a per-row fetch.
#[derive(Debug)]
pub struct EntityIndex {
    companies: HashMap<CompanyId, Company>,
    roles: HashMap<RoleId, Role>,
    locations: HashMap<LocationId, Location>,
}

impl EntityIndex {
    pub fn build(companies: Vec<Company>, roles: Vec<Role>, locations: Vec<Location>) -> Self {
        Self {
            companies: companies.into_iter().map(|row| (row.id, row)).collect(),
            roles: roles.into_iter().map(|row| (row.id, row)).collect(),
            locations: locations.into_iter().map(|row| (row.id, row)).collect(),
        }
    }

    fn join(&self, record: &CompensationRecord) -> Option<(&Company, &Role, &Location)> {
        Some((
            self.companies.get(&record.company_id)?,
            self.roles.get(&record.role_id)?,
            self.locations.get(&record.location_id)?,
        ))
    }

    /// Denormalized view of the record; `None` only if a reference dangles,
    /// which the store's integrity checks rule out.
    pub fn view(&self, record: &CompensationRecord) -> Option<CompensationView> {
        let (company, role, location) = self.join(record)?;
        Some(CompensationView::assemble(record, company, role, location))
    }
}

/// One page of joined results plus the pre-pagination match count.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub results: Vec<CompensationView>,
}
