use serde::Serialize;

use crate::market::domain::{Company, CompensationRecord, Level, Location, RecordId, Role};

/// Fully joined representation of one observation, so callers never see bare
/// foreign keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompensationView {
    pub id: RecordId,
    pub company: String,
    pub role: String,
    pub level: Level,
    pub level_label: &'static str,
    pub location: String,
    pub base_salary: u64,
    pub bonus: u64,
    pub stock_options: u64,
    pub total_compensation: u64,
    pub years_of_experience: u8,
    pub employment_type: String,
    pub is_remote: bool,
    pub currency: String,
}

impl CompensationView {
    pub(crate) fn assemble(
        record: &CompensationRecord,
        company: &Company,
        role: &Role,
        location: &Location,
    ) -> Self {
        Self {
            id: record.id,
            company: company.name.clone(),
            role: role.title.clone(),
            level: role.level,
            level_label: role.level.label(),
            location: format!("{}, {}", location.city, location.state),
            base_salary: record.base_salary,
            bonus: record.bonus,
            stock_options: record.stock_options,
            total_compensation: record.total_compensation,
            years_of_experience: record.years_of_experience,
            employment_type: record.employment_type.clone(),
            is_remote: record.is_remote,
            currency: record.currency.clone(),
        }
    }
}
