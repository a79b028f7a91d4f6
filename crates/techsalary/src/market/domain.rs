use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for employer entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub u64);

/// Identifier wrapper for role entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleId(pub u64);

/// Identifier wrapper for location entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocationId(pub u64);

/// Identifier wrapper for compensation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seniority band a role belongs to. Fixed at role creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Entry,
    Mid,
    Senior,
}

impl Level {
    pub const fn ordered() -> [Self; 3] {
        [Self::Entry, Self::Mid, Self::Senior]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Entry => "Entry",
            Self::Mid => "Mid",
            Self::Senior => "Senior",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Entry => 0,
            Self::Mid => 1,
            Self::Senior => 2,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "entry" => Some(Self::Entry),
            "mid" => Some(Self::Mid),
            "senior" => Some(Self::Senior),
            _ => None,
        }
    }

    /// One-time classification applied when a role arrives without an
    /// explicit level: title markers decide the band, defaulting to Mid.
    pub fn classify_title(title: &str) -> Self {
        let lowered = title.to_lowercase();
        let senior_markers = ["senior", "lead", "staff", "principal"];
        if senior_markers.iter().any(|marker| lowered.contains(marker)) {
            return Self::Senior;
        }
        let entry_markers = ["junior", "trainee", "graduate", "intern"];
        if entry_markers.iter().any(|marker| lowered.contains(marker)) {
            return Self::Entry;
        }
        Self::Mid
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An employer observed in the market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub headquarters: Option<String>,
    pub website: Option<String>,
}

/// A job title with its one-time seniority classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub title: String,
    pub category: Option<String>,
    pub level: Level,
}

/// A city/state pair; unique per (city, state).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub city: String,
    pub state: String,
    pub country: String,
    pub cost_of_living_index: Option<f64>,
}

/// One compensation observation. Immutable after creation; reseed workflows
/// delete in bulk rather than updating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationRecord {
    pub id: RecordId,
    pub company_id: CompanyId,
    pub role_id: RoleId,
    pub location_id: LocationId,
    pub base_salary: u64,
    pub bonus: u64,
    pub stock_options: u64,
    pub total_compensation: u64,
    pub years_of_experience: u8,
    pub years_at_company: Option<u8>,
    pub employment_type: String,
    pub is_remote: bool,
    pub currency: String,
    pub source: String,
    pub is_verified: bool,
    pub submitted_at: DateTime<Utc>,
}

/// Intake shape for a new employer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub headquarters: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl NewCompany {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "company name",
            });
        }
        Ok(())
    }
}

/// Intake shape for a new role. A missing level is classified from the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRole {
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: Option<Level>,
}

impl NewRole {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "role title" });
        }
        Ok(())
    }

    pub(crate) fn resolved_level(&self) -> Level {
        self.level.unwrap_or_else(|| Level::classify_title(&self.title))
    }
}

/// Intake shape for a new location. Country defaults to India when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub cost_of_living_index: Option<f64>,
}

impl NewLocation {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.city.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "city" });
        }
        if self.state.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "state" });
        }
        if let Some(index) = self.cost_of_living_index {
            if index <= 0.0 {
                return Err(ValidationError::NonPositiveIndex { value: index });
            }
        }
        Ok(())
    }
}

fn default_employment_type() -> String {
    "Full-time".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_source() -> String {
    "user_submission".to_string()
}

/// Intake shape for a compensation observation. The pay identity is checked
/// here rather than recomputed: a submission whose total disagrees with its
/// components is rejected, never silently corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSubmission {
    pub company_id: CompanyId,
    pub role_id: RoleId,
    pub location_id: LocationId,
    pub base_salary: u64,
    #[serde(default)]
    pub bonus: u64,
    #[serde(default)]
    pub stock_options: u64,
    pub total_compensation: u64,
    pub years_of_experience: u8,
    #[serde(default)]
    pub years_at_company: Option<u8>,
    #[serde(default = "default_employment_type")]
    pub employment_type: String,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_source")]
    pub source: String,
}

impl RecordSubmission {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        let components = (self.base_salary as u128) + (self.bonus as u128)
            + (self.stock_options as u128);
        if components != self.total_compensation as u128 {
            return Err(ValidationError::TotalMismatch {
                base: self.base_salary,
                bonus: self.bonus,
                stock: self.stock_options,
                total: self.total_compensation,
            });
        }

        if let Some(tenure) = self.years_at_company {
            if tenure > self.years_of_experience {
                return Err(ValidationError::TenureExceedsExperience {
                    tenure,
                    experience: self.years_of_experience,
                });
            }
        }

        if self.employment_type.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "employment type",
            });
        }
        if self.currency.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "currency" });
        }

        Ok(())
    }
}

/// Rejection reasons for malformed intake data.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("total compensation {total} does not equal base {base} + bonus {bonus} + stock {stock}")]
    TotalMismatch {
        base: u64,
        bonus: u64,
        stock: u64,
        total: u64,
    },
    #[error("years at company ({tenure}) exceeds years of experience ({experience})")]
    TenureExceedsExperience { tenure: u8, experience: u8 },
    #[error("cost of living index must be positive, got {value}")]
    NonPositiveIndex { value: f64 },
    #[error("unknown level '{value}'")]
    UnknownLevel { value: String },
}
