use serde::{Deserialize, Serialize};
use std::fmt;

use crate::market::domain::Level;

/// Named bucket of employers sharing a compensation profile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CompanyTier {
    TopTierMultinational,
    GrowthStageProduct,
    ServicesFirm,
}

impl CompanyTier {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::TopTierMultinational,
            Self::GrowthStageProduct,
            Self::ServicesFirm,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TopTierMultinational => "Top-tier multinational",
            Self::GrowthStageProduct => "Growth-stage product company",
            Self::ServicesFirm => "Services/outsourcing firm",
        }
    }
}

impl fmt::Display for CompanyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive annual base-pay interval in INR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBand {
    pub min: u64,
    pub max: u64,
}

impl PayBand {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, amount: u64) -> bool {
        self.min <= amount && amount <= self.max
    }
}

/// Inclusive sub-interval of [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractionRange {
    pub min: f64,
    pub max: f64,
}

impl FractionRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, fraction: f64) -> bool {
        self.min <= fraction && fraction <= self.max
    }
}

/// Share of base pay granted as bonus and equity for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayMix {
    pub bonus: FractionRange,
    pub equity: FractionRange,
}

/// Rejection reasons for an inconsistent tier table.
#[derive(Debug, thiserror::Error)]
pub enum TierTableError {
    #[error("default tier '{tier}' is missing a base-pay band for {level}")]
    MissingDefaultBand { tier: CompanyTier, level: Level },
    #[error("default tier '{tier}' has no pay-mix profile")]
    MissingDefaultMix { tier: CompanyTier },
    #[error("pay band {min}..{max} for {tier} {level} is inverted")]
    InvertedBand {
        tier: CompanyTier,
        level: Level,
        min: u64,
        max: u64,
    },
    #[error("fraction range {min}..{max} for {tier} must lie within 0.0..=1.0 and not be inverted")]
    InvalidFraction {
        tier: CompanyTier,
        min: f64,
        max: f64,
    },
}
