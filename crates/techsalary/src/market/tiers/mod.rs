mod config;
mod policy;

pub use config::TierTable;
pub use policy::{CompanyTier, FractionRange, PayBand, PayMix, TierTableError};

use serde::Serialize;

use crate::market::domain::Level;

/// Stateless lookup from (employer, level) to the compensation profile the
/// active table prescribes. Pure: identical inputs against the same table
/// version always return identical profiles.
pub struct TierClassifier {
    table: TierTable,
}

impl TierClassifier {
    pub fn new(table: TierTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TierTable {
        &self.table
    }

    pub fn classify(&self, company: &str, level: Level) -> TierProfile {
        let tier = self.table.tier_for(company);
        TierProfile {
            tier,
            band: self.table.band(tier, level),
            mix: self.table.mix(tier),
        }
    }
}

/// Compensation profile returned by a classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierProfile {
    pub tier: CompanyTier,
    pub band: PayBand,
    pub mix: PayMix,
}
