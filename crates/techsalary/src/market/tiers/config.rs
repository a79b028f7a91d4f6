use std::collections::BTreeMap;

use super::policy::{CompanyTier, FractionRange, PayBand, PayMix, TierTableError};
use crate::market::domain::Level;

/// Static tier policy: which tier each known employer belongs to, the
/// per-level base-pay band and pay-mix profile for each tier, and the tier
/// that stands in for everything unrecognized. Passed in as data so a table
/// version can be swapped per deployment or per test.
#[derive(Debug, Clone)]
pub struct TierTable {
    assignments: BTreeMap<String, CompanyTier>,
    bands: BTreeMap<CompanyTier, BTreeMap<Level, PayBand>>,
    mixes: BTreeMap<CompanyTier, PayMix>,
    default_tier: CompanyTier,
    default_bands: [PayBand; 3],
    default_mix: PayMix,
}

impl TierTable {
    /// Validate and build a custom table. The default tier must carry a band
    /// for every level and a pay-mix profile, since it backs every fallback.
    pub fn new(
        assignments: BTreeMap<String, CompanyTier>,
        bands: BTreeMap<CompanyTier, BTreeMap<Level, PayBand>>,
        mixes: BTreeMap<CompanyTier, PayMix>,
        default_tier: CompanyTier,
    ) -> Result<Self, TierTableError> {
        for (tier, per_level) in &bands {
            for (level, band) in per_level {
                if band.min > band.max {
                    return Err(TierTableError::InvertedBand {
                        tier: *tier,
                        level: *level,
                        min: band.min,
                        max: band.max,
                    });
                }
            }
        }

        for (tier, mix) in &mixes {
            for range in [mix.bonus, mix.equity] {
                if range.min > range.max || range.min < 0.0 || range.max > 1.0 {
                    return Err(TierTableError::InvalidFraction {
                        tier: *tier,
                        min: range.min,
                        max: range.max,
                    });
                }
            }
        }

        let default_per_level = bands.get(&default_tier);
        let mut default_bands = [PayBand::new(0, 0); 3];
        for level in Level::ordered() {
            let band = default_per_level
                .and_then(|per_level| per_level.get(&level))
                .ok_or(TierTableError::MissingDefaultBand {
                    tier: default_tier,
                    level,
                })?;
            default_bands[level.index()] = *band;
        }

        let default_mix = *mixes
            .get(&default_tier)
            .ok_or(TierTableError::MissingDefaultMix { tier: default_tier })?;

        Ok(Self {
            assignments,
            bands,
            mixes,
            default_tier,
            default_bands,
            default_mix,
        })
    }

    /// The canonical Indian tech-market table, consolidated from verified
    /// 2024-25 public salary data per tier and level. Services firms double
    /// as the fallback for employers the table has never heard of.
    pub fn indian_tech_2024() -> Self {
        let assignments = canonical_assignments();

        let mut bands = BTreeMap::new();
        bands.insert(
            CompanyTier::TopTierMultinational,
            level_bands([
                PayBand::new(1_400_000, 2_600_000),
                PayBand::new(2_200_000, 5_200_000),
                PayBand::new(4_500_000, 12_000_000),
            ]),
        );
        bands.insert(
            CompanyTier::GrowthStageProduct,
            level_bands([
                PayBand::new(800_000, 2_000_000),
                PayBand::new(1_350_000, 3_800_000),
                PayBand::new(2_500_000, 7_500_000),
            ]),
        );
        bands.insert(
            CompanyTier::ServicesFirm,
            level_bands([
                PayBand::new(320_000, 600_000),
                PayBand::new(650_000, 1_450_000),
                PayBand::new(1_200_000, 2_700_000),
            ]),
        );

        let mut mixes = BTreeMap::new();
        mixes.insert(
            CompanyTier::TopTierMultinational,
            PayMix {
                bonus: FractionRange::new(0.15, 0.25),
                equity: FractionRange::new(0.30, 0.50),
            },
        );
        mixes.insert(
            CompanyTier::GrowthStageProduct,
            PayMix {
                bonus: FractionRange::new(0.10, 0.20),
                equity: FractionRange::new(0.20, 0.35),
            },
        );
        mixes.insert(
            CompanyTier::ServicesFirm,
            PayMix {
                bonus: FractionRange::new(0.05, 0.12),
                equity: FractionRange::new(0.00, 0.05),
            },
        );

        let default_tier = CompanyTier::ServicesFirm;
        let default_bands = [
            PayBand::new(320_000, 600_000),
            PayBand::new(650_000, 1_450_000),
            PayBand::new(1_200_000, 2_700_000),
        ];
        let default_mix = PayMix {
            bonus: FractionRange::new(0.05, 0.12),
            equity: FractionRange::new(0.00, 0.05),
        };

        Self {
            assignments,
            bands,
            mixes,
            default_tier,
            default_bands,
            default_mix,
        }
    }

    pub fn default_tier(&self) -> CompanyTier {
        self.default_tier
    }

    /// Exact-name lookup; anything unrecognized falls to the default tier.
    pub fn tier_for(&self, company: &str) -> CompanyTier {
        self.assignments
            .get(company)
            .copied()
            .unwrap_or(self.default_tier)
    }

    /// Band for (tier, level). A level absent from the tier's table falls
    /// back to the default tier's band for that level, never to zero.
    pub fn band(&self, tier: CompanyTier, level: Level) -> PayBand {
        self.bands
            .get(&tier)
            .and_then(|per_level| per_level.get(&level))
            .copied()
            .unwrap_or(self.default_bands[level.index()])
    }

    pub fn mix(&self, tier: CompanyTier) -> PayMix {
        self.mixes.get(&tier).copied().unwrap_or(self.default_mix)
    }
}

fn level_bands(bands: [PayBand; 3]) -> BTreeMap<Level, PayBand> {
    Level::ordered()
        .into_iter()
        .map(|level| (level, bands[level.index()]))
        .collect()
}

fn canonical_assignments() -> BTreeMap<String, CompanyTier> {
    let top_tier = [
        "Google India",
        "Amazon India",
        "Microsoft India",
        "Meta India",
        "Apple India",
    ];
    let growth_stage = [
        "Flipkart",
        "Swiggy",
        "Zomato",
        "PhonePe",
        "Razorpay",
        "CRED",
        "Ola",
        "Paytm",
        "Adobe India",
        "Salesforce India",
        "VMware India",
    ];
    let services = [
        "TCS",
        "Infosys",
        "Wipro",
        "HCL Technologies",
        "Tech Mahindra",
        "Capgemini",
        "Cognizant",
        "Accenture India",
        "LTI Mindtree",
    ];

    let mut assignments = BTreeMap::new();
    for name in top_tier {
        assignments.insert(name.to_string(), CompanyTier::TopTierMultinational);
    }
    for name in growth_stage {
        assignments.insert(name.to_string(), CompanyTier::GrowthStageProduct);
    }
    for name in services {
        assignments.insert(name.to_string(), CompanyTier::ServicesFirm);
    }
    assignments
}
