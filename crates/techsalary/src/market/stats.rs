use serde::Serialize;

/// Summary statistics over the total compensation of a filtered population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub median: u64,
}

impl SummaryStats {
    /// `None` for an empty population; reporting zeroes as statistics would
    /// mislead callers.
    pub(crate) fn from_totals(mut totals: Vec<u64>) -> Option<Self> {
        if totals.is_empty() {
            return None;
        }

        totals.sort_unstable();
        let count = totals.len();
        let sum: u128 = totals.iter().map(|total| *total as u128).sum();
        // The upper median: index count/2 of the sorted values. Callers
        // depend on this exact sort-and-index convention for even lengths.
        let median = totals[count / 2];

        Some(Self {
            count,
            min: totals[0],
            max: totals[count - 1],
            mean: sum as f64 / count as f64,
            median,
        })
    }
}

/// Mean total compensation for one chosen location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationAverage {
    pub location: String,
    pub count: usize,
    pub average: f64,
}
