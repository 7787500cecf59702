//! Analysis result models exposed to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ranking::{self, ScoreSummary};
use crate::core::rarity::{FeatureStatsMap, RarityTable};
use crate::core::weirdness::WeirdnessRecord;

/// Complete output of one analysis run: the fitted rarity model, the scored
/// language records, and the two summary views. Built once per run and
/// read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// When the analysis ran
    pub timestamp: DateTime<Utc>,

    /// Minimum feature count used for the robust subset
    pub min_features: usize,

    /// Rarity scores per feature value
    pub rarity_table: RarityTable,

    /// Observation statistics per feature with data
    pub feature_stats: FeatureStatsMap,

    /// Weirdness records for every scorable language, in input order
    pub records: Vec<WeirdnessRecord>,

    /// Summary over the full scored set
    pub summary_all: ScoreSummary,

    /// Summary over the robust subset only
    pub summary_robust: ScoreSummary,
}

impl AnalysisResults {
    /// Number of languages that received a weirdness score
    pub fn scored_count(&self) -> usize {
        self.records.len()
    }

    /// The robust subset of records, in input order
    pub fn robust_records(&self) -> Vec<&WeirdnessRecord> {
        ranking::robust_subset(&self.records, self.min_features)
    }

    /// The `n` weirdest languages from the robust subset
    pub fn weirdest(&self, n: usize) -> Vec<&WeirdnessRecord> {
        ranking::top_weirdest(&self.robust_records(), n)
    }

    /// The `n` most normal languages from the robust subset
    pub fn most_normal(&self, n: usize) -> Vec<&WeirdnessRecord> {
        ranking::most_normal(&self.robust_records(), n)
    }
}
