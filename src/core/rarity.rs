//! Rarity estimation over categorical feature distributions.
//!
//! For each feature column the estimator computes the discrete probability
//! distribution over observed values and converts it into rarity scores:
//! `rarity(v) = 1 - count(v) / total_non_missing`. Features with zero
//! non-missing observations are omitted from both outputs rather than
//! zero-filled. The estimator is a pure function of the dataset.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::dataset::{Dataset, FeatureId};

/// Rarity scores for every observed value of every feature with data.
///
/// Both map levels are insertion-ordered: features in column-declaration
/// order, values in first-seen row order. A value's rarity is only
/// meaningful relative to its own feature's distribution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RarityTable {
    scores: IndexMap<FeatureId, IndexMap<String, f64>>,
}

impl RarityTable {
    /// Look up the rarity of a value within a feature's distribution
    pub fn rarity(&self, feature: &str, value: &str) -> Option<f64> {
        self.scores.get(feature)?.get(value).copied()
    }

    /// Whether the estimator produced a distribution for this feature
    pub fn contains_feature(&self, feature: &str) -> bool {
        self.scores.contains_key(feature)
    }

    /// The rarity map for one feature
    pub fn feature_rarities(&self, feature: &str) -> Option<&IndexMap<String, f64>> {
        self.scores.get(feature)
    }

    /// Number of features with a distribution
    pub fn feature_count(&self) -> usize {
        self.scores.len()
    }

    /// Iterate all (feature, value map) entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&FeatureId, &IndexMap<String, f64>)> {
        self.scores.iter()
    }
}

/// Per-feature observation statistics, derived alongside the rarity table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureStats {
    /// Total non-missing observations for this feature
    pub total_responses: usize,

    /// Number of distinct observed values
    pub unique_values: usize,

    /// The single most frequent value. Ties are broken by first-seen row
    /// order; this is an accepted policy, not a stability guarantee of the
    /// underlying data.
    pub most_common_value: String,

    /// Observation count of the most frequent value
    pub most_common_count: usize,
}

/// Statistics for every feature that produced a rarity distribution
pub type FeatureStatsMap = IndexMap<FeatureId, FeatureStats>;

/// Rarity estimator: builds the rarity table and feature statistics from a
/// dataset in a single pass per feature.
pub struct RarityEstimator;

impl RarityEstimator {
    /// Estimate rarity scores and statistics for every declared feature.
    ///
    /// Features with no non-missing observations anywhere in the dataset
    /// are skipped entirely (a defined no-op, not an error).
    pub fn estimate(dataset: &Dataset) -> (RarityTable, FeatureStatsMap) {
        let mut scores: IndexMap<FeatureId, IndexMap<String, f64>> = IndexMap::new();
        let mut stats: FeatureStatsMap = IndexMap::new();

        for feature in &dataset.feature_ids {
            // First-seen order in this map drives the most-common tie-break.
            let mut counts: IndexMap<&str, usize> = IndexMap::new();
            for value in dataset.observed_values(feature) {
                *counts.entry(value).or_insert(0) += 1;
            }

            if counts.is_empty() {
                debug!(feature = %feature, "feature has no observations, skipping");
                continue;
            }

            let total: usize = counts.values().sum();

            let mut most_common_value = "";
            let mut most_common_count = 0;
            for (&value, &count) in &counts {
                // Strictly greater, so the earliest-seen value wins ties.
                if count > most_common_count {
                    most_common_value = value;
                    most_common_count = count;
                }
            }

            let feature_rarity: IndexMap<String, f64> = counts
                .iter()
                .map(|(&value, &count)| {
                    let frequency = count as f64 / total as f64;
                    (value.to_string(), 1.0 - frequency)
                })
                .collect();

            stats.insert(
                feature.clone(),
                FeatureStats {
                    total_responses: total,
                    unique_values: counts.len(),
                    most_common_value: most_common_value.to_string(),
                    most_common_count,
                },
            );
            scores.insert(feature.clone(), feature_rarity);
        }

        debug!(
            features_with_data = scores.len(),
            features_declared = dataset.feature_ids.len(),
            "rarity estimation complete"
        );

        (RarityTable { scores }, stats)
    }
}
