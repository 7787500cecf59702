//! Per-language weirdness aggregation.
//!
//! The aggregator walks each language record in feature declaration order,
//! looks up the rarity of every observed value, and reduces the collected
//! rarities into a mean weirdness score plus a ranked contribution list.
//! Languages with zero scorable features contribute no record at all; no
//! placeholder score is manufactured for them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::dataset::{Dataset, FeatureId, LanguageRecord};
use crate::core::rarity::RarityTable;

/// One feature's contribution to a language's weirdness score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureContribution {
    /// Feature id
    pub feature: FeatureId,

    /// The value this language shows for the feature
    pub value: String,

    /// Rarity of that value within the feature's distribution
    pub rarity: f64,
}

/// Weirdness result for a single language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeirdnessRecord {
    /// Language name
    pub name: String,

    /// WALS language code
    pub wals_code: String,

    /// Latitude, if recorded on the input row
    pub latitude: Option<f64>,

    /// Longitude, if recorded on the input row
    pub longitude: Option<f64>,

    /// Language family, if recorded
    pub family: Option<String>,

    /// Genus, if recorded
    pub genus: Option<String>,

    /// Macroarea, if recorded
    pub macroarea: Option<String>,

    /// Mean rarity across all scored features
    pub weirdness_score: f64,

    /// Number of features that contributed to the score
    pub num_features: usize,

    /// Highest-rarity contributions, descending, truncated to the
    /// configured storage count
    pub top_weird_features: Vec<FeatureContribution>,
}

/// Weirdness aggregator: reduces per-feature rarities into per-language
/// records using a fitted rarity table.
pub struct WeirdnessAggregator;

impl WeirdnessAggregator {
    /// Aggregate weirdness records for every scorable language.
    ///
    /// A feature is skipped for a language when its value is missing, when
    /// the estimator dropped the feature, or (defensively) when the value
    /// has no entry in the feature's rarity map. None of these are errors;
    /// the estimator and aggregator must remain independently callable on
    /// mismatched datasets. Languages where every feature is skipped are
    /// excluded from the output.
    pub fn aggregate(
        dataset: &Dataset,
        rarity_table: &RarityTable,
        top_k: usize,
    ) -> Vec<WeirdnessRecord> {
        let mut records = Vec::new();

        for language in &dataset.languages {
            if let Some(record) = Self::aggregate_language(language, dataset, rarity_table, top_k) {
                records.push(record);
            }
        }

        debug!(
            scored = records.len(),
            total = dataset.len(),
            "weirdness aggregation complete"
        );

        records
    }

    fn aggregate_language(
        language: &LanguageRecord,
        dataset: &Dataset,
        rarity_table: &RarityTable,
        top_k: usize,
    ) -> Option<WeirdnessRecord> {
        let mut contributions = Vec::new();

        for feature in &dataset.feature_ids {
            let Some(value) = language.feature_value(feature) else {
                continue;
            };
            let Some(rarity) = rarity_table.rarity(feature, value) else {
                continue;
            };
            contributions.push(FeatureContribution {
                feature: feature.clone(),
                value: value.to_string(),
                rarity,
            });
        }

        if contributions.is_empty() {
            return None;
        }

        let num_features = contributions.len();
        let weirdness_score =
            contributions.iter().map(|c| c.rarity).sum::<f64>() / num_features as f64;

        // Stable sort keeps per-feature declaration order for equal rarities.
        contributions.sort_by(|a, b| {
            b.rarity
                .partial_cmp(&a.rarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        contributions.truncate(top_k);

        Some(WeirdnessRecord {
            name: language.name.clone(),
            wals_code: language.wals_code.clone(),
            latitude: language.latitude,
            longitude: language.longitude,
            family: language.family.clone(),
            genus: language.genus.clone(),
            macroarea: language.macroarea.clone(),
            weirdness_score,
            num_features,
            top_weird_features: contributions,
        })
    }
}
