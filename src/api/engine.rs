//! Main analysis engine implementation.

use chrono::Utc;
use tracing::info;

use crate::api::results::AnalysisResults;
use crate::core::config::XenoglotConfig;
use crate::core::dataset::Dataset;
use crate::core::errors::Result;
use crate::core::ranking::ScoreSummary;
use crate::core::rarity::RarityEstimator;
use crate::core::weirdness::WeirdnessAggregator;

/// Main xenoglot analysis engine.
///
/// Runs the two analysis stages in sequence over an immutable dataset:
/// rarity estimation per feature, then weirdness aggregation per language,
/// followed by the summary views. The whole run is synchronous and
/// single-pass per stage.
pub struct XenoglotEngine {
    config: XenoglotConfig,
}

impl XenoglotEngine {
    /// Create a new engine with a validated configuration
    pub fn new(config: XenoglotConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this engine runs with
    pub fn config(&self) -> &XenoglotConfig {
        &self.config
    }

    /// Analyze a dataset, producing the full result bundle.
    pub fn analyze(&self, dataset: &Dataset) -> Result<AnalysisResults> {
        info!(
            languages = dataset.len(),
            features = dataset.feature_ids.len(),
            "starting weirdness analysis"
        );

        let (rarity_table, feature_stats) = RarityEstimator::estimate(dataset);
        info!(
            features_with_data = rarity_table.feature_count(),
            "rarity estimation finished"
        );

        let records = WeirdnessAggregator::aggregate(
            dataset,
            &rarity_table,
            self.config.scoring.top_k_stored,
        );
        info!(scored_languages = records.len(), "aggregation finished");

        let min_features = self.config.scoring.min_features;
        let summary_all = ScoreSummary::from_records(&records);
        let robust: Vec<_> = records
            .iter()
            .filter(|r| r.num_features >= min_features)
            .collect();
        let summary_robust = ScoreSummary::from_records(robust.into_iter());

        Ok(AnalysisResults {
            timestamp: Utc::now(),
            min_features,
            rarity_table,
            feature_stats,
            records,
            summary_all,
            summary_robust,
        })
    }
}
