//! Ranking policy and score summaries.
//!
//! Comparative rankings ("weirdest", "most normal") are computed only over
//! the robust subset of languages meeting the minimum feature-count
//! threshold, so sparsely attested languages cannot dominate the extremes.
//! Summary statistics are reported over the full scored set and the robust
//! subset as two independent views.

use serde::{Deserialize, Serialize};

use crate::core::weirdness::WeirdnessRecord;

/// Languages with at least `min_features` scored features, in input order.
pub fn robust_subset(records: &[WeirdnessRecord], min_features: usize) -> Vec<&WeirdnessRecord> {
    records
        .iter()
        .filter(|record| record.num_features >= min_features)
        .collect()
}

/// The `n` highest-scoring records, descending. Ties keep input order.
pub fn top_weirdest<'a>(records: &[&'a WeirdnessRecord], n: usize) -> Vec<&'a WeirdnessRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| {
        b.weirdness_score
            .partial_cmp(&a.weirdness_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

/// The `n` lowest-scoring records, ascending. Ties keep input order.
pub fn most_normal<'a>(records: &[&'a WeirdnessRecord], n: usize) -> Vec<&'a WeirdnessRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| {
        a.weirdness_score
            .partial_cmp(&b.weirdness_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

/// Summary statistics over a set of weirdness scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreSummary {
    /// Number of scored languages
    pub count: usize,
    /// Mean weirdness score
    pub mean: f64,
    /// Median weirdness score
    pub median: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Minimum score
    pub min: f64,
    /// Maximum score
    pub max: f64,
}

impl ScoreSummary {
    /// Summarize the weirdness scores of a record set. An empty set yields
    /// an all-zero summary with `count == 0`.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a WeirdnessRecord>) -> Self {
        let mut scores: Vec<f64> = records.into_iter().map(|r| r.weirdness_score).collect();
        if scores.is_empty() {
            return Self::default();
        }

        scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = scores.len();
        let sum: f64 = scores.iter().sum();
        let mean = sum / n as f64;
        let variance = if n > 1 {
            scores.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let median = if n % 2 == 0 {
            (scores[n / 2 - 1] + scores[n / 2]) / 2.0
        } else {
            scores[n / 2]
        };

        Self {
            count: n,
            mean,
            median,
            std_dev: variance.sqrt(),
            min: scores[0],
            max: scores[n - 1],
        }
    }
}
