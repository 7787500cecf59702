//! Typological dataset model.
//!
//! This module provides the core data structures for weirdness analysis:
//! language records with identifying metadata and categorical feature
//! values, grouped into an immutable in-memory dataset. Missing feature
//! values are modeled as `None`, never as a sentinel string, so real
//! categorical labels can never collide with the absent marker.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Unique identifier for a typological feature (a WALS column name)
pub type FeatureId = String;

/// One language row from the typological table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageRecord {
    /// Language name
    pub name: String,

    /// WALS language code
    pub wals_code: String,

    /// Latitude in decimal degrees, if recorded
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees, if recorded
    pub longitude: Option<f64>,

    /// Language family, if recorded
    pub family: Option<String>,

    /// Genus within the family, if recorded
    pub genus: Option<String>,

    /// Macroarea, if recorded
    pub macroarea: Option<String>,

    /// Categorical feature values keyed by feature id; `None` marks a
    /// missing observation. Insertion order follows column declaration
    /// order so per-record iteration is deterministic.
    pub features: IndexMap<FeatureId, Option<String>>,
}

impl LanguageRecord {
    /// Create a new language record with no feature data
    pub fn new(name: impl Into<String>, wals_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wals_code: wals_code.into(),
            latitude: None,
            longitude: None,
            family: None,
            genus: None,
            macroarea: None,
            features: IndexMap::new(),
        }
    }

    /// Set the coordinates for this language
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Set the genealogical classification for this language
    pub fn with_classification(
        mut self,
        family: impl Into<String>,
        genus: impl Into<String>,
        macroarea: impl Into<String>,
    ) -> Self {
        self.family = Some(family.into());
        self.genus = Some(genus.into());
        self.macroarea = Some(macroarea.into());
        self
    }

    /// Record an observed value for a feature
    pub fn with_feature(mut self, feature: impl Into<FeatureId>, value: impl Into<String>) -> Self {
        self.features.insert(feature.into(), Some(value.into()));
        self
    }

    /// Record a feature as explicitly missing
    pub fn with_missing_feature(mut self, feature: impl Into<FeatureId>) -> Self {
        self.features.insert(feature.into(), None);
        self
    }

    /// Get the observed value for a feature, if present
    pub fn feature_value(&self, feature: &str) -> Option<&str> {
        self.features.get(feature).and_then(|v| v.as_deref())
    }

    /// Number of features with a non-missing observation
    pub fn observed_feature_count(&self) -> usize {
        self.features.values().filter(|v| v.is_some()).count()
    }
}

/// An immutable, in-memory typological table: ordered language records plus
/// the declared feature column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Language rows in input order
    pub languages: Vec<LanguageRecord>,

    /// Feature ids in column-declaration order
    pub feature_ids: Vec<FeatureId>,
}

impl Dataset {
    /// Create a dataset with a declared feature column order
    pub fn new(feature_ids: Vec<FeatureId>) -> Self {
        Self {
            languages: Vec::new(),
            feature_ids,
        }
    }

    /// Append a language record
    pub fn push(&mut self, record: LanguageRecord) {
        self.languages.push(record);
    }

    /// Number of language records
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether the dataset has no language records
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Iterate the non-missing values of one feature across all languages,
    /// in input row order.
    pub fn observed_values<'a>(&'a self, feature: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.languages
            .iter()
            .filter_map(move |record| record.feature_value(feature))
    }
}
