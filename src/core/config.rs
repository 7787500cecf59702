//! Configuration types and management for xenoglot-rs.
//!
//! Nested configuration sections with canonical defaults, per-section
//! validation, and YAML round-tripping for the CLI surface.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, XenoglotError};

/// Main configuration for the xenoglot analysis engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct XenoglotConfig {
    /// Dataset layout settings
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Scoring and ranking settings
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// I/O and report settings
    #[serde(default)]
    pub io: IoConfig,
}

impl Default for XenoglotConfig {
    fn default() -> Self {
        Self::new_with_defaults()
    }
}

impl XenoglotConfig {
    /// Construct a configuration using the canonical default values used
    /// across the CLI and public API layers. Keeping this in one place
    /// prevents the configuration surfaces from drifting apart.
    pub(crate) fn new_with_defaults() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            scoring: ScoringConfig::default(),
            io: IoConfig::default(),
        }
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            XenoglotError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_yaml::from_str(&content).map_err(Into::into)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            XenoglotError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        self.dataset.validate()?;
        self.scoring.validate()?;
        self.io.validate()?;
        Ok(())
    }
}

/// Dataset layout configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetConfig {
    /// Number of leading metadata columns before feature columns begin.
    /// The WALS language table carries name, code, coordinates, family,
    /// genus, macroarea and country codes in its first ten columns.
    pub metadata_columns: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            metadata_columns: 10,
        }
    }
}

impl DatasetConfig {
    /// Validate dataset settings
    pub fn validate(&self) -> Result<()> {
        if self.metadata_columns == 0 {
            return Err(XenoglotError::config_field(
                "metadata_columns must be at least 1 (the name column)",
                "dataset.metadata_columns",
            ));
        }
        Ok(())
    }
}

/// Scoring and ranking configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    /// Minimum number of scored features for a language to enter the
    /// robust ranking subset.
    pub min_features: usize,

    /// Number of top contributions stored on each weirdness record.
    pub top_k_stored: usize,

    /// Number of contributions kept when projecting records to external
    /// formats (map JSON, console report).
    pub top_k_projected: usize,

    /// Number of languages shown in each ranking block of the report.
    pub ranking_size: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            // The reference behavior filtered on 30 while printing a stale
            // "10" in a label; 30 is the value actually applied.
            min_features: 30,
            top_k_stored: 5,
            top_k_projected: 3,
            ranking_size: 10,
        }
    }
}

impl ScoringConfig {
    /// Validate scoring settings
    pub fn validate(&self) -> Result<()> {
        if self.min_features == 0 {
            return Err(XenoglotError::config_field(
                "min_features must be at least 1",
                "scoring.min_features",
            ));
        }
        if self.top_k_stored == 0 {
            return Err(XenoglotError::config_field(
                "top_k_stored must be at least 1",
                "scoring.top_k_stored",
            ));
        }
        if self.top_k_projected > self.top_k_stored {
            return Err(XenoglotError::config_field(
                format!(
                    "top_k_projected ({}) cannot exceed top_k_stored ({})",
                    self.top_k_projected, self.top_k_stored
                ),
                "scoring.top_k_projected",
            ));
        }
        if self.ranking_size == 0 {
            return Err(XenoglotError::config_field(
                "ranking_size must be at least 1",
                "scoring.ranking_size",
            ));
        }
        Ok(())
    }
}

/// I/O and report configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IoConfig {
    /// Directory where report files are written
    pub output_dir: PathBuf,

    /// File name for the per-language scores CSV
    pub scores_csv: String,

    /// File name for the map-feed JSON
    pub map_json: String,

    /// File name for the per-feature statistics JSON
    pub feature_stats_json: String,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            scores_csv: "language_weirdness_scores.csv".to_string(),
            map_json: "language_data.json".to_string(),
            feature_stats_json: "feature_stats.json".to_string(),
        }
    }
}

impl IoConfig {
    /// Validate I/O settings
    pub fn validate(&self) -> Result<()> {
        for (name, field) in [
            (&self.scores_csv, "io.scores_csv"),
            (&self.map_json, "io.map_json"),
            (&self.feature_stats_json, "io.feature_stats_json"),
        ] {
            if name.is_empty() {
                return Err(XenoglotError::config_field(
                    "report file name cannot be empty",
                    field,
                ));
            }
        }
        Ok(())
    }
}
