//! Report generation: tabular/JSON exports and the console summary.
//!
//! All persisted representations preserve the core field semantics exactly:
//! missing coordinates serialize as explicit absent markers (empty CSV
//! fields, omitted JSON records), never as zero or a stringified NaN.

use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use serde::Serialize;
use tracing::info;

use crate::api::results::AnalysisResults;
use crate::core::config::XenoglotConfig;
use crate::core::errors::{Result, XenoglotError};
use crate::core::weirdness::WeirdnessRecord;

/// One language as projected into the map-feed JSON. Only languages with
/// both coordinates present are projected.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MapLanguage<'a> {
    name: &'a str,
    lat: f64,
    lon: f64,
    family: &'a str,
    genus: &'a str,
    weirdness: f64,
    num_features: usize,
    top_features: &'a [crate::core::weirdness::FeatureContribution],
}

/// Writes analysis results to the configured report files and renders the
/// console summary.
#[derive(Debug)]
pub struct ReportGenerator {
    config: XenoglotConfig,
}

impl ReportGenerator {
    /// Create a generator bound to a configuration
    pub fn new(config: XenoglotConfig) -> Self {
        Self { config }
    }

    /// Write all report files, returning the paths written.
    pub fn write_all(&self, results: &AnalysisResults) -> Result<Vec<PathBuf>> {
        let out_dir = &self.config.io.output_dir;
        fs::create_dir_all(out_dir).map_err(|e| {
            XenoglotError::io(
                format!("Failed to create output directory: {}", out_dir.display()),
                e,
            )
        })?;

        let scores_path = out_dir.join(&self.config.io.scores_csv);
        self.write_scores_csv(results, &scores_path)?;

        let map_path = out_dir.join(&self.config.io.map_json);
        self.write_map_json(results, &map_path)?;

        let stats_path = out_dir.join(&self.config.io.feature_stats_json);
        self.write_feature_stats_json(results, &stats_path)?;

        info!(directory = %out_dir.display(), "reports written");
        Ok(vec![scores_path, map_path, stats_path])
    }

    /// Write the per-language scores table.
    fn write_scores_csv(&self, results: &AnalysisResults, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            "name",
            "wals_code",
            "latitude",
            "longitude",
            "family",
            "genus",
            "macroarea",
            "weirdness_score",
            "num_features",
            "top_weird_features",
        ])?;

        let float_field = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        for record in &results.records {
            let row = vec![
                record.name.clone(),
                record.wals_code.clone(),
                float_field(record.latitude),
                float_field(record.longitude),
                record.family.clone().unwrap_or_default(),
                record.genus.clone().unwrap_or_default(),
                record.macroarea.clone().unwrap_or_default(),
                record.weirdness_score.to_string(),
                record.num_features.to_string(),
                serde_json::to_string(&record.top_weird_features)?,
            ];
            writer.write_record(&row)?;
        }

        writer.flush().map_err(|e| {
            XenoglotError::io(format!("Failed to write scores CSV: {}", path.display()), e)
        })?;
        Ok(())
    }

    /// Write the map-feed JSON: only languages with both coordinates,
    /// classification defaulted to "Unknown", contributions truncated to
    /// the projection count.
    fn write_map_json(&self, results: &AnalysisResults, path: &Path) -> Result<()> {
        let top_k = self.config.scoring.top_k_projected;
        let map_data: Vec<MapLanguage> = results
            .records
            .iter()
            .filter_map(|record| {
                let (lat, lon) = (record.latitude?, record.longitude?);
                Some(MapLanguage {
                    name: &record.name,
                    lat,
                    lon,
                    family: record.family.as_deref().unwrap_or("Unknown"),
                    genus: record.genus.as_deref().unwrap_or("Unknown"),
                    weirdness: record.weirdness_score,
                    num_features: record.num_features,
                    top_features: &record.top_weird_features
                        [..top_k.min(record.top_weird_features.len())],
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&map_data)?;
        fs::write(path, json).map_err(|e| {
            XenoglotError::io(format!("Failed to write map JSON: {}", path.display()), e)
        })
    }

    /// Write per-feature observation statistics.
    fn write_feature_stats_json(&self, results: &AnalysisResults, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&results.feature_stats)?;
        fs::write(path, json).map_err(|e| {
            XenoglotError::io(
                format!("Failed to write feature stats: {}", path.display()),
                e,
            )
        })
    }

    /// Render the console summary: the two ranking blocks and the two
    /// statistics views.
    pub fn render_console(&self, results: &AnalysisResults) {
        let n = self.config.scoring.ranking_size;
        let top_k = self.config.scoring.top_k_projected;
        let min_features = results.min_features;

        println!(
            "\nScored {} languages ({} with at least {} features)",
            results.scored_count(),
            results.robust_records().len(),
            min_features
        );

        let rule = "=".repeat(70);
        println!("\n{rule}");
        println!(
            "{}",
            style(format!(
                "TOP {n} WEIRDEST LANGUAGES (at least {min_features} features)"
            ))
            .bold()
        );
        println!("{rule}");
        for record in results.weirdest(n) {
            println!(
                "\n{} (Family: {})",
                style(&record.name).cyan().bold(),
                record.family.as_deref().unwrap_or("Unknown")
            );
            println!("  Weirdness Score: {:.4}", record.weirdness_score);
            println!("  Based on {} features", record.num_features);
            println!("  Top weird features:");
            for contribution in record.top_weird_features.iter().take(top_k) {
                println!(
                    "    - {}: {} (rarity: {:.3})",
                    contribution.feature, contribution.value, contribution.rarity
                );
            }
        }

        println!("\n{rule}");
        println!(
            "{}",
            style(format!(
                "TOP {n} MOST NORMAL LANGUAGES (at least {min_features} features)"
            ))
            .bold()
        );
        println!("{rule}");
        for record in results.most_normal(n) {
            println!(
                "{}: {:.4} ({} features, Family: {})",
                style(&record.name).green(),
                record.weirdness_score,
                record.num_features,
                record.family.as_deref().unwrap_or("Unknown")
            );
        }

        Self::render_summary_block("STATISTICS (all scored languages)", &results.summary_all);
        Self::render_summary_block(
            &format!("STATISTICS (languages with at least {min_features} features)"),
            &results.summary_robust,
        );
    }

    fn render_summary_block(title: &str, summary: &crate::core::ranking::ScoreSummary) {
        let rule = "=".repeat(70);
        println!("\n{rule}");
        println!("{}", style(title).bold());
        println!("{rule}");
        println!("Mean weirdness: {:.4}", summary.mean);
        println!("Median weirdness: {:.4}", summary.median);
        println!("Std deviation: {:.4}", summary.std_dev);
        println!("Min: {:.4}", summary.min);
        println!("Max: {:.4}", summary.max);
    }
}

/// Project a record's contributions to the external truncation count.
/// Exposed for consumers building their own feeds.
pub fn projected_contributions(
    record: &WeirdnessRecord,
    top_k: usize,
) -> &[crate::core::weirdness::FeatureContribution] {
    &record.top_weird_features[..top_k.min(record.top_weird_features.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::engine::XenoglotEngine;
    use crate::core::dataset::{Dataset, LanguageRecord};

    fn analyzed_results() -> AnalysisResults {
        let mut dataset = Dataset::new(vec!["F".to_string()]);
        for i in 0..3 {
            dataset.push(
                LanguageRecord::new(format!("common{i}"), format!("c{i}"))
                    .with_coordinates(10.0 + i as f64, 20.0)
                    .with_feature("F", "A"),
            );
        }
        // No coordinates on the outlier: must not appear in the map feed.
        dataset.push(LanguageRecord::new("outlier", "out").with_feature("F", "B"));

        let engine = XenoglotEngine::new(XenoglotConfig::default()).unwrap();
        engine.analyze(&dataset).unwrap()
    }

    fn generator_for(dir: &std::path::Path) -> ReportGenerator {
        let mut config = XenoglotConfig::default();
        config.io.output_dir = dir.to_path_buf();
        ReportGenerator::new(config)
    }

    #[test]
    fn test_write_all_produces_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator_for(dir.path());

        let paths = generator.write_all(&analyzed_results()).unwrap();
        assert_eq!(paths.len(), 3);
        for path in &paths {
            assert!(path.exists(), "missing report file {}", path.display());
        }
    }

    #[test]
    fn test_map_json_skips_records_without_coordinates() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator_for(dir.path());
        let results = analyzed_results();

        generator.write_all(&results).unwrap();
        let json = fs::read_to_string(dir.path().join("language_data.json")).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.len(), 3);
        assert!(parsed.iter().all(|entry| entry["name"] != "outlier"));
        assert_eq!(parsed[0]["family"], "Unknown");
        assert!(parsed[0]["numFeatures"].is_u64());
    }

    #[test]
    fn test_scores_csv_serializes_missing_coordinates_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator_for(dir.path());

        generator.write_all(&analyzed_results()).unwrap();
        let csv_text =
            fs::read_to_string(dir.path().join("language_weirdness_scores.csv")).unwrap();
        let outlier_line = csv_text
            .lines()
            .find(|line| line.starts_with("outlier"))
            .unwrap();

        // name,wals_code,latitude,longitude,... with absent coordinates.
        assert!(outlier_line.starts_with("outlier,out,,,"));
        assert!(!outlier_line.contains("NaN"));
    }

    #[test]
    fn test_projection_truncates() {
        let results = analyzed_results();
        let record = &results.records[0];
        assert!(projected_contributions(record, 3).len() <= 3);
        assert_eq!(
            projected_contributions(record, 0).len(),
            0
        );
    }
}
