//! End-to-end analysis tests: CSV ingestion through report output.

use std::io::Write;

use approx::assert_abs_diff_eq;

use xenoglot_rs::core::dataset::{Dataset, LanguageRecord};
use xenoglot_rs::io::{reports::ReportGenerator, wals};
use xenoglot_rs::{XenoglotConfig, XenoglotEngine};

const HEADER: &str = "wals_code,iso_code,glottocode,Name,latitude,longitude,genus,family,macroarea,countrycodes,10A Vowel Nasalization,\"81A Order of Subject, Object and Verb\"";

fn fixture_csv() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    // Three languages share the common values; one diverges on both
    // features; one has no feature data at all.
    let rows = [
        "aaa,,,Alpha,1.0,1.0,G1,F1,Africa,XX,\"1 Contrast present\",\"1 SOV\"",
        "bbb,,,Beta,2.0,2.0,G1,F1,Africa,XX,\"1 Contrast present\",\"1 SOV\"",
        "ccc,,,Gamma,3.0,3.0,G2,F2,Eurasia,YY,\"1 Contrast present\",\"1 SOV\"",
        "ddd,,,Delta,4.0,4.0,G3,F3,Papunesia,ZZ,\"2 Contrast absent\",\"2 SVO\"",
        "eee,,,Epsilon,,,G4,F4,Australia,AU,,",
    ];
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}

fn permissive_config() -> XenoglotConfig {
    let mut config = XenoglotConfig::default();
    config.scoring.min_features = 1;
    config
}

#[test]
fn csv_to_scored_records() {
    let file = fixture_csv();
    let config = permissive_config();

    let dataset = wals::load_dataset(file.path(), &config.dataset).unwrap();
    assert_eq!(dataset.len(), 5);
    assert_eq!(dataset.feature_ids.len(), 2);

    let engine = XenoglotEngine::new(config).unwrap();
    let results = engine.analyze(&dataset).unwrap();

    // Epsilon has no scorable features and must be absent.
    assert_eq!(results.scored_count(), 4);
    assert!(results.records.iter().all(|r| r.name != "Epsilon"));
    assert!(results.records.iter().all(|r| r.num_features > 0));

    // Delta is rare on both features: rarity 0.75 each.
    let delta = results.records.iter().find(|r| r.name == "Delta").unwrap();
    assert_abs_diff_eq!(delta.weirdness_score, 0.75, epsilon = 1e-12);
    assert_eq!(delta.num_features, 2);

    let alpha = results.records.iter().find(|r| r.name == "Alpha").unwrap();
    assert_abs_diff_eq!(alpha.weirdness_score, 0.25, epsilon = 1e-12);

    // Delta tops the robust ranking, Alpha leads the normal block.
    let weirdest = results.weirdest(1);
    assert_eq!(weirdest[0].name, "Delta");
    let normal = results.most_normal(1);
    assert_eq!(normal[0].name, "Alpha");
}

#[test]
fn per_record_score_matches_contributions() {
    let file = fixture_csv();
    let config = permissive_config();
    let dataset = wals::load_dataset(file.path(), &config.dataset).unwrap();
    let results = XenoglotEngine::new(config).unwrap().analyze(&dataset).unwrap();

    for record in &results.records {
        assert!(record.top_weird_features.len() <= 5);
        assert_eq!(
            record.top_weird_features.len(),
            record.num_features.min(5)
        );
        for window in record.top_weird_features.windows(2) {
            assert!(window[0].rarity >= window[1].rarity);
        }
        // With num_features <= 5 the stored contributions are the full
        // basis, so the mean must reproduce the score.
        let mean: f64 = record
            .top_weird_features
            .iter()
            .map(|c| c.rarity)
            .sum::<f64>()
            / record.top_weird_features.len() as f64;
        assert_abs_diff_eq!(record.weirdness_score, mean, epsilon = 1e-12);
    }
}

#[test]
fn robust_threshold_excludes_sparse_languages() {
    let file = fixture_csv();
    let mut config = XenoglotConfig::default();
    config.scoring.min_features = 2;

    let dataset = wals::load_dataset(file.path(), &config.dataset).unwrap();
    let results = XenoglotEngine::new(config).unwrap().analyze(&dataset).unwrap();

    // All four scored languages have both features here.
    assert_eq!(results.robust_records().len(), 4);
    assert_eq!(results.summary_robust.count, 4);
    assert_eq!(results.summary_all.count, 4);

    // The two summary views are independent: equal membership means equal
    // statistics, but both are computed.
    assert_abs_diff_eq!(
        results.summary_all.mean,
        results.summary_robust.mean,
        epsilon = 1e-12
    );
}

#[test]
fn reports_round_trip_through_filesystem() {
    let file = fixture_csv();
    let dir = tempfile::tempdir().unwrap();

    let mut config = permissive_config();
    config.io.output_dir = dir.path().to_path_buf();

    let dataset = wals::load_dataset(file.path(), &config.dataset).unwrap();
    let results = XenoglotEngine::new(config.clone()).unwrap().analyze(&dataset).unwrap();

    let generator = ReportGenerator::new(config);
    let paths = generator.write_all(&results).unwrap();
    assert_eq!(paths.len(), 3);

    // Epsilon had no coordinates and no score; the map feed holds the four
    // scored languages, all of which have coordinates.
    let map_json = std::fs::read_to_string(dir.path().join("language_data.json")).unwrap();
    let map: Vec<serde_json::Value> = serde_json::from_str(&map_json).unwrap();
    assert_eq!(map.len(), 4);
    for entry in &map {
        assert!(entry["topFeatures"].as_array().unwrap().len() <= 3);
        assert!(entry["weirdness"].is_f64());
    }

    let stats_json = std::fs::read_to_string(dir.path().join("feature_stats.json")).unwrap();
    let stats: serde_json::Value = serde_json::from_str(&stats_json).unwrap();
    assert_eq!(
        stats["10A Vowel Nasalization"]["total_responses"]
            .as_u64()
            .unwrap(),
        4
    );
}

#[test]
fn two_runs_produce_identical_output() {
    let mut dataset = Dataset::new(vec!["F1".to_string(), "F2".to_string()]);
    for (name, v1, v2) in [
        ("A", Some("x"), Some("p")),
        ("B", Some("x"), None),
        ("C", Some("y"), Some("q")),
    ] {
        let mut record = LanguageRecord::new(name, name.to_lowercase());
        record.features.insert("F1".to_string(), v1.map(String::from));
        record.features.insert("F2".to_string(), v2.map(String::from));
        dataset.push(record);
    }

    let engine = XenoglotEngine::new(permissive_config()).unwrap();
    let first = engine.analyze(&dataset).unwrap();
    let second = engine.analyze(&dataset).unwrap();

    assert_eq!(
        serde_json::to_string(&first.rarity_table).unwrap(),
        serde_json::to_string(&second.rarity_table).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&first.records).unwrap(),
        serde_json::to_string(&second.records).unwrap()
    );
    assert_eq!(first.feature_stats, second.feature_stats);
}
