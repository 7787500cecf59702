//! WALS language table ingestion.
//!
//! Reads the WALS `language.csv` export: a fixed metadata prefix (wals
//! code, iso/glotto codes, name, coordinates, genus, family, macroarea,
//! country codes) followed by one column per typological feature. Empty
//! cells become missing values; they are never smuggled through as empty
//! strings or NaN.

use std::path::Path;

use tracing::info;

use crate::core::config::DatasetConfig;
use crate::core::dataset::{Dataset, LanguageRecord};
use crate::core::errors::{Result, XenoglotError};

/// Metadata header names expected in the WALS export.
const NAME_COLUMN: &str = "Name";
const CODE_COLUMN: &str = "wals_code";
const LATITUDE_COLUMN: &str = "latitude";
const LONGITUDE_COLUMN: &str = "longitude";
const FAMILY_COLUMN: &str = "family";
const GENUS_COLUMN: &str = "genus";
const MACROAREA_COLUMN: &str = "macroarea";

/// Load a WALS-style language table from a CSV file.
///
/// Columns past the configured metadata prefix are treated as feature
/// columns in declaration order. Malformed metadata (absent name or code
/// column, unparseable coordinates) is an input error; missing feature
/// values are not.
pub fn load_dataset(path: impl AsRef<Path>, config: &DatasetConfig) -> Result<Dataset> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        XenoglotError::parse_with_location(
            format!("Failed to open dataset: {e}"),
            path.display().to_string(),
            None,
        )
    })?;

    let headers = reader.headers()?.clone();
    if headers.len() <= config.metadata_columns {
        return Err(XenoglotError::parse_with_location(
            format!(
                "Expected more than {} columns, found {}",
                config.metadata_columns,
                headers.len()
            ),
            path.display().to_string(),
            None,
        ));
    }

    let column_index = |name: &str| -> Result<usize> {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            XenoglotError::parse_with_location(
                format!("Missing required column '{name}'"),
                path.display().to_string(),
                None,
            )
        })
    };

    let name_idx = column_index(NAME_COLUMN)?;
    let code_idx = column_index(CODE_COLUMN)?;
    let latitude_idx = headers.iter().position(|h| h == LATITUDE_COLUMN);
    let longitude_idx = headers.iter().position(|h| h == LONGITUDE_COLUMN);
    let family_idx = headers.iter().position(|h| h == FAMILY_COLUMN);
    let genus_idx = headers.iter().position(|h| h == GENUS_COLUMN);
    let macroarea_idx = headers.iter().position(|h| h == MACROAREA_COLUMN);

    let feature_ids: Vec<String> = headers
        .iter()
        .skip(config.metadata_columns)
        .map(ToString::to_string)
        .collect();

    let mut dataset = Dataset::new(feature_ids);

    for (row_number, row) in reader.records().enumerate() {
        let row = row?;

        let field = |idx: usize| row.get(idx).unwrap_or("").trim();
        let optional = |idx: Option<usize>| -> Option<String> {
            idx.map(|i| field(i)).filter(|s| !s.is_empty()).map(String::from)
        };
        let coordinate = |idx: Option<usize>| -> Result<Option<f64>> {
            match idx.map(|i| field(i)).filter(|s| !s.is_empty()) {
                Some(raw) => raw.parse::<f64>().map(Some).map_err(|e| {
                    XenoglotError::parse_with_location(
                        format!("Invalid coordinate '{raw}': {e}"),
                        path.display().to_string(),
                        Some(row_number + 1),
                    )
                }),
                None => Ok(None),
            }
        };

        let mut record = LanguageRecord::new(field(name_idx), field(code_idx));
        record.latitude = coordinate(latitude_idx)?;
        record.longitude = coordinate(longitude_idx)?;
        record.family = optional(family_idx);
        record.genus = optional(genus_idx);
        record.macroarea = optional(macroarea_idx);

        for (offset, feature) in dataset.feature_ids.iter().enumerate() {
            let value = field(config.metadata_columns + offset);
            let observed = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
            record.features.insert(feature.clone(), observed);
        }

        dataset.push(record);
    }

    info!(
        languages = dataset.len(),
        features = dataset.feature_ids.len(),
        path = %path.display(),
        "loaded dataset"
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "wals_code,iso_code,glottocode,Name,latitude,longitude,genus,family,macroarea,countrycodes,1A Consonant Inventories,10A Vowel Nasalization";

    fn write_fixture(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn test_loads_metadata_and_features() {
        let file = write_fixture(&[
            "abk,abk,abkh1244,Abkhaz,43.08,41.0,Northwest Caucasian,Northwest Caucasian,Eurasia,GE RU,5 Large,2 Contrast absent",
        ]);

        let dataset = load_dataset(file.path(), &DatasetConfig::default()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(
            dataset.feature_ids,
            vec!["1A Consonant Inventories", "10A Vowel Nasalization"]
        );

        let record = &dataset.languages[0];
        assert_eq!(record.name, "Abkhaz");
        assert_eq!(record.wals_code, "abk");
        assert_eq!(record.latitude, Some(43.08));
        assert_eq!(record.family.as_deref(), Some("Northwest Caucasian"));
        assert_eq!(
            record.feature_value("1A Consonant Inventories"),
            Some("5 Large")
        );
    }

    #[test]
    fn test_empty_cells_become_missing() {
        let file = write_fixture(&["aab,,,Arapesh,,,Kombio-Arapesh,Torricelli,Papunesia,PG,,3 Small"]);

        let dataset = load_dataset(file.path(), &DatasetConfig::default()).unwrap();
        let record = &dataset.languages[0];
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, None);
        assert_eq!(record.feature_value("1A Consonant Inventories"), None);
        assert_eq!(record.feature_value("10A Vowel Nasalization"), Some("3 Small"));
    }

    #[test]
    fn test_invalid_coordinate_is_parse_error() {
        let file = write_fixture(&["abc,,,Broken,north,41.0,G,F,Eurasia,XX,5 Large,"]);

        let err = load_dataset(file.path(), &DatasetConfig::default()).unwrap_err();
        assert!(matches!(err, XenoglotError::Parse { record: Some(1), .. }));
    }

    #[test]
    fn test_too_few_columns_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "wals_code,Name").unwrap();
        writeln!(file, "abk,Abkhaz").unwrap();

        let err = load_dataset(file.path(), &DatasetConfig::default()).unwrap_err();
        assert!(matches!(err, XenoglotError::Parse { .. }));
    }
}
