//! Training dataset loader.
//!
//! Reads a labeled CSV with one observation per row. Two header variants of
//! the heart-disease dataset family are supported: the UCI-style headers
//! (`age, sex, cp, chol, trestbps, thalach, num`) and the application-named
//! headers (`Age, Sex, Chest pain type, Cholesterol, BP, Max HR,
//! Heart Disease`). Labels may be an ordinal severity code (0 = absence,
//! >0 = presence) or a two-valued categorical (Absence/Presence); both map
//! to the same binary target.

use std::fs;
use std::path::Path;

use crate::domain::FEATURE_NAMES;

/// Accepted header spellings per canonical feature, lowercase.
const FEATURE_ALIASES: [&[&str]; 6] = [
    &["age"],
    &["sex"],
    &["chest pain type", "cp"],
    &["cholesterol", "chol"],
    &["bp", "trestbps"],
    &["max hr", "thalach"],
];

/// Accepted label column spellings, lowercase.
const LABEL_ALIASES: [&str; 2] = ["heart disease", "num"];

/// Errors from dataset loading or label mapping. Fatal for the resolution
/// attempt; the provider does not retry without a changed input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrainingError {
    #[error("cannot read dataset: {0}")]
    Read(String),

    #[error("dataset has no header row")]
    MissingHeader,

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: non-numeric value '{value}' in column '{column}'")]
    BadValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: unrecognized label '{value}'")]
    BadLabel { row: usize, value: String },

    #[error("dataset contains no observations")]
    Empty,
}

/// A schema-aligned design matrix plus binary labels.
#[derive(Debug, Clone)]
pub struct TrainingDataset {
    /// One row per observation, columns in [`FEATURE_NAMES`] order.
    pub rows: Vec<[f64; 6]>,
    /// Binary target: 1 = disease present, 0 = absent.
    pub labels: Vec<u8>,
}

impl TrainingDataset {
    /// Load and column-map a CSV dataset from disk.
    ///
    /// # Errors
    /// Returns [`TrainingError`] on unreadable files, missing columns,
    /// non-numeric cells, or unmappable labels.
    pub fn load(path: &Path) -> Result<Self, TrainingError> {
        let contents =
            fs::read_to_string(path).map_err(|e| TrainingError::Read(e.to_string()))?;
        Self::parse(&contents)
    }

    /// Parse CSV text into a dataset.
    ///
    /// # Errors
    /// Same taxonomy as [`TrainingDataset::load`].
    pub fn parse(contents: &str) -> Result<Self, TrainingError> {
        let mut lines = contents.lines().filter(|l| !l.trim().is_empty());
        let header = lines.next().ok_or(TrainingError::MissingHeader)?;
        let columns: Vec<String> = split_row(header)
            .into_iter()
            .map(|c| c.to_lowercase())
            .collect();

        // Map each canonical feature to its column index.
        let mut feature_idx = [0usize; 6];
        for (i, aliases) in FEATURE_ALIASES.iter().enumerate() {
            feature_idx[i] = columns
                .iter()
                .position(|c| aliases.contains(&c.as_str()))
                .ok_or_else(|| TrainingError::MissingColumn(FEATURE_NAMES[i].to_string()))?;
        }
        let label_idx = columns
            .iter()
            .position(|c| LABEL_ALIASES.contains(&c.as_str()))
            .ok_or_else(|| TrainingError::MissingColumn("Heart Disease".to_string()))?;

        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for (row_no, line) in lines.enumerate() {
            let cells = split_row(line);
            let mut row = [0.0f64; 6];
            for (i, &idx) in feature_idx.iter().enumerate() {
                let cell = cells.get(idx).map(String::as_str).unwrap_or("");
                row[i] = cell.parse::<f64>().map_err(|_| TrainingError::BadValue {
                    row: row_no + 1,
                    column: FEATURE_NAMES[i].to_string(),
                    value: cell.to_string(),
                })?;
            }
            let label_cell = cells.get(label_idx).map(String::as_str).unwrap_or("");
            labels.push(map_label(label_cell, row_no + 1)?);
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(TrainingError::Empty);
        }
        Ok(Self { rows, labels })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Any positive indication maps to 1, absence/zero to 0.
fn map_label(cell: &str, row: usize) -> Result<u8, TrainingError> {
    if let Ok(n) = cell.parse::<f64>() {
        return Ok(u8::from(n > 0.0));
    }
    match cell.to_lowercase().as_str() {
        "presence" => Ok(1),
        "absence" => Ok(0),
        _ => Err(TrainingError::BadLabel {
            row,
            value: cell.to_string(),
        }),
    }
}

/// Split a CSV row on commas, trimming whitespace and surrounding quotes.
/// Feature columns in this dataset family never contain embedded commas.
fn split_row(line: &str) -> Vec<String> {
    line.split(',')
        .map(|c| c.trim().trim_matches('"').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const UCI_CSV: &str = "\
age,sex,cp,trestbps,chol,thalach,num
63,1,1,145,233,150,0
67,1,4,160,286,108,2
41,0,2,130,204,172,0
";

    const APP_CSV: &str = "\
Age,Sex,Chest pain type,BP,Cholesterol,Max HR,Heart Disease
70,1,4,130,322,109,Presence
67,0,3,115,564,160,Absence
";

    #[test]
    fn test_uci_headers_and_ordinal_labels() {
        let ds = TrainingDataset::parse(UCI_CSV).expect("should parse");
        assert_eq!(ds.len(), 3);
        // Columns are reordered into canonical order: chol before BP swaps.
        assert_eq!(ds.rows[0], [63.0, 1.0, 1.0, 233.0, 145.0, 150.0]);
        // num 0 -> 0, num 2 -> 1
        assert_eq!(ds.labels, vec![0, 1, 0]);
    }

    #[test]
    fn test_application_headers_and_categorical_labels() {
        let ds = TrainingDataset::parse(APP_CSV).expect("should parse");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0], [70.0, 1.0, 4.0, 322.0, 130.0, 109.0]);
        assert_eq!(ds.labels, vec![1, 0]);
    }

    #[test]
    fn test_missing_column_is_named() {
        let err = TrainingDataset::parse("age,sex,cp,chol,thalach,num\n1,1,1,1,1,0\n")
            .unwrap_err();
        assert_eq!(err, TrainingError::MissingColumn("BP".to_string()));
    }

    #[test]
    fn test_bad_cell_reports_row_and_column() {
        let csv = "age,sex,cp,trestbps,chol,thalach,num\n63,1,one,145,233,150,0\n";
        match TrainingDataset::parse(csv).unwrap_err() {
            TrainingError::BadValue { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "Chest pain type");
                assert_eq!(value, "one");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unrecognized_label_rejected() {
        let csv = "age,sex,cp,trestbps,chol,thalach,num\n63,1,1,145,233,150,maybe\n";
        assert!(matches!(
            TrainingDataset::parse(csv).unwrap_err(),
            TrainingError::BadLabel { row: 1, .. }
        ));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let csv = "age,sex,cp,trestbps,chol,thalach,num\n";
        assert_eq!(TrainingDataset::parse(csv).unwrap_err(), TrainingError::Empty);
        assert_eq!(
            TrainingDataset::parse("").unwrap_err(),
            TrainingError::MissingHeader
        );
    }
}
