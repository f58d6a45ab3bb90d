//! Feature file reader
//!
//! Comma-separated, header first:
//!
//! ```text
//! instance,clauses,variables,ratio
//! i1,120,40,3.0
//! i2,300,75,4.0
//! ```
//!
//! The first column holds instance IDs; every other column is a numeric
//! feature. All rows must have the header's width.

use super::read_text;
use crate::error::ReadError;
use indexmap::IndexMap;
use std::path::Path;

/// Feature names plus one vector per instance, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    /// Feature column names (header minus the instance column)
    pub names: Vec<String>,
    /// Instance ID → feature vector
    pub rows: IndexMap<String, Vec<f64>>,
}

/// Read a feature file
///
/// # Errors
/// `ReadError::Io` if unreadable, otherwise see [`parse_feature_text`].
pub fn read_feature_file(path: impl AsRef<Path>) -> Result<FeatureTable, ReadError> {
    let path = path.as_ref();
    let text = read_text(path)?;
    parse_feature_text(&text, path)
}

/// Parse feature text; `origin` is only used in error messages
///
/// # Errors
/// - `MissingFeatureHeader` if there is no header or it has no feature column
/// - `InvalidFeatureValue` for a non-numeric cell
/// - `FeatureWidthMismatch` for a row of the wrong width
/// - `DuplicateFeatureRow` if an instance appears twice
pub fn parse_feature_text(text: &str, origin: &Path) -> Result<FeatureTable, ReadError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let header = lines.next().ok_or_else(|| ReadError::MissingFeatureHeader {
        path: origin.to_path_buf(),
    })?;
    let names: Vec<String> = split_row(header).skip(1).map(str::to_string).collect();
    if names.is_empty() {
        return Err(ReadError::MissingFeatureHeader {
            path: origin.to_path_buf(),
        });
    }

    let mut rows = IndexMap::new();
    for line in lines {
        let mut cells = split_row(line);
        let instance = cells.next().unwrap_or_default().to_string();

        let values = cells
            .map(|cell| {
                cell.parse::<f64>().map_err(|_| ReadError::InvalidFeatureValue {
                    path: origin.to_path_buf(),
                    instance: instance.clone(),
                    value: cell.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if values.len() != names.len() {
            return Err(ReadError::FeatureWidthMismatch {
                path: origin.to_path_buf(),
                instance,
                expected: names.len(),
                found: values.len(),
            });
        }
        if rows.contains_key(&instance) {
            return Err(ReadError::DuplicateFeatureRow {
                path: origin.to_path_buf(),
                instance,
            });
        }
        rows.insert(instance, values);
    }

    Ok(FeatureTable { names, rows })
}

fn split_row(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(str::trim)
}
