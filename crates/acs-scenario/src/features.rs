//! Instance features aligned to the training order
//!
//! The feature file gives one vector per instance in whatever order the file
//! uses. Downstream models index features by training position, so the
//! loader also builds a dense row-major matrix whose row `i` belongs to
//! `train[i]`.

use crate::error::{ScenarioError, ScenarioResult};
use crate::io::{read_feature_file, FeatureTable};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

/// Dense row-major feature matrix
///
/// Only built by [`FeatureVectors::align`], which guarantees
/// `data.len() == rows * cols`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Number of rows (training instances)
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (features)
    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row `i`, `None` past the end
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.rows {
            return None;
        }
        self.data.get(i * self.cols..(i + 1) * self.cols)
    }

    /// Iterate rows in order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Flat row-major storage
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Per-instance feature vectors plus the train-aligned matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVectors {
    names: Vec<String>,
    map: IndexMap<String, Vec<f64>>,
    matrix: FeatureMatrix,
}

impl FeatureVectors {
    /// Load a feature file and align it to `train`
    ///
    /// # Errors
    /// - `Read` if the file cannot be read or is malformed
    /// - `MissingFeatureEntry` naming the first training instance without a row
    pub fn load(path: &Path, train: &[String]) -> ScenarioResult<Self> {
        let table = read_feature_file(path)?;
        let vectors = Self::align(table, train)?;
        tracing::debug!(
            "Loaded {} features for {} instances from {}",
            vectors.names.len(),
            vectors.map.len(),
            path.display()
        );
        Ok(vectors)
    }

    /// Build the aligned matrix from an already-read table
    ///
    /// # Errors
    /// - `FeatureWidthMismatch` if any vector differs in length from `names`
    /// - `MissingFeatureEntry` naming the first training instance absent
    ///   from the table
    pub fn align(table: FeatureTable, train: &[String]) -> ScenarioResult<Self> {
        let FeatureTable { names, rows } = table;
        let cols = names.len();

        if let Some((instance, vector)) = rows.iter().find(|(_, v)| v.len() != cols) {
            return Err(ScenarioError::FeatureWidthMismatch {
                instance: instance.clone(),
                expected: cols,
                found: vector.len(),
            });
        }

        let mut data = Vec::with_capacity(train.len() * cols);
        for id in train {
            let vector = rows
                .get(id)
                .ok_or_else(|| ScenarioError::MissingFeatureEntry(id.clone()))?;
            data.extend_from_slice(vector);
        }

        Ok(Self {
            names,
            map: rows,
            matrix: FeatureMatrix {
                rows: train.len(),
                cols,
                data,
            },
        })
    }

    /// Feature names, in column order
    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Instance ID → feature vector, for every row of the file
    #[inline]
    #[must_use]
    pub fn map(&self) -> &IndexMap<String, Vec<f64>> {
        &self.map
    }

    /// Features of one instance
    #[inline]
    #[must_use]
    pub fn get(&self, instance: &str) -> Option<&[f64]> {
        self.map.get(instance).map(Vec::as_slice)
    }

    /// Matrix with one row per training instance, in training order
    #[inline]
    #[must_use]
    pub fn matrix(&self) -> &FeatureMatrix {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(rows: &[(&str, [f64; 2])]) -> FeatureTable {
        FeatureTable {
            names: vec!["f1".into(), "f2".into()],
            rows: rows.iter().map(|(id, v)| ((*id).to_string(), v.to_vec())).collect(),
        }
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn rows_follow_training_order() {
        let t = table(&[("c", [3.0, 30.0]), ("a", [1.0, 10.0]), ("b", [2.0, 20.0])]);
        let fv = FeatureVectors::align(t, &ids(&["a", "b", "c"])).unwrap();

        let m = fv.matrix();
        assert_eq!((m.rows(), m.cols()), (3, 2));
        assert_eq!(m.row(0), Some(&[1.0, 10.0][..]));
        assert_eq!(m.row(1), Some(&[2.0, 20.0][..]));
        assert_eq!(m.row(2), Some(&[3.0, 30.0][..]));
        assert_eq!(m.row(3), None);
        assert_eq!(m.iter_rows().count(), 3);
    }

    #[test]
    fn missing_training_instance_is_error() {
        let t = table(&[("a", [1.0, 10.0]), ("c", [3.0, 30.0])]);
        let err = FeatureVectors::align(t, &ids(&["a", "b", "c"])).unwrap_err();
        assert!(matches!(err, ScenarioError::MissingFeatureEntry(ref id) if id == "b"));
    }

    #[test]
    fn duplicate_training_ids_repeat_rows() {
        let t = table(&[("a", [1.0, 10.0]), ("b", [2.0, 20.0])]);
        let fv = FeatureVectors::align(t, &ids(&["b", "a", "b"])).unwrap();
        let rows: Vec<&[f64]> = fv.matrix().iter_rows().collect();
        assert_eq!(rows, vec![&[2.0, 20.0][..], &[1.0, 10.0][..], &[2.0, 20.0][..]]);
    }

    #[test]
    fn extra_rows_stay_in_map() {
        let t = table(&[("a", [1.0, 10.0]), ("unused", [0.0, 0.0])]);
        let fv = FeatureVectors::align(t, &ids(&["a"])).unwrap();
        assert_eq!(fv.matrix().rows(), 1);
        assert_eq!(fv.map().len(), 2);
        assert_eq!(fv.get("unused"), Some(&[0.0, 0.0][..]));
    }

    #[test]
    fn uneven_row_widths_rejected() {
        let t = FeatureTable {
            names: vec!["f1".into(), "f2".into()],
            rows: [("a".to_string(), vec![1.0])].into_iter().collect(),
        };
        let err = FeatureVectors::align(t, &ids(&["a", "a"])).unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::FeatureWidthMismatch { ref instance, expected: 2, found: 1 } if instance == "a"
        ));
    }

    #[test]
    fn unused_row_width_also_checked() {
        let t = FeatureTable {
            names: vec!["f1".into()],
            rows: [("a".to_string(), vec![1.0]), ("extra".to_string(), vec![1.0, 2.0])]
                .into_iter()
                .collect(),
        };
        assert!(matches!(
            FeatureVectors::align(t, &ids(&["a"])),
            Err(ScenarioError::FeatureWidthMismatch { .. })
        ));
    }

    #[test]
    fn every_row_has_matrix_width() {
        let t = table(&[("a", [1.0, 10.0]), ("b", [2.0, 20.0])]);
        let fv = FeatureVectors::align(t, &ids(&["a", "b", "a"])).unwrap();
        let m = fv.matrix();
        assert_eq!(m.as_slice().len(), m.rows() * m.cols());
        for i in 0..m.rows() {
            assert_eq!(m.row(i).map(<[f64]>::len), Some(m.cols()));
        }
    }

    #[test]
    fn default_matrix_yields_no_rows() {
        let m = FeatureMatrix::default();
        assert_eq!(m.row(0), None);
        assert_eq!(m.iter_rows().count(), 0);
    }

    #[test]
    fn empty_training_set_gives_empty_matrix() {
        let fv = FeatureVectors::align(table(&[("a", [1.0, 10.0])]), &[]).unwrap();
        assert_eq!(fv.matrix().rows(), 0);
        assert_eq!(fv.matrix().iter_rows().count(), 0);
        assert_eq!(fv.names(), &["f1".to_string(), "f2".to_string()]);
    }
}
