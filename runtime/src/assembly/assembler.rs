//! Reindex a feature record against the schema into a single fixed-width row.

use super::schema::FeatureSchema;
use crate::features::{FeatureName, FeatureRecord};
use serde::Serialize;

/// Value used for schema columns the record does not provide.
pub const FILL_VALUE: f64 = 0.0;

/// One row of model input, columns in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureSchema {
    /// Align a record to this schema.
    ///
    /// Columns absent from the record get `FILL_VALUE`; record entries that are
    /// not schema columns are dropped. The output width always equals the
    /// schema length.
    pub fn assemble(&self, record: &FeatureRecord) -> FeatureVector {
        let values = self
            .names()
            .iter()
            .map(|name| record.get_by_name(name).unwrap_or(FILL_VALUE))
            .collect();

        FeatureVector {
            names: self.names().to_vec(),
            values,
        }
    }
}

impl FeatureVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a column by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    /// `(column, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Convert back to a record. Columns the extractor does not know are skipped.
    pub fn to_record(&self) -> FeatureRecord {
        self.iter()
            .filter_map(|(name, v)| FeatureName::from_name(name).map(|f| (f, v)))
            .collect()
    }
}
