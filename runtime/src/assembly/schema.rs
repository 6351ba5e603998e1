//! The ordered feature-name manifest the model was trained against.

use crate::features::FeatureName;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read feature manifest {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("feature manifest {path} is not a JSON array of strings: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("feature manifest is empty")]
    Empty,
    #[error("feature manifest has a blank name at position {0}")]
    BlankName(usize),
    #[error("feature manifest lists {0} more than once")]
    Duplicate(String),
}

/// Ordered column names expected by the model. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    /// Load a manifest file: a JSON array of column names.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let data = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let names: Vec<String> =
            serde_json::from_str(&data).map_err(|source| SchemaError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let schema = Self::from_names(names)?;
        info!(
            "loaded feature manifest from {} ({} columns)",
            path.display(),
            schema.len()
        );
        Ok(schema)
    }

    /// Build a schema from names, rejecting empty, blank, or duplicate entries.
    ///
    /// Names the extractor does not know are kept; they always assemble to 0.
    pub fn from_names<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        {
            let mut seen = HashSet::new();
            for (i, name) in names.iter().enumerate() {
                if name.trim().is_empty() {
                    return Err(SchemaError::BlankName(i));
                }
                if !seen.insert(name.as_str()) {
                    return Err(SchemaError::Duplicate(name.clone()));
                }
                if FeatureName::from_name(name).is_none() {
                    warn!("feature manifest column {name} is not produced by the extractor; it will always be 0");
                }
            }
        }

        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Manifest columns the extractor never produces.
    pub fn unknown_columns(&self) -> Vec<&str> {
        self.names
            .iter()
            .filter(|n| FeatureName::from_name(n).is_none())
            .map(String::as_str)
            .collect()
    }
}
