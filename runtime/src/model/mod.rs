//! The prediction collaborator.
//!
//! The pipeline only needs a predict / predict-probability contract over one
//! assembled row. `LogisticModel` is the bundled implementation, loaded from a
//! JSON artifact exported by the training pipeline.

pub mod logistic;

pub use logistic::LogisticModel;

use crate::assembly::FeatureVector;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Probability above which a URL is labelled phishing.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse model {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid model: {0}")]
    Invalid(String),
    #[error("model columns do not match the feature manifest: {0}")]
    SchemaMismatch(String),
    #[error("model expects {expected} features, got {got}")]
    Width { expected: usize, got: usize },
}

/// Binary verdict. The numeric value is the class index the model uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Legitimate = 0,
    Phishing = 1,
}

impl Label {
    pub fn class_index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Legitimate => f.write_str("legitimate"),
            Label::Phishing => f.write_str("phishing"),
        }
    }
}

/// Label plus `[P(legitimate), P(phishing)]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: Label,
    pub probabilities: [f64; 2],
}

impl PredictionResult {
    pub fn legitimate(&self) -> f64 {
        self.probabilities[Label::Legitimate.class_index()]
    }

    pub fn phishing(&self) -> f64 {
        self.probabilities[Label::Phishing.class_index()]
    }
}

/// A trained binary classifier over one schema-aligned row.
pub trait Classifier: Send + Sync {
    /// Columns the model was trained on, if the artifact records them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    fn threshold(&self) -> f64 {
        DEFAULT_THRESHOLD
    }

    /// `[P(legitimate), P(phishing)]`, summing to 1.
    fn predict_proba(&self, vector: &FeatureVector) -> Result<[f64; 2], ModelError>;

    /// Phishing only when `P(phishing)` is strictly above the threshold, so a
    /// tie at 0.5 goes to the lower class index as an argmax would.
    fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult, ModelError> {
        let probabilities = self.predict_proba(vector)?;
        let label = if probabilities[1] > self.threshold() {
            Label::Phishing
        } else {
            Label::Legitimate
        };
        Ok(PredictionResult {
            label,
            probabilities,
        })
    }
}
