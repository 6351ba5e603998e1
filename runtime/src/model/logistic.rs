//! Logistic-regression model loaded from a JSON artifact.
//!
//! ```json
//! {
//!   "feature_names": ["NumDots", "UrlLength", "..."],
//!   "coefficients": [0.41, 0.02, ...],
//!   "intercept": -1.7,
//!   "threshold": 0.5
//! }
//! ```

use super::{Classifier, ModelError, DEFAULT_THRESHOLD};
use crate::assembly::FeatureVector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl LogisticModel {
    pub fn new(
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, ModelError> {
        let model = Self {
            feature_names,
            coefficients,
            intercept,
            threshold: DEFAULT_THRESHOLD,
        };
        model.validate()?;
        Ok(model)
    }

    /// Load and validate a model artifact.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let data = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_str(&data).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        model.validate()?;
        info!(
            "loaded logistic model from {} ({} features, threshold {})",
            path.display(),
            model.coefficients.len(),
            model.threshold
        );
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.is_empty() {
            return Err(ModelError::Invalid("no coefficients".into()));
        }
        if self.coefficients.len() != self.feature_names.len() {
            return Err(ModelError::Invalid(format!(
                "{} coefficients for {} feature names",
                self.coefficients.len(),
                self.feature_names.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Invalid("non-finite weight".into()));
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(ModelError::Invalid(format!(
                "threshold {} outside (0, 1)",
                self.threshold
            )));
        }
        Ok(())
    }
}

impl Classifier for LogisticModel {
    fn feature_names(&self) -> Option<&[String]> {
        Some(&self.feature_names)
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn predict_proba(&self, vector: &FeatureVector) -> Result<[f64; 2], ModelError> {
        if vector.len() != self.coefficients.len() {
            return Err(ModelError::Width {
                expected: self.coefficients.len(),
                got: vector.len(),
            });
        }

        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(vector.values())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let p = sigmoid(z);
        Ok([1.0 - p, p])
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
