//! Runtime configuration and the one-time startup phase.

use crate::acquisition::page_fetcher::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::acquisition::{FetchError, HttpPageFetcher, Offline, PageSource};
use crate::assembly::{FeatureSchema, SchemaError};
use crate::model::{LogisticModel, ModelError};
use crate::pipeline::{Detector, FeatureExtractor};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Fatal startup failures. No request can be served after one of these.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Fetcher(#[from] FetchError),
    #[error("fetch timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(f64),
}

/// Convert a user-supplied timeout in seconds. Rejects zero, negatives,
/// NaN, infinities and values too large for a `Duration`.
pub fn fetch_timeout_from_secs(secs: f64) -> Result<Duration, StartupError> {
    match Duration::try_from_secs_f64(secs) {
        Ok(d) if !d.is_zero() => Ok(d),
        _ => Err(StartupError::InvalidTimeout(secs)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// JSON array of feature names, in model column order.
    pub schema_path: PathBuf,
    /// Logistic model artifact.
    pub model_path: PathBuf,
    #[serde(rename = "fetch_timeout_secs", serialize_with = "as_secs")]
    pub fetch_timeout: Duration,
    pub user_agent: String,
    /// When false, HTML signals are never fetched.
    pub fetch: bool,
}

impl Default for Config {
    fn default() -> Self {
        let home = phishscope_home();
        Self {
            schema_path: home.join("feature_names.json"),
            model_path: home.join("model.json"),
            fetch_timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch: true,
        }
    }
}

/// `~/.phishscope`, falling back to `/tmp/.phishscope` without a home dir.
pub fn phishscope_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".phishscope")
}

impl Config {
    pub fn load_schema(&self) -> Result<Arc<FeatureSchema>, StartupError> {
        Ok(Arc::new(FeatureSchema::load(&self.schema_path)?))
    }

    pub fn page_source(&self) -> Result<Arc<dyn PageSource>, StartupError> {
        if !self.fetch {
            info!("page fetching disabled; classifying on lexical features only");
            return Ok(Arc::new(Offline));
        }
        Ok(Arc::new(HttpPageFetcher::new(
            self.fetch_timeout,
            &self.user_agent,
        )?))
    }

    /// Schema and page source, without a model.
    pub fn build_extractor(&self) -> Result<FeatureExtractor, StartupError> {
        Ok(FeatureExtractor::new(self.load_schema()?, self.page_source()?))
    }

    /// Load everything a classification needs.
    pub fn build_detector(&self) -> Result<Detector, StartupError> {
        let extractor = self.build_extractor()?;
        let model = LogisticModel::load(&self.model_path)?;
        Ok(Detector::new(extractor, Arc::new(model))?)
    }
}

fn as_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}
