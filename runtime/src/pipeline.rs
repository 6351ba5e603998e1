//! End-to-end classification: lexical features, page fetch, HTML signals,
//! schema assembly, prediction.
//!
//! A `Detector` is built once at startup and shared read-only between
//! requests; `FeatureExtractor` is the model-free half of it. Feature
//! extraction never fails: a failed fetch only means the four HTML signals
//! stay at 0.

use crate::acquisition::{FetchError, PageSource};
use crate::assembly::{FeatureSchema, FeatureVector};
use crate::extraction::html_signals::{extract_html_signals, HtmlSignals};
use crate::features::lexical::extract_lexical;
use crate::features::url_parts::host_of;
use crate::features::FeatureRecord;
use crate::model::{Classifier, ModelError, PredictionResult};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Output of one `classify` call.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub url: String,
    pub prediction: PredictionResult,
    pub features: FeatureVector,
    /// Whether the page was fetched and scanned.
    pub html_signals: bool,
}

/// Features for one URL, before prediction.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub record: FeatureRecord,
    pub vector: FeatureVector,
    pub html_signals: bool,
}

/// Schema plus page source: everything needed to turn a URL into model input.
pub struct FeatureExtractor {
    schema: Arc<FeatureSchema>,
    source: Arc<dyn PageSource>,
}

impl FeatureExtractor {
    pub fn new(schema: Arc<FeatureSchema>, source: Arc<dyn PageSource>) -> Self {
        Self { schema, source }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Run the feature stages. Always yields a full-width vector.
    pub async fn extract(&self, url: &str) -> Extraction {
        let mut record = extract_lexical(url);

        let (signals, available) = match self.source.fetch(url).await {
            Ok(html) => (scan_page(&html, url), true),
            Err(FetchError::Disabled) => {
                debug!(url, "fetch disabled, HTML signals default to 0");
                (HtmlSignals::unavailable(), false)
            }
            Err(e) => {
                warn!(url, "page fetch failed, HTML signals default to 0: {e}");
                (HtmlSignals::unavailable(), false)
            }
        };
        signals.apply(&mut record);

        let vector = self.schema.assemble(&record);
        Extraction {
            record,
            vector,
            html_signals: available,
        }
    }
}

/// Immutable classification context: feature extractor plus model.
pub struct Detector {
    extractor: FeatureExtractor,
    model: Arc<dyn Classifier>,
}

impl Detector {
    /// Wire the pipeline together, checking that the model was trained on the
    /// same columns the schema lists.
    pub fn new(extractor: FeatureExtractor, model: Arc<dyn Classifier>) -> Result<Self, ModelError> {
        if let Some(model_names) = model.feature_names() {
            check_alignment(extractor.schema(), model_names)?;
        }
        Ok(Self { extractor, model })
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.extractor.schema()
    }

    pub fn model(&self) -> &dyn Classifier {
        self.model.as_ref()
    }

    /// Classify a URL. Only the model itself can fail.
    pub async fn classify(&self, url: &str) -> Result<Classification, ModelError> {
        let started = Instant::now();
        let extraction = self.extract(url).await;
        let prediction = self.model.predict(&extraction.vector)?;

        debug!(
            url,
            label = %prediction.label,
            phishing = prediction.phishing(),
            html_signals = extraction.html_signals,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "classified"
        );

        Ok(Classification {
            url: url.to_string(),
            prediction,
            features: extraction.vector,
            html_signals: extraction.html_signals,
        })
    }

    pub async fn extract(&self, url: &str) -> Extraction {
        self.extractor.extract(url).await
    }
}

/// Parse and scan synchronously; the parsed document never crosses an await.
fn scan_page(html: &str, url: &str) -> HtmlSignals {
    let host = host_of(url);
    let signals = extract_html_signals(html, &host);
    debug!(url, ?signals, "html signals extracted");
    signals
}

fn check_alignment(schema: &FeatureSchema, model_names: &[String]) -> Result<(), ModelError> {
    if schema.names() == model_names {
        return Ok(());
    }
    let first_diff = schema
        .names()
        .iter()
        .zip(model_names)
        .position(|(a, b)| a != b);
    let detail = match first_diff {
        Some(i) => format!(
            "column {i} is {} in the manifest but {} in the model",
            schema.names()[i],
            model_names[i]
        ),
        None => format!(
            "manifest has {} columns, model has {}",
            schema.len(),
            model_names.len()
        ),
    };
    Err(ModelError::SchemaMismatch(detail))
}
