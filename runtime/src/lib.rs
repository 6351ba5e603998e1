//! phishscope — phishing URL classification.
//!
//! A URL is turned into a fixed-width feature row (lexical URL features plus
//! four signals from a single live page fetch), aligned to the column manifest
//! the model was trained on, and handed to the model.

pub mod acquisition;
pub mod assembly;
pub mod cli;
pub mod config;
pub mod extraction;
pub mod features;
pub mod model;
pub mod pipeline;

pub use config::{Config, StartupError};
pub use pipeline::{Classification, Detector, FeatureExtractor};
