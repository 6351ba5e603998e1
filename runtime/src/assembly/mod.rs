//! Schema reconciliation: aligning feature records to the model's columns.

pub mod assembler;
pub mod schema;

pub use assembler::FeatureVector;
pub use schema::{FeatureSchema, SchemaError};
