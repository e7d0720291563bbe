//! Data preparation and exploratory reporting for disaster tweet classification.
//!
//! Training rows go through missing-value filling, raw-text deduplication,
//! lemma-based normalisation and cleaned-text deduplication; test rows are
//! filled and normalised only.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod nlp;
pub mod pipeline;
pub mod report;

pub use data::{Dataset, Record};
pub use error::{AnalysisError, LoadError, PipelineError, TokenizationError};
pub use pipeline::{Pipeline, PipelineOptions};
