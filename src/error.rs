//! Typed failures raised by the preparation pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a CSV file into a [`crate::data::Dataset`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("malformed csv in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{} is missing required columns: {missing:?}", .path.display())]
    MissingColumns { path: PathBuf, missing: Vec<String> },
    #[error("row {id} has target {value:?}, expected 0 or 1")]
    InvalidTarget { id: i64, value: String },
}

/// Failure raised by a [`crate::nlp::TextAnnotator`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenizationError {
    #[error("text has {len} chars, annotator accepts at most {max}")]
    TextTooLong { len: usize, max: usize },
    #[error("annotator rejected input: {0}")]
    InvalidInput(String),
}

/// Failure raised by the frequency analyzer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("corpus has no tokens to count")]
    EmptyCorpus,
    #[error("n-gram order must be at least 1, got {0}")]
    InvalidOrder(usize),
}

/// Umbrella error for the pipeline entry points.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("record {id}: {source}")]
    Tokenization {
        id: i64,
        #[source]
        source: TokenizationError,
    },
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
