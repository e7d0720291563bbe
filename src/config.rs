//! Runtime configuration utilities for disaster-prep.

use std::{env, path::PathBuf, str::FromStr};

use anyhow::Context;

use crate::{pipeline::PipelineOptions, report::assets::MaskSource};

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Labeled training CSV.
    pub train_csv: PathBuf,
    /// Unlabeled test CSV.
    pub test_csv: PathBuf,
    /// Output folder for report PNGs.
    pub plots_dir: PathBuf,
    /// Word-cloud mask location.
    pub mask_source: MaskSource,
    /// Bars per class in the word-frequency chart.
    pub top_k_words: usize,
    /// Bars in the bigram and trigram charts.
    pub top_k_ngrams: usize,
    /// Longest text the annotator accepts, in characters.
    pub max_text_chars: usize,
    /// Exempt rows whose cleaned text is empty from post-clean deduplication.
    pub keep_empty_cleaned: bool,
    /// Abort on the first tokenization failure instead of blanking that row.
    pub strict_tokenization: bool,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let train_csv = env::var("TRAIN_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/train.csv"));
        let test_csv = env::var("TEST_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/test.csv"));
        let plots_dir = env::var("PLOTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./plots"));
        let mask_source = env::var("MASK_SOURCE")
            .ok()
            .and_then(|v| MaskSource::from_str(&v).ok())
            .unwrap_or_default();

        std::fs::create_dir_all(&plots_dir).context("creating plots dir")?;

        Ok(Self {
            train_csv,
            test_csv,
            plots_dir,
            mask_source,
            top_k_words: parsed("TOP_K_WORDS", 30),
            top_k_ngrams: parsed("TOP_K_NGRAMS", 20),
            max_text_chars: parsed("MAX_TEXT_CHARS", 10_000),
            keep_empty_cleaned: flag("KEEP_EMPTY_CLEANED"),
            strict_tokenization: flag("STRICT_TOKENIZATION"),
        })
    }

    /// Switches the core pipeline needs; it never reads the environment itself.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            keep_empty_cleaned: self.keep_empty_cleaned,
            strict_tokenization: self.strict_tokenization,
        }
    }
}

fn parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
