//! Train- and test-mode preparation entry points.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    analysis::CorpusFrequencies,
    data::{clean, summary, Dataset},
    error::PipelineError,
    nlp::{TextAnnotator, TextNormalizer},
    report::{Reporter, TrainReport},
};

/// Behaviour switches for the core stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Exempt records with empty cleaned text from post-clean deduplication.
    pub keep_empty_cleaned: bool,
    /// Abort on the first tokenization failure instead of isolating it.
    pub strict_tokenization: bool,
}

/// Preparation pipeline holding its annotator for the whole process lifetime.
#[derive(Debug, Clone)]
pub struct Pipeline {
    normalizer: TextNormalizer,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(annotator: Arc<dyn TextAnnotator>, options: PipelineOptions) -> Self {
        Self {
            normalizer: TextNormalizer::new(annotator),
            options,
        }
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Dedup on raw text, fill, normalise, dedup on cleaned text, then hand
    /// frequencies and both dataset snapshots to `reporter`.
    ///
    /// Missing-value rates are taken after raw-text deduplication and before
    /// filling.
    #[instrument(skip(self, dataset, reporter), fields(rows = dataset.len()))]
    pub fn prepare_train(
        &self,
        mut dataset: Dataset,
        reporter: &mut dyn Reporter,
    ) -> Result<Dataset, PipelineError> {
        clean::dedup_raw(&mut dataset);
        let missing = summary::missing_rates(&dataset).unwrap_or_else(|err| {
            warn!(%err, "missing-value summary unavailable");
            Vec::new()
        });

        clean::fill_missing(&mut dataset);
        self.normalizer
            .normalise_dataset(&mut dataset, self.options.strict_tokenization)?;

        let normalised = dataset.clone();
        clean::dedup_cleaned(&mut dataset, self.options.keep_empty_cleaned);

        let frequencies =
            CorpusFrequencies::compute(&normalised, &dataset, self.normalizer.annotator());
        let report = TrainReport {
            missing: &missing,
            normalised: &normalised,
            prepared: &dataset,
            frequencies: &frequencies,
        };
        if let Err(err) = reporter.report(&report) {
            warn!(error = %format!("{err:#}"), "report generation failed");
        }

        info!(rows = dataset.len(), "training data prepared");
        Ok(dataset)
    }

    /// Fill and normalise only; row count and order are preserved.
    #[instrument(skip(self, dataset), fields(rows = dataset.len()))]
    pub fn prepare_test(&self, mut dataset: Dataset) -> Result<Dataset, PipelineError> {
        clean::fill_missing(&mut dataset);
        self.normalizer
            .normalise_dataset(&mut dataset, self.options.strict_tokenization)?;
        info!(rows = dataset.len(), "test data prepared");
        Ok(dataset)
    }
}
