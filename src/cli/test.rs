//! CLI entry-point for preparing the unlabeled test file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{config::Settings, data::loader, nlp, pipeline::Pipeline};

/// Args for the `test` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Override the test CSV path.
    #[arg(long)]
    pub test: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let path = args.test.unwrap_or_else(|| settings.test_csv.clone());
    let dataset =
        loader::load_test(&path).with_context(|| format!("loading {}", path.display()))?;

    let pipeline = Pipeline::new(
        nlp::load_annotator(settings.max_text_chars),
        settings.pipeline_options(),
    );
    let prepared = pipeline.prepare_test(dataset)?;

    for record in prepared.iter().take(5) {
        info!(id = record.id, cleaned = %record.cleaned_text, "sample");
    }
    info!(rows = prepared.len(), "test run complete");
    Ok(())
}
