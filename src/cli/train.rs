//! CLI entry-point for preparing the training file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument, warn};

use crate::{
    config::Settings,
    data::loader,
    nlp,
    pipeline::Pipeline,
    report::{assets::MaskSource, NoopReporter, PlotReporter, Reporter},
};

/// Args for the `train` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Override the training CSV path.
    #[arg(long)]
    pub train: Option<PathBuf>,
    /// Skip rendering the report plots.
    #[arg(long)]
    pub no_plots: bool,
    /// Word-cloud mask: URL, file path, or `none`.
    #[arg(long)]
    pub mask: Option<MaskSource>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let train_path = args.train.unwrap_or_else(|| settings.train_csv.clone());
    let dataset = loader::load_train(&train_path)
        .with_context(|| format!("loading {}", train_path.display()))?;
    let loaded = dataset.len();

    if settings.test_csv.exists() {
        match loader::load_test(&settings.test_csv) {
            Ok(test) => info!(rows = test.len(), "test file present"),
            Err(err) => warn!(%err, "test file unreadable"),
        }
    }

    let mut reporter: Box<dyn Reporter> = if args.no_plots {
        Box::new(NoopReporter)
    } else {
        let source = args.mask.unwrap_or_else(|| settings.mask_source.clone());
        let mask = source.load_or_warn().await;
        Box::new(
            PlotReporter::new(&settings.plots_dir, mask)
                .with_top_k(settings.top_k_words, settings.top_k_ngrams),
        )
    };

    let pipeline = Pipeline::new(
        nlp::load_annotator(settings.max_text_chars),
        settings.pipeline_options(),
    );
    let prepared = pipeline.prepare_train(dataset, reporter.as_mut())?;

    let (negative, positive) = prepared.class_counts();
    info!(
        loaded,
        prepared = prepared.len(),
        negative,
        positive,
        "training run complete"
    );
    Ok(())
}
