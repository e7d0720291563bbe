//! CLI entry-point printing frequency tables as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use serde_json::{json, Value};
use tracing::instrument;

use crate::{
    analysis::FrequencyTable,
    config::Settings,
    data::loader,
    nlp,
    pipeline::Pipeline,
    report::{Reporter, TrainReport},
};

/// Args for the `freq` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Override the training CSV path.
    #[arg(long)]
    pub train: Option<PathBuf>,
    /// Entries printed per table.
    #[arg(long, default_value_t = 20)]
    pub top: usize,
}

/// Keeps the top entries of each table instead of plotting them.
struct JsonCapture {
    top: usize,
    tables: Value,
}

impl Reporter for JsonCapture {
    fn report(&mut self, report: &TrainReport<'_>) -> Result<()> {
        let freqs = report.frequencies;
        self.tables = json!({
            "rows": report.prepared.len(),
            "punctuation": rows(&freqs.punctuation, self.top),
            "words_target_1": rows(&freqs.words_disaster, self.top),
            "words_target_0": rows(&freqs.words_other, self.top),
            "bigrams": rows(&freqs.bigrams, self.top),
            "trigrams": rows(&freqs.trigrams, self.top),
        });
        Ok(())
    }
}

fn rows<K>(table: &FrequencyTable<K>, top: usize) -> Value
where
    K: std::hash::Hash + Eq + std::fmt::Display,
{
    table
        .labelled(top)
        .into_iter()
        .map(|(key, count)| json!({ "key": key, "count": count }))
        .collect()
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let path = args.train.unwrap_or_else(|| settings.train_csv.clone());
    let dataset =
        loader::load_train(&path).with_context(|| format!("loading {}", path.display()))?;

    let pipeline = Pipeline::new(
        nlp::load_annotator(settings.max_text_chars),
        settings.pipeline_options(),
    );
    let mut capture = JsonCapture {
        top: args.top,
        tables: Value::Null,
    };
    pipeline.prepare_train(dataset, &mut capture)?;

    println!("{}", serde_json::to_string_pretty(&capture.tables)?);
    Ok(())
}
