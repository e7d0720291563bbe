//! Exploratory plots written after a training run.

pub mod assets;
pub mod charts;
pub mod cloud;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::style::RGBColor;
use tracing::{info, instrument};

use crate::{
    analysis::CorpusFrequencies,
    data::{summary::MissingRate, Dataset},
};

use self::{
    assets::Mask,
    charts::{Bar, SALMON, STEEL_BLUE, YELLOW_GREEN},
};

/// Everything a training run hands to its reporter.
#[derive(Debug, Clone, Copy)]
pub struct TrainReport<'a> {
    /// Missing-value rates after raw-text deduplication, before filling.
    pub missing: &'a [MissingRate],
    /// Snapshot after normalisation, before post-clean deduplication.
    pub normalised: &'a Dataset,
    /// Final training dataset.
    pub prepared: &'a Dataset,
    pub frequencies: &'a CorpusFrequencies,
}

pub trait Reporter {
    fn report(&mut self, report: &TrainReport<'_>) -> Result<()>;
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&mut self, _report: &TrainReport<'_>) -> Result<()> {
        Ok(())
    }
}

/// Writes the PNG report set into one directory.
#[derive(Debug, Clone)]
pub struct PlotReporter {
    out_dir: PathBuf,
    mask: Option<Mask>,
    top_words: usize,
    top_ngrams: usize,
}

impl PlotReporter {
    pub fn new(out_dir: impl Into<PathBuf>, mask: Option<Mask>) -> Self {
        Self {
            out_dir: out_dir.into(),
            mask,
            top_words: 30,
            top_ngrams: 20,
        }
    }

    pub fn with_top_k(mut self, words: usize, ngrams: usize) -> Self {
        self.top_words = words;
        self.top_ngrams = ngrams;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.out_dir.join(format!("{name}.png"))
    }

    fn samples_distribution(&self, dataset: &Dataset) -> Result<()> {
        let (negative, positive) = dataset.class_counts();
        let (neg_color, pos_color) = if negative >= positive {
            (YELLOW_GREEN, SALMON)
        } else {
            (SALMON, YELLOW_GREEN)
        };
        let bars = [
            Bar {
                label: "0".into(),
                value: negative as f64,
                color: neg_color,
            },
            Bar {
                label: "1".into(),
                value: positive as f64,
                color: pos_color,
            },
        ];
        charts::bar_chart(
            &self.path("samples-distribution"),
            (640, 480),
            "Samples distribution",
            ("Target", "Samples"),
            &bars,
        )
    }

    fn missing_values(&self, missing: &[MissingRate]) -> Result<()> {
        let bars: Vec<Bar> = missing
            .iter()
            .map(|rate| Bar {
                label: rate.column.clone(),
                value: rate.percent,
                color: STEEL_BLUE,
            })
            .collect();
        charts::bar_chart(
            &self.path("missing-values"),
            (800, 480),
            "Missing values",
            ("Column", "Missing (%)"),
            &bars,
        )
    }

    fn frequency_charts(&self, frequencies: &CorpusFrequencies) -> Result<()> {
        let punctuation: Vec<Bar> = frequencies
            .punctuation
            .labelled(usize::MAX)
            .into_iter()
            .map(|(label, count)| Bar {
                label,
                value: count as f64,
                color: STEEL_BLUE,
            })
            .collect();
        charts::bar_chart(
            &self.path("punctuation-freqs"),
            (1000, 480),
            "Punctuation frequency",
            ("Character", "Count"),
            &punctuation,
        )?;

        let disaster = frequencies.words_disaster.labelled(self.top_words);
        let other = frequencies.words_other.labelled(self.top_words);
        charts::ranked_pair(
            &self.path("words-freqs"),
            (1400, 900),
            ("Disaster tweets (target=1)", &disaster),
            ("Other tweets (target=0)", &other),
            STEEL_BLUE,
        )?;

        charts::ranked_chart(
            &self.path("bigrams"),
            (900, 700),
            "Most common bigrams",
            &frequencies.bigrams.labelled(self.top_ngrams),
            STEEL_BLUE,
        )?;
        charts::ranked_chart(
            &self.path("threegrams"),
            (900, 700),
            "Most common trigrams",
            &frequencies.trigrams.labelled(self.top_ngrams),
            STEEL_BLUE,
        )
    }

    fn word_clouds(&self, prepared: &Dataset) -> Result<()> {
        let sides: [(bool, &[RGBColor]); 2] = [(true, cloud::SET1), (false, cloud::VIRIDIS)];
        let max_words = cloud::CloudConfig::default().max_words;
        for (target, palette) in sides {
            let raw: Vec<String> = prepared.with_target(target).map(|r| r.lowered_text()).collect();
            let before = cloud::word_weights(raw.iter().map(String::as_str), max_words);
            let after = cloud::word_weights(
                prepared.with_target(target).map(|r| r.cleaned_text.as_str()),
                max_words,
            );
            let name = format!("word-cloud-target-{}", u8::from(target));
            cloud::render_pair(&self.path(&name), &before, &after, self.mask.as_ref(), palette)?;
        }
        Ok(())
    }

    fn length_distributions(&self, normalised: &Dataset, prepared: &Dataset) -> Result<()> {
        for (target, color) in [(true, SALMON), (false, YELLOW_GREEN)] {
            let class = u8::from(target);
            let chars_before: Vec<f64> = normalised
                .with_target(target)
                .map(|r| r.raw_text.chars().count() as f64)
                .collect();
            let chars_after: Vec<f64> = prepared
                .with_target(target)
                .map(|r| r.cleaned_text.chars().count() as f64)
                .collect();
            charts::histogram_pair(
                &self.path(&format!("distribution-characters{class}")),
                &format!("Characters per tweet (target={class})"),
                "Characters",
                &chars_before,
                &chars_after,
                color,
            )?;

            let words_before: Vec<f64> = normalised
                .with_target(target)
                .map(|r| r.raw_text.split_whitespace().count() as f64)
                .collect();
            let words_after: Vec<f64> = prepared
                .with_target(target)
                .map(|r| r.cleaned_text.split_whitespace().count() as f64)
                .collect();
            charts::histogram_pair(
                &self.path(&format!("distribution-words{class}")),
                &format!("Words per tweet (target={class})"),
                "Words",
                &words_before,
                &words_after,
                color,
            )?;
        }
        Ok(())
    }
}

impl Reporter for PlotReporter {
    #[instrument(skip_all, fields(out_dir = %self.out_dir.display()))]
    fn report(&mut self, report: &TrainReport<'_>) -> Result<()> {
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("creating {}", self.out_dir.display()))?;
        self.samples_distribution(report.normalised)
            .context("samples distribution")?;
        self.missing_values(report.missing)
            .context("missing values")?;
        self.frequency_charts(report.frequencies)
            .context("frequency charts")?;
        self.word_clouds(report.prepared).context("word clouds")?;
        self.length_distributions(report.normalised, report.prepared)
            .context("length distributions")?;
        info!("plots written");
        Ok(())
    }
}
