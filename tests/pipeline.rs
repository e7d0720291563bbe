use std::sync::Arc;

use disaster_prep::{
    data::{Dataset, Record, MISSING_SENTINEL},
    error::{PipelineError, TokenizationError},
    nlp::{RuleAnnotator, TextAnnotator, Token},
    pipeline::{Pipeline, PipelineOptions},
    report::{NoopReporter, Reporter, TrainReport},
};
use proptest::prelude::*;

fn pipeline(options: PipelineOptions) -> Pipeline {
    Pipeline::new(Arc::new(RuleAnnotator::default()), options)
}

/// Records what a training run reported.
#[derive(Default)]
struct Collecting {
    normalised_rows: usize,
    prepared_rows: usize,
    missing: Vec<(String, f64)>,
    top_word: Option<(String, usize)>,
    punctuation: Vec<(String, usize)>,
}

impl Reporter for Collecting {
    fn report(&mut self, report: &TrainReport<'_>) -> anyhow::Result<()> {
        self.normalised_rows = report.normalised.len();
        self.prepared_rows = report.prepared.len();
        self.missing = report
            .missing
            .iter()
            .map(|m| (m.column.clone(), m.percent))
            .collect();
        self.top_word = report.frequencies.words_disaster.labelled(1).into_iter().next();
        self.punctuation = report.frequencies.punctuation.labelled(usize::MAX);
        Ok(())
    }
}

struct Failing;

impl Reporter for Failing {
    fn report(&mut self, _report: &TrainReport<'_>) -> anyhow::Result<()> {
        anyhow::bail!("disk full")
    }
}

/// Rejects any text mentioning "boom", otherwise delegates to the rule annotator.
struct Exploding(RuleAnnotator);

impl TextAnnotator for Exploding {
    fn annotate(&self, text: &str) -> Result<Vec<Token>, TokenizationError> {
        if text.contains("boom") {
            return Err(TokenizationError::InvalidInput("boom".into()));
        }
        self.0.annotate(text)
    }
}

fn train_rows() -> Dataset {
    [
        Record::new(1, "Forest fire near La Ronge").with_keyword("fire").with_target(true),
        Record::new(2, "Forest fire near La Ronge").with_target(true),
        Record::new(3, "Forest fires near La Ronge!").with_target(true),
        Record::new(4, "I love fruits").with_location("Oslo").with_target(false),
        Record::new(5, "boom goes the bridge").with_target(true),
    ]
    .into_iter()
    .collect()
}

#[test]
fn duplicate_raw_text_keeps_first_record() {
    let data: Dataset = [
        Record::new(1, "Fire!!").with_keyword("Fire!!").with_target(true),
        Record::new(2, "Fire!!").with_keyword("dup").with_target(true),
    ]
    .into_iter()
    .collect();
    let prepared = pipeline(PipelineOptions::default())
        .prepare_train(data, &mut NoopReporter)
        .unwrap();

    assert_eq!(prepared.len(), 1);
    let survivor = &prepared.records()[0];
    assert_eq!(survivor.id, 1);
    assert_eq!(survivor.cleaned_text, "fire");
    assert_eq!(survivor.location.as_deref(), Some(MISSING_SENTINEL));
}

#[test]
fn train_run_dedups_before_and_after_cleaning() {
    let mut reporter = Collecting::default();
    let prepared = pipeline(PipelineOptions::default())
        .prepare_train(train_rows(), &mut reporter)
        .unwrap();

    let ids: Vec<i64> = prepared.iter().map(|r| r.id).collect();
    assert_eq!(ids, [1, 4, 5]);
    assert_eq!(reporter.normalised_rows, 4);
    assert_eq!(reporter.prepared_rows, 3);
    assert_eq!(reporter.top_word, Some(("forest".to_string(), 1)));
}

#[test]
fn missing_rates_are_taken_after_raw_dedup_before_filling() {
    let mut reporter = Collecting::default();
    pipeline(PipelineOptions::default())
        .prepare_train(train_rows(), &mut reporter)
        .unwrap();

    // Row 2 repeats row 1's text and is gone; one keyword and one location remain.
    let keyword = reporter.missing.iter().find(|(c, _)| c == "keyword").unwrap();
    assert!((keyword.1 - 75.0).abs() < 1e-9);
    let location = reporter.missing.iter().find(|(c, _)| c == "location").unwrap();
    assert!((location.1 - 75.0).abs() < 1e-9);
    let text = reporter.missing.iter().find(|(c, _)| c == "text").unwrap();
    assert_eq!(text.1, 0.0);
}

#[test]
fn reporter_failure_does_not_fail_the_run() {
    let prepared = pipeline(PipelineOptions::default())
        .prepare_train(train_rows(), &mut Failing)
        .unwrap();
    assert_eq!(prepared.len(), 3);
}

#[test]
fn test_mode_keeps_every_row_in_order() {
    let data: Dataset = [
        Record::new(10, "Fire!!"),
        Record::new(11, "Fire!!"),
        Record::new(12, "!!!"),
        Record::new(13, "???"),
    ]
    .into_iter()
    .collect();
    let prepared = pipeline(PipelineOptions::default())
        .prepare_test(data)
        .unwrap();

    let ids: Vec<i64> = prepared.iter().map(|r| r.id).collect();
    assert_eq!(ids, [10, 11, 12, 13]);
    assert_eq!(prepared.records()[1].cleaned_text, "fire");
    assert_eq!(prepared.records()[3].cleaned_text, "");
    assert!(prepared
        .iter()
        .all(|r| r.keyword.as_deref() == Some(MISSING_SENTINEL)));
}

#[test]
fn tokenization_failures_are_isolated_by_default() {
    let pipeline = Pipeline::new(
        Arc::new(Exploding(RuleAnnotator::default())),
        PipelineOptions::default(),
    );
    let prepared = pipeline.prepare_test(train_rows()).unwrap();
    assert_eq!(prepared.len(), 5);
    assert_eq!(prepared.get(5).unwrap().cleaned_text, "");
    assert_eq!(prepared.get(4).unwrap().cleaned_text, "love fruit");
}

#[test]
fn strict_mode_aborts_on_first_failure() {
    let pipeline = Pipeline::new(
        Arc::new(Exploding(RuleAnnotator::default())),
        PipelineOptions {
            strict_tokenization: true,
            ..PipelineOptions::default()
        },
    );
    let err = pipeline
        .prepare_train(train_rows(), &mut NoopReporter)
        .unwrap_err();
    assert!(matches!(err, PipelineError::Tokenization { id: 5, .. }));
}

#[test]
fn keep_empty_option_retains_blank_rows() {
    let data: Dataset = [
        Record::new(1, "!!!").with_target(false),
        Record::new(2, "???").with_target(false),
        Record::new(3, "Flood warning").with_target(true),
    ]
    .into_iter()
    .collect();

    let default_run = pipeline(PipelineOptions::default())
        .prepare_train(data.clone(), &mut NoopReporter)
        .unwrap();
    assert_eq!(default_run.len(), 2);

    let keep_run = pipeline(PipelineOptions {
        keep_empty_cleaned: true,
        ..PipelineOptions::default()
    })
    .prepare_train(data, &mut NoopReporter)
    .unwrap();
    assert_eq!(keep_run.len(), 3);
}

#[test]
fn punctuation_counts_rows_dropped_by_cleaned_dedup() {
    let data: Dataset = [
        Record::new(1, "Fire!").with_target(true),
        Record::new(2, "Fire?").with_target(true),
    ]
    .into_iter()
    .collect();
    let mut reporter = Collecting::default();
    let prepared = pipeline(PipelineOptions::default())
        .prepare_train(data, &mut reporter)
        .unwrap();

    assert_eq!(prepared.len(), 1);
    assert_eq!(
        reporter.punctuation,
        [("!".to_string(), 1), ("?".to_string(), 1)]
    );
}

fn any_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z !?.#@0-9]{0,20}",
        "[!?.,;:#&]{1,6}",
        "[éñüß日本語 ]{1,8}",
        "\\PC{0,16}",
    ]
}

proptest! {
    #[test]
    fn test_mode_never_drops_or_reorders(texts in prop::collection::vec(any_text(), 0..12)) {
        let data: Dataset = texts
            .iter()
            .enumerate()
            .map(|(idx, text)| Record::new(idx as i64 * 3, text.clone()))
            .collect();
        let expected: Vec<i64> = data.iter().map(|r| r.id).collect();

        let prepared = pipeline(PipelineOptions::default()).prepare_test(data).unwrap();
        let ids: Vec<i64> = prepared.iter().map(|r| r.id).collect();
        prop_assert_eq!(ids, expected);
        prop_assert_eq!(prepared.len(), texts.len());
    }
}

#[test]
fn settings_flags_reach_pipeline_options() {
    let settings = disaster_prep::config::Settings {
        train_csv: "train.csv".into(),
        test_csv: "test.csv".into(),
        plots_dir: "plots".into(),
        mask_source: disaster_prep::report::assets::MaskSource::None,
        top_k_words: 30,
        top_k_ngrams: 20,
        max_text_chars: 10_000,
        keep_empty_cleaned: true,
        strict_tokenization: false,
    };
    assert_eq!(
        settings.pipeline_options(),
        PipelineOptions {
            keep_empty_cleaned: true,
            strict_tokenization: false,
        }
    );
}
