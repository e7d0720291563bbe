//! Raw text to cleaned text: lowercase, annotate, filter, then strip.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument, warn};

use crate::{
    data::Dataset,
    error::{PipelineError, TokenizationError},
    nlp::annotator::TextAnnotator,
};

/// One ordered replacement applied to the joined lemma string.
#[derive(Debug, Clone)]
pub struct StripRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl StripRule {
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement)
            .into_owned()
    }
}

/// `(name, pattern, replacement)`, applied top to bottom.
const RULE_TABLE: &[(&str, &str, &str)] = &[
    ("non_word", r"[^\w\s]", ""),
    ("digits", r"[0-9]", ""),
    ("single_letters", r"\b[a-z]\b", ""),
    ("hyphens", r"-", ""),
    ("underscores", r"_", ""),
    ("html_amp", r"&amp", ""),
    ("at_signs", r"@", ""),
    ("whitespace", r"\s+", " "),
];

static STRIP_RULES: Lazy<Vec<StripRule>> = Lazy::new(|| {
    RULE_TABLE
        .iter()
        .map(|&(name, pattern, replacement)| StripRule {
            name,
            pattern: Regex::new(pattern).expect("valid strip rule"),
            replacement,
        })
        .collect()
});

/// The default strip sequence, in application order.
pub fn strip_rules() -> &'static [StripRule] {
    &STRIP_RULES
}

/// Apply every strip rule in order, then trim.
pub fn strip(text: &str) -> String {
    strip_with(strip_rules(), text)
}

pub fn strip_with(rules: &[StripRule], text: &str) -> String {
    let stripped = rules.iter().fold(text.to_string(), |acc, rule| {
        let next = rule.apply(&acc);
        if next != acc {
            debug!(rule = rule.name, "strip rule matched");
        }
        next
    });
    stripped.trim().to_string()
}

/// Turns `raw_text` into `cleaned_text` through an injected annotator.
#[derive(Clone)]
pub struct TextNormalizer {
    annotator: Arc<dyn TextAnnotator>,
}

impl TextNormalizer {
    pub fn new(annotator: Arc<dyn TextAnnotator>) -> Self {
        Self { annotator }
    }

    pub fn annotator(&self) -> &dyn TextAnnotator {
        self.annotator.as_ref()
    }

    /// Lemmas of content tokens joined by single spaces, before stripping.
    pub fn lemma_string(&self, raw: &str) -> Result<String, TokenizationError> {
        let lowered = raw.to_lowercase();
        let tokens = self.annotator.annotate(&lowered)?;
        let lemmas: Vec<&str> = tokens
            .iter()
            .filter(|t| t.is_content())
            .map(|t| t.lemma.as_str())
            .collect();
        Ok(lemmas.join(" "))
    }

    pub fn normalise(&self, raw: &str) -> Result<String, TokenizationError> {
        Ok(strip(&self.lemma_string(raw)?))
    }

    /// Fill `cleaned_text` for every record.
    ///
    /// Failures are isolated per record (warning + empty cleaned text) unless
    /// `strict` is set, in which case the first failure aborts.
    #[instrument(skip(self, dataset), fields(rows = dataset.len()))]
    pub fn normalise_dataset(
        &self,
        dataset: &mut Dataset,
        strict: bool,
    ) -> Result<usize, PipelineError> {
        let mut failures = 0usize;
        for record in dataset.records_mut() {
            match self.normalise(&record.raw_text) {
                Ok(cleaned) => record.cleaned_text = cleaned,
                Err(source) if strict => {
                    return Err(PipelineError::Tokenization {
                        id: record.id,
                        source,
                    })
                }
                Err(err) => {
                    warn!(id = record.id, %err, "tokenization failed; cleaned text left empty");
                    record.cleaned_text.clear();
                    failures += 1;
                }
            }
        }
        info!(failures, "text normalised");
        Ok(failures)
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer").finish_non_exhaustive()
    }
}
