//! Punctuation, per-class word and n-gram frequency over a prepared corpus.

use tracing::{info, warn};

use crate::{
    analysis::table::{FrequencyTable, NGram},
    data::Dataset,
    error::AnalysisError,
    nlp::TextAnnotator,
};

/// Contiguous `n`-token windows of one whitespace-tokenised text.
pub fn ngrams(text: &str, n: usize) -> Vec<NGram> {
    if n == 0 {
        return Vec::new();
    }
    let tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.windows(n).map(|w| NGram::new(w.iter().copied())).collect()
}

/// Punctuation characters across the raw text of every record.
///
/// Raw text is lowercased and annotated; every character of a punctuation
/// token counts once. Whitespace never appears as a key.
pub fn punctuation_frequency(
    dataset: &Dataset,
    annotator: &dyn TextAnnotator,
) -> Result<FrequencyTable<char>, AnalysisError> {
    if dataset.iter().all(|r| r.raw_text.trim().is_empty()) {
        return Err(AnalysisError::EmptyCorpus);
    }
    let mut marks = Vec::new();
    for record in dataset {
        match annotator.annotate(&record.lowered_text()) {
            Ok(tokens) => marks.extend(
                tokens
                    .iter()
                    .filter(|t| t.is_punct)
                    .flat_map(|t| t.lemma.chars())
                    .filter(|c| !c.is_whitespace()),
            ),
            Err(err) => warn!(id = record.id, %err, "skipping record in punctuation count"),
        }
    }
    Ok(marks.into_iter().collect())
}

/// Whitespace tokens of `cleaned_text` for records labelled `target`.
pub fn word_frequency(
    dataset: &Dataset,
    target: bool,
) -> Result<FrequencyTable<String>, AnalysisError> {
    let table: FrequencyTable<String> = dataset
        .with_target(target)
        .flat_map(|r| r.cleaned_text.split_whitespace())
        .map(str::to_string)
        .collect();
    if table.is_empty() {
        return Err(AnalysisError::EmptyCorpus);
    }
    Ok(table)
}

/// `n`-gram counts over the whole cleaned corpus; windows never cross records.
pub fn ngram_frequency(
    dataset: &Dataset,
    n: usize,
) -> Result<FrequencyTable<NGram>, AnalysisError> {
    if n == 0 {
        return Err(AnalysisError::InvalidOrder(n));
    }
    if dataset.iter().all(|r| r.cleaned_text.trim().is_empty()) {
        return Err(AnalysisError::EmptyCorpus);
    }
    Ok(dataset
        .iter()
        .flat_map(|r| ngrams(&r.cleaned_text, n))
        .collect())
}

/// Every table the reports consume, computed once per training run.
#[derive(Debug, Clone, Default)]
pub struct CorpusFrequencies {
    pub punctuation: FrequencyTable<char>,
    pub words_disaster: FrequencyTable<String>,
    pub words_other: FrequencyTable<String>,
    pub bigrams: FrequencyTable<NGram>,
    pub trigrams: FrequencyTable<NGram>,
}

impl CorpusFrequencies {
    /// Compute all tables; an empty corpus degrades to an empty table.
    ///
    /// Punctuation is counted over `normalised`, the rows that survived raw-text
    /// deduplication. Word and n-gram tables use the final `prepared` rows.
    pub fn compute(
        normalised: &Dataset,
        prepared: &Dataset,
        annotator: &dyn TextAnnotator,
    ) -> Self {
        let frequencies = Self {
            punctuation: or_empty("punctuation", punctuation_frequency(normalised, annotator)),
            words_disaster: or_empty("words target=1", word_frequency(prepared, true)),
            words_other: or_empty("words target=0", word_frequency(prepared, false)),
            bigrams: or_empty("bigrams", ngram_frequency(prepared, 2)),
            trigrams: or_empty("trigrams", ngram_frequency(prepared, 3)),
        };
        info!(
            punctuation = frequencies.punctuation.len(),
            words_disaster = frequencies.words_disaster.len(),
            words_other = frequencies.words_other.len(),
            bigrams = frequencies.bigrams.len(),
            trigrams = frequencies.trigrams.len(),
            "frequency tables built"
        );
        frequencies
    }
}

fn or_empty<K>(
    table: &str,
    result: Result<FrequencyTable<K>, AnalysisError>,
) -> FrequencyTable<K>
where
    K: std::hash::Hash + Eq,
{
    result.unwrap_or_else(|err| {
        warn!(table, %err, "frequency table left empty");
        FrequencyTable::empty()
    })
}
