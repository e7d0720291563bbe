use disaster_prep::{
    analysis::{
        ngram_frequency, ngrams, punctuation_frequency, word_frequency, CorpusFrequencies,
        FrequencyTable, NGram,
    },
    data::{Dataset, Record},
    error::AnalysisError,
    nlp::RuleAnnotator,
};

fn labelled(rows: &[(&str, &str, bool)]) -> Dataset {
    rows.iter()
        .enumerate()
        .map(|(idx, (raw, cleaned, target))| {
            let mut record = Record::new(idx as i64, *raw).with_target(*target);
            record.cleaned_text = cleaned.to_string();
            record
        })
        .collect()
}

#[test]
fn ties_keep_first_seen_order() {
    let table: FrequencyTable<&str> = ["smoke", "fire", "fire", "ash", "smoke", "ash", "flood"]
        .into_iter()
        .collect();
    let entries: Vec<(&str, usize)> = table.entries().map(|(k, v)| (*k, v)).collect();
    assert_eq!(entries, [("smoke", 2), ("fire", 2), ("ash", 2), ("flood", 1)]);
    assert_eq!(table.total(), 7);
}

#[test]
fn top_truncates_sorted_table() {
    let table: FrequencyTable<char> = "aabbbc".chars().collect();
    assert_eq!(table.top(2), [(&'b', 3), (&'a', 2)]);
}

#[test]
fn bigrams_and_trigrams_of_a_sentence() {
    assert_eq!(
        ngrams("fire in the city", 2),
        [
            NGram::new(["fire", "in"]),
            NGram::new(["in", "the"]),
            NGram::new(["the", "city"]),
        ]
    );
    assert_eq!(
        ngrams("fire in the city", 3),
        [
            NGram::new(["fire", "in", "the"]),
            NGram::new(["in", "the", "city"]),
        ]
    );
    assert!(ngrams("fire", 2).is_empty());
}

#[test]
fn ngram_windows_do_not_cross_records() {
    let data = labelled(&[("", "storm surge", true), ("", "surge warning", false)]);
    let table = ngram_frequency(&data, 2).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(&NGram::new(["surge", "surge"])), None);
    assert_eq!(table.labelled(5)[0], ("storm surge".to_string(), 1));
}

#[test]
fn words_are_counted_per_class() {
    let data = labelled(&[
        ("", "fire fire forest", true),
        ("", "love fire", false),
        ("", "forest fire", true),
    ]);
    let disaster = word_frequency(&data, true).unwrap();
    assert_eq!(
        disaster.labelled(10),
        [("fire".to_string(), 3), ("forest".to_string(), 2)]
    );
    let other = word_frequency(&data, false).unwrap();
    assert_eq!(other.get(&"love".to_string()), Some(1));
}

#[test]
fn punctuation_is_counted_on_raw_text() {
    let data = labelled(&[("Fire!! Help?", "fire help", true), ("Stay safe.", "stay safe", false)]);
    let table = punctuation_frequency(&data, &RuleAnnotator::default()).unwrap();
    let entries: Vec<(char, usize)> = table.entries().map(|(k, v)| (*k, v)).collect();
    assert_eq!(entries, [('!', 2), ('?', 1), ('.', 1)]);
    assert_eq!(table.get(&' '), None);
}

#[test]
fn empty_corpus_is_reported() {
    let data = labelled(&[("   ", "", true)]);
    assert_eq!(
        ngram_frequency(&data, 2).unwrap_err(),
        AnalysisError::EmptyCorpus
    );
    assert_eq!(
        word_frequency(&data, false).unwrap_err(),
        AnalysisError::EmptyCorpus
    );
    assert_eq!(
        punctuation_frequency(&data, &RuleAnnotator::default()).unwrap_err(),
        AnalysisError::EmptyCorpus
    );
}

#[test]
fn zero_order_ngrams_are_rejected() {
    let data = labelled(&[("", "fire", true)]);
    assert_eq!(
        ngram_frequency(&data, 0).unwrap_err(),
        AnalysisError::InvalidOrder(0)
    );
}

#[test]
fn corpus_frequencies_degrade_to_empty_tables() {
    let data = labelled(&[("!!", "", true)]);
    let freqs = CorpusFrequencies::compute(&data, &data, &RuleAnnotator::default());
    assert_eq!(freqs.punctuation.get(&'!'), Some(2));
    assert!(freqs.words_disaster.is_empty());
    assert!(freqs.words_other.is_empty());
    assert!(freqs.bigrams.is_empty());
    assert!(freqs.trigrams.is_empty());
}
