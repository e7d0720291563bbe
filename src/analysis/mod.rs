//! Frequency analysis over the cleaned corpus.

pub mod freq;
pub mod table;

pub use freq::{
    ngram_frequency, ngrams, punctuation_frequency, word_frequency, CorpusFrequencies,
};
pub use table::{FrequencyTable, NGram};
