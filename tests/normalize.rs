use std::sync::Arc;

use disaster_prep::{
    error::TokenizationError,
    nlp::{
        lemma::Lemmatizer,
        normalize::{strip, strip_rules},
        RuleAnnotator, TextAnnotator, TextNormalizer, Token,
    },
};

fn normalizer() -> TextNormalizer {
    TextNormalizer::new(Arc::new(RuleAnnotator::default()))
}

/// Annotator double that returns a fixed token list for any input.
struct Fixed(Vec<Token>);

impl TextAnnotator for Fixed {
    fn annotate(&self, _text: &str) -> Result<Vec<Token>, TokenizationError> {
        Ok(self.0.clone())
    }
}

fn word(lemma: &str) -> Token {
    Token {
        text: lemma.to_string(),
        lemma: lemma.to_string(),
        is_punct: false,
        is_digit: false,
        is_url_like: false,
        is_email_like: false,
        is_ascii: lemma.is_ascii(),
    }
}

#[test]
fn urls_digits_and_emails_are_dropped() {
    let cleaned = normalizer()
        .normalise("Check this: https://x.co #wow 123 email@x.com")
        .unwrap();
    assert_eq!(cleaned, "check this wow");
}

#[test]
fn headline_is_lemmatised() {
    let cleaned = normalizer()
        .normalise("Forest fires burning near La Ronge Sask. Canada")
        .unwrap();
    insta::assert_snapshot!(cleaned, @"forest fire burn near la ronge sask canada");
}

#[test]
fn isolated_single_letters_are_removed() {
    assert_eq!(strip("a big a house"), "big house");
}

#[test]
fn underscores_and_at_signs_are_stripped() {
    assert_eq!(strip("flood_warning @home"), "floodwarning home");
}

#[test]
fn digits_inside_words_are_stripped() {
    assert_eq!(strip("route66 closed"), "route closed");
}

#[test]
fn strip_rules_run_in_declared_order() {
    let names: Vec<&str> = strip_rules().iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        [
            "non_word",
            "digits",
            "single_letters",
            "hyphens",
            "underscores",
            "html_amp",
            "at_signs",
            "whitespace"
        ]
    );
}

#[test]
fn only_punctuation_normalises_to_empty() {
    assert_eq!(normalizer().normalise("!!! ??? ...").unwrap(), "");
}

#[test]
fn non_ascii_tokens_are_dropped() {
    assert_eq!(normalizer().normalise("Fuego en la ciudad café").unwrap(), "fuego en la ciudad");
}

#[test]
fn contractions_split_into_lemmas() {
    assert_eq!(normalizer().normalise("We're safe").unwrap(), "we be safe");
}

#[test]
fn normalisation_is_deterministic() {
    let text = "Earthquake!! 3 buildings COLLAPSED near http://t.co/abc";
    let n = normalizer();
    assert_eq!(n.normalise(text).unwrap(), n.normalise(text).unwrap());
}

#[test]
fn predicates_filter_injected_tokens() {
    let mut url = word("http://t.co");
    url.is_url_like = true;
    let mut mail = word("a@b.org");
    mail.is_email_like = true;
    let mut digits = word("42");
    digits.is_digit = true;
    let mut bang = word("!");
    bang.is_punct = true;
    let tokens = vec![word("storm"), url, mail, digits, bang, word("naïve"), word("surge")];

    let normalizer = TextNormalizer::new(Arc::new(Fixed(tokens)));
    assert_eq!(normalizer.lemma_string("ignored").unwrap(), "storm surge");
}

#[test]
fn oversized_text_is_rejected() {
    let normalizer = TextNormalizer::new(Arc::new(RuleAnnotator::new(5)));
    let err = normalizer.normalise("far too long").unwrap_err();
    assert_eq!(err, TokenizationError::TextTooLong { len: 12, max: 5 });
}

#[test]
fn lemmatizer_handles_common_inflections() {
    let lemmatizer = Lemmatizer::english();
    for (word, lemma) in [
        ("running", "run"),
        ("cities", "city"),
        ("making", "make"),
        ("burning", "burn"),
        ("killed", "kill"),
        ("evacuated", "evacuate"),
        ("caused", "cause"),
        ("floods", "flood"),
        ("was", "be"),
        ("this", "this"),
    ] {
        assert_eq!(lemmatizer.lemma(word), lemma, "lemma of {word}");
    }
}
