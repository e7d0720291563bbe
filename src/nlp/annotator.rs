//! Token annotation: segmentation, lemmas and lexical predicates.
//!
//! [`TextAnnotator`] is the seam the normaliser and the punctuation counter
//! depend on. [`RuleAnnotator`] is the bundled English implementation; swap in
//! a model-backed annotator by implementing the trait.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::{error::TokenizationError, nlp::lemma::Lemmatizer};

/// One annotated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub is_punct: bool,
    pub is_digit: bool,
    pub is_url_like: bool,
    pub is_email_like: bool,
    pub is_ascii: bool,
}

impl Token {
    /// Whether the token's lemma belongs in cleaned text.
    pub fn is_content(&self) -> bool {
        !self.is_punct
            && !self.is_digit
            && !self.is_url_like
            && !self.is_email_like
            && self.is_ascii
    }
}

/// Tokeniser + lemmatiser capability.
pub trait TextAnnotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<Vec<Token>, TokenizationError>;
}

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("valid regex")
});

static URL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:https?://|ftp://|www\.)").expect("valid regex"));

const URL_TLDS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "mil", "int", "io", "co", "uk", "us", "ca", "de", "fr",
    "it", "es", "nl", "be", "ch", "au", "in", "jp", "ru", "br", "ly", "gl", "me", "tv", "fm",
    "info", "biz", "news", "app",
];

/// Contraction suffixes split off a word, with their lemma.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("n't", "not"),
    ("'re", "be"),
    ("'ve", "have"),
    ("'ll", "will"),
    ("'m", "be"),
    ("'d", "would"),
    ("'s", "'s"),
];

/// Characters peeled off a whitespace chunk before URL/email detection.
const WRAPPING_PUNCT: &[char] = &[
    '(', ')', '[', ']', '<', '>', '"', '\'', '.', ',', '!', '?', ';', ':',
];

pub fn is_punct(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_punct_char)
}

fn is_punct_char(c: char) -> bool {
    if c.is_ascii() {
        // ASCII symbols ($ + < = > ^ ` | ~) are not punctuation.
        return c.is_ascii_punctuation() && !"$+<=>^`|~".contains(c);
    }
    matches!(
        c,
        '\u{00A1}'
            | '\u{00A7}'
            | '\u{00AB}'
            | '\u{00B6}'
            | '\u{00B7}'
            | '\u{00BB}'
            | '\u{00BF}'
            | '\u{2010}'..='\u{2027}'
            | '\u{2030}'..='\u{205E}'
            | '\u{3001}'..='\u{3003}'
            | '\u{3008}'..='\u{3011}'
            | '\u{FF01}'..='\u{FF0F}'
    )
}

pub fn is_digit(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

pub fn like_email(text: &str) -> bool {
    EMAIL.is_match(text)
}

pub fn like_url(text: &str) -> bool {
    if text.len() < 3 {
        return false;
    }
    if URL_PREFIX.is_match(text) || text.contains("://") {
        return true;
    }
    if !text.contains('.') || text.contains('@') {
        return false;
    }
    let host = text.split('/').next().unwrap_or(text);
    let tld = host
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .trim_end_matches(|c: char| !c.is_ascii_alphabetic());
    let has_label = host.split('.').next().is_some_and(|label| !label.is_empty());
    has_label && URL_TLDS.iter().any(|t| *t == tld)
}

/// Rule-based English annotator: whitespace chunks, URL/email preservation,
/// UAX #29 word bounds, contraction splitting and a suffix lemmatiser.
#[derive(Debug, Clone)]
pub struct RuleAnnotator {
    lemmatizer: Lemmatizer,
    max_chars: usize,
}

impl RuleAnnotator {
    pub fn new(max_chars: usize) -> Self {
        Self {
            lemmatizer: Lemmatizer::english(),
            max_chars,
        }
    }

    fn token(&self, text: &str) -> Token {
        let url = like_url(text);
        let email = like_email(text);
        let lemma = if url || email {
            text.to_string()
        } else {
            self.lemmatizer.lemma(text)
        };
        Token {
            text: text.to_string(),
            lemma,
            is_punct: is_punct(text),
            is_digit: is_digit(text),
            is_url_like: url,
            is_email_like: email,
            is_ascii: text.is_ascii(),
        }
    }

    fn push_chunk(&self, chunk: &str, out: &mut Vec<Token>) {
        let core_start = chunk
            .find(|c: char| !WRAPPING_PUNCT.contains(&c))
            .unwrap_or(chunk.len());
        let core_end = chunk
            .rfind(|c: char| !WRAPPING_PUNCT.contains(&c))
            .map(|idx| idx + chunk[idx..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(core_start)
            .max(core_start);
        let core = &chunk[core_start..core_end];

        if !core.is_empty() && (like_url(core) || like_email(core)) {
            self.push_segments(&chunk[..core_start], out);
            out.push(self.token(core));
            self.push_segments(&chunk[core_end..], out);
        } else {
            self.push_segments(chunk, out);
        }
    }

    fn push_segments(&self, text: &str, out: &mut Vec<Token>) {
        for segment in text.split_word_bounds() {
            if segment.trim().is_empty() {
                continue;
            }
            match split_contraction(segment) {
                Some((head, tail, tail_lemma)) => {
                    if !head.is_empty() {
                        out.push(self.token(head));
                    }
                    let mut token = self.token(tail);
                    token.lemma = tail_lemma.to_string();
                    out.push(token);
                }
                None => out.push(self.token(segment)),
            }
        }
    }
}

impl Default for RuleAnnotator {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl TextAnnotator for RuleAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<Token>, TokenizationError> {
        let len = text.chars().count();
        if len > self.max_chars {
            return Err(TokenizationError::TextTooLong {
                len,
                max: self.max_chars,
            });
        }
        if text.contains('\0') {
            return Err(TokenizationError::InvalidInput("nul byte in text".into()));
        }
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            self.push_chunk(chunk, &mut tokens);
        }
        Ok(tokens)
    }
}

/// Split `don't` into (`do`, `n't`, `not`); curly apostrophes are matched too.
fn split_contraction(word: &str) -> Option<(&str, &str, &'static str)> {
    if !word.contains('\'') && !word.contains('\u{2019}') {
        return None;
    }
    let normalised = word.replace('\u{2019}', "'");
    CONTRACTIONS.iter().find_map(|(suffix, lemma)| {
        if normalised.len() > suffix.len() && normalised.ends_with(suffix) {
            // Byte offset in the original word where the suffix starts.
            let suffix_chars = suffix.chars().count();
            let split = word.char_indices().rev().nth(suffix_chars - 1)?.0;
            Some((&word[..split], &word[split..], *lemma))
        } else {
            None
        }
    })
}
