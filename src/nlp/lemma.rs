//! Lookup-plus-suffix English lemmatiser.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static EXCEPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("am", "be"),
        ("is", "be"),
        ("are", "be"),
        ("was", "be"),
        ("were", "be"),
        ("been", "be"),
        ("being", "be"),
        ("has", "have"),
        ("had", "have"),
        ("having", "have"),
        ("does", "do"),
        ("did", "do"),
        ("done", "do"),
        ("doing", "do"),
        ("ca", "can"),
        ("wo", "will"),
        ("went", "go"),
        ("gone", "go"),
        ("goes", "go"),
        ("ran", "run"),
        ("fell", "fall"),
        ("fallen", "fall"),
        ("burnt", "burn"),
        ("took", "take"),
        ("taken", "take"),
        ("got", "get"),
        ("gotten", "get"),
        ("made", "make"),
        ("said", "say"),
        ("came", "come"),
        ("saw", "see"),
        ("seen", "see"),
        ("knew", "know"),
        ("known", "know"),
        ("thought", "think"),
        ("told", "tell"),
        ("felt", "feel"),
        ("left", "leave"),
        ("kept", "keep"),
        ("found", "find"),
        ("brought", "bring"),
        ("caught", "catch"),
        ("built", "build"),
        ("sent", "send"),
        ("struck", "strike"),
        ("shot", "shoot"),
        ("blew", "blow"),
        ("blown", "blow"),
        ("broke", "break"),
        ("broken", "break"),
        ("died", "die"),
        ("dies", "die"),
        ("dying", "die"),
        ("lying", "lie"),
        ("used", "use"),
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("feet", "foot"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("better", "well"),
        ("best", "well"),
    ]
    .into_iter()
    .collect()
});

/// Words the suffix rules would mangle.
const INVARIANT: &[&str] = &[
    "news", "always", "this", "his", "its", "us", "yes", "perhaps", "series", "species", "as",
    "thus", "chaos", "during", "morning", "evening", "nothing", "something", "anything",
    "everything", "building", "ceiling", "bed", "red", "need", "speed", "feed", "indeed",
    "hundred",
];

fn is_vowel(word: &[u8], idx: usize) -> bool {
    match word[idx] {
        b'a' | b'e' | b'i' | b'o' | b'u' => true,
        b'y' => idx > 0 && !is_vowel(word, idx - 1),
        _ => false,
    }
}

/// Number of vowel-consonant sequences, the Porter "measure".
fn measure(word: &[u8]) -> usize {
    let mut count = 0;
    let mut prev_vowel = false;
    for idx in 0..word.len() {
        let vowel = is_vowel(word, idx);
        if prev_vowel && !vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    count
}

fn has_vowel(word: &[u8]) -> bool {
    (0..word.len()).any(|idx| is_vowel(word, idx))
}

/// Consonant-vowel-consonant ending where the last consonant is not w, x or y.
fn ends_cvc(word: &[u8]) -> bool {
    let n = word.len();
    n >= 3
        && !is_vowel(word, n - 3)
        && is_vowel(word, n - 2)
        && !is_vowel(word, n - 1)
        && !matches!(word[n - 1], b'w' | b'x' | b'y')
}

/// English lemmatiser: exception lookup first, then inflection suffix rules.
#[derive(Debug, Clone, Default)]
pub struct Lemmatizer;

impl Lemmatizer {
    pub fn english() -> Self {
        Self
    }

    pub fn lemma(&self, word: &str) -> String {
        if let Some(lemma) = EXCEPTIONS.get(word) {
            return (*lemma).to_string();
        }
        if word.len() <= 3
            || !word.bytes().all(|b| b.is_ascii_lowercase())
            || INVARIANT.iter().any(|w| *w == word)
        {
            return word.to_string();
        }
        strip_plural(word)
            .or_else(|| strip_verb_suffix(word, "ing", 6))
            .or_else(|| strip_verb_suffix(word, "ed", 5))
            .unwrap_or_else(|| word.to_string())
    }
}

fn strip_plural(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("ies") {
        return (word.len() > 4).then(|| format!("{stem}y"));
    }
    if word.ends_with("sses") {
        return Some(word[..word.len() - 2].to_string());
    }
    for suffix in ["ches", "shes", "xes", "zes"] {
        if word.ends_with(suffix) {
            return Some(word[..word.len() - 2].to_string());
        }
    }
    if word.ends_with('s') && !["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return Some(word[..word.len() - 1].to_string());
    }
    None
}

fn strip_verb_suffix(word: &str, suffix: &str, min_len: usize) -> Option<String> {
    let stem = word.strip_suffix(suffix)?;
    if word.len() < min_len || (suffix == "ed" && stem.ends_with('e')) {
        return None;
    }
    let bytes = stem.as_bytes();
    if !has_vowel(bytes) {
        return None;
    }
    let n = bytes.len();
    if n >= 2 && bytes[n - 1] == bytes[n - 2] && !is_vowel(bytes, n - 1) {
        return Some(match bytes[n - 1] {
            b'l' | b's' | b'z' => stem.to_string(),
            _ => stem[..n - 1].to_string(),
        });
    }
    let restore_e = ["at", "bl", "iz", "us", "v", "c"]
        .iter()
        .any(|end| stem.ends_with(end))
        || (measure(bytes) == 1 && ends_cvc(bytes));
    Some(if restore_e {
        format!("{stem}e")
    } else {
        stem.to_string()
    })
}
