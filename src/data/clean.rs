//! Row-level cleaning: sentinel filling and first-occurrence deduplication.

use std::collections::HashSet;

use tracing::info;

use crate::data::{Dataset, Record, MISSING_SENTINEL};

/// Replace absent `keyword`/`location` values with [`MISSING_SENTINEL`].
pub fn fill_missing(dataset: &mut Dataset) {
    let mut filled = 0usize;
    for record in dataset.records_mut() {
        for field in [&mut record.keyword, &mut record.location] {
            if field.is_none() {
                *field = Some(MISSING_SENTINEL.to_string());
                filled += 1;
            }
        }
    }
    info!(filled, "missing values filled");
}

/// Drop records whose raw text repeats an earlier record's raw text.
pub fn dedup_raw(dataset: &mut Dataset) {
    let before = dataset.len();
    dedup_by(dataset, |r| Some(r.raw_text.as_str()));
    info!(before, after = dataset.len(), "duplicate records removed");
}

/// Drop records whose cleaned text repeats an earlier record's cleaned text.
///
/// With `keep_empty` set, records that normalised to the empty string are
/// never treated as duplicates of each other.
pub fn dedup_cleaned(dataset: &mut Dataset, keep_empty: bool) {
    let before = dataset.len();
    dedup_by(dataset, |r| {
        if keep_empty && r.cleaned_text.is_empty() {
            None
        } else {
            Some(r.cleaned_text.as_str())
        }
    });
    info!(before, after = dataset.len(), keep_empty, "post-clean duplicates dropped");
}

/// Keep the first record per key; records keyed `None` always survive.
fn dedup_by<F>(dataset: &mut Dataset, key: F)
where
    F: Fn(&Record) -> Option<&str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    dataset.retain(|record| match key(record) {
        Some(k) => seen.insert(k.to_string()),
        None => true,
    });
}
