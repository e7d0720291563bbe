//! Row and table types shared by every pipeline stage.

use serde::Serialize;

/// Placeholder written into absent `keyword`/`location` fields.
pub const MISSING_SENTINEL: &str = "None";

/// One social-media post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: i64,
    pub keyword: Option<String>,
    pub location: Option<String>,
    /// Text exactly as loaded. Never rewritten after load.
    pub raw_text: String,
    /// Normalised text; empty until the normaliser runs.
    pub cleaned_text: String,
    /// Class label, only present for the training file.
    pub target: Option<bool>,
}

impl Record {
    pub fn new(id: i64, raw_text: impl Into<String>) -> Self {
        Self {
            id,
            keyword: None,
            location: None,
            raw_text: raw_text.into(),
            cleaned_text: String::new(),
            target: None,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_target(mut self, target: bool) -> Self {
        self.target = Some(target);
        self
    }

    /// Lowercased raw text, the "before preprocessing" view used by reports.
    pub fn lowered_text(&self) -> String {
        self.raw_text.to_lowercase()
    }
}

/// Ordered collection of records, insertion order preserved from the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Look a record up by its id.
    pub fn get(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records carrying the given class label, in dataset order.
    pub fn with_target(&self, target: bool) -> impl Iterator<Item = &Record> + '_ {
        self.records
            .iter()
            .filter(move |r| r.target == Some(target))
    }

    /// Count of records per class label, `(negatives, positives)`.
    pub fn class_counts(&self) -> (usize, usize) {
        self.records
            .iter()
            .fold((0, 0), |(neg, pos), r| match r.target {
                Some(true) => (neg, pos + 1),
                Some(false) => (neg + 1, pos),
                None => (neg, pos),
            })
    }

    pub(crate) fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Record) -> bool,
    {
        self.records.retain(keep);
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
