//! CSV ingestion for the train and test tweet files.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::{
    data::{Dataset, Record},
    error::LoadError,
};

const BASE_COLUMNS: &[&str] = &["id", "keyword", "location", "text"];
const TARGET_COLUMN: &str = "target";

#[derive(Debug, Deserialize)]
struct RawRow {
    id: i64,
    keyword: Option<String>,
    location: Option<String>,
    text: String,
    #[serde(default)]
    target: Option<String>,
}

/// Load the labeled training file. Requires a `target` column of 0/1 values.
pub fn load_train(path: &Path) -> Result<Dataset, LoadError> {
    load(path, true)
}

/// Load the unlabeled test file. A `target` column, if present, is ignored.
pub fn load_test(path: &Path) -> Result<Dataset, LoadError> {
    load(path, false)
}

fn load(path: &Path, labeled: bool) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingFile(path.to_path_buf()));
    }
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let mut required: Vec<&str> = BASE_COLUMNS.to_vec();
    if labeled {
        required.push(TARGET_COLUMN);
    }
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !headers.iter().any(|h| h.trim() == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        });
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<RawRow>() {
        let row = row.map_err(csv_err)?;
        let target = if labeled {
            Some(parse_target(row.id, row.target.as_deref())?)
        } else {
            None
        };
        records.push(Record {
            id: row.id,
            keyword: row.keyword,
            location: row.location,
            raw_text: row.text,
            cleaned_text: String::new(),
            target,
        });
    }
    info!(path = %path.display(), rows = records.len(), labeled, "loaded dataset");
    Ok(Dataset::new(records))
}

fn parse_target(id: i64, value: Option<&str>) -> Result<bool, LoadError> {
    match value.map(str::trim) {
        Some("1") => Ok(true),
        Some("0") => Ok(false),
        other => Err(LoadError::InvalidTarget {
            id,
            value: other.unwrap_or_default().to_string(),
        }),
    }
}
