//! Tabular summaries computed with polars for the reporting layer.

use polars::prelude::{DataFrame, NamedFrom, PolarsResult, Series};
use serde::Serialize;

use crate::data::Dataset;

/// Share of null values in one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingRate {
    pub column: String,
    pub percent: f64,
}

/// Materialise the dataset's source columns as a DataFrame, nulls preserved.
pub fn to_frame(dataset: &Dataset) -> PolarsResult<DataFrame> {
    let ids: Vec<i64> = dataset.iter().map(|r| r.id).collect();
    let keywords: Vec<Option<String>> = dataset.iter().map(|r| r.keyword.clone()).collect();
    let locations: Vec<Option<String>> = dataset.iter().map(|r| r.location.clone()).collect();
    let texts: Vec<String> = dataset.iter().map(|r| r.raw_text.clone()).collect();
    let mut columns = vec![
        Series::new("id".into(), ids),
        Series::new("keyword".into(), keywords),
        Series::new("location".into(), locations),
        Series::new("text".into(), texts),
    ];
    if dataset.iter().any(|r| r.target.is_some()) {
        let targets: Vec<Option<i64>> = dataset
            .iter()
            .map(|r| r.target.map(i64::from))
            .collect();
        columns.push(Series::new("target".into(), targets));
    }
    DataFrame::new(columns)
}

/// Percentage of missing values per column, in column order.
pub fn missing_rates(dataset: &Dataset) -> PolarsResult<Vec<MissingRate>> {
    let frame = to_frame(dataset)?;
    let height = frame.height();
    Ok(frame
        .get_columns()
        .iter()
        .map(|series| MissingRate {
            column: series.name().to_string(),
            percent: if height == 0 {
                0.0
            } else {
                series.null_count() as f64 * 100.0 / height as f64
            },
        })
        .collect())
}
