//! Statistics Calculator Module
//! Averages and descriptive statistics over dataset columns.

use serde::Serialize;
use statrs::statistics::{Data, Max, Median, Min};
use thiserror::Error;

use crate::data::Value;

#[derive(Error, Debug, PartialEq)]
pub enum StatsError {
    #[error("Cannot aggregate an empty column")]
    EmptyInput,
    #[error("Value at row {index} is {found}, expected a number")]
    TypeMismatch { index: usize, found: &'static str },
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Every value as `f64`; the first non-numeric cell is an error.
fn numeric(values: &[Value]) -> Result<Vec<f64>, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value.as_f64().ok_or(StatsError::TypeMismatch {
                index,
                found: value.kind(),
            })
        })
        .collect()
}

/// Arithmetic mean, `sum / len`.
pub fn average(values: &[Value]) -> Result<f64, StatsError> {
    let numbers = numeric(values)?;
    Ok(numbers.iter().sum::<f64>() / numbers.len() as f64)
}

/// Count, mean, median, sample standard deviation and range of a column.
pub fn summarize(values: &[Value]) -> Result<ColumnSummary, StatsError> {
    let numbers = numeric(values)?;
    let count = numbers.len();
    let mean = numbers.iter().sum::<f64>() / count as f64;
    let std_dev = if count > 1 {
        statrs::statistics::Statistics::std_dev(numbers.iter())
    } else {
        0.0
    };

    let data = Data::new(numbers);
    Ok(ColumnSummary {
        count,
        mean,
        median: data.median(),
        std_dev,
        min: data.min(),
        max: data.max(),
    })
}

/// Percentage (0-100) of column values less than or equal to `x`.
pub fn percentile_rank(values: &[Value], x: f64) -> Result<f64, StatsError> {
    let numbers = numeric(values)?;
    let at_or_below = numbers.iter().filter(|&&v| v <= x).count();
    Ok(at_or_below as f64 * 100.0 / numbers.len() as f64)
}
