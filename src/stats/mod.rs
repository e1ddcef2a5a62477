//! Stats module - Aggregation over dataset columns

mod calculator;

pub use calculator::{average, percentile_rank, summarize, ColumnSummary, StatsError};
