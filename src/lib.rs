//! Broadband Compare - broadband speed lookups against national averages
//!
//! Loads a CSV of per-location speed statistics into an in-memory Polars
//! snapshot and answers column and location lookups through stable logical keys.

pub mod data;
pub mod report;
pub mod stats;

pub use data::{DatasetError, DatasetStore, Field, LocationRow, StoreState, Value};
pub use report::{QueryParams, Report, ReportError, Verbosity};
pub use stats::{average, StatsError};
