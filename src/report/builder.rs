//! Report Builder Module
//! Combines a location lookup with national aggregates.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::params::{QueryParams, Verbosity};
use crate::data::{DatasetError, DatasetStore, Field, LocationRow};
use crate::stats::{self, ColumnSummary, StatsError};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Location must not be empty")]
    EmptyLocation,
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Stats(#[from] StatsError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Download,
    Upload,
}

impl Direction {
    fn fields(self) -> (Field, Field, Field) {
        match self {
            Direction::Download => (Field::AvgDlSpeed, Field::MaxDlSpeed, Field::MinDlSpeed),
            Direction::Upload => (Field::AvgUlSpeed, Field::MaxUlSpeed, Field::MinUlSpeed),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Download => "download",
            Direction::Upload => "upload",
        }
    }
}

/// Location versus country for one direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedSection {
    pub direction: Direction,
    pub national_average: f64,
    pub location_average: Option<f64>,
    /// Share of locations whose average is at or below this one.
    pub percentile_rank: Option<f64>,
    pub location_max: Option<f64>,
    pub location_min: Option<f64>,
    pub user_max: Option<u32>,
    pub user_min: Option<u32>,
    pub national: Option<ColumnSummary>,
}

impl SpeedSection {
    fn build(
        store: &DatasetStore,
        row: &LocationRow,
        direction: Direction,
        user_min: Option<u32>,
        user_max: Option<u32>,
        with_summary: bool,
    ) -> Result<Self, ReportError> {
        let (avg, max, min) = direction.fields();
        let national_values = store.query_column(avg)?;
        let national_average = stats::average(&national_values)?;
        let location_average = row.number(avg);
        let percentile_rank = location_average
            .map(|x| stats::percentile_rank(&national_values, x))
            .transpose()?;
        let national = if with_summary {
            Some(stats::summarize(&national_values)?)
        } else {
            None
        };

        Ok(Self {
            direction,
            national_average,
            location_average,
            percentile_rank,
            location_max: row.number(max),
            location_min: row.number(min),
            user_max,
            user_min,
            national,
        })
    }
}

/// Average speeds of the comparison location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub name: String,
    pub avg_dl_speed: Option<f64>,
    pub avg_ul_speed: Option<f64>,
}

/// Everything needed to print a comparison report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub location: String,
    pub verbosity: Verbosity,
    pub row: LocationRow,
    pub download: Option<SpeedSection>,
    pub upload: Option<SpeedSection>,
    pub comparison: Option<Comparison>,
}

impl Report {
    /// Look up `params.location` (and the comparison location, if any) in a
    /// loaded store and compute the sections `params` asks for.
    pub fn build(store: &DatasetStore, params: &QueryParams) -> Result<Self, ReportError> {
        if params.location.trim().is_empty() {
            return Err(ReportError::EmptyLocation);
        }

        let row = store.find_row(Field::Location, &params.location)?;
        let location = row
            .location_name()
            .unwrap_or(params.location.as_str())
            .to_string();
        debug!(location = %location, row = row.index(), "location found");

        let full = params.verbosity == Verbosity::Full;
        let download = if params.wants_download() {
            Some(SpeedSection::build(
                store,
                &row,
                Direction::Download,
                params.min_dl_speed,
                params.max_dl_speed,
                full,
            )?)
        } else {
            None
        };
        let upload = if params.wants_upload() {
            Some(SpeedSection::build(
                store,
                &row,
                Direction::Upload,
                params.min_ul_speed,
                params.max_ul_speed,
                full,
            )?)
        } else {
            None
        };

        let comparison = match params.comparison_location.as_deref() {
            Some(name) => {
                let other = store.find_row(Field::Location, name)?;
                Some(Comparison {
                    name: other.location_name().unwrap_or(name).to_string(),
                    avg_dl_speed: other.number(Field::AvgDlSpeed),
                    avg_ul_speed: other.number(Field::AvgUlSpeed),
                })
            }
            None => None,
        };

        Ok(Self {
            location,
            verbosity: params.verbosity,
            row,
            download,
            upload,
            comparison,
        })
    }
}
