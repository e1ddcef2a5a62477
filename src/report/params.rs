//! Caller supplied query parameters.

use serde::Serialize;

/// How much the report should contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Every speed section plus national summaries.
    #[default]
    Full,
    /// Only sections the user asked about through a speed threshold.
    Short,
}

/// Parameters for one report. Speeds are in Mbit/s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pub location: String,
    pub comparison_location: Option<String>,
    pub max_dl_speed: Option<u32>,
    pub min_dl_speed: Option<u32>,
    pub max_ul_speed: Option<u32>,
    pub min_ul_speed: Option<u32>,
    pub verbosity: Verbosity,
}

impl QueryParams {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    pub fn with_comparison(mut self, location: impl Into<String>) -> Self {
        self.comparison_location = Some(location.into());
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub(crate) fn wants_download(&self) -> bool {
        self.verbosity == Verbosity::Full
            || self.max_dl_speed.is_some()
            || self.min_dl_speed.is_some()
    }

    pub(crate) fn wants_upload(&self) -> bool {
        self.verbosity == Verbosity::Full
            || self.max_ul_speed.is_some()
            || self.min_ul_speed.is_some()
    }
}
