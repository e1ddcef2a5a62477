//! Command line arguments.

use broadband_compare::{QueryParams, Verbosity};
use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Internet speed and bandwidth comparison tool
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Location of the CSV to load
    #[arg(short = 'f', long = "file", env = "BROADBAND_CSV")]
    pub csv: PathBuf,

    /// The location to analyse, e.g. "Leicester"
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub location: String,

    /// Compare your location to another location
    #[arg(long = "compare", value_parser = NonEmptyStringValueParser::new())]
    pub comparison_location: Option<String>,

    /// Maximum download speed of this connection in Mb/s, e.g. 50
    #[arg(short = 'd', long = "max-download-speed")]
    pub max_dl_speed: Option<u32>,

    /// Minimum download speed of this connection in Mb/s
    #[arg(long = "min-download-speed")]
    pub min_dl_speed: Option<u32>,

    /// Maximum upload speed of this connection in Mb/s
    #[arg(short = 'u', long = "max-upload-speed")]
    pub max_ul_speed: Option<u32>,

    /// Minimum upload speed of this connection in Mb/s
    #[arg(long = "min-upload-speed")]
    pub min_ul_speed: Option<u32>,

    /// Report detail
    #[arg(short, long, value_enum, default_value_t = ReportKind::Full)]
    pub report: ReportKind,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Full,
    Short,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Args {
    pub fn query_params(&self) -> QueryParams {
        QueryParams {
            location: self.location.clone(),
            comparison_location: self.comparison_location.clone(),
            max_dl_speed: self.max_dl_speed,
            min_dl_speed: self.min_dl_speed,
            max_ul_speed: self.max_ul_speed,
            min_ul_speed: self.min_ul_speed,
            verbosity: match self.report {
                ReportKind::Full => Verbosity::Full,
                ReportKind::Short => Verbosity::Short,
            },
        }
    }
}
