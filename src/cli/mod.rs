//! CLI module - arguments, logging and output

mod args;
mod render;

pub use args::{Args, OutputFormat};

use anyhow::Result;
use broadband_compare::{DatasetError, DatasetStore, Report, ReportError};
use std::io;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Load the CSV, build the report and print it to stdout.
pub fn run(args: &Args) -> Result<()> {
    let mut store = DatasetStore::new();
    store.load(&args.csv)?;
    debug!(
        columns = ?store.columns(),
        location_column = ?store.location_column(),
        "dataset loaded"
    );

    let report = Report::build(&store, &args.query_params())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => render::write_text(&report, &mut out)?,
        OutputFormat::Json => render::write_json(&report, &mut out)?,
    }
    Ok(())
}

fn dataset_error(err: &anyhow::Error) -> Option<&DatasetError> {
    err.downcast_ref::<DatasetError>()
        .or_else(|| match err.downcast_ref::<ReportError>() {
            Some(ReportError::Dataset(e)) => Some(e),
            _ => None,
        })
}

/// User facing message for a failed run.
pub fn describe(err: &anyhow::Error) -> String {
    match dataset_error(err) {
        Some(DatasetError::NotFound { value }) => {
            format!("Location '{value}' was not found in the provided CSV")
        }
        Some(DatasetError::UnresolvedLocationColumn) => format!(
            "{err}. Check that the CSV is a broadband speed dataset."
        ),
        _ => err.to_string(),
    }
}

/// 2 for a location miss, 1 for everything else.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    match dataset_error(err) {
        Some(DatasetError::NotFound { .. }) => 2,
        _ => 1,
    }
}
