//! Report module - Location versus national comparison

mod builder;
mod params;

pub use builder::{Comparison, Direction, Report, ReportError, SpeedSection};
pub use params::{QueryParams, Verbosity};
