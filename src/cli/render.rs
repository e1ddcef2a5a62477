//! Console rendering of a `Report`.

use broadband_compare::report::SpeedSection;
use broadband_compare::{Report, Verbosity};
use std::io::{self, Write};

fn mbps(x: f64) -> String {
    if x.fract() == 0.0 {
        format!("{x:.0}Mb/s")
    } else {
        format!("{x:.1}Mb/s")
    }
}

/// Human readable report.
pub fn write_text(report: &Report, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Your location: '{}'", report.location)?;
    writeln!(out)?;

    if report.verbosity == Verbosity::Full {
        writeln!(out, "Dataset row {}:", report.row.index() + 1)?;
        for (column, value) in report.row.cells() {
            writeln!(out, "  {column}: {value}")?;
        }
        writeln!(out)?;
    }

    for section in [&report.download, &report.upload].into_iter().flatten() {
        write_section(report, section, out)?;
        writeln!(out)?;
    }

    if let Some(other) = &report.comparison {
        if let Some(dl) = other.avg_dl_speed {
            writeln!(out, "Average download speed of {}: {}", other.name, mbps(dl))?;
        }
        if let Some(ul) = other.avg_ul_speed {
            writeln!(out, "Average upload speed of {}: {}", other.name, mbps(ul))?;
        }
    }
    Ok(())
}

fn write_section(report: &Report, section: &SpeedSection, out: &mut impl Write) -> io::Result<()> {
    let dir = section.direction.label();
    writeln!(
        out,
        "Average {dir} speed of country: {}.",
        mbps(section.national_average.trunc())
    )?;

    match (section.location_average, section.percentile_rank) {
        (Some(avg), Some(rank)) => writeln!(
            out,
            "Average {dir} speed of {}: {} (at or above {rank:.0}% of locations)",
            report.location,
            mbps(avg)
        )?,
        (Some(avg), None) => writeln!(out, "Average {dir} speed of {}: {}", report.location, mbps(avg))?,
        (None, _) => writeln!(out, "Average {dir} speed of {}: not recorded", report.location)?,
    }

    write_threshold(out, "Maximum", dir, section.user_max, section.location_max, &report.location)?;
    write_threshold(out, "Minimum", dir, section.user_min, section.location_min, &report.location)?;

    if let Some(summary) = &section.national {
        writeln!(
            out,
            "Country {dir} speeds: median {}, std dev {:.1}, range {}-{} over {} locations",
            mbps(summary.median),
            summary.std_dev,
            mbps(summary.min),
            mbps(summary.max),
            summary.count
        )?;
    }
    Ok(())
}

fn write_threshold(
    out: &mut impl Write,
    bound: &str,
    dir: &str,
    user: Option<u32>,
    recorded: Option<f64>,
    location: &str,
) -> io::Result<()> {
    let Some(user) = user else {
        return Ok(());
    };
    match recorded {
        Some(recorded) => {
            let diff = f64::from(user) - recorded;
            writeln!(
                out,
                "{bound} {dir} speed: yours {}, {location} {} ({diff:+.1}Mb/s)",
                mbps(user.into()),
                mbps(recorded)
            )
        }
        None => writeln!(out, "{bound} {dir} speed: yours {}", mbps(user.into())),
    }
}

/// Pretty printed JSON.
pub fn write_json(report: &Report, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}
