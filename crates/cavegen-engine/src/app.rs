//! Headless generation run.

use std::io::{self, Write};

use anyhow::{Context, Result};
use cavegen_kernel::Grid;
use cavegen_world::CaveGenerator;
use tracing::info;

use crate::config::EngineConfig;

/// Generates one map with the configured pipeline and reports on it.
pub fn run(config: &EngineConfig) -> Result<()> {
    let settings = &config.generator;
    let mut generator =
        CaveGenerator::new(settings.size).context("Failed to create generator")?;

    let report = generator
        .generate_sized(settings)
        .context("Map generation failed")?;

    let total = generator.size() * generator.size();
    info!(
        "Chamber: {} cells ({:.1}% of {}x{}), attempts: {}, accepted: {}",
        report.chamber_size,
        100.0 * report.chamber_size as f64 / total as f64,
        generator.size(),
        generator.size(),
        report.attempts,
        report.accepted
    );

    if config.print_map {
        let mut out = io::stdout().lock();
        write_map(&mut out, &generator.occupancy_snapshot())?;
        out.flush()?;
    }
    Ok(())
}

/// Writes the map as text, `#` for solid and `.` for open, one row per line.
fn write_map<W: Write>(out: &mut W, map: &Grid<bool>) -> io::Result<()> {
    for row in map.to_rows() {
        let line: String = row.iter().map(|&solid| if solid { '#' } else { '.' }).collect();
        writeln!(out, "{line}")?;
    }
    Ok(())
}
