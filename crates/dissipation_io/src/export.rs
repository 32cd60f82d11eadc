//! CSV exports for manual runs and sweeps.
//!
//! Every export starts with one metadata line (`# ` followed by a JSON
//! [`RunMetadata`] object), then a header row, then data rows.

use crate::error::{IoError, Result};
use chrono::{DateTime, Utc};
use dissipation_core::config::{AppConfig, EngineConfig, SweepConfig};
use dissipation_data::{ComparisonRecord, Mode, StepStats, SweepResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use uuid::Uuid;

/// Prefix of the metadata line.
pub const METADATA_PREFIX: &str = "# ";

const STEP_FIELDS: [&str; 6] = [
    "delta_heat",
    "total_heat",
    "agent_count",
    "heat_diff",
    "heat_act",
    "energy_error",
];

pub const SWEEP_HEADER: &str = "inflow,consumption,avg_off_delta,avg_life_delta,ratio,\
avg_life_heat_diff,avg_life_heat_act,avg_agents_life,avg_agents_random,error_min,error_max,status";

/// Run configuration and sweep boundaries written ahead of every export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub fingerprint: String,
    pub engine: EngineConfig,
    pub sweep: SweepConfig,
}

impl RunMetadata {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            created_at: Utc::now(),
            fingerprint: config.fingerprint(),
            engine: config.engine.clone(),
            sweep: config.sweep.clone(),
        }
    }

    pub fn to_line(&self) -> Result<String> {
        let json = serde_json::to_string(self)
            .map_err(|e| IoError::serialization(format!("Metadata serialization failed: {e}")))?;
        Ok(format!("{METADATA_PREFIX}{json}"))
    }

    pub fn from_line(line: &str) -> Result<Self> {
        let json = line
            .strip_prefix(METADATA_PREFIX)
            .ok_or_else(|| IoError::validation("Missing metadata prefix"))?;
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the metadata line at the top of an export.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self> {
        let line = reader
            .lines()
            .next()
            .ok_or_else(|| IoError::validation("Empty export"))??;
        Self::from_line(&line)
    }
}

/// Header of the manual-run export: `tick`, then six columns per mode.
#[must_use]
pub fn comparison_header() -> String {
    let mut columns = vec!["tick".to_string()];
    for mode in Mode::ALL {
        for field in STEP_FIELDS {
            columns.push(format!("{mode}_{field}"));
        }
    }
    columns.join(",")
}

fn step_columns(stats: &StepStats) -> String {
    format!(
        "{},{},{},{},{},{}",
        stats.delta_heat,
        stats.total_heat,
        stats.agent_count,
        stats.heat_diff,
        stats.heat_act,
        stats.energy_error
    )
}

#[must_use]
pub fn comparison_row(record: &ComparisonRecord) -> String {
    format!(
        "{},{},{},{}",
        record.tick,
        step_columns(&record.off),
        step_columns(&record.random),
        step_columns(&record.life)
    )
}

#[must_use]
pub fn sweep_row(r: &SweepResult) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{}",
        r.inflow,
        r.consumption,
        r.avg_off_delta,
        r.avg_life_delta,
        r.ratio,
        r.avg_life_heat_diff,
        r.avg_life_heat_act,
        r.avg_agents_life,
        r.avg_agents_random,
        r.error_min,
        r.error_max,
        r.status
    )
}

/// Writes a manual run: metadata, header, one row per tick.
pub fn write_comparison<W: Write>(
    w: &mut W,
    meta: &RunMetadata,
    records: &[ComparisonRecord],
) -> Result<()> {
    writeln!(w, "{}", meta.to_line()?)?;
    writeln!(w, "{}", comparison_header())?;
    for record in records {
        writeln!(w, "{}", comparison_row(record))?;
    }
    w.flush()?;
    Ok(())
}

/// Writes a sweep: metadata, header, one row per point.
pub fn write_sweep<W: Write>(w: &mut W, meta: &RunMetadata, results: &[SweepResult]) -> Result<()> {
    writeln!(w, "{}", meta.to_line()?)?;
    writeln!(w, "{SWEEP_HEADER}")?;
    for result in results {
        writeln!(w, "{}", sweep_row(result))?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_comparison_file<P: AsRef<Path>>(
    path: P,
    meta: &RunMetadata,
    records: &[ComparisonRecord],
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| IoError::from(e).with_context(format!("creating {}", path.display())))?;
    let mut w = BufWriter::new(file);
    write_comparison(&mut w, meta, records)?;
    tracing::info!(path = %path.display(), rows = records.len(), "Wrote run export");
    Ok(())
}

pub fn write_sweep_file<P: AsRef<Path>>(
    path: P,
    meta: &RunMetadata,
    results: &[SweepResult],
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| IoError::from(e).with_context(format!("creating {}", path.display())))?;
    let mut w = BufWriter::new(file);
    write_sweep(&mut w, meta, results)?;
    tracing::info!(path = %path.display(), rows = results.len(), "Wrote sweep export");
    Ok(())
}
