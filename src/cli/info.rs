use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;

use optoechem::align::{cycle_label, CombinedSeries};
use optoechem::metadata::{sidecar_path, RunMetadata};
use optoechem::series::timestamp::format_timestamp;

/// Summary of a combined table
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub rows: usize,
    pub first: Option<String>,
    pub last: Option<String>,
    pub duration_h: f64,
    pub cycles: Vec<String>,
    pub derivative_defined: usize,
}

impl TableSummary {
    pub fn of(series: &CombinedSeries) -> Self {
        let records = series.records();
        Self {
            rows: series.len(),
            first: records.first().map(|r| format_timestamp(&r.timestamp)),
            last: records.last().map(|r| format_timestamp(&r.timestamp)),
            duration_h: series.duration_h().unwrap_or(0.0),
            cycles: series.cycles().into_iter().map(cycle_label).collect(),
            derivative_defined: series
                .derivative()
                .map(|d| d.iter().flatten().filter(|v| v.is_finite()).count())
                .unwrap_or(0),
        }
    }
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows: {}", self.rows)?;
        if let (Some(first), Some(last)) = (&self.first, &self.last) {
            writeln!(f, "Time span: {} .. {}", first, last)?;
        }
        writeln!(f, "Duration: {:.3} h", self.duration_h)?;
        writeln!(f, "Cycles: {}", self.cycles.join(", "))?;
        writeln!(
            f,
            "Brightness derivative: {} of {} rows defined",
            self.derivative_defined, self.rows
        )
    }
}

/// Display information about a combined table
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let series = CombinedSeries::from_csv_file(&file)
        .with_context(|| format!("Failed to read combined table: {}", file.display()))?;

    println!("Combined Table Information");
    println!("==========================");
    println!("File: {}", file.display());
    println!();
    print!("{}", TableSummary::of(&series));

    let sidecar = sidecar_path(&file);
    if sidecar.is_file() {
        let json = std::fs::read_to_string(&sidecar)
            .with_context(|| format!("Failed to read {}", sidecar.display()))?;
        let metadata = RunMetadata::from_json(&json).context("Failed to parse run metadata")?;

        println!();
        println!("Run Metadata:");
        println!("  Run ID: {}", metadata.run_id);
        println!("  Created: {}", metadata.created_at.to_rfc3339());
        println!("  Software: {} {}", metadata.software, metadata.version);
        println!("  Electrical input: {}", metadata.inputs.electrical);
        println!("  Optical input: {}", metadata.inputs.optical);
        let degraded = metadata.stats.degraded_channels();
        if !degraded.is_empty() {
            let names: Vec<String> = degraded.iter().map(|c| c.to_string()).collect();
            println!("  Smoothing not applied: {}", names.join(", "));
        }
        println!(
            "  Skipped frames: {} ({} coverage gaps)",
            metadata.stats.skipped(),
            metadata.stats.coverage_gaps
        );
    }

    Ok(())
}
