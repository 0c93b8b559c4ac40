use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::measure::AggregateSeries;
use super::plan::ExecutionPlan;
use crate::config::ExecutionMode;
use crate::errors::BenchError;

pub const TIMESTAMP_PLACEHOLDER: &str = "{timestamp}";

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub executions: u64,
    pub seconds: f64,
    pub failures: u64,
}

/// Outcome of one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub title: String,
    pub workload: PathBuf,
    pub mode: ExecutionMode,
    pub started_at: DateTime<Utc>,
    pub rows: Vec<ReportRow>,
}

impl BenchReport {
    /// # Errors
    /// Returns `BenchError::LengthMismatch` when the plan and series disagree.
    pub fn new(
        title: &str,
        workload: &Path,
        mode: ExecutionMode,
        started_at: DateTime<Utc>,
        plan: &ExecutionPlan,
        series: &AggregateSeries,
    ) -> Result<Self, BenchError> {
        if plan.len() != series.len() {
            return Err(BenchError::LengthMismatch { plan: plan.len(), series: series.len() });
        }
        let rows = series
            .entries()
            .iter()
            .map(|e| ReportRow { executions: e.executions, seconds: e.seconds(), failures: e.failures })
            .collect();
        Ok(Self { title: title.to_string(), workload: workload.to_path_buf(), mode, started_at, rows })
    }

    pub fn executions(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.executions).collect()
    }

    pub fn seconds(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.seconds).collect()
    }

    pub fn total_failures(&self) -> u64 {
        self.rows.iter().map(|r| r.failures).sum()
    }

    /// Human-readable summary table.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", self.title, self.mode.describe());
        let _ = writeln!(out, "workload: {}", self.workload.display());
        let _ = writeln!(out, "{:>12}  {:>14}  {:>8}", "executions", "seconds", "failures");
        for r in &self.rows {
            let _ = writeln!(out, "{:>12}  {:>14.6}  {:>8}", r.executions, r.seconds, r.failures);
        }
        out
    }

    /// Write `executions,seconds,failures` rows. Returns the path actually written.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn write_csv(&self, template: &Path) -> Result<PathBuf, BenchError> {
        let path = expand_timestamp(template, self.started_at);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut wtr = csv::Writer::from_path(&path)?;
        for r in &self.rows {
            wtr.serialize(r)?;
        }
        wtr.flush()?;
        log::info!("report: wrote {} rows to {}", self.rows.len(), path.display());
        Ok(path)
    }
}

/// Replace `{timestamp}` in a path with `%Y%m%d_%H%M%S` of `at`.
pub fn expand_timestamp(template: &Path, at: DateTime<Utc>) -> PathBuf {
    let raw = template.to_string_lossy();
    if raw.contains(TIMESTAMP_PLACEHOLDER) {
        PathBuf::from(raw.replace(TIMESTAMP_PLACEHOLDER, &at.format("%Y%m%d_%H%M%S").to_string()))
    } else {
        template.to_path_buf()
    }
}
