//! Benchmark driver: Plan -> Measure -> Render.
mod measure;
mod plan;
mod plot;
mod report;
mod workload;

pub use measure::{AggregateSeries, EntryTiming, measure, measure_concurrent, measure_entry, measure_sequential};
pub use plan::{ExecutionPlan, compute_execution_plan};
pub use plot::{X_LABEL, Y_LABEL, render_scaling_plot};
pub use report::{BenchReport, ReportRow, TIMESTAMP_PLACEHOLDER, expand_timestamp};
pub use workload::{Invocation, Workload, time_one_invocation};

use crate::config::BenchConfig;
use crate::dataset::read_dataset;
use crate::errors::BenchError;

/// Run a complete benchmark described by `cfg`.
///
/// The plot and the CSV report are only written when their paths are configured.
///
/// # Errors
/// Invalid configuration, a malformed dataset, workload spawn failures, workload
/// failures under `FailurePolicy::Abort`, and output errors.
pub fn run_benchmark(cfg: &BenchConfig) -> Result<BenchReport, BenchError> {
    cfg.validate()?;
    let plan = compute_execution_plan(cfg.maximum_executions, cfg.jump_factor)?;
    log::info!(
        "plan: {:?} ({} invocations) for {}",
        plan.counts(),
        plan.total_invocations(),
        cfg.workload.display()
    );

    if let Some(ds) = &cfg.dataset {
        let shape = read_dataset(ds)?;
        log::info!("dataset: {} has {} rows x {} columns", ds.display(), shape.rows, shape.cols);
    }

    let workload = Workload::new(&cfg.workload);
    let started_at = chrono::Utc::now();
    let series = measure(&workload, &plan, cfg.mode, cfg.failure_policy, cfg.max_parallel)?;
    if !series.is_non_decreasing() {
        log::debug!("series is not monotonic: {:?}", series.seconds());
    }
    if series.failures() > 0 {
        log::warn!("{} invocations exited with a non-zero status", series.failures());
    }

    let report = BenchReport::new(&cfg.title, &cfg.workload, cfg.mode, started_at, &plan, &series)?;
    if let Some(out) = &cfg.plot_path {
        let title = match cfg.mode {
            crate::config::ExecutionMode::Sequential => cfg.title.clone(),
            mode => format!("{} ({})", cfg.title, mode.describe()),
        };
        render_scaling_plot(&title, &report.seconds(), &report.executions(), out)?;
    }
    if let Some(csv_path) = &cfg.results_csv {
        report.write_csv(csv_path)?;
    }
    Ok(report)
}
