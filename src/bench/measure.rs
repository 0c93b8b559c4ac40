use std::io;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::plan::ExecutionPlan;
use super::workload::{Workload, time_one_invocation};
use crate::config::{ExecutionMode, FailurePolicy};
use crate::errors::BenchError;
use crate::logger::METRICS_TARGET;
use crate::timing::Stopwatch;

/// Measured cost of one plan entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryTiming {
    pub executions: u64,
    pub total: Duration,
    /// Invocations that exited with a non-zero status.
    pub failures: u64,
}

impl EntryTiming {
    pub fn seconds(&self) -> f64 {
        self.total.as_secs_f64()
    }
}

/// One entry per plan value, in plan order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateSeries(Vec<EntryTiming>);

impl AggregateSeries {
    pub fn entries(&self) -> &[EntryTiming] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn seconds(&self) -> Vec<f64> {
        self.0.iter().map(EntryTiming::seconds).collect()
    }

    pub fn failures(&self) -> u64 {
        self.0.iter().map(|e| e.failures).sum()
    }

    /// Not enforced; timing noise can make a later entry cheaper.
    pub fn is_non_decreasing(&self) -> bool {
        self.0.windows(2).all(|w| w[0].total <= w[1].total)
    }
}

fn check_status(workload: &Workload, status: ExitStatus, policy: FailurePolicy) -> Result<bool, BenchError> {
    if status.success() {
        return Ok(true);
    }
    match policy {
        FailurePolicy::Abort => {
            Err(BenchError::WorkloadFailed { path: workload.path().to_path_buf(), status })
        }
        FailurePolicy::Record => {
            log::warn!("workload {} exited with {status}; timing kept", workload.path().display());
            Ok(false)
        }
    }
}

fn log_entry(entry: &EntryTiming, mode: ExecutionMode) {
    log::info!(
        target: METRICS_TARGET,
        "executions={} seconds={:.6} failures={} mode={:?}",
        entry.executions,
        entry.seconds(),
        entry.failures,
        mode
    );
}

/// Invoke the workload `n` times back-to-back and sum the individual durations.
///
/// # Errors
/// Spawn failures, and non-zero exits under `FailurePolicy::Abort`.
pub fn measure_entry(workload: &Workload, n: u64, policy: FailurePolicy) -> Result<EntryTiming, BenchError> {
    let mut sw = Stopwatch::new();
    let mut failures = 0u64;
    for _ in 0..n {
        let inv = time_one_invocation(workload)?;
        sw.add(inv.elapsed);
        if !check_status(workload, inv.status, policy)? {
            failures += 1;
        }
    }
    Ok(EntryTiming { executions: sw.laps(), total: sw.total(), failures })
}

/// Sequential measurement of every plan entry.
///
/// # Errors
/// See [`measure_entry`].
pub fn measure_sequential(
    workload: &Workload,
    plan: &ExecutionPlan,
    policy: FailurePolicy,
) -> Result<AggregateSeries, BenchError> {
    let mut series = Vec::with_capacity(plan.len());
    for &n in plan.counts() {
        log::debug!("measure: {n} sequential executions of {}", workload.path().display());
        let entry = measure_entry(workload, n, policy)?;
        log_entry(&entry, ExecutionMode::Sequential);
        series.push(entry);
    }
    Ok(AggregateSeries(series))
}

async fn run_batch(path: std::path::PathBuf, n: u64, max_parallel: usize) -> Result<(Duration, Vec<ExitStatus>), BenchError> {
    let permits = Arc::new(Semaphore::new(max_parallel));
    let start = Instant::now();
    let mut set = JoinSet::new();
    for _ in 0..n {
        let permits = Arc::clone(&permits);
        let path = path.clone();
        set.spawn(async move {
            let _permit = permits.acquire_owned().await.map_err(io::Error::other)?;
            tokio::process::Command::new(&path)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await
        });
    }
    let mut statuses = Vec::new();
    let mut first_err: Option<io::Error> = None;
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Ok(status)) => statuses.push(status),
            Ok(Err(e)) => {
                first_err.get_or_insert(e);
            }
            Err(e) => {
                first_err.get_or_insert(io::Error::other(e));
            }
        }
    }
    let elapsed = start.elapsed();
    match first_err {
        Some(source) => Err(BenchError::Spawn { path, source }),
        None => Ok((elapsed, statuses)),
    }
}

/// Concurrent measurement: each entry runs its `n` invocations at once, at most
/// `max_parallel` in flight, and records the wall-clock time of the whole batch.
///
/// This is a different quantity from the sequential sum and is reported as such.
///
/// # Errors
/// Runtime construction and spawn failures, and non-zero exits under `FailurePolicy::Abort`.
pub fn measure_concurrent(
    workload: &Workload,
    plan: &ExecutionPlan,
    policy: FailurePolicy,
    max_parallel: usize,
) -> Result<AggregateSeries, BenchError> {
    let limit = max_parallel.clamp(1, Semaphore::MAX_PERMITS);
    let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    let mut series = Vec::with_capacity(plan.len());
    for &n in plan.counts() {
        log::debug!("measure: {n} concurrent executions (limit {max_parallel}) of {}", workload.path().display());
        let (elapsed, statuses) = rt.block_on(run_batch(workload.path().to_path_buf(), n, limit))?;
        let mut failures = 0u64;
        for status in statuses {
            if !check_status(workload, status, policy)? {
                failures += 1;
            }
        }
        let entry = EntryTiming { executions: n, total: elapsed, failures };
        log_entry(&entry, ExecutionMode::Concurrent);
        series.push(entry);
    }
    Ok(AggregateSeries(series))
}

/// Dispatch on the configured mode.
///
/// # Errors
/// See [`measure_sequential`] and [`measure_concurrent`].
pub fn measure(
    workload: &Workload,
    plan: &ExecutionPlan,
    mode: ExecutionMode,
    policy: FailurePolicy,
    max_parallel: usize,
) -> Result<AggregateSeries, BenchError> {
    match mode {
        ExecutionMode::Sequential => measure_sequential(workload, plan, policy),
        ExecutionMode::Concurrent => measure_concurrent(workload, plan, policy, max_parallel),
    }
}
