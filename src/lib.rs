//! Performance harness for a KD-tree workload: a synthetic dataset generator and a
//! driver that measures how a workload's total runtime scales with repeated invocation.
pub mod bench;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod logger;
pub mod timing;

pub use bench::{BenchReport, ExecutionPlan, compute_execution_plan, render_scaling_plot, run_benchmark, time_one_invocation};
pub use config::{BenchConfig, ExecutionMode, FailurePolicy, load_config};
pub use dataset::{GeneratorConfig, generate, read_dataset};
pub use errors::{BenchError, GenError};

/// Initializes logging from `KDBENCH_LOG_*` environment variables.
pub fn init() {
    logger::configure_from_env();
}
