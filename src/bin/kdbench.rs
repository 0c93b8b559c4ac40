//! Benchmark an external workload and plot how its total runtime scales with the
//! number of back-to-back executions.
use clap::{Parser, ValueEnum};
use kdbench::config::{BenchConfig, ExecutionMode, FailurePolicy, load_config};
use kdbench::run_benchmark;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModeArg {
    Sequential,
    Concurrent,
}

impl From<ModeArg> for ExecutionMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Sequential => ExecutionMode::Sequential,
            ModeArg::Concurrent => ExecutionMode::Concurrent,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "kdbench", version, about = "Workload scaling benchmark", long_about = None)]
struct Cli {
    #[arg(long, help = "Path to a config file (TOML). If omitted, KDBENCH_CONFIG or ./kdbench.toml is used when present.")]
    config: Option<PathBuf>,
    #[arg(long, help = "Executable to benchmark (run with no arguments)")]
    workload: Option<PathBuf>,
    #[arg(long, help = "Largest number of executions in the plan")]
    max_executions: Option<u64>,
    #[arg(long, help = "Multiplicative step between plan entries (> 1)")]
    jump_factor: Option<f64>,
    #[arg(long, help = "Plot title")]
    title: Option<String>,
    #[arg(long, conflicts_with = "no_plot", help = "SVG output path")]
    plot: Option<PathBuf>,
    #[arg(long, help = "Skip rendering the plot")]
    no_plot: bool,
    #[arg(long, help = "Write results as CSV; {timestamp} expands to the run start time")]
    results_csv: Option<PathBuf>,
    #[arg(long, value_enum, help = "How the executions of one entry are run")]
    mode: Option<ModeArg>,
    #[arg(long, help = "Concurrent mode: maximum workloads in flight")]
    max_parallel: Option<usize>,
    #[arg(long, help = "Abort when the workload exits with a non-zero status")]
    fail_on_error: bool,
    #[arg(long, help = "Dataset the workload reads; validated before measuring")]
    dataset: Option<PathBuf>,
    #[arg(long, help = "Log directory (stderr when omitted)")]
    log_dir: Option<PathBuf>,
    #[arg(long, help = "Log level: error|warn|info|debug|trace")]
    log_level: Option<String>,
}

impl Cli {
    /// CLI values win over environment, config file and defaults.
    fn apply(self, cfg: &mut BenchConfig) {
        if let Some(w) = self.workload { cfg.workload = w; }
        if let Some(n) = self.max_executions { cfg.maximum_executions = n; }
        if let Some(j) = self.jump_factor { cfg.jump_factor = j; }
        if let Some(t) = self.title { cfg.title = t; }
        if let Some(p) = self.plot { cfg.plot_path = Some(p); }
        if self.no_plot { cfg.plot_path = None; }
        if let Some(p) = self.results_csv { cfg.results_csv = Some(p); }
        if let Some(m) = self.mode { cfg.mode = m.into(); }
        if let Some(n) = self.max_parallel { cfg.max_parallel = n; }
        if self.fail_on_error { cfg.failure_policy = FailurePolicy::Abort; }
        if let Some(d) = self.dataset { cfg.dataset = Some(d); }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = load_config(cli.config.as_deref())?;
    cli.apply(&mut cfg);
    let report = run_benchmark(&cfg)?;
    print!("{}", report.render_table());
    if let Some(p) = &cfg.plot_path {
        println!("plot: {}", p.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if cli.log_dir.is_some() || cli.log_level.is_some() {
        kdbench::logger::configure_logging(cli.log_dir.as_deref(), cli.log_level.as_deref(), None);
    } else {
        kdbench::init();
    }
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
