use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::BenchError;

pub const DEFAULT_WORKLOAD: &str = "tests/during-dev.sh";
pub const DEFAULT_MAX_EXECUTIONS: u64 = 10;
pub const DEFAULT_JUMP_FACTOR: f64 = 10.0;
pub const DEFAULT_TITLE: &str = "KD-tree";
pub const DEFAULT_PLOT_PATH: &str = "kdbench-scaling.svg";
pub const CONFIG_FILE_NAME: &str = "kdbench.toml";

/// How the `n` invocations of one plan entry are run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Back-to-back; the entry is the sum of individual durations.
    #[default]
    Sequential,
    /// All at once (bounded by `max_parallel`); the entry is the batch wall-clock.
    Concurrent,
}

impl ExecutionMode {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Sequential => "cumulative time of sequential executions",
            Self::Concurrent => "wall-clock time of concurrent batch",
        }
    }
}

/// What to do when the workload exits with a non-zero status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Keep the duration, count the failure and log a warning.
    #[default]
    Record,
    /// Stop the run with `BenchError::WorkloadFailed`.
    Abort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub workload: PathBuf,
    pub maximum_executions: u64,
    pub jump_factor: f64,
    pub title: String,
    /// SVG output; `None` skips rendering.
    pub plot_path: Option<PathBuf>,
    /// CSV results; `{timestamp}` expands to the run's UTC start time.
    pub results_csv: Option<PathBuf>,
    pub mode: ExecutionMode,
    pub max_parallel: usize,
    pub failure_policy: FailurePolicy,
    /// Dataset the workload consumes; checked before measuring when set.
    pub dataset: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            workload: PathBuf::from(DEFAULT_WORKLOAD),
            maximum_executions: DEFAULT_MAX_EXECUTIONS,
            jump_factor: DEFAULT_JUMP_FACTOR,
            title: DEFAULT_TITLE.to_string(),
            plot_path: Some(PathBuf::from(DEFAULT_PLOT_PATH)),
            results_csv: None,
            mode: ExecutionMode::Sequential,
            max_parallel: std::thread::available_parallelism().map_or(4, usize::from),
            failure_policy: FailurePolicy::Record,
            dataset: None,
        }
    }
}

impl BenchConfig {
    /// # Errors
    /// Returns `BenchError::InvalidConfig` when the plan parameters or `max_parallel` are unusable.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.maximum_executions == 0 {
            return Err(BenchError::InvalidConfig("maximum_executions must be at least 1".into()));
        }
        if !self.jump_factor.is_finite() || self.jump_factor <= 1.0 {
            return Err(BenchError::InvalidConfig(format!(
                "jump_factor must be greater than 1, got {}",
                self.jump_factor
            )));
        }
        if self.max_parallel == 0 || self.max_parallel > tokio::sync::Semaphore::MAX_PERMITS {
            return Err(BenchError::InvalidConfig(format!(
                "max_parallel must be between 1 and {}, got {}",
                tokio::sync::Semaphore::MAX_PERMITS,
                self.max_parallel
            )));
        }
        if self.workload.as_os_str().is_empty() {
            return Err(BenchError::InvalidConfig("workload path is empty".into()));
        }
        Ok(())
    }

    /// Parse a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns `BenchError::Config` if the text is not valid for this structure.
    pub fn from_toml_str(s: &str) -> Result<Self, BenchError> {
        toml::from_str(s).map_err(|e| BenchError::Config(e.to_string()))
    }

    /// # Errors
    /// Returns `BenchError::Io` if the file cannot be read, `BenchError::Config` if it does not parse.
    pub fn from_file(path: &Path) -> Result<Self, BenchError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Overlay `KDBENCH_*` variables read through `lookup`.
    ///
    /// # Errors
    /// Returns `BenchError::Config` if a numeric variable does not parse.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), BenchError> {
        if let Some(s) = lookup("KDBENCH_WORKLOAD") {
            self.workload = PathBuf::from(s);
        }
        if let Some(s) = lookup("KDBENCH_MAX_EXECUTIONS") {
            self.maximum_executions = s
                .trim()
                .parse()
                .map_err(|_| BenchError::Config(format!("KDBENCH_MAX_EXECUTIONS: not an integer: {s}")))?;
        }
        if let Some(s) = lookup("KDBENCH_JUMP_FACTOR") {
            self.jump_factor = s
                .trim()
                .parse()
                .map_err(|_| BenchError::Config(format!("KDBENCH_JUMP_FACTOR: not a number: {s}")))?;
        }
        if let Some(s) = lookup("KDBENCH_TITLE") {
            self.title = s;
        }
        Ok(())
    }

    /// # Errors
    /// See [`BenchConfig::apply_env_with`].
    pub fn apply_env(&mut self) -> Result<(), BenchError> {
        self.apply_env_with(|k| std::env::var(k).ok())
    }
}

/// Candidate config files in precedence order: explicit path, `KDBENCH_CONFIG`, `./kdbench.toml`.
pub fn find_config_paths(cli_cfg: Option<&Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = cli_cfg {
        paths.push(p.to_path_buf());
    }
    if let Ok(p) = std::env::var("KDBENCH_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join(CONFIG_FILE_NAME));
    }
    paths
}

/// Load the layered configuration: defaults, then the first config file found, then environment.
/// Command-line overrides are applied by the caller on top of the result.
///
/// # Errors
/// An explicitly requested file that is missing or malformed is an error; discovered files
/// are only read if they exist.
pub fn load_config(cli_cfg: Option<&Path>) -> Result<BenchConfig, BenchError> {
    if let Some(p) = cli_cfg {
        if !p.exists() {
            return Err(BenchError::Config(format!("config file not found: {}", p.display())));
        }
    }
    let mut cfg = BenchConfig::default();
    if let Some(p) = find_config_paths(cli_cfg).into_iter().find(|p| p.exists()) {
        log::debug!("config: loading {}", p.display());
        cfg = BenchConfig::from_file(&p)?;
    }
    cfg.apply_env()?;
    Ok(cfg)
}
