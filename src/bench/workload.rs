use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::Duration;

use crate::errors::BenchError;
use crate::timing::timed;

/// An external program whose repeated-invocation cost is being measured.
///
/// It is started with no arguments and its output is discarded.
#[derive(Debug, Clone)]
pub struct Workload {
    path: PathBuf,
}

impl Workload {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn command(&self) -> Command {
        let mut cmd = Command::new(&self.path);
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        cmd
    }
}

/// One timed run of a workload.
#[derive(Debug, Clone, Copy)]
pub struct Invocation {
    pub elapsed: Duration,
    pub status: ExitStatus,
}

impl Invocation {
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn succeeded(&self) -> bool {
        self.status.success()
    }
}

/// Run the workload once, blocking until it exits, and report the wall-clock time.
///
/// A non-zero exit is not an error here; callers decide what to do with `status`.
///
/// # Errors
/// Returns `BenchError::Spawn` if the program cannot be found or started.
pub fn time_one_invocation(workload: &Workload) -> Result<Invocation, BenchError> {
    let mut cmd = workload.command();
    let run = timed(|| cmd.status());
    match run.transpose() {
        Ok(t) => Ok(Invocation { elapsed: t.elapsed, status: t.outcome }),
        Err((source, _)) => Err(BenchError::Spawn { path: workload.path.clone(), source }),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&p, fs::Permissions::from_mode(0o755)).unwrap();
        p
    }

    #[test]
    fn successful_workload_is_timed() {
        let dir = tempfile::tempdir().unwrap();
        let w = Workload::new(script(dir.path(), "ok.sh", "echo noisy; echo louder >&2; exit 0"));
        let inv = time_one_invocation(&w).unwrap();
        assert!(inv.succeeded());
        assert!(inv.seconds() >= 0.0);
    }

    #[test]
    fn failing_workload_still_yields_a_duration() {
        let dir = tempfile::tempdir().unwrap();
        let w = Workload::new(script(dir.path(), "fail.sh", "exit 3"));
        let inv = time_one_invocation(&w).unwrap();
        assert!(!inv.succeeded());
        assert_eq!(inv.status.code(), Some(3));
    }

    #[test]
    fn missing_workload_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let w = Workload::new(dir.path().join("absent.sh"));
        assert!(matches!(time_one_invocation(&w), Err(BenchError::Spawn { .. })));
    }
}
