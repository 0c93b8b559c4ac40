#![cfg(unix)]
#[path = "_support/mod.rs"]
mod support;

use kdbench::bench::{Workload, compute_execution_plan, measure_sequential, time_one_invocation};
use kdbench::config::{BenchConfig, ExecutionMode, FailurePolicy};
use kdbench::errors::BenchError;
use kdbench::{GeneratorConfig, generate, run_benchmark};
use std::fs;
use tempfile::tempdir;

#[test]
fn entry_for_n_is_about_n_times_single_cost() {
    let dir = tempdir().unwrap();
    let w = Workload::new(support::write_script(dir.path(), "sleep.sh", "sleep 0.05"));
    let plan = compute_execution_plan(4, 4.0).unwrap();
    assert_eq!(plan.counts(), &[1, 4]);
    let series = measure_sequential(&w, &plan, FailurePolicy::Record).unwrap();
    let secs = series.seconds();
    assert!(secs[0] >= 0.05);
    assert!(secs[1] >= 4.0 * 0.05);
    // generous ceiling for slow CI hosts
    assert!(secs[1] < 4.0 * 0.05 + 3.0);
}

#[test]
fn workload_side_effects_happen_once_per_call() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("calls.txt");
    let w = Workload::new(support::write_script(
        dir.path(),
        "count.sh",
        &format!("echo call >> '{}'", log.display()),
    ));
    for _ in 0..3 {
        time_one_invocation(&w).unwrap();
    }
    assert_eq!(fs::read_to_string(&log).unwrap().lines().count(), 3);
}

#[test]
fn full_run_writes_plot_and_csv() {
    let dir = tempdir().unwrap();
    let workload = support::write_script(dir.path(), "ok.sh", "exit 0");
    let plot = dir.path().join("out").join("scaling.svg");
    let cfg = BenchConfig {
        workload,
        maximum_executions: 10,
        jump_factor: 10.0,
        title: "KD-tree".into(),
        plot_path: Some(plot.clone()),
        results_csv: Some(dir.path().join("bench_{timestamp}.csv")),
        ..Default::default()
    };
    let report = run_benchmark(&cfg).unwrap();
    assert_eq!(report.executions(), vec![1, 10]);
    assert_eq!(report.total_failures(), 0);
    assert!(fs::read_to_string(&plot).unwrap().contains("KD-tree"));

    let csvs: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|x| x == "csv"))
        .collect();
    assert_eq!(csvs.len(), 1);
    let text = fs::read_to_string(&csvs[0]).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("executions,seconds,failures"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn failing_workload_is_recorded_or_aborts_by_policy() {
    let dir = tempdir().unwrap();
    let workload = support::write_script(dir.path(), "fail.sh", "exit 5");
    let mut cfg = BenchConfig { workload, maximum_executions: 2, jump_factor: 2.0, plot_path: None, ..Default::default() };
    let report = run_benchmark(&cfg).unwrap();
    assert_eq!(report.total_failures(), 3);

    cfg.failure_policy = FailurePolicy::Abort;
    assert!(matches!(run_benchmark(&cfg), Err(BenchError::WorkloadFailed { .. })));
}

#[test]
fn missing_workload_aborts_the_run() {
    let dir = tempdir().unwrap();
    let cfg = BenchConfig { workload: dir.path().join("absent"), plot_path: None, ..Default::default() };
    assert!(matches!(run_benchmark(&cfg), Err(BenchError::Spawn { .. })));
}

#[test]
fn invalid_jump_factor_is_rejected_before_running() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("calls.txt");
    let workload = support::write_script(dir.path(), "count.sh", &format!("echo call >> '{}'", log.display()));
    let cfg = BenchConfig { workload, jump_factor: 1.0, plot_path: None, ..Default::default() };
    assert!(matches!(run_benchmark(&cfg), Err(BenchError::InvalidConfig(_))));
    assert!(!log.exists());
}

#[test]
fn dataset_preflight_accepts_generated_file_and_rejects_ragged_one() {
    let dir = tempdir().unwrap();
    let workload = support::write_script(dir.path(), "ok.sh", "exit 0");
    let data = dir.path().join("input.txt");
    generate(&GeneratorConfig::new(&data, 5, 2)).unwrap();
    let mut cfg = BenchConfig {
        workload,
        maximum_executions: 1,
        plot_path: None,
        dataset: Some(data.clone()),
        ..Default::default()
    };
    assert!(run_benchmark(&cfg).is_ok());

    let ragged = dir.path().join("ragged.txt");
    fs::write(&ragged, "1\t2\n3\n").unwrap();
    cfg.dataset = Some(ragged);
    assert!(matches!(run_benchmark(&cfg), Err(BenchError::Dataset(_))));
}

#[test]
fn concurrent_mode_is_reported_as_batch_time() {
    let dir = tempdir().unwrap();
    let workload = support::write_script(dir.path(), "ok.sh", "exit 0");
    let cfg = BenchConfig {
        workload,
        maximum_executions: 8,
        jump_factor: 2.0,
        mode: ExecutionMode::Concurrent,
        max_parallel: 2,
        plot_path: None,
        ..Default::default()
    };
    let report = run_benchmark(&cfg).unwrap();
    assert_eq!(report.executions(), vec![1, 2, 4, 8]);
    assert!(report.render_table().contains("concurrent batch"));
}
