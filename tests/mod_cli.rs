use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[path = "_support/mod.rs"]
mod support;

#[test]
fn generator_writes_into_parent_of_working_directory() {
    let dir = tempdir().unwrap();
    let work = dir.path().join("scripts");
    fs::create_dir_all(&work).unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_kdtree-gen"))
        .current_dir(&work)
        .args(["input.txt", "12", "3"])
        .status()
        .expect("run kdtree-gen");
    assert!(status.success());
    let rows = support::read_rows(&dir.path().join("input.txt"));
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|r| r.len() == 3));
}

#[test]
fn generator_defaults_to_ten_by_two() {
    let dir = tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_kdtree-gen"))
        .arg("--out-dir")
        .arg(dir.path())
        .status()
        .expect("run kdtree-gen");
    assert!(status.success());
    let rows = support::read_rows(&dir.path().join(kdbench::dataset::DEFAULT_FILENAME));
    assert_eq!(rows.len(), 10);
    assert!(rows.iter().all(|r| r.len() == 2));
}

#[test]
fn generator_seed_and_base_flags() {
    let dir = tempdir().unwrap();
    for name in ["a.txt", "b.txt"] {
        let status = Command::new(env!("CARGO_BIN_EXE_kdtree-gen"))
            .arg("--out-dir")
            .arg(dir.path())
            .args([name, "5", "2", "--seed", "3", "--base", "-10"])
            .status()
            .expect("run kdtree-gen");
        assert!(status.success());
    }
    let a = fs::read(dir.path().join("a.txt")).unwrap();
    assert_eq!(a, fs::read(dir.path().join("b.txt")).unwrap());
    for row in support::read_rows(&dir.path().join("a.txt")) {
        for f in row {
            let v: f64 = f.parse().unwrap();
            assert!((-10.0..-5.0).contains(&v));
        }
    }
}

#[test]
fn generator_rejects_non_integer_counts() {
    let dir = tempdir().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_kdtree-gen"))
        .arg("--out-dir")
        .arg(dir.path())
        .args(["x.txt", "ten", "2"])
        .output()
        .expect("run kdtree-gen");
    assert!(!out.status.success());
    assert!(!dir.path().join("x.txt").exists());
}

#[test]
fn generator_fails_for_missing_directory() {
    let dir = tempdir().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_kdtree-gen"))
        .arg("--out-dir")
        .arg(dir.path().join("missing"))
        .output()
        .expect("run kdtree-gen");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error:"));
}

#[cfg(unix)]
#[test]
fn driver_prints_summary_table() {
    let dir = tempdir().unwrap();
    let workload = support::write_script(dir.path(), "ok.sh", "exit 0");
    let out = Command::new(env!("CARGO_BIN_EXE_kdbench"))
        .current_dir(dir.path())
        .arg("--workload")
        .arg(&workload)
        .args(["--max-executions", "4", "--jump-factor", "2", "--no-plot", "--log-level", "error"])
        .output()
        .expect("run kdbench");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("executions"));
    assert!(stdout.contains("KD-tree"));
}

#[cfg(unix)]
#[test]
fn driver_reads_config_file() {
    let dir = tempdir().unwrap();
    let workload = support::write_script(dir.path(), "ok.sh", "exit 0");
    let cfg = dir.path().join("bench.toml");
    fs::write(
        &cfg,
        format!(
            "workload = '{}'\nmaximum_executions = 3\njump_factor = 3.0\ntitle = 'from-file'\nplot_path = 'plot.svg'\n",
            workload.display()
        ),
    )
    .unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_kdbench"))
        .current_dir(dir.path())
        .arg("--config")
        .arg(&cfg)
        .args(["--log-level", "error"])
        .output()
        .expect("run kdbench");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("from-file"));
    assert!(dir.path().join("plot.svg").exists());
}

#[test]
fn driver_exits_non_zero_for_missing_workload() {
    let dir = tempdir().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_kdbench"))
        .current_dir(dir.path())
        .arg("--workload")
        .arg(dir.path().join("nope"))
        .args(["--no-plot", "--log-level", "error"])
        .output()
        .expect("run kdbench");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error:"));
}
