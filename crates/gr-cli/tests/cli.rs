//! CLI command integration tests.
//! Each test runs inside its own temp directory with GR_CONFIG cleared, so
//! no stray gesture.toml or environment leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TAP_AND_SWIPE: &str = r#"# tap on the canvas, then a fast swipe left
{"id": 1, "x": 10, "y": 20, "t": 0, "phase": "down", "target": "canvas"}
{"id": 1, "x": 10, "y": 20, "t": 40, "phase": "up"}
{"id": 2, "x": 200, "y": 100, "t": 1000, "phase": "down"}
{"id": 2, "x": 120, "y": 100, "t": 1040, "phase": "move"}
{"id": 2, "x": 120, "y": 100, "t": 1040, "phase": "up"}
"#;

fn gr_cmd(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("gr").unwrap();
    cmd.current_dir(dir.path()).env_remove("GR_CONFIG");
    cmd
}

fn write_trace(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("trace.jsonl");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn replay_prints_gestures() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, TAP_AND_SWIPE);
    gr_cmd(&dir)
        .arg("replay")
        .arg(&trace)
        .assert()
        .success()
        .stdout(predicate::str::contains("40.0ms  tap (10.0, 20.0)  @canvas"))
        .stdout(predicate::str::contains("pan dx=-80.0 dy=0.0"))
        .stdout(predicate::str::contains("swipe left distance=80.0 velocity=2.000"));
}

#[test]
fn replay_json_lines() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, TAP_AND_SWIPE);
    let output = gr_cmd(&dir)
        .args(["replay", "--json"])
        .arg(&trace)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3, "{stdout}");
    assert_eq!(lines[0]["event"]["type"], "tap");
    assert_eq!(lines[0]["target"], "canvas");
    assert_eq!(lines[0]["timeMs"], 40.0);
    assert_eq!(lines[1]["event"]["type"], "pan");
    assert_eq!(lines[2]["event"]["type"], "swipe");
    assert_eq!(lines[2]["event"]["direction"], "left");
}

#[test]
fn replay_summary_counts() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, TAP_AND_SWIPE);
    gr_cmd(&dir)
        .args(["replay", "--summary"])
        .arg(&trace)
        .assert()
        .success()
        .stdout(predicate::str::contains("samples:     5"))
        .stdout(predicate::str::contains("gestures:    3"))
        .stdout(predicate::str::contains("tap:         1"))
        .stdout(predicate::str::contains("pinch:       0"));
}

#[test]
fn replay_empty_trace() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, "# nothing here\n");
    gr_cmd(&dir)
        .arg("replay")
        .arg(&trace)
        .assert()
        .success()
        .stdout(predicate::str::contains("(no gestures recognized)"));
}

#[test]
fn replay_bad_line_fails_with_line_number() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(
        &dir,
        "{\"id\":1,\"x\":0,\"y\":0,\"t\":0,\"phase\":\"down\"}\n{\"id\":1,\"phase\":\"hover\"}\n",
    );
    gr_cmd(&dir)
        .arg("replay")
        .arg(&trace)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn replay_missing_trace_fails() {
    let dir = TempDir::new().unwrap();
    gr_cmd(&dir)
        .args(["replay", "nope.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}

#[test]
fn config_prints_defaults() {
    let dir = TempDir::new().unwrap();
    gr_cmd(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("# source: built-in defaults"))
        .stdout(predicate::str::contains("[thresholds]"))
        .stdout(predicate::str::contains("tap_threshold = 10.0"))
        .stdout(predicate::str::contains("long_press_threshold = 500.0"));
}

#[test]
fn config_picks_up_local_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("gesture.toml"),
        "[thresholds]\nswipe_velocity = 0.75\n",
    )
    .unwrap();
    gr_cmd(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("gesture.toml"))
        .stdout(predicate::str::contains("swipe_velocity = 0.75"));
}

#[test]
fn config_flag_beats_env() {
    let dir = TempDir::new().unwrap();
    let flag = dir.path().join("flag.toml");
    let env = dir.path().join("env.toml");
    std::fs::write(&flag, "[thresholds]\ntap_threshold = 4.0\n").unwrap();
    std::fs::write(&env, "[thresholds]\ntap_threshold = 6.0\n").unwrap();
    gr_cmd(&dir)
        .env("GR_CONFIG", &env)
        .arg("config")
        .arg("--config")
        .arg(&flag)
        .assert()
        .success()
        .stdout(predicate::str::contains("tap_threshold = 4.0"));
}

#[test]
fn replay_honors_config_override() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, TAP_AND_SWIPE);
    let config = dir.path().join("strict.toml");
    // 80px in 40ms is 2 px/ms; demand more than that
    std::fs::write(&config, "[thresholds]\nswipe_velocity = 5.0\n").unwrap();
    gr_cmd(&dir)
        .args(["replay", "--summary", "--config"])
        .arg(&config)
        .arg(&trace)
        .assert()
        .success()
        .stdout(predicate::str::contains("swipe:       0"));
}

#[test]
fn invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[thresholds]\npinch_threshold = -0.5\n").unwrap();
    gr_cmd(&dir)
        .args(["config", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pinch_threshold"));
}
