//! Integration tests for `gr listen`.
//! Verifies streaming output, real-time long presses and clean exit on EOF.

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tempfile::TempDir;

fn gr_binary() -> std::path::PathBuf {
    assert_cmd::cargo::cargo_bin!("gr").into()
}

fn spawn_listen(dir: &TempDir) -> std::process::Child {
    Command::new(gr_binary())
        .arg("listen")
        .current_dir(dir.path())
        .env_remove("GR_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn gr listen")
}

fn send(stdin: &mut impl Write, line: &str) {
    writeln!(stdin, "{line}").unwrap();
    stdin.flush().unwrap();
}

/// Closing stdin with nothing sent exits cleanly (code 0).
#[test]
fn listen_exits_on_immediate_eof() {
    let dir = TempDir::new().unwrap();
    let mut child = spawn_listen(&dir);
    drop(child.stdin.take());

    let start = Instant::now();
    let output = child.wait_with_output().expect("wait");
    assert!(
        output.status.success(),
        "gr listen should exit 0 on stdin EOF, got {}",
        output.status
    );
    assert!(output.stdout.is_empty());
    assert!(start.elapsed() < Duration::from_secs(2));
}

/// Gestures stream out as JSON lines, and EOF ends the session.
#[test]
fn listen_streams_tap() {
    let dir = TempDir::new().unwrap();
    let mut child = spawn_listen(&dir);
    {
        let stdin = child.stdin.as_mut().expect("stdin pipe");
        send(stdin, r#"{"id":1,"x":5,"y":6,"t":0,"phase":"down","target":"button"}"#);
        send(stdin, r#"{"id":1,"x":5,"y":6,"t":30,"phase":"up"}"#);
    }
    drop(child.stdin.take());

    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success(), "got {}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let gestures: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(gestures.len(), 1, "{stdout}");
    assert_eq!(gestures[0]["event"]["type"], "tap");
    assert_eq!(gestures[0]["target"], "button");
}

/// A held contact long-presses on the wall clock, before any further sample
/// or EOF arrives.
#[test]
fn listen_long_press_fires_in_real_time() {
    let dir = TempDir::new().unwrap();
    let mut child = spawn_listen(&dir);
    let mut stdin = child.stdin.take().expect("stdin pipe");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout pipe"));

    let start = Instant::now();
    send(&mut stdin, r#"{"id":3,"x":40,"y":50,"t":10000,"phase":"down"}"#);

    let mut line = String::new();
    stdout.read_line(&mut line).unwrap();
    let elapsed = start.elapsed();

    let gesture: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
    assert_eq!(gesture["event"]["type"], "long_press");
    assert_eq!(gesture["event"]["x"], 40.0);
    assert_eq!(gesture["timeMs"], 10_500.0);
    assert!(elapsed >= Duration::from_millis(450), "fired after {elapsed:?}");
    assert!(elapsed < Duration::from_secs(5), "fired after {elapsed:?}");

    drop(stdin);
    let status = child.wait().expect("wait");
    assert!(status.success(), "got {status}");
}
