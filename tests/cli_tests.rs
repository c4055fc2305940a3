use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes a synthetic recording and returns its path.
    fn simulate(&self, name: &str, gesture: &str, frames: usize) -> PathBuf {
        let out = self.path(name);
        let output = run(&[
            "simulate",
            "--gesture",
            gesture,
            "--frames",
            &frames.to_string(),
            "--fps",
            "10",
            "--seed",
            "11",
            "--out",
            out.to_str().unwrap(),
        ]);
        assert!(output.status.success(), "simulate failed: {:?}", output);
        out
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gestureforge"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn confirmed_count(text: &str) -> usize {
    let re = Regex::new(r"Confirmed gestures: (\d+)").unwrap();
    re.captures(text)
        .and_then(|c| c[1].parse().ok())
        .expect("missing confirmed gesture count")
}

fn p(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_simulate_writes_json_lines() {
    let ctx = TestContext::new();
    let rec = ctx.simulate("wave.jsonl", "hand_raise", 12);

    let content = fs::read_to_string(&rec).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 12);
    assert!(lines[0].starts_with(r#"{"t":0,"hand":{"#));
    assert!(lines[11].starts_with(r#"{"t":1100,"#));
}

#[test]
fn test_replay_confirms_held_gesture() {
    let ctx = TestContext::new();
    let rec = ctx.simulate("point.jsonl", "point_right", 40);

    let output = run(&["replay", p(&rec)]);
    assert!(output.status.success());
    let text = stdout(&output);

    assert_eq!(confirmed_count(&text), 1, "{}", text);
    let row = Regex::new(r"\|\s*1\s*\|\s*point_right\s*\|\s*0\.95\s*\|\s*2900\s*\|").unwrap();
    assert!(row.is_match(&text), "{}", text);
}

#[test]
fn test_replay_respects_hold_threshold_flag() {
    let ctx = TestContext::new();
    let rec = ctx.simulate("short.jsonl", "stop", 40);

    let output = run(&["replay", "--hold-threshold", "50", p(&rec)]);
    assert!(output.status.success());
    assert_eq!(confirmed_count(&stdout(&output)), 0);
}

#[test]
fn test_cli_flag_beats_config_file() {
    let ctx = TestContext::new();
    let rec = ctx.simulate("thumbs.jsonl", "thumbs_up", 40);
    let cfg = ctx.path("engine.json");
    fs::write(&cfg, r#"{ "holdThreshold": 50, "cooldownMs": 0 }"#).unwrap();

    let from_file = run(&["--config", p(&cfg), "replay", p(&rec)]);
    assert!(from_file.status.success());
    assert_eq!(confirmed_count(&stdout(&from_file)), 0);

    // 40 frames at hold 10 with no cooldown: four confirmations.
    let overridden = run(&["replay", "--config", p(&cfg), "--hold-threshold", "10", p(&rec)]);
    assert!(overridden.status.success());
    assert_eq!(confirmed_count(&stdout(&overridden)), 4);
}

#[test]
fn test_replay_multiple_files_and_csv() {
    let ctx = TestContext::new();
    let a = ctx.simulate("a.jsonl", "point_left", 30);
    let b = ctx.simulate("b.jsonl", "none", 30);
    let csv = ctx.path("events.csv");

    let output = run(&["replay", p(&a), p(&b), "--events-csv", p(&csv)]);
    assert!(output.status.success());
    assert_eq!(confirmed_count(&stdout(&output)), 1);

    let written = fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "label,confidence,firedAt");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("point_left,"));
}

#[test]
fn test_classify_summary() {
    let ctx = TestContext::new();
    let rec = ctx.simulate("stop.jsonl", "stop", 25);

    let output = run(&["classify", p(&rec), "--frames"]);
    assert!(output.status.success());
    let text = stdout(&output);

    let row = Regex::new(r"\|\s*stop\s*\|\s*25\s*\|\s*100\.0%\s*\|").unwrap();
    assert!(row.is_match(&text), "{}", text);
    assert!(text.contains("Frames: 25"));
}

#[test]
fn test_low_confidence_classifies_as_none() {
    let ctx = TestContext::new();
    let out = ctx.path("dim.jsonl");
    let status = run(&[
        "simulate",
        "--gesture",
        "stop",
        "--frames",
        "5",
        "--confidence",
        "0.5",
        "--out",
        p(&out),
    ]);
    assert!(status.status.success());

    let text = stdout(&run(&["classify", p(&out)]));
    let row = Regex::new(r"\|\s*none\s*\|\s*5\s*\|").unwrap();
    assert!(row.is_match(&text), "{}", text);
}

#[test]
fn test_unknown_gesture_fails() {
    let ctx = TestContext::new();
    let out = ctx.path("bad.jsonl");
    let output = run(&["simulate", "--gesture", "wave", "--out", p(&out)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
}

#[test]
fn test_missing_recording_fails() {
    let output = run(&["replay", "/no/such/recording.jsonl"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("IO Error"), "{}", stderr);
}

#[test]
fn test_invalid_config_fails() {
    let ctx = TestContext::new();
    let rec = ctx.simulate("x.jsonl", "stop", 3);
    let output = run(&["replay", "--hold-threshold", "0", p(&rec)]);
    assert_eq!(output.status.code(), Some(1));
}
