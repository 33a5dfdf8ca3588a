use autoplanter_testkit::read_jsonl;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn scratch_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("autoplanter_{tag}_{nanos:x}"));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn repo_file(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(rel)
}

#[test]
fn scripted_walk_writes_event_log() {
    let dir = scratch_dir("walk");
    let log = dir.join("events.jsonl");

    let status = Command::new(env!("CARGO_BIN_EXE_autoplanter"))
        .args(["--config"])
        .arg(repo_file("config/autoplanter.toml"))
        .arg("--script")
        .arg(repo_file("scripts/meadow_walk.json"))
        .args(["--seed", "7", "--event-log"])
        .arg(&log)
        .env("RUST_LOG", "warn")
        .status()
        .expect("run autoplanter");
    assert!(status.success());

    let events = read_jsonl(&log).expect("event log");
    let flips: Vec<_> = events.iter().filter(|e| e.kind == "ToggleFlipped").collect();
    assert_eq!(flips.len(), 2);
    assert_eq!(flips[0].payload["enabled"], true);
    assert_eq!(flips[1].payload["enabled"], false);

    let planted: Vec<_> = events.iter().filter(|e| e.kind == "FlowerPlanted").collect();
    assert!(!planted.is_empty());
    // Nothing is planted after the second toggle.
    assert!(planted.iter().all(|e| e.tick < flips[1].tick));
    assert!(planted.iter().all(|e| e.payload["y"] == 64));
    assert!(planted.iter().all(|e| e.payload["flower"] == "poppy"));
}

#[test]
fn max_ticks_limits_run() {
    let dir = scratch_dir("max_ticks");
    let log = dir.join("events.jsonl");

    let status = Command::new(env!("CARGO_BIN_EXE_autoplanter"))
        .arg("--config")
        .arg(dir.join("missing.toml"))
        .args(["--max-ticks", "1", "--seed", "1", "--event-log"])
        .arg(&log)
        .env("RUST_LOG", "error")
        .status()
        .expect("run autoplanter");
    assert!(status.success());

    // The default walk only toggles on tick 0.
    let events = read_jsonl(&log).expect("event log");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, "ToggleFlipped");
}

#[test]
fn empty_script_fails() {
    let dir = scratch_dir("empty");
    let script = dir.join("empty.json");
    std::fs::write(&script, r#"{"steps": []}"#).expect("write script");

    let output = Command::new(env!("CARGO_BIN_EXE_autoplanter"))
        .arg("--script")
        .arg(&script)
        .env("RUST_LOG", "error")
        .output()
        .expect("run autoplanter");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no steps"));
}
