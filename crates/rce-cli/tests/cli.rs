//! CLI command integration tests.
//! Each test writes its inputs into a temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rce_cmd() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("rce").unwrap();
    cmd.env_remove("RCE_CONFIG")
        .env_remove("RCE_MAX_NODE_LIFETIME_MS")
        .env_remove("RCE_EDGE_FADE_WINDOW_MS")
        .env_remove("RCE_RESONANCE_LINK_THRESHOLD")
        .env_remove("RCE_RANDOM_LINK_PROBABILITY");
    cmd
}

fn write_script(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

const SCENARIO: &str = r#"{"at": 0, "glint": {"id": "A", "glyph": "*", "resonance_kind": "presence"}}
{"at": 1000, "glint": {"id": "B", "glyph": "+", "resonance_kind": "presence"}}
{"tick": 1000}
{"at": 30000, "glint": {"id": "C", "resonance_kind": "absence"}}
{"tick": 59999}
{"tick": 60000}
"#;

#[test]
fn config_prints_defaults() {
    rce_cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("max_node_lifetime_ms = 60000"))
        .stdout(predicate::str::contains("edge_fade_window_ms = 30000"))
        .stdout(predicate::str::contains("random_link_probability = 0.1"));
}

#[test]
fn config_file_and_env_layers() {
    let dir = TempDir::new().unwrap();
    let cfg = write_script(&dir, "rce.toml", "max_node_lifetime_ms = 5000\nedge_fade_window_ms = 2000\n");

    rce_cmd()
        .args(["config", "--config"])
        .arg(&cfg)
        .env("RCE_EDGE_FADE_WINDOW_MS", "1234")
        .assert()
        .success()
        .stdout(predicate::str::contains("max_node_lifetime_ms = 5000"))
        .stdout(predicate::str::contains("edge_fade_window_ms = 1234"));
}

#[test]
fn config_from_env_path() {
    let dir = TempDir::new().unwrap();
    let cfg = write_script(&dir, "rce.toml", "resonance_link_threshold = 0.25\n");

    rce_cmd()
        .arg("config")
        .env("RCE_CONFIG", &cfg)
        .assert()
        .success()
        .stdout(predicate::str::contains("resonance_link_threshold = 0.25"));
}

#[test]
fn invalid_config_fails() {
    rce_cmd()
        .arg("config")
        .env("RCE_RANDOM_LINK_PROBABILITY", "2.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("random_link_probability"));
}

#[test]
fn unparseable_env_override_fails() {
    rce_cmd()
        .arg("config")
        .env("RCE_MAX_NODE_LIFETIME_MS", "forever")
        .assert()
        .failure()
        .stderr(predicate::str::contains("RCE_MAX_NODE_LIFETIME_MS"));
}

#[test]
fn replay_summary_tracks_eviction() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "scenario.jsonl", SCENARIO);

    rce_cmd()
        .args(["replay", "--summary", "--seed", "1"])
        .arg(&script)
        .env("RCE_RANDOM_LINK_PROBABILITY", "0")
        .assert()
        .success()
        .stdout(predicate::str::contains("tick=1000 nodes=2 edges=1"))
        .stdout(predicate::str::contains("tick=59999 nodes=3 edges=1"))
        .stdout(predicate::str::contains("tick=60000 nodes=2 edges=0"))
        .stderr(predicate::str::contains("done. ingested=3 rejected=0 ticks=3"));
}

#[test]
fn replay_emits_snapshot_json() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "scenario.jsonl", SCENARIO);

    let output = rce_cmd()
        .args(["replay", "--seed", "1"])
        .arg(&script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let snapshots: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(snapshots.len(), 3);

    let first = &snapshots[0];
    assert_eq!(first["at"], 1000);
    assert_eq!(first["nodes"][0]["id"], "A");
    assert_eq!(first["nodes"][0]["glyph"], "*");

    let last = &snapshots[2];
    let ids: Vec<&str> = last["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert!(!ids.contains(&"A"), "A should be evicted at 60s: {ids:?}");
    for edge in last["edges"].as_array().unwrap() {
        assert_ne!(edge["a"], "A");
        assert_ne!(edge["b"], "A");
    }
}

#[test]
fn replay_counts_rejected_lines() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "bad.jsonl",
        "{\"at\": 0, \"glint\": {\"resonance_kind\": \"nonexistent\"}}\n{{{\n{\"tick\": 5}\n",
    );

    rce_cmd()
        .args(["replay", "--summary"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("tick=5 nodes=0 edges=0"))
        .stderr(predicate::str::contains("rejected=2"));
}

#[test]
fn replay_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    rce_cmd()
        .args(["replay"])
        .arg(dir.path().join("nope.jsonl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}

#[test]
fn run_ingests_stdin_until_eof() {
    let output = rce_cmd()
        .args(["run", "--interval-ms", "60000", "--seed", "3"])
        .write_stdin("{\"id\": \"live-1\", \"resonance_kind\": \"hover\"}\nnot json\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let last: serde_json::Value = serde_json::from_str(stdout.lines().last().unwrap()).unwrap();
    assert_eq!(last["nodes"].as_array().unwrap().len(), 1);
    assert_eq!(last["nodes"][0]["id"], "live-1");
}

#[test]
fn run_rejects_zero_interval() {
    rce_cmd()
        .args(["run", "--interval-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval"));
}
