use std::fs;
use std::process::Command;

use serde_json::Value;

fn sprob_sim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sprob-sim"))
}

#[test]
fn estimate_prints_json_report() {
    let output = sprob_sim()
        .args([
            "estimate",
            "--predicate",
            r#"{"kind":"interval","lo":0,"hi":500}"#,
            "--lo",
            "-1000",
            "--hi",
            "1000",
            "--samples",
            "100000",
            "--seed",
            "42",
        ])
        .output()
        .expect("run sprob-sim estimate");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    let p = value["report"]["probability"].as_f64().expect("probability");
    assert!((p - 501.0 / 2001.0).abs() < 0.01);
    assert_eq!(value["seed"].as_u64(), Some(42));
}

#[test]
fn estimate_rejects_missing_base() {
    let output = sprob_sim()
        .args([
            "estimate",
            "--predicate",
            r#"{"kind":"not"}"#,
            "--lo",
            "0",
            "--hi",
            "10",
            "--samples",
            "10",
        ])
        .output()
        .expect("run sprob-sim estimate");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing-base"), "{stderr}");
}

#[test]
fn run_writes_tier_files() {
    let dir = tempfile::tempdir().unwrap();
    let plan_path = dir.path().join("plan.yaml");
    fs::write(
        &plan_path,
        "bound: 10\nmax_power: 1\ntrials: 3\nstates:\n  - label: ordered\n    predicate: { kind: interval, lo: 0, hi: 5 }\n",
    )
    .unwrap();
    let out = dir.path().join("out");
    let status = sprob_sim()
        .args(["run", "--plan"])
        .arg(&plan_path)
        .arg("--out")
        .arg(&out)
        .status()
        .expect("run sprob-sim run");
    assert!(status.success());
    for name in ["0_ordered.out", "1_ordered.out", "summary.csv", "manifest.json"] {
        assert!(out.join(name).exists(), "missing {name}");
    }
    let lines = fs::read_to_string(out.join("1_ordered.out")).unwrap();
    assert_eq!(lines.lines().count(), 3);
}
