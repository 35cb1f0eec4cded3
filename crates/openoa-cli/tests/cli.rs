//! Runs the built binary against a closed port.

use std::net::TcpListener;
use std::process::{Command, Output};

fn dead_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn run(args: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("openoa.toml");
    Command::new(env!("CARGO_BIN_EXE_openoa-status"))
        .arg("--config")
        .arg(&config)
        .arg("--api-url")
        .arg(dead_origin())
        .args(args)
        .env_remove("OPENOA_API_URL")
        .output()
        .unwrap()
}

#[test]
fn list_prints_registry_in_order() {
    let output = run(&["list"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let health = stdout.find("/api/health").unwrap();
    let team = stdout.find("/api/team").unwrap();
    let contact = stdout.find("/api/contact").unwrap();
    assert!(health < team && team < contact);
    assert!(stdout.contains("[beacon]"));
}

#[test]
fn sweep_against_dead_backend_fails() {
    let output = run(&["sweep", "--expand", "health"]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Healthy: 0  Failed: 9"));
    assert!(stdout.contains("Backend is unreachable."));
    assert!(stdout.contains("Is it running on port 8000?"));
}

#[test]
fn sweep_json_reports_every_probe() {
    let output = run(&["sweep", "--json"]);
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["results"].as_array().unwrap().len(), 9);
    assert_eq!(report["summary"]["error_count"], 9);
    assert_eq!(report["results"][0]["id"], "health");
    assert_eq!(report["results"][0]["result"]["status"], "failure");
}

#[test]
fn unknown_ids_are_rejected() {
    let output = run(&["probe", "nope"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unknown probe: nope"));

    let output = run(&["sweep", "--expand", "nope"]);
    assert!(!output.status.success());
}
