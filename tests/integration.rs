//! Integration tests for chat-alerts.

mod cli;
mod common;
mod watcher;

#[test]
fn test_scan_command_help() {
    use std::process::Command;

    let output = Command::new(env!("CARGO_BIN_EXE_chat-alerts"))
        .args(["scan", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let combined = format!("{stdout}{stderr}");

    assert!(
        combined.contains("--channel"),
        "Help should mention --channel flag"
    );
    assert!(
        combined.contains("--pre-filter"),
        "Help should mention --pre-filter flag"
    );
}

#[test]
fn test_scan_command_highlights() {
    use std::process::Command;

    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("alerts.toml");
    std::fs::write(
        &config,
        r#"
        [[alerts]]
        name = "Raid call"
        pattern = "raid"
        channels = ["party"]
        "#,
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_chat-alerts"))
        .arg("--config")
        .arg(&config)
        .args(["scan", "--channel", "party", "--sender", "Alice", "raid now"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[ALERT]"));
    assert!(stdout.contains("Raid call"));
}
