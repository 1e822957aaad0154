//! Logging setup of the `articles` binary.

use std::process::Command;

#[test]
fn unwritable_log_file_falls_back_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("missing").join("client.log");
    let session_path = dir.path().join("session.json");
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!("[session]\npath = {:?}\n", session_path.display().to_string()),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_articles"))
        .arg("--config")
        .arg(&config_path)
        .arg("status")
        .env("ARTICLES_CLIENT_LOG", &log_path)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Not logged in");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to create log file"),
        "stderr: {stderr}"
    );
}
