//! CLI integration tests
//!
//! These exercise flag parsing only; nothing here talks to a cluster.

use std::process::Command;

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "kubecap-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("--namespace"),
        "Should show namespace option"
    );
    assert!(
        stdout.contains("--all-namespaces"),
        "Should show all-namespaces option"
    );
    assert!(stdout.contains("--selector"), "Should show selector option");
    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
    assert!(
        stdout.contains("KUBECONFIG"),
        "Should show kubeconfig env var"
    );
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = Command::new("cargo")
        .args(["run", "-p", "kubecap-cli", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("kubecap"), "Should show binary name");
}

/// Test invalid format value error handling
#[test]
fn test_invalid_format() {
    let output = Command::new("cargo")
        .args(["run", "-p", "kubecap-cli", "--", "--format", "yaml"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Invalid format should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid") || stderr.contains("error"),
        "Should show error message"
    );
}

/// Test unknown flag error handling
#[test]
fn test_unknown_flag() {
    let output = Command::new("cargo")
        .args(["run", "-p", "kubecap-cli", "--", "--watch"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Unknown flag should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("unexpected"),
        "Should show error message"
    );
}
