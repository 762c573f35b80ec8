use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_foxprep_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("foxprep")
}

/// Lay out an unpacked bundle so setup never reaches for the network
fn fixture_bundle(root: &std::path::Path) {
    let bundle = root.join("metamask-chrome-12.14.0");
    std::fs::create_dir_all(&bundle).unwrap();
    std::fs::write(bundle.join("manifest.json"), "{}").unwrap();
}

#[test]
fn test_setup_command_help() {
    let mut cmd = Command::new(get_foxprep_bin());
    cmd.arg("setup").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--channel"))
        .stdout(predicate::str::contains("--headless"))
        .stdout(predicate::str::contains("--password"))
        .stdout(predicate::str::contains("--metamask-version"))
        .stdout(predicate::str::contains("--network-file"))
        .stdout(predicate::str::contains("--exit-when-done"));
}

#[test]
fn test_setup_fails_fast_on_missing_browser() {
    let temp = tempfile::tempdir().unwrap();
    fixture_bundle(&temp.path().join("extension"));

    let mut cmd = Command::new(get_foxprep_bin());
    cmd.current_dir(temp.path())
        .arg("setup")
        .arg("--extension-dir")
        .arg("extension")
        .arg("--chrome-path")
        .arg("/nonexistent/chrome");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_setup_rejects_malformed_version() {
    let mut cmd = Command::new(get_foxprep_bin());
    cmd.arg("setup")
        .arg("--metamask-version")
        .arg("not-a-version");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid MetaMask version"));
}

#[test]
fn test_setup_rejects_unknown_channel() {
    let mut cmd = Command::new(get_foxprep_bin());
    cmd.arg("setup").arg("--channel").arg("firefox");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown channel"));
}

#[test]
fn test_setup_rejects_malformed_network_file() {
    // A bad network file must fail before any browser work starts
    let temp = tempfile::tempdir().unwrap();
    fixture_bundle(&temp.path().join("extension"));
    std::fs::write(temp.path().join("network.json"), "not json").unwrap();

    let mut cmd = Command::new(get_foxprep_bin());
    cmd.current_dir(temp.path())
        .arg("setup")
        .arg("--extension-dir")
        .arg("extension")
        .arg("--network-file")
        .arg("network.json")
        .arg("--chrome-path")
        .arg("/nonexistent/chrome");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid network definition"));
}
