mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn nsis_step(config: &Path) -> Command {
    common::fixture_dir();
    let mut cmd = Command::cargo_bin("nsis-step").unwrap();
    cmd.arg("--config").arg(config).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_installations_add_list_remove() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    nsis_step(&config)
        .args(["installations", "add", "--name", "v3", "--home", "/opt/nsis/makensis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added installation v3"));

    nsis_step(&config)
        .args(["installations", "add", "--name", "v3", "--home", "/other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Installation already exists: v3"));

    nsis_step(&config)
        .args(["installations", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"home\": \"/opt/nsis/makensis\""));

    nsis_step(&config)
        .args(["installations", "remove", "--name", "v3"])
        .assert()
        .success();

    nsis_step(&config)
        .args(["installations", "remove", "--name", "v3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No installation named v3"));
}

#[test]
fn test_add_rejects_empty_home() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    nsis_step(&config)
        .args(["installations", "add", "--name", "v3", "--home", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please set a path makensis.exe"));
}

#[test]
fn test_run_rejects_empty_script() {
    let dir = tempfile::tempdir().unwrap();

    nsis_step(&dir.path().join("config.toml"))
        .args(["run", "--script", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please set a script name"));
}

#[test]
fn test_run_with_missing_installation_home_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "[[installation]]\nname = \"v3\"\nhome = \"/does/not/exist/makensis\"\n",
    )
    .unwrap();

    nsis_step(&config)
        .args(["run", "--installation", "v3", "--script", "setup.nsi"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("/does/not/exist/makensis doesn't exist"));
}

#[cfg(unix)]
#[test]
fn test_run_invokes_configured_compiler() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "[[installation]]\nname = \"v3\"\nhome = \"${FIXTURES}/makensis\"\n\n[node]\nname = \"ci\"\nunix = true\n",
    )
    .unwrap();

    nsis_step(&config)
        .args([
            "run",
            "--installation",
            "v3",
            "--script",
            "${NAME}.nsi",
            "--args",
            "/V3",
            "--var",
            "NAME=setup",
        ])
        .arg("--env")
        .arg(format!("FIXTURES={}", common::fixture_dir().display()))
        .arg("--workdir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("arg:/V3"))
        .stdout(predicate::str::contains("arg:setup.nsi"));
}

#[cfg(unix)]
#[test]
fn test_run_propagates_compiler_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        format!(
            "[[installation]]\nname = \"v3\"\nhome = \"{}\"\n",
            common::fake_compiler().display()
        ),
    )
    .unwrap();

    nsis_step(&config)
        .args(["run", "--installation", "v3", "--script", "setup.nsi"])
        .args(["--env", "FAKE_EXIT=2"])
        .arg("--workdir")
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("arg:setup.nsi"));
}
