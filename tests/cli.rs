//! CLI tests for apt-venv.
//!
//! Every test runs the binary with its own HOME, XDG directories and
//! configuration file, so nothing outside the temp directory is touched.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFIG: &str = r#"{
  "distributions": {
    "ubuntu": {
      "releases": ["bionic", "focal"],
      "sourceslist": "deb http://archive.ubuntu.com/ubuntu %(release)s main universe\n"
    },
    "debian": {
      "releases": ["bookworm"],
      "sourceslist": "deb http://deb.debian.org/debian %(release)s main\n"
    }
  }
}"#;

struct TestEnv {
    temp: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("apt-venv.conf"), CONFIG).unwrap();
        fs::create_dir_all(temp.path().join("home")).unwrap();
        Self { temp }
    }

    fn cmd(&self) -> Command {
        let root = self.temp.path();
        let mut cmd = Command::cargo_bin("apt-venv").unwrap();
        cmd.env_remove("RUST_LOG")
            .env_remove("APT_VENV_CONFIG")
            .env("HOME", root.join("home"))
            .env("XDG_CONFIG_HOME", root.join("xdg-config"))
            .env("XDG_CACHE_HOME", root.join("xdg-cache"))
            .env("XDG_DATA_HOME", root.join("xdg-data"))
            .arg("--config")
            .arg(root.join("apt-venv.conf"));
        cmd
    }

    fn config_path(&self, release: &str) -> PathBuf {
        self.temp.path().join("xdg-config/apt-venv").join(release)
    }

    fn cache_path(&self, release: &str) -> PathBuf {
        self.temp.path().join("xdg-cache/apt-venv").join(release)
    }

    fn data_path(&self, release: &str) -> PathBuf {
        self.temp.path().join("xdg-data/apt-venv").join(release)
    }
}

#[test]
fn help_lists_commands() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn create_builds_layout() {
    let env = TestEnv::new();

    env.cmd()
        .args(["create", "bionic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created bionic (ubuntu)"));

    let config = env.config_path("bionic");
    assert!(config.join("bash.rc").is_file());
    assert!(config.join("apt.conf").is_file());
    assert_eq!(
        fs::read_to_string(config.join("sources.list")).unwrap(),
        "deb http://archive.ubuntu.com/ubuntu bionic main universe\n"
    );
    assert!(env.cache_path("bionic").is_dir());

    let data = env.data_path("bionic");
    assert!(data.join("var/lib/apt/lists/partial").is_dir());
    assert!(data.join("var/cache/apt/archives/partial").is_dir());
    assert!(data.join("var/lib/dpkg/status").is_file());
    assert!(data.join("bin/__apt-venv_fake_su").is_file());
    assert!(data.join("bin/sudo").is_symlink());
    assert!(data.join("etc/apt/sources.list").is_symlink());
}

#[test]
fn create_twice_succeeds() {
    let env = TestEnv::new();
    env.cmd().args(["create", "focal"]).assert().success();
    env.cmd().args(["create", "focal"]).assert().success();
    env.cmd().args(["exists", "focal"]).assert().success();
}

#[test]
fn unknown_release_lists_choices() {
    let env = TestEnv::new();
    env.cmd()
        .args(["create", "xenial"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Release \"xenial\" not valid."))
        .stderr(predicate::str::contains("[debian] bookworm"))
        .stderr(predicate::str::contains("[ubuntu] bionic - focal"));

    assert!(!env.config_path("xenial").exists());
}

#[test]
fn empty_release_is_reported() {
    let env = TestEnv::new();
    env.cmd()
        .args(["exists", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No release declared."));
}

#[test]
fn invalid_config_is_fatal() {
    let env = TestEnv::new();
    fs::write(env.temp.path().join("apt-venv.conf"), "{ broken").unwrap();

    env.cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration file"));
}

#[test]
fn exists_exit_code() {
    let env = TestEnv::new();

    env.cmd()
        .args(["exists", "bookworm"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("not created"));

    env.cmd().args(["create", "bookworm"]).assert().success();

    env.cmd()
        .args(["exists", "bookworm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bookworm (debian): exists"));
}

#[test]
fn exists_json() {
    let env = TestEnv::new();
    let output = env
        .cmd()
        .args(["--json", "exists", "bionic"])
        .output()
        .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["release"], "bionic");
    assert_eq!(value["distro"], "ubuntu");
    assert_eq!(value["exists"], false);
}

#[test]
fn delete_removes_everything() {
    let env = TestEnv::new();
    env.cmd().args(["create", "bionic"]).assert().success();

    env.cmd()
        .args(["delete", "bionic", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted bionic"));

    assert!(!env.config_path("bionic").exists());
    assert!(!env.cache_path("bionic").exists());
    assert!(!env.data_path("bionic").exists());
    env.cmd().args(["exists", "bionic"]).assert().failure();
}

#[test]
fn delete_never_created_is_noop() {
    let env = TestEnv::new();
    env.cmd().args(["delete", "focal", "-y"]).assert().success();
}

#[test]
fn delete_without_terminal_needs_yes() {
    let env = TestEnv::new();
    env.cmd().args(["create", "bionic"]).assert().success();

    // stdin and stderr are pipes here, so no prompt can be shown
    env.cmd()
        .args(["delete", "bionic"])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    assert!(env.config_path("bionic").join("bash.rc").is_file());
}

#[test]
fn list_shows_all_releases() {
    let env = TestEnv::new();
    env.cmd().args(["create", "focal"]).assert().success();

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("bookworm"))
        .stdout(predicate::str::contains("bionic"))
        .stdout(predicate::str::is_match(r"focal\s+created").unwrap());
}

#[test]
fn list_json() {
    let env = TestEnv::new();
    let output = env.cmd().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let releases = value["releases"].as_array().unwrap();
    assert_eq!(releases.len(), 3);
    assert_eq!(releases[0]["distro"], "debian");
}

#[test]
fn run_creates_and_uses_sandbox() {
    let env = TestEnv::new();

    env.cmd()
        .args(["run", "bionic", "echo", "$APT_CONFIG"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            env.config_path("bionic").join("apt.conf").display().to_string(),
        ));

    assert!(env.config_path("bionic").join("bash.rc").is_file());
}

#[test]
fn run_propagates_exit_code() {
    let env = TestEnv::new();
    env.cmd()
        .args(["run", "focal", "exit", "7"])
        .assert()
        .code(7);
}

#[test]
fn fake_sudo_runs_command_directly() {
    let env = TestEnv::new();
    env.cmd()
        .args(["run", "bionic", "sudo", "-E", "echo", "sandboxed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sandboxed"));
}

#[test]
fn verbose_logs_lifecycle() {
    let env = TestEnv::new();
    env.cmd()
        .args(["-v", "create", "bionic"])
        .assert()
        .success()
        .stderr(predicate::str::contains("creating bionic"));
}
