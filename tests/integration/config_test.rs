use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn depwalk() -> Command {
    let mut cmd = Command::cargo_bin("depwalk").unwrap();
    cmd.env("XDG_CONFIG_HOME", fixture_path("no-user-config"))
        .env_remove("DEPWALK_FORMAT")
        .env_remove("DEPWALK_MAX_DEPTH");
    cmd
}

#[test]
fn config_show_defaults() {
    // No config file present, shows all defaults
    let tmp = tempfile::tempdir().unwrap();
    depwalk()
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded config files: (none)"))
        .stdout(predicate::str::contains("defaults.format: json <- default"))
        .stdout(predicate::str::contains("defaults.max_depth: 2 <- default"))
        .stdout(predicate::str::contains("java.source_roots: (none) <- default"))
        .stdout(predicate::str::contains("Overridden:").not());
}

#[test]
fn config_show_with_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".depwalk.toml"),
        r#"
[defaults]
format = "text"
max_depth = 4

[java]
skip_dirs = ["target", "generated-*"]
"#,
    )
    .unwrap();

    depwalk()
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(".depwalk.toml"))
        .stdout(predicate::str::contains("defaults.format: text <- project config"))
        .stdout(predicate::str::contains("defaults.max_depth: 4 <- project config"))
        .stdout(predicate::str::contains(
            "java.skip_dirs: [target, generated-*] <- project config",
        ));
}

#[test]
fn env_var_beats_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".depwalk.toml"), "[defaults]\nmax_depth = 4\n").unwrap();

    depwalk()
        .env("DEPWALK_MAX_DEPTH", "7")
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "defaults.max_depth: 7 <- env var (DEPWALK_MAX_DEPTH)",
        ));
}

#[test]
fn project_config_applies_to_tree() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".depwalk.toml"), "[defaults]\nmax_depth = 0\n").unwrap();
    let cart = fixture_path("python/shop/cart.py");

    depwalk()
        .current_dir(tmp.path())
        .args(["tree", cart.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_depth\": 0"));
}

#[test]
fn cli_flag_beats_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".depwalk.toml"), "[defaults]\nformat = \"text\"\n").unwrap();
    let utils = fixture_path("python/shop/utils.py");

    depwalk()
        .current_dir(tmp.path())
        .args(["analyze", utils.to_str().unwrap(), "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn invalid_project_config_fails() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".depwalk.toml"), "[defaults]\nformat = \"yaml\"\n").unwrap();
    let utils = fixture_path("python/shop/utils.py");

    depwalk()
        .current_dir(tmp.path())
        .args(["analyze", utils.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown output format: yaml"));
}

#[test]
fn config_show_invalid_path() {
    depwalk()
        .args(["config", "show", "--path", "/definitely/not/here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid path"));
}
