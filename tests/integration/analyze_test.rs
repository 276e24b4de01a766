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
fn analyze_python_relative_imports_json() {
    depwalk()
        .args(["analyze", "tests/fixtures/python/shop/cart.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"success\""))
        .stdout(predicate::str::contains("\"language\": \"python\""))
        .stdout(predicate::str::contains("shop/pricing.py\""))
        .stdout(predicate::str::contains("shop/utils.py\""))
        .stdout(predicate::str::contains("\"requests\""))
        .stdout(predicate::str::contains("\"type\": \"relative_import\""))
        .stdout(predicate::str::contains("\"type\": \"from_import\""))
        .stdout(predicate::str::contains("unresolved_imports").not());
}

#[test]
fn analyze_python_discovers_root_above_package() {
    let output = depwalk()
        .args(["analyze", "tests/fixtures/python/shop/cart.py"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let root = fixture_path("python").canonicalize().unwrap();
    assert_eq!(json["project_root"], root.to_str().unwrap());
    assert_eq!(json["local_imports"].as_array().unwrap().len(), 2);
    assert_eq!(
        json["external_imports"],
        serde_json::json!(["os", "requests"])
    );
    assert_eq!(json["import_details"].as_array().unwrap().len(), 4);
    assert_eq!(json["import_details"][1]["level"], 1);
    assert_eq!(json["import_details"][1]["is_local"], true);
}

#[test]
fn analyze_java_json() {
    depwalk()
        .args([
            "analyze",
            "tests/fixtures/java/app/src/main/java/com/example/App.java",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"language\": \"java\""))
        .stdout(predicate::str::contains("com/example/util/Strings.java\""))
        .stdout(predicate::str::contains("\"java.util.List\""));
}

#[test]
fn analyze_text_report() {
    depwalk()
        .args([
            "analyze",
            "tests/fixtures/python/shop/cart.py",
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Import Analysis"))
        .stdout(predicate::str::contains("Local imports (2)"))
        .stdout(predicate::str::contains("  shop/pricing.py"))
        .stdout(predicate::str::contains("External imports (2)"));
}

#[test]
fn explicit_project_root_limits_locality() {
    let java_root = fixture_path("java");
    depwalk()
        .args([
            "analyze",
            "tests/fixtures/python/shop/cart.py",
            "--project-root",
            java_root.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"local_imports\": []"))
        .stdout(predicate::str::contains("\"pricing\""))
        .stdout(predicate::str::contains("\"is_local\": true").not());
}

#[test]
fn syntax_error_is_reported_as_data() {
    depwalk()
        .args(["analyze", "tests/fixtures/python/scripts/broken.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"error\""))
        .stdout(predicate::str::contains("Parse error in"))
        .stdout(predicate::str::contains("\"import_details\": []"));
}

#[test]
fn missing_file_is_reported_as_data() {
    depwalk()
        .args(["analyze", "tests/fixtures/python/shop/ghost.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"error\""))
        .stdout(predicate::str::contains("File not found"));
}

#[test]
fn unsupported_extension_lists_supported() {
    depwalk()
        .args(["analyze", "tests/fixtures/ruby/app.rb"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Unsupported file type: .rb (supported: .java, .py)",
        ));
}

#[test]
fn format_from_environment() {
    depwalk()
        .env("DEPWALK_FORMAT", "text")
        .args(["analyze", "tests/fixtures/python/shop/utils.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Import Analysis"))
        .stdout(predicate::str::contains("  json"));
}

#[test]
fn languages_lists_extensions() {
    depwalk()
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("java: .java"))
        .stdout(predicate::str::contains("python: .py"));
}

#[test]
fn unknown_format_flag_is_rejected() {
    depwalk()
        .args(["analyze", "tests/fixtures/python/shop/cart.py", "--format", "dot"])
        .assert()
        .failure();
}
