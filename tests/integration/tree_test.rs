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

fn tree_json(args: &[&str]) -> serde_json::Value {
    let output = depwalk().arg("tree").args(args).output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn python_cycle_is_marked_circular() {
    let root = fixture_path("python").canonicalize().unwrap();
    let cart = root.join("shop/cart.py");
    let pricing = root.join("shop/pricing.py");
    let json = tree_json(&["tests/fixtures/python/shop/cart.py"]);

    assert_eq!(json["root"], cart.to_str().unwrap());
    assert_eq!(json["max_depth"], 2);
    assert_eq!(json["total_files"], 3);
    let pricing_node = &json["tree"]["dependencies"][pricing.to_str().unwrap()];
    assert_eq!(
        pricing_node["dependencies"][cart.to_str().unwrap()],
        serde_json::json!({"circular": true})
    );
}

#[test]
fn zero_depth_truncates_dependencies() {
    depwalk()
        .args([
            "tree",
            "tests/fixtures/java/app/src/main/java/com/example/App.java",
            "--max-depth",
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"truncated\": true"))
        .stdout(predicate::str::contains("\"reason\": \"max_depth_reached\""))
        .stdout(predicate::str::contains("\"total_files\": 1"));
}

#[test]
fn max_depth_from_environment() {
    depwalk()
        .env("DEPWALK_MAX_DEPTH", "0")
        .args(["tree", "tests/fixtures/python/shop/cart.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_depth\": 0"))
        .stdout(predicate::str::contains("\"truncated\": true"));
}

#[test]
fn java_tree_text() {
    depwalk()
        .args([
            "tree",
            "tests/fixtures/java/app/src/main/java/com/example/App.java",
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "src/main/java/com/example/App.java\n\
             └── src/main/java/com/example/util/Strings.java\n    \
             └── src/main/java/com/example/App.java (circular)\n",
        ))
        .stdout(predicate::str::contains("2 files analyzed (max depth 2)"));
}

#[test]
fn python_tree_text() {
    let expected = "\
shop/cart.py
├── shop/pricing.py
│   └── shop/cart.py (circular)
└── shop/utils.py

3 files analyzed (max depth 2)
";
    depwalk()
        .args([
            "tree",
            "tests/fixtures/python/shop/cart.py",
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn unsupported_root_has_no_tree() {
    depwalk()
        .args(["tree", "tests/fixtures/ruby/app.rb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"error\""))
        .stdout(predicate::str::contains("Unsupported file type: .rb"))
        .stdout(predicate::str::contains("\"tree\"").not());
}

#[test]
fn negative_depth_is_rejected() {
    depwalk()
        .args(["tree", "tests/fixtures/python/shop/cart.py", "--max-depth", "-1"])
        .assert()
        .failure();
}
