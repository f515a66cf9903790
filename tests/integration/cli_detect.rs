use crate::{fixture_path, spout};
use predicates::prelude::*;

#[test]
fn detect_fastapi_text() {
    spout()
        .arg("detect")
        .arg(fixture_path("fastapi_app"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Framework detected: FastAPI"))
        .stdout(predicate::str::contains("Confidence: 0.80"))
        .stdout(predicate::str::contains("requirements.txt"));
}

#[test]
fn detect_ninja_json() {
    let output = spout()
        .args(["detect", "--format", "json"])
        .arg(fixture_path("ninja_app"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["detected"]["framework"], "django-ninja");
    assert_eq!(value["scores"].as_array().unwrap().len(), 3);
}

#[test]
fn detect_flask() {
    spout()
        .arg("detect")
        .arg(fixture_path("flask_app"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Framework detected: Flask"));
}

#[test]
fn detect_nothing_exits_non_zero() {
    spout()
        .arg("detect")
        .arg(fixture_path("plain"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("No supported framework detected"));
}

#[test]
fn list_generators() {
    spout()
        .arg("list-generators")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("axios"));
}
