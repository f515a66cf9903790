use crate::{fixture_path, spout};
use predicates::prelude::*;

#[test]
fn endpoints_text_lists_methods() {
    spout()
        .arg("endpoints")
        .arg(fixture_path("fastapi_app"))
        .assert()
        .success()
        .stdout(predicate::str::contains("FastAPI endpoints"))
        .stdout(predicate::str::contains("getUsers2"))
        .stdout(predicate::str::contains("putItems  [deprecated]"))
        .stdout(predicate::str::contains("[header] x_token: string"));
}

#[test]
fn endpoints_json() {
    let output = spout()
        .args(["endpoints", "--format", "json"])
        .arg(fixture_path("flask_app"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let endpoints = value["endpoints"].as_array().unwrap();
    let methods: Vec<_> = endpoints
        .iter()
        .map(|e| e["method"].as_str().unwrap())
        .collect();
    assert_eq!(methods, vec!["GET", "POST", "GET"]);
    assert_eq!(endpoints[2]["path"], "/orders/<int:order_id>");
    assert_eq!(endpoints[0]["description"], "List or create orders.");
}
