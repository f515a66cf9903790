use crate::fixture_path;
use pretty_assertions::assert_eq;
use spout::{
    detect_framework, extract_endpoints, generate_client, ClientOptions, Framework, SpoutError,
};

#[test]
fn detection_is_deterministic() {
    let root = fixture_path("fastapi_app");
    let first = detect_framework(&root).unwrap().unwrap();
    let second = detect_framework(&root).unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.framework, Framework::FastApi);
    assert!(first.confidence >= 0.3);
}

#[test]
fn evidence_excludes_unrelated_files() {
    let found = detect_framework(&fixture_path("fastapi_app"))
        .unwrap()
        .unwrap();
    assert!(found
        .evidence_files
        .iter()
        .all(|p| !p.ends_with("__init__.py")));
}

#[test]
fn round_trip_users_api() {
    let code = generate_client(&fixture_path("fastapi_app"), &ClientOptions::default()).unwrap();
    for name in ["getUsers", "getUser", "postUsers"] {
        assert!(code.contains(name), "missing {name}");
    }
    assert!(code.contains("fetch("));
}

#[test]
fn generation_is_deterministic() {
    let root = fixture_path("ninja_app");
    let options = ClientOptions::new("axios", "", true).unwrap();
    let first = generate_client(&root, &options).unwrap();
    let second = generate_client(&root, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn broken_file_is_skipped() {
    let found = detect_framework(&fixture_path("broken")).unwrap().unwrap();
    let endpoints = extract_endpoints(&found);
    let paths: Vec<_> = endpoints.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["/health"]);
}

#[test]
fn missing_root_is_invalid_path() {
    let err = detect_framework(&fixture_path("no_such_project")).unwrap_err();
    assert!(matches!(err, SpoutError::InvalidPath { .. }));
}

#[test]
fn plain_project_has_no_framework() {
    assert!(detect_framework(&fixture_path("plain")).unwrap().is_none());
    let err = generate_client(&fixture_path("plain"), &ClientOptions::default()).unwrap_err();
    assert!(matches!(err, SpoutError::NoFrameworkDetected { .. }));
}
