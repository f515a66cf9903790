use crate::{fixture_path, spout};
use predicates::prelude::*;

#[test]
fn generate_fastapi_to_stdout() {
    spout()
        .args(["generate", "--stdout", "--quiet"])
        .arg(fixture_path("fastapi_app"))
        .assert()
        .success()
        .stdout(predicate::str::contains("export class ApiClient"))
        .stdout(predicate::str::contains("async getUsers("))
        .stdout(predicate::str::contains("async getUsers2(id: number): Promise<User>"))
        .stdout(predicate::str::contains("async postUsers(user: User): Promise<User>"))
        .stdout(predicate::str::contains(
            "/users/${encodeURIComponent(String(id))}",
        ))
        .stdout(predicate::str::contains("await fetch(url"))
        .stdout(predicate::str::contains("export interface User {"));
}

#[test]
fn generate_writes_file_and_creates_parents() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("web").join("src").join("api.ts");

    spout()
        .args(["generate", "--quiet", "-o"])
        .arg(&out)
        .arg(fixture_path("flask_app"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let code = std::fs::read_to_string(&out).unwrap();
    assert!(code.contains("async getOrders("));
    assert!(code.contains("async postOrders("));
    assert!(code.contains("/orders/${encodeURIComponent(String(order_id))}"));
}

#[test]
fn generate_axios_with_base_url() {
    spout()
        .args([
            "generate",
            "--stdout",
            "--quiet",
            "-c",
            "axios",
            "-b",
            "https://api.example.com",
        ])
        .arg(fixture_path("ninja_app"))
        .assert()
        .success()
        .stdout(predicate::str::contains("import axios"))
        .stdout(predicate::str::contains("\"https://api.example.com\""))
        .stdout(predicate::str::contains("async deleteEvents("));
}

#[test]
fn generate_without_types_uses_any() {
    spout()
        .args(["generate", "--stdout", "--quiet", "--no-types"])
        .arg(fixture_path("fastapi_app"))
        .assert()
        .success()
        .stdout(predicate::str::contains("export interface User").not())
        .stdout(predicate::str::contains("async postUsers(user: any)"));
}

#[test]
fn generate_rejects_unknown_client_type() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("client.ts");

    spout()
        .args(["generate", "--quiet", "-c", "xhr", "-o"])
        .arg(&out)
        .arg(fixture_path("fastapi_app"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported client type: xhr"));

    assert!(!out.exists());
}

#[test]
fn generate_fails_without_framework() {
    spout()
        .args(["generate", "--stdout", "--quiet"])
        .arg(fixture_path("plain"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No supported framework detected"));
}

#[test]
fn generate_skips_broken_files() {
    spout()
        .args(["generate", "--stdout", "--quiet"])
        .arg(fixture_path("broken"))
        .assert()
        .success()
        .stdout(predicate::str::contains("async getHealth("))
        .stdout(predicate::str::contains("getBroken").not());
}

#[test]
fn generate_reads_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("requirements.txt"), "fastapi\n").unwrap();
    std::fs::write(
        tmp.path().join("main.py"),
        "from fastapi import FastAPI\napp = FastAPI()\n\n@app.get('/ping')\ndef ping():\n    pass\n",
    )
    .unwrap();
    std::fs::write(
        tmp.path().join(".spout.toml"),
        "[client]\nclient_type = \"axios\"\noutput = \"gen/client.ts\"\n",
    )
    .unwrap();

    spout()
        .current_dir(tmp.path())
        .args(["generate", "--quiet"])
        .assert()
        .success();

    let code = std::fs::read_to_string(tmp.path().join("gen").join("client.ts")).unwrap();
    assert!(code.contains("import axios"));
    assert!(code.contains("async getPing("));
}

#[test]
fn generate_invalid_path() {
    spout()
        .args(["generate", "--quiet", "does/not/exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a project directory"));
}
