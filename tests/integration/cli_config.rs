use crate::spout;
use predicates::prelude::*;

#[test]
fn config_show_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    spout()
        .args(["config", "show", "--path"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved settings:"))
        .stdout(predicate::str::contains("client.output: client.ts <- default"))
        .stdout(predicate::str::contains(
            "detection.min_confidence.flask: 0.3 <- default",
        ));
}

#[test]
fn config_show_with_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".spout.toml"),
        r#"
[client]
clientType = "axios"

[detection.min_confidence]
fastapi = 0.5
"#,
    )
    .unwrap();
    std::fs::write(tmp.path().join(".spoutignore"), "# generated\nmigrations/\n").unwrap();

    spout()
        .args(["config", "show", "--path"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".spout.toml"))
        .stdout(predicate::str::contains("client.client_type: axios <- project config"))
        .stdout(predicate::str::contains(
            "detection.min_confidence.fastapi: 0.5 <- project config",
        ))
        .stdout(predicate::str::contains("migrations/**"));
}

#[test]
fn config_show_env_override() {
    let tmp = tempfile::tempdir().unwrap();
    spout()
        .env("SPOUT_BASE_URL", "http://localhost:8000")
        .args(["config", "show", "--path"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "client.base_url: http://localhost:8000 <- env var (SPOUT_BASE_URL)",
        ));
}

#[test]
fn config_rejects_out_of_range_confidence() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".spout.toml"),
        "[detection.min_confidence]\nflask = 1.5\n",
    )
    .unwrap();

    spout()
        .args(["config", "show", "--path"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
