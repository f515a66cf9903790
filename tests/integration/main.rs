mod cli_config;
mod cli_detect;
mod cli_endpoints;
mod cli_generate;
mod library;

use assert_cmd::Command;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("python")
        .join(name)
}

/// `spout` with the configuration environment cleared.
pub fn spout() -> Command {
    let mut cmd = Command::cargo_bin("spout").unwrap();
    for var in [
        "SPOUT_CLIENT_TYPE",
        "SPOUT_BASE_URL",
        "SPOUT_INCLUDE_TYPES",
        "SPOUT_OUTPUT",
        "SPOUT_INCLUDE",
        "SPOUT_EXCLUDE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}
