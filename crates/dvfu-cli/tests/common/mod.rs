#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Environment variables the CLI reads; cleared so the host cannot leak in.
const DVFU_ENV: &[&str] = &[
    "DVFU_CONFIG",
    "DVFU_LOGIN",
    "DVFU_PASSWORD",
    "DVFU_BLACKBOX_TOKEN",
    "DVFU_ESA_APP_CODE",
    "RUST_LOG",
];

/// Config file path inside an isolated home directory.
pub fn config_path(home: &Path) -> PathBuf {
    home.join("dvfu").join("config.json")
}

/// Run the CLI with an isolated HOME and config file.
pub fn run_cli(args: &[&str], home: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dvfu"));
    cmd.arg("--config").arg(config_path(home));
    cmd.args(args);
    for var in DVFU_ENV {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env("NO_COLOR", "1");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], home: &Path) -> String {
    let output = run_cli(args, home);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI off the async runtime so a mock server can keep serving.
pub async fn run_cli_async(args: Vec<String>, home: PathBuf) -> Output {
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&args, &home)
    })
    .await
    .expect("CLI task panicked")
}

pub fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
