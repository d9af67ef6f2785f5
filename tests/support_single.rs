use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Environment variables that would leak the caller's settings into a run.
const ISOLATED_ENV: [&str; 6] = [
    "GITHUB_USERNAME",
    "GITHUB_PASSWORD",
    "HUBCHECK_BASE_URL",
    "HUBCHECK_LOG",
    "NO_COLOR",
    "RUST_LOG",
];

/// Run the `hubcheck` binary inside `dir` and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_hubcheck<I, S>(dir: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = hubcheck_bin()?;
    let mut command = Command::new(bin);
    for key in ISOLATED_ENV {
        command.env_remove(key);
    }
    command
        .current_dir(dir)
        .args(args)
        .env("HUBCHECK_LOG", "error")
        .output()
        .map_err(|err| format!("run hubcheck failed: {}", err))
}

/// Write a feature file under `dir/features/`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_feature(dir: &Path, name: &str, content: &str) -> Result<(), String> {
    let features = dir.join("features");
    fs::create_dir_all(&features).map_err(|err| format!("create features dir failed: {}", err))?;
    fs::write(features.join(name), content).map_err(|err| format!("write feature failed: {}", err))
}

/// Render captured output for assertion messages.
#[must_use]
pub fn describe(output: &Output) -> String {
    format!(
        "status: {}\nstdout: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

fn hubcheck_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_hubcheck").map_or_else(
        || Err("CARGO_BIN_EXE_hubcheck missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
