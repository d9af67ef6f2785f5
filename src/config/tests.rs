use super::test_support::{load_config_file, parse_cli};
use super::{apply_config, parse_base_url, parse_duration_value, types::ConfigFile};
use crate::error::{AppError, AppResult, ConfigError};
use crate::runner::TagFilter;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

fn cli(args: &[&str]) -> AppResult<(crate::args::RunArgs, clap::ArgMatches)> {
    parse_cli(args).map_err(AppError::config)
}

#[test]
fn parse_toml_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("hubcheck.toml");
    let content = r#"
base_url = "https://ghe.example.com/api/v3"
github_username = "octocat"
github_password = "hunter2"
features = "acceptance"
timeout = "5s"
tags = ["@smoke", "~@wip"]
stop_on_failure = true
report = "target/hubcheck.json"
"#;
    std::fs::write(&path, content)?;

    let config = load_config_file(&path)?;
    if config.base_url.as_deref() != Some("https://ghe.example.com/api/v3") {
        return Err(AppError::config("Unexpected base_url"));
    }
    if config.username.as_deref() != Some("octocat") {
        return Err(AppError::config("Expected github_username alias"));
    }
    if config.password.as_deref() != Some("hunter2") {
        return Err(AppError::config("Expected github_password alias"));
    }
    let timeout = config
        .timeout
        .as_ref()
        .ok_or_else(|| AppError::config("Expected timeout"))?
        .to_duration()
        .map_err(AppError::config)?;
    if timeout != Duration::from_secs(5) {
        return Err(AppError::config(format!("Unexpected timeout: {:?}", timeout)));
    }
    if config.stop_on_failure != Some(true) {
        return Err(AppError::config("Expected stop_on_failure"));
    }
    Ok(())
}

#[test]
fn parse_json_config_with_numeric_timeout() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("hubcheck.json");
    std::fs::write(
        &path,
        r#"{"username": "octocat", "timeout": 12, "name": "watch"}"#,
    )?;

    let config = load_config_file(&path)?;
    let timeout = config
        .timeout
        .as_ref()
        .ok_or_else(|| AppError::config("Expected timeout"))?
        .to_duration()
        .map_err(AppError::config)?;
    if timeout != Duration::from_secs(12) {
        return Err(AppError::config(format!("Unexpected timeout: {:?}", timeout)));
    }
    if config.name.as_deref() != Some("watch") {
        return Err(AppError::config("Unexpected name"));
    }
    Ok(())
}

#[test]
fn load_config_rejects_bad_files() -> AppResult<()> {
    let dir = tempdir()?;

    let yaml = dir.path().join("hubcheck.yml");
    std::fs::write(&yaml, "base_url: x")?;
    if !matches!(
        load_config_file(&yaml),
        Err(AppError::Config(ConfigError::UnsupportedExtension { .. }))
    ) {
        return Err(AppError::config("Expected UnsupportedExtension"));
    }

    let unknown = dir.path().join("unknown.toml");
    std::fs::write(&unknown, "colour = \"red\"")?;
    if !matches!(
        load_config_file(&unknown),
        Err(AppError::Config(ConfigError::ParseToml { .. }))
    ) {
        return Err(AppError::config("Expected unknown keys to be rejected"));
    }

    let missing = dir.path().join("missing.toml");
    if !matches!(
        load_config_file(&missing),
        Err(AppError::Config(ConfigError::ReadConfig { .. }))
    ) {
        return Err(AppError::config("Expected ReadConfig"));
    }
    Ok(())
}

#[test]
fn apply_config_fills_unset_values() -> AppResult<()> {
    let config = ConfigFile {
        base_url: Some("http://127.0.0.1:9000".to_owned()),
        password: Some("hunter2".to_owned()),
        features: Some("acceptance".to_owned()),
        tags: Some(vec!["~@wip".to_owned()]),
        stop_on_failure: Some(true),
        report: Some("report.json".to_owned()),
        ..ConfigFile::default()
    };
    let (mut args, matches) = cli(&["hubcheck", "--username", "octocat"])?;

    apply_config(&mut args, &matches, &config)?;

    let checks = [
        (
            std::env::var_os("HUBCHECK_BASE_URL").is_some()
                || args.base_url == "http://127.0.0.1:9000",
            "Expected config base_url",
        ),
        (
            args.username.as_deref() == Some("octocat"),
            "Expected CLI username to be kept",
        ),
        (
            std::env::var_os("GITHUB_PASSWORD").is_some()
                || args.password.as_deref() == Some("hunter2"),
            "Expected config password",
        ),
        (
            args.features.as_path() == Path::new("acceptance"),
            "Expected config features path",
        ),
        (
            args.tags == [TagFilter::Exclude("wip".to_owned())],
            "Expected config tags",
        ),
        (args.stop_on_failure, "Expected config stop_on_failure"),
        (
            args.report.as_deref() == Some(Path::new("report.json")),
            "Expected config report",
        ),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(AppError::config(message));
        }
    }
    Ok(())
}

#[test]
fn apply_config_respects_cli_overrides() -> AppResult<()> {
    let config = ConfigFile {
        features: Some("from-config".to_owned()),
        timeout: Some(super::types::DurationValue::Seconds(90)),
        name: Some("from config".to_owned()),
        ..ConfigFile::default()
    };
    let (mut args, matches) = cli(&[
        "hubcheck",
        "from-cli",
        "--timeout",
        "5s",
        "--name",
        "from cli",
    ])?;

    apply_config(&mut args, &matches, &config)?;

    if args.features.as_path() != Path::new("from-cli") {
        return Err(AppError::config("Expected CLI features to win"));
    }
    if args.timeout != Duration::from_secs(5) {
        return Err(AppError::config("Expected CLI timeout to win"));
    }
    if args.name.as_deref() != Some("from cli") {
        return Err(AppError::config("Expected CLI name to win"));
    }
    Ok(())
}

#[test]
fn apply_config_rejects_invalid_values() -> AppResult<()> {
    let bad_tags = ConfigFile {
        tags: Some(vec!["@".to_owned()]),
        ..ConfigFile::default()
    };
    let (mut args, matches) = cli(&["hubcheck"])?;
    if apply_config(&mut args, &matches, &bad_tags).is_ok() {
        return Err(AppError::config("Expected invalid tag to be rejected"));
    }

    let zero_timeout = ConfigFile {
        timeout: Some(super::types::DurationValue::Seconds(0)),
        ..ConfigFile::default()
    };
    if !matches!(
        apply_config(&mut args, &matches, &zero_timeout),
        Err(AppError::Config(ConfigError::DurationZero))
    ) {
        return Err(AppError::config("Expected zero timeout to be rejected"));
    }
    Ok(())
}

#[test]
fn parse_duration_value_accepts_units() -> AppResult<()> {
    let cases = [
        ("10", Duration::from_secs(10)),
        ("150ms", Duration::from_millis(150)),
        ("3m", Duration::from_secs(180)),
        ("2h", Duration::from_secs(7200)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_value(input).map_err(AppError::config)?;
        if parsed != expected {
            return Err(AppError::config(format!("'{}' parsed to {:?}", input, parsed)));
        }
    }
    for invalid in ["", "ms", "5d", "0s"] {
        if parse_duration_value(invalid).is_ok() {
            return Err(AppError::config(format!("'{}' should be rejected", invalid)));
        }
    }
    Ok(())
}

#[test]
fn parse_base_url_validation() -> AppResult<()> {
    let url = parse_base_url(" https://api.github.com ").map_err(AppError::config)?;
    if url.host_str() != Some("api.github.com") {
        return Err(AppError::config("Unexpected host"));
    }
    if !matches!(
        parse_base_url("ftp://example.com"),
        Err(ConfigError::BaseUrlScheme { .. })
    ) {
        return Err(AppError::config("Expected scheme rejection"));
    }
    if !matches!(
        parse_base_url("not a url"),
        Err(ConfigError::InvalidBaseUrl { .. })
    ) {
        return Err(AppError::config("Expected parse failure"));
    }
    Ok(())
}
