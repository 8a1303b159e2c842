use super::{
    apply_config, load_config_file,
    types::{ConfigFile, DurationValue},
};
use clap::{CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::TesterArgs;

fn default_args(argv: &[&str]) -> Result<(TesterArgs, clap::ArgMatches), String> {
    let matches = TesterArgs::command()
        .try_get_matches_from(argv.iter().copied())
        .map_err(|err| format!("parse args failed: {}", err))?;
    let args = TesterArgs::from_arg_matches(&matches)
        .map_err(|err| format!("parse args failed: {}", err))?;
    Ok((args, matches))
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadprobe.toml");
    let content = r#"
url = "http://localhost:3000/health"
requests = 500
concurrency = 50
status = 204
body = "ok"
timeout = "1500ms"
connect_timeout = 2
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.url.as_deref() != Some("http://localhost:3000/health") {
        return Err("Unexpected url".to_owned());
    }
    if config.requests != Some(500) || config.concurrency != Some(50) {
        return Err("Unexpected requests/concurrency".to_owned());
    }
    if config.status != Some(204) || config.body.as_deref() != Some("ok") {
        return Err("Unexpected status/body".to_owned());
    }
    if !matches!(config.timeout, Some(DurationValue::Text(ref text)) if text == "1500ms") {
        return Err("Unexpected timeout".to_owned());
    }
    if !matches!(config.connect_timeout, Some(DurationValue::Seconds(2))) {
        return Err("Unexpected connect_timeout".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadprobe.json");
    let content = r#"{
  "url": "http://localhost:3000",
  "workers": 8,
  "json": true,
  "progress_interval": 25
}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.concurrency != Some(8) {
        return Err("Expected workers alias to set concurrency".to_owned());
    }
    if config.json != Some(true) || config.progress_interval != Some(25) {
        return Err("Unexpected json/progress_interval".to_owned());
    }
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadprobe.toml");
    std::fs::write(&path, "duration = 30\n").map_err(|err| format!("write failed: {}", err))?;

    if load_config_file(&path).is_ok() {
        return Err("Expected unknown key to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadprobe.yaml");
    std::fs::write(&path, "url: x\n").map_err(|err| format!("write failed: {}", err))?;

    if load_config_file(&path).is_ok() {
        return Err("Expected unsupported extension error".to_owned());
    }
    Ok(())
}

#[test]
fn apply_config_fills_unset_values() -> Result<(), String> {
    let config = ConfigFile {
        url: Some("http://config-host:9000".to_owned()),
        requests: Some(42),
        concurrency: Some(7),
        status: Some(201),
        body: Some("created".to_owned()),
        timeout: Some(DurationValue::Text("250ms".to_owned())),
        redirect: Some(0),
        output: Some("out.json".to_owned()),
        ..ConfigFile::default()
    };

    let (mut args, matches) = default_args(&["loadprobe"])?;
    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    let checks = [
        (args.url == "http://config-host:9000", "Unexpected url"),
        (args.requests.get() == 42, "Unexpected requests"),
        (args.concurrency.get() == 7, "Unexpected concurrency"),
        (args.expected_status_code == 201, "Unexpected status"),
        (args.expected_body == "created", "Unexpected body"),
        (
            args.request_timeout == Duration::from_millis(250),
            "Unexpected timeout",
        ),
        (args.redirect_limit == 0, "Unexpected redirect"),
        (
            args.output.as_deref() == Some("out.json"),
            "Unexpected output",
        ),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(message.to_owned());
        }
    }
    Ok(())
}

#[test]
fn apply_config_cli_wins() -> Result<(), String> {
    let config = ConfigFile {
        url: Some("http://config-host".to_owned()),
        requests: Some(42),
        ..ConfigFile::default()
    };

    let (mut args, matches) = default_args(&["loadprobe", "--url", "http://from-cli", "-n", "3"])?;
    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.url != "http://from-cli" {
        return Err(format!("Expected CLI url, got {}", args.url));
    }
    if args.requests.get() != 3 {
        return Err("Expected CLI requests".to_owned());
    }
    Ok(())
}

#[test]
fn apply_config_rejects_zero_values() -> Result<(), String> {
    let cases = [
        ConfigFile {
            requests: Some(0),
            ..ConfigFile::default()
        },
        ConfigFile {
            concurrency: Some(0),
            ..ConfigFile::default()
        },
        ConfigFile {
            timeout: Some(DurationValue::Seconds(0)),
            ..ConfigFile::default()
        },
        ConfigFile {
            connect_timeout: Some(DurationValue::Text("soon".to_owned())),
            ..ConfigFile::default()
        },
    ];

    for config in cases {
        let (mut args, matches) = default_args(&["loadprobe"])?;
        if apply_config(&mut args, &matches, &config).is_ok() {
            return Err(format!("Expected error for {:?}", config));
        }
    }
    Ok(())
}
