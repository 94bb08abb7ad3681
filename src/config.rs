//! Configuration file support for sbom-uploader.
//!
//! Provides YAML-based configuration through `sbom-uploader.config.yml`
//! files, environment overrides and the resolution of both into the
//! settings a run needs.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::dto::{
    PollPolicy, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL, DEFAULT_RETENTION_DAYS,
};
use crate::shared::error::UploadError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "sbom-uploader.config.yml";

pub const ENV_URL: &str = "DEPENDENCY_TRACK_URL";
pub const ENV_API_KEY: &str = "DEPENDENCY_TRACK_API_KEY";

pub const DEFAULT_URL: &str = "http://localhost:8081";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_SCANS_DIR: &str = "scans";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format of diagnostic logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub dependency_track_url: Option<String>,
    pub api_key: Option<String>,
    pub frontend_url: Option<String>,
    pub scans_dir: Option<PathBuf>,
    pub retention_days: Option<u32>,
    pub poll_interval_secs: Option<u64>,
    pub max_poll_attempts: Option<u32>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn invalid(message: impl Into<String>, hint: impl Into<String>) -> anyhow::Error {
    UploadError::InvalidConfig {
        message: message.into(),
        hint: hint.into(),
    }
    .into()
}

fn validate_url(field: &str, url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(());
    }
    Err(invalid(
        format!("{} must start with http:// or https:// (got '{}')", field, url),
        "Use the full base URL, e.g. http://localhost:8081",
    ))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.retention_days == Some(0) {
        return Err(invalid(
            "retention_days must be greater than 0",
            "Set retention_days to the number of days SBOMs are kept, e.g. 60",
        ));
    }
    if config.max_poll_attempts == Some(0) {
        return Err(invalid(
            "max_poll_attempts must be greater than 0",
            "Set max_poll_attempts to at least 1, e.g. 30",
        ));
    }
    if let Some(url) = &config.dependency_track_url {
        validate_url("dependency_track_url", url)?;
    }
    if let Some(url) = &config.frontend_url {
        validate_url("frontend_url", url)?;
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<_> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub scans_dir: Option<PathBuf>,
    pub verbose: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub dependency_track_url: String,
    pub api_key: String,
    pub frontend_url: String,
    pub scans_dir: PathBuf,
    pub retention_days: u32,
    pub poll_policy: PollPolicy,
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Merges CLI values, environment, config file and defaults, in that order
/// of precedence.
///
/// `env` looks up an environment variable; empty values count as unset.
///
/// # Errors
/// Returns an error if no API key is configured anywhere or an
/// environment value is invalid
pub fn resolve<F>(cli: &CliOverrides, file: Option<ConfigFile>, env: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let file = file.unwrap_or_default();
    let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    let dependency_track_url = env(ENV_URL)
        .or(file.dependency_track_url)
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    validate_url("dependency_track_url", &dependency_track_url)?;

    let api_key = env(ENV_API_KEY).or(file.api_key).ok_or_else(|| {
        invalid(
            "no Dependency-Track API key configured",
            format!(
                "Set {} or add api_key to {} (Settings → Teams → API Keys in Dependency-Track)",
                ENV_API_KEY, CONFIG_FILENAME
            ),
        )
    })?;

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        file.log_level
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    };

    Ok(Settings {
        dependency_track_url,
        api_key,
        frontend_url: file
            .frontend_url
            .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
        scans_dir: cli
            .scans_dir
            .clone()
            .or(file.scans_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCANS_DIR)),
        retention_days: file.retention_days.unwrap_or(DEFAULT_RETENTION_DAYS),
        poll_policy: PollPolicy {
            interval: file
                .poll_interval_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
            max_attempts: file.max_poll_attempts.unwrap_or(DEFAULT_MAX_POLL_ATTEMPTS),
        },
        log_level,
        log_format: file.log_format.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn file_with_key() -> ConfigFile {
        ConfigFile {
            api_key: Some("odt_file".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
dependency_track_url: https://dtrack.example.com
api_key: odt_secret
frontend_url: https://dtrack-ui.example.com
scans_dir: /var/lib/endpointbom/scans
retention_days: 30
poll_interval_secs: 5
max_poll_attempts: 12
log_level: warn
log_format: json
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(
            config.dependency_track_url.as_deref(),
            Some("https://dtrack.example.com")
        );
        assert_eq!(config.api_key.as_deref(), Some("odt_secret"));
        assert_eq!(
            config.scans_dir,
            Some(PathBuf::from("/var/lib/endpointbom/scans"))
        );
        assert_eq!(config.retention_days, Some(30));
        assert_eq!(config.poll_interval_secs, Some(5));
        assert_eq!(config.max_poll_attempts, Some(12));
        assert_eq!(config.log_format, Some(LogFormat::Json));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "retention_days: 7\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.retention_days, Some(7));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config_from_path(&dir.path().join("nope.yml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "retention_days: [oops").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_unknown_fields_are_captured() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "api_key: k\nupload_parallelism: 4\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.unknown_fields.contains_key("upload_parallelism"));
    }

    #[test]
    fn test_zero_retention_rejected() {
        let config = ConfigFile {
            retention_days: Some(0),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("retention_days"));
    }

    #[test]
    fn test_zero_poll_attempts_rejected() {
        let config = ConfigFile {
            max_poll_attempts: Some(0),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_url_scheme_required() {
        let config = ConfigFile {
            dependency_track_url: Some("dtrack.example.com".to_string()),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("http:// or https://"));
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = resolve(&CliOverrides::default(), Some(file_with_key()), no_env).unwrap();

        assert_eq!(settings.dependency_track_url, DEFAULT_URL);
        assert_eq!(settings.frontend_url, DEFAULT_FRONTEND_URL);
        assert_eq!(settings.scans_dir, PathBuf::from("scans"));
        assert_eq!(settings.retention_days, 60);
        assert_eq!(settings.poll_policy, PollPolicy::default());
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.log_format, LogFormat::Text);
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = resolve(&CliOverrides::default(), None, no_env).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UploadError>(),
            Some(UploadError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            dependency_track_url: Some("http://file:8081".to_string()),
            api_key: Some("odt_file".to_string()),
            ..Default::default()
        };
        let env = |name: &str| match name {
            ENV_URL => Some("https://env.example.com".to_string()),
            ENV_API_KEY => Some("odt_env".to_string()),
            _ => None,
        };

        let settings = resolve(&CliOverrides::default(), Some(file), env).unwrap();
        assert_eq!(settings.dependency_track_url, "https://env.example.com");
        assert_eq!(settings.api_key, "odt_env");
    }

    #[test]
    fn test_empty_env_value_is_unset() {
        let env = |name: &str| (name == ENV_API_KEY).then(String::new);
        let settings = resolve(&CliOverrides::default(), Some(file_with_key()), env).unwrap();
        assert_eq!(settings.api_key, "odt_file");
    }

    #[test]
    fn test_invalid_env_url_rejected() {
        let env = |name: &str| (name == ENV_URL).then(|| "localhost:8081".to_string());
        assert!(resolve(&CliOverrides::default(), Some(file_with_key()), env).is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = ConfigFile {
            scans_dir: Some(PathBuf::from("/from/file")),
            log_level: Some("warn".to_string()),
            ..file_with_key()
        };
        let cli = CliOverrides {
            scans_dir: Some(PathBuf::from("/from/cli")),
            verbose: true,
        };

        let settings = resolve(&cli, Some(file), no_env).unwrap();
        assert_eq!(settings.scans_dir, PathBuf::from("/from/cli"));
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_poll_policy_from_file() {
        let file = ConfigFile {
            poll_interval_secs: Some(0),
            max_poll_attempts: Some(5),
            ..file_with_key()
        };
        let settings = resolve(&CliOverrides::default(), Some(file), no_env).unwrap();
        assert_eq!(settings.poll_policy.interval, Duration::ZERO);
        assert_eq!(settings.poll_policy.max_attempts, 5);
    }
}
