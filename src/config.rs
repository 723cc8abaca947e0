//! Configuration for deletion-probe.
//!
//! Configuration sources (highest priority first):
//! 1. CLI flags (applied by the `cli` module)
//! 2. Environment variables (DELETION_PROBE_TIMEOUT_SECS, DELETION_PROBE_ARCHIVE_ENDPOINT)
//! 3. Config file (.deletion-probe/config.yaml)
//! 4. Defaults (targets.csv, results/, logs/, 15s timeout, all platforms)
//!
//! The nearest `.deletion-probe/config.yaml` at or above the working
//! directory is used. Relative paths in it resolve against the directory
//! that holds `.deletion-probe/`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::archive::WAYBACK_AVAILABLE_ENDPOINT;
use crate::adapters::http::DEFAULT_USER_AGENT;

pub const ENV_TIMEOUT_SECS: &str = "DELETION_PROBE_TIMEOUT_SECS";
pub const ENV_ARCHIVE_ENDPOINT: &str = "DELETION_PROBE_ARCHIVE_ENDPOINT";

const CONFIG_DIR: &str = ".deletion-probe";
const CONFIG_FILE: &str = "config.yaml";

const DEFAULT_INPUT: &str = "targets.csv";
const DEFAULT_RESULTS_DIR: &str = "results";
const DEFAULT_LOGS_DIR: &str = "logs";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// On-disk YAML schema; every key is optional
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub http: Option<HttpConfig>,
    #[serde(default)]
    pub archive: Option<ArchiveConfig>,
    /// Platform keys to probe; empty means all
    #[serde(default)]
    pub platforms: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    pub input: Option<String>,
    pub results_dir: Option<String>,
    pub logs_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    pub endpoint: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Targets CSV
    pub input: PathBuf,
    /// Directory holding deletion_results.csv
    pub results_dir: PathBuf,
    /// Directory holding per-pair probe logs
    pub logs_dir: PathBuf,
    /// Per-request HTTP timeout
    pub timeout: Duration,
    pub user_agent: String,
    pub archive_endpoint: String,
    /// Platform keys; empty means all
    pub platforms: Vec<String>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            archive_endpoint: WAYBACK_AVAILABLE_ENDPOINT.to_string(),
            platforms: Vec::new(),
            config_file: None,
        }
    }
}

/// Nearest `.deletion-probe/config.yaml` at or above `start`
fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

impl ConfigFile {
    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Merge config file and environment over the defaults
fn resolve(
    file: Option<(&Path, ConfigFile)>,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let mut resolved = ResolvedConfig::default();

    if let Some((config_path, config)) = file {
        // Relative paths hang off the directory holding .deletion-probe/;
        // absolute ones replace it on join
        let root = config_path
            .parent()
            .and_then(Path::parent)
            .unwrap_or(Path::new("."));
        let paths = &config.paths;
        resolved.input = root.join(paths.input.as_deref().unwrap_or(DEFAULT_INPUT));
        resolved.results_dir =
            root.join(paths.results_dir.as_deref().unwrap_or(DEFAULT_RESULTS_DIR));
        resolved.logs_dir = root.join(paths.logs_dir.as_deref().unwrap_or(DEFAULT_LOGS_DIR));

        if let Some(http) = config.http {
            if let Some(secs) = http.timeout_seconds {
                resolved.timeout = Duration::from_secs(secs);
            }
            if let Some(user_agent) = http.user_agent {
                resolved.user_agent = user_agent;
            }
        }

        if let Some(endpoint) = config.archive.and_then(|a| a.endpoint) {
            resolved.archive_endpoint = endpoint;
        }

        resolved.platforms = config.platforms;
        resolved.config_file = Some(config_path.to_path_buf());
    }

    if let Some(raw) = env(ENV_TIMEOUT_SECS) {
        let secs: u64 = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", ENV_TIMEOUT_SECS, raw))?;
        resolved.timeout = Duration::from_secs(secs);
    }
    if let Some(endpoint) = env(ENV_ARCHIVE_ENDPOINT) {
        resolved.archive_endpoint = endpoint;
    }

    if resolved.timeout.is_zero() {
        anyhow::bail!("HTTP timeout must be at least one second");
    }

    Ok(resolved)
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Resolve configuration for a run started in `dir`
pub fn load_from(dir: &Path, env: &dyn Fn(&str) -> Option<String>) -> Result<ResolvedConfig> {
    match find_config_file(dir) {
        Some(path) => {
            let file = ConfigFile::read(&path)?;
            resolve(Some((path.as_path(), file)), env)
        }
        None => resolve(None, env),
    }
}

/// Resolve configuration from the working directory and process environment
pub fn load() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    load_from(&cwd, &process_env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file() {
        let config = resolve(None, &no_env).unwrap();

        assert_eq!(config.input, PathBuf::from("targets.csv"));
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.logs_dir, PathBuf::from("logs"));
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.archive_endpoint, WAYBACK_AVAILABLE_ENDPOINT);
        assert!(config.platforms.is_empty());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".deletion-probe");
        std::fs::create_dir_all(&dir).unwrap();

        let config_path = dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  input: data/targets.csv
  results_dir: /var/tmp/results
http:
  timeout_seconds: 5
archive:
  endpoint: http://localhost:8080/available
platforms: [tinder, match]
"#
        )
        .unwrap();

        let parsed = ConfigFile::read(&config_path).unwrap();
        assert_eq!(parsed.version.as_deref(), Some("1.0"));
        assert_eq!(parsed.paths.input, Some("data/targets.csv".to_string()));

        let config = resolve(Some((config_path.as_path(), parsed)), &no_env).unwrap();
        assert_eq!(config.input, temp.path().join("data/targets.csv"));
        assert_eq!(config.results_dir, PathBuf::from("/var/tmp/results"));
        assert_eq!(config.logs_dir, temp.path().join("logs"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.archive_endpoint, "http://localhost:8080/available");
        assert_eq!(config.platforms, vec!["tinder", "match"]);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_env_overrides_file() {
        let env = |key: &str| match key {
            ENV_TIMEOUT_SECS => Some("42".to_string()),
            ENV_ARCHIVE_ENDPOINT => Some("http://archive.test/available".to_string()),
            _ => None,
        };
        let config = resolve(None, &env).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(42));
        assert_eq!(config.archive_endpoint, "http://archive.test/available");
    }

    #[test]
    fn test_invalid_timeouts_rejected() {
        let garbage = |key: &str| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string());
        assert!(resolve(None, &garbage).is_err());

        let zero = |key: &str| (key == ENV_TIMEOUT_SECS).then(|| "0".to_string());
        assert!(resolve(None, &zero).is_err());
    }

    fn write_config(root: &Path, yaml: &str) -> PathBuf {
        let dir = root.join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn test_nearest_config_wins() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("cases").join("2024");
        std::fs::create_dir_all(&nested).unwrap();

        let outer = write_config(temp.path(), "http:\n  timeout_seconds: 7\n");
        assert_eq!(find_config_file(&nested), Some(outer.clone()));

        let config = load_from(&nested, &no_env).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.input, temp.path().join("targets.csv"));
        assert_eq!(config.config_file, Some(outer));

        let inner = write_config(&nested, "platforms: [bumble]\n");
        let config = load_from(&nested, &no_env).unwrap();
        assert_eq!(config.config_file, Some(inner));
        assert_eq!(config.platforms, vec!["bumble"]);
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_version_key_is_optional() {
        let parsed: ConfigFile = serde_yaml::from_str("paths:\n  input: t.csv\n").unwrap();
        assert!(parsed.version.is_none());
        assert_eq!(parsed.paths.input.as_deref(), Some("t.csv"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "http: [not, a, map\n");

        let err = load_from(temp.path(), &no_env).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }
}
