use crate::error::PipelineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file. Unset means the default
/// path in the working directory.
pub const CONFIG_ENV: &str = "SCOREBOARD_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "scoreboard.json";

const DEFAULT_TOP_N: u32 = 10;
const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5_000;

/// "Last updated" display convention. The developer variant shows a bare
/// date; production shows a full UTC ISO-8601 instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampFormat {
    Date,
    UtcIso8601,
}

impl TimestampFormat {
    pub fn render(&self, now: DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Date => now.format("%Y-%m-%d").to_string(),
            TimestampFormat::UtcIso8601 => now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }
}

/// Run configuration. Every field has a developer-variant default so the
/// binary works from a checkout with no config file; production points
/// `SCOREBOARD_CONFIG` at a file with absolute paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub store_path: PathBuf,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub top_n: u32,
    pub timestamp_format: TimestampFormat,
    pub query_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("scores.db"),
            template_path: PathBuf::from("templates/leaderboard.html"),
            output_path: PathBuf::from("public/leaderboard.html"),
            top_n: DEFAULT_TOP_N,
            timestamp_format: TimestampFormat::Date,
            query_timeout_ms: DEFAULT_QUERY_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Resolve and load the effective configuration.
    ///
    /// An explicitly configured path must exist; the default path falls back
    /// to built-in defaults when absent, since those are the developer
    /// variant.
    pub fn load() -> Result<Self, PipelineError> {
        match env::var(CONFIG_ENV) {
            Ok(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(PipelineError::Config(format!(
                        "{CONFIG_ENV} points at {} which does not exist",
                        path.display()
                    )));
                }
                Self::load_from(&path)
            }
            Err(_) => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::load_from(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, PipelineError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| PipelineError::Config(format!("failed to read {}: {e}", path.display())))?;
        let mut config: Config = serde_json::from_str(&raw)
            .map_err(|e| PipelineError::Config(format!("failed to parse {}: {e}", path.display())))?;
        config.sanitize();
        Ok(config)
    }

    fn sanitize(&mut self) {
        self.top_n = self.top_n.clamp(1, 100);
        self.query_timeout_ms = self.query_timeout_ms.clamp(100, 60_000);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_developer_variant() {
        let config = Config::default();
        assert_eq!(config.top_n, 10);
        assert_eq!(config.timestamp_format, TimestampFormat::Date);
        assert_eq!(config.store_path, PathBuf::from("scores.db"));
    }

    #[test]
    fn parses_production_variant_and_fills_missing_fields() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("scoreboard.json");
        fs::write(
            &path,
            r#"{
                "storePath": "/var/lib/game/scores.db",
                "templatePath": "/etc/scoreboard/leaderboard.html",
                "outputPath": "/srv/www/leaderboard.html",
                "timestampFormat": "utc-iso8601"
            }"#,
        )
        .expect("write config");

        let config = Config::load_from(&path).expect("load config");
        assert_eq!(config.store_path, PathBuf::from("/var/lib/game/scores.db"));
        assert_eq!(config.timestamp_format, TimestampFormat::UtcIso8601);
        assert_eq!(config.top_n, 10, "missing topN falls back to default");
        assert_eq!(config.query_timeout_ms, 5_000);
    }

    #[test]
    fn sanitize_clamps_out_of_range_values() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("scoreboard.json");
        fs::write(&path, r#"{ "topN": 0, "queryTimeoutMs": 999999999 }"#).expect("write config");

        let config = Config::load_from(&path).expect("load config");
        assert_eq!(config.top_n, 1);
        assert_eq!(config.query_timeout_ms, 60_000);
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("scoreboard.json");
        fs::write(&path, "{ not json").expect("write config");

        let err = Config::load_from(&path).expect_err("parse should fail");
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn timestamp_formats_match_their_deployment_variants() {
        let now = DateTime::parse_from_rfc3339("2026-08-07T14:30:05Z")
            .expect("timestamp")
            .with_timezone(&Utc);
        assert_eq!(TimestampFormat::Date.render(now), "2026-08-07");
        assert_eq!(
            TimestampFormat::UtcIso8601.render(now),
            "2026-08-07T14:30:05Z"
        );
    }
}
