//! Configuration management with validation and defaults
//!
//! Settings come from built-in defaults, an optional TOML file, and
//! `LUCKYPAIR_*` environment variables, in that order of precedence.

use crate::errors::{ConfigError, LuckyPairResult};
use crate::games::DEFAULT_SUPPLY_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level service configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LuckyPairConfig {
    pub game: GameConfig,
    pub maintenance: MaintenanceConfig,
    pub api: ApiConfig,
    pub monitoring: MonitoringConfig,
}

/// Game store sizing
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub supply_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            supply_capacity: DEFAULT_SUPPLY_CAPACITY,
        }
    }
}

/// Timing of the background supply maintenance loops
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// How often the stale-draw check runs
    pub stale_check_interval_ms: u64,
    /// Inactivity after which the top pair is evicted
    pub stale_threshold_ms: u64,
    /// How often the supply is refilled to capacity
    pub resupply_interval_ms: u64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            stale_check_interval_ms: 1_000,
            stale_threshold_ms: 10_000,
            resupply_interval_ms: 60_000,
        }
    }
}

impl MaintenanceConfig {
    /// Reject timings the maintenance loops cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stale_check_interval_ms == 0 {
            return Err(ConfigError::invalid("maintenance.stale_check_interval_ms", "must be > 0"));
        }
        if self.stale_threshold_ms == 0 {
            return Err(ConfigError::invalid("maintenance.stale_threshold_ms", "must be > 0"));
        }
        if self.resupply_interval_ms == 0 {
            return Err(ConfigError::invalid("maintenance.resupply_interval_ms", "must be > 0"));
        }
        if self.stale_threshold_ms < self.stale_check_interval_ms {
            return Err(ConfigError::invalid(
                "maintenance.stale_threshold_ms",
                "must not be shorter than stale_check_interval_ms",
            ));
        }
        Ok(())
    }

    pub fn stale_check_interval(&self) -> Duration {
        Duration::from_millis(self.stale_check_interval_ms)
    }

    pub fn stale_threshold(&self) -> Duration {
        Duration::from_millis(self.stale_threshold_ms)
    }

    pub fn resupply_interval(&self) -> Duration {
        Duration::from_millis(self.resupply_interval_ms)
    }
}

/// HTTP API configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            allowed_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub log_level: LogLevel,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(ConfigError::invalid("monitoring.log_level", format!("unknown level '{}'", other))),
        }
    }
}

impl LuckyPairConfig {
    /// Short timings for local experiments and tests
    pub fn fast_maintenance() -> Self {
        Self {
            maintenance: MaintenanceConfig {
                stale_check_interval_ms: 50,
                stale_threshold_ms: 500,
                resupply_interval_ms: 3_000,
            },
            monitoring: MonitoringConfig {
                log_level: LogLevel::Debug,
            },
            ..Default::default()
        }
    }

    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.supply_capacity == 0 {
            return Err(ConfigError::invalid("game.supply_capacity", "must be > 0"));
        }

        self.maintenance.validate()?;

        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::invalid("api.request_timeout_secs", "must be > 0"));
        }

        Ok(())
    }
}

/// Configuration loader with environment variable support
#[derive(Default)]
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and process environment
    pub fn load(&self) -> LuckyPairResult<LuckyPairConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` in place of the process environment
    pub fn load_with_env<F>(&self, lookup: F) -> LuckyPairResult<LuckyPairConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match self.config_path {
            Some(ref path) => Self::load_from_file(path)?,
            None => LuckyPairConfig::default(),
        };

        apply_env_overrides(&mut config, lookup)?;
        config.validate()?;

        Ok(config)
    }

    fn load_from_file(path: &str) -> Result<LuckyPairConfig, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to parse TOML: {}", e)))
    }

    /// Save configuration as TOML
    pub fn save(config: &LuckyPairConfig, path: &str) -> LuckyPairResult<()> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: String) -> Result<T, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::invalid(key, format!("cannot parse '{}'", raw)))
}

fn apply_env_overrides<F>(config: &mut LuckyPairConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("LUCKYPAIR_SUPPLY_CAPACITY") {
        config.game.supply_capacity = parse_var("LUCKYPAIR_SUPPLY_CAPACITY", v)?;
    }
    if let Some(v) = lookup("LUCKYPAIR_STALE_CHECK_INTERVAL_MS") {
        config.maintenance.stale_check_interval_ms = parse_var("LUCKYPAIR_STALE_CHECK_INTERVAL_MS", v)?;
    }
    if let Some(v) = lookup("LUCKYPAIR_STALE_THRESHOLD_MS") {
        config.maintenance.stale_threshold_ms = parse_var("LUCKYPAIR_STALE_THRESHOLD_MS", v)?;
    }
    if let Some(v) = lookup("LUCKYPAIR_RESUPPLY_INTERVAL_MS") {
        config.maintenance.resupply_interval_ms = parse_var("LUCKYPAIR_RESUPPLY_INTERVAL_MS", v)?;
    }
    if let Some(v) = lookup("LUCKYPAIR_API_HOST") {
        config.api.host = v;
    }
    if let Some(v) = lookup("LUCKYPAIR_API_PORT") {
        config.api.port = parse_var("LUCKYPAIR_API_PORT", v)?;
    }
    if let Some(v) = lookup("LUCKYPAIR_LOG_LEVEL") {
        config.monitoring.log_level = v.parse()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = LuckyPairConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.game.supply_capacity, 100);
        assert_eq!(config.maintenance.stale_check_interval(), Duration::from_secs(1));
        assert_eq!(config.maintenance.stale_threshold(), Duration::from_secs(10));
        assert_eq!(config.maintenance.resupply_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_fast_maintenance_config_is_valid() {
        assert!(LuckyPairConfig::fast_maintenance().validate().is_ok());
    }

    #[test]
    fn test_invalid_config_validation() {
        let mut config = LuckyPairConfig::default();
        config.game.supply_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = LuckyPairConfig::default();
        config.maintenance.resupply_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = LuckyPairConfig::default();
        config.maintenance.stale_threshold_ms = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[game]\nsupply_capacity = 8\n\n[maintenance]\nresupply_interval_ms = 5000\n\n[monitoring]\nlog_level = \"debug\""
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_path(file.path())
            .load_with_env(no_env)
            .unwrap();

        assert_eq!(config.game.supply_capacity, 8);
        assert_eq!(config.maintenance.resupply_interval_ms, 5_000);
        assert_eq!(config.maintenance.stale_threshold_ms, 10_000);
        assert_eq!(config.monitoring.log_level, LogLevel::Debug);
        assert_eq!(config.api.port, 3000);
    }

    #[test]
    fn test_save_and_load_config() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let mut original = LuckyPairConfig::default();
        original.api.port = 4000;
        ConfigLoader::save(&original, path).unwrap();

        let loaded = ConfigLoader::new().with_path(path).load_with_env(no_env).unwrap();
        assert_eq!(loaded.api.port, 4000);
        assert_eq!(loaded.game.supply_capacity, original.game.supply_capacity);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("LUCKYPAIR_SUPPLY_CAPACITY", "12"),
            ("LUCKYPAIR_API_PORT", "8081"),
            ("LUCKYPAIR_LOG_LEVEL", "WARN"),
        ]
        .into_iter()
        .collect();

        let config = ConfigLoader::new()
            .load_with_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.game.supply_capacity, 12);
        assert_eq!(config.api.port, 8081);
        assert_eq!(config.monitoring.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_bad_env_value_rejected() {
        let result = ConfigLoader::new().load_with_env(|key| {
            (key == "LUCKYPAIR_API_PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_fails() {
        let result = ConfigLoader::new()
            .with_path("/nonexistent/luckypair.toml")
            .load_with_env(no_env);
        assert!(result.is_err());
    }
}
