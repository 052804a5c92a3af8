//! Application configuration: database location, pool sizing, logging.
//!
//! Values come from `.env`, `CAMPUS_*` environment variables and an optional
//! file named by `CAMPUS_CONFIG` (format inferred from its extension).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Pool size used when `CAMPUS_POOL_MAX_SIZE` is unset.
pub const DEFAULT_POOL_MAX_SIZE: u32 = 10;

const ENV_PREFIX: &str = "CAMPUS";
const CONFIG_PATH_VAR: &str = "CAMPUS_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// SQLite file path. Read from CAMPUS_DATABASE_PATH. Unset means an
    /// in-memory database that lives as long as the process.
    #[serde(default)]
    pub database_path: Option<String>,

    /// Upper bound on pooled connections. Read from CAMPUS_POOL_MAX_SIZE.
    #[serde(default)]
    pub pool_max_size: Option<u32>,

    /// One of trace|debug|info|warn|error. Read from CAMPUS_LOG_LEVEL.
    #[serde(default)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Read from CAMPUS_LOG_DIR.
    /// Unset means logs go to stderr.
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Fill an empty database with generated demo data on startup.
    /// Read from CAMPUS_SEED_DEMO_DATA.
    #[serde(default)]
    pub seed_demo_data: Option<bool>,
}

impl AppConfig {
    /// Loads `.env`, the optional `CAMPUS_CONFIG` file and `CAMPUS_*`
    /// environment variables, later sources overriding earlier ones.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let mut builder = Config::builder();
        if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
            builder = builder.add_source(File::with_name(&path));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads configuration from a single file, ignoring the environment.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let cfg: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects values that cannot produce a working registry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_max_size == Some(0) {
            return Err(ConfigError::Message(
                "pool_max_size must be at least 1".to_string(),
            ));
        }
        if let Some(path) = self.database_path.as_deref() {
            if path.trim().is_empty() {
                return Err(ConfigError::Message(
                    "database_path cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn pool_max_size_or_default(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Returns the configured level, or the build-mode default.
    pub fn log_level_or_default(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(crate::logging::default_log_level())
    }

    pub fn seed_demo_data_or_default(&self) -> bool {
        self.seed_demo_data.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DEFAULT_POOL_MAX_SIZE};
    use std::io::Write;

    #[test]
    fn defaults_apply_when_fields_are_unset() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.pool_max_size_or_default(), DEFAULT_POOL_MAX_SIZE);
        assert!(!cfg.seed_demo_data_or_default());
        assert!(!cfg.log_level_or_default().is_empty());
    }

    #[test]
    fn configured_log_level_wins_over_default() {
        let cfg = AppConfig {
            log_level: Some("error".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(cfg.log_level_or_default(), "error");
        assert_eq!(
            AppConfig::default().log_level_or_default(),
            crate::logging::default_log_level()
        );
    }

    #[test]
    fn validate_rejects_zero_pool_size() {
        let cfg = AppConfig {
            pool_max_size: Some(0),
            ..AppConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_database_path() {
        let cfg = AppConfig {
            database_path: Some("  ".to_string()),
            ..AppConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_file_reads_toml_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campus.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "database_path = \"registry.db\"\npool_max_size = 4\nseed_demo_data = true"
        )
        .unwrap();

        let cfg = AppConfig::load_file(&path).unwrap();
        assert_eq!(cfg.database_path.as_deref(), Some("registry.db"));
        assert_eq!(cfg.pool_max_size_or_default(), 4);
        assert!(cfg.seed_demo_data_or_default());
        assert_eq!(cfg.log_dir, None);
    }
}
