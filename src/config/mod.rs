use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_currency() -> String {
    "$".to_string()
}
fn default_chart_width() -> usize {
    40
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            currency: default_currency(),
            chart_width: default_chart_width(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("workhours")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".workhours")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("workhours.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("workhours.sqlite")
    }

    /// `~` is expanded; relative names live in the config directory.
    pub fn resolve_database(name: &str) -> PathBuf {
        let p = crate::utils::path::expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Load configuration from file, or return defaults if missing or unreadable
    pub fn load() -> Self {
        let path = Self::config_file();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path)
            .map_err(AppError::from)
            .and_then(|content| Self::parse(&content))
        {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "configuration ignored, using defaults");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Create the config directory and file (unless `is_test`); returns the
    /// configuration that was written.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let database = match custom_db {
            Some(name) => Self::resolve_database(&name),
            None => Self::database_file(),
        };

        let config = Config {
            database: database.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
