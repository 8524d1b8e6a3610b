use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub const TOKEN_ENV: &str = "RWORKLOG_API_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
    #[serde(default)]
    pub mapping_rules: Vec<MappingRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Which entries the day reconciler may move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Import mapper names whose entries only carry daily totals.
    #[serde(default = "default_adjustable_mappers")]
    pub adjustable_mappers: Vec<String>,
    /// Regex matched against the source file name.
    #[serde(default)]
    pub adjustable_file_pattern: Option<String>,
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

/// Pre-configured name → identifier mapping. A rule without mapper
/// applies to every mapper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MappingRule {
    #[serde(default)]
    pub mapper: Option<String>,
    pub project: String,
    pub activity: String,
    pub skill: String,
    pub project_id: i64,
    pub activity_id: i64,
    pub skill_id: i64,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_adjustable_mappers() -> Vec<String> {
    vec!["daily_totals".to_string()]
}
fn default_max_passes() -> usize {
    5
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            adjustable_mappers: default_adjustable_mappers(),
            adjustable_file_pattern: None,
            max_passes: default_max_passes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            separator_char: default_separator_char(),
            remote: RemoteConfig::default(),
            reconcile: ReconcileConfig::default(),
            mapping_rules: Vec::new(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rworklog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rworklog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rworklog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rworklog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// The API token can be overridden from the environment.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            Self::from_yaml(&content)?
        } else {
            Config::default()
        };

        if let Ok(token) = env::var(TOKEN_ENV)
            && !token.trim().is_empty()
        {
            cfg.remote.api_token = token;
        }

        Ok(cfg)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let mut cfg: Config = serde_yaml::from_str(content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Top-level keys missing from the YAML file (they fall back to defaults).
    pub fn missing_fields(content: &str) -> AppResult<Vec<String>> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
        let map = yaml
            .as_mapping()
            .ok_or_else(|| AppError::Config("configuration root is not a mapping".into()))?;

        let expected = serde_yaml::to_value(Config::default())?;
        let mut missing = Vec::new();

        if let Some(expected_map) = expected.as_mapping() {
            for key in expected_map.keys() {
                if !map.contains_key(key)
                    && let Some(k) = key.as_str()
                {
                    missing.push(k.to_string());
                }
            }
        }

        Ok(missing)
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
