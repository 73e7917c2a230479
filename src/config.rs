use serde::Deserialize;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Application name, used for the data directory
pub const APP_NAME: &str = "dbdie-version";

/// Log filter used when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub catalog: PathConfig,
    pub models: PathConfig,
    pub log: LogConfig,
}

/// Location of a JSON data file
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PathConfig {
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load the configuration file, falling back to defaults when it is absent.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.catalog
            .path
            .clone()
            .unwrap_or_else(|| data_dir().join("catalog.json"))
    }

    pub fn models_path(&self) -> PathBuf {
        self.models
            .path
            .clone()
            .unwrap_or_else(|| data_dir().join("models.json"))
    }
}

/// Returns the path to the data directory for dbdie-version.
/// Uses $XDG_DATA_HOME/dbdie-version if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/dbdie-version,
/// or ./dbdie-version if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("dbdv.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn app_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<AppConfig>(json!({
            "catalog": {
                "path": "/srv/dbdie/catalog.json"
            }
        }))
        .unwrap();

        assert_eq!(
            result.catalog.path,
            Some(PathBuf::from("/srv/dbdie/catalog.json"))
        );
        assert_eq!(result.models, PathConfig::default());
        assert_eq!(result.log, LogConfig::default());
    }

    #[test]
    fn app_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<AppConfig>(json!({
            "catalog": { "path": "/srv/catalog.json" },
            "models": { "path": "/srv/models.json" },
            "log": { "level": "debug" }
        }))
        .unwrap();

        assert_eq!(
            result,
            AppConfig {
                catalog: PathConfig {
                    path: Some(PathBuf::from("/srv/catalog.json"))
                },
                models: PathConfig {
                    path: Some(PathBuf::from("/srv/models.json"))
                },
                log: LogConfig {
                    level: "debug".to_string()
                },
            }
        );
        assert_eq!(result.catalog_path(), PathBuf::from("/srv/catalog.json"));
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn load_rejects_invalid_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/dbdie-version"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/dbdie-version"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./dbdie-version"));
    }
}
