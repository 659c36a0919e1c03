use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_RESULTS_PER_PROFILE: u32 = 40;
pub const DEFAULT_DATABASE_FILE_NAME: &str = "places.sqlite";
pub const PROFILES_ROOT_ENV: &str = "PLACESFIND_PROFILES_ROOT";

const APP_DIR_NAME: &str = "placesfind";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Which part of the places store a query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    Both,
    BookmarksOnly,
    HistoryOnly,
}

impl SearchMode {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "both" | "all" => Some(Self::Both),
            "bookmarks" | "bookmarks_only" | "favorites" => Some(Self::BookmarksOnly),
            "history" | "history_only" => Some(Self::HistoryOnly),
            _ => None,
        }
    }

    /// Boolean pair form used by hosts that expose two checkboxes.
    pub fn from_flags(bookmarks: bool, history: bool) -> Option<Self> {
        match (bookmarks, history) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::BookmarksOnly),
            (false, true) => Some(Self::HistoryOnly),
            (false, false) => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::BookmarksOnly => "bookmarks",
            Self::HistoryOnly => "history",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search_mode: SearchMode,
    pub max_results_per_profile: u32,
    pub profiles_root: PathBuf,
    pub database_file_name: String,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_mode: SearchMode::Both,
            max_results_per_profile: DEFAULT_MAX_RESULTS_PER_PROFILE,
            profiles_root: default_profiles_root(),
            database_file_name: DEFAULT_DATABASE_FILE_NAME.to_string(),
            config_path: stable_app_data_dir().join(CONFIG_FILE_NAME),
        }
    }
}

/// Per-user directory for placesfind's own files (config, logs).
pub fn stable_app_data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

pub fn default_profiles_root() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        dirs::config_dir()
            .unwrap_or_default()
            .join("Mozilla")
            .join("Firefox")
            .join("Profiles")
    }

    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .unwrap_or_default()
            .join("Firefox")
            .join("Profiles")
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        dirs::home_dir()
            .unwrap_or_default()
            .join(".mozilla")
            .join("firefox")
    }
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.max_results_per_profile == 0 {
        return Err("max_results_per_profile must be a positive integer".into());
    }

    if cfg.profiles_root.as_os_str().is_empty() {
        return Err("profiles_root is required".into());
    }

    let name = cfg.database_file_name.trim();
    if name.is_empty() {
        return Err("database_file_name is required".into());
    }
    if Path::new(name).components().count() != 1 || name.contains(['/', '\\']) {
        return Err(format!("database_file_name must be a bare file name: '{name}'"));
    }

    Ok(())
}

/// Reads the TOML config at `path` (or the default location). A missing file yields defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Config::default().config_path);

    let mut config = match std::fs::read_to_string(&config_path) {
        Ok(raw) => toml::from_str::<Config>(&raw).map_err(|source| ConfigError::Parse {
            path: config_path.clone(),
            source,
        })?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(source) => {
            return Err(ConfigError::Io {
                path: config_path,
                source,
            })
        }
    };
    config.config_path = config_path;

    if let Ok(root) = std::env::var(PROFILES_ROOT_ENV) {
        if !root.trim().is_empty() {
            config.profiles_root = PathBuf::from(root.trim());
        }
    }

    validate(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    validate(cfg).map_err(ConfigError::Invalid)?;
    if let Some(parent) = cfg.config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let raw = toml::to_string_pretty(cfg)?;
    std::fs::write(&cfg.config_path, raw).map_err(|source| ConfigError::Io {
        path: cfg.config_path.clone(),
        source,
    })
}
