use std::{fs, path::{Path, PathBuf}};
use serde::{Serialize, Deserialize};
use anyhow::{self, Context};

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG: &str = "bankbook.toml";
pub const DEFAULT_STORE: &str = "accounts.json";

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "StorageConfig::default_path")]
    pub path: PathBuf
}

impl StorageConfig {
    fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_STORE)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig { path: StorageConfig::default_path() }
    }
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig
}

impl AppConfig {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str(content)
            .with_context(|| "failed to parse config file")?;
        return Ok(config);
    }

    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let filepath = filepath.as_ref();
        let file_content = fs::read_to_string(filepath)
            .with_context(|| format!("failed to read config file {}", filepath.display()))?;
        return AppConfig::parse(&file_content);
    }

    /// Reads `explicit` if given. Otherwise reads `DEFAULT_CONFIG` when it
    /// exists, and falls back to the built-in defaults when it does not.
    pub fn resolve(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => AppConfig::read(path),
            None if Path::new(DEFAULT_CONFIG).exists() => AppConfig::read(DEFAULT_CONFIG),
            None => Ok(AppConfig::default())
        }
    }

    /// Store location, with `store_override` taking precedence over the file.
    pub fn store_path(&self, store_override: Option<&Path>) -> PathBuf {
        store_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.storage.path.clone())
    }
}
