use directories::ProjectDirs;
use eyre::Result;
use folio_engine::{DEFAULT_CATALOG_URL, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CatalogConfig {
    pub url: String,
    /// Request timeout in seconds, 0 to wait indefinitely
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BrowseConfig {
    pub page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
            timeout_secs: 30,
            max_attempts: 1,
            backoff_ms: 500,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: get_default_data_dir()
                .join("wishlist")
                .to_string_lossy()
                .to_string(),
        }
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.get(),
        }
    }
}

impl Config {
    pub fn get_config_path() -> PathBuf {
        get_default_config_dir().join("config.json")
    }

    /// Load from `path`, writing the defaults there first if it does not exist.
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub async fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["catalog", "url"] => {
                url::Url::parse(value)
                    .map_err(|e| eyre::eyre!("Invalid catalog URL '{}': {}", value, e))?;
                self.catalog.url = value.to_string();
            }
            ["catalog", "timeout_secs"] => {
                self.catalog.timeout_secs = parse_number(value)?;
            }
            ["catalog", "max_attempts"] => {
                let attempts: u32 = parse_number(value)?;
                if attempts == 0 {
                    return Err(eyre::eyre!("catalog.max_attempts must be at least 1"));
                }
                self.catalog.max_attempts = attempts;
            }
            ["catalog", "backoff_ms"] => {
                self.catalog.backoff_ms = parse_number(value)?;
            }
            ["storage", "path"] => {
                self.storage.path = value.to_string();
            }
            ["browse", "page_size"] => {
                let page_size: usize = parse_number(value)?;
                if page_size == 0 {
                    return Err(eyre::eyre!("browse.page_size must be at least 1"));
                }
                self.browse.page_size = page_size;
            }
            _ => {
                return Err(eyre::eyre!("Unknown configuration key: {}", key));
            }
        }

        Ok(())
    }

    pub fn get_value(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();

        let value = match parts.as_slice() {
            ["catalog", "url"] => self.catalog.url.clone(),
            ["catalog", "timeout_secs"] => self.catalog.timeout_secs.to_string(),
            ["catalog", "max_attempts"] => self.catalog.max_attempts.to_string(),
            ["catalog", "backoff_ms"] => self.catalog.backoff_ms.to_string(),
            ["storage", "path"] => self.storage.path.clone(),
            ["browse", "page_size"] => self.browse.page_size.to_string(),
            _ => {
                return Err(eyre::eyre!("Unknown configuration key: {}", key));
            }
        };

        Ok(value)
    }

    pub fn show_all(&self) -> String {
        format!(
            "Configuration:\n\
             Catalog:\n\
             ├─ url: {}\n\
             ├─ timeout_secs: {}\n\
             ├─ max_attempts: {}\n\
             └─ backoff_ms: {}\n\
             Storage:\n\
             └─ path: {}\n\
             Browse:\n\
             └─ page_size: {}",
            self.catalog.url,
            self.catalog.timeout_secs,
            self.catalog.max_attempts,
            self.catalog.backoff_ms,
            self.storage.path,
            self.browse.page_size,
        )
    }

    pub async fn reset_at(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(path).await?;
        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| eyre::eyre!("Invalid numeric value: {}", value))
}

/// Get the default configuration directory
fn get_default_config_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("org", "folio", "folio") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        // Fallback to current directory if we can't determine project dirs
        PathBuf::from(".folio").join("config")
    }
}

/// Get the default data directory
pub fn get_default_data_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("org", "folio", "folio") {
        proj_dirs.data_dir().to_path_buf()
    } else {
        PathBuf::from(".folio").join("data")
    }
}
