use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Vendor page embedding the background metadata.
pub const DEFAULT_PAGE_URL: &str = "https://clients3.google.com/cast/chromecast/home/v/c9541b08";

/// Global configuration loaded from `~/.config/backgrounds/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundsConfig {
    /// Page scraped for the embedded image list.
    #[serde(default = "default_page_url")]
    pub page_url: String,
    /// Connect timeout for every request, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout, in seconds. Image bodies are buffered, so keep
    /// this generous.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional User-Agent override (None = libcurl default).
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Number of concurrent download workers (1 = sequential).
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

fn default_page_url() -> String {
    DEFAULT_PAGE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    15
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_jobs() -> usize {
    1
}

impl Default for BackgroundsConfig {
    fn default() -> Self {
        Self {
            page_url: default_page_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            jobs: default_jobs(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("backgrounds")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BackgroundsConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] with an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<BackgroundsConfig> {
    if !path.exists() {
        let default_cfg = BackgroundsConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: BackgroundsConfig = toml::from_str(&data)?;
    Ok(cfg)
}
