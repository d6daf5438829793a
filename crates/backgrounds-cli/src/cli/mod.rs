//! CLI for the backgrounds downloader.

mod commands;

use anyhow::Result;
use backgrounds_core::config::{self, BackgroundsConfig};
use clap::Parser;
use std::path::PathBuf;

use commands::run_download;

/// Discover the current Chromecast backgrounds and download the new ones.
#[derive(Debug, Parser)]
#[command(name = "backgrounds")]
#[command(about = "Desktop wallpaper/background downloader", long_about = None)]
pub struct Cli {
    /// Increase logging verbosity.
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to the XDG state directory instead of stderr.
    #[arg(long)]
    pub log_file: bool,

    /// Download with up to N workers (default from config, normally 1).
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Page to scrape instead of the configured one.
    #[arg(long, value_name = "URL")]
    pub page_url: Option<String>,

    /// Config file to use instead of `~/.config/backgrounds/config.toml`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Target directory to save downloaded backgrounds.
    pub target_dir: PathBuf,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let cfg = match &self.config {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let cfg = self.apply_overrides(cfg);
        run_download(&cfg, &self.target_dir)
    }

    /// Command-line flags win over config file values.
    fn apply_overrides(&self, mut cfg: BackgroundsConfig) -> BackgroundsConfig {
        if let Some(url) = &self.page_url {
            cfg.page_url = url.clone();
        }
        if let Some(jobs) = self.jobs {
            cfg.jobs = jobs;
        }
        cfg.jobs = cfg.jobs.max(1);
        cfg
    }
}
