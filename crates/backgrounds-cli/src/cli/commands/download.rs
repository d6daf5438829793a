//! `backgrounds <target>`: discover, then download everything new.

use anyhow::{Context, Result};
use backgrounds_core::config::BackgroundsConfig;
use backgrounds_core::{run_pipeline, CurlTransport, Downloader, PageFetcher};
use std::path::Path;

pub fn run_download(cfg: &BackgroundsConfig, target_dir: &Path) -> Result<()> {
    let transport = CurlTransport::from_config(cfg);
    let fetcher = PageFetcher::new(&transport, cfg.page_url.as_str());
    let downloader = Downloader::new(&transport);

    tracing::info!("Discovering and downloading chromecast backgrounds...");
    let discovery = fetcher
        .discover()
        .with_context(|| format!("discovery from {} failed", fetcher.page_url()))?;
    let summary = run_pipeline(discovery, &downloader, target_dir, cfg.jobs);

    let absolute = std::path::absolute(target_dir).unwrap_or_else(|_| target_dir.to_path_buf());
    tracing::info!("Finished! Check {} for images.", absolute.display());
    println!(
        "{} downloaded, {} already present, {} unavailable, {} failed, {} candidates skipped",
        summary.downloaded,
        summary.skipped_existing,
        summary.skipped_status,
        summary.failed,
        summary.candidates_skipped
    );
    Ok(())
}
