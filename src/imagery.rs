//! Weather imagery download
//!
//! Every URL is fetched concurrently, each in its own task, and written to
//! the output directory under the last segment of the URL path. The batch
//! fails if any single download fails, but a failing request never cancels
//! its siblings.

use std::path::{Path, PathBuf};

use futures::future::join_all;
use reqwest::{Client, StatusCode, Url};
use tracing::{info, warn};

use crate::{Result, TelexError};

/// Output directory used when none is configured
pub const DEFAULT_OUTPUT_DIR: &str = "images";

#[derive(Debug, Clone, Default)]
pub struct DownloadConfig {
    pub urls: Vec<String>,
    pub output_dir: Option<PathBuf>,
}

impl DownloadConfig {
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}

/// File name for a URL: the last non-empty segment of its path.
pub fn file_name(url: &str) -> Result<String> {
    let parsed =
        Url::parse(url).map_err(|e| TelexError::parse(format!("Invalid URL '{url}': {e}")))?;
    parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| TelexError::parse(format!("No file name in URL '{url}'")))
}

/// Download every URL of `config` and return the written paths in URL order.
#[tracing::instrument(name = "download_images", skip_all, fields(count = config.urls.len()))]
pub async fn download_images(client: &Client, config: &DownloadConfig) -> Result<Vec<PathBuf>> {
    let dir = config.output_dir();
    tokio::fs::create_dir_all(&dir).await?;

    let tasks = config.urls.iter().map(|url| {
        let client = client.clone();
        let url = url.clone();
        let dir = dir.clone();
        tokio::spawn(async move { download_one(&client, &url, &dir).await })
    });

    let mut written = Vec::new();
    let mut first_error = None;
    for outcome in join_all(tasks).await {
        let result = outcome
            .map_err(|e| TelexError::network(format!("Download task failed: {e}")))
            .and_then(|inner| inner);
        match result {
            Ok(path) => written.push(path),
            Err(e) => {
                warn!("Image download failed: {}", e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => {
            info!("Downloaded {} image(s) to {:?}", written.len(), dir);
            Ok(written)
        }
    }
}

async fn download_one(client: &Client, url: &str, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(file_name(url)?);

    let response = client.get(url).send().await?;

    if response.status() != StatusCode::OK {
        return Err(TelexError::http_status(url, response.status().as_u16()));
    }

    let body = response.bytes().await?;
    tokio::fs::write(&path, &body).await?;
    Ok(path)
}
