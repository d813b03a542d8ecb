// src/fetch.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use bytes::Bytes;
use reqwest::Client;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info};

use crate::config::Config;

/// HTTP client with an on-disk response cache, replacing repeat fetches of
/// the same page with a local read. Only successful responses are cached, so
/// a populated cache replays exactly what a clean run would have produced.
pub struct CachedClient {
    client: Client,
    cache_dir: PathBuf,
}

impl CachedClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(CachedClient {
            client,
            cache_dir: PathBuf::from(&config.cache_dir),
        })
    }

    /// GET a page and decode the body as UTF-8 regardless of what the
    /// response headers claim. Any network or HTTP-status failure is logged
    /// with the underlying error and collapsed to `None`, so callers skip the
    /// affected unit of work instead of aborting the run.
    pub async fn page_text(&self, url: &str) -> Option<String> {
        let body = self.cached_get(url, "html").await?;
        Some(String::from_utf8_lossy(&body).into_owned())
    }

    /// Binary variant for archive downloads. Same failure contract.
    pub async fn page_bytes(&self, url: &str) -> Option<Vec<u8>> {
        self.cached_get(url, "bin").await
    }

    async fn cached_get(&self, url: &str, ext: &str) -> Option<Vec<u8>> {
        let path = self.entry_path(url, ext);
        if let Ok(body) = fs::read(&path) {
            debug!(url, "cache hit");
            return Some(body);
        }
        match self.get_checked(url).await {
            Ok(body) => {
                if let Err(e) = self.store(&path, &body) {
                    debug!(url, error = %e, "cache write failed");
                }
                Some(body.to_vec())
            }
            Err(e) => {
                error!(url, error = ?e, "page fetch failed");
                None
            }
        }
    }

    async fn get_checked(&self, url: &str) -> reqwest::Result<Bytes> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.bytes().await
    }

    fn store(&self, path: &Path, body: &[u8]) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)?;
        fs::write(path, body)
    }

    fn entry_path(&self, url: &str, ext: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.{ext}", cache_key(url)))
    }

    pub fn clear_cache(&self) -> std::io::Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            info!(dir = %self.cache_dir.display(), "cache cleared");
        }
        Ok(())
    }
}

pub fn cache_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}
