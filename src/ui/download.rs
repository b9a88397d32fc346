//! Save a piece's full image, or hand it to the browser when that fails.

use poll_promise::Promise;
use std::path::PathBuf;

use crate::config::GALLERY;
#[cfg(not(target_arch = "wasm32"))]
use crate::config::PATHS;

pub struct DownloadJob {
    pub url: String,
    promise: Promise<Result<PathBuf, String>>,
}

impl DownloadJob {
    pub fn start(url: String, collection_id: &str) -> Self {
        let file_name = download_file_name(collection_id, &url);

        #[cfg(not(target_arch = "wasm32"))]
        let promise = {
            let url = url.clone();
            Promise::spawn_thread("download", move || {
                let path = PathBuf::from(PATHS.download_dir).join(file_name);
                fetch_to_disk(&url, &path)
                    .map(|_| path)
                    .map_err(|e| format!("{:#}", e))
            })
        };

        // No filesystem in the browser; the caller falls back to a new tab
        #[cfg(target_arch = "wasm32")]
        let promise = Promise::from_ready(Err(format!(
            "direct download of {} unavailable in the browser",
            file_name
        )));

        Self { url, promise }
    }

    /// `None` while still running.
    pub fn poll(&self) -> Option<&Result<PathBuf, String>> {
        self.promise.ready()
    }
}

/// `<prefix>-<collection>.<ext>`, extension taken from the URL path when it has one.
pub fn download_file_name(collection_id: &str, url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let last_segment = path.rsplit('/').next().unwrap_or("");
    let ext = last_segment
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| GALLERY.download.default_extension.to_string());
    format!("{}-{}.{}", GALLERY.download.file_prefix, collection_id, ext)
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_to_disk(url: &str, path: &std::path::Path) -> anyhow::Result<()> {
    use anyhow::Context;
    use std::time::Duration;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(GALLERY.download.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;
    let bytes = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("Failed to fetch {}", url))?
        .bytes()
        .context("Failed to read response body")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_keeps_url_extension() {
        assert_eq!(
            download_file_name("patience", "https://media.example/a/b.JPG?w=100"),
            "stranger-solemn-patience.jpg"
        );
        assert_eq!(
            download_file_name("lost", "https://ordinals.com/content/abc123i0"),
            "stranger-solemn-lost.png"
        );
        assert_eq!(
            download_file_name("x", "https://ipfs.io/ipfs/Qm.niceandlongbutnotanext"),
            "stranger-solemn-x.png"
        );
    }
}
