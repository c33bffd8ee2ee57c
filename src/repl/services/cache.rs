//! # Asset Cache
//!
//! Versioned on-disk cache for same-origin responses. Each version tag
//! gets its own directory under the cache root; activating a version purges
//! every other one. Entries are keyed by URL.

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::path::{Path, PathBuf};

/// Site paths pre-cached by `install`
pub const ASSET_MANIFEST: &[&str] = &[
    "/",
    "/profile-card/",
    "/profile-card/index.html",
    "/profile-card/profile-card.css",
    "/profile-card/index.js",
    "/profile-card/projects.html",
    "/profile-card/contact.html",
    "/profile-card/blog.html",
    "/profile-card/gallery.html",
    "/profile-card/skills.html",
    "/profile-card/timeline.html",
    "/profile-card/manifest.json",
];

#[derive(Debug, Clone)]
pub struct AssetCache {
    root: PathBuf,
    version: String,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn version_dir(&self) -> PathBuf {
        self.root.join(&self.version)
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        self.version_dir().join(URL_SAFE_NO_PAD.encode(url))
    }

    /// Delete every cache version other than ours; returns how many went
    pub fn activate(&self) -> Result<usize> {
        if !self.root.exists() {
            return Ok(0);
        }
        let mut purged = 0;
        for entry in std::fs::read_dir(&self.root)
            .with_context(|| format!("listing {}", self.root.display()))?
        {
            let entry = entry?;
            if entry.file_name() != self.version.as_str() && entry.path().is_dir() {
                tracing::info!("Purging stale cache {}", entry.path().display());
                std::fs::remove_dir_all(entry.path())?;
                purged += 1;
            }
        }
        Ok(purged)
    }

    pub fn get(&self, url: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(url)).ok()
    }

    pub fn put(&self, url: &str, body: &str) -> Result<()> {
        let dir = self.version_dir();
        std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        std::fs::write(self.entry_path(url), body)
            .with_context(|| format!("caching {url}"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
