use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{fs, path::PathBuf};

use crate::model::RecentSearch;

/// Upper bound on remembered searches; the oldest entry is evicted beyond it.
pub const MAX_RECENT: usize = 6;

/// Bounded, deduplicated, most-recent-first list of past searches, kept in
/// lock-step with its on-disk JSON representation: every [`record`] persists
/// the full list before returning.
///
/// [`record`]: RecentSearches::record
#[derive(Debug)]
pub struct RecentSearches {
    path: PathBuf,
    entries: Vec<RecentSearch>,
}

impl RecentSearches {
    /// Load the list persisted at `path`. A missing file means a first run
    /// and a corrupt one is discarded with a warning; both degrade to an
    /// empty list rather than failing.
    pub fn load(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(list) => list,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "discarding corrupt recent-search list");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self { path, entries }
    }

    /// Load from the platform data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::load(Self::store_file_path()?))
    }

    /// Path to the persisted list.
    pub fn store_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("recent_searches.json"))
    }

    /// Insert or refresh the entry for `city` (case-insensitive identity),
    /// move it to the front, evict beyond [`MAX_RECENT`], and persist.
    pub fn record(&mut self, city: &str, temperature_c: f64) -> Result<()> {
        let needle = city.to_lowercase();
        self.entries.retain(|e| e.city.to_lowercase() != needle);

        self.entries.insert(
            0,
            RecentSearch {
                city: city.to_string(),
                temperature_c: temperature_c.round() as i32,
            },
        );
        self.entries.truncate(MAX_RECENT);

        self.persist()
    }

    /// Ordered view, most recent first.
    pub fn entries(&self) -> &[RecentSearch] {
        &self.entries
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string(&self.entries)
            .context("Failed to serialize recent searches")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write recent searches: {}", self.path.display()))?;

        Ok(())
    }
}
