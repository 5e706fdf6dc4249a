//! On-disk page cache
//!
//! Pages are stored under the cache directory at their root-relative path,
//! so `<root>/java.base/java/util/List.html` lands at
//! `<cache>/java.base/java/util/List.html`. Content is immutable per URL,
//! which is why there is no invalidation and no locking.

use crate::HarvestError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// File name used when a URL path names a directory
const DIRECTORY_INDEX: &str = "index.html";

#[derive(Debug)]
pub struct PageCache {
    directory: PathBuf,
    write_seq: AtomicU64,
}

impl PageCache {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            write_seq: AtomicU64::new(0),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Maps a root-relative URL path to its cache file
    ///
    /// # Examples
    ///
    /// ```
    /// use javadoc_harvest::crawler::PageCache;
    /// use std::path::Path;
    ///
    /// let cache = PageCache::new("cache");
    /// assert_eq!(cache.path_for("java.base/module-summary.html"), Path::new("cache/java.base/module-summary.html"));
    /// assert_eq!(cache.path_for(""), Path::new("cache/index.html"));
    /// ```
    pub fn path_for(&self, relative: &str) -> PathBuf {
        let mut path = self.directory.clone();
        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        if relative.is_empty() || relative.ends_with('/') {
            path.push(DIRECTORY_INDEX);
        }
        path
    }

    /// Reads a cached page; `Ok(None)` when it isn't cached yet
    pub async fn read(&self, path: &Path) -> Result<Option<String>, HarvestError> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(HarvestError::Cache {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Writes a page, creating intermediate directories
    ///
    /// The content goes to a temporary sibling first and is renamed into
    /// place, so a concurrent reader sees either nothing or the whole page.
    pub async fn store(&self, path: &Path, content: &str) -> Result<(), HarvestError> {
        let cache_error = |source| HarvestError::Cache {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(cache_error)?;
        }

        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = path.with_file_name(format!(
            ".{}.{}.{}.part",
            file_name,
            std::process::id(),
            seq
        ));

        tokio::fs::write(&temp_path, content)
            .await
            .map_err(cache_error)?;
        tokio::fs::rename(&temp_path, path)
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    /// Deletes the whole cache directory; a missing directory is fine
    ///
    /// A run that aborts mid-write can leave `.<name>.<pid>.<seq>.part` files
    /// behind. They are never read as pages, and this removes them too.
    pub async fn clear(&self) -> Result<(), HarvestError> {
        match tokio::fs::remove_dir_all(&self.directory).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(HarvestError::Cache {
                path: self.directory.clone(),
                source,
            }),
        }
    }
}
