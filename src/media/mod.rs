//! Media storage
//!
//! Captured photos land in a folder tree under a configurable media root:
//!
//! ```text
//! <media_root>/<album>/<numbered subfolder>/<short-code filename>
//! ```
//!
//! Photos captured with no active album go directly under the root. The
//! two seams are traits: `MediaCaptureService` stores one photo at a
//! planned destination, `MediaIndex` lists what has been stored, newest
//! first, optionally filtered by a path substring. `FsMediaStore` is the
//! filesystem implementation of both.

use crate::core::error::{PhotoDocError, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Planned location of one photo, relative to the media root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureDestination {
    /// Album the photo belongs to, if one is active
    pub album: Option<String>,
    /// Numbered subfolder within the album, e.g. "1. Overview"
    pub subfolder: String,
    /// Routed filename, e.g. "OV(2).jpg"
    pub filename: String,
}

impl CaptureDestination {
    /// Path of this destination relative to the media root
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        if let Some(album) = &self.album {
            path.push(album);
        }
        path.push(&self.subfolder);
        path.push(&self.filename);
        path
    }
}

/// One stored photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle {
    /// Full path of the stored file
    pub path: PathBuf,
    /// Path relative to the media root, used for filtering and mirroring
    pub relative: PathBuf,
    /// When the file was stored
    pub created: DateTime<Utc>,
}

impl MediaHandle {
    /// Filename of the stored photo
    pub fn filename(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// Stores one captured photo at its planned destination
pub trait MediaCaptureService {
    fn store_photo(&mut self, source: &Path, destination: &CaptureDestination)
        -> Result<MediaHandle>;
}

/// Lists stored photos, newest first
pub trait MediaIndex {
    /// All stored photos whose relative path contains `path_filter`
    /// (all photos when `None`), ordered by creation time descending.
    fn photos(&self, path_filter: Option<&str>) -> Result<Vec<MediaHandle>>;
}

/// Filesystem-backed media store
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Media root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn handle_for(&self, path: PathBuf) -> Result<MediaHandle> {
        let relative = path
            .strip_prefix(&self.root)
            .unwrap_or(&path)
            .to_path_buf();
        let metadata = fs::metadata(&path)?;
        let created = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        Ok(MediaHandle {
            path,
            relative,
            created,
        })
    }
}

impl MediaCaptureService for FsMediaStore {
    fn store_photo(
        &mut self,
        source: &Path,
        destination: &CaptureDestination,
    ) -> Result<MediaHandle> {
        let target = self.root.join(destination.relative_path());
        let capture_err = |message: String| PhotoDocError::CaptureError {
            filename: destination.filename.clone(),
            message,
        };

        if !source.is_file() {
            return Err(capture_err(format!(
                "source file not found: {}",
                source.display()
            )));
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| capture_err(e.to_string()))?;
        }

        fs::copy(source, &target).map_err(|e| capture_err(e.to_string()))?;
        debug!("Stored photo at {}", target.display());

        self.handle_for(target)
    }
}

impl MediaIndex for FsMediaStore {
    fn photos(&self, path_filter: Option<&str>) -> Result<Vec<MediaHandle>> {
        let mut photos = Vec::new();

        if !self.root.exists() {
            return Ok(photos);
        }

        for entry in WalkDir::new(&self.root).into_iter() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under media root: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let handle = self.handle_for(entry.into_path())?;
            if let Some(filter) = path_filter {
                if !handle.relative.to_string_lossy().contains(filter) {
                    continue;
                }
            }
            photos.push(handle);
        }

        // Newest first, filename as a stable tie-breaker
        photos.sort_by(|a, b| {
            b.created
                .cmp(&a.created)
                .then_with(|| a.relative.cmp(&b.relative))
        });

        Ok(photos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn destination(album: Option<&str>, subfolder: &str, filename: &str) -> CaptureDestination {
        CaptureDestination {
            album: album.map(str::to_string),
            subfolder: subfolder.to_string(),
            filename: filename.to_string(),
        }
    }

    fn source_file(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, b"jpeg bytes").unwrap();
        path
    }

    #[test]
    fn test_relative_path_with_and_without_album() {
        let with = destination(Some("ShipA"), "1. Overview", "OV.jpg");
        assert_eq!(
            with.relative_path(),
            PathBuf::from("ShipA/1. Overview/OV.jpg")
        );

        let without = destination(None, "2. Inspection", "M(3).jpg");
        assert_eq!(
            without.relative_path(),
            PathBuf::from("2. Inspection/M(3).jpg")
        );
    }

    #[test]
    fn test_store_photo_creates_folder_tree() {
        let dir = TempDir::new().unwrap();
        let source = source_file(&dir, "input.jpg");
        let mut store = FsMediaStore::new(dir.path().join("photos"));

        let handle = store
            .store_photo(&source, &destination(Some("ShipA"), "3. BatchA", "SEAL.jpg"))
            .unwrap();

        assert!(handle.path.is_file());
        assert_eq!(handle.filename(), "SEAL.jpg");
        assert_eq!(handle.relative, PathBuf::from("ShipA/3. BatchA/SEAL.jpg"));
        assert_eq!(fs::read(&handle.path).unwrap(), b"jpeg bytes");
    }

    #[test]
    fn test_store_photo_missing_source_is_a_capture_error() {
        let dir = TempDir::new().unwrap();
        let mut store = FsMediaStore::new(dir.path().join("photos"));

        let result = store.store_photo(
            Path::new("/nonexistent/input.jpg"),
            &destination(None, "1. Overview", "OV.jpg"),
        );
        assert!(matches!(
            result,
            Err(PhotoDocError::CaptureError { filename, .. }) if filename == "OV.jpg"
        ));
    }

    #[test]
    fn test_photos_filters_by_path_substring() {
        let dir = TempDir::new().unwrap();
        let source = source_file(&dir, "input.jpg");
        let mut store = FsMediaStore::new(dir.path().join("photos"));

        store
            .store_photo(&source, &destination(Some("ShipA"), "1. Overview", "OV.jpg"))
            .unwrap();
        store
            .store_photo(&source, &destination(Some("ShipB"), "1. Overview", "OV.jpg"))
            .unwrap();

        let all = store.photos(None).unwrap();
        assert_eq!(all.len(), 2);

        let ship_a = store.photos(Some("ShipA")).unwrap();
        assert_eq!(ship_a.len(), 1);
        assert!(ship_a[0].relative.starts_with("ShipA"));
    }

    #[test]
    fn test_photos_on_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FsMediaStore::new(dir.path().join("never-created"));
        assert!(store.photos(None).unwrap().is_empty());
    }

    #[test]
    fn test_photos_sorted_newest_first() {
        let dir = TempDir::new().unwrap();
        let source = source_file(&dir, "input.jpg");
        let mut store = FsMediaStore::new(dir.path().join("photos"));

        store
            .store_photo(&source, &destination(None, "1. Overview", "OV.jpg"))
            .unwrap();
        // File timestamps can be coarse, leave a clear gap between stores
        std::thread::sleep(std::time::Duration::from_millis(1100));
        store
            .store_photo(&source, &destination(None, "1. Overview", "OV(2).jpg"))
            .unwrap();

        let photos = store.photos(None).unwrap();
        assert_eq!(photos[0].filename(), "OV(2).jpg");
        assert_eq!(photos[1].filename(), "OV.jpg");
    }
}
