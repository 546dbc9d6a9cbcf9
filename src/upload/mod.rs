//! Album upload
//!
//! Mirrors a captured album's folder tree into an upload destination.
//! Uploads are per file: a failed photo is recorded and skipped, the run
//! keeps going, and the final report lists what did not make it. An album
//! with no photos uploads successfully as zero of zero.

use crate::core::error::{PhotoDocError, Result};
use crate::media::{MediaHandle, MediaIndex};
use log::{info, warn};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Sends one file to the upload destination
pub trait Uploader {
    /// Make sure a destination folder exists before files land in it
    fn ensure_folder(&mut self, relative: &Path) -> Result<()>;

    /// Upload one file to `relative` within the destination
    fn upload(&mut self, source: &Path, relative: &Path) -> Result<()>;
}

/// Progress of a running upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// Photos attempted so far, successful or not
    pub attempted: u32,
    pub total: u32,
}

/// Outcome of an upload run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    /// Photos that reached the destination
    pub uploaded: u32,
    /// Photos the run attempted
    pub total: u32,
    /// Filenames that failed, in attempt order
    pub failed: Vec<String>,
}

impl UploadReport {
    /// Whether every attempted photo made it
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Directory-backed uploader: copies files into a destination directory,
/// e.g. a mounted share or sync folder
#[derive(Debug, Clone)]
pub struct DirUploader {
    destination: PathBuf,
}

impl DirUploader {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

impl Uploader for DirUploader {
    fn ensure_folder(&mut self, relative: &Path) -> Result<()> {
        fs::create_dir_all(self.destination.join(relative))?;
        Ok(())
    }

    fn upload(&mut self, source: &Path, relative: &Path) -> Result<()> {
        let filename = relative
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        let upload_err = |message: String| PhotoDocError::UploadError {
            filename: filename.clone(),
            message,
        };

        let target = self.destination.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| upload_err(e.to_string()))?;
        }
        fs::copy(source, &target).map_err(|e| upload_err(e.to_string()))?;
        Ok(())
    }
}

/// Whether a stored photo belongs to the given album scope.
///
/// Photos with no album live directly under the media root, so the
/// no-album scope matches relative paths whose first component is a
/// subfolder rather than an album directory containing one.
fn in_album(handle: &MediaHandle, album: Option<&str>) -> bool {
    match album {
        Some(album) => handle
            .relative
            .components()
            .next()
            .is_some_and(|c| c == Component::Normal(album.as_ref())),
        None => handle.relative.components().count() <= 2,
    }
}

/// All stored photos of an album scope, in path order
pub fn album_photos<I: MediaIndex>(index: &I, album: Option<&str>) -> Result<Vec<MediaHandle>> {
    let mut photos: Vec<MediaHandle> = index
        .photos(None)?
        .into_iter()
        .filter(|handle| in_album(handle, album))
        .collect();
    // Mirror the tree in path order, not capture order
    photos.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(photos)
}

/// Upload every photo of an album, continuing past per-file failures.
///
/// `on_progress` is called after each attempted photo. Only an index
/// failure aborts the run; everything else lands in the report.
pub fn upload_album<I, U, F>(
    index: &I,
    uploader: &mut U,
    album: Option<&str>,
    mut on_progress: F,
) -> Result<UploadReport>
where
    I: MediaIndex,
    U: Uploader,
    F: FnMut(UploadProgress),
{
    let photos = album_photos(index, album)?;
    let total = photos.len() as u32;
    let mut uploaded = 0;
    let mut failed = Vec::new();

    info!(
        "Uploading {} photo(s) from {}",
        total,
        album.unwrap_or("<no album>")
    );

    for (attempted, handle) in photos.iter().enumerate() {
        let outcome = handle
            .relative
            .parent()
            .map(|folder| uploader.ensure_folder(folder))
            .unwrap_or(Ok(()))
            .and_then(|_| uploader.upload(&handle.path, &handle.relative));

        match outcome {
            Ok(()) => uploaded += 1,
            Err(e) => {
                warn!("Upload failed for {}: {}", handle.relative.display(), e);
                failed.push(handle.filename().to_string());
            }
        }

        on_progress(UploadProgress {
            attempted: attempted as u32 + 1,
            total,
        });
    }

    Ok(UploadReport {
        uploaded,
        total,
        failed,
    })
}
