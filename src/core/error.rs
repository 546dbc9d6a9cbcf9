//! Error types for the shipment photo tool
//!
//! Classification and routing never fail hard: unknown labels fall back to
//! the "Other" folder and a passthrough filename. The errors here cover the
//! few operations the user can actually get wrong (album names, container
//! counts) plus I/O from the persistence and media layers.

use thiserror::Error;

/// Main error type for the shipment photo tool
#[derive(Error, Debug)]
pub enum PhotoDocError {
    /// Container count of zero supplied to tier resolution
    #[error("Container count must be at least 1 (got {0})")]
    InvalidContainerCount(u32),

    /// Album creation with an empty name
    #[error("Album name cannot be empty")]
    EmptyAlbumName,

    /// Album name contains characters reserved for storage keys or paths
    #[error("Album name '{0}' contains reserved characters")]
    InvalidAlbumName(String),

    /// Album creation with a name that already exists
    #[error("Album '{0}' already exists")]
    DuplicateAlbumName(String),

    /// Operation referenced an album that was never created
    #[error("No album named '{0}'")]
    UnknownAlbum(String),

    /// Container index outside the current sample-container range
    #[error("Container index {index} is out of range (1..={max})")]
    ContainerIndexOutOfRange { index: u32, max: u32 },

    /// Container folder name cannot be empty
    #[error("Container name cannot be empty")]
    EmptyContainerName,

    /// Material settings are required but have not been configured
    #[error("No material configured. Set a product type and container count first.")]
    MaterialNotConfigured,

    /// General I/O error
    #[error("IO error: {0}")]
    IoError(String),

    /// A photo could not be placed into the media store
    #[error("Capture failed for '{filename}': {message}")]
    CaptureError { filename: String, message: String },

    /// A photo could not be pushed to the upload destination
    #[error("Upload failed for '{filename}': {message}")]
    UploadError { filename: String, message: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PhotoDocError>;

impl From<std::io::Error> for PhotoDocError {
    fn from(err: std::io::Error) -> Self {
        PhotoDocError::IoError(err.to_string())
    }
}
