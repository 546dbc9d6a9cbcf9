//! Capture flow
//!
//! The small state machine behind a multi-photo capture run: idle, or
//! capturing one label with a planned photo count. Every saved photo
//! increments the label's counter and either keeps the flow open (more
//! photos needed) or returns it to idle. Cancelling discards the pending
//! photo without touching the counter, so a paused run resumes at the
//! same capture number.

use crate::core::albums::AlbumStore;
use crate::core::error::Result;
use crate::core::routing;
use crate::media::CaptureDestination;
use crate::store::SettingsStore;
use log::{debug, info};

/// State of an in-progress capture run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaptureFlow {
    /// No capture in progress
    #[default]
    Idle,
    /// Capturing photos for one label until `planned` are taken
    Capturing { label: String, planned: u32 },
}

/// What happened after a photo was saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureStep {
    /// More photos are needed for this label; `next` is the upcoming
    /// capture number
    Continue { label: String, next: u32 },
    /// The planned count is reached; the flow is idle again
    Completed { label: String, taken: u32 },
}

impl CaptureFlow {
    /// Start idle
    pub fn new() -> Self {
        CaptureFlow::Idle
    }

    /// Whether no capture run is open
    pub fn is_idle(&self) -> bool {
        matches!(self, CaptureFlow::Idle)
    }

    /// Label and planned count of the open run, if any
    pub fn current(&self) -> Option<(&str, u32)> {
        match self {
            CaptureFlow::Idle => None,
            CaptureFlow::Capturing { label, planned } => Some((label, *planned)),
        }
    }

    /// Open a capture run for `label` with a planned photo count.
    /// A planned count of zero completes immediately on the first save.
    pub fn begin(&mut self, label: impl Into<String>, planned: u32) {
        let label = label.into();
        debug!("Capture run started: '{}' ({} planned)", label, planned);
        *self = CaptureFlow::Capturing { label, planned };
    }

    /// Record one successfully saved photo against the active album scope.
    ///
    /// Returns `None` when the flow is idle (nothing to record).
    pub fn photo_saved<S: SettingsStore>(
        &mut self,
        albums: &mut AlbumStore<S>,
    ) -> Option<CaptureStep> {
        let (label, planned) = match self {
            CaptureFlow::Idle => return None,
            CaptureFlow::Capturing { label, planned } => (label.clone(), *planned),
        };

        let taken = albums.record_capture(&label);
        if taken >= planned {
            *self = CaptureFlow::Idle;
            info!("Capture run for '{}' complete ({} taken)", label, taken);
            Some(CaptureStep::Completed { label, taken })
        } else {
            Some(CaptureStep::Continue {
                label,
                next: taken + 1,
            })
        }
    }

    /// Abandon the open run. The pending photo is discarded, not counted.
    ///
    /// Returns the label the run was paused at, if one was open.
    pub fn cancel(&mut self) -> Option<String> {
        match std::mem::take(self) {
            CaptureFlow::Idle => None,
            CaptureFlow::Capturing { label, .. } => {
                debug!("Capture run for '{}' cancelled", label);
                Some(label)
            }
        }
    }
}

/// Plan where the next capture of `label` will be stored.
///
/// Combines the folder router, the container-name working set and the
/// label's counter (for the sequence number of multi-count categories).
/// Requires configured material settings, since folder routing depends on
/// the resolved sample-container count.
pub fn destination_for<S: SettingsStore>(
    albums: &AlbumStore<S>,
    label: &str,
) -> Result<CaptureDestination> {
    let required = albums.required_containers()?;
    let subfolder = routing::subfolder_for(label, required, albums.container_names());
    let filename = routing::filename_for(label, Some(albums.next_capture(label)));

    Ok(CaptureDestination {
        album: albums.active().map(str::to_string),
        subfolder,
        filename,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ProductType;
    use crate::store::MemoryStore;

    fn albums() -> AlbumStore<MemoryStore> {
        let mut albums = AlbumStore::new(MemoryStore::new());
        albums.create("A").unwrap();
        albums.select(Some("A")).unwrap();
        albums.set_material(ProductType::Occ, 4).unwrap();
        albums
    }

    #[test]
    fn test_flow_runs_to_completion() {
        let mut albums = albums();
        let mut flow = CaptureFlow::new();
        flow.begin("Overview", 3);

        assert_eq!(
            flow.photo_saved(&mut albums),
            Some(CaptureStep::Continue {
                label: "Overview".to_string(),
                next: 2
            })
        );
        assert_eq!(
            flow.photo_saved(&mut albums),
            Some(CaptureStep::Continue {
                label: "Overview".to_string(),
                next: 3
            })
        );
        assert_eq!(
            flow.photo_saved(&mut albums),
            Some(CaptureStep::Completed {
                label: "Overview".to_string(),
                taken: 3
            })
        );
        assert!(flow.is_idle());
        assert_eq!(albums.capture_count("Overview"), 3);
    }

    #[test]
    fn test_cancel_does_not_count() {
        let mut albums = albums();
        let mut flow = CaptureFlow::new();
        flow.begin("Overview", 3);
        flow.photo_saved(&mut albums);

        assert_eq!(flow.cancel(), Some("Overview".to_string()));
        assert!(flow.is_idle());
        // Only the saved photo counted, not the cancelled one
        assert_eq!(albums.capture_count("Overview"), 1);
        // Nothing to record while idle
        assert_eq!(flow.photo_saved(&mut albums), None);
        assert_eq!(albums.capture_count("Overview"), 1);
    }

    #[test]
    fn test_flow_resumes_past_counts() {
        let mut albums = albums();
        albums.record_capture("Overview");
        albums.record_capture("Overview");

        // Re-opening the run after two earlier captures completes on the
        // third photo
        let mut flow = CaptureFlow::new();
        flow.begin("Overview", 3);
        assert_eq!(
            flow.photo_saved(&mut albums),
            Some(CaptureStep::Completed {
                label: "Overview".to_string(),
                taken: 3
            })
        );
    }

    #[test]
    fn test_destination_for_fixed_label() {
        let albums = albums();
        let dest = destination_for(&albums, "Overview").unwrap();
        assert_eq!(dest.album.as_deref(), Some("A"));
        assert_eq!(dest.subfolder, "1. Overview");
        // First capture is unnumbered
        assert_eq!(dest.filename, "OV.jpg");
    }

    #[test]
    fn test_destination_numbering_follows_counter() {
        let mut albums = albums();
        albums.record_capture("Overview");
        let dest = destination_for(&albums, "Overview").unwrap();
        assert_eq!(dest.filename, "OV(2).jpg");
    }

    #[test]
    fn test_destination_for_container_label() {
        let mut albums = albums();
        albums.rename_container(1, "BatchA").unwrap();
        let dest = destination_for(&albums, "Container 1 - Seal").unwrap();
        assert_eq!(dest.subfolder, "3. BatchA");
        assert_eq!(dest.filename, "SEAL.jpg");
    }

    #[test]
    fn test_destination_requires_material() {
        let albums = AlbumStore::new(MemoryStore::new());
        assert!(destination_for(&albums, "Overview").is_err());
    }
}
