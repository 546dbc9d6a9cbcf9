//! Capture progress counters
//!
//! One counter per (album, category label) pair, persisted through the
//! settings store. Counters only ever move forward: a successful capture
//! increments by one, a cancelled capture leaves them untouched, and
//! deleting an album deliberately keeps its counters because the photos
//! themselves stay in the media store.

use crate::store::{keys, SettingsStore};
use log::debug;

/// Photos captured so far for a label within an album scope (0 if none)
pub fn current_count<S: SettingsStore>(store: &S, album: Option<&str>, label: &str) -> u32 {
    store.get_int(&keys::counter(album, label), 0)
}

/// Capture number the next photo of this label will get
pub fn next_count<S: SettingsStore>(store: &S, album: Option<&str>, label: &str) -> u32 {
    current_count(store, album, label) + 1
}

/// Record one successful capture; returns the new count
pub fn increment<S: SettingsStore>(store: &mut S, album: Option<&str>, label: &str) -> u32 {
    let key = keys::counter(album, label);
    let count = store.get_int(&key, 0) + 1;
    store.put_int(&key, count);
    debug!(
        "Capture count for '{}' in {:?} is now {}",
        label,
        album.unwrap_or("<no album>"),
        count
    );
    count
}
