//! Album registry and per-album settings
//!
//! An album is a named grouping of captured photos with its own material
//! type, container count and container-name overrides. [`AlbumStore`] owns
//! the settings store and keeps the container-name working set for the
//! active album in memory; switching albums rebuilds that working set from
//! scratch so names can never leak from one album into another.
//!
//! Deleting an album removes its material settings and container names but
//! keeps its capture counters: the photos already taken stay in the media
//! store, and their numbering must not restart if the album name is reused.

use crate::core::catalog::{resolve_tier, ProductType};
use crate::core::counters;
use crate::core::error::{PhotoDocError, Result};
use crate::core::routing::ContainerNames;
use crate::store::{keys, SettingsStore};
use log::{debug, info};
use std::collections::BTreeSet;

/// Album registry plus the working state for the active album
pub struct AlbumStore<S: SettingsStore> {
    store: S,
    active: Option<String>,
    container_names: ContainerNames,
}

impl<S: SettingsStore> AlbumStore<S> {
    /// Open the registry over a settings store, restoring the previously
    /// active album and its container-name working set.
    pub fn new(store: S) -> Self {
        let active = store.get_string(keys::ACTIVE_ALBUM);
        let container_names = load_container_names(&store, active.as_deref());
        Self {
            store,
            active,
            container_names,
        }
    }

    /// Borrow the underlying settings store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the underlying settings store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the registry and return the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    /// All album names, in sorted order
    pub fn albums(&self) -> Vec<String> {
        self.store
            .get_string_set(keys::ALBUMS)
            .map(|set| set.into_iter().collect())
            .unwrap_or_default()
    }

    /// Whether an album with this name exists
    pub fn exists(&self, name: &str) -> bool {
        self.store
            .get_string_set(keys::ALBUMS)
            .map(|set| set.contains(name))
            .unwrap_or(false)
    }

    /// Create a new album. Fails on empty, reserved-character or duplicate
    /// names; never touches the active selection.
    pub fn create(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(PhotoDocError::EmptyAlbumName);
        }
        if name.chars().any(keys::is_reserved) {
            return Err(PhotoDocError::InvalidAlbumName(name.to_string()));
        }

        let mut albums: BTreeSet<String> =
            self.store.get_string_set(keys::ALBUMS).unwrap_or_default();
        if !albums.insert(name.to_string()) {
            return Err(PhotoDocError::DuplicateAlbumName(name.to_string()));
        }
        self.store.put_string_set(keys::ALBUMS, &albums);
        info!("Created album '{}'", name);
        Ok(())
    }

    /// Delete an album and its material settings and container names.
    ///
    /// Capture counters for the album are retained on purpose: the photos
    /// remain in the media store and keep their numbering.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let mut albums: BTreeSet<String> =
            self.store.get_string_set(keys::ALBUMS).unwrap_or_default();
        if !albums.remove(name) {
            return Err(PhotoDocError::UnknownAlbum(name.to_string()));
        }
        self.store.put_string_set(keys::ALBUMS, &albums);

        self.store.remove(&keys::material_type(Some(name)));
        self.store.remove(&keys::container_count(Some(name)));
        for i in 1..=keys::MAX_CONTAINERS {
            self.store.remove(&keys::container_name(Some(name), i));
        }

        if self.active.as_deref() == Some(name) {
            self.store.remove(keys::ACTIVE_ALBUM);
            self.active = None;
            self.container_names = load_container_names(&self.store, None);
        }

        info!("Deleted album '{}' (capture counters retained)", name);
        Ok(())
    }

    /// Currently selected album, if any
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Select an album (or none, for the default working scope).
    ///
    /// The container-name working set is fully rebuilt from the new scope's
    /// saved overrides; an index the new album never named falls back to
    /// its default rather than keeping the previous album's name.
    pub fn select(&mut self, album: Option<&str>) -> Result<()> {
        match album {
            Some(name) => {
                if !self.exists(name) {
                    return Err(PhotoDocError::UnknownAlbum(name.to_string()));
                }
                self.store.put_string(keys::ACTIVE_ALBUM, name);
                self.active = Some(name.to_string());
            }
            None => {
                self.store.remove(keys::ACTIVE_ALBUM);
                self.active = None;
            }
        }

        self.container_names = load_container_names(&self.store, self.active.as_deref());
        debug!(
            "Selected album {:?}, reloaded {} container name(s)",
            self.active.as_deref().unwrap_or("<none>"),
            self.container_names.iter().count()
        );
        Ok(())
    }

    /// Material settings for the active scope, if configured
    pub fn material(&self) -> Option<(ProductType, u32)> {
        let scope = self.active.as_deref();
        let product = self
            .store
            .get_string(&keys::material_type(scope))?
            .parse::<ProductType>()
            .ok()?;
        let count = self.store.get_int(&keys::container_count(scope), 0);
        if count == 0 {
            return None;
        }
        Some((product, count))
    }

    /// Persist material settings for the active scope
    pub fn set_material(&mut self, product: ProductType, total_containers: u32) -> Result<()> {
        if total_containers == 0 {
            return Err(PhotoDocError::InvalidContainerCount(total_containers));
        }
        let scope = self.active.clone();
        self.store
            .put_string(&keys::material_type(scope.as_deref()), product.as_str());
        self.store
            .put_int(&keys::container_count(scope.as_deref()), total_containers);
        Ok(())
    }

    /// Resolved sample-container count for the active scope's material
    pub fn required_containers(&self) -> Result<u32> {
        let (_, total) = self.material().ok_or(PhotoDocError::MaterialNotConfigured)?;
        Ok(resolve_tier(total)?.required_containers())
    }

    /// Container-name working set for the active scope
    pub fn container_names(&self) -> &ContainerNames {
        &self.container_names
    }

    /// Set the display name for a sample container of the active scope
    pub fn rename_container(&mut self, index: u32, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(PhotoDocError::EmptyContainerName);
        }
        let max = self.required_containers()?;
        if index < 1 || index > max {
            return Err(PhotoDocError::ContainerIndexOutOfRange { index, max });
        }
        let scope = self.active.clone();
        self.store
            .put_string(&keys::container_name(scope.as_deref(), index), name);
        self.container_names.set(index, name);
        Ok(())
    }

    /// Reset a container of the active scope to its default display name
    pub fn reset_container(&mut self, index: u32) {
        let scope = self.active.clone();
        self.store
            .remove(&keys::container_name(scope.as_deref(), index));
        self.container_names.reset(index);
    }

    /// Record one successful capture for a label in the active scope
    pub fn record_capture(&mut self, label: &str) -> u32 {
        let scope = self.active.clone();
        counters::increment(&mut self.store, scope.as_deref(), label)
    }

    /// Captures taken so far for a label in the active scope
    pub fn capture_count(&self, label: &str) -> u32 {
        counters::current_count(&self.store, self.active.as_deref(), label)
    }

    /// Capture number the next photo of a label will get
    pub fn next_capture(&self, label: &str) -> u32 {
        counters::next_count(&self.store, self.active.as_deref(), label)
    }
}

/// Rebuild a container-name working set from an album scope's saved
/// overrides. Indices without a saved override are simply absent.
fn load_container_names<S: SettingsStore>(store: &S, album: Option<&str>) -> ContainerNames {
    (1..=keys::MAX_CONTAINERS)
        .filter_map(|i| {
            store
                .get_string(&keys::container_name(album, i))
                .map(|name| (i, name))
        })
        .collect()
}
