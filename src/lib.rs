//! Shipment Photo Tool Library
//!
//! A checklist-driven engine for field photo documentation of
//! waste-material shipments. From a product type and a container count it
//! derives the exact list of required photos, routes each captured photo
//! into a numbered folder tree under a short-code filename, tracks
//! progress per album, and mirrors finished albums to an upload
//! destination.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`core`] - Core functionality: checklist derivation, routing rules,
//!   album and counter state, the capture flow, configuration and errors
//! - [`store`] - Persistent settings store (in-memory and JSON file backed)
//! - [`media`] - Captured photo storage and listing on the filesystem
//! - [`upload`] - Mirroring an album's folder tree to a destination
//! - [`cli`] - Command-line interface (only used by the binary)
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use shipment_photo_tool::core::albums::AlbumStore;
//! use shipment_photo_tool::core::catalog::{catalog_for, ProductType};
//! use shipment_photo_tool::store::FileStore;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = FileStore::open(Path::new(".shipment_photos_state.json"))?;
//!     let mut albums = AlbumStore::new(store);
//!
//!     albums.create("Shipment A")?;
//!     albums.select(Some("Shipment A"))?;
//!     albums.set_material(ProductType::Occ, 12)?;
//!
//!     // 12 containers resolve to sample tier II-B: 3 sample containers
//!     for category in catalog_for(ProductType::Occ, 12)? {
//!         println!(
//!             "{} ({}/{})",
//!             category.label,
//!             albums.capture_count(&category.label),
//!             category.min_count
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod media;
pub mod store;
pub mod upload;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
