//! Core functionality module
//!
//! This module contains the core business logic for the shipment photo
//! tool, including checklist derivation, folder and filename routing,
//! album and counter state, the capture flow, configuration management
//! and error handling.
//!
//! # Submodules
//!
//! - `albums` - Album registry, material settings and container names
//! - `capture` - Capture flow state machine and photo import
//! - `catalog` - Checklist derivation from product type and container count
//! - `config` - Configuration loading, saving, and management
//! - `counters` - Per-album capture progress counters
//! - `error` - Error types and result aliases
//! - `routing` - Short-code filenames and numbered subfolder routing

pub mod albums;
pub mod capture;
pub mod catalog;
pub mod config;
pub mod counters;
pub mod error;
pub mod routing;
