//! Command-line argument definitions
//!
//! This module defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Checklist-driven photo documentation for waste-material shipments
#[derive(Parser, Debug)]
#[command(name = "shipment-photos")]
#[command(version = "0.3.0")]
#[command(
    about = "Derive the required photo checklist for a shipment, route captured photos into numbered folders, and mirror albums to an upload destination",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Media root directory for captured photos (overrides config)
    #[arg(short, long)]
    pub media_root: Option<PathBuf>,

    /// Settings state file (overrides config)
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (overrides config)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the photo checklist for the active album with capture progress
    ///
    /// This is also the default when no subcommand is given.
    Checklist,

    /// Set the material settings for the active album
    SetMaterial {
        /// Product type: OCC, SPRN or ALUMINIUM
        product: String,

        /// Total number of containers in the shipment
        containers: u32,
    },

    /// Show the active album, material settings and resolved sample tier
    Status,

    /// Manage albums
    Album {
        #[command(subcommand)]
        album_command: AlbumCommands,
    },

    /// Manage sample-container display names of the active album
    Containers {
        #[command(subcommand)]
        container_command: ContainerCommands,
    },

    /// Capture photos for a checklist item
    ///
    /// Each file is routed into the album's folder tree under its
    /// short-code filename and counted against the item's progress.
    Capture {
        /// Checklist item label, e.g. "Overview" or "Container 1 - Seal"
        #[arg(short, long)]
        label: String,

        /// Photo file(s) to capture, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List captured photos, newest first
    Photos {
        /// Only show photos whose path contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Upload the active album to the configured destination
    Upload {
        /// Destination directory (overrides config)
        #[arg(short, long)]
        destination: Option<PathBuf>,
    },

    /// Manage the configuration file
    ///
    /// The config file is stored at:
    /// - Windows: %APPDATA%\shipment_photo_tool\config.toml
    /// - Linux/macOS: ~/.config/shipment_photo_tool/config.toml
    Config {
        /// Show the config file path
        #[arg(long)]
        path: bool,

        /// Reset config to defaults (creates a fresh config file)
        #[arg(long)]
        reset: bool,
    },

    /// Generate a configuration file at a specific location
    GenerateConfig {
        /// Output path for the config file (defaults to standard location)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show current configuration
    ShowConfig,
}

#[derive(Subcommand, Debug)]
pub enum AlbumCommands {
    /// List all albums
    List,

    /// Create a new album
    Create {
        /// Album name
        name: String,
    },

    /// Delete an album (capture counters are retained)
    Delete {
        /// Album name
        name: String,

        /// Delete without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Select the active album, or clear the selection when no name is given
    Select {
        /// Album name (omit to work outside any album)
        name: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContainerCommands {
    /// List the sample containers and their display names
    List,

    /// Set the display name of a sample container
    Rename {
        /// Container index (1-based)
        index: u32,

        /// Display name, e.g. a container number like "MSKU1234567"
        name: String,
    },

    /// Reset a sample container to its default numeric display name
    Reset {
        /// Container index (1-based)
        index: u32,
    },
}
