//! Command handler implementations
//!
//! This module contains the implementation of all CLI commands.

use crate::cli::progress::{
    print_error, print_header, print_info, print_success, print_warning, UploadProgressBar,
};
use crate::cli::{AlbumCommands, Args, Commands, ContainerCommands};
use crate::core::albums::AlbumStore;
use crate::core::capture::{destination_for, CaptureFlow, CaptureStep};
use crate::core::catalog::{catalog_for, resolve_tier, PhotoCategory, ProductType};
use crate::core::config::{get_config_path, init_config, Config};
use crate::media::{FsMediaStore, MediaCaptureService, MediaIndex};
use crate::store::{FileStore, SettingsStore};
use crate::upload::{self, DirUploader, UploadReport};
use anyhow::{anyhow, bail, Result};
use dialoguer::Confirm;
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;

/// Run the appropriate command based on CLI arguments
pub fn run_command(args: &Args, config: &Config) -> Result<()> {
    // Config-only commands never touch the state file
    match &args.command {
        Some(Commands::Config { path, reset }) => return handle_config_command(*path, *reset),
        Some(Commands::GenerateConfig { output }) => return generate_config_file(output.clone()),
        Some(Commands::ShowConfig) => {
            show_config(config);
            return Ok(());
        }
        _ => {}
    }

    let store = FileStore::open(&config.storage.state_file)?;
    let mut albums = AlbumStore::new(store);
    let mut media = FsMediaStore::new(&config.storage.media_root);

    match &args.command {
        None | Some(Commands::Checklist) => {
            show_checklist(&albums)?;
        }
        Some(Commands::SetMaterial {
            product,
            containers,
        }) => {
            set_material(&mut albums, product, *containers)?;
        }
        Some(Commands::Status) => {
            show_status(&albums);
        }
        Some(Commands::Album { album_command }) => {
            handle_album_command(&mut albums, album_command)?;
        }
        Some(Commands::Containers { container_command }) => {
            handle_container_command(&mut albums, container_command)?;
        }
        Some(Commands::Capture { label, files }) => {
            capture_photos(&mut albums, &mut media, label, files)?;
        }
        Some(Commands::Photos { filter }) => {
            list_photos(&media, filter.as_deref())?;
        }
        Some(Commands::Upload { destination }) => {
            upload_active_album(&albums, &media, config, destination.clone())?;
        }
        // Handled above
        Some(Commands::Config { .. })
        | Some(Commands::GenerateConfig { .. })
        | Some(Commands::ShowConfig) => unreachable!(),
    }

    // Flush state explicitly so write failures surface as command errors
    albums.store_mut().save()?;
    Ok(())
}

/// Material settings of the active scope, or a friendly error telling the
/// user how to configure them
fn configured_material<S: SettingsStore>(albums: &AlbumStore<S>) -> Result<(ProductType, u32)> {
    albums.material().ok_or_else(|| {
        anyhow!("No material configured. Run 'shipment-photos set-material <PRODUCT> <CONTAINERS>' first.")
    })
}

/// Checklist of the active scope
fn checklist<S: SettingsStore>(albums: &AlbumStore<S>) -> Result<Vec<PhotoCategory>> {
    let (product, total) = configured_material(albums)?;
    Ok(catalog_for(product, total)?)
}

/// Show the checklist with per-item capture progress
fn show_checklist<S: SettingsStore>(albums: &AlbumStore<S>) -> Result<()> {
    let (product, total) = configured_material(albums)?;
    let tier = resolve_tier(total)?;
    let catalog = catalog_for(product, total)?;

    print_header("Photo Checklist");
    print_info(&format!(
        "Album: {}",
        albums.active().unwrap_or("(no album selected)")
    ));
    print_info(&format!(
        "Material: {} with {} container(s), sample tier {} ({} sample container(s))",
        product,
        total,
        tier,
        tier.required_containers()
    ));
    println!();

    let mut complete = 0;
    for category in &catalog {
        let count = albums.capture_count(&category.label);
        let done = count >= category.min_count;
        if done {
            complete += 1;
            print_success(&format!(
                "{} ({}/{})",
                category.label, count, category.min_count
            ));
        } else {
            print_info(&format!(
                "{} ({}/{})",
                category.label, count, category.min_count
            ));
        }
    }

    println!();
    if complete == catalog.len() {
        print_success(&format!("All {} checklist items complete", catalog.len()));
    } else {
        print_info(&format!(
            "{}/{} checklist items complete",
            complete,
            catalog.len()
        ));
    }
    Ok(())
}

/// Set the material settings for the active scope
fn set_material<S: SettingsStore>(
    albums: &mut AlbumStore<S>,
    product: &str,
    containers: u32,
) -> Result<()> {
    let product: ProductType = product.parse().map_err(|e: String| anyhow!(e))?;
    albums.set_material(product, containers)?;

    let tier = resolve_tier(containers)?;
    info!(
        "Material set to {} with {} container(s) for {}",
        product,
        containers,
        albums.active().unwrap_or("<no album>")
    );
    print_success(&format!(
        "Material: {} with {} container(s) → sample tier {} ({} sample container(s) to document)",
        product,
        containers,
        tier,
        tier.required_containers()
    ));
    Ok(())
}

/// Show the active album and its settings
fn show_status<S: SettingsStore>(albums: &AlbumStore<S>) {
    print_header("Status");
    print_info(&format!(
        "Active album: {}",
        albums.active().unwrap_or("(none)")
    ));

    match albums.material() {
        Some((product, total)) => {
            print_info(&format!("Material: {}", product));
            print_info(&format!("Containers: {}", total));
            match resolve_tier(total) {
                Ok(tier) => {
                    print_info(&format!(
                        "Sample tier: {} ({} sample container(s))",
                        tier,
                        tier.required_containers()
                    ));
                    for i in 1..=tier.required_containers() {
                        print_info(&format!(
                            "  Container {}: {}",
                            i,
                            albums.container_names().display_name(i)
                        ));
                    }
                }
                Err(e) => print_warning(&format!("{}", e)),
            }
        }
        None => print_info("Material: not configured"),
    }
}

/// Handle album subcommands
fn handle_album_command<S: SettingsStore>(
    albums: &mut AlbumStore<S>,
    command: &AlbumCommands,
) -> Result<()> {
    match command {
        AlbumCommands::List => {
            let names = albums.albums();
            if names.is_empty() {
                print_info("No albums yet. Create one with 'shipment-photos album create <NAME>'.");
                return Ok(());
            }
            for name in names {
                if albums.active() == Some(name.as_str()) {
                    print_success(&format!("{} (active)", name));
                } else {
                    print_info(&name);
                }
            }
        }
        AlbumCommands::Create { name } => {
            albums.create(name)?;
            print_success(&format!("Created album '{}'", name));
        }
        AlbumCommands::Delete { name, yes } => {
            if !albums.exists(name) {
                bail!("No album named '{}'", name);
            }
            let confirmed = *yes
                || Confirm::new()
                    .with_prompt(format!(
                        "Delete album '{}'? Its photos stay on disk and keep their numbering.",
                        name
                    ))
                    .default(false)
                    .interact()?;
            if !confirmed {
                print_info("Aborted.");
                return Ok(());
            }
            albums.delete(name)?;
            print_success(&format!("Deleted album '{}'", name));
        }
        AlbumCommands::Select { name } => {
            albums.select(name.as_deref())?;
            match albums.active() {
                Some(name) => print_success(&format!("Selected album '{}'", name)),
                None => print_success("Cleared album selection"),
            }
        }
    }
    Ok(())
}

/// Handle container subcommands
fn handle_container_command<S: SettingsStore>(
    albums: &mut AlbumStore<S>,
    command: &ContainerCommands,
) -> Result<()> {
    match command {
        ContainerCommands::List => {
            let required = albums.required_containers()?;
            for i in 1..=required {
                match albums.container_names().get(i) {
                    Some(name) => print_info(&format!("Container {}: {}", i, name)),
                    None => print_info(&format!("Container {}: {} (default)", i, i)),
                }
            }
        }
        ContainerCommands::Rename { index, name } => {
            albums.rename_container(*index, name)?;
            print_success(&format!("Container {} is now '{}'", index, name));
        }
        ContainerCommands::Reset { index } => {
            albums.reset_container(*index);
            print_success(&format!("Container {} reset to its default name", index));
        }
    }
    Ok(())
}

/// Capture one or more photos for a checklist item
fn capture_photos<S: SettingsStore>(
    albums: &mut AlbumStore<S>,
    media: &mut FsMediaStore,
    label: &str,
    files: &[PathBuf],
) -> Result<()> {
    let catalog = checklist(albums)?;
    let category = catalog
        .iter()
        .find(|c| c.label == label)
        .ok_or_else(|| anyhow!("'{}' is not an item of the current checklist", label))?;

    let mut flow = CaptureFlow::new();
    for file in files {
        if flow.is_idle() {
            flow.begin(label, category.min_count);
        }

        // The destination is planned before the file lands so a failed copy
        // never advances the counter
        let destination = destination_for(albums, label)?;
        let handle = media.store_photo(file, &destination)?;
        print_success(&format!("Stored {}", handle.relative.display()));

        match flow.photo_saved(albums) {
            Some(CaptureStep::Completed { taken, .. }) => {
                print_success(&format!(
                    "'{}' complete ({}/{})",
                    label, taken, category.min_count
                ));
            }
            Some(CaptureStep::Continue { next, .. }) => {
                debug!("'{}' next capture is {}", label, next);
            }
            None => {}
        }
    }

    if flow.cancel().is_some() {
        let count = albums.capture_count(label);
        print_info(&format!(
            "'{}' at {}/{}, {} more photo(s) needed",
            label,
            count,
            category.min_count,
            category.min_count - count
        ));
    }
    Ok(())
}

/// List stored photos, newest first
fn list_photos(media: &FsMediaStore, filter: Option<&str>) -> Result<()> {
    let photos = media.photos(filter)?;
    if photos.is_empty() {
        print_info("No photos found.");
        return Ok(());
    }
    for photo in &photos {
        print_info(&format!(
            "{}  {}",
            photo.created.format("%Y-%m-%d %H:%M"),
            photo.relative.display()
        ));
    }
    print_info(&format!("{} photo(s)", photos.len()));
    Ok(())
}

/// Upload the active album to the destination directory
fn upload_active_album<S: SettingsStore>(
    albums: &AlbumStore<S>,
    media: &FsMediaStore,
    config: &Config,
    destination: Option<PathBuf>,
) -> Result<()> {
    let destination = match destination {
        Some(destination) => destination,
        None if config.upload_ready() => config.upload.destination.clone(),
        None => bail!(
            "No upload destination configured. Pass --destination or enable [upload] in the config."
        ),
    };

    let album = albums.active();
    let photos = upload::album_photos(media, album)?;
    info!(
        "Uploading {} photo(s) from {} to {}",
        photos.len(),
        album.unwrap_or("<no album>"),
        destination.display()
    );

    let bar = UploadProgressBar::new(photos.len() as u64);
    let mut uploader = DirUploader::new(&destination);
    let report = upload::upload_album(media, &mut uploader, album, |progress| {
        bar.file_attempted(progress.attempted as u64);
    })?;
    bar.finish();

    report_upload(&report)
}

fn report_upload(report: &UploadReport) -> Result<()> {
    if report.is_complete() {
        print_success(&format!(
            "Uploaded {}/{} photo(s)",
            report.uploaded, report.total
        ));
        return Ok(());
    }

    for filename in &report.failed {
        print_error(&format!("Failed: {}", filename));
        warn!("Upload failed for {}", filename);
    }
    bail!(
        "Uploaded {}/{} photo(s), {} failed",
        report.uploaded,
        report.total,
        report.failed.len()
    );
}

/// Handle the config command - manage the configuration file
pub fn handle_config_command(show_path: bool, reset: bool) -> Result<()> {
    if reset {
        // Delete existing config and create a fresh one
        if let Some(config_path) = get_config_path() {
            if config_path.exists() {
                fs::remove_file(&config_path)?;
                info!("Removed existing config file");
            }
        }
        let path = init_config()?;
        info!("Created fresh config file at: {}", path.display());
        return Ok(());
    }

    if show_path {
        // Just show the path
        let path = Config::get_active_config_path();
        println!("{}", path.display());
        if path.exists() {
            info!("Config file exists at: {}", path.display());
        } else {
            info!("Config file would be created at: {}", path.display());
        }
        return Ok(());
    }

    let path = init_config()?;
    info!("Config file: {}", path.display());
    info!("Edit this file to customize storage, upload and logging settings.");
    info!("Run 'shipment-photos show-config' to verify your settings.");
    Ok(())
}

/// Generate a config file at the specified location (or standard location)
pub fn generate_config_file(output: Option<PathBuf>) -> Result<()> {
    let custom_path = output.is_some();
    let output_path = match output {
        Some(path) => path,
        None => {
            // Use standard location
            init_config()?
        }
    };

    // If a specific path was given, write the config there
    if custom_path {
        let content = Config::generate_default_config();
        fs::write(&output_path, content)?;
    }

    info!("Configuration file: {}", output_path.display());
    info!("Edit this file to customize storage, upload and logging settings.");
    Ok(())
}

/// Show the current configuration settings
pub fn show_config(config: &Config) {
    let config_path = Config::get_active_config_path();
    info!("Configuration file: {}", config_path.display());
    if !config_path.exists() {
        info!("(Using default settings - no config file found)");
    }
    info!("");
    info!("Current Configuration:");
    info!("----------------------");
    info!("Storage:");
    info!("  State file: {}", config.storage.state_file.display());
    info!("  Media root: {}", config.storage.media_root.display());
    info!("Upload:");
    info!("  Enabled: {}", config.upload.enabled);
    info!("  Destination: {}", config.upload.destination.display());
    info!("Logging:");
    info!("  Level: {}", config.logging.level);
    info!("  Log to file: {}", config.logging.log_to_file);
    info!("  Log file: {}", config.logging.log_file.display());
}
