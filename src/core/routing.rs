//! Filename and folder routing for captured photos
//!
//! Maps a checklist label to the canonical filename of the next capture
//! and to the gallery subfolder the photo belongs in. Routing degrades to
//! safe defaults: a label nobody recognizes still gets a passthrough
//! filename and the "Other" folder, because classification problems must never
//! block a capture in the field.
//!
//! Container-specific labels ("Container 3 - Seal") are parsed by a single
//! regex; every call site goes through [`parse_container_label`] rather
//! than re-matching the pattern itself.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Default photo file extension
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Subfolder for the overview group
const OVERVIEW_FOLDER: &str = "1. Overview";

/// Subfolder for the inspection group
const INSPECTION_FOLDER: &str = "2. Inspection";

/// Subfolder for photos that match no known category
const OTHER_FOLDER: &str = "Other";

static CONTAINER_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Container (\d+) - (.+)$").expect("Invalid Regex"));

/// Per-album container display names, keyed by container index (1-based).
///
/// A missing index falls back to the index's own decimal string. This is a
/// plain value object: routing receives it as an argument and never reads
/// shared state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerNames {
    names: BTreeMap<u32, String>,
}

impl ContainerNames {
    /// Empty override set (all containers display their index)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name for a container index
    pub fn set(&mut self, index: u32, name: impl Into<String>) {
        self.names.insert(index, name.into());
    }

    /// Remove the override for a container index
    pub fn reset(&mut self, index: u32) {
        self.names.remove(&index);
    }

    /// Override for an index, if one was saved
    pub fn get(&self, index: u32) -> Option<&str> {
        self.names.get(&index).map(String::as_str)
    }

    /// Display name for an index: the override, or the index itself
    pub fn display_name(&self, index: u32) -> String {
        match self.names.get(&index) {
            Some(name) => name.clone(),
            None => index.to_string(),
        }
    }

    /// Iterate over saved overrides in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.names.iter().map(|(i, n)| (*i, n.as_str()))
    }
}

impl FromIterator<(u32, String)> for ContainerNames {
    fn from_iter<T: IntoIterator<Item = (u32, String)>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// Parse a per-container label into (container index, action).
///
/// Returns `None` for anything that is not of the form
/// `"Container {n} - {Action}"`.
pub fn parse_container_label(label: &str) -> Option<(u32, &str)> {
    let caps = CONTAINER_LABEL_RE.captures(label)?;
    let index: u32 = caps.get(1)?.as_str().parse().ok()?;
    Some((index, caps.get(2)?.as_str()))
}

/// Short code for a per-container action; unknown actions pass through
fn action_code(action: &str) -> &str {
    match action {
        "Full Loaded" => "FL",
        "Selfie with Full Loaded" => "FLS",
        "Closed" => "CL",
        "Selfie with Closed" => "CLS",
        "Seal" => "SEAL",
        other => other,
    }
}

/// Short code for a fixed checklist label; unmapped labels pass through
fn label_code(label: &str) -> &str {
    match label {
        "Overview" => "OV",
        "Close View" => "CV",
        "Container List" => "LIST",
        "Radiation background" => "RB",
        "Radiation towards bales" => "R",
        "Selfie with Radiation" => "RS",
        "Moisture Level" => "M",
        "Sample Bale Weight" => "SBW",
        "Sample Bale on ground/scale" => "SBG",
        "Selfie with Sample Bale" => "SBS",
        "Loosed Sample Bale" => "LSB",
        "Selfie with Loosed Sample Bale" => "LSBS",
        "Non-Paper Component Findings" => "NPF",
        "Selfie with Non-Paper Component Findings" => "NPFS",
        "Non-Paper Component Weights" => "NPW",
        "Total Unwanted Material Findings" => "TUF",
        "Selfie with Total Unwanted Material Findings" => "TUFS",
        "Total Unwanted Material Weights" => "TUW",
        "Empty Container" => "EC",
        "Selfie with Loading Container" => "LC",
        other => other,
    }
}

/// Canonical filename for a capture of `label`, with the default extension.
///
/// `seq` is the capture number within a multi-count category. The first
/// photo of a category stays unnumbered; numbering starts at the second
/// capture ("OV.jpg", "OV(2).jpg", ...). Container photos never carry a
/// sequence suffix regardless of `seq`: each container action is a single
/// photo and the container index already lives in the folder name.
pub fn filename_for(label: &str, seq: Option<u32>) -> String {
    filename_for_ext(label, seq, DEFAULT_EXTENSION)
}

/// [`filename_for`] with an explicit extension
pub fn filename_for_ext(label: &str, seq: Option<u32>, extension: &str) -> String {
    if let Some((_, action)) = parse_container_label(label) {
        return format!("{}.{}", action_code(action), extension);
    }

    let code = label_code(label);
    match seq {
        Some(n) if n >= 2 => format!("{}({}).{}", code, n, extension),
        _ => format!("{}.{}", code, extension),
    }
}

/// Whether a label or short code belongs to the overview group
fn is_overview_group(label: &str) -> bool {
    matches!(
        label,
        "Overview" | "Close View" | "Container List" | "OV" | "CV" | "LIST"
    )
}

/// Whether a label or short code routes to the first container's folder
fn is_first_container_group(label: &str) -> bool {
    matches!(
        label,
        "Empty Container" | "Selfie with Loading Container" | "EC" | "LC"
    )
}

/// Whether a label or short code belongs to the inspection group
fn is_inspection_group(label: &str) -> bool {
    const INSPECTION_LABELS: [&str; 15] = [
        "Radiation background",
        "Radiation towards bales",
        "Selfie with Radiation",
        "Moisture Level",
        "Sample Bale Weight",
        "Sample Bale on ground/scale",
        "Selfie with Sample Bale",
        "Loosed Sample Bale",
        "Selfie with Loosed Sample Bale",
        "Non-Paper Component Findings",
        "Selfie with Non-Paper Component Findings",
        "Non-Paper Component Weights",
        "Total Unwanted Material Findings",
        "Selfie with Total Unwanted Material Findings",
        "Total Unwanted Material Weights",
    ];
    const INSPECTION_CODES: [&str; 15] = [
        "RB", "R", "RS", "M", "SBW", "SBG", "SBS", "LSB", "LSBS", "NPF", "NPFS", "NPW", "TUF",
        "TUFS", "TUW",
    ];

    INSPECTION_LABELS.contains(&label) || INSPECTION_CODES.contains(&label)
}

/// Gallery subfolder for a capture of `label`.
///
/// Overview-group photos go to "1. Overview", inspection items to
/// "2. Inspection". Container loading photos ("Empty Container", "Selfie
/// with Loading Container") land in the first container's folder; each
/// per-container block gets folder index n+2 named after the container's
/// override (or its index). Container indices outside the resolved range
/// and labels nobody recognizes route to "Other".
pub fn subfolder_for(label: &str, required_containers: u32, names: &ContainerNames) -> String {
    if is_overview_group(label) {
        return OVERVIEW_FOLDER.to_string();
    }
    if is_inspection_group(label) {
        return INSPECTION_FOLDER.to_string();
    }
    if is_first_container_group(label) {
        return format!("3. {}", names.display_name(1));
    }
    if let Some((index, _)) = parse_container_label(label) {
        if index >= 1 && index <= required_containers {
            return format!("{}. {}", index + 2, names.display_name(index));
        }
    }
    OTHER_FOLDER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_container_label() {
        assert_eq!(
            parse_container_label("Container 3 - Seal"),
            Some((3, "Seal"))
        );
        assert_eq!(
            parse_container_label("Container 12 - Selfie with Closed"),
            Some((12, "Selfie with Closed"))
        );
        assert_eq!(parse_container_label("Overview"), None);
        assert_eq!(parse_container_label("Container x - Seal"), None);
        assert_eq!(parse_container_label("Container 3 Seal"), None);
    }

    #[test]
    fn test_container_filenames_ignore_sequence() {
        assert_eq!(filename_for("Container 3 - Seal", None), "SEAL.jpg");
        assert_eq!(filename_for("Container 3 - Seal", Some(5)), "SEAL.jpg");
        assert_eq!(filename_for("Container 1 - Full Loaded", Some(2)), "FL.jpg");
        assert_eq!(
            filename_for("Container 2 - Selfie with Full Loaded", None),
            "FLS.jpg"
        );
        assert_eq!(filename_for("Container 2 - Closed", None), "CL.jpg");
        assert_eq!(
            filename_for("Container 2 - Selfie with Closed", None),
            "CLS.jpg"
        );
    }

    #[test]
    fn test_fixed_label_filenames() {
        assert_eq!(filename_for("Overview", None), "OV.jpg");
        assert_eq!(filename_for("Overview", Some(2)), "OV(2).jpg");
        assert_eq!(filename_for("Radiation towards bales", Some(3)), "R(3).jpg");
        assert_eq!(filename_for("Moisture Level", None), "M.jpg");
    }

    #[test]
    fn test_first_capture_stays_unnumbered() {
        // Numbering is reserved for the second and later captures
        assert_eq!(filename_for("Overview", Some(1)), "OV.jpg");
        assert_eq!(filename_for("Overview", Some(2)), "OV(2).jpg");
    }

    #[test]
    fn test_unknown_labels_pass_through() {
        assert_eq!(filename_for("Extra Evidence", None), "Extra Evidence.jpg");
        assert_eq!(
            filename_for("Extra Evidence", Some(4)),
            "Extra Evidence(4).jpg"
        );
        assert_eq!(
            filename_for("Container 1 - Tarp Removed", None),
            "Tarp Removed.jpg"
        );
    }

    #[test]
    fn test_filename_extension_override() {
        assert_eq!(filename_for_ext("Overview", None, "png"), "OV.png");
        assert_eq!(
            filename_for_ext("Container 1 - Seal", Some(9), "png"),
            "SEAL.png"
        );
    }

    #[test]
    fn test_overview_group_routing() {
        let names = ContainerNames::new();
        assert_eq!(subfolder_for("Overview", 2, &names), "1. Overview");
        assert_eq!(subfolder_for("Close View", 2, &names), "1. Overview");
        assert_eq!(subfolder_for("Container List", 2, &names), "1. Overview");
        assert_eq!(subfolder_for("OV", 2, &names), "1. Overview");
    }

    #[test]
    fn test_inspection_group_routing() {
        let names = ContainerNames::new();
        assert_eq!(subfolder_for("Moisture Level", 2, &names), "2. Inspection");
        assert_eq!(
            subfolder_for("Radiation background", 2, &names),
            "2. Inspection"
        );
        assert_eq!(subfolder_for("TUW", 2, &names), "2. Inspection");
    }

    #[test]
    fn test_loading_photos_route_to_first_container() {
        let empty = ContainerNames::new();
        assert_eq!(subfolder_for("Empty Container", 2, &empty), "3. 1");
        assert_eq!(
            subfolder_for("Selfie with Loading Container", 2, &empty),
            "3. 1"
        );

        let mut named = ContainerNames::new();
        named.set(1, "BatchA");
        assert_eq!(subfolder_for("Empty Container", 2, &named), "3. BatchA");
    }

    #[test]
    fn test_container_folder_routing() {
        let empty = ContainerNames::new();
        assert_eq!(subfolder_for("Container 1 - Closed", 2, &empty), "3. 1");
        assert_eq!(subfolder_for("Container 2 - Seal", 2, &empty), "4. 2");

        let mut named = ContainerNames::new();
        named.set(1, "BatchA");
        assert_eq!(
            subfolder_for("Container 1 - Closed", 2, &named),
            "3. BatchA"
        );
        // Container 2 has no override and keeps its index
        assert_eq!(subfolder_for("Container 2 - Closed", 2, &named), "4. 2");
    }

    #[test]
    fn test_out_of_range_container_routes_to_other() {
        let names = ContainerNames::new();
        assert_eq!(subfolder_for("Container 7 - Seal", 2, &names), "Other");
        assert_eq!(subfolder_for("Container 0 - Seal", 2, &names), "Other");
    }

    #[test]
    fn test_unknown_label_routes_to_other() {
        let names = ContainerNames::new();
        assert_eq!(subfolder_for("Random Note", 2, &names), "Other");
    }

    #[test]
    fn test_container_names_defaults() {
        let mut names = ContainerNames::new();
        assert_eq!(names.display_name(4), "4");
        names.set(4, "West Bay");
        assert_eq!(names.display_name(4), "West Bay");
        names.reset(4);
        assert_eq!(names.display_name(4), "4");
    }
}
