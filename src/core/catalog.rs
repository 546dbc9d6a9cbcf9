//! Photo checklist derivation
//!
//! The rule table at the heart of the tool: a product type and a raw
//! container count deterministically produce the ordered list of required
//! photo categories. The raw count first resolves to a sample tier
//! (II-A..II-D) fixing how many sample containers must be documented;
//! the paper template then expands fixed line items plus one block of
//! five photos per sample container.
//!
//! Catalog building is pure. It never touches the settings store and the
//! same inputs always yield the same ordered list. The order drives both
//! display and default selection in the capture flow.

use crate::core::error::{PhotoDocError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product type of the documented shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    /// Old corrugated containers (paper)
    Occ,
    /// Sorted paper (uses the same checklist template as OCC)
    Sprn,
    /// Aluminium scrap (minimal three-photo checklist)
    Aluminium,
}

impl ProductType {
    /// Canonical name as persisted in the settings store
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Occ => "OCC",
            ProductType::Sprn => "SPRN",
            ProductType::Aluminium => "ALUMINIUM",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OCC" => Ok(ProductType::Occ),
            "SPRN" => Ok(ProductType::Sprn),
            "ALUMINIUM" | "ALU" => Ok(ProductType::Aluminium),
            other => Err(format!(
                "Unknown product type '{}' (expected OCC, SPRN or ALUMINIUM)",
                other
            )),
        }
    }
}

/// Sample tier derived from the total container count
///
/// Each tier fixes the number of sample containers that must be fully
/// documented, regardless of how many containers the shipment has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleTier {
    IiA,
    IiB,
    IiC,
    IiD,
}

impl SampleTier {
    /// Number of sample containers this tier requires
    pub fn required_containers(&self) -> u32 {
        match self {
            SampleTier::IiA => 2,
            SampleTier::IiB => 3,
            SampleTier::IiC => 5,
            SampleTier::IiD => 8,
        }
    }

    /// Display code, e.g. "II-A"
    pub fn code(&self) -> &'static str {
        match self {
            SampleTier::IiA => "II-A",
            SampleTier::IiB => "II-B",
            SampleTier::IiC => "II-C",
            SampleTier::IiD => "II-D",
        }
    }
}

impl fmt::Display for SampleTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Resolve the sample tier for a total container count.
///
/// Thresholds: up to 8 containers → II-A, up to 15 → II-B, up to 25 → II-C,
/// above that → II-D. A count of zero means "not configured" and is rejected
/// rather than silently mapped to the smallest tier.
pub fn resolve_tier(container_count: u32) -> Result<SampleTier> {
    match container_count {
        0 => Err(PhotoDocError::InvalidContainerCount(container_count)),
        1..=8 => Ok(SampleTier::IiA),
        9..=15 => Ok(SampleTier::IiB),
        16..=25 => Ok(SampleTier::IiC),
        _ => Ok(SampleTier::IiD),
    }
}

/// One line item of the photo checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoCategory {
    /// Display label, e.g. "Overview" or "Container 2 - Seal"
    pub label: String,
    /// Minimum number of photos required for this item
    pub min_count: u32,
    /// Whether the item must be completed for the checklist to be done
    pub is_required: bool,
}

impl PhotoCategory {
    fn new(label: impl Into<String>, min_count: u32) -> Self {
        Self {
            label: label.into(),
            min_count,
            is_required: true,
        }
    }
}

/// Per-container photo actions, in the fixed order each container block
/// is expanded in
pub const CONTAINER_ACTIONS: [&str; 5] = [
    "Full Loaded",
    "Selfie with Full Loaded",
    "Closed",
    "Selfie with Closed",
    "Seal",
];

/// Paper checklist template (OCC and SPRN).
///
/// `required` is the resolved sample-container count, never the raw
/// user-entered total. Fixed items come first in a fixed sequence, then
/// one five-photo block per sample container in ascending index.
pub fn paper_categories(required: u32) -> Vec<PhotoCategory> {
    let bales = required * 2;

    let mut categories = vec![
        PhotoCategory::new("Overview", 3),
        PhotoCategory::new("Close View", 2),
        PhotoCategory::new("Container List", 1),
        PhotoCategory::new("Radiation background", 1),
        PhotoCategory::new("Radiation towards bales", required),
        PhotoCategory::new("Selfie with Radiation", 1),
        PhotoCategory::new("Moisture Level", bales),
        PhotoCategory::new("Sample Bale Weight", bales),
        PhotoCategory::new("Sample Bale on ground/scale", bales),
        PhotoCategory::new("Selfie with Sample Bale", 1),
        PhotoCategory::new("Loosed Sample Bale", bales),
        PhotoCategory::new("Selfie with Loosed Sample Bale", 1),
        PhotoCategory::new("Non-Paper Component Findings", 1),
        PhotoCategory::new("Selfie with Non-Paper Component Findings", 1),
        PhotoCategory::new("Non-Paper Component Weights", bales),
        PhotoCategory::new("Total Unwanted Material Findings", 1),
        PhotoCategory::new("Selfie with Total Unwanted Material Findings", 1),
        PhotoCategory::new("Total Unwanted Material Weights", bales),
        PhotoCategory::new("Empty Container", 1),
        PhotoCategory::new("Selfie with Loading Container", 1),
    ];

    for i in 1..=required {
        for action in CONTAINER_ACTIONS {
            categories.push(PhotoCategory::new(format!("Container {} - {}", i, action), 1));
        }
    }

    categories
}

/// Metal checklist template (ALUMINIUM): always exactly three photos,
/// independent of the container count.
pub fn metal_categories() -> Vec<PhotoCategory> {
    vec![
        PhotoCategory::new("Photo 1", 1),
        PhotoCategory::new("Photo 2", 1),
        PhotoCategory::new("Photo 3", 1),
    ]
}

/// Build the full checklist for a product type and a raw container count.
///
/// Resolves the sample tier first; per-container expansion always uses the
/// resolved count.
pub fn catalog_for(product: ProductType, total_containers: u32) -> Result<Vec<PhotoCategory>> {
    let tier = resolve_tier(total_containers)?;
    let required = tier.required_containers();

    Ok(match product {
        ProductType::Occ | ProductType::Sprn => paper_categories(required),
        ProductType::Aluminium => metal_categories(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        for n in 1..=8 {
            assert_eq!(resolve_tier(n).unwrap(), SampleTier::IiA);
            assert_eq!(resolve_tier(n).unwrap().required_containers(), 2);
        }
        for n in 9..=15 {
            assert_eq!(resolve_tier(n).unwrap(), SampleTier::IiB);
            assert_eq!(resolve_tier(n).unwrap().required_containers(), 3);
        }
        for n in 16..=25 {
            assert_eq!(resolve_tier(n).unwrap(), SampleTier::IiC);
            assert_eq!(resolve_tier(n).unwrap().required_containers(), 5);
        }
        for n in [26, 40, 100, 1000] {
            assert_eq!(resolve_tier(n).unwrap(), SampleTier::IiD);
            assert_eq!(resolve_tier(n).unwrap().required_containers(), 8);
        }
    }

    #[test]
    fn test_tier_rejects_zero() {
        assert!(matches!(
            resolve_tier(0),
            Err(PhotoDocError::InvalidContainerCount(0))
        ));
    }

    #[test]
    fn test_tier_codes() {
        assert_eq!(SampleTier::IiA.code(), "II-A");
        assert_eq!(SampleTier::IiD.to_string(), "II-D");
    }

    #[test]
    fn test_occ_and_sprn_share_the_paper_template() {
        let occ = catalog_for(ProductType::Occ, 2).unwrap();
        let sprn = catalog_for(ProductType::Sprn, 2).unwrap();
        assert_eq!(occ, sprn);
    }

    #[test]
    fn test_aluminium_is_always_three_photos() {
        for n in [2, 3, 5, 8, 30] {
            let catalog = catalog_for(ProductType::Aluminium, n).unwrap();
            let labels: Vec<&str> = catalog.iter().map(|c| c.label.as_str()).collect();
            assert_eq!(labels, ["Photo 1", "Photo 2", "Photo 3"]);
            assert!(catalog.iter().all(|c| c.min_count == 1));
        }
    }

    #[test]
    fn test_paper_catalog_shape_for_two_containers() {
        let catalog = paper_categories(2);

        // 20 fixed items then 5 actions x 2 containers
        assert_eq!(catalog.len(), 30);
        assert_eq!(catalog[0].label, "Overview");
        assert_eq!(catalog[0].min_count, 3);
        assert_eq!(catalog[2].label, "Container List");
        assert_eq!(catalog[19].label, "Selfie with Loading Container");

        let block: Vec<&str> = catalog[20..].iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            block,
            [
                "Container 1 - Full Loaded",
                "Container 1 - Selfie with Full Loaded",
                "Container 1 - Closed",
                "Container 1 - Selfie with Closed",
                "Container 1 - Seal",
                "Container 2 - Full Loaded",
                "Container 2 - Selfie with Full Loaded",
                "Container 2 - Closed",
                "Container 2 - Selfie with Closed",
                "Container 2 - Seal",
            ]
        );
        assert!(catalog[20..].iter().all(|c| c.min_count == 1));
    }

    #[test]
    fn test_paper_counts_scale_with_required_containers() {
        let catalog = paper_categories(3);
        let find = |label: &str| {
            catalog
                .iter()
                .find(|c| c.label == label)
                .unwrap_or_else(|| panic!("missing {}", label))
        };

        assert_eq!(find("Radiation towards bales").min_count, 3);
        assert_eq!(find("Moisture Level").min_count, 6);
        assert_eq!(find("Total Unwanted Material Weights").min_count, 6);
        assert_eq!(find("Overview").min_count, 3);
        assert_eq!(find("Container List").min_count, 1);
    }

    #[test]
    fn test_catalog_uses_resolved_count_not_raw_count() {
        // 12 raw containers resolve to tier II-B with 3 sample containers
        let catalog = catalog_for(ProductType::Occ, 12).unwrap();
        assert!(catalog.iter().any(|c| c.label == "Container 3 - Seal"));
        assert!(!catalog.iter().any(|c| c.label == "Container 4 - Full Loaded"));
    }

    #[test]
    fn test_catalog_is_deterministic() {
        assert_eq!(
            catalog_for(ProductType::Occ, 20).unwrap(),
            catalog_for(ProductType::Occ, 20).unwrap()
        );
    }

    #[test]
    fn test_product_type_parsing() {
        assert_eq!("occ".parse::<ProductType>().unwrap(), ProductType::Occ);
        assert_eq!("SPRN".parse::<ProductType>().unwrap(), ProductType::Sprn);
        assert_eq!(
            "Aluminium".parse::<ProductType>().unwrap(),
            ProductType::Aluminium
        );
        assert!("plastic".parse::<ProductType>().is_err());
    }
}
