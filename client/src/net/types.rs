//! Shared wire-protocol DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types mirror the collaborator's payloads so serde round-trips stay
//! lossless. Identifiers travel as UUID strings; `util::wire` converts them
//! into the `stage` crate's typed ids at the boundary and drops records whose
//! ids do not parse (a stale or corrupt row must not take down the tree).

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A scene as listed by the fetch-scenes operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneSummary {
    /// Unique scene identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Background image reference (opaque).
    pub background: String,
    /// Natural background width in logical pixels, if already measured.
    pub background_width: Option<f64>,
    /// Natural background height in logical pixels, if already measured.
    pub background_height: Option<f64>,
    /// Optional classification tag (e.g. `"indoor"`, `"outdoor"`).
    pub tag: Option<String>,
    /// Nested space summaries, in display order.
    #[serde(default)]
    pub spaces: Vec<SpaceSummary>,
}

/// A space as nested in a scene summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpaceSummary {
    /// Unique space identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Full space payload from the fetch-space-detail operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpaceDetail {
    /// Unique space identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Background override reference, if the space has one.
    pub background: Option<String>,
    /// Natural override-background width in logical pixels.
    pub background_width: Option<f64>,
    /// Natural override-background height in logical pixels.
    pub background_height: Option<f64>,
    /// Placements with their full product lists.
    #[serde(default)]
    pub placements: Vec<PlacementDetail>,
}

/// A placement with its candidate products.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementDetail {
    /// Unique placement identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Hidden placements render nothing.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Candidate products, in display order.
    #[serde(default)]
    pub products: Vec<ProductDetail>,
    /// Identifier of the active product (UUID string), if any.
    pub active_product: Option<String>,
}

/// A product image with its logical geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    /// Unique product identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Image reference (opaque).
    pub image: String,
    /// Left edge in logical coordinates.
    pub x: f64,
    /// Top edge in logical coordinates.
    pub y: f64,
    /// Width in logical coordinates.
    pub width: f64,
    /// Height in logical coordinates.
    pub height: f64,
    /// Whether this product is the placement's active image.
    #[serde(default)]
    pub active: bool,
}

/// Identifier confirmation for a structural create.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Created {
    /// Server-issued identifier (UUID string).
    pub id: String,
    /// Display name as stored.
    pub name: String,
}

/// Confirmation for a created placement image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductCreated {
    /// Server-issued identifier (UUID string).
    pub id: String,
    /// Display name as stored.
    pub name: String,
    /// Image reference as stored (opaque).
    pub image: String,
}

/// Response from the asset-upload operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Uploaded {
    /// Opaque reference to the stored asset.
    pub reference: String,
}

fn default_visible() -> bool {
    true
}
