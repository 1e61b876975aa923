//! Scene model: the Scene → Space → Placement → Product hierarchy and the
//! ephemeral placed-product view records.
//!
//! DESIGN
//! ======
//! Every geometric field on a [`Product`] is logical — expressed in the pixel
//! space of the owning scene/space background's natural dimensions — so that
//! stored geometry survives viewport changes unchanged. Screen-space values
//! exist only on [`PlacedProduct`], which is recomputed from the current
//! [`crate::geom::StageTransform`] and never persisted.
//!
//! Ownership is strictly parent → child: deleting a parent deletes its
//! children. The only upward reference is the placement id carried by
//! [`PlacedProduct`], which is a lookup key, not an ownership edge.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::Size;

/// Unique identifier for a scene.
pub type SceneId = Uuid;
/// Unique identifier for a space within a scene.
pub type SpaceId = Uuid;
/// Unique identifier for a placement within a space.
pub type PlacementId = Uuid;
/// Unique identifier for a product image within a placement.
pub type ProductId = Uuid;

/// Opaque reference to a stored image asset.
pub type ImageRef = String;

/// Top-level composition: one background image plus its spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique identifier for this scene.
    pub id: SceneId,
    /// Operator-facing display name.
    pub name: String,
    /// Background image reference.
    pub background: ImageRef,
    /// Natural pixel dimensions of the background image, fixed once measured
    /// after the image loads. `None` until the first measurement.
    pub background_size: Option<Size>,
    /// Optional classification tag (e.g. `"indoor"`, `"outdoor"`).
    pub tag: Option<String>,
    /// Spaces composing this scene, in display order.
    pub spaces: Vec<Space>,
}

/// A sub-area of a scene, optionally with its own background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    /// Unique identifier for this space.
    pub id: SpaceId,
    /// Operator-facing display name.
    pub name: String,
    /// Background override; `None` falls back to the scene background.
    pub background: Option<ImageRef>,
    /// Natural pixel dimensions of the override background, if measured.
    pub background_size: Option<Size>,
    /// Placements within this space, in display order.
    pub placements: Vec<Placement>,
}

/// A named slot that shows exactly one of several candidate products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Unique identifier for this placement.
    pub id: PlacementId,
    /// Operator-facing display name.
    pub name: String,
    /// Hidden placements render nothing and take no interaction.
    pub visible: bool,
    /// Candidate product images, in display order.
    pub products: Vec<Product>,
    /// The single product currently rendered for this placement. Must point
    /// into `products` whenever `products` is non-empty.
    pub active_product: Option<ProductId>,
}

impl Placement {
    /// The currently active product record, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Product> {
        let id = self.active_product?;
        self.products.iter().find(|p| p.id == id)
    }

    /// Index of the currently active product within `products`.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        let id = self.active_product?;
        self.products.iter().position(|p| p.id == id)
    }

    /// Whether `product_id` is a member of this placement's product list.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.products.iter().any(|p| p.id == product_id)
    }
}

/// A candidate image assigned to a placement.
///
/// `x`/`y`/`width`/`height` are logical coordinates in the background image's
/// pixel space. `active` is derived from the owning placement's
/// `active_product` reference and is never authoritative on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for this product image.
    pub id: ProductId,
    /// Operator-facing display name.
    pub name: String,
    /// Image reference for this candidate.
    pub image: ImageRef,
    /// Left edge in logical coordinates.
    pub x: f64,
    /// Top edge in logical coordinates.
    pub y: f64,
    /// Width in logical coordinates.
    pub width: f64,
    /// Height in logical coordinates.
    pub height: f64,
    /// Mirror of the placement's active-product reference.
    pub active: bool,
}

/// A product resolved to screen coordinates for the current scale factor.
///
/// View-model record only: recomputed on every scale change, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedProduct {
    /// Product this record projects.
    pub product_id: ProductId,
    /// Placement the product belongs to (lookup key, not ownership).
    pub placement_id: PlacementId,
    /// Image reference, copied for the renderer's convenience.
    pub image: ImageRef,
    /// Left edge in screen coordinates.
    pub x: f64,
    /// Top edge in screen coordinates.
    pub y: f64,
    /// Width in screen coordinates.
    pub width: f64,
    /// Height in screen coordinates.
    pub height: f64,
    /// Whether this product is the placement's active image.
    pub active: bool,
    /// Whether the product may be dragged (owning placement is selected).
    pub interactive: bool,
}

impl Scene {
    /// Look up a space by id.
    #[must_use]
    pub fn space(&self, id: SpaceId) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id == id)
    }

    /// Effective background for `space`: the space's own override when set,
    /// otherwise the scene background.
    #[must_use]
    pub fn background_for<'a>(&'a self, space: &'a Space) -> (&'a ImageRef, Option<Size>) {
        match (&space.background, space.background_size) {
            (Some(image), size) => (image, size),
            (None, _) => (&self.background, self.background_size),
        }
    }
}

impl Space {
    /// Look up a placement by id.
    #[must_use]
    pub fn placement(&self, id: PlacementId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }
}
