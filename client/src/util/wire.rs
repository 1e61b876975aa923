//! Conversions between wire DTOs and the engine's model types.
//!
//! Identifiers travel as UUID strings. A record whose id fails to parse is
//! dropped rather than propagated — a corrupt row must not take down the
//! rest of the tree. Active flags are not trusted from the wire; the store
//! re-derives them from the active reference on load.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use stage::geom::Size;
use stage::model::{Placement, Product, Scene, Space};
use uuid::Uuid;

use crate::net::types::{PlacementDetail, ProductDetail, SceneSummary, SpaceDetail, SpaceSummary};
use crate::state::scenes::SceneListItem;

/// Parse a wire identifier. `None` for anything that is not a UUID.
#[must_use]
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

fn size_from(width: Option<f64>, height: Option<f64>) -> Option<Size> {
    match (width, height) {
        (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some(Size::new(w, h)),
        _ => None,
    }
}

/// Convert a scene summary into an engine scene with space stubs (no
/// placements; those arrive per-space via the detail fetch).
#[must_use]
pub fn scene_from_summary(summary: &SceneSummary) -> Option<Scene> {
    let id = parse_id(&summary.id)?;
    Some(Scene {
        id,
        name: summary.name.clone(),
        background: summary.background.clone(),
        background_size: size_from(summary.background_width, summary.background_height),
        tag: summary.tag.clone(),
        spaces: summary.spaces.iter().filter_map(space_from_summary).collect(),
    })
}

fn space_from_summary(summary: &SpaceSummary) -> Option<Space> {
    let id = parse_id(&summary.id)?;
    Some(Space {
        id,
        name: summary.name.clone(),
        background: None,
        background_size: None,
        placements: Vec::new(),
    })
}

/// Convert a space detail payload into an engine space.
#[must_use]
pub fn space_from_detail(detail: &SpaceDetail) -> Option<Space> {
    let id = parse_id(&detail.id)?;
    Some(Space {
        id,
        name: detail.name.clone(),
        background: detail.background.clone(),
        background_size: size_from(detail.background_width, detail.background_height),
        placements: detail.placements.iter().filter_map(placement_from_detail).collect(),
    })
}

fn placement_from_detail(detail: &PlacementDetail) -> Option<Placement> {
    let id = parse_id(&detail.id)?;
    Some(Placement {
        id,
        name: detail.name.clone(),
        visible: detail.visible,
        products: detail.products.iter().filter_map(product_from_detail).collect(),
        active_product: detail.active_product.as_deref().and_then(parse_id),
    })
}

fn product_from_detail(detail: &ProductDetail) -> Option<Product> {
    let id = parse_id(&detail.id)?;
    Some(Product {
        id,
        name: detail.name.clone(),
        image: detail.image.clone(),
        x: detail.x,
        y: detail.y,
        width: detail.width,
        height: detail.height,
        active: detail.active,
    })
}

/// Dashboard list row for a scene summary.
#[must_use]
pub fn scene_list_item(summary: &SceneSummary) -> SceneListItem {
    SceneListItem {
        id: summary.id.clone(),
        name: summary.name.clone(),
        tag: summary.tag.clone(),
        space_count: summary.spaces.len(),
    }
}
