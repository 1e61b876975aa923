#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::HOTSPOT_RADIUS_PX;
use crate::geom::{Point, Rect};
use crate::model::{PlacedProduct, PlacementId, ProductId};

/// Result of a hit test against the placed products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub product_id: ProductId,
    pub placement_id: PlacementId,
    /// Whether the owning placement was the selected one at hit time.
    pub interactive: bool,
}

/// Screen-space bounds of a placed product.
#[must_use]
pub fn bounds(placed: &PlacedProduct) -> Rect {
    Rect::new(placed.x, placed.y, placed.width, placed.height)
}

/// Screen-space rectangle of the hotspot marker overlaid on a placed
/// product, centered on the product's bounds.
#[must_use]
pub fn hotspot(placed: &PlacedProduct) -> Rect {
    let center = bounds(placed).center();
    Rect::new(
        center.x - HOTSPOT_RADIUS_PX,
        center.y - HOTSPOT_RADIUS_PX,
        HOTSPOT_RADIUS_PX * 2.0,
        HOTSPOT_RADIUS_PX * 2.0,
    )
}

/// Test which placed product (if any) is under `screen_pt`.
///
/// `placed` is in draw order, so the topmost match is the last one. Only the
/// active image of each placement is placed, and hidden placements are not
/// placed at all, so no visibility re-check happens here.
#[must_use]
pub fn hit_test(placed: &[PlacedProduct], screen_pt: Point) -> Option<Hit> {
    placed
        .iter()
        .rev()
        .find(|p| bounds(p).contains(screen_pt) || hotspot(p).contains(screen_pt))
        .map(|p| Hit {
            product_id: p.product_id,
            placement_id: p.placement_id,
            interactive: p.interactive,
        })
}
