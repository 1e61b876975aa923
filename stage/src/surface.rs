//! Selection-surface state machine and scroll-centering math.
//!
//! DESIGN
//! ======
//! The surface moves through `Closed → Opening → Open → Closing → Closed`.
//! Opening pins the tapped product's placement and pre-computes the scroll
//! offset that centers its active product; the host plays its transition and
//! reports completion via `finish_open`/`finish_close`.
//!
//! While open, the controller derives which product cell sits nearest the
//! horizontal center from the raw scroll offset. The host debounces scroll
//! events (a quiet period, see [`crate::consts::SCROLL_SETTLE_MS`]) and then
//! calls [`SurfaceController::settle`], which snaps the offset to center the
//! nearest cell and reports whether that cell should be promoted to active.
//! The nearest index is plain derived state — the renderer reads it, nothing
//! toggles styles imperatively.
//!
//! The strip is assumed to carry symmetric leading/trailing padding of half
//! the viewport minus half a cell, so cell `k` is exactly centered at offset
//! `k * (cell width + gap)`. All the math below relies on that.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::consts::{TRAY_ITEM_GAP_PX, TRAY_ITEM_WIDTH_PX};
use crate::model::{PlacementId, ProductId};

/// Lifecycle state of the selection surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceState {
    /// Not visible; waiting for a hotspot tap.
    #[default]
    Closed,
    /// Transition in progress; the surface is measuring/animating open.
    Opening,
    /// Fully open and interactive.
    Open,
    /// Transition in progress; the surface is animating closed.
    Closing,
}

/// Host-configurable behavior of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Promote the nearest-to-center product to active when scrolling settles.
    pub promote_on_settle: bool,
    /// Request the closing transition after an explicit product selection.
    pub auto_close_on_select: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self { promote_on_settle: true, auto_close_on_select: false }
    }
}

/// Outcome of a settle: where to snap and what (if anything) to promote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settle {
    /// Scroll offset that exactly centers the nearest cell.
    pub scroll_to: f64,
    /// Index of the centered cell.
    pub index: usize,
    /// Product to promote to active, when configured and resolvable.
    pub promote: Option<ProductId>,
}

/// State machine driving the tap-to-select overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceController {
    state: SurfaceState,
    config: SurfaceConfig,
    /// Placement whose products the surface is showing.
    placement: Option<PlacementId>,
    /// Product ids in display order, captured at open.
    products: Vec<ProductId>,
    /// Raw scroll offset as last reported by the host.
    scroll_x: f64,
    /// Derived: index of the cell nearest the horizontal center.
    nearest: usize,
}

impl SurfaceController {
    #[must_use]
    pub fn new(config: SurfaceConfig) -> Self {
        Self { config, ..Self::default() }
    }

    #[must_use]
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> SurfaceConfig {
        self.config
    }

    /// Placement currently shown, if the surface is not closed.
    #[must_use]
    pub fn placement(&self) -> Option<PlacementId> {
        self.placement
    }

    /// Index of the product cell nearest the horizontal center.
    #[must_use]
    pub fn nearest_index(&self) -> usize {
        self.nearest
    }

    #[must_use]
    pub fn scroll_x(&self) -> f64 {
        self.scroll_x
    }

    /// Product ids shown by the surface, in display order.
    #[must_use]
    pub fn products(&self) -> &[ProductId] {
        &self.products
    }

    /// Begin opening for a placement. `products` is the placement's list in
    /// display order and `active_index` the position of its active product;
    /// the returned offset centers that product and is pre-applied so the
    /// strip is already centered when the open transition finishes.
    ///
    /// Only legal from `Closed`; any other state is a no-op returning the
    /// current offset.
    pub fn open(&mut self, placement: PlacementId, products: Vec<ProductId>, active_index: usize) -> f64 {
        if self.state != SurfaceState::Closed {
            return self.scroll_x;
        }
        self.state = SurfaceState::Opening;
        self.placement = Some(placement);
        self.products = products;
        let index = active_index.min(self.products.len().saturating_sub(1));
        self.scroll_x = centered_scroll(index, self.products.len());
        self.nearest = index;
        self.scroll_x
    }

    /// The host's open transition completed.
    pub fn finish_open(&mut self) {
        if self.state == SurfaceState::Opening {
            self.state = SurfaceState::Open;
        }
    }

    /// Request the closing transition (explicit close, Escape, or
    /// auto-close after selection).
    pub fn request_close(&mut self) {
        if matches!(self.state, SurfaceState::Opening | SurfaceState::Open) {
            self.state = SurfaceState::Closing;
        }
    }

    /// The host's close transition completed; the surface forgets its
    /// placement and scroll context.
    pub fn finish_close(&mut self) {
        if self.state == SurfaceState::Closing {
            *self = Self { config: self.config, ..Self::default() };
        }
    }

    /// Record a raw scroll offset and re-derive the nearest index. Returns
    /// the nearest index for convenience.
    pub fn scroll(&mut self, scroll_x: f64) -> usize {
        if self.state == SurfaceState::Open {
            self.scroll_x = scroll_x;
            self.nearest = nearest_index(scroll_x, self.products.len());
        }
        self.nearest
    }

    /// Scrolling went quiet: snap to the nearest cell.
    ///
    /// Returns `None` unless the surface is open with at least one product.
    #[must_use]
    pub fn settle(&mut self) -> Option<Settle> {
        if self.state != SurfaceState::Open || self.products.is_empty() {
            return None;
        }
        let index = self.nearest;
        self.scroll_x = centered_scroll(index, self.products.len());
        Some(Settle {
            scroll_to: self.scroll_x,
            index,
            promote: if self.config.promote_on_settle {
                self.products.get(index).copied()
            } else {
                None
            },
        })
    }

    /// Refresh the product list after a structural edit to the shown
    /// placement (e.g. a product was removed while the surface is open).
    /// The nearest index is clamped and the offset re-centered if needed.
    pub fn sync_products(&mut self, products: Vec<ProductId>) {
        if self.placement.is_none() {
            return;
        }
        self.products = products;
        let max = self.products.len().saturating_sub(1);
        if self.nearest > max {
            self.nearest = max;
            self.scroll_x = centered_scroll(max, self.products.len());
        }
    }

    /// An explicit selection was made inside the surface (tap on a cell).
    /// Returns whether the host should start the closing transition.
    #[must_use]
    pub fn selected(&mut self) -> bool {
        if self.state == SurfaceState::Open && self.config.auto_close_on_select {
            self.state = SurfaceState::Closing;
            return true;
        }
        false
    }
}

/// Full width of one cell including its trailing gap.
#[must_use]
fn cell_stride() -> f64 {
    TRAY_ITEM_WIDTH_PX + TRAY_ITEM_GAP_PX
}

/// Scroll offset that exactly centers cell `index` in a padded strip.
#[must_use]
pub fn centered_scroll(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let index = index.min(count - 1) as f64;
    index * cell_stride()
}

/// Index of the cell whose center is nearest the strip center at offset
/// `scroll_x`.
#[must_use]
pub fn nearest_index(scroll_x: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let raw = scroll_x / cell_stride();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = raw.round().max(0.0) as usize;
    index.min(count - 1)
}

/// Largest meaningful scroll offset for `count` cells.
#[must_use]
pub fn max_scroll(count: usize) -> f64 {
    centered_scroll(count.saturating_sub(1), count)
}
