//! Gesture state machine for the stage: tap-to-select and drag-to-reposition.
//!
//! A pointer-down on a placed product enters `Pressed`; movement beyond the
//! tap slop promotes it to `Dragging` (only for products of the selected
//! placement); release in `Pressed` is a tap. The active gesture carries the
//! context needed to compute deltas and emit the final position on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::TAP_SLOP_PX;
use crate::geom::Point;
use crate::model::{PlacementId, ProductId};

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// Pointer is down on a placed product; not (yet) a drag.
    Pressed {
        /// Product under the pointer.
        product_id: ProductId,
        /// Placement owning the product.
        placement_id: PlacementId,
        /// Screen position of the pointer-down, for slop measurement.
        start_screen: Point,
        /// Product's logical position at pointer-down.
        orig_logical: Point,
        /// Whether the product may be dragged (owning placement selected).
        draggable: bool,
        /// Whether the pointer ever left the tap slop. A wandering press on
        /// a non-draggable product resolves to nothing, not a tap.
        wandered: bool,
    },
    /// The product is being moved across the stage.
    Dragging {
        /// Product being dragged.
        product_id: ProductId,
        /// Placement owning the product.
        placement_id: PlacementId,
        /// Screen position of the pointer-down.
        start_screen: Point,
        /// Product's logical position at pointer-down, used to commit or revert.
        orig_logical: Point,
    },
}

impl Default for DragState {
    fn default() -> Self {
        Self::Idle
    }
}

/// What a pointer-up resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEnd {
    /// Release without leaving the slop: a tap on the product's hotspot.
    Tap { product_id: ProductId, placement_id: PlacementId },
    /// Release after dragging: the product's new logical position.
    Drop {
        product_id: ProductId,
        placement_id: PlacementId,
        orig_logical: Point,
        new_logical: Point,
    },
    /// Release with no gesture in progress.
    None,
}

impl DragState {
    /// Begin a gesture on a placed product.
    #[must_use]
    pub fn press(
        product_id: ProductId,
        placement_id: PlacementId,
        start_screen: Point,
        orig_logical: Point,
        draggable: bool,
    ) -> Self {
        Self::Pressed { product_id, placement_id, start_screen, orig_logical, draggable, wandered: false }
    }

    /// Advance the gesture for a pointer move. Returns the new state; a
    /// press on a non-draggable product never becomes a drag.
    #[must_use]
    pub fn moved(self, screen: Point) -> Self {
        match self {
            Self::Pressed { product_id, placement_id, start_screen, orig_logical, draggable, wandered } => {
                let dx = screen.x - start_screen.x;
                let dy = screen.y - start_screen.y;
                let past_slop = dx.hypot(dy) > TAP_SLOP_PX;
                if draggable && past_slop {
                    Self::Dragging { product_id, placement_id, start_screen, orig_logical }
                } else {
                    Self::Pressed {
                        product_id,
                        placement_id,
                        start_screen,
                        orig_logical,
                        draggable,
                        wandered: wandered || past_slop,
                    }
                }
            }
            other => other,
        }
    }

    /// The logical position a dragging product should show for the current
    /// pointer position, given the screen→logical divisor `scale`.
    #[must_use]
    pub fn drag_position(&self, screen: Point, scale: f64) -> Option<(ProductId, Point)> {
        match self {
            Self::Dragging { product_id, start_screen, orig_logical, .. } => {
                let logical = Point::new(
                    orig_logical.x + (screen.x - start_screen.x) / scale,
                    orig_logical.y + (screen.y - start_screen.y) / scale,
                );
                Some((*product_id, logical))
            }
            _ => None,
        }
    }

    /// Finish the gesture at `screen`, returning what it resolved to. The
    /// state machine returns to `Idle`.
    #[must_use]
    pub fn release(self, screen: Point, scale: f64) -> (Self, GestureEnd) {
        let end = match self {
            Self::Pressed { wandered: true, .. } => GestureEnd::None,
            Self::Pressed { product_id, placement_id, .. } => GestureEnd::Tap { product_id, placement_id },
            Self::Dragging { product_id, placement_id, start_screen, orig_logical } => {
                let new_logical = Point::new(
                    orig_logical.x + (screen.x - start_screen.x) / scale,
                    orig_logical.y + (screen.y - start_screen.y) / scale,
                );
                GestureEnd::Drop { product_id, placement_id, orig_logical, new_logical }
            }
            Self::Idle => GestureEnd::None,
        };
        (Self::Idle, end)
    }

    /// Abandon the gesture without emitting anything.
    #[must_use]
    pub fn cancel(self) -> Self {
        Self::Idle
    }
}
