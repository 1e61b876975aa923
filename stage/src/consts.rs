//! Shared numeric constants for the stage crate.

// ── Chrome reservations ─────────────────────────────────────────

/// Width reserved for the expanded side panel, in CSS pixels.
pub const SIDEBAR_WIDTH_PX: f64 = 280.0;

/// Width the side panel keeps when collapsed, in CSS pixels.
pub const SIDEBAR_COLLAPSED_WIDTH_PX: f64 = 40.0;

/// Height reserved for the top header bar, in CSS pixels.
pub const HEADER_HEIGHT_PX: f64 = 56.0;

/// Height the open selection surface takes from the stage, in CSS pixels.
pub const TRAY_HEIGHT_PX: f64 = 180.0;

// ── Selection surface ───────────────────────────────────────────

/// Width of one product cell in the selection surface, in CSS pixels.
pub const TRAY_ITEM_WIDTH_PX: f64 = 140.0;

/// Horizontal gap between product cells in the selection surface.
pub const TRAY_ITEM_GAP_PX: f64 = 16.0;

/// Quiet period with no scroll events before the surface snaps, in ms.
pub const SCROLL_SETTLE_MS: u32 = 150;

// ── Gestures ────────────────────────────────────────────────────

/// Screen-space movement below which a press-release counts as a tap.
pub const TAP_SLOP_PX: f64 = 4.0;

/// Screen-space hit slop around a placed product's hotspot marker.
pub const HOTSPOT_RADIUS_PX: f64 = 14.0;

/// Logical-unit movement below which a drag end is not persisted.
pub const DRAG_COMMIT_EPSILON: f64 = 0.01;

// ── Stage floor ─────────────────────────────────────────────────

/// Smallest stage dimension the layout math will report, in CSS pixels.
pub const MIN_STAGE_SIZE_PX: f64 = 1.0;
