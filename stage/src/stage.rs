//! Stage layout: the screen area left for the scene after chrome.
//!
//! Only three environmental triggers may change the layout — window resize,
//! sidebar collapse/expand, and the selection surface opening or closing.
//! [`crate::engine::EngineCore`] recomputes the transform exclusively from
//! its layout setters, so unrelated model edits (renames, product updates)
//! can never shift the scale.

#[cfg(test)]
#[path = "stage_test.rs"]
mod stage_test;

use crate::consts::{
    HEADER_HEIGHT_PX, MIN_STAGE_SIZE_PX, SIDEBAR_COLLAPSED_WIDTH_PX, SIDEBAR_WIDTH_PX, TRAY_HEIGHT_PX,
};
use crate::geom::Size;

/// Environmental inputs the stage size depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageLayout {
    /// Full window size in CSS pixels.
    pub window: Size,
    /// Whether the side panel is expanded.
    pub sidebar_expanded: bool,
    /// Whether the selection surface is taking height from the stage.
    pub surface_open: bool,
}

impl Default for StageLayout {
    fn default() -> Self {
        Self {
            window: Size::new(0.0, 0.0),
            sidebar_expanded: true,
            surface_open: false,
        }
    }
}

impl StageLayout {
    /// The stage area available to the scene: window minus reserved panel,
    /// header, and (when open) surface space, floored so the transform math
    /// stays finite.
    #[must_use]
    pub fn stage_size(&self) -> Size {
        let sidebar = if self.sidebar_expanded {
            SIDEBAR_WIDTH_PX
        } else {
            SIDEBAR_COLLAPSED_WIDTH_PX
        };
        let tray = if self.surface_open { TRAY_HEIGHT_PX } else { 0.0 };
        Size::new(
            (self.window.width - sidebar).max(MIN_STAGE_SIZE_PX),
            (self.window.height - HEADER_HEIGHT_PX - tray).max(MIN_STAGE_SIZE_PX),
        )
    }
}
