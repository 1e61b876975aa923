//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render editor chrome and interaction surfaces while
//! reading/writing shared state from Leptos context providers. The stage
//! host and selection tray are the two bridges into the `stage` engine.

pub mod notifications;
pub mod scene_card;
pub mod scene_panel;
pub mod selection_tray;
pub mod stage_host;
pub mod status_bar;
