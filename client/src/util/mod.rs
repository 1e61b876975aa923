//! Client-side glue between the wire, the engine, and the DOM.
//!
//! SYSTEM CONTEXT
//! ==============
//! `wire` converts DTOs into engine model types, `space_loader` runs the
//! guarded space-detail fetch, `position_sync` turns engine actions into
//! persistence calls, and `tray_scroll` debounces the selection surface's
//! settle-then-snap behavior.

pub mod position_sync;
pub mod space_loader;
pub mod tray_scroll;
pub mod wire;
