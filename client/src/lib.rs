//! # client
//!
//! Leptos + WASM frontend for the showroom scene composer.
//!
//! This crate contains pages, components, application state, network types,
//! and the REST API layer. It hosts the `stage` crate's scene-composition
//! engine: DOM events flow into [`stage::engine::EngineCore`], and the
//! engine's actions flow back out as persistence calls.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point for hydration.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(crate::app::App);
}
