//! REST API helpers for communicating with the persistence collaborator.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/`false` since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`bool` outputs instead of panics so persistence
//! failures degrade to notifications without crashing hydration. Position
//! updates are fire-and-forget: the caller only learns success/failure, the
//! optimistic local state stays.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{Created, ProductCreated, SceneSummary, SpaceDetail, Uploaded};

#[cfg(any(test, feature = "hydrate"))]
fn scenes_endpoint() -> String {
    "/api/scenes".to_owned()
}

#[cfg(any(test, feature = "hydrate"))]
fn scene_endpoint(scene_id: &str) -> String {
    format!("/api/scenes/{scene_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn spaces_endpoint(scene_id: &str) -> String {
    format!("/api/scenes/{scene_id}/spaces")
}

#[cfg(any(test, feature = "hydrate"))]
fn space_endpoint(scene_id: &str, space_id: &str) -> String {
    format!("/api/scenes/{scene_id}/spaces/{space_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn placements_endpoint(scene_id: &str, space_id: &str) -> String {
    format!("/api/scenes/{scene_id}/spaces/{space_id}/placements")
}

#[cfg(any(test, feature = "hydrate"))]
fn placement_endpoint(placement_id: &str) -> String {
    format!("/api/placements/{placement_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn placement_images_endpoint(placement_id: &str) -> String {
    format!("/api/placements/{placement_id}/images")
}

#[cfg(any(test, feature = "hydrate"))]
fn placement_active_endpoint(placement_id: &str) -> String {
    format!("/api/placements/{placement_id}/active")
}

#[cfg(any(test, feature = "hydrate"))]
fn product_endpoint(product_id: &str) -> String {
    format!("/api/images/{product_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn product_position_endpoint(product_id: &str) -> String {
    format!("/api/images/{product_id}/position")
}

/// Fetch all scenes with nested space summaries.
/// Returns `None` on failure or on the server.
pub async fn fetch_scenes() -> Option<Vec<SceneSummary>> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&scenes_endpoint())
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Vec<SceneSummary>>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Fetch the full placement/product tree for one space.
pub async fn fetch_space_detail(scene_id: &str, space_id: &str) -> Option<SpaceDetail> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&space_endpoint(scene_id, space_id))
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<SpaceDetail>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (scene_id, space_id);
        None
    }
}

/// Create a scene; returns the server-issued identifier on success.
pub async fn create_scene(name: &str, background: &str) -> Option<Created> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "name": name, "background": background });
        post_created(&scenes_endpoint(), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, background);
        None
    }
}

/// Delete a scene and everything under it.
pub async fn delete_scene(scene_id: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        delete(&scene_endpoint(scene_id)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = scene_id;
        false
    }
}

/// Create a space; returns the server-issued identifier on success.
pub async fn create_space(scene_id: &str, name: &str) -> Option<Created> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "name": name });
        post_created(&spaces_endpoint(scene_id), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (scene_id, name);
        None
    }
}

/// Rename a space.
pub async fn rename_space(scene_id: &str, space_id: &str, name: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "name": name });
        patch(&space_endpoint(scene_id, space_id), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (scene_id, space_id, name);
        false
    }
}

/// Delete a space and everything under it.
pub async fn delete_space(scene_id: &str, space_id: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        delete(&space_endpoint(scene_id, space_id)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (scene_id, space_id);
        false
    }
}

/// Create a placement; returns the server-issued identifier on success.
pub async fn create_placement(scene_id: &str, space_id: &str, name: &str) -> Option<Created> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "name": name });
        post_created(&placements_endpoint(scene_id, space_id), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (scene_id, space_id, name);
        None
    }
}

/// Rename a placement.
pub async fn rename_placement(placement_id: &str, name: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "name": name });
        patch(&placement_endpoint(placement_id), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (placement_id, name);
        false
    }
}

/// Delete a placement and its images.
pub async fn delete_placement(placement_id: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        delete(&placement_endpoint(placement_id)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = placement_id;
        false
    }
}

/// Create a placement image; returns identifier, name, and image reference.
pub async fn create_product(
    placement_id: &str,
    name: &str,
    image: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Option<ProductCreated> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({
            "name": name,
            "image": image,
            "x": x,
            "y": y,
            "width": width,
            "height": height,
        });
        let resp = gloo_net::http::Request::post(&placement_images_endpoint(placement_id))
            .json(&payload)
            .ok()?
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<ProductCreated>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (placement_id, name, image, x, y, width, height);
        None
    }
}

/// Update a placement image's name and/or image reference.
pub async fn update_product(product_id: &str, name: Option<&str>, image: Option<&str>) -> bool {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "name": name, "image": image });
        patch(&product_endpoint(product_id), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (product_id, name, image);
        false
    }
}

/// Delete a placement image.
pub async fn delete_product(product_id: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        delete(&product_endpoint(product_id)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = product_id;
        false
    }
}

/// Persist an active-image switch. Idempotent on the server side; the local
/// switch has already happened when this is called.
pub async fn set_active_product(placement_id: &str, product_id: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "product_id": product_id });
        patch(&placement_active_endpoint(placement_id), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (placement_id, product_id);
        false
    }
}

/// Persist a drag result. Fire-and-forget: the local position stays
/// regardless of the outcome.
pub async fn update_product_position(product_id: &str, x: f64, y: f64) -> bool {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "x": x, "y": y });
        patch(&product_position_endpoint(product_id), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (product_id, x, y);
        false
    }
}

/// Upload an image asset and return its opaque storable reference.
pub async fn upload_asset(filename: &str, bytes: Vec<u8>) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("/api/assets?filename={filename}");
        let resp = gloo_net::http::Request::post(&url)
            .header("content-type", "application/octet-stream")
            .body(js_sys::Uint8Array::from(bytes.as_slice()))
            .ok()?
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Uploaded>().await.ok().map(|u| u.reference)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (filename, bytes);
        None
    }
}

// ── Shared request plumbing ─────────────────────────────────────

#[cfg(feature = "hydrate")]
async fn post_created(url: &str, payload: &serde_json::Value) -> Option<Created> {
    let resp = gloo_net::http::Request::post(url)
        .json(payload)
        .ok()?
        .send()
        .await
        .ok()?;
    if !resp.ok() {
        return None;
    }
    resp.json::<Created>().await.ok()
}

#[cfg(feature = "hydrate")]
async fn patch(url: &str, payload: &serde_json::Value) -> bool {
    let Ok(req) = gloo_net::http::Request::patch(url).json(payload) else {
        return false;
    };
    match req.send().await {
        Ok(resp) => resp.ok(),
        Err(_) => false,
    }
}

#[cfg(feature = "hydrate")]
async fn delete(url: &str) -> bool {
    match gloo_net::http::Request::delete(url).send().await {
        Ok(resp) => resp.ok(),
        Err(_) => false,
    }
}
