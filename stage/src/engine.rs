//! Top-level engine: ties the store, transform, gesture machine, and
//! selection surface together behind one testable core.
//!
//! ARCHITECTURE
//! ============
//! The host (a web client, a test harness) feeds pointer events and
//! environmental changes in; the engine mutates its state synchronously and
//! returns [`Action`] values describing what the host must do next — persist
//! a position, persist an active-image switch, replay a scroll offset, or
//! repaint. No suspension point exists inside the engine: every local
//! transition completes before any persistence round-trip starts.
//!
//! Structural loads are guarded here: a space-detail payload only applies
//! when its target ids still match the current selection, so a superseded
//! in-flight fetch can never overwrite state for a space the user has
//! already left.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashSet;

use crate::consts::DRAG_COMMIT_EPSILON;
use crate::geom::{Point, Size, StageTransform};
use crate::hit;
use crate::input::{DragState, GestureEnd};
use crate::model::{PlacedProduct, PlacementId, ProductId, SceneId, Space, SpaceId};
use crate::stage::StageLayout;
use crate::store::{HierarchyStore, PlacementPath, ProductPath, Snapshot, SpacePath, StoreError};
use crate::surface::{SurfaceConfig, SurfaceController, SurfaceState};

/// Work the host must perform after an engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A drag ended: persist the product's new logical position.
    PositionCommitted { path: ProductPath, position: Point },
    /// The active image switched: persist the new reference.
    ActiveSwitched { path: PlacementPath, product_id: ProductId },
    /// The selection surface began opening; apply the given scroll offset.
    SurfaceOpened { placement_id: PlacementId, scroll_to: f64 },
    /// The settle snapped the surface; replay this scroll offset in the DOM.
    SurfaceSnapped { scroll_to: f64 },
    /// The selected placement changed.
    SelectionChanged { placement_id: Option<PlacementId> },
    /// Something visible changed; repaint.
    RenderNeeded,
}

/// Core engine state — everything that doesn't depend on a browser.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    store: HierarchyStore,
    surface: SurfaceController,
    drag: DragState,
    layout: StageLayout,
    transform: StageTransform,
    selected_scene: Option<SceneId>,
    selected_space: Option<SpaceId>,
    selected_placement: Option<PlacementId>,
    /// Live logical position of the product under an in-progress drag.
    drag_preview: Option<(ProductId, Point)>,
    /// Products whose image failed to load; hidden, not fatal.
    failed_assets: HashSet<ProductId>,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_surface_config(config: SurfaceConfig) -> Self {
        Self { surface: SurfaceController::new(config), ..Self::default() }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// The latest tree snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Direct access to the hierarchy store for structural mutations that
    /// carry no UI-state implications (creates, renames, reconciliation).
    pub fn store_mut(&mut self) -> &mut HierarchyStore {
        &mut self.store
    }

    #[must_use]
    pub fn selected_scene(&self) -> Option<SceneId> {
        self.selected_scene
    }

    #[must_use]
    pub fn selected_space(&self) -> Option<SpaceId> {
        self.selected_space
    }

    #[must_use]
    pub fn selected_placement(&self) -> Option<PlacementId> {
        self.selected_placement
    }

    /// The current logical→screen transform.
    #[must_use]
    pub fn transform(&self) -> StageTransform {
        self.transform
    }

    /// The current environmental layout inputs.
    #[must_use]
    pub fn layout(&self) -> StageLayout {
        self.layout
    }

    #[must_use]
    pub fn surface_state(&self) -> SurfaceState {
        self.surface.state()
    }

    /// Surface controller, for the tray renderer's derived state.
    #[must_use]
    pub fn surface(&self) -> &SurfaceController {
        &self.surface
    }

    /// Whether a drag gesture is currently in progress.
    #[must_use]
    pub fn dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    // ── Environmental triggers (the viewport reactor) ───────────

    /// Window (or hosting element) resized.
    pub fn set_viewport(&mut self, window: Size) {
        self.layout.window = window;
        self.recompute_transform();
    }

    /// Sidebar collapsed or expanded.
    pub fn set_sidebar_expanded(&mut self, expanded: bool) {
        self.layout.sidebar_expanded = expanded;
        self.recompute_transform();
    }

    // ── Selection ───────────────────────────────────────────────

    /// Load the full scene list (replacing the tree).
    pub fn load_scenes(&mut self, scenes: Vec<crate::model::Scene>) -> Snapshot {
        self.store.load_scenes(scenes)
    }

    /// Select a scene, clearing space/placement selection.
    pub fn select_scene(&mut self, scene: Option<SceneId>) {
        self.selected_scene = scene;
        self.selected_space = None;
        self.selected_placement = None;
        self.reset_interaction();
        self.recompute_transform();
    }

    /// Select a space within the selected scene. Changing space resets the
    /// gesture and surface and recomputes the transform (the effective
    /// background may differ).
    pub fn select_space(&mut self, space: Option<SpaceId>) {
        self.selected_space = space;
        self.selected_placement = None;
        self.reset_interaction();
        self.recompute_transform();
    }

    /// Select a placement (the draggable one).
    pub fn select_placement(&mut self, placement: Option<PlacementId>) {
        self.selected_placement = placement;
    }

    /// Apply a fetched space detail if — and only if — the fetch targets the
    /// currently selected scene and space. Returns whether it applied; a
    /// stale payload is discarded without error.
    pub fn load_space_detail(&mut self, scene: SceneId, space: SpaceId, detail: Space) -> bool {
        if self.selected_scene != Some(scene) || self.selected_space != Some(space) {
            return false;
        }
        let path = SpacePath { scene, space };
        if self.store.replace_space(path, detail).is_err() {
            return false;
        }
        // The payload may have dropped the selected placement.
        if let Some(placement) = self.selected_placement {
            let still_there = self
                .snapshot()
                .placement(PlacementPath { scene, space, placement })
                .is_some();
            if !still_there {
                self.selected_placement = None;
            }
        }
        self.recompute_transform();
        true
    }

    /// Record the measured natural size of the selected scene's background
    /// and derive the first real transform from it.
    pub fn measure_background(&mut self, scene: SceneId, size: Size) {
        if self.store.set_scene_background_size(scene, size).is_ok() {
            self.recompute_transform();
        }
    }

    // ── Structural mutations with UI-state implications ─────────

    /// Delete a space; clears the selection and interaction state when the
    /// deleted space (or something under it) was selected.
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error from the store.
    pub fn delete_space(&mut self, path: SpacePath) -> Result<Snapshot, StoreError> {
        let snapshot = self.store.delete_space(path)?;
        if self.selected_space == Some(path.space) {
            self.selected_space = None;
            self.selected_placement = None;
            self.reset_interaction();
            self.recompute_transform();
        }
        Ok(snapshot)
    }

    /// Delete a placement; clears the placement selection when it was the
    /// selected one and closes the surface if it was showing it.
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error from the store.
    pub fn delete_placement(&mut self, path: PlacementPath) -> Result<Snapshot, StoreError> {
        let snapshot = self.store.delete_placement(path)?;
        if self.selected_placement == Some(path.placement) {
            self.selected_placement = None;
        }
        if self.surface.placement() == Some(path.placement) {
            self.surface.request_close();
            self.surface.finish_close();
            self.layout.surface_open = false;
            self.recompute_transform();
        }
        Ok(snapshot)
    }

    /// Remove a product, keeping the open surface's list in sync.
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error from the store.
    pub fn remove_product(&mut self, path: ProductPath) -> Result<Snapshot, StoreError> {
        let snapshot = self.store.remove_product(path)?;
        self.failed_assets.remove(&path.product);
        if self.surface.placement() == Some(path.placement) {
            let products = snapshot
                .placement(path.placement_path())
                .map(|p| p.products.iter().map(|product| product.id).collect())
                .unwrap_or_default();
            self.surface.sync_products(products);
        }
        Ok(snapshot)
    }

    /// Switch a placement's active product (optimistically; the host
    /// persists via the returned action elsewhere).
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error from the store.
    pub fn set_active(&mut self, path: PlacementPath, product_id: ProductId) -> Result<Snapshot, StoreError> {
        self.store.set_active(path, product_id)
    }

    /// A product's image failed to decode; hide it without failing the tree.
    pub fn mark_asset_failed(&mut self, product: ProductId) {
        self.failed_assets.insert(product);
    }

    /// A product's image loaded (or re-loaded) successfully.
    pub fn mark_asset_loaded(&mut self, product: ProductId) {
        self.failed_assets.remove(&product);
    }

    // ── Pointer events ──────────────────────────────────────────

    /// Pointer pressed on the stage at `screen`.
    pub fn on_pointer_down(&mut self, screen: Point) -> Vec<Action> {
        if self.surface_state() != SurfaceState::Closed {
            return Vec::new();
        }
        let placed = self.placed();
        let Some(hit) = hit::hit_test(&placed, screen) else {
            return Vec::new();
        };
        let Some(placement_path) = self.placement_path(hit.placement_id) else {
            return Vec::new();
        };
        let path = ProductPath {
            scene: placement_path.scene,
            space: placement_path.space,
            placement: placement_path.placement,
            product: hit.product_id,
        };
        let snapshot = self.store.snapshot();
        let Some(product) = snapshot.product(path) else {
            return Vec::new();
        };
        let orig = Point::new(product.x, product.y);
        self.drag = DragState::press(hit.product_id, hit.placement_id, screen, orig, hit.interactive);
        Vec::new()
    }

    /// Pointer moved to `screen`.
    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        self.drag = self.drag.moved(screen);
        if let Some((product_id, logical)) = self.drag.drag_position(screen, self.transform.scale) {
            self.drag_preview = Some((product_id, logical));
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    /// Pointer released at `screen`.
    pub fn on_pointer_up(&mut self, screen: Point) -> Vec<Action> {
        let (next, end) = self.drag.release(screen, self.transform.scale);
        self.drag = next;
        self.drag_preview = None;
        match end {
            GestureEnd::Tap { placement_id, .. } => self.tap(placement_id),
            GestureEnd::Drop { product_id, placement_id, orig_logical, new_logical } => {
                self.drop_product(product_id, placement_id, orig_logical, new_logical)
            }
            GestureEnd::None => Vec::new(),
        }
    }

    /// A key was pressed while the stage has focus.
    pub fn on_key_down(&mut self, key: &str) -> Vec<Action> {
        if key == "Escape" {
            if matches!(self.surface_state(), SurfaceState::Opening | SurfaceState::Open) {
                self.surface.request_close();
                return vec![Action::RenderNeeded];
            }
            if !matches!(self.drag, DragState::Idle) {
                self.drag = self.drag.cancel();
                self.drag_preview = None;
                return vec![Action::RenderNeeded];
            }
        }
        Vec::new()
    }

    // ── Selection surface ───────────────────────────────────────

    /// The host's open transition completed.
    pub fn finish_surface_open(&mut self) {
        self.surface.finish_open();
    }

    /// Explicitly start closing the surface.
    pub fn close_surface(&mut self) {
        self.surface.request_close();
    }

    /// The host's close transition completed; the stage gets its height
    /// back, which is an environmental trigger.
    pub fn finish_surface_close(&mut self) {
        self.surface.finish_close();
        if self.layout.surface_open {
            self.layout.surface_open = false;
            self.recompute_transform();
        }
    }

    /// Raw scroll offset from the surface strip.
    pub fn surface_scroll(&mut self, scroll_x: f64) -> usize {
        self.surface.scroll(scroll_x)
    }

    /// The debounced quiet period elapsed: snap, and promote the centered
    /// product when configured.
    pub fn surface_settle(&mut self) -> Vec<Action> {
        let Some(settle) = self.surface.settle() else {
            return Vec::new();
        };
        let mut actions = vec![Action::SurfaceSnapped { scroll_to: settle.scroll_to }];
        if let Some(product_id) = settle.promote {
            actions.extend(self.promote(product_id));
        }
        actions
    }

    /// Explicit tap on a product cell inside the surface.
    pub fn surface_select(&mut self, product_id: ProductId) -> Vec<Action> {
        let mut actions = self.promote(product_id);
        if self.surface.selected() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // ── Projection ──────────────────────────────────────────────

    /// Resolve the selected space's visible placements to screen-space
    /// placed-product records for the current transform. Recomputed on
    /// demand; never stored.
    #[must_use]
    pub fn placed(&self) -> Vec<PlacedProduct> {
        let snapshot = self.store.snapshot();
        let Some(space) = self.selected_space_ref(&snapshot) else {
            return Vec::new();
        };
        let mut placed = Vec::new();
        for placement in &space.placements {
            if !placement.visible {
                continue;
            }
            let Some(product) = placement.active() else {
                continue;
            };
            if self.failed_assets.contains(&product.id) {
                continue;
            }
            let mut logical = Point::new(product.x, product.y);
            if let Some((dragged, preview)) = self.drag_preview {
                if dragged == product.id {
                    logical = preview;
                }
            }
            let screen = self.transform.to_screen(logical);
            let size = self.transform.size_to_screen(Size::new(product.width, product.height));
            placed.push(PlacedProduct {
                product_id: product.id,
                placement_id: placement.id,
                image: product.image.clone(),
                x: screen.x,
                y: screen.y,
                width: size.width,
                height: size.height,
                active: product.active,
                interactive: self.selected_placement == Some(placement.id),
            });
        }
        placed
    }

    // ── Internals ───────────────────────────────────────────────

    fn tap(&mut self, placement_id: PlacementId) -> Vec<Action> {
        let snapshot = self.store.snapshot();
        let Some(path) = self.placement_path(placement_id) else {
            return Vec::new();
        };
        let Some(placement) = snapshot.placement(path) else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        if self.selected_placement != Some(placement_id) {
            self.selected_placement = Some(placement_id);
            actions.push(Action::SelectionChanged { placement_id: Some(placement_id) });
        }

        let products: Vec<ProductId> = placement.products.iter().map(|p| p.id).collect();
        let active_index = placement.active_index().unwrap_or(0);
        let scroll_to = self.surface.open(placement_id, products, active_index);
        if self.surface_state() == SurfaceState::Opening {
            self.layout.surface_open = true;
            self.recompute_transform();
            actions.push(Action::SurfaceOpened { placement_id, scroll_to });
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    fn drop_product(
        &mut self,
        product_id: ProductId,
        placement_id: PlacementId,
        orig_logical: Point,
        new_logical: Point,
    ) -> Vec<Action> {
        let Some(placement_path) = self.placement_path(placement_id) else {
            return vec![Action::RenderNeeded];
        };
        let path = ProductPath {
            scene: placement_path.scene,
            space: placement_path.space,
            placement: placement_path.placement,
            product: product_id,
        };
        let moved = (new_logical.x - orig_logical.x).abs() > DRAG_COMMIT_EPSILON
            || (new_logical.y - orig_logical.y).abs() > DRAG_COMMIT_EPSILON;
        if !moved {
            return vec![Action::RenderNeeded];
        }
        if self.store.set_product_position(path, new_logical).is_err() {
            return vec![Action::RenderNeeded];
        }
        vec![
            Action::PositionCommitted { path, position: new_logical },
            Action::RenderNeeded,
        ]
    }

    fn promote(&mut self, product_id: ProductId) -> Vec<Action> {
        let Some(placement_id) = self.surface.placement() else {
            return Vec::new();
        };
        let Some(path) = self.placement_path(placement_id) else {
            return Vec::new();
        };
        let before = self
            .store
            .snapshot()
            .placement(path)
            .and_then(|p| p.active_product);
        if before == Some(product_id) {
            return Vec::new();
        }
        if self.store.set_active(path, product_id).is_err() {
            return Vec::new();
        }
        let after = self
            .store
            .snapshot()
            .placement(path)
            .and_then(|p| p.active_product);
        if after == Some(product_id) {
            vec![Action::ActiveSwitched { path, product_id }, Action::RenderNeeded]
        } else {
            // Non-member promotion: a stale reference, silently dropped.
            Vec::new()
        }
    }

    fn placement_path(&self, placement: PlacementId) -> Option<PlacementPath> {
        let scene = self.selected_scene?;
        let space = self.selected_space?;
        Some(PlacementPath { scene, space, placement })
    }

    fn selected_space_ref<'a>(&self, snapshot: &'a Snapshot) -> Option<&'a Space> {
        let scene = self.selected_scene?;
        let space = self.selected_space?;
        snapshot.space(SpacePath { scene, space })
    }

    fn reset_interaction(&mut self) {
        self.drag = DragState::Idle;
        self.drag_preview = None;
        if self.surface.state() != SurfaceState::Closed {
            self.surface.request_close();
            self.surface.finish_close();
        }
        self.layout.surface_open = false;
    }

    fn recompute_transform(&mut self) {
        let snapshot = self.store.snapshot();
        let background = self.selected_scene.and_then(|scene_id| {
            let scene = snapshot.scene(scene_id)?;
            match self.selected_space_ref(&snapshot) {
                Some(space) => scene.background_for(space).1,
                None => scene.background_size,
            }
        });
        self.transform = match background {
            Some(bg) => StageTransform::covering(bg, self.layout.stage_size()),
            None => StageTransform::default(),
        };
    }
}
