//! Hierarchy store: the single source of truth for the scene tree.
//!
//! DESIGN
//! ======
//! Every mutation validates against the current tree, builds the next tree,
//! and atomically swaps it in, returning a new immutable [`Snapshot`].
//! Callers holding an older snapshot never observe later edits. A failed
//! validation leaves the store untouched.
//!
//! Mutations are addressed by full path (scene id → space id → placement id)
//! rather than flat id lookup, so edits on one branch can never corrupt a
//! sibling branch even when ids collide across levels.
//!
//! Structural creates insert a locally generated id immediately; once the
//! persistence collaborator confirms, `reconcile_*_id` rewrites the
//! temporary id in place.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use uuid::Uuid;

use crate::active;
use crate::geom::{Point, Size};
use crate::model::{
    ImageRef, Placement, PlacementId, Product, ProductId, Scene, SceneId, Space, SpaceId,
};

/// Why a store operation was rejected. The tree is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A create or rename was given an empty (after trimming) name.
    #[error("name must not be empty")]
    EmptyName,
    /// No scene with the given id exists.
    #[error("unknown scene {0}")]
    UnknownScene(SceneId),
    /// No space with the given id exists under the addressed scene.
    #[error("unknown space {0}")]
    UnknownSpace(SpaceId),
    /// No placement with the given id exists under the addressed space.
    #[error("unknown placement {0}")]
    UnknownPlacement(PlacementId),
    /// No product with the given id exists under the addressed placement.
    #[error("unknown product {0}")]
    UnknownProduct(ProductId),
}

/// Full path to a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacePath {
    pub scene: SceneId,
    pub space: SpaceId,
}

/// Full path to a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPath {
    pub scene: SceneId,
    pub space: SpaceId,
    pub placement: PlacementId,
}

impl PlacementPath {
    /// The space component of this path.
    #[must_use]
    pub fn space_path(&self) -> SpacePath {
        SpacePath { scene: self.scene, space: self.space }
    }
}

/// Full path to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductPath {
    pub scene: SceneId,
    pub space: SpaceId,
    pub placement: PlacementId,
    pub product: ProductId,
}

impl ProductPath {
    /// The placement component of this path.
    #[must_use]
    pub fn placement_path(&self) -> PlacementPath {
        PlacementPath { scene: self.scene, space: self.space, placement: self.placement }
    }
}

/// An immutable view of the whole scene tree at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    scenes: Arc<Vec<Scene>>,
}

impl Snapshot {
    /// All scenes in display order.
    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Look up a scene by id.
    #[must_use]
    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// Resolve a space path.
    #[must_use]
    pub fn space(&self, path: SpacePath) -> Option<&Space> {
        self.scene(path.scene)?.space(path.space)
    }

    /// Resolve a placement path.
    #[must_use]
    pub fn placement(&self, path: PlacementPath) -> Option<&Placement> {
        self.space(path.space_path())?.placement(path.placement)
    }

    /// Resolve a product path.
    #[must_use]
    pub fn product(&self, path: ProductPath) -> Option<&Product> {
        self.placement(path.placement_path())?
            .products
            .iter()
            .find(|p| p.id == path.product)
    }
}

/// Owner of the scene tree. All structural mutations funnel through here and
/// are applied sequentially; each returns the snapshot it produced.
#[derive(Debug, Clone, Default)]
pub struct HierarchyStore {
    current: Snapshot,
}

impl HierarchyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    /// Replace the whole tree from a fetched scene list.
    pub fn load_scenes(&mut self, mut scenes: Vec<Scene>) -> Snapshot {
        for scene in &mut scenes {
            for space in &mut scene.spaces {
                for placement in &mut space.placements {
                    active::normalize(placement);
                }
            }
        }
        self.current = Snapshot { scenes: Arc::new(scenes) };
        self.current.clone()
    }

    /// Replace one space's content from a fetched space detail.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownScene`] or [`StoreError::UnknownSpace`]
    /// when the path no longer resolves.
    pub fn replace_space(&mut self, path: SpacePath, mut detail: Space) -> Result<Snapshot, StoreError> {
        detail.id = path.space;
        for placement in &mut detail.placements {
            active::normalize(placement);
        }
        self.mutate(|scenes| {
            let space = space_mut(scenes, path)?;
            *space = detail;
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    // ── Scene operations ────────────────────────────────────────

    /// Create a scene with a locally generated id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyName`] when the trimmed name is empty.
    pub fn create_scene(
        &mut self,
        name: &str,
        background: ImageRef,
        tag: Option<String>,
    ) -> Result<(SceneId, Snapshot), StoreError> {
        let name = valid_name(name)?;
        let id = Uuid::new_v4();
        self.mutate(|scenes| {
            scenes.push(Scene {
                id,
                name,
                background,
                background_size: None,
                tag,
                spaces: Vec::new(),
            });
            Ok(id)
        })
    }

    /// Rename a scene.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyName`] or [`StoreError::UnknownScene`].
    pub fn rename_scene(&mut self, id: SceneId, name: &str) -> Result<Snapshot, StoreError> {
        let name = valid_name(name)?;
        self.mutate(|scenes| {
            scene_mut(scenes, id)?.name = name;
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    /// Delete a scene and everything under it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownScene`].
    pub fn delete_scene(&mut self, id: SceneId) -> Result<Snapshot, StoreError> {
        self.mutate(|scenes| {
            let index = scenes.iter().position(|s| s.id == id).ok_or(StoreError::UnknownScene(id))?;
            scenes.remove(index);
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    /// Record the background image's measured natural size.
    ///
    /// The size is fixed once measured; later calls for the same scene are
    /// no-ops so a re-decode cannot shift stored geometry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownScene`].
    pub fn set_scene_background_size(&mut self, id: SceneId, size: Size) -> Result<Snapshot, StoreError> {
        self.mutate(|scenes| {
            let scene = scene_mut(scenes, id)?;
            if scene.background_size.is_none() {
                scene.background_size = Some(size);
            }
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    // ── Space operations ────────────────────────────────────────

    /// Create a space under a scene with a locally generated id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyName`] or [`StoreError::UnknownScene`].
    pub fn create_space(&mut self, scene: SceneId, name: &str) -> Result<(SpaceId, Snapshot), StoreError> {
        let name = valid_name(name)?;
        let id = Uuid::new_v4();
        self.mutate(|scenes| {
            scene_mut(scenes, scene)?.spaces.push(Space {
                id,
                name,
                background: None,
                background_size: None,
                placements: Vec::new(),
            });
            Ok(id)
        })
    }

    /// Rename a space.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyName`] or an unknown-path error.
    pub fn rename_space(&mut self, path: SpacePath, name: &str) -> Result<Snapshot, StoreError> {
        let name = valid_name(name)?;
        self.mutate(|scenes| {
            space_mut(scenes, path)?.name = name;
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    /// Delete a space and all placements/products under it.
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error.
    pub fn delete_space(&mut self, path: SpacePath) -> Result<Snapshot, StoreError> {
        self.mutate(|scenes| {
            let scene = scene_mut(scenes, path.scene)?;
            let index = scene
                .spaces
                .iter()
                .position(|s| s.id == path.space)
                .ok_or(StoreError::UnknownSpace(path.space))?;
            scene.spaces.remove(index);
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    /// Move a space to a new index within its scene.
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error.
    pub fn reorder_space(&mut self, path: SpacePath, new_index: usize) -> Result<Snapshot, StoreError> {
        self.mutate(|scenes| {
            let scene = scene_mut(scenes, path.scene)?;
            let index = scene
                .spaces
                .iter()
                .position(|s| s.id == path.space)
                .ok_or(StoreError::UnknownSpace(path.space))?;
            let space = scene.spaces.remove(index);
            let target = new_index.min(scene.spaces.len());
            scene.spaces.insert(target, space);
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    // ── Placement operations ────────────────────────────────────

    /// Create a placement under a space with a locally generated id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyName`] or an unknown-path error.
    pub fn create_placement(&mut self, path: SpacePath, name: &str) -> Result<(PlacementId, Snapshot), StoreError> {
        let name = valid_name(name)?;
        let id = Uuid::new_v4();
        self.mutate(|scenes| {
            space_mut(scenes, path)?.placements.push(Placement {
                id,
                name,
                visible: true,
                products: Vec::new(),
                active_product: None,
            });
            Ok(id)
        })
    }

    /// Rename a placement.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyName`] or an unknown-path error.
    pub fn rename_placement(&mut self, path: PlacementPath, name: &str) -> Result<Snapshot, StoreError> {
        let name = valid_name(name)?;
        self.mutate(|scenes| {
            placement_mut(scenes, path)?.name = name;
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    /// Delete a placement and its products.
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error.
    pub fn delete_placement(&mut self, path: PlacementPath) -> Result<Snapshot, StoreError> {
        self.mutate(|scenes| {
            let space = space_mut(scenes, path.space_path())?;
            let index = space
                .placements
                .iter()
                .position(|p| p.id == path.placement)
                .ok_or(StoreError::UnknownPlacement(path.placement))?;
            space.placements.remove(index);
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    /// Show or hide a placement.
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error.
    pub fn set_placement_visible(&mut self, path: PlacementPath, visible: bool) -> Result<Snapshot, StoreError> {
        self.mutate(|scenes| {
            placement_mut(scenes, path)?.visible = visible;
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    /// Move a placement to a new index within its space.
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error.
    pub fn reorder_placement(&mut self, path: PlacementPath, new_index: usize) -> Result<Snapshot, StoreError> {
        self.mutate(|scenes| {
            let space = space_mut(scenes, path.space_path())?;
            let index = space
                .placements
                .iter()
                .position(|p| p.id == path.placement)
                .ok_or(StoreError::UnknownPlacement(path.placement))?;
            let placement = space.placements.remove(index);
            let target = new_index.min(space.placements.len());
            space.placements.insert(target, placement);
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    // ── Product operations ──────────────────────────────────────

    /// Add a product to a placement with a locally generated id.
    ///
    /// The first product added to an empty placement becomes active.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyName`] or an unknown-path error.
    pub fn add_product(
        &mut self,
        path: PlacementPath,
        name: &str,
        image: ImageRef,
        position: Point,
        size: Size,
    ) -> Result<(ProductId, Snapshot), StoreError> {
        let name = valid_name(name)?;
        let id = Uuid::new_v4();
        self.mutate(|scenes| {
            let placement = placement_mut(scenes, path)?;
            let first = placement.products.is_empty();
            placement.products.push(Product {
                id,
                name,
                image,
                x: position.x,
                y: position.y,
                width: size.width,
                height: size.height,
                active: first,
            });
            if first {
                placement.active_product = Some(id);
            }
            Ok(id)
        })
    }

    /// Update a product's name and/or image reference.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyName`] or an unknown-path error.
    pub fn update_product(
        &mut self,
        path: ProductPath,
        name: Option<&str>,
        image: Option<ImageRef>,
    ) -> Result<Snapshot, StoreError> {
        let name = name.map(valid_name).transpose()?;
        self.mutate(|scenes| {
            let product = product_mut(scenes, path)?;
            if let Some(name) = name {
                product.name = name;
            }
            if let Some(image) = image {
                product.image = image;
            }
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    /// Write a product's logical position (the drag-end hot path).
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error.
    pub fn set_product_position(&mut self, path: ProductPath, position: Point) -> Result<Snapshot, StoreError> {
        self.mutate(|scenes| {
            let product = product_mut(scenes, path)?;
            product.x = position.x;
            product.y = position.y;
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    /// Remove a product, reassigning the active reference per
    /// [`active::remove_product`].
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error.
    pub fn remove_product(&mut self, path: ProductPath) -> Result<Snapshot, StoreError> {
        self.mutate(|scenes| {
            let placement = placement_mut(scenes, path.placement_path())?;
            active::remove_product(placement, path.product)
                .map(|_| ())
                .ok_or(StoreError::UnknownProduct(path.product))
        })
        .map(|((), snapshot)| snapshot)
    }

    /// Switch a placement's active product atomically.
    ///
    /// A `product_id` that is not a member of the placement's list is a
    /// stale reference: the call succeeds without changing anything.
    /// Switching to the already-active product returns an identical tree.
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error.
    pub fn set_active(&mut self, path: PlacementPath, product_id: ProductId) -> Result<Snapshot, StoreError> {
        let Some(placement) = self.current.placement(path) else {
            return Err(self.placement_path_error(path));
        };
        // Non-member and already-active switches swap nothing: callers get
        // back the identical snapshot.
        if !placement.contains(product_id) || placement.active_product == Some(product_id) {
            return Ok(self.current.clone());
        }
        self.mutate(|scenes| {
            active::set_active(placement_mut(scenes, path)?, product_id);
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    /// Move a product to a new index within its placement.
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error.
    pub fn reorder_product(&mut self, path: ProductPath, new_index: usize) -> Result<Snapshot, StoreError> {
        self.mutate(|scenes| {
            let placement = placement_mut(scenes, path.placement_path())?;
            let index = placement
                .products
                .iter()
                .position(|p| p.id == path.product)
                .ok_or(StoreError::UnknownProduct(path.product))?;
            let product = placement.products.remove(index);
            let target = new_index.min(placement.products.len());
            placement.products.insert(target, product);
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    // ── Id reconciliation ───────────────────────────────────────

    /// Rewrite a space's temporary id with the server-issued one.
    ///
    /// Scenes need no equivalent: scene creation navigates only after the
    /// collaborator confirms, so a scene never exists under a temporary id.
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error when the temporary id is gone.
    pub fn reconcile_space_id(&mut self, path: SpacePath, server: SpaceId) -> Result<Snapshot, StoreError> {
        self.mutate(|scenes| {
            space_mut(scenes, path)?.id = server;
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    /// Rewrite a placement's temporary id with the server-issued one.
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error when the temporary id is gone.
    pub fn reconcile_placement_id(&mut self, path: PlacementPath, server: PlacementId) -> Result<Snapshot, StoreError> {
        self.mutate(|scenes| {
            placement_mut(scenes, path)?.id = server;
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    /// Rewrite a product's temporary id with the server-issued one,
    /// keeping the active reference in agreement.
    ///
    /// # Errors
    ///
    /// Returns an unknown-path error when the temporary id is gone.
    pub fn reconcile_product_id(&mut self, path: ProductPath, server: ProductId) -> Result<Snapshot, StoreError> {
        self.mutate(|scenes| {
            let placement = placement_mut(scenes, path.placement_path())?;
            let product = placement
                .products
                .iter_mut()
                .find(|p| p.id == path.product)
                .ok_or(StoreError::UnknownProduct(path.product))?;
            product.id = server;
            if placement.active_product == Some(path.product) {
                placement.active_product = Some(server);
            }
            Ok(())
        })
        .map(|((), snapshot)| snapshot)
    }

    // ── Internals ───────────────────────────────────────────────

    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut Vec<Scene>) -> Result<T, StoreError>,
    ) -> Result<(T, Snapshot), StoreError> {
        let mut scenes = (*self.current.scenes).clone();
        let value = op(&mut scenes)?;
        self.current = Snapshot { scenes: Arc::new(scenes) };
        Ok((value, self.current.clone()))
    }

    fn placement_path_error(&self, path: PlacementPath) -> StoreError {
        if self.current.scene(path.scene).is_none() {
            StoreError::UnknownScene(path.scene)
        } else if self.current.space(path.space_path()).is_none() {
            StoreError::UnknownSpace(path.space)
        } else {
            StoreError::UnknownPlacement(path.placement)
        }
    }
}

fn valid_name(name: &str) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

fn scene_mut(scenes: &mut [Scene], id: SceneId) -> Result<&mut Scene, StoreError> {
    scenes.iter_mut().find(|s| s.id == id).ok_or(StoreError::UnknownScene(id))
}

fn space_mut(scenes: &mut [Scene], path: SpacePath) -> Result<&mut Space, StoreError> {
    scene_mut(scenes, path.scene)?
        .spaces
        .iter_mut()
        .find(|s| s.id == path.space)
        .ok_or(StoreError::UnknownSpace(path.space))
}

fn placement_mut(scenes: &mut [Scene], path: PlacementPath) -> Result<&mut Placement, StoreError> {
    space_mut(scenes, path.space_path())?
        .placements
        .iter_mut()
        .find(|p| p.id == path.placement)
        .ok_or(StoreError::UnknownPlacement(path.placement))
}

fn product_mut<'a>(scenes: &'a mut [Scene], path: ProductPath) -> Result<&'a mut Product, StoreError> {
    placement_mut(scenes, path.placement_path())?
        .products
        .iter_mut()
        .find(|p| p.id == path.product)
        .ok_or(StoreError::UnknownProduct(path.product))
}
