//! Optimistic mutation + asynchronous persistence.
//!
//! Every interactive edit follows the same two-phase lifecycle:
//!
//! 1. **Apply** — the engine has already mutated its tree synchronously by
//!    the time an [`Action`] reaches this module; the UI is correct locally.
//! 2. **Persist** — the matching collaborator call runs in a spawned task.
//!    Position and active-image failures notify and leave the optimistic
//!    state (a reload of the space is the reconciliation path). Structural
//!    create failures roll the phantom entry back out of the tree.
//!
//! No call here blocks further local interaction.

use leptos::prelude::RwSignal;

use stage::engine::Action;
use stage::geom::{Point, Size};
use stage::store::{PlacementPath, SpacePath};

use crate::state::editor::EditorState;
use crate::state::notify::NotifyState;

/// Dispatch engine actions to the persistence collaborator.
///
/// Surface actions (`SurfaceOpened`, `SurfaceSnapped`, selection and render
/// hints) are reactive concerns the components handle by reading the engine;
/// only the two persisted mutations are acted on here.
pub fn process_actions(editor: RwSignal<EditorState>, notify: RwSignal<NotifyState>, actions: Vec<Action>) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::Update;

        let _ = editor;
        for action in actions {
            match action {
                Action::PositionCommitted { path, position } => {
                    leptos::task::spawn_local(async move {
                        let ok = crate::net::api::update_product_position(
                            &path.product.to_string(),
                            position.x,
                            position.y,
                        )
                        .await;
                        if !ok {
                            leptos::logging::warn!("position update failed for {}", path.product);
                            notify.update(|n| {
                                n.error("Could not save the new position");
                            });
                        }
                    });
                }
                Action::ActiveSwitched { path, product_id } => {
                    leptos::task::spawn_local(async move {
                        let ok = crate::net::api::set_active_product(
                            &path.placement.to_string(),
                            &product_id.to_string(),
                        )
                        .await;
                        if !ok {
                            leptos::logging::warn!("active switch failed for {}", path.placement);
                            notify.update(|n| {
                                n.error("Could not save the selected image");
                            });
                        }
                    });
                }
                Action::SurfaceOpened { .. }
                | Action::SurfaceSnapped { .. }
                | Action::SelectionChanged { .. }
                | Action::RenderNeeded => {}
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (editor, notify, actions);
    }
}

/// Create a space optimistically; roll the phantom entry back if the
/// collaborator rejects it, reconcile the temporary id if it confirms.
pub fn create_space(editor: RwSignal<EditorState>, notify: RwSignal<NotifyState>, scene: stage::model::SceneId, name: String) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::Update;

        let Some(Ok((temp, _))) = editor.try_update(|e| e.engine.store_mut().create_space(scene, &name)) else {
            // Validation failed locally: no state change, nothing to persist.
            return;
        };
        leptos::task::spawn_local(async move {
            match crate::net::api::create_space(&scene.to_string(), &name).await {
                Some(created) => {
                    if let Some(server) = crate::util::wire::parse_id(&created.id) {
                        editor.update(|e| {
                            let path = SpacePath { scene, space: temp };
                            if e.engine.store_mut().reconcile_space_id(path, server).is_err() {
                                leptos::logging::warn!("space {temp} vanished before confirmation");
                            }
                        });
                    }
                }
                None => {
                    editor.update(|e| {
                        let path = SpacePath { scene, space: temp };
                        if e.engine.delete_space(path).is_err() {
                            leptos::logging::warn!("rollback: space {temp} already gone");
                        }
                    });
                    notify.update(|n| {
                        n.error("Could not create the space");
                    });
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (editor, notify, scene, name);
    }
}

/// Create a placement optimistically with create-rollback semantics.
pub fn create_placement(editor: RwSignal<EditorState>, notify: RwSignal<NotifyState>, path: SpacePath, name: String) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::Update;

        let Some(Ok((temp, _))) = editor.try_update(|e| e.engine.store_mut().create_placement(path, &name)) else {
            return;
        };
        leptos::task::spawn_local(async move {
            match crate::net::api::create_placement(&path.scene.to_string(), &path.space.to_string(), &name).await {
                Some(created) => {
                    if let Some(server) = crate::util::wire::parse_id(&created.id) {
                        editor.update(|e| {
                            let placement_path =
                                PlacementPath { scene: path.scene, space: path.space, placement: temp };
                            if e.engine.store_mut().reconcile_placement_id(placement_path, server).is_err() {
                                leptos::logging::warn!("placement {temp} vanished before confirmation");
                            }
                        });
                    }
                }
                None => {
                    editor.update(|e| {
                        let placement_path = PlacementPath { scene: path.scene, space: path.space, placement: temp };
                        if e.engine.delete_placement(placement_path).is_err() {
                            leptos::logging::warn!("rollback: placement {temp} already gone");
                        }
                    });
                    notify.update(|n| {
                        n.error("Could not create the placement");
                    });
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (editor, notify, path, name);
    }
}

/// Create a placement image optimistically with create-rollback semantics.
pub fn create_product(
    editor: RwSignal<EditorState>,
    notify: RwSignal<NotifyState>,
    path: PlacementPath,
    name: String,
    image: String,
    position: Point,
    size: Size,
) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::Update;
        use stage::store::ProductPath;

        let Some(Ok((temp, _))) = editor.try_update(|e| {
            e.engine
                .store_mut()
                .add_product(path, &name, image.clone(), position, size)
        }) else {
            return;
        };
        leptos::task::spawn_local(async move {
            let created = crate::net::api::create_product(
                &path.placement.to_string(),
                &name,
                &image,
                position.x,
                position.y,
                size.width,
                size.height,
            )
            .await;
            let product_path =
                ProductPath { scene: path.scene, space: path.space, placement: path.placement, product: temp };
            match created {
                Some(created) => {
                    if let Some(server) = crate::util::wire::parse_id(&created.id) {
                        editor.update(|e| {
                            if e.engine.store_mut().reconcile_product_id(product_path, server).is_err() {
                                leptos::logging::warn!("product {temp} vanished before confirmation");
                            }
                        });
                    }
                }
                None => {
                    editor.update(|e| {
                        if e.engine.remove_product(product_path).is_err() {
                            leptos::logging::warn!("rollback: product {temp} already gone");
                        }
                    });
                    notify.update(|n| {
                        n.error("Could not create the placement image");
                    });
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (editor, notify, path, name, image, position, size);
    }
}

/// Rename a space locally and persist; a failure notifies without rollback.
pub fn rename_space(editor: RwSignal<EditorState>, notify: RwSignal<NotifyState>, path: SpacePath, name: String) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::Update;

        let Some(Ok(_)) = editor.try_update(|e| e.engine.store_mut().rename_space(path, &name)) else {
            return;
        };
        leptos::task::spawn_local(async move {
            let ok = crate::net::api::rename_space(&path.scene.to_string(), &path.space.to_string(), &name).await;
            if !ok {
                notify.update(|n| {
                    n.error("Could not save the space name");
                });
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (editor, notify, path, name);
    }
}

/// Rename a placement locally and persist; a failure notifies without rollback.
pub fn rename_placement(
    editor: RwSignal<EditorState>,
    notify: RwSignal<NotifyState>,
    path: PlacementPath,
    name: String,
) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::Update;

        let Some(Ok(_)) = editor.try_update(|e| e.engine.store_mut().rename_placement(path, &name)) else {
            return;
        };
        leptos::task::spawn_local(async move {
            let ok = crate::net::api::rename_placement(&path.placement.to_string(), &name).await;
            if !ok {
                notify.update(|n| {
                    n.error("Could not save the placement name");
                });
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (editor, notify, path, name);
    }
}

/// Delete a space locally and persist; a failure notifies without rollback
/// (a reload restores the server's view).
pub fn delete_space(editor: RwSignal<EditorState>, notify: RwSignal<NotifyState>, path: SpacePath) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::Update;

        let Some(Ok(_)) = editor.try_update(|e| e.engine.delete_space(path)) else {
            return;
        };
        leptos::task::spawn_local(async move {
            let ok = crate::net::api::delete_space(&path.scene.to_string(), &path.space.to_string()).await;
            if !ok {
                notify.update(|n| {
                    n.error("Could not delete the space");
                });
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (editor, notify, path);
    }
}

/// Delete a placement locally and persist; a failure notifies without rollback.
pub fn delete_placement(editor: RwSignal<EditorState>, notify: RwSignal<NotifyState>, path: PlacementPath) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::Update;

        let Some(Ok(_)) = editor.try_update(|e| e.engine.delete_placement(path)) else {
            return;
        };
        leptos::task::spawn_local(async move {
            let ok = crate::net::api::delete_placement(&path.placement.to_string()).await;
            if !ok {
                notify.update(|n| {
                    n.error("Could not delete the placement");
                });
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (editor, notify, path);
    }
}

/// Rename a placement image locally and persist; a failure notifies without
/// rollback.
pub fn rename_product(
    editor: RwSignal<EditorState>,
    notify: RwSignal<NotifyState>,
    path: stage::store::ProductPath,
    name: String,
) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::Update;

        let Some(Ok(_)) = editor.try_update(|e| e.engine.store_mut().update_product(path, Some(&name), None)) else {
            return;
        };
        leptos::task::spawn_local(async move {
            let ok = crate::net::api::update_product(&path.product.to_string(), Some(&name), None).await;
            if !ok {
                notify.update(|n| {
                    n.error("Could not save the image name");
                });
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (editor, notify, path, name);
    }
}

/// Remove a placement image locally and persist; a failure notifies without
/// rollback.
pub fn delete_product(editor: RwSignal<EditorState>, notify: RwSignal<NotifyState>, path: stage::store::ProductPath) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::Update;

        let Some(Ok(_)) = editor.try_update(|e| e.engine.remove_product(path)) else {
            return;
        };
        leptos::task::spawn_local(async move {
            let ok = crate::net::api::delete_product(&path.product.to_string()).await;
            if !ok {
                notify.update(|n| {
                    n.error("Could not delete the placement image");
                });
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (editor, notify, path);
    }
}
