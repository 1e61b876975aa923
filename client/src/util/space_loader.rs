//! Guarded space-detail loading.
//!
//! DESIGN
//! ======
//! Every fetch takes a [`crate::state::editor::FetchTicket`] carrying an
//! explicit request generation plus the target ids. On completion the ticket
//! is checked against the editor state (newest generation AND the engine's
//! current selection); a superseded response is discarded with a debug log,
//! never a user-facing error. The engine re-checks the target against its
//! selection when applying, so the guard holds even if state moved between
//! the check and the apply.

use leptos::prelude::RwSignal;

use stage::model::{SceneId, SpaceId};

use crate::state::editor::EditorState;
use crate::state::notify::NotifyState;
use crate::state::scenes::ScenesState;

/// Issue a space-detail fetch for the current selection.
///
/// Bumps the request generation (superseding any in-flight fetch), runs the
/// fetch, and applies the payload only if the ticket still wins.
pub fn load_space(editor: RwSignal<EditorState>, notify: RwSignal<NotifyState>, scene: SceneId, space: SpaceId) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::Update;

        let Some(ticket) = editor.try_update(|e| e.begin_fetch(scene, space)) else {
            return;
        };
        leptos::task::spawn_local(async move {
            let detail = crate::net::api::fetch_space_detail(&scene.to_string(), &space.to_string()).await;
            let Some(detail) = detail else {
                editor.update(|e| e.finish_fetch(ticket));
                notify.update(|n| {
                    n.error("Failed to load space");
                });
                return;
            };
            let applied = editor
                .try_update(|e| {
                    let may_apply = e.may_apply(ticket);
                    e.finish_fetch(ticket);
                    if !may_apply {
                        return false;
                    }
                    let Some(model) = crate::util::wire::space_from_detail(&detail) else {
                        return false;
                    };
                    e.engine.load_space_detail(scene, space, model)
                })
                .unwrap_or(false);
            if !applied {
                leptos::logging::warn!("discarded stale space detail for {space}");
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (editor, notify, scene, space);
    }
}

/// Reload the dashboard's scene list. This is the single "reload scenes"
/// command; child workflows (create/delete dialogs) invoke it through a
/// passed-in handle instead of exposing refresh callbacks upward.
pub fn reload_scenes(scenes: RwSignal<ScenesState>, notify: RwSignal<NotifyState>) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::Update;

        scenes.update(|s| s.loading = true);
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_scenes().await {
                Some(list) => {
                    let items = list.iter().map(crate::util::wire::scene_list_item).collect();
                    scenes.update(|s| s.loaded(items));
                }
                None => {
                    scenes.update(|s| s.loading = false);
                    notify.update(|n| {
                        n.error("Failed to load scenes");
                    });
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (scenes, notify);
    }
}

/// Load the scene tree into the editor engine and select `scene`, then its
/// first space (triggering the guarded detail load for it).
pub fn open_scene(editor: RwSignal<EditorState>, notify: RwSignal<NotifyState>, scene: SceneId) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::Update;

        leptos::task::spawn_local(async move {
            let Some(list) = crate::net::api::fetch_scenes().await else {
                notify.update(|n| {
                    n.error("Failed to load scenes");
                });
                return;
            };
            let models: Vec<stage::model::Scene> =
                list.iter().filter_map(crate::util::wire::scene_from_summary).collect();
            let first_space = editor
                .try_update(|e| {
                    e.engine.load_scenes(models);
                    e.engine.select_scene(Some(scene));
                    let snapshot = e.engine.snapshot();
                    let first = snapshot.scene(scene).and_then(|s| s.spaces.first().map(|space| space.id));
                    e.engine.select_space(first);
                    first
                })
                .flatten();
            if let Some(space) = first_space {
                load_space(editor, notify, scene, space);
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (editor, notify, scene);
    }
}
