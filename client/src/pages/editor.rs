//! Scene editor page — the main workspace layout.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::notifications::Notifications;
use crate::components::scene_panel::ScenePanel;
use crate::components::selection_tray::SelectionTray;
use crate::components::stage_host::StageHost;
use crate::components::status_bar::StatusBar;
use crate::state::editor::EditorState;
use crate::state::notify::NotifyState;
use crate::util::space_loader::open_scene;
use crate::util::wire::parse_id;

/// Scene editor page — composes the side panel, stage, selection tray, and
/// status bar. Reads the scene ID from the route parameter and (re)opens
/// the scene whenever it changes.
#[component]
pub fn EditorPage() -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let notify = expect_context::<RwSignal<NotifyState>>();
    let params = use_params_map();

    // Extract scene ID from the route.
    let scene_param = move || params.read().get("id");

    // (Re)open the scene when the route param changes. A malformed id is a
    // validation error: no fetch, no state change.
    let last_opened = RwSignal::new(None::<String>);
    Effect::new(move || {
        let Some(raw) = scene_param() else {
            return;
        };
        if last_opened.get().as_deref() == Some(raw.as_str()) {
            return;
        }
        let Some(scene) = parse_id(&raw) else {
            return;
        };
        editor.update(|e| e.reset());
        open_scene(editor, notify, scene);
        last_opened.set(Some(raw));
    });

    on_cleanup(move || {
        editor.update(|e| e.reset());
    });

    let scene_name = move || {
        editor.with(|e| {
            let snapshot = e.engine.snapshot();
            e.engine
                .selected_scene()
                .and_then(|id| snapshot.scene(id).map(|s| s.name.clone()))
                .unwrap_or_else(|| "Scene".to_owned())
        })
    };

    view! {
        <div class="editor-page">
            <header class="editor-page__header">
                <a class="editor-page__back" href="/">
                    "\u{2190} Scenes"
                </a>
                <h1 class="editor-page__title">{scene_name}</h1>
            </header>
            <div class="editor-page__panel">
                <ScenePanel/>
            </div>
            <div class="editor-page__stage">
                <StageHost/>
                <SelectionTray/>
            </div>
            <div class="editor-page__status-bar">
                <StatusBar/>
            </div>
            <Notifications/>
        </div>
    }
}
