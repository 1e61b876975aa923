//! Bottom status bar with live stage telemetry.

use leptos::prelude::*;

use crate::state::editor::EditorState;
use crate::state::viewport::ViewportState;

/// Status bar — stage size, scale factor, and the selected space name.
#[component]
pub fn StatusBar() -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let viewport = expect_context::<RwSignal<ViewportState>>();

    let stage_label = move || {
        let v = viewport.get();
        format!("{:.0}×{:.0}", v.stage_width, v.stage_height)
    };
    let scale_label = move || format!("{:.0}%", viewport.get().scale * 100.0);
    let space_label = move || {
        editor.with(|e| {
            let snapshot = e.engine.snapshot();
            let scene = e.engine.selected_scene().and_then(|id| snapshot.scene(id).cloned());
            let space = scene.as_ref().and_then(|scene| {
                e.engine.selected_space().and_then(|id| scene.space(id)).map(|s| s.name.clone())
            });
            space.unwrap_or_else(|| "No space selected".to_owned())
        })
    };
    let loading = move || editor.with(|e| e.loading_space);

    view! {
        <div class="status-bar">
            <span class="status-bar__space">{space_label}</span>
            <Show when=loading>
                <span class="status-bar__loading">"Loading…"</span>
            </Show>
            <span class="status-bar__stage">{stage_label}</span>
            <span class="status-bar__scale">{scale_label}</span>
        </div>
    }
}
