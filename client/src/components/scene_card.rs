//! Reusable card component for scene list items on the dashboard.

use leptos::prelude::*;

/// A clickable card representing a scene.
#[component]
pub fn SceneCard(
    id: String,
    name: String,
    #[prop(optional)] tag: Option<String>,
    space_count: usize,
    #[prop(optional)] on_delete: Option<Callback<String>>,
) -> impl IntoView {
    let href = format!("/scene/{id}");
    let on_delete_click = Callback::new({
        let id = id.clone();
        move |()| {
            if let Some(on_delete) = on_delete.as_ref() {
                on_delete.run(id.clone());
            }
        }
    });

    view! {
        <a class="scene-card" href=href>
            <span class="scene-card__name">{name}</span>
            {tag.filter(|t| !t.is_empty())
                .map(|tag| view! { <span class="scene-card__tag">{tag}</span> })}
            <span class="scene-card__meta">{format!("{space_count} spaces")}</span>
            <button
                class="scene-card__delete"
                on:click=move |ev: leptos::ev::MouseEvent| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    on_delete_click.run(());
                }
                title="Delete scene"
                aria-label="Delete scene"
            >
                "✕"
            </button>
        </a>
    }
}
