//! Dashboard page listing scenes with create and open actions.

use leptos::prelude::*;

use crate::components::notifications::Notifications;
use crate::components::scene_card::SceneCard;
use crate::state::notify::NotifyState;
use crate::state::scenes::ScenesState;
use crate::util::space_loader::reload_scenes;

/// Dashboard page — shows the scene list and a create-scene form.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let scenes = expect_context::<RwSignal<ScenesState>>();
    let notify = expect_context::<RwSignal<NotifyState>>();

    // Scene list — fetched on mount through the shared reload command.
    Effect::new(move || {
        reload_scenes(scenes, notify);
    });

    // Create-scene dialog state.
    let show_create = RwSignal::new(false);
    let on_open_create = move |_| show_create.set(true);
    let on_cancel = Callback::new(move |()| show_create.set(false));

    let on_delete = Callback::new(move |scene_id: String| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                if crate::net::api::delete_scene(&scene_id).await {
                    scenes.update(|s| s.remove(&scene_id));
                } else {
                    notify.update(|n| {
                        n.error("Could not delete the scene");
                    });
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = scene_id;
        }
    });

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>"Scenes"</h1>
                <button class="btn btn--primary" on:click=on_open_create>
                    "+ New Scene"
                </button>
            </header>

            <div class="dashboard-page__grid">
                <Show
                    when=move || !scenes.get().loading
                    fallback=move || view! { <p>"Loading scenes..."</p> }
                >
                    <div class="dashboard-page__cards">
                        {move || {
                            scenes
                                .get()
                                .items
                                .into_iter()
                                .map(|item| {
                                    view! {
                                        <SceneCard
                                            id=item.id
                                            name=item.name
                                            tag=item.tag.unwrap_or_default()
                                            space_count=item.space_count
                                            on_delete=on_delete
                                        />
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </div>
                </Show>
            </div>

            <Show when=move || show_create.get()>
                <CreateSceneDialog on_cancel=on_cancel/>
            </Show>

            <Notifications/>
        </div>
    }
}

/// Modal dialog for creating a new scene.
///
/// In-flight state is local to this workflow: nothing ambient survives a
/// cancel, and a rejected create leaves no phantom scene (the list is only
/// refreshed after the collaborator confirms).
#[component]
fn CreateSceneDialog(on_cancel: Callback<()>) -> impl IntoView {
    let scenes = expect_context::<RwSignal<ScenesState>>();
    let notify = expect_context::<RwSignal<NotifyState>>();
    let name = RwSignal::new(String::new());
    let background = RwSignal::new(String::new());
    let pending = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let submit = Callback::new(move |()| {
        let scene_name = name.get();
        let background_ref = background.get();
        if scene_name.trim().is_empty() || background_ref.trim().is_empty() || pending.get() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            use leptos_router::NavigateOptions;

            let navigate = navigate.clone();
            pending.set(true);
            let scene_name = scene_name.trim().to_owned();
            let background_ref = background_ref.trim().to_owned();
            leptos::task::spawn_local(async move {
                match crate::net::api::create_scene(&scene_name, &background_ref).await {
                    Some(created) => {
                        reload_scenes(scenes, notify);
                        navigate(&format!("/scene/{}", created.id), NavigateOptions::default());
                    }
                    None => {
                        pending.set(false);
                        notify.update(|n| {
                            n.error("Could not create the scene");
                        });
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (scene_name, background_ref);
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Create Scene"</h2>
                <label class="dialog__label">
                    "Scene Name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit.run(());
                            }
                        }
                    />
                </label>
                <label class="dialog__label">
                    "Background Reference"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || background.get()
                        on:input=move |ev| background.set(event_target_value(&ev))
                    />
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" disabled=move || pending.get() on:click=move |_| submit.run(())>
                        {move || if pending.get() { "Creating…" } else { "Create" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
