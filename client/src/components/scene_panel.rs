//! Collapsible side panel: spaces, placements, and products of the scene.
//!
//! All structural edits funnel through `util::position_sync`, which applies
//! them to the engine optimistically and reconciles (or rolls back) against
//! the persistence collaborator. Selecting a space triggers the guarded
//! detail load; selecting a placement arms dragging for its products.

use leptos::prelude::*;

use stage::geom::{Point, Size};
use stage::model::{Placement, SceneId, Space, SpaceId};
use stage::store::{PlacementPath, ProductPath, SpacePath};

use crate::state::editor::EditorState;
use crate::state::notify::NotifyState;
use crate::util::position_sync;
use crate::util::space_loader::load_space;

/// Collapsible left sidebar with the scene hierarchy.
#[component]
pub fn ScenePanel() -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let notify = expect_context::<RwSignal<NotifyState>>();

    let expanded = move || editor.with(|e| e.engine.layout().sidebar_expanded);
    let toggle_expand = move |_| {
        editor.update(|e| {
            let now = !e.engine.layout().sidebar_expanded;
            e.engine.set_sidebar_expanded(now);
        });
    };

    let scene_id = move || editor.with(|e| e.engine.selected_scene());
    let spaces = move || {
        editor.with(|e| {
            let snapshot = e.engine.snapshot();
            e.engine
                .selected_scene()
                .and_then(|id| snapshot.scene(id))
                .map(|scene| scene.spaces.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="scene-panel" class:scene-panel--collapsed=move || !expanded()>
            <div class="scene-panel__header">
                <span class="scene-panel__title">"Spaces"</span>
                <button class="scene-panel__toggle" on:click=toggle_expand>
                    {move || if expanded() { "\u{25C0}" } else { "\u{25B6}" }}
                </button>
            </div>

            <Show when=expanded>
                <div class="scene-panel__content">
                    {move || {
                        scene_id()
                            .map(|scene| {
                                view! {
                                    <SpaceList scene=scene spaces=Signal::derive(spaces)/>
                                    <CreateRow
                                        placeholder="New space name"
                                        on_create=Callback::new(move |name: String| {
                                            position_sync::create_space(editor, notify, scene, name);
                                        })
                                    />
                                    <PlacementSection scene=scene/>
                                }
                            })
                    }}
                </div>
            </Show>
        </div>
    }
}

/// Space rows with select/rename/delete affordances.
#[component]
fn SpaceList(scene: SceneId, spaces: Signal<Vec<Space>>) -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let notify = expect_context::<RwSignal<NotifyState>>();
    let renaming = RwSignal::new(None::<(SpaceId, String)>);

    let selected = move || editor.with(|e| e.engine.selected_space());

    view! {
        <ul class="scene-panel__spaces">
            {move || {
                spaces
                    .get()
                    .into_iter()
                    .map(|space| {
                        let id = space.id;
                        let path = SpacePath { scene, space: id };
                        let name = space.name.clone();
                        let is_selected = move || selected() == Some(id);
                        let on_select = move |_| {
                            editor.update(|e| e.engine.select_space(Some(id)));
                            load_space(editor, notify, scene, id);
                        };
                        let on_delete = move |_| {
                            position_sync::delete_space(editor, notify, path);
                        };
                        let commit_rename = move |value: String| {
                            renaming.set(None);
                            position_sync::rename_space(editor, notify, path, value);
                        };
                        view! {
                            <li class="scene-panel__space" class:scene-panel__space--selected=is_selected>
                                {move || {
                                    let editing = renaming.get().filter(|(rid, _)| *rid == id);
                                    match editing {
                                        Some((_, value)) => {
                                            view! {
                                                <InlineEdit
                                                    value=value
                                                    on_commit=Callback::new(commit_rename)
                                                    on_cancel=Callback::new(move |()| renaming.set(None))
                                                />
                                            }
                                                .into_any()
                                        }
                                        None => {
                                            let rename_seed = name.clone();
                                            let on_rename_start =
                                                move |_| renaming.set(Some((id, rename_seed.clone())));
                                            view! {
                                                <button class="scene-panel__space-name" on:click=on_select>
                                                    {name.clone()}
                                                </button>
                                                <button class="scene-panel__edit" on:click=on_rename_start title="Rename">
                                                    "✎"
                                                </button>
                                                <button class="scene-panel__delete" on:click=on_delete title="Delete">
                                                    "✕"
                                                </button>
                                            }
                                                .into_any()
                                        }
                                    }
                                }}
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </ul>
    }
}

/// Placements (and the selected placement's products) for the selected space.
#[component]
fn PlacementSection(scene: SceneId) -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let notify = expect_context::<RwSignal<NotifyState>>();
    let renaming = RwSignal::new(None::<(stage::model::PlacementId, String)>);

    let space = move || editor.with(|e| e.engine.selected_space());
    let placements = move || {
        editor.with(|e| {
            let snapshot = e.engine.snapshot();
            let Some(space_id) = e.engine.selected_space() else {
                return Vec::new();
            };
            snapshot
                .space(SpacePath { scene, space: space_id })
                .map(|s| s.placements.clone())
                .unwrap_or_default()
        })
    };
    let selected_placement = move || editor.with(|e| e.engine.selected_placement());

    view! {
        <Show when=move || space().is_some()>
            <div class="scene-panel__placements">
                <span class="scene-panel__subtitle">"Placements"</span>
                <ul class="scene-panel__placement-list">
                    {move || {
                        let Some(space_id) = space() else {
                            return Vec::new();
                        };
                        placements()
                            .into_iter()
                            .map(|placement| {
                                placement_row(editor, notify, renaming, scene, space_id, &placement, selected_placement())
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
                {move || {
                    space()
                        .map(|space_id| {
                            let path = SpacePath { scene, space: space_id };
                            view! {
                                <CreateRow
                                    placeholder="New placement name"
                                    on_create=Callback::new(move |name: String| {
                                        position_sync::create_placement(editor, notify, path, name);
                                    })
                                />
                            }
                        })
                }}
                {move || {
                    let Some(space_id) = space() else {
                        return None;
                    };
                    selected_placement().map(|placement_id| {
                        let path = PlacementPath { scene, space: space_id, placement: placement_id };
                        view! { <ProductSection path=path/> }
                    })
                }}
            </div>
        </Show>
    }
}

#[allow(clippy::too_many_arguments)]
fn placement_row(
    editor: RwSignal<EditorState>,
    notify: RwSignal<NotifyState>,
    renaming: RwSignal<Option<(stage::model::PlacementId, String)>>,
    scene: SceneId,
    space: SpaceId,
    placement: &Placement,
    selected: Option<stage::model::PlacementId>,
) -> impl IntoView + use<> {
    let id = placement.id;
    let path = PlacementPath { scene, space, placement: id };
    let name = placement.name.clone();
    let visible = placement.visible;
    let visible_title = if visible { "Hide" } else { "Show" };
    let visible_glyph = if visible { "\u{1F441}" } else { "\u{2012}" };
    let is_selected = selected == Some(id);

    let on_select = move |_| {
        editor.update(|e| e.engine.select_placement(Some(id)));
    };
    let on_delete = move |_| {
        position_sync::delete_placement(editor, notify, path);
    };
    let on_toggle_visible = move |_| {
        editor.update(|e| {
            if e.engine.store_mut().set_placement_visible(path, !visible).is_err() {
                leptos::logging::warn!("visibility toggle on vanished placement {id}");
            }
        });
    };
    let commit_rename = move |value: String| {
        renaming.set(None);
        position_sync::rename_placement(editor, notify, path, value);
    };

    view! {
        <li class="scene-panel__placement" class:scene-panel__placement--selected=is_selected>
            {move || {
                let editing = renaming.get().filter(|(rid, _)| *rid == id);
                match editing {
                    Some((_, value)) => {
                        view! {
                            <InlineEdit
                                value=value
                                on_commit=Callback::new(commit_rename)
                                on_cancel=Callback::new(move |()| renaming.set(None))
                            />
                        }
                            .into_any()
                    }
                    None => {
                        let rename_seed = name.clone();
                        let on_rename_start = move |_| renaming.set(Some((id, rename_seed.clone())));
                        view! {
                            <button class="scene-panel__placement-name" on:click=on_select>
                                {name.clone()}
                            </button>
                            <button
                                class="scene-panel__visibility"
                                on:click=on_toggle_visible
                                title=visible_title
                            >
                                {visible_glyph}
                            </button>
                            <button class="scene-panel__edit" on:click=on_rename_start title="Rename">
                                "✎"
                            </button>
                            <button class="scene-panel__delete" on:click=on_delete title="Delete">
                                "✕"
                            </button>
                        }
                            .into_any()
                    }
                }
            }}
        </li>
    }
}

/// Products of the selected placement, with add/delete affordances.
#[component]
fn ProductSection(path: PlacementPath) -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let notify = expect_context::<RwSignal<NotifyState>>();
    let renaming = RwSignal::new(None::<(stage::model::ProductId, String)>);
    let new_name = RwSignal::new(String::new());
    let new_image = RwSignal::new(String::new());

    let products = move || {
        editor.with(|e| {
            e.engine
                .snapshot()
                .placement(path)
                .map(|p| p.products.clone())
                .unwrap_or_default()
        })
    };

    let on_add = move |_| {
        let name = new_name.get();
        let image = new_image.get();
        if name.trim().is_empty() || image.trim().is_empty() {
            return;
        }
        new_name.set(String::new());
        new_image.set(String::new());
        // New products land at a default logical position; the operator
        // drags them into place afterwards.
        position_sync::create_product(
            editor,
            notify,
            path,
            name,
            image.trim().to_owned(),
            Point::new(100.0, 100.0),
            Size::new(200.0, 200.0),
        );
    };

    view! {
        <div class="scene-panel__products">
            <span class="scene-panel__subtitle">"Products"</span>
            <ul class="scene-panel__product-list">
                {move || {
                    products()
                        .into_iter()
                        .map(|product| {
                            let product_path = ProductPath {
                                scene: path.scene,
                                space: path.space,
                                placement: path.placement,
                                product: product.id,
                            };
                            let product_id = product.id;
                            let on_delete = move |_| {
                                position_sync::delete_product(editor, notify, product_path);
                            };
                            let commit_rename = move |value: String| {
                                renaming.set(None);
                                position_sync::rename_product(editor, notify, product_path, value);
                            };
                            let editing = renaming.get().filter(|(rid, _)| *rid == product_id);
                            match editing {
                                Some((_, value)) => {
                                    view! {
                                        <li class="scene-panel__product">
                                            <InlineEdit
                                                value=value
                                                on_commit=Callback::new(commit_rename)
                                                on_cancel=Callback::new(move |()| renaming.set(None))
                                            />
                                        </li>
                                    }
                                        .into_any()
                                }
                                None => {
                                    let rename_seed = product.name.clone();
                                    let on_rename_start =
                                        move |_| renaming.set(Some((product_id, rename_seed.clone())));
                                    view! {
                                        <li
                                            class="scene-panel__product"
                                            class:scene-panel__product--active=product.active
                                        >
                                            <span class="scene-panel__product-name">{product.name.clone()}</span>
                                            <button class="scene-panel__edit" on:click=on_rename_start title="Rename">
                                                "✎"
                                            </button>
                                            <button class="scene-panel__delete" on:click=on_delete title="Delete">
                                                "✕"
                                            </button>
                                        </li>
                                    }
                                        .into_any()
                                }
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
            <div class="scene-panel__add-product">
                <input
                    class="scene-panel__input"
                    type="text"
                    placeholder="Product name"
                    prop:value=move || new_name.get()
                    on:input=move |ev| new_name.set(event_target_value(&ev))
                />
                <input
                    class="scene-panel__input"
                    type="text"
                    placeholder="Image reference"
                    prop:value=move || new_image.get()
                    on:input=move |ev| new_image.set(event_target_value(&ev))
                />
                <button class="scene-panel__add" on:click=on_add>
                    "Add"
                </button>
            </div>
        </div>
    }
}

/// Single-field inline editor (Enter commits, Escape cancels).
#[component]
fn InlineEdit(value: String, on_commit: Callback<String>, on_cancel: Callback<()>) -> impl IntoView {
    let draft = RwSignal::new(value);

    view! {
        <input
            class="scene-panel__input scene-panel__input--inline"
            type="text"
            prop:value=move || draft.get()
            on:input=move |ev| draft.set(event_target_value(&ev))
            on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                if ev.key() == "Enter" {
                    ev.prevent_default();
                    on_commit.run(draft.get());
                } else if ev.key() == "Escape" {
                    ev.prevent_default();
                    on_cancel.run(());
                }
            }
        />
    }
}

/// Name input + create button used for spaces and placements.
#[component]
fn CreateRow(placeholder: &'static str, on_create: Callback<String>) -> impl IntoView {
    let draft = RwSignal::new(String::new());

    let submit = move || {
        let name = draft.get();
        if name.trim().is_empty() {
            return;
        }
        draft.set(String::new());
        on_create.run(name);
    };

    view! {
        <div class="scene-panel__create">
            <input
                class="scene-panel__input"
                type="text"
                placeholder=placeholder
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        submit();
                    }
                }
            />
            <button class="scene-panel__add" on:click=move |_| submit()>
                "Create"
            </button>
        </div>
    }
}
