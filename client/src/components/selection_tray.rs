//! The tap-to-select surface: a horizontal strip of candidate products.
//!
//! DESIGN
//! ======
//! All surface state lives in the engine's `SurfaceController`; this
//! component renders it and reports raw scroll offsets back. Scroll events
//! are debounced through `util::tray_scroll`, so the snap only happens after
//! the gesture goes quiet. The strip carries symmetric padding so the
//! engine's centering math holds for every cell, and the nearest-to-center
//! highlight is plain derived state — no imperative style toggling.

use leptos::prelude::*;

use stage::consts::TRAY_ITEM_WIDTH_PX;
use stage::model::{PlacementId, Product};
use stage::surface::SurfaceState;

use crate::state::editor::EditorState;
use crate::state::notify::NotifyState;
use crate::util::position_sync::process_actions;

/// Products of the placement the surface is showing, in display order.
fn surface_products(editor: RwSignal<EditorState>) -> Vec<Product> {
    editor.with(|e| {
        let snapshot = e.engine.snapshot();
        let Some(placement_id) = e.engine.surface().placement() else {
            return Vec::new();
        };
        find_placement_products(&snapshot, e.engine.selected_scene(), e.engine.selected_space(), placement_id)
    })
}

fn find_placement_products(
    snapshot: &stage::store::Snapshot,
    scene: Option<stage::model::SceneId>,
    space: Option<stage::model::SpaceId>,
    placement: PlacementId,
) -> Vec<Product> {
    let (Some(scene), Some(space)) = (scene, space) else {
        return Vec::new();
    };
    snapshot
        .placement(stage::store::PlacementPath { scene, space, placement })
        .map(|p| p.products.clone())
        .unwrap_or_default()
}

/// Selection surface overlay.
#[component]
pub fn SelectionTray() -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let notify = expect_context::<RwSignal<NotifyState>>();
    let strip_ref = NodeRef::<leptos::html::Div>::new();
    let scroll_seq = RwSignal::new(0_u64);

    let state = move || editor.with(|e| e.engine.surface_state());
    let visible = move || state() != SurfaceState::Closed;

    // Transition driver: the opening/closing states resolve on the next
    // tick (visual easing is CSS's concern, not the state machine's).
    #[cfg(feature = "hydrate")]
    {
        use gloo_timers::callback::Timeout;

        Effect::new(move || {
            match state() {
                SurfaceState::Opening => {
                    Timeout::new(0, move || {
                        editor.update(|e| e.engine.finish_surface_open());
                    })
                    .forget();
                }
                SurfaceState::Closing => {
                    Timeout::new(0, move || {
                        editor.update(|e| e.engine.finish_surface_close());
                    })
                    .forget();
                }
                SurfaceState::Closed | SurfaceState::Open => {}
            }
        });

        // Replay the engine's scroll offset into the DOM (initial centering
        // on open, snap after settle). Writing the mirrored value back
        // during a user scroll is a no-op.
        Effect::new(move || {
            let (surface_state, scroll_x) = editor.with(|e| (e.engine.surface_state(), e.engine.surface().scroll_x()));
            if surface_state == SurfaceState::Closed {
                return;
            }
            let Some(strip) = strip_ref.get() else {
                return;
            };
            #[allow(clippy::cast_possible_truncation)]
            strip.set_scroll_left(scroll_x.round() as i32);
        });
    }

    let on_scroll = {
        #[cfg(feature = "hydrate")]
        {
            move |_ev: leptos::ev::Event| {
                let Some(strip) = strip_ref.get() else {
                    return;
                };
                let offset = f64::from(strip.scroll_left());
                editor.update(|e| {
                    e.engine.surface_scroll(offset);
                });
                crate::util::tray_scroll::schedule_settle(editor, notify, scroll_seq);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::Event| {}
        }
    };

    let on_close = move |_ev: leptos::ev::MouseEvent| {
        editor.update(|e| e.engine.close_surface());
    };

    let half_cell = TRAY_ITEM_WIDTH_PX / 2.0;
    let strip_style = format!("padding-left:calc(50% - {half_cell}px);padding-right:calc(50% - {half_cell}px)");

    view! {
        <Show when=visible>
            <div
                class="selection-tray"
                class:selection-tray--opening=move || state() == SurfaceState::Opening
                class:selection-tray--closing=move || state() == SurfaceState::Closing
            >
                <div class="selection-tray__header">
                    <span class="selection-tray__title">"Choose a product"</span>
                    <button class="selection-tray__close" on:click=on_close aria-label="Close">
                        "✕"
                    </button>
                </div>
                <div class="selection-tray__strip" node_ref=strip_ref on:scroll=on_scroll style=strip_style.clone()>
                    {move || {
                        let nearest = editor.with(|e| e.engine.surface().nearest_index());
                        surface_products(editor)
                            .into_iter()
                            .enumerate()
                            .map(|(index, product)| tray_cell(editor, notify, index, nearest, &product))
                            .collect::<Vec<_>>()
                    }}
                </div>
            </div>
        </Show>
    }
}

/// One product cell in the strip.
fn tray_cell(
    editor: RwSignal<EditorState>,
    notify: RwSignal<NotifyState>,
    index: usize,
    nearest: usize,
    product: &Product,
) -> impl IntoView + use<> {
    let product_id = product.id;
    let on_select = move |_ev: leptos::ev::MouseEvent| {
        let actions = editor.try_update(|e| e.engine.surface_select(product_id)).unwrap_or_default();
        process_actions(editor, notify, actions);
    };

    view! {
        <button
            class="selection-tray__cell"
            class:selection-tray__cell--active=product.active
            class:selection-tray__cell--nearest=index == nearest
            on:click=on_select
        >
            <img class="selection-tray__image" src=product.image.clone() draggable="false" alt=product.name.clone()/>
            <span class="selection-tray__name">{product.name.clone()}</span>
        </button>
    }
}
