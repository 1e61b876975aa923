//! Bridge component between Leptos state and the `stage` engine.
//!
//! ARCHITECTURE
//! ============
//! The engine owns all interaction state; this host maps DOM events into
//! engine calls, forwards the resulting actions to the persistence layer,
//! and publishes viewport telemetry. Rendering is fully declarative: the
//! background and every placed product are positioned from the engine's
//! projection, so a scale change re-renders everything from derived state.
//!
//! The window-resize listener is the only environmental wire-up here; the
//! sidebar toggle and surface open/close reach the engine through their own
//! components, keeping unrelated state changes away from the transform.

use leptos::prelude::*;

use stage::geom::Size;
use stage::model::PlacedProduct;

use crate::state::editor::EditorState;
use crate::state::notify::NotifyState;
use crate::state::viewport::ViewportState;
use crate::util::position_sync::process_actions;

#[cfg(feature = "hydrate")]
fn window_size() -> Option<Size> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Size::new(width, height))
}

/// Pointer position relative to the stage host element.
#[cfg(feature = "hydrate")]
fn stage_point(ev: &leptos::ev::PointerEvent, host: &NodeRef<leptos::html::Div>) -> Option<stage::geom::Point> {
    let el = host.get()?;
    let rect = el.get_bounding_client_rect();
    Some(stage::geom::Point::new(
        f64::from(ev.client_x()) - rect.left(),
        f64::from(ev.client_y()) - rect.top(),
    ))
}

/// Copy the engine's layout/transform into the chrome telemetry signal.
fn publish_viewport(editor: RwSignal<EditorState>, viewport: RwSignal<ViewportState>) {
    let (layout, scale) = editor.with_untracked(|e| (e.engine.layout(), e.engine.transform().scale));
    let stage = layout.stage_size();
    viewport.update(|v| {
        v.window_width = layout.window.width;
        v.window_height = layout.window.height;
        v.stage_width = stage.width;
        v.stage_height = stage.height;
        v.scale = scale;
        v.sidebar_expanded = layout.sidebar_expanded;
    });
}

/// Stage host — renders the scene background and placed products, and feeds
/// pointer/keyboard input to the engine.
#[component]
pub fn StageHost() -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let notify = expect_context::<RwSignal<NotifyState>>();
    let viewport = expect_context::<RwSignal<ViewportState>>();
    let host_ref = NodeRef::<leptos::html::Div>::new();

    // Initial viewport measurement + resize listener.
    #[cfg(feature = "hydrate")]
    {
        Effect::new(move || {
            if host_ref.get().is_none() {
                return;
            }
            if let Some(size) = window_size() {
                editor.update(|e| e.engine.set_viewport(size));
                publish_viewport(editor, viewport);
            }
        });

        let resize_handle = window_event_listener(leptos::ev::resize, move |_| {
            if let Some(size) = window_size() {
                editor.update(|e| e.engine.set_viewport(size));
                publish_viewport(editor, viewport);
            }
        });
        on_cleanup(move || resize_handle.remove());
    }

    // Telemetry for chrome that only wants numbers, not the whole engine.
    Effect::new(move || {
        editor.track();
        publish_viewport(editor, viewport);
    });

    let background = move || {
        editor.with(|e| {
            let snapshot = e.engine.snapshot();
            let scene = e.engine.selected_scene().and_then(|id| snapshot.scene(id))?;
            let space = e.engine.selected_space().and_then(|id| scene.space(id));
            let (image, size) = match space {
                Some(space) => {
                    let (image, size) = scene.background_for(space);
                    (image.clone(), size)
                }
                None => (scene.background.clone(), scene.background_size),
            };
            let scale = e.engine.transform().scale;
            Some((image, size.map(|s| Size::new(s.width * scale, s.height * scale))))
        })
    };

    let on_background_load = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(img) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlImageElement>().ok()) else {
                return;
            };
            let measured = Size::new(f64::from(img.natural_width()), f64::from(img.natural_height()));
            editor.update(|e| {
                if let Some(scene) = e.engine.selected_scene() {
                    e.engine.measure_background(scene, measured);
                }
            });
            publish_viewport(editor, viewport);
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let on_pointer_down = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::PointerEvent| {
                ev.prevent_default();
                if let Some(host) = host_ref.get() {
                    let _ = host.focus();
                    let _ = host.set_pointer_capture(ev.pointer_id());
                }
                let Some(point) = stage_point(&ev, &host_ref) else {
                    return;
                };
                let actions = editor.try_update(|e| e.engine.on_pointer_down(point)).unwrap_or_default();
                process_actions(editor, notify, actions);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::PointerEvent| {
                let Some(point) = stage_point(&ev, &host_ref) else {
                    return;
                };
                let actions = editor.try_update(|e| e.engine.on_pointer_move(point)).unwrap_or_default();
                process_actions(editor, notify, actions);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_up = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::PointerEvent| {
                if let Some(host) = host_ref.get() {
                    let _ = host.release_pointer_capture(ev.pointer_id());
                }
                let Some(point) = stage_point(&ev, &host_ref) else {
                    return;
                };
                let actions = editor.try_update(|e| e.engine.on_pointer_up(point)).unwrap_or_default();
                process_actions(editor, notify, actions);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_key_down = move |ev: leptos::ev::KeyboardEvent| {
        let key = ev.key();
        if key == "Escape" {
            ev.prevent_default();
        }
        let actions = editor.try_update(|e| e.engine.on_key_down(&key)).unwrap_or_default();
        process_actions(editor, notify, actions);
    };

    let placed = move || editor.with(|e| e.engine.placed());

    view! {
        <div
            class="stage-host"
            tabindex="0"
            node_ref=host_ref
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:keydown=on_key_down
        >
            {move || {
                background()
                    .map(|(image, size)| {
                        let style = size.map_or_else(String::new, |s| {
                            format!("width:{:.2}px;height:{:.2}px", s.width, s.height)
                        });
                        view! {
                            <img
                                class="stage-host__background"
                                src=image
                                style=style
                                on:load=on_background_load
                                draggable="false"
                                alt=""
                            />
                        }
                    })
            }}
            {move || {
                placed()
                    .into_iter()
                    .map(|p| placed_product_view(editor, p))
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

/// One placed product: positioned image plus its hotspot marker.
fn placed_product_view(editor: RwSignal<EditorState>, placed: PlacedProduct) -> impl IntoView {
    let product_id = placed.product_id;
    let style = format!(
        "left:{:.2}px;top:{:.2}px;width:{:.2}px;height:{:.2}px",
        placed.x, placed.y, placed.width, placed.height
    );
    let on_error = move |_ev: leptos::ev::ErrorEvent| {
        editor.update(|e| e.engine.mark_asset_failed(product_id));
    };
    let on_load = move |_ev: leptos::ev::Event| {
        editor.update(|e| e.engine.mark_asset_loaded(product_id));
    };

    view! {
        <div
            class="stage-host__product"
            class:stage-host__product--interactive=placed.interactive
            style=style
        >
            <img
                class="stage-host__product-image"
                src=placed.image
                on:error=on_error
                on:load=on_load
                draggable="false"
                alt=""
            />
            <span class="stage-host__hotspot" aria-hidden="true"></span>
        </div>
    }
}
