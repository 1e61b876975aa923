//! Debounced settle-then-snap for the selection surface.
//!
//! Every scroll event bumps a generation counter and schedules a settle
//! check one quiet period later. A check that wakes up to find a newer
//! generation lost the race — more scrolling happened — and does nothing, so
//! the snap calculation never fights an in-progress gesture. Only the final
//! check runs [`stage::engine::EngineCore::surface_settle`].

#[cfg(test)]
#[path = "tray_scroll_test.rs"]
mod tray_scroll_test;

use leptos::prelude::RwSignal;

use crate::state::editor::EditorState;
use crate::state::notify::NotifyState;

/// Whether a settle scheduled at `scheduled` is still the newest one.
#[must_use]
pub fn is_latest(scheduled: u64, latest: u64) -> bool {
    scheduled == latest
}

/// Record a scroll event and schedule the settle check after the quiet
/// period.
pub fn schedule_settle(editor: RwSignal<EditorState>, notify: RwSignal<NotifyState>, scroll_seq: RwSignal<u64>) {
    #[cfg(feature = "hydrate")]
    {
        use std::time::Duration;

        use leptos::prelude::{GetUntracked, Set};

        use stage::consts::SCROLL_SETTLE_MS;

        let seq = scroll_seq.get_untracked() + 1;
        scroll_seq.set(seq);
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(Duration::from_millis(u64::from(SCROLL_SETTLE_MS))).await;
            if !is_latest(seq, scroll_seq.get_untracked()) {
                return;
            }
            let actions = {
                use leptos::prelude::Update;
                editor.try_update(|e| e.engine.surface_settle()).unwrap_or_default()
            };
            crate::util::position_sync::process_actions(editor, notify, actions);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (editor, notify, scroll_seq);
    }
}
