//! Editor state: the engine instance plus fetch-generation bookkeeping.
//!
//! DESIGN
//! ======
//! The engine is the authoritative model; this wrapper adds what only the
//! client needs — an explicit request-generation counter for space-detail
//! fetches. Every issued fetch captures `(generation, scene, space)`; a
//! response applies only when the generation still matches AND the engine's
//! current selection still targets the fetched space. Superseded responses
//! are discarded without an error (and without a notification).

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use stage::engine::EngineCore;
use stage::model::{SceneId, SpaceId};

/// Ticket for one in-flight space-detail fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub scene: SceneId,
    pub space: SpaceId,
}

/// Route-scoped editor state shared across components.
#[derive(Clone, Debug, Default)]
pub struct EditorState {
    /// The scene-composition engine (authoritative model).
    pub engine: EngineCore,
    /// Generation of the most recently issued space-detail fetch.
    fetch_generation: u64,
    /// Whether a space-detail fetch is in flight for the current selection.
    pub loading_space: bool,
}

impl EditorState {
    /// Issue a ticket for a new space-detail fetch, superseding any earlier
    /// in-flight fetch.
    pub fn begin_fetch(&mut self, scene: SceneId, space: SpaceId) -> FetchTicket {
        self.fetch_generation += 1;
        self.loading_space = true;
        FetchTicket { generation: self.fetch_generation, scene, space }
    }

    /// Whether a completed fetch may apply its payload: it must be the
    /// newest fetch and its target must still be the engine's selection.
    #[must_use]
    pub fn may_apply(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.fetch_generation
            && self.engine.selected_scene() == Some(ticket.scene)
            && self.engine.selected_space() == Some(ticket.space)
    }

    /// A fetch finished (applied or discarded); clear the loading flag if it
    /// was the newest one.
    pub fn finish_fetch(&mut self, ticket: FetchTicket) {
        if ticket.generation == self.fetch_generation {
            self.loading_space = false;
        }
    }

    /// Reset everything for a route change.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
