#[cfg(test)]
#[path = "scenes_test.rs"]
mod scenes_test;

/// A scene summary for the dashboard list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneListItem {
    pub id: String,
    pub name: String,
    pub tag: Option<String>,
    pub space_count: usize,
}

/// Shared scene list state backed by the fetch-scenes operation.
///
/// Pending-creation state is deliberately NOT here: the create dialog owns
/// its own in-flight flag so no ambient global can leak between workflows.
#[derive(Clone, Debug, Default)]
pub struct ScenesState {
    pub items: Vec<SceneListItem>,
    pub loading: bool,
}

impl ScenesState {
    /// Replace the list from a completed fetch.
    pub fn loaded(&mut self, items: Vec<SceneListItem>) {
        self.items = items;
        self.loading = false;
    }

    /// Drop a scene locally (after a confirmed delete).
    pub fn remove(&mut self, scene_id: &str) {
        self.items.retain(|item| item.id != scene_id);
    }
}
