use std::collections::HashMap;

use crate::graph::model::HideState;

/// Hide state per identifier, recorded when a node is defined and read at reference sites.
#[derive(Debug, Default)]
pub struct VisibilityTable {
    states: HashMap<String, HideState>,
}

impl VisibilityTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `state` for `id`. The first record wins.
    pub fn record(&mut self, id: &str, state: HideState) {
        if self.states.contains_key(id) {
            tracing::debug!(id, "hide state already recorded");
            return;
        }
        self.states.insert(id.to_owned(), state);
    }

    /// Recorded state of `id`; [`HideState::None`] when nothing was recorded.
    pub fn get(&self, id: &str) -> HideState {
        self.states.get(id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/serialize/visibility.rs"]
mod tests;
