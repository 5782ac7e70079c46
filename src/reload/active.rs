//! Active Section Tracking
//!
//! Process-wide mirror of each connected viewer's active section.
//! Supports multiple browser tabs scrolled to different sections.

use std::sync::LazyLock;

use dashmap::DashMap;

use crate::scrollspy::SectionId;

/// Opaque id of a connected preview client.
pub type ClientId = u64;

// =============================================================================
// Active Section State
// =============================================================================

/// Tracks the active section of every connected client.
///
/// Thread-safe. Owned conceptually by the WsActor (the only writer);
/// the status display reads it.
pub struct ActiveSectionState {
    by_client: DashMap<ClientId, SectionId>,
}

impl ActiveSectionState {
    pub fn new() -> Self {
        Self {
            by_client: DashMap::new(),
        }
    }

    /// Record a client's active section (on connect and on every change).
    pub fn set(&self, client: ClientId, section: SectionId) {
        self.by_client.insert(client, section);
    }

    /// Forget a client (called on disconnect).
    pub fn remove(&self, client: ClientId) {
        self.by_client.remove(&client);
    }

    /// Current active section for a client.
    pub fn get(&self, client: ClientId) -> Option<SectionId> {
        self.by_client.get(&client).map(|s| s.clone())
    }

    /// Whether any client is currently viewing the given section.
    pub fn is_viewed(&self, section: &SectionId) -> bool {
        self.by_client.iter().any(|entry| entry.value() == section)
    }

    /// Number of connected clients with a known section.
    pub fn viewers(&self) -> usize {
        self.by_client.len()
    }

    /// Clear all clients (called when every client disconnects).
    pub fn clear(&self) {
        self.by_client.clear();
    }
}

impl Default for ActiveSectionState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Global Instance
// =============================================================================

/// Global active section state.
///
/// Written by the WsActor as scroll reports arrive,
/// read by the watch status display.
pub static ACTIVE_SECTIONS: LazyLock<ActiveSectionState> = LazyLock::new(ActiveSectionState::new);

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_section_state() {
        let state = ActiveSectionState::new();

        assert_eq!(state.viewers(), 0);

        state.set(1, SectionId::from("home"));
        state.set(2, SectionId::from("projects"));

        assert_eq!(state.viewers(), 2);
        assert_eq!(state.get(1).unwrap().as_str(), "home");
        assert!(state.is_viewed(&SectionId::from("projects")));
        assert!(!state.is_viewed(&SectionId::from("contact")));

        // Scrolling updates in place
        state.set(1, SectionId::from("about"));
        assert_eq!(state.get(1).unwrap().as_str(), "about");
        assert!(!state.is_viewed(&SectionId::from("home")));

        state.remove(2);
        assert_eq!(state.viewers(), 1);

        state.clear();
        assert_eq!(state.viewers(), 0);
    }
}
