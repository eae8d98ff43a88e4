// Core types for the state sync loop

use serde::{Deserialize, Serialize};

/// Server-produced description of the remote machine's current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Name of the current state
    pub state: String,
    /// Location of the rendered state diagram
    pub image_url: String,
    /// Transitions valid from the current state, in display order
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A named transition and the URL that triggers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub url: String,
}

/// A clickable entry in the rendered event list.
///
/// `target` is the trigger URL stored alongside the label; it is never
/// followed as a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEntry {
    pub label: String,
    pub target: String,
}

impl From<&Event> for EventEntry {
    fn from(event: &Event) -> Self {
        Self {
            label: event.name.clone(),
            target: event.url.clone(),
        }
    }
}

/// Result of a refresh that completed without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The snapshot was rendered into the view
    Rendered { state: String, generation: u64 },
    /// A newer refresh had already rendered; this response was dropped
    Stale { generation: u64, latest: u64 },
}

/// Result of a click that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Trigger, refresh and render all completed
    Completed(RefreshOutcome),
    /// Another chain was in flight, so nothing was sent
    Ignored { in_flight: String },
}

impl ClickOutcome {
    pub fn rendered_state(&self) -> Option<&str> {
        match self {
            ClickOutcome::Completed(RefreshOutcome::Rendered { state, .. }) => Some(state),
            _ => None,
        }
    }
}
