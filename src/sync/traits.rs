// Traits for dependency injection - the network and the display are swapped out in tests

use async_trait::async_trait;

use crate::error::SyncError;
use crate::sync::types::{EventEntry, StateSnapshot};

/// Remote state machine operations
#[async_trait]
pub trait StateApi: Send + Sync {
    /// GET the status document and decode it as a snapshot
    async fn refresh(&self, status_url: &str) -> Result<StateSnapshot, SyncError>;

    /// PUT to an event URL with no body; the response body is ignored
    async fn trigger(&self, event_url: &str) -> Result<(), SyncError>;
}

/// Display surface a snapshot is rendered into
pub trait View {
    /// Replace the current-state text
    fn set_current_state(&mut self, state: &str);

    /// Point the state diagram at a new image source
    fn set_diagram_source(&mut self, src: &str);

    /// Remove every entry from the valid-events list
    fn clear_events(&mut self);

    /// Append a clickable entry to the valid-events list
    fn append_event(&mut self, entry: EventEntry);

    /// Entries currently listed, in display order
    fn entries(&self) -> &[EventEntry];
}
