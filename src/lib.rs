// state-sync library - remote state machine client
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod panel;
pub mod resource;
pub mod shutdown;
pub mod sync;
pub mod telemetry;

// Re-export key types for easy access
pub use config::{config, StateSyncConfig};
pub use error::SyncError;
pub use http::HttpStateApi;
pub use observability::{OperationTimer, SyncMetrics, SyncStats};
pub use panel::PanelView;
pub use resource::StatusResource;
pub use shutdown::ShutdownCoordinator;
pub use sync::{
    render, render_at, ClickOutcome, Event, EventEntry, RefreshOutcome, StateApi, StateSnapshot,
    SyncController, View,
};
pub use telemetry::{create_sync_span, generate_correlation_id, init_telemetry};
