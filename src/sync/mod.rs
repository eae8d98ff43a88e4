// State sync loop - resolve, refresh, render, trigger
//
// The network and the display sit behind traits so the controller can be
// exercised without either.

pub mod types;
pub mod traits;
pub mod render;
pub mod state_machine;
pub mod controller;

#[cfg(test)]
pub mod mocks;


pub use controller::SyncController;
pub use render::{cache_busted, render, render_at};
pub use state_machine::{ClickEvent, ClickHandler};
pub use traits::{StateApi, View};
pub use types::{ClickOutcome, Event, EventEntry, RefreshOutcome, StateSnapshot};
