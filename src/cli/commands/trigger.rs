use anyhow::{bail, Result};
use std::sync::Arc;

use crate::cli::commands::{build_controller, print_panel, Command};
use crate::config::StateSyncConfig;
use crate::observability::SyncMetrics;
use crate::sync::{ClickOutcome, RefreshOutcome};

/// Load the page, click one event, and show where the machine ended up
pub struct TriggerCommand {
    config: StateSyncConfig,
    event: String,
}

impl TriggerCommand {
    pub fn new(config: StateSyncConfig, event: String) -> Self {
        Self { config, event }
    }
}

impl Command for TriggerCommand {
    async fn execute(&self) -> Result<()> {
        let controller = build_controller(&self.config, Arc::new(SyncMetrics::new()))?;
        controller.refresh_logged().await?;

        match controller.click_entry(&self.event).await? {
            ClickOutcome::Completed(RefreshOutcome::Rendered { .. }) => {
                println!("✅ Triggered '{}'", self.event);
                print_panel(&controller);
                Ok(())
            }
            ClickOutcome::Completed(RefreshOutcome::Stale { .. }) => {
                println!("✅ Triggered '{}' (a newer state was already shown)", self.event);
                print_panel(&controller);
                Ok(())
            }
            ClickOutcome::Ignored { in_flight } => {
                bail!("Another transition ({in_flight}) is still in flight")
            }
        }
    }
}
