use anyhow::Result;
use std::sync::Arc;

use crate::cli::commands::{build_controller, print_panel, Command};
use crate::config::StateSyncConfig;
use crate::observability::SyncMetrics;

pub struct ShowCommand {
    config: StateSyncConfig,
    json: bool,
}

impl ShowCommand {
    pub fn new(config: StateSyncConfig) -> Self {
        Self { config, json: false }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

impl Command for ShowCommand {
    async fn execute(&self) -> Result<()> {
        let controller = build_controller(&self.config, Arc::new(SyncMetrics::new()))?;

        if self.json {
            let snapshot = controller.fetch().await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            return Ok(());
        }

        controller.refresh_logged().await?;
        print_panel(&controller);
        Ok(())
    }
}
