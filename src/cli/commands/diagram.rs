use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::commands::{build_controller, Command};
use crate::config::StateSyncConfig;
use crate::observability::SyncMetrics;

/// Save the state diagram the panel currently points at
pub struct DiagramCommand {
    config: StateSyncConfig,
    output: PathBuf,
}

impl DiagramCommand {
    pub fn new(config: StateSyncConfig, output: PathBuf) -> Self {
        Self { config, output }
    }
}

impl Command for DiagramCommand {
    async fn execute(&self) -> Result<()> {
        let controller = build_controller(&self.config, Arc::new(SyncMetrics::new()))?;
        controller.refresh_logged().await?;

        let (state, source) = controller.with_view(|panel| {
            (panel.current_state().to_string(), panel.diagram_source().to_string())
        });
        let bytes = controller.api().download(&source).await?;
        tokio::fs::write(&self.output, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        println!(
            "🖼️  Saved diagram for state '{}' to {} ({} bytes)",
            state,
            self.output.display(),
            bytes.len()
        );
        Ok(())
    }
}
