use anyhow::Result;
use std::path::PathBuf;

use crate::cli::commands::Command;
use crate::config::StateSyncConfig;

pub struct ConfigCommand {
    config: StateSyncConfig,
    write: Option<PathBuf>,
}

impl ConfigCommand {
    pub fn new(config: StateSyncConfig, write: Option<PathBuf>) -> Self {
        Self { config, write }
    }
}

impl Command for ConfigCommand {
    async fn execute(&self) -> Result<()> {
        match &self.write {
            Some(path) => {
                self.config.save_to_file(path)?;
                println!("⚙️  Wrote configuration to {}", path.display());
            }
            None => print!("{}", self.config.to_toml()?),
        }
        Ok(())
    }
}
