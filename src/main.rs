use anyhow::Result;
use clap::Parser;

use state_sync::cli::commands::config::ConfigCommand;
use state_sync::cli::commands::diagram::DiagramCommand;
use state_sync::cli::commands::show::ShowCommand;
use state_sync::cli::commands::trigger::TriggerCommand;
use state_sync::cli::commands::watch::WatchCommand;
use state_sync::cli::commands::{show_how_to_start, Command};
use state_sync::cli::{Cli, Commands};
use state_sync::{config, init_telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config loading also reads .env, so it goes before telemetry
    let mut config = config()?.clone();
    if let Some(page_url) = cli.page_url {
        config.client.page_url = Some(page_url);
    }
    if cli.json_logs {
        config.observability.json_logs = true;
    }
    init_telemetry(&config.observability)?;

    match cli.command {
        Some(Commands::Show { json }) => ShowCommand::new(config).with_json(json).execute().await,
        Some(Commands::Trigger { event }) => TriggerCommand::new(config, event).execute().await,
        Some(Commands::Watch { poll_interval }) => {
            WatchCommand::new(config)
                .with_poll_interval(poll_interval)
                .execute()
                .await
        }
        Some(Commands::Diagram { output }) => DiagramCommand::new(config, output).execute().await,
        Some(Commands::Config { write }) => ConfigCommand::new(config, write).execute().await,
        None => show_how_to_start().await,
    }
}
