use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "state-sync")]
#[command(version)]
#[command(about = "Mirror a remote state machine and trigger its transitions")]
#[command(long_about = "state-sync resolves the status document of a state machine page \
                       (page URL + .json), renders its current state, diagram and valid events, \
                       and triggers transitions with PUT requests. Start with 'state-sync watch'.")]
pub struct Cli {
    /// Page URL of the machine, e.g. http://localhost:5000/machines/tcp/<id>
    #[arg(long, global = true, env = "STATE_SYNC_PAGE_URL")]
    pub page_url: Option<String>,

    /// Emit JSON log lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the current state once and print it
    Show {
        /// Print the raw snapshot as JSON instead of the panel
        #[arg(long)]
        json: bool,
    },
    /// Trigger a valid event by name or list position, then show the new state
    Trigger {
        /// Event name, or its 1-based position in the valid events list
        event: String,
    },
    /// Interactive loop: pick events from stdin, optionally polling in the background
    Watch {
        /// Refresh every N seconds in addition to after each transition
        #[arg(long, value_name = "SECS")]
        poll_interval: Option<u64>,
    },
    /// Download the current state diagram image
    Diagram {
        /// File to write the image to
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
    /// Print the effective configuration as TOML, or write it to a file
    Config {
        /// Write the configuration to this file instead of printing it
        #[arg(long, value_name = "FILE")]
        write: Option<PathBuf>,
    },
}
