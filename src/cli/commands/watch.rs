use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::cli::commands::{build_controller, print_panel, Command, PanelController};
use crate::config::StateSyncConfig;
use crate::error::SyncError;
use crate::observability::SyncMetrics;
use crate::shutdown::ShutdownCoordinator;
use crate::panel::PanelView;
use crate::sync::{ClickOutcome, EventEntry, RefreshOutcome, View};

/// One line typed at the watch prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchInput {
    Quit,
    Refresh,
    Redraw,
    Select(String),
}

impl WatchInput {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "q" | "quit" | "exit" => WatchInput::Quit,
            "r" | "refresh" => WatchInput::Refresh,
            "" => WatchInput::Redraw,
            selection => WatchInput::Select(selection.to_string()),
        }
    }
}

/// Interactive loop: every selection runs as its own task so the prompt stays
/// live, and selections made while a transition is in flight are ignored.
pub struct WatchCommand {
    config: StateSyncConfig,
    poll_interval: Option<Duration>,
}

impl WatchCommand {
    pub fn new(config: StateSyncConfig) -> Self {
        let poll_interval = config
            .client
            .poll_interval_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        Self {
            config,
            poll_interval,
        }
    }

    pub fn with_poll_interval(mut self, seconds: Option<u64>) -> Self {
        if let Some(secs) = seconds {
            self.poll_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }
        self
    }
}

impl Command for WatchCommand {
    async fn execute(&self) -> Result<()> {
        let metrics = Arc::new(SyncMetrics::new());
        let controller = Arc::new(build_controller(&self.config, metrics.clone())?);
        let shutdown = ShutdownCoordinator::new();
        shutdown.install_signal_handler();

        println!("👁️  Watching {}", controller.resource());
        if let Some(every) = self.poll_interval {
            println!("🔄 Polling every {}s", every.as_secs());
        }
        if controller.refresh_logged().await.is_ok() {
            print_panel(&controller);
        }
        prompt();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut ticker = self.poll_interval.map(|every| {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker
        });
        // The first tick fires immediately and the page was just loaded
        if let Some(ticker) = ticker.as_mut() {
            ticker.tick().await;
        }

        loop {
            tokio::select! {
                _ = shutdown.wait() => break,
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match WatchInput::parse(&line) {
                        WatchInput::Quit => break,
                        WatchInput::Redraw => {
                            print_panel(&controller);
                            prompt();
                        }
                        WatchInput::Refresh => spawn_refresh(&controller, true),
                        WatchInput::Select(selection) => spawn_click(&controller, selection),
                    }
                }
                _ = next_tick(&mut ticker) => spawn_refresh(&controller, false),
            }
        }

        shutdown.finish(&metrics, self.config.observability.metrics_enabled)
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn spawn_refresh(controller: &Arc<PanelController>, always_redraw: bool) {
    let controller = controller.clone();
    tokio::spawn(async move {
        let before = controller.with_view(visible_state);
        if let Ok(RefreshOutcome::Rendered { .. }) = controller.refresh_logged().await {
            let changed = controller.with_view(visible_state) != before;
            if always_redraw || changed {
                print_panel(&controller);
                prompt();
            }
        }
    });
}

/// Everything but the cache-busted diagram source, which changes on every render
fn visible_state(panel: &PanelView) -> (String, Vec<EventEntry>) {
    (panel.current_state().to_string(), panel.entries().to_vec())
}

fn spawn_click(controller: &Arc<PanelController>, selection: String) {
    let controller = controller.clone();
    tokio::spawn(async move {
        match controller.click_entry(&selection).await {
            Ok(ClickOutcome::Completed(RefreshOutcome::Rendered { .. })) => {
                print_panel(&controller);
                prompt();
            }
            Ok(ClickOutcome::Completed(RefreshOutcome::Stale { .. })) => {}
            Ok(ClickOutcome::Ignored { in_flight }) => {
                println!("⏳ Still waiting on {in_flight}; '{selection}' ignored");
                prompt();
            }
            Err(SyncError::UnknownEvent(selection)) => {
                println!("❓ No valid event '{selection}'");
                prompt();
            }
            // Already logged on the diagnostic channel; the last panel stays valid
            Err(err) if err.is_remote() => prompt(),
            Err(err) => {
                println!("❌ {err}");
                prompt();
            }
        }
    });
}

fn prompt() {
    print!("➡️  event name or number, [r]efresh, [q]uit: ");
    let _ = std::io::stdout().flush();
}
