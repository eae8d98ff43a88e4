use anyhow::{anyhow, Result};
use std::sync::Arc;

use crate::config::StateSyncConfig;
use crate::http::HttpStateApi;
use crate::observability::SyncMetrics;
use crate::panel::PanelView;
use crate::resource::StatusResource;
use crate::sync::SyncController;

pub mod config;
pub mod diagram;
pub mod show;
pub mod trigger;
pub mod watch;

pub type PanelController = SyncController<HttpStateApi, PanelView>;

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

/// Build a controller for the configured page, rendering into a terminal panel
pub fn build_controller(config: &StateSyncConfig, metrics: Arc<SyncMetrics>) -> Result<PanelController> {
    let page_url = config.client.page_url.as_deref().ok_or_else(|| {
        anyhow!(
            "No page URL configured\n\
             🔧 Pass --page-url <URL>, set STATE_SYNC_PAGE_URL, \
             or add client.page_url to state-sync.toml"
        )
    })?;

    let resource = StatusResource::from_page_url(page_url);
    tracing::debug!(page_url, status_url = %resource, "Resolved status resource");
    let api = HttpStateApi::new(resource.clone(), &config.client)?;
    Ok(SyncController::with_metrics(api, resource, PanelView::new(), metrics))
}

pub fn print_panel(controller: &PanelController) {
    controller.with_view(|panel| println!("{panel}"));
}

pub async fn show_how_to_start() -> Result<()> {
    println!("🔁 state-sync - remote state machine client");
    println!();
    println!("To get started:");
    println!("  👁️  state-sync --page-url <URL> watch          # Interactive loop");
    println!("  📍 state-sync --page-url <URL> show           # Current state");
    println!("  🔀 state-sync --page-url <URL> trigger <EVENT> # Fire one event");
    println!("  🖼️  state-sync --page-url <URL> diagram -o x.png");
    println!("  ⚙️  state-sync config                          # Effective settings");
    println!();
    println!("💡 The status document is read from <URL>.json (a trailing '#' is dropped)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_controller_requires_page_url() {
        let config = StateSyncConfig::default();
        let err = build_controller(&config, Arc::new(SyncMetrics::new())).err().unwrap();
        assert!(err.to_string().contains("No page URL configured"));
    }

    #[test]
    fn test_build_controller_resolves_status_resource() {
        let mut config = StateSyncConfig::default();
        config.client.page_url = Some("http://localhost:5000/machines/document/1#".to_string());

        let controller = build_controller(&config, Arc::new(SyncMetrics::new())).unwrap();
        assert_eq!(
            controller.resource().as_str(),
            "http://localhost:5000/machines/document/1.json"
        );
        assert!(controller.is_idle());
    }
}
