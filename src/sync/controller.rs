use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use statig::prelude::*;
use tracing::{debug, info, warn, Instrument};

use crate::error::SyncError;
use crate::observability::{OperationTimer, SyncMetrics};
use crate::resource::StatusResource;
use crate::sync::render::render;
use crate::sync::state_machine::{ClickEvent, ClickHandler};
use crate::sync::traits::{StateApi, View};
use crate::sync::types::{ClickOutcome, RefreshOutcome, StateSnapshot};
use crate::telemetry::{create_sync_span, generate_correlation_id};

/// View plus the generation of the snapshot it currently shows
struct Rendered<V> {
    view: V,
    generation: u64,
}

/// Drives the fetch → render → trigger → re-fetch loop against one status resource.
///
/// Every refresh takes a generation ticket before its GET is sent; a response
/// is only rendered if no newer ticket has rendered first. Clicks that arrive
/// while another click chain is in flight are ignored.
pub struct SyncController<A, V> {
    api: A,
    resource: StatusResource,
    rendered: Mutex<Rendered<V>>,
    clicks: Mutex<StateMachine<ClickHandler>>,
    next_generation: AtomicU64,
    metrics: Arc<SyncMetrics>,
}

impl<A: StateApi, V: View> SyncController<A, V> {
    pub fn new(api: A, resource: StatusResource, view: V) -> Self {
        Self::with_metrics(api, resource, view, Arc::new(SyncMetrics::new()))
    }

    pub fn with_metrics(api: A, resource: StatusResource, view: V, metrics: Arc<SyncMetrics>) -> Self {
        Self {
            api,
            resource,
            rendered: Mutex::new(Rendered { view, generation: 0 }),
            clicks: Mutex::new(ClickHandler::new().state_machine()),
            next_generation: AtomicU64::new(0),
            metrics,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn resource(&self) -> &StatusResource {
        &self.resource
    }

    pub fn metrics(&self) -> &SyncMetrics {
        &self.metrics
    }

    /// Run `f` against the view. The lock is released before returning.
    pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&lock(&self.rendered).view)
    }

    /// True when no click chain is in flight
    pub fn is_idle(&self) -> bool {
        lock(&self.clicks).inner().is_idle()
    }

    /// Fetch the status document without touching the view.
    pub async fn fetch(&self) -> Result<StateSnapshot, SyncError> {
        self.metrics.record_refresh();
        self.api.refresh(self.resource.as_str()).await.inspect_err(|e| {
            self.report("refresh", self.resource.as_str(), e);
        })
    }

    /// Fetch the status document and render it, unless a newer refresh beat it.
    pub async fn refresh(&self) -> Result<RefreshOutcome, SyncError> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = self.fetch().await?;
        Ok(self.apply(generation, &snapshot))
    }

    /// Refresh in its own span, for the initial load and background polling.
    pub async fn refresh_logged(&self) -> Result<RefreshOutcome, SyncError> {
        let correlation_id = generate_correlation_id();
        let span = create_sync_span("refresh", None, &correlation_id);
        self.refresh().instrument(span).await
    }

    /// Click the rendered entry matching `selector`: an exact label wins,
    /// otherwise it is read as a 1-based position in the list.
    pub async fn click_entry(&self, selector: &str) -> Result<ClickOutcome, SyncError> {
        let target = self.with_view(|view| {
            let entries = view.entries();
            entries
                .iter()
                .find(|e| e.label == selector)
                .or_else(|| {
                    selector
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|i| entries.get(i))
                })
                .map(|e| e.target.clone())
        });

        match target {
            Some(target) => self.click(&target).await,
            None => Err(SyncError::UnknownEvent(selector.to_string())),
        }
    }

    /// Trigger `target`, then refresh and render.
    ///
    /// Returns `Ignored` without sending anything if another chain is in flight.
    pub async fn click(&self, target: &str) -> Result<ClickOutcome, SyncError> {
        if let Some(in_flight) = self.begin_click(target) {
            self.metrics.record_ignored_click();
            return Ok(ClickOutcome::Ignored { in_flight });
        }

        // Settles on completion and also when this future is dropped mid-chain
        let settle = SettleOnDrop {
            clicks: &self.clicks,
        };
        let correlation_id = generate_correlation_id();
        let span = create_sync_span("click", Some(target), &correlation_id);
        let timer = OperationTimer::new("click_chain");

        let result = self.run_chain(target).instrument(span).await;

        drop(settle);
        timer.finish();
        result.map(ClickOutcome::Completed)
    }

    async fn run_chain(&self, target: &str) -> Result<RefreshOutcome, SyncError> {
        self.metrics.record_trigger();
        self.api
            .trigger(target)
            .await
            .inspect_err(|e| self.report("trigger", target, e))?;
        debug!(event_url = %target, "Trigger accepted, refreshing");
        self.refresh().await
    }

    /// Returns the in-flight target when the click was not accepted.
    fn begin_click(&self, target: &str) -> Option<String> {
        let mut clicks = lock(&self.clicks);
        let before = clicks.inner().accepted();
        clicks.handle(&ClickEvent::Click {
            target: target.to_string(),
        });
        if clicks.inner().accepted() > before {
            None
        } else {
            Some(clicks.inner().in_flight().unwrap_or_default().to_string())
        }
    }

    fn apply(&self, generation: u64, snapshot: &StateSnapshot) -> RefreshOutcome {
        let mut rendered = lock(&self.rendered);
        if generation <= rendered.generation {
            self.metrics.record_stale();
            info!(
                generation,
                latest = rendered.generation,
                "Discarding out-of-order snapshot"
            );
            return RefreshOutcome::Stale {
                generation,
                latest: rendered.generation,
            };
        }

        render(snapshot, &mut rendered.view);
        rendered.generation = generation;
        debug!(generation, state = %snapshot.state, events = snapshot.events.len(), "Rendered snapshot");
        RefreshOutcome::Rendered {
            state: snapshot.state.clone(),
            generation,
        }
    }

    fn report(&self, stage: &str, url: &str, err: &SyncError) {
        self.metrics.record_failure();
        warn!(
            stage,
            url,
            status = ?err.status(),
            status_text = err.status_text(),
            "failed: {}",
            err
        );
    }
}

/// Returns the click handler to Idle when the chain that owns it ends.
struct SettleOnDrop<'a> {
    clicks: &'a Mutex<StateMachine<ClickHandler>>,
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        lock(self.clicks).handle(&ClickEvent::Settled);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panic inside render must not wedge the controller.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
