// Mock implementations for testing - no network, no terminal

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use crate::error::SyncError;
use crate::sync::traits::{StateApi, View};
use crate::sync::types::{EventEntry, StateSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Get(String),
    Put(String),
}

/// Scripted GET responses, optionally delayed
struct ScriptedRefresh {
    response: Result<StateSnapshot, u16>,
    delay: Duration,
}

/// Mock state API that replays queued snapshots and records every call
#[derive(Default)]
pub struct MockStateApi {
    refreshes: Mutex<VecDeque<ScriptedRefresh>>,
    failing_triggers: Mutex<HashMap<String, u16>>,
    calls: Mutex<Vec<ApiCall>>,
    trigger_gate: Option<Arc<Notify>>,
}

impl MockStateApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Triggers wait on `gate` before answering
    pub fn with_trigger_gate(gate: Arc<Notify>) -> Self {
        Self {
            trigger_gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn push_snapshot(&self, snapshot: StateSnapshot) {
        self.push_delayed_snapshot(snapshot, Duration::ZERO);
    }

    pub fn push_delayed_snapshot(&self, snapshot: StateSnapshot, delay: Duration) {
        self.refreshes.lock().unwrap().push_back(ScriptedRefresh {
            response: Ok(snapshot),
            delay,
        });
    }

    pub fn push_refresh_failure(&self, status: u16) {
        self.refreshes.lock().unwrap().push_back(ScriptedRefresh {
            response: Err(status),
            delay: Duration::ZERO,
        });
    }

    pub fn fail_trigger(&self, url: &str, status: u16) {
        self.failing_triggers
            .lock()
            .unwrap()
            .insert(url.to_string(), status);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }
}

fn transport(url: &str, status: u16) -> SyncError {
    SyncError::Transport {
        url: url.to_string(),
        status: Some(status),
        status_text: reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string(),
    }
}

#[async_trait]
impl StateApi for MockStateApi {
    async fn refresh(&self, status_url: &str) -> Result<StateSnapshot, SyncError> {
        self.calls
            .lock()
            .unwrap()
            .push(ApiCall::Get(status_url.to_string()));
        let scripted = self.refreshes.lock().unwrap().pop_front();

        match scripted {
            Some(ScriptedRefresh { response, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                response.map_err(|status| transport(status_url, status))
            }
            None => Err(transport(status_url, 404)),
        }
    }

    async fn trigger(&self, event_url: &str) -> Result<(), SyncError> {
        self.calls
            .lock()
            .unwrap()
            .push(ApiCall::Put(event_url.to_string()));
        if let Some(gate) = &self.trigger_gate {
            gate.notified().await;
        }

        let failure = self.failing_triggers.lock().unwrap().get(event_url).copied();
        match failure {
            Some(status) => Err(transport(event_url, status)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOp {
    SetState(String),
    SetDiagram(String),
    Clear,
    Append(String, String),
}

/// View that records each mutation in order
#[derive(Debug, Default)]
pub struct RecordingView {
    pub ops: Vec<ViewOp>,
    entries: Vec<EventEntry>,
}

impl View for RecordingView {
    fn set_current_state(&mut self, state: &str) {
        self.ops.push(ViewOp::SetState(state.to_string()));
    }

    fn set_diagram_source(&mut self, src: &str) {
        self.ops.push(ViewOp::SetDiagram(src.to_string()));
    }

    fn clear_events(&mut self) {
        self.ops.push(ViewOp::Clear);
        self.entries.clear();
    }

    fn append_event(&mut self, entry: EventEntry) {
        self.ops
            .push(ViewOp::Append(entry.label.clone(), entry.target.clone()));
        self.entries.push(entry);
    }

    fn entries(&self) -> &[EventEntry] {
        &self.entries
    }
}
