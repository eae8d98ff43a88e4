use chrono::Utc;

use crate::sync::traits::View;
use crate::sync::types::{EventEntry, StateSnapshot};

/// Render a snapshot into a view, stamping the diagram with the current time.
pub fn render(snapshot: &StateSnapshot, view: &mut impl View) {
    render_at(snapshot, view, Utc::now().timestamp_millis());
}

/// Render a snapshot using an explicit epoch-millisecond cache buster.
pub fn render_at(snapshot: &StateSnapshot, view: &mut impl View, epoch_millis: i64) {
    view.set_current_state(&snapshot.state);
    view.set_diagram_source(&cache_busted(&snapshot.image_url, epoch_millis));
    view.clear_events();
    for event in &snapshot.events {
        view.append_event(EventEntry::from(event));
    }
}

/// Append `random=<millis>` so image caches never serve an old diagram.
pub fn cache_busted(image_url: &str, epoch_millis: i64) -> String {
    let separator = if image_url.contains('?') { '&' } else { '?' };
    format!("{image_url}{separator}random={epoch_millis}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelView;
    use crate::sync::mocks::{RecordingView, ViewOp};
    use crate::sync::types::Event;

    fn pending_snapshot() -> StateSnapshot {
        StateSnapshot {
            state: "pending".to_string(),
            image_url: "/img/pending.png".to_string(),
            events: vec![Event {
                name: "approve".to_string(),
                url: "/wf/1/approve".to_string(),
            }],
        }
    }

    #[test]
    fn test_pending_snapshot_renders_state_diagram_and_entry() {
        let mut view = PanelView::new();
        render(&pending_snapshot(), &mut view);

        assert_eq!(view.current_state(), "pending");
        assert!(view.diagram_source().starts_with("/img/pending.png?random="));
        assert_eq!(
            view.entries(),
            &[EventEntry {
                label: "approve".to_string(),
                target: "/wf/1/approve".to_string(),
            }]
        );
    }

    #[test]
    fn test_entries_follow_event_order() {
        let snapshot = StateSnapshot {
            state: "CLOSED".to_string(),
            image_url: "/api/connections/1.png".to_string(),
            events: ["passive_open", "active_open", "send_syn", "close"]
                .iter()
                .map(|name| Event {
                    name: name.to_string(),
                    url: format!("/api/connections/1/{name}"),
                })
                .collect(),
        };

        let mut view = PanelView::new();
        render_at(&snapshot, &mut view, 1);

        let labels: Vec<&str> = view.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["passive_open", "active_open", "send_syn", "close"]);
        for (entry, event) in view.entries().iter().zip(&snapshot.events) {
            assert_eq!(entry.target, event.url);
        }
    }

    #[test]
    fn test_empty_events_clear_previous_entries() {
        let mut view = PanelView::new();
        render_at(&pending_snapshot(), &mut view, 1);
        assert_eq!(view.entries().len(), 1);

        let approved = StateSnapshot {
            state: "approved".to_string(),
            image_url: "/img/approved.png".to_string(),
            events: vec![],
        };
        render_at(&approved, &mut view, 2);

        assert_eq!(view.current_state(), "approved");
        assert!(view.entries().is_empty());
    }

    #[test]
    fn test_mutations_apply_in_order() {
        let mut view = RecordingView::default();
        render_at(&pending_snapshot(), &mut view, 42);

        assert_eq!(
            view.ops,
            vec![
                ViewOp::SetState("pending".to_string()),
                ViewOp::SetDiagram("/img/pending.png?random=42".to_string()),
                ViewOp::Clear,
                ViewOp::Append("approve".to_string(), "/wf/1/approve".to_string()),
            ]
        );
    }

    #[test]
    fn test_cache_buster_changes_over_time() {
        let mut view = PanelView::new();
        render(&pending_snapshot(), &mut view);
        let first = view.diagram_source().to_string();

        std::thread::sleep(std::time::Duration::from_millis(5));
        render(&pending_snapshot(), &mut view);
        let second = view.diagram_source().to_string();

        assert!(second.starts_with("/img/pending.png?random="));
        assert_ne!(first, second);
    }

    #[test]
    fn test_cache_buster_extends_existing_query() {
        assert_eq!(cache_busted("/img/x.png?theme=dark", 7), "/img/x.png?theme=dark&random=7");
        assert_eq!(cache_busted("/img/x.png", 7), "/img/x.png?random=7");
    }
}
