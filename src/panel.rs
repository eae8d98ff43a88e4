use std::fmt;

use crate::sync::traits::View;
use crate::sync::types::EventEntry;

/// Terminal stand-in for the machine page: current state, diagram source and
/// a numbered list of valid events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelView {
    current_state: String,
    diagram_source: String,
    entries: Vec<EventEntry>,
}

impl PanelView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_state(&self) -> &str {
        &self.current_state
    }

    pub fn diagram_source(&self) -> &str {
        &self.diagram_source
    }
}

impl View for PanelView {
    fn set_current_state(&mut self, state: &str) {
        self.current_state = state.to_string();
    }

    fn set_diagram_source(&mut self, src: &str) {
        self.diagram_source = src.to_string();
    }

    fn clear_events(&mut self) {
        self.entries.clear();
    }

    fn append_event(&mut self, entry: EventEntry) {
        self.entries.push(entry);
    }

    fn entries(&self) -> &[EventEntry] {
        &self.entries
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📍 Current state: {}", self.current_state)?;
        writeln!(f, "🖼️  Diagram: {}", self.diagram_source)?;
        if self.entries.is_empty() {
            write!(f, "⛔ No valid events")
        } else {
            write!(f, "🔀 Valid events:")?;
            for (i, entry) in self.entries.iter().enumerate() {
                write!(f, "\n   {}. {}", i + 1, entry.label)?;
            }
            Ok(())
        }
    }
}
