use statig::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickEvent {
    /// The user selected an entry whose stored target is `target`
    Click { target: String },
    /// The chain started by the last accepted click finished, successfully or not
    Settled,
}

/// Idle / Transitioning guard around the trigger-refresh-render chain.
///
/// Clicks that arrive while a chain is in flight are counted and dropped.
#[derive(Debug, Default)]
pub struct ClickHandler {
    in_flight: Option<String>,
    accepted: u64,
    ignored: u64,
}

impl ClickHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> Option<&str> {
        self.in_flight.as_deref()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn ignored(&self) -> u64 {
        self.ignored
    }
}

#[state_machine(initial = "State::idle()")]
impl ClickHandler {
    #[state]
    fn idle(&mut self, event: &ClickEvent) -> Outcome<State> {
        match event {
            ClickEvent::Click { target } => {
                self.in_flight = Some(target.clone());
                self.accepted += 1;
                tracing::debug!(event_url = %target, "Click accepted, transitioning");
                Transition(State::transitioning())
            }
            ClickEvent::Settled => Handled,
        }
    }

    #[state]
    fn transitioning(&mut self, event: &ClickEvent) -> Outcome<State> {
        match event {
            ClickEvent::Click { target } => {
                self.ignored += 1;
                tracing::info!(
                    event_url = %target,
                    in_flight = ?self.in_flight,
                    "Click ignored while a transition is in flight"
                );
                Handled
            }
            ClickEvent::Settled => {
                self.in_flight = None;
                Transition(State::idle())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(target: &str) -> ClickEvent {
        ClickEvent::Click {
            target: target.to_string(),
        }
    }

    #[test]
    fn test_click_then_settle_returns_to_idle() {
        let mut sm = ClickHandler::new().state_machine();
        assert!(sm.inner().is_idle());

        sm.handle(&click("/wf/1/approve"));
        assert!(!sm.inner().is_idle());
        assert_eq!(sm.inner().in_flight(), Some("/wf/1/approve"));

        sm.handle(&ClickEvent::Settled);
        assert!(sm.inner().is_idle());
        assert_eq!(sm.inner().accepted(), 1);
    }

    #[test]
    fn test_second_click_while_transitioning_is_ignored() {
        let mut sm = ClickHandler::new().state_machine();

        sm.handle(&click("/wf/1/approve"));
        sm.handle(&click("/wf/1/reject"));

        assert_eq!(sm.inner().in_flight(), Some("/wf/1/approve"));
        assert_eq!(sm.inner().accepted(), 1);
        assert_eq!(sm.inner().ignored(), 1);

        sm.handle(&ClickEvent::Settled);
        sm.handle(&click("/wf/1/reject"));
        assert_eq!(sm.inner().in_flight(), Some("/wf/1/reject"));
        assert_eq!(sm.inner().accepted(), 2);
    }

    #[test]
    fn test_settle_while_idle_is_harmless() {
        let mut sm = ClickHandler::new().state_machine();
        sm.handle(&ClickEvent::Settled);
        assert!(sm.inner().is_idle());
        assert_eq!(sm.inner().accepted(), 0);
    }
}
