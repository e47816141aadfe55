//! Single-flight session coordination.

/// What the main thread should do after a hotkey trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Disable the hotkey and enqueue one capture request.
    StartSession,
    /// A session is already in flight; do nothing.
    Ignore,
}

/// Tracks whether a capture session is in flight.
///
/// The hotkey is unregistered for the whole lifetime of a session, so
/// re-entrant triggers are impossible at the OS level; this guard covers
/// the gap between a trigger arriving and the hotkey actually being
/// unregistered, and keeps the invariant checkable.
#[derive(Debug, Default)]
pub struct Coordinator {
    in_flight: bool,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_hotkey(&mut self) -> Action {
        if self.in_flight {
            Action::Ignore
        } else {
            self.in_flight = true;
            Action::StartSession
        }
    }

    /// The worker signalled completion; returns true when a session was
    /// actually open (the hotkey should be re-registered).
    pub fn on_session_done(&mut self) -> bool {
        std::mem::take(&mut self.in_flight)
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotkey_starts_a_session_when_idle() {
        let mut c = Coordinator::new();
        assert_eq!(c.on_hotkey(), Action::StartSession);
        assert!(c.in_flight());
    }

    #[test]
    fn triggers_during_a_session_are_suppressed() {
        let mut c = Coordinator::new();
        assert_eq!(c.on_hotkey(), Action::StartSession);
        assert_eq!(c.on_hotkey(), Action::Ignore);
        assert_eq!(c.on_hotkey(), Action::Ignore);
    }

    #[test]
    fn completion_re_arms_exactly_once() {
        let mut c = Coordinator::new();
        c.on_hotkey();
        assert!(c.on_session_done());
        assert!(!c.on_session_done());
        assert_eq!(c.on_hotkey(), Action::StartSession);
    }

    #[test]
    fn stray_completion_when_idle_is_harmless() {
        let mut c = Coordinator::new();
        assert!(!c.on_session_done());
        assert_eq!(c.on_hotkey(), Action::StartSession);
    }
}
