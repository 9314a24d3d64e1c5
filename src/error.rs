//! Errors returned when an event cannot be applied.

/// An event was refused: either no transition is defined for the
/// current state and event, or the defined transition's guard failed.
///
/// The machine that returned this error is exactly as it was before the
/// call. Retrying the same event against the same state fails the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("transition not allowed: {event} in state {state}{}", guard_suffix(.guard))]
pub struct TransitionError {
    /// Name of the state the machine was in.
    pub state: &'static str,
    /// Name of the refused event.
    pub event: &'static str,
    /// Guard that rejected the move, if a transition was defined at all.
    pub guard: Option<&'static str>,
}

impl TransitionError {
    /// No transition is defined for this state and event.
    pub fn no_route(state: &'static str, event: &'static str) -> Self {
        Self {
            state,
            event,
            guard: None,
        }
    }

    /// A transition is defined but its guard rejected the move.
    pub fn guarded(state: &'static str, event: &'static str, guard: &'static str) -> Self {
        Self {
            state,
            event,
            guard: Some(guard),
        }
    }

    /// Returns true if a transition was defined but refused by its guard.
    #[inline]
    pub fn is_guard_failure(&self) -> bool {
        self.guard.is_some()
    }
}

fn guard_suffix(guard: &Option<&'static str>) -> String {
    guard.map(|g| format!(" (requires {g})")).unwrap_or_default()
}
