//! Order lifecycle states

use std::fmt;

use crate::fsm::{Tag, Tagged};

/// Where an order is in its lifecycle.
///
/// `Sent` is the only initial state. `Cancelled`, `Filled`, `Expired` and
/// `Rejected` are terminal. Which events are legal next depends on the
/// state alone; see the order's transition table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    /// Order has been sent.
    #[default]
    Sent,
    /// Received by the exchange, queued for the matching engine.
    Pending,
    /// Resting in the order book.
    Placed,
    /// Cancellation request received by the exchange, not yet processed.
    PendingCancel,
    /// Pulled from the order book.
    Cancelled,
    /// Modification request received by the exchange, not yet processed.
    PendingModification,
    /// Whole order matched; nothing left in the book.
    Filled,
    /// Part of the order matched; the rest is still in the book.
    FilledPartially,
    /// Removed from the book because its lifetime ran out.
    Expired,
    /// Refused by the exchange.
    Rejected,
}

impl State {
    /// Every state, initial first.
    pub const ALL: [State; 10] = [
        State::Sent,
        State::Pending,
        State::Placed,
        State::PendingCancel,
        State::Cancelled,
        State::PendingModification,
        State::Filled,
        State::FilledPartially,
        State::Expired,
        State::Rejected,
    ];

    /// Returns true if no further transition is defined out of this state.
    #[inline]
    pub fn is_terminal(self) -> bool {
        match self {
            State::Cancelled | State::Filled | State::Expired | State::Rejected => true,
            State::Sent
            | State::Pending
            | State::Placed
            | State::PendingCancel
            | State::PendingModification
            | State::FilledPartially => false,
        }
    }
}

impl Tag for State {
    fn name(self) -> &'static str {
        match self {
            State::Sent => "Sent",
            State::Pending => "Pending",
            State::Placed => "Placed",
            State::PendingCancel => "PendingCancel",
            State::Cancelled => "Cancelled",
            State::PendingModification => "PendingModification",
            State::Filled => "Filled",
            State::FilledPartially => "FilledPartially",
            State::Expired => "Expired",
            State::Rejected => "Rejected",
        }
    }
}

// States carry no data, so a state is its own tag.
impl Tagged for State {
    type Tag = State;

    #[inline]
    fn tag(&self) -> State {
        *self
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
