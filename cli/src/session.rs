//! A single LIMIT BUY order driven by text-form events.

use std::fmt;

use orderfsm::{Account, Event, LimitBuyOrder, NewOrder, Order, ParseEventError, State, TransitionError};

/// What happened to one event fed to a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The event was accepted and the order moved to `state`.
    Moved { event: Event, state: State },
    /// The event was refused; order and account are unchanged.
    Refused {
        event: Event,
        error: TransitionError,
    },
}

impl Outcome {
    pub fn is_refused(&self) -> bool {
        matches!(self, Outcome::Refused { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Moved { event, state } => {
                let text = event.to_string();
                write!(f, "{text:<20} -> {state}")
            }
            Outcome::Refused { event, error } => {
                let text = event.to_string();
                write!(f, "{text:<20} !! {error}")
            }
        }
    }
}

/// One order against one account, with a count of refused events.
pub struct Session<'a> {
    order: LimitBuyOrder<'a>,
    refused: usize,
}

impl<'a> Session<'a> {
    /// Open a session; this reserves the order's notional on `account`.
    pub fn open(terms: NewOrder, account: &'a Account) -> Self {
        Self {
            order: Order::limit_buy(terms, account),
            refused: 0,
        }
    }

    /// Feed one event to the order.
    pub fn apply(&mut self, event: Event) -> Outcome {
        match self.order.process(event) {
            Ok(state) => Outcome::Moved { event, state },
            Err(error) => {
                self.refused += 1;
                Outcome::Refused { event, error }
            }
        }
    }

    /// Parse a text-form event and feed it to the order.
    pub fn apply_line(&mut self, line: &str) -> Result<Outcome, ParseEventError> {
        let event = line.parse()?;
        Ok(self.apply(event))
    }

    /// Feed events in order, stopping at none of them.
    pub fn run(&mut self, events: &[Event]) -> Vec<Outcome> {
        events.iter().map(|&event| self.apply(event)).collect()
    }

    /// Number of events refused so far.
    pub fn refused(&self) -> usize {
        self.refused
    }

    pub fn order(&self) -> &LimitBuyOrder<'a> {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderfsm::{Exchange, Market, OrderId, Price, Strategy, TimeInForce};

    fn terms() -> NewOrder {
        NewOrder {
            exchange: Exchange::Deribit,
            market: Market::BtcUsd,
            strategy: Strategy::MomentIgnitionMaster,
            order_id: OrderId(3),
            time_in_force: TimeInForce::NONE,
            price: Price(2),
            volume: 5,
        }
    }

    #[test]
    fn open_reserves_notional() {
        let account = Account::new(0, 100);
        let session = Session::open(terms(), &account);
        assert_eq!(account.quote(), 90);
        assert_eq!(session.order().state(), State::Sent);
        assert_eq!(session.refused(), 0);
    }

    #[test]
    fn apply_counts_refusals() {
        let account = Account::new(0, 100);
        let mut session = Session::open(terms(), &account);

        let outcome = session.apply(Event::OrderPlacedInOrderBook);
        assert!(outcome.is_refused());
        assert_eq!(session.refused(), 1);

        let outcome = session.apply(Event::PlaceOrderReqAck);
        assert_eq!(
            outcome,
            Outcome::Moved {
                event: Event::PlaceOrderReqAck,
                state: State::Pending
            }
        );
        assert_eq!(session.refused(), 1);
    }

    #[test]
    fn apply_line_parses_then_applies() {
        let account = Account::new(0, 100);
        let mut session = Session::open(terms(), &account);

        assert!(session.apply_line("ack").is_ok());
        assert!(session.apply_line("partial").is_err());
        assert_eq!(session.order().state(), State::Pending);
        assert_eq!(session.refused(), 0);
    }

    #[test]
    fn run_keeps_going_after_refusal() {
        let account = Account::new(0, 100);
        let mut session = Session::open(terms(), &account);

        let outcomes = session.run(&[
            Event::PlaceOrderReqAck,
            Event::PlaceOrderReqAck,
            Event::OrderPlacedInOrderBook,
            Event::Cancelled,
        ]);
        let refused: Vec<bool> = outcomes.iter().map(Outcome::is_refused).collect();
        assert_eq!(refused, [false, true, false, true]);
        assert_eq!(session.refused(), 2);
        assert_eq!(session.order().state(), State::Placed);
    }

    #[test]
    fn oversized_modification_line_is_applied() {
        let account = Account::new(0, 100);
        let mut session = Session::open(terms(), &account);
        for line in ["ack", "placed", "modify-ack"] {
            assert!(!session.apply_line(line).unwrap().is_refused());
        }

        let outcome = session.apply_line("modified 9223372036854775807 2").unwrap();
        assert!(!outcome.is_refused(), "{outcome}");
        assert_eq!(session.order().notional(), i64::MAX);
        assert_eq!(account.quote(), 100 - i64::MAX);
    }

    #[test]
    fn outcome_display() {
        let account = Account::new(0, 100);
        let mut session = Session::open(terms(), &account);

        let moved = session.apply(Event::PlaceOrderReqAck).to_string();
        assert!(moved.starts_with("ack"), "{moved}");
        assert!(moved.ends_with("-> Pending"), "{moved}");

        let refused = session.apply(Event::Expired).to_string();
        assert!(refused.contains("!! transition not allowed"), "{refused}");
        assert!(refused.contains("good-till-date"), "{refused}");
    }
}
