//! # orderfsm
//!
//! A deterministic finite-state machine for the lifecycle of exchange orders,
//! with the account bookkeeping each transition implies.
//!
//! ## Features
//!
//! - **Closed state and event sets**: [`State`] and [`Event`] are plain enums
//! - **Explicit transition table**: lookup keyed by (state, event kind); any
//!   pair not in the table is refused with a [`TransitionError`]
//! - **Guarded transitions**: time-in-force flags decide whether a late
//!   cancel or an expiry is legal
//! - **All-or-nothing**: a refused event leaves the order and its account
//!   exactly as they were
//! - **Shared accounts**: many orders borrow one [`Account`]
//!
//! ## Quick Start
//!
//! ```
//! use orderfsm::{Account, Event, Exchange, Market, NewOrder, Order, OrderId, Price, State,
//!                Strategy, TimeInForce};
//!
//! let account = Account::new(0, 100);
//! let mut order = Order::limit_buy(
//!     NewOrder {
//!         exchange: Exchange::Deribit,
//!         market: Market::BtcUsd,
//!         strategy: Strategy::RebateEater,
//!         order_id: OrderId(1),
//!         time_in_force: TimeInForce::NONE,
//!         price: Price(1),
//!         volume: 10,
//!     },
//!     &account,
//! );
//!
//! // Creating a LIMIT BUY reserves price * volume of quote currency
//! assert_eq!((account.base(), account.quote()), (0, 90));
//!
//! order.process(Event::PlaceOrderReqAck).unwrap();
//! order.process(Event::OrderPlacedInOrderBook).unwrap();
//! order.process(Event::partially_filled(10)).unwrap();
//! assert_eq!((account.base(), account.quote()), (10, 90));
//!
//! // The execution report says nothing is left: Filled with volume 0
//! assert_eq!(order.process(Event::filled(0)), Ok(State::Filled));
//!
//! // Filled is terminal
//! assert!(order.process(Event::filled(0)).is_err());
//! ```
//!
//! ## Time-in-Force Guards
//!
//! | From | Event | Requires |
//! |------|-------|----------|
//! | Placed | Cancelled | immediate-or-kill |
//! | FilledPartially | Cancelled | immediate-or-cancel |
//! | Pending, Placed, PendingCancel, FilledPartially, PendingModification | Expired | good-till-date |
//!
//! `Sent` has no Expired route at all, so an expiry there is refused
//! without a guard.
//!
//! ```
//! use orderfsm::{Account, Event, Exchange, Market, NewOrder, Order, OrderId, Price, State,
//!                Strategy, TimeInForce};
//!
//! let account = Account::new(0, 100);
//! let terms = NewOrder {
//!     exchange: Exchange::Binance,
//!     market: Market::BtcUsd,
//!     strategy: Strategy::IcebergPicker,
//!     order_id: OrderId(7),
//!     time_in_force: TimeInForce::GTC,
//!     price: Price(2),
//!     volume: 5,
//! };
//! let mut order = Order::limit_buy(terms, &account);
//! order.process(Event::PlaceOrderReqAck).unwrap();
//!
//! let err = order.process(Event::Expired).unwrap_err();
//! assert_eq!(err.guard, Some("good-till-date"));
//! assert_eq!(order.state(), State::Pending);
//! assert_eq!(account.quote(), 90);
//! ```
//!
//! ## Generic Engine
//!
//! [`fsm::Fsm`] and [`fsm::TransitionTable`] know nothing about orders; any
//! closed state set implementing [`fsm::Tagged`] can be driven by them.

mod account;
mod error;
mod event;
pub mod fsm;
mod limit_buy;
mod order;
mod side;
mod state;
mod tif;
mod types;
mod venue;

// Re-export public API
pub use account::{Account, Balances};
pub use error::TransitionError;
pub use event::{Event, EventKind, ParseEventError};
pub use limit_buy::LimitBuy;
pub use order::{LimitBuyOrder, NewOrder, Order, OrderKind, Ticket, Transition, Transitions};
pub use side::{OrderType, Side};
pub use state::State;
pub use tif::TimeInForce;
pub use types::{Balance, OrderId, Price, Volume};
pub use venue::{Exchange, Market, Strategy};
