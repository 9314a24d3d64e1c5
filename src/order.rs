//! Order representation and lifecycle

use std::fmt;
use std::marker::PhantomData;

use crate::fsm::{Fsm, GuardFailed, TransitionTable};
use crate::{
    Account, Balance, Event, Exchange, LimitBuy, Market, OrderId, OrderType, Price, Side, State,
    Strategy, TimeInForce, TransitionError, Volume,
};

/// A transition function of an order: applies its effect to the ticket and
/// the ticket's account, and names the next state.
pub type Transition = for<'a, 'b> fn(&'b mut Ticket<'a>, &Event) -> Result<State, GuardFailed>;

/// Transition table of an order configuration.
pub type Transitions = TransitionTable<State, Event, Transition>;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// An order configuration (type and side) with its own transition rules.
///
/// Sealed: transition functions and reservations write to [`Ticket`] and
/// [`Account`] through crate-private methods, so only this crate can
/// implement a kind.
///
/// ```compile_fail
/// use orderfsm::{LimitBuy, OrderKind, OrderType, Side, Ticket, Transitions};
///
/// struct LimitSell;
///
/// impl OrderKind for LimitSell {
///     const ORDER_TYPE: OrderType = OrderType::Limit;
///     const SIDE: Side = Side::Sell;
///
///     fn transitions() -> &'static Transitions {
///         LimitBuy::transitions()
///     }
///
///     fn reserve(_: &Ticket<'_>) {}
/// }
/// ```
pub trait OrderKind: sealed::Sealed {
    const ORDER_TYPE: OrderType;
    const SIDE: Side;

    /// The configuration's transition table. Built once, shared by all orders.
    fn transitions() -> &'static Transitions;

    /// Effect applied to the account when an order is created.
    fn reserve(ticket: &Ticket<'_>);
}

/// Terms an order is created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewOrder {
    pub exchange: Exchange,
    pub market: Market,
    pub strategy: Strategy,
    #[cfg_attr(feature = "serde", serde(rename = "id"))]
    pub order_id: OrderId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_in_force: TimeInForce,
    pub price: Price,
    pub volume: Volume,
}

/// The data of an order, as seen by its transition functions.
///
/// Identity and time-in-force are fixed at creation; price and remaining
/// volume change through fills and modifications.
#[derive(Debug)]
pub struct Ticket<'a> {
    pub(crate) exchange: Exchange,
    pub(crate) market: Market,
    pub(crate) strategy: Strategy,
    pub(crate) order_id: OrderId,
    pub(crate) time_in_force: TimeInForce,
    pub(crate) price: Price,
    pub(crate) volume: Volume,
    pub(crate) account: &'a Account,
}

impl<'a> Ticket<'a> {
    fn new(terms: NewOrder, account: &'a Account) -> Self {
        Self {
            exchange: terms.exchange,
            market: terms.market,
            strategy: terms.strategy,
            order_id: terms.order_id,
            time_in_force: terms.time_in_force,
            price: terms.price,
            volume: terms.volume,
            account,
        }
    }

    /// Quote amount tied up by the remaining volume at the current price.
    #[inline]
    pub fn notional(&self) -> Balance {
        self.price.notional(self.volume)
    }

    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Remaining (unfilled) volume.
    #[inline]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[inline]
    pub fn time_in_force(&self) -> TimeInForce {
        self.time_in_force
    }

    /// The account this order trades against.
    #[inline]
    pub fn account(&self) -> &'a Account {
        self.account
    }
}

/// An order driven by exchange events.
///
/// The order borrows its [`Account`]: the account must outlive the order,
/// and any number of orders may share one account. Creating the order
/// applies [`OrderKind::reserve`] (a LIMIT BUY debits `price * volume` from
/// the quote balance); after that, only [`Order::process`] changes the
/// order or the account.
///
/// ```
/// use orderfsm::{Account, Event, Exchange, Market, NewOrder, Order, OrderId, Price, State,
///                Strategy, TimeInForce};
///
/// let account = Account::new(0, 100);
/// let mut order = Order::limit_buy(
///     NewOrder {
///         exchange: Exchange::Deribit,
///         market: Market::BtcUsd,
///         strategy: Strategy::RebateEater,
///         order_id: OrderId(1),
///         time_in_force: TimeInForce::GTD,
///         price: Price(1),
///         volume: 10,
///     },
///     &account,
/// );
/// assert_eq!(account.quote(), 90);
///
/// order.process(Event::PlaceOrderReqAck).unwrap();
/// order.process(Event::OrderPlacedInOrderBook).unwrap();
/// assert_eq!(order.state(), State::Placed);
///
/// // Not a legal move from Placed: nothing changes.
/// assert!(order.process(Event::Rejected).is_err());
/// assert_eq!(order.state(), State::Placed);
/// ```
pub struct Order<'a, K: OrderKind = LimitBuy> {
    machine: Fsm<State>,
    ticket: Ticket<'a>,
    kind: PhantomData<K>,
}

/// A LIMIT BUY order.
pub type LimitBuyOrder<'a> = Order<'a, LimitBuy>;

impl<'a> Order<'a, LimitBuy> {
    /// Create a LIMIT BUY order in state [`State::Sent`].
    pub fn limit_buy(terms: NewOrder, account: &'a Account) -> Self {
        Self::new(terms, account)
    }
}

impl<'a, K: OrderKind> Order<'a, K> {
    /// Create an order in state [`State::Sent`] and reserve its funds.
    pub fn new(terms: NewOrder, account: &'a Account) -> Self {
        let ticket = Ticket::new(terms, account);
        K::reserve(&ticket);
        log::debug!(
            "{} {} {} created: {} @ {}, {}",
            ticket.order_id,
            K::ORDER_TYPE,
            K::SIDE,
            ticket.volume,
            ticket.price,
            account
        );
        Self {
            machine: Fsm::new(State::Sent),
            ticket,
            kind: PhantomData,
        }
    }

    /// Apply one event.
    ///
    /// Returns the new state, or [`TransitionError`] if the event is not a
    /// legal move from the current state (including any event against a
    /// terminal state) or the move's time-in-force guard is not set. On
    /// error the order and its account are exactly as before the call.
    pub fn process(&mut self, event: Event) -> Result<State, TransitionError> {
        let ticket = &mut self.ticket;
        let result = self
            .machine
            .process(K::transitions(), &event, |transition, event| {
                transition(ticket, event)
            });
        if let Err(err) = &result {
            log::warn!("{}: {}", self.ticket.order_id, err);
        }
        result
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> State {
        *self.machine.state()
    }

    /// Returns true if no further event can be applied.
    pub fn is_terminal(&self) -> bool {
        K::transitions().is_terminal(self.state())
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.ticket.order_id
    }

    #[inline]
    pub fn exchange(&self) -> Exchange {
        self.ticket.exchange
    }

    #[inline]
    pub fn market(&self) -> Market {
        self.ticket.market
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.ticket.strategy
    }

    #[inline]
    pub fn order_type(&self) -> OrderType {
        K::ORDER_TYPE
    }

    #[inline]
    pub fn side(&self) -> Side {
        K::SIDE
    }

    #[inline]
    pub fn time_in_force(&self) -> TimeInForce {
        self.ticket.time_in_force
    }

    /// Current limit price.
    #[inline]
    pub fn price(&self) -> Price {
        self.ticket.price
    }

    /// Remaining (unfilled) volume.
    #[inline]
    pub fn volume(&self) -> Volume {
        self.ticket.volume
    }

    /// Quote amount tied up by the remaining volume.
    #[inline]
    pub fn notional(&self) -> Balance {
        self.ticket.notional()
    }

    /// The account this order trades against.
    #[inline]
    pub fn account(&self) -> &'a Account {
        self.ticket.account
    }

    /// Read-only view of the order data.
    #[inline]
    pub fn ticket(&self) -> &Ticket<'a> {
        &self.ticket
    }
}

impl<K: OrderKind> fmt::Debug for Order<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Order")
            .field("order_type", &K::ORDER_TYPE)
            .field("side", &K::SIDE)
            .field("state", &self.state())
            .field("ticket", &self.ticket)
            .finish()
    }
}

impl<K: OrderKind> fmt::Display for Order<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} @ {} on {} [{}] {}",
            self.id(),
            K::ORDER_TYPE,
            K::SIDE,
            self.market(),
            self.volume(),
            self.price(),
            self.exchange(),
            self.time_in_force(),
            self.state()
        )
    }
}
