//! Transition rules of a LIMIT BUY order.
//!
//! Creating the order reserves `price * volume` of quote currency. From
//! then on each transition keeps the account consistent with what is left
//! resting in the book:
//!
//! | From | Event | To | Effect |
//! |------|-------|----|--------|
//! | Sent | Rejected | Rejected | refund `price * volume` |
//! | Sent | PlaceOrderReqAck | Pending | |
//! | Pending, Placed, FilledPartially | PendingCancellationAck | PendingCancel | |
//! | Pending | OrderPlacedInOrderBook | Placed | |
//! | PendingModification | ModifiedPlaced | Placed | re-reserve at new terms |
//! | Placed, FilledPartially | PartiallyFilled | FilledPartially | volume -= v, base += v |
//! | PendingModification | ModifiedPartiallyFilled | FilledPartially | re-reserve at new terms |
//! | Placed, FilledPartially | Filled | Filled | volume = 0, base += v |
//! | PendingCancel | Cancelled | Cancelled | refund `price * volume` |
//! | Placed | Cancelled | Cancelled | immediate-or-kill only; refund |
//! | FilledPartially | Cancelled | Cancelled | immediate-or-cancel only; refund |
//! | Placed, FilledPartially | PendingModificationAck | PendingModification | |
//! | Pending, Placed, PendingCancel, FilledPartially, PendingModification | Expired | Expired | good-till-date only; refund |
//!
//! Every other pair is refused. `Filled` always means "nothing remains";
//! its volume is whatever the final report filled, often 0.

use std::sync::OnceLock;

use crate::fsm::GuardFailed;
use crate::order::{OrderKind, Ticket, Transitions, sealed};
use crate::{Event, EventKind, OrderType, Price, Side, State, Volume};

const IMMEDIATE_OR_KILL: GuardFailed = GuardFailed("immediate-or-kill");
const IMMEDIATE_OR_CANCEL: GuardFailed = GuardFailed("immediate-or-cancel");
const GOOD_TILL_DATE: GuardFailed = GuardFailed("good-till-date");

/// LIMIT BUY configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LimitBuy;

impl sealed::Sealed for LimitBuy {}

impl OrderKind for LimitBuy {
    const ORDER_TYPE: OrderType = OrderType::Limit;
    const SIDE: Side = Side::Buy;

    fn transitions() -> &'static Transitions {
        static TABLE: OnceLock<Transitions> = OnceLock::new();
        TABLE.get_or_init(table)
    }

    fn reserve(ticket: &Ticket<'_>) {
        ticket.account.debit_quote(ticket.notional());
    }
}

fn table() -> Transitions {
    use EventKind as E;
    use State as S;

    Transitions::new()
        .on(S::Sent, E::Rejected, reject)
        .on(S::Sent, E::PlaceOrderReqAck, acknowledge)
        .on_each(
            &[S::Pending, S::Placed, S::FilledPartially],
            E::PendingCancellationAck,
            request_cancel,
        )
        .on(S::Pending, E::OrderPlacedInOrderBook, place)
        .on(S::PendingModification, E::ModifiedPlaced, modify_placed)
        .on_each(
            &[S::Placed, S::FilledPartially],
            E::PartiallyFilled,
            fill_partially,
        )
        .on(
            S::PendingModification,
            E::ModifiedPartiallyFilled,
            modify_partially_filled,
        )
        .on_each(&[S::Placed, S::FilledPartially], E::Filled, fill)
        .on(S::PendingCancel, E::Cancelled, cancel)
        .on(S::Placed, E::Cancelled, cancel_resting)
        .on(S::FilledPartially, E::Cancelled, cancel_partially_filled)
        .on_each(
            &[S::Placed, S::FilledPartially],
            E::PendingModificationAck,
            request_modification,
        )
        .on_each(
            &[
                S::PendingCancel,
                S::Placed,
                S::FilledPartially,
                S::Pending,
                S::PendingModification,
            ],
            E::Expired,
            expire,
        )
}

fn reject(ticket: &mut Ticket<'_>, _: &Event) -> Result<State, GuardFailed> {
    refund(ticket);
    Ok(State::Rejected)
}

fn acknowledge(_: &mut Ticket<'_>, _: &Event) -> Result<State, GuardFailed> {
    Ok(State::Pending)
}

fn request_cancel(_: &mut Ticket<'_>, _: &Event) -> Result<State, GuardFailed> {
    Ok(State::PendingCancel)
}

fn place(_: &mut Ticket<'_>, _: &Event) -> Result<State, GuardFailed> {
    Ok(State::Placed)
}

fn request_modification(_: &mut Ticket<'_>, _: &Event) -> Result<State, GuardFailed> {
    Ok(State::PendingModification)
}

fn modify_placed(ticket: &mut Ticket<'_>, event: &Event) -> Result<State, GuardFailed> {
    apply_modification(ticket, event);
    Ok(State::Placed)
}

fn modify_partially_filled(ticket: &mut Ticket<'_>, event: &Event) -> Result<State, GuardFailed> {
    apply_modification(ticket, event);
    Ok(State::FilledPartially)
}

fn fill_partially(ticket: &mut Ticket<'_>, event: &Event) -> Result<State, GuardFailed> {
    let volume = filled_volume(event);
    ticket.volume = ticket.volume.saturating_sub(volume);
    ticket.account.credit_base(volume);
    Ok(State::FilledPartially)
}

fn fill(ticket: &mut Ticket<'_>, event: &Event) -> Result<State, GuardFailed> {
    let volume = filled_volume(event);
    ticket.volume = 0;
    ticket.account.credit_base(volume);
    Ok(State::Filled)
}

fn cancel(ticket: &mut Ticket<'_>, _: &Event) -> Result<State, GuardFailed> {
    refund(ticket);
    Ok(State::Cancelled)
}

fn cancel_resting(ticket: &mut Ticket<'_>, _: &Event) -> Result<State, GuardFailed> {
    if !ticket.time_in_force.immediate_or_kill() {
        return Err(IMMEDIATE_OR_KILL);
    }
    refund(ticket);
    Ok(State::Cancelled)
}

fn cancel_partially_filled(ticket: &mut Ticket<'_>, _: &Event) -> Result<State, GuardFailed> {
    if !ticket.time_in_force.immediate_or_cancel() {
        return Err(IMMEDIATE_OR_CANCEL);
    }
    refund(ticket);
    Ok(State::Cancelled)
}

fn expire(ticket: &mut Ticket<'_>, _: &Event) -> Result<State, GuardFailed> {
    if !ticket.time_in_force.good_till_date() {
        return Err(GOOD_TILL_DATE);
    }
    refund(ticket);
    Ok(State::Expired)
}

/// Release the quote reserved for the remaining volume.
fn refund(ticket: &Ticket<'_>) {
    ticket.account.credit_quote(ticket.notional());
}

/// Swap the reservation at the old terms for one at the new terms.
fn apply_modification(ticket: &mut Ticket<'_>, event: &Event) {
    let (price_new, volume_new) = modification(event);
    let delta = ticket.notional().saturating_sub(price_new.notional(volume_new));
    ticket.account.credit_quote(delta);
    ticket.price = price_new;
    ticket.volume = volume_new;
}

fn filled_volume(event: &Event) -> Volume {
    match *event {
        Event::PartiallyFilled { volume } | Event::Filled { volume } => volume,
        _ => unreachable!("fill transition routed on {}", event.kind().command()),
    }
}

fn modification(event: &Event) -> (Price, Volume) {
    match *event {
        Event::ModifiedPlaced {
            price_new,
            volume_new,
        }
        | Event::ModifiedPartiallyFilled {
            price_new,
            volume_new,
        } => (price_new, volume_new),
        _ => unreachable!("modification routed on {}", event.kind().command()),
    }
}
