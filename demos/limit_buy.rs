//! LIMIT BUY walkthrough: reserve, acknowledge, fill, and a refused event.
//!
//! Run with: cargo run --example limit_buy

use orderfsm::{
    Account, Event, Exchange, Market, NewOrder, Order, OrderId, Price, Strategy, TimeInForce,
};

fn main() {
    let account = Account::new(0, 100);
    println!("=== Account ===\n");
    println!("Start:          {account}");

    let mut order = Order::limit_buy(
        NewOrder {
            exchange: Exchange::Deribit,
            market: Market::BtcUsd,
            strategy: Strategy::RebateEater,
            order_id: OrderId(1),
            time_in_force: TimeInForce::IOC.with(TimeInForce::GTD),
            price: Price(1),
            volume: 10,
        },
        &account,
    );
    println!("After reserve:  {account}");

    println!("\n=== Lifecycle ===\n");
    println!("{order}");

    let events = [
        Event::PlaceOrderReqAck,
        Event::OrderPlacedInOrderBook,
        Event::partially_filled(4),
        Event::partially_filled(6),
        // The execution report shows nothing left: Filled with volume 0
        Event::filled(0),
        // Filled is terminal, so this one is refused
        Event::filled(0),
    ];

    for event in events {
        let text = event.to_string();
        match order.process(event) {
            Ok(state) => println!("  {text:<12} -> {state:<16} {account}"),
            Err(err) => println!("  {text:<12} !! {err}"),
        }
    }

    println!("\n=== Summary ===\n");
    println!("{order}");
    println!("Final:          {account}");
}
