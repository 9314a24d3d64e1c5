//! TOML session loading and validation.
//!
//! ```toml
//! events = ["ack", "placed", "partial 10", "filled 0"]
//!
//! [account]
//! base = 0
//! quote = 100
//!
//! [order]
//! exchange = "deribit"
//! market = "btcusd"
//! strategy = "rebate_eater"
//! id = 1
//! price = 1
//! volume = 10
//!
//! [order.time_in_force]
//! immediate_or_cancel = true
//! good_till_date = true
//! ```

use std::path::Path;

use serde::Deserialize;

use orderfsm::{Balances, Event, Exchange, Market, NewOrder, OrderId, Price, Strategy, TimeInForce};

use crate::error::{Error, Result};

/// Top-level session configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Scripted events, one text-form event per entry.
    #[serde(default)]
    pub events: Vec<String>,
    /// Starting balances of the account.
    pub account: Balances,
    /// Terms of the LIMIT BUY order.
    pub order: NewOrder,
}

impl SessionConfig {
    /// Load a session from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        contents.parse()
    }

    /// Session used when no file is given: 10 @ 1 against 100 of quote,
    /// filled in one partial fill and closed with `filled 0`.
    pub fn demo() -> Self {
        Self {
            events: ["ack", "placed", "partial 10", "filled 0"]
                .into_iter()
                .map(String::from)
                .collect(),
            account: Balances::new(0, 100),
            order: NewOrder {
                exchange: Exchange::Deribit,
                market: Market::BtcUsd,
                strategy: Strategy::RebateEater,
                order_id: OrderId(1),
                time_in_force: TimeInForce::IOC.with(TimeInForce::GTD),
                price: Price(1),
                volume: 10,
            },
        }
    }

    /// The scripted events, parsed.
    pub fn script(&self) -> Result<Vec<Event>> {
        self.events
            .iter()
            .enumerate()
            .map(|(i, line)| {
                line.parse().map_err(|source| Error::Script {
                    line: i + 1,
                    source,
                })
            })
            .collect()
    }

    /// Validate session invariants.
    fn validate(&self) -> Result<()> {
        if self.order.price.0 <= 0 {
            return Err(Error::Config("order price must be > 0".into()));
        }
        if self.order.volume <= 0 {
            return Err(Error::Config("order volume must be > 0".into()));
        }
        if self.order.price.0.checked_mul(self.order.volume).is_none() {
            return Err(Error::Config(format!(
                "order notional {} * {} overflows",
                self.order.price, self.order.volume
            )));
        }
        self.script()?;
        Ok(())
    }
}

impl std::str::FromStr for SessionConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: SessionConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
