//! Identifiers for where an order lives and who owns it.

use std::fmt;

/// Exchange the order was sent to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Exchange {
    Cme,
    Binance,
    Deribit,
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exchange::Cme => write!(f, "CME"),
            Exchange::Binance => write!(f, "Binance"),
            Exchange::Deribit => write!(f, "Deribit"),
        }
    }
}

/// Traded instrument. The first asset is the base, the second the quote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Market {
    BtcUsd,
}

impl Market {
    /// Ticker of the base asset.
    pub fn base(self) -> &'static str {
        match self {
            Market::BtcUsd => "BTC",
        }
    }

    /// Ticker of the quote asset.
    pub fn quote(self) -> &'static str {
        match self {
            Market::BtcUsd => "USD",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base(), self.quote())
    }
}

/// Strategy that owns the order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    IcebergPicker,
    FlashOrderEater,
    MomentIgnitionMaster,
    RebateEater,
    LiquidityEvaporator,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
