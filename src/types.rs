//! Core types: Price, Volume, Balance, OrderId

use std::fmt;

/// Price in smallest units of the quote asset.
///
/// Fixed-point integer so that `price * volume` is exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Quote amount needed to buy `volume` units at this price.
    ///
    /// Saturates at `i64::MIN`/`i64::MAX` instead of overflowing.
    #[inline]
    pub fn notional(self, volume: Volume) -> Balance {
        self.0.saturating_mul(volume)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order volume in smallest units of the base asset.
///
/// Signed: the ledger performs no bounds checking, so a fill larger than
/// the remaining volume leaves a negative remainder instead of wrapping.
pub type Volume = i64;

/// Account balance in smallest units of an asset. May go negative.
pub type Balance = i64;

/// Client-assigned order identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O{}", self.0)
    }
}
