//! Two-balance account shared by the orders trading against it.

use std::cell::Cell;
use std::fmt;

use crate::Balance;

/// Plain copy of an account's balances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Balances {
    /// Available base asset (what a buy order receives).
    pub base: Balance,
    /// Available quote asset (what a buy order pays with).
    pub quote: Balance,
}

impl Balances {
    pub fn new(base: Balance, quote: Balance) -> Self {
        Self { base, quote }
    }
}

impl fmt::Display for Balances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "base={} quote={}", self.base, self.quote)
    }
}

/// Available balances of one trading account.
///
/// Orders hold `&Account`, so any number of orders on one thread can share
/// an account while the caller keeps ownership. Balances live in [`Cell`]s:
/// only transition effects of this crate change them, and the account is
/// `!Sync`, so sharing one across threads needs an external wrapper.
///
/// There is no bounds checking; a balance may go negative.
#[derive(Debug, Default)]
pub struct Account {
    base: Cell<Balance>,
    quote: Cell<Balance>,
}

impl Account {
    pub fn new(base: Balance, quote: Balance) -> Self {
        Self {
            base: Cell::new(base),
            quote: Cell::new(quote),
        }
    }

    /// Available base asset.
    #[inline]
    pub fn base(&self) -> Balance {
        self.base.get()
    }

    /// Available quote asset.
    #[inline]
    pub fn quote(&self) -> Balance {
        self.quote.get()
    }

    /// Snapshot of both balances.
    pub fn balances(&self) -> Balances {
        Balances::new(self.base(), self.quote())
    }

    // Balances saturate at the i64 bounds.

    pub(crate) fn credit_base(&self, amount: Balance) {
        self.base.set(self.base.get().saturating_add(amount));
    }

    pub(crate) fn credit_quote(&self, amount: Balance) {
        self.quote.set(self.quote.get().saturating_add(amount));
    }

    pub(crate) fn debit_quote(&self, amount: Balance) {
        self.quote.set(self.quote.get().saturating_sub(amount));
    }
}

impl From<Balances> for Account {
    fn from(balances: Balances) -> Self {
        Self::new(balances.base, balances.quote)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.balances().fmt(f)
    }
}
