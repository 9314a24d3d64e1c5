//! Time-in-force: flags that gate the late-lifecycle transitions

use std::fmt;

/// Time-in-force attached to an order at creation.
///
/// The four flags are independent. They are read by guarded transitions:
///
/// | Flag | Gates |
/// |------|-------|
/// | immediate-or-kill | `Placed --Cancelled--> Cancelled` |
/// | immediate-or-cancel | `FilledPartially --Cancelled--> Cancelled` |
/// | good-till-date | every `--Expired--> Expired` |
/// | good-till-cancel | nothing yet |
///
/// The record is immutable: there are no setters, and an order stores its
/// own copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TimeInForce {
    immediate_or_cancel: bool,
    immediate_or_kill: bool,
    good_till_cancel: bool,
    good_till_date: bool,
}

impl TimeInForce {
    /// No flags set.
    pub const NONE: TimeInForce = TimeInForce::new(false, false, false, false);
    /// Immediate-or-cancel only.
    pub const IOC: TimeInForce = TimeInForce::new(true, false, false, false);
    /// Immediate-or-kill only.
    pub const IOK: TimeInForce = TimeInForce::new(false, true, false, false);
    /// Good-till-cancel only.
    pub const GTC: TimeInForce = TimeInForce::new(false, false, true, false);
    /// Good-till-date only.
    pub const GTD: TimeInForce = TimeInForce::new(false, false, false, true);

    /// Build a record from the four flags, in declaration order.
    pub const fn new(
        immediate_or_cancel: bool,
        immediate_or_kill: bool,
        good_till_cancel: bool,
        good_till_date: bool,
    ) -> Self {
        Self {
            immediate_or_cancel,
            immediate_or_kill,
            good_till_cancel,
            good_till_date,
        }
    }

    /// Union of the flags of `self` and `other`.
    pub const fn with(self, other: TimeInForce) -> Self {
        Self {
            immediate_or_cancel: self.immediate_or_cancel || other.immediate_or_cancel,
            immediate_or_kill: self.immediate_or_kill || other.immediate_or_kill,
            good_till_cancel: self.good_till_cancel || other.good_till_cancel,
            good_till_date: self.good_till_date || other.good_till_date,
        }
    }

    #[inline]
    pub fn immediate_or_cancel(self) -> bool {
        self.immediate_or_cancel
    }

    #[inline]
    pub fn immediate_or_kill(self) -> bool {
        self.immediate_or_kill
    }

    #[inline]
    pub fn good_till_cancel(self) -> bool {
        self.good_till_cancel
    }

    #[inline]
    pub fn good_till_date(self) -> bool {
        self.good_till_date
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.immediate_or_cancel, "IOC"),
            (self.immediate_or_kill, "IOK"),
            (self.good_till_cancel, "GTC"),
            (self.good_till_date, "GTD"),
        ];
        let mut first = true;
        for (set, name) in flags {
            if set {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("-")?;
        }
        Ok(())
    }
}
