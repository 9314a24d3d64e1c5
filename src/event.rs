//! Events fed to an order.
//!
//! Events are decoded from execution reports by whatever sits in front of
//! this crate. They are transient: an order never stores one.
//!
//! Each event also has a one-line text form, used by scripted sessions:
//!
//! | Text | Event |
//! |------|-------|
//! | `ack` | [`Event::PlaceOrderReqAck`] |
//! | `cancel-ack` | [`Event::PendingCancellationAck`] |
//! | `modify-ack` | [`Event::PendingModificationAck`] |
//! | `placed` | [`Event::OrderPlacedInOrderBook`] |
//! | `modified <price> <volume>` | [`Event::ModifiedPlaced`] |
//! | `modified-partial <price> <volume>` | [`Event::ModifiedPartiallyFilled`] |
//! | `partial <volume>` | [`Event::PartiallyFilled`] |
//! | `filled <volume>` | [`Event::Filled`] |
//! | `rejected`, `cancelled`, `expired` | the terminal events |

use std::fmt;
use std::str::FromStr;

use crate::fsm::{Tag, Tagged};
use crate::{Price, Volume};

/// A decoded exchange notification about one order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// The exchange received the order request.
    PlaceOrderReqAck,
    /// The exchange received a cancellation request.
    PendingCancellationAck,
    /// The exchange received a modification request.
    PendingModificationAck,
    /// The matching engine put the order in the book.
    OrderPlacedInOrderBook,
    /// Modification applied; the order rests at the new terms.
    ModifiedPlaced { price_new: Price, volume_new: Volume },
    /// Part of the order matched.
    PartiallyFilled { volume: Volume },
    /// Modification applied to a partially filled order.
    ModifiedPartiallyFilled { price_new: Price, volume_new: Volume },
    /// No volume remains. `volume` is what this last report filled,
    /// which is 0 when earlier partial fills already took everything.
    Filled { volume: Volume },
    /// The exchange refused the order.
    Rejected,
    /// The order was pulled from the book.
    Cancelled,
    /// The order's lifetime ran out.
    Expired,
}

impl Event {
    /// Create a PartiallyFilled event.
    pub fn partially_filled(volume: Volume) -> Self {
        Event::PartiallyFilled { volume }
    }

    /// Create a Filled event.
    pub fn filled(volume: Volume) -> Self {
        Event::Filled { volume }
    }

    /// Create a ModifiedPlaced event.
    pub fn modified_placed(price_new: Price, volume_new: Volume) -> Self {
        Event::ModifiedPlaced {
            price_new,
            volume_new,
        }
    }

    /// Create a ModifiedPartiallyFilled event.
    pub fn modified_partially_filled(price_new: Price, volume_new: Volume) -> Self {
        Event::ModifiedPartiallyFilled {
            price_new,
            volume_new,
        }
    }

    /// The kind of this event, without payload.
    #[inline]
    pub fn kind(&self) -> EventKind {
        match self {
            Event::PlaceOrderReqAck => EventKind::PlaceOrderReqAck,
            Event::PendingCancellationAck => EventKind::PendingCancellationAck,
            Event::PendingModificationAck => EventKind::PendingModificationAck,
            Event::OrderPlacedInOrderBook => EventKind::OrderPlacedInOrderBook,
            Event::ModifiedPlaced { .. } => EventKind::ModifiedPlaced,
            Event::PartiallyFilled { .. } => EventKind::PartiallyFilled,
            Event::ModifiedPartiallyFilled { .. } => EventKind::ModifiedPartiallyFilled,
            Event::Filled { .. } => EventKind::Filled,
            Event::Rejected => EventKind::Rejected,
            Event::Cancelled => EventKind::Cancelled,
            Event::Expired => EventKind::Expired,
        }
    }
}

/// Payload-free discriminant of an [`Event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    PlaceOrderReqAck,
    PendingCancellationAck,
    PendingModificationAck,
    OrderPlacedInOrderBook,
    ModifiedPlaced,
    PartiallyFilled,
    ModifiedPartiallyFilled,
    Filled,
    Rejected,
    Cancelled,
    Expired,
}

impl EventKind {
    /// Every event kind.
    pub const ALL: [EventKind; 11] = [
        EventKind::PlaceOrderReqAck,
        EventKind::PendingCancellationAck,
        EventKind::PendingModificationAck,
        EventKind::OrderPlacedInOrderBook,
        EventKind::ModifiedPlaced,
        EventKind::PartiallyFilled,
        EventKind::ModifiedPartiallyFilled,
        EventKind::Filled,
        EventKind::Rejected,
        EventKind::Cancelled,
        EventKind::Expired,
    ];

    /// Command word of the text form.
    pub fn command(self) -> &'static str {
        match self {
            EventKind::PlaceOrderReqAck => "ack",
            EventKind::PendingCancellationAck => "cancel-ack",
            EventKind::PendingModificationAck => "modify-ack",
            EventKind::OrderPlacedInOrderBook => "placed",
            EventKind::ModifiedPlaced => "modified",
            EventKind::PartiallyFilled => "partial",
            EventKind::ModifiedPartiallyFilled => "modified-partial",
            EventKind::Filled => "filled",
            EventKind::Rejected => "rejected",
            EventKind::Cancelled => "cancelled",
            EventKind::Expired => "expired",
        }
    }
}

impl Tag for EventKind {
    fn name(self) -> &'static str {
        match self {
            EventKind::PlaceOrderReqAck => "PlaceOrderReqAck",
            EventKind::PendingCancellationAck => "PendingCancellationAck",
            EventKind::PendingModificationAck => "PendingModificationAck",
            EventKind::OrderPlacedInOrderBook => "OrderPlacedInOrderBook",
            EventKind::ModifiedPlaced => "ModifiedPlaced",
            EventKind::PartiallyFilled => "PartiallyFilled",
            EventKind::ModifiedPartiallyFilled => "ModifiedPartiallyFilled",
            EventKind::Filled => "Filled",
            EventKind::Rejected => "Rejected",
            EventKind::Cancelled => "Cancelled",
            EventKind::Expired => "Expired",
        }
    }
}

impl Tagged for Event {
    type Tag = EventKind;

    #[inline]
    fn tag(&self) -> EventKind {
        self.kind()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let command = self.kind().command();
        match self {
            Event::ModifiedPlaced {
                price_new,
                volume_new,
            }
            | Event::ModifiedPartiallyFilled {
                price_new,
                volume_new,
            } => write!(f, "{command} {price_new} {volume_new}"),
            Event::PartiallyFilled { volume } | Event::Filled { volume } => {
                write!(f, "{command} {volume}")
            }
            _ => f.write_str(command),
        }
    }
}

/// Errors from parsing the text form of an event.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseEventError {
    #[error("empty event")]
    Empty,

    #[error("unknown event '{0}'")]
    Unknown(String),

    #[error("'{command}' expects <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("invalid {argument} '{value}': expected an integer")]
    InvalidNumber {
        argument: &'static str,
        value: String,
    },

    #[error("unexpected trailing input '{0}'")]
    Trailing(String),
}

impl FromStr for Event {
    type Err = ParseEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let word = words.next().ok_or(ParseEventError::Empty)?.to_lowercase();
        let kind = EventKind::ALL
            .into_iter()
            .find(|k| k.command() == word)
            .ok_or_else(|| ParseEventError::Unknown(word.clone()))?;
        let command = kind.command();

        let event = match kind {
            EventKind::PlaceOrderReqAck => Event::PlaceOrderReqAck,
            EventKind::PendingCancellationAck => Event::PendingCancellationAck,
            EventKind::PendingModificationAck => Event::PendingModificationAck,
            EventKind::OrderPlacedInOrderBook => Event::OrderPlacedInOrderBook,
            EventKind::Rejected => Event::Rejected,
            EventKind::Cancelled => Event::Cancelled,
            EventKind::Expired => Event::Expired,
            EventKind::PartiallyFilled => {
                Event::partially_filled(integer(words.next(), command, "volume")?)
            }
            EventKind::Filled => Event::filled(integer(words.next(), command, "volume")?),
            EventKind::ModifiedPlaced => {
                let price = integer(words.next(), command, "price")?;
                let volume = integer(words.next(), command, "volume")?;
                Event::modified_placed(Price(price), volume)
            }
            EventKind::ModifiedPartiallyFilled => {
                let price = integer(words.next(), command, "price")?;
                let volume = integer(words.next(), command, "volume")?;
                Event::modified_partially_filled(Price(price), volume)
            }
        };

        let rest: Vec<&str> = words.collect();
        if !rest.is_empty() {
            return Err(ParseEventError::Trailing(rest.join(" ")));
        }
        Ok(event)
    }
}

fn integer(
    word: Option<&str>,
    command: &'static str,
    argument: &'static str,
) -> Result<i64, ParseEventError> {
    let word = word.ok_or(ParseEventError::MissingArgument { command, argument })?;
    word.parse().map_err(|_| ParseEventError::InvalidNumber {
        argument,
        value: word.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_constructors() {
        assert_eq!(
            Event::partially_filled(10),
            Event::PartiallyFilled { volume: 10 }
        );
        assert_eq!(Event::filled(0), Event::Filled { volume: 0 });
        assert!(matches!(
            Event::modified_placed(Price(2), 5),
            Event::ModifiedPlaced { .. }
        ));
        assert!(matches!(
            Event::modified_partially_filled(Price(2), 5),
            Event::ModifiedPartiallyFilled { .. }
        ));
    }

    #[test]
    fn kind_ignores_payload() {
        assert_eq!(Event::filled(0).kind(), Event::filled(99).kind());
        assert_ne!(Event::filled(0).kind(), Event::partially_filled(0).kind());
    }

    #[test]
    fn parse_payload_free() {
        assert_eq!("ack".parse::<Event>(), Ok(Event::PlaceOrderReqAck));
        assert_eq!("cancel-ack".parse::<Event>(), Ok(Event::PendingCancellationAck));
        assert_eq!("modify-ack".parse::<Event>(), Ok(Event::PendingModificationAck));
        assert_eq!("placed".parse::<Event>(), Ok(Event::OrderPlacedInOrderBook));
        assert_eq!("rejected".parse::<Event>(), Ok(Event::Rejected));
        assert_eq!("cancelled".parse::<Event>(), Ok(Event::Cancelled));
        assert_eq!("expired".parse::<Event>(), Ok(Event::Expired));
    }

    #[test]
    fn parse_with_payload() {
        assert_eq!("partial 10".parse::<Event>(), Ok(Event::partially_filled(10)));
        assert_eq!("  FILLED   0 ".parse::<Event>(), Ok(Event::filled(0)));
        assert_eq!(
            "modified 3 7".parse::<Event>(),
            Ok(Event::modified_placed(Price(3), 7))
        );
        assert_eq!(
            "modified-partial 3 7".parse::<Event>(),
            Ok(Event::modified_partially_filled(Price(3), 7))
        );
    }

    #[test]
    fn display_matches_parser() {
        let events = [
            Event::PlaceOrderReqAck,
            Event::partially_filled(4),
            Event::modified_partially_filled(Price(9), 2),
            Event::Expired,
        ];
        for event in events {
            assert_eq!(event.to_string().parse::<Event>(), Ok(event));
        }
        assert_eq!(Event::modified_placed(Price(3), 7).to_string(), "modified 3 7");
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Event>(), Err(ParseEventError::Empty));
        assert_eq!(
            "buy".parse::<Event>(),
            Err(ParseEventError::Unknown("buy".into()))
        );
        assert_eq!(
            "partial".parse::<Event>(),
            Err(ParseEventError::MissingArgument {
                command: "partial",
                argument: "volume"
            })
        );
        assert_eq!(
            "modified 3".parse::<Event>(),
            Err(ParseEventError::MissingArgument {
                command: "modified",
                argument: "volume"
            })
        );
        assert_eq!(
            "filled ten".parse::<Event>(),
            Err(ParseEventError::InvalidNumber {
                argument: "volume",
                value: "ten".into()
            })
        );
        assert_eq!(
            "ack now".parse::<Event>(),
            Err(ParseEventError::Trailing("now".into()))
        );
    }

    #[test]
    fn error_display() {
        let err = "partial".parse::<Event>().unwrap_err();
        assert_eq!(err.to_string(), "'partial' expects <volume>");
    }
}
