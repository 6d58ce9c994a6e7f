//! Events making up a detailed handoff timeline.

use std::fmt::Display;

use qtty::{Quantity, Unit};

use crate::Id;

/// One segment of a handoff timeline: either an active connection to a
/// satellite or a coverage gap. Consecutive events tile the overall span
/// exactly, with no overlap and no unaccounted time.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleEvent<U: Unit> {
    Active {
        satellite: Id,
        connect: Quantity<U>,
        disconnect: Quantity<U>,
    },
    Gap {
        start: Quantity<U>,
        end: Quantity<U>,
    },
}

impl<U: Unit> ScheduleEvent<U> {
    pub fn start(&self) -> Quantity<U> {
        match self {
            Self::Active { connect, .. } => *connect,
            Self::Gap { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Quantity<U> {
        match self {
            Self::Active { disconnect, .. } => *disconnect,
            Self::Gap { end, .. } => *end,
        }
    }

    pub fn duration(&self) -> Quantity<U> {
        self.end() - self.start()
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap { .. })
    }

    /// The satellite serving this segment, if it is an active one.
    pub fn satellite(&self) -> Option<&str> {
        match self {
            Self::Active { satellite, .. } => Some(satellite),
            Self::Gap { .. } => None,
        }
    }
}

impl<U: Unit> Display for ScheduleEvent<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active {
                satellite,
                connect,
                disconnect,
            } => write!(
                f,
                "{} [{:.3}, {:.3}]",
                satellite,
                connect.value(),
                disconnect.value()
            ),
            Self::Gap { start, end } => {
                write!(f, "gap [{:.3}, {:.3}]", start.value(), end.value())
            }
        }
    }
}

// =============================================================================
// ScheduleEvent Serde Support
// =============================================================================

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Unit-free wire form; the quantity unit is re-applied on the way in.
    #[derive(Serialize, Deserialize)]
    #[serde(tag = "event", rename_all = "snake_case")]
    enum RawEvent {
        Active {
            satellite: Id,
            connect: f64,
            disconnect: f64,
        },
        Gap {
            start: f64,
            end: f64,
        },
    }

    impl<U: Unit> Serialize for ScheduleEvent<U> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let raw = match self {
                ScheduleEvent::Active {
                    satellite,
                    connect,
                    disconnect,
                } => RawEvent::Active {
                    satellite: satellite.clone(),
                    connect: connect.value(),
                    disconnect: disconnect.value(),
                },
                ScheduleEvent::Gap { start, end } => RawEvent::Gap {
                    start: start.value(),
                    end: end.value(),
                },
            };
            raw.serialize(serializer)
        }
    }

    impl<'de, U: Unit> Deserialize<'de> for ScheduleEvent<U> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(match RawEvent::deserialize(deserializer)? {
                RawEvent::Active {
                    satellite,
                    connect,
                    disconnect,
                } => ScheduleEvent::Active {
                    satellite,
                    connect: Quantity::new(connect),
                    disconnect: Quantity::new(disconnect),
                },
                RawEvent::Gap { start, end } => ScheduleEvent::Gap {
                    start: Quantity::new(start),
                    end: Quantity::new(end),
                },
            })
        }
    }
}
