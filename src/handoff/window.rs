//! Visibility window tagged with the satellite that provides it.

use std::fmt::Display;

use qtty::{Quantity, Unit};

use crate::coverage::Interval;
use crate::Id;

/// The interval during which a ground terminal can talk to one satellite.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityWindow<U: Unit> {
    satellite: Id,
    window: Interval<U>,
}

impl<U: Unit> VisibilityWindow<U> {
    pub fn new(satellite: impl Into<Id>, window: Interval<U>) -> Self {
        Self {
            satellite: satellite.into(),
            window,
        }
    }

    pub fn from_f64(satellite: impl Into<Id>, start: f64, end: f64) -> Self {
        Self::new(satellite, Interval::from_f64(start, end))
    }

    pub fn satellite(&self) -> &str {
        &self.satellite
    }

    pub fn window(&self) -> Interval<U> {
        self.window
    }

    pub fn start(&self) -> Quantity<U> {
        self.window.start()
    }

    pub fn end(&self) -> Quantity<U> {
        self.window.end()
    }
}

impl<U: Unit> Display for VisibilityWindow<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.satellite, self.window)
    }
}

// =============================================================================
// VisibilityWindow Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<U: Unit> serde::Serialize for VisibilityWindow<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("VisibilityWindow", 2)?;
        s.serialize_field("satellite", &self.satellite)?;
        s.serialize_field("window", &self.window)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, U: Unit> serde::Deserialize<'de> for VisibilityWindow<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(bound(deserialize = ""))]
        struct Raw<U: Unit> {
            satellite: Id,
            window: Interval<U>,
        }

        let raw = Raw::<U>::deserialize(deserializer)?;
        Ok(Self {
            satellite: raw.satellite,
            window: raw.window,
        })
    }
}
