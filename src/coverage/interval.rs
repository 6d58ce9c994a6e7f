//! Closed time interval used for visibility windows and coverage demands.

use std::fmt::Display;

use qtty::{Quantity, Unit};

use super::error::CoverageError;

/// Closed time window `[start, end]` during which a link is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<U: Unit> {
    start: Quantity<U>,
    end: Quantity<U>,
}

impl<U: Unit> Interval<U> {
    /// Creates interval `[start, end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`. Use [`try_new`](Self::try_new) for
    /// untrusted input.
    pub const fn new(start: Quantity<U>, end: Quantity<U>) -> Self {
        assert!(
            start.value() <= end.value(),
            "Interval start must be <= end"
        );
        Self { start, end }
    }

    /// Creates interval `[start, end]`, rejecting malformed input.
    ///
    /// Fails if `start > end` or if either endpoint is NaN.
    pub fn try_new(start: Quantity<U>, end: Quantity<U>) -> Result<Self, CoverageError> {
        if start.value().is_nan() || end.value().is_nan() || start.value() > end.value() {
            return Err(CoverageError::InvalidInterval {
                start: start.value(),
                end: end.value(),
            });
        }
        Ok(Self { start, end })
    }

    pub const fn from_f64(start: f64, end: f64) -> Self {
        Self::new(Quantity::<U>::new(start), Quantity::<U>::new(end))
    }

    pub const fn start(&self) -> Quantity<U> {
        self.start
    }

    pub const fn end(&self) -> Quantity<U> {
        self.end
    }

    pub fn duration(&self) -> Quantity<U> {
        self.end - self.start
    }

    /// Converts this interval to another unit of the same dimension.
    pub fn to<T: Unit<Dim = U::Dim>>(self) -> Interval<T> {
        Interval::new(self.start.to(), self.end.to())
    }

    /// Returns true if `position` ∈ `[start, end]`.
    pub const fn contains(&self, position: Quantity<U>) -> bool {
        self.start.value() <= position.value() && position.value() <= self.end.value()
    }

    /// Checks if this interval overlaps with another interval.
    ///
    /// Endpoints are inclusive, so windows that merely touch overlap.
    pub const fn overlaps(&self, other: &Interval<U>) -> bool {
        self.start.value() <= other.end.value() && other.start.value() <= self.end.value()
    }
}

impl<U: Unit> Display for Interval<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.3}, {:.3}]", self.start.value(), self.end.value())
    }
}

// =============================================================================
// Interval Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<U: Unit> serde::Serialize for Interval<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Interval", 2)?;
        s.serialize_field("start", &self.start.value())?;
        s.serialize_field("end", &self.end.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, U: Unit> serde::Deserialize<'de> for Interval<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            start: f64,
            end: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::try_new(Quantity::<U>::new(raw.start), Quantity::<U>::new(raw.end))
            .map_err(serde::de::Error::custom)
    }
}
