//! Unit conversion traits for same-dimension unit compatibility.
//!
//! This module provides traits that enable orbilink to work with different units
//! of the same physical dimension, allowing callers to express visibility windows
//! in one unit (e.g., seconds since pass start) while latency budgets or demand
//! spans are stated in another (e.g., minutes).

use qtty::{Quantity, Unit};

/// Marker trait for units that share the same physical dimension.
///
/// This trait is automatically implemented for any pair of units where
/// `From::Dim == To::Dim`, enabling compile-time checked conversions.
///
/// # Example
///
/// ```ignore
/// use qtty::{Second, Minute};
/// use orbilink::units::SameDim;
///
/// // This compiles because Second and Minute share the Time dimension
/// fn accepts_same_dim<From, To>()
/// where
///     From: SameDim<To>,
/// {}
///
/// accepts_same_dim::<Second, Minute>(); // OK
/// // accepts_same_dim::<Second, Meter>(); // Error: different dimensions
/// ```
pub trait SameDim<To: Unit>: Unit<Dim = To::Dim> {}

// Blanket implementation: any two units with the same dimension satisfy SameDim
impl<From, To> SameDim<To> for From
where
    From: Unit,
    To: Unit<Dim = From::Dim>,
{
}

/// Converts a quantity from one unit to another unit of the same dimension.
///
/// This is a convenience wrapper around `Quantity::to::<T>()` that works
/// with the `SameDim` trait bounds.
///
/// # Example
///
/// ```ignore
/// use qtty::{Quantity, Second, Minute};
/// use orbilink::units::convert;
///
/// let pass_sec = Quantity::<Second>::new(600.0);
/// let pass_min: Quantity<Minute> = convert(pass_sec);
/// assert!((pass_min.value() - 10.0).abs() < 1e-12);
/// ```
#[inline]
pub const fn convert<From, To>(q: Quantity<From>) -> Quantity<To>
where
    From: SameDim<To>,
    To: Unit,
{
    q.to_const::<To>()
}
