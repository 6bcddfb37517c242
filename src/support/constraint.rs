//! Numeric invariants enforced at construction time.
//!
//! A [`Constrained<T, C>`] value can only be built through [`Constrained::new`],
//! which runs the marker's [`Constraint::check`]. After that, the invariant
//! travels with the type and never has to be re-validated.
//!
//! # Provided constraints
//!
//! - [`StrictlyPositive`]: greater than zero (lengths, flow rates, viscosities)
//! - [`NonNegative`]: zero or greater (heat duty, temperature drops)
//! - [`UnitInterval`]: closed unit interval `0 ≤ x ≤ 1` (efficiency)
//!
//! Custom invariants can be added by implementing [`Constraint<T>`] for a
//! zero-sized marker type.

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitInterval};

/// A numeric invariant checked when a [`Constrained`] value is created.
pub trait Constraint<T> {
    /// Checks that `value` satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] describing the violation.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// The ways a value can violate a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A value of type `T` known to satisfy the constraint `C`.
///
/// # Example
///
/// ```
/// use concentric_hx::support::constraint::{Constrained, StrictlyPositive};
///
/// let passes = Constrained::<_, StrictlyPositive>::new(5).unwrap();
/// assert_eq!(passes.into_inner(), 5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Checks `value` against `C` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
