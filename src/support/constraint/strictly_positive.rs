use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker for values strictly greater than zero.
///
/// ```
/// use concentric_hx::support::constraint::StrictlyPositive;
///
/// assert!(StrictlyPositive::new(0.005).is_ok());
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or `NaN`.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        dynamic_viscosity::pascal_second, f64::DynamicViscosity, f64::Length, length::meter,
    };

    #[test]
    fn floats() {
        assert!(StrictlyPositive::new(1e-12).is_ok());
        assert_eq!(StrictlyPositive::new(0.0), Err(ConstraintError::Zero));
        assert_eq!(StrictlyPositive::new(-3.0), Err(ConstraintError::Negative));
        assert_eq!(
            StrictlyPositive::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn quantities() {
        assert!(StrictlyPositive::new(Length::new::<meter>(0.1)).is_ok());
        assert!(StrictlyPositive::new(Length::new::<meter>(0.0)).is_err());
        assert!(StrictlyPositive::new(DynamicViscosity::new::<pascal_second>(1e-3)).is_ok());
        assert!(StrictlyPositive::new(DynamicViscosity::new::<pascal_second>(-1e-3)).is_err());
    }
}
