use std::ops::Deref;

use uom::{
    ConstZero,
    si::{
        f64::{Power, Ratio},
        ratio::ratio,
    },
};

use crate::support::constraint::{Constrained, ConstraintResult, UnitInterval};

/// Fraction of the maximum possible duty actually transferred.
///
/// The efficiency must be in the interval [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Efficiency(Constrained<Ratio, UnitInterval>);

impl Efficiency {
    /// Create an [`Efficiency`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside [0, 1].
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(Ratio::new::<ratio>(value))?))
    }

    /// Computes `q / q_max`, or zero when `q_max` is zero.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the ratio lies outside [0, 1].
    pub fn from_duty(q: Power, q_max: Power) -> ConstraintResult<Self> {
        if q_max == Power::ZERO {
            return Self::new(0.0);
        }
        Ok(Self(UnitInterval::new(q / q_max)?))
    }
}

impl Deref for Efficiency {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::power::watt;

    #[test]
    fn ratio_of_duties() -> ConstraintResult<()> {
        let eff = Efficiency::from_duty(Power::new::<watt>(250.0), Power::new::<watt>(1000.0))?;
        assert_relative_eq!(eff.get::<ratio>(), 0.25);
        Ok(())
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn zero_when_no_duty_is_possible() -> ConstraintResult<()> {
        let eff = Efficiency::from_duty(Power::new::<watt>(0.0), Power::ZERO)?;
        assert_eq!(eff.get::<ratio>(), 0.0);
        Ok(())
    }

    #[test]
    fn more_than_possible_is_rejected() {
        assert!(Efficiency::from_duty(Power::new::<watt>(2.0), Power::new::<watt>(1.0)).is_err());
    }
}
