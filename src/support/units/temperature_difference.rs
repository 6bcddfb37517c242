use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Subtraction of absolute temperatures yielding a temperature interval.
///
/// [`uom`] keeps [`ThermodynamicTemperature`] and [`TemperatureInterval`]
/// apart, and `a - b` on two absolute temperatures does not give an interval.
/// See [#380](https://github.com/iliekturtles/uom/issues/380).
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    #[test]
    fn hot_minus_cold() {
        let hot = ThermodynamicTemperature::new::<degree_celsius>(80.0);
        let cold = ThermodynamicTemperature::new::<degree_celsius>(20.0);

        assert_relative_eq!(hot.minus(cold).get::<delta_kelvin>(), 60.0, epsilon = 1e-9);
        assert_relative_eq!(cold.minus(hot).get::<delta_kelvin>(), -60.0, epsilon = 1e-9);
    }
}
