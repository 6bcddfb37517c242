use thiserror::Error;
use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
};

use crate::support::units::TemperatureDifference;

/// Terminal differences closer than this are treated as equal.
const EQUAL_ENDS_TOL_K: f64 = 1e-6;

/// Errors from the log-mean temperature difference.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LmtdError {
    /// At least one terminal difference is not strictly positive (or is `NaN`).
    ///
    /// The hot stream must be warmer than the cold stream at both ends.
    #[error("hot stream must be warmer than cold at both ends: dt1={delta_t1:?}, dt2={delta_t2:?}")]
    TemperatureOrdering {
        delta_t1: TemperatureInterval,
        delta_t2: TemperatureInterval,
    },
}

/// Returns the log-mean of two terminal temperature differences.
///
/// `LMTD = (ΔT1 − ΔT2) / ln(ΔT1 / ΔT2)`, or exactly `ΔT1` when the two
/// differences agree within 1e-6 K.
///
/// # Errors
///
/// Returns [`LmtdError::TemperatureOrdering`] unless both differences are
/// strictly positive.
pub fn log_mean_temperature_difference(
    delta_t1: TemperatureInterval,
    delta_t2: TemperatureInterval,
) -> Result<TemperatureInterval, LmtdError> {
    let dt1 = delta_t1.get::<delta_kelvin>();
    let dt2 = delta_t2.get::<delta_kelvin>();

    if dt1.is_nan() || dt2.is_nan() || dt1 <= 0.0 || dt2 <= 0.0 {
        return Err(LmtdError::TemperatureOrdering { delta_t1, delta_t2 });
    }

    if (dt1 - dt2).abs() < EQUAL_ENDS_TOL_K {
        return Ok(delta_t1);
    }

    Ok(TemperatureInterval::new::<delta_kelvin>(
        (dt1 - dt2) / (dt1 / dt2).ln(),
    ))
}

/// The four terminal temperatures of a counter-flow exchanger.
///
/// The hot inlet faces the cold outlet and the hot outlet faces the cold inlet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterFlowEnds {
    pub hot_in: ThermodynamicTemperature,
    pub hot_out: ThermodynamicTemperature,
    pub cold_in: ThermodynamicTemperature,
    pub cold_out: ThermodynamicTemperature,
}

impl CounterFlowEnds {
    /// Returns `(ΔT1, ΔT2) = (T_hot_in − T_cold_out, T_hot_out − T_cold_in)`.
    #[must_use]
    pub fn terminal_differences(&self) -> (TemperatureInterval, TemperatureInterval) {
        (
            self.hot_in.minus(self.cold_out),
            self.hot_out.minus(self.cold_in),
        )
    }

    /// Log-mean temperature difference across the exchanger.
    ///
    /// # Errors
    ///
    /// Returns [`LmtdError::TemperatureOrdering`] if the streams cross or touch.
    pub fn lmtd(&self) -> Result<TemperatureInterval, LmtdError> {
        let (dt1, dt2) = self.terminal_differences();
        log_mean_temperature_difference(dt1, dt2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    fn dt(value: f64) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(value)
    }

    #[test]
    fn textbook_value() {
        let lmtd = log_mean_temperature_difference(dt(60.0), dt(20.0)).unwrap();
        assert_relative_eq!(lmtd.get::<delta_kelvin>(), 40.0 / 3.0_f64.ln());
    }

    #[test]
    fn symmetric_in_its_arguments() {
        let a = log_mean_temperature_difference(dt(12.5), dt(47.0)).unwrap();
        let b = log_mean_temperature_difference(dt(47.0), dt(12.5)).unwrap();
        assert_relative_eq!(a.get::<delta_kelvin>(), b.get::<delta_kelvin>());
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn equal_ends_return_first_difference_exactly() {
        let lmtd = log_mean_temperature_difference(dt(50.0), dt(50.0 + 5e-7)).unwrap();
        assert_eq!(lmtd.get::<delta_kelvin>(), 50.0);

        let lmtd = log_mean_temperature_difference(dt(50.0), dt(50.0)).unwrap();
        assert_eq!(lmtd.get::<delta_kelvin>(), 50.0);
    }

    #[test]
    fn crossed_or_touching_streams_are_rejected() {
        assert!(log_mean_temperature_difference(dt(0.0), dt(10.0)).is_err());
        assert!(log_mean_temperature_difference(dt(10.0), dt(-1.0)).is_err());
        assert!(log_mean_temperature_difference(dt(f64::NAN), dt(10.0)).is_err());
    }

    #[test]
    fn counter_flow_ends() {
        let ends = CounterFlowEnds {
            hot_in: ThermodynamicTemperature::new::<degree_celsius>(80.0),
            hot_out: ThermodynamicTemperature::new::<degree_celsius>(70.0),
            cold_in: ThermodynamicTemperature::new::<degree_celsius>(20.0),
            cold_out: ThermodynamicTemperature::new::<degree_celsius>(30.0),
        };

        let (dt1, dt2) = ends.terminal_differences();
        assert_relative_eq!(dt1.get::<delta_kelvin>(), 50.0, epsilon = 1e-9);
        assert_relative_eq!(dt2.get::<delta_kelvin>(), 50.0, epsilon = 1e-9);
        assert_relative_eq!(ends.lmtd().unwrap().get::<delta_kelvin>(), 50.0, epsilon = 1e-9);
    }
}
