//! Shared fixtures for exchanger tests.

use uom::si::{
    f64::{Length, ThermodynamicTemperature},
    length::meter,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::units::liters_per_minute;

use super::{Exchanger, Flow, OperatingPoint, PipeGeometry, StreamSpec};

/// Stainless pipe, 0.1 m OD, 5 mm wall, 2 m long, with a 10 mm annular gap.
pub(crate) fn reference_exchanger() -> Exchanger {
    let pipe = PipeGeometry::new(
        Length::new::<meter>(0.1),
        Length::new::<meter>(0.005),
        Length::new::<meter>(2.0),
    )
    .unwrap();
    Exchanger::new(
        pipe,
        Length::new::<meter>(0.01),
        Length::new::<meter>(0.005),
        "stainless steel",
    )
    .unwrap()
}

/// Water at `lpm` L/min entering at `inlet_c` °C.
pub(crate) fn water_stream(lpm: f64, inlet_c: f64) -> StreamSpec {
    StreamSpec::new(
        "water",
        Flow::Volumetric(liters_per_minute(lpm)),
        ThermodynamicTemperature::new::<degree_celsius>(inlet_c),
    )
}

/// Water at 10 L/min on both sides, 20 °C cold and 80 °C hot.
pub(crate) fn reference_point() -> OperatingPoint {
    OperatingPoint {
        exchanger: reference_exchanger(),
        cold: water_stream(10.0, 20.0),
        hot: water_stream(10.0, 80.0),
    }
}
