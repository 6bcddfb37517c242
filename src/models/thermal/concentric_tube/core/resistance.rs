//! Series thermal resistance across the inner pipe wall.

use std::f64::consts::PI;

use uom::si::{
    f64::{HeatTransfer, ThermalConductance, ThermalConductivity},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    thermal_conductance::watt_per_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use super::geometry::PipeGeometry;

/// The three resistances between the streams, in K/W.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesResistance {
    /// Convection on the bore side, `1 / (2π L r_i h_i)`.
    pub internal: f64,
    /// Radial conduction through the wall, `ln(r_o / r_i) / (2π L k)`.
    pub wall: f64,
    /// Convection on the outer surface, `1 / (2π L r_o h_o)`.
    pub external: f64,
}

impl SeriesResistance {
    #[must_use]
    pub fn new(
        pipe: &PipeGeometry,
        wall_conductivity: ThermalConductivity,
        h_internal: HeatTransfer,
        h_external: HeatTransfer,
    ) -> Self {
        let length = pipe.length().get::<meter>();
        let r_i = pipe.inner_radius().get::<meter>();
        let r_o = pipe.outer_radius().get::<meter>();
        let k = wall_conductivity.get::<watt_per_meter_kelvin>();

        Self {
            internal: 1.0
                / (2.0 * PI * length * r_i * h_internal.get::<watt_per_square_meter_kelvin>()),
            wall: (r_o / r_i).ln() / (2.0 * PI * length * k),
            external: 1.0
                / (2.0 * PI * length * r_o * h_external.get::<watt_per_square_meter_kelvin>()),
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.internal + self.wall + self.external
    }

    /// Overall conductance `UA = 1 / ΣR`.
    #[must_use]
    pub fn conductance(&self) -> ThermalConductance {
        ThermalConductance::new::<watt_per_kelvin>(1.0 / self.total())
    }
}

/// Overall heat-transfer coefficient referenced to the pipe's outer surface.
///
/// `U = 1 / (2π L r_o ΣR)`.
#[must_use]
pub fn overall_u(
    pipe: &PipeGeometry,
    wall_conductivity: ThermalConductivity,
    h_internal: HeatTransfer,
    h_external: HeatTransfer,
) -> HeatTransfer {
    let resistance = SeriesResistance::new(pipe, wall_conductivity, h_internal, h_external);
    let length = pipe.length().get::<meter>();
    let r_o = pipe.outer_radius().get::<meter>();

    HeatTransfer::new::<watt_per_square_meter_kelvin>(
        1.0 / (2.0 * PI * length * r_o * resistance.total()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{area::square_meter, f64::Length};

    fn pipe() -> PipeGeometry {
        PipeGeometry::new(
            Length::new::<meter>(0.1),
            Length::new::<meter>(0.005),
            Length::new::<meter>(2.0),
        )
        .unwrap()
    }

    fn h(value: f64) -> HeatTransfer {
        HeatTransfer::new::<watt_per_square_meter_kelvin>(value)
    }

    #[test]
    fn thin_highly_conductive_wall_approaches_outer_film() {
        // With a dominant external film U tends to h_o.
        let u = overall_u(
            &pipe(),
            ThermalConductivity::new::<watt_per_meter_kelvin>(1e9),
            h(1e9),
            h(50.0),
        );
        assert_relative_eq!(
            u.get::<watt_per_square_meter_kelvin>(),
            50.0,
            max_relative = 1e-6
        );
    }

    #[test]
    fn ua_matches_conductance() {
        let pipe = pipe();
        let k = ThermalConductivity::new::<watt_per_meter_kelvin>(16.0);
        let u = overall_u(&pipe, k, h(24.0), h(2000.0));
        let ua = u.get::<watt_per_square_meter_kelvin>() * pipe.outer_area().get::<square_meter>();

        let resistance = SeriesResistance::new(&pipe, k, h(24.0), h(2000.0));
        assert_relative_eq!(
            ua,
            resistance.conductance().get::<watt_per_kelvin>(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn hand_computed_network() {
        let pipe = pipe();
        let r = SeriesResistance::new(
            &pipe,
            ThermalConductivity::new::<watt_per_meter_kelvin>(16.0),
            h(100.0),
            h(1000.0),
        );
        assert_relative_eq!(r.internal, 1.0 / (2.0 * PI * 2.0 * 0.045 * 100.0), max_relative = 1e-12);
        assert_relative_eq!(r.wall, (0.05_f64 / 0.045).ln() / (2.0 * PI * 2.0 * 16.0), max_relative = 1e-12);
        assert_relative_eq!(r.external, 1.0 / (2.0 * PI * 2.0 * 0.05 * 1000.0), max_relative = 1e-12);
    }
}
