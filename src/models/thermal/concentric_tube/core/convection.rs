//! Convective heat-transfer coefficients from Nusselt correlations.

use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{HeatTransfer, Length, ThermalConductivity},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    ratio::ratio,
    thermal_conductivity::watt_per_meter_kelvin,
};

use super::flow::{FlowRegime, PrandtlNumber, ReynoldsNumber};

/// Fully developed laminar Nusselt number used below the transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaminarCorrelation {
    /// `Nu = 3.66`.
    #[default]
    ConstantWallTemperature,
    /// `Nu = 4.36`.
    ConstantHeatFlux,
}

impl LaminarCorrelation {
    #[must_use]
    pub fn nusselt(self) -> f64 {
        match self {
            Self::ConstantWallTemperature => 3.66,
            Self::ConstantHeatFlux => 4.36,
        }
    }
}

/// Nusselt number for a characterized flow.
///
/// Turbulent flow uses Dittus–Boelter, `Nu = 0.023 Re^0.8 Pr^0.33`.
#[must_use]
pub fn nusselt(re: ReynoldsNumber, pr: PrandtlNumber, laminar: LaminarCorrelation) -> f64 {
    match re.regime() {
        FlowRegime::Laminar => laminar.nusselt(),
        FlowRegime::Turbulent => {
            0.023 * re.get::<ratio>().powf(0.8) * pr.get::<ratio>().powf(0.33)
        }
    }
}

/// Convective coefficient `h = Nu · k / d`.
#[must_use]
pub fn convection_coefficient(
    conductivity: ThermalConductivity,
    diameter: Length,
    re: ReynoldsNumber,
    pr: PrandtlNumber,
    laminar: LaminarCorrelation,
) -> HeatTransfer {
    let nu = nusselt(re, pr, laminar);
    HeatTransfer::new::<watt_per_square_meter_kelvin>(
        nu * conductivity.get::<watt_per_meter_kelvin>() / diameter.get::<meter>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn h(re: f64, laminar: LaminarCorrelation) -> f64 {
        convection_coefficient(
            ThermalConductivity::new::<watt_per_meter_kelvin>(0.6),
            Length::new::<meter>(0.02),
            ReynoldsNumber::new(re).unwrap(),
            PrandtlNumber::new(7.0).unwrap(),
            laminar,
        )
        .get::<watt_per_square_meter_kelvin>()
    }

    #[test]
    fn laminar_constants() {
        assert_relative_eq!(h(1000.0, LaminarCorrelation::default()), 3.66 * 0.6 / 0.02);
        assert_relative_eq!(
            h(1000.0, LaminarCorrelation::ConstantHeatFlux),
            4.36 * 0.6 / 0.02
        );
    }

    #[test]
    fn dittus_boelter() {
        let expected = 0.023 * 10_000.0_f64.powf(0.8) * 7.0_f64.powf(0.33) * 0.6 / 0.02;
        assert_relative_eq!(
            h(10_000.0, LaminarCorrelation::default()),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn laminar_correlation_does_not_affect_turbulent_flow() {
        assert_eq!(
            h(8000.0, LaminarCorrelation::ConstantWallTemperature),
            h(8000.0, LaminarCorrelation::ConstantHeatFlux)
        );
    }

    #[test]
    fn coefficient_jumps_at_transition() {
        let below = h(4999.999, LaminarCorrelation::default());
        let above = h(5000.0, LaminarCorrelation::default());
        assert_relative_eq!(below, 3.66 * 30.0, max_relative = 1e-12);
        assert!(above > below);
    }
}
