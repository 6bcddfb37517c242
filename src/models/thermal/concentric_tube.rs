//! Counter-flow concentric-tube heat exchanger.
//!
//! [`ConcentricTubeHx`] evaluates one [`OperatingPoint`] at a time and implements
//! [`twine_core::Model`] for it. [`ConcentricTubeHx::sweep`] re-runs the model
//! while one design variable moves across a range.
//!
//! The cold stream flows through the inner pipe and the hot stream through the
//! surrounding annulus. The hot outlet is not solved for; it is assumed to sit
//! [`SolverConfig::hot_side_drop`] below the hot inlet.
//!
//! # Example
//!
//! ```
//! use concentric_hx::{
//!     models::thermal::concentric_tube::{
//!         ConcentricTubeHx, Exchanger, Flow, ModelConfig, OperatingPoint, PipeGeometry,
//!         StreamSpec,
//!     },
//!     support::units::liters_per_minute,
//! };
//! use uom::si::{
//!     f64::{Length, ThermodynamicTemperature},
//!     length::meter,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! let pipe = PipeGeometry::new(
//!     Length::new::<meter>(0.1),
//!     Length::new::<meter>(0.005),
//!     Length::new::<meter>(2.0),
//! )?;
//! let exchanger = Exchanger::new(
//!     pipe,
//!     Length::new::<meter>(0.01),
//!     Length::new::<meter>(0.005),
//!     "stainless steel",
//! )?;
//!
//! let point = OperatingPoint {
//!     exchanger,
//!     cold: StreamSpec::new(
//!         "water",
//!         Flow::Volumetric(liters_per_minute(10.0)),
//!         ThermodynamicTemperature::new::<degree_celsius>(20.0),
//!     ),
//!     hot: StreamSpec::new(
//!         "water",
//!         Flow::Volumetric(liters_per_minute(10.0)),
//!         ThermodynamicTemperature::new::<degree_celsius>(80.0),
//!     ),
//! };
//!
//! let hx = ConcentricTubeHx::standard(ModelConfig::default());
//! let state = hx.evaluate(&point)?;
//!
//! let t_out = state.cold_out.get::<degree_celsius>();
//! assert!(t_out > 20.0 && t_out < 80.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod core;
mod scenario;
mod sweep;

pub use self::core::{
    AnnulusGeometry, EvaluateError, Exchanger, ExchangerState, Flow, FlowError, FlowRegime,
    FlowState, GeometryError, HeatBalance, IterationStrategy, LaminarCorrelation,
    OperatingPoint, Pass, PipeGeometry, PrandtlNumber, ReynoldsNumber, SeriesResistance, Side,
    Solution, SolveError, SolverConfig, StreamSpec, TRANSITION_REYNOLDS, convection_coefficient,
    nusselt, overall_u, prandtl, reynolds, solve,
};
pub use scenario::{Scenario, ScenarioError};
pub use sweep::{
    AxisKind, AxisValue, FailurePolicy, Interpolate, LinearRange, SweepAxis, SweepConfig,
    SweepError, SweepPoint, SweepResult, SweepSeries, SweepValue,
};

use serde::{Deserialize, Serialize};
use twine_core::Model;

use crate::support::properties::{Catalog, LookupMode, PropertyTable, WithFallback};

/// Settings that apply to every evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub solver: SolverConfig,
    pub laminar: LaminarCorrelation,
    pub lookup: LookupMode,
}

/// A concentric-tube exchanger model over a set of property tables.
#[derive(Debug, Clone)]
pub struct ConcentricTubeHx<T> {
    tables: WithFallback<T>,
    config: ModelConfig,
}

impl ConcentricTubeHx<Catalog> {
    /// A model over the built-in fluid and material catalog.
    #[must_use]
    pub fn standard(config: ModelConfig) -> Self {
        Self::new(Catalog::standard(), config)
    }
}

impl<T: PropertyTable> ConcentricTubeHx<T> {
    /// Creates a model; `config.lookup` decides how unknown fluids are handled.
    #[must_use]
    pub fn new(tables: T, config: ModelConfig) -> Self {
        Self {
            tables: WithFallback::new(tables, config.lookup),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// The property tables as seen by the model, with the lookup mode applied.
    #[must_use]
    pub fn tables(&self) -> &WithFallback<T> {
        &self.tables
    }

    /// Evaluates the exchanger at one operating point.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError`] if a name is unknown, a stream is not physical,
    /// or the heat balance fails.
    pub fn evaluate(&self, point: &OperatingPoint) -> Result<ExchangerState, EvaluateError> {
        self::core::evaluate(
            &self.tables,
            point,
            self.config.laminar,
            &self.config.solver,
        )
    }

    /// Evaluates `base` at every value of `axis`, in sweep order.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError`] if the axis is malformed, or on the first failed
    /// point under [`FailurePolicy::Abort`].
    pub fn sweep(
        &self,
        base: &OperatingPoint,
        axis: &SweepAxis,
        config: &SweepConfig,
    ) -> Result<SweepResult, SweepError> {
        sweep::run(self, base, axis, config)
    }
}

impl<T: PropertyTable> Model for ConcentricTubeHx<T> {
    type Input = OperatingPoint;
    type Output = ExchangerState;
    type Error = EvaluateError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.evaluate(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{ratio::ratio, thermodynamic_temperature::degree_celsius};

    use crate::support::properties::FluidProperties;

    use super::core::test_support::reference_point;

    #[test]
    fn model_call_matches_evaluate() {
        let hx = ConcentricTubeHx::standard(ModelConfig::default());
        let point = reference_point();

        let called = hx.call(&point).unwrap();
        let evaluated = hx.evaluate(&point).unwrap();
        assert_eq!(called, evaluated);
    }

    #[test]
    fn strict_lookup_is_the_default() {
        let hx = ConcentricTubeHx::standard(ModelConfig::default());
        assert_eq!(hx.tables().mode(), LookupMode::Strict);
    }

    #[test]
    fn legacy_passes_stay_close_to_converged() {
        let point = reference_point();
        let converged = ConcentricTubeHx::standard(ModelConfig::default())
            .evaluate(&point)
            .unwrap();
        let legacy = ConcentricTubeHx::standard(ModelConfig {
            solver: SolverConfig {
                strategy: IterationStrategy::legacy(),
                ..SolverConfig::default()
            },
            ..ModelConfig::default()
        })
        .evaluate(&point)
        .unwrap();

        assert_eq!(legacy.iters, 5);
        assert!(
            (legacy.cold_out.get::<degree_celsius>() - converged.cold_out.get::<degree_celsius>())
                .abs()
                < 1e-6
        );
    }

    #[test]
    fn synthetic_tables_are_injected() {
        use uom::si::{
            dynamic_viscosity::pascal_second,
            f64::{DynamicViscosity, MassDensity, SpecificHeatCapacity, ThermalConductivity},
            mass_density::kilogram_per_cubic_meter,
            specific_heat_capacity::joule_per_kilogram_kelvin,
            thermal_conductivity::watt_per_meter_kelvin,
        };

        let brine = FluidProperties::new(
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(3500.0),
            MassDensity::new::<kilogram_per_cubic_meter>(1200.0),
            DynamicViscosity::new::<pascal_second>(2.0e-3),
            ThermalConductivity::new::<watt_per_meter_kelvin>(0.5),
        )
        .unwrap();
        let tables = Catalog::standard().with_fluid("brine", brine);

        let mut point = reference_point();
        point.cold.fluid = "Brine".into();

        let state = ConcentricTubeHx::new(tables, ModelConfig::default())
            .evaluate(&point)
            .unwrap();
        assert!(state.efficiency.get::<ratio>() > 0.0);
        assert_eq!(state.cold.properties, brine);
    }
}
