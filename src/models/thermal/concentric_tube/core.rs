//! Steady-state evaluation of a counter-flow concentric-tube exchanger.
//!
//! The pipeline for one operating point runs strictly upward:
//! property lookup, flow characterization and convection on each side,
//! the resistance network for `U`, then the LMTD heat balance.

mod convection;
mod error;
mod flow;
mod geometry;
mod operating_point;
mod outcome;
mod resistance;
mod solve;

#[cfg(test)]
pub(crate) mod test_support;

pub use convection::{LaminarCorrelation, convection_coefficient, nusselt};
pub use error::EvaluateError;
pub use flow::{
    Flow, FlowError, FlowRegime, PrandtlNumber, ReynoldsNumber, TRANSITION_REYNOLDS, prandtl,
    reynolds,
};
pub use geometry::{AnnulusGeometry, Exchanger, GeometryError, PipeGeometry};
pub use operating_point::{OperatingPoint, Side, StreamSpec};
pub use outcome::{ExchangerState, FlowState};
pub use resistance::{SeriesResistance, overall_u};
pub use solve::{HeatBalance, IterationStrategy, Pass, Solution, SolveError, SolverConfig, solve};

use tracing::debug;
use uom::si::{
    heat_transfer::watt_per_square_meter_kelvin, power::watt, ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::{
    hx::{CapacitanceRate, Efficiency},
    properties::PropertyTable,
};

/// Evaluates the exchanger at one operating point.
///
/// The cold stream flows through the pipe bore; the hot stream through the
/// annulus, characterized by its hydraulic diameter.
///
/// # Errors
///
/// Returns [`EvaluateError`] if a name is unknown, a stream is not physical,
/// or the heat balance fails.
pub fn evaluate(
    tables: &impl PropertyTable,
    point: &OperatingPoint,
    laminar: LaminarCorrelation,
    solver: &SolverConfig,
) -> Result<ExchangerState, EvaluateError> {
    let exchanger = &point.exchanger;
    let pipe = exchanger.pipe();

    let wall_conductivity = tables.material_conductivity(exchanger.material())?;

    let cold = FlowState::characterize(
        &point.cold.fluid,
        tables.fluid(&point.cold.fluid)?,
        point.cold.flow,
        pipe.inner_diameter(),
        laminar,
    )
    .map_err(|source| EvaluateError::Flow {
        side: Side::Cold,
        source,
    })?;

    let hot = FlowState::characterize(
        &point.hot.fluid,
        tables.fluid(&point.hot.fluid)?,
        point.hot.flow,
        exchanger.annulus().hydraulic_diameter(),
        laminar,
    )
    .map_err(|source| EvaluateError::Flow {
        side: Side::Hot,
        source,
    })?;

    let u = overall_u(pipe, wall_conductivity, cold.h, hot.h);
    let area = pipe.outer_area();

    let cold_capacitance = CapacitanceRate::from_mass_rate_and_specific_heat(
        cold.mass_rate,
        cold.properties.specific_heat(),
    )
    .map_err(|_| EvaluateError::Flow {
        side: Side::Cold,
        source: FlowError::NonPositiveFlow {
            mass_rate: cold.mass_rate,
        },
    })?;

    let balance = HeatBalance::new(
        point.cold.inlet,
        point.hot.inlet,
        solver.hot_side_drop,
        cold_capacitance,
        u * area,
    );
    let solution = solve(&balance, solver)?;

    let efficiency =
        Efficiency::from_duty(solution.q, balance.max_duty()).map_err(EvaluateError::Efficiency)?;

    debug!(
        cold_fluid = %cold.fluid,
        hot_fluid = %hot.fluid,
        re_cold = cold.reynolds.get::<ratio>(),
        re_hot = hot.reynolds.get::<ratio>(),
        u = u.get::<watt_per_square_meter_kelvin>(),
        cold_out_c = solution.cold_out.get::<degree_celsius>(),
        q_w = solution.q.get::<watt>(),
        iters = solution.iters,
        "evaluated operating point"
    );

    Ok(ExchangerState {
        exchanger: exchanger.clone(),
        cold,
        hot,
        cold_in: balance.cold_in,
        cold_out: solution.cold_out,
        hot_in: balance.hot_in,
        hot_out: balance.hot_out,
        q: solution.q,
        u,
        area,
        lmtd: solution.lmtd,
        efficiency,
        iters: solution.iters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use uom::si::{
        area::square_meter,
        f64::{Length, TemperatureInterval},
        length::meter,
        temperature_interval::kelvin as delta_kelvin,
        thermal_conductance::watt_per_kelvin, thermodynamic_temperature::kelvin,
    };

    use crate::support::{
        properties::{Catalog, LookupMode, PropertyError, WithFallback},
        units::TemperatureDifference,
    };

    use super::test_support::{reference_point, water_stream};

    #[test]
    fn reference_scenario() {
        let state = evaluate(
            &Catalog::standard(),
            &reference_point(),
            LaminarCorrelation::default(),
            &SolverConfig::default(),
        )
        .unwrap();

        let cold_out = state.cold_out.get::<degree_celsius>();
        assert!(cold_out.is_finite());
        assert!(cold_out > 20.0 && cold_out < 80.0);
        assert!(state.q.get::<watt>() > 0.0);

        let efficiency = state.efficiency.get::<ratio>();
        assert!(efficiency > 0.0 && efficiency < 1.0);

        // Laminar bore, turbulent annulus.
        assert_eq!(state.cold.regime(), FlowRegime::Laminar);
        assert_eq!(state.hot.regime(), FlowRegime::Turbulent);
        assert_relative_eq!(state.cold.reynolds.get::<ratio>(), 2357.9, max_relative = 1e-3);
        assert_relative_eq!(state.hot.reynolds.get::<ratio>(), 10610.3, max_relative = 1e-3);

        assert_relative_eq!(
            state.area.get::<square_meter>(),
            std::f64::consts::PI * 0.1 * 2.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(cold_out, 21.057, epsilon = 1e-3);
    }

    #[test]
    fn energy_balance_closes() {
        let state = evaluate(
            &Catalog::standard(),
            &reference_point(),
            LaminarCorrelation::default(),
            &SolverConfig::default(),
        )
        .unwrap();

        let ua = state.u * state.area;
        assert_relative_eq!(
            state.q.get::<watt>(),
            (ua * state.lmtd).get::<watt>(),
            max_relative = 1e-9
        );

        let c_cold = state.cold.mass_rate * state.cold.properties.specific_heat();
        assert_relative_eq!(
            state.q.get::<watt>(),
            (c_cold * state.cold_out.minus(state.cold_in)).get::<watt>(),
            max_relative = 1e-9
        );
        assert!(ua.get::<watt_per_kelvin>() > 0.0);
    }

    #[test]
    fn hot_outlet_is_the_configured_drop() {
        let solver = SolverConfig {
            hot_side_drop: TemperatureInterval::new::<delta_kelvin>(15.0),
            ..SolverConfig::default()
        };
        let state = evaluate(
            &Catalog::standard(),
            &reference_point(),
            LaminarCorrelation::default(),
            &solver,
        )
        .unwrap();

        assert_relative_eq!(
            state.hot_in.minus(state.hot_out).get::<delta_kelvin>(),
            15.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn unknown_fluid_is_an_error_by_default() {
        let mut point = reference_point();
        point.hot.fluid = "mercury".into();

        let tables = WithFallback::new(Catalog::standard(), LookupMode::default());
        assert!(matches!(
            evaluate(
                &tables,
                &point,
                LaminarCorrelation::default(),
                &SolverConfig::default()
            ),
            Err(EvaluateError::Property(PropertyError::UnknownFluid { .. }))
        ));

        let tables = WithFallback::new(Catalog::standard(), LookupMode::FallbackDefaults);
        let state = evaluate(
            &tables,
            &point,
            LaminarCorrelation::default(),
            &SolverConfig::default(),
        )
        .unwrap();
        assert_eq!(state.hot.fluid, "mercury");
    }

    #[test]
    fn unknown_material_is_never_defaulted() {
        let mut point = reference_point();
        point.exchanger = Exchanger::new(
            *point.exchanger.pipe(),
            point.exchanger.gap(),
            point.exchanger.annulus().wall_thickness(),
            "unobtainium",
        )
        .unwrap();

        let tables = WithFallback::new(Catalog::standard(), LookupMode::FallbackDefaults);
        assert!(matches!(
            evaluate(
                &tables,
                &point,
                LaminarCorrelation::default(),
                &SolverConfig::default()
            ),
            Err(EvaluateError::Property(PropertyError::UnknownMaterial { .. }))
        ));
    }

    #[test]
    fn zero_flow_is_a_flow_error() {
        let mut point = reference_point();
        point.cold = water_stream(0.0, 20.0);

        assert!(matches!(
            evaluate(
                &Catalog::standard(),
                &point,
                LaminarCorrelation::default(),
                &SolverConfig::default()
            ),
            Err(EvaluateError::Flow {
                side: Side::Cold,
                source: FlowError::NonPositiveFlow { .. }
            })
        ));
    }

    #[test]
    fn cold_inlet_above_hot_outlet_is_rejected() {
        let mut point = reference_point();
        point.cold = water_stream(10.0, 75.0);

        assert!(matches!(
            evaluate(
                &Catalog::standard(),
                &point,
                LaminarCorrelation::default(),
                &SolverConfig::default()
            ),
            Err(EvaluateError::Solve(SolveError::TemperatureOrdering(_)))
        ));
    }

    #[test]
    fn heat_flux_correlation_raises_laminar_duty() {
        let tables = Catalog::standard();
        let point = reference_point();
        let wall = evaluate(
            &tables,
            &point,
            LaminarCorrelation::ConstantWallTemperature,
            &SolverConfig::default(),
        )
        .unwrap();
        let flux = evaluate(
            &tables,
            &point,
            LaminarCorrelation::ConstantHeatFlux,
            &SolverConfig::default(),
        )
        .unwrap();

        assert!(flux.cold.h > wall.cold.h);
        assert!(flux.q > wall.q);
    }

    #[test]
    fn long_pipe_at_low_flow_converges() {
        let mut point = reference_point();
        point.exchanger = point
            .exchanger
            .with_length(Length::new::<meter>(20.0))
            .unwrap();
        point.cold = water_stream(1.0, 20.0);

        let tables = Catalog::standard();
        let state = evaluate(
            &tables,
            &point,
            LaminarCorrelation::default(),
            &SolverConfig::default(),
        )
        .unwrap();

        assert_relative_eq!(state.cold_out.get::<degree_celsius>(), 69.39, epsilon = 0.01);
        assert_relative_eq!(state.efficiency.get::<ratio>(), 0.823, epsilon = 1e-3);

        let bisection = evaluate(
            &tables,
            &point,
            LaminarCorrelation::default(),
            &SolverConfig {
                strategy: IterationStrategy::bisection(),
                ..SolverConfig::default()
            },
        )
        .unwrap();
        assert_relative_eq!(
            state.cold_out.get::<kelvin>(),
            bisection.cold_out.get::<kelvin>(),
            epsilon = 1e-6
        );

        // Plain passes overshoot the hot inlet in this regime.
        let legacy = evaluate(
            &tables,
            &point,
            LaminarCorrelation::default(),
            &SolverConfig {
                strategy: IterationStrategy::legacy(),
                ..SolverConfig::default()
            },
        );
        assert!(matches!(
            legacy,
            Err(EvaluateError::Solve(SolveError::Diverged { .. }))
        ));
    }

    proptest! {
        #[test]
        fn efficiency_stays_in_unit_interval(
            cold_lpm in 1.0_f64..100.0,
            hot_lpm in 1.0_f64..100.0,
            cold_in in 0.0_f64..40.0,
            lift in 15.0_f64..100.0,
            length_m in 0.5_f64..40.0,
        ) {
            let mut point = reference_point();
            point.exchanger = point.exchanger.with_length(Length::new::<meter>(length_m)).unwrap();
            point.cold = water_stream(cold_lpm, cold_in);
            point.hot = water_stream(hot_lpm, cold_in + lift);

            let state = evaluate(
                &Catalog::standard(),
                &point,
                LaminarCorrelation::default(),
                &SolverConfig::default(),
            ).unwrap();

            let efficiency = state.efficiency.get::<ratio>();
            prop_assert!((0.0..=1.0).contains(&efficiency));
            prop_assert!(state.cold_out > state.cold_in);
            prop_assert!(state.cold_out < state.hot_in);
        }

        #[test]
        fn evaluation_is_deterministic(cold_lpm in 1.0_f64..100.0) {
            let mut point = reference_point();
            point.cold = water_stream(cold_lpm, 20.0);
            let tables = Catalog::standard();

            let first = evaluate(&tables, &point, LaminarCorrelation::default(), &SolverConfig::default()).unwrap();
            let second = evaluate(&tables, &point, LaminarCorrelation::default(), &SolverConfig::default()).unwrap();
            prop_assert_eq!(
                first.cold_out.get::<kelvin>().to_bits(),
                second.cold_out.get::<kelvin>().to_bits()
            );
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn volumetric_flow_matches_mass_flow() {
        let mut point = reference_point();
        let by_volume = evaluate(
            &Catalog::standard(),
            &point,
            LaminarCorrelation::default(),
            &SolverConfig::default(),
        )
        .unwrap();

        point.cold.flow = Flow::Mass(by_volume.cold.mass_rate);
        let by_mass = evaluate(
            &Catalog::standard(),
            &point,
            LaminarCorrelation::default(),
            &SolverConfig::default(),
        )
        .unwrap();

        assert_eq!(by_volume.cold_out, by_mass.cold_out);
    }
}
