use serde::{Deserialize, Serialize};
use twine_solvers::equation::bisection;
use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin as delta_kelvin};

use crate::support::constraint::{NonNegative, StrictlyPositive};

use super::SolveError;

/// How the outlet-temperature fixed point is iterated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IterationStrategy {
    /// Picard iteration until successive guesses differ by less than `tolerance`.
    ///
    /// Steps that would leave the bracket between the current bounds on the
    /// fixed point, or that fail to halve the change, fall back to bisecting
    /// that bracket. Fails with [`SolveError::MaxIters`] after `max_iters`
    /// passes.
    Tolerance {
        tolerance: TemperatureInterval,
        max_iters: usize,
    },

    /// Exactly `passes` Picard passes with no stopping criterion.
    ///
    /// Fails with [`SolveError::Diverged`] if a pass overshoots the hot inlet.
    ///
    /// Reproduces legacy outputs, which always ran five passes.
    FixedPasses { passes: usize },

    /// Bisection on `T_cold_out` between the two inlet temperatures.
    Bisection {
        temp_tol: TemperatureInterval,
        residual_tol: TemperatureInterval,
        max_iters: usize,
    },
}

impl IterationStrategy {
    /// The legacy five-pass iteration.
    #[must_use]
    pub fn legacy() -> Self {
        Self::FixedPasses { passes: 5 }
    }

    /// Bisection with tight defaults.
    #[must_use]
    pub fn bisection() -> Self {
        Self::Bisection {
            temp_tol: TemperatureInterval::new::<delta_kelvin>(1e-10),
            residual_tol: TemperatureInterval::new::<delta_kelvin>(1e-10),
            max_iters: 200,
        }
    }
}

impl Default for IterationStrategy {
    fn default() -> Self {
        Self::Tolerance {
            tolerance: TemperatureInterval::new::<delta_kelvin>(1e-9),
            max_iters: 100,
        }
    }
}

/// Configuration for the heat-balance solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub strategy: IterationStrategy,

    /// Assumed temperature drop of the hot stream, `T_hot_in − T_hot_out`.
    pub hot_side_drop: TemperatureInterval,

    /// Initial guess for the cold outlet, above the cold inlet.
    pub seed_offset: TemperatureInterval,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: IterationStrategy::default(),
            hot_side_drop: TemperatureInterval::new::<delta_kelvin>(10.0),
            seed_offset: TemperatureInterval::new::<delta_kelvin>(10.0),
        }
    }
}

impl SolverConfig {
    /// Checks the configuration before any iteration runs.
    pub(super) fn validate(&self) -> Result<(), SolveError> {
        let invalid = |reason| Err(SolveError::InvalidConfig { reason });

        if NonNegative::new(self.hot_side_drop).is_err() {
            return invalid("hot side drop must be a non-negative temperature difference");
        }
        if StrictlyPositive::new(self.seed_offset).is_err()
            || !self.seed_offset.get::<delta_kelvin>().is_finite()
        {
            return invalid("seed offset must be finite and strictly positive");
        }

        match self.strategy {
            IterationStrategy::Tolerance {
                tolerance,
                max_iters,
            } => {
                let tolerance = tolerance.get::<delta_kelvin>();
                if tolerance.is_nan() || tolerance <= 0.0 {
                    return invalid("tolerance must be strictly positive");
                }
                if max_iters == 0 {
                    return invalid("max_iters must be at least 1");
                }
            }
            IterationStrategy::FixedPasses { passes } => {
                if passes == 0 {
                    return invalid("passes must be at least 1");
                }
            }
            IterationStrategy::Bisection { max_iters, .. } => {
                if max_iters == 0 {
                    return invalid("max_iters must be at least 1");
                }
            }
        }

        Ok(())
    }

    /// Bisection settings, if that strategy is selected.
    pub(super) fn bisection(&self) -> Option<bisection::Config> {
        match self.strategy {
            IterationStrategy::Bisection {
                temp_tol,
                residual_tol,
                max_iters,
            } => Some(bisection::Config {
                max_iters,
                x_abs_tol: temp_tol.get::<delta_kelvin>(),
                x_rel_tol: 0.0,
                residual_tol: residual_tol.get::<delta_kelvin>(),
            }),
            _ => None,
        }
    }
}
