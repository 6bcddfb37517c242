use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::{TemperatureInterval, ThermodynamicTemperature};

use crate::support::hx::LmtdError;

/// Errors from the heat-balance solve.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The inlets or the seed leave the hot stream no warmer than the cold
    /// stream at one end.
    #[error("invalid temperature ordering")]
    TemperatureOrdering(#[from] LmtdError),

    /// The tolerance was not met within the iteration cap.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Change in the cold outlet guess on the last pass.
        residual: TemperatureInterval,

        /// Iteration count performed by the solver.
        iters: usize,
    },

    /// A pass heated the cold stream to the hot inlet or beyond.
    #[error("solver diverged: cold outlet {cold_out:?} reached the hot inlet after {iters} passes")]
    Diverged {
        cold_out: ThermodynamicTemperature,
        iters: usize,
    },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// A solver setting is out of range.
    #[error("invalid solver config: {reason}")]
    InvalidConfig { reason: &'static str },
}
