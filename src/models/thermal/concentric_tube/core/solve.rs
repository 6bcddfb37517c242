//! LMTD heat-balance solver.
//!
//! Finds the cold outlet temperature at which the LMTD duty `UA · LMTD`
//! equals the sensible heat picked up by the cold stream, `C_cold · ΔT_cold`.
//! The hot outlet is not solved for: it is assumed to sit a fixed
//! [`SolverConfig::hot_side_drop`] below the hot inlet.
//!
//! Each pass maps a guessed cold outlet to a new one:
//!
//! 1. `ΔT1 = T_hot_in − guess`, `ΔT2 = T_hot_out − T_cold_in`
//! 2. `Q = UA · LMTD(ΔT1, ΔT2)`
//! 3. `guess ← T_cold_in + Q / C_cold`
//!
//! The pass map falls as the guess rises, so a unique fixed point lies
//! between the two inlet temperatures whenever `ΔT2 > 0`. When `UA / C_cold`
//! is large, plain repetition overshoots the hot inlet; the default strategy
//! guards against that (see [`IterationStrategy::Tolerance`]).
//!
//! How passes are repeated is selected by [`IterationStrategy`].

mod config;
mod error;
mod problem;

pub use config::{IterationStrategy, SolverConfig};
pub use error::SolveError;

use tracing::debug;
use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Power, TemperatureInterval, ThermalConductance, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    hx::{CapacitanceRate, CounterFlowEnds, LmtdError},
    units::TemperatureDifference,
};

use problem::{FixedPointProblem, PassModel};

/// Fixed inputs to the heat balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatBalance {
    pub cold_in: ThermodynamicTemperature,
    pub hot_in: ThermodynamicTemperature,
    pub hot_out: ThermodynamicTemperature,
    pub cold_capacitance: CapacitanceRate,
    pub ua: ThermalConductance,
}

/// The result of one pass from a guessed cold outlet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pass {
    pub lmtd: TemperatureInterval,
    pub q: Power,
    pub cold_out: ThermodynamicTemperature,
}

/// A solved heat balance.
///
/// `q = UA · lmtd` and `cold_out = cold_in + q / C_cold` hold exactly; `lmtd`
/// is evaluated at the previous guess, which agrees with `cold_out` to within
/// the strategy's tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub lmtd: TemperatureInterval,
    pub q: Power,
    pub cold_out: ThermodynamicTemperature,
    pub iters: usize,
}

impl HeatBalance {
    /// Creates a balance with the hot outlet a fixed drop below the hot inlet.
    #[must_use]
    pub fn new(
        cold_in: ThermodynamicTemperature,
        hot_in: ThermodynamicTemperature,
        hot_side_drop: TemperatureInterval,
        cold_capacitance: CapacitanceRate,
        ua: ThermalConductance,
    ) -> Self {
        Self {
            cold_in,
            hot_in,
            hot_out: hot_in - hot_side_drop,
            cold_capacitance,
            ua,
        }
    }

    /// Terminal temperatures for a given cold outlet.
    #[must_use]
    pub fn ends(&self, cold_out: ThermodynamicTemperature) -> CounterFlowEnds {
        CounterFlowEnds {
            hot_in: self.hot_in,
            hot_out: self.hot_out,
            cold_in: self.cold_in,
            cold_out,
        }
    }

    /// Runs one pass from `guess`.
    ///
    /// # Errors
    ///
    /// Returns [`LmtdError`] if either terminal difference is not positive.
    pub fn pass(&self, guess: ThermodynamicTemperature) -> Result<Pass, LmtdError> {
        let lmtd = self.ends(guess).lmtd()?;
        let q = self.ua * lmtd;
        let cold_out = self.cold_in + q / *self.cold_capacitance;
        Ok(Pass { lmtd, q, cold_out })
    }

    /// Sensible-heat duty of the cold stream reaching `cold_out`.
    #[must_use]
    pub fn cold_duty(&self, cold_out: ThermodynamicTemperature) -> Power {
        *self.cold_capacitance * cold_out.minus(self.cold_in)
    }

    /// The largest duty the inlet temperatures allow for the cold stream.
    #[must_use]
    pub fn max_duty(&self) -> Power {
        self.cold_duty(self.hot_in)
    }
}

/// Solves the heat balance.
///
/// # Errors
///
/// Returns [`SolveError`] if the config is invalid, the inlet temperatures or
/// the seed leave the streams crossed, or the strategy does not converge.
pub fn solve(balance: &HeatBalance, config: &SolverConfig) -> Result<Solution, SolveError> {
    config.validate()?;
    check_inlets(balance)?;

    let seed = balance.cold_in + config.seed_offset;

    let solution = match config.strategy {
        IterationStrategy::Tolerance {
            tolerance,
            max_iters,
        } => converge(balance, seed, tolerance, max_iters)?,
        IterationStrategy::FixedPasses { passes } => fixed_passes(balance, seed, passes)?,
        IterationStrategy::Bisection { .. } => bisect(balance, config)?,
    };

    check_outlet(balance, solution.cold_out, solution.iters)?;

    Ok(solution)
}

/// Every guess shares `ΔT2`, so it is checked once before iterating.
fn check_inlets(balance: &HeatBalance) -> Result<(), SolveError> {
    let dt2 = balance.hot_out.minus(balance.cold_in);
    if dt2.get::<delta_kelvin>().is_nan() || dt2.get::<delta_kelvin>() <= 0.0 {
        return Err(LmtdError::TemperatureOrdering {
            delta_t1: balance.hot_in.minus(balance.cold_in),
            delta_t2: dt2,
        }
        .into());
    }
    Ok(())
}

/// A pass that heats the cold stream to the hot inlet or beyond has left the
/// physical range; the inputs themselves were already checked.
fn check_outlet(
    balance: &HeatBalance,
    cold_out: ThermodynamicTemperature,
    iters: usize,
) -> Result<(), SolveError> {
    if cold_out >= balance.hot_in || cold_out.get::<kelvin>().is_nan() {
        return Err(SolveError::Diverged { cold_out, iters });
    }
    Ok(())
}

/// Safeguarded Picard iteration.
///
/// The pass map falls as the guess rises, so each pass tells which side of
/// the fixed point the guess is on and narrows a bracket that starts at the
/// two inlets. A pass result is taken as the next guess only if it stays
/// inside the bracket and at least halves the previous change; otherwise the
/// bracket midpoint is used.
fn converge(
    balance: &HeatBalance,
    seed: ThermodynamicTemperature,
    tolerance: TemperatureInterval,
    max_iters: usize,
) -> Result<Solution, SolveError> {
    let mut low = balance.cold_in;
    let mut high = balance.hot_in;
    let mut guess = seed;
    let mut last_change: Option<TemperatureInterval> = None;
    let mut change = TemperatureInterval::new::<delta_kelvin>(f64::INFINITY);

    for iter in 1..=max_iters {
        // Only the seed can fail here: later guesses stay inside the bracket.
        let pass = balance.pass(guess)?;
        change = pass.cold_out.minus(guess).abs();

        if change < tolerance {
            debug!(
                iter,
                cold_out_k = pass.cold_out.get::<kelvin>(),
                "heat balance converged"
            );
            return Ok(Solution {
                lmtd: pass.lmtd,
                q: pass.q,
                cold_out: pass.cold_out,
                iters: iter,
            });
        }

        if pass.cold_out > guess {
            low = guess;
        } else {
            high = guess;
        }

        let inside = pass.cold_out > low && pass.cold_out < high;
        let contracting = last_change.is_none_or(|last| change <= last * 0.5);
        let next = if inside && contracting {
            pass.cold_out
        } else {
            low + high.minus(low) * 0.5
        };

        debug!(
            iter,
            guess_k = guess.get::<kelvin>(),
            cold_out_k = pass.cold_out.get::<kelvin>(),
            change_k = change.get::<delta_kelvin>(),
            bisected = next != pass.cold_out,
            "heat balance pass"
        );

        // The bracket can no longer be split in `f64`: the fixed point sits
        // closer to the hot inlet than the tolerance can resolve.
        if next <= low || next >= high {
            return Err(SolveError::MaxIters {
                residual: change,
                iters: iter,
            });
        }

        last_change = Some(change);
        guess = next;
    }

    Err(SolveError::MaxIters {
        residual: change,
        iters: max_iters,
    })
}

/// Plain Picard iteration for a fixed number of passes.
fn fixed_passes(
    balance: &HeatBalance,
    seed: ThermodynamicTemperature,
    passes: usize,
) -> Result<Solution, SolveError> {
    let mut guess = seed;
    let mut last = None;

    for iter in 1..=passes {
        let pass = balance.pass(guess)?;
        check_outlet(balance, pass.cold_out, iter)?;

        debug!(
            iter,
            guess_k = guess.get::<kelvin>(),
            cold_out_k = pass.cold_out.get::<kelvin>(),
            change_k = pass.cold_out.minus(guess).abs().get::<delta_kelvin>(),
            "heat balance pass"
        );

        guess = pass.cold_out;
        last = Some(Solution {
            lmtd: pass.lmtd,
            q: pass.q,
            cold_out: pass.cold_out,
            iters: iter,
        });
    }

    last.ok_or(SolveError::InvalidConfig {
        reason: "passes must be at least 1",
    })
}

fn bisect(balance: &HeatBalance, config: &SolverConfig) -> Result<Solution, SolveError> {
    let Some(bisection_config) = config.bisection() else {
        return Err(SolveError::InvalidConfig {
            reason: "bisection settings missing",
        });
    };

    let model = PassModel::new(balance);

    let solution = bisection::solve(
        &model,
        &FixedPointProblem,
        [
            balance.cold_in.get::<kelvin>(),
            balance.hot_in.get::<kelvin>(),
        ],
        &bisection_config,
        |event: &bisection::Event<'_, _, _>| {
            // Guesses at or above the hot inlet have no LMTD. The residual
            // there is negative, so steer the bracket back down.
            if event.result().is_err() {
                return Some(bisection::Action::assume_negative());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(SolveError::MaxIters {
            residual: TemperatureInterval::new::<delta_kelvin>(solution.residual),
            iters: solution.iters,
        });
    }

    debug!(
        iters = solution.iters,
        cold_out_k = solution.snapshot.output.cold_out.get::<kelvin>(),
        "heat balance bisection converged"
    );

    let pass = solution.snapshot.output;
    Ok(Solution {
        lmtd: pass.lmtd,
        q: pass.q,
        cold_out: pass.cold_out,
        iters: solution.iters,
    })
}
