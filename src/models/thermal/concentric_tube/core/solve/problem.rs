//! Problem formulation for bisection on the cold outlet temperature.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::support::hx::LmtdError;

use super::{HeatBalance, Pass};

/// Exposes one heat-balance pass as a model of the guessed cold outlet.
pub(super) struct PassModel<'a> {
    balance: &'a HeatBalance,
}

impl<'a> PassModel<'a> {
    pub(super) fn new(balance: &'a HeatBalance) -> Self {
        Self { balance }
    }
}

impl Model for PassModel<'_> {
    type Input = ThermodynamicTemperature;
    type Output = Pass;
    type Error = LmtdError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.balance.pass(*input)
    }
}

/// Fixed-point residual, `T_cold_out(guess) − guess`.
pub(super) struct FixedPointProblem;

impl EquationProblem<1> for FixedPointProblem {
    type Input = ThermodynamicTemperature;
    type Output = Pass;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermodynamicTemperature::new::<kelvin>(x[0]))
    }

    fn residuals(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.cold_out.get::<kelvin>() - input.get::<kelvin>()])
    }
}
