use uom::si::f64::{
    Area, HeatTransfer, Length, MassRate, Power, TemperatureInterval, ThermodynamicTemperature,
};

use crate::support::{hx::Efficiency, properties::FluidProperties};

use super::{
    convection::{LaminarCorrelation, convection_coefficient},
    flow::{Flow, FlowError, FlowRegime, PrandtlNumber, ReynoldsNumber, prandtl, reynolds},
    geometry::Exchanger,
};

/// A characterized stream: flow rate, dimensionless groups, and film coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowState {
    pub fluid: String,
    pub properties: FluidProperties,
    pub mass_rate: MassRate,
    pub diameter: Length,
    pub reynolds: ReynoldsNumber,
    pub prandtl: PrandtlNumber,
    pub h: HeatTransfer,
}

impl FlowState {
    /// Characterizes a stream through a passage of `diameter`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] if the flow or passage is not physical.
    pub fn characterize(
        fluid: &str,
        properties: FluidProperties,
        flow: Flow,
        diameter: Length,
        laminar: LaminarCorrelation,
    ) -> Result<Self, FlowError> {
        let mass_rate = flow.mass_rate(&properties);
        let re = reynolds(&properties, mass_rate, diameter)?;
        let pr = prandtl(&properties)?;
        let h = convection_coefficient(properties.conductivity(), diameter, re, pr, laminar);

        Ok(Self {
            fluid: fluid.to_owned(),
            properties,
            mass_rate,
            diameter,
            reynolds: re,
            prandtl: pr,
            h,
        })
    }

    #[must_use]
    pub fn regime(&self) -> FlowRegime {
        self.reynolds.regime()
    }
}

/// The solved state of the exchanger at one operating point.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangerState {
    pub exchanger: Exchanger,
    pub cold: FlowState,
    pub hot: FlowState,
    pub cold_in: ThermodynamicTemperature,
    pub cold_out: ThermodynamicTemperature,
    pub hot_in: ThermodynamicTemperature,
    /// Assumed, not solved: the hot inlet less the configured drop.
    pub hot_out: ThermodynamicTemperature,
    pub q: Power,
    /// Overall coefficient referenced to the pipe's outer surface.
    pub u: HeatTransfer,
    pub area: Area,
    pub lmtd: TemperatureInterval,
    pub efficiency: Efficiency,
    /// Solver iterations used.
    pub iters: usize,
}
