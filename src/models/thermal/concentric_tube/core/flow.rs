//! Flow characterization: Reynolds and Prandtl numbers and flow regime.

use std::{f64::consts::PI, fmt, ops::Deref};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{Length, MassRate, Ratio, VolumeRate},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::{
    constraint::{Constrained, ConstraintError, StrictlyPositive},
    properties::FluidProperties,
};

/// Reynolds number at and above which flow is treated as turbulent.
///
/// A simplified engineering threshold, not the classical 2300–4000 band.
pub const TRANSITION_REYNOLDS: f64 = 5000.0;

/// Errors from a non-physical flow state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    /// The mass flow rate is zero, negative, or `NaN`.
    #[error("mass flow rate must be strictly positive: {mass_rate:?}")]
    NonPositiveFlow { mass_rate: MassRate },

    /// The characteristic diameter is zero, negative, or `NaN`.
    #[error("characteristic diameter must be strictly positive: {diameter:?}")]
    NonPositiveDiameter { diameter: Length },

    /// A dimensionless group is not strictly positive.
    #[error("{quantity} is undefined for this flow")]
    Undefined {
        quantity: &'static str,
        #[source]
        source: ConstraintError,
    },
}

/// Laminar or turbulent flow.
///
/// Serialized and displayed as `Laminar` or `Turbulent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowRegime {
    Laminar,
    Turbulent,
}

impl fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Laminar => write!(f, "Laminar"),
            Self::Turbulent => write!(f, "Turbulent"),
        }
    }
}

/// A strictly positive Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ReynoldsNumber(Constrained<Ratio, StrictlyPositive>);

impl ReynoldsNumber {
    /// # Errors
    ///
    /// Returns [`FlowError::Undefined`] unless `value` is strictly positive.
    pub fn new(value: f64) -> Result<Self, FlowError> {
        StrictlyPositive::new(Ratio::new::<ratio>(value))
            .map(Self)
            .map_err(|source| FlowError::Undefined {
                quantity: "Reynolds number",
                source,
            })
    }

    /// Classifies the regime: laminar strictly below [`TRANSITION_REYNOLDS`].
    #[must_use]
    pub fn regime(&self) -> FlowRegime {
        if self.get::<ratio>() < TRANSITION_REYNOLDS {
            FlowRegime::Laminar
        } else {
            FlowRegime::Turbulent
        }
    }
}

impl Deref for ReynoldsNumber {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// A strictly positive Prandtl number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PrandtlNumber(Constrained<Ratio, StrictlyPositive>);

impl PrandtlNumber {
    /// # Errors
    ///
    /// Returns [`FlowError::Undefined`] unless `value` is strictly positive.
    pub fn new(value: f64) -> Result<Self, FlowError> {
        StrictlyPositive::new(Ratio::new::<ratio>(value))
            .map(Self)
            .map_err(|source| FlowError::Undefined {
                quantity: "Prandtl number",
                source,
            })
    }
}

impl Deref for PrandtlNumber {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Reynolds number of a fluid through a circular passage of `diameter`.
///
/// `A = π (d/2)²`, `v = m_dot / (ρ A)`, `Re = ρ v d / μ`.
///
/// # Errors
///
/// Returns [`FlowError`] if the flow rate or diameter is not strictly positive.
pub fn reynolds(
    fluid: &FluidProperties,
    mass_rate: MassRate,
    diameter: Length,
) -> Result<ReynoldsNumber, FlowError> {
    if StrictlyPositive::new(mass_rate).is_err() {
        return Err(FlowError::NonPositiveFlow { mass_rate });
    }
    if StrictlyPositive::new(diameter).is_err() {
        return Err(FlowError::NonPositiveDiameter { diameter });
    }

    let rho = fluid.density().get::<kilogram_per_cubic_meter>();
    let mu = fluid.viscosity().get::<pascal_second>();
    let d = diameter.get::<meter>();

    let area = PI * (d / 2.0).powi(2);
    let velocity = mass_rate.get::<kilogram_per_second>() / (rho * area);

    ReynoldsNumber::new(rho * velocity * d / mu)
}

/// Prandtl number of a fluid, `Pr = μ c_p / k`.
///
/// # Errors
///
/// Returns [`FlowError::Undefined`] if the result is not strictly positive.
pub fn prandtl(fluid: &FluidProperties) -> Result<PrandtlNumber, FlowError> {
    let mu = fluid.viscosity().get::<pascal_second>();
    let cp = fluid.specific_heat().get::<joule_per_kilogram_kelvin>();
    let k = fluid.conductivity().get::<watt_per_meter_kelvin>();

    PrandtlNumber::new(mu * cp / k)
}

/// How a stream's flow rate is specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    /// Volumetric flow, converted with the fluid density.
    Volumetric(VolumeRate),
    /// Mass flow.
    Mass(MassRate),
}

impl Flow {
    /// Mass flow rate of this flow for a fluid.
    #[must_use]
    pub fn mass_rate(&self, fluid: &FluidProperties) -> MassRate {
        match *self {
            Self::Volumetric(volume_rate) => volume_rate * fluid.density(),
            Self::Mass(mass_rate) => mass_rate,
        }
    }
}
