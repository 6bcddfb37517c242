//! TOML scenario documents.
//!
//! A scenario names the fluids, flows, inlet temperatures, geometry, model
//! settings, and one sweep axis in reporting units (L/min, °C, m). It is
//! resolved into typed values once, then run.
//!
//! ```toml
//! [cold]
//! fluid = "water"
//! flow_rate = 10.0
//! inlet_temperature = 20.0
//!
//! [hot]
//! fluid = "water"
//! flow_rate = 10.0
//! inlet_temperature = 80.0
//!
//! [pipe]
//! outer_diameter = 0.1
//! wall_thickness = 0.005
//! length = 2.0
//! material = "stainless steel"
//!
//! [annulus]
//! gap = 0.01
//!
//! [sweep]
//! axis = "cold_flow_rate"
//! start = 5.0
//! end = 100.0
//! steps = 20
//! ```

use serde::Deserialize;
use thiserror::Error;
use uom::si::{
    f64::{Length, ThermodynamicTemperature},
    length::meter,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::{
    properties::{Catalog, PropertyTable},
    units::liters_per_minute,
};

use super::{
    AxisKind, ConcentricTubeHx, Exchanger, FailurePolicy, Flow, GeometryError, LinearRange,
    ModelConfig, OperatingPoint, PipeGeometry, StreamSpec, SweepAxis, SweepConfig, SweepError,
    SweepResult,
};

/// Errors from reading or resolving a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid scenario document")]
    Parse(#[from] toml::de::Error),

    #[error("invalid geometry")]
    Geometry(#[from] GeometryError),

    /// A numeric axis is missing `start`, `end`, or `steps`.
    #[error("sweep over {axis} needs start, end, and steps")]
    MissingRange { axis: AxisKind },

    /// The fluid axis takes its values from the property table.
    #[error("sweep over {axis} does not take a range")]
    UnexpectedRange { axis: AxisKind },

    #[error("sweep failed")]
    Sweep(#[from] SweepError),
}

/// One stream, in L/min and °C.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamSection {
    pub fluid: String,
    pub flow_rate: f64,
    pub inlet_temperature: f64,
}

/// The inner pipe, in m.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipeSection {
    pub outer_diameter: f64,
    pub wall_thickness: f64,
    pub length: f64,
    pub material: String,
}

/// The outer pipe, in m.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnulusSection {
    pub gap: f64,
    /// Defaults to the inner pipe's wall thickness.
    pub wall_thickness: Option<f64>,
}

/// The swept variable and its range, in reporting units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepSection {
    pub axis: AxisKind,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub steps: Option<usize>,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// A complete scenario document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub cold: StreamSection,
    pub hot: StreamSection,
    pub pipe: PipeSection,
    pub annulus: AnnulusSection,
    #[serde(default)]
    pub model: ModelConfig,
    pub sweep: SweepSection,
}

impl Scenario {
    /// Parses a scenario from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] if the document is malformed.
    pub fn from_toml_str(text: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(text)?)
    }

    /// The base operating point, before any sweep value is applied.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Geometry`] if the pipe or annulus is invalid.
    pub fn operating_point(&self) -> Result<OperatingPoint, ScenarioError> {
        let pipe = PipeGeometry::new(
            Length::new::<meter>(self.pipe.outer_diameter),
            Length::new::<meter>(self.pipe.wall_thickness),
            Length::new::<meter>(self.pipe.length),
        )?;
        let exchanger = Exchanger::new(
            pipe,
            Length::new::<meter>(self.annulus.gap),
            Length::new::<meter>(
                self.annulus
                    .wall_thickness
                    .unwrap_or(self.pipe.wall_thickness),
            ),
            self.pipe.material.as_str(),
        )?;

        Ok(OperatingPoint {
            exchanger,
            cold: stream(&self.cold),
            hot: stream(&self.hot),
        })
    }

    /// The typed sweep axis.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] if the range does not suit the axis.
    pub fn axis(&self) -> Result<SweepAxis, ScenarioError> {
        let SweepSection {
            axis,
            start,
            end,
            steps,
            ..
        } = self.sweep;

        if axis == AxisKind::HotFluid {
            if start.is_some() || end.is_some() || steps.is_some() {
                return Err(ScenarioError::UnexpectedRange { axis });
            }
            return Ok(SweepAxis::HotFluid);
        }

        let (Some(start), Some(end), Some(steps)) = (start, end, steps) else {
            return Err(ScenarioError::MissingRange { axis });
        };

        Ok(match axis {
            AxisKind::ColdFlowRate => SweepAxis::ColdFlowRate(LinearRange::new(
                liters_per_minute(start),
                liters_per_minute(end),
                steps,
            )?),
            AxisKind::HotInletTemperature => SweepAxis::HotInletTemperature(LinearRange::new(
                ThermodynamicTemperature::new::<degree_celsius>(start),
                ThermodynamicTemperature::new::<degree_celsius>(end),
                steps,
            )?),
            AxisKind::PipeLength => SweepAxis::PipeLength(meters(start, end, steps)?),
            AxisKind::PipeDiameter => SweepAxis::PipeDiameter(meters(start, end, steps)?),
            AxisKind::HotFluid => SweepAxis::HotFluid,
        })
    }

    /// Runs the sweep over the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] if resolution fails or the sweep aborts.
    pub fn run(&self) -> Result<SweepResult, ScenarioError> {
        self.run_with(Catalog::standard())
    }

    /// Runs the sweep over caller-supplied property tables.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] if resolution fails or the sweep aborts.
    pub fn run_with<T: PropertyTable>(&self, tables: T) -> Result<SweepResult, ScenarioError> {
        let base = self.operating_point()?;
        let axis = self.axis()?;
        let config = SweepConfig {
            failure_policy: self.sweep.failure_policy,
        };

        let hx = ConcentricTubeHx::new(tables, self.model);
        Ok(hx.sweep(&base, &axis, &config)?)
    }
}

fn stream(section: &StreamSection) -> StreamSpec {
    StreamSpec::new(
        section.fluid.as_str(),
        Flow::Volumetric(liters_per_minute(section.flow_rate)),
        ThermodynamicTemperature::new::<degree_celsius>(section.inlet_temperature),
    )
}

fn meters(start: f64, end: f64, steps: usize) -> Result<LinearRange<Length>, SweepError> {
    LinearRange::new(
        Length::new::<meter>(start),
        Length::new::<meter>(end),
        steps,
    )
}
