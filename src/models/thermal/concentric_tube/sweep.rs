//! Parametric sweeps over one design variable.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uom::si::{
    area::square_meter,
    f64::{HeatTransfer, Length, ThermodynamicTemperature, VolumeRate},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    power::watt,
    ratio::ratio,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::{degree_celsius, kelvin},
    volume_rate::cubic_meter_per_second,
};

use crate::support::{properties::PropertyTable, units::LitersPerMinute};

use super::{
    ConcentricTubeHx, EvaluateError, ExchangerState, Flow, FlowRegime, OperatingPoint, Side,
};

/// A quantity that can be linearly interpolated.
pub trait Interpolate: Copy {
    /// Value in the quantity's base SI unit.
    fn to_base(self) -> f64;

    fn from_base(value: f64) -> Self;
}

impl Interpolate for VolumeRate {
    fn to_base(self) -> f64 {
        self.get::<cubic_meter_per_second>()
    }

    fn from_base(value: f64) -> Self {
        Self::new::<cubic_meter_per_second>(value)
    }
}

impl Interpolate for ThermodynamicTemperature {
    fn to_base(self) -> f64 {
        self.get::<kelvin>()
    }

    fn from_base(value: f64) -> Self {
        Self::new::<kelvin>(value)
    }
}

impl Interpolate for Length {
    fn to_base(self) -> f64 {
        self.get::<meter>()
    }

    fn from_base(value: f64) -> Self {
        Self::new::<meter>(value)
    }
}

/// `steps` evenly spaced values from `start` to `end`, both included.
///
/// A single step yields just `start`. The range may descend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRange<Q> {
    start: Q,
    end: Q,
    steps: usize,
}

impl<Q: Interpolate> LinearRange<Q> {
    /// # Errors
    ///
    /// Returns [`SweepError::InvalidRange`] if `steps` is zero or an endpoint
    /// is not finite.
    pub fn new(start: Q, end: Q, steps: usize) -> Result<Self, SweepError> {
        if steps == 0 {
            return Err(SweepError::InvalidRange {
                reason: "a sweep needs at least one step",
            });
        }
        if !start.to_base().is_finite() || !end.to_base().is_finite() {
            return Err(SweepError::InvalidRange {
                reason: "sweep endpoints must be finite",
            });
        }
        Ok(Self { start, end, steps })
    }

    #[must_use]
    pub fn start(&self) -> Q {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Q {
        self.end
    }

    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The discretized values, in order from `start` to `end`.
    #[must_use]
    pub fn values(&self) -> Vec<Q> {
        if self.steps == 1 {
            return vec![self.start];
        }

        let start = self.start.to_base();
        let end = self.end.to_base();
        #[allow(clippy::cast_precision_loss)]
        let delta = (end - start) / (self.steps - 1) as f64;

        let mut values: Vec<Q> = (0..self.steps)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let offset = i as f64 * delta;
                Q::from_base(start + offset)
            })
            .collect();

        // Land exactly on the endpoint.
        values[self.steps - 1] = self.end;
        values
    }
}

/// The design variable a sweep moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepAxis {
    ColdFlowRate(LinearRange<VolumeRate>),
    HotInletTemperature(LinearRange<ThermodynamicTemperature>),
    /// Every fluid in the property table, in table order.
    HotFluid,
    PipeLength(LinearRange<Length>),
    /// Pipe outer diameter; the wall thickness and annular gap are kept.
    PipeDiameter(LinearRange<Length>),
}

/// Names a [`SweepAxis`] without its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    ColdFlowRate,
    HotInletTemperature,
    HotFluid,
    PipeLength,
    PipeDiameter,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ColdFlowRate => "cold flow rate",
            Self::HotInletTemperature => "hot inlet temperature",
            Self::HotFluid => "hot fluid",
            Self::PipeLength => "pipe length",
            Self::PipeDiameter => "pipe diameter",
        };
        f.write_str(name)
    }
}

impl SweepAxis {
    #[must_use]
    pub fn kind(&self) -> AxisKind {
        match self {
            Self::ColdFlowRate(_) => AxisKind::ColdFlowRate,
            Self::HotInletTemperature(_) => AxisKind::HotInletTemperature,
            Self::HotFluid => AxisKind::HotFluid,
            Self::PipeLength(_) => AxisKind::PipeLength,
            Self::PipeDiameter(_) => AxisKind::PipeDiameter,
        }
    }

    fn values(&self, tables: &impl PropertyTable) -> Vec<SweepValue> {
        match self {
            Self::ColdFlowRate(range) => range
                .values()
                .into_iter()
                .map(SweepValue::ColdFlowRate)
                .collect(),
            Self::HotInletTemperature(range) => range
                .values()
                .into_iter()
                .map(SweepValue::HotInletTemperature)
                .collect(),
            Self::HotFluid => tables
                .fluid_names()
                .into_iter()
                .map(SweepValue::HotFluid)
                .collect(),
            Self::PipeLength(range) => range
                .values()
                .into_iter()
                .map(SweepValue::PipeLength)
                .collect(),
            Self::PipeDiameter(range) => range
                .values()
                .into_iter()
                .map(SweepValue::PipeDiameter)
                .collect(),
        }
    }
}

/// The value of the swept variable at one point.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepValue {
    ColdFlowRate(VolumeRate),
    HotInletTemperature(ThermodynamicTemperature),
    HotFluid(String),
    PipeLength(Length),
    PipeDiameter(Length),
}

impl SweepValue {
    /// The value in reporting units: L/min, °C, or m.
    #[must_use]
    pub fn axis_value(&self) -> AxisValue {
        match self {
            Self::ColdFlowRate(flow) => AxisValue::Number(flow.as_liters_per_minute()),
            Self::HotInletTemperature(t) => AxisValue::Number(t.get::<degree_celsius>()),
            Self::HotFluid(name) => AxisValue::Name(name.clone()),
            Self::PipeLength(length) | Self::PipeDiameter(length) => {
                AxisValue::Number(length.get::<meter>())
            }
        }
    }

    /// Applies this value to a copy of `base`, re-deriving geometry as needed.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::Geometry`] if the new pipe or annulus is invalid.
    pub fn apply(&self, base: &OperatingPoint) -> Result<OperatingPoint, EvaluateError> {
        let mut point = base.clone();
        match self {
            Self::ColdFlowRate(flow) => point.cold.flow = Flow::Volumetric(*flow),
            Self::HotInletTemperature(t) => point.hot.inlet = *t,
            Self::HotFluid(name) => point.hot.fluid.clone_from(name),
            Self::PipeLength(length) => point.exchanger = base.exchanger.with_length(*length)?,
            Self::PipeDiameter(diameter) => {
                point.exchanger = base.exchanger.with_outer_diameter(*diameter)?;
            }
        }
        Ok(point)
    }
}

impl fmt::Display for SweepValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColdFlowRate(flow) => write!(f, "{} L/min", flow.as_liters_per_minute()),
            Self::HotInletTemperature(t) => write!(f, "{} °C", t.get::<degree_celsius>()),
            Self::HotFluid(name) => f.write_str(name),
            Self::PipeLength(length) | Self::PipeDiameter(length) => {
                write!(f, "{} m", length.get::<meter>())
            }
        }
    }
}

/// A swept value as reported: a number in reporting units, or a fluid name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Name(String),
}

/// What to do when one sweep point fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Record the error on the point and continue.
    #[default]
    Collect,
    /// Stop at the first failed point.
    Abort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub failure_policy: FailurePolicy,
}

/// Errors that stop a sweep.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("invalid sweep range: {reason}")]
    InvalidRange { reason: &'static str },

    #[error("no fluids to sweep over")]
    NoFluids,

    /// A point failed under [`FailurePolicy::Abort`].
    #[error("sweep point {index} ({value}) failed")]
    Point {
        index: usize,
        value: SweepValue,
        #[source]
        source: EvaluateError,
    },
}

/// One evaluated point of a sweep.
#[derive(Debug)]
pub struct SweepPoint {
    pub value: SweepValue,
    pub outcome: Result<ExchangerState, EvaluateError>,
}

/// Outcomes of a sweep, in sweep order.
#[derive(Debug)]
pub struct SweepResult {
    axis: AxisKind,
    points: Vec<SweepPoint>,
}

impl SweepResult {
    #[must_use]
    pub fn axis(&self) -> AxisKind {
        self.axis
    }

    /// Every point, failed or not, in sweep order.
    #[must_use]
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    /// Successful points with their value, in sweep order.
    pub fn successes(&self) -> impl Iterator<Item = (&SweepValue, &ExchangerState)> {
        self.points
            .iter()
            .filter_map(|p| p.outcome.as_ref().ok().map(|state| (&p.value, state)))
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.points.iter().filter(|p| p.outcome.is_err()).count()
    }

    /// The successful point with the warmest cold outlet.
    ///
    /// Ties go to the earliest point.
    #[must_use]
    pub fn optimum(&self) -> Option<(&SweepValue, &ExchangerState)> {
        self.successes().fold(None, |best, candidate| match best {
            Some((_, state)) if state.cold_out >= candidate.1.cold_out => best,
            _ => Some(candidate),
        })
    }

    /// Mean overall coefficient over successful points.
    #[must_use]
    pub fn mean_u(&self) -> Option<HeatTransfer> {
        mean(self.successes().map(|(_, s)| s.u.get::<watt_per_square_meter_kelvin>()))
            .map(HeatTransfer::new::<watt_per_square_meter_kelvin>)
    }

    /// Mean Reynolds number on one side over successful points.
    #[must_use]
    pub fn mean_reynolds(&self, side: Side) -> Option<f64> {
        mean(self.successes().map(|(_, s)| match side {
            Side::Cold => s.cold.reynolds.get::<ratio>(),
            Side::Hot => s.hot.reynolds.get::<ratio>(),
        }))
    }

    /// Parallel series with one entry per point, for plotting and reporting.
    ///
    /// Failed points keep their swept value and are marked in
    /// [`SweepSeries::failed`]; their result entries are `None`.
    #[must_use]
    pub fn series(&self) -> SweepSeries {
        let mut series = SweepSeries::empty(self.axis);

        for point in &self.points {
            let state = point.outcome.as_ref().ok();
            let field = |f: fn(&ExchangerState) -> f64| state.map(f);

            series.values.push(point.value.axis_value());
            series.failed.push(state.is_none());
            series
                .t_out
                .push(field(|s| s.cold_out.get::<degree_celsius>()));
            series.q.push(field(|s| s.q.get::<watt>()));
            series
                .efficiency
                .push(field(|s| s.efficiency.get::<ratio>()));
            series
                .u
                .push(field(|s| s.u.get::<watt_per_square_meter_kelvin>()));
            series.lmtd.push(field(|s| s.lmtd.get::<delta_kelvin>()));
            series
                .h_internal
                .push(field(|s| s.cold.h.get::<watt_per_square_meter_kelvin>()));
            series
                .h_external
                .push(field(|s| s.hot.h.get::<watt_per_square_meter_kelvin>()));
            series.area.push(field(|s| s.area.get::<square_meter>()));
            series
                .re_internal
                .push(field(|s| s.cold.reynolds.get::<ratio>()));
            series
                .re_external
                .push(field(|s| s.hot.reynolds.get::<ratio>()));
            series.regime_internal.push(state.map(|s| s.cold.regime()));
            series.regime_external.push(state.map(|s| s.hot.regime()));
        }

        series
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// Sweep results as parallel sequences, one entry per sweep point in order.
///
/// Units: `T_out` °C, `Q` W, `U` and `h_*` W/m²·K, `delta_T_lm` K, `A` m².
/// Swept values are in L/min, °C, or m, or are fluid names. Result entries
/// are `None` where `failed` is set; TOML has no null, so a series with
/// failures must be written in a format that does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepSeries {
    pub axis: AxisKind,
    pub values: Vec<AxisValue>,
    pub failed: Vec<bool>,
    #[serde(rename = "T_out")]
    pub t_out: Vec<Option<f64>>,
    #[serde(rename = "Q")]
    pub q: Vec<Option<f64>>,
    pub efficiency: Vec<Option<f64>>,
    #[serde(rename = "U")]
    pub u: Vec<Option<f64>>,
    #[serde(rename = "delta_T_lm")]
    pub lmtd: Vec<Option<f64>>,
    pub h_internal: Vec<Option<f64>>,
    pub h_external: Vec<Option<f64>>,
    #[serde(rename = "A")]
    pub area: Vec<Option<f64>>,
    #[serde(rename = "Re_internal")]
    pub re_internal: Vec<Option<f64>>,
    #[serde(rename = "Re_external")]
    pub re_external: Vec<Option<f64>>,
    pub regime_internal: Vec<Option<FlowRegime>>,
    pub regime_external: Vec<Option<FlowRegime>>,
}

impl SweepSeries {
    fn empty(axis: AxisKind) -> Self {
        Self {
            axis,
            values: Vec::new(),
            failed: Vec::new(),
            t_out: Vec::new(),
            q: Vec::new(),
            efficiency: Vec::new(),
            u: Vec::new(),
            lmtd: Vec::new(),
            h_internal: Vec::new(),
            h_external: Vec::new(),
            area: Vec::new(),
            re_internal: Vec::new(),
            re_external: Vec::new(),
            regime_internal: Vec::new(),
            regime_external: Vec::new(),
        }
    }

    /// Number of entries in each sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub(super) fn run<T: PropertyTable>(
    hx: &ConcentricTubeHx<T>,
    base: &OperatingPoint,
    axis: &SweepAxis,
    config: &SweepConfig,
) -> Result<SweepResult, SweepError> {
    let values = axis.values(hx.tables());
    if values.is_empty() {
        return Err(SweepError::NoFluids);
    }

    let kind = axis.kind();
    info!(axis = %kind, points = values.len(), "starting sweep");

    let mut points = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let outcome = match (
            value.apply(base).and_then(|point| hx.evaluate(&point)),
            config.failure_policy,
        ) {
            (Err(source), FailurePolicy::Abort) => {
                return Err(SweepError::Point {
                    index,
                    value,
                    source,
                });
            }
            (Err(error), FailurePolicy::Collect) => {
                warn!(axis = %kind, index, %value, %error, "sweep point failed");
                Err(error)
            }
            (outcome, _) => outcome,
        };

        points.push(SweepPoint { value, outcome });
    }

    let result = SweepResult { axis: kind, points };
    info!(
        axis = %kind,
        points = result.points.len(),
        failures = result.failure_count(),
        "sweep finished"
    );
    Ok(result)
}
