use std::fmt;

use serde::{Deserialize, Serialize};
use uom::si::f64::ThermodynamicTemperature;

use super::{flow::Flow, geometry::Exchanger};

/// Which stream a value belongs to.
///
/// The cold stream runs through the inner pipe; the hot stream through the annulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Cold,
    Hot,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cold => write!(f, "cold"),
            Self::Hot => write!(f, "hot"),
        }
    }
}

/// One stream's fluid, flow rate, and inlet temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSpec {
    pub fluid: String,
    pub flow: Flow,
    pub inlet: ThermodynamicTemperature,
}

impl StreamSpec {
    #[must_use]
    pub fn new(fluid: impl Into<String>, flow: Flow, inlet: ThermodynamicTemperature) -> Self {
        Self {
            fluid: fluid.into(),
            flow,
            inlet,
        }
    }
}

/// Everything needed to evaluate the exchanger once.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingPoint {
    pub exchanger: Exchanger,
    pub cold: StreamSpec,
    pub hot: StreamSpec,
}
