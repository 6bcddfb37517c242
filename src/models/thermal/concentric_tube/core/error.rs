use thiserror::Error;

use crate::support::{constraint::ConstraintError, properties::PropertyError};

use super::{flow::FlowError, geometry::GeometryError, operating_point::Side, solve::SolveError};

/// Errors from evaluating the exchanger at one operating point.
#[derive(Debug, Error)]
pub enum EvaluateError {
    /// A fluid or material is missing from the property tables.
    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error("invalid geometry")]
    Geometry(#[from] GeometryError),

    #[error("invalid {side} flow state")]
    Flow {
        side: Side,
        #[source]
        source: FlowError,
    },

    #[error("heat balance failed")]
    Solve(#[from] SolveError),

    /// The duty falls outside the thermodynamic maximum.
    #[error("efficiency out of range")]
    Efficiency(#[source] ConstraintError),
}
