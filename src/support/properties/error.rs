use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors that may occur when looking up physical properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The fluid name is not present in the table.
    #[error("unknown fluid: {name:?}")]
    UnknownFluid { name: String },

    /// The material name is not present in the table.
    #[error("unknown material: {name:?}")]
    UnknownMaterial { name: String },

    /// A table returned a non-physical value.
    #[error("invalid property value for {name:?}")]
    InvalidValue {
        name: String,
        #[source]
        source: ConstraintError,
    },
}
