//! Static physical property lookup.
//!
//! Fluid and pipe-material properties are consumed as pure name → value
//! lookups through the [`PropertyTable`] trait. Names are case-insensitive and
//! surrounding whitespace is ignored.
//!
//! - [`Catalog`] holds an immutable set of fluids and materials. Use
//!   [`Catalog::standard`] for the built-in tables or build a synthetic set
//!   with [`Catalog::empty`] and the `with_*` methods.
//! - [`WithFallback`] wraps any table and substitutes water-like defaults for
//!   unknown fluids. Strict lookup is the default; see [`LookupMode`].
//!
//! ```
//! use concentric_hx::support::properties::{Catalog, PropertyTable};
//! use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
//!
//! let tables = Catalog::standard();
//! let cp = tables.specific_heat("Water").unwrap();
//! assert_eq!(cp.get::<joule_per_kilogram_kelvin>(), 4186.0);
//! assert!(tables.specific_heat("mercury").is_err());
//! ```

mod catalog;
mod error;
mod fallback;

pub use catalog::Catalog;
pub use error::PropertyError;
pub use fallback::{LookupMode, WithFallback};

use uom::si::f64::{DynamicViscosity, MassDensity, SpecificHeatCapacity, ThermalConductivity};

use crate::support::constraint::{ConstraintResult, StrictlyPositive};

/// Constant transport and thermal properties of a fluid.
///
/// Every property is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProperties {
    specific_heat: SpecificHeatCapacity,
    density: MassDensity,
    viscosity: DynamicViscosity,
    conductivity: ThermalConductivity,
}

impl FluidProperties {
    /// Creates validated fluid properties.
    ///
    /// # Errors
    ///
    /// Returns an error if any property is not strictly positive.
    pub fn new(
        specific_heat: SpecificHeatCapacity,
        density: MassDensity,
        viscosity: DynamicViscosity,
        conductivity: ThermalConductivity,
    ) -> ConstraintResult<Self> {
        Ok(Self {
            specific_heat: StrictlyPositive::new(specific_heat)?.into_inner(),
            density: StrictlyPositive::new(density)?.into_inner(),
            viscosity: StrictlyPositive::new(viscosity)?.into_inner(),
            conductivity: StrictlyPositive::new(conductivity)?.into_inner(),
        })
    }

    #[must_use]
    pub fn specific_heat(&self) -> SpecificHeatCapacity {
        self.specific_heat
    }

    #[must_use]
    pub fn density(&self) -> MassDensity {
        self.density
    }

    #[must_use]
    pub fn viscosity(&self) -> DynamicViscosity {
        self.viscosity
    }

    #[must_use]
    pub fn conductivity(&self) -> ThermalConductivity {
        self.conductivity
    }
}

/// Read-only access to fluid and material property tables.
///
/// Implementations must be pure: the same name always yields the same value
/// for the lifetime of the table.
pub trait PropertyTable {
    /// Specific heat capacity of a fluid.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::UnknownFluid`] if the fluid is not in the table.
    fn specific_heat(&self, fluid: &str) -> Result<SpecificHeatCapacity, PropertyError>;

    /// Density of a fluid.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::UnknownFluid`] if the fluid is not in the table.
    fn density(&self, fluid: &str) -> Result<MassDensity, PropertyError>;

    /// Dynamic viscosity of a fluid.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::UnknownFluid`] if the fluid is not in the table.
    fn viscosity(&self, fluid: &str) -> Result<DynamicViscosity, PropertyError>;

    /// Thermal conductivity of a fluid.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::UnknownFluid`] if the fluid is not in the table.
    fn fluid_conductivity(&self, fluid: &str) -> Result<ThermalConductivity, PropertyError>;

    /// Thermal conductivity of a solid pipe material.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::UnknownMaterial`] if the material is not in the table.
    fn material_conductivity(&self, material: &str)
    -> Result<ThermalConductivity, PropertyError>;

    /// Names of all fluids in the table, in table order.
    fn fluid_names(&self) -> Vec<String>;

    /// Gathers all four fluid properties at once.
    ///
    /// # Errors
    ///
    /// Returns the first lookup failure.
    fn fluid(&self, fluid: &str) -> Result<FluidProperties, PropertyError> {
        gather(self, fluid)
    }
}

/// Builds a [`FluidProperties`] from the four single-property getters.
pub(crate) fn gather<T: PropertyTable + ?Sized>(
    table: &T,
    fluid: &str,
) -> Result<FluidProperties, PropertyError> {
    FluidProperties::new(
        table.specific_heat(fluid)?,
        table.density(fluid)?,
        table.viscosity(fluid)?,
        table.fluid_conductivity(fluid)?,
    )
    .map_err(|source| PropertyError::InvalidValue {
        name: fluid.to_owned(),
        source,
    })
}

impl<T: PropertyTable + ?Sized> PropertyTable for &T {
    fn specific_heat(&self, fluid: &str) -> Result<SpecificHeatCapacity, PropertyError> {
        (**self).specific_heat(fluid)
    }

    fn density(&self, fluid: &str) -> Result<MassDensity, PropertyError> {
        (**self).density(fluid)
    }

    fn viscosity(&self, fluid: &str) -> Result<DynamicViscosity, PropertyError> {
        (**self).viscosity(fluid)
    }

    fn fluid_conductivity(&self, fluid: &str) -> Result<ThermalConductivity, PropertyError> {
        (**self).fluid_conductivity(fluid)
    }

    fn material_conductivity(
        &self,
        material: &str,
    ) -> Result<ThermalConductivity, PropertyError> {
        (**self).material_conductivity(material)
    }

    fn fluid_names(&self) -> Vec<String> {
        (**self).fluid_names()
    }

    fn fluid(&self, fluid: &str) -> Result<FluidProperties, PropertyError> {
        (**self).fluid(fluid)
    }
}

/// Normalizes a user-supplied substance name for lookup.
pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
