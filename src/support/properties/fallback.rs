use serde::{Deserialize, Serialize};
use tracing::warn;
use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{DynamicViscosity, MassDensity, SpecificHeatCapacity, ThermalConductivity},
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use super::{FluidProperties, PropertyError, PropertyTable, catalog::kilograms_per_liter, gather};

/// How unknown fluid names are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMode {
    /// Unknown fluids are a [`PropertyError::UnknownFluid`].
    #[default]
    Strict,

    /// Unknown fluids take water-like default properties.
    ///
    /// [`PropertyTable::fluid`] logs one warning per substituted fluid; the
    /// single-property getters substitute without logging. Kept for
    /// compatibility with legacy results. Materials are never defaulted.
    FallbackDefaults,
}

/// A [`PropertyTable`] adapter that applies a [`LookupMode`].
///
/// In [`LookupMode::FallbackDefaults`], any fluid the inner table does not know
/// reports `cp = 4186 J/kg·K`, `ρ = 1 kg/L`, `μ = 1e-3 Pa·s`, `k = 0.6 W/m·K`.
#[derive(Debug, Clone, Copy)]
pub struct WithFallback<T> {
    inner: T,
    mode: LookupMode,
}

impl<T: PropertyTable> WithFallback<T> {
    #[must_use]
    pub fn new(inner: T, mode: LookupMode) -> Self {
        Self { inner, mode }
    }

    /// Returns the active lookup mode.
    #[must_use]
    pub fn mode(&self) -> LookupMode {
        self.mode
    }

    fn or_default<Q>(
        &self,
        looked_up: Result<Q, PropertyError>,
        default: impl FnOnce() -> Q,
    ) -> Result<Q, PropertyError> {
        match (looked_up, self.mode) {
            (Err(PropertyError::UnknownFluid { .. }), LookupMode::FallbackDefaults) => {
                Ok(default())
            }
            (result, _) => result,
        }
    }
}

impl<T: PropertyTable> PropertyTable for WithFallback<T> {
    fn specific_heat(&self, fluid: &str) -> Result<SpecificHeatCapacity, PropertyError> {
        self.or_default(self.inner.specific_heat(fluid), || {
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4186.0)
        })
    }

    fn density(&self, fluid: &str) -> Result<MassDensity, PropertyError> {
        self.or_default(self.inner.density(fluid), || kilograms_per_liter(1.0))
    }

    fn viscosity(&self, fluid: &str) -> Result<DynamicViscosity, PropertyError> {
        self.or_default(self.inner.viscosity(fluid), || {
            DynamicViscosity::new::<pascal_second>(1.0e-3)
        })
    }

    fn fluid_conductivity(&self, fluid: &str) -> Result<ThermalConductivity, PropertyError> {
        self.or_default(self.inner.fluid_conductivity(fluid), || {
            ThermalConductivity::new::<watt_per_meter_kelvin>(0.6)
        })
    }

    fn material_conductivity(
        &self,
        material: &str,
    ) -> Result<ThermalConductivity, PropertyError> {
        self.inner.material_conductivity(material)
    }

    fn fluid_names(&self) -> Vec<String> {
        self.inner.fluid_names()
    }

    fn fluid(&self, fluid: &str) -> Result<FluidProperties, PropertyError> {
        match (self.inner.fluid(fluid), self.mode) {
            (Err(PropertyError::UnknownFluid { .. }), LookupMode::FallbackDefaults) => {
                warn!(fluid, "unknown fluid, using default properties");
                gather(self, fluid)
            }
            (result, _) => result,
        }
    }
}
