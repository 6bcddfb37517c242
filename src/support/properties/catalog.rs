use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{DynamicViscosity, MassDensity, SpecificHeatCapacity, ThermalConductivity},
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::constraint::{ConstraintResult, StrictlyPositive};

use super::{FluidProperties, PropertyError, PropertyTable, normalize};

/// Built-in fluids: name, cp (J/kg·K), density (kg/L), viscosity (Pa·s), k (W/m·K).
const STANDARD_FLUIDS: [(&str, f64, f64, f64, f64); 9] = [
    ("water", 4186.0, 1.0, 1.0e-3, 0.60),
    ("air", 1005.0, 0.001_225, 1.81e-5, 0.0257),
    ("thermal oil", 2200.0, 0.87, 3.0e-2, 0.13),
    ("glycol", 2400.0, 1.11, 1.61e-2, 0.258),
    ("steam", 2010.0, 0.000_598, 1.2e-5, 0.025),
    ("nitrogen", 1040.0, 0.001_165, 1.76e-5, 0.026),
    ("carbon dioxide", 844.0, 0.001_842, 1.47e-5, 0.0166),
    ("ammonia", 4700.0, 0.61, 1.35e-4, 0.50),
    ("helium", 5190.0, 0.000_166, 1.96e-5, 0.151),
];

/// Built-in pipe materials: name, k (W/m·K).
const STANDARD_MATERIALS: [(&str, f64); 7] = [
    ("stainless steel", 16.0),  // AISI 304
    ("mild steel", 50.0),       // low carbon
    ("iron", 80.0),             // pure
    ("aluminum (pure)", 237.0), // 99.9% Al
    ("aluminum (alloy)", 120.0),
    ("copper (pure)", 401.0), // 99.9% Cu
    ("copper (annealed)", 385.0),
];

/// Converts kilograms per liter to a [`MassDensity`].
pub(crate) fn kilograms_per_liter(value: f64) -> MassDensity {
    MassDensity::new::<kilogram_per_cubic_meter>(value * 1000.0)
}

/// An immutable, ordered set of fluids and pipe materials.
///
/// Insertion order is preserved and is the order reported by
/// [`PropertyTable::fluid_names`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    fluids: Vec<(String, FluidProperties)>,
    materials: Vec<(String, ThermalConductivity)>,
}

impl Catalog {
    /// Returns a catalog with no fluids and no materials.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the built-in tables.
    #[must_use]
    pub fn standard() -> Self {
        let fluids = STANDARD_FLUIDS
            .iter()
            .map(|&(name, cp, rho, mu, k)| {
                let props = FluidProperties {
                    specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp),
                    density: kilograms_per_liter(rho),
                    viscosity: DynamicViscosity::new::<pascal_second>(mu),
                    conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(k),
                };
                (name.to_owned(), props)
            })
            .collect();

        let materials = STANDARD_MATERIALS
            .iter()
            .map(|&(name, k)| {
                (
                    name.to_owned(),
                    ThermalConductivity::new::<watt_per_meter_kelvin>(k),
                )
            })
            .collect();

        Self { fluids, materials }
    }

    /// Adds a fluid, replacing any existing entry with the same name.
    ///
    /// A replaced fluid keeps its original position.
    #[must_use]
    pub fn with_fluid(mut self, name: &str, props: FluidProperties) -> Self {
        let key = normalize(name);
        match self.fluids.iter_mut().find(|(n, _)| *n == key) {
            Some(entry) => entry.1 = props,
            None => self.fluids.push((key, props)),
        }
        self
    }

    /// Adds a pipe material, replacing any existing entry with the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the conductivity is not strictly positive.
    pub fn with_material(
        mut self,
        name: &str,
        conductivity: ThermalConductivity,
    ) -> ConstraintResult<Self> {
        let conductivity = StrictlyPositive::new(conductivity)?.into_inner();
        let key = normalize(name);
        match self.materials.iter_mut().find(|(n, _)| *n == key) {
            Some(entry) => entry.1 = conductivity,
            None => self.materials.push((key, conductivity)),
        }
        Ok(self)
    }

    fn find_fluid(&self, fluid: &str) -> Result<&FluidProperties, PropertyError> {
        let key = normalize(fluid);
        self.fluids
            .iter()
            .find_map(|(name, props)| (*name == key).then_some(props))
            .ok_or_else(|| PropertyError::UnknownFluid {
                name: fluid.to_owned(),
            })
    }
}

impl PropertyTable for Catalog {
    fn specific_heat(&self, fluid: &str) -> Result<SpecificHeatCapacity, PropertyError> {
        self.find_fluid(fluid).map(FluidProperties::specific_heat)
    }

    fn density(&self, fluid: &str) -> Result<MassDensity, PropertyError> {
        self.find_fluid(fluid).map(FluidProperties::density)
    }

    fn viscosity(&self, fluid: &str) -> Result<DynamicViscosity, PropertyError> {
        self.find_fluid(fluid).map(FluidProperties::viscosity)
    }

    fn fluid_conductivity(&self, fluid: &str) -> Result<ThermalConductivity, PropertyError> {
        self.find_fluid(fluid).map(FluidProperties::conductivity)
    }

    fn material_conductivity(
        &self,
        material: &str,
    ) -> Result<ThermalConductivity, PropertyError> {
        let key = normalize(material);
        self.materials
            .iter()
            .find_map(|(name, k)| (*name == key).then_some(*k))
            .ok_or_else(|| PropertyError::UnknownMaterial {
                name: material.to_owned(),
            })
    }

    fn fluid_names(&self) -> Vec<String> {
        self.fluids.iter().map(|(name, _)| name.clone()).collect()
    }
}
