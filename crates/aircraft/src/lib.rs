//! Aircraft configuration with an explicitly invalidated cache of derived quantities.
//!
//! Mutators only touch [`RawInputs`] and flag the cache dirty. Derived quantities are
//! refreshed by one call to [`AircraftConfiguration::recompute`], so several inputs can be
//! changed in sequence before paying for a recomputation. Reading a derived quantity while the
//! cache is dirty fails with [`AircraftError::StaleCache`] instead of returning old values.

mod cache;
mod inputs;

use log::debug;
use thiserror::Error;

pub use cache::DerivedCache;
pub use inputs::{
    DEFAULT_LIFT_CURVE_SLOPE, DEFAULT_WING_HEIGHT_M, DragPolar, Geometry, MassBreakdown,
    MassComponent, PolarCoefficient, RawInputs,
};

use flight_core::constants::EARTH_GRAVITY_M_S2;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AircraftError {
    #[error("invalid aircraft configuration: {name} = {value} ({rule})")]
    InvalidConfiguration {
        name: &'static str,
        value: f64,
        rule: &'static str,
    },
    #[error("derived quantities of '{0}' are stale; call recompute() after changing inputs")]
    StaleCache(String),
}

impl AircraftError {
    pub(crate) fn invalid(name: &'static str, value: f64, rule: &'static str) -> Self {
        AircraftError::InvalidConfiguration { name, value, rule }
    }
}

/// A named aircraft: raw inputs, their derived cache, and the dirty flag linking the two.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftConfiguration {
    name: String,
    inputs: RawInputs,
    cache: DerivedCache,
    dirty: bool,
}

impl AircraftConfiguration {
    /// Build a configuration in the Earth environment with a fresh cache.
    pub fn new(
        name: impl Into<String>,
        mass: MassBreakdown,
        geometry: Geometry,
        polar: DragPolar,
    ) -> Result<Self, AircraftError> {
        Self::from_inputs(
            name,
            RawInputs {
                mass,
                geometry,
                polar,
                gravity_m_s2: EARTH_GRAVITY_M_S2,
            },
        )
    }

    pub fn from_inputs(name: impl Into<String>, inputs: RawInputs) -> Result<Self, AircraftError> {
        inputs.validate()?;
        Ok(Self {
            name: name.into(),
            cache: DerivedCache::compute(&inputs),
            inputs,
            dirty: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current raw inputs, including changes not yet folded into the cache.
    pub fn inputs(&self) -> &RawInputs {
        &self.inputs
    }

    /// True when an input changed since the last recompute.
    pub fn is_stale(&self) -> bool {
        self.dirty
    }

    pub fn set_mass_component(
        &mut self,
        component: MassComponent,
        value: f64,
    ) -> Result<(), AircraftError> {
        inputs::check_mass(component, value)?;
        self.inputs.mass.set(component, value);
        self.dirty = true;
        Ok(())
    }

    pub fn set_polar_coefficient(
        &mut self,
        coefficient: PolarCoefficient,
        value: f64,
    ) -> Result<(), AircraftError> {
        inputs::check_coefficient(coefficient, value)?;
        self.inputs.polar.set(coefficient, value);
        self.dirty = true;
        Ok(())
    }

    pub fn set_geometry(&mut self, geometry: Geometry) -> Result<(), AircraftError> {
        geometry.validate()?;
        self.inputs.geometry = geometry;
        self.dirty = true;
        Ok(())
    }

    pub fn set_gravity(&mut self, gravity_m_s2: f64) -> Result<(), AircraftError> {
        if !(gravity_m_s2.is_finite() && gravity_m_s2 > 0.0) {
            return Err(AircraftError::invalid(
                "gravity",
                gravity_m_s2,
                "must be finite and > 0",
            ));
        }
        self.inputs.gravity_m_s2 = gravity_m_s2;
        self.dirty = true;
        Ok(())
    }

    /// Refresh every derived quantity.
    ///
    /// Without `force` this is a no-op on a fresh cache. Returns whether the cache was rewritten.
    /// If the inputs are not physical the previous cache and the dirty flag are kept.
    pub fn recompute(&mut self, force: bool) -> Result<bool, AircraftError> {
        if !force && !self.dirty {
            return Ok(false);
        }
        self.inputs.validate()?;
        self.cache = DerivedCache::compute(&self.inputs);
        self.dirty = false;
        debug!(
            "recomputed '{}': W = {:.1} N, f_max = {:.3}, C_L(f_max) = {:.4}",
            self.name,
            self.cache.weight_n,
            self.cache.max_glide_ratio,
            self.cache.lift_coefficient_at_max_glide_ratio
        );
        Ok(true)
    }

    /// The derived cache, provided no input changed since it was computed.
    pub fn derived(&self) -> Result<&DerivedCache, AircraftError> {
        if self.dirty {
            Err(AircraftError::StaleCache(self.name.clone()))
        } else {
            Ok(&self.cache)
        }
    }

    /// Total weight (N).
    pub fn weight(&self) -> Result<f64, AircraftError> {
        Ok(self.derived()?.weight_n)
    }

    /// Weight per unit wing area (Pa).
    pub fn wing_loading(&self) -> Result<f64, AircraftError> {
        Ok(self.derived()?.wing_loading_pa)
    }

    /// `f_max = 1 / (2 √(k C_D0))`.
    pub fn max_glide_ratio(&self) -> Result<f64, AircraftError> {
        Ok(self.derived()?.max_glide_ratio)
    }

    /// `C_L = √(C_D0 / k)`.
    pub fn lift_coefficient_at_max_glide_ratio(&self) -> Result<f64, AircraftError> {
        Ok(self.derived()?.lift_coefficient_at_max_glide_ratio)
    }

    /// Induced-drag multiplier at `height_m` above the ground.
    pub fn ground_effect_coefficient(&self, height_m: f64) -> Result<f64, AircraftError> {
        Ok(self.derived()?.ground_effect_coefficient(height_m))
    }

    pub fn fuel_weight(&self) -> Result<f64, AircraftError> {
        Ok(self.derived()?.fuel_weight_n)
    }

    pub fn zero_fuel_weight(&self) -> Result<f64, AircraftError> {
        Ok(self.derived()?.zero_fuel_weight_n)
    }
}
