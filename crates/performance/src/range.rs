//! Breguet range and endurance, burning the whole fuel load.

use flight_aircraft::DerivedCache;
use flight_propulsion::{FuelConsumption, ThrustSource};

use crate::{PerformanceError, PerformanceSolver, positive};

/// Initial and final weight of a cruise burning every kilogram of fuel.
struct FuelBurn {
    initial_weight_n: f64,
    final_weight_n: f64,
    gravity_m_s2: f64,
}

impl FuelBurn {
    fn from_cache(cache: &DerivedCache) -> Result<Self, PerformanceError> {
        let final_weight_n = cache.zero_fuel_weight_n;
        if final_weight_n <= 0.0 {
            return Err(PerformanceError::InvalidConfiguration(
                "zero-fuel weight must be > 0 for range and endurance".into(),
            ));
        }
        Ok(Self {
            initial_weight_n: cache.weight_n,
            final_weight_n,
            gravity_m_s2: cache.gravity_m_s2,
        })
    }

    fn log_ratio(&self) -> f64 {
        (self.initial_weight_n / self.final_weight_n).ln()
    }
}

fn fuel_model(thrust: &dyn ThrustSource) -> Result<FuelConsumption, PerformanceError> {
    thrust.fuel_consumption().ok_or_else(|| {
        PerformanceError::InvalidConfiguration(
            "the thrust source carries no fuel consumption model".into(),
        )
    })
}

impl PerformanceSolver<'_> {
    /// Best range at constant altitude.
    ///
    /// Jets fly at `C_L = √(C_D0 / 3k)` with the speed bleeding off as fuel burns; propeller
    /// aircraft fly at `f_max`.
    pub fn compute_max_range_at_fixed_altitude(
        &self,
        altitude_m: f64,
        thrust: &dyn ThrustSource,
    ) -> Result<f64, PerformanceError> {
        let cache = self.cache()?;
        let burn = FuelBurn::from_cache(cache)?;
        let density = self.density(altitude_m)?;
        let g = burn.gravity_m_s2;

        Ok(match fuel_model(thrust)? {
            FuelConsumption::Jet { tsfc_kg_per_n_s } => {
                let lift_coefficient = cache.max_range_lift_coefficient();
                let drag_coefficient = cache.drag_coefficient(lift_coefficient, 1.0);
                2.0 / (g * tsfc_kg_per_n_s)
                    * (2.0 / (density * cache.geometry.wing_area_m2)).sqrt()
                    * lift_coefficient.sqrt()
                    / drag_coefficient
                    * (burn.initial_weight_n.sqrt() - burn.final_weight_n.sqrt())
            }
            FuelConsumption::Propeller {
                bsfc_kg_per_j,
                propeller_efficiency,
            } => {
                propeller_efficiency * cache.max_glide_ratio / (g * bsfc_kg_per_j)
                    * burn.log_ratio()
            }
        })
    }

    /// Range flown at constant speed and lift-to-drag ratio.
    pub fn compute_range_at_fixed_speed(
        &self,
        speed_m_s: f64,
        glide_ratio: f64,
        thrust: &dyn ThrustSource,
    ) -> Result<f64, PerformanceError> {
        let cache = self.cache()?;
        let burn = FuelBurn::from_cache(cache)?;
        let speed = positive("speed", speed_m_s)?;
        let glide_ratio = positive("glide ratio", glide_ratio)?;
        let g = burn.gravity_m_s2;

        Ok(match fuel_model(thrust)? {
            FuelConsumption::Jet { tsfc_kg_per_n_s } => {
                speed * glide_ratio / (g * tsfc_kg_per_n_s) * burn.log_ratio()
            }
            FuelConsumption::Propeller {
                bsfc_kg_per_j,
                propeller_efficiency,
            } => propeller_efficiency * glide_ratio / (g * bsfc_kg_per_j) * burn.log_ratio(),
        })
    }

    /// Maximum time aloft (s).
    ///
    /// Jets loiter at `f_max`; propeller aircraft at the minimum-power lift coefficient.
    pub fn compute_endurance(
        &self,
        altitude_m: f64,
        thrust: &dyn ThrustSource,
    ) -> Result<f64, PerformanceError> {
        let cache = self.cache()?;
        let burn = FuelBurn::from_cache(cache)?;
        let density = self.density(altitude_m)?;
        let g = burn.gravity_m_s2;

        Ok(match fuel_model(thrust)? {
            FuelConsumption::Jet { tsfc_kg_per_n_s } => {
                cache.max_glide_ratio / (g * tsfc_kg_per_n_s) * burn.log_ratio()
            }
            FuelConsumption::Propeller {
                bsfc_kg_per_j,
                propeller_efficiency,
            } => {
                let lift_coefficient = cache.min_sink_lift_coefficient();
                let power_factor =
                    lift_coefficient.powf(1.5) / cache.drag_coefficient(lift_coefficient, 1.0);
                propeller_efficiency * power_factor
                    * (2.0 * density * cache.geometry.wing_area_m2).sqrt()
                    / (g * bsfc_kg_per_j)
                    * (1.0 / burn.final_weight_n.sqrt() - 1.0 / burn.initial_weight_n.sqrt())
            }
        })
    }
}
