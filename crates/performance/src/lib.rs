//! Steady-flight and ground-roll performance of a configured aircraft.
//!
//! [`PerformanceSolver`] borrows an [`AircraftConfiguration`] and an [`AtmosphereModel`] and
//! derives equilibrium speeds, climb and glide figures, Breguet range and endurance, and
//! take-off and landing distances. Closed forms are used whenever the thrust source is speed
//! independent; speed-dependent thrust goes through bounded numerical searches instead.

mod climb;
mod equilibrium;
mod gliding;
mod ground_roll;
mod numeric;
mod range;

use flight_aircraft::{AircraftConfiguration, AircraftError, DerivedCache};
use flight_atmosphere::{AtmosphereError, AtmosphereModel};
use flight_propulsion::{ThrustError, ThrustSource};
use serde::Serialize;
use thiserror::Error;

pub use ground_roll::{
    DragParachute, GroundRollProfile, GroundRollSample, LANDING_SPEED_FACTOR, LandingRoll,
    TAKE_OFF_SPEED_FACTOR, TakeOffRoll,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PerformanceError {
    #[error(transparent)]
    Domain(#[from] AtmosphereError),
    #[error(transparent)]
    Aircraft(#[from] AircraftError),
    #[error(transparent)]
    Thrust(#[from] ThrustError),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("no equilibrium: {0}")]
    NoEquilibrium(String),
    #[error("insufficient thrust: ground-roll acceleration is not positive at {speed_m_s:.2} m/s")]
    InsufficientThrust { speed_m_s: f64 },
    #[error("landing roll stops decelerating at {speed_m_s:.2} m/s")]
    NoDeceleration { speed_m_s: f64 },
    #[error("{method} did not converge after {iterations} iterations")]
    Convergence {
        method: &'static str,
        iterations: usize,
    },
}

/// Level-flight operating point, built per call.
///
/// Thrust and drag inside one solver evaluation are both read off the same point, so they see
/// the same altitude, speed and density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightPoint {
    pub altitude_m: f64,
    pub speed_m_s: f64,
    pub incidence_rad: f64,
    pub density_ratio: f64,
    pub lift_coefficient: f64,
    pub density_kg_m3: f64,
}

/// Stateless solver over one aircraft and one atmosphere.
///
/// Every query reads the aircraft's derived cache, which must be fresh.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceSolver<'a> {
    aircraft: &'a AircraftConfiguration,
    atmosphere: &'a AtmosphereModel,
}

impl FlightPoint {
    /// `½ ρ v²` (Pa).
    pub fn dynamic_pressure(&self) -> f64 {
        0.5 * self.density_kg_m3 * self.speed_m_s * self.speed_m_s
    }
}

impl<'a> PerformanceSolver<'a> {
    pub fn new(aircraft: &'a AircraftConfiguration, atmosphere: &'a AtmosphereModel) -> Self {
        Self {
            aircraft,
            atmosphere,
        }
    }

    pub fn aircraft(&self) -> &'a AircraftConfiguration {
        self.aircraft
    }

    pub fn atmosphere(&self) -> AtmosphereModel {
        *self.atmosphere
    }

    /// Level-flight point at `speed_m_s`: lift balances weight.
    pub fn flight_point(
        &self,
        altitude_m: f64,
        speed_m_s: f64,
    ) -> Result<FlightPoint, PerformanceError> {
        let cache = self.cache()?;
        let speed = positive("speed", speed_m_s)?;
        let density = self.density(altitude_m)?;
        Ok(self.level_point(cache, altitude_m, density, speed))
    }

    fn level_point(
        &self,
        cache: &DerivedCache,
        altitude_m: f64,
        density: f64,
        speed_m_s: f64,
    ) -> FlightPoint {
        let lift_coefficient =
            2.0 * cache.weight_n / (density * cache.geometry.wing_area_m2 * speed_m_s * speed_m_s);
        FlightPoint {
            altitude_m,
            speed_m_s,
            incidence_rad: cache.incidence_for_lift_coefficient(lift_coefficient),
            density_ratio: density / self.atmosphere.reference_density(),
            lift_coefficient,
            density_kg_m3: density,
        }
    }

    fn cache(&self) -> Result<&'a DerivedCache, PerformanceError> {
        Ok(self.aircraft.derived()?)
    }

    fn density(&self, altitude_m: f64) -> Result<f64, PerformanceError> {
        Ok(self.atmosphere.density(altitude_m)?)
    }

    /// Level-flight drag at `point`, out of ground effect.
    fn level_drag(cache: &DerivedCache, point: &FlightPoint) -> f64 {
        point.dynamic_pressure()
            * cache.geometry.wing_area_m2
            * cache.drag_coefficient(point.lift_coefficient, 1.0)
    }

    /// Available thrust minus level-flight drag at `speed_m_s`.
    fn excess_thrust(
        &self,
        cache: &DerivedCache,
        thrust: &dyn ThrustSource,
        altitude_m: f64,
        density: f64,
        speed_m_s: f64,
    ) -> Result<f64, PerformanceError> {
        let point = self.level_point(cache, altitude_m, density, speed_m_s);
        Ok(thrust.available_thrust(point.altitude_m, point.speed_m_s)?
            - Self::level_drag(cache, &point))
    }

    /// Speed bracket for the numerical fallbacks, scaled on the reference speed at `density`.
    fn speed_search_bounds(cache: &DerivedCache, density: f64) -> (f64, f64) {
        let reference = (2.0 * cache.weight_n
            / (density * cache.geometry.wing_area_m2 * cache.lift_coefficient_at_max_glide_ratio))
            .sqrt();
        (0.05 * reference, 20.0 * reference)
    }
}

fn positive(name: &str, value: f64) -> Result<f64, PerformanceError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PerformanceError::InvalidConfiguration(format!(
            "{name} must be finite and > 0, got {value}"
        )))
    }
}

fn non_negative(name: &str, value: f64) -> Result<f64, PerformanceError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PerformanceError::InvalidConfiguration(format!(
            "{name} must be finite and >= 0, got {value}"
        )))
    }
}
