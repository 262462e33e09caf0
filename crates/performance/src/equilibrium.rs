//! Level-flight speeds, the thrust/drag velocity interval and the ceiling.

use flight_atmosphere::AtmosphereError;
use flight_propulsion::ThrustSource;
use log::{debug, warn};

use crate::numeric::{bisect, golden_section_max};
use crate::{PerformanceError, PerformanceSolver, positive};

/// Highest altitude any atmosphere is searched to for a ceiling (m).
const CEILING_SEARCH_CAP_M: f64 = 47_000.0;
/// Distance kept from an exclusive upper altitude bound (m).
const CEILING_EDGE_M: f64 = 1.0e-3;
const CEILING_TOLERANCE_M: f64 = 1.0e-3;
const SPEED_TOLERANCE_M_S: f64 = 1.0e-9;

impl PerformanceSolver<'_> {
    /// Speed at which lift balances weight with the maximum-glide-ratio lift coefficient.
    pub fn compute_reference_speed(&self, altitude_m: f64) -> Result<f64, PerformanceError> {
        let lift_coefficient = self.cache()?.lift_coefficient_at_max_glide_ratio;
        self.compute_reference_speed_at(altitude_m, lift_coefficient)
    }

    /// `v = √(2W / (ρ S C_L))`.
    pub fn compute_reference_speed_at(
        &self,
        altitude_m: f64,
        lift_coefficient: f64,
    ) -> Result<f64, PerformanceError> {
        let cache = self.cache()?;
        let weight = positive("weight", cache.weight_n)?;
        let area = positive("wing area", cache.geometry.wing_area_m2)?;
        let lift_coefficient = positive("lift coefficient", lift_coefficient)?;
        let density = self.density(altitude_m)?;
        Ok((2.0 * weight / (density * area * lift_coefficient)).sqrt())
    }

    pub fn compute_stall_speed(
        &self,
        altitude_m: f64,
        max_lift_coefficient: f64,
    ) -> Result<f64, PerformanceError> {
        self.compute_reference_speed_at(altitude_m, max_lift_coefficient)
    }

    /// Lift-off speed, [`crate::TAKE_OFF_SPEED_FACTOR`] times the stall speed.
    pub fn compute_take_off_speed(&self, altitude_m: f64) -> Result<f64, PerformanceError> {
        let max_lift = self.cache()?.polar.max_lift;
        Ok(crate::TAKE_OFF_SPEED_FACTOR * self.compute_stall_speed(altitude_m, max_lift)?)
    }

    /// Approach speed, [`crate::LANDING_SPEED_FACTOR`] times the stall speed.
    pub fn compute_landing_speed(&self, altitude_m: f64) -> Result<f64, PerformanceError> {
        let max_lift = self.cache()?.polar.max_lift;
        Ok(crate::LANDING_SPEED_FACTOR * self.compute_stall_speed(altitude_m, max_lift)?)
    }

    /// Slowest and fastest speeds at which available thrust equals level-flight drag.
    pub fn compute_velocity_interval_for_fixed_thrust(
        &self,
        altitude_m: f64,
        thrust: &dyn ThrustSource,
    ) -> Result<(f64, f64), PerformanceError> {
        let cache = self.cache()?;
        let density = self.density(altitude_m)?;
        let area = cache.geometry.wing_area_m2;
        let weight = cache.weight_n;
        let cd0 = cache.polar.zero_lift_drag;
        let k = cache.polar.induced_drag_factor;

        if thrust.is_speed_independent() {
            let thrust_n = thrust.available_thrust(altitude_m, 0.0)?;
            let discriminant = thrust_n * thrust_n - 4.0 * cd0 * k * weight * weight;
            if thrust_n <= 0.0 || discriminant < 0.0 {
                return Err(PerformanceError::NoEquilibrium(format!(
                    "{thrust_n:.1} N cannot balance the minimum drag {:.1} N at {altitude_m} m",
                    weight / cache.max_glide_ratio
                )));
            }
            let root = discriminant.sqrt();
            let scale = density * area * cd0;
            let low = ((thrust_n - root) / scale).sqrt();
            let high = ((thrust_n + root) / scale).sqrt();
            debug!("velocity interval at {altitude_m} m (closed form): [{low:.3}, {high:.3}] m/s");
            return Ok((low, high));
        }

        warn!("speed-dependent thrust: velocity interval at {altitude_m} m found numerically");
        let excess = |speed: f64| self.excess_thrust(cache, thrust, altitude_m, density, speed);
        let (lower, upper) = Self::speed_search_bounds(cache, density);
        let (best_speed, best_excess) =
            golden_section_max(&excess, lower, upper, SPEED_TOLERANCE_M_S * upper)?;
        if best_excess <= 0.0 {
            return Err(PerformanceError::NoEquilibrium(format!(
                "thrust never exceeds drag at {altitude_m} m (best margin {best_excess:.2} N)"
            )));
        }
        let low = bisect(&excess, lower, best_speed, SPEED_TOLERANCE_M_S * upper)?;
        let high = bisect(&excess, best_speed, upper, SPEED_TOLERANCE_M_S * upper)?;
        debug!("velocity interval at {altitude_m} m (numerical): [{low:.3}, {high:.3}] m/s");
        Ok((low, high))
    }

    /// Altitude at which the velocity interval shrinks to a single speed.
    pub fn compute_max_flight_altitude(
        &self,
        thrust: &dyn ThrustSource,
    ) -> Result<f64, PerformanceError> {
        let cap = self.atmosphere.max_altitude().min(CEILING_SEARCH_CAP_M) - CEILING_EDGE_M;
        let margin_at_ground = self.thrust_margin(0.0, thrust)?;
        if margin_at_ground <= 0.0 {
            return Err(PerformanceError::NoEquilibrium(
                "level flight is impossible at sea level".into(),
            ));
        }
        if self.thrust_margin(cap, thrust)? > 0.0 {
            return Err(AtmosphereError::Domain {
                model: self.atmosphere(),
                quantity: "ceiling altitude",
                value: cap,
            }
            .into());
        }
        let ceiling = bisect(
            |altitude| self.thrust_margin(altitude, thrust),
            0.0,
            cap,
            CEILING_TOLERANCE_M,
        )?;
        debug!("ceiling of '{}': {ceiling:.1} m", self.aircraft.name());
        Ok(ceiling)
    }

    /// Positive while level flight is sustainable at `altitude_m`.
    ///
    /// Closed form `f_max T / W − 1`; for speed-dependent thrust the best `(T − D) / W`.
    fn thrust_margin(
        &self,
        altitude_m: f64,
        thrust: &dyn ThrustSource,
    ) -> Result<f64, PerformanceError> {
        let cache = self.cache()?;
        if thrust.is_speed_independent() {
            let thrust_n = thrust.available_thrust(altitude_m, 0.0)?;
            return Ok(cache.max_glide_ratio * thrust_n / cache.weight_n - 1.0);
        }
        let density = self.density(altitude_m)?;
        let (lower, upper) = Self::speed_search_bounds(cache, density);
        let (_, best) = golden_section_max(
            |speed| self.excess_thrust(cache, thrust, altitude_m, density, speed),
            lower,
            upper,
            SPEED_TOLERANCE_M_S * upper,
        )?;
        Ok(best / cache.weight_n)
    }
}
