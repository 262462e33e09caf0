//! Climb performance from the excess-power balance `(T − D) v / W`.

use flight_propulsion::ThrustSource;
use log::{debug, warn};

use crate::numeric::golden_section_max;
use crate::{PerformanceError, PerformanceSolver};

const SPEED_TOLERANCE_M_S: f64 = 1.0e-9;

impl PerformanceSolver<'_> {
    /// Speed maximising the rate of climb at `altitude_m`.
    pub fn compute_max_ascension_speed(
        &self,
        altitude_m: f64,
        thrust: &dyn ThrustSource,
    ) -> Result<f64, PerformanceError> {
        let cache = self.cache()?;
        let density = self.density(altitude_m)?;

        if thrust.is_speed_independent() {
            let thrust_n = thrust.available_thrust(altitude_m, 0.0)?;
            let cd0 = cache.polar.zero_lift_drag;
            let k = cache.polar.induced_drag_factor;
            let weight = cache.weight_n;
            let root = (thrust_n * thrust_n + 12.0 * cd0 * k * weight * weight).sqrt();
            let speed_sq =
                (thrust_n + root) / (3.0 * density * cache.geometry.wing_area_m2 * cd0);
            return Ok(speed_sq.sqrt());
        }

        warn!("speed-dependent thrust: best climb speed at {altitude_m} m found numerically");
        let (lower, upper) = Self::speed_search_bounds(cache, density);
        let (speed, _) = golden_section_max(
            |speed| Ok(self.excess_thrust(cache, thrust, altitude_m, density, speed)? * speed),
            lower,
            upper,
            SPEED_TOLERANCE_M_S * upper,
        )?;
        Ok(speed)
    }

    /// Steepest climb gradient `(T − D) / W`, negative when level flight cannot be held.
    pub fn compute_max_ascension_slope(
        &self,
        altitude_m: f64,
        thrust: &dyn ThrustSource,
    ) -> Result<f64, PerformanceError> {
        let cache = self.cache()?;

        if thrust.is_speed_independent() {
            let thrust_n = thrust.available_thrust(altitude_m, 0.0)?;
            self.density(altitude_m)?;
            return Ok(thrust_n / cache.weight_n - 1.0 / cache.max_glide_ratio);
        }

        warn!("speed-dependent thrust: best climb gradient at {altitude_m} m found numerically");
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

    /// Rate of climb (m/s) at the best climb speed.
    pub fn compute_max_climb_rate(
        &self,
        altitude_m: f64,
        thrust: &dyn ThrustSource,
    ) -> Result<f64, PerformanceError> {
        let cache = self.cache()?;
        let density = self.density(altitude_m)?;
        let speed = self.compute_max_ascension_speed(altitude_m, thrust)?;
        let excess = self.excess_thrust(cache, thrust, altitude_m, density, speed)?;
        let rate = excess * speed / cache.weight_n;
        debug!("max climb rate at {altitude_m} m: {rate:.3} m/s at {speed:.2} m/s");
        Ok(rate)
    }
}
