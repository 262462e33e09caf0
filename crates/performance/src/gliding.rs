//! Unpowered equilibrium glide.

use flight_atmosphere::{AtmosphereError, AtmosphereModel};
use log::debug;

use crate::numeric::simpson;
use crate::{PerformanceError, PerformanceSolver, positive};

const GLIDE_TIME_INTERVALS: usize = 200;
/// Altitude at which the linear density law vanishes (m).
const LINEAR_ZERO_DENSITY_ALTITUDE_M: f64 = 20_000.0;

impl PerformanceSolver<'_> {
    /// Flattest glide path angle, `−1 / f_max` (rad).
    pub fn compute_min_descent_gliding_slope(&self) -> Result<f64, PerformanceError> {
        Ok(-1.0 / self.cache()?.max_glide_ratio)
    }

    /// Ground distance covered from `altitude_m` down to sea level at `f_max`.
    pub fn compute_max_gliding_range(&self, altitude_m: f64) -> Result<f64, PerformanceError> {
        let cache = self.cache()?;
        let altitude = self.glide_altitude(altitude_m)?;
        Ok(altitude * cache.max_glide_ratio)
    }

    /// Longest time aloft from `altitude_m`, gliding at the minimum-sink lift coefficient.
    pub fn compute_max_gliding_time(&self, altitude_m: f64) -> Result<f64, PerformanceError> {
        let lift_coefficient = self.cache()?.min_sink_lift_coefficient();
        self.compute_gliding_time(altitude_m, lift_coefficient)
    }

    /// Time to glide from `altitude_m` to sea level at a constant lift coefficient.
    ///
    /// At constant L/D the sink rate scales as `1/√σ`, so the time is
    /// `∫ √σ(h) dh / w₀` with `w₀` the sea-level sink rate.
    pub fn compute_gliding_time(
        &self,
        altitude_m: f64,
        lift_coefficient: f64,
    ) -> Result<f64, PerformanceError> {
        let cache = self.cache()?;
        let lift_coefficient = positive("lift coefficient", lift_coefficient)?;
        let altitude = self.glide_altitude(altitude_m)?;

        let path_angle = (1.0 / cache.glide_ratio(lift_coefficient)).atan();
        let sea_level_speed = (2.0 * cache.weight_n * path_angle.cos()
            / (self.atmosphere.reference_density()
                * cache.geometry.wing_area_m2
                * lift_coefficient))
            .sqrt();
        let sea_level_sink = sea_level_speed * path_angle.sin();

        let root_sigma_integral = match self.atmosphere {
            AtmosphereModel::Constant => altitude,
            AtmosphereModel::Linear => {
                let a = LINEAR_ZERO_DENSITY_ALTITUDE_M;
                a * (altitude / a).asin() + (a * a - altitude * altitude).sqrt() - a
            }
            AtmosphereModel::Standard => simpson(
                |h| Ok(self.atmosphere.density_ratio(h)?.sqrt()),
                0.0,
                altitude,
                GLIDE_TIME_INTERVALS,
            )?,
        };
        let time = root_sigma_integral / sea_level_sink;
        debug!("glide from {altitude} m at C_L = {lift_coefficient:.4}: {time:.1} s");
        Ok(time)
    }

    fn glide_altitude(&self, altitude_m: f64) -> Result<f64, PerformanceError> {
        if altitude_m.is_nan() || altitude_m < 0.0 {
            return Err(AtmosphereError::Domain {
                model: self.atmosphere(),
                quantity: "glide altitude",
                value: altitude_m,
            }
            .into());
        }
        self.atmosphere.density_ratio(altitude_m)?;
        Ok(altitude_m)
    }
}
