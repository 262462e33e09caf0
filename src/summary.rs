//! One-pass collection of the headline performance figures at a given altitude.

use flight_aircraft::AircraftConfiguration;
use flight_atmosphere::AtmosphereModel;
use flight_performance::{PerformanceError, PerformanceSolver};
use flight_propulsion::ThrustSource;
use log::debug;
use serde::Serialize;

/// Performance figures of one aircraft at one altitude.
///
/// Figures that need a thrust curve or a fuel model, or that have no physical solution at this
/// altitude, are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub aircraft: String,
    pub atmosphere: AtmosphereModel,
    pub altitude_m: f64,
    pub weight_n: f64,
    pub wing_loading_pa: f64,
    pub max_glide_ratio: f64,
    pub lift_coefficient_at_max_glide_ratio: f64,
    pub reference_speed_m_s: f64,
    pub stall_speed_m_s: f64,
    pub take_off_speed_m_s: f64,
    pub landing_speed_m_s: f64,
    pub min_descent_gliding_slope_rad: f64,
    pub max_gliding_range_m: f64,
    pub max_gliding_time_s: f64,
    pub velocity_interval_m_s: Option<(f64, f64)>,
    pub max_ascension_speed_m_s: Option<f64>,
    pub max_ascension_slope: Option<f64>,
    pub max_climb_rate_m_s: Option<f64>,
    pub ceiling_m: Option<f64>,
    pub max_range_m: Option<f64>,
    pub endurance_s: Option<f64>,
}

impl PerformanceSummary {
    pub fn evaluate(
        aircraft: &AircraftConfiguration,
        atmosphere: &AtmosphereModel,
        altitude_m: f64,
        thrust: Option<&dyn ThrustSource>,
    ) -> Result<Self, PerformanceError> {
        let solver = PerformanceSolver::new(aircraft, atmosphere);
        let cache = aircraft.derived()?;
        let max_lift = cache.polar.max_lift;

        let mut summary = Self {
            aircraft: aircraft.name().to_string(),
            atmosphere: *atmosphere,
            altitude_m,
            weight_n: cache.weight_n,
            wing_loading_pa: cache.wing_loading_pa,
            max_glide_ratio: cache.max_glide_ratio,
            lift_coefficient_at_max_glide_ratio: cache.lift_coefficient_at_max_glide_ratio,
            reference_speed_m_s: solver.compute_reference_speed(altitude_m)?,
            stall_speed_m_s: solver.compute_stall_speed(altitude_m, max_lift)?,
            take_off_speed_m_s: solver.compute_take_off_speed(altitude_m)?,
            landing_speed_m_s: solver.compute_landing_speed(altitude_m)?,
            min_descent_gliding_slope_rad: solver.compute_min_descent_gliding_slope()?,
            max_gliding_range_m: solver.compute_max_gliding_range(altitude_m)?,
            max_gliding_time_s: solver.compute_max_gliding_time(altitude_m)?,
            velocity_interval_m_s: None,
            max_ascension_speed_m_s: None,
            max_ascension_slope: None,
            max_climb_rate_m_s: None,
            ceiling_m: None,
            max_range_m: None,
            endurance_s: None,
        };

        if let Some(thrust) = thrust {
            summary.velocity_interval_m_s = optional(
                "velocity interval",
                solver.compute_velocity_interval_for_fixed_thrust(altitude_m, thrust),
            )?;
            summary.max_ascension_speed_m_s =
                Some(solver.compute_max_ascension_speed(altitude_m, thrust)?);
            summary.max_ascension_slope =
                Some(solver.compute_max_ascension_slope(altitude_m, thrust)?);
            summary.max_climb_rate_m_s = Some(solver.compute_max_climb_rate(altitude_m, thrust)?);
            summary.ceiling_m = optional("ceiling", solver.compute_max_flight_altitude(thrust))?;
            if thrust.fuel_consumption().is_some() {
                summary.max_range_m = optional(
                    "range",
                    solver.compute_max_range_at_fixed_altitude(altitude_m, thrust),
                )?;
                summary.endurance_s =
                    optional("endurance", solver.compute_endurance(altitude_m, thrust))?;
            }
        }
        Ok(summary)
    }
}

/// Turn "no answer here" outcomes into `None` and keep every other error.
fn optional<T>(
    label: &str,
    result: Result<T, PerformanceError>,
) -> Result<Option<T>, PerformanceError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(
            err @ (PerformanceError::NoEquilibrium(_)
            | PerformanceError::Domain(_)
            | PerformanceError::InvalidConfiguration(_)),
        ) => {
            debug!("summary: no {label}: {err}");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
