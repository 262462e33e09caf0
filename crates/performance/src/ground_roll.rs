//! Take-off and landing runs, integrated in the speed domain.
//!
//! Along the runway `m dv/dt = T − D − μ max(W − L, 0)`, so the distance is
//! `∫ v dv / a(v)` and the time `∫ dv / a(v)`. Both are evaluated with composite Simpson over a
//! fixed speed grid; the sign of the acceleration is checked at every node so the integral never
//! crosses a point where the aircraft would stop accelerating (or decelerating).

use flight_aircraft::DerivedCache;
use flight_propulsion::ThrustSource;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::numeric::{cumulative_simpson, even};
use crate::{PerformanceError, PerformanceSolver, non_negative, positive};

/// Lift-off speed as a multiple of the stall speed.
pub const TAKE_OFF_SPEED_FACTOR: f64 = 1.2;
/// Touchdown speed as a multiple of the stall speed.
pub const LANDING_SPEED_FACTOR: f64 = 1.3;

const GROUND_ROLL_INTERVALS: usize = 200;

/// Drag chute deployed for the whole landing roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragParachute {
    pub area_m2: f64,
    pub drag_coefficient: f64,
}

/// Take-off run from rest to lift-off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TakeOffRoll {
    pub altitude_m: f64,
    pub friction_coefficient: f64,
    /// Lift coefficient held while rolling. `None` uses the one minimising `D + μ (W − L)`.
    pub lift_coefficient: Option<f64>,
}

impl TakeOffRoll {
    pub fn new(altitude_m: f64, friction_coefficient: f64) -> Self {
        Self {
            altitude_m,
            friction_coefficient,
            lift_coefficient: None,
        }
    }
}

/// Landing run from touchdown to rest, engines at idle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingRoll {
    pub altitude_m: f64,
    pub rolling_friction: f64,
    /// Extra friction from the wheel brakes, added to the rolling friction.
    pub braking_friction: f64,
    pub lift_coefficient: f64,
    pub parachute: Option<DragParachute>,
}

impl LandingRoll {
    pub fn new(altitude_m: f64, rolling_friction: f64, lift_coefficient: f64) -> Self {
        Self {
            altitude_m,
            rolling_friction,
            braking_friction: 0.0,
            lift_coefficient,
            parachute: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroundRollSample {
    pub time_s: f64,
    pub distance_m: f64,
    pub speed_m_s: f64,
    pub acceleration_m_s2: f64,
    pub thrust_n: f64,
    pub lift_n: f64,
    pub drag_n: f64,
    pub friction_n: f64,
}

/// Integrated ground run, with samples in time order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundRollProfile {
    pub distance_m: f64,
    pub duration_s: f64,
    pub end_speed_m_s: f64,
    /// Energy absorbed by the wheel brakes (J); zero for take-off.
    pub braking_energy_j: f64,
    pub samples: Vec<GroundRollSample>,
}

#[derive(Debug, Clone, Copy)]
struct RollForces {
    thrust_n: f64,
    lift_n: f64,
    drag_n: f64,
    friction_n: f64,
    braking_n: f64,
}

impl RollForces {
    fn net(&self) -> f64 {
        self.thrust_n - self.drag_n - self.friction_n
    }
}

/// Aerodynamic setup shared by both runs.
struct RollAerodynamics<'c> {
    cache: &'c DerivedCache,
    density: f64,
    lift_coefficient: f64,
    drag_coefficient: f64,
    /// Extra drag area `C_D S` (m²), e.g. a parachute.
    extra_drag_area_m2: f64,
}

impl RollAerodynamics<'_> {
    fn forces(&self, speed_m_s: f64, thrust_n: f64, friction: f64, braking: f64) -> RollForces {
        let dynamic_pressure = 0.5 * self.density * speed_m_s * speed_m_s;
        let area = self.cache.geometry.wing_area_m2;
        let lift_n = dynamic_pressure * area * self.lift_coefficient;
        let drag_n = dynamic_pressure * (area * self.drag_coefficient + self.extra_drag_area_m2);
        let normal_n = (self.cache.weight_n - lift_n).max(0.0);
        RollForces {
            thrust_n,
            lift_n,
            drag_n,
            friction_n: (friction + braking) * normal_n,
            braking_n: braking * normal_n,
        }
    }
}

impl PerformanceSolver<'_> {
    /// Runway length from rest to lift-off at [`TAKE_OFF_SPEED_FACTOR`] times the stall speed.
    pub fn compute_take_off_distance_with_friction(
        &self,
        altitude_m: f64,
        friction_coefficient: f64,
        thrust: &dyn ThrustSource,
    ) -> Result<f64, PerformanceError> {
        let roll = TakeOffRoll::new(altitude_m, friction_coefficient);
        Ok(self.simulate_take_off(&roll, thrust)?.distance_m)
    }

    /// Runway length from touchdown at [`LANDING_SPEED_FACTOR`] times the stall speed to rest.
    pub fn compute_landing_distance(
        &self,
        altitude_m: f64,
        friction_coefficient: f64,
        lift_coefficient: f64,
    ) -> Result<f64, PerformanceError> {
        let roll = LandingRoll::new(altitude_m, friction_coefficient, lift_coefficient);
        Ok(self.simulate_landing(&roll)?.distance_m)
    }

    pub fn simulate_take_off(
        &self,
        roll: &TakeOffRoll,
        thrust: &dyn ThrustSource,
    ) -> Result<GroundRollProfile, PerformanceError> {
        let cache = self.cache()?;
        let friction = non_negative("friction coefficient", roll.friction_coefficient)?;
        let density = self.density(roll.altitude_m)?;
        let lift_off_speed = self.compute_take_off_speed(roll.altitude_m)?;

        let ground_effect = cache.ground_effect_coefficient(cache.geometry.wing_height_m);
        let induced = ground_effect * cache.polar.induced_drag_factor;
        let lift_coefficient = match roll.lift_coefficient {
            Some(value) => non_negative("roll lift coefficient", value)?,
            // L ≤ W up to lift-off at TAKE_OFF_SPEED_FACTOR × v_stall.
            None => (friction / (2.0 * induced)).clamp(
                0.0,
                cache.polar.max_lift / (TAKE_OFF_SPEED_FACTOR * TAKE_OFF_SPEED_FACTOR),
            ),
        };
        let aero = RollAerodynamics {
            cache,
            density,
            lift_coefficient,
            drag_coefficient: cache.drag_coefficient(lift_coefficient, ground_effect),
            extra_drag_area_m2: 0.0,
        };

        let nodes = speed_nodes(lift_off_speed);
        let mut forces = Vec::with_capacity(nodes.len());
        for &speed in &nodes {
            let thrust_n = thrust.available_thrust(roll.altitude_m, speed)?;
            let node = aero.forces(speed, thrust_n, friction, 0.0);
            if node.net() <= 0.0 {
                return Err(PerformanceError::InsufficientThrust { speed_m_s: speed });
            }
            forces.push(node);
        }

        let profile = integrate(&nodes, &forces, cache.mass_kg, RollDirection::Accelerating);
        debug!(
            "take-off of '{}' at {} m, mu = {friction}: {:.1} m in {:.1} s (C_L = {:.3})",
            self.aircraft.name(),
            roll.altitude_m,
            profile.distance_m,
            profile.duration_s,
            lift_coefficient
        );
        Ok(profile)
    }

    pub fn simulate_landing(
        &self,
        roll: &LandingRoll,
    ) -> Result<GroundRollProfile, PerformanceError> {
        let cache = self.cache()?;
        let friction = non_negative("rolling friction", roll.rolling_friction)?;
        let braking = non_negative("braking friction", roll.braking_friction)?;
        let lift_coefficient = non_negative("landing lift coefficient", roll.lift_coefficient)?;
        let extra_drag_area_m2 = match roll.parachute {
            Some(chute) => {
                positive("parachute area", chute.area_m2)?
                    * positive("parachute drag coefficient", chute.drag_coefficient)?
            }
            None => 0.0,
        };
        let density = self.density(roll.altitude_m)?;
        let touchdown_speed = self.compute_landing_speed(roll.altitude_m)?;

        let ground_effect = cache.ground_effect_coefficient(cache.geometry.wing_height_m);
        let aero = RollAerodynamics {
            cache,
            density,
            lift_coefficient,
            drag_coefficient: cache.drag_coefficient(lift_coefficient, ground_effect),
            extra_drag_area_m2,
        };

        let nodes = speed_nodes(touchdown_speed);
        let mut forces = Vec::with_capacity(nodes.len());
        for &speed in &nodes {
            let node = aero.forces(speed, 0.0, friction, braking);
            if node.net() >= 0.0 {
                return Err(PerformanceError::NoDeceleration { speed_m_s: speed });
            }
            forces.push(node);
        }

        let profile = integrate(&nodes, &forces, cache.mass_kg, RollDirection::Decelerating);
        debug!(
            "landing of '{}' at {} m: {:.1} m in {:.1} s, {:.0} J into the brakes",
            self.aircraft.name(),
            roll.altitude_m,
            profile.distance_m,
            profile.duration_s,
            profile.braking_energy_j
        );
        Ok(profile)
    }
}

fn speed_nodes(top_speed: f64) -> Vec<f64> {
    let n = even(GROUND_ROLL_INTERVALS);
    let step = top_speed / n as f64;
    (0..=n).map(|i| step * i as f64).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RollDirection {
    Accelerating,
    Decelerating,
}

/// Integrate time, distance and braking energy over ascending speed `nodes`.
///
/// For a landing the run is traversed from the top speed down, so the running totals are
/// measured back from the stop and flipped into time order.
fn integrate(
    nodes: &[f64],
    forces: &[RollForces],
    mass_kg: f64,
    direction: RollDirection,
) -> GroundRollProfile {
    let step = nodes.get(1).copied().unwrap_or(0.0);
    let rate: Vec<f64> = forces.iter().map(|f| f.net().abs() / mass_kg).collect();
    let time_integrand: Vec<f64> = rate.iter().map(|a| 1.0 / a).collect();
    let distance_integrand: Vec<f64> = nodes.iter().zip(&rate).map(|(v, a)| v / a).collect();
    let braking_integrand: Vec<f64> = nodes
        .iter()
        .zip(forces)
        .zip(&rate)
        .map(|((v, f), a)| f.braking_n * v / (mass_kg * a))
        .collect();

    let times = cumulative_simpson(&time_integrand, step);
    let distances = cumulative_simpson(&distance_integrand, step);
    let energies = cumulative_simpson(&braking_integrand, step);
    let duration_s = times.last().copied().unwrap_or(0.0);
    let distance_m = distances.last().copied().unwrap_or(0.0);
    let braking_energy_j = energies.last().copied().unwrap_or(0.0);

    let sample = |j: usize| {
        let node = &forces[2 * j];
        let (time_s, distance) = match direction {
            RollDirection::Accelerating => (times[j], distances[j]),
            RollDirection::Decelerating => (duration_s - times[j], distance_m - distances[j]),
        };
        GroundRollSample {
            time_s,
            distance_m: distance,
            speed_m_s: nodes[2 * j],
            acceleration_m_s2: node.net() / mass_kg,
            thrust_n: node.thrust_n,
            lift_n: node.lift_n,
            drag_n: node.drag_n,
            friction_n: node.friction_n,
        }
    };

    let (samples, end_speed_m_s): (Vec<GroundRollSample>, f64) = match direction {
        RollDirection::Accelerating => (
            (0..times.len()).map(sample).collect(),
            nodes.last().copied().unwrap_or(0.0),
        ),
        RollDirection::Decelerating => ((0..times.len()).rev().map(sample).collect(), 0.0),
    };

    GroundRollProfile {
        distance_m,
        duration_s,
        end_speed_m_s,
        braking_energy_j,
        samples,
    }
}
