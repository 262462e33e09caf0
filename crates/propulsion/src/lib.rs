//! Thrust sources and fuel-consumption descriptors consumed by the performance solver.
//!
//! Engine models proper (turbines, electric motors) live outside this workspace; anything that
//! can answer "how much thrust is available at this altitude and speed" plugs in through
//! [`ThrustSource`].

use std::fmt;

use flight_atmosphere::{AtmosphereError, AtmosphereModel};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or evaluating a thrust source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThrustError {
    #[error("atmosphere lookup failed: {0}")]
    Atmosphere(#[from] AtmosphereError),
    #[error("invalid thrust table: {0}")]
    InvalidTable(String),
    #[error("invalid thrust parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("invalid fuel consumption model: {0}")]
    InvalidFuelModel(&'static str),
}

/// How the powerplant turns fuel into thrust, as needed by the Breguet relations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FuelConsumption {
    /// Thrust-specific fuel consumption, kg of fuel per newton of thrust per second.
    Jet { tsfc_kg_per_n_s: f64 },
    /// Brake-specific fuel consumption (kg/J) and propeller efficiency.
    Propeller {
        bsfc_kg_per_j: f64,
        propeller_efficiency: f64,
    },
}

impl FuelConsumption {
    pub fn validate(&self) -> Result<(), ThrustError> {
        match *self {
            FuelConsumption::Jet { tsfc_kg_per_n_s } => {
                if !(tsfc_kg_per_n_s.is_finite() && tsfc_kg_per_n_s > 0.0) {
                    return Err(ThrustError::InvalidFuelModel("tsfc must be positive"));
                }
            }
            FuelConsumption::Propeller {
                bsfc_kg_per_j,
                propeller_efficiency,
            } => {
                if !(bsfc_kg_per_j.is_finite() && bsfc_kg_per_j > 0.0) {
                    return Err(ThrustError::InvalidFuelModel("bsfc must be positive"));
                }
                if !(propeller_efficiency > 0.0 && propeller_efficiency <= 1.0) {
                    return Err(ThrustError::InvalidFuelModel(
                        "propeller efficiency must lie in (0, 1]",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Available thrust as a function of altitude and airspeed.
pub trait ThrustSource: fmt::Debug {
    /// Thrust available at `altitude_m` and `speed_m_s` (N).
    fn available_thrust(&self, altitude_m: f64, speed_m_s: f64) -> Result<f64, ThrustError>;

    /// True when thrust does not vary with speed, enabling the closed-form solver paths.
    fn is_speed_independent(&self) -> bool {
        false
    }

    /// Fuel model used for range and endurance, if the source carries one.
    fn fuel_consumption(&self) -> Option<FuelConsumption> {
        None
    }
}

fn check_fuel(fuel: Option<FuelConsumption>) -> Result<Option<FuelConsumption>, ThrustError> {
    if let Some(model) = &fuel {
        model.validate()?;
    }
    Ok(fuel)
}

fn check_non_negative(name: &'static str, value: f64) -> Result<f64, ThrustError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ThrustError::InvalidParameter { name, value })
    }
}

/// Same thrust at every altitude and speed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantThrust {
    thrust_n: f64,
    fuel: Option<FuelConsumption>,
}

impl ConstantThrust {
    pub fn new(thrust_n: f64, fuel: Option<FuelConsumption>) -> Result<Self, ThrustError> {
        Ok(Self {
            thrust_n: check_non_negative("thrust_n", thrust_n)?,
            fuel: check_fuel(fuel)?,
        })
    }
}

impl ThrustSource for ConstantThrust {
    fn available_thrust(&self, _altitude_m: f64, _speed_m_s: f64) -> Result<f64, ThrustError> {
        Ok(self.thrust_n)
    }

    fn is_speed_independent(&self) -> bool {
        true
    }

    fn fuel_consumption(&self) -> Option<FuelConsumption> {
        self.fuel
    }
}

/// Sea-level thrust scaled by a power of the density ratio, `T = T₀ σⁿ`.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityScaledThrust {
    sea_level_thrust_n: f64,
    density_exponent: f64,
    atmosphere: AtmosphereModel,
    fuel: Option<FuelConsumption>,
}

impl DensityScaledThrust {
    pub fn new(
        sea_level_thrust_n: f64,
        density_exponent: f64,
        atmosphere: AtmosphereModel,
        fuel: Option<FuelConsumption>,
    ) -> Result<Self, ThrustError> {
        Ok(Self {
            sea_level_thrust_n: check_non_negative("sea_level_thrust_n", sea_level_thrust_n)?,
            density_exponent: check_non_negative("density_exponent", density_exponent)?,
            atmosphere,
            fuel: check_fuel(fuel)?,
        })
    }

    pub fn atmosphere(&self) -> AtmosphereModel {
        self.atmosphere
    }
}

impl ThrustSource for DensityScaledThrust {
    fn available_thrust(&self, altitude_m: f64, _speed_m_s: f64) -> Result<f64, ThrustError> {
        let sigma = self.atmosphere.density_ratio(altitude_m)?;
        Ok(self.sea_level_thrust_n * sigma.powf(self.density_exponent))
    }

    fn is_speed_independent(&self) -> bool {
        true
    }

    fn fuel_consumption(&self) -> Option<FuelConsumption> {
        self.fuel
    }
}

/// Thrust falling linearly with airspeed, `T = max(T_static − a·v, 0) σⁿ`.
///
/// A rough stand-in for a fixed-pitch propeller; the solver handles it through its numerical
/// fallback paths.
#[derive(Debug, Clone, PartialEq)]
pub struct TaperedThrust {
    static_thrust_n: f64,
    taper_n_per_m_s: f64,
    density_exponent: f64,
    atmosphere: AtmosphereModel,
    fuel: Option<FuelConsumption>,
}

impl TaperedThrust {
    pub fn new(
        static_thrust_n: f64,
        taper_n_per_m_s: f64,
        density_exponent: f64,
        atmosphere: AtmosphereModel,
        fuel: Option<FuelConsumption>,
    ) -> Result<Self, ThrustError> {
        Ok(Self {
            static_thrust_n: check_non_negative("static_thrust_n", static_thrust_n)?,
            taper_n_per_m_s: check_non_negative("taper_n_per_m_s", taper_n_per_m_s)?,
            density_exponent: check_non_negative("density_exponent", density_exponent)?,
            atmosphere,
            fuel: check_fuel(fuel)?,
        })
    }
}

impl ThrustSource for TaperedThrust {
    fn available_thrust(&self, altitude_m: f64, speed_m_s: f64) -> Result<f64, ThrustError> {
        let sigma = self.atmosphere.density_ratio(altitude_m)?;
        let thrust = (self.static_thrust_n - self.taper_n_per_m_s * speed_m_s.max(0.0)).max(0.0);
        Ok(thrust * sigma.powf(self.density_exponent))
    }

    fn fuel_consumption(&self) -> Option<FuelConsumption> {
        self.fuel
    }
}

/// Thrust tabulated against altitude, linearly interpolated and held flat past either end.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedThrust {
    altitudes_m: Vec<f64>,
    thrusts_n: Vec<f64>,
    fuel: Option<FuelConsumption>,
}

impl TabulatedThrust {
    pub fn new(
        altitudes_m: Vec<f64>,
        thrusts_n: Vec<f64>,
        fuel: Option<FuelConsumption>,
    ) -> Result<Self, ThrustError> {
        if altitudes_m.is_empty() {
            return Err(ThrustError::InvalidTable("table is empty".into()));
        }
        if altitudes_m.len() != thrusts_n.len() {
            return Err(ThrustError::InvalidTable(format!(
                "{} altitudes for {} thrust values",
                altitudes_m.len(),
                thrusts_n.len()
            )));
        }
        if altitudes_m.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(ThrustError::InvalidTable(
                "altitudes must be strictly increasing".into(),
            ));
        }
        for &thrust in &thrusts_n {
            check_non_negative("thrust_n", thrust)?;
        }
        Ok(Self {
            altitudes_m,
            thrusts_n,
            fuel: check_fuel(fuel)?,
        })
    }

    fn interpolate(&self, altitude_m: f64) -> f64 {
        let last = self.altitudes_m.len() - 1;
        if altitude_m <= self.altitudes_m[0] {
            return self.thrusts_n[0];
        }
        if altitude_m >= self.altitudes_m[last] {
            return self.thrusts_n[last];
        }
        let upper = self
            .altitudes_m
            .iter()
            .position(|&z| z > altitude_m)
            .unwrap_or(last);
        let (z0, z1) = (self.altitudes_m[upper - 1], self.altitudes_m[upper]);
        let (t0, t1) = (self.thrusts_n[upper - 1], self.thrusts_n[upper]);
        t0 + (t1 - t0) * (altitude_m - z0) / (z1 - z0)
    }
}

impl ThrustSource for TabulatedThrust {
    fn available_thrust(&self, altitude_m: f64, _speed_m_s: f64) -> Result<f64, ThrustError> {
        Ok(self.interpolate(altitude_m))
    }

    fn is_speed_independent(&self) -> bool {
        true
    }

    fn fuel_consumption(&self) -> Option<FuelConsumption> {
        self.fuel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_interpolates_and_holds_ends() {
        let table =
            TabulatedThrust::new(vec![0.0, 1_000.0, 3_000.0], vec![3_000.0, 2_800.0, 2_000.0], None)
                .unwrap();
        assert_eq!(table.available_thrust(-50.0, 0.0).unwrap(), 3_000.0);
        assert_eq!(table.available_thrust(500.0, 0.0).unwrap(), 2_900.0);
        assert_eq!(table.available_thrust(2_000.0, 0.0).unwrap(), 2_400.0);
        assert_eq!(table.available_thrust(9_000.0, 0.0).unwrap(), 2_000.0);
    }

    #[test]
    fn table_rejects_unsorted_altitudes() {
        let err = TabulatedThrust::new(vec![0.0, 0.0], vec![1.0, 1.0], None).unwrap_err();
        assert!(matches!(err, ThrustError::InvalidTable(_)));
    }

    #[test]
    fn tapered_thrust_never_goes_negative() {
        let source =
            TaperedThrust::new(2_000.0, 10.0, 1.0, AtmosphereModel::Constant, None).unwrap();
        assert_eq!(source.available_thrust(0.0, 100.0).unwrap(), 1_000.0);
        assert_eq!(source.available_thrust(0.0, 500.0).unwrap(), 0.0);
    }

    #[test]
    fn propeller_efficiency_is_bounded() {
        let fuel = FuelConsumption::Propeller {
            bsfc_kg_per_j: 8.5e-8,
            propeller_efficiency: 1.2,
        };
        assert!(ConstantThrust::new(1_000.0, Some(fuel)).is_err());
    }
}
