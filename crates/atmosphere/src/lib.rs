//! Atmosphere models supplying density, pressure, temperature and viscosity with altitude.
//!
//! Three interchangeable variants share one contract. The constant and linear models are only
//! meaningful in the lower troposphere (0–11 km); the standard model covers 0–47 km with a
//! four-layer temperature profile and an analytically integrated hydrostatic pressure law.

use std::fmt;
use std::str::FromStr;

use flight_core::constants::{GAMMA_AIR, MU_0, P_0, R_AIR, RHO_0, SUTHERLAND_K, T_0};
use flight_core::units::m_to_km;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod standard;

/// Altitude at which the linear density law reaches zero (m).
const LINEAR_ZERO_DENSITY_ALTITUDE_M: f64 = 20_000.0;

/// Closed set of atmosphere variants, dispatched through one contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AtmosphereModel {
    /// Sea-level conditions at every altitude.
    Constant,
    /// `σ = (20 − z_km) / (20 + z_km)`, density only; temperature follows the ISA profile.
    Linear,
    /// Four-layer standard atmosphere, 0–47 km.
    #[default]
    Standard,
}

/// Errors raised by the atmosphere models.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtmosphereError {
    #[error("{quantity} = {value} is outside the valid range of the {model} atmosphere")]
    Domain {
        model: AtmosphereModel,
        quantity: &'static str,
        value: f64,
    },
    #[error("{model} atmosphere inversion did not converge after {iterations} iterations")]
    Convergence {
        model: AtmosphereModel,
        iterations: usize,
    },
    #[error("unknown atmosphere model '{0}' (expected constant, linear or standard)")]
    UnknownModel(String),
}

/// Full atmospheric state at one altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtmosphereState {
    pub altitude_m: f64,
    pub density_ratio: f64,
    pub density_kg_m3: f64,
    pub pressure_pa: f64,
    pub temperature_k: f64,
    pub sound_speed_m_s: f64,
    pub dynamic_viscosity_pa_s: f64,
    pub kinematic_viscosity_m2_s: f64,
}

impl AtmosphereModel {
    pub const ALL: [AtmosphereModel; 3] = [
        AtmosphereModel::Constant,
        AtmosphereModel::Linear,
        AtmosphereModel::Standard,
    ];

    /// Lower-case name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            AtmosphereModel::Constant => "constant",
            AtmosphereModel::Linear => "linear",
            AtmosphereModel::Standard => "standard",
        }
    }

    /// Sea-level reference density (kg/m³).
    pub fn reference_density(&self) -> f64 {
        RHO_0
    }

    /// Upper bound of the altitude range the model accepts (m).
    pub fn max_altitude(&self) -> f64 {
        match self {
            AtmosphereModel::Constant => f64::INFINITY,
            AtmosphereModel::Linear => LINEAR_ZERO_DENSITY_ALTITUDE_M,
            AtmosphereModel::Standard => standard::TOP_ALTITUDE_M,
        }
    }

    /// Ratio of local density to the reference density, in (0, 1].
    pub fn density_ratio(&self, altitude_m: f64) -> Result<f64, AtmosphereError> {
        self.check_altitude(altitude_m)?;
        Ok(match self {
            AtmosphereModel::Constant => 1.0,
            AtmosphereModel::Linear => {
                let z_km = m_to_km(altitude_m);
                let zero_km = m_to_km(LINEAR_ZERO_DENSITY_ALTITUDE_M);
                (zero_km - z_km) / (zero_km + z_km)
            }
            AtmosphereModel::Standard => standard::density(altitude_m) / RHO_0,
        })
    }

    /// Inverse of [`AtmosphereModel::density_ratio`].
    pub fn altitude_from_density_ratio(&self, density_ratio: f64) -> Result<f64, AtmosphereError> {
        let out_of_range = || AtmosphereError::Domain {
            model: *self,
            quantity: "density ratio",
            value: density_ratio,
        };
        if !density_ratio.is_finite() {
            return Err(out_of_range());
        }
        match self {
            AtmosphereModel::Constant => {
                if density_ratio == 1.0 {
                    Ok(0.0)
                } else {
                    Err(out_of_range())
                }
            }
            AtmosphereModel::Linear => {
                if density_ratio <= 0.0 || density_ratio > 1.0 {
                    return Err(out_of_range());
                }
                Ok(LINEAR_ZERO_DENSITY_ALTITUDE_M * (1.0 - density_ratio) / (1.0 + density_ratio))
            }
            AtmosphereModel::Standard => standard::altitude_from_density_ratio(density_ratio)
                .map_err(|err| match err {
                    standard::InversionError::OutOfRange => out_of_range(),
                    standard::InversionError::Budget(iterations) => AtmosphereError::Convergence {
                        model: *self,
                        iterations,
                    },
                }),
        }
    }

    /// Air density (kg/m³).
    pub fn density(&self, altitude_m: f64) -> Result<f64, AtmosphereError> {
        Ok(self.density_ratio(altitude_m)? * self.reference_density())
    }

    /// Air temperature (K).
    pub fn temperature(&self, altitude_m: f64) -> Result<f64, AtmosphereError> {
        self.check_altitude(altitude_m)?;
        Ok(match self {
            AtmosphereModel::Constant => T_0,
            AtmosphereModel::Linear | AtmosphereModel::Standard => {
                standard::temperature(altitude_m)
            }
        })
    }

    /// Static pressure (Pa).
    pub fn pressure(&self, altitude_m: f64) -> Result<f64, AtmosphereError> {
        self.check_altitude(altitude_m)?;
        match self {
            AtmosphereModel::Constant => Ok(P_0),
            AtmosphereModel::Linear => {
                Ok(self.density(altitude_m)? * R_AIR * self.temperature(altitude_m)?)
            }
            AtmosphereModel::Standard => Ok(standard::pressure(altitude_m)),
        }
    }

    /// Speed of sound (m/s).
    pub fn sound_speed(&self, altitude_m: f64) -> Result<f64, AtmosphereError> {
        let temperature = self.temperature(altitude_m)?;
        Ok((GAMMA_AIR * R_AIR * temperature).sqrt())
    }

    /// Dynamic viscosity from Sutherland's law (kg/(m·s)).
    pub fn dynamic_viscosity(&self, altitude_m: f64) -> Result<f64, AtmosphereError> {
        let temperature = self.temperature(altitude_m)?;
        Ok(MU_0 * (temperature / T_0).powf(1.5) * (T_0 + SUTHERLAND_K)
            / (temperature + SUTHERLAND_K))
    }

    /// Kinematic viscosity (m²/s).
    pub fn kinematic_viscosity(&self, altitude_m: f64) -> Result<f64, AtmosphereError> {
        Ok(self.dynamic_viscosity(altitude_m)? / self.density(altitude_m)?)
    }

    /// Every derived quantity at one altitude.
    pub fn state(&self, altitude_m: f64) -> Result<AtmosphereState, AtmosphereError> {
        let density_ratio = self.density_ratio(altitude_m)?;
        let density = density_ratio * self.reference_density();
        let dynamic_viscosity = self.dynamic_viscosity(altitude_m)?;
        Ok(AtmosphereState {
            altitude_m,
            density_ratio,
            density_kg_m3: density,
            pressure_pa: self.pressure(altitude_m)?,
            temperature_k: self.temperature(altitude_m)?,
            sound_speed_m_s: self.sound_speed(altitude_m)?,
            dynamic_viscosity_pa_s: dynamic_viscosity,
            kinematic_viscosity_m2_s: dynamic_viscosity / density,
        })
    }

    fn check_altitude(&self, altitude_m: f64) -> Result<(), AtmosphereError> {
        let valid = match self {
            AtmosphereModel::Constant => altitude_m.is_finite(),
            AtmosphereModel::Linear => {
                altitude_m.is_finite()
                    && altitude_m >= 0.0
                    && altitude_m < LINEAR_ZERO_DENSITY_ALTITUDE_M
            }
            AtmosphereModel::Standard => {
                altitude_m.is_finite() && (0.0..=standard::TOP_ALTITUDE_M).contains(&altitude_m)
            }
        };
        if valid {
            Ok(())
        } else {
            Err(AtmosphereError::Domain {
                model: *self,
                quantity: "altitude",
                value: altitude_m,
            })
        }
    }
}

impl fmt::Display for AtmosphereModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AtmosphereModel {
    type Err = AtmosphereError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        AtmosphereModel::ALL
            .into_iter()
            .find(|model| model.name() == lower)
            .ok_or_else(|| AtmosphereError::UnknownModel(s.to_string()))
    }
}

impl TryFrom<String> for AtmosphereModel {
    type Error = AtmosphereError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AtmosphereModel> for String {
    fn from(value: AtmosphereModel) -> Self {
        value.name().to_string()
    }
}
