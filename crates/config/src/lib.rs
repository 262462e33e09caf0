//! Aircraft records and their loaders.
//!
//! Records come from a YAML list, a single TOML file, or a directory of TOML files. Every field
//! is optional at the serde level so that a missing one is reported by name through
//! [`ConfigError::MissingParameter`] rather than as an opaque parse failure.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use flight_atmosphere::{AtmosphereError, AtmosphereModel};
use flight_propulsion::{
    ConstantThrust, DensityScaledThrust, FuelConsumption, TabulatedThrust, TaperedThrust,
    ThrustError, ThrustSource,
};
use serde::Deserialize;
use thiserror::Error;

/// Aircraft record exactly as written in a catalog file.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AircraftRecord {
    pub name: Option<String>,
    pub empty_mass: Option<f64>,
    pub fuel_mass: Option<f64>,
    pub payload_mass: Option<f64>,
    pub wing_area: Option<f64>,
    pub wingspan: Option<f64>,
    pub wing_height: Option<f64>,
    #[serde(rename = "C_D_0")]
    pub zero_lift_drag: Option<f64>,
    pub induced_drag_factor: Option<f64>,
    #[serde(rename = "C_L_max")]
    pub max_lift: Option<f64>,
    #[serde(rename = "C_L_alpha")]
    pub lift_curve_slope: Option<f64>,
    pub alpha_0: Option<f64>,
    pub atmosphere: Option<String>,
    pub thrust: Option<ThrustConfig>,
}

/// Thrust curve description attached to a record.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ThrustConfig {
    Constant {
        thrust_n: f64,
        #[serde(default)]
        fuel: Option<FuelConsumption>,
    },
    DensityScaled {
        sea_level_thrust_n: f64,
        #[serde(default)]
        density_exponent: Option<f64>,
        #[serde(default)]
        atmosphere: Option<String>,
        #[serde(default)]
        fuel: Option<FuelConsumption>,
    },
    Tapered {
        static_thrust_n: f64,
        taper_n_per_m_s: f64,
        #[serde(default)]
        density_exponent: Option<f64>,
        #[serde(default)]
        atmosphere: Option<String>,
        #[serde(default)]
        fuel: Option<FuelConsumption>,
    },
    Tabulated {
        altitudes_m: Vec<f64>,
        thrusts_n: Vec<f64>,
        #[serde(default)]
        fuel: Option<FuelConsumption>,
    },
}

/// Validated aircraft description with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftConfig {
    pub name: String,
    pub empty_mass_kg: f64,
    pub fuel_mass_kg: f64,
    pub payload_mass_kg: f64,
    pub wing_area_m2: f64,
    pub wingspan_m: f64,
    pub wing_height_m: Option<f64>,
    pub zero_lift_drag: f64,
    pub induced_drag_factor: f64,
    pub max_lift: f64,
    pub lift_curve_slope: Option<f64>,
    pub zero_lift_incidence_rad: Option<f64>,
    pub atmosphere: AtmosphereModel,
    pub thrust: Option<ThrustConfig>,
}

/// Errors that can occur while loading aircraft records.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read aircraft records: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("aircraft '{record}' is missing required parameter '{field}'")]
    MissingParameter { record: String, field: &'static str },
    #[error("unknown atmosphere model '{0}' (expected constant, linear or standard)")]
    UnknownAtmosphereModel(String),
    #[error("invalid thrust description for '{record}': {source}")]
    InvalidThrust {
        record: String,
        #[source]
        source: ThrustError,
    },
}

const UNNAMED: &str = "<unnamed>";

impl AircraftRecord {
    /// Check required fields and resolve the atmosphere name.
    pub fn validate(self) -> Result<AircraftConfig, ConfigError> {
        let record = self.name.clone().unwrap_or_else(|| UNNAMED.to_string());
        let require = |value: Option<f64>, field: &'static str| {
            value.ok_or_else(|| ConfigError::MissingParameter {
                record: record.clone(),
                field,
            })
        };

        let name = self.name.clone().ok_or_else(|| ConfigError::MissingParameter {
            record: UNNAMED.to_string(),
            field: "name",
        })?;
        let atmosphere = match &self.atmosphere {
            Some(value) => parse_atmosphere(value)?,
            None => AtmosphereModel::default(),
        };

        Ok(AircraftConfig {
            empty_mass_kg: require(self.empty_mass, "empty_mass")?,
            fuel_mass_kg: self.fuel_mass.unwrap_or(0.0),
            payload_mass_kg: self.payload_mass.unwrap_or(0.0),
            wing_area_m2: require(self.wing_area, "wing_area")?,
            wingspan_m: require(self.wingspan, "wingspan")?,
            wing_height_m: self.wing_height,
            zero_lift_drag: require(self.zero_lift_drag, "C_D_0")?,
            induced_drag_factor: require(self.induced_drag_factor, "induced_drag_factor")?,
            max_lift: require(self.max_lift, "C_L_max")?,
            lift_curve_slope: self.lift_curve_slope,
            zero_lift_incidence_rad: self.alpha_0,
            atmosphere,
            thrust: self.thrust,
            name,
        })
    }
}

impl ThrustConfig {
    /// Build the thrust source. Density-dependent curves without their own atmosphere use
    /// `default_atmosphere`.
    pub fn build(
        &self,
        record: &str,
        default_atmosphere: AtmosphereModel,
    ) -> Result<Box<dyn ThrustSource>, ConfigError> {
        let invalid = |source: ThrustError| ConfigError::InvalidThrust {
            record: record.to_string(),
            source,
        };
        let resolve = |name: &Option<String>| match name {
            Some(value) => parse_atmosphere(value),
            None => Ok(default_atmosphere),
        };

        Ok(match self {
            ThrustConfig::Constant { thrust_n, fuel } => {
                Box::new(ConstantThrust::new(*thrust_n, *fuel).map_err(invalid)?)
            }
            ThrustConfig::DensityScaled {
                sea_level_thrust_n,
                density_exponent,
                atmosphere,
                fuel,
            } => Box::new(
                DensityScaledThrust::new(
                    *sea_level_thrust_n,
                    density_exponent.unwrap_or(1.0),
                    resolve(atmosphere)?,
                    *fuel,
                )
                .map_err(invalid)?,
            ),
            ThrustConfig::Tapered {
                static_thrust_n,
                taper_n_per_m_s,
                density_exponent,
                atmosphere,
                fuel,
            } => Box::new(
                TaperedThrust::new(
                    *static_thrust_n,
                    *taper_n_per_m_s,
                    density_exponent.unwrap_or(1.0),
                    resolve(atmosphere)?,
                    *fuel,
                )
                .map_err(invalid)?,
            ),
            ThrustConfig::Tabulated {
                altitudes_m,
                thrusts_n,
                fuel,
            } => Box::new(
                TabulatedThrust::new(altitudes_m.clone(), thrusts_n.clone(), *fuel)
                    .map_err(invalid)?,
            ),
        })
    }
}

fn parse_atmosphere(value: &str) -> Result<AtmosphereModel, ConfigError> {
    AtmosphereModel::from_str(value).map_err(|err| match err {
        AtmosphereError::UnknownModel(name) => ConfigError::UnknownAtmosphereModel(name),
        _ => ConfigError::UnknownAtmosphereModel(value.to_string()),
    })
}

/// Load and validate aircraft from a YAML list, a TOML file, or a directory of TOML files.
pub fn load_aircraft<P: AsRef<Path>>(path: P) -> Result<Vec<AircraftConfig>, ConfigError> {
    load_records::<AircraftRecord, _>(path)?
        .into_iter()
        .map(AircraftRecord::validate)
        .collect()
}

/// Parse and validate one aircraft written as a TOML table.
pub fn parse_aircraft_toml(contents: &str) -> Result<AircraftConfig, ConfigError> {
    let record: AircraftRecord = toml::from_str(contents)?;
    record.validate()
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
name = "trainer"
empty_mass = 600.0
wing_area = 15.0
wingspan = 10.0
C_D_0 = 0.028
induced_drag_factor = 0.045
C_L_max = 1.6
"#;

    #[test]
    fn optional_masses_default_to_zero() {
        let config = parse_aircraft_toml(MINIMAL).unwrap();
        assert_eq!(config.fuel_mass_kg, 0.0);
        assert_eq!(config.payload_mass_kg, 0.0);
        assert_eq!(config.atmosphere, AtmosphereModel::Standard);
        assert!(config.thrust.is_none());
    }

    #[test]
    fn missing_field_is_named() {
        let contents = MINIMAL.replace("C_L_max = 1.6\n", "");
        match parse_aircraft_toml(&contents).unwrap_err() {
            ConfigError::MissingParameter { record, field } => {
                assert_eq!(record, "trainer");
                assert_eq!(field, "C_L_max");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_atmosphere_is_rejected() {
        let contents = format!("{MINIMAL}atmosphere = \"exponential\"\n");
        assert!(matches!(
            parse_aircraft_toml(&contents).unwrap_err(),
            ConfigError::UnknownAtmosphereModel(name) if name == "exponential"
        ));
    }

    #[test]
    fn thrust_table_builds_with_fuel_model() {
        let contents = format!(
            "{MINIMAL}\n[thrust]\ntype = \"tabulated\"\naltitudes_m = [0.0, 5000.0]\nthrusts_n = [2000.0, 1200.0]\n\n[thrust.fuel]\ntype = \"jet\"\ntsfc_kg_per_n_s = 1.7e-5\n"
        );
        let config = parse_aircraft_toml(&contents).unwrap();
        let thrust = config
            .thrust
            .as_ref()
            .unwrap()
            .build(&config.name, config.atmosphere)
            .unwrap();
        assert_eq!(thrust.available_thrust(2_500.0, 0.0).unwrap(), 1_600.0);
        assert!(matches!(
            thrust.fuel_consumption(),
            Some(FuelConsumption::Jet { .. })
        ));
    }

    #[test]
    fn mismatched_table_is_invalid_thrust() {
        let thrust = ThrustConfig::Tabulated {
            altitudes_m: vec![0.0, 1_000.0],
            thrusts_n: vec![1_000.0],
            fuel: None,
        };
        assert!(matches!(
            thrust.build("trainer", AtmosphereModel::Standard),
            Err(ConfigError::InvalidThrust { .. })
        ));
    }
}
