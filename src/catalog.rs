//! Conversion of loaded aircraft records into solver-ready configurations.

use std::path::Path;

use flight_aircraft::{
    AircraftConfiguration, AircraftError, DragPolar, Geometry, MassBreakdown, RawInputs,
};
use flight_atmosphere::AtmosphereModel;
use flight_config::{AircraftConfig, ConfigError, load_aircraft};
use flight_core::constants::EARTH_GRAVITY_M_S2;
use flight_propulsion::ThrustSource;
use log::debug;
use thiserror::Error;

/// Errors surfaced when selecting or converting aircraft.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("aircraft '{0}' not found in catalog")]
    NotFound(String),
    #[error("aircraft catalog is empty")]
    EmptyCatalog,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("aircraft '{name}' is not physical: {source}")]
    Aircraft {
        name: String,
        #[source]
        source: AircraftError,
    },
}

/// A configured aircraft, the atmosphere it flies in, and its thrust curve if one was given.
#[derive(Debug)]
pub struct CatalogEntry {
    pub aircraft: AircraftConfiguration,
    pub atmosphere: AtmosphereModel,
    pub thrust: Option<Box<dyn ThrustSource>>,
}

/// Build the runtime aircraft, with a fresh cache, from a validated record.
pub fn from_config(config: &AircraftConfig) -> Result<CatalogEntry, CatalogError> {
    let mut geometry = Geometry::new(config.wing_area_m2, config.wingspan_m);
    if let Some(height) = config.wing_height_m {
        geometry.wing_height_m = height;
    }
    let mut polar = DragPolar::new(
        config.zero_lift_drag,
        config.induced_drag_factor,
        config.max_lift,
    );
    if let Some(slope) = config.lift_curve_slope {
        polar.lift_curve_slope = slope;
    }
    if let Some(incidence) = config.zero_lift_incidence_rad {
        polar.zero_lift_incidence = incidence;
    }
    let inputs = RawInputs {
        mass: MassBreakdown {
            empty_kg: config.empty_mass_kg,
            fuel_kg: config.fuel_mass_kg,
            payload_kg: config.payload_mass_kg,
        },
        geometry,
        polar,
        gravity_m_s2: EARTH_GRAVITY_M_S2,
    };
    let aircraft = AircraftConfiguration::from_inputs(config.name.clone(), inputs).map_err(
        |source| CatalogError::Aircraft {
            name: config.name.clone(),
            source,
        },
    )?;
    let thrust = config
        .thrust
        .as_ref()
        .map(|thrust| thrust.build(&config.name, config.atmosphere))
        .transpose()?;

    debug!(
        "catalog: '{}' in the {} atmosphere ({})",
        config.name,
        config.atmosphere,
        if thrust.is_some() { "powered" } else { "glider" }
    );
    Ok(CatalogEntry {
        aircraft,
        atmosphere: config.atmosphere,
        thrust,
    })
}

/// Select an aircraft by case-insensitive name, defaulting to the first powered entry.
pub fn select(
    configs: &[AircraftConfig],
    requested: Option<&str>,
) -> Result<CatalogEntry, CatalogError> {
    if configs.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }

    let chosen = if let Some(name) = requested {
        configs
            .iter()
            .find(|cfg| cfg.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?
    } else {
        configs
            .iter()
            .find(|cfg| cfg.thrust.is_some())
            .unwrap_or(&configs[0])
    };

    from_config(chosen)
}

/// Load a catalog file or directory and select one aircraft from it.
pub fn load<P: AsRef<Path>>(
    path: P,
    requested: Option<&str>,
) -> Result<CatalogEntry, CatalogError> {
    let configs = load_aircraft(path)?;
    select(&configs, requested)
}
