//! Flight-performance engine for fixed-wing aircraft.
//!
//! The member crates are re-exported here: atmosphere models, the aircraft configuration
//! with its derived cache, thrust sources, the performance solver, record loading and export.
//! [`catalog`] turns loaded records into ready-to-solve aircraft and [`summary`] gathers the
//! usual performance figures in one pass.

pub mod catalog;
pub mod summary;

pub use flight_aircraft as aircraft;
pub use flight_atmosphere as atmosphere;
pub use flight_config as config;
pub use flight_core::{constants, units};
pub use flight_export as export;
pub use flight_performance as performance;
pub use flight_propulsion as propulsion;

pub use flight_aircraft::{AircraftConfiguration, AircraftError};
pub use flight_atmosphere::{AtmosphereError, AtmosphereModel};
pub use flight_performance::{FlightPoint, PerformanceError, PerformanceSolver};
pub use flight_propulsion::ThrustSource;
