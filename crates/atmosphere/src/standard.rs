//! Four-layer standard atmosphere (0–47 km).
//!
//! Temperature is piecewise linear in altitude. Pressure comes from `dp = −ρ g₀ dh` integrated
//! in closed form inside each layer, the base pressure of every layer being propagated from the
//! one below so the profile is continuous at the boundaries.

use flight_core::constants::{G0, P_0, R_AIR, T_0};

pub(crate) const TOP_ALTITUDE_M: f64 = 47_000.0;

const MAX_BISECTION_ITERATIONS: usize = 200;
const ALTITUDE_TOLERANCE_M: f64 = 1.0e-7;

#[derive(Debug, Clone, Copy)]
struct Layer {
    base_altitude: f64,
    top_altitude: f64,
    base_temperature: f64,
    /// Temperature gradient (K/m).
    lapse_rate: f64,
}

const LAYERS: [Layer; 4] = [
    // Troposphere
    Layer {
        base_altitude: 0.0,
        top_altitude: 11_000.0,
        base_temperature: T_0,
        lapse_rate: -0.0065,
    },
    // Tropopause
    Layer {
        base_altitude: 11_000.0,
        top_altitude: 20_000.0,
        base_temperature: 216.65,
        lapse_rate: 0.0,
    },
    // Lower stratosphere
    Layer {
        base_altitude: 20_000.0,
        top_altitude: 32_000.0,
        base_temperature: 216.65,
        lapse_rate: 0.001,
    },
    // Upper stratosphere
    Layer {
        base_altitude: 32_000.0,
        top_altitude: TOP_ALTITUDE_M,
        base_temperature: 228.65,
        lapse_rate: 0.0028,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InversionError {
    OutOfRange,
    Budget(usize),
}

impl Layer {
    fn temperature(&self, altitude_m: f64) -> f64 {
        self.base_temperature + self.lapse_rate * (altitude_m - self.base_altitude)
    }

    fn pressure(&self, base_pressure: f64, altitude_m: f64) -> f64 {
        let dh = altitude_m - self.base_altitude;
        if self.lapse_rate == 0.0 {
            base_pressure * (-G0 * dh / (R_AIR * self.base_temperature)).exp()
        } else {
            let ratio = self.temperature(altitude_m) / self.base_temperature;
            base_pressure * ratio.powf(-G0 / (self.lapse_rate * R_AIR))
        }
    }
}

/// Layer holding `altitude_m` and the pressure at its base. Callers have checked the range.
fn locate(altitude_m: f64) -> (&'static Layer, f64) {
    let mut base_pressure = P_0;
    for layer in &LAYERS[..LAYERS.len() - 1] {
        if altitude_m <= layer.top_altitude {
            return (layer, base_pressure);
        }
        base_pressure = layer.pressure(base_pressure, layer.top_altitude);
    }
    (&LAYERS[LAYERS.len() - 1], base_pressure)
}

pub(crate) fn temperature(altitude_m: f64) -> f64 {
    let (layer, _) = locate(altitude_m);
    layer.temperature(altitude_m)
}

pub(crate) fn pressure(altitude_m: f64) -> f64 {
    let (layer, base_pressure) = locate(altitude_m);
    layer.pressure(base_pressure, altitude_m)
}

pub(crate) fn density(altitude_m: f64) -> f64 {
    let (layer, base_pressure) = locate(altitude_m);
    layer.pressure(base_pressure, altitude_m) / (R_AIR * layer.temperature(altitude_m))
}

fn density_ratio(altitude_m: f64) -> f64 {
    density(altitude_m) / flight_core::constants::RHO_0
}

/// Pick the layer by comparing `sigma` against the boundary ratios, then bisect inside it.
pub(crate) fn altitude_from_density_ratio(sigma: f64) -> Result<f64, InversionError> {
    if sigma > 1.0 || sigma < density_ratio(TOP_ALTITUDE_M) {
        return Err(InversionError::OutOfRange);
    }
    // The ISA sea-level density sits just below the 1.225 reference.
    if sigma >= density_ratio(0.0) {
        return Ok(0.0);
    }

    let layer = LAYERS
        .iter()
        .find(|layer| sigma >= density_ratio(layer.top_altitude))
        .unwrap_or(&LAYERS[LAYERS.len() - 1]);

    // σ decreases with altitude: `low` stays denser than the target, `high` thinner.
    let mut low = layer.base_altitude;
    let mut high = layer.top_altitude;
    for _ in 0..MAX_BISECTION_ITERATIONS {
        if high - low <= ALTITUDE_TOLERANCE_M {
            return Ok(0.5 * (low + high));
        }
        let mid = 0.5 * (low + high);
        if density_ratio(mid) > sigma {
            low = mid;
        } else {
            high = mid;
        }
    }
    Err(InversionError::Budget(MAX_BISECTION_ITERATIONS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn boundaries_are_continuous() {
        for layer in &LAYERS[1..] {
            let below = pressure(layer.base_altitude - 1.0e-6);
            let above = pressure(layer.base_altitude + 1.0e-6);
            assert_relative_eq!(below, above, max_relative = 1.0e-6);
        }
    }

    #[test]
    fn tropopause_matches_reference_values() {
        assert_relative_eq!(temperature(11_000.0), 216.65, epsilon = 1.0e-9);
        assert_relative_eq!(pressure(11_000.0), 22_632.0, epsilon = 5.0);
        assert_relative_eq!(pressure(20_000.0), 5_474.9, epsilon = 5.0);
    }
}
