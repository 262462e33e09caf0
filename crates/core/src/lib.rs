//! Core constants and unit helpers shared across the flight-performance workspace.

/// Physical constants expressed in SI units.
pub mod constants {
    /// Standard gravity used by the hydrostatic atmosphere relations (m/s²).
    pub const G0: f64 = 9.80665;
    /// Gravity of the Earth environment used to turn masses into weights (m/s²).
    pub const EARTH_GRAVITY_M_S2: f64 = 9.81;
    /// Specific gas constant of dry air (J/(kg·K)).
    pub const R_AIR: f64 = 287.058;
    /// Heat capacity ratio of air.
    pub const GAMMA_AIR: f64 = 1.4;
    /// Sea-level reference density (kg/m³).
    pub const RHO_0: f64 = 1.225;
    /// Sea-level standard pressure (Pa).
    pub const P_0: f64 = 101_325.0;
    /// Sea-level standard temperature (K).
    pub const T_0: f64 = 288.15;
    /// Sutherland reference viscosity at `T_0` (kg/(m·s)).
    pub const MU_0: f64 = 1.7894e-5;
    /// Sutherland temperature for air (K).
    pub const SUTHERLAND_K: f64 = 110.4;
}

/// Unit conversion helpers for the SI boundary. The engine itself never converts.
pub mod units {
    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert kilometres per hour to metres per second.
    #[inline]
    pub fn kmh_to_ms(v: f64) -> f64 {
        v / 3.6
    }

    /// Convert metres per second to kilometres per hour.
    #[inline]
    pub fn ms_to_kmh(v: f64) -> f64 {
        v * 3.6
    }

    /// Convert knots to metres per second.
    #[inline]
    pub fn knots_to_ms(v: f64) -> f64 {
        v * 1_852.0 / 3_600.0
    }

    /// Convert feet to metres.
    #[inline]
    pub fn ft_to_m(v: f64) -> f64 {
        v * 0.3048
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::units::*;

    #[test]
    fn conversions_invert() {
        assert!((km_to_m(m_to_km(4_200.0)) - 4_200.0).abs() < 1e-9);
        assert!((ms_to_kmh(kmh_to_ms(180.0)) - 180.0).abs() < 1e-9);
        assert!((knots_to_ms(100.0) - 51.444_444).abs() < 1e-6);
        assert!((ft_to_m(10_000.0) - 3_048.0).abs() < 1e-9);
        assert!((rad_to_deg(deg_to_rad(7.5)) - 7.5).abs() < 1e-12);
    }
}
