//! Quantities derived from [`RawInputs`], written only by `AircraftConfiguration::recompute`.

use serde::Serialize;

use crate::inputs::{DragPolar, Geometry, RawInputs};

/// Snapshot of the inputs plus every quantity derived from them.
///
/// The geometry and polar are copied in so that readers of a fresh cache never mix values from
/// two different input states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedCache {
    pub geometry: Geometry,
    pub polar: DragPolar,
    pub gravity_m_s2: f64,
    pub mass_kg: f64,
    pub weight_n: f64,
    pub fuel_weight_n: f64,
    pub zero_fuel_weight_n: f64,
    pub wing_loading_pa: f64,
    pub max_glide_ratio: f64,
    pub lift_coefficient_at_max_glide_ratio: f64,
    /// `16 / b`, the McCormick ground-effect height scale (1/m).
    pub ground_effect_scale: f64,
}

impl DerivedCache {
    pub(crate) fn compute(inputs: &RawInputs) -> Self {
        let polar = inputs.polar;
        let g = inputs.gravity_m_s2;
        let k = polar.induced_drag_factor;
        let cd0 = polar.zero_lift_drag;
        let weight = inputs.mass.total_kg() * g;

        Self {
            geometry: inputs.geometry,
            polar,
            gravity_m_s2: g,
            mass_kg: inputs.mass.total_kg(),
            weight_n: weight,
            fuel_weight_n: inputs.mass.fuel_kg * g,
            zero_fuel_weight_n: inputs.mass.zero_fuel_kg() * g,
            wing_loading_pa: weight / inputs.geometry.wing_area_m2,
            max_glide_ratio: 1.0 / (2.0 * (k * cd0).sqrt()),
            lift_coefficient_at_max_glide_ratio: (cd0 / k).sqrt(),
            ground_effect_scale: 16.0 / inputs.geometry.wingspan_m,
        }
    }

    /// `C_D = C_D0 + φ k C_L²`, with `φ = 1` out of ground effect.
    pub fn drag_coefficient(&self, lift_coefficient: f64, ground_effect: f64) -> f64 {
        self.polar.zero_lift_drag
            + ground_effect * self.polar.induced_drag_factor * lift_coefficient * lift_coefficient
    }

    /// Lift-to-drag ratio at `lift_coefficient` out of ground effect.
    pub fn glide_ratio(&self, lift_coefficient: f64) -> f64 {
        lift_coefficient / self.drag_coefficient(lift_coefficient, 1.0)
    }

    /// Induced-drag multiplier φ at `height_m` above the ground (McCormick).
    pub fn ground_effect_coefficient(&self, height_m: f64) -> f64 {
        let height = height_m.max(0.0);
        if height >= self.geometry.wingspan_m {
            return 1.0;
        }
        let x = self.ground_effect_scale * height;
        let x2 = x * x;
        x2 / (1.0 + x2)
    }

    pub fn lift_coefficient_at_incidence(&self, incidence_rad: f64) -> f64 {
        self.polar.lift_curve_slope * (incidence_rad - self.polar.zero_lift_incidence)
    }

    pub fn incidence_for_lift_coefficient(&self, lift_coefficient: f64) -> f64 {
        self.polar.zero_lift_incidence + lift_coefficient / self.polar.lift_curve_slope
    }

    /// Lift coefficient minimising sink rate (and maximising propeller endurance), `√(3 C_D0/k)`.
    pub fn min_sink_lift_coefficient(&self) -> f64 {
        (3.0 * self.polar.zero_lift_drag / self.polar.induced_drag_factor).sqrt()
    }

    /// Lift coefficient maximising `√C_L / C_D` (jet range at constant altitude), `√(C_D0/(3k))`.
    pub fn max_range_lift_coefficient(&self) -> f64 {
        (self.polar.zero_lift_drag / (3.0 * self.polar.induced_drag_factor)).sqrt()
    }
}
