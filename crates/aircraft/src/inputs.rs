//! Freely mutable aircraft parameters.

use serde::{Deserialize, Serialize};

use crate::AircraftError;

/// Ground-roll wing height used when a record does not give one (m).
pub const DEFAULT_WING_HEIGHT_M: f64 = 1.5;
/// Thin-airfoil lift-curve slope (1/rad).
pub const DEFAULT_LIFT_CURVE_SLOPE: f64 = 2.0 * std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MassComponent {
    Empty,
    Fuel,
    Payload,
}

impl MassComponent {
    pub fn name(&self) -> &'static str {
        match self {
            MassComponent::Empty => "empty_mass",
            MassComponent::Fuel => "fuel_mass",
            MassComponent::Payload => "payload_mass",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolarCoefficient {
    /// `C_D0`
    ZeroLiftDrag,
    /// `k` in `C_D = C_D0 + k C_L²`
    InducedDragFactor,
    /// `C_L_max`
    MaxLift,
    /// `C_Lα` (1/rad)
    LiftCurveSlope,
    /// `α0` (rad)
    ZeroLiftIncidence,
}

impl PolarCoefficient {
    pub fn name(&self) -> &'static str {
        match self {
            PolarCoefficient::ZeroLiftDrag => "C_D_0",
            PolarCoefficient::InducedDragFactor => "induced_drag_factor",
            PolarCoefficient::MaxLift => "C_L_max",
            PolarCoefficient::LiftCurveSlope => "C_L_alpha",
            PolarCoefficient::ZeroLiftIncidence => "alpha_0",
        }
    }
}

/// Mass breakdown (kg). Every component is finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MassBreakdown {
    pub empty_kg: f64,
    pub fuel_kg: f64,
    pub payload_kg: f64,
}

impl MassBreakdown {
    pub fn total_kg(&self) -> f64 {
        self.empty_kg + self.fuel_kg + self.payload_kg
    }

    pub fn zero_fuel_kg(&self) -> f64 {
        self.empty_kg + self.payload_kg
    }

    pub fn get(&self, component: MassComponent) -> f64 {
        match component {
            MassComponent::Empty => self.empty_kg,
            MassComponent::Fuel => self.fuel_kg,
            MassComponent::Payload => self.payload_kg,
        }
    }

    pub(crate) fn set(&mut self, component: MassComponent, value: f64) {
        match component {
            MassComponent::Empty => self.empty_kg = value,
            MassComponent::Fuel => self.fuel_kg = value,
            MassComponent::Payload => self.payload_kg = value,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), AircraftError> {
        for component in [MassComponent::Empty, MassComponent::Fuel, MassComponent::Payload] {
            check_mass(component, self.get(component))?;
        }
        Ok(())
    }
}

pub(crate) fn check_mass(component: MassComponent, value: f64) -> Result<(), AircraftError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AircraftError::invalid(component.name(), value, "must be finite and >= 0"))
    }
}

/// Wing geometry (m, m²).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub wing_area_m2: f64,
    pub wingspan_m: f64,
    /// Height of the wing above the runway during the ground roll.
    pub wing_height_m: f64,
}

impl Geometry {
    pub fn new(wing_area_m2: f64, wingspan_m: f64) -> Self {
        Self {
            wing_area_m2,
            wingspan_m,
            wing_height_m: DEFAULT_WING_HEIGHT_M,
        }
    }

    /// `b² / S`
    pub fn aspect_ratio(&self) -> f64 {
        self.wingspan_m * self.wingspan_m / self.wing_area_m2
    }

    pub(crate) fn validate(&self) -> Result<(), AircraftError> {
        let checks = [
            ("wing_area", self.wing_area_m2),
            ("wingspan", self.wingspan_m),
            ("wing_height", self.wing_height_m),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(AircraftError::invalid(name, value, "must be finite and > 0"));
            }
        }
        Ok(())
    }
}

/// Parabolic drag polar plus the linear lift curve used to recover incidences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragPolar {
    pub zero_lift_drag: f64,
    pub induced_drag_factor: f64,
    pub max_lift: f64,
    pub lift_curve_slope: f64,
    pub zero_lift_incidence: f64,
}

impl DragPolar {
    pub fn new(zero_lift_drag: f64, induced_drag_factor: f64, max_lift: f64) -> Self {
        Self {
            zero_lift_drag,
            induced_drag_factor,
            max_lift,
            lift_curve_slope: DEFAULT_LIFT_CURVE_SLOPE,
            zero_lift_incidence: 0.0,
        }
    }

    /// Induced-drag factor of an elliptic-loading wing with Oswald efficiency `e`.
    pub fn induced_drag_factor_from_oswald(aspect_ratio: f64, oswald_efficiency: f64) -> f64 {
        1.0 / (std::f64::consts::PI * aspect_ratio * oswald_efficiency)
    }

    pub fn get(&self, coefficient: PolarCoefficient) -> f64 {
        match coefficient {
            PolarCoefficient::ZeroLiftDrag => self.zero_lift_drag,
            PolarCoefficient::InducedDragFactor => self.induced_drag_factor,
            PolarCoefficient::MaxLift => self.max_lift,
            PolarCoefficient::LiftCurveSlope => self.lift_curve_slope,
            PolarCoefficient::ZeroLiftIncidence => self.zero_lift_incidence,
        }
    }

    pub(crate) fn set(&mut self, coefficient: PolarCoefficient, value: f64) {
        match coefficient {
            PolarCoefficient::ZeroLiftDrag => self.zero_lift_drag = value,
            PolarCoefficient::InducedDragFactor => self.induced_drag_factor = value,
            PolarCoefficient::MaxLift => self.max_lift = value,
            PolarCoefficient::LiftCurveSlope => self.lift_curve_slope = value,
            PolarCoefficient::ZeroLiftIncidence => self.zero_lift_incidence = value,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), AircraftError> {
        for coefficient in [
            PolarCoefficient::ZeroLiftDrag,
            PolarCoefficient::InducedDragFactor,
            PolarCoefficient::MaxLift,
            PolarCoefficient::LiftCurveSlope,
            PolarCoefficient::ZeroLiftIncidence,
        ] {
            check_coefficient(coefficient, self.get(coefficient))?;
        }
        Ok(())
    }
}

pub(crate) fn check_coefficient(
    coefficient: PolarCoefficient,
    value: f64,
) -> Result<(), AircraftError> {
    let (valid, rule) = match coefficient {
        PolarCoefficient::ZeroLiftIncidence => (true, ""),
        PolarCoefficient::ZeroLiftDrag
        | PolarCoefficient::InducedDragFactor
        | PolarCoefficient::MaxLift
        | PolarCoefficient::LiftCurveSlope => (value > 0.0, "must be > 0"),
    };
    if !value.is_finite() {
        return Err(AircraftError::invalid(coefficient.name(), value, "must be finite"));
    }
    if valid {
        Ok(())
    } else {
        Err(AircraftError::invalid(coefficient.name(), value, rule))
    }
}

/// Everything a caller may change between two recomputations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    pub mass: MassBreakdown,
    pub geometry: Geometry,
    pub polar: DragPolar,
    pub gravity_m_s2: f64,
}

impl RawInputs {
    pub(crate) fn validate(&self) -> Result<(), AircraftError> {
        self.mass.validate()?;
        self.geometry.validate()?;
        self.polar.validate()?;
        if !(self.gravity_m_s2.is_finite() && self.gravity_m_s2 > 0.0) {
            return Err(AircraftError::invalid(
                "gravity",
                self.gravity_m_s2,
                "must be finite and > 0",
            ));
        }
        if self.mass.total_kg() <= 0.0 {
            return Err(AircraftError::invalid(
                "total_mass",
                self.mass.total_kg(),
                "must be > 0",
            ));
        }
        Ok(())
    }
}
