//! # Unit Conversions
//!
//! Multiplicative conversion factors between common imperial units and SI.
//! All calculations in spring_core run in SI (meters, pascals, kilograms,
//! newtons); these factors only apply at the edges.
//!
//! A value in a unit times its factor gives SI, and an SI value divided by the
//! factor gives the unit:
//!
//! ```rust
//! use spring_core::units::{Unit, INCH};
//!
//! let free_length_m = 2.0 * INCH;        // 2 in expressed in meters
//! let free_length_in = free_length_m / INCH;
//! assert!((free_length_in - 2.0).abs() < 1e-12);
//!
//! assert_eq!(Unit::Foot.to_si(1.0), 12.0 * INCH);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Inches to meters
pub const INCH: f64 = 0.0254;

/// Feet to meters
pub const FOOT: f64 = 12.0 * INCH;

/// ksi to pascals
pub const KSI: f64 = 6.89475908677537e6;

/// psi to pascals
pub const PSI: f64 = 6894.75729;

/// Pound-mass to kilograms
pub const POUND_MASS: f64 = 0.453592;

/// Ounce-mass to kilograms
pub const OUNCE_MASS: f64 = POUND_MASS / 16.0;

/// Pound-force to newtons
pub const POUND_FORCE: f64 = 4.44822;

/// Ounce-force to newtons
pub const OUNCE_FORCE: f64 = POUND_FORCE / 16.0;

/// Grains to kilograms
pub const GRAIN: f64 = 6.479891e-5;

/// Standard gravity (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.81;

// ============================================================================
// Unit Table
// ============================================================================

/// A unit with a fixed conversion factor to SI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unit {
    Inch,
    Foot,
    Ksi,
    Psi,
    PoundMass,
    OunceMass,
    PoundForce,
    OunceForce,
    Grain,
    StandardGravity,
}

impl Unit {
    /// Every unit in the table
    pub const ALL: [Unit; 10] = [
        Unit::Inch,
        Unit::Foot,
        Unit::Ksi,
        Unit::Psi,
        Unit::PoundMass,
        Unit::OunceMass,
        Unit::PoundForce,
        Unit::OunceForce,
        Unit::Grain,
        Unit::StandardGravity,
    ];

    /// Multiplier taking a value in this unit to SI
    pub fn factor(self) -> f64 {
        match self {
            Unit::Inch => INCH,
            Unit::Foot => FOOT,
            Unit::Ksi => KSI,
            Unit::Psi => PSI,
            Unit::PoundMass => POUND_MASS,
            Unit::OunceMass => OUNCE_MASS,
            Unit::PoundForce => POUND_FORCE,
            Unit::OunceForce => OUNCE_FORCE,
            Unit::Grain => GRAIN,
            Unit::StandardGravity => STANDARD_GRAVITY,
        }
    }

    /// Short symbol (e.g., "in", "lbf")
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Inch => "in",
            Unit::Foot => "ft",
            Unit::Ksi => "ksi",
            Unit::Psi => "psi",
            Unit::PoundMass => "lb",
            Unit::OunceMass => "oz",
            Unit::PoundForce => "lbf",
            Unit::OunceForce => "ozf",
            Unit::Grain => "gr",
            Unit::StandardGravity => "g",
        }
    }

    /// Long name (e.g., "inch", "pound-force")
    pub fn name(self) -> &'static str {
        match self {
            Unit::Inch => "inch",
            Unit::Foot => "foot",
            Unit::Ksi => "ksi",
            Unit::Psi => "psi",
            Unit::PoundMass => "pound-mass",
            Unit::OunceMass => "ounce-mass",
            Unit::PoundForce => "pound-force",
            Unit::OunceForce => "ounce-force",
            Unit::Grain => "grain",
            Unit::StandardGravity => "standard-gravity",
        }
    }

    /// SI unit the factor converts into
    pub fn si_symbol(self) -> &'static str {
        match self {
            Unit::Inch | Unit::Foot => "m",
            Unit::Ksi | Unit::Psi => "Pa",
            Unit::PoundMass | Unit::OunceMass | Unit::Grain => "kg",
            Unit::PoundForce | Unit::OunceForce => "N",
            Unit::StandardGravity => "m/s²",
        }
    }

    /// Convert a value in this unit to SI
    pub fn to_si(self, value: f64) -> f64 {
        value * self.factor()
    }

    /// Convert an SI value to this unit
    pub fn from_si(self, value_si: f64) -> f64 {
        value_si / self.factor()
    }

    /// Parse from a symbol or long name, case-insensitive
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let key = s.trim().to_lowercase().replace([' ', '_'], "-");
        Unit::ALL
            .into_iter()
            .find(|unit| unit.symbol() == key || unit.name() == key)
            .or(match key.as_str() {
                "inches" => Some(Unit::Inch),
                "feet" => Some(Unit::Foot),
                "grains" => Some(Unit::Grain),
                _ => None,
            })
            .ok_or_else(|| CalcError::invalid_input("unit", s, "Unknown unit symbol"))
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::str::FromStr for Unit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::from_str_flexible(s)
    }
}
