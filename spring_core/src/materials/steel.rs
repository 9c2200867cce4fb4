//! Spring Steel
//!
//! Reference constants for carbon spring steel (music wire class).
//! Stored in the customary units they are published in and converted to SI
//! on access.

use crate::units::{INCH, POUND_MASS, PSI};

/// Young's modulus (psi)
pub const YOUNGS_MODULUS_PSI: f64 = 29e6;

/// Poisson ratio (dimensionless)
pub const POISSON_RATIO: f64 = 0.3;

/// Density (lb/in³)
pub const DENSITY_LB_IN3: f64 = 0.284;

/// Young's modulus in pascals
pub fn youngs_modulus_pa() -> f64 {
    YOUNGS_MODULUS_PSI * PSI
}

/// Density in kg/m³
pub fn density_kg_m3() -> f64 {
    DENSITY_LB_IN3 * POUND_MASS / INCH.powi(3)
}
