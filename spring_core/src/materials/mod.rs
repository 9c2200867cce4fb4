//! # Materials
//!
//! Spring wire materials and their mechanical constants. Only carbon spring
//! steel is supported.
//!
//! ## Example
//!
//! ```rust
//! use spring_core::materials::Material;
//!
//! let steel = Material::from_name("Steel").unwrap();
//! let g = steel.shear_modulus_pa();
//! assert!((g - steel.youngs_modulus_pa() / 2.6).abs() < 1.0);
//!
//! assert!(Material::from_name("titanium").is_err());
//! ```

pub mod steel;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Known material kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Carbon spring steel
    Steel,
}

impl MaterialKind {
    /// All material kinds for selection lists
    pub const ALL: [MaterialKind; 1] = [MaterialKind::Steel];

    /// Lookup key (e.g., "steel")
    pub fn code(&self) -> &'static str {
        match self {
            MaterialKind::Steel => "steel",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialKind::Steel => "Steel",
        }
    }

    /// Parse a material name, case-insensitive
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "steel" => Ok(MaterialKind::Steel),
            _ => Err(CalcError::unsupported_material(s)),
        }
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for MaterialKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaterialKind::from_str_flexible(s)
    }
}

/// An engineering material with the constants a spring calculation needs.
///
/// All values are SI. Shear modulus is derived on demand, never stored.
/// Fields are private so every instance, including deserialized ones, has
/// passed the checks in [`Material::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MaterialRecord", into = "MaterialRecord")]
pub struct Material {
    kind: MaterialKind,
    youngs_modulus_pa: f64,
    poisson_ratio: f64,
    density_kg_m3: f64,
}

/// Serialized form of a [`Material`]; validated on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Which material this is
    pub kind: MaterialKind,
    /// Young's modulus E (Pa)
    pub youngs_modulus_pa: f64,
    /// Poisson ratio ν (dimensionless)
    pub poisson_ratio: f64,
    /// Density ρ (kg/m³)
    pub density_kg_m3: f64,
}

impl TryFrom<MaterialRecord> for Material {
    type Error = CalcError;

    fn try_from(record: MaterialRecord) -> Result<Self, Self::Error> {
        Material::new(
            record.kind,
            record.youngs_modulus_pa,
            record.poisson_ratio,
            record.density_kg_m3,
        )
    }
}

impl From<Material> for MaterialRecord {
    fn from(mat: Material) -> Self {
        MaterialRecord {
            kind: mat.kind,
            youngs_modulus_pa: mat.youngs_modulus_pa,
            poisson_ratio: mat.poisson_ratio,
            density_kg_m3: mat.density_kg_m3,
        }
    }
}

impl Material {
    /// Create a material from explicit constants.
    ///
    /// Requires E > 0, 0 < ν < 0.5 and ρ > 0.
    pub fn new(
        kind: MaterialKind,
        youngs_modulus_pa: f64,
        poisson_ratio: f64,
        density_kg_m3: f64,
    ) -> CalcResult<Self> {
        if !(youngs_modulus_pa.is_finite() && youngs_modulus_pa > 0.0) {
            return Err(CalcError::invalid_input(
                "youngs_modulus_pa",
                youngs_modulus_pa.to_string(),
                "Young's modulus must be positive",
            ));
        }
        if !(poisson_ratio > 0.0 && poisson_ratio < 0.5) {
            return Err(CalcError::invalid_input(
                "poisson_ratio",
                poisson_ratio.to_string(),
                "Poisson ratio must be between 0 and 0.5",
            ));
        }
        if !(density_kg_m3.is_finite() && density_kg_m3 > 0.0) {
            return Err(CalcError::invalid_input(
                "density_kg_m3",
                density_kg_m3.to_string(),
                "Density must be positive",
            ));
        }
        Ok(Material {
            kind,
            youngs_modulus_pa,
            poisson_ratio,
            density_kg_m3,
        })
    }

    /// Carbon spring steel: E = 29e6 psi, ν = 0.3, ρ = 0.284 lb/in³
    pub fn steel() -> Self {
        Material {
            kind: MaterialKind::Steel,
            youngs_modulus_pa: steel::youngs_modulus_pa(),
            poisson_ratio: steel::POISSON_RATIO,
            density_kg_m3: steel::density_kg_m3(),
        }
    }

    /// Build the reference material for a kind
    pub fn from_kind(kind: MaterialKind) -> Self {
        match kind {
            MaterialKind::Steel => Material::steel(),
        }
    }

    /// Look up a material by name.
    ///
    /// Fails with `UnsupportedMaterial` for any name not in the known set.
    pub fn from_name(name: &str) -> CalcResult<Self> {
        let kind = MaterialKind::from_str_flexible(name)?;
        log::debug!("resolved material '{}' as {}", name, kind);
        Ok(Material::from_kind(kind))
    }

    /// Which material this is
    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    /// Young's modulus E (Pa)
    pub fn youngs_modulus_pa(&self) -> f64 {
        self.youngs_modulus_pa
    }

    /// Poisson ratio ν (dimensionless)
    pub fn poisson_ratio(&self) -> f64 {
        self.poisson_ratio
    }

    /// Density ρ (kg/m³)
    pub fn density_kg_m3(&self) -> f64 {
        self.density_kg_m3
    }

    /// Shear modulus G = E / (2(1 + ν)) in pascals
    pub fn shear_modulus_pa(&self) -> f64 {
        self.youngs_modulus_pa / (2.0 * (1.0 + self.poisson_ratio))
    }

    /// Get display name for this material
    pub fn display_name(&self) -> &'static str {
        self.kind.display_name()
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::steel()
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
