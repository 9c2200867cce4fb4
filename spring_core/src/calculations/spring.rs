//! # Helical Compression Spring
//!
//! Geometry and mechanical properties of a round-wire helical compression
//! spring with closed and ground ends, plus the inverse sizing routine that
//! finds a wire diameter for a target rate.
//!
//! ## Assumptions
//!
//! - Two inactive end coils (closed and ground), so solid height is d(N + 2)
//! - Static loading; stresses are corrected with the Wahl factor only
//! - All values SI: meters, newtons, pascals
//!
//! ## Example
//!
//! ```rust
//! use spring_core::calculations::spring::Spring;
//! use spring_core::materials::Material;
//! use spring_core::units::INCH;
//!
//! let steel = Material::steel();
//! let spring = Spring::new(0.465 * INCH, 0.035 * INCH, 1.0 * INCH, 8.0, &steel).unwrap();
//!
//! let rate = spring.spring_constant().unwrap();          // N/m
//! let travel = spring.max_displacement().unwrap();       // m
//! assert!((travel / INCH - 0.65).abs() < 1e-9);
//!
//! let d = Spring::solve_diameter(0.465 * INCH, 8.0, rate, &steel).unwrap();
//! assert!((d / INCH - 0.035).abs() < 1e-12);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::materials::Material;

/// Lower end of the recommended spring index range
pub const MIN_RECOMMENDED_INDEX: f64 = 4.0;

/// Upper end of the recommended spring index range
pub const MAX_RECOMMENDED_INDEX: f64 = 12.0;

/// Spring index that is easiest to manufacture
pub const OPTIMAL_INDEX: f64 = 9.0;

/// Inactive coils for closed and ground ends
pub const INACTIVE_COILS: f64 = 2.0;

/// Fraction of travel excluded at each end of the linear working range
const NONLINEAR_TRAVEL_FRACTION: f64 = 0.2;

/// Spring outside diameter as a fraction of its hole diameter
const HOLE_CLEARANCE_RATIO: f64 = 0.9;

/// Where a spring index sits relative to the recommended range.
///
/// Informative only; no calculation rejects an index outside the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexRating {
    /// C < 4: hard to coil, high stress concentration
    TooLow,
    /// 4 ≤ C ≤ 12
    Recommended,
    /// C > 12: prone to buckling and tangling
    TooHigh,
}

impl IndexRating {
    /// Classify a spring index
    pub fn classify(spring_index: f64) -> Self {
        if spring_index < MIN_RECOMMENDED_INDEX {
            IndexRating::TooLow
        } else if spring_index > MAX_RECOMMENDED_INDEX {
            IndexRating::TooHigh
        } else {
            IndexRating::Recommended
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IndexRating::TooLow => "below recommended range",
            IndexRating::Recommended => "recommended",
            IndexRating::TooHigh => "above recommended range",
        }
    }
}

impl std::fmt::Display for IndexRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A helical compression spring.
///
/// Borrows its material; every derived quantity is recomputed per call from
/// the four geometry values and the material's shear modulus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring<'m> {
    mean_diameter_m: f64,
    wire_diameter_m: f64,
    free_length_m: f64,
    num_coils: f64,
    material: &'m Material,
}

impl<'m> Spring<'m> {
    /// Create a spring from validated geometry.
    ///
    /// Requires D > 0, d > 0, D > d, L₀ > 0 and N ≥ 1, all finite.
    pub fn new(
        mean_diameter_m: f64,
        wire_diameter_m: f64,
        free_length_m: f64,
        num_coils: f64,
        material: &'m Material,
    ) -> CalcResult<Self> {
        require_positive("mean_diameter_m", mean_diameter_m, "Mean diameter must be positive")?;
        require_positive("wire_diameter_m", wire_diameter_m, "Wire diameter must be positive")?;
        if wire_diameter_m >= mean_diameter_m {
            return Err(CalcError::invalid_geometry(
                "wire_diameter_m",
                wire_diameter_m.to_string(),
                format!(
                    "Wire diameter must be smaller than mean diameter ({mean_diameter_m})"
                ),
            ));
        }
        require_positive("free_length_m", free_length_m, "Free length must be positive")?;
        if !(num_coils.is_finite() && num_coils >= 1.0) {
            return Err(CalcError::invalid_geometry(
                "num_coils",
                num_coils.to_string(),
                "Active coil count must be at least 1",
            ));
        }

        let spring = Spring {
            mean_diameter_m,
            wire_diameter_m,
            free_length_m,
            num_coils,
            material,
        };

        let index = mean_diameter_m / wire_diameter_m;
        log::debug!(
            "spring D={:.6} m d={:.6} m L0={:.6} m N={} C={:.3}",
            mean_diameter_m,
            wire_diameter_m,
            free_length_m,
            num_coils,
            index
        );
        if IndexRating::classify(index) != IndexRating::Recommended {
            log::warn!(
                "spring index {:.2} is outside the recommended range {}-{}",
                index,
                MIN_RECOMMENDED_INDEX,
                MAX_RECOMMENDED_INDEX
            );
        }

        let solid_height = wire_diameter_m * (num_coils + INACTIVE_COILS);
        if free_length_m < solid_height {
            log::warn!(
                "free length {:.6} m is shorter than solid height {:.6} m; spring cannot reach solid",
                free_length_m,
                solid_height
            );
        }

        Ok(spring)
    }

    /// Mean coil diameter D (m)
    pub fn mean_diameter_m(&self) -> f64 {
        self.mean_diameter_m
    }

    /// Wire diameter d (m)
    pub fn wire_diameter_m(&self) -> f64 {
        self.wire_diameter_m
    }

    /// Free length L₀ (m)
    pub fn free_length_m(&self) -> f64 {
        self.free_length_m
    }

    /// Active coil count N
    pub fn num_coils(&self) -> f64 {
        self.num_coils
    }

    pub fn material(&self) -> &'m Material {
        self.material
    }

    // ------------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------------

    /// Inside diameter D − d (m)
    pub fn inside_diameter(&self) -> CalcResult<f64> {
        ensure_finite("inside_diameter", self.mean_diameter_m - self.wire_diameter_m)
    }

    /// Outside diameter D + d (m)
    pub fn outside_diameter(&self) -> CalcResult<f64> {
        ensure_finite("outside_diameter", self.mean_diameter_m + self.wire_diameter_m)
    }

    /// Spring index C = D / d
    pub fn spring_index(&self) -> CalcResult<f64> {
        nonzero("spring_index", "wire diameter", self.wire_diameter_m)?;
        ensure_finite("spring_index", self.mean_diameter_m / self.wire_diameter_m)
    }

    /// Rating of the spring index against the 4-12 range
    pub fn index_rating(&self) -> CalcResult<IndexRating> {
        Ok(IndexRating::classify(self.spring_index()?))
    }

    /// Coil pitch L₀ / N (m per coil)
    pub fn coil_pitch(&self) -> CalcResult<f64> {
        nonzero("coil_pitch", "coil count", self.num_coils)?;
        ensure_finite("coil_pitch", self.free_length_m / self.num_coils)
    }

    /// Helix rise angle (radians); zero pitch gives zero
    pub fn rise_angle(&self) -> CalcResult<f64> {
        let pitch = self.coil_pitch()?;
        ensure_finite("rise_angle", pitch.atan2(PI * self.mean_diameter_m))
    }

    /// Solid height d(N + 2) (m)
    pub fn solid_height(&self) -> CalcResult<f64> {
        ensure_finite(
            "solid_height",
            self.wire_diameter_m * (self.num_coils + INACTIVE_COILS),
        )
    }

    /// Travel from free length to solid height L₀ − d(N + 2) (m).
    ///
    /// Negative when the free length is shorter than the solid height; see
    /// [`Spring::can_reach_solid`].
    pub fn max_displacement(&self) -> CalcResult<f64> {
        ensure_finite("max_displacement", self.free_length_m - self.solid_height()?)
    }

    /// Whether the free length is at least the solid height
    pub fn can_reach_solid(&self) -> CalcResult<bool> {
        Ok(self.max_displacement()? >= 0.0)
    }

    /// Total wire length πD(N / cos(rise) + 2) (m)
    pub fn wire_length(&self) -> CalcResult<f64> {
        nonzero("wire_length", "mean diameter", self.mean_diameter_m)?;
        let rise = self.rise_angle()?;
        let length = PI * self.mean_diameter_m * (self.num_coils / rise.cos() + INACTIVE_COILS);
        ensure_finite("wire_length", length)
    }

    /// Middle 60% of travel (m), where the spring behaves most linearly
    pub fn linear_travel_range(&self) -> CalcResult<(f64, f64)> {
        let travel = self.max_displacement()?;
        Ok((
            NONLINEAR_TRAVEL_FRACTION * travel,
            (1.0 - NONLINEAR_TRAVEL_FRACTION) * travel,
        ))
    }

    /// Hole diameter leaving about 10% diametral clearance (m)
    pub fn recommended_hole_diameter(&self) -> CalcResult<f64> {
        ensure_finite(
            "recommended_hole_diameter",
            self.outside_diameter()? / HOLE_CLEARANCE_RATIO,
        )
    }

    /// Wire mass ρ · πd²/4 · wire length (kg)
    pub fn wire_mass(&self) -> CalcResult<f64> {
        let area = PI * self.wire_diameter_m.powi(2) / 4.0;
        ensure_finite(
            "wire_mass",
            self.material.density_kg_m3() * area * self.wire_length()?,
        )
    }

    // ------------------------------------------------------------------------
    // Mechanics
    // ------------------------------------------------------------------------

    /// Spring rate k = G d⁴ / (8 D³ N) (N/m)
    pub fn spring_constant(&self) -> CalcResult<f64> {
        nonzero("spring_constant", "mean diameter", self.mean_diameter_m)?;
        nonzero("spring_constant", "coil count", self.num_coils)?;
        let g = positive_shear_modulus("spring_constant", self.material)?;
        let num = g * self.wire_diameter_m.powi(4);
        let den = 8.0 * self.mean_diameter_m.powi(3) * self.num_coils;
        ensure_finite("spring_constant", num / den)
    }

    /// Force at solid height k · x_max (N)
    pub fn max_force(&self) -> CalcResult<f64> {
        ensure_finite("max_force", self.spring_constant()? * self.max_displacement()?)
    }

    /// Energy stored at solid height ½ k x_max² (J)
    pub fn max_energy(&self) -> CalcResult<f64> {
        let travel = self.max_displacement()?;
        ensure_finite("max_energy", 0.5 * self.spring_constant()? * travel * travel)
    }

    /// Wahl stress-correction factor for this spring's index.
    ///
    /// `Spring::new` enforces D > d, so C > 1 here and the pole handled by
    /// [`wahl_factor_for_index`] is never reached through a `Spring`.
    pub fn wahl_factor(&self) -> CalcResult<f64> {
        wahl_factor_for_index(self.spring_index()?)
    }

    /// Corrected shear stress at solid height 8 K D F / (π d³) (Pa)
    pub fn max_shear(&self) -> CalcResult<f64> {
        nonzero("max_shear", "wire diameter", self.wire_diameter_m)?;
        let stress = 8.0 * self.wahl_factor()? * self.mean_diameter_m * self.max_force()?
            / (PI * self.wire_diameter_m.powi(3));
        ensure_finite("max_shear", stress)
    }

    // ------------------------------------------------------------------------
    // Inverse design
    // ------------------------------------------------------------------------

    /// Wire diameter giving `target_rate_n_per_m` for a fixed mean diameter
    /// and coil count: d = (8 k N D³ / G)^(1/4).
    pub fn solve_diameter(
        mean_diameter_m: f64,
        num_coils: f64,
        target_rate_n_per_m: f64,
        material: &Material,
    ) -> CalcResult<f64> {
        for (name, value) in [
            ("mean_diameter_m", mean_diameter_m),
            ("num_coils", num_coils),
            ("target_rate_n_per_m", target_rate_n_per_m),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::domain(
                    "solve_diameter",
                    format!("{name} must be positive (got {value})"),
                ));
            }
        }

        let num = 8.0 * target_rate_n_per_m * num_coils * mean_diameter_m.powi(3);
        let den = positive_shear_modulus("solve_diameter", material)?;
        let d = ensure_finite("solve_diameter", (num / den).powf(0.25))?;
        log::debug!(
            "solved wire diameter {:.6} m for k={} N/m, D={} m, N={}",
            d,
            target_rate_n_per_m,
            mean_diameter_m,
            num_coils
        );
        Ok(d)
    }

    /// Evaluate every derived quantity
    pub fn evaluate(&self) -> CalcResult<SpringResult> {
        let spring_index = self.spring_index()?;
        let (linear_travel_start_m, linear_travel_end_m) = self.linear_travel_range()?;
        Ok(SpringResult {
            mean_diameter_m: self.mean_diameter_m,
            wire_diameter_m: self.wire_diameter_m,
            free_length_m: self.free_length_m,
            num_coils: self.num_coils,
            outside_diameter_m: self.outside_diameter()?,
            inside_diameter_m: self.inside_diameter()?,
            spring_index,
            index_rating: IndexRating::classify(spring_index),
            spring_constant_n_per_m: self.spring_constant()?,
            max_force_n: self.max_force()?,
            wahl_factor: self.wahl_factor()?,
            max_shear_pa: self.max_shear()?,
            solid_height_m: self.solid_height()?,
            max_displacement_m: self.max_displacement()?,
            can_reach_solid: self.can_reach_solid()?,
            coil_pitch_m: self.coil_pitch()?,
            rise_angle_rad: self.rise_angle()?,
            wire_length_m: self.wire_length()?,
            wire_mass_kg: self.wire_mass()?,
            max_energy_j: self.max_energy()?,
            linear_travel_start_m,
            linear_travel_end_m,
            recommended_hole_diameter_m: self.recommended_hole_diameter()?,
            shear_modulus_pa: self.material.shear_modulus_pa(),
        })
    }
}

/// Wahl stress-correction factor (4C − 1)/(4C − 4) + 0.615/C.
///
/// Fails with `DomainError` for C ≤ 1 (pole at C = 1).
pub fn wahl_factor_for_index(spring_index: f64) -> CalcResult<f64> {
    let c = spring_index;
    if c.is_nan() || c <= 1.0 {
        return Err(CalcError::domain(
            "wahl_factor",
            format!("spring index must exceed 1 (got {c})"),
        ));
    }
    ensure_finite("wahl_factor", (4.0 * c - 1.0) / (4.0 * c - 4.0) + 0.615 / c)
}

fn positive_shear_modulus(quantity: &str, material: &Material) -> CalcResult<f64> {
    let g = material.shear_modulus_pa();
    if g.is_finite() && g > 0.0 {
        Ok(g)
    } else {
        Err(CalcError::domain(quantity, format!("shear modulus must be positive (got {g})")))
    }
}

fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_geometry(field, value.to_string(), reason))
    }
}

fn nonzero(quantity: &str, divisor: &str, value: f64) -> CalcResult<()> {
    if value == 0.0 {
        Err(CalcError::domain(quantity, format!("{divisor} is zero")))
    } else {
        Ok(())
    }
}

fn default_material() -> String {
    "steel".to_string()
}

/// Input parameters for a spring property calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "efunda",
///   "material": "steel",
///   "mean_diameter_m": 0.011811,
///   "wire_diameter_m": 0.000889,
///   "free_length_m": 0.0254,
///   "num_coils": 8.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringInput {
    /// User label for this spring (e.g., "S-1", "Latch return")
    #[serde(default)]
    pub label: String,

    /// Material name (only "steel" is supported)
    #[serde(default = "default_material")]
    pub material: String,

    /// Mean coil diameter D (m)
    pub mean_diameter_m: f64,

    /// Wire diameter d (m)
    pub wire_diameter_m: f64,

    /// Free length L₀ (m)
    pub free_length_m: f64,

    /// Active coil count N
    pub num_coils: f64,
}

impl SpringInput {
    /// Resolve the material name
    pub fn material(&self) -> CalcResult<Material> {
        Material::from_name(&self.material)
    }

    /// Validate material and geometry without computing anything
    pub fn validate(&self) -> CalcResult<()> {
        let material = self.material()?;
        self.build(&material).map(|_| ())
    }

    /// Build a spring borrowing `material`
    pub fn build<'m>(&self, material: &'m Material) -> CalcResult<Spring<'m>> {
        Spring::new(
            self.mean_diameter_m,
            self.wire_diameter_m,
            self.free_length_m,
            self.num_coils,
            material,
        )
    }
}

/// Results from a spring property calculation. All values SI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringResult {
    pub mean_diameter_m: f64,
    pub wire_diameter_m: f64,
    pub free_length_m: f64,
    pub num_coils: f64,
    pub outside_diameter_m: f64,
    pub inside_diameter_m: f64,
    /// Spring index C = D/d
    pub spring_index: f64,
    pub index_rating: IndexRating,
    /// Spring rate k (N/m)
    pub spring_constant_n_per_m: f64,
    /// Force at solid height (N)
    pub max_force_n: f64,
    pub wahl_factor: f64,
    /// Corrected shear stress at solid height (Pa)
    pub max_shear_pa: f64,
    pub solid_height_m: f64,
    /// Signed; negative when the free length is below solid height
    pub max_displacement_m: f64,
    /// False when the free length is shorter than the solid height
    pub can_reach_solid: bool,
    pub coil_pitch_m: f64,
    pub rise_angle_rad: f64,
    pub wire_length_m: f64,
    pub wire_mass_kg: f64,
    /// Energy stored at solid height (J)
    pub max_energy_j: f64,
    /// Start of the linear working range, measured from free length (m)
    pub linear_travel_start_m: f64,
    /// End of the linear working range, measured from free length (m)
    pub linear_travel_end_m: f64,
    pub recommended_hole_diameter_m: f64,
    pub shear_modulus_pa: f64,
}

/// Calculate every derived property of a spring.
///
/// # Returns
///
/// * `Ok(SpringResult)` - Calculation results
/// * `Err(CalcError)` - Unknown material, invalid geometry, or a singular formula
pub fn calculate(input: &SpringInput) -> CalcResult<SpringResult> {
    log::debug!("calculating spring '{}'", input.label);
    let material = input.material()?;
    let spring = input.build(&material)?;
    spring.evaluate()
}

/// Input parameters for sizing a wire diameter to a target rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSizingInput {
    #[serde(default)]
    pub label: String,

    #[serde(default = "default_material")]
    pub material: String,

    /// Mean coil diameter D (m)
    pub mean_diameter_m: f64,

    /// Active coil count N
    pub num_coils: f64,

    /// Desired spring rate k (N/m)
    pub target_rate_n_per_m: f64,
}

/// Result of a wire sizing calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSizingResult {
    /// Wire diameter d (m)
    pub wire_diameter_m: f64,
    /// Resulting spring index D/d
    pub spring_index: f64,
    pub index_rating: IndexRating,
}

/// Size the wire for a target rate.
///
/// Fails with `DomainError` if the solved wire is not thinner than the mean
/// diameter, since no spring can be built from it.
pub fn solve_wire(input: &WireSizingInput) -> CalcResult<WireSizingResult> {
    let material = Material::from_name(&input.material)?;
    let wire_diameter_m = Spring::solve_diameter(
        input.mean_diameter_m,
        input.num_coils,
        input.target_rate_n_per_m,
        &material,
    )?;
    if wire_diameter_m >= input.mean_diameter_m {
        return Err(CalcError::domain(
            "solve_wire",
            format!(
                "solved wire diameter {} m is not smaller than mean diameter {} m",
                wire_diameter_m, input.mean_diameter_m
            ),
        ));
    }
    let spring_index = input.mean_diameter_m / wire_diameter_m;
    Ok(WireSizingResult {
        wire_diameter_m,
        spring_index,
        index_rating: IndexRating::classify(spring_index),
    })
}
