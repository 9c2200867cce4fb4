//! # spring_core - Compression Spring Calculation Engine
//!
//! `spring_core` computes the geometry and mechanical properties of helical
//! compression springs from closed-form formulas, and sizes wire for a target
//! spring rate. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions of immutable inputs
//! - **SI inside**: Every stored value is SI; unit conversion happens at the edges
//! - **Rich Errors**: Structured error types, never a silent NaN
//!
//! ## Quick Start
//!
//! ```rust
//! use spring_core::calculations::spring::Spring;
//! use spring_core::materials::Material;
//! use spring_core::units::{INCH, POUND_FORCE};
//!
//! let steel = Material::from_name("steel").unwrap();
//! let spring = Spring::new(0.465 * INCH, 0.035 * INCH, 1.0 * INCH, 8.0, &steel).unwrap();
//!
//! let rate_lbf_in = spring.spring_constant().unwrap() / POUND_FORCE * INCH;
//! assert!((rate_lbf_in - 2.60).abs() < 0.01);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Spring properties and inverse wire sizing
//! - [`materials`] - Material definitions
//! - [`units`] - Conversion factors to SI
//! - [`report`] - Text rendering in SI or imperial units
//! - [`errors`] - Structured error types
//! - [`file_io`] - Design file save/load with atomic writes

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::spring::{Spring, SpringInput, SpringResult};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_design, save_design, DesignFile};
pub use materials::{Material, MaterialKind};
pub use report::{SpringReport, UnitSystem};
