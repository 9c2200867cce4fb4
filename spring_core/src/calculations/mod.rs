//! # Spring Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - a pure function taking `&*Input` and returning `CalcResult<*Result>`
//!
//! ## Available Calculations
//!
//! - [`spring`] - Compression spring properties and wire sizing

pub mod spring;

pub use spring::{
    calculate, solve_wire, IndexRating, Spring, SpringInput, SpringResult, WireSizingInput,
    WireSizingResult,
};
