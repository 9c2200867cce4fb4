//! # Error Types
//!
//! Structured error types for spring_core. Every variant names the field or
//! quantity involved and the precondition that was violated, so a caller can
//! report the problem without inspecting the message text.
//!
//! ## Example
//!
//! ```rust
//! use spring_core::errors::{CalcError, CalcResult};
//!
//! fn validate_coils(num_coils: f64) -> CalcResult<()> {
//!     if num_coils < 1.0 {
//!         return Err(CalcError::invalid_geometry(
//!             "num_coils",
//!             num_coils.to_string(),
//!             "Active coil count must be at least 1",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for spring_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for spring calculations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Material name is not in the known set
    #[error("Unsupported material: {material_name}")]
    UnsupportedMaterial { material_name: String },

    /// Spring geometry failed construction-time validation
    #[error("Invalid geometry for '{field}': {value} - {reason}")]
    InvalidGeometry {
        field: String,
        value: String,
        reason: String,
    },

    /// A formula is undefined or singular for the given inputs
    #[error("Domain error computing {quantity}: {reason}")]
    DomainError { quantity: String, reason: String },

    /// A non-geometry input value is invalid (unit symbol, material constant, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Design file schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an UnsupportedMaterial error
    pub fn unsupported_material(material_name: impl Into<String>) -> Self {
        CalcError::UnsupportedMaterial {
            material_name: material_name.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DomainError
    pub fn domain(quantity: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            quantity: quantity.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::UnsupportedMaterial { .. } => "UNSUPPORTED_MATERIAL",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

/// Fail with a DomainError unless `value` is a finite number.
pub(crate) fn ensure_finite(quantity: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::domain(quantity, format!("result is not finite ({value})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_geometry("wire_diameter_m", "0", "Wire diameter must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidGeometry\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::unsupported_material("unobtainium").error_code(), "UNSUPPORTED_MATERIAL");
        assert_eq!(CalcError::domain("wahl_factor", "pole").error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_error_message_names_precondition() {
        let error = CalcError::domain("wahl_factor", "spring index must exceed 1");
        assert_eq!(
            error.to_string(),
            "Domain error computing wahl_factor: spring index must exceed 1"
        );
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("x", 2.5).unwrap(), 2.5);
        assert!(matches!(
            ensure_finite("x", f64::INFINITY),
            Err(CalcError::DomainError { .. })
        ));
        assert!(ensure_finite("x", f64::NAN).is_err());
    }
}
