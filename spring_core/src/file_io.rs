//! # File I/O Module
//!
//! Saves and loads spring design files:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Designs are saved as JSON documents wrapping a [`SpringInput`]:
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "saved_at": "2026-01-01T00:00:00Z",
//!   "design": { "label": "S-1", "material": "steel", "mean_diameter_m": 0.0118, ... }
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use spring_core::calculations::spring::SpringInput;
//! use spring_core::file_io::{load_design, save_design, DesignFile};
//! use std::path::Path;
//!
//! let design = SpringInput {
//!     label: "S-1".to_string(),
//!     material: "steel".to_string(),
//!     mean_diameter_m: 0.0118,
//!     wire_diameter_m: 0.00089,
//!     free_length_m: 0.0254,
//!     num_coils: 8.0,
//! };
//! save_design(&DesignFile::new(design), Path::new("latch.json"))?;
//! let loaded = load_design(Path::new("latch.json"))?;
//! # Ok::<(), spring_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::spring::SpringInput;
use crate::errors::{CalcError, CalcResult};

/// Current schema version for design files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Versioned wrapper around a saved design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignFile {
    /// Schema version the file was written with
    pub version: String,
    /// When the file was last saved
    pub saved_at: DateTime<Utc>,
    /// Spring design parameters
    pub design: SpringInput,
}

impl DesignFile {
    /// Wrap a design with the current schema version and timestamp
    pub fn new(design: SpringInput) -> Self {
        DesignFile {
            version: SCHEMA_VERSION.to_string(),
            saved_at: Utc::now(),
            design,
        }
    }
}

/// Save a design file with atomic write semantics.
///
/// The design must validate before anything is written.
pub fn save_design(file: &DesignFile, path: &Path) -> CalcResult<()> {
    file.design.validate()?;

    let json = serde_json::to_string_pretty(file).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    log::debug!("saved design '{}' to {}", file.design.label, path.display());
    Ok(())
}

/// Load a design file.
///
/// # Returns
///
/// * `Ok(DesignFile)` - Successfully loaded
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_design(path: &Path) -> CalcResult<DesignFile> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let design: DesignFile =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&design.version)?;

    log::debug!("loaded design '{}' from {}", design.design.label, path.display());
    Ok(design)
}

/// Load just the spring input, accepting either a [`DesignFile`] or a bare
/// [`SpringInput`] JSON object.
pub fn load_spring_input(path: &Path) -> CalcResult<SpringInput> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    if value.get("design").is_some() {
        return load_design(path).map(|file| file.design);
    }

    serde_json::from_value(value).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid spring input in {}: {}", path.display(), e),
    })
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first())
    else {
        return Err(mismatch());
    };

    if file_major != current_major {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor version may carry breaking changes
    if current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_design() -> SpringInput {
        SpringInput {
            label: "Latch return".to_string(),
            material: "steel".to_string(),
            mean_diameter_m: 0.0118,
            wire_diameter_m: 0.00089,
            free_length_m: 0.0254,
            num_coils: 8.0,
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latch.json");

        let file = DesignFile::new(sample_design());
        save_design(&file, &path).unwrap();

        let loaded = load_design(&path).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("atomic.json");

        save_design(&DesignFile::new(sample_design()), &path).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_design_not_saved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");

        let mut design = sample_design();
        design.wire_diameter_m = 0.02;
        let err = save_design(&DesignFile::new(design), &path).unwrap_err();
        assert!(matches!(err, CalcError::InvalidGeometry { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_bare_spring_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bare.json");
        fs::write(&path, serde_json::to_string(&sample_design()).unwrap()).unwrap();

        let input = load_spring_input(&path).unwrap();
        assert_eq!(input, sample_design());
    }

    #[test]
    fn test_load_spring_input_from_design_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wrapped.json");
        save_design(&DesignFile::new(sample_design()), &path).unwrap();

        assert_eq!(load_spring_input(&path).unwrap(), sample_design());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_design(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_design(&path), Err(CalcError::SerializationError { .. })));
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
