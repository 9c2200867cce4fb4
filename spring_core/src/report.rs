//! # Property Reports
//!
//! Renders a spring's derived quantities as aligned text. Values are held in
//! SI; a [`UnitSystem`] picks the display unit for each [`Dimension`] and the
//! row is converted only at render time.
//!
//! ## Example
//!
//! ```rust
//! use spring_core::calculations::spring::Spring;
//! use spring_core::materials::Material;
//! use spring_core::report::{SpringReport, UnitSystem};
//! use spring_core::units::INCH;
//!
//! let steel = Material::steel();
//! let spring = Spring::new(0.465 * INCH, 0.035 * INCH, 1.0 * INCH, 8.0, &steel).unwrap();
//! let report = SpringReport::from_spring("efunda", &spring).unwrap();
//!
//! let text = report.render(UnitSystem::Imperial);
//! assert!(text.contains("Solid height"));
//! assert!(text.contains("0.350 in"));
//! ```


use serde::{Deserialize, Serialize};

use crate::calculations::spring::{Spring, SpringResult};
use crate::errors::{CalcError, CalcResult};
use crate::units::{INCH, KSI, POUND_FORCE, POUND_MASS};

/// Width of the label column in rendered reports
const LABEL_WIDTH: usize = 24;

/// Selects the units a report is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Meters, newtons, pascals
    Si,
    /// Inches, pounds-force, ksi
    #[default]
    Imperial,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 2] = [UnitSystem::Si, UnitSystem::Imperial];

    /// Display unit for a physical dimension
    pub fn unit_for(self, dimension: Dimension) -> DisplayUnit {
        use Dimension::*;
        match (self, dimension) {
            (_, Count) | (_, Ratio) => DisplayUnit::new("", 1.0),
            (_, Angle) => DisplayUnit::new("deg", std::f64::consts::PI / 180.0),
            (UnitSystem::Si, Length) => DisplayUnit::new("m", 1.0),
            (UnitSystem::Si, Force) => DisplayUnit::new("N", 1.0),
            (UnitSystem::Si, Stress) => DisplayUnit::new("Pa", 1.0),
            (UnitSystem::Si, Stiffness) => DisplayUnit::new("N/m", 1.0),
            (UnitSystem::Si, Mass) => DisplayUnit::new("kg", 1.0),
            (UnitSystem::Si, Energy) => DisplayUnit::new("J", 1.0),
            (UnitSystem::Imperial, Length) => DisplayUnit::new("in", INCH),
            (UnitSystem::Imperial, Force) => DisplayUnit::new("lbf", POUND_FORCE),
            (UnitSystem::Imperial, Stress) => DisplayUnit::new("ksi", KSI),
            (UnitSystem::Imperial, Stiffness) => DisplayUnit::new("lbf/in", POUND_FORCE / INCH),
            (UnitSystem::Imperial, Mass) => DisplayUnit::new("lb", POUND_MASS),
            (UnitSystem::Imperial, Energy) => DisplayUnit::new("in·lbf", POUND_FORCE * INCH),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UnitSystem::Si => "SI",
            UnitSystem::Imperial => "Imperial",
        }
    }

    /// Parse "si", "imperial", "en" or "us", case-insensitive
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "si" | "metric" => Ok(UnitSystem::Si),
            "imperial" | "en" | "us" => Ok(UnitSystem::Imperial),
            _ => Err(CalcError::invalid_input(
                "units",
                s,
                "Units should be either SI or imperial",
            )),
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitSystem::from_str_flexible(s)
    }
}

/// Physical dimension of a reported quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Length,
    Force,
    Stress,
    Stiffness,
    Mass,
    Energy,
    Angle,
    Count,
    Ratio,
}

impl Dimension {
    /// printf-style precision used when rendering this dimension
    fn format(self, value: f64) -> String {
        match self {
            Dimension::Length => format!("{value:.3}"),
            Dimension::Angle => format!("{value:.2}"),
            Dimension::Count | Dimension::Ratio => format!("{value:.1}"),
            Dimension::Force
            | Dimension::Stress
            | Dimension::Stiffness
            | Dimension::Mass
            | Dimension::Energy => format!("{value:.2e}"),
        }
    }
}

/// Label and SI factor of a display unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayUnit {
    pub label: &'static str,
    /// Multiplier from this unit to SI
    pub factor: f64,
}

impl DisplayUnit {
    pub fn new(label: &'static str, factor: f64) -> Self {
        DisplayUnit { label, factor }
    }

    /// Convert an SI value into this unit
    pub fn from_si(&self, value_si: f64) -> f64 {
        value_si / self.factor
    }
}

/// One reported quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub dimension: Dimension,
    pub value_si: f64,
}

impl ReportRow {
    pub fn new(label: impl Into<String>, dimension: Dimension, value_si: f64) -> Self {
        ReportRow {
            label: label.into(),
            dimension,
            value_si,
        }
    }

    /// Value and unit label in the given system
    pub fn display_value(&self, units: UnitSystem) -> (f64, &'static str) {
        let unit = units.unit_for(self.dimension);
        (unit.from_si(self.value_si), unit.label)
    }

    /// Render as `Label : value unit`
    pub fn render(&self, units: UnitSystem) -> String {
        let (value, label) = self.display_value(units);
        let formatted = self.dimension.format(value);
        if label.is_empty() {
            format!("{:<width$}: {}", self.label, formatted, width = LABEL_WIDTH)
        } else {
            format!("{:<width$}: {} {}", self.label, formatted, label, width = LABEL_WIDTH)
        }
    }
}

/// Named collection of report rows for one spring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringReport {
    pub name: String,
    pub rows: Vec<ReportRow>,
}

impl SpringReport {
    /// Build a report from a spring, propagating any calculation error
    pub fn from_spring(name: impl Into<String>, spring: &Spring<'_>) -> CalcResult<Self> {
        Ok(SpringReport::from_result(name, &spring.evaluate()?))
    }

    /// Build a report from already computed results
    pub fn from_result(name: impl Into<String>, result: &SpringResult) -> Self {
        use Dimension::*;
        let rows = vec![
            ReportRow::new("Outer diameter", Length, result.outside_diameter_m),
            ReportRow::new("Mean diameter", Length, result.mean_diameter_m),
            ReportRow::new("Inside diameter", Length, result.inside_diameter_m),
            ReportRow::new("Wire diameter", Length, result.wire_diameter_m),
            ReportRow::new("Free length", Length, result.free_length_m),
            ReportRow::new("Number of coils", Count, result.num_coils),
            ReportRow::new("Spring constant", Stiffness, result.spring_constant_n_per_m),
            ReportRow::new("Spring index [4-12]", Ratio, result.spring_index),
            ReportRow::new("Wahl factor", Ratio, result.wahl_factor),
            ReportRow::new("Max force possible", Force, result.max_force_n),
            ReportRow::new("Max shear stress", Stress, result.max_shear_pa),
            ReportRow::new("Solid height", Length, result.solid_height_m),
            ReportRow::new("Max displacement", Length, result.max_displacement_m),
            ReportRow::new("Linear travel from", Length, result.linear_travel_start_m),
            ReportRow::new("Linear travel to", Length, result.linear_travel_end_m),
            ReportRow::new("Coil pitch", Length, result.coil_pitch_m),
            ReportRow::new("Rise angle", Angle, result.rise_angle_rad),
            ReportRow::new("Spring wire length", Length, result.wire_length_m),
            ReportRow::new("Spring wire mass", Mass, result.wire_mass_kg),
            ReportRow::new("Energy at solid", Energy, result.max_energy_j),
            ReportRow::new("Recommended hole", Length, result.recommended_hole_diameter_m),
            ReportRow::new("Shear modulus", Stress, result.shear_modulus_pa),
        ];
        SpringReport {
            name: name.into(),
            rows,
        }
    }

    /// Find a row by label
    pub fn row(&self, label: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    /// Render every row in the given unit system
    pub fn render(&self, units: UnitSystem) -> String {
        let mut out = String::new();
        if !self.name.is_empty() {
            let rule = "-".repeat(37);
            out.push_str(&format!("{rule}\nSpring: {}\n{rule}\n", self.name));
        }
        for row in &self.rows {
            out.push_str(&row.render(units));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::Material;
    use approx::assert_relative_eq;

    fn efunda_report() -> SpringReport {
        let steel = Material::steel();
        let spring = Spring::new(0.465 * INCH, 0.035 * INCH, 1.0 * INCH, 8.0, &steel).unwrap();
        SpringReport::from_spring("efunda", &spring).unwrap()
    }

    #[test]
    fn test_unit_system_parse() {
        assert_eq!("SI".parse::<UnitSystem>().unwrap(), UnitSystem::Si);
        assert_eq!("En".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
        assert_eq!(UnitSystem::from_str_flexible("imperial").unwrap(), UnitSystem::Imperial);
        assert!(matches!(
            UnitSystem::from_str_flexible("cgs"),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_si_units_are_identity() {
        for dimension in [
            Dimension::Length,
            Dimension::Force,
            Dimension::Stress,
            Dimension::Stiffness,
            Dimension::Mass,
            Dimension::Energy,
        ] {
            assert_eq!(UnitSystem::Si.unit_for(dimension).factor, 1.0);
        }
    }

    #[test]
    fn test_imperial_conversion() {
        let report = efunda_report();
        let (rate, label) = report.row("Spring constant").unwrap().display_value(UnitSystem::Imperial);
        assert_eq!(label, "lbf/in");
        assert_relative_eq!(rate, 2.6011066067, max_relative = 1e-8);

        let (stress, label) = report.row("Max shear stress").unwrap().display_value(UnitSystem::Imperial);
        assert_eq!(label, "ksi");
        assert_relative_eq!(stress, 51.705878187622965, max_relative = 1e-9);
    }

    #[test]
    fn test_angle_rendered_in_degrees_for_both_systems() {
        let report = efunda_report();
        let row = report.row("Rise angle").unwrap();
        for units in UnitSystem::ALL {
            let (deg, label) = row.display_value(units);
            assert_eq!(label, "deg");
            assert_relative_eq!(deg, 4.890724926815461, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_render_imperial_lines() {
        let text = efunda_report().render(UnitSystem::Imperial);
        assert!(text.starts_with("-----"));
        assert!(text.contains("Spring: efunda"));
        assert!(text.contains("Outer diameter          : 0.500 in"));
        assert!(text.contains("Number of coils         : 8.0\n"));
        assert!(text.contains("Max displacement        : 0.650 in"));
        assert!(text.contains("Spring constant         : 2.60e0 lbf/in"));
    }

    #[test]
    fn test_render_si_lines() {
        let text = efunda_report().render(UnitSystem::Si);
        assert!(text.contains("Solid height            : 0.009 m"));
        assert!(text.contains("Spring constant         : 4.56e2 N/m"));
    }

    #[test]
    fn test_unnamed_report_has_no_header() {
        let mut report = efunda_report();
        report.name.clear();
        let text = report.render(UnitSystem::Si);
        assert!(text.starts_with("Outer diameter"));
    }

    #[test]
    fn test_report_propagates_errors() {
        let steel = Material::steel();
        // d⁴ overflows, so the spring rate is not finite
        let spring = Spring::new(1e200, 1e199, 1.0, 1.0, &steel).unwrap();
        assert!(matches!(
            SpringReport::from_spring("huge", &spring),
            Err(CalcError::DomainError { .. })
        ));
    }

    #[test]
    fn test_short_spring_reports_negative_travel() {
        let steel = Material::steel();
        // solid height 12 mm, free length 10 mm
        let spring = Spring::new(0.01, 0.001, 0.010, 10.0, &steel).unwrap();
        let report = SpringReport::from_spring("short", &spring).unwrap();
        let row = report.row("Max displacement").unwrap();
        assert_relative_eq!(row.value_si, -0.002, epsilon = 1e-12);
        assert!(report.render(UnitSystem::Si).contains("Max displacement"));
    }
}
