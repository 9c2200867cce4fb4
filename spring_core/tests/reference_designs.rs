//! Reference designs checked against independently computed values.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use spring_core::calculations::spring::{calculate, solve_wire, Spring, SpringInput, WireSizingInput};
use spring_core::units::{INCH, POUND_FORCE, PSI};
use spring_core::{CalcError, Material};

fn steel() -> Material {
    Material::from_name("steel").unwrap()
}

#[test]
fn outside_minus_inside_is_twice_wire() {
    let steel = steel();
    let geometries = [
        (0.465 * INCH, 0.035 * INCH, 1.0 * INCH, 8.0),
        (0.02, 0.002, 0.08, 10.0),
        (0.005, 0.0011, 0.03, 3.5),
        (1.0, 0.999, 5.0, 1.0),
    ];
    for (d_mean, d_wire, length, coils) in geometries {
        let spring = Spring::new(d_mean, d_wire, length, coils, &steel).unwrap();
        let diff = spring.outside_diameter().unwrap() - spring.inside_diameter().unwrap();
        assert_relative_eq!(diff, 2.0 * d_wire, max_relative = 1e-12);
    }
}

#[test]
fn spring_index_is_ratio_of_diameters() {
    let steel = steel();
    for (d_mean, d_wire) in [(0.004, 0.001), (0.0075, 0.001), (0.012, 0.001), (0.02, 0.003)] {
        let spring = Spring::new(d_mean, d_wire, 0.1, 6.0, &steel).unwrap();
        assert_eq!(spring.spring_index().unwrap(), d_mean / d_wire);
        assert!(spring.wahl_factor().is_ok());
        assert!(spring.max_shear().is_ok());
    }
}

#[test]
fn steel_shear_modulus() {
    let e = 29e6 * PSI;
    assert_relative_eq!(steel().shear_modulus_pa(), e / 2.6, max_relative = 1e-12);
}

#[test]
fn unknown_material_is_rejected() {
    match Material::from_name("unobtainium") {
        Err(CalcError::UnsupportedMaterial { material_name }) => assert_eq!(material_name, "unobtainium"),
        other => panic!("expected UnsupportedMaterial, got {other:?}"),
    }
}

#[test]
fn wire_not_thinner_than_coil_is_rejected() {
    let steel = steel();
    for d_wire in [0.01, 0.015] {
        assert!(matches!(
            Spring::new(0.01, d_wire, 0.05, 5.0, &steel),
            Err(CalcError::InvalidGeometry { .. })
        ));
    }
}

#[test]
fn efunda_reference_spring() {
    let steel = steel();
    let d_mean = (0.5 - 0.035) * INCH;
    let d_wire = 0.035 * INCH;
    let spring = Spring::new(d_mean, d_wire, 1.0 * INCH, 8.0, &steel).unwrap();

    assert_relative_eq!(spring.spring_index().unwrap(), 13.29, max_relative = 1e-3);
    assert_relative_eq!(spring.solid_height().unwrap() / INCH, 0.35, max_relative = 1e-9);
    assert_relative_eq!(spring.max_displacement().unwrap() / INCH, 0.65, max_relative = 1e-9);

    // Independent evaluation of the closed-form expressions
    let g = 29e6 * PSI / (2.0 * 1.3);
    let k_ref = g * d_wire.powi(4) / (8.0 * d_mean.powi(3) * 8.0);
    let c = d_mean / d_wire;
    let wahl = (4.0 * c - 1.0) / (4.0 * c - 4.0) + 0.615 / c;
    let force = k_ref * 0.65 * INCH;
    let tau_ref = 8.0 * wahl * d_mean * force / (PI * d_wire.powi(3));

    assert_relative_eq!(spring.spring_constant().unwrap(), k_ref, max_relative = 1e-6);
    assert_relative_eq!(spring.max_shear().unwrap(), tau_ref, max_relative = 1e-6);
}

#[test]
fn solve_diameter_is_right_inverse_of_rate() {
    let steel = steel();
    let d_mean = (0.5 - 0.035) * INCH;
    let target = 2.6 * POUND_FORCE / INCH;

    let d_wire = Spring::solve_diameter(d_mean, 12.0, target, &steel).unwrap();
    let spring = Spring::new(d_mean, d_wire, 1.0 * INCH, 12.0, &steel).unwrap();

    assert_relative_eq!(spring.spring_constant().unwrap(), target, max_relative = 1e-9);
}

#[test]
fn right_inverse_holds_across_designs() {
    let steel = steel();
    for (d_mean, coils, rate) in [(0.01, 6.0, 500.0), (0.025, 10.0, 2000.0), (0.004, 3.0, 50.0)] {
        let d_wire = Spring::solve_diameter(d_mean, coils, rate, &steel).unwrap();
        let spring = Spring::new(d_mean, d_wire, 1.0, coils, &steel).unwrap();
        assert_relative_eq!(spring.spring_constant().unwrap(), rate, max_relative = 1e-9);
    }
}

#[test]
fn json_calculation_pipeline() {
    let input: SpringInput = serde_json::from_value(serde_json::json!({
        "label": "efunda",
        "material": "STEEL",
        "mean_diameter_m": 0.465 * INCH,
        "wire_diameter_m": 0.035 * INCH,
        "free_length_m": 1.0 * INCH,
        "num_coils": 8.0
    }))
    .unwrap();
    let result = calculate(&input).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["index_rating"], "TooHigh");
    assert!(json["max_shear_pa"].as_f64().unwrap() > 3.5e8);

    let sizing = solve_wire(&WireSizingInput {
        label: "efunda".to_string(),
        material: "steel".to_string(),
        mean_diameter_m: 0.465 * INCH,
        num_coils: 12.0,
        target_rate_n_per_m: 2.6 * POUND_FORCE / INCH,
    })
    .unwrap();
    assert_relative_eq!(sizing.wire_diameter_m / INCH, 0.0387, max_relative = 1e-3);
}
