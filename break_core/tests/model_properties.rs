//! End-to-end properties of the force model over the built-in materials.
use std::collections::HashSet;

use break_core::calculations::{all_materials_matrix, layer_matrix, PENCIL_SPACING_MM};
use break_core::export::{export_csv, CSV_HEADER};
use break_core::{
    calculate, compute_force, CalculationRequest, Configuration, MaterialClass, MaterialRegistry,
    PhysicalConstants,
};

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

#[test]
fn force_and_pressure_are_consistent_everywhere() {
    let registry = MaterialRegistry::builtin();
    let constants = PhysicalConstants::default().with_contact_area(3.0);
    let rows = all_materials_matrix(&registry, Some(PENCIL_SPACING_MM), &constants).unwrap();
    for row in rows {
        assert!(row.force_lbf >= 0.0);
        assert!(approx_eq(row.pressure_psi, row.force_lbf / 3.0, 1e-9));
    }
}

#[test]
fn pegged_never_exceeds_base_and_never_below_floor() {
    let registry = MaterialRegistry::builtin();
    let c = PhysicalConstants::default();
    for material in registry.iter() {
        for n in 1..=10u32 {
            let base = material.base_force_lbf * f64::from(n);
            let floor = material.base_force_lbf * (f64::from(n) * 0.5).max(1.0);
            for spacing in [0.1, 1.52, 6.35, 40.0] {
                let f = compute_force(material, n, Configuration::Pegged, Some(spacing), &c);
                assert!(f <= base + 1e-9);
                assert!(f >= floor - 1e-9);
            }
        }
    }
}

#[test]
fn single_layer_equals_f1_for_pegged_and_brittle() {
    let registry = MaterialRegistry::builtin();
    let c = PhysicalConstants::default();
    for material in registry.iter() {
        let pegged = compute_force(material, 1, Configuration::Pegged, Some(1.52), &c);
        assert_eq!(pegged, material.base_force_lbf);
        if material.class == MaterialClass::Brittle {
            let unpegged = compute_force(material, 1, Configuration::Unpegged, None, &c);
            assert_eq!(unpegged, material.base_force_lbf);
        }
    }
}

#[test]
fn flexible_unpegged_strictly_increasing_for_any_positive_exponent() {
    let registry = MaterialRegistry::builtin();
    let paulownia = registry.get("paulownia").unwrap().clone();
    for exponent in [0.25, 1.0, 1.5, 2.0] {
        let request = CalculationRequest::new(paulownia.clone(), 1, Configuration::Unpegged)
            .with_constants(PhysicalConstants::default().with_scaling_exponent(exponent));
        let rows = layer_matrix(&request).unwrap();
        assert!(rows.windows(2).all(|w| w[1].force_lbf > w[0].force_lbf));
    }
}

#[test]
fn longer_impact_window_means_less_assist() {
    let registry = MaterialRegistry::builtin();
    let concrete = registry.get("concrete").unwrap().clone();
    let short = CalculationRequest::new(concrete.clone(), 3, Configuration::Pegged)
        .with_spacing(Some(1.52));
    let long = short
        .clone()
        .with_constants(PhysicalConstants::default().with_impact_duration(0.02));

    let short_force = calculate(&short).unwrap().force_lbf;
    let long_force = calculate(&long).unwrap().force_lbf;
    assert!(long_force > short_force);
}

#[test]
fn csv_export_has_unique_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("all.csv");
    let registry = MaterialRegistry::builtin();
    let count = export_csv(&registry, None, &PhysicalConstants::default(), &path).unwrap();
    assert_eq!(count, registry.len() * 2 * 10);

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some(CSV_HEADER));

    let keys: HashSet<String> = lines
        .map(|line| line.splitn(5, ',').take(4).collect::<Vec<_>>().join(","))
        .collect();
    assert_eq!(keys.len(), count);
    assert!(keys.contains("concrete,pegged,1.52,2"));
    assert!(keys.contains("paulownia,unpegged,N/A,10"));
}
