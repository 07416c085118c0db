//! # Layer Matrices
//!
//! Sweeps of the force model over the fixed 1–10 layer range, for one stack
//! description or for every registered material in both configurations.

use std::ops::RangeInclusive;

use crate::errors::CalcResult;
use crate::materials::MaterialRegistry;

use super::breaking::{calculate, CalculationRequest, CalculationResult};
use super::force::{Configuration, PhysicalConstants, PENNY_SPACING_MM};

/// Layer counts covered by every matrix, independent of any requested count.
pub const MATRIX_LAYERS: RangeInclusive<u32> = 1..=10;

/// Results for layers 1 through 10 of the stack described by `request`.
///
/// The request's own layer count is ignored.
pub fn layer_matrix(request: &CalculationRequest) -> CalcResult<Vec<CalculationResult>> {
    MATRIX_LAYERS
        .map(|n| calculate(&request.at_layers(n)))
        .collect()
}

/// Every material × configuration × layer combination.
///
/// Pegged rows use `pegged_spacing_mm`, falling back to the penny spacing;
/// unpegged rows carry no spacing. Ordering is material (registry order),
/// then pegged before unpegged, then layers ascending.
pub fn all_materials_matrix(
    registry: &MaterialRegistry,
    pegged_spacing_mm: Option<f64>,
    constants: &PhysicalConstants,
) -> CalcResult<Vec<CalculationResult>> {
    let spacing = pegged_spacing_mm.unwrap_or(PENNY_SPACING_MM);
    let mut rows = Vec::with_capacity(registry.len() * Configuration::ALL.len() * 10);

    for material in registry.iter() {
        for configuration in Configuration::ALL {
            let request = CalculationRequest::new(material.clone(), 1, configuration)
                .with_spacing(match configuration {
                    Configuration::Pegged => Some(spacing),
                    Configuration::Unpegged => None,
                })
                .with_constants(*constants);
            rows.extend(layer_matrix(&request)?);
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_layer_matrix_ignores_requested_layers() {
        let registry = MaterialRegistry::builtin();
        let request = CalculationRequest::new(
            registry.get("pine").unwrap().clone(),
            7,
            Configuration::Unpegged,
        );
        let rows = layer_matrix(&request).unwrap();
        let layers: Vec<u32> = rows.iter().map(|r| r.layers).collect();
        assert_eq!(layers, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_all_materials_row_count_and_uniqueness() {
        let registry = MaterialRegistry::builtin();
        let rows = all_materials_matrix(&registry, None, &PhysicalConstants::default()).unwrap();
        assert_eq!(rows.len(), 3 * 2 * 10);

        let keys: HashSet<(String, Configuration, u32)> = rows
            .iter()
            .map(|r| (r.material.clone(), r.configuration, r.layers))
            .collect();
        assert_eq!(keys.len(), rows.len());
    }

    #[test]
    fn test_all_materials_spacing() {
        let registry = MaterialRegistry::builtin();
        let rows =
            all_materials_matrix(&registry, Some(6.35), &PhysicalConstants::default()).unwrap();
        for row in &rows {
            match row.configuration {
                Configuration::Pegged => assert_eq!(row.spacing_mm, Some(6.35)),
                Configuration::Unpegged => assert_eq!(row.spacing_mm, None),
            }
        }

        let default_rows =
            all_materials_matrix(&registry, None, &PhysicalConstants::default()).unwrap();
        assert_eq!(default_rows[0].spacing_mm, Some(PENNY_SPACING_MM));
    }
}
