//! # CSV Export
//!
//! Writes the full material × configuration × layer cross product as CSV:
//!
//! ```text
//! Material,Config,Spacing_mm,Layers,Force_lbf,PSI,Correlated_Bones
//! pine,pegged,1.52,1,200.0,80.0,"Clavicle, Skull (fracture)"
//! pine,unpegged,N/A,1,200.0,80.0,"Clavicle, Skull (fracture)"
//! ```
//!
//! Fields that contain commas, quotes or newlines are quoted, with embedded
//! quotes doubled.

use std::borrow::Cow;
use std::path::Path;

use tracing::info;

use crate::calculations::{all_materials_matrix, CalculationResult, PhysicalConstants};
use crate::errors::CalcResult;
use crate::file_io::write_atomic;
use crate::materials::MaterialRegistry;

/// Column header line.
pub const CSV_HEADER: &str = "Material,Config,Spacing_mm,Layers,Force_lbf,PSI,Correlated_Bones";

/// Default export file name used by the interactive front end.
pub const DEFAULT_CSV_FILE: &str = "breaking_matrix.csv";

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Format one result as a CSV data row (no trailing newline).
pub fn to_csv_row(result: &CalculationResult) -> String {
    let spacing = result
        .spacing_mm
        .map(|s| s.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let bones = result.correlated_bones.to_string();

    format!(
        "{},{},{},{},{:.1},{:.1},{}",
        csv_field(&result.material),
        result.configuration,
        spacing,
        result.layers,
        result.force_lbf,
        result.pressure_psi,
        csv_field(&bones)
    )
}

/// Format a set of results as a complete CSV document.
pub fn to_csv(rows: &[CalculationResult]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for row in rows {
        csv.push_str(&to_csv_row(row));
        csv.push('\n');
    }
    csv
}

/// Compute every combination for `registry` and write it to `path`.
///
/// Returns the number of data rows written.
pub fn export_csv(
    registry: &MaterialRegistry,
    pegged_spacing_mm: Option<f64>,
    constants: &PhysicalConstants,
    path: &Path,
) -> CalcResult<usize> {
    let rows = all_materials_matrix(registry, pegged_spacing_mm, constants)?;
    write_atomic(path, to_csv(&rows).as_bytes())?;
    info!(path = %path.display(), rows = rows.len(), "wrote CSV matrix");
    Ok(rows.len())
}
