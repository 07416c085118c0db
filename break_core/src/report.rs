//! # Text Reports
//!
//! Plain-text renderings of results for terminal output. Forces and
//! pressures are shown to one decimal place.

use std::fmt::Write;

use crate::bones::BONE_DISCLAIMER;
use crate::calculations::{AssistBreakdown, CalculationResult, Configuration, CALIBRATED_MAX_LAYERS};

/// Report for a single estimate.
///
/// ```text
/// Layers: 1, Force: 200.0 lbf, PSI: 80.0
/// Correlated Bones (could potentially break): Clavicle, Skull (fracture)
/// (Note: Bone data approximations for healthy adults; not medical advice.)
/// ```
pub fn format_single(result: &CalculationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Layers: {}, Force: {:.1} lbf, PSI: {:.1}",
        result.layers, result.force_lbf, result.pressure_psi
    );
    let _ = writeln!(
        out,
        "Correlated Bones (could potentially break): {}",
        result.correlated_bones
    );
    out.push_str(BONE_DISCLAIMER);
    out.push('\n');
    out
}

/// Heading for a matrix of one configuration.
pub fn matrix_title(configuration: Configuration, spacing_mm: Option<f64>) -> String {
    match (configuration, spacing_mm) {
        (Configuration::Pegged, Some(s)) if s > 0.0 => {
            format!("Matrix for {configuration} (spacing {s} mm):")
        }
        _ => format!("Matrix for {configuration}:"),
    }
}

/// Markdown-style table of a layer sweep.
///
/// The title is taken from the first row; an empty slice yields only the
/// table header.
pub fn format_matrix(rows: &[CalculationResult]) -> String {
    let mut out = String::new();
    if let Some(first) = rows.first() {
        let _ = writeln!(out, "{}", matrix_title(first.configuration, first.spacing_mm));
    }
    out.push_str("| Layers | Force (lbf) | PSI | Correlated Bones |\n");
    out.push_str("|---|---|---|---|\n");
    for row in rows {
        let _ = writeln!(
            out,
            "| {} | {:.1} | {:.1} | {} |",
            row.layers, row.force_lbf, row.pressure_psi, row.correlated_bones
        );
    }
    out
}

/// Step-by-step breakdown of the pegged fragment assist.
pub fn format_assist(assist: &AssistBreakdown) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Fragment assist per gap:");
    let _ = writeln!(out, "  Fall velocity:  {:.4} m/s", assist.fall_velocity_m_s);
    let _ = writeln!(out, "  Momentum:       {:.4} kg*m/s", assist.momentum_kg_m_s);
    let _ = writeln!(
        out,
        "  Impact force:   {:.2} N ({:.2} lbf)",
        assist.impact_force_n, assist.assist_lbf
    );
    let _ = writeln!(out, "  Class factor:   {:.2}", assist.factor);
    let _ = writeln!(
        out,
        "  Base {:.1} lbf - reduction {:.1} lbf, floor {:.1} lbf{}",
        assist.base_lbf,
        assist.reduction_lbf,
        assist.floor_lbf,
        if assist.clamped { " (clamped)" } else { "" }
    );
    out
}

/// Warning text for stacks outside the calibrated range.
pub fn calibration_note(layers: u32) -> Option<String> {
    (layers > CALIBRATED_MAX_LAYERS).then(|| {
        format!(
            "Warning: {layers} layers is beyond the calibrated range (1-{CALIBRATED_MAX_LAYERS}); treat the estimate with extra caution."
        )
    })
}
