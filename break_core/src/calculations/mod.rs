//! # Breaking Calculations
//!
//! Each calculation follows the same pattern:
//!
//! - `*Request` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(request) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`force`] - The closed-form force model and its constants
//! - [`breaking`] - Validated single estimate with pressure and bone correlation
//! - [`matrix`] - Layer sweeps (1 through 10) and the all-materials cross product

pub mod breaking;
pub mod force;
pub mod matrix;

// Re-export commonly used types
pub use breaking::{calculate, CalculationRequest, CalculationResult, CALIBRATED_MAX_LAYERS};
pub use force::{
    compute_force, compute_pressure, pegged_assist, AssistBreakdown, Configuration,
    PhysicalConstants, SpacingPreset, PENCIL_SPACING_MM, PENNY_SPACING_MM,
};
pub use matrix::{all_materials_matrix, layer_matrix, MATRIX_LAYERS};
