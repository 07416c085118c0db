//! # break_core - Breaking Force Estimation Engine
//!
//! `break_core` estimates the force needed to break a stack of boards, tiles
//! or slabs, either stacked directly ("unpegged") or separated by spacers
//! ("pegged"), and puts the result next to typical human-bone breaking
//! thresholds.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take a request and return a result
//! - **JSON-First**: Requests, results and errors implement Serialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use break_core::{calculate, load_materials, CalculationRequest, Configuration};
//!
//! let registry = load_materials(None);
//! let concrete = registry.get("concrete").unwrap().clone();
//! let request = CalculationRequest::new(concrete, 2, Configuration::Pegged)
//!     .with_spacing(Some(1.52));
//!
//! let result = calculate(&request).unwrap();
//! println!("{:.1} lbf, {:.1} psi", result.force_lbf, result.pressure_psi);
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Material registry (built-in table or JSON file)
//! - [`bones`] - Bone reference thresholds and correlation
//! - [`calculations`] - Force model, single estimates and layer matrices
//! - [`report`] - Plain-text rendering
//! - [`export`] - CSV export
//! - [`plot`] - PNG force-vs-layers chart
//! - [`self_test`] - Runtime verification of the model's guarantees
//! - [`units`] - Unit newtypes and conversions
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic file output

pub mod bones;
pub mod calculations;
pub mod errors;
pub mod export;
pub mod file_io;
pub mod materials;
pub mod plot;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use bones::{correlated_bones, BoneCorrelation};
pub use calculations::{
    calculate, compute_force, compute_pressure, CalculationRequest, CalculationResult,
    Configuration, PhysicalConstants,
};
pub use errors::{CalcError, CalcResult};
pub use materials::{load_materials, MaterialClass, MaterialProfile, MaterialRegistry};
