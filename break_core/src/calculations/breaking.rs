//! # Breaking Calculation
//!
//! Ties a material, a stack description and the model constants together
//! into a single validated request and produces the force / pressure / bone
//! correlation result.
//!
//! ## Example
//!
//! ```rust
//! use break_core::calculations::breaking::{calculate, CalculationRequest};
//! use break_core::calculations::force::Configuration;
//! use break_core::materials::MaterialRegistry;
//!
//! let registry = MaterialRegistry::builtin();
//! let request = CalculationRequest::new(
//!     registry.get("pine").unwrap().clone(),
//!     1,
//!     Configuration::Unpegged,
//! );
//!
//! let result = calculate(&request).unwrap();
//! assert_eq!(result.force_lbf, 200.0);
//! assert_eq!(result.pressure_psi, 80.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bones::{correlated_bones, BoneCorrelation};
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialProfile;

use super::force::{
    compute_force, compute_pressure, pegged_assist, AssistBreakdown, Configuration,
    PhysicalConstants,
};

/// Largest stack the empirical constants were tuned against.
pub const CALIBRATED_MAX_LAYERS: u32 = 10;

/// One estimate to compute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub material: MaterialProfile,
    /// Number of layers, at least 1
    pub layers: u32,
    pub configuration: Configuration,
    /// Gap between layers (mm); only meaningful when pegged
    pub spacing_mm: Option<f64>,
    pub constants: PhysicalConstants,
}

impl CalculationRequest {
    pub fn new(material: MaterialProfile, layers: u32, configuration: Configuration) -> Self {
        CalculationRequest {
            material,
            layers,
            configuration,
            spacing_mm: None,
            constants: PhysicalConstants::default(),
        }
    }

    pub fn with_spacing(mut self, spacing_mm: Option<f64>) -> Self {
        self.spacing_mm = spacing_mm;
        self
    }

    pub fn with_constants(mut self, constants: PhysicalConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Same stack description at a different layer count.
    pub fn at_layers(&self, layers: u32) -> Self {
        CalculationRequest {
            layers,
            ..self.clone()
        }
    }

    /// Spacing that actually feeds the model (`None` for unpegged stacks).
    pub fn effective_spacing(&self) -> Option<f64> {
        match self.configuration {
            Configuration::Pegged => self.spacing_mm,
            Configuration::Unpegged => None,
        }
    }

    /// True when the layer count is outside the calibrated 1–10 range.
    pub fn beyond_calibration(&self) -> bool {
        self.layers > CALIBRATED_MAX_LAYERS
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.layers < 1 {
            return Err(CalcError::invalid_input(
                "layers",
                self.layers.to_string(),
                "At least one layer is required",
            ));
        }
        if let Some(spacing) = self.spacing_mm {
            if !spacing.is_finite() || spacing < 0.0 {
                return Err(CalcError::invalid_input(
                    "spacing_mm",
                    spacing.to_string(),
                    "Spacing must be zero or a positive number of millimeters",
                ));
            }
        }
        self.material.validate()?;
        self.constants.validate()
    }
}

/// Outcome of one estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub material: String,
    pub configuration: Configuration,
    /// Spacing used by the model, if any (mm)
    pub spacing_mm: Option<f64>,
    pub layers: u32,
    /// Estimated breaking force (lbf)
    pub force_lbf: f64,
    /// Force over the contact area (psi)
    pub pressure_psi: f64,
    pub correlated_bones: BoneCorrelation,
    /// Fragment-assist steps, present only when the assist applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<AssistBreakdown>,
}

/// Compute force, pressure and bone correlation for a request.
///
/// Layer counts above [`CALIBRATED_MAX_LAYERS`] are computed but logged as a
/// warning.
pub fn calculate(request: &CalculationRequest) -> CalcResult<CalculationResult> {
    request.validate()?;

    if request.beyond_calibration() {
        warn!(
            layers = request.layers,
            "layer count exceeds the calibrated range of 1-{}", CALIBRATED_MAX_LAYERS
        );
    }

    let spacing = request.effective_spacing();
    let force_lbf = compute_force(
        &request.material,
        request.layers,
        request.configuration,
        spacing,
        &request.constants,
    )
    .max(0.0);
    let pressure_psi = compute_pressure(force_lbf, request.constants.contact_area_in2);

    let assist = match request.configuration {
        Configuration::Pegged => {
            pegged_assist(&request.material, request.layers, spacing, &request.constants)
        }
        Configuration::Unpegged => None,
    };

    Ok(CalculationResult {
        material: request.material.name.clone(),
        configuration: request.configuration,
        spacing_mm: spacing,
        layers: request.layers,
        force_lbf,
        pressure_psi,
        correlated_bones: correlated_bones(force_lbf),
        assist,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialRegistry;

    fn request(name: &str, layers: u32, configuration: Configuration) -> CalculationRequest {
        let material = MaterialRegistry::builtin().get(name).unwrap().clone();
        CalculationRequest::new(material, layers, configuration)
    }

    #[test]
    fn test_zero_layers_rejected() {
        let err = calculate(&request("pine", 0, Configuration::Unpegged)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_negative_spacing_rejected() {
        let req = request("pine", 2, Configuration::Pegged).with_spacing(Some(-1.0));
        assert!(calculate(&req).is_err());
    }

    #[test]
    fn test_bad_constants_rejected() {
        let req = request("pine", 2, Configuration::Unpegged)
            .with_constants(PhysicalConstants::default().with_contact_area(0.0));
        assert!(calculate(&req).is_err());
    }

    #[test]
    fn test_unpegged_ignores_spacing() {
        let req = request("concrete", 3, Configuration::Unpegged).with_spacing(Some(6.35));
        let result = calculate(&req).unwrap();
        assert_eq!(result.spacing_mm, None);
        assert!(result.assist.is_none());
        assert_eq!(result.force_lbf, 1500.0);
    }

    #[test]
    fn test_pegged_result_carries_assist() {
        let req = request("concrete", 2, Configuration::Pegged).with_spacing(Some(1.52));
        let result = calculate(&req).unwrap();
        assert_eq!(result.spacing_mm, Some(1.52));
        assert!(result.assist.is_some());
        assert!((result.force_lbf - 957.3).abs() < 0.05);
        assert!((result.pressure_psi - result.force_lbf / 2.5).abs() < 1e-9);
        assert_eq!(result.correlated_bones.names().len(), 8);
    }

    #[test]
    fn test_beyond_calibration_still_computes() {
        let req = request("paulownia", 12, Configuration::Unpegged);
        assert!(req.beyond_calibration());
        let result = calculate(&req).unwrap();
        assert!(result.force_lbf > 0.0);
    }

    #[test]
    fn test_at_layers_keeps_everything_else() {
        let req = request("pine", 1, Configuration::Pegged).with_spacing(Some(6.35));
        let five = req.at_layers(5);
        assert_eq!(five.layers, 5);
        assert_eq!(five.spacing_mm, Some(6.35));
        assert_eq!(five.material, req.material);
    }

    #[test]
    fn test_result_serialization() {
        let result = calculate(&request("pine", 1, Configuration::Unpegged)).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("force_lbf"));
        assert!(json.contains("\"configuration\": \"unpegged\""));
        assert!(!json.contains("assist"));

        let roundtrip: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, result);
    }
}
