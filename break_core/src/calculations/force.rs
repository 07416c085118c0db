//! # Force Model
//!
//! Closed-form estimate of the force needed to break a stack of layers.
//!
//! ## Unpegged stacks
//!
//! Layers in direct contact act as one member:
//!
//! - Flexible: `F = F1 · nᵏ` (k = scaling exponent, default 1.5). Bonded
//!   boards bend together, so stress concentrates and the required force
//!   grows faster than the layer count.
//! - Brittle: `F = F1 · n`. Each layer shatters in turn.
//!
//! ## Pegged stacks
//!
//! Layers separated by spacers start from the additive base `F1 · n`. Each of
//! the `n − 1` gaps lets a broken fragment fall and strike the layer below:
//!
//! ```text
//! v      = √(2 g h)              free fall through the gap h
//! p      = m · v
//! F_N    = p / Δt                impulse over the impact window
//! assist = F_N / 4.448           lbf
//! F      = max(F1·n − (n−1)·assist·factor,  F1·max(1, n/2))
//! ```
//!
//! The floor keeps a large assist from driving the estimate toward zero.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{MaterialClass, MaterialProfile};
use crate::units::{
    Kilograms, Meters, Millimeters, Newtons, Pounds, Psi, Seconds, SqIn, GRAVITY_M_PER_S2,
};

/// US penny thickness, the default spacer (mm)
pub const PENNY_SPACING_MM: f64 = 1.52;

/// Carpenter pencil thickness (mm)
pub const PENCIL_SPACING_MM: f64 = 6.35;

/// How the layers are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Configuration {
    /// Separated by spacers
    Pegged,
    /// Stacked in direct contact
    Unpegged,
}

impl Configuration {
    /// Both configurations, in export order.
    pub const ALL: [Configuration; 2] = [Configuration::Pegged, Configuration::Unpegged];

    pub fn as_str(&self) -> &'static str {
        match self {
            Configuration::Pegged => "pegged",
            Configuration::Unpegged => "unpegged",
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Configuration {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pegged" => Ok(Configuration::Pegged),
            "unpegged" => Ok(Configuration::Unpegged),
            other => Err(CalcError::invalid_input(
                "configuration",
                other,
                "Expected 'pegged' or 'unpegged'",
            )),
        }
    }
}

/// Common spacers for pegged stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpacingPreset {
    Penny,
    Pencil,
}

impl SpacingPreset {
    pub fn mm(&self) -> f64 {
        match self {
            SpacingPreset::Penny => PENNY_SPACING_MM,
            SpacingPreset::Pencil => PENCIL_SPACING_MM,
        }
    }
}

/// Tunable empirical constants of the model.
///
/// The scaling exponent and assist factors have no authoritative source, so
/// they are parameters rather than hard-coded values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Window over which fragment momentum is transferred (s)
    pub impact_duration_s: f64,
    /// Striking surface used for the psi figure (in²)
    pub contact_area_in2: f64,
    /// Exponent k in `F1 · nᵏ` for unpegged flexible stacks
    pub scaling_exponent: f64,
    /// Share of the fragment assist that wood fragments deliver
    pub assist_factor_flexible: f64,
    /// Share of the fragment assist that brittle fragments deliver
    pub assist_factor_brittle: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants {
            impact_duration_s: 0.005,
            contact_area_in2: 2.5,
            scaling_exponent: 1.5,
            assist_factor_flexible: 0.5,
            assist_factor_brittle: 1.0,
        }
    }
}

impl PhysicalConstants {
    pub fn with_impact_duration(mut self, seconds: f64) -> Self {
        self.impact_duration_s = seconds;
        self
    }

    pub fn with_contact_area(mut self, area_in2: f64) -> Self {
        self.contact_area_in2 = area_in2;
        self
    }

    pub fn with_scaling_exponent(mut self, exponent: f64) -> Self {
        self.scaling_exponent = exponent;
        self
    }

    /// Assist factor for a material class.
    pub fn assist_factor(&self, class: MaterialClass) -> f64 {
        match class {
            MaterialClass::Flexible => self.assist_factor_flexible,
            MaterialClass::Brittle => self.assist_factor_brittle,
        }
    }

    /// All constants must be finite and strictly positive.
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("impact_duration_s", self.impact_duration_s),
            ("contact_area_in2", self.contact_area_in2),
            ("scaling_exponent", self.scaling_exponent),
            ("assist_factor_flexible", self.assist_factor_flexible),
            ("assist_factor_brittle", self.assist_factor_brittle),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be a positive number",
                ));
            }
        }
        Ok(())
    }
}

/// Intermediate values of the pegged fragment-assist calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssistBreakdown {
    /// Fragment speed after falling through the gap (m/s)
    pub fall_velocity_m_s: f64,
    /// Fragment momentum (kg·m/s)
    pub momentum_kg_m_s: f64,
    /// Impact force on the next layer (N)
    pub impact_force_n: f64,
    /// Impact force per gap (lbf)
    pub assist_lbf: f64,
    /// Class-dependent share of the assist actually delivered
    pub factor: f64,
    /// Total assist over all gaps (lbf)
    pub reduction_lbf: f64,
    /// Additive base `F1 · n` (lbf)
    pub base_lbf: f64,
    /// Lower bound `F1 · max(1, n/2)` (lbf)
    pub floor_lbf: f64,
    /// Resulting force (lbf)
    pub force_lbf: f64,
    /// True when the floor, not the assist, set the result
    pub clamped: bool,
}

/// Work through the fragment-assist model for a pegged stack.
///
/// Returns `None` when no assist applies: a single layer, or no positive gap.
pub fn pegged_assist(
    profile: &MaterialProfile,
    layers: u32,
    spacing_mm: Option<f64>,
    constants: &PhysicalConstants,
) -> Option<AssistBreakdown> {
    let spacing_mm = spacing_mm.filter(|s| *s > 0.0)?;
    if layers <= 1 {
        return None;
    }

    let n = f64::from(layers);
    let f1 = profile.base_force_lbf;
    let gap: Meters = Millimeters(spacing_mm).into();
    let mass = Kilograms(profile.mass_kg);
    let dt = Seconds(constants.impact_duration_s);

    let fall_velocity_m_s = (2.0 * GRAVITY_M_PER_S2 * gap.0).sqrt();
    let momentum_kg_m_s = mass.0 * fall_velocity_m_s;
    let impact_force = Newtons(momentum_kg_m_s / dt.0);
    let assist: Pounds = impact_force.into();
    let factor = constants.assist_factor(profile.class);
    let reduction_lbf = (n - 1.0) * assist.0 * factor;

    let base_lbf = f1 * n;
    let floor_lbf = f1 * (n * 0.5).max(1.0);
    let unclamped = base_lbf - reduction_lbf;
    let clamped = unclamped < floor_lbf;

    Some(AssistBreakdown {
        fall_velocity_m_s,
        momentum_kg_m_s,
        impact_force_n: impact_force.0,
        assist_lbf: assist.0,
        factor,
        reduction_lbf,
        base_lbf,
        floor_lbf,
        force_lbf: unclamped.max(floor_lbf),
        clamped,
    })
}

/// Estimated force (lbf) to break `layers` layers of `profile`.
///
/// Pure; `layers` is expected to be at least 1 (see
/// [`CalculationRequest::validate`](super::breaking::CalculationRequest::validate)).
/// Spacing is ignored for unpegged stacks.
///
/// # Example
///
/// ```rust
/// use break_core::calculations::force::{compute_force, Configuration, PhysicalConstants};
/// use break_core::materials::MaterialRegistry;
///
/// let registry = MaterialRegistry::builtin();
/// let concrete = registry.get("concrete").unwrap();
/// let force = compute_force(
///     concrete,
///     2,
///     Configuration::Pegged,
///     Some(1.52),
///     &PhysicalConstants::default(),
/// );
/// assert!((force - 957.3).abs() < 0.1);
/// ```
pub fn compute_force(
    profile: &MaterialProfile,
    layers: u32,
    configuration: Configuration,
    spacing_mm: Option<f64>,
    constants: &PhysicalConstants,
) -> f64 {
    let n = f64::from(layers);
    let f1 = profile.base_force_lbf;

    match configuration {
        Configuration::Unpegged => match profile.class {
            MaterialClass::Flexible => f1 * n.powf(constants.scaling_exponent),
            MaterialClass::Brittle => f1 * n,
        },
        Configuration::Pegged => pegged_assist(profile, layers, spacing_mm, constants)
            .map(|assist| assist.force_lbf)
            .unwrap_or(f1 * n),
    }
}

/// Pressure (psi) of `force_lbf` spread over `contact_area_in2`.
pub fn compute_pressure(force_lbf: f64, contact_area_in2: f64) -> f64 {
    let psi: Psi = Pounds(force_lbf) / SqIn(contact_area_in2);
    psi.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialRegistry;

    const EPSILON: f64 = 0.05;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn material(name: &str) -> MaterialProfile {
        MaterialRegistry::builtin().get(name).unwrap().clone()
    }

    #[test]
    fn test_unpegged_flexible_single_layer() {
        let pine = material("pine");
        let c = PhysicalConstants::default();
        let force = compute_force(&pine, 1, Configuration::Unpegged, None, &c);
        assert_eq!(force, 200.0);
        assert_eq!(compute_pressure(force, c.contact_area_in2), 80.0);
    }

    #[test]
    fn test_unpegged_flexible_superlinear() {
        let pine = material("pine");
        let c = PhysicalConstants::default();
        // 200 * 4^1.5 = 1600
        let force = compute_force(&pine, 4, Configuration::Unpegged, None, &c);
        assert!(approx_eq(force, 1600.0, 1e-9));

        let squared = c.with_scaling_exponent(2.0);
        let force = compute_force(&pine, 3, Configuration::Unpegged, None, &squared);
        assert!(approx_eq(force, 1800.0, 1e-9));
    }

    #[test]
    fn test_unpegged_brittle_linear() {
        let concrete = material("concrete");
        let c = PhysicalConstants::default();
        for n in 1..=10 {
            let force = compute_force(&concrete, n, Configuration::Unpegged, None, &c);
            assert!(approx_eq(force, 500.0 * f64::from(n), 1e-9));
        }
    }

    #[test]
    fn test_pegged_concrete_worked_example() {
        let concrete = material("concrete");
        let c = PhysicalConstants::default();
        let assist = pegged_assist(&concrete, 2, Some(PENNY_SPACING_MM), &c).unwrap();

        assert!(approx_eq(assist.fall_velocity_m_s, 0.1726, 1e-4));
        assert!(approx_eq(assist.momentum_kg_m_s, 0.9493, 1e-3));
        assert!(approx_eq(assist.impact_force_n, 189.86, 0.1));
        assert!(approx_eq(assist.assist_lbf, 42.69, 0.02));
        assert!(approx_eq(assist.reduction_lbf, 42.69, 0.02));
        assert_eq!(assist.factor, 1.0);
        assert!(!assist.clamped);

        let force = compute_force(&concrete, 2, Configuration::Pegged, Some(1.52), &c);
        assert!(approx_eq(force, 957.3, EPSILON));
    }

    #[test]
    fn test_pegged_without_spacing_is_base() {
        let pine = material("pine");
        let c = PhysicalConstants::default();
        for spacing in [None, Some(0.0), Some(-3.0)] {
            let force = compute_force(&pine, 5, Configuration::Pegged, spacing, &c);
            assert_eq!(force, 1000.0);
        }
        assert!(pegged_assist(&pine, 5, Some(0.0), &c).is_none());
    }

    #[test]
    fn test_pegged_single_layer_is_f1() {
        let c = PhysicalConstants::default();
        for name in ["pine", "paulownia", "concrete"] {
            let m = material(name);
            let pegged = compute_force(&m, 1, Configuration::Pegged, Some(6.35), &c);
            assert_eq!(pegged, m.base_force_lbf);
        }
    }

    #[test]
    fn test_pegged_clamp_floor() {
        // A heavy, brittle slab with a huge gap drives the unclamped value negative
        let slab = MaterialProfile::new("slab", 100.0, 50.0, MaterialClass::Brittle);
        let c = PhysicalConstants::default();
        let assist = pegged_assist(&slab, 6, Some(100.0), &c).unwrap();
        assert!(assist.clamped);
        assert!(assist.base_lbf - assist.reduction_lbf < 0.0);
        assert_eq!(assist.force_lbf, 300.0);

        // Floor is never below F1 even for two layers
        let assist = pegged_assist(&slab, 2, Some(100.0), &c).unwrap();
        assert_eq!(assist.floor_lbf, 100.0);
        assert_eq!(assist.force_lbf, 100.0);
    }

    #[test]
    fn test_flexible_assist_factor() {
        let pine = material("pine");
        let c = PhysicalConstants::default();
        let assist = pegged_assist(&pine, 3, Some(PENNY_SPACING_MM), &c).unwrap();
        assert_eq!(assist.factor, 0.5);
        // 0.8 kg * 0.1726 m/s / 0.005 s / 4.448 = 6.21 lbf per gap, halved, two gaps
        assert!(approx_eq(assist.reduction_lbf, 6.21, 0.01));
    }

    #[test]
    fn test_pegged_monotonic_in_spacing() {
        let c = PhysicalConstants::default();
        for name in ["pine", "paulownia", "concrete"] {
            let m = material(name);
            for n in 1..=10 {
                let mut previous = f64::INFINITY;
                for spacing in [0.0, 0.5, 1.52, 3.0, 6.35, 12.0, 50.0] {
                    let force = compute_force(&m, n, Configuration::Pegged, Some(spacing), &c);
                    assert!(force <= previous + 1e-9, "{name} n={n} spacing={spacing}");
                    previous = force;
                }
            }
        }
    }

    #[test]
    fn test_configuration_from_str() {
        assert_eq!("Pegged".parse::<Configuration>().unwrap(), Configuration::Pegged);
        assert_eq!(" unpegged ".parse::<Configuration>().unwrap(), Configuration::Unpegged);
        assert!("stacked".parse::<Configuration>().is_err());
    }

    #[test]
    fn test_constants_validation() {
        assert!(PhysicalConstants::default().validate().is_ok());
        assert!(PhysicalConstants::default()
            .with_impact_duration(0.0)
            .validate()
            .is_err());
        assert!(PhysicalConstants::default()
            .with_contact_area(f64::INFINITY)
            .validate()
            .is_err());
        assert!(PhysicalConstants::default()
            .with_scaling_exponent(-1.0)
            .validate()
            .is_err());
    }
}
