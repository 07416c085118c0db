//! # Bone Reference Table
//!
//! Approximate average breaking forces for healthy adult bones, used to put
//! an estimated breaking force into context. Values are rough reference
//! points only and vary widely with age, density and loading direction.
//!
//! ## Example
//!
//! ```rust
//! use break_core::bones::{correlated_bones, BoneCorrelation};
//!
//! assert_eq!(correlated_bones(100.0), BoneCorrelation::NoneCorrelated);
//! assert_eq!(
//!     correlated_bones(200.0).names(),
//!     vec!["Clavicle", "Skull (fracture)"]
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Disclaimer printed with every bone correlation.
pub const BONE_DISCLAIMER: &str =
    "(Note: Bone data approximations for healthy adults; not medical advice.)";

/// Text shown when the force is below every threshold.
pub const NO_BONE_MARKER: &str = "None (below typical bone breaking thresholds)";

/// A bone and the force (lbf) typically needed to break it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoneReference {
    pub name: &'static str,
    pub threshold_lbf: f64,
}

const fn bone(name: &'static str, threshold_lbf: f64) -> BoneReference {
    BoneReference {
        name,
        threshold_lbf,
    }
}

/// Reference thresholds in ascending order.
pub const BONE_TABLE: &[BoneReference] = &[
    bone("Clavicle", 147.0),
    bone("Skull (fracture)", 196.0),
    bone("Ulna", 337.0),
    bone("Skull (crush)", 517.0),
    bone("Ribs", 742.0),
    bone("Humerus", 787.0),
    bone("Femur", 899.0),
    bone("Tibia", 900.0),
];

pub fn bone_table() -> &'static [BoneReference] {
    BONE_TABLE
}

/// Bones a given force could plausibly break.
///
/// An empty match is its own variant so output never shows a blank list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "bones")]
pub enum BoneCorrelation {
    Bones(Vec<String>),
    NoneCorrelated,
}

impl BoneCorrelation {
    pub fn names(&self) -> Vec<&str> {
        match self {
            BoneCorrelation::Bones(names) => names.iter().map(String::as_str).collect(),
            BoneCorrelation::NoneCorrelated => Vec::new(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, BoneCorrelation::NoneCorrelated)
    }
}

impl fmt::Display for BoneCorrelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoneCorrelation::Bones(names) => f.write_str(&names.join(", ")),
            BoneCorrelation::NoneCorrelated => f.write_str(NO_BONE_MARKER),
        }
    }
}

/// Every bone whose threshold is at or below `force_lbf`, in table order.
pub fn correlated_bones(force_lbf: f64) -> BoneCorrelation {
    let names: Vec<String> = BONE_TABLE
        .iter()
        .filter(|b| b.threshold_lbf <= force_lbf)
        .map(|b| b.name.to_string())
        .collect();

    if names.is_empty() {
        BoneCorrelation::NoneCorrelated
    } else {
        BoneCorrelation::Bones(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ascending() {
        assert!(BONE_TABLE
            .windows(2)
            .all(|w| w[0].threshold_lbf <= w[1].threshold_lbf));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(correlated_bones(147.0).names(), vec!["Clavicle"]);
        assert!(correlated_bones(146.9).is_none());
    }

    #[test]
    fn test_all_bones() {
        assert_eq!(correlated_bones(1000.0).names().len(), BONE_TABLE.len());
    }

    #[test]
    fn test_display() {
        assert_eq!(correlated_bones(0.0).to_string(), NO_BONE_MARKER);
        assert_eq!(
            correlated_bones(400.0).to_string(),
            "Clavicle, Skull (fracture), Ulna"
        );
    }

    #[test]
    fn test_serialization_tags_empty_marker() {
        let json = serde_json::to_string(&BoneCorrelation::NoneCorrelated).unwrap();
        assert_eq!(json, r#"{"kind":"NoneCorrelated"}"#);
    }
}
