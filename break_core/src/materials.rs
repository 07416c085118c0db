//! # Materials Registry
//!
//! Empirical breaking parameters for the materials the estimator knows about.
//!
//! Each [`MaterialProfile`] holds the single-layer breaking force `F1` (lbf),
//! the mass `m` (kg) of one layer, used by the pegged fragment-assist model,
//! and a [`MaterialClass`] that selects the scaling law.
//!
//! ## Sources
//!
//! The registry is built once at startup, either from the built-in table or
//! from a JSON file that replaces it wholesale:
//!
//! ```json
//! {
//!   "pine":     { "F1": 200, "m": 0.8, "class": "flexible" },
//!   "concrete": { "F1": 500, "m": 5.5, "class": "brittle" }
//! }
//! ```
//!
//! A file that is missing, unreadable, malformed, empty, or contains any
//! invalid entry is rejected as a whole and the built-in table is used.
//!
//! ## Example
//!
//! ```rust
//! use break_core::materials::{load_materials, MaterialClass};
//!
//! let registry = load_materials(None);
//! let pine = registry.get("Pine").unwrap();
//! assert_eq!(pine.base_force_lbf, 200.0);
//! assert_eq!(pine.class, MaterialClass::Flexible);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};

/// File consulted when no explicit material file is given
pub const DEFAULT_MATERIALS_FILE: &str = "materials.json";

/// How a material resists a strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialClass {
    /// Wood-like; fails in bending, stacks scale superlinearly
    Flexible,
    /// Stone/concrete-like; layers shatter one after another
    Brittle,
}

impl MaterialClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialClass::Flexible => "flexible",
            MaterialClass::Brittle => "brittle",
        }
    }
}

impl fmt::Display for MaterialClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical parameters of one breakable material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProfile {
    /// Registry key (lowercase)
    pub name: String,
    /// Force to break a single layer, F1 (lbf)
    pub base_force_lbf: f64,
    /// Mass of a single layer, m (kg)
    pub mass_kg: f64,
    /// Scaling class
    pub class: MaterialClass,
}

impl MaterialProfile {
    pub fn new(
        name: impl Into<String>,
        base_force_lbf: f64,
        mass_kg: f64,
        class: MaterialClass,
    ) -> Self {
        MaterialProfile {
            name: name.into(),
            base_force_lbf,
            mass_kg,
            class,
        }
    }

    /// Validate that F1 and m are usable positive numbers.
    pub fn validate(&self) -> CalcResult<()> {
        if self.name.trim().is_empty() {
            return Err(CalcError::invalid_input(
                "name",
                "",
                "Material name cannot be empty",
            ));
        }
        if !(self.base_force_lbf.is_finite() && self.base_force_lbf > 0.0) {
            return Err(CalcError::invalid_input(
                format!("{}.F1", self.name),
                self.base_force_lbf.to_string(),
                "Base force must be a positive number",
            ));
        }
        if !(self.mass_kg.is_finite() && self.mass_kg > 0.0) {
            return Err(CalcError::invalid_input(
                format!("{}.m", self.name),
                self.mass_kg.to_string(),
                "Mass must be a positive number",
            ));
        }
        Ok(())
    }
}

/// One entry of the JSON material file.
#[derive(Debug, Clone, Deserialize)]
struct MaterialEntry {
    #[serde(rename = "F1")]
    base_force_lbf: f64,
    #[serde(rename = "m")]
    mass_kg: f64,
    #[serde(alias = "type")]
    class: MaterialClass,
}

/// Where the active registry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    BuiltIn,
    File(PathBuf),
}

impl fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrySource::BuiltIn => f.write_str("built-in table"),
            RegistrySource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Ordered, read-only set of material profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRegistry {
    source: RegistrySource,
    profiles: Vec<MaterialProfile>,
}

static BUILTIN: Lazy<MaterialRegistry> = Lazy::new(|| MaterialRegistry {
    source: RegistrySource::BuiltIn,
    profiles: vec![
        // 0.75" pine board, ~450 kg/m³
        MaterialProfile::new("pine", 200.0, 0.8, MaterialClass::Flexible),
        // ~280 kg/m³, MOR roughly half of pine
        MaterialProfile::new("paulownia", 100.0, 0.5, MaterialClass::Flexible),
        // 16x8x1.625" patio slab
        MaterialProfile::new("concrete", 500.0, 5.5, MaterialClass::Brittle),
    ],
});

impl MaterialRegistry {
    /// The built-in pine / paulownia / concrete table.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Parse a JSON material table.
    ///
    /// Every entry must be valid and the table must not be empty; otherwise
    /// the whole document is rejected.
    pub fn from_json_str(json: &str, source: RegistrySource) -> CalcResult<Self> {
        let entries: BTreeMap<String, MaterialEntry> = serde_json::from_str(json)
            .map_err(|e| CalcError::serialization(format!("Invalid material JSON: {e}")))?;

        if entries.is_empty() {
            return Err(CalcError::invalid_input(
                "materials",
                "{}",
                "Material table is empty",
            ));
        }

        let mut profiles: Vec<MaterialProfile> = Vec::with_capacity(entries.len());
        for (name, entry) in entries {
            let key = name.trim().to_ascii_lowercase();
            if profiles.iter().any(|p| p.name == key) {
                return Err(CalcError::invalid_input(
                    "materials",
                    name,
                    "Duplicate material name (names are case-insensitive)",
                ));
            }
            let profile = MaterialProfile::new(key, entry.base_force_lbf, entry.mass_kg, entry.class);
            profile.validate()?;
            profiles.push(profile);
        }
        profiles.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(MaterialRegistry { source, profiles })
    }

    /// Look up a material by name (trimmed, ASCII case-insensitive).
    pub fn get(&self, name: &str) -> CalcResult<&MaterialProfile> {
        let wanted = name.trim();
        self.profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CalcError::material_not_found(wanted, &self.names()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn source(&self) -> &RegistrySource {
        &self.source
    }
}

/// Load a material file, reporting why it could not be used.
pub fn try_load_materials(path: &Path) -> CalcResult<MaterialRegistry> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CalcError::file_error("read materials", path.display().to_string(), e.to_string())
    })?;
    MaterialRegistry::from_json_str(&contents, RegistrySource::File(path.to_path_buf()))
}

/// Load the active material registry.
///
/// With `Some(path)` the file replaces the built-in table if it is usable.
/// With `None`, [`DEFAULT_MATERIALS_FILE`] in the working directory is tried.
/// Any failure falls back to [`MaterialRegistry::builtin`]; this function
/// never fails.
pub fn load_materials(path: Option<&Path>) -> MaterialRegistry {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_MATERIALS_FILE), false),
    };

    if !explicit && !path.exists() {
        debug!("no {} found, using built-in materials", DEFAULT_MATERIALS_FILE);
        return MaterialRegistry::builtin();
    }

    match try_load_materials(&path) {
        Ok(registry) => {
            debug!(
                path = %path.display(),
                count = registry.len(),
                "loaded material table"
            );
            registry
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "material file rejected, using built-in table");
            MaterialRegistry::builtin()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let reg = MaterialRegistry::builtin();
        assert_eq!(reg.names(), vec!["pine", "paulownia", "concrete"]);
        assert_eq!(reg.source(), &RegistrySource::BuiltIn);

        let concrete = reg.get("concrete").unwrap();
        assert_eq!(concrete.base_force_lbf, 500.0);
        assert_eq!(concrete.mass_kg, 5.5);
        assert_eq!(concrete.class, MaterialClass::Brittle);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let reg = MaterialRegistry::builtin();
        assert_eq!(reg.get("  PAULOWNIA ").unwrap().name, "paulownia");
    }

    #[test]
    fn test_unknown_material() {
        let reg = MaterialRegistry::builtin();
        let err = reg.get("oak").unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
        assert!(err.to_string().contains("pine, paulownia, concrete"));
    }

    #[test]
    fn test_json_replaces_table() {
        let json = r#"{
            "oak":  { "F1": 260, "m": 1.1, "class": "flexible" },
            "Tile": { "F1": 150, "m": 1.6, "type": "brittle" }
        }"#;
        let reg = MaterialRegistry::from_json_str(json, RegistrySource::BuiltIn).unwrap();
        assert_eq!(reg.names(), vec!["oak", "tile"]);
        assert!(reg.get("pine").is_err());
        assert_eq!(reg.get("tile").unwrap().class, MaterialClass::Brittle);
    }

    #[test]
    fn test_json_rejects_bad_entries() {
        let negative = r#"{ "oak": { "F1": -5, "m": 1.0, "class": "flexible" } }"#;
        assert!(MaterialRegistry::from_json_str(negative, RegistrySource::BuiltIn).is_err());

        let missing_mass = r#"{ "oak": { "F1": 100, "class": "flexible" } }"#;
        assert!(MaterialRegistry::from_json_str(missing_mass, RegistrySource::BuiltIn).is_err());

        let bad_class = r#"{ "oak": { "F1": 100, "m": 1.0, "class": "rubbery" } }"#;
        assert!(MaterialRegistry::from_json_str(bad_class, RegistrySource::BuiltIn).is_err());

        assert!(MaterialRegistry::from_json_str("{}", RegistrySource::BuiltIn).is_err());
        assert!(MaterialRegistry::from_json_str("not json", RegistrySource::BuiltIn).is_err());
    }

    #[test]
    fn test_json_rejects_case_duplicates() {
        let json = r#"{
            "Oak": { "F1": 100, "m": 1.0, "class": "flexible" },
            "oak": { "F1": 120, "m": 1.0, "class": "flexible" }
        }"#;
        assert!(MaterialRegistry::from_json_str(json, RegistrySource::BuiltIn).is_err());
    }

    #[test]
    fn test_profile_validation() {
        let ok = MaterialProfile::new("pine", 200.0, 0.8, MaterialClass::Flexible);
        assert!(ok.validate().is_ok());
        let nan = MaterialProfile::new("pine", f64::NAN, 0.8, MaterialClass::Flexible);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_falls_back() {
        let reg = load_materials(Some(Path::new("/definitely/not/here/materials.json")));
        assert_eq!(reg, MaterialRegistry::builtin());
    }
}
