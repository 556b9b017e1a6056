//! Impactor and target material properties.
//!
//! Material properties are carried in an explicit catalog passed by the
//! caller rather than a process-global table, so tests and callers can
//! substitute their own values without mutating shared state. A builtin
//! catalog of common impactor classes is provided for convenience.

use once_cell::sync::Lazy;

/// Bulk properties of an impactor or target material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// Bulk density (kg/m³)
    pub density_kg_m3: f64,
    /// Aerodynamic breakup strength (Pa) — the dynamic pressure at which
    /// the body fragments
    pub strength_pa: f64,
}

impl Material {
    pub fn new(name: &str, density_kg_m3: f64, strength_pa: f64) -> Self {
        Self {
            name: name.to_string(),
            density_kg_m3,
            strength_pa,
        }
    }
}

/// An ordered collection of named materials.
#[derive(Debug, Clone, Default)]
pub struct MaterialCatalog {
    materials: Vec<Material>,
}

impl MaterialCatalog {
    pub fn new(materials: Vec<Material>) -> Self {
        Self { materials }
    }

    /// Case-insensitive lookup by name.
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.iter().map(|m| m.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Builtin impactor classes with literature point-estimate properties.
///
/// Strengths are effective aerodynamic breakup strengths, which sit well
/// below laboratory crush strengths for the same rock types.
static BUILTIN_CATALOG: Lazy<MaterialCatalog> = Lazy::new(|| {
    MaterialCatalog::new(vec![
        Material::new("ice", 917.0, 1.0e5),
        Material::new("porous_rock", 1500.0, 1.0e6),
        Material::new("dense_rock", 3300.0, 1.0e7),
        Material::new("iron", 7800.0, 1.0e8),
    ])
});

/// The builtin impactor material catalog.
pub fn builtin_catalog() -> &'static MaterialCatalog {
    &BUILTIN_CATALOG
}
