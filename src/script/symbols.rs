use std::collections::BTreeMap;

/// Ambient/diffuse/specular reflection coefficients for one colour channel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Reflectance {
    /// Ambient reflection.
    pub ambient: f64,
    /// Diffuse reflection.
    pub diffuse: f64,
    /// Specular reflection.
    pub specular: f64,
}

/// Per-channel reflectance applied to a solid primitive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Material {
    /// Red channel coefficients.
    pub red: Reflectance,
    /// Green channel coefficients.
    pub green: Reflectance,
    /// Blue channel coefficients.
    pub blue: Reflectance,
}

impl Material {
    /// Name under which the neutral material is reported.
    pub const DEFAULT_NAME: &'static str = ".white";

    /// Neutral material used whenever a primitive names none.
    pub const NEUTRAL: Self = {
        let c = Reflectance {
            ambient: 0.2,
            diffuse: 0.5,
            specular: 0.5,
        };
        Self {
            red: c,
            green: c,
            blue: c,
        }
    };

    /// Coefficients in r/g/b order.
    pub fn channels(&self) -> [Reflectance; 3] {
        [self.red, self.green, self.blue]
    }
}

/// Named definitions collected while parsing (`constants` blocks).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SymbolTable {
    materials: BTreeMap<String, Material>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a material.
    pub fn define_material(&mut self, name: impl Into<String>, material: Material) {
        self.materials.insert(name.into(), material);
    }

    /// Look up a user-defined material.
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Resolve a primitive's material reference; `None` selects [`Material::NEUTRAL`].
    pub fn material_for(&self, name: Option<&str>) -> Option<Material> {
        match name {
            None => Some(Material::NEUTRAL),
            Some(n) => self.materials.get(n).copied(),
        }
    }

    /// Names of all user-defined materials, sorted.
    pub fn material_names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }
}
