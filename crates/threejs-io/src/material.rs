//! Material table entries.
//!
//! Sidecar materials are converted from Wavefront MTL files; [`material_key`]
//! maps MTL statement keys onto the sidecar property names and
//! [`materials_from_mtl`] builds the table from MTL text.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Placeholder colors for the first material slots.
pub const DUMMY_COLORS: [u32; 7] = [0xeeeeee, 0xee0000, 0x00ee00, 0x0000ee, 0xeeee00, 0x00eeee, 0xee00ee];

/// Maps an MTL statement key (case-insensitive) to the sidecar property it
/// sets.
pub fn material_key(mtl_key: &str) -> Option<&'static str> {
    let key = match mtl_key.to_ascii_lowercase().as_str() {
        "kd" => "colorDiffuse",
        "ka" => "colorAmbient",
        "ke" => "colorEmissive",
        "ks" => "colorSpecular",
        "ns" => "specularCoef",
        "tr" | "d" => "opacity",
        "ni" => "opticalDensity",
        "map_kd" => "mapDiffuse",
        "map_ka" => "mapAmbient",
        "map_ke" => "mapEmissive",
        "map_ks" | "map_ns" => "mapSpecular",
        "map_d" | "map_opacity" => "mapAlpha",
        "map_bump" | "bump" => "mapBump",
        "illum" | "refl" => "illumination",
        _ => return None,
    };
    Some(key)
}

/// Debug color for material slot `index`: the dummy palette first, then a
/// random 24-bit color drawn from an RNG seeded by `seed` and `index`.
pub fn generate_color(index: usize, seed: u64) -> u32 {
    if let Some(&color) = DUMMY_COLORS.get(index) {
        return color;
    }
    let mut rng = StdRng::seed_from_u64(seed ^ (index as u64).rotate_left(32));
    rng.random_range(0..=0xffffff)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(rename = "DbgName", default)]
    pub dbg_name: String,
    #[serde(rename = "DbgIndex", default)]
    pub dbg_index: u32,
    #[serde(rename = "DbgColor", default)]
    pub dbg_color: u32,

    #[serde(rename = "colorDiffuse", default, skip_serializing_if = "Option::is_none")]
    pub color_diffuse: Option<Vec<f64>>,
    #[serde(rename = "colorAmbient", default, skip_serializing_if = "Option::is_none")]
    pub color_ambient: Option<Vec<f64>>,
    #[serde(rename = "colorEmissive", default, skip_serializing_if = "Option::is_none")]
    pub color_emissive: Option<Vec<f64>>,
    #[serde(rename = "colorSpecular", default, skip_serializing_if = "Option::is_none")]
    pub color_specular: Option<Vec<f64>>,

    #[serde(rename = "specularCoef", default)]
    pub specular_coef: f64,
    #[serde(default)]
    pub opacity: f64,
    #[serde(rename = "opticalDensity", default)]
    pub optical_density: f64,

    #[serde(rename = "mapDiffuse", default, skip_serializing_if = "Option::is_none")]
    pub map_diffuse: Option<String>,
    #[serde(rename = "mapAmbient", default, skip_serializing_if = "Option::is_none")]
    pub map_ambient: Option<String>,
    #[serde(rename = "mapEmissive", default, skip_serializing_if = "Option::is_none")]
    pub map_emissive: Option<String>,
    #[serde(rename = "mapSpecular", default, skip_serializing_if = "Option::is_none")]
    pub map_specular: Option<String>,
    #[serde(rename = "mapAlpha", default, skip_serializing_if = "Option::is_none")]
    pub map_alpha: Option<String>,
    #[serde(rename = "mapBump", default, skip_serializing_if = "Option::is_none")]
    pub map_bump: Option<String>,

    #[serde(default)]
    pub illumination: u32,
}

/// Render-facing summary of a [`Material`].
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub color: [u8; 3],
    pub transparency: f32,
    pub diffuse_map: Option<String>,
    pub alpha_map: Option<String>,
}

impl Appearance {
    /// Opaque appearance with a packed `0xRRGGBB` color.
    pub fn from_rgb(rgb: u32) -> Self {
        Self {
            color: unpack_rgb(rgb),
            transparency: 0.0,
            diffuse_map: None,
            alpha_map: None,
        }
    }
}

fn unpack_rgb(rgb: u32) -> [u8; 3] {
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]
}

impl Material {
    /// Opaque material for slot `index` with a generated debug color.
    pub fn new(name: &str, index: u32, seed: u64) -> Self {
        Self {
            dbg_name: name.to_string(),
            dbg_index: index,
            dbg_color: generate_color(index as usize, seed),
            opacity: 1.0,
            optical_density: 1.0,
            ..Self::default()
        }
    }

    /// Diffuse color as 8-bit RGB, falling back to the debug color.
    pub fn diffuse_rgb(&self) -> [u8; 3] {
        match self.color_diffuse.as_deref() {
            Some([r, g, b, ..]) => [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8],
            _ => unpack_rgb(self.dbg_color),
        }
    }

    /// Transparency is `1 - opacity`; a fully transparent result is treated
    /// as unset opacity and reads as opaque.
    pub fn transparency(&self) -> f32 {
        let transparency = 1.0 - self.opacity as f32;
        if transparency == 1.0 {
            0.0
        } else {
            transparency
        }
    }

    pub fn appearance(&self) -> Appearance {
        Appearance {
            color: self.diffuse_rgb(),
            transparency: self.transparency(),
            diffuse_map: self.map_diffuse.clone(),
            alpha_map: self.map_alpha.clone(),
        }
    }

    /// Applies one MTL statement such as `Kd 1 0 0` or `map_Kd a.png`.
    /// Returns `false` for keys with no sidecar counterpart or values that
    /// do not parse.
    pub fn apply_mtl(&mut self, key: &str, value: &str) -> bool {
        let Some(property) = material_key(key) else {
            return false;
        };
        let value = value.trim();
        match property {
            "colorDiffuse" => set_color(&mut self.color_diffuse, value),
            "colorAmbient" => set_color(&mut self.color_ambient, value),
            "colorEmissive" => set_color(&mut self.color_emissive, value),
            "colorSpecular" => set_color(&mut self.color_specular, value),
            "specularCoef" => set_number(&mut self.specular_coef, value),
            "opticalDensity" => set_number(&mut self.optical_density, value),
            "opacity" => {
                let mut parsed = 0.0;
                if !set_number(&mut parsed, value) {
                    return false;
                }
                // `Tr` is the complement of `d`.
                self.opacity = if key.eq_ignore_ascii_case("tr") { 1.0 - parsed } else { parsed };
                true
            }
            "illumination" => match value.parse() {
                Ok(illum) => {
                    self.illumination = illum;
                    true
                }
                Err(_) => false,
            },
            map => {
                // Map statements may carry options before the file name.
                let Some(file) = value.split_whitespace().last() else {
                    return false;
                };
                let slot = match map {
                    "mapDiffuse" => &mut self.map_diffuse,
                    "mapAmbient" => &mut self.map_ambient,
                    "mapEmissive" => &mut self.map_emissive,
                    "mapSpecular" => &mut self.map_specular,
                    "mapAlpha" => &mut self.map_alpha,
                    _ => &mut self.map_bump,
                };
                *slot = Some(file.to_string());
                true
            }
        }
    }
}

fn set_number(slot: &mut f64, value: &str) -> bool {
    match value.split_whitespace().next().map(str::parse) {
        Some(Ok(number)) => {
            *slot = number;
            true
        }
        _ => false,
    }
}

fn set_color(slot: &mut Option<Vec<f64>>, value: &str) -> bool {
    let parsed: Result<Vec<f64>, _> = value.split_whitespace().take(3).map(str::parse).collect();
    match parsed {
        Ok(rgb) if rgb.len() == 3 => {
            *slot = Some(rgb);
            true
        }
        _ => false,
    }
}

/// Builds a material table from MTL text. Every `newmtl` starts a new entry;
/// statements before the first one are ignored.
pub fn materials_from_mtl(text: &str, seed: u64) -> Vec<Material> {
    let mut materials: Vec<Material> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        if key == "newmtl" {
            let index = materials.len() as u32;
            materials.push(Material::new(value.trim(), index, seed));
            continue;
        }
        match materials.last_mut() {
            Some(material) => {
                if !material.apply_mtl(key, value) {
                    debug!(key, "skipped MTL statement");
                }
            }
            None => debug!(key, "MTL statement before newmtl"),
        }
    }
    materials
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_key_is_case_insensitive() {
        assert_eq!(material_key("Kd"), Some("colorDiffuse"));
        assert_eq!(material_key("MAP_KD"), Some("mapDiffuse"));
        assert_eq!(material_key("d"), Some("opacity"));
        assert_eq!(material_key("Tr"), Some("opacity"));
        assert_eq!(material_key("refl"), Some("illumination"));
        assert_eq!(material_key("map_Ns"), Some("mapSpecular"));
        assert_eq!(material_key("Pr"), None);
    }

    #[test]
    fn test_generate_color() {
        assert_eq!(generate_color(0, 99), 0xeeeeee);
        assert_eq!(generate_color(6, 99), 0xee00ee);

        let a = generate_color(7, 42);
        assert_eq!(a, generate_color(7, 42));
        assert!(a <= 0xffffff);
        assert!(generate_color(1000, 1) <= 0xffffff);
    }

    #[test]
    fn test_appearance() {
        let mut material = Material::new("glass", 1, 0);
        material.color_diffuse = Some(vec![1.0, 0.5, 0.0]);
        material.opacity = 0.25;
        material.map_alpha = Some("mask.png".to_string());

        let appearance = material.appearance();
        assert_eq!(appearance.color, [255, 127, 0]);
        assert_eq!(appearance.transparency, 0.75);
        assert_eq!(appearance.alpha_map.as_deref(), Some("mask.png"));
        assert!(appearance.diffuse_map.is_none());
    }

    #[test]
    fn test_zero_opacity_reads_as_opaque() {
        let material = Material::default();
        assert_eq!(material.transparency(), 0.0);
        assert_eq!(material.diffuse_rgb(), [0, 0, 0]);
        assert_eq!(Material::new("x", 1, 0).diffuse_rgb(), [0xee, 0, 0]);
    }

    #[test]
    fn test_materials_from_mtl() {
        let mtl = "\
# exported
Kd 0 0 0
newmtl brick
Kd 0.8 0.2 0.1
Ns 96.0
Tr 0.25
map_Kd -s 1 1 1 textures/brick.jpg
illum 2
newmtl glass
d 0.4
map_d glass_alpha.png
Pr 0.5
";
        let materials = materials_from_mtl(mtl, 7);
        assert_eq!(materials.len(), 2);

        let brick = &materials[0];
        assert_eq!(brick.dbg_name, "brick");
        assert_eq!(brick.dbg_color, 0xeeeeee);
        assert_eq!(brick.color_diffuse, Some(vec![0.8, 0.2, 0.1]));
        assert_eq!(brick.specular_coef, 96.0);
        assert_eq!(brick.opacity, 0.75);
        assert_eq!(brick.map_diffuse.as_deref(), Some("textures/brick.jpg"));
        assert_eq!(brick.illumination, 2);

        let glass = &materials[1];
        assert_eq!(glass.dbg_index, 1);
        assert_eq!(glass.opacity, 0.4);
        assert_eq!(glass.map_alpha.as_deref(), Some("glass_alpha.png"));
    }

    #[test]
    fn test_apply_mtl_rejects_bad_values() {
        let mut material = Material::default();
        assert!(!material.apply_mtl("Kd", "1 0"));
        assert!(!material.apply_mtl("Ns", "shiny"));
        assert!(!material.apply_mtl("illum", "-1"));
        assert!(!material.apply_mtl("unknown", "1"));
        assert!(material.color_diffuse.is_none());
    }
}
