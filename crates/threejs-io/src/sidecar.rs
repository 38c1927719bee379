//! JSON sidecar describing a binary buffer.
//!
//! A model on disk is a pair of files: the sidecar (`model.json`) and the
//! binary container it names in `buffers` (`model.bin`). The sidecar carries
//! the model metadata, the material table and an optional placement
//! transform (`topology`).
//!
//! Topology data comes from several exporters and is parsed leniently:
//! `scale` and anchor `unit` may be numbers or numeric strings, and `null`
//! entries inside the numeric arrays read as `0`.

use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::material::Material;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "formatVersion", default)]
    pub format_version: f64,
    #[serde(rename = "sourceFile", default)]
    pub source_file: String,
    #[serde(rename = "generatedBy", default)]
    pub generated_by: String,
    #[serde(default)]
    pub vertices: u32,
    #[serde(default)]
    pub faces: u32,
    #[serde(default)]
    pub normals: u32,
    #[serde(default)]
    pub colors: u32,
    #[serde(default)]
    pub uvs: u32,
    #[serde(default)]
    pub materials: u32,
}

/// Named attachment point on a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    #[serde(default, deserialize_with = "nullable_numbers")]
    pub normal: Vec<f64>,
    #[serde(default, deserialize_with = "nullable_numbers")]
    pub center: Vec<f64>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub unit: f64,
    #[serde(default)]
    pub name: String,
}

/// Placement of the model: uniform scale, rotation quaternion `[x, y, z, w]`
/// and translation. A zero scale and empty arrays mean identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    #[serde(default, deserialize_with = "number_or_string")]
    pub scale: f64,
    #[serde(default, deserialize_with = "nullable_numbers")]
    pub rotation: Vec<f64>,
    #[serde(rename = "anchorcount", default)]
    pub anchor_count: u32,
    #[serde(default)]
    pub anchors: Vec<Anchor>,
    #[serde(default, deserialize_with = "nullable_numbers")]
    pub offset: Vec<f64>,
}

impl Topology {
    pub fn is_identity(&self) -> bool {
        (self.scale == 0.0 || self.scale == 1.0)
            && self.rotation.iter().take(3).all(|&c| c == 0.0)
            && self.offset.iter().all(|&c| c == 0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sidecar {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Binary container file name, relative to the sidecar.
    #[serde(default)]
    pub buffers: String,
    #[serde(default)]
    pub topology: Topology,
}

impl Sidecar {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(NumberOrString::Number(value)) => Ok(value),
        Some(NumberOrString::String(text)) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got '{}'", text))),
    }
}

fn nullable_numbers<'de, D>(deserializer: D) -> std::result::Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Option<f64>>>::deserialize(deserializer)?;
    Ok(values.unwrap_or_default().into_iter().map(|v| v.unwrap_or(0.0)).collect())
}
