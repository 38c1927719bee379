use std::io;

use thiserror::Error;
use threejs_core::ThreeJsError;

/// Errors that can occur when reading, assembling or writing models.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Container error: {0}")]
    Container(#[from] ThreeJsError),

    #[error("Invalid sidecar: {0}")]
    InvalidSidecar(String),

    #[error("Material index {index} out of range for {groups} face groups")]
    MaterialIndex { index: i16, groups: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
