//! Reader for sidecar + binary model pairs.
//!
//! ```ignore
//! use threejs_io::ModelReader;
//!
//! let reader = ModelReader::open("tower.json")?;
//! let node = reader.read_node(&AssemblyOptions::default())?;
//! println!("{} triangles", node.face_count());
//! ```

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use threejs_core::{decode_container, decode_container_from_bytes, Container};
use tracing::debug;

use crate::assembly::{assemble, AssemblyOptions, MeshNode};
use crate::error::{ModelError, Result};
use crate::sidecar::Sidecar;

/// A decoded model: the sidecar and the container it names.
pub struct ModelReader {
    sidecar: Sidecar,
    container: Container,
}

impl ModelReader {
    /// Opens a sidecar JSON file and decodes the binary buffer it names,
    /// resolved relative to the sidecar's directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let sidecar = Sidecar::from_reader(BufReader::new(File::open(path)?))?;
        let buffer_path = buffer_path(path.parent(), &sidecar)?;
        debug!(sidecar = %path.display(), buffer = %buffer_path.display(), "opening model");

        let container = decode_container(BufReader::new(File::open(&buffer_path)?))?;
        Ok(Self { sidecar, container })
    }

    /// Parses a sidecar from memory and reads its buffer from `base_path`
    /// (or the working directory).
    pub fn from_json(json_data: &[u8], base_path: Option<&Path>) -> Result<Self> {
        let sidecar = Sidecar::from_slice(json_data)?;
        let data = fs::read(buffer_path(base_path, &sidecar)?)?;
        let container = decode_container_from_bytes(&data)?;
        Ok(Self { sidecar, container })
    }

    /// Pairs an in-memory sidecar with already encoded container bytes.
    pub fn from_parts(sidecar: Sidecar, buffer: &[u8]) -> Result<Self> {
        let container = decode_container_from_bytes(buffer)?;
        Ok(Self { sidecar, container })
    }

    pub fn read_sidecar(&self) -> &Sidecar {
        &self.sidecar
    }

    pub fn read_container(&self) -> &Container {
        &self.container
    }

    pub fn into_parts(self) -> (Sidecar, Container) {
        (self.sidecar, self.container)
    }

    /// Assembles the model into a triangle mesh.
    pub fn read_node(&self, options: &AssemblyOptions) -> Result<MeshNode> {
        assemble(&self.container, &self.sidecar, options)
    }
}

fn buffer_path(base_path: Option<&Path>, sidecar: &Sidecar) -> Result<PathBuf> {
    if sidecar.buffers.is_empty() {
        return Err(ModelError::InvalidSidecar("no buffers entry".into()));
    }
    Ok(match base_path {
        Some(base) => base.join(&sidecar.buffers),
        None => PathBuf::from(&sidecar.buffers),
    })
}

impl crate::traits::Reader for ModelReader {
    fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        ModelReader::open(path).map_err(|e| std::io::Error::other(e.to_string()))
    }

    fn read_container(&mut self) -> std::io::Result<Container> {
        Ok(self.container.clone())
    }

    fn read_nodes(&mut self) -> std::io::Result<Vec<MeshNode>> {
        let node = self
            .read_node(&AssemblyOptions::default())
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(vec![node])
    }
}
