//! Writer for sidecar + binary model pairs.
//!
//! `ModelWriter::write("out/tower.json")` produces `out/tower.json` and
//! `out/tower.bin`. The sidecar's `buffers` entry and metadata counts are
//! filled in from the container.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use threejs_core::{Container, ContainerEncoder, EncoderBuffer};
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::material::Material;
use crate::sidecar::{Sidecar, Topology};

/// `formatVersion` written into new sidecars.
pub const FORMAT_VERSION: f64 = 3.1;

pub struct ModelWriter {
    container: Container,
    sidecar: Sidecar,
}

impl ModelWriter {
    pub fn new() -> Self {
        let mut sidecar = Sidecar::default();
        sidecar.metadata.format_version = FORMAT_VERSION;
        sidecar.metadata.generated_by = concat!("threejs-io ", env!("CARGO_PKG_VERSION")).to_string();
        Self {
            container: Container::new(),
            sidecar,
        }
    }

    /// Starts from an existing sidecar, keeping its materials, topology and
    /// descriptive metadata.
    pub fn with_sidecar(sidecar: Sidecar) -> Self {
        Self {
            container: Container::new(),
            sidecar,
        }
    }

    pub fn set_container(&mut self, container: Container) {
        self.container = container;
    }

    pub fn set_materials(&mut self, materials: Vec<Material>) {
        self.sidecar.materials = materials;
    }

    pub fn set_topology(&mut self, topology: Topology) {
        self.sidecar.topology = topology;
    }

    pub fn set_source_file(&mut self, source: &str) {
        self.sidecar.metadata.source_file = source.to_string();
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Sidecar as it will be written next to `bin_name`.
    pub fn sidecar_for(&self, bin_name: &str) -> Sidecar {
        let mut sidecar = self.sidecar.clone();
        sidecar.buffers = bin_name.to_string();
        let meta = &mut sidecar.metadata;
        meta.vertices = self.container.vertices().len() as u32;
        meta.faces = self.container.total_faces() as u32;
        meta.normals = self.container.normals().len() as u32;
        meta.colors = 0;
        meta.uvs = self.container.uvs().len() as u32;
        meta.materials = sidecar.materials.len() as u32;
        sidecar
    }

    /// Writes `<stem>.json` and `<stem>.bin` into the directory of `path`.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let (json_path, bin_path) = output_paths(path.as_ref())?;
        let bin_name = bin_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ModelError::InvalidSidecar(format!("invalid buffer path {}", bin_path.display())))?;

        let mut buffer = EncoderBuffer::new(BufWriter::new(File::create(&bin_path)?));
        ContainerEncoder::new().encode(&self.container, &mut buffer)?;
        let size = buffer.size();
        buffer.into_inner()?;

        fs::write(&json_path, self.sidecar_for(bin_name).to_json()?)?;
        debug!(json = %json_path.display(), bin = %bin_path.display(), bytes = size, "wrote model");
        Ok(())
    }
}

impl Default for ModelWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn output_paths(path: &Path) -> Result<(PathBuf, PathBuf)> {
    if path.file_stem().is_none() {
        return Err(ModelError::InvalidSidecar(format!("no file name in {}", path.display())));
    }
    Ok((path.with_extension("json"), path.with_extension("bin")))
}

impl crate::traits::Writer for ModelWriter {
    fn new() -> Self {
        ModelWriter::new()
    }

    fn set_container(&mut self, container: Container) {
        ModelWriter::set_container(self, container);
    }

    fn write<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        ModelWriter::write(self, path).map_err(|e| std::io::Error::other(e.to_string()))
    }

    fn vertex_count(&self) -> usize {
        self.container.vertices().len()
    }

    fn face_count(&self) -> usize {
        self.container.total_faces()
    }
}
