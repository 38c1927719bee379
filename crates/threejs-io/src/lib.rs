//! Three.js model I/O.
//!
//! A Three.js binary model is a JSON sidecar plus the binary container it
//! names. This crate reads and writes those pairs and assembles them into
//! triangle meshes.
//!
//! | Module           | Purpose                                          |
//! |------------------|--------------------------------------------------|
//! | `sidecar`        | JSON metadata, materials, buffer name, topology  |
//! | `material`       | MTL key mapping, debug colors, appearance        |
//! | `assembly`       | Container + sidecar to a transformed triangle mesh |
//! | `model_reader`   | Open `model.json` and decode its buffer          |
//! | `model_writer`   | Write `model.json` and `model.bin`               |
//!
//! # Unified Trait API
//!
//! [`ModelReader`] implements [`Reader`] and [`ModelWriter`] implements
//! [`Writer`]:
//!
//! ```ignore
//! use threejs_io::{Reader, Writer, ModelReader, ModelWriter};
//!
//! let reader = ModelReader::open("in/tower.json")?;
//! let mut writer = ModelWriter::with_sidecar(reader.read_sidecar().clone());
//! writer.set_container(reader.read_container().clone());
//! writer.write("out/tower.json")?;
//! ```

pub mod assembly;
pub mod error;
pub mod material;
pub mod model_reader;
pub mod model_writer;
pub mod sidecar;
pub mod traits;

pub use assembly::{assemble, AssemblyOptions, Face, MeshNode, TriangleGroup};
pub use error::{ModelError, Result};
pub use material::{generate_color, material_key, materials_from_mtl, Appearance, Material};
pub use model_reader::ModelReader;
pub use model_writer::ModelWriter;
pub use sidecar::{Anchor, Metadata, Sidecar, Topology};
pub use traits::{Reader, Writer};
