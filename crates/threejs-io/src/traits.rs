//! Common traits for model readers and writers.
//!
//! ```ignore
//! use threejs_io::{Reader, Writer, ModelReader, ModelWriter};
//!
//! fn copy<R: Reader, W: Writer>(input: &str, output: &str) -> io::Result<()> {
//!     let mut reader = R::open(input)?;
//!     let container = reader.read_container()?;
//!     let mut writer = W::new();
//!     writer.set_container(container);
//!     writer.write(output)
//! }
//! ```

use std::io;
use std::path::Path;

use threejs_core::Container;

use crate::assembly::MeshNode;

/// Common interface for model readers.
pub trait Reader: Sized {
    /// Open a model for reading.
    fn open<P: AsRef<Path>>(path: P) -> io::Result<Self>;

    /// Return the decoded binary container.
    fn read_container(&mut self) -> io::Result<Container>;

    /// Assemble the model into triangle meshes with default options.
    fn read_nodes(&mut self) -> io::Result<Vec<MeshNode>>;

    /// Read the first mesh node.
    fn read_first_node(&mut self) -> io::Result<MeshNode> {
        let nodes = self.read_nodes()?;
        if let Some(node) = nodes.into_iter().next() {
            Ok(node)
        } else {
            Err(io::Error::new(io::ErrorKind::InvalidData, "No mesh node found"))
        }
    }
}

/// Common interface for model writers.
pub trait Writer: Sized {
    fn new() -> Self;

    /// Set the container to be written.
    fn set_container(&mut self, container: Container);

    /// Write the model to `path`.
    fn write<P: AsRef<Path>>(&self, path: P) -> io::Result<()>;

    /// Vertices in the container set so far.
    fn vertex_count(&self) -> usize;

    /// Faces in the container set so far.
    fn face_count(&self) -> usize {
        0
    }
}
