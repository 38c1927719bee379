//! Example demonstrating the Reader/Writer trait interface.
//!
//! Builds a small container, writes it as a sidecar + binary pair, reads it
//! back through the traits and prints the assembled mesh.

use std::io;
use std::path::Path;

use threejs_core::{ArrayInput, Container, ThreeJsError};
use threejs_io::{materials_from_mtl, ModelReader, ModelWriter, Reader, Writer};

fn main() -> io::Result<()> {
    let out_dir = std::env::temp_dir().join("threejs_io_demo");
    std::fs::create_dir_all(&out_dir)?;
    let path = out_dir.join("pyramid.json");

    println!("=== Unified Writer Trait Demo ===\n");
    let mut writer = ModelWriter::new();
    writer.set_materials(materials_from_mtl("newmtl base\nKd 0.5 0.5 0.5\nnewmtl side\nKd 1 0.8 0\n", 0));
    let pyramid = create_pyramid().map_err(io::Error::other)?;
    write_with_trait(writer, pyramid, &path)?;

    println!("=== Unified Reader Trait Demo ===\n");
    let mut reader = <ModelReader as Reader>::open(&path)?;
    let node = reader.read_first_node()?;
    println!("Vertices: {}", node.vertices.len());
    for (group, material) in node.face_groups.iter().zip(&node.materials) {
        println!(
            "  group {}: {} triangles, color {:?}",
            group.batch_id,
            group.faces.len(),
            material.color
        );
    }
    Ok(())
}

/// Generic function that works with any Writer implementation.
fn write_with_trait<W: Writer>(mut writer: W, container: Container, path: &Path) -> io::Result<()> {
    writer.set_container(container);
    println!("  Vertices: {}", writer.vertex_count());
    println!("  Faces: {}", writer.face_count());
    writer.write(path)?;
    println!("  ✓ Written to {}\n", path.display());
    Ok(())
}

fn create_pyramid() -> Result<Container, ThreeJsError> {
    let mut c = Container::new();
    c.set_vertices(ArrayInput::Nested(vec![
        vec![-1.0, 0.0, -1.0],
        vec![1.0, 0.0, -1.0],
        vec![1.0, 0.0, 1.0],
        vec![-1.0, 0.0, 1.0],
        vec![0.0, 1.5, 0.0],
    ]))?;
    c.flat_quads.set_vertices(ArrayInput::Tuples(vec![[0, 1, 2, 3]]))?;
    c.flat_quads.set_materials(ArrayInput::Flat(vec![0]))?;
    c.flat_triangles
        .set_vertices(ArrayInput::Tuples(vec![[0, 4, 1], [1, 4, 2], [2, 4, 3], [3, 4, 0]]))?;
    c.flat_triangles.set_materials(ArrayInput::Flat(vec![1; 4]))?;
    Ok(c)
}
