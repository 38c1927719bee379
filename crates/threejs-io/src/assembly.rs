//! Assembly of a decoded container and its sidecar into a triangle mesh.
//!
//! The result is a [`MeshNode`]: transformed positions, unit normals, UVs and
//! one triangle group per material. Quads are split along the `2-0`
//! diagonal into `0-1-2` and `2-3-0`, and every per-corner channel is split
//! the same way.

use glam::{Mat4, Quat, Vec2, Vec3};
use threejs_core::{Container, FaceGroupView, FaceRecords};
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::material::{generate_color, Appearance};
use crate::sidecar::{Sidecar, Topology};

/// Knobs for [`assemble`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Transform positions by the sidecar topology.
    pub apply_topology: bool,
    /// Seed for generated colors of groups without a sidecar material.
    pub color_seed: u64,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            apply_topology: true,
            color_seed: 0,
        }
    }
}

/// One triangle with optional per-corner normal and UV indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub vertex: [u32; 3],
    pub normal: Option<[u32; 3]>,
    pub uv: Option<[u32; 3]>,
}

/// Triangles sharing one material.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleGroup {
    pub batch_id: u32,
    pub faces: Vec<Face>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshNode {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub face_groups: Vec<TriangleGroup>,
    /// Appearance per face group, in the same order.
    pub materials: Vec<Appearance>,
}

impl MeshNode {
    pub fn face_count(&self) -> usize {
        self.face_groups.iter().map(|g| g.faces.len()).sum()
    }
}

/// Placement matrix of `topology`. Missing parts are identity; a zero scale
/// reads as 1 and a zero-length rotation as no rotation.
pub fn topology_matrix(topology: &Topology) -> Mat4 {
    let scale = if topology.scale == 0.0 { 1.0 } else { topology.scale as f32 };

    let rotation = match topology.rotation.as_slice() {
        [x, y, z, w, ..] => {
            let q = Quat::from_xyzw(*x as f32, *y as f32, *z as f32, *w as f32);
            if q.length_squared() > f32::EPSILON {
                q.normalize()
            } else {
                Quat::IDENTITY
            }
        }
        _ => Quat::IDENTITY,
    };

    let mut offset = Vec3::ZERO;
    for (axis, &value) in topology.offset.iter().take(3).enumerate() {
        offset[axis] = value as f32;
    }

    Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, offset)
}

/// Maps a quantized normal back to a unit-range vector. The all-zero normal
/// becomes +Z.
pub fn dequantize_normal(normal: [i8; 3]) -> Vec3 {
    if normal == [0, 0, 0] {
        return Vec3::Z;
    }
    Vec3::new(normal[0] as f32, normal[1] as f32, normal[2] as f32) / 127.0
}

fn split_quad(quad: [u32; 4]) -> [[u32; 3]; 2] {
    [[quad[0], quad[1], quad[2]], [quad[2], quad[3], quad[0]]]
}

fn group_index(material: i16, groups: usize) -> Result<usize> {
    usize::try_from(material)
        .ok()
        .filter(|&index| index < groups)
        .ok_or(ModelError::MaterialIndex { index: material, groups })
}

fn push_triangles(groups: &mut [TriangleGroup], records: &FaceRecords<'_, 3>) -> Result<()> {
    for (i, (&vertex, &material)) in records.vertices.iter().zip(records.materials).enumerate() {
        let group = group_index(material, groups.len())?;
        groups[group].faces.push(Face {
            vertex,
            normal: records.normals.map(|n| n[i]),
            uv: records.uvs.map(|uv| uv[i]),
        });
    }
    Ok(())
}

fn push_quads(groups: &mut [TriangleGroup], records: &FaceRecords<'_, 4>) -> Result<()> {
    for (i, (&vertex, &material)) in records.vertices.iter().zip(records.materials).enumerate() {
        let group = group_index(material, groups.len())?;
        let [first, second] = split_quad(vertex);
        let normals = records.normals.map(|n| split_quad(n[i]));
        let uvs = records.uvs.map(|uv| split_quad(uv[i]));
        groups[group].faces.push(Face {
            vertex: first,
            normal: normals.map(|n| n[0]),
            uv: uvs.map(|uv| uv[0]),
        });
        groups[group].faces.push(Face {
            vertex: second,
            normal: normals.map(|n| n[1]),
            uv: uvs.map(|uv| uv[1]),
        });
    }
    Ok(())
}

fn group_count(container: &Container, sidecar: &Sidecar) -> usize {
    if !sidecar.materials.is_empty() {
        return sidecar.materials.len();
    }
    container
        .face_groups()
        .flat_map(|(_, view)| match view {
            FaceGroupView::Triangles(records) => records.materials,
            FaceGroupView::Quads(records) => records.materials,
        })
        .map(|&m| m as i32 + 1)
        .max()
        .unwrap_or(0)
        .max(0) as usize
}

/// Builds a triangle mesh from a decoded container and its sidecar.
///
/// # Errors
///
/// Returns `ModelError::MaterialIndex` if a face references a material the
/// group table does not have, and `ModelError::Container` if a face-group
/// record is inconsistent.
pub fn assemble(container: &Container, sidecar: &Sidecar, options: &AssemblyOptions) -> Result<MeshNode> {
    container.validate()?;

    let matrix = if options.apply_topology {
        topology_matrix(&sidecar.topology)
    } else {
        Mat4::IDENTITY
    };

    let mut node = MeshNode {
        vertices: container
            .vertices()
            .iter()
            .map(|&v| matrix.transform_point3(Vec3::from_array(v)))
            .collect(),
        normals: container.normals().iter().map(|&n| dequantize_normal(n)).collect(),
        tex_coords: container.uvs().iter().map(|&uv| Vec2::from_array(uv)).collect(),
        ..MeshNode::default()
    };

    let groups = group_count(container, sidecar);
    node.face_groups = (0..groups)
        .map(|i| TriangleGroup {
            batch_id: i as u32,
            faces: Vec::new(),
        })
        .collect();

    for (kind, view) in container.face_groups() {
        match view {
            FaceGroupView::Triangles(records) => push_triangles(&mut node.face_groups, &records)?,
            FaceGroupView::Quads(records) => push_quads(&mut node.face_groups, &records)?,
        }
        debug!(kind = kind.name(), faces = container.face_count(kind), "assembled face group");
    }

    node.materials = if sidecar.materials.is_empty() {
        (0..groups)
            .map(|i| Appearance::from_rgb(generate_color(i, options.color_seed)))
            .collect()
    } else {
        sidecar.materials.iter().map(|m| m.appearance()).collect()
    };

    Ok(node)
}
