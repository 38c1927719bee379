//! In-memory Three.js binary container.
//!
//! A [`Container`] owns the header, the three shared arrays and the eight
//! face-group records. It is produced by the decoder or assembled by hand
//! before encoding; there is no incremental update protocol.

use crate::array_codec::{flatten, group, ArrayInput};
use crate::face_group::{
    FaceGroup, FaceKind, FlatQuads, FlatTriangles, FlatUvQuads, FlatUvTriangles, SmoothQuads, SmoothTriangles,
    SmoothUvQuads, SmoothUvTriangles,
};
use crate::header::Header;
use crate::status::Status;

/// Borrowed view of one face-group record with its arity fixed.
#[derive(Debug, Clone, Copy)]
pub struct FaceRecords<'a, const N: usize> {
    pub vertices: &'a [[u32; N]],
    pub materials: &'a [i16],
    pub normals: Option<&'a [[u32; N]]>,
    pub uvs: Option<&'a [[u32; N]]>,
}

/// Face-group view with the arity resolved at runtime.
#[derive(Debug, Clone, Copy)]
pub enum FaceGroupView<'a> {
    Triangles(FaceRecords<'a, 3>),
    Quads(FaceRecords<'a, 4>),
}

impl<const N: usize, const NORMALS: bool, const UVS: bool> FaceGroup<N, NORMALS, UVS> {
    pub fn records(&self) -> FaceRecords<'_, N> {
        FaceRecords {
            vertices: self.vertices(),
            materials: self.materials(),
            normals: self.normal_indices(),
            uvs: self.uv_indices(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub header: Header,
    vertices: Vec<[f32; 3]>,
    normals: Vec<[i8; 3]>,
    uvs: Vec<[f32; 2]>,
    pub flat_triangles: FlatTriangles,
    pub smooth_triangles: SmoothTriangles,
    pub flat_uv_triangles: FlatUvTriangles,
    pub smooth_uv_triangles: SmoothUvTriangles,
    pub flat_quads: FlatQuads,
    pub smooth_quads: SmoothQuads,
    pub flat_uv_quads: FlatUvQuads,
    pub smooth_uv_quads: SmoothUvQuads,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    pub fn normals(&self) -> &[[i8; 3]] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn set_vertices(&mut self, input: ArrayInput<f32, 3>) -> Status {
        self.vertices = group(input)?;
        Ok(())
    }

    pub fn set_normals(&mut self, input: ArrayInput<i8, 3>) -> Status {
        self.normals = group(input)?;
        Ok(())
    }

    pub fn set_uvs(&mut self, input: ArrayInput<f32, 2>) -> Status {
        self.uvs = group(input)?;
        Ok(())
    }

    pub fn flatten_vertices(&self) -> Vec<f32> {
        flatten(&self.vertices)
    }

    pub fn flatten_normals(&self) -> Vec<i8> {
        flatten(&self.normals)
    }

    pub fn flatten_uvs(&self) -> Vec<f32> {
        flatten(&self.uvs)
    }

    /// Number of faces held by the record of `kind`.
    pub fn face_count(&self, kind: FaceKind) -> usize {
        match kind {
            FaceKind::TriFlat => self.flat_triangles.face_count(),
            FaceKind::TriSmooth => self.smooth_triangles.face_count(),
            FaceKind::TriFlatUv => self.flat_uv_triangles.face_count(),
            FaceKind::TriSmoothUv => self.smooth_uv_triangles.face_count(),
            FaceKind::QuadFlat => self.flat_quads.face_count(),
            FaceKind::QuadSmooth => self.smooth_quads.face_count(),
            FaceKind::QuadFlatUv => self.flat_uv_quads.face_count(),
            FaceKind::QuadSmoothUv => self.smooth_uv_quads.face_count(),
        }
    }

    pub fn face_group(&self, kind: FaceKind) -> FaceGroupView<'_> {
        match kind {
            FaceKind::TriFlat => FaceGroupView::Triangles(self.flat_triangles.records()),
            FaceKind::TriSmooth => FaceGroupView::Triangles(self.smooth_triangles.records()),
            FaceKind::TriFlatUv => FaceGroupView::Triangles(self.flat_uv_triangles.records()),
            FaceKind::TriSmoothUv => FaceGroupView::Triangles(self.smooth_uv_triangles.records()),
            FaceKind::QuadFlat => FaceGroupView::Quads(self.flat_quads.records()),
            FaceKind::QuadSmooth => FaceGroupView::Quads(self.smooth_quads.records()),
            FaceKind::QuadFlatUv => FaceGroupView::Quads(self.flat_uv_quads.records()),
            FaceKind::QuadSmoothUv => FaceGroupView::Quads(self.smooth_uv_quads.records()),
        }
    }

    /// All eight face groups in container order.
    pub fn face_groups(&self) -> impl Iterator<Item = (FaceKind, FaceGroupView<'_>)> {
        FaceKind::ALL.into_iter().map(move |kind| (kind, self.face_group(kind)))
    }

    /// Faces summed over every variant.
    pub fn total_faces(&self) -> usize {
        FaceKind::ALL.iter().map(|&kind| self.face_count(kind)).sum()
    }

    /// Recomputes the header from the current section lengths.
    pub fn setup(&mut self) {
        let mut header = Header::default();
        header.compute_from(self);
        self.header = header;
    }

    /// Checks every face-group record for parallel-array consistency.
    pub fn validate(&self) -> Status {
        self.flat_triangles.validate()?;
        self.smooth_triangles.validate()?;
        self.flat_uv_triangles.validate()?;
        self.smooth_uv_triangles.validate()?;
        self.flat_quads.validate()?;
        self.smooth_quads.validate()?;
        self.flat_uv_quads.validate()?;
        self.smooth_uv_quads.validate()
    }
}
