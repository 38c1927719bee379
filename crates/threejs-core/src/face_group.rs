//! Face-group records.
//!
//! A container holds eight face groups, one per combination of polygon arity
//! (triangle or quad) and per-corner channels (normals, UVs). They share one
//! generic record, [`FaceGroup`], parameterized by arity and channel flags;
//! the aliases below name the eight concrete variants.
//!
//! On the wire a block is laid out as
//!
//! ```text
//! vertex indices   count * N  u32
//! material indices count      i16
//! normal indices   count * N  u32   (smooth variants)
//! uv indices       count * N  u32   (uv variants)
//! ```
//!
//! followed by filler aligning the material run (see [`crate::padding`]).

#[cfg(feature = "decoder")]
use std::io::{Read, Seek};
#[cfg(feature = "encoder")]
use std::io::Write;

use crate::array_codec::{flatten, group, ArrayInput};
#[cfg(feature = "decoder")]
use crate::decoder_buffer::DecoderBuffer;
#[cfg(feature = "encoder")]
use crate::encoder_buffer::EncoderBuffer;
use crate::status::{Status, ThreeJsError};

/// The eight face-group variants, in container order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceKind {
    TriFlat,
    TriSmooth,
    TriFlatUv,
    TriSmoothUv,
    QuadFlat,
    QuadSmooth,
    QuadFlatUv,
    QuadSmoothUv,
}

impl FaceKind {
    /// All variants in the order their blocks appear in a container.
    pub const ALL: [FaceKind; 8] = [
        FaceKind::TriFlat,
        FaceKind::TriSmooth,
        FaceKind::TriFlatUv,
        FaceKind::TriSmoothUv,
        FaceKind::QuadFlat,
        FaceKind::QuadSmooth,
        FaceKind::QuadFlatUv,
        FaceKind::QuadSmoothUv,
    ];

    /// Vertices per face.
    pub const fn arity(self) -> usize {
        match self {
            FaceKind::TriFlat | FaceKind::TriSmooth | FaceKind::TriFlatUv | FaceKind::TriSmoothUv => 3,
            _ => 4,
        }
    }

    pub const fn has_normals(self) -> bool {
        matches!(
            self,
            FaceKind::TriSmooth | FaceKind::TriSmoothUv | FaceKind::QuadSmooth | FaceKind::QuadSmoothUv
        )
    }

    pub const fn has_uvs(self) -> bool {
        matches!(
            self,
            FaceKind::TriFlatUv | FaceKind::TriSmoothUv | FaceKind::QuadFlatUv | FaceKind::QuadSmoothUv
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            FaceKind::TriFlat => "tri-flat",
            FaceKind::TriSmooth => "tri-smooth",
            FaceKind::TriFlatUv => "tri-flat-uv",
            FaceKind::TriSmoothUv => "tri-smooth-uv",
            FaceKind::QuadFlat => "quad-flat",
            FaceKind::QuadSmooth => "quad-smooth",
            FaceKind::QuadFlatUv => "quad-flat-uv",
            FaceKind::QuadSmoothUv => "quad-smooth-uv",
        }
    }

    /// Position of this variant in [`FaceKind::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bytes one face occupies in a block, excluding filler.
    pub const fn face_bytes(self) -> usize {
        let index_tuples = 1 + self.has_normals() as usize + self.has_uvs() as usize;
        index_tuples * self.arity() * 4 + 2
    }
}

impl std::fmt::Display for FaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One face-group record: `N`-gon vertex indices, one material index per
/// face, and per-corner normal/UV indices when `NORMALS`/`UVS` are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceGroup<const N: usize, const NORMALS: bool, const UVS: bool> {
    vertices: Vec<[u32; N]>,
    materials: Vec<i16>,
    normals: Vec<[u32; N]>,
    uvs: Vec<[u32; N]>,
}

pub type FlatTriangles = FaceGroup<3, false, false>;
pub type SmoothTriangles = FaceGroup<3, true, false>;
pub type FlatUvTriangles = FaceGroup<3, false, true>;
pub type SmoothUvTriangles = FaceGroup<3, true, true>;
pub type FlatQuads = FaceGroup<4, false, false>;
pub type SmoothQuads = FaceGroup<4, true, false>;
pub type FlatUvQuads = FaceGroup<4, false, true>;
pub type SmoothUvQuads = FaceGroup<4, true, true>;

impl<const N: usize, const NORMALS: bool, const UVS: bool> FaceGroup<N, NORMALS, UVS> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            materials: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
        }
    }

    /// Number of faces, counted by material entries as the header does.
    pub fn face_count(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.materials.is_empty()
    }

    pub fn vertices(&self) -> &[[u32; N]] {
        &self.vertices
    }

    pub fn materials(&self) -> &[i16] {
        &self.materials
    }

    /// Normal indices, or `None` for variants without normals.
    pub fn normal_indices(&self) -> Option<&[[u32; N]]> {
        if NORMALS {
            Some(&self.normals)
        } else {
            None
        }
    }

    /// UV indices, or `None` for variants without UVs.
    pub fn uv_indices(&self) -> Option<&[[u32; N]]> {
        if UVS {
            Some(&self.uvs)
        } else {
            None
        }
    }

    pub fn set_vertices(&mut self, input: ArrayInput<u32, N>) -> Status {
        self.vertices = group(input)?;
        Ok(())
    }

    /// Sets the material indices. Only a flat run of `i16` is accepted:
    /// materials are one per face and have no tuple shape.
    pub fn set_materials(&mut self, input: ArrayInput<i16, 1>) -> Status {
        match input {
            ArrayInput::Flat(values) => {
                self.materials = values;
                Ok(())
            }
            other => Err(ThreeJsError::TypeMismatch(format!(
                "material indices must be a flat sequence of i16, got a {}",
                other.shape_name()
            ))),
        }
    }

    pub fn flatten_vertices(&self) -> Vec<u32> {
        flatten(&self.vertices)
    }

    pub fn flatten_materials(&self) -> Vec<i16> {
        self.materials.clone()
    }

    /// Checks that every channel has one entry per face.
    pub fn validate(&self) -> Status {
        if self.vertices.len() != self.materials.len() {
            return Err(ThreeJsError::LengthMismatch(format!(
                "{} vertex index tuples but {} material indices",
                self.vertices.len(),
                self.materials.len()
            )));
        }
        if NORMALS && self.normals.len() != self.vertices.len() {
            return Err(ThreeJsError::LengthMismatch(format!(
                "{} vertex index tuples but {} normal index tuples",
                self.vertices.len(),
                self.normals.len()
            )));
        }
        if UVS && self.uvs.len() != self.vertices.len() {
            return Err(ThreeJsError::LengthMismatch(format!(
                "{} vertex index tuples but {} uv index tuples",
                self.vertices.len(),
                self.uvs.len()
            )));
        }
        Ok(())
    }

    /// Writes the block body. Nothing is written if the record fails
    /// [`FaceGroup::validate`].
    #[cfg(feature = "encoder")]
    pub fn encode<W: Write>(&self, buffer: &mut EncoderBuffer<W>) -> Status {
        self.validate()?;
        buffer.encode_u32_slice(&self.flatten_vertices())?;
        buffer.encode_i16_slice(&self.flatten_materials())?;
        if NORMALS {
            buffer.encode_u32_slice(&flatten(&self.normals))?;
        }
        if UVS {
            buffer.encode_u32_slice(&flatten(&self.uvs))?;
        }
        Ok(())
    }

    /// Reads the body of a block holding `count` faces.
    #[cfg(feature = "decoder")]
    pub fn decode<R: Read + Seek>(buffer: &mut DecoderBuffer<R>, count: u32) -> Result<Self, ThreeJsError> {
        let count = count as usize;
        let mut record = Self::new();
        record.vertices = Self::decode_index_tuples(buffer, count)?;
        record.materials = buffer.decode_i16_array(count)?;
        if NORMALS {
            record.normals = Self::decode_index_tuples(buffer, count)?;
        }
        if UVS {
            record.uvs = Self::decode_index_tuples(buffer, count)?;
        }
        Ok(record)
    }

    #[cfg(feature = "decoder")]
    fn decode_index_tuples<R: Read + Seek>(
        buffer: &mut DecoderBuffer<R>,
        count: usize,
    ) -> Result<Vec<[u32; N]>, ThreeJsError> {
        let flat = buffer.decode_u32_array(DecoderBuffer::<R>::element_count(count, N)?)?;
        group(ArrayInput::Flat(flat))
    }
}

impl<const N: usize, const UVS: bool> FaceGroup<N, true, UVS> {
    pub fn set_normals(&mut self, input: ArrayInput<u32, N>) -> Status {
        self.normals = group(input)?;
        Ok(())
    }

    pub fn flatten_normals(&self) -> Vec<u32> {
        flatten(&self.normals)
    }
}

impl<const N: usize, const NORMALS: bool> FaceGroup<N, NORMALS, true> {
    pub fn set_uvs(&mut self, input: ArrayInput<u32, N>) -> Status {
        self.uvs = group(input)?;
        Ok(())
    }

    pub fn flatten_uvs(&self) -> Vec<u32> {
        flatten(&self.uvs)
    }
}
