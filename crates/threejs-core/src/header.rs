//! Container header (64 bytes).
//!
//! # Layout
//! ```text
//! 0x00: signature             [u8; 12]  "Three.js 002"
//! 0x0C: header_bytes          u8        nominal, 64
//! 0x0D: coordinate widths     u8 x 3    vertex / normal / uv
//! 0x10: index widths          u8 x 4    vertex / normal / uv / material
//! 0x14: vertex_count          u32
//! 0x18: normal_count          u32
//! 0x1C: uv_count              u32
//! 0x20: face counts           u32 x 8   FaceKind::ALL order
//! ```
//!
//! The width bytes are carried through untouched on decode; they never
//! change how sections are read.

#[cfg(feature = "decoder")]
use std::io::{Read, Seek};
#[cfg(feature = "encoder")]
use std::io::Write;

use crate::container::Container;
#[cfg(feature = "decoder")]
use crate::decoder_buffer::DecoderBuffer;
#[cfg(feature = "encoder")]
use crate::encoder_buffer::EncoderBuffer;
use crate::face_group::FaceKind;
#[cfg(feature = "encoder")]
use crate::status::Status;
#[cfg(feature = "decoder")]
use crate::status::ThreeJsError;
use crate::version::{
    self, HEADER_BYTES, MATERIAL_INDEX_BYTES, NORMAL_COORDINATE_BYTES, NORMAL_INDEX_BYTES, SIGNATURE,
    UV_COORDINATE_BYTES, UV_INDEX_BYTES, VERTEX_COORDINATE_BYTES, VERTEX_INDEX_BYTES,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub signature: [u8; 12],
    pub header_bytes: u8,

    pub vertex_coordinate_bytes: u8,
    pub normal_coordinate_bytes: u8,
    pub uv_coordinate_bytes: u8,

    pub vertex_index_bytes: u8,
    pub normal_index_bytes: u8,
    pub uv_index_bytes: u8,
    pub material_index_bytes: u8,

    pub vertex_count: u32,
    pub normal_count: u32,
    pub uv_count: u32,

    /// Face counts indexed by [`FaceKind::index`].
    pub face_counts: [u32; 8],
}

impl Header {
    pub const SIZE: usize = 64;

    /// Header with the canonical signature and widths and all counts zero.
    pub fn canonical() -> Self {
        Self {
            signature: *SIGNATURE,
            header_bytes: HEADER_BYTES,
            vertex_coordinate_bytes: VERTEX_COORDINATE_BYTES,
            normal_coordinate_bytes: NORMAL_COORDINATE_BYTES,
            uv_coordinate_bytes: UV_COORDINATE_BYTES,
            vertex_index_bytes: VERTEX_INDEX_BYTES,
            normal_index_bytes: NORMAL_INDEX_BYTES,
            uv_index_bytes: UV_INDEX_BYTES,
            material_index_bytes: MATERIAL_INDEX_BYTES,
            vertex_count: 0,
            normal_count: 0,
            uv_count: 0,
            face_counts: [0; 8],
        }
    }

    /// Resets every field to the canonical constants and the counts to the
    /// section lengths of `container`.
    pub fn compute_from(&mut self, container: &Container) {
        *self = Self::canonical();
        self.vertex_count = container.vertices().len() as u32;
        self.normal_count = container.normals().len() as u32;
        self.uv_count = container.uvs().len() as u32;
        for kind in FaceKind::ALL {
            self.face_counts[kind.index()] = container.face_count(kind) as u32;
        }
    }

    /// True when the whole 12-byte signature matches.
    pub fn has_full_signature(&self) -> bool {
        &self.signature == SIGNATURE
    }

    /// True when the checked signature prefix matches.
    pub fn has_signature_prefix(&self) -> bool {
        version::has_signature_prefix(&self.signature)
    }

    pub fn face_count(&self, kind: FaceKind) -> u32 {
        self.face_counts[kind.index()]
    }

    pub fn set_face_count(&mut self, kind: FaceKind, count: u32) {
        self.face_counts[kind.index()] = count;
    }

    /// Total faces over all eight variants.
    pub fn total_faces(&self) -> u64 {
        self.face_counts.iter().map(|&c| c as u64).sum()
    }

    /// Reads a header and checks the signature prefix.
    ///
    /// # Errors
    ///
    /// Returns `ThreeJsError::BadSignature` if the first five signature bytes
    /// do not match, or `ThreeJsError::IoError` if the stream is shorter
    /// than a header.
    #[cfg(feature = "decoder")]
    pub fn decode<R: Read + Seek>(buffer: &mut DecoderBuffer<R>) -> Result<Self, ThreeJsError> {
        let mut header = Self::default();
        buffer.decode_bytes(&mut header.signature)?;
        header.header_bytes = buffer.decode_u8()?;

        header.vertex_coordinate_bytes = buffer.decode_u8()?;
        header.normal_coordinate_bytes = buffer.decode_u8()?;
        header.uv_coordinate_bytes = buffer.decode_u8()?;

        header.vertex_index_bytes = buffer.decode_u8()?;
        header.normal_index_bytes = buffer.decode_u8()?;
        header.uv_index_bytes = buffer.decode_u8()?;
        header.material_index_bytes = buffer.decode_u8()?;

        header.vertex_count = buffer.decode_u32()?;
        header.normal_count = buffer.decode_u32()?;
        header.uv_count = buffer.decode_u32()?;
        for count in header.face_counts.iter_mut() {
            *count = buffer.decode_u32()?;
        }

        if !header.has_signature_prefix() {
            return Err(ThreeJsError::BadSignature(format!(
                "expected {:?}, found {:?}",
                String::from_utf8_lossy(SIGNATURE),
                String::from_utf8_lossy(&header.signature)
            )));
        }
        Ok(header)
    }

    /// Writes the header fields as they are.
    #[cfg(feature = "encoder")]
    pub fn encode<W: Write>(&self, buffer: &mut EncoderBuffer<W>) -> Status {
        buffer.encode_bytes(&self.signature)?;
        buffer.encode_u8(self.header_bytes)?;

        buffer.encode_u8(self.vertex_coordinate_bytes)?;
        buffer.encode_u8(self.normal_coordinate_bytes)?;
        buffer.encode_u8(self.uv_coordinate_bytes)?;

        buffer.encode_u8(self.vertex_index_bytes)?;
        buffer.encode_u8(self.normal_index_bytes)?;
        buffer.encode_u8(self.uv_index_bytes)?;
        buffer.encode_u8(self.material_index_bytes)?;

        buffer.encode_u32(self.vertex_count)?;
        buffer.encode_u32(self.normal_count)?;
        buffer.encode_u32(self.uv_count)?;
        for &count in &self.face_counts {
            buffer.encode_u32(count)?;
        }
        Ok(())
    }
}
