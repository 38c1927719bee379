use std::io::{Cursor, Read, Seek};

use tracing::debug;

use crate::array_codec::ArrayInput;
use crate::container::Container;
use crate::decoder_buffer::DecoderBuffer;
use crate::face_group::{FaceGroup, FaceKind};
use crate::header::Header;
use crate::padding::{face_group_padding, normal_padding};
use crate::status::{Status, ThreeJsError};
use crate::version::{NORMAL_COMPONENTS, UV_COMPONENTS, VERTEX_COMPONENTS};

/// Decodes a Three.js binary container.
///
/// Sections are read in the fixed order header, vertices, normals, UVs and
/// then the eight face-group blocks in [`FaceKind::ALL`] order. A block is
/// only present when its header count is nonzero.
pub struct ContainerDecoder {
    bytes_read: u64,
}

impl ContainerDecoder {
    pub fn new() -> Self {
        Self { bytes_read: 0 }
    }

    /// Bytes consumed by the last successful decode.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn decode<R: Read + Seek>(&mut self, in_buffer: &mut DecoderBuffer<R>, out_container: &mut Container) -> Status {
        let start = in_buffer.position();
        let mut container = Container::new();

        let header = Header::decode(in_buffer)?;
        debug!(
            vertices = header.vertex_count,
            normals = header.normal_count,
            uvs = header.uv_count,
            faces = header.total_faces(),
            "decoded header"
        );

        let vertex_count = header.vertex_count as usize;
        let len = DecoderBuffer::<R>::element_count(vertex_count, VERTEX_COMPONENTS)?;
        let vertices = in_buffer.decode_f32_array(len)?;
        container.set_vertices(ArrayInput::Flat(vertices))?;

        let normal_count = header.normal_count as usize;
        let len = DecoderBuffer::<R>::element_count(normal_count, NORMAL_COMPONENTS)?;
        let normals = in_buffer.decode_i8_array(len)?;
        container.set_normals(ArrayInput::Flat(normals))?;
        let padding = normal_padding(normal_count);
        in_buffer.skip(padding)?;
        debug!(count = normal_count, padding, "decoded normal array");

        let uv_count = header.uv_count as usize;
        let len = DecoderBuffer::<R>::element_count(uv_count, UV_COMPONENTS)?;
        let uvs = in_buffer.decode_f32_array(len)?;
        container.set_uvs(ArrayInput::Flat(uvs))?;

        let c = &mut container;
        c.flat_triangles = decode_face_group(in_buffer, &header, FaceKind::TriFlat)?;
        c.smooth_triangles = decode_face_group(in_buffer, &header, FaceKind::TriSmooth)?;
        c.flat_uv_triangles = decode_face_group(in_buffer, &header, FaceKind::TriFlatUv)?;
        c.smooth_uv_triangles = decode_face_group(in_buffer, &header, FaceKind::TriSmoothUv)?;
        c.flat_quads = decode_face_group(in_buffer, &header, FaceKind::QuadFlat)?;
        c.smooth_quads = decode_face_group(in_buffer, &header, FaceKind::QuadSmooth)?;
        c.flat_uv_quads = decode_face_group(in_buffer, &header, FaceKind::QuadFlatUv)?;
        c.smooth_uv_quads = decode_face_group(in_buffer, &header, FaceKind::QuadSmoothUv)?;

        container.header = header;
        self.bytes_read = in_buffer.position() - start;
        *out_container = container;
        Ok(())
    }
}

impl Default for ContainerDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_face_group<R: Read + Seek, const N: usize, const NORMALS: bool, const UVS: bool>(
    in_buffer: &mut DecoderBuffer<R>,
    header: &Header,
    kind: FaceKind,
) -> Result<FaceGroup<N, NORMALS, UVS>, ThreeJsError> {
    let count = header.face_count(kind);
    if count == 0 {
        return Ok(FaceGroup::new());
    }
    let record = FaceGroup::decode(in_buffer, count)?;
    // The last block is not followed by a filler skip.
    let padding = if kind == FaceKind::QuadSmoothUv {
        0
    } else {
        face_group_padding(count as usize)
    };
    in_buffer.skip(padding)?;
    debug!(kind = kind.name(), count, padding, "decoded face group");
    Ok(record)
}

/// Decodes a container from a seekable stream.
pub fn decode_container<R: Read + Seek>(reader: R) -> Result<Container, ThreeJsError> {
    let mut buffer = DecoderBuffer::new(reader)?;
    let mut container = Container::new();
    ContainerDecoder::new().decode(&mut buffer, &mut container)?;
    Ok(container)
}

/// Decodes a container from an in-memory buffer.
pub fn decode_container_from_bytes(data: &[u8]) -> Result<Container, ThreeJsError> {
    decode_container(Cursor::new(data))
}
