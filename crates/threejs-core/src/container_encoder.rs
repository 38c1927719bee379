use std::io::Write;

use tracing::{debug, warn};

use crate::container::Container;
use crate::encoder_buffer::EncoderBuffer;
use crate::face_group::{FaceGroup, FaceKind};
use crate::header::Header;
use crate::padding::{face_group_padding, normal_padding};
use crate::status::{Status, ThreeJsError};

/// Encodes a [`Container`] into the Three.js binary layout.
///
/// The header is recomputed from the section lengths unless the container's
/// header already carries the full signature, in which case it is written
/// unchanged and its counts drive padding. Keeping such a header in sync
/// with the arrays is up to the caller.
pub struct ContainerEncoder {
    header: Option<Header>,
}

impl ContainerEncoder {
    pub fn new() -> Self {
        Self { header: None }
    }

    /// Header written by the last successful encode.
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn encode<W: Write>(&mut self, container: &Container, out_buffer: &mut EncoderBuffer<W>) -> Status {
        self.header = None;
        let header = encode_sections(container, out_buffer)?;
        self.header = Some(header);
        Ok(())
    }
}

impl Default for ContainerEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn effective_header(container: &Container) -> Header {
    if container.header.has_full_signature() {
        let mut fresh = Header::default();
        fresh.compute_from(container);
        if fresh != container.header {
            warn!("writing caller-supplied header that differs from the container sections");
        }
        container.header
    } else {
        let mut header = Header::default();
        header.compute_from(container);
        header
    }
}

fn encode_sections<W: Write>(container: &Container, out_buffer: &mut EncoderBuffer<W>) -> Result<Header, ThreeJsError> {
    let header = effective_header(container);
    header.encode(out_buffer)?;
    debug!(
        vertices = header.vertex_count,
        normals = header.normal_count,
        uvs = header.uv_count,
        faces = header.total_faces(),
        "encoded header"
    );

    out_buffer.encode_f32_slice(&container.flatten_vertices())?;

    out_buffer.encode_i8_slice(&container.flatten_normals())?;
    let padding = normal_padding(header.normal_count as usize);
    out_buffer.encode_padding(padding)?;
    debug!(count = header.normal_count, padding, "encoded normal array");

    out_buffer.encode_f32_slice(&container.flatten_uvs())?;

    encode_face_group(out_buffer, &header, FaceKind::TriFlat, &container.flat_triangles)?;
    encode_face_group(out_buffer, &header, FaceKind::TriSmooth, &container.smooth_triangles)?;
    encode_face_group(out_buffer, &header, FaceKind::TriFlatUv, &container.flat_uv_triangles)?;
    encode_face_group(out_buffer, &header, FaceKind::TriSmoothUv, &container.smooth_uv_triangles)?;
    encode_face_group(out_buffer, &header, FaceKind::QuadFlat, &container.flat_quads)?;
    encode_face_group(out_buffer, &header, FaceKind::QuadSmooth, &container.smooth_quads)?;
    encode_face_group(out_buffer, &header, FaceKind::QuadFlatUv, &container.flat_uv_quads)?;
    encode_face_group(out_buffer, &header, FaceKind::QuadSmoothUv, &container.smooth_uv_quads)?;

    Ok(header)
}

fn encode_face_group<W: Write, const N: usize, const NORMALS: bool, const UVS: bool>(
    out_buffer: &mut EncoderBuffer<W>,
    header: &Header,
    kind: FaceKind,
    record: &FaceGroup<N, NORMALS, UVS>,
) -> Status {
    let prefix = |err: ThreeJsError| match err {
        ThreeJsError::LengthMismatch(msg) => ThreeJsError::LengthMismatch(format!("{}: {}", kind, msg)),
        other => other,
    };
    // A record with indices but no materials still counts as zero faces.
    record.validate().map_err(prefix)?;
    let count = header.face_count(kind);
    if count == 0 {
        return Ok(());
    }
    record.encode(out_buffer).map_err(prefix)?;
    // Unlike decode, the last block keeps its trailing filler.
    let padding = face_group_padding(count as usize);
    out_buffer.encode_padding(padding)?;
    debug!(kind = kind.name(), count, padding, "encoded face group");
    Ok(())
}

/// Encodes `container` to `writer` and returns the header that was written.
pub fn encode_container<W: Write>(container: &Container, writer: W) -> Result<Header, ThreeJsError> {
    let mut buffer = EncoderBuffer::new(writer);
    let header = encode_sections(container, &mut buffer)?;
    buffer.into_inner()?;
    Ok(header)
}

/// Encodes `container` into a new byte vector.
pub fn encode_container_to_vec(container: &Container) -> Result<Vec<u8>, ThreeJsError> {
    let mut out = Vec::new();
    encode_container(container, &mut out)?;
    Ok(out)
}
