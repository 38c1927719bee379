use std::io::Cursor;

use threejs_core::container_decoder::decode_container_from_bytes;
use threejs_core::container_encoder::encode_container_to_vec;
use threejs_core::version::SIGNATURE;
use threejs_core::{
    ArrayInput, Container, ContainerDecoder, ContainerEncoder, DecoderBuffer, EncoderBuffer, FaceKind, Header,
};

fn create_test_container() -> Container {
    let mut c = Container::new();
    c.set_vertices(ArrayInput::Flat(vec![
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0, 1.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.5, 0.5, 1.0,
    ]))
    .unwrap();
    c.set_normals(ArrayInput::Tuples(vec![[0, 0, 127], [0, -127, 0], [127, 0, 0]]))
        .unwrap();
    c.set_uvs(ArrayInput::Nested(vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0]]))
        .unwrap();

    c.flat_triangles.set_vertices(ArrayInput::Flat(vec![0, 1, 4])).unwrap();
    c.flat_triangles.set_materials(ArrayInput::Flat(vec![0])).unwrap();

    c.smooth_triangles.set_vertices(ArrayInput::Flat(vec![1, 2, 4, 2, 3, 4])).unwrap();
    c.smooth_triangles.set_materials(ArrayInput::Flat(vec![1, 1])).unwrap();
    c.smooth_triangles.set_normals(ArrayInput::Flat(vec![0, 1, 2, 2, 1, 0])).unwrap();

    c.flat_uv_triangles.set_vertices(ArrayInput::Tuples(vec![[3, 0, 4]])).unwrap();
    c.flat_uv_triangles.set_materials(ArrayInput::Flat(vec![2])).unwrap();
    c.flat_uv_triangles.set_uvs(ArrayInput::Tuples(vec![[0, 1, 2]])).unwrap();

    c.smooth_uv_triangles.set_vertices(ArrayInput::Flat(vec![0, 2, 4, 1, 3, 4, 0, 1, 2])).unwrap();
    c.smooth_uv_triangles.set_materials(ArrayInput::Flat(vec![0, -1, 3])).unwrap();
    c.smooth_uv_triangles.set_normals(ArrayInput::Flat(vec![0; 9])).unwrap();
    c.smooth_uv_triangles.set_uvs(ArrayInput::Flat(vec![2; 9])).unwrap();

    c.flat_quads.set_vertices(ArrayInput::Flat(vec![0, 1, 2, 3])).unwrap();
    c.flat_quads.set_materials(ArrayInput::Flat(vec![4])).unwrap();

    c.smooth_quads.set_vertices(ArrayInput::Flat(vec![0, 1, 2, 3, 3, 2, 1, 0])).unwrap();
    c.smooth_quads.set_materials(ArrayInput::Flat(vec![0, 0])).unwrap();
    c.smooth_quads.set_normals(ArrayInput::Flat(vec![0, 0, 0, 0, 1, 1, 1, 1])).unwrap();

    c.flat_uv_quads.set_vertices(ArrayInput::Nested(vec![vec![4, 3, 2, 1]])).unwrap();
    c.flat_uv_quads.set_materials(ArrayInput::Flat(vec![5])).unwrap();
    c.flat_uv_quads.set_uvs(ArrayInput::Nested(vec![vec![0, 1, 2, 0]])).unwrap();

    c.smooth_uv_quads.set_vertices(ArrayInput::Flat(vec![0, 1, 2, 3, 1, 2, 3, 4, 2, 3, 4, 0])).unwrap();
    c.smooth_uv_quads.set_materials(ArrayInput::Flat(vec![6, 7, 8])).unwrap();
    c.smooth_uv_quads.set_normals(ArrayInput::Flat(vec![1; 12])).unwrap();
    c.smooth_uv_quads.set_uvs(ArrayInput::Flat(vec![0, 1, 2, 0, 0, 1, 2, 0, 0, 1, 2, 0])).unwrap();
    c
}

#[test]
fn test_roundtrip_all_variants() {
    let container = create_test_container();
    let bytes = encode_container_to_vec(&container).unwrap();
    let decoded = decode_container_from_bytes(&bytes).unwrap();

    assert_eq!(decoded.vertices(), container.vertices());
    assert_eq!(decoded.normals(), container.normals());
    assert_eq!(decoded.uvs(), container.uvs());
    assert_eq!(decoded.flat_triangles, container.flat_triangles);
    assert_eq!(decoded.smooth_triangles, container.smooth_triangles);
    assert_eq!(decoded.flat_uv_triangles, container.flat_uv_triangles);
    assert_eq!(decoded.smooth_uv_triangles, container.smooth_uv_triangles);
    assert_eq!(decoded.flat_quads, container.flat_quads);
    assert_eq!(decoded.smooth_quads, container.smooth_quads);
    assert_eq!(decoded.flat_uv_quads, container.flat_uv_quads);
    assert_eq!(decoded.smooth_uv_quads, container.smooth_uv_quads);
}

#[test]
fn test_roundtrip_header_is_canonical() {
    let mut container = create_test_container();
    // Garbage in the header is replaced because the signature does not match.
    container.header.signature = *b"garbage head";
    container.header.vertex_count = 999;
    container.header.header_bytes = 7;

    let bytes = encode_container_to_vec(&container).unwrap();
    let decoded = decode_container_from_bytes(&bytes).unwrap();

    let mut expected = Header::canonical();
    expected.vertex_count = 5;
    expected.normal_count = 3;
    expected.uv_count = 3;
    let counts = [1, 2, 1, 3, 1, 2, 1, 3];
    for (kind, count) in FaceKind::ALL.into_iter().zip(counts) {
        expected.set_face_count(kind, count);
    }
    assert_eq!(decoded.header, expected);
    assert_eq!(&decoded.header.signature, SIGNATURE);
}

#[test]
fn test_reencode_is_byte_identical() {
    let container = create_test_container();
    let first = encode_container_to_vec(&container).unwrap();
    let decoded = decode_container_from_bytes(&first).unwrap();
    let second = encode_container_to_vec(&decoded).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_decode_then_equal_after_setup() {
    let mut container = create_test_container();
    container.setup();
    let bytes = encode_container_to_vec(&container).unwrap();
    let decoded = decode_container_from_bytes(&bytes).unwrap();
    assert_eq!(decoded, container);
}

#[test]
fn test_empty_container_is_header_only() {
    let container = Container::new();
    let bytes = encode_container_to_vec(&container).unwrap();
    assert_eq!(bytes.len(), Header::SIZE);

    let decoded = decode_container_from_bytes(&bytes).unwrap();
    assert!(decoded.vertices().is_empty());
    assert_eq!(decoded.total_faces(), 0);
}

#[test]
fn test_stale_header_is_written_unchanged() {
    let mut container = create_test_container();
    container.setup();
    // Caller keeps the full signature but drops the flat quads from the
    // counts; the block is then neither written nor read back.
    container.header.set_face_count(FaceKind::QuadFlat, 0);

    let mut encoder = ContainerEncoder::new();
    let mut out = EncoderBuffer::new(Vec::new());
    encoder.encode(&container, &mut out).unwrap();
    assert_eq!(encoder.header(), Some(&container.header));

    let bytes = out.into_inner().unwrap();
    let decoded = decode_container_from_bytes(&bytes).unwrap();
    assert!(decoded.flat_quads.is_empty());
    assert_eq!(decoded.smooth_quads, container.smooth_quads);
    assert_eq!(decoded.header, container.header);
}

#[test]
fn test_decoder_reads_from_stream_position() {
    let container = create_test_container();
    let encoded = encode_container_to_vec(&container).unwrap();

    let mut data = b"prefix".to_vec();
    data.extend_from_slice(&encoded);
    let mut cursor = Cursor::new(data);
    cursor.set_position(6);

    let mut buffer = DecoderBuffer::new(cursor).unwrap();
    let mut decoded = Container::new();
    let mut decoder = ContainerDecoder::new();
    decoder.decode(&mut buffer, &mut decoded).unwrap();

    assert_eq!(decoded.smooth_uv_quads, container.smooth_uv_quads);
    // The trailing filler after the last block is not consumed.
    assert_eq!(decoder.bytes_read(), encoded.len() as u64 - 2);
}
