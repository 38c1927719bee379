use threejs_core::container_encoder::encode_container_to_vec;
use threejs_core::padding::PADDING_BYTE;
use threejs_core::version::SIGNATURE;
use threejs_core::{
    decode_container_from_bytes, ArrayInput, Container, ContainerDecoder, DecoderBuffer, FaceKind, Header,
};

fn unit_square() -> Container {
    let mut c = Container::new();
    c.set_vertices(ArrayInput::Flat(vec![
        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
    ]))
    .unwrap();
    c.flat_triangles.set_vertices(ArrayInput::Tuples(vec![[0, 1, 2], [2, 3, 0]])).unwrap();
    c.flat_triangles.set_materials(ArrayInput::Flat(vec![0, 1])).unwrap();
    c
}

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

#[test]
fn test_two_triangle_layout() {
    let bytes = encode_container_to_vec(&unit_square()).unwrap();

    // header + 4 vertices + 2 * (3 u32 + 1 i16), material run already aligned
    assert_eq!(bytes.len(), 64 + 48 + 24 + 4);
    assert_eq!(bytes.len(), 140);

    assert_eq!(&bytes[0..12], SIGNATURE);
    assert_eq!(bytes[12], 64);
    assert_eq!(u32_at(&bytes, 20), 4);
    assert_eq!(u32_at(&bytes, 24), 0);
    assert_eq!(u32_at(&bytes, 28), 0);
    assert_eq!(u32_at(&bytes, 32), 2);
    for i in 1..8 {
        assert_eq!(u32_at(&bytes, 32 + 4 * i), 0);
    }

    // second vertex x
    assert_eq!(&bytes[76..80], &1.0f32.to_le_bytes());
    // vertex indices start after the vertex array
    let indices: Vec<u32> = (0..6).map(|i| u32_at(&bytes, 112 + 4 * i)).collect();
    assert_eq!(indices, vec![0, 1, 2, 2, 3, 0]);
    assert_eq!(&bytes[136..140], &[0, 0, 1, 0]);
}

#[test]
fn test_normal_array_is_padded_with_ascii_zero() {
    let mut c = Container::new();
    c.set_normals(ArrayInput::Flat(vec![0, 0, 127, 0, 127, 0, 127, 0, -127])).unwrap();
    let bytes = encode_container_to_vec(&c).unwrap();

    assert_eq!(bytes.len(), 64 + 9 + 3);
    assert_eq!(bytes[64 + 8], (-127i8) as u8);
    assert_eq!(&bytes[73..76], &[PADDING_BYTE; 3]);
    assert_eq!(&bytes[73..76], b"000");

    let decoded = decode_container_from_bytes(&bytes).unwrap();
    assert_eq!(decoded.normals(), &[[0, 0, 127], [0, 127, 0], [127, 0, -127]]);
}

#[test]
fn test_odd_face_count_pads_block() {
    let mut c = unit_square();
    c.flat_triangles.set_vertices(ArrayInput::Tuples(vec![[0, 1, 2]])).unwrap();
    c.flat_triangles.set_materials(ArrayInput::Flat(vec![7])).unwrap();
    c.flat_quads.set_vertices(ArrayInput::Tuples(vec![[0, 1, 2, 3]])).unwrap();
    c.flat_quads.set_materials(ArrayInput::Flat(vec![3])).unwrap();

    let bytes = encode_container_to_vec(&c).unwrap();
    // tri block 12 + 2 + 2 filler, quad block 16 + 2 + 2 filler
    assert_eq!(bytes.len(), 64 + 48 + 16 + 20);
    assert_eq!(&bytes[126..128], b"00");
    assert_eq!(&bytes[146..148], b"00");

    let decoded = decode_container_from_bytes(&bytes).unwrap();
    assert_eq!(decoded.flat_quads.vertices(), &[[0, 1, 2, 3]]);
    assert_eq!(decoded.flat_quads.materials(), &[3]);
}

#[test]
fn test_last_block_filler_is_written_but_not_read() {
    let mut c = Container::new();
    c.set_vertices(ArrayInput::Flat(vec![0.0; 12])).unwrap();
    c.smooth_uv_quads.set_vertices(ArrayInput::Flat(vec![0, 1, 2, 3])).unwrap();
    c.smooth_uv_quads.set_materials(ArrayInput::Flat(vec![0])).unwrap();
    c.smooth_uv_quads.set_normals(ArrayInput::Flat(vec![0, 0, 0, 0])).unwrap();
    c.smooth_uv_quads.set_uvs(ArrayInput::Flat(vec![0, 0, 0, 0])).unwrap();

    let bytes = encode_container_to_vec(&c).unwrap();
    assert_eq!(bytes.len(), 64 + 48 + 16 * 3 + 2 + 2);
    assert_eq!(&bytes[bytes.len() - 2..], b"00");

    let mut buffer = DecoderBuffer::new(std::io::Cursor::new(&bytes[..])).unwrap();
    let mut decoded = Container::new();
    let mut decoder = ContainerDecoder::new();
    decoder.decode(&mut buffer, &mut decoded).unwrap();
    assert_eq!(decoder.bytes_read(), bytes.len() as u64 - 2);
    assert_eq!(buffer.remaining_size(), 2);
    assert_eq!(decoded.face_count(FaceKind::QuadSmoothUv), 1);
}

#[test]
fn test_decode_tolerates_missing_last_filler() {
    let mut c = Container::new();
    c.smooth_uv_quads.set_vertices(ArrayInput::Flat(vec![0, 1, 2, 3])).unwrap();
    c.smooth_uv_quads.set_materials(ArrayInput::Flat(vec![5])).unwrap();
    c.smooth_uv_quads.set_normals(ArrayInput::Flat(vec![1, 1, 1, 1])).unwrap();
    c.smooth_uv_quads.set_uvs(ArrayInput::Flat(vec![2, 2, 2, 2])).unwrap();

    let mut bytes = encode_container_to_vec(&c).unwrap();
    bytes.truncate(bytes.len() - 2);
    let decoded = decode_container_from_bytes(&bytes).unwrap();
    assert_eq!(decoded.smooth_uv_quads.materials(), &[5]);
}

#[test]
fn test_header_counts_follow_sections() {
    let bytes = encode_container_to_vec(&unit_square()).unwrap();
    let decoded = decode_container_from_bytes(&bytes).unwrap();
    let mut expected = Header::canonical();
    expected.vertex_count = 4;
    expected.set_face_count(FaceKind::TriFlat, 2);
    assert_eq!(decoded.header, expected);
}
