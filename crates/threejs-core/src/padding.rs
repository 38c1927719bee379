//! 4-byte alignment of variable-length sections.
//!
//! Only two kinds of section are padded: the normal array (1-byte
//! components) and the material-index run of each face-group block (2-byte
//! indices). Vertex and UV arrays are made of 4-byte floats and never need
//! filler.

/// Byte written for every filler position. Legacy files use ASCII `'0'`,
/// not NUL.
pub const PADDING_BYTE: u8 = b'0';

/// Alignment of every padded section.
pub const ALIGNMENT: usize = 4;

/// Returns the number of filler bytes that round `element_count *
/// element_width` up to the next multiple of [`ALIGNMENT`].
pub fn padding_for(element_count: usize, element_width: usize) -> usize {
    let rem = (element_count * element_width) % ALIGNMENT;
    if rem > 0 {
        ALIGNMENT - rem
    } else {
        0
    }
}

/// Filler following a normal array of `normal_count` entries.
pub fn normal_padding(normal_count: usize) -> usize {
    if normal_count == 0 {
        return 0;
    }
    padding_for(normal_count * crate::version::NORMAL_COMPONENTS, 1)
}

/// Filler following a face-group block of `face_count` faces. Only the
/// material-index run is misaligned; the index tuples are 4-byte values.
pub fn face_group_padding(face_count: usize) -> usize {
    padding_for(face_count, crate::version::MATERIAL_INDEX_BYTES as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_for() {
        assert_eq!(padding_for(0, 1), 0);
        assert_eq!(padding_for(1, 1), 3);
        assert_eq!(padding_for(9, 1), 3);
        assert_eq!(padding_for(2, 2), 0);
        assert_eq!(padding_for(3, 2), 2);
        assert_eq!(padding_for(5, 4), 0);
    }

    #[test]
    fn test_normal_padding() {
        assert_eq!(normal_padding(0), 0);
        assert_eq!(normal_padding(1), 1);
        assert_eq!(normal_padding(3), 3);
        assert_eq!(normal_padding(4), 0);
    }

    #[test]
    fn test_face_group_padding() {
        assert_eq!(face_group_padding(1), 2);
        assert_eq!(face_group_padding(2), 0);
        assert_eq!(face_group_padding(7), 2);
    }

    #[test]
    fn test_padding_byte_is_ascii_zero() {
        assert_eq!(PADDING_BYTE, 0x30);
    }
}
