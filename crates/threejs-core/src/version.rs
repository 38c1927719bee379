// Three.js binary format constants.
//
// The signature carries the format revision ("002"). Only the revisions
// written by the legacy exporter are known, so decode checks the common
// prefix and encode always writes the full constant.

/// Full 12-byte signature written at offset 0.
pub const SIGNATURE: &[u8; 12] = b"Three.js 002";

/// Number of leading signature bytes compared at decode time.
pub const SIGNATURE_PREFIX_LEN: usize = 5;

/// Nominal header size stored in the header itself.
pub const HEADER_BYTES: u8 = 64;

// =============================================================================
// Nominal field widths
// =============================================================================
// Stored in the header for legacy readers. Decode never uses them: the
// section widths below are fixed.

pub const VERTEX_COORDINATE_BYTES: u8 = 4;
pub const NORMAL_COORDINATE_BYTES: u8 = 1;
pub const UV_COORDINATE_BYTES: u8 = 4;

pub const VERTEX_INDEX_BYTES: u8 = 4;
pub const NORMAL_INDEX_BYTES: u8 = 4;
pub const UV_INDEX_BYTES: u8 = 4;
pub const MATERIAL_INDEX_BYTES: u8 = 2;

/// Components per vertex position.
pub const VERTEX_COMPONENTS: usize = 3;
/// Components per quantized normal.
pub const NORMAL_COMPONENTS: usize = 3;
/// Components per texture coordinate.
pub const UV_COMPONENTS: usize = 2;

/// Returns true when `signature` starts with the checked signature prefix.
pub fn has_signature_prefix(signature: &[u8]) -> bool {
    signature.len() >= SIGNATURE_PREFIX_LEN
        && signature[..SIGNATURE_PREFIX_LEN] == SIGNATURE[..SIGNATURE_PREFIX_LEN]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_only_is_checked() {
        assert!(has_signature_prefix(SIGNATURE));
        assert!(has_signature_prefix(b"Three.js 001"));
        assert!(has_signature_prefix(b"ThreeXXXXXXX"));
        assert!(!has_signature_prefix(b"three.js 002"));
        assert!(!has_signature_prefix(b"Thr"));
    }

    #[test]
    fn test_signature_is_twelve_ascii_bytes() {
        assert_eq!(SIGNATURE.len(), 12);
        assert!(SIGNATURE.is_ascii());
    }
}
