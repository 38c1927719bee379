//! Three.js Binary Core Library
//!
//! Codec for the legacy Three.js binary model container: a 64-byte header,
//! vertex/normal/UV arrays and eight face-group blocks with 4-byte
//! alignment filler between variable-length sections.

// =============================================================================
// Core modules - always available
// =============================================================================

pub mod array_codec;
pub mod container;
pub mod face_group;
pub mod header;
pub mod padding;
pub mod status;
pub mod version;

// =============================================================================
// Decoder-only modules
// =============================================================================

#[cfg(feature = "decoder")]
pub mod container_decoder;
#[cfg(feature = "decoder")]
pub mod decoder_buffer;

// =============================================================================
// Encoder-only modules
// =============================================================================

#[cfg(feature = "encoder")]
pub mod container_encoder;
#[cfg(feature = "encoder")]
pub mod encoder_buffer;

// =============================================================================
// Core re-exports - always available
// =============================================================================

pub use array_codec::ArrayInput;
pub use container::{Container, FaceGroupView, FaceRecords};
pub use face_group::{
    FaceGroup, FaceKind, FlatQuads, FlatTriangles, FlatUvQuads, FlatUvTriangles, SmoothQuads, SmoothTriangles,
    SmoothUvQuads, SmoothUvTriangles,
};
pub use header::Header;
pub use padding::padding_for;
pub use status::{Status, ThreeJsError};

// =============================================================================
// Decoder re-exports
// =============================================================================

#[cfg(feature = "decoder")]
pub use container_decoder::{decode_container, decode_container_from_bytes, ContainerDecoder};
#[cfg(feature = "decoder")]
pub use decoder_buffer::DecoderBuffer;

// =============================================================================
// Encoder re-exports
// =============================================================================

#[cfg(feature = "encoder")]
pub use container_encoder::{encode_container, encode_container_to_vec, ContainerEncoder};
#[cfg(feature = "encoder")]
pub use encoder_buffer::EncoderBuffer;
