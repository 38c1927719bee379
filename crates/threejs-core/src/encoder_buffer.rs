use std::io::Write;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::padding::PADDING_BYTE;
use crate::status::ThreeJsError;

/// Output buffer for writing a Three.js binary container.
///
/// Wraps any `Write` sink and tracks the number of bytes written so far.
/// Arrays are converted to little-endian bytes in one pass and handed to the
/// sink with a single `write_all`.
#[derive(Debug)]
pub struct EncoderBuffer<W> {
    writer: W,
    size: u64,
}

impl<W: Write> EncoderBuffer<W> {
    /// Create a new encoder buffer writing to `writer`
    pub fn new(writer: W) -> Self {
        Self { writer, size: 0 }
    }

    /// Number of bytes written so far
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Flush and return the wrapped sink
    pub fn into_inner(mut self) -> Result<W, ThreeJsError> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Encode raw bytes
    pub fn encode_bytes(&mut self, data: &[u8]) -> Result<(), ThreeJsError> {
        self.writer.write_all(data)?;
        self.size += data.len() as u64;
        Ok(())
    }

    pub fn encode_u8(&mut self, value: u8) -> Result<(), ThreeJsError> {
        self.writer.write_u8(value)?;
        self.size += 1;
        Ok(())
    }

    pub fn encode_u32(&mut self, value: u32) -> Result<(), ThreeJsError> {
        self.writer.write_u32::<LittleEndian>(value)?;
        self.size += 4;
        Ok(())
    }

    pub fn encode_f32_slice(&mut self, values: &[f32]) -> Result<(), ThreeJsError> {
        let mut bytes = vec![0u8; values.len() * 4];
        LittleEndian::write_f32_into(values, &mut bytes);
        self.encode_bytes(&bytes)
    }

    pub fn encode_u32_slice(&mut self, values: &[u32]) -> Result<(), ThreeJsError> {
        let mut bytes = vec![0u8; values.len() * 4];
        LittleEndian::write_u32_into(values, &mut bytes);
        self.encode_bytes(&bytes)
    }

    pub fn encode_i16_slice(&mut self, values: &[i16]) -> Result<(), ThreeJsError> {
        let mut bytes = vec![0u8; values.len() * 2];
        LittleEndian::write_i16_into(values, &mut bytes);
        self.encode_bytes(&bytes)
    }

    pub fn encode_i8_slice(&mut self, values: &[i8]) -> Result<(), ThreeJsError> {
        let bytes: Vec<u8> = values.iter().map(|&v| v as u8).collect();
        self.encode_bytes(&bytes)
    }

    /// Write `n` filler bytes
    pub fn encode_padding(&mut self, n: usize) -> Result<(), ThreeJsError> {
        if n == 0 {
            return Ok(());
        }
        self.encode_bytes(&vec![PADDING_BYTE; n])
    }
}
