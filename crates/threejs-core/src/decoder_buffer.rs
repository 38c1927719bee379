use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::status::ThreeJsError;

/// Input buffer for reading a Three.js binary container.
///
/// `DecoderBuffer` wraps a seekable stream and provides little-endian reads
/// of scalars and whole arrays. The stream length is measured once up front
/// so that array reads can reject a count that the stream cannot satisfy
/// before allocating for it.
///
/// # Example
///
/// ```ignore
/// use std::io::Cursor;
/// use threejs_core::DecoderBuffer;
///
/// let data = [0x04, 0x00, 0x00, 0x00, 0x2a];
/// let mut buffer = DecoderBuffer::new(Cursor::new(&data[..]))?;
///
/// assert_eq!(buffer.decode_u32()?, 4);
/// assert_eq!(buffer.remaining_size(), 1);
/// ```
pub struct DecoderBuffer<R> {
    reader: R,
    pos: u64,
    len: u64,
}

impl<R: Read + Seek> DecoderBuffer<R> {
    /// Creates a new `DecoderBuffer` reading from the current position of
    /// `reader`.
    pub fn new(mut reader: R) -> Result<Self, ThreeJsError> {
        let pos = reader.stream_position()?;
        let len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(pos))?;
        Ok(Self { reader, pos, len })
    }

    /// Returns the current read position in bytes.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Returns the number of bytes remaining in the stream.
    pub fn remaining_size(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    /// Returns the wrapped stream.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn ensure_available(&self, size: u64) -> Result<(), ThreeJsError> {
        if size > self.remaining_size() {
            return Err(ThreeJsError::IoError(format!(
                "Unexpected end of stream: need {} bytes, have {}",
                size,
                self.remaining_size()
            )));
        }
        Ok(())
    }

    /// Number of scalars in `count` tuples of `components` each.
    pub fn element_count(count: usize, components: usize) -> Result<usize, ThreeJsError> {
        count
            .checked_mul(components)
            .ok_or_else(|| ThreeJsError::IoError(format!("{} tuples of {} components overflow", count, components)))
    }

    fn array_size(count: usize, width: usize) -> Result<u64, ThreeJsError> {
        count
            .checked_mul(width)
            .map(|size| size as u64)
            .ok_or_else(|| ThreeJsError::IoError(format!("Array of {} elements is too large", count)))
    }

    /// Decodes bytes into the provided buffer.
    pub fn decode_bytes(&mut self, out: &mut [u8]) -> Result<(), ThreeJsError> {
        self.ensure_available(out.len() as u64)?;
        self.reader.read_exact(out)?;
        self.pos += out.len() as u64;
        Ok(())
    }

    /// Decodes a single byte.
    pub fn decode_u8(&mut self) -> Result<u8, ThreeJsError> {
        self.ensure_available(1)?;
        let value = self.reader.read_u8()?;
        self.pos += 1;
        Ok(value)
    }

    /// Decodes a little-endian u32.
    pub fn decode_u32(&mut self) -> Result<u32, ThreeJsError> {
        self.ensure_available(4)?;
        let value = self.reader.read_u32::<LittleEndian>()?;
        self.pos += 4;
        Ok(value)
    }

    /// Decodes `count` little-endian f32 values.
    pub fn decode_f32_array(&mut self, count: usize) -> Result<Vec<f32>, ThreeJsError> {
        let size = Self::array_size(count, 4)?;
        self.ensure_available(size)?;
        let mut values = vec![0f32; count];
        self.reader.read_f32_into::<LittleEndian>(&mut values)?;
        self.pos += size;
        Ok(values)
    }

    /// Decodes `count` little-endian u32 values.
    pub fn decode_u32_array(&mut self, count: usize) -> Result<Vec<u32>, ThreeJsError> {
        let size = Self::array_size(count, 4)?;
        self.ensure_available(size)?;
        let mut values = vec![0u32; count];
        self.reader.read_u32_into::<LittleEndian>(&mut values)?;
        self.pos += size;
        Ok(values)
    }

    /// Decodes `count` little-endian i16 values.
    pub fn decode_i16_array(&mut self, count: usize) -> Result<Vec<i16>, ThreeJsError> {
        let size = Self::array_size(count, 2)?;
        self.ensure_available(size)?;
        let mut values = vec![0i16; count];
        self.reader.read_i16_into::<LittleEndian>(&mut values)?;
        self.pos += size;
        Ok(values)
    }

    /// Decodes `count` i8 values.
    pub fn decode_i8_array(&mut self, count: usize) -> Result<Vec<i8>, ThreeJsError> {
        let size = Self::array_size(count, 1)?;
        self.ensure_available(size)?;
        let mut values = vec![0i8; count];
        self.reader.read_i8_into(&mut values)?;
        self.pos += size;
        Ok(values)
    }

    /// Advances the position by `n` bytes with a forward seek. The skipped
    /// bytes are never inspected.
    pub fn skip(&mut self, n: usize) -> Result<(), ThreeJsError> {
        if n == 0 {
            return Ok(());
        }
        self.pos = self.reader.seek(SeekFrom::Current(n as i64))?;
        Ok(())
    }
}
