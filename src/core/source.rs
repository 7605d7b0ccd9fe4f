// Little-endian cursor over a seekable byte source

use crate::core::constants::BLOCK_SIZE;
use crate::core::error::{C3dError, Result, Section};
use std::io::{Read, Seek, SeekFrom};

/// Reads fixed-width little-endian values from `R`, reporting short reads as
/// the truncation error of the section currently being decoded.
pub struct ByteSource<'a, R> {
    inner: &'a mut R,
    section: Section,
}

impl<'a, R: Read + Seek> ByteSource<'a, R> {
    pub fn new(inner: &'a mut R, section: Section) -> Self {
        Self { inner, section }
    }

    pub fn seek(&mut self, offset: u64) -> Result<()> {
        let section = self.section;
        self.inner
            .seek(SeekFrom::Start(offset))
            .map_err(|e| C3dError::from_io(section, e))?;
        Ok(())
    }

    /// Total length of the source. The read position is left unchanged.
    pub fn total_len(&mut self) -> Result<u64> {
        let section = self.section;
        let io = |e: std::io::Error| C3dError::from_io(section, e);
        let position = self.inner.stream_position().map_err(io)?;
        let end = self.inner.seek(SeekFrom::End(0)).map_err(io)?;
        self.inner.seek(SeekFrom::Start(position)).map_err(io)?;
        Ok(end)
    }

    /// Seeks to the start of a 1-based 512-byte block.
    pub fn seek_block(&mut self, block_index: u64) -> Result<()> {
        self.seek(block_index.saturating_sub(1) * BLOCK_SIZE)
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        let mut buf = vec![0u8; count];
        self.read_exact(&mut buf)
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let section = self.section;
        self.inner
            .read_exact(buf)
            .map_err(|e| C3dError::from_io(section, e))
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.read_array()?))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    pub fn read_string(&mut self, len: usize) -> Result<String> {
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|e| e.into())
    }
}
