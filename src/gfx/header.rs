#![forbid(unsafe_code)]

use std::io::{Read, Seek, SeekFrom};

use crate::gfx::error::{GfxError, GfxResult};

/// GFX header magic.
pub const GFX_MAGIC: u32 = 0xc;

/// GFX header layout (all LE u32):
/// - [magic]
/// - [width]
/// - [height]
/// - [encoding]
/// - [bpi]
/// - [block_count]
///
/// `block_count` data blocks of `width * height * bpi / 8` bytes follow.
pub const HEADER_SIZE: usize = 0x18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GfxHeader {
    pub magic: u32,
    pub width: u32,
    pub height: u32,
    pub encoding: u32,
    pub bpi: u32,
    pub block_count: u32,
}

fn field(buf: &[u8; HEADER_SIZE], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

impl GfxHeader {
    /// Checks the magic only; `bpi` and geometry are left to the decoders.
    pub fn parse(buf: &[u8; HEADER_SIZE]) -> GfxResult<Self> {
        let magic = field(buf, 0);
        if magic != GFX_MAGIC {
            return Err(GfxError::MagicMismatch { found: magic });
        }

        Ok(Self {
            magic,
            width: field(buf, 4),
            height: field(buf, 8),
            encoding: field(buf, 12),
            bpi: field(buf, 16),
            block_count: field(buf, 20),
        })
    }

    /// Reads the header from offset 0, wherever the cursor currently is.
    pub fn read<R: Read + Seek>(r: &mut R) -> GfxResult<Self> {
        r.seek(SeekFrom::Start(0))?;
        let mut buf = [0u8; HEADER_SIZE];
        r.read_exact(&mut buf)?;
        Self::parse(&buf)
    }

    pub fn pixel_count(&self) -> GfxResult<usize> {
        let n = u64::from(self.width) * u64::from(self.height);
        usize::try_from(n).map_err(|_| self.too_large())
    }

    /// Length of one packed data block.
    pub fn block_len(&self) -> GfxResult<usize> {
        let bits = u64::from(self.width)
            .checked_mul(u64::from(self.height))
            .and_then(|n| n.checked_mul(u64::from(self.bpi)))
            .ok_or_else(|| self.too_large())?;
        usize::try_from(bits / 8).map_err(|_| self.too_large())
    }

    /// Absolute offset of data block `index`.
    pub fn block_offset(&self, index: u32) -> GfxResult<u64> {
        let len = self.block_len()? as u64;
        len.checked_mul(u64::from(index))
            .and_then(|o| o.checked_add(HEADER_SIZE as u64))
            .ok_or_else(|| self.too_large())
    }

    fn too_large(&self) -> GfxError {
        GfxError::TooLarge {
            width: self.width,
            height: self.height,
            bpi: self.bpi,
        }
    }
}
