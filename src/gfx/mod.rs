#![forbid(unsafe_code)]

mod error;
mod header;
mod palette;
mod unpack;

use std::fmt;
use std::io::{Read, Seek, SeekFrom};

pub use error::{GfxError, GfxResult};
pub use header::{GfxHeader, GFX_MAGIC, HEADER_SIZE};
pub use palette::{build_palette, interleaved_slot, scale_alpha, Color, Palette};
pub use unpack::{check_bpi, unpack_indices};

/// A decoded GFX: the header plus one unpacked plane per data block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gfx {
    pub header: GfxHeader,
    pub planes: Vec<Vec<u8>>,
}

impl Gfx {
    /// Decodes the header and every data block.
    ///
    /// Block `i` is read from `HEADER_SIZE + i * block_len`. The declared
    /// blocks must fit in the stream before any of them is read.
    pub fn decode<R: Read + Seek>(r: &mut R) -> GfxResult<Self> {
        let header = GfxHeader::read(r)?;
        check_bpi(header.bpi)?;

        let block_len = header.block_len()?;
        let pixels = header.pixel_count()?;

        if block_len == 0 && header.block_count > 0 {
            return Err(GfxError::EmptyBlocks {
                width: header.width,
                height: header.height,
                blocks: header.block_count,
            });
        }

        let need = header.block_offset(header.block_count)?;
        let got = r.seek(SeekFrom::End(0))?;
        if need > got {
            return Err(GfxError::Truncated { need, got });
        }

        let mut planes = Vec::new();

        for index in 0..header.block_count {
            r.seek(SeekFrom::Start(header.block_offset(index)?))?;

            let mut raw = Vec::new();
            Read::take(&mut *r, block_len as u64).read_to_end(&mut raw)?;
            if raw.len() != block_len {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!("gfx block {index}: got {} of {block_len} bytes", raw.len()),
                )
                .into());
            }

            let mut plane = unpack_indices(&raw, header.bpi)?;
            if header.bpi == 4 {
                plane.resize(pixels, 0);
            }
            planes.push(plane);
        }

        Ok(Self { header, planes })
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    /// Interprets plane `index` as this texture's palette.
    pub fn palette(&self, index: usize) -> GfxResult<Palette> {
        let plane = self.planes.get(index).ok_or(GfxError::MissingPlane {
            index,
            planes: self.planes.len(),
        })?;
        build_palette(plane, self.header.width, self.header.height)
    }
}

impl fmt::Display for Gfx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GFX Width: {} Height: {} Bpi: {} Encoding: {} Datas: {}",
            self.header.width,
            self.header.height,
            self.header.bpi,
            self.header.encoding,
            self.planes.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn gfx_bytes(width: u32, height: u32, bpi: u32, blocks: &[&[u8]]) -> Vec<u8> {
        let mut out = Vec::new();
        for v in [GFX_MAGIC, width, height, 0, bpi, blocks.len() as u32] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        for b in blocks {
            out.extend_from_slice(b);
        }
        out
    }

    #[test]
    fn test_decode_4bpi_blocks_are_sequential() {
        let data = gfx_bytes(2, 2, 4, &[&[0x21, 0x43], &[0x65, 0x87]]);
        let gfx = Gfx::decode(&mut Cursor::new(data)).unwrap();
        assert_eq!(gfx.planes.len(), 2);
        assert_eq!(gfx.planes[0], vec![1, 2, 3, 4]);
        assert_eq!(gfx.planes[1], vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_decode_4bpi_odd_pixel_count() {
        let data = gfx_bytes(3, 1, 4, &[&[0x21]]);
        let gfx = Gfx::decode(&mut Cursor::new(data)).unwrap();
        assert_eq!(gfx.planes[0], vec![1, 2, 0]);
    }

    #[test]
    fn test_decode_8bpi() {
        let data = gfx_bytes(4, 1, 8, &[&[9, 8, 7, 6]]);
        let gfx = Gfx::decode(&mut Cursor::new(data)).unwrap();
        assert_eq!(gfx.planes[0], vec![9, 8, 7, 6]);
    }

    #[test]
    fn test_decode_rejects_bpi_before_reading() {
        let data = gfx_bytes(4, 4, 16, &[]);
        assert!(matches!(
            Gfx::decode(&mut Cursor::new(data)),
            Err(GfxError::UnsupportedBpi { bpi: 16 })
        ));
    }

    #[test]
    fn test_decode_short_block() {
        let mut data = gfx_bytes(4, 4, 8, &[&[0u8; 16]]);
        data.truncate(HEADER_SIZE + 10);
        match Gfx::decode(&mut Cursor::new(data)) {
            Err(GfxError::Truncated { need, got }) => {
                assert_eq!(need, 24 + 16);
                assert_eq!(got, 24 + 10);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_decode_zero_width_with_many_blocks() {
        let mut data = Vec::new();
        for v in [GFX_MAGIC, 0, 16, 0, 8, 20_000_000] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        match Gfx::decode(&mut Cursor::new(data)) {
            Err(GfxError::EmptyBlocks { width, height, blocks }) => {
                assert_eq!((width, height, blocks), (0, 16, 20_000_000));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_decode_block_count_beyond_stream() {
        let mut data = gfx_bytes(2, 2, 8, &[&[1, 2, 3, 4]]);
        data[20..24].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            Gfx::decode(&mut Cursor::new(data)),
            Err(GfxError::Truncated { got: 28, .. })
        ));
    }

    #[test]
    fn test_decode_empty_texture_without_blocks() {
        let data = gfx_bytes(0, 0, 8, &[]);
        let gfx = Gfx::decode(&mut Cursor::new(data)).unwrap();
        assert!(gfx.planes.is_empty());
    }

    #[test]
    fn test_palette_from_32bpi_plane() {
        let block = [10, 20, 30, 128, 40, 50, 60, 64];
        let data = gfx_bytes(1, 2, 32, &[&block]);
        let gfx = Gfx::decode(&mut Cursor::new(data)).unwrap();
        let pal = gfx.palette(0).unwrap();
        assert_eq!(pal.colors[1], Color::new(40, 50, 60, 127));
        assert!(matches!(
            gfx.palette(1),
            Err(GfxError::MissingPlane { index: 1, planes: 1 })
        ));
    }

    #[test]
    fn test_display() {
        let data = gfx_bytes(2, 2, 8, &[&[0u8; 4]]);
        let gfx = Gfx::decode(&mut Cursor::new(data)).unwrap();
        assert_eq!(
            gfx.to_string(),
            "GFX Width: 2 Height: 2 Bpi: 8 Encoding: 0 Datas: 1"
        );
    }
}
