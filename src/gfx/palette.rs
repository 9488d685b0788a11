#![forbid(unsafe_code)]

use crate::gfx::error::{GfxError, GfxResult};

/// Block order of a 16-row palette as stored.
const REMAP: [usize; 4] = [0, 2, 1, 3];

/// Entries per palette block.
const BLOCK: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub colors: Vec<Color>,
}

impl Palette {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Stored alpha tops out at 128; scale to 0..=255, truncating and saturating.
pub fn scale_alpha(raw: u8) -> u8 {
    (f32::from(raw) * (255.0 / 128.0)) as u8
}

/// Where stored entry `i` goes in a 16-row palette.
pub fn interleaved_slot(i: usize) -> usize {
    let block = i / BLOCK;
    let pos = i % BLOCK;
    pos + (REMAP[block % 4] + (block / 4) * 4) * BLOCK
}

/// Builds a `width * height` palette from one plane of RGBA quads.
pub fn build_palette(plane: &[u8], width: u32, height: u32) -> GfxResult<Palette> {
    let geometry = || GfxError::InvalidPaletteGeometry { width, height };
    let count = usize::try_from(u64::from(width) * u64::from(height)).map_err(|_| geometry())?;

    let interleaved = match height {
        2 => false,
        16 if count % (BLOCK * 4) == 0 => true,
        _ => return Err(geometry()),
    };

    let need = count.checked_mul(4).ok_or_else(geometry)?;
    if plane.len() < need {
        return Err(GfxError::PaletteTooShort {
            need,
            got: plane.len(),
        });
    }

    let mut colors = vec![Color::default(); count];
    for (i, quad) in plane[..need].chunks_exact(4).enumerate() {
        let clr = Color::new(quad[0], quad[1], quad[2], scale_alpha(quad[3]));
        let slot = if interleaved { interleaved_slot(i) } else { i };
        colors[slot] = clr;
    }

    Ok(Palette { colors })
}
