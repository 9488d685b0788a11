#![forbid(unsafe_code)]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GfxError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad gfx magic {found:#x}")]
    MagicMismatch { found: u32 },

    #[error("unsupported bpi {bpi} (expected 4, 8 or 32)")]
    UnsupportedBpi { bpi: u32 },

    #[error("wrong palette geometry {width}x{height}")]
    InvalidPaletteGeometry { width: u32, height: u32 },

    #[error("palette plane too short: need {need} bytes, got {got}")]
    PaletteTooShort { need: usize, got: usize },

    #[error("no data block {index} (texture has {planes})")]
    MissingPlane { index: usize, planes: usize },

    #[error("{blocks} data blocks of zero length ({width}x{height})")]
    EmptyBlocks { width: u32, height: u32, blocks: u32 },

    #[error("gfx data ends at {got} bytes, header needs {need}")]
    Truncated { need: u64, got: u64 },

    #[error("gfx too large: {width}x{height} at {bpi} bpi")]
    TooLarge { width: u32, height: u32, bpi: u32 },
}

pub type GfxResult<T> = Result<T, GfxError>;
