#![forbid(unsafe_code)]

//! Decoders for WAD record archives and GFX indexed textures.

pub mod gfx;
pub mod ops;
pub mod wad;
