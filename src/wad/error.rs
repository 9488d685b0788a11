#![forbid(unsafe_code)]

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WadError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("io at {offset:#010x}: {source}")]
    IoAt {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown wad version (first tag {magic:#x})")]
    UnknownVersion { magic: u32 },

    #[error("truncated record at {offset:#010x}: got {got} of 32 bytes")]
    TruncatedRecord { offset: u64, got: usize },

    #[error("truncated payload '{name}' at {offset:#010x}: got {got} of {expected} bytes")]
    TruncatedPayload {
        offset: u64,
        name: String,
        expected: u32,
        got: u64,
    },

    #[error("group end (tag {tag:#06x}) at {offset:#010x} without open group")]
    GroupUnderflow { offset: u64, tag: u16 },

    #[error("payload name escapes output dir: {0}")]
    Outside(String),
}

pub type WadResult<T> = Result<T, WadError>;
