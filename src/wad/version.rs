#![forbid(unsafe_code)]

use std::io::Read;

use crate::wad::error::{WadError, WadResult};
use crate::wad::format::WadVersion;

/// Reads the first tag of the stream and maps it to a known version.
///
/// Consumes 4 bytes; callers that go on to walk the stream must seek back.
pub fn detect_version(r: &mut dyn Read) -> WadResult<WadVersion> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    let magic = u32::from_le_bytes(buf);
    WadVersion::from_magic(magic).ok_or(WadError::UnknownVersion { magic })
}
