#![forbid(unsafe_code)]

/// Size of one record header.
pub const RECORD_SIZE: usize = 32;

/// Width of the fixed name field.
pub const NAME_SIZE: usize = 24;

/// Known WAD layouts, keyed by the tag of the very first record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WadVersion {
    Gow1,
    Gow2,
}

impl WadVersion {
    pub const GOW1_MAGIC: u32 = 0x378;
    pub const GOW2_MAGIC: u32 = 0x15;

    pub fn from_magic(magic: u32) -> Option<Self> {
        match magic {
            Self::GOW1_MAGIC => Some(Self::Gow1),
            Self::GOW2_MAGIC => Some(Self::Gow2),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gow1 => "gow1",
            Self::Gow2 => "gow2",
        }
    }
}

impl std::fmt::Display for WadVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WadVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gow1" | "1" => Ok(Self::Gow1),
            "gow2" | "2" => Ok(Self::Gow2),
            other => Err(format!("unknown wad version '{other}' (expected gow1 or gow2)")),
        }
    }
}

/// Record layout:
/// - [u16 tag]
/// - [u16 param]
/// - [u32 size]
/// - [u8 name[24]] (NUL/space padded)
///
/// Payload of `size` bytes follows, padded to a 16-byte boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub tag: u16,
    pub param: u16,
    pub size: u32,
    pub name: String,
}

impl Record {
    pub fn parse(buf: &[u8; RECORD_SIZE]) -> Self {
        Self {
            tag: u16::from_le_bytes([buf[0], buf[1]]),
            param: u16::from_le_bytes([buf[2], buf[3]]),
            size: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            name: name_from_bytes(&buf[8..RECORD_SIZE]),
        }
    }
}

/// Cuts at the first NUL and drops trailing space padding.
pub fn name_from_bytes(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let s = String::from_utf8_lossy(&raw[..end]);
    s.trim_end_matches(' ').to_string()
}

/// Rounds a payload length up to the next multiple of 16.
pub fn align16(size: u32) -> u64 {
    (u64::from(size) + 15) & !15
}

/// Absolute offset of the record following the one at `offset`.
pub fn next_record_offset(offset: u64, size: u32) -> u64 {
    offset + RECORD_SIZE as u64 + align16(size)
}
