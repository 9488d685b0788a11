#![forbid(unsafe_code)]

use crate::gfx::error::{GfxError, GfxResult};

pub fn check_bpi(bpi: u32) -> GfxResult<()> {
    match bpi {
        4 | 8 | 32 => Ok(()),
        _ => Err(GfxError::UnsupportedBpi { bpi }),
    }
}

/// Expands packed indices to one byte each.
///
/// 4 bpi splits every byte into two indices, low nibble first. 8 and 32 bpi
/// are copied as they are.
pub fn unpack_indices(raw: &[u8], bpi: u32) -> GfxResult<Vec<u8>> {
    check_bpi(bpi)?;
    if bpi != 4 {
        return Ok(raw.to_vec());
    }

    let mut out = vec![0u8; raw.len() * 2];
    for (i, v) in raw.iter().copied().enumerate() {
        out[i * 2] = v & 0xf;
        out[i * 2 + 1] = (v >> 4) & 0xf;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack_nibbles(indices: &[u8]) -> Vec<u8> {
        indices.chunks(2).map(|p| (p[0] & 0xf) | (p[1] << 4)).collect()
    }

    #[test]
    fn test_unpack_4bpi() {
        let out = unpack_indices(&[0x21, 0xf0, 0x0a], 4).unwrap();
        assert_eq!(out, vec![1, 2, 0, 15, 10, 0]);
    }

    #[test]
    fn test_unpack_4bpi_inverse() {
        let raw: Vec<u8> = (0..=255u8).collect();
        let out = unpack_indices(&raw, 4).unwrap();
        assert_eq!(out.len(), raw.len() * 2);
        assert!(out.iter().all(|&v| v < 16));
        assert_eq!(pack_nibbles(&out), raw);
    }

    #[test]
    fn test_identity_widths() {
        let raw = [9u8, 8, 7, 6, 5, 4, 3, 2];
        assert_eq!(unpack_indices(&raw, 8).unwrap(), raw.to_vec());
        assert_eq!(unpack_indices(&raw, 32).unwrap(), raw.to_vec());
        assert!(unpack_indices(&[], 4).unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_bpi() {
        for bpi in [0, 1, 2, 16, 24, 64] {
            match unpack_indices(&[0u8; 4], bpi) {
                Err(GfxError::UnsupportedBpi { bpi: got }) => assert_eq!(got, bpi),
                other => panic!("unexpected: {other:?}"),
            }
        }
    }
}
