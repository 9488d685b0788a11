#![forbid(unsafe_code)]

use std::io::{self, ErrorKind, Read};

/// Fills `buf` until it is full or the reader hits EOF; returns the byte count.
pub fn read_full(r: &mut dyn Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut got = 0;
    while got < buf.len() {
        match r.read(&mut buf[got..]) {
            Ok(0) => break,
            Ok(n) => got += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(got)
}

/// Reads up to `len` bytes without allocating `len` up front.
pub fn read_payload(r: &mut dyn Read, len: u32) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    Read::take(r, u64::from(len)).read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Hands out at most 3 bytes per read call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(3).min(self.0.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_read_full_short_reads() {
        let data: Vec<u8> = (0..40).collect();
        let mut r = Trickle(&data);
        let mut buf = [0u8; 32];
        assert_eq!(read_full(&mut r, &mut buf).unwrap(), 32);
        assert_eq!(buf[31], 31);
        assert_eq!(read_full(&mut r, &mut buf).unwrap(), 8);
        assert_eq!(read_full(&mut r, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_read_payload_stops_at_eof() {
        let mut r = Cursor::new(vec![1u8, 2, 3]);
        assert_eq!(read_payload(&mut r, 10).unwrap(), vec![1, 2, 3]);
    }
}
