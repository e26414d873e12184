use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{Result, XpError};

pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 4), Compression::new(level));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_limited(data, usize::MAX)
}

/// Inflate at most `limit` bytes; a stream that would produce more fails
/// with `LimitExceeded` without inflating the rest.
pub fn decompress_limited(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let mut out = Vec::new();
    GzDecoder::new(data).take(cap).read_to_end(&mut out)?;
    if out.len() > limit {
        return Err(XpError::LimitExceeded {
            what: "decompressed size",
            actual: out.len(),
            max: limit,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gzip_roundtrip() {
        let data = b"layered glyphs layered glyphs layered glyphs".repeat(8);
        let packed = compress(&data, 9).unwrap();
        assert_eq!(&packed[..2], &[0x1f, 0x8b]);
        assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn garbage_is_a_compression_error() {
        assert!(matches!(
            decompress(b"definitely not gzip"),
            Err(XpError::Compression(_))
        ));
    }

    #[test]
    fn inflation_stops_at_the_limit() {
        let packed = compress(&vec![0u8; 1 << 20], 9).unwrap();
        assert!(packed.len() < 4096);
        assert!(matches!(
            decompress_limited(&packed, 1024),
            Err(XpError::LimitExceeded { what: "decompressed size", max: 1024, .. })
        ));
        assert_eq!(decompress_limited(&packed, 1 << 20).unwrap().len(), 1 << 20);
    }
}
