//! zlib wrapper applied to whole mesh files

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::formats::FormatError;

/// Compress a mesh stream at the default compression level
pub fn compress(data: &[u8]) -> Result<Vec<u8>, FormatError> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Inflate a compressed mesh file
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, FormatError> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zlib_header() {
        let packed = compress(b"segment mesh").unwrap();
        // CMF byte for deflate with a 32K window
        assert_eq!(packed[0], 0x78);
        assert_eq!(decompress(&packed).unwrap(), b"segment mesh");
    }

    #[test]
    fn test_decompress_garbage() {
        assert!(decompress(b"definitely not zlib").is_err());
    }

    #[test]
    fn test_empty_input() {
        let packed = compress(&[]).unwrap();
        assert!(decompress(&packed).unwrap().is_empty());
    }
}
