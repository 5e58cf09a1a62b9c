//! Baked segment mesh binary format (.mesh)
//!
//! The uncompressed stream is POD data with no leading magic; the only tag is
//! the optional `MB` footer at the very end. Whole files are zlib-compressed
//! (see [`crate::compression`]).
//!
//! # Layout
//! ```text
//! 0x00: vertex_count u32 LE
//! 0x04: vertex_count * 24 bytes (x, y, z, u, v f32 LE; r, g, b, a u8)
//! var:  index_count u32 LE
//! var:  index_count * u32 LE
//! var:  metadata (UTF-8, optional)
//! var:  footer (26 bytes, optional, big-endian fields)
//! ```

mod baked_mesh;
mod footer;

pub use baked_mesh::*;
pub use footer::*;

/// Version of the baker written into the footer
pub const BAKER_VERSION: [u16; 3] = [0, 15, 4];

/// Errors raised while decoding a baked mesh stream
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("mesh data truncated: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: u32 },

    #[error("zlib stream error: {0}")]
    Compression(#[from] std::io::Error),
}
