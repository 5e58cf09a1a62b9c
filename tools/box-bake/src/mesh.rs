//! Mesh stream writer
//!
//! Stream layout (little-endian):
//! - `u32` vertex count, then 24-byte vertices
//! - `u32` index count, then `u32` indices
//! - optional UTF-8 metadata
//! - optional 26-byte `MB` footer

use boxbake_shared::{BakedVertex, MeshFooter};

use crate::shading::ShadedQuad;

/// Accumulates quads into separate vertex and index buffers
#[derive(Debug, Default)]
pub struct MeshWriter {
    vertex_data: Vec<u8>,
    index_data: Vec<u8>,
    vertex_count: u32,
    index_count: u32,
}

impl MeshWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer with room for `quads` quads
    pub fn with_capacity(quads: usize) -> Self {
        Self {
            vertex_data: Vec::with_capacity(quads * 4 * BakedVertex::SIZE),
            index_data: Vec::with_capacity(quads * 6 * 4),
            ..Self::default()
        }
    }

    /// Append a quad, offsetting its indices by the vertices already written
    pub fn push_quad(&mut self, quad: &ShadedQuad) {
        let base = self.vertex_count;
        for vertex in &quad.vertices {
            self.vertex_data.extend_from_slice(&vertex.to_bytes());
        }
        for index in quad.indices {
            self.index_data.extend_from_slice(&(base + index).to_le_bytes());
        }
        self.vertex_count += quad.vertices.len() as u32;
        self.index_count += quad.indices.len() as u32;
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Assemble the uncompressed stream
    pub fn finish(self, metadata: Option<&str>, footer: Option<&MeshFooter>) -> Vec<u8> {
        let metadata = metadata.unwrap_or_default();
        let mut out = Vec::with_capacity(
            8 + self.vertex_data.len()
                + self.index_data.len()
                + metadata.len()
                + footer.map_or(0, |_| MeshFooter::SIZE),
        );

        out.extend_from_slice(&self.vertex_count.to_le_bytes());
        out.extend_from_slice(&self.vertex_data);
        out.extend_from_slice(&self.index_count.to_le_bytes());
        out.extend_from_slice(&self.index_data);
        out.extend_from_slice(metadata.as_bytes());
        if let Some(footer) = footer {
            out.extend_from_slice(&footer.to_bytes());
        }
        out
    }
}
