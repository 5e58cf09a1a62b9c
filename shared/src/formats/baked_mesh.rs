//! Vertex and index sections of a baked mesh

use super::{FormatError, MeshFooter};

/// Size of one packed vertex in bytes (5 x f32 + 4 x u8)
pub const VERTEX_STRIDE: usize = 24;

/// Size of one packed index in bytes
pub const INDEX_SIZE: usize = 4;

/// Indices contributed by a single quad (two triangles)
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// One vertex as stored in the mesh stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BakedVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    /// RGBA, 8 bits per channel
    pub colour: [u8; 4],
}

impl BakedVertex {
    pub const SIZE: usize = VERTEX_STRIDE;

    /// Write vertex to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        let floats = [
            self.position[0],
            self.position[1],
            self.position[2],
            self.uv[0],
            self.uv[1],
        ];
        for (i, f) in floats.iter().enumerate() {
            bytes[i * 4..i * 4 + 4].copy_from_slice(&f.to_le_bytes());
        }
        bytes[20..24].copy_from_slice(&self.colour);
        bytes
    }

    /// Read vertex from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let f = |i: usize| {
            f32::from_le_bytes([bytes[i * 4], bytes[i * 4 + 1], bytes[i * 4 + 2], bytes[i * 4 + 3]])
        };
        Some(Self {
            position: [f(0), f(1), f(2)],
            uv: [f(3), f(4)],
            colour: [bytes[20], bytes[21], bytes[22], bytes[23]],
        })
    }
}

/// Decoded view of an uncompressed mesh stream
#[derive(Debug)]
pub struct BakedMesh<'a> {
    pub vertices: Vec<BakedVertex>,
    pub indices: Vec<u32>,
    /// Bytes after the index section: metadata followed by the optional footer
    pub trailer: &'a [u8],
}

impl BakedMesh<'_> {
    /// Footer, if the trailer ends with one
    pub fn footer(&self) -> Option<MeshFooter> {
        MeshFooter::find(self.trailer).map(|(_, footer)| footer)
    }

    /// Caller metadata stored between the index section and the footer
    pub fn metadata(&self) -> &[u8] {
        match MeshFooter::find(self.trailer) {
            Some((metadata, _)) => metadata,
            None => self.trailer,
        }
    }

    /// Number of quads (every quad contributes 4 vertices)
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// Cursor over a byte slice that reports truncation as [`FormatError`]
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, needed: usize) -> Result<&'a [u8], FormatError> {
        let available = self.data.len() - self.offset;
        if needed > available {
            return Err(FormatError::Truncated {
                offset: self.offset,
                needed,
                available,
            });
        }
        let slice = &self.data[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32, FormatError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn rest(self) -> &'a [u8] {
        &self.data[self.offset..]
    }
}

/// Decode an uncompressed mesh stream.
///
/// Reads exactly `vertex_count * 24` vertex bytes and `index_count * 4`
/// index bytes; everything after that is returned untouched as the trailer.
pub fn decode_baked_mesh(data: &[u8]) -> Result<BakedMesh<'_>, FormatError> {
    let mut reader = Reader { data, offset: 0 };

    let vertex_count = reader.read_u32()?;
    let vertex_bytes = reader.take(vertex_count as usize * VERTEX_STRIDE)?;
    let vertices = vertex_bytes
        .chunks_exact(VERTEX_STRIDE)
        .filter_map(BakedVertex::from_bytes)
        .collect::<Vec<_>>();

    let index_count = reader.read_u32()?;
    let index_bytes = reader.take(index_count as usize * INDEX_SIZE)?;
    let mut indices = Vec::with_capacity(index_count as usize);
    for chunk in index_bytes.chunks_exact(INDEX_SIZE) {
        let index = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        if index >= vertex_count {
            return Err(FormatError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        indices.push(index);
    }

    Ok(BakedMesh {
        vertices,
        indices,
        trailer: reader.rest(),
    })
}
