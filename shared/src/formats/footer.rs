//! Version/info footer appended after the index section
//!
//! # Layout (big-endian)
//! ```text
//! 0x00: tag "MB"
//! 0x02: version major u16
//! 0x04: version minor u16
//! 0x06: version patch u16
//! 0x08: feature flags u16
//! 0x0A: tile rows u16
//! 0x0C: tile cols u16
//! 0x0E: tile bite row f32
//! 0x12: tile bite col f32
//! 0x16: AO probe half size f32
//! ```

/// Footer tag
pub const FOOTER_TAG: &[u8; 2] = b"MB";

/// Footer feature flags
pub mod feature_flags {
    /// Unseen and back faces were baked
    pub const BAKE_UNSEEN_FACES: u16 = 0b0000_0001;
    /// Ambient occlusion was applied to vertex alpha
    pub const AMBIENT_OCCLUSION: u16 = 0b0000_0010;
    /// Point lighting from glowing boxes was applied
    pub const LIGHTING: u16 = 0b0000_0100;
}

/// Footer describing how a mesh was baked (26 bytes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshFooter {
    pub version: [u16; 3],
    pub flags: u16,
    pub tile_rows: u16,
    pub tile_cols: u16,
    pub tile_bite_row: f32,
    pub tile_bite_col: f32,
    pub ao_probe_half_size: f32,
}

impl MeshFooter {
    pub const SIZE: usize = 26;

    /// Check a feature flag
    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }

    /// Write footer to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..2].copy_from_slice(FOOTER_TAG);
        bytes[2..4].copy_from_slice(&self.version[0].to_be_bytes());
        bytes[4..6].copy_from_slice(&self.version[1].to_be_bytes());
        bytes[6..8].copy_from_slice(&self.version[2].to_be_bytes());
        bytes[8..10].copy_from_slice(&self.flags.to_be_bytes());
        bytes[10..12].copy_from_slice(&self.tile_rows.to_be_bytes());
        bytes[12..14].copy_from_slice(&self.tile_cols.to_be_bytes());
        bytes[14..18].copy_from_slice(&self.tile_bite_row.to_be_bytes());
        bytes[18..22].copy_from_slice(&self.tile_bite_col.to_be_bytes());
        bytes[22..26].copy_from_slice(&self.ao_probe_half_size.to_be_bytes());
        bytes
    }

    /// Read footer from bytes (must start with the `MB` tag)
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE || &bytes[0..2] != FOOTER_TAG {
            return None;
        }
        let u16_at = |i: usize| u16::from_be_bytes([bytes[i], bytes[i + 1]]);
        let f32_at =
            |i: usize| f32::from_be_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        Some(Self {
            version: [u16_at(2), u16_at(4), u16_at(6)],
            flags: u16_at(8),
            tile_rows: u16_at(10),
            tile_cols: u16_at(12),
            tile_bite_row: f32_at(14),
            tile_bite_col: f32_at(18),
            ao_probe_half_size: f32_at(22),
        })
    }

    /// Split a trailer into (metadata, footer) if it ends with a footer
    pub fn find(trailer: &[u8]) -> Option<(&[u8], Self)> {
        let start = trailer.len().checked_sub(Self::SIZE)?;
        let footer = Self::from_bytes(&trailer[start..])?;
        Some((&trailer[..start], footer))
    }
}
