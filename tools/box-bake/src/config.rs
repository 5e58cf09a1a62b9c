//! Bake configuration
//!
//! Every option is read at bake time from an explicit [`BakeConfig`]; nothing
//! is process-wide. Configs can be loaded from a TOML file:
//!
//! ```toml
//! bake_unseen_faces = false
//! ao_enabled = true
//! ao_probe_half_size = 0.5
//! lighting_enabled = false
//! tile_rows = 8
//! tile_cols = 8
//! tile_bite_row = 0.03125
//! tile_bite_col = 0.03125
//! include_footer = true
//! ```

use std::path::Path;

use boxbake_shared::formats::feature_flags;
use boxbake_shared::{BAKER_VERSION, MeshFooter};
use serde::Deserialize;

use crate::error::BakeError;

/// Options consumed by geometry generation, shading and serialization
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BakeConfig {
    /// Bake back faces and the side faces hidden by the authoring convention
    pub bake_unseen_faces: bool,
    /// Darken vertex alpha with the boxcast ambient occlusion
    pub ao_enabled: bool,
    /// Half size of the AO probe cube
    pub ao_probe_half_size: f32,
    /// Add light from glowing boxes and multiply by the segment ambient
    pub lighting_enabled: bool,
    /// Rows in the tile atlas
    pub tile_rows: u16,
    /// Columns in the tile atlas
    pub tile_cols: u16,
    /// Fraction of a tile clipped from each edge (rows)
    pub tile_bite_row: f32,
    /// Fraction of a tile clipped from each edge (columns)
    pub tile_bite_col: f32,
    /// Append the `MB` version/info footer
    pub include_footer: bool,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            bake_unseen_faces: false,
            ao_enabled: true,
            ao_probe_half_size: 0.5,
            lighting_enabled: false,
            tile_rows: 8,
            tile_cols: 8,
            tile_bite_row: 0.03125,
            tile_bite_col: 0.03125,
            include_footer: true,
        }
    }
}

impl BakeConfig {
    /// Footer feature bitmask (bit0 unseen faces, bit1 AO, bit2 lighting)
    pub fn feature_flags(&self) -> u16 {
        let mut flags = 0;
        if self.bake_unseen_faces {
            flags |= feature_flags::BAKE_UNSEEN_FACES;
        }
        if self.ao_enabled {
            flags |= feature_flags::AMBIENT_OCCLUSION;
        }
        if self.lighting_enabled {
            flags |= feature_flags::LIGHTING;
        }
        flags
    }

    /// Footer describing this config, or `None` when the footer is disabled
    pub fn footer(&self) -> Option<MeshFooter> {
        self.include_footer.then(|| MeshFooter {
            version: BAKER_VERSION,
            flags: self.feature_flags(),
            tile_rows: self.tile_rows,
            tile_cols: self.tile_cols,
            tile_bite_row: self.tile_bite_row,
            tile_bite_col: self.tile_bite_col,
            ao_probe_half_size: self.ao_probe_half_size,
        })
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<(), BakeError> {
        if self.tile_rows == 0 || self.tile_cols == 0 {
            return Err(BakeError::InvalidConfig(format!(
                "tile atlas must have at least one row and column (got {}x{})",
                self.tile_rows, self.tile_cols
            )));
        }
        if self.ao_enabled && !(self.ao_probe_half_size > 0.0) {
            return Err(BakeError::InvalidConfig(format!(
                "ao_probe_half_size must be positive (got {})",
                self.ao_probe_half_size
            )));
        }
        Ok(())
    }
}

/// Parse a config from TOML text
pub fn parse_config(text: &str) -> Result<BakeConfig, BakeError> {
    let config: BakeConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a config file
pub fn load_config(path: &Path) -> Result<BakeConfig, BakeError> {
    let text = std::fs::read_to_string(path)?;
    parse_config(&text)
}
