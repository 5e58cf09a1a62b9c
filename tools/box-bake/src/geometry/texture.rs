//! Tile atlas coordinates

use crate::config::BakeConfig;

/// UVs for the four corners of a quad showing `tile`.
///
/// Tiles are numbered row-major over a `tile_rows x tile_cols` atlas. Each
/// tile is inset by the configured bite on every edge to avoid sampling its
/// neighbours, and the corner order is rotated left by `rotation` quarter
/// turns.
pub fn tile_uvs(config: &BakeConfig, tile: u32, rotation: u8) -> [[f32; 2]; 4] {
    let rows = f32::from(config.tile_rows);
    let cols = f32::from(config.tile_cols);
    let bite_row = config.tile_bite_row / rows;
    let bite_col = config.tile_bite_col / cols;

    let row_count = u32::from(config.tile_rows.max(1));
    let u = (tile % row_count) as f32 / rows + bite_row;
    let v = (tile / row_count) as f32 / cols + bite_col;
    let w = 1.0 / rows - 2.0 * bite_row;
    let h = 1.0 / cols - 2.0 * bite_col;

    let mut uvs = [[u, v], [u, v + h], [u + w, v + h], [u + w, v]];
    uvs.rotate_left(usize::from(rotation % 4));
    uvs
}
