//! Tiling of a face rectangle into quads

use glam::Vec3;

use super::{FaceStyle, GeometryError, Quad};
use crate::math::{Axis, AxisExt};

/// Fraction of a tile below which a leftover is treated as rounding error
const TILE_EPSILON: f32 = 1e-4;

/// Split the rectangle spanned by `min` and `max` into tile-sized quads.
///
/// The first axis on which both corners agree is the collapsed axis; the
/// remaining two are tiled from their minimum with `s_size` and `t_size`
/// tiles. Tile `i` starts at `min + i * size` and the last row and column are
/// shortened to the remainder of the extent, so a face of extent `e` gets
/// `ceil(e / size)` tiles along that axis. A rectangle with zero extent on a
/// spanning axis yields no quads.
pub fn subdivide_face(
    min: Vec3,
    max: Vec3,
    s_size: f32,
    t_size: f32,
    style: &FaceStyle,
) -> Result<Vec<Quad>, GeometryError> {
    for size in [s_size, t_size] {
        if !(size > 0.0) {
            return Err(GeometryError::InvalidTileSize(size));
        }
    }

    let collapsed = Axis::ALL
        .into_iter()
        .find(|&axis| min.get(axis) == max.get(axis))
        .ok_or(GeometryError::DegenerateFace { min, max })?;
    let (s, t) = collapsed.others();

    let s_tiles = tile_spans(min.get(s), max.get(s), s_size);
    let t_tiles = tile_spans(min.get(t), max.get(t), t_size);
    let origin = Vec3::ZERO.with(collapsed, min.get(collapsed));

    let mut quads = Vec::with_capacity(s_tiles.len() * t_tiles.len());
    for &(s_at, s_part) in &s_tiles {
        let ds = s.unit() * s_part;
        for &(t_at, t_part) in &t_tiles {
            let dt = t.unit() * t_part;
            let p1 = origin.with(s, s_at).with(t, t_at);
            quads.push(Quad {
                points: [p1, p1 + ds, p1 + ds + dt, p1 + dt],
                style: *style,
            });
        }
    }

    Ok(quads)
}

/// `(start, length)` of each tile covering `a..b` (in either order)
fn tile_spans(a: f32, b: f32, size: f32) -> Vec<(f32, f32)> {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let extent = high - low;

    // NaN and empty extents give no tiles
    let count = (extent / size - TILE_EPSILON).ceil().max(0.0) as usize;
    (0..count)
        .map(|i| {
            let start = low + i as f32 * size;
            let length = if i + 1 == count { high - start } else { size };
            (start, length)
        })
        .collect()
}
