//! Per-vertex shading
//!
//! Every output vertex runs through the same fixed pipeline:
//! gradient, ambient occlusion, point lighting, then 8-bit encoding.
//! Shading only reads the segment, so quads can be shaded in parallel.

mod gradient;
mod lighting;
mod occlusion;

pub use lighting::point_lighting;
pub use occlusion::{BoxcastHit, apply_ambient_occlusion, boxcast, occlusion_shade};

use boxbake_shared::BakedVertex;
use glam::Vec3;

use crate::config::BakeConfig;
use crate::geometry::{FaceStyle, Quad, tile_uvs};
use crate::segment::Segment;

/// Base lighting applied to every colour before encoding
const BASE_LIGHT_SCALE: f32 = 0.5;

/// A quad ready for the mesh writer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadedQuad {
    pub vertices: [BakedVertex; 4],
    /// Indices relative to the first vertex of this quad
    pub indices: [u32; 6],
}

/// Compute the RGBA8 colour of one vertex
pub fn shade_vertex(
    position: Vec3,
    style: &FaceStyle,
    segment: &Segment,
    config: &BakeConfig,
) -> [u8; 4] {
    let mut colour = match &style.gradient {
        Some(gradient) => gradient.colour_at(position),
        None => style.colour,
    };
    let mut alpha = style.light;

    if config.ao_enabled {
        alpha = apply_ambient_occlusion(
            alpha,
            position,
            style.normal,
            &segment.boxes,
            config.ao_probe_half_size,
        );
    }

    if config.lighting_enabled {
        colour = point_lighting(position, colour, segment);
    }

    encode_colour(colour * BASE_LIGHT_SCALE, alpha)
}

/// Clamp to `[0, 1]` and quantise to 8 bits per channel
pub fn encode_colour(rgb: Vec3, alpha: f32) -> [u8; 4] {
    [
        encode_channel(rgb.x),
        encode_channel(rgb.y),
        encode_channel(rgb.z),
        encode_channel(alpha),
    ]
}

#[inline]
fn encode_channel(value: f32) -> u8 {
    // NaN saturates to 0 in the cast
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Shade the four corners of a quad and attach atlas UVs
pub fn shade_quad(quad: &Quad, segment: &Segment, config: &BakeConfig) -> ShadedQuad {
    let uvs = tile_uvs(config, quad.style.tile, quad.style.tile_rotation);
    let vertices = std::array::from_fn(|i| {
        let position = quad.points[i];
        BakedVertex {
            position: position.to_array(),
            uv: uvs[i],
            colour: shade_vertex(position, &quad.style, segment, config),
        }
    });

    ShadedQuad {
        vertices,
        indices: quad.local_indices(),
    }
}
