//! Point lighting from glowing boxes

use glam::Vec3;

use crate::segment::Segment;

/// Keeps the falloff finite for points on a light's surface
const LIGHT_EPSILON: f32 = 1e-4;
/// Scale applied to `glow`
const GLOW_SCALE: f32 = 0.01;

/// Inverse-square falloff measured from the light's surface, clamped to `[0, 1]`
fn falloff(radius: f32, distance: f32) -> f32 {
    let gap = distance.max(radius + LIGHT_EPSILON) - radius;
    (1.0 / (gap * gap)).clamp(0.0, 1.0)
}

/// Light `base` at `position` with every glowing box, then apply the
/// segment ambient colour.
///
/// Each light contributes its colour for the axis it is mostly offset along,
/// using its half extent on that axis as the radius.
pub fn point_lighting(position: Vec3, base: Vec3, segment: &Segment) -> Vec3 {
    let mut added = Vec3::ZERO;

    for light in segment.boxes.iter().filter(|b| b.glow > 0.0) {
        let difference = light.pos - position;
        let distance = difference.length();
        let d = difference.abs();
        let facing = if d.x > d.y && d.x > d.z {
            0
        } else if d.y > d.z {
            1
        } else {
            2
        };

        let intensity = falloff(light.size[facing], distance);
        added += light.colours[facing] * base * intensity * light.glow * GLOW_SCALE;
    }

    base * segment.ambient + added
}
