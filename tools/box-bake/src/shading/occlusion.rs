//! Boxcast ambient occlusion
//!
//! Occlusion is estimated by the volume of scene boxes inside a small probe
//! cube pushed out along the face normal. Overlaps are summed per box
//! without deduplication, so intersecting boxes darken a vertex more than
//! their union would.

use glam::Vec3;

use crate::math::{Axis, AxisExt};
use crate::segment::SegmentBox;

/// Strength of the darkening curve
const OCCLUSION_STRENGTH: f32 = 0.47;
/// Exponent applied to the shade fraction
const OCCLUSION_FALLOFF: f32 = 0.3;

/// Result of a boxcast
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxcastHit {
    /// Sum of overlap volumes
    pub volume: f32,
    /// Number of boxes touched
    pub intersected: usize,
}

/// Overlap length of two intervals, or `None` when they are disjoint
fn axis_overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> Option<f32> {
    (a_max >= b_min && b_max >= a_min).then(|| a_max.min(b_max) - a_min.max(b_min))
}

/// Accumulate the overlap of every box with the cube at `centre`
pub fn boxcast(boxes: &[SegmentBox], centre: Vec3, half_size: Vec3) -> BoxcastHit {
    let probe_min = centre - half_size;
    let probe_max = centre + half_size;

    let mut hit = BoxcastHit::default();
    for b in boxes {
        let (box_min, box_max) = (b.min(), b.max());
        let overlap = Axis::ALL.map(|axis| {
            axis_overlap(
                box_min.get(axis),
                box_max.get(axis),
                probe_min.get(axis),
                probe_max.get(axis),
            )
        });

        if let [Some(x), Some(y), Some(z)] = overlap {
            hit.volume += x * y * z;
            hit.intersected += 1;
        }
    }
    hit
}

/// Fraction of the probe cube of half size `half_size` filled by `hit`
pub fn occlusion_shade(hit: &BoxcastHit, half_size: f32) -> f32 {
    let probe_volume = 8.0 * half_size.powi(3);
    hit.volume.clamp(0.0, probe_volume) / probe_volume
}

/// Darken `alpha` for a vertex at `position` facing `normal`
pub fn apply_ambient_occlusion(
    alpha: f32,
    position: Vec3,
    normal: Vec3,
    boxes: &[SegmentBox],
    half_size: f32,
) -> f32 {
    let hit = boxcast(boxes, position + normal * half_size, Vec3::splat(half_size));
    let shade = occlusion_shade(&hit, half_size);
    alpha * alpha * (1.0 - OCCLUSION_STRENGTH * shade.powf(OCCLUSION_FALLOFF))
}
