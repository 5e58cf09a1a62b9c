//! Linear colour gradients

use glam::Vec3;

use crate::segment::Gradient;

impl Gradient {
    /// Fraction of the way from `start` to `end` that `point` projects to,
    /// clamped to `[0, 1]`. A gradient with coincident endpoints is constant.
    pub fn alongness(&self, point: Vec3) -> f32 {
        let axis = self.end - self.start;
        let length_squared = axis.length_squared();
        if length_squared == 0.0 {
            return 0.0;
        }
        ((point - self.start).dot(axis) / length_squared).clamp(0.0, 1.0)
    }

    /// Interpolated colour at `point`
    pub fn colour_at(&self, point: Vec3) -> Vec3 {
        let t = self.alongness(point);
        self.start_colour * (1.0 - t) + self.end_colour * t
    }
}
