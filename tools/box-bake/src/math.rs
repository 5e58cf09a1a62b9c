//! Axis helpers on top of glam
//!
//! Face construction works on "the collapsed axis" and "the two spanning
//! axes" of a rectangle, so vectors are frequently read and written by axis.

use glam::Vec3;

/// A cardinal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index (x = 0)
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two remaining axes, in x/y/z order
    pub fn others(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    /// Unit vector along this axis
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Per-axis access used by face generation
pub trait AxisExt {
    fn get(self, axis: Axis) -> f32;
    fn with(self, axis: Axis, value: f32) -> Self;
    /// Negate only the selected components
    fn partial_opposite(self, x: bool, y: bool, z: bool) -> Self;
}

impl AxisExt for Vec3 {
    #[inline]
    fn get(self, axis: Axis) -> f32 {
        self[axis.index()]
    }

    #[inline]
    fn with(mut self, axis: Axis, value: f32) -> Self {
        self[axis.index()] = value;
        self
    }

    #[inline]
    fn partial_opposite(self, x: bool, y: bool, z: bool) -> Self {
        Vec3::new(
            if x { -self.x } else { self.x },
            if y { -self.y } else { self.y },
            if z { -self.z } else { self.z },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_opposite() {
        let v = Vec3::new(1.0, 0.5, 2.0);
        assert_eq!(v.partial_opposite(false, false, false), v);
        assert_eq!(v.partial_opposite(true, false, true), Vec3::new(-1.0, 0.5, -2.0));
        assert_eq!(v.partial_opposite(true, true, true), -v);
    }

    #[test]
    fn test_axis_access() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.get(Axis::Y), 2.0);
        assert_eq!(v.with(Axis::Z, 9.0), Vec3::new(1.0, 2.0, 9.0));
        assert_eq!(Axis::Y.others(), (Axis::X, Axis::Z));
        assert_eq!(Axis::Z.unit() * 2.0, Vec3::new(0.0, 0.0, 2.0));
    }
}
