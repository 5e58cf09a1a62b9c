//! Face generation
//!
//! Each box yields up to six faces in a fixed order (right, left, top,
//! bottom, front, back). Which faces are baked follows the segment authoring
//! convention in [`Face::is_baked`], not camera-relative culling. Faces are
//! tiled into quads by [`subdivide_face`] and moved into scene space.

mod subdivide;
mod texture;

pub use subdivide::subdivide_face;
pub use texture::tile_uvs;

use boxbake_shared::formats::QUAD_INDICES;
use glam::Vec3;

use crate::config::BakeConfig;
use crate::segment::{FaceLights, Gradient, SegmentBox};

#[derive(Debug, Clone, thiserror::Error)]
pub enum GeometryError {
    #[error("degenerate face: no collapsed axis between {min} and {max}")]
    DegenerateFace { min: Vec3, max: Vec3 },

    #[error("tile size must be positive (got {0})")]
    InvalidTileSize(f32),
}

/// The six box faces, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    pub fn normal(self) -> Vec3 {
        match self {
            Face::Right => Vec3::X,
            Face::Left => Vec3::NEG_X,
            Face::Top => Vec3::Y,
            Face::Bottom => Vec3::NEG_Y,
            Face::Front => Vec3::Z,
            Face::Back => Vec3::NEG_Z,
        }
    }

    /// Index into the box's colour/tile/rotation triplets
    pub fn pair(self) -> usize {
        match self {
            Face::Right | Face::Left => 0,
            Face::Top | Face::Bottom => 1,
            Face::Front | Face::Back => 2,
        }
    }

    /// Index into the box's tile size triplet (reversed relative to [`Face::pair`])
    fn tile_size_index(self) -> usize {
        2 - self.pair()
    }

    /// Tile rotation for this face; side faces are pre-rotated so the atlas
    /// reads upright
    pub fn tile_rotation(self, rotations: [u8; 3]) -> u8 {
        let r = rotations[self.pair()] % 4;
        match self {
            Face::Right | Face::Left => (r + 1) % 4,
            Face::Top | Face::Bottom => (r + 2) % 4,
            Face::Front | Face::Back => r,
        }
    }

    pub fn light(self, lights: &FaceLights) -> f32 {
        match self {
            Face::Right => lights.right,
            Face::Left => lights.left,
            Face::Top => lights.top,
            Face::Bottom => lights.bottom,
            Face::Front => lights.front,
            Face::Back => lights.back,
        }
    }

    /// Visibility policy.
    ///
    /// Segments assume boxes sit against implicit walls, floor and ceiling:
    /// side faces are baked only on the side facing the segment centre line
    /// (`x = 0`, `y = 1`), the front face always, and the back face never,
    /// unless unseen faces are requested. Boxes exactly on a threshold get
    /// neither side face.
    pub fn is_baked(self, pos: Vec3, config: &BakeConfig) -> bool {
        if config.bake_unseen_faces {
            return true;
        }
        match self {
            Face::Right => pos.x < 0.0,
            Face::Left => pos.x > 0.0,
            Face::Top => pos.y < 1.0,
            Face::Bottom => pos.y > 1.0,
            Face::Front => true,
            Face::Back => false,
        }
    }

    /// Opposite corners of this face, as offsets from the box centre
    pub fn corners(self, corners: &[Vec3; 8]) -> (Vec3, Vec3) {
        match self {
            Face::Right => (corners[0], corners[2]),
            Face::Left => (corners[4], corners[6]),
            Face::Top => (corners[0], corners[5]),
            Face::Bottom => (corners[3], corners[6]),
            Face::Front => (corners[0], corners[7]),
            Face::Back => (corners[1], corners[6]),
        }
    }
}

/// Everything a quad inherits from its face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceStyle {
    pub colour: Vec3,
    /// Face light multiplier, carried as the starting vertex alpha
    pub light: f32,
    pub tile: u32,
    pub tile_rotation: u8,
    pub normal: Vec3,
    pub gradient: Option<Gradient>,
}

/// One planar, axis-aligned rectangle of output geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub points: [Vec3; 4],
    pub style: FaceStyle,
}

impl Quad {
    pub fn translated(mut self, offset: Vec3) -> Self {
        for p in &mut self.points {
            *p += offset;
        }
        self
    }

    /// Whether the triangle winding must be reversed.
    ///
    /// Compensates for the asymmetric visibility policy: quads on the
    /// positive-x side or at/below the `y = 1` line would otherwise be
    /// culled by the renderer.
    pub fn flips_winding(&self) -> bool {
        let [p1, _, p3, _] = self.points;
        (p1.x == p3.x && p1.x > 0.0) || (p1.y == p3.y && p1.y <= 1.0)
    }

    /// Two triangles over the four points, relative to the quad's first vertex
    pub fn local_indices(&self) -> [u32; 6] {
        let mut indices = QUAD_INDICES;
        if self.flips_winding() {
            indices.swap(0, 2);
            indices.swap(3, 5);
        }
        indices
    }
}

/// The eight corners of a box as offsets from its centre
pub fn build_corners(size: Vec3) -> [Vec3; 8] {
    use crate::math::AxisExt;

    [
        size.partial_opposite(false, false, false),
        size.partial_opposite(false, false, true),
        size.partial_opposite(false, true, true),
        size.partial_opposite(false, true, false),
        size.partial_opposite(true, false, false),
        size.partial_opposite(true, false, true),
        size.partial_opposite(true, true, true),
        size.partial_opposite(true, true, false),
    ]
}

/// Generate the scene-space quads of one box
pub fn bake_box_geometry(b: &SegmentBox, lights: &FaceLights, config: &BakeConfig) -> Vec<Quad> {
    let corners = build_corners(b.size);
    let mut quads = Vec::new();

    for face in Face::ALL {
        if !face.is_baked(b.pos, config) {
            continue;
        }

        let (min, max) = face.corners(&corners);
        let style = FaceStyle {
            colour: b.colours[face.pair()],
            light: face.light(lights),
            tile: b.tiles[face.pair()],
            tile_rotation: face.tile_rotation(b.tile_rotations),
            normal: face.normal(),
            gradient: b.gradient,
        };
        let tile_size = b.tile_sizes[face.tile_size_index()];

        match subdivide_face(min, max, tile_size, tile_size, &style) {
            Ok(face_quads) => quads.extend(face_quads.into_iter().map(|q| q.translated(b.pos))),
            Err(e) => tracing::warn!("Skipping {:?} face of box at {}: {}", face, b.pos, e),
        }
    }

    quads
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(pos: Vec3) -> SegmentBox {
        SegmentBox::new(pos, Vec3::ONE)
    }

    fn faces_of(quads: &[Quad]) -> Vec<Vec3> {
        let mut normals: Vec<Vec3> = Vec::new();
        for q in quads {
            if !normals.contains(&q.style.normal) {
                normals.push(q.style.normal);
            }
        }
        normals
    }

    #[test]
    fn test_corners() {
        let c = build_corners(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(c[0], Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(c[6], Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(c[7], Vec3::new(-1.0, -2.0, 3.0));
        // every face pair collapses exactly one axis
        for face in Face::ALL {
            let (a, b) = face.corners(&c);
            let equal = (0..3).filter(|&i| a[i] == b[i]).count();
            assert_eq!(equal, 1, "{face:?}");
        }
    }

    #[test]
    fn test_visibility_policy() {
        let config = BakeConfig::default();
        let left_of_centre = Vec3::new(-2.0, 0.0, -5.0);
        assert!(Face::Right.is_baked(left_of_centre, &config));
        assert!(!Face::Left.is_baked(left_of_centre, &config));
        assert!(Face::Top.is_baked(left_of_centre, &config));
        assert!(!Face::Bottom.is_baked(left_of_centre, &config));
        assert!(Face::Front.is_baked(left_of_centre, &config));
        assert!(!Face::Back.is_baked(left_of_centre, &config));

        let above = Vec3::new(3.0, 4.0, 0.0);
        assert!(Face::Left.is_baked(above, &config));
        assert!(Face::Bottom.is_baked(above, &config));
        assert!(!Face::Top.is_baked(above, &config));

        // on the thresholds neither side is baked
        let centred = Vec3::new(0.0, 1.0, 0.0);
        for face in [Face::Right, Face::Left, Face::Top, Face::Bottom] {
            assert!(!face.is_baked(centred, &config));
        }

        let unseen = BakeConfig {
            bake_unseen_faces: true,
            ..Default::default()
        };
        assert!(Face::ALL.iter().all(|f| f.is_baked(centred, &unseen)));
    }

    #[test]
    fn test_face_order_and_counts() {
        let config = BakeConfig {
            bake_unseen_faces: true,
            ..Default::default()
        };
        // 2x2 unit tiles per face
        let quads = bake_box_geometry(&unit_box(Vec3::ZERO), &FaceLights::default(), &config);
        assert_eq!(quads.len(), 24);
        assert_eq!(
            faces_of(&quads),
            Face::ALL.iter().map(|f| f.normal()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_quad_count_matches_policy_and_tiling() {
        let config = BakeConfig::default();
        let mut b = SegmentBox::new(Vec3::new(-3.0, 0.0, -4.0), Vec3::new(1.5, 1.0, 2.0));
        b.tile_sizes = [1.0, 1.0, 1.0];
        let quads = bake_box_geometry(&b, &FaceLights::default(), &config);

        // right: y 2 x z 4 -> 2*4; top: x 3 x z 4 -> 3*4; front: x 3 x y 2 -> 3*2
        assert_eq!(quads.len(), 8 + 12 + 6);
    }

    #[test]
    fn test_face_attributes() {
        let mut b = unit_box(Vec3::new(-2.0, 0.0, 0.0));
        b.colours = [Vec3::X, Vec3::Y, Vec3::Z];
        b.tiles = [3, 4, 5];
        b.tile_sizes = [2.0, 2.0, 2.0];
        b.tile_rotations = [3, 3, 3];
        let lights = FaceLights {
            right: 0.7,
            top: 0.8,
            front: 0.9,
            ..Default::default()
        };
        let quads = bake_box_geometry(&b, &lights, &BakeConfig::default());
        assert_eq!(quads.len(), 3);

        let right = quads[0].style;
        assert_eq!((right.colour, right.tile, right.tile_rotation, right.light), (Vec3::X, 3, 0, 0.7));
        let top = quads[1].style;
        assert_eq!((top.colour, top.tile, top.tile_rotation, top.light), (Vec3::Y, 4, 1, 0.8));
        let front = quads[2].style;
        assert_eq!((front.colour, front.tile, front.tile_rotation, front.light), (Vec3::Z, 5, 3, 0.9));
    }

    #[test]
    fn test_tile_rotation_wraps() {
        for face in Face::ALL {
            assert_eq!(face.tile_rotation([255; 3]), face.tile_rotation([3; 3]));
            assert!(face.tile_rotation([u8::MAX; 3]) < 4);
        }
        assert_eq!(Face::Right.tile_rotation([255, 0, 0]), 0);
        assert_eq!(Face::Top.tile_rotation([0, 254, 0]), 0);
    }

    #[test]
    fn test_quads_in_scene_space() {
        let pos = Vec3::new(0.0, -0.5, -8.0);
        let mut b = SegmentBox::new(pos, Vec3::new(1.0, 0.5, 1.0));
        b.tile_sizes = [2.0; 3];
        let quads = bake_box_geometry(&b, &FaceLights::default(), &BakeConfig::default());
        assert_eq!(quads.len(), 2);

        // top face at y = 0, front face at z = -7
        assert!(quads[0].points.iter().all(|p| p.y == 0.0));
        assert!(quads[1].points.iter().all(|p| p.z == -7.0));
    }

    #[test]
    fn test_winding_flip() {
        let style = FaceStyle {
            colour: Vec3::ONE,
            light: 1.0,
            tile: 0,
            tile_rotation: 0,
            normal: Vec3::Y,
            gradient: None,
        };
        // floor-level top face: p1.y == p3.y <= 1
        let floor = Quad {
            points: [
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(-1.0, 0.0, 0.0),
            ],
            style,
        };
        assert!(floor.flips_winding());
        assert_eq!(floor.local_indices(), [2, 1, 0, 2, 0, 3]);

        // ceiling-level bottom face keeps its winding
        let ceiling = floor.translated(Vec3::new(0.0, 3.0, 0.0));
        assert!(!ceiling.flips_winding());
        assert_eq!(ceiling.local_indices(), QUAD_INDICES);

        // side face on the positive-x side
        let side = Quad {
            points: [
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(2.0, 1.0, 0.0),
                Vec3::new(2.0, 1.0, 1.0),
                Vec3::new(2.0, 0.0, 1.0),
            ],
            style,
        };
        assert!(side.flips_winding());
    }
}
