//! Segment documents
//!
//! A segment is a flat list of axis-aligned boxes plus segment-wide light
//! multipliers and an ambient colour. Boxes are immutable once parsed; the
//! whole list is shared read-only by shading.

mod attributes;
mod templates;

pub use attributes::{AttributeSet, Attributes};
pub use templates::{Templates, parse_templates};

use glam::Vec3;

use crate::error::BakeError;
use attributes::parse_numbers;

/// Per-face light multipliers, stored as the incoming vertex alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceLights {
    pub front: f32,
    pub back: f32,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for FaceLights {
    fn default() -> Self {
        Self {
            front: 1.0,
            back: 1.0,
            left: 1.0,
            right: 1.0,
            top: 1.0,
            bottom: 1.0,
        }
    }
}

/// Linear colour gradient between two points in scene space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub start: Vec3,
    pub end: Vec3,
    pub start_colour: Vec3,
    pub end_colour: Vec3,
}

impl Gradient {
    /// Parse `mb-gradient`.
    ///
    /// `"A x1 y1 z1 x2 y2 z2 r1 g1 b1 r2 g2 b2"` gives absolute endpoints;
    /// without the `A` prefix the endpoints are in box-relative `[-1, 1]`
    /// space and are scaled by the box size and offset by its position.
    pub fn parse(text: &str, pos: Vec3, size: Vec3) -> Result<Option<Self>, BakeError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let (absolute, numbers) = match text.strip_prefix("A ") {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let values = parse_numbers::<f32>("mb-gradient", numbers)?;
        if values.len() != 12 {
            return Err(BakeError::parse(format!(
                "attribute 'mb-gradient': expected 12 numbers, found {}",
                values.len()
            )));
        }

        let mut start = Vec3::from_slice(&values[0..3]);
        let mut end = Vec3::from_slice(&values[3..6]);
        if !absolute {
            start = pos + size * start;
            end = pos + size * end;
        }

        Ok(Some(Self {
            start,
            end,
            start_colour: Vec3::from_slice(&values[6..9]),
            end_colour: Vec3::from_slice(&values[9..12]),
        }))
    }
}

/// One axis-aligned box
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentBox {
    /// Centre in scene space
    pub pos: Vec3,
    /// Half extents (zero on an axis makes a flat box)
    pub size: Vec3,
    /// Face pair colours: right-left, top-bottom, front-back
    pub colours: [Vec3; 3],
    pub tiles: [u32; 3],
    pub tile_sizes: [f32; 3],
    /// Tile rotations, normalised to `0..4`
    pub tile_rotations: [u8; 3],
    /// Light intensity; zero means the box does not emit
    pub glow: f32,
    pub gradient: Option<Gradient>,
}

impl SegmentBox {
    /// Box with default colour, tiles and no glow
    pub fn new(pos: Vec3, size: Vec3) -> Self {
        Self {
            pos,
            size,
            colours: [Vec3::ONE; 3],
            tiles: [0; 3],
            tile_sizes: [1.0; 3],
            tile_rotations: [0; 3],
            glow: 0.0,
            gradient: None,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.pos - self.size
    }

    pub fn max(&self) -> Vec3 {
        self.pos + self.size
    }

    fn from_attributes(attrs: &Attributes) -> Result<Self, BakeError> {
        let pos = attrs.vector("pos", Vec3::ZERO)?;
        let size = attrs.vector("size", Vec3::ZERO)?;
        if size.min_element() < 0.0 {
            return Err(BakeError::parse(format!(
                "box size must not be negative (got {size})"
            )));
        }

        let colours = attrs.colours("color", Vec3::ONE)?;
        let tiles = attrs.triplet::<u32>("tile", [0; 3])?;

        let tile_sizes = attrs.triplet::<f32>("tileSize", [1.0; 3])?;
        if tile_sizes.iter().any(|s| !(*s > 0.0)) {
            return Err(BakeError::parse(format!(
                "tileSize must be positive (got {tile_sizes:?})"
            )));
        }

        let tile_rotations = attrs
            .triplet::<i32>("tileRot", [0; 3])?
            .map(|r| r.rem_euclid(4) as u8);

        let glow = match attrs.get("mb-glow").filter(|g| !g.trim().is_empty()) {
            Some(text) => attributes::parse_float("mb-glow", text)?,
            None => attrs.float("glow", 0.0)?,
        };
        if glow < 0.0 {
            return Err(BakeError::parse(format!(
                "glow must not be negative (got {glow})"
            )));
        }

        let gradient = match attrs.get("mb-gradient") {
            Some(text) => Gradient::parse(text, pos, size)?,
            None => None,
        };

        Ok(Self {
            pos,
            size,
            colours,
            tiles,
            tile_sizes,
            tile_rotations,
            glow,
            gradient,
        })
    }
}

/// Read-only context for one bake
#[derive(Debug, Clone, Default)]
pub struct Segment {
    pub lights: FaceLights,
    pub ambient: Vec3,
    /// Visible boxes in document order
    pub boxes: Vec<SegmentBox>,
}

/// Parse a segment document, resolving box and segment templates
pub fn parse_segment(xml: &str, templates: &Templates) -> Result<Segment, BakeError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();

    if !root.has_tag_name("segment") {
        return Err(BakeError::parse(format!(
            "expected <segment> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    let attrs = Attributes::new(root, templates);
    let lights = FaceLights {
        front: attrs.float("lightFront", 1.0)?,
        back: attrs.float("lightBack", 1.0)?,
        left: attrs.float("lightLeft", 1.0)?,
        right: attrs.float("lightRight", 1.0)?,
        top: attrs.float("lightTop", 1.0)?,
        bottom: attrs.float("lightBottom", 1.0)?,
    };
    let ambient = attrs.vector("ambient", Vec3::ZERO)?;

    let mut boxes = Vec::new();
    let mut hidden = 0;
    for node in root.children().filter(|n| n.has_tag_name("box")) {
        let attrs = Attributes::new(node, templates);
        if !attrs.is_visible() {
            hidden += 1;
            continue;
        }
        boxes.push(SegmentBox::from_attributes(&attrs)?);
    }

    tracing::debug!("Parsed segment: {} boxes ({} hidden)", boxes.len(), hidden);

    Ok(Segment {
        lights,
        ambient,
        boxes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_segment() {
        let xml = r#"
            <segment size="12 10 16">
                <box pos="0 -0.5 -8" size="1.0 0.5 1.0" color="0.3 0.9 0.3" tile="20"/>
                <obstacle type="scoretop" pos="0 1 -4"/>
            </segment>
        "#;
        let segment = parse_segment(xml, &Templates::default()).unwrap();
        assert_eq!(segment.lights, FaceLights::default());
        assert_eq!(segment.ambient, Vec3::ZERO);
        assert_eq!(segment.boxes.len(), 1);

        let b = &segment.boxes[0];
        assert_eq!(b.pos, Vec3::new(0.0, -0.5, -8.0));
        assert_eq!(b.size, Vec3::new(1.0, 0.5, 1.0));
        assert_eq!(b.colours, [Vec3::new(0.3, 0.9, 0.3); 3]);
        assert_eq!(b.tiles, [20; 3]);
        assert_eq!(b.tile_sizes, [1.0; 3]);
        assert_eq!(b.tile_rotations, [0; 3]);
        assert_eq!(b.glow, 0.0);
        assert!(b.gradient.is_none());
    }

    #[test]
    fn test_segment_lighting_attributes() {
        let xml = r#"<segment lightTop="0.8" lightLeft="0.5" ambient="0.2 0.3 0.4"/>"#;
        let segment = parse_segment(xml, &Templates::default()).unwrap();
        assert_eq!(segment.lights.top, 0.8);
        assert_eq!(segment.lights.left, 0.5);
        assert_eq!(segment.lights.front, 1.0);
        assert_eq!(segment.ambient, Vec3::new(0.2, 0.3, 0.4));
        assert!(segment.boxes.is_empty());
    }

    #[test]
    fn test_segment_template() {
        let mut templates = Templates::default();
        let mut set = AttributeSet::new();
        set.insert("lightFront".into(), "0.25".into());
        set.insert("size".into(), "2 2 2".into());
        templates.insert("room", set);

        let xml = r#"<segment template="room"><box template="room" pos="1 1 1"/></segment>"#;
        let segment = parse_segment(xml, &templates).unwrap();
        assert_eq!(segment.lights.front, 0.25);
        assert_eq!(segment.boxes[0].size, Vec3::splat(2.0));
    }

    #[test]
    fn test_hidden_boxes_are_skipped() {
        let xml = r#"
            <segment>
                <box pos="1 0 0" visible="0"/>
                <box pos="2 0 0"/>
            </segment>
        "#;
        let segment = parse_segment(xml, &Templates::default()).unwrap();
        assert_eq!(segment.boxes.len(), 1);
        assert_eq!(segment.boxes[0].pos.x, 2.0);
    }

    #[test]
    fn test_box_attribute_forms() {
        let xml = r#"
            <segment>
                <box size="1 1 1" tile="1 2 3" tileSize="0.5 2" tileRot="5 -1" mb-glow="" glow="3"/>
            </segment>
        "#;
        let segment = parse_segment(xml, &Templates::default()).unwrap();
        let b = &segment.boxes[0];
        assert_eq!(b.tiles, [1, 2, 3]);
        assert_eq!(b.tile_sizes, [0.5, 2.0, 2.0]);
        assert_eq!(b.tile_rotations, [1, 3, 3]);
        assert_eq!(b.glow, 3.0);
    }

    #[test]
    fn test_mb_glow_wins() {
        let xml = r#"<segment><box mb-glow="4" glow="3"/></segment>"#;
        let segment = parse_segment(xml, &Templates::default()).unwrap();
        assert_eq!(segment.boxes[0].glow, 4.0);
    }

    #[test]
    fn test_relative_gradient() {
        let g = Gradient::parse(
            "0 -1 0 0 1 0 1 0 0 0 0 1",
            Vec3::new(0.0, 2.0, -4.0),
            Vec3::new(1.0, 0.5, 1.0),
        )
        .unwrap()
        .unwrap();
        assert_eq!(g.start, Vec3::new(0.0, 1.5, -4.0));
        assert_eq!(g.end, Vec3::new(0.0, 2.5, -4.0));
        assert_eq!(g.start_colour, Vec3::X);
        assert_eq!(g.end_colour, Vec3::Z);
    }

    #[test]
    fn test_absolute_gradient() {
        let g = Gradient::parse(
            "A 0 0 0 0 10 0 1 1 1 0 0 0",
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::ONE,
        )
        .unwrap()
        .unwrap();
        assert_eq!(g.start, Vec3::ZERO);
        assert_eq!(g.end, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_gradient_errors() {
        assert_eq!(Gradient::parse("  ", Vec3::ZERO, Vec3::ONE).unwrap(), None);
        assert!(Gradient::parse("1 2 3", Vec3::ZERO, Vec3::ONE).is_err());
        assert!(Gradient::parse("A 1 2 3 4 5 6 7 8 9 10 11 x", Vec3::ZERO, Vec3::ONE).is_err());
    }

    #[test]
    fn test_malformed_documents() {
        let templates = Templates::default();
        assert!(matches!(
            parse_segment("<room/>", &templates),
            Err(BakeError::Parse(_))
        ));
        assert!(matches!(
            parse_segment("<segment><box", &templates),
            Err(BakeError::Xml(_))
        ));
        assert!(matches!(
            parse_segment(r#"<segment><box pos="0 zero 0"/></segment>"#, &templates),
            Err(BakeError::Parse(_))
        ));
        assert!(matches!(
            parse_segment(r#"<segment lightTop="bright"/>"#, &templates),
            Err(BakeError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_box_values() {
        let templates = Templates::default();
        for xml in [
            r#"<segment><box tileSize="0"/></segment>"#,
            r#"<segment><box size="1 -1 1"/></segment>"#,
            r#"<segment><box glow="-2"/></segment>"#,
            r#"<segment><box tile="-1"/></segment>"#,
        ] {
            assert!(
                matches!(parse_segment(xml, &templates), Err(BakeError::Parse(_))),
                "{xml} should fail"
            );
        }
    }
}
