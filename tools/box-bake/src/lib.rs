//! box-bake library
//!
//! Bakes box-based segment descriptions into shaded, zlib-compressed meshes.
//! The pipeline is: parse the segment (resolving templates) -> generate face
//! quads per box -> shade every vertex against the whole box list -> pack the
//! vertex/index streams with an optional footer -> compress.

pub mod bake;
pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod mesh;
pub mod segment;
pub mod shading;

pub use bake::{
    bake, bake_segment, bake_to_file, decode_document, decompress_file, default_output_path,
    read_document,
};
pub use config::{BakeConfig, load_config};
pub use error::BakeError;
pub use geometry::{Face, FaceStyle, GeometryError, Quad, bake_box_geometry};
pub use mesh::MeshWriter;
pub use segment::{
    FaceLights, Gradient, Segment, SegmentBox, Templates, parse_segment, parse_templates,
};
pub use shading::{ShadedQuad, shade_quad, shade_vertex};

// Re-export the on-disk format so callers don't need a direct dependency
pub use boxbake_shared::{BakedVertex, MeshFooter, decode_baked_mesh};
