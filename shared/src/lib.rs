//! Shared types for the boxbake segment mesh baker.
//!
//! Holds the baked mesh binary layout (vertex/index sections plus the
//! optional `MB` footer), the zlib wrapper applied to whole files and small
//! filesystem helpers used by the tools.

pub mod compression;
pub mod formats;
pub mod fs;

pub use compression::{compress, decompress};
pub use formats::{
    BAKER_VERSION, BakedMesh, BakedVertex, FormatError, MeshFooter, decode_baked_mesh,
};

/// File extension for baked segment meshes
pub const MESH_EXT: &str = "mesh";

/// Suffix appended to a mesh path by the debug decompress mode
pub const UNCOMPRESSED_SUFFIX: &str = ".mesh-uncompressed";
