//! Bake orchestration
//!
//! Parses a segment, generates geometry box by box, shades the quads in
//! parallel chunks and serializes the result. Progress is reported in two
//! halves: geometry (`0.0..0.5`) and shading/serialization (`0.5..1.0`).

use std::io::Read;
use std::path::{Path, PathBuf};

use boxbake_shared::fs::{MAX_DOCUMENT_BYTES, MAX_MESH_BYTES, read_file_with_limit};
use boxbake_shared::{MESH_EXT, UNCOMPRESSED_SUFFIX, compress, decompress};
use flate2::read::GzDecoder;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::BakeConfig;
use crate::error::BakeError;
use crate::geometry::bake_box_geometry;
use crate::mesh::MeshWriter;
use crate::segment::{Segment, Templates, parse_segment, parse_templates};
use crate::shading::{ShadedQuad, shade_quad};

/// Quads shaded per parallel batch (progress is reported between batches)
const SHADING_CHUNK: usize = 256;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Input suffixes and the suffix of the mesh baked from them
const OUTPUT_SUFFIXES: [(&str, &str); 4] = [
    (".xml.gz.mp3", ".mesh.mp3"),
    (".xml.mp3", ".mesh.mp3"),
    (".xml.gz", ".mesh"),
    (".xml", ".mesh"),
];

/// Bake a parsed segment into an uncompressed mesh stream
pub fn bake_segment(
    segment: &Segment,
    config: &BakeConfig,
    metadata: Option<&str>,
    progress: &mut dyn FnMut(f64),
) -> Result<Vec<u8>, BakeError> {
    config.validate()?;

    let box_count = segment.boxes.len();
    let mut quads = Vec::new();
    for (i, b) in segment.boxes.iter().enumerate() {
        progress(0.5 * i as f64 / box_count as f64);
        quads.extend(bake_box_geometry(b, &segment.lights, config));
    }
    debug!("Generated {} quads from {} boxes", quads.len(), box_count);

    let total = quads.len();
    let mut writer = MeshWriter::with_capacity(total);
    let mut done = 0;
    for chunk in quads.chunks(SHADING_CHUNK) {
        // collect preserves order, so output matches a sequential bake
        let shaded: Vec<ShadedQuad> = chunk
            .par_iter()
            .map(|quad| shade_quad(quad, segment, config))
            .collect();
        for quad in &shaded {
            writer.push_quad(quad);
        }
        done += chunk.len();
        progress(0.5 + 0.5 * done as f64 / total as f64);
    }

    info!(
        "Baked {} boxes: {} vertices, {} indices",
        box_count,
        writer.vertex_count(),
        writer.index_count()
    );

    let data = writer.finish(metadata, config.footer().as_ref());
    progress(1.0);
    Ok(data)
}

/// Bake segment XML into a compressed mesh
pub fn bake(
    segment_xml: &str,
    templates_xml: Option<&str>,
    config: &BakeConfig,
    metadata: Option<&str>,
    progress: &mut dyn FnMut(f64),
) -> Result<Vec<u8>, BakeError> {
    let templates = match templates_xml {
        Some(xml) => parse_templates(xml)?,
        None => Templates::default(),
    };
    let segment = parse_segment(segment_xml, &templates)?;
    debug!("Resolved segment against {} templates", templates.len());

    let data = bake_segment(&segment, config, metadata, progress)?;
    let packed = compress(&data)?;
    debug!("Compressed {} -> {} bytes", data.len(), packed.len());
    Ok(packed)
}

/// Read a segment or templates document, inflating it if it is gzipped
pub fn read_document(path: &Path) -> Result<String, BakeError> {
    let bytes = read_file_with_limit(path, MAX_DOCUMENT_BYTES).map_err(BakeError::Read)?;
    decode_document(bytes)
}

/// Decode document bytes as UTF-8, inflating gzip first when present
pub fn decode_document(bytes: Vec<u8>) -> Result<String, BakeError> {
    if bytes.starts_with(&GZIP_MAGIC) {
        let mut text = String::new();
        GzDecoder::new(bytes.as_slice()).read_to_string(&mut text)?;
        return Ok(text);
    }
    String::from_utf8(bytes).map_err(|e| BakeError::parse(format!("document is not UTF-8: {e}")))
}

/// Bake `input` to `output`, reading templates from `templates` if given
pub fn bake_to_file(
    input: &Path,
    output: &Path,
    templates: Option<&Path>,
    config: &BakeConfig,
    metadata: Option<&str>,
    progress: &mut dyn FnMut(f64),
) -> Result<(), BakeError> {
    let segment_xml = read_document(input)?;
    let templates_xml = templates.map(read_document).transpose()?;

    let data = bake(&segment_xml, templates_xml.as_deref(), config, metadata, progress)?;
    std::fs::write(output, &data)?;
    info!("Wrote {} ({} bytes)", output.display(), data.len());
    Ok(())
}

/// Inflate a baked mesh next to itself as `<file>.mesh-uncompressed`
pub fn decompress_file(path: &Path) -> Result<PathBuf, BakeError> {
    let packed = read_file_with_limit(path, MAX_MESH_BYTES).map_err(BakeError::Read)?;
    let data = decompress(&packed)?;

    let mut name = path.as_os_str().to_owned();
    name.push(UNCOMPRESSED_SUFFIX);
    let output = PathBuf::from(name);

    std::fs::write(&output, &data)?;
    info!("Wrote {} ({} bytes)", output.display(), data.len());
    Ok(output)
}

/// Mesh path for a segment path: `seg.xml` -> `seg.mesh`,
/// `seg.xml.gz.mp3` -> `seg.mesh.mp3` and so on
pub fn default_output_path(input: &Path) -> PathBuf {
    if let Some(name) = input.file_name().and_then(|n| n.to_str()) {
        for (suffix, replacement) in OUTPUT_SUFFIXES {
            if let Some(stem) = name.strip_suffix(suffix) {
                return input.with_file_name(format!("{stem}{replacement}"));
            }
        }
    }
    input.with_extension(MESH_EXT)
}
