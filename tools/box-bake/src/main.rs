//! box-bake - segment mesh baker
//!
//! Converts box-based segment XML into shaded, zlib-compressed meshes
//! (.mesh), and inspects or inflates existing meshes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use box_bake::{
    BakeConfig, bake_to_file, decode_baked_mesh, decompress_file, default_output_path, load_config,
};
use boxbake_shared::formats::feature_flags;
use boxbake_shared::fs::{MAX_MESH_BYTES, read_file_with_limit};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "box-bake")]
#[command(about = "Segment mesh baker")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake a segment into a mesh
    Bake(BakeArgs),

    /// Inflate a mesh to <FILE>.mesh-uncompressed for debugging
    #[command(alias = "!!decompress!!")]
    Decompress {
        /// Compressed mesh file
        file: PathBuf,
    },

    /// Print the contents of a mesh
    Inspect {
        /// Compressed mesh file
        file: PathBuf,
    },
}

#[derive(Args)]
struct BakeArgs {
    /// Segment XML (plain or gzipped)
    input: PathBuf,

    /// Output mesh (default: derived from the input name)
    output: Option<PathBuf>,

    /// Templates XML
    #[arg(value_name = "TEMPLATES", conflicts_with = "templates")]
    templates_path: Option<PathBuf>,

    /// Templates XML
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Bake config (TOML); flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also bake back faces and hidden side faces
    #[arg(long)]
    unseen_faces: bool,

    /// Disable ambient occlusion
    #[arg(long)]
    no_ao: bool,

    /// Ambient occlusion probe half size
    #[arg(long)]
    ao_size: Option<f32>,

    /// Enable point lighting from glowing boxes
    #[arg(long)]
    lighting: bool,

    /// Omit the version/info footer
    #[arg(long)]
    no_footer: bool,

    /// Text stored in the mesh before the footer
    #[arg(long)]
    metadata: Option<String>,
}

impl BakeArgs {
    fn resolve_config(&self) -> Result<BakeConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => BakeConfig::default(),
        };

        if self.unseen_faces {
            config.bake_unseen_faces = true;
        }
        if self.no_ao {
            config.ao_enabled = false;
        }
        if let Some(size) = self.ao_size {
            config.ao_probe_half_size = size;
        }
        if self.lighting {
            config.lighting_enabled = true;
        }
        if self.no_footer {
            config.include_footer = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bake(args) => run_bake(args)?,

        Commands::Decompress { file } => {
            let output = decompress_file(&file)
                .with_context(|| format!("Failed to decompress {}", file.display()))?;
            tracing::info!("Decompressed {:?} -> {:?}", file, output);
        }

        Commands::Inspect { file } => inspect(&file)?,
    }

    Ok(())
}

fn run_bake(args: BakeArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    let templates = args.templates.as_deref().or(args.templates_path.as_deref());
    tracing::info!("Baking {:?} -> {:?}", args.input, output);

    let mut last_step = 0;
    bake_to_file(
        &args.input,
        &output,
        templates,
        &config,
        args.metadata.as_deref(),
        &mut |progress| {
            let step = (progress * 10.0) as u32;
            if step > last_step {
                last_step = step;
                tracing::debug!("{:.0}%", progress * 100.0);
            }
        },
    )
    .with_context(|| format!("Failed to bake {}", args.input.display()))?;

    tracing::info!("Done!");
    Ok(())
}

fn inspect(path: &std::path::Path) -> Result<()> {
    let packed = read_file_with_limit(path, MAX_MESH_BYTES)?;
    let data = boxbake_shared::decompress(&packed)
        .with_context(|| format!("Failed to decompress {}", path.display()))?;
    let mesh = decode_baked_mesh(&data)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    println!("{}", path.display());
    println!("  uncompressed: {} bytes", data.len());
    println!(
        "  vertices: {}  indices: {}  quads: {}",
        mesh.vertices.len(),
        mesh.indices.len(),
        mesh.quad_count()
    );

    let metadata = mesh.metadata();
    if !metadata.is_empty() {
        println!("  metadata: {:?}", String::from_utf8_lossy(metadata));
    }

    match mesh.footer() {
        Some(footer) => {
            let [major, minor, patch] = footer.version;
            println!("  baker version: {major}.{minor}.{patch}");
            println!(
                "  unseen faces: {}  ambient occlusion: {}  lighting: {}",
                footer.has_flag(feature_flags::BAKE_UNSEEN_FACES),
                footer.has_flag(feature_flags::AMBIENT_OCCLUSION),
                footer.has_flag(feature_flags::LIGHTING),
            );
            println!(
                "  tile atlas: {}x{} (bite {} x {})",
                footer.tile_rows, footer.tile_cols, footer.tile_bite_row, footer.tile_bite_col
            );
            println!("  AO probe half size: {}", footer.ao_probe_half_size);
        }
        None => println!("  no footer"),
    }

    Ok(())
}
