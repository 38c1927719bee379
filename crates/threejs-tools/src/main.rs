//! threejs-inspect - inspect and rewrite Three.js binary models
//!
//! # Commands
//!
//! - `threejs-inspect inspect <model.bin>` - print header fields and section sizes
//! - `threejs-inspect reencode <in.bin> <out.bin>` - decode and re-encode a container
//! - `threejs-inspect assemble <model.json>` - read a sidecar model and print
//!   per-material triangle counts
//!
//! Set `RUST_LOG=debug` (or pass `--verbose`) to trace every section.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use threejs_core::{decode_container, encode_container_to_vec, Container, FaceKind, Header};
use threejs_io::{AssemblyOptions, ModelReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "threejs-inspect")]
#[command(about = "Inspect and rewrite Three.js binary models")]
#[command(version)]
struct Cli {
    /// Log every decoded section
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print header fields and section sizes of a binary container
    Inspect { input: PathBuf },

    /// Decode a container and write it back with a recomputed header
    Reencode { input: PathBuf, output: PathBuf },

    /// Read a sidecar model and print per-material triangle counts
    Assemble {
        json: PathBuf,

        /// Skip the topology transform
        #[arg(long)]
        raw: bool,

        /// Seed for colors of groups without a material
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let report = match cli.command {
        Commands::Inspect { input } => inspect(&input)?,
        Commands::Reencode { input, output } => reencode(&input, &output)?,
        Commands::Assemble { json, raw, seed } => {
            let options = AssemblyOptions {
                apply_topology: !raw,
                color_seed: seed,
            };
            assemble_report(&json, &options)?
        }
    };
    print!("{}", report);
    Ok(())
}

fn read_container(path: &Path) -> Result<Container> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    decode_container(BufReader::new(file)).with_context(|| format!("failed to decode {}", path.display()))
}

fn inspect(path: &Path) -> Result<String> {
    let container = read_container(path)?;
    Ok(describe(&container))
}

fn describe(container: &Container) -> String {
    let header: &Header = &container.header;
    let mut out = String::new();
    let _ = writeln!(out, "signature:      {}", String::from_utf8_lossy(&header.signature));
    let _ = writeln!(out, "header bytes:   {}", header.header_bytes);
    let _ = writeln!(
        out,
        "coord widths:   vertex {} normal {} uv {}",
        header.vertex_coordinate_bytes, header.normal_coordinate_bytes, header.uv_coordinate_bytes
    );
    let _ = writeln!(
        out,
        "index widths:   vertex {} normal {} uv {} material {}",
        header.vertex_index_bytes, header.normal_index_bytes, header.uv_index_bytes, header.material_index_bytes
    );
    let _ = writeln!(out, "vertices:       {} ({} bytes)", header.vertex_count, header.vertex_count as u64 * 12);
    let _ = writeln!(out, "normals:        {} ({} bytes)", header.normal_count, header.normal_count as u64 * 3);
    let _ = writeln!(out, "uvs:            {} ({} bytes)", header.uv_count, header.uv_count as u64 * 8);
    for kind in FaceKind::ALL {
        let count = header.face_count(kind);
        if count > 0 {
            let _ = writeln!(
                out,
                "{:<15} {} ({} bytes)",
                format!("{}:", kind),
                count,
                count as u64 * kind.face_bytes() as u64
            );
        }
    }
    let _ = writeln!(out, "total faces:    {}", header.total_faces());
    out
}

fn reencode(input: &Path, output: &Path) -> Result<String> {
    let mut container = read_container(input)?;
    container.setup();
    let bytes = encode_container_to_vec(&container).context("failed to encode container")?;
    fs::write(output, &bytes).with_context(|| format!("failed to write {}", output.display()))?;
    tracing::info!("wrote {} bytes to {}", bytes.len(), output.display());
    Ok(format!("{} -> {} ({} bytes)\n", input.display(), output.display(), bytes.len()))
}

fn assemble_report(json: &Path, options: &AssemblyOptions) -> Result<String> {
    let reader = ModelReader::open(json).with_context(|| format!("failed to read model {}", json.display()))?;
    let node = reader.read_node(options).context("failed to assemble model")?;
    let sidecar = reader.read_sidecar();

    let mut out = String::new();
    let _ = writeln!(out, "vertices:  {}", node.vertices.len());
    let _ = writeln!(out, "normals:   {}", node.normals.len());
    let _ = writeln!(out, "uvs:       {}", node.tex_coords.len());
    let _ = writeln!(out, "triangles: {}", node.face_count());
    for (group, appearance) in node.face_groups.iter().zip(&node.materials) {
        let name = sidecar
            .materials
            .get(group.batch_id as usize)
            .map(|m| m.dbg_name.as_str())
            .unwrap_or("-");
        let [r, g, b] = appearance.color;
        let _ = writeln!(
            out,
            "  [{}] {:<16} {:>8} triangles  #{:02x}{:02x}{:02x}",
            group.batch_id,
            name,
            group.faces.len(),
            r,
            g,
            b
        );
    }
    Ok(out)
}
