/// polyview - shaded polyhedron viewer for the terminal
///
/// Controls:
///   - Left mouse drag: Rotate the polyhedron
///   - WASD / Arrow Keys: Rotate about x and y
///   - E/R: Roll rotation
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::Parser;
use polyview_core::load_polyhedron;
use polyview_terminal::TerminalApp;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "polyview")]
#[command(version, about = "Interactive shaded polyhedron viewer", long_about = None)]
struct Cli {
    /// Polyhedron description: `V,F` header, V vertex lines, F face lines
    #[arg(value_name = "MESH_FILE")]
    mesh_file: PathBuf,
}

fn main() -> Result<()> {
    // Logs go to stderr; set RUST_LOG=debug for per-frame details
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mesh = load_polyhedron(&cli.mesh_file)
        .with_context(|| format!("failed to load {}", cli.mesh_file.display()))?;
    info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "starting viewer"
    );

    let mut app = TerminalApp::new(mesh).context("failed to query terminal size")?;
    app.run().context("terminal rendering failed")?;

    Ok(())
}
