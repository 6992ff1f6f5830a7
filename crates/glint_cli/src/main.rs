//! Glint CLI - render and inspect triangle meshes.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "glint")]
#[command(version, about = "Glint - a small deterministic CPU ray tracer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a mesh over the ground plane to an image file.
    Render {
        /// Path to the mesh (`v`/`f` text format).
        mesh: PathBuf,

        /// Output image; `.png` writes PNG, anything else ASCII PPM.
        #[arg(short, long, default_value = "render.png")]
        output: PathBuf,

        /// Image width in pixels (overrides the config file).
        #[arg(long)]
        width: Option<u32>,

        /// Image height in pixels (overrides the config file).
        #[arg(long)]
        height: Option<u32>,

        /// Render config (JSON). Missing fields use the defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Render on the calling thread only.
        #[arg(long)]
        serial: bool,

        /// Give up after this many milliseconds.
        #[arg(long)]
        deadline_ms: Option<u64>,
    },

    /// Print statistics about a mesh file.
    Inspect {
        /// Path to the mesh.
        mesh: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            mesh,
            output,
            width,
            height,
            config,
            serial,
            deadline_ms,
        } => commands::render(commands::RenderArgs {
            mesh,
            output,
            width,
            height,
            config,
            serial,
            deadline_ms,
        }),
        Commands::Inspect { mesh } => commands::inspect(&mesh),
    }
}
