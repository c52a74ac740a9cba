//! Command-line entry points for the offline flows: stem separation and
//! motion document inspection.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::document::{self, MotionDocument};
use crate::scene::SceneRegistry;
use crate::separation;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Separate an audio file into the five per-stem files
    Separate {
        /// Input audio file (wav/mp3)
        #[arg(long)]
        input: PathBuf,

        /// Output directory for the separated stems
        #[arg(long)]
        out: PathBuf,

        /// Separation tool binary to invoke
        #[arg(long, default_value = "spleeter")]
        tool: String,
    },

    /// Inspect a saved motion document
    Inspect {
        /// Motion document (`<Name>_scene.json`)
        file: PathBuf,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Separate { input, out, tool } => {
            let stems = separation::separate_stems(&tool, &input, &out)?;
            for (key, path) in &stems {
                println!("{:>7} -> {}  ({})", key.name(), path.display(), key.target());
            }
        }
        Commands::Inspect { file } => {
            let contents = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {:?}", file))?;
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();

            let document = MotionDocument::parse(&contents)?;
            println!("path points: {}", document.motion_path.len());
            match document.camera_position {
                Some(p) => println!("camera: ({}, {}, {})", p.x, p.y, p.z),
                None => println!("camera: not saved"),
            }

            // Dry-run the load against a fresh registry to report the target
            // the interactive app would pick.
            let mut registry = SceneRegistry::new();
            match document::load(&mut registry, name, &contents) {
                Ok(outcome) => println!("target object: {}", outcome.target),
                Err(e) => println!("target object: none ({})", e),
            }
        }
    }
    Ok(())
}
