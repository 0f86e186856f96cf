//! magno-rel - Magno Relativity field simulator
//!
//! # Commands
//!
//! - `magno-rel run` - Run the simulation and write plots, summary and snapshot
//! - `magno-rel export` - Render an animation of Bz (GIF, or MP4 via ffmpeg)
//!
//! # Examples
//!
//! ```bash
//! # Full run with the demo parameters
//! magno-rel run --params params.json --out-dir outputs
//!
//! # Shorter GIF
//! magno-rel export --seconds 30 --fps 12
//!
//! # MP4 (needs ffmpeg)
//! magno-rel export --mp4 --outfile outputs/demo.mp4
//! ```

use clap::{Parser, Subcommand};
use magno_cli::commands::{export, run};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Magno Relativity - 2D staggered-grid Bz/E field simulator
#[derive(Parser)]
#[command(name = "magno-rel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation and write final-field plot, energy plot,
    /// summary and field snapshot
    Run(run::RunArgs),

    /// Export an animation of the Bz field
    Export(export::ExportArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match &cli.command {
        Commands::Run(args) => run::execute(args).map(|_| ()),
        Commands::Export(args) => export::execute(args).map(|path| {
            if !cli.quiet {
                println!("Done: {}", path.display());
            }
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
