//! uclip CLI - Inspect and verify .uclip compressed animation clips
//!
//! # Commands
//!
//! - `uclip info <file>` - Print envelope, header fields, and region layout
//! - `uclip verify <file>` - Re-check integrity and layout consistency
//!
//! # Usage
//!
//! ```bash
//! uclip info walk.uclip
//!
//! # Verbose verification
//! RUST_LOG=debug uclip verify walk.uclip
//! ```

mod info;
mod verify;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Inspect and verify .uclip compressed animation clips
#[derive(Parser)]
#[command(name = "uclip")]
#[command(about = "Inspect and verify .uclip compressed animation clips")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print envelope, header fields, and region layout
    Info(info::InfoArgs),

    /// Re-check envelope integrity and layout consistency
    Verify(verify::VerifyArgs),
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
        Commands::Info(args) => info::execute(args),
        Commands::Verify(args) => verify::execute(args),
    }
}
