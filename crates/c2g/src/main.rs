//! c2g CLI - mirror Confluence page trees into Google Drive.
//!
//! Provides commands for:
//! - `serve`: Start the JSON API server
//! - `spaces`: List global Confluence spaces
//! - `tree`: Show the page tree under a root page
//! - `export`: Export selected pages to local HTML files
//! - `upload`: Sync the export folder into a Drive folder

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExportArgs, ServeArgs, TreeArgs, UploadArgs};
use output::Output;

/// c2g - Confluence to Google Drive mirror.
#[derive(Parser)]
#[command(name = "c2g", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover c2g.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the JSON API server.
    Serve(ServeArgs),
    /// List global Confluence spaces.
    Spaces,
    /// Show the page tree under a root page.
    Tree(TreeArgs),
    /// Export selected pages to HTML files.
    Export(ExportArgs),
    /// Sync the export folder into Google Drive.
    Upload(UploadArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute(config)),
            Err(e) => Err(e.into()),
        },
        Commands::Spaces => commands::spaces::execute(config),
        Commands::Tree(args) => args.execute(config),
        Commands::Export(args) => args.execute(config),
        Commands::Upload(args) => args.execute(config),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
